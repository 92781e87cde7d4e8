//! Mock synthesis engine
//!
//! `(source, interface name) -> Go stub source`. Extraction, method parsing,
//! normalization and rendering are pure over their inputs, so a [`Mocker`] can
//! be shared across tasks.

use tracing::{debug, info, warn};

use crate::config::MockerConfig;
use crate::error::MockError;
use crate::parser::go_syntax::has_named_params;
use crate::parser::imports::{referenced_imports, source_imports};
use crate::parser::{
    normalize_params, normalize_returns, InterfaceDescriptor, InterfaceExtractor,
    MethodDescriptor, MethodParser,
};
use crate::render::Renderer;

#[derive(Debug, Clone, Default)]
pub struct Mocker {
    extractor: InterfaceExtractor,
    method_parser: MethodParser,
    renderer: Renderer,
}

impl Mocker {
    pub fn new(renderer: Renderer) -> Self {
        Self {
            extractor: InterfaceExtractor::new(),
            method_parser: MethodParser::new(),
            renderer,
        }
    }

    pub fn from_config(config: &MockerConfig) -> Self {
        Self::new(Renderer::from_config(config))
    }

    /// Names of the interfaces declared in `source`, in declaration order
    pub fn interface_names(&self, source: &str) -> Vec<String> {
        self.extractor.interface_names(source)
    }

    /// Whether `source` declares the interface `name`
    pub fn declares(&self, source: &str, name: &str) -> bool {
        self.extractor.declares(source, name)
    }

    /// Parse and normalize the interface `name` of `source`
    ///
    /// Fails on the first method entry that isn't a valid signature.
    pub fn describe(&self, source: &str, name: &str) -> Result<InterfaceDescriptor, MockError> {
        let entries = self.extractor.extract_methods(source, name)?;

        let mut methods = Vec::with_capacity(entries.len());
        for entry in &entries {
            let Some(raw) = self.method_parser.parse(entry) else {
                warn!("Couldn't parse method {:?} of interface {}", entry, name);
                return Err(MockError::MethodNotFound {
                    interface: name.to_string(),
                    line: entry.clone(),
                });
            };

            let named = has_named_params(raw.params, raw.returns)?;
            let method = MethodDescriptor {
                name: raw.name.to_string(),
                params: normalize_params(raw.params, named),
                returns: normalize_returns(raw.returns),
            };
            debug!(
                "Parsed {}.{}({}) {}",
                name, method.name, method.params, method.returns
            );
            methods.push(method);
        }

        let imports = referenced_imports(&source_imports(source)?, &methods);
        Ok(InterfaceDescriptor::new(name, methods).with_imports(imports))
    }

    /// Go stub source for the interface `name` declared in `source`
    pub fn synthesize(&self, source: &str, name: &str) -> Result<String, MockError> {
        let descriptor = self.describe(source, name)?;
        let output = self.renderer.render(&descriptor)?;
        info!(
            "Synthesized mock for {} ({} methods)",
            name,
            descriptor.methods.len()
        );
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use rstest::rstest;

    const STORE: &str = r#"package store

import (
	"context"
	"time"
)

type Item struct{}

// Store persists items.
type Store interface {
	// Get fetches one item.
	Get(ctx context.Context, id string) (*Item, error)
	List(context.Context, int) ([]Item, error)
	Touch(at time.Time)
	Count() (n int, err error)
	Close() error
}
"#;

    #[test]
    fn describe_normalizes_every_method() {
        let result = Mocker::default().describe(STORE, "Store").unwrap();

        assert_eq!(result.name, "Store");
        assert_eq!(result.abbreviation, "s");
        assert_eq!(
            result.methods,
            vec![
                MethodDescriptor {
                    name: "Get".to_string(),
                    params: "ctx context.Context, id string".to_string(),
                    returns: "(*Item, error)".to_string(),
                },
                MethodDescriptor {
                    name: "List".to_string(),
                    params: "context context.Context, i1 int".to_string(),
                    returns: "([]Item, error)".to_string(),
                },
                MethodDescriptor {
                    name: "Touch".to_string(),
                    params: "at time.Time".to_string(),
                    returns: String::new(),
                },
                MethodDescriptor {
                    name: "Count".to_string(),
                    params: String::new(),
                    returns: "(int, error)".to_string(),
                },
                MethodDescriptor {
                    name: "Close".to_string(),
                    params: String::new(),
                    returns: "error".to_string(),
                },
            ]
        );
        let paths: Vec<&str> = result.imports.iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, vec!["context", "time"]);
    }

    #[test]
    fn synthesize_renders_stub_for_single_method_interface() {
        let source = "package io\n\ntype Reader interface {\n\tRead(p []byte) (n int, err error)\n}\n";
        let result = Mocker::default().synthesize(source, "Reader").unwrap();

        assert_eq!(
            result,
            "// Code generated by go-mocker. DO NOT EDIT.\n\
             \n\
             package mock\n\
             \n\
             type ReaderMock struct{}\n\
             \n\
             func (r *ReaderMock) Read(p []byte) (int, error) {\n\
             \treturn 1, nil\n\
             }\n"
        );
    }

    #[test]
    fn synthesize_uses_abbreviation_of_upper_case_letters() {
        let source = "type PredNamed interface {\n\tMethod(s string) (int, error)\n}\n";
        let result = Mocker::default().synthesize(source, "PredNamed").unwrap();
        assert!(result.contains("func (pn *PredNamedMock) Method(s string) (int, error) {\n"));
    }

    #[rstest]
    #[case("All() (map[string]*Item, error)", "return map[string]*Item{}, nil\n")]
    #[case("Pair() [2]*Item", "return [2]*Item{}\n")]
    #[case("First() *Item", "return &Item{}\n")]
    fn synthesize_renders_composites_holding_pointers(#[case] method: &str, #[case] expected: &str) {
        let source = format!("type Cache interface {{\n\t{}\n}}\n", method);
        let result = Mocker::default().synthesize(&source, "Cache").unwrap();
        assert!(result.contains(expected), "missing {:?} in\n{}", expected, result);
    }

    #[test]
    fn synthesize_renders_empty_interface() {
        let source = "type Marker interface {\n}\n";
        let result = Mocker::default().synthesize(source, "Marker").unwrap();
        assert!(result.ends_with("type MarkerMock struct{}\n"));
    }

    #[rstest]
    #[case("type Reader interface {\n\tRead(p []byte) error\n}\n", "Writer")]
    #[case("type Reader interface {\n\tRead(p []byte) error\n", "Reader")]
    #[case("type Reader struct {\n\tbuf []byte\n}\n", "Reader")]
    fn synthesize_reports_missing_interface(#[case] source: &str, #[case] name: &str) {
        let error = Mocker::default().synthesize(source, name).unwrap_err();
        assert!(matches!(error, MockError::InterfaceNotFound(ref n) if n == name));
        assert_eq!(error.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn synthesize_fails_on_unparsable_method() {
        let source = "type ReadCloser interface {\n\tio.Reader\n\tClose() error\n}\n";
        let error = Mocker::default().synthesize(source, "ReadCloser").unwrap_err();

        assert!(matches!(
            error,
            MockError::MethodNotFound { ref interface, ref line }
                if interface == "ReadCloser" && line == "io.Reader"
        ));
        assert_eq!(error.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn synthesize_fails_on_invalid_signature() {
        let source = "type Broken interface {\n\tDo(a int,, b) error\n}\n";
        let error = Mocker::default().synthesize(source, "Broken").unwrap_err();
        assert!(matches!(error, MockError::InvalidSignature { .. }));
    }

    #[test]
    fn synthesize_is_deterministic() {
        let mocker = Mocker::default();
        let first = mocker.synthesize(STORE, "Store").unwrap();
        let second = mocker.synthesize(STORE, "Store").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn interface_names_lists_declarations() {
        let source = "type A interface{}\ntype B struct{}\ntype C interface {\n\tM()\n}\n";
        assert_eq!(Mocker::default().interface_names(source), vec!["A", "C"]);
    }
}
