//! Interface extractor
//!
//! Locates `type <Name> interface { ... }` in Go source and splits its body into
//! one raw entry per method.
//!
//! The closing brace is found by tracking bracket depth, so method signatures
//! containing braces (`interface{}`, `struct{}`, inline function types) do not
//! truncate the body. Comments are stripped before splitting.

use regex::Regex;
use tracing::debug;

use crate::error::MockError;
use crate::parser::scan::{matching_close, split_top_level, strip_comments};

/// Extractor for interface declarations
#[derive(Debug, Clone)]
pub struct InterfaceExtractor {
    /// Regex for the declaration header: `type Name interface {`
    header_re: Regex,
}

impl InterfaceExtractor {
    pub fn new() -> Self {
        Self {
            // Match: type Name interface {
            header_re: Regex::new(r"\btype\s+(\w+)\s+interface\s*\{").unwrap(),
        }
    }

    /// Names of all interfaces declared in `source`, in declaration order
    pub fn interface_names(&self, source: &str) -> Vec<String> {
        let code = strip_comments(source);
        let mut names: Vec<String> = Vec::new();

        for caps in self.header_re.captures_iter(&code) {
            let name = &caps[1];
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }

        names
    }

    /// Whether `source` declares an interface called `name`
    pub fn declares(&self, source: &str, name: &str) -> bool {
        let code = strip_comments(source);
        self.header_re
            .captures_iter(&code)
            .any(|caps| &caps[1] == name)
    }

    /// Raw method entries of the interface `name`, one per method
    pub fn extract_methods(&self, source: &str, name: &str) -> Result<Vec<String>, MockError> {
        let code = strip_comments(source);

        let header = self
            .header_re
            .captures_iter(&code)
            .find(|caps| &caps[1] == name)
            .and_then(|caps| caps.get(0))
            .ok_or_else(|| MockError::InterfaceNotFound(name.to_string()))?;

        // The header match ends with the opening brace
        let open = header.end() - 1;
        let close = matching_close(&code, open)
            .ok_or_else(|| MockError::InterfaceNotFound(name.to_string()))?;
        let body = &code[open + 1..close];

        let methods: Vec<String> = split_top_level(body, &['\n', ';'])
            .into_iter()
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(collapse_multiline)
            .collect();

        debug!("Interface {} has {} method entries", name, methods.len());
        Ok(methods)
    }
}

impl Default for InterfaceExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Join a signature spread over several lines into one line
///
/// `Do(\n\tctx context.Context,\n\tid int,\n) error` becomes
/// `Do(ctx context.Context, id int) error`.
fn collapse_multiline(entry: &str) -> String {
    if !entry.contains('\n') {
        return entry.to_string();
    }

    entry
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace("( ", "(")
        .replace(",)", ")")
        .replace(", )", ")")
}
