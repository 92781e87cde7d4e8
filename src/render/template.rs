//! Mock file template
//!
//! Expands an [`InterfaceDescriptor`] into Go source. The expansion is not
//! indented; the formatter turns it into canonical source.
//!
//! Generated layout for `type Getter interface { Get(string) (*Item, error) }`:
//! ```text
//! // Code generated by go-mocker. DO NOT EDIT.
//!
//! package mock
//!
//! type GetterMock struct{}
//!
//! func (g *GetterMock) Get(s0 string) (*Item, error) {
//!     return &Item{}, nil
//! }
//! ```
//!
//! With hooks enabled the struct gets one `<Method>Fn` field per method and each
//! method delegates to it when set.

use crate::config::{DEFAULT_PACKAGE, DEFAULT_SUFFIX};
use crate::parser::normalize::{arg_names, name_blank_params, param_names};
use crate::parser::types::{ImportSpec, InterfaceDescriptor, MethodDescriptor};
use crate::render::zero_value::return_values;

/// Header marking the file as generated
pub const GENERATED_HEADER: &str = "// Code generated by go-mocker. DO NOT EDIT.";

/// Fixed template, configured once and shared by every rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockTemplate {
    /// Package clause of the generated file
    pub package: String,
    /// Appended to the interface name to form the stub type name
    pub suffix: String,
    /// Whether stubs delegate to caller-provided `<Method>Fn` fields
    pub hooks: bool,
}

impl Default for MockTemplate {
    fn default() -> Self {
        Self {
            package: DEFAULT_PACKAGE.to_string(),
            suffix: DEFAULT_SUFFIX.to_string(),
            hooks: false,
        }
    }
}

impl MockTemplate {
    pub fn new(package: &str, suffix: &str, hooks: bool) -> Self {
        Self {
            package: package.to_string(),
            suffix: suffix.to_string(),
            hooks,
        }
    }

    /// Name of the stub type generated for `interface`
    pub fn type_name(&self, interface: &str) -> String {
        format!("{}{}", interface, self.suffix)
    }

    /// Unformatted Go source for the stub
    pub fn expand(&self, descriptor: &InterfaceDescriptor) -> String {
        let mut out = String::new();

        out.push_str(GENERATED_HEADER);
        out.push_str("\n\n");
        out.push_str(&format!("package {}\n\n", self.package));
        self.expand_imports(&descriptor.imports, &mut out);
        self.expand_struct(descriptor, &mut out);

        for method in &descriptor.methods {
            out.push('\n');
            self.expand_method(descriptor, method, &mut out);
        }

        out
    }

    fn expand_imports(&self, imports: &[ImportSpec], out: &mut String) {
        match imports {
            [] => {}
            [single] => out.push_str(&format!("import {}\n\n", import_line(single))),
            _ => {
                out.push_str("import (\n");
                for import in imports {
                    out.push_str(&import_line(import));
                    out.push('\n');
                }
                out.push_str(")\n\n");
            }
        }
    }

    fn expand_struct(&self, descriptor: &InterfaceDescriptor, out: &mut String) {
        let type_name = self.type_name(&descriptor.name);

        if !self.hooks || descriptor.methods.is_empty() {
            out.push_str(&format!("type {} struct{{}}\n", type_name));
            return;
        }

        let fields: Vec<(String, String)> = descriptor
            .methods
            .iter()
            .map(|m| (hook_field(m), func_type(m)))
            .collect();
        let width = fields.iter().map(|(name, _)| name.len()).max().unwrap_or(0);

        out.push_str(&format!("type {} struct {{\n", type_name));
        for (name, ty) in &fields {
            out.push_str(&format!("{:<width$} {}\n", name, ty, width = width));
        }
        out.push_str("}\n");
    }

    fn expand_method(
        &self,
        descriptor: &InterfaceDescriptor,
        method: &MethodDescriptor,
        out: &mut String,
    ) {
        // Blank parameters can't be forwarded to a hook
        let params = if self.hooks {
            name_blank_params(&method.params)
        } else {
            method.params.clone()
        };
        let receiver = receiver_name(&descriptor.abbreviation, &params);
        let signature = format!("{}({}) {}", method.name, params, method.returns);

        out.push_str(&format!(
            "func ({} *{}) {} {{\n",
            receiver,
            self.type_name(&descriptor.name),
            signature.trim_end()
        ));

        let has_returns = !method.returns.is_empty();

        if self.hooks {
            let field = hook_field(method);
            let call = format!(
                "{}.{}({})",
                receiver,
                field,
                arg_names(&params).join(", ")
            );
            out.push_str(&format!("if {}.{} != nil {{\n", receiver, field));
            if has_returns {
                out.push_str(&format!("return {}\n", call));
            } else {
                out.push_str(&format!("{}\n", call));
            }
            out.push_str("}\n");
        }

        if has_returns {
            out.push_str(&format!(
                "return {}\n",
                return_values(&method.returns).join(", ")
            ));
        }

        out.push_str("}\n");
    }
}

/// Receiver identifier for one method: the abbreviation, suffixed with `m` while
/// it clashes with a parameter name
fn receiver_name(abbreviation: &str, params: &str) -> String {
    let names = param_names(params);
    let mut receiver = abbreviation.to_string();
    while names.contains(&receiver) {
        receiver.push('m');
    }
    receiver
}

fn hook_field(method: &MethodDescriptor) -> String {
    format!("{}Fn", method.name)
}

fn func_type(method: &MethodDescriptor) -> String {
    format!("func({}) {}", method.params, method.returns)
        .trim_end()
        .to_string()
}

fn import_line(import: &ImportSpec) -> String {
    match &import.alias {
        Some(alias) => format!("{} \"{}\"", alias, import.path),
        None => format!("\"{}\"", import.path),
    }
}
