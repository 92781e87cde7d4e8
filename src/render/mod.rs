//! Stub rendering
//! - zero_value.rs: literal returned for each return type
//! - template.rs: expands a descriptor into unformatted Go source
//! - formatter.rs: validates and lays out the expansion

pub mod formatter;
pub mod template;
pub mod zero_value;

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::{FormatterKind, MockerConfig};
use crate::error::MockError;
use crate::parser::types::InterfaceDescriptor;
use formatter::{Formatter, GofmtFormatter, SyntaxFormatter};
use template::MockTemplate;

pub use zero_value::{return_values, zero_value};

/// Template plus formatter, shared by every synthesis
#[derive(Clone)]
pub struct Renderer {
    template: MockTemplate,
    formatter: Arc<dyn Formatter>,
}

impl Renderer {
    pub fn new(template: MockTemplate, formatter: Arc<dyn Formatter>) -> Self {
        Self {
            template,
            formatter,
        }
    }

    pub fn from_config(config: &MockerConfig) -> Self {
        let template = MockTemplate::new(
            &config.template.package,
            &config.template.suffix,
            config.template.hooks,
        );
        let formatter: Arc<dyn Formatter> = match config.formatter.kind {
            FormatterKind::Builtin => Arc::new(SyntaxFormatter::new()),
            FormatterKind::Gofmt => Arc::new(GofmtFormatter::new(&config.formatter.command)),
        };
        Self::new(template, formatter)
    }

    pub fn template(&self) -> &MockTemplate {
        &self.template
    }

    /// Formatted Go source of the stub for `descriptor`
    pub fn render(&self, descriptor: &InterfaceDescriptor) -> Result<String, MockError> {
        let unformatted = self.template.expand(descriptor);

        self.formatter.format(&unformatted).map_err(|source| {
            warn!(
                "Formatter rejected generated mock for {}: {}",
                descriptor.name, source
            );
            debug!("Unformatted mock for {}:\n{}", descriptor.name, unformatted);
            MockError::Render {
                interface: descriptor.name.clone(),
                source,
                unformatted,
            }
        })
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(MockTemplate::default(), Arc::new(SyntaxFormatter::new()))
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("template", &self.template)
            .finish_non_exhaustive()
    }
}
