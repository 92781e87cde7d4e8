//! Parser layer
//! - interface.rs: locates an interface declaration and splits its method list
//! - method.rs: splits one method entry into name, parameters and returns
//! - normalize.rs: canonical parameter and return text
//! - imports.rs: imports referenced by the interface's signatures
//! - go_syntax.rs: tree-sitter-go helpers and Go lexical tables
//! - scan.rs: bracket matching and splitting that skips comments and literals
//! - types.rs: Interface and method descriptors

pub mod go_syntax;
pub mod imports;
pub mod interface;
pub mod method;
pub mod normalize;
pub mod scan;
pub mod types;

pub use interface::InterfaceExtractor;
pub use method::{MethodParser, RawMethod};
pub use normalize::{arg_names, normalize_params, normalize_returns};
pub use types::{ImportSpec, InterfaceDescriptor, MethodDescriptor};
