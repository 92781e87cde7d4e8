//! Descriptors of a parsed interface, consumed by the renderer

/// An interface and its method set, ready to be rendered as a stub
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceDescriptor {
    /// Interface name as declared (e.g., "Reader")
    pub name: String,
    /// Receiver identifier for the generated stub (e.g., "r" for "Reader")
    pub abbreviation: String,
    /// Methods in source declaration order
    pub methods: Vec<MethodDescriptor>,
    /// Imports of the source file referenced by the method signatures
    pub imports: Vec<ImportSpec>,
}

impl InterfaceDescriptor {
    pub fn new(name: &str, methods: Vec<MethodDescriptor>) -> Self {
        Self {
            name: name.to_string(),
            abbreviation: abbreviation(name),
            methods,
            imports: Vec::new(),
        }
    }

    pub fn with_imports(mut self, imports: Vec<ImportSpec>) -> Self {
        self.imports = imports;
        self
    }
}

/// One method of an interface, in canonical textual form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub name: String,
    /// Comma-separated `name type` pairs (e.g., "ctx context.Context, id int")
    pub params: String,
    /// Return types: empty, a single bare type, or a parenthesized list
    pub returns: String,
}

/// A single import of the source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
    /// Explicit package name (`alias "path"`), including `_` and `.`
    pub alias: Option<String>,
    /// Import path without quotes
    pub path: String,
}

impl ImportSpec {
    /// Name under which the package is referenced in source, if any
    ///
    /// Blank and dot imports have none. Without an alias the last path segment
    /// is used, skipping `/vN` major-version suffixes and `.vN` gopkg.in suffixes.
    pub fn package_name(&self) -> Option<&str> {
        match self.alias.as_deref() {
            Some("_") | Some(".") => None,
            Some(alias) => Some(alias),
            None => {
                let mut segments = self.path.rsplit('/');
                let last = segments.next()?;
                let name = if is_major_version(last) {
                    segments.next()?
                } else {
                    last
                };
                name.split('.').next()
            }
        }
    }
}

fn is_major_version(segment: &str) -> bool {
    segment
        .strip_prefix('v')
        .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()))
}

/// Concatenation of the upper-case letters of `name`, lower-cased
pub fn upper_case_letters(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_uppercase())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Receiver identifier derived from an interface name
///
/// Unexported names have no upper-case letters; their first letter is used instead.
pub fn abbreviation(name: &str) -> String {
    let letters = upper_case_letters(name);
    if !letters.is_empty() {
        return letters;
    }
    name.chars().take(1).flat_map(char::to_lowercase).collect()
}

/// `name` with its first letter lower-cased
pub fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
