//! Method signature parser
//!
//! Splits one interface method entry into name, raw parameters and raw returns:
//! `Do(ctx Context, id int) (Result, error)` -> `Do`, `ctx Context, id int`,
//! `(Result, error)`.

use regex::Regex;

use crate::parser::scan::matching_close;

/// Unnormalized pieces of a method signature, borrowed from the entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawMethod<'a> {
    pub name: &'a str,
    pub params: &'a str,
    pub returns: &'a str,
}

/// Parser for single method entries
#[derive(Debug, Clone)]
pub struct MethodParser {
    /// Regex for the method name and opening parenthesis: `Name(`
    name_re: Regex,
}

impl MethodParser {
    pub fn new() -> Self {
        Self {
            name_re: Regex::new(r"^(\w+)\s*\(").unwrap(),
        }
    }

    /// Parse a method entry, or `None` if it isn't a method signature
    ///
    /// The parameter list ends at the parenthesis matching the first `(`, so
    /// function-typed parameters keep their own parentheses.
    pub fn parse<'a>(&self, entry: &'a str) -> Option<RawMethod<'a>> {
        let entry = entry.trim();
        let caps = self.name_re.captures(entry)?;
        let name = caps.get(1)?.as_str();
        let open = caps.get(0)?.end() - 1;
        let close = matching_close(entry, open)?;

        Some(RawMethod {
            name,
            params: entry[open + 1..close].trim(),
            returns: entry[close + 1..].trim(),
        })
    }
}

impl Default for MethodParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Do(ctx Context, id int) (Result, error)", "Do", "ctx Context, id int", "(Result, error)")]
    #[case("Read(p []byte) (n int, err error)", "Read", "p []byte", "(n int, err error)")]
    #[case("Get(string) (*Item, error)", "Get", "string", "(*Item, error)")]
    #[case("Close() error", "Close", "", "error")]
    #[case("Reset()", "Reset", "", "")]
    #[case("Walk(fn func(path string) error) error", "Walk", "fn func(path string) error", "error")]
    #[case("Count()(int, error)", "Count", "", "(int, error)")]
    #[case("  Name() string  ", "Name", "", "string")]
    fn parse_splits_signature(
        #[case] entry: &str,
        #[case] name: &str,
        #[case] params: &str,
        #[case] returns: &str,
    ) {
        let parser = MethodParser::new();
        assert_eq!(
            parser.parse(entry),
            Some(RawMethod {
                name,
                params,
                returns
            })
        );
    }

    #[rstest]
    #[case("io.Reader")]
    #[case("Reader")]
    #[case("Broken(a int")]
    #[case("")]
    fn parse_rejects_non_method_entries(#[case] entry: &str) {
        let parser = MethodParser::new();
        assert_eq!(parser.parse(entry), None);
    }
}
