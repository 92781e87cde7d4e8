//! Signature normalizer
//!
//! Turns raw parameter and return clauses into the canonical text used by the
//! template:
//! - parameters always carry names (`string, *Item` -> `s0 string, item *Item`)
//! - returns carry only types (`(n int, err error)` -> `(int, error)`)

use crate::parser::go_syntax::{is_identifier, is_keyword, is_predeclared_type};
use crate::parser::scan::{split_top_level, strip_enclosing_parens};
use crate::parser::types::lower_first;

/// Canonical parameter list
///
/// Named parameters are returned unchanged. Unnamed ones get a name derived
/// from their type, see [`derive_param_name`].
pub fn normalize_params(raw_params: &str, has_named_params: bool) -> String {
    if raw_params.trim().is_empty() {
        return String::new();
    }
    if has_named_params {
        return raw_params.to_string();
    }

    let mut used: Vec<String> = Vec::new();
    let mut params = Vec::new();

    for (index, ty) in split_list(raw_params).into_iter().enumerate() {
        let name = derive_param_name(ty, index, &used);
        params.push(format!("{} {}", name, ty));
        used.push(name);
    }

    params.join(", ")
}

/// Canonical return list
///
/// Names are dropped and grouped names expand to one type each. No type gives
/// an empty string, one type stays bare and several are parenthesized.
pub fn normalize_returns(raw_returns: &str) -> String {
    let types = return_types(raw_returns);
    match types.as_slice() {
        [] => String::new(),
        [single] => single.clone(),
        _ => format!("({})", types.join(", ")),
    }
}

/// Argument names of a canonical parameter list, for forwarding a call
///
/// Variadic parameters are spread (`args...`).
pub fn arg_names(params: &str) -> Vec<String> {
    split_list(params)
        .into_iter()
        .map(|entry| match entry.split_once(char::is_whitespace) {
            Some((name, ty)) if ty.trim_start().starts_with("...") => format!("{}...", name),
            Some((name, _)) => name.to_string(),
            None => entry.to_string(),
        })
        .collect()
}

/// Parameter names of a canonical parameter list, without variadic markers
pub fn param_names(params: &str) -> Vec<String> {
    arg_names(params)
        .into_iter()
        .map(|name| name.trim_end_matches("...").to_string())
        .collect()
}

/// Canonical parameter list with blank (`_`) names replaced by positional ones
///
/// A blank parameter can't be forwarded as an argument. The replacement is
/// `p<index>`, extended with `_` until it clashes with no other name.
pub fn name_blank_params(params: &str) -> String {
    let names = param_names(params);
    if !names.iter().any(|name| name == "_") {
        return params.to_string();
    }

    split_list(params)
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let (name, ty) = match entry.split_once(char::is_whitespace) {
                Some((name, ty)) => (name, Some(ty.trim_start())),
                None => (entry, None),
            };
            if name != "_" {
                return entry.to_string();
            }

            let mut positional = format!("p{}", index);
            while names.contains(&positional) {
                positional.push('_');
            }
            match ty {
                Some(ty) => format!("{} {}", positional, ty),
                None => positional,
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Name for the unnamed parameter at `index` with type `ty`
///
/// Decorations (`...`, `[]`, `[N]`, `*`) and the package qualifier are
/// stripped and the first letter lower-cased; slices and variadics are
/// pluralized. When that yields nothing usable (builtin types, keywords,
/// composite types, or a name already taken) the name falls back to the first
/// letter of the type followed by the index: `i0` for a leading `int`.
fn derive_param_name(ty: &str, index: usize, used: &[String]) -> String {
    let is_collection = ty.starts_with("[]") || ty.starts_with("...");
    let stripped = ty.trim_start_matches(|c: char| {
        matches!(c, '.' | '[' | ']' | '*') || c.is_ascii_digit()
    });
    let base = stripped.rsplit('.').next().unwrap_or(stripped);

    let mut name = lower_first(base);
    if is_collection {
        name.push('s');
    }

    let unusable = name == ty
        || !is_identifier(&name)
        || is_keyword(&name)
        || is_predeclared_type(&name)
        || used.contains(&name);
    if !unusable {
        return name;
    }

    let letter: String = ty
        .chars()
        .find(|c| c.is_alphabetic())
        .map(|c| c.to_lowercase().collect())
        .unwrap_or_else(|| "p".to_string());
    format!("{}{}", letter, index)
}

/// Return types in order, one per returned value
fn return_types(raw_returns: &str) -> Vec<String> {
    let raw = raw_returns.trim();
    if raw.is_empty() {
        return Vec::new();
    }

    let inner = strip_enclosing_parens(raw);
    if inner.len() == raw.len() {
        // Unparenthesized: a single bare type
        return vec![raw.to_string()];
    }

    let fields: Vec<(Option<&str>, &str)> = split_list(inner).into_iter().map(split_name).collect();
    if fields.iter().all(|(name, _)| name.is_none()) {
        return fields.iter().map(|(_, ty)| ty.to_string()).collect();
    }

    // Named results: a bare entry is a name sharing the type that follows it,
    // as in `(a, b int)`
    let mut types = Vec::with_capacity(fields.len());
    let mut shared: Option<&str> = None;
    for &(name, ty) in fields.iter().rev() {
        match name {
            Some(_) => {
                shared = Some(ty);
                types.push(ty.to_string());
            }
            None => types.push(shared.unwrap_or(ty).to_string()),
        }
    }
    types.reverse();
    types
}

/// Split `name type` into its parts; a lone type has no name
fn split_name(entry: &str) -> (Option<&str>, &str) {
    let Some((head, tail)) = entry.split_once(char::is_whitespace) else {
        return (None, entry);
    };
    let tail = tail.trim();
    if is_identifier(head) && !is_keyword(head) && !tail.is_empty() {
        (Some(head), tail)
    } else {
        (None, entry)
    }
}

/// Top-level comma-separated entries, trimmed, without empty ones
fn split_list(text: &str) -> Vec<&str> {
    split_top_level(text, &[','])
        .into_iter()
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .collect()
}
