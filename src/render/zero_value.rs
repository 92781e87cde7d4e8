//! Zero-value synthesizer
//!
//! Maps each return type to the literal a stub returns for it. The mapping is a
//! pure function of the type text.

use crate::parser::scan::{split_top_level, strip_enclosing_parens};
use crate::parser::types::upper_case_letters;

/// Literal returned for a value of type `return_type`
///
/// Builtins map through a fixed table (`error` -> `nil`, integers -> `1`,
/// floats -> `1.1`, `string` -> `""`). Otherwise, in order:
/// - channel and function types -> `nil`
/// - slices -> an empty composite of the slice type (`[]Item{}`)
/// - pointers -> the address of the pointee (`&Item{}`); builtin pointees get no
///   composite braces. Only a leading `*` makes a pointer type
/// - anything else -> an empty composite (`Item{}`, `map[string]*Item{}`)
pub fn zero_value(return_type: &str) -> String {
    let ty = return_type.trim();

    match ty {
        "error" => return "nil".to_string(),
        "int" | "int8" | "int16" | "int32" | "int64" | "uint" | "uint8" | "uint16" | "uint32"
        | "uint64" | "uintptr" | "byte" | "rune" => return "1".to_string(),
        "float32" | "float64" => return "1.1".to_string(),
        "string" | "interface{}" | "any" => return "\"\"".to_string(),
        "bool" => return "false".to_string(),
        _ => {}
    }

    if is_nilable(ty) {
        "nil".to_string()
    } else if ty.contains("[]") {
        format!("{}{{}}", ty)
    } else if let Some(pointee) = ty.strip_prefix('*') {
        if upper_case_letters(pointee).is_empty() {
            format!("&{}", pointee)
        } else {
            format!("&{}{{}}", pointee)
        }
    } else {
        format!("{}{{}}", ty)
    }
}

/// Literals for every type of a canonical return list, in order
pub fn return_values(returns: &str) -> Vec<String> {
    split_top_level(strip_enclosing_parens(returns), &[','])
        .into_iter()
        .map(str::trim)
        .filter(|ty| !ty.is_empty())
        .map(zero_value)
        .collect()
}

fn is_nilable(ty: &str) -> bool {
    ty.starts_with("chan ")
        || ty.starts_with("chan<-")
        || ty.starts_with("<-chan")
        || ty.starts_with("func(")
        || ty.starts_with("func ")
}
