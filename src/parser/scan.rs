//! Lexical helpers shared by the extractor, method parser and normalizer
//!
//! Go source is scanned character by character, tracking whether each character
//! belongs to code, a literal (`"..."`, `'x'`, `` `...` ``) or a comment. Brackets
//! are only counted in code, so braces inside comments or strings never affect
//! block matching.

/// Where a character sits in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Code,
    Literal,
    Comment,
}

/// Classify every character of `text` with its byte offset
pub fn classify(text: &str) -> Vec<(usize, char, Region)> {
    let mut out = Vec::with_capacity(text.len());
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match c {
            '/' if matches!(chars.peek(), Some((_, '/'))) => {
                out.push((i, c, Region::Comment));
                while let Some(&(j, d)) = chars.peek() {
                    if d == '\n' {
                        break;
                    }
                    out.push((j, d, Region::Comment));
                    chars.next();
                }
            }
            '/' if matches!(chars.peek(), Some((_, '*'))) => {
                out.push((i, c, Region::Comment));
                if let Some((j, d)) = chars.next() {
                    out.push((j, d, Region::Comment));
                }
                let mut prev = ' ';
                for (j, d) in chars.by_ref() {
                    out.push((j, d, Region::Comment));
                    if prev == '*' && d == '/' {
                        break;
                    }
                    prev = d;
                }
            }
            '"' | '\'' | '`' => {
                out.push((i, c, Region::Literal));
                let raw = c == '`';
                let mut escaped = false;
                for (j, d) in chars.by_ref() {
                    out.push((j, d, Region::Literal));
                    if !raw {
                        if escaped {
                            escaped = false;
                            continue;
                        }
                        if d == '\\' {
                            escaped = true;
                            continue;
                        }
                        // Unterminated interpreted literal ends at the line break
                        if d == '\n' {
                            break;
                        }
                    }
                    if d == c {
                        break;
                    }
                }
            }
            _ => out.push((i, c, Region::Code)),
        }
    }

    out
}

fn is_open(c: char) -> bool {
    matches!(c, '(' | '[' | '{')
}

fn is_close(c: char) -> bool {
    matches!(c, ')' | ']' | '}')
}

/// Byte offset of the bracket closing the one at `open`, tracking nesting depth
pub fn matching_close(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;

    for (i, c, region) in classify(text) {
        if i < open || region != Region::Code {
            continue;
        }
        if is_open(c) {
            depth += 1;
        } else if is_close(c) {
            depth = depth.checked_sub(1)?;
            if depth == 0 {
                return Some(i);
            }
        }
    }

    None
}

/// Split `text` at any of `separators` occurring outside brackets, literals and comments
pub fn split_top_level<'a>(text: &'a str, separators: &[char]) -> Vec<&'a str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;

    for (i, c, region) in classify(text) {
        if region != Region::Code {
            continue;
        }
        if is_open(c) {
            depth += 1;
        } else if is_close(c) {
            depth -= 1;
        } else if depth == 0 && separators.contains(&c) {
            parts.push(&text[start..i]);
            start = i + c.len_utf8();
        }
    }
    parts.push(&text[start..]);

    parts
}

/// Replace comments with spaces, keeping line breaks and byte offsets intact
pub fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());

    for (_, c, region) in classify(text) {
        match region {
            Region::Comment if c == '\n' => out.push('\n'),
            Region::Comment => out.extend(std::iter::repeat_n(' ', c.len_utf8())),
            _ => out.push(c),
        }
    }

    out
}

/// Strip one pair of parentheses when they enclose the whole text
pub fn strip_enclosing_parens(text: &str) -> &str {
    let text = text.trim();
    if text.starts_with('(') && matching_close(text, 0) == Some(text.len() - 1) {
        &text[1..text.len() - 1]
    } else {
        text
    }
}

/// Number of closing brackets that lead the line, and the line's net bracket balance
pub fn bracket_balance(line: &str) -> (usize, isize) {
    let mut leading_closers = 0;
    let mut leading = true;
    let mut balance = 0isize;

    for (_, c, region) in classify(line) {
        if region != Region::Code {
            leading = false;
            continue;
        }
        if is_open(c) {
            balance += 1;
            leading = false;
        } else if is_close(c) {
            balance -= 1;
            if leading {
                leading_closers += 1;
            }
        } else if !c.is_whitespace() {
            leading = false;
        }
    }

    (leading_closers, balance)
}
