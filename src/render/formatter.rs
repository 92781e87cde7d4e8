//! Source formatters for generated mocks
//!
//! The template emits unindented Go. A [`Formatter`] checks it parses and lays
//! it out canonically.

use std::io::Write;
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::debug;

use crate::parser::go_syntax::{first_syntax_error, parse_source};
use crate::parser::scan::bracket_balance;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("syntax error at line {row}, column {column}")]
    Syntax { row: usize, column: usize },

    #[error("Tree-sitter error: {0}")]
    TreeSitter(String),

    #[error("failed to run {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{command} rejected the source: {stderr}")]
    Rejected { command: String, stderr: String },
}

/// Turns unformatted Go source into canonical Go source
pub trait Formatter: Send + Sync {
    fn format(&self, source: &str) -> Result<String, FormatError>;
}

/// In-process formatter: validates with tree-sitter-go, then indents by
/// bracket depth with tabs
#[derive(Debug, Clone, Default)]
pub struct SyntaxFormatter;

impl SyntaxFormatter {
    pub fn new() -> Self {
        Self
    }

    fn check(&self, source: &str) -> Result<(), FormatError> {
        let tree = parse_source(source).map_err(FormatError::TreeSitter)?;
        match first_syntax_error(tree.root_node()) {
            Some(point) => Err(FormatError::Syntax {
                row: point.row + 1,
                column: point.column + 1,
            }),
            None => Ok(()),
        }
    }

    fn reindent(&self, source: &str) -> String {
        let mut lines: Vec<String> = Vec::new();
        let mut depth = 0isize;
        let mut previous_blank = true;

        for line in source.lines() {
            let line = line.trim();
            if line.is_empty() {
                if !previous_blank {
                    lines.push(String::new());
                }
                previous_blank = true;
                continue;
            }

            let (leading_closers, balance) = bracket_balance(line);
            let indent = (depth - leading_closers as isize).max(0) as usize;
            lines.push(format!("{}{}", "\t".repeat(indent), line));
            depth = (depth + balance).max(0);
            previous_blank = false;
        }

        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

impl Formatter for SyntaxFormatter {
    fn format(&self, source: &str) -> Result<String, FormatError> {
        self.check(source)?;
        Ok(self.reindent(source))
    }
}

/// Pipes the source through an external formatter such as `gofmt`
#[derive(Debug, Clone)]
pub struct GofmtFormatter {
    command: String,
}

impl GofmtFormatter {
    pub fn new(command: &str) -> Self {
        Self {
            command: command.to_string(),
        }
    }
}

impl Formatter for GofmtFormatter {
    fn format(&self, source: &str) -> Result<String, FormatError> {
        debug!("Formatting generated source with {}", self.command);

        let spawn_error = |source| FormatError::Spawn {
            command: self.command.clone(),
            source,
        };

        let mut child = Command::new(&self.command)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_error)?;

        // Feed stdin from a separate thread so a full stdout pipe can't deadlock
        let mut stdin = child.stdin.take().ok_or_else(|| {
            spawn_error(std::io::Error::other("stdin was not captured"))
        })?;
        let input = source.to_string();
        let writer = std::thread::spawn(move || stdin.write_all(input.as_bytes()));

        let output = child.wait_with_output().map_err(spawn_error)?;
        match writer.join() {
            // A command that exits without reading closes the pipe early; its
            // exit status decides the outcome
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
            Ok(result) => result.map_err(spawn_error)?,
            Err(_) => return Err(spawn_error(std::io::Error::other("stdin writer panicked"))),
        }

        if !output.status.success() {
            return Err(FormatError::Rejected {
                command: self.command.clone(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
