//! Diagnostics and the append-only sink the sniffs write into.

use crate::token::TokenStream;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("ERROR"),
            Severity::Warning => f.write_str("WARNING"),
        }
    }
}

/// Replacement text for the content of a single token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fix {
    pub token: usize,
    pub replacement: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// e.g. `Commenting.FunctionComment`
    pub sniff: &'static str,
    pub code: String,
    pub message: String,
    /// Token the violation is anchored at.
    pub position: usize,
    pub line: usize,
    pub column: usize,
    pub fix: Option<Fix>,
}

impl Diagnostic {
    /// Fully qualified code, `Sniff.Code`.
    pub fn source(&self) -> String {
        format!("{}.{}", self.sniff, self.code)
    }

    pub fn is_fixable(&self) -> bool {
        self.fix.is_some()
    }
}

/// Collects diagnostics for one pass over one file.
///
/// Nothing is ever removed once added.
pub struct Report<'a> {
    stream: &'a TokenStream,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Report<'a> {
    pub fn new(stream: &'a TokenStream) -> Self {
        Self {
            stream,
            diagnostics: Vec::new(),
        }
    }

    pub fn error(
        &mut self,
        sniff: &'static str,
        position: usize,
        code: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.add(Severity::Error, sniff, position, code.into(), message.into(), None);
    }

    pub fn warning(
        &mut self,
        sniff: &'static str,
        position: usize,
        code: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.add(Severity::Warning, sniff, position, code.into(), message.into(), None);
    }

    pub fn fixable_error(
        &mut self,
        sniff: &'static str,
        position: usize,
        code: impl Into<String>,
        message: impl Into<String>,
        fix: Fix,
    ) {
        self.add(
            Severity::Error,
            sniff,
            position,
            code.into(),
            message.into(),
            Some(fix),
        );
    }

    fn add(
        &mut self,
        severity: Severity,
        sniff: &'static str,
        position: usize,
        code: String,
        message: String,
        fix: Option<Fix>,
    ) {
        let (line, column) = match self.stream.get(position).or_else(|| self.stream.iter().last()) {
            Some(token) => (token.line, token.column),
            None => (1, 1),
        };
        self.diagnostics.push(Diagnostic {
            severity,
            sniff,
            code,
            message,
            position,
            line,
            column,
            fix,
        });
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{Token, TokenKind};

    #[test]
    fn anchors_resolve_to_token_location() {
        let stream = TokenStream::new(vec![
            Token::new(TokenKind::OpenTag, "<?php\n", 1, 1),
            Token::new(TokenKind::Variable, "$a", 2, 5),
        ]);
        let mut report = Report::new(&stream);
        report.error("Commenting.FileComment", 1, "Missing", "Missing file doc comment");
        report.warning("Commenting.FileComment", 9, "Late", "past the end");

        let diags = report.into_diagnostics();
        assert_eq!(diags.len(), 2);
        assert_eq!((diags[0].line, diags[0].column), (2, 5));
        assert_eq!(diags[0].source(), "Commenting.FileComment.Missing");
        assert_eq!(diags[1].severity, Severity::Warning);
        assert_eq!(diags[1].line, 2);
    }
}
