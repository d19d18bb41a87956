//! Sniffs: trait-based dispatch over the token stream.

pub mod class_comment;
pub mod file_comment;
pub mod function_comment;
pub mod params;
pub mod rules;
pub mod tags;

use crate::config::Config;
use crate::diagnostic::{Diagnostic, Report};
use crate::error::{Error, Result};
use crate::token::{TokenKind, TokenStream};
use tracing::debug;

/// A check invoked for every token of the kinds it registers for.
///
/// Implementations keep no state between calls; everything they need comes
/// in through the arguments.
pub trait Sniff {
    fn name(&self) -> &'static str;
    fn register(&self) -> &'static [TokenKind];
    fn process(&self, stream: &TokenStream, position: usize, report: &mut Report);
}

/// Create the sniffs named in the configuration.
pub fn create_sniffs(config: &Config) -> Result<Vec<Box<dyn Sniff>>> {
    config
        .sniffs
        .iter()
        .map(|name| create_sniff(name, config))
        .collect()
}

/// Create a single sniff by name.
pub fn create_sniff(name: &str, config: &Config) -> Result<Box<dyn Sniff>> {
    match name {
        "file-comment" => Ok(Box::new(file_comment::FileComment::new(config))),
        "class-comment" => Ok(Box::new(class_comment::ClassComment::new(config))),
        "function-comment" => Ok(Box::new(function_comment::FunctionComment::new(config))),
        _ => Err(Error::UnknownSniff(name.to_string())),
    }
}

/// Run every sniff over the stream in one left-to-right pass.
pub fn run(stream: &TokenStream, sniffs: &[Box<dyn Sniff>]) -> Vec<Diagnostic> {
    let mut report = Report::new(stream);
    for (position, token) in stream.iter().enumerate() {
        for sniff in sniffs {
            if sniff.register().contains(&token.kind) {
                let before = report.diagnostics().len();
                sniff.process(stream, position, &mut report);
                debug!(
                    sniff = sniff.name(),
                    line = token.line,
                    found = report.diagnostics().len() - before,
                    "processed"
                );
            }
        }
    }
    report.into_diagnostics()
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::lexer::tokenize;

    /// Run one sniff over `src` with the given config.
    pub fn check(src: &str, sniff: &str, config: &Config) -> Vec<Diagnostic> {
        let stream = tokenize(src).unwrap();
        let sniffs = vec![create_sniff(sniff, config).unwrap()];
        run(&stream, &sniffs)
    }

    pub fn codes(diagnostics: &[Diagnostic]) -> Vec<&str> {
        diagnostics.iter().map(|d| d.code.as_str()).collect()
    }
}
