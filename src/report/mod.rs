//! Reporter module: trait-based format dispatch.

pub mod full;
pub mod json;

use crate::diagnostic::{Diagnostic, Severity};
use anyhow::{anyhow, Result};

/// Diagnostics of one checked file.
#[derive(Debug, Clone)]
pub struct FileResult {
    pub path: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl FileResult {
    pub fn new(path: impl Into<String>, mut diagnostics: Vec<Diagnostic>) -> Self {
        diagnostics.sort_by_key(|d| (d.line, d.column));
        Self {
            path: path.into(),
            diagnostics,
        }
    }

    pub fn errors(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warnings(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }
}

/// Trait for rendering check results in a specific output format.
pub trait Reporter {
    fn report(&self, files: &[FileResult]) -> String;
}

/// Create a reporter for the given format name.
pub fn create_reporter(format: &str) -> Result<Box<dyn Reporter>> {
    match format {
        "full" => Ok(Box::new(full::FullReporter)),
        "json" => Ok(Box::new(json::JsonReporter)),
        _ => Err(anyhow!("unknown format: {}. Use full or json", format)),
    }
}
