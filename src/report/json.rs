//! JSON report: structured output for tooling integration.

use crate::diagnostic::Severity;
use crate::report::{FileResult, Reporter};
use serde::Serialize;

pub struct JsonReporter;

#[derive(Serialize)]
struct Totals {
    errors: usize,
    warnings: usize,
    fixable: usize,
}

#[derive(Serialize)]
struct FileEntry<'a> {
    errors: usize,
    warnings: usize,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    message: &'a str,
    source: String,
    severity: Severity,
    fixable: bool,
    line: usize,
    column: usize,
}

#[derive(Serialize)]
struct Document {
    totals: Totals,
    /// Keyed by path.
    files: serde_json::Map<String, serde_json::Value>,
}

impl Reporter for JsonReporter {
    fn report(&self, files: &[FileResult]) -> String {
        let mut totals = Totals {
            errors: 0,
            warnings: 0,
            fixable: 0,
        };
        let mut entries = serde_json::Map::new();
        for file in files {
            totals.errors += file.errors();
            totals.warnings += file.warnings();
            totals.fixable += file.diagnostics.iter().filter(|d| d.is_fixable()).count();

            let entry = FileEntry {
                errors: file.errors(),
                warnings: file.warnings(),
                messages: file
                    .diagnostics
                    .iter()
                    .map(|d| Message {
                        message: &d.message,
                        source: d.source(),
                        severity: d.severity,
                        fixable: d.is_fixable(),
                        line: d.line,
                        column: d.column,
                    })
                    .collect(),
            };
            entries.insert(
                file.path.clone(),
                serde_json::to_value(entry).unwrap_or(serde_json::Value::Null),
            );
        }

        let document = Document {
            totals,
            files: entries,
        };
        let mut out = serde_json::to_string_pretty(&document).unwrap_or_default();
        out.push('\n');
        out
    }
}
