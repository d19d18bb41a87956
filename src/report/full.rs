//! Full text report: one table per file with problems.

use crate::report::{FileResult, Reporter};

const RULE_WIDTH: usize = 72;

pub struct FullReporter;

impl Reporter for FullReporter {
    fn report(&self, files: &[FileResult]) -> String {
        let mut out = String::new();
        for file in files.iter().filter(|f| !f.diagnostics.is_empty()) {
            out.push_str(&render_file(file));
            out.push('\n');
        }
        out
    }
}

fn render_file(file: &FileResult) -> String {
    let rule = "-".repeat(RULE_WIDTH);
    let width = file
        .diagnostics
        .iter()
        .map(|d| d.line.to_string().len())
        .max()
        .unwrap_or(1);

    let mut lines: Vec<usize> = file.diagnostics.iter().map(|d| d.line).collect();
    lines.dedup();

    let mut out = String::new();
    out.push_str(&format!("FILE: {}\n", file.path));
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&format!(
        "FOUND {} AND {} AFFECTING {} {}\n",
        plural(file.errors(), "ERROR"),
        plural(file.warnings(), "WARNING"),
        lines.len(),
        if lines.len() == 1 { "LINE" } else { "LINES" }
    ));
    out.push_str(&rule);
    out.push('\n');

    for d in &file.diagnostics {
        let fixable = if d.is_fixable() { "[x]" } else { "[ ]" };
        out.push_str(&format!(
            " {:>width$} | {:<7} | {} {}\n",
            d.line,
            d.severity.to_string(),
            fixable,
            d.message
        ));
        out.push_str(&format!(
            " {:>width$} | {:<7} |     ({})\n",
            "",
            "",
            d.source()
        ));
    }

    out.push_str(&rule);
    out.push('\n');
    let fixable = file.diagnostics.iter().filter(|d| d.is_fixable()).count();
    if fixable > 0 {
        out.push_str(&format!(
            "{} MARKED [x] CAN BE FIXED AUTOMATICALLY WITH --fix\n",
            plural(fixable, "PROBLEM")
        ));
        out.push_str(&rule);
        out.push('\n');
    }
    out
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}S")
    }
}
