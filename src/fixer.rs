//! Applies fixable diagnostics as token replacements.
//!
//! Edits never touch the token list in place. Each pass rebuilds the source
//! from the original tokens plus the pending replacements, and the caller
//! re-tokenizes before the next pass.

use crate::diagnostic::Diagnostic;
use crate::error::Result;
use crate::lexer::tokenize;
use crate::sniffs::{self, Sniff};
use crate::token::TokenStream;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Upper bound on fix-apply-reparse passes for one file.
pub const MAX_PASSES: usize = 50;

/// Result of one rewrite pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub source: String,
    /// Distinct edits written.
    pub applied: usize,
    /// Edits skipped because another edit already claimed their token.
    pub conflicts: usize,
}

/// Rewrite `stream` with every fix carried by `diagnostics`.
///
/// Identical edits of one token collapse into one. A different edit of an
/// already claimed token is skipped; the next pass reports it again.
pub fn apply(stream: &TokenStream, diagnostics: &[Diagnostic]) -> Applied {
    let mut edits: BTreeMap<usize, &str> = BTreeMap::new();
    let mut conflicts = 0;
    for fix in diagnostics.iter().filter_map(|d| d.fix.as_ref()) {
        match edits.get(&fix.token) {
            None => {
                edits.insert(fix.token, &fix.replacement);
            }
            Some(existing) if *existing == fix.replacement => {}
            Some(_) => conflicts += 1,
        }
    }

    let source = stream
        .iter()
        .enumerate()
        .map(|(i, token)| edits.get(&i).copied().unwrap_or(&token.content))
        .collect();

    Applied {
        source,
        applied: edits.len(),
        conflicts,
    }
}

/// Outcome of fixing one file.
#[derive(Debug, Clone)]
pub struct FixOutcome {
    pub source: String,
    pub passes: usize,
    /// Edits written over all passes.
    pub fixed: usize,
    /// Diagnostics of the final source.
    pub remaining: Vec<Diagnostic>,
}

/// Fix, re-tokenize and re-check until no fixable diagnostic is left.
pub fn fix_source(source: &str, sniffs: &[Box<dyn Sniff>]) -> Result<FixOutcome> {
    let mut current = source.to_string();
    let mut fixed = 0;
    let mut passes = 0;

    loop {
        let stream = tokenize(&current)?;
        let diagnostics = sniffs::run(&stream, sniffs);
        let fixable = diagnostics.iter().filter(|d| d.is_fixable()).count();

        if fixable == 0 || passes == MAX_PASSES {
            if fixable > 0 {
                warn!(passes, fixable, "fixes did not converge");
            }
            return Ok(FixOutcome {
                source: current,
                passes,
                fixed,
                remaining: diagnostics,
            });
        }

        let applied = apply(&stream, &diagnostics);
        passes += 1;
        fixed += applied.applied;
        debug!(
            pass = passes,
            applied = applied.applied,
            conflicts = applied.conflicts,
            "fix pass"
        );
        if applied.source == current {
            return Ok(FixOutcome {
                source: current,
                passes,
                fixed,
                remaining: diagnostics,
            });
        }
        current = applied.source;
    }
}
