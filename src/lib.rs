//! docsniff: checks and fixes the structure of PHP doc comments.
//!
//! A source file is tokenized once, every configured sniff is run over the
//! tokens in a single left-to-right pass, and fixable problems can be
//! rewritten in place:
//!
//! ```no_run
//! use docsniff::{config::Config, sniffs};
//!
//! let config = Config::default().with_current_year(2024);
//! let sniffs = sniffs::create_sniffs(&config)?;
//! let diagnostics = docsniff::check("<?php\n$a = 1;\n", &sniffs)?;
//! assert_eq!(diagnostics[0].code, "Missing");
//! # Ok::<(), docsniff::Error>(())
//! ```

pub mod config;
pub mod diagnostic;
pub mod docblock;
pub mod error;
pub mod fixer;
pub mod lexer;
pub mod locate;
mod navigator;
pub mod report;
pub mod signature;
pub mod sniffs;
pub mod text;
pub mod token;

pub use config::Config;
pub use diagnostic::{Diagnostic, Fix, Severity};
pub use error::{Error, Result};

use sniffs::Sniff;

/// Tokenize `source` and run `sniffs` over it.
pub fn check(source: &str, sniffs: &[Box<dyn Sniff>]) -> Result<Vec<Diagnostic>> {
    let stream = lexer::tokenize(source)?;
    Ok(sniffs::run(&stream, sniffs))
}
