//! Ruleset configuration, loaded from a JSON file.
//!
//! Every field has a default matching the Vanilla coding standard, so an
//! empty object (or no file at all) is a valid configuration.

use crate::error::{Error, Result};
use crate::text::Capitalization;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Sniffs to run, by name.
    pub sniffs: Vec<String>,
    pub file: BlockRules,
    pub class: BlockRules,
    pub function: BlockRules,
    /// Tags allowed in the file comment, in their required order.
    pub file_tags: Vec<TagSpec>,
    /// `None` disables the copyright notice check.
    pub copyright: Option<CopyrightPolicy>,
    pub throws_capitalization: Capitalization,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sniffs: vec![
                "file-comment".to_string(),
                "class-comment".to_string(),
                "function-comment".to_string(),
            ],
            file: BlockRules::file(),
            class: BlockRules::class(),
            function: BlockRules::function(),
            file_tags: vec![
                TagSpec::new("@copyright", true, true),
                TagSpec::new("@license", false, false),
            ],
            copyright: Some(CopyrightPolicy::default()),
            throws_capitalization: Capitalization::NotLowercase,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Set the year the copyright notice must end with.
    pub fn with_current_year(mut self, year: i32) -> Self {
        if let Some(copyright) = self.copyright.as_mut() {
            copyright.current_year = Some(year);
        }
        self
    }
}

/// Description and layout rules of one kind of doc comment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlockRules {
    /// `None` skips the capital letter checks.
    #[serde(default)]
    pub capitalization: Option<Capitalization>,
    #[serde(default)]
    pub short_single_line: bool,
    /// Only applies to single-line short descriptions.
    #[serde(default)]
    pub short_full_stop: bool,
    #[serde(default)]
    pub long_description: bool,
    #[serde(default)]
    pub blank_line_before_tags: bool,
    #[serde(default)]
    pub closer_own_line: bool,
    #[serde(default)]
    pub no_blank_line_before_closer: bool,
}

impl BlockRules {
    pub fn file() -> Self {
        Self {
            capitalization: None,
            short_single_line: false,
            short_full_stop: false,
            long_description: false,
            blank_line_before_tags: false,
            closer_own_line: false,
            no_blank_line_before_closer: false,
        }
    }

    pub fn class() -> Self {
        Self {
            capitalization: Some(Capitalization::NotLowercase),
            short_single_line: true,
            short_full_stop: true,
            long_description: true,
            blank_line_before_tags: false,
            closer_own_line: true,
            no_blank_line_before_closer: true,
        }
    }

    pub fn function() -> Self {
        Self {
            capitalization: Some(Capitalization::UppercaseOrNonLetter),
            short_single_line: false,
            short_full_stop: false,
            long_description: false,
            blank_line_before_tags: true,
            closer_own_line: false,
            no_blank_line_before_closer: false,
        }
    }
}

impl Default for BlockRules {
    fn default() -> Self {
        Self::file()
    }
}

/// Presence and multiplicity of one tag; its order is its table position.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TagSpec {
    pub name: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub allow_multiple: bool,
}

impl TagSpec {
    pub fn new(name: &str, required: bool, allow_multiple: bool) -> Self {
        Self {
            name: name.to_string(),
            required,
            allow_multiple,
        }
    }
}

/// Expected `@copyright <first_year>-<current_year> <holder>` notice.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CopyrightPolicy {
    pub first_year: i32,
    pub holder: String,
    /// Without a year any four-digit end year is accepted.
    pub current_year: Option<i32>,
}

impl Default for CopyrightPolicy {
    fn default() -> Self {
        Self {
            first_year: 2009,
            holder: "Vanilla Forums Inc.".to_string(),
            current_year: None,
        }
    }
}
