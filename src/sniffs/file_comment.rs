//! File doc comment: placement after the open tag and the tag table.

use super::rules::{check_closer_alone, check_descriptions, check_trailing_blank_lines};
use super::tags::check_tag_table;
use super::Sniff;
use crate::config::{BlockRules, Config, CopyrightPolicy, TagSpec};
use crate::diagnostic::Report;
use crate::docblock::{parse, Construct};
use crate::locate::{for_file, Ownership};
use crate::token::{TokenKind, TokenStream};

const NAME: &str = "Commenting.FileComment";

pub struct FileComment {
    rules: BlockRules,
    tags: Vec<TagSpec>,
    copyright: Option<CopyrightPolicy>,
}

impl FileComment {
    pub fn new(config: &Config) -> Self {
        Self {
            rules: config.file.clone(),
            tags: config.file_tags.clone(),
            copyright: config.copyright.clone(),
        }
    }
}

impl Sniff for FileComment {
    fn name(&self) -> &'static str {
        NAME
    }

    fn register(&self) -> &'static [TokenKind] {
        &[TokenKind::OpenTag]
    }

    fn process(&self, stream: &TokenStream, position: usize, report: &mut Report) {
        let (opener, closer) = match for_file(stream, position) {
            None => return,
            Some(Ownership::File { opener, closer }) => (opener, closer),
            Some(Ownership::LegacyStyle(comment)) => {
                report.error(
                    NAME,
                    comment,
                    "WrongStyle",
                    "You must use \"/**\" style comments for a file comment",
                );
                return;
            }
            Some(_) => {
                let anchor = (position + 1).min(stream.len().saturating_sub(1));
                report.error(NAME, anchor, "Missing", "Missing file doc comment");
                return;
            }
        };

        if stream[opener].line != stream[position].line + 1 {
            report.error(
                NAME,
                opener,
                "SpacingBefore",
                "File comment must be right below the open tag",
            );
        }

        if let Some(next) = stream.find_next(&[TokenKind::Whitespace], closer + 1, None, true) {
            if stream[next].line != stream[closer].line + 2 {
                report.error(
                    NAME,
                    closer + 1,
                    "SpacingAfterComment",
                    "There must be exactly one blank line after the file comment",
                );
            }
        }

        let block = parse(stream, opener, Construct::File);
        if block.is_empty() {
            report.error(NAME, opener, "MissingShort", "File doc comment is empty");
            return;
        }

        if !check_closer_alone(stream, &block, &self.rules, NAME, report) {
            return;
        }
        if block.short.is_some() {
            check_descriptions(stream, &block, &self.rules, NAME, report);
        }
        check_trailing_blank_lines(stream, &block, &self.rules, NAME, report);

        check_tag_table(
            stream,
            &block,
            &self.tags,
            self.copyright.as_ref(),
            NAME,
            report,
        );
    }
}
