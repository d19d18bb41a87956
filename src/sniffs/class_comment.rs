//! Class and interface doc comments.

use super::rules::{check_closer_alone, check_descriptions, check_trailing_blank_lines};
use super::Sniff;
use crate::config::{BlockRules, Config};
use crate::diagnostic::Report;
use crate::docblock::{parse, Construct};
use crate::locate::{for_class, Ownership};
use crate::token::{TokenKind, TokenStream};

const NAME: &str = "Commenting.ClassComment";

pub struct ClassComment {
    rules: BlockRules,
}

impl ClassComment {
    pub fn new(config: &Config) -> Self {
        Self {
            rules: config.class.clone(),
        }
    }
}

impl Sniff for ClassComment {
    fn name(&self) -> &'static str {
        NAME
    }

    fn register(&self) -> &'static [TokenKind] {
        &[TokenKind::Class, TokenKind::Interface]
    }

    fn process(&self, stream: &TokenStream, position: usize, report: &mut Report) {
        let opener = match for_class(stream, position) {
            Ownership::Class { opener, .. } => opener,
            Ownership::LegacyStyle(comment) => {
                report.error(
                    NAME,
                    comment,
                    "WrongStyle",
                    "You must use \"/**\" style comments for a class comment",
                );
                return;
            }
            // A comment right below the first open tag is the file comment.
            _ => {
                report.error(NAME, position, "Missing", "Missing class doc comment");
                return;
            }
        };

        let block = parse(stream, opener, Construct::Class);
        if !check_closer_alone(stream, &block, &self.rules, NAME, report) {
            return;
        }
        if block.short.is_none() {
            report.error(
                NAME,
                opener,
                "MissingShort",
                "Missing short description in class doc comment",
            );
            return;
        }

        check_descriptions(stream, &block, &self.rules, NAME, report);

        for tag in &block.tags {
            report.warning(
                NAME,
                tag.position,
                "TagNotAllowed",
                format!("{} tag is not allowed in class comment", tag.name),
            );
        }

        check_trailing_blank_lines(stream, &block, &self.rules, NAME, report);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::Severity;
    use crate::sniffs::testing::{check, codes};

    const FILE_HEADER: &str = "<?php\n/**\n * @copyright 2009-2024 Vanilla Forums Inc.\n */\n\n";

    fn class_check(body: &str) -> Vec<crate::diagnostic::Diagnostic> {
        check(&format!("{FILE_HEADER}{body}"), "class-comment", &Config::default())
    }

    #[test]
    fn well_formed_class_comment() {
        let found = class_check(
            "/**\n * Handles users.\n *\n * Long text follows here.\n */\nclass UserModel {}\n",
        );
        assert!(found.is_empty(), "{found:?}");
    }

    #[test]
    fn interfaces_and_modifiers() {
        let found = class_check("/**\n * Contract.\n */\ninterface Thing {}\n");
        assert!(found.is_empty());
        let found = class_check("/**\n * Base.\n */\nabstract class Base {}\n");
        assert!(found.is_empty());
    }

    #[test]
    fn lowercase_short_description() {
        let found = class_check("/**\n * fetches the user.\n */\nclass A {}\n");
        assert_eq!(codes(&found), ["ShortNotCapital"]);
        let found = class_check("/**\n * Fetches the user\n */\nclass A {}\n");
        assert_eq!(codes(&found), ["MissingShortFullStop"]);
    }

    #[test]
    fn first_comment_in_file_belongs_to_the_file() {
        let found = check(
            "<?php\n/**\n * Handles users.\n */\nclass UserModel {}\n",
            "class-comment",
            &Config::default(),
        );
        assert_eq!(codes(&found), ["Missing"]);
        assert_eq!(found[0].line, 5);
    }

    #[test]
    fn missing_and_legacy_comments() {
        assert_eq!(codes(&class_check("class A {}\n")), ["Missing"]);
        assert_eq!(codes(&class_check("// A thing.\nclass A {}\n")), ["WrongStyle"]);
    }

    #[test]
    fn tags_are_warnings() {
        let found = class_check("/**\n * Handles users.\n *\n * @package Vanilla\n */\nclass A {}\n");
        assert_eq!(codes(&found), ["TagNotAllowed"]);
        assert_eq!(found[0].severity, Severity::Warning);
        assert_eq!(found[0].message, "@package tag is not allowed in class comment");
    }

    #[test]
    fn tag_only_block_has_no_short_description() {
        let found = class_check("/**\n * @package Vanilla\n */\nclass A {}\n");
        assert_eq!(codes(&found), ["MissingShort"]);
    }

    #[test]
    fn closer_must_be_alone() {
        let found = class_check("/**\n * Handles users. */\nclass A {}\n");
        assert_eq!(codes(&found), ["CloseTagNotAlone"]);
    }

    #[test]
    fn blank_lines_at_end() {
        let found = class_check("/**\n * Handles users.\n *\n */\nclass A {}\n");
        assert_eq!(codes(&found), ["SpacingBeforeClose"]);
    }
}
