//! Description and layout rules shared by all doc comment kinds.
//!
//! Each sniff picks which of these apply through its [`BlockRules`].

use crate::config::BlockRules;
use crate::diagnostic::Report;
use crate::docblock::CommentBlock;
use crate::text::ends_with_full_stop;
use crate::token::{TokenStream, DOC_FILLER};

/// Short and long description rules. Assumes the short description exists.
pub fn check_descriptions(
    stream: &TokenStream,
    block: &CommentBlock,
    rules: &BlockRules,
    sniff: &'static str,
    report: &mut Report,
) {
    let Some(short) = block.short.as_ref() else {
        return;
    };

    if stream[short.first()].line != stream[block.opener].line + 1 {
        report.error(
            sniff,
            block.opener + 1,
            "SpacingBeforeShort",
            "Doc comment short description must be on the first line",
        );
    }

    let single_line = short.is_single_line(stream);
    if rules.short_single_line && !single_line {
        report.error(
            sniff,
            block.opener + 1,
            "ShortSingleLine",
            "Doc comment short description must be on a single line",
        );
    }

    if let Some(policy) = rules.capitalization {
        if !policy.accepts(&stream[short.first()].content) {
            report.error(
                sniff,
                short.first(),
                "ShortNotCapital",
                "Doc comment short description must start with a capital letter",
            );
        }
    }

    if rules.short_full_stop && single_line && !ends_with_full_stop(&stream[short.first()].content) {
        report.error(
            sniff,
            block.opener,
            "MissingShortFullStop",
            "Short description must end with a full stop",
        );
    }

    if !rules.long_description {
        return;
    }
    let Some(long) = block.long.as_ref() else {
        return;
    };

    if stream[long.first()].line != stream[short.last()].line + 2 {
        report.error(
            sniff,
            long.first(),
            "SpacingBetween",
            "There must be exactly one blank line between descriptions in a doc comment",
        );
    }

    if let Some(policy) = rules.capitalization {
        if !policy.accepts(&stream[long.first()].content) {
            report.error(
                sniff,
                long.first(),
                "LongNotCapital",
                "Doc comment long description must start with a capital letter",
            );
        }
    }

    if !ends_with_full_stop(&long.text(stream, "")) {
        report.error(
            sniff,
            block.opener,
            "MissingLongFullStop",
            "Long description must end with a full stop",
        );
    }
}

/// Exactly one blank line between the last description line and the first tag.
pub fn check_blank_line_before_tags(
    stream: &TokenStream,
    block: &CommentBlock,
    rules: &BlockRules,
    sniff: &'static str,
    report: &mut Report,
) {
    if !rules.blank_line_before_tags {
        return;
    }
    let Some(first) = block.tags.first() else {
        return;
    };
    let Some(prev) = stream.find_before(DOC_FILLER, first.position, Some(block.opener), true) else {
        return;
    };
    if stream[first.position].line != stream[prev].line + 2 {
        report.error(
            sniff,
            first.position,
            "SpacingBeforeTags",
            "There must be exactly one blank line before the tags in a doc comment",
        );
    }
}

/// The closer must sit alone on its line. Returns `false` when it does not,
/// in which case the block is not checked any further.
pub fn check_closer_alone(
    stream: &TokenStream,
    block: &CommentBlock,
    rules: &BlockRules,
    sniff: &'static str,
    report: &mut Report,
) -> bool {
    if !rules.closer_own_line {
        return true;
    }
    match stream.find_before(DOC_FILLER, block.closer, Some(block.opener), true) {
        Some(prev) if prev != block.opener && stream[prev].line == stream[block.closer].line => {
            report.error(
                sniff,
                block.opener,
                "CloseTagNotAlone",
                "The close comment tag must be the only content on the line",
            );
            false
        }
        _ => true,
    }
}

/// No blank lines between the last content line and the closer.
pub fn check_trailing_blank_lines(
    stream: &TokenStream,
    block: &CommentBlock,
    rules: &BlockRules,
    sniff: &'static str,
    report: &mut Report,
) {
    if !rules.no_blank_line_before_closer {
        return;
    }
    let Some(last) = stream.find_before(DOC_FILLER, block.closer, Some(block.opener), true) else {
        return;
    };
    if stream[block.closer].line != stream[last].line + 1 {
        report.error(
            sniff,
            block.closer,
            "SpacingBeforeClose",
            "Additional blank lines found at end of doc comment",
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docblock::{parse, Construct};
    use crate::lexer::tokenize;
    use crate::sniffs::testing::codes;
    use crate::token::TokenKind;

    fn run_rules(src: &str, rules: &BlockRules) -> Vec<String> {
        let stream = tokenize(src).unwrap();
        let opener = stream
            .find_next(&[TokenKind::DocCommentOpen], 0, None, false)
            .unwrap();
        let block = parse(&stream, opener, Construct::Class);
        let mut report = Report::new(&stream);
        if check_closer_alone(&stream, &block, rules, "Test", &mut report) {
            check_descriptions(&stream, &block, rules, "Test", &mut report);
            check_blank_line_before_tags(&stream, &block, rules, "Test", &mut report);
            check_trailing_blank_lines(&stream, &block, rules, "Test", &mut report);
        }
        codes(report.diagnostics())
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn lowercase_short_with_full_stop() {
        let found = run_rules("<?php\n/**\n * fetches the user.\n */", &BlockRules::class());
        assert_eq!(found, ["ShortNotCapital"]);
    }

    #[test]
    fn single_line_short_without_full_stop() {
        let found = run_rules("<?php\n/**\n * Fetches the user\n */", &BlockRules::class());
        assert_eq!(found, ["MissingShortFullStop"]);
    }

    #[test]
    fn multi_line_short_skips_full_stop() {
        let found = run_rules(
            "<?php\n/**\n * Fetches the user\n * from the store\n */",
            &BlockRules::class(),
        );
        assert_eq!(found, ["ShortSingleLine"]);
    }

    #[test]
    fn long_description_rules() {
        let found = run_rules(
            "<?php\n/**\n * Short.\n *\n *\n * long text\n * without stop\n */",
            &BlockRules::class(),
        );
        assert_eq!(found, ["SpacingBetween", "LongNotCapital", "MissingLongFullStop"]);
    }

    #[test]
    fn blank_lines_before_closer_and_first_line() {
        let found = run_rules("<?php\n/**\n *\n * Short.\n *\n */", &BlockRules::class());
        assert_eq!(found, ["SpacingBeforeShort", "SpacingBeforeClose"]);
    }

    #[test]
    fn closer_sharing_a_line_halts() {
        let found = run_rules("<?php\n/**\n * short */", &BlockRules::class());
        assert_eq!(found, ["CloseTagNotAlone"]);
    }

    #[test]
    fn tag_spacing() {
        let rules = BlockRules::function();
        assert_eq!(
            run_rules("<?php\n/**\n * Short.\n * @return int\n */", &rules),
            ["SpacingBeforeTags"]
        );
        assert_eq!(
            run_rules("<?php\n/**\n * Short.\n *\n *\n * @return int\n */", &rules),
            ["SpacingBeforeTags"]
        );
        assert!(run_rules("<?php\n/**\n * Short.\n *\n * @return int\n */", &rules).is_empty());
    }
}
