//! Finds the comment in front of a construct and decides who owns it.
//!
//! Whether a doc comment belongs to the file or to the class right below it
//! is a heuristic, not a parse fact: a comment that directly follows the
//! first open tag is taken to be the file comment.

use crate::token::{TokenKind, TokenStream};

/// Outcome of looking for the comment of a construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// The comment is the file comment. For legacy comments `opener` is the
    /// first comment of the run.
    File { opener: usize, closer: usize },
    Class { opener: usize, closer: usize },
    Function { opener: usize, closer: usize },
    /// No comment at all.
    None,
    /// A `//`, `#` or `/* */` comment where a doc comment was expected.
    LegacyStyle(usize),
}

/// Whitespace and the modifiers that may sit between a doc comment and the
/// construct it documents.
const SKIP_BEFORE_CONSTRUCT: &[TokenKind] = &[
    TokenKind::Whitespace,
    TokenKind::Abstract,
    TokenKind::Final,
    TokenKind::Static,
    TokenKind::Public,
    TokenKind::Protected,
    TokenKind::Private,
    TokenKind::Readonly,
];

/// Comment of the function whose keyword is at `anchor`.
pub fn for_function(stream: &TokenStream, anchor: usize) -> Ownership {
    let Some(mut end) = stream.find_before(SKIP_BEFORE_CONSTRUCT, anchor, None, true) else {
        return Ownership::None;
    };

    // A trailing comment after code (`} // end foo`) belongs to that code.
    if stream[end].is(TokenKind::Comment) {
        if let Some(prev) = stream.find_before(SKIP_BEFORE_CONSTRUCT, end, None, true) {
            if stream[prev].line == stream[end].line {
                end = prev;
            }
        }
    }

    match stream[end].kind {
        TokenKind::DocCommentClose => Ownership::Function {
            opener: stream[end].pair.unwrap_or(end),
            closer: end,
        },
        TokenKind::Comment => Ownership::LegacyStyle(end),
        _ => Ownership::None,
    }
}

/// Comment of the class or interface whose keyword is at `anchor`.
pub fn for_class(stream: &TokenStream, anchor: usize) -> Ownership {
    let Some(end) = stream.find_before(SKIP_BEFORE_CONSTRUCT, anchor, None, true) else {
        return Ownership::None;
    };

    let (opener, before) = match stream[end].kind {
        TokenKind::DocCommentClose => {
            let opener = stream[end].pair.unwrap_or(end);
            (opener, opener.checked_sub(1))
        }
        TokenKind::Comment => {
            let before = stream.find_before(&[TokenKind::Comment], end, None, true);
            (before.map(|b| b + 1).unwrap_or(0), before)
        }
        _ => return Ownership::None,
    };

    let prev = before.and_then(|b| stream.find_previous(&[TokenKind::Whitespace], b, None, true));
    if let Some(prev) = prev {
        let first_open_tag = stream[prev].is(TokenKind::OpenTag)
            && stream
                .find_before(&[TokenKind::OpenTag], prev, None, false)
                .is_none();
        if first_open_tag {
            return Ownership::File { opener, closer: end };
        }
    }

    if stream[end].is(TokenKind::Comment) {
        return Ownership::LegacyStyle(end);
    }
    Ownership::Class { opener, closer: end }
}

/// Comment following the open tag at `open_tag`.
///
/// Returns `None` when the file comment check does not apply: a later open
/// tag, or one immediately closed again.
pub fn for_file(stream: &TokenStream, open_tag: usize) -> Option<Ownership> {
    if stream
        .find_before(&[TokenKind::OpenTag], open_tag, None, false)
        .is_some()
    {
        return None;
    }

    let Some(next) = stream.find_next(&[TokenKind::Whitespace], open_tag + 1, None, true) else {
        return Some(Ownership::None);
    };
    match stream[next].kind {
        TokenKind::CloseTag => None,
        TokenKind::Comment => Some(Ownership::LegacyStyle(next)),
        TokenKind::DocCommentOpen => Some(Ownership::File {
            opener: next,
            closer: stream[next].pair.unwrap_or(next),
        }),
        _ => Some(Ownership::None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn class_ownership(src: &str) -> Ownership {
        let stream = tokenize(src).unwrap();
        let class = stream
            .find_next(&[TokenKind::Class, TokenKind::Interface], 0, None, false)
            .unwrap();
        for_class(&stream, class)
    }

    fn function_ownership(src: &str) -> Ownership {
        let stream = tokenize(src).unwrap();
        let function = stream.find_next(&[TokenKind::Function], 0, None, false).unwrap();
        for_function(&stream, function)
    }

    // The classifier's edge cases, one fixture each.

    #[test]
    fn class_comment_right_after_open_tag_is_the_file_comment() {
        let own = class_ownership("<?php\n/**\n * Foo.\n */\nclass Foo {}\n");
        assert!(matches!(own, Ownership::File { .. }));
    }

    #[test]
    fn class_comment_after_blank_line_following_open_tag_is_still_the_file_comment() {
        let own = class_ownership("<?php\n\n/**\n * Foo.\n */\nclass Foo {}\n");
        assert!(matches!(own, Ownership::File { .. }));
    }

    #[test]
    fn class_comment_after_file_comment() {
        let own = class_ownership(
            "<?php\n/**\n * @copyright 2009-2016 X\n */\n\n/**\n * Foo.\n */\nclass Foo {}\n",
        );
        assert!(matches!(own, Ownership::Class { .. }));
    }

    #[test]
    fn class_comment_after_second_open_tag() {
        let own = class_ownership("<?php\n$a = 1;\n?>\n<?php\n/**\n * Foo.\n */\nclass Foo {}\n");
        assert!(matches!(own, Ownership::Class { .. }));
    }

    #[test]
    fn legacy_comment_after_open_tag_is_the_file_comment() {
        let own = class_ownership("<?php\n// Foo.\nclass Foo {}\n");
        assert!(matches!(own, Ownership::File { .. }));
    }

    #[test]
    fn legacy_class_comment() {
        let own = class_ownership("<?php\n$a = 1;\n// Foo.\nabstract class Foo {}\n");
        assert!(matches!(own, Ownership::LegacyStyle(_)));
    }

    #[test]
    fn class_without_comment() {
        let own = class_ownership("<?php\n$a = 1;\n\nfinal class Foo {}\n");
        assert_eq!(own, Ownership::None);
    }

    #[test]
    fn function_comment_skips_modifiers() {
        let own = function_ownership(
            "<?php\nclass A {\n    /**\n     * Run.\n     */\n    public static function run() {}\n}\n",
        );
        assert!(matches!(own, Ownership::Function { .. }));
    }

    #[test]
    fn trailing_comment_on_code_line_is_not_a_function_comment() {
        let own = function_ownership("<?php\nif ($a) {\n} // end if\nfunction run() {}\n");
        assert_eq!(own, Ownership::None);
    }

    #[test]
    fn legacy_function_comment() {
        let own = function_ownership("<?php\n# Run it.\nfunction run() {}\n");
        assert!(matches!(own, Ownership::LegacyStyle(_)));
    }

    #[test]
    fn file_check_only_applies_to_first_open_tag() {
        let stream = tokenize("<?php\n/**\n * @copyright X\n */\n?>\n<?php\n$a;\n").unwrap();
        let tags: Vec<_> = stream
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is(TokenKind::OpenTag))
            .map(|(i, _)| i)
            .collect();
        assert!(matches!(for_file(&stream, tags[0]), Some(Ownership::File { .. })));
        assert_eq!(for_file(&stream, tags[1]), None);
    }

    #[test]
    fn file_check_skips_immediately_closed_tag() {
        let stream = tokenize("<?php ?>\n<html>").unwrap();
        assert_eq!(for_file(&stream, 0), None);
    }
}
