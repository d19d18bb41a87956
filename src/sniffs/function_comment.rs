//! Function and method doc comments, including `@param`, `@return`,
//! `@throws` and `@see` tags.

use super::params::check_params;
use super::rules::{check_blank_line_before_tags, check_descriptions};
use super::Sniff;
use crate::config::{BlockRules, Config};
use crate::diagnostic::Report;
use crate::docblock::{contains_inheritdoc, parse, CommentBlock, Construct};
use crate::locate::{for_function, Ownership};
use crate::signature::{self, Signature};
use crate::text::{ends_with_full_stop, Capitalization};
use crate::token::{TokenKind, TokenStream, DOC_FILLER};

const NAME: &str = "Commenting.FunctionComment";

pub struct FunctionComment {
    rules: BlockRules,
    throws_capitalization: Capitalization,
}

impl FunctionComment {
    pub fn new(config: &Config) -> Self {
        Self {
            rules: config.function.clone(),
            throws_capitalization: config.throws_capitalization,
        }
    }
}

impl Sniff for FunctionComment {
    fn name(&self) -> &'static str {
        NAME
    }

    fn register(&self) -> &'static [TokenKind] {
        &[TokenKind::Function]
    }

    fn process(&self, stream: &TokenStream, position: usize, report: &mut Report) {
        let (opener, closer) = match for_function(stream, position) {
            Ownership::Function { opener, closer } => (opener, closer),
            Ownership::LegacyStyle(_) => {
                report.error(
                    NAME,
                    position,
                    "WrongStyle",
                    "You must use \"/**\" style comments for a function comment",
                );
                return;
            }
            _ => {
                report.error(NAME, position, "Missing", "Missing function doc comment");
                return;
            }
        };

        if stream[closer].line + 1 != stream[position].line {
            report.error(
                NAME,
                closer,
                "SpacingAfter",
                "There must be no blank lines after the function comment",
            );
        }

        let block = parse(stream, opener, Construct::Function);
        if block.short.is_none() {
            report.error(
                NAME,
                opener,
                "MissingShort",
                "Missing short description in doc comment",
            );
            return;
        }

        check_descriptions(stream, &block, &self.rules, NAME, report);

        // Inherited docs are exempt from everything below.
        if contains_inheritdoc(stream, &block) {
            return;
        }

        check_sees(stream, &block, report);
        check_blank_line_before_tags(stream, &block, &self.rules, NAME, report);
        check_first_param_spacing(stream, &block, report);

        let signature = signature::extract(stream, position).unwrap_or_default();
        check_return(stream, &block, &signature, report);
        self.check_throws(stream, &block, report);
        check_params(stream, &block, &signature, NAME, report);
    }
}

impl FunctionComment {
    fn check_throws(&self, stream: &TokenStream, block: &CommentBlock, report: &mut Report) {
        for (_, tag) in block.tags_named("@throws") {
            let Some(value) = tag.value(stream) else {
                report.error(
                    NAME,
                    tag.position,
                    "InvalidThrows",
                    "Exception type and comment missing for @throws tag in function comment",
                );
                continue;
            };

            let rest = stream[value]
                .content
                .split_once(char::is_whitespace)
                .map(|(_, rest)| rest.trim())
                .unwrap_or_default();
            if rest.is_empty() {
                report.error(
                    NAME,
                    tag.position,
                    "EmptyThrows",
                    "Comment missing for @throws tag in function comment",
                );
                continue;
            }

            let mut comment = rest.to_string();
            for line in tag.continuation(stream) {
                comment.push(' ');
                comment.push_str(line);
            }

            if !self.throws_capitalization.accepts(&comment) {
                report.error(
                    NAME,
                    value,
                    "ThrowsNotCapital",
                    "@throws comment must start with a capital letter",
                );
            }
            if !ends_with_full_stop(&comment) {
                report.error(
                    NAME,
                    value,
                    "ThrowsNoFullStop",
                    "@throws comment must end with a full stop",
                );
            }
        }
    }
}

fn check_sees(stream: &TokenStream, block: &CommentBlock, report: &mut Report) {
    for (_, tag) in block.tags_named("@see") {
        if tag.same_line_content(stream).is_none() {
            report.error(
                NAME,
                tag.position,
                "EmptySees",
                "Content missing for @see tag in function comment",
            );
        }
    }
}

/// When other tags come first, the `@param` group is set off by a blank line.
fn check_first_param_spacing(stream: &TokenStream, block: &CommentBlock, report: &mut Report) {
    if block.tags.len() < 2 {
        return;
    }
    let Some((index, param)) = block.tags_named("@param").next() else {
        return;
    };
    if index == 0 {
        return;
    }
    let Some(prev) = stream.find_before(DOC_FILLER, param.position, Some(block.opener), true) else {
        return;
    };
    if stream[param.position].line != stream[prev].line + 2 {
        report.error(
            NAME,
            param.position,
            "SpacingBeforeFirstParam",
            "There must be exactly one blank line before the first param tag in a doc comment",
        );
    }
}

fn check_return(
    stream: &TokenStream,
    block: &CommentBlock,
    signature: &Signature,
    report: &mut Report,
) {
    let mut returns = block.tags_named("@return");
    let first = returns.next();
    if let Some((_, duplicate)) = returns.next() {
        report.error(
            NAME,
            duplicate.position,
            "DuplicateReturn",
            "Only 1 @return tag is allowed in a function comment",
        );
        return;
    }

    if signature.is_special_method() {
        return;
    }
    let Some((_, tag)) = first else {
        return;
    };
    let has_type = tag
        .value(stream)
        .is_some_and(|value| !stream[value].content.trim().is_empty());
    if !has_type {
        report.error(
            NAME,
            tag.position,
            "MissingReturnType",
            "Return type missing for @return tag in function comment",
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::Diagnostic;
    use crate::fixer;
    use crate::sniffs::testing::{check, codes};

    fn function_check(doc: &str, declaration: &str) -> Vec<Diagnostic> {
        let src = format!("<?php\nclass A {{\n{doc}\n    {declaration} {{}}\n}}\n");
        check(&src, "function-comment", &Config::default())
    }

    const GOOD: &str = "    /**
     * Fetch a user.
     *
     * @param int $id The user ID.
     * @param bool $strict Whether to throw.
     * @return array
     * @throws NotFoundException If the user does not exist.
     */";

    #[test]
    fn well_formed_block() {
        let found = function_check(GOOD, "public function get($id, $strict)");
        assert!(found.is_empty(), "{found:?}");
    }

    #[test]
    fn removed_param_tag() {
        let doc = GOOD.replace("     * @param bool $strict Whether to throw.\n", "");
        let found = function_check(&doc, "public function get($id, $strict)");
        assert_eq!(codes(&found), ["MissingParamTag"]);
        assert_eq!(found[0].message, "Doc comment for parameter \"$strict\" missing");
    }

    #[test]
    fn extra_param_tag() {
        let found = function_check(GOOD, "public function get($id)");
        assert_eq!(codes(&found), ["ExtraParamComment"]);
    }

    #[test]
    fn variadic_extra_param_is_allowed() {
        let doc = GOOD.replace("bool $strict", "mixed $args,...");
        let found = function_check(&doc, "public function get($id)");
        assert!(found.is_empty(), "{found:?}");
    }

    #[test]
    fn name_differs_only_in_case() {
        let doc = GOOD.replace("$strict", "$Strict");
        let found = function_check(&doc, "public function get($id, $strict)");
        assert_eq!(codes(&found), ["ParamNameNoCaseMatch"]);
    }

    #[test]
    fn name_mismatch() {
        let found = function_check(GOOD, "public function get($id, $force)");
        assert_eq!(codes(&found), ["ParamNameNoMatch", "MissingParamTag"]);
        assert_eq!(
            found[0].message,
            "Doc comment for parameter $strict does not match actual variable name $force"
        );
    }

    #[test]
    fn missing_type_and_name() {
        let doc = GOOD.replace("bool $strict", "$strict");
        let found = function_check(&doc, "public function get($id, $strict)");
        assert_eq!(codes(&found), ["MissingParamType"]);

        let doc = GOOD.replace("@param bool $strict Whether to throw.", "@param");
        let found = function_check(&doc, "public function get($id, $strict)");
        assert_eq!(
            codes(&found),
            ["MissingParamType", "MissingParamName", "MissingParamTag"]
        );
    }

    #[test]
    fn spacing_fix_converges() {
        let doc = GOOD.replace("@param int $id", "@param int  $id");
        let src = format!("<?php\nclass A {{\n{doc}\n    public function get($id, $strict) {{}}\n}}\n");
        let found = check(&src, "function-comment", &Config::default());
        assert_eq!(codes(&found), ["SpacingAfterParamType"]);
        assert!(found[0].is_fixable());

        let stream = crate::lexer::tokenize(&src).unwrap();
        let applied = fixer::apply(&stream, &found);
        assert_eq!(applied.applied, 1);
        assert!(applied.source.contains("@param int $id The user ID."));

        let again = check(&applied.source, "function-comment", &Config::default());
        assert!(again.is_empty(), "{again:?}");
    }

    #[test]
    fn both_spacing_defects_on_one_tag() {
        let doc = GOOD.replace("@param int $id The user ID.", "@param int   $id   The user ID.");
        let found = function_check(&doc, "public function get($id, $strict)");
        assert_eq!(codes(&found), ["SpacingAfterParamType", "SpacingAfterParamName"]);
        let fixes: Vec<_> = found.iter().filter_map(|d| d.fix.as_ref()).collect();
        assert_eq!(fixes[0], fixes[1]);
        assert_eq!(fixes[0].replacement, "int $id The user ID.");
    }

    #[test]
    fn missing_and_legacy_comments() {
        let found = function_check("", "function run()");
        assert_eq!(codes(&found), ["Missing"]);
        let found = function_check("    // Runs.", "function run()");
        assert_eq!(codes(&found), ["WrongStyle"]);
    }

    #[test]
    fn blank_line_after_comment() {
        let found = function_check("    /**\n     * Run.\n     */\n", "function run()");
        assert_eq!(codes(&found), ["SpacingAfter"]);
    }

    #[test]
    fn short_description_rules() {
        let found = function_check("    /**\n     * run it\n     */", "function run()");
        assert_eq!(codes(&found), ["ShortNotCapital"]);
        let found = function_check("    /**\n     * 3 ways to run\n     */", "function run()");
        assert!(found.is_empty());
        let found = function_check("    /**\n     *\n     * Run.\n     */", "function run()");
        assert_eq!(codes(&found), ["SpacingBeforeShort"]);
        let found = function_check("    /**\n     * @return int\n     */", "function run()");
        assert_eq!(codes(&found), ["MissingShort"]);
    }

    #[test]
    fn inheritdoc_skips_remaining_checks() {
        let found = function_check(
            "    /**\n     * {@inheritdoc}\n     * @param $nope\n     */",
            "function run($a)",
        );
        assert!(found.is_empty(), "{found:?}");
    }

    #[test]
    fn inheritdoc_tag_only_suppresses_missing_params() {
        let found = function_check(
            "    /**\n     * Run.\n     *\n     * @inheritdoc\n     */",
            "function run($a)",
        );
        assert!(found.is_empty(), "{found:?}");
    }

    #[test]
    fn return_tag_rules() {
        let found = function_check(
            "    /**\n     * Run.\n     *\n     * @return int\n     * @return\n     */",
            "function run()",
        );
        assert_eq!(codes(&found), ["DuplicateReturn"]);

        let found = function_check(
            "    /**\n     * Run.\n     *\n     * @return\n     */",
            "function run()",
        );
        assert_eq!(codes(&found), ["MissingReturnType"]);

        let found = function_check(
            "    /**\n     * Build.\n     *\n     * @return\n     */",
            "public function __construct()",
        );
        assert!(found.is_empty());
    }

    #[test]
    fn throws_tag_rules() {
        let throws = |text: &str| {
            let doc = format!("    /**\n     * Run.\n     *\n     * @throws{text}\n     */");
            codes(&function_check(&doc, "function run()"))
                .into_iter()
                .map(String::from)
                .collect::<Vec<_>>()
        };
        assert_eq!(throws(""), ["InvalidThrows"]);
        assert_eq!(throws(" Exception"), ["EmptyThrows"]);
        assert_eq!(
            throws(" Exception when it breaks"),
            ["ThrowsNotCapital", "ThrowsNoFullStop"]
        );
        assert!(throws(" Exception When it breaks.").is_empty());
    }

    #[test]
    fn throws_comment_spans_lines() {
        let found = function_check(
            "    /**\n     * Run.\n     *\n     * @throws Exception When it\n     *   breaks.\n     */",
            "function run()",
        );
        assert!(found.is_empty(), "{found:?}");
    }

    #[test]
    fn empty_see_tag() {
        let found = function_check(
            "    /**\n     * Run.\n     *\n     * @see\n     */",
            "function run()",
        );
        assert_eq!(codes(&found), ["EmptySees"]);
    }

    #[test]
    fn tag_spacing() {
        let found = function_check(
            "    /**\n     * Run.\n     * @return int\n     */",
            "function run()",
        );
        assert_eq!(codes(&found), ["SpacingBeforeTags"]);

        let found = function_check(
            "    /**\n     * Run.\n     *\n     * @see Other\n     * @param int $a The a.\n     */",
            "function run($a)",
        );
        assert_eq!(codes(&found), ["SpacingBeforeFirstParam"]);
    }

    #[test]
    fn functions_after_a_heredoc_are_checked() {
        let src = "<?php\nclass A {\n    /**\n     * Render.\n     *\n     * @return string\n     */\n    function a() { return <<<EOT\nIt's here\nEOT; }\n\n    function undocumented($x) {}\n}\n";
        let found = check(src, "function-comment", &Config::default());
        assert_eq!(codes(&found), ["Missing"]);
        assert_eq!(found[0].line, 12);
    }

    #[test]
    fn closures_are_not_checked() {
        let src = "<?php\n$f = function ($a) {\n    return $a;\n};\n";
        assert!(check(src, "function-comment", &Config::default()).is_empty());
    }
}
