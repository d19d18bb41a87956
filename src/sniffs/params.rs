//! Reconciles `@param` tags with the declared parameter list.

use crate::diagnostic::{Fix, Report};
use crate::docblock::{CommentBlock, Tag};
use crate::signature::Signature;
use crate::token::TokenStream;
use regex::Regex;
use std::sync::LazyLock;

// type, variable ($ or & first), spacing, comment
static RE_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^$&]*)(?:([$&]\S*)(?:(\s+)(.*))?)?$").unwrap());

/// The fields of one `@param` value, as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamTag {
    pub position: usize,
    /// String token holding the value.
    pub value: Option<usize>,
    pub type_text: String,
    pub type_space: usize,
    pub var: String,
    pub var_space: usize,
    /// Comment text on the tag's own line.
    pub comment: String,
}

impl ParamTag {
    pub fn parse(stream: &TokenStream, tag: &Tag) -> Self {
        let mut param = ParamTag {
            position: tag.position,
            value: tag.value(stream),
            type_text: String::new(),
            type_space: 0,
            var: String::new(),
            var_space: 0,
            comment: String::new(),
        };
        let Some(value) = param.value else {
            return param;
        };
        let Some(caps) = RE_PARAM.captures(&stream[value].content) else {
            return param;
        };

        let raw_type = caps.get(1).map_or("", |m| m.as_str());
        param.type_text = raw_type.trim().to_string();
        param.type_space = raw_type.len() - raw_type.trim_end().len();

        if let Some(var) = caps.get(2) {
            param.var = var.as_str().to_string();
        }
        if let (Some(space), Some(comment)) = (caps.get(3), caps.get(4)) {
            param.var_space = space.as_str().len();
            param.comment = comment.as_str().to_string();
        }
        param
    }

    fn type_space_wrong(&self) -> bool {
        !self.type_text.is_empty() && !self.var.is_empty() && self.type_space != 1
    }

    fn var_space_wrong(&self) -> bool {
        !self.comment.is_empty() && self.var_space != 1
    }

    /// The value rebuilt with a single space wherever spacing is wrong.
    ///
    /// Both spacing fixes of a tag produce this same text, so applying either
    /// or both converges on one result.
    pub fn canonical(&self) -> String {
        let type_space = if self.type_space_wrong() { 1 } else { self.type_space };
        let var_space = if self.var_space_wrong() { 1 } else { self.var_space };
        format!(
            "{}{}{}{}{}",
            self.type_text,
            " ".repeat(type_space),
            self.var,
            " ".repeat(var_space),
            self.comment
        )
    }

    fn fix(&self) -> Option<Fix> {
        self.value.map(|token| Fix {
            token,
            replacement: self.canonical(),
        })
    }
}

/// Check every `@param` tag of the block against `signature`.
pub fn check_params(
    stream: &TokenStream,
    block: &CommentBlock,
    signature: &Signature,
    sniff: &'static str,
    report: &mut Report,
) {
    let params: Vec<ParamTag> = block
        .tags_named("@param")
        .map(|(_, tag)| ParamTag::parse(stream, tag))
        .collect();

    for param in &params {
        if param.type_text.is_empty() {
            report.error(sniff, param.position, "MissingParamType", "Missing parameter type");
        }
        if param.var.is_empty() {
            report.error(sniff, param.position, "MissingParamName", "Missing parameter name");
        }
    }

    let mut documented: Vec<&str> = Vec::new();
    for (pos, param) in params.iter().enumerate() {
        if param.var.is_empty() {
            continue;
        }
        documented.push(&param.var);

        if param.type_space_wrong() {
            let message = format!(
                "Expected 1 spaces after parameter type; {} found",
                param.type_space
            );
            match param.fix() {
                Some(fix) => {
                    report.fixable_error(sniff, param.position, "SpacingAfterParamType", message, fix)
                }
                None => report.error(sniff, param.position, "SpacingAfterParamType", message),
            }
        }

        match signature.params.get(pos) {
            Some(real) if real.name != param.var => {
                if real.name.to_lowercase() == param.var.to_lowercase() {
                    report.error(
                        sniff,
                        param.position,
                        "ParamNameNoCaseMatch",
                        format!(
                            "Doc comment for parameter {} does not match case of actual variable name {}",
                            param.var, real.name
                        ),
                    );
                } else {
                    report.error(
                        sniff,
                        param.position,
                        "ParamNameNoMatch",
                        format!(
                            "Doc comment for parameter {} does not match actual variable name {}",
                            param.var, real.name
                        ),
                    );
                }
            }
            Some(_) => {}
            None if param.var.ends_with(",...") => {}
            None => report.error(
                sniff,
                param.position,
                "ExtraParamComment",
                "Superfluous parameter comment",
            ),
        }

        if param.var_space_wrong() {
            let message = format!(
                "Expected 1 spaces after parameter name; {} found",
                param.var_space
            );
            match param.fix() {
                Some(fix) => {
                    report.fixable_error(sniff, param.position, "SpacingAfterParamName", message, fix)
                }
                None => report.error(sniff, param.position, "SpacingAfterParamName", message),
            }
        }
    }

    if block.has_tag("@inheritdoc") {
        return;
    }
    for name in signature.param_names() {
        if !documented.contains(&name) {
            report.error(
                sniff,
                block.opener,
                "MissingParamTag",
                format!("Doc comment for parameter \"{name}\" missing"),
            );
        }
    }
}
