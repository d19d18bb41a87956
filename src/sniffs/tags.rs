//! Ordered tag table checks for the file comment.

use crate::config::{CopyrightPolicy, TagSpec};
use crate::diagnostic::Report;
use crate::docblock::{CommentBlock, Tag};
use crate::token::TokenStream;

/// `@copyright` -> `Copyright`, used to build per-tag codes.
fn code_name(tag: &str) -> String {
    let bare = tag.trim_start_matches('@');
    let mut chars = bare.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Presence, multiplicity, content and relative order of the table's tags.
/// Tags not in the table are ignored.
pub fn check_tag_table(
    stream: &TokenStream,
    block: &CommentBlock,
    table: &[TagSpec],
    copyright: Option<&CopyrightPolicy>,
    sniff: &'static str,
    report: &mut Report,
) {
    let mut found: Vec<&Tag> = Vec::new();
    for tag in &block.tags {
        let Some(spec) = table.iter().find(|spec| spec.name == tag.name) else {
            continue;
        };

        if !spec.allow_multiple && found.iter().any(|t| t.name == tag.name) {
            report.error(
                sniff,
                tag.position,
                format!("Duplicate{}Tag", code_name(&tag.name)),
                format!("Only one {} tag is allowed in a file comment", tag.name),
            );
        }
        found.push(tag);

        if tag.same_line_content(stream).is_none() {
            report.error(
                sniff,
                tag.position,
                format!("Empty{}Tag", code_name(&tag.name)),
                format!("Content missing for {} tag in file comment", tag.name),
            );
        }
    }

    let mut pos = 0;
    for spec in table {
        let occurrences: Vec<&Tag> = found
            .iter()
            .copied()
            .filter(|t| t.name == spec.name)
            .collect();
        if occurrences.is_empty() {
            if spec.required {
                report.error(
                    sniff,
                    block.closer,
                    format!("Missing{}Tag", code_name(&spec.name)),
                    format!("Missing {} tag in file comment", spec.name),
                );
            }
            continue;
        }

        match spec.name.as_str() {
            "@copyright" => {
                if let Some(policy) = copyright {
                    check_copyright(stream, &occurrences, policy, sniff, report);
                }
            }
            "@license" => check_license(stream, &occurrences, sniff, report),
            _ => {}
        }

        let Some(at) = found.get(pos) else {
            break;
        };
        if at.name != spec.name {
            report.error(
                sniff,
                at.position,
                format!("{}TagOrder", code_name(&spec.name)),
                format!("The tag in position {} should be the {} tag", pos + 1, spec.name),
            );
        }

        // A repeatable tag occupies one slot for its whole run.
        pos += 1;
        while found.get(pos).is_some_and(|t| t.name == spec.name) {
            pos += 1;
        }
    }
}

/// At least one notice must read `<first>-<current> <holder>`.
fn check_copyright(
    stream: &TokenStream,
    tags: &[&Tag],
    policy: &CopyrightPolicy,
    sniff: &'static str,
    report: &mut Report,
) {
    let matches = tags.iter().any(|tag| {
        tag.value(stream)
            .is_some_and(|value| copyright_matches(&stream[value].content, policy))
    });
    if matches {
        return;
    }

    let Some(last) = tags.last() else {
        return;
    };
    let year = policy
        .current_year
        .map(|y| y.to_string())
        .unwrap_or_else(|| "YYYY".to_string());
    report.error(
        sniff,
        last.position,
        "IncorrectCopyright",
        format!(
            "Expected \"{}-{} {}\" for copyright declaration",
            policy.first_year, year, policy.holder
        ),
    );
}

fn copyright_matches(content: &str, policy: &CopyrightPolicy) -> bool {
    let prefix = format!("{}-", policy.first_year);
    let Some(rest) = content.strip_prefix(&prefix) else {
        return false;
    };
    let Some(year) = rest.get(..4).filter(|y| y.bytes().all(|b| b.is_ascii_digit())) else {
        return false;
    };
    if let Some(current) = policy.current_year {
        if year.parse::<i32>().ok() != Some(current) {
            return false;
        }
    }
    rest[4..]
        .strip_prefix(' ')
        .is_some_and(|holder| holder.starts_with(&policy.holder))
}

/// `@license <url-or-id> <name>`.
fn check_license(stream: &TokenStream, tags: &[&Tag], sniff: &'static str, report: &mut Report) {
    for tag in tags {
        let Some(value) = tag.value(stream) else {
            continue;
        };
        let complete = stream[value]
            .content
            .split_once(char::is_whitespace)
            .is_some_and(|(_, name)| !name.trim().is_empty());
        if !complete {
            report.error(
                sniff,
                tag.position,
                "IncompleteLicense",
                "@license tag must contain a URL and a license name",
            );
        }
    }
}
