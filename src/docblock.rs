//! Decomposes a located doc comment into descriptions and tags.

use crate::token::{TokenKind, TokenStream, DOC_FILLER};

/// What a doc comment documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construct {
    File,
    Class,
    Function,
}

/// Ordered `DocCommentString` positions making up one description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSpan {
    pub strings: Vec<usize>,
}

impl TextSpan {
    pub fn first(&self) -> usize {
        self.strings[0]
    }

    pub fn last(&self) -> usize {
        self.strings[self.strings.len() - 1]
    }

    pub fn is_single_line(&self, stream: &TokenStream) -> bool {
        stream[self.first()].line == stream[self.last()].line
    }

    pub fn text(&self, stream: &TokenStream, separator: &str) -> String {
        self.strings
            .iter()
            .map(|&i| stream[i].content.as_str())
            .collect::<Vec<_>>()
            .join(separator)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Tag name including the `@`.
    pub name: String,
    pub position: usize,
    /// Next tag or the closer.
    pub end: usize,
    /// String tokens between the tag and `end`.
    pub content: Vec<usize>,
}

impl Tag {
    /// The value written right after the tag on its own line, i.e. the string
    /// two tokens after the tag.
    pub fn value(&self, stream: &TokenStream) -> Option<usize> {
        let pos = self.position + 2;
        (pos < self.end && stream.kind(pos) == Some(TokenKind::DocCommentString)).then_some(pos)
    }

    /// Any string on the tag's line.
    pub fn same_line_content(&self, stream: &TokenStream) -> Option<usize> {
        self.content
            .first()
            .copied()
            .filter(|&i| stream[i].line == stream[self.position].line)
    }

    /// Strings on the lines after the value, up to the next tag.
    pub fn continuation<'s>(&self, stream: &'s TokenStream) -> Vec<&'s str> {
        let value = self.value(stream);
        self.content
            .iter()
            .filter(|&&i| Some(i) != value)
            .map(|&i| stream[i].content.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentBlock {
    pub opener: usize,
    pub closer: usize,
    pub documents: Construct,
    /// First token that is not filler, tags included.
    pub first_content: Option<usize>,
    pub short: Option<TextSpan>,
    pub long: Option<TextSpan>,
    pub tags: Vec<Tag>,
}

impl CommentBlock {
    pub fn is_empty(&self) -> bool {
        self.first_content.is_none()
    }

    /// Last description line before the tags.
    pub fn description_end(&self) -> Option<usize> {
        self.long
            .as_ref()
            .or(self.short.as_ref())
            .map(TextSpan::last)
    }

    pub fn tags_named<'b>(&'b self, name: &'b str) -> impl Iterator<Item = (usize, &'b Tag)> + 'b {
        self.tags
            .iter()
            .enumerate()
            .filter(move |(_, t)| t.name == name)
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.name == name)
    }
}

/// Parse the doc comment opened at `opener`.
pub fn parse(stream: &TokenStream, opener: usize, documents: Construct) -> CommentBlock {
    let closer = stream[opener].pair.unwrap_or(opener);
    let first_content = stream.find_next(DOC_FILLER, opener + 1, Some(closer), true);

    let tags = read_tags(stream, opener, closer);
    let tags_start = tags.first().map(|t| t.position).unwrap_or(closer);

    let short = first_content
        .filter(|&i| stream[i].is(TokenKind::DocCommentString))
        .map(|start| read_short(stream, start, tags_start));

    let long = short.as_ref().and_then(|short| {
        let next = stream.find_next(DOC_FILLER, short.last() + 1, Some(tags_start), true)?;
        stream[next].is(TokenKind::DocCommentString).then(|| TextSpan {
            strings: strings_in(stream, next, tags_start),
        })
    });

    CommentBlock {
        opener,
        closer,
        documents,
        first_content,
        short,
        long,
        tags,
    }
}

/// Contiguous lines starting at `start`, stopping at a blank line or a tag.
fn read_short(stream: &TokenStream, start: usize, tags_start: usize) -> TextSpan {
    let mut strings = vec![start];
    for i in start + 1..tags_start {
        if !stream[i].is(TokenKind::DocCommentString) {
            continue;
        }
        let last = strings[strings.len() - 1];
        if stream[i].line != stream[last].line + 1 {
            break;
        }
        strings.push(i);
    }
    TextSpan { strings }
}

fn strings_in(stream: &TokenStream, from: usize, to: usize) -> Vec<usize> {
    (from..to)
        .filter(|&i| stream[i].is(TokenKind::DocCommentString))
        .collect()
}

fn read_tags(stream: &TokenStream, opener: usize, closer: usize) -> Vec<Tag> {
    let positions = &stream[opener].comment_tags;
    positions
        .iter()
        .enumerate()
        .map(|(n, &position)| {
            let end = positions.get(n + 1).copied().unwrap_or(closer);
            Tag {
                name: stream[position].content.clone(),
                position,
                end,
                content: strings_in(stream, position + 1, end),
            }
        })
        .collect()
}

/// Whether the block body contains an inline `{@inheritdoc}`.
pub fn contains_inheritdoc(stream: &TokenStream, block: &CommentBlock) -> bool {
    let body: String = (block.opener + 1..block.closer)
        .map(|i| stream[i].content.as_str())
        .collect();
    body.to_ascii_lowercase().contains("{@inheritdoc}")
}
