//! Minimal lossless PHP tokenizer.
//!
//! Produces just enough structure for the doc comment sniffs: open/close
//! tags, whitespace, comments, doc comments segmented per line, variables,
//! strings, words (with the handful of keywords the sniffs care about) and
//! bracket pairs. It does not understand PHP beyond that.

use crate::error::{Error, Result};
use crate::token::{Token, TokenKind, TokenStream};

/// Tokenize a PHP source file.
pub fn tokenize(source: &str) -> Result<TokenStream> {
    let mut lexer = Lexer::new(source);
    lexer.run()?;
    let mut tokens = lexer.tokens;
    classify_keywords(&mut tokens);
    link_pairs(&mut tokens);
    Ok(TokenStream::new(tokens))
}

struct Lexer<'a> {
    src: &'a str,
    pos: usize,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            line: 1,
            column: 1,
            tokens: Vec::new(),
        }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    /// Emit `text` (which must start at the cursor) and advance past it.
    fn push(&mut self, kind: TokenKind, text: &str) -> usize {
        self.tokens
            .push(Token::new(kind, text, self.line, self.column));
        for c in text.chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.pos += text.len();
        self.tokens.len() - 1
    }

    fn run(&mut self) -> Result<()> {
        let mut in_php = false;
        while self.pos < self.src.len() {
            let rest = self.rest();
            if !in_php {
                match find_open_tag(rest) {
                    Some((idx, len, kind)) => {
                        if idx > 0 {
                            self.push(TokenKind::InlineHtml, &rest[..idx]);
                        }
                        self.push(kind, &rest[idx..idx + len]);
                        in_php = true;
                    }
                    None => {
                        self.push(TokenKind::InlineHtml, rest);
                    }
                }
                continue;
            }

            if rest.starts_with("?>") {
                let len = 2 + newline_len(&rest[2..]);
                self.push(TokenKind::CloseTag, &rest[..len]);
                in_php = false;
                continue;
            }

            self.lex_php(rest)?;
        }
        Ok(())
    }

    fn lex_php(&mut self, rest: &'a str) -> Result<()> {
        let Some(c) = rest.chars().next() else {
            return Ok(());
        };

        if matches!(c, ' ' | '\t' | '\r' | '\n') {
            let len = whitespace_len(rest);
            self.push(TokenKind::Whitespace, &rest[..len]);
            return Ok(());
        }

        if rest.starts_with("/**") && !rest.starts_with("/**/") {
            return self.lex_doc_comment(rest);
        }

        if rest.starts_with("/*") {
            let Some(end) = rest[2..].find("*/") else {
                return Err(Error::UnterminatedComment { line: self.line });
            };
            self.push(TokenKind::Comment, &rest[..end + 4]);
            return Ok(());
        }

        if rest.starts_with("//") || (c == '#' && !rest.starts_with("#[")) {
            let newline = rest.find('\n').map(|i| i + 1).unwrap_or(rest.len());
            let len = rest[..newline].find("?>").unwrap_or(newline);
            self.push(TokenKind::Comment, &rest[..len]);
            return Ok(());
        }

        if c == '$' && rest[1..].chars().next().is_some_and(is_word_start) {
            let len = 1 + word_len(&rest[1..]);
            self.push(TokenKind::Variable, &rest[..len]);
            return Ok(());
        }

        if rest.starts_with("<<<") {
            if let Some(len) = heredoc_len(rest) {
                self.push(TokenKind::ConstantString, &rest[..len]);
                return Ok(());
            }
        }

        if matches!(c, '\'' | '"' | '`') {
            let len = quoted_len(rest, c);
            self.push(TokenKind::ConstantString, &rest[..len]);
            return Ok(());
        }

        if c.is_ascii_digit() {
            let len = rest
                .find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '.' || ch == '_'))
                .unwrap_or(rest.len());
            self.push(TokenKind::Number, &rest[..len]);
            return Ok(());
        }

        if is_word_start(c) {
            let len = word_len(rest);
            self.push(TokenKind::Identifier, &rest[..len]);
            return Ok(());
        }

        let (kind, len) = punctuation(rest, c);
        self.push(kind, &rest[..len]);
        Ok(())
    }

    /// Split a `/** ... */` block into per-line doc comment tokens.
    fn lex_doc_comment(&mut self, rest: &'a str) -> Result<()> {
        let Some(end) = rest[3..].find("*/") else {
            return Err(Error::UnterminatedComment { line: self.line });
        };
        let body = &rest[3..3 + end];

        let opener = self.push(TokenKind::DocCommentOpen, "/**");
        let mut tags = Vec::new();

        for (index, segment) in body.split_inclusive('\n').enumerate() {
            let mut line = segment;
            if index > 0 {
                let indent = line.len() - line.trim_start_matches([' ', '\t']).len();
                if indent > 0 {
                    self.push(TokenKind::DocCommentWhitespace, &line[..indent]);
                    line = &line[indent..];
                }
                if line.starts_with('*') {
                    self.push(TokenKind::DocCommentStar, "*");
                    line = &line[1..];
                }
            }

            let gap = line.len() - line.trim_start_matches([' ', '\t']).len();
            let content_end = line.trim_end_matches([' ', '\t', '\r', '\n']).len();
            if content_end <= gap {
                if !line.is_empty() {
                    self.push(TokenKind::DocCommentWhitespace, line);
                }
                continue;
            }
            if gap > 0 {
                self.push(TokenKind::DocCommentWhitespace, &line[..gap]);
            }

            let text = &line[gap..content_end];
            if text.starts_with('@') {
                let tag_len = text.find(char::is_whitespace).unwrap_or(text.len());
                tags.push(self.push(TokenKind::DocCommentTag, &text[..tag_len]));
                let after = &text[tag_len..];
                let space = after.len() - after.trim_start().len();
                if space > 0 {
                    self.push(TokenKind::DocCommentWhitespace, &after[..space]);
                }
                if space < after.len() {
                    self.push(TokenKind::DocCommentString, &after[space..]);
                }
            } else {
                self.push(TokenKind::DocCommentString, text);
            }

            if content_end < line.len() {
                self.push(TokenKind::DocCommentWhitespace, &line[content_end..]);
            }
        }

        let closer = self.push(TokenKind::DocCommentClose, "*/");
        self.tokens[opener].pair = Some(closer);
        self.tokens[opener].comment_tags = tags;
        self.tokens[closer].pair = Some(opener);
        Ok(())
    }
}

/// Locate the next `<?php` / `<?=` tag: (offset, length, kind).
fn find_open_tag(text: &str) -> Option<(usize, usize, TokenKind)> {
    for (idx, _) in text.match_indices("<?") {
        let after = &text[idx + 2..];
        if after.starts_with('=') {
            return Some((idx, 3, TokenKind::OpenTagWithEcho));
        }
        if after.get(..3).is_some_and(|s| s.eq_ignore_ascii_case("php")) {
            let tail = &after[3..];
            match tail.chars().next() {
                None => return Some((idx, 5, TokenKind::OpenTag)),
                Some(c) if c.is_whitespace() => {
                    let extra = match newline_len(tail) {
                        0 => c.len_utf8(),
                        n => n,
                    };
                    return Some((idx, 5 + extra, TokenKind::OpenTag));
                }
                _ => {}
            }
        }
    }
    None
}

fn newline_len(text: &str) -> usize {
    if text.starts_with("\r\n") {
        2
    } else if text.starts_with('\n') {
        1
    } else {
        0
    }
}

/// Blanks up to and including the first newline.
fn whitespace_len(text: &str) -> usize {
    let mut len = 0;
    for c in text.chars() {
        match c {
            '\n' => return len + 1,
            ' ' | '\t' | '\r' => len += 1,
            _ => break,
        }
    }
    len
}

fn is_word_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || !c.is_ascii()
}

fn word_len(text: &str) -> usize {
    text.find(|c: char| !(c.is_alphanumeric() || c == '_' || !c.is_ascii()))
        .unwrap_or(text.len())
}

/// Length of a quoted literal including both quotes; runs to the end of input
/// when unterminated.
fn quoted_len(text: &str, quote: char) -> usize {
    let mut escaped = false;
    for (i, c) in text.char_indices().skip(1) {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote {
            return i + 1;
        }
    }
    text.len()
}

/// Length of a heredoc or nowdoc (`<<<ID`, `<<<"ID"`, `<<<'ID'`) up to and
/// including its closing identifier. `None` when `text` is not one; an
/// unterminated body runs to the end of input.
fn heredoc_len(text: &str) -> Option<usize> {
    let header = text[3..].trim_start_matches([' ', '\t']);
    let mut offset = text.len() - header.len();
    let quote = header.chars().next().filter(|c| matches!(c, '\'' | '"'));
    let name_start = offset + quote.map_or(0, |q| q.len_utf8());
    let name_len = word_len(&text[name_start..]);
    if name_len == 0 || !text[name_start..].starts_with(is_word_start) {
        return None;
    }
    let name = &text[name_start..name_start + name_len];
    offset = name_start + name_len;
    if let Some(q) = quote {
        if !text[offset..].starts_with(q) {
            return None;
        }
        offset += q.len_utf8();
    }
    let newline = newline_len(&text[offset..]);
    if newline == 0 {
        return None;
    }
    offset += newline;

    // The closing identifier starts a line, optionally indented, and must not
    // run on into a longer word.
    while offset < text.len() {
        let line = &text[offset..];
        let body = line.trim_start_matches([' ', '\t']);
        if let Some(after) = body.strip_prefix(name) {
            if !after.starts_with(|c: char| c.is_alphanumeric() || c == '_' || !c.is_ascii()) {
                return Some(text.len() - after.len());
            }
        }
        offset += line.find('\n').map_or(line.len(), |i| i + 1);
    }
    Some(text.len())
}

fn punctuation(text: &str, c: char) -> (TokenKind, usize) {
    use TokenKind::*;

    for (op, kind) in [
        ("...", Ellipsis),
        ("?->", ObjectOperator),
        ("::", DoubleColon),
        ("->", ObjectOperator),
        ("&&", Operator),
        ("#[", OpenBracket),
    ] {
        if text.starts_with(op) {
            return (kind, op.len());
        }
    }

    let kind = match c {
        '(' => OpenParen,
        ')' => CloseParen,
        '{' => OpenBrace,
        '}' => CloseBrace,
        '[' => OpenBracket,
        ']' => CloseBracket,
        ',' => Comma,
        ';' => Semicolon,
        '&' => Ampersand,
        _ => Operator,
    };
    (kind, c.len_utf8())
}

fn is_trivia(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Whitespace
            | TokenKind::Comment
            | TokenKind::DocCommentOpen
            | TokenKind::DocCommentClose
            | TokenKind::DocCommentWhitespace
            | TokenKind::DocCommentStar
            | TokenKind::DocCommentString
            | TokenKind::DocCommentTag
    )
}

/// Turn words into keyword kinds, taking the preceding token into account so
/// that `Foo::class`, `$x->function` and `use function` stay identifiers.
fn classify_keywords(tokens: &mut [Token]) {
    let mut previous: Option<TokenKind> = None;
    for token in tokens.iter_mut() {
        if token.kind == TokenKind::Identifier {
            let member = matches!(
                previous,
                Some(TokenKind::DoubleColon | TokenKind::ObjectOperator)
            );
            if !member {
                token.kind = match token.content.to_ascii_lowercase().as_str() {
                    "function" if previous == Some(TokenKind::Use) => TokenKind::Identifier,
                    "function" => TokenKind::Function,
                    "class" if previous == Some(TokenKind::Use) => TokenKind::Identifier,
                    "class" if previous == Some(TokenKind::New) => TokenKind::AnonClass,
                    "class" => TokenKind::Class,
                    "interface" => TokenKind::Interface,
                    "trait" => TokenKind::Trait,
                    "new" => TokenKind::New,
                    "use" => TokenKind::Use,
                    "abstract" => TokenKind::Abstract,
                    "final" => TokenKind::Final,
                    "static" => TokenKind::Static,
                    "public" => TokenKind::Public,
                    "protected" => TokenKind::Protected,
                    "private" => TokenKind::Private,
                    "readonly" => TokenKind::Readonly,
                    _ => TokenKind::Identifier,
                };
            }
        }
        if !is_trivia(token.kind) {
            previous = Some(token.kind);
        }
    }

    // `function (` and `function &(` are closures.
    for i in 0..tokens.len() {
        if tokens[i].kind != TokenKind::Function {
            continue;
        }
        let mut next = tokens[i + 1..]
            .iter()
            .map(|t| t.kind)
            .filter(|k| !is_trivia(*k));
        let closure = match next.next() {
            Some(TokenKind::OpenParen) => true,
            Some(TokenKind::Ampersand) => next.next() == Some(TokenKind::OpenParen),
            _ => false,
        };
        if closure {
            tokens[i].kind = TokenKind::Closure;
        }
    }
}

fn link_pairs(tokens: &mut [Token]) {
    let mut parens = Vec::new();
    let mut braces = Vec::new();
    let mut brackets = Vec::new();

    for i in 0..tokens.len() {
        let stack = match tokens[i].kind {
            TokenKind::OpenParen => {
                parens.push(i);
                continue;
            }
            TokenKind::OpenBrace => {
                braces.push(i);
                continue;
            }
            TokenKind::OpenBracket => {
                brackets.push(i);
                continue;
            }
            TokenKind::CloseParen => &mut parens,
            TokenKind::CloseBrace => &mut braces,
            TokenKind::CloseBracket => &mut brackets,
            _ => continue,
        };
        if let Some(open) = stack.pop() {
            tokens[open].pair = Some(i);
            tokens[i].pair = Some(open);
        }
    }
}
