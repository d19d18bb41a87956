//! Token model shared by the lexer, the locator and the sniffs.
//!
//! Tokens are immutable once produced. Fixes never add or remove tokens, they
//! only replace the text of an existing one.

use std::ops::Index;

/// Closed classification of PHP tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    InlineHtml,
    OpenTag,
    OpenTagWithEcho,
    CloseTag,
    Whitespace,
    /// `//`, `#` and `/* */` comments.
    Comment,

    DocCommentOpen,
    DocCommentClose,
    DocCommentWhitespace,
    DocCommentStar,
    DocCommentString,
    DocCommentTag,

    Variable,
    ConstantString,
    Number,
    Identifier,

    Function,
    Closure,
    Class,
    AnonClass,
    Interface,
    Trait,
    New,
    Use,

    Abstract,
    Final,
    Static,
    Public,
    Protected,
    Private,
    Readonly,

    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
    OpenBracket,
    CloseBracket,
    Comma,
    Semicolon,
    Ampersand,
    Ellipsis,
    DoubleColon,
    ObjectOperator,
    Operator,
}

/// Filler inside a doc comment: indentation, newlines and leading stars.
pub const DOC_FILLER: &[TokenKind] = &[TokenKind::DocCommentWhitespace, TokenKind::DocCommentStar];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub content: String,
    /// 1-based line the token starts on.
    pub line: usize,
    /// 1-based column (in chars) the token starts at.
    pub column: usize,
    /// Matching bracket or doc comment delimiter.
    pub pair: Option<usize>,
    /// Positions of the tags of a doc comment; only set on its opener.
    pub comment_tags: Vec<usize>,
}

impl Token {
    pub fn new(kind: TokenKind, content: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            content: content.into(),
            line,
            column,
            pair: None,
            comment_tags: Vec::new(),
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

/// Ordered, read-only token list of one file.
#[derive(Debug, Clone, Default)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, pos: usize) -> Option<&Token> {
        self.tokens.get(pos)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Kind at `pos`, or `None` past the end.
    pub fn kind(&self, pos: usize) -> Option<TokenKind> {
        self.tokens.get(pos).map(|t| t.kind)
    }

    /// Reassemble the source text.
    pub fn source(&self) -> String {
        self.tokens.iter().map(|t| t.content.as_str()).collect()
    }
}

impl Index<usize> for TokenStream {
    type Output = Token;

    fn index(&self, pos: usize) -> &Token {
        &self.tokens[pos]
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
