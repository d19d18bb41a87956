//! Declared name and parameter list of a function.

use crate::token::{TokenKind, TokenStream};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Variable name including the `$` sigil.
    pub name: String,
    pub by_reference: bool,
    pub variadic: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    /// `None` for anonymous functions.
    pub name: Option<String>,
    pub params: Vec<Parameter>,
}

impl Signature {
    /// Constructors and destructors never document a return value.
    pub fn is_special_method(&self) -> bool {
        matches!(
            self.name.as_deref().map(str::to_ascii_lowercase).as_deref(),
            Some("__construct" | "__destruct")
        )
    }

    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|p| p.name.as_str())
    }
}

const SKIP: &[TokenKind] = &[
    TokenKind::Whitespace,
    TokenKind::Comment,
    TokenKind::Ampersand,
];

/// Read the signature of the function whose keyword is at `function`.
///
/// Returns `None` when no parameter list follows the keyword.
pub fn extract(stream: &TokenStream, function: usize) -> Option<Signature> {
    let name_pos = stream.find_next(SKIP, function + 1, None, true)?;
    let name = match stream[name_pos].kind {
        TokenKind::OpenParen => None,
        _ => Some(stream[name_pos].content.clone()),
    };

    let open = stream.find_next(&[TokenKind::OpenParen], name_pos, None, false)?;
    let close = stream[open].pair?;

    let mut params = Vec::new();
    let mut current: Option<Parameter> = None;
    let mut by_reference = false;
    let mut variadic = false;

    let mut i = open + 1;
    while i < close {
        let token = &stream[i];
        match token.kind {
            TokenKind::OpenParen | TokenKind::OpenBracket | TokenKind::OpenBrace => {
                i = token.pair.unwrap_or(i);
            }
            TokenKind::Ampersand if current.is_none() => by_reference = true,
            TokenKind::Ellipsis if current.is_none() => variadic = true,
            TokenKind::Variable if current.is_none() => {
                current = Some(Parameter {
                    name: token.content.clone(),
                    by_reference,
                    variadic,
                });
            }
            TokenKind::Comma => {
                params.extend(current.take());
                by_reference = false;
                variadic = false;
            }
            _ => {}
        }
        i += 1;
    }
    params.extend(current);

    Some(Signature { name, params })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn signature_of(src: &str) -> Signature {
        let stream = tokenize(src).unwrap();
        let pos = stream
            .find_next(&[TokenKind::Function, TokenKind::Closure], 0, None, false)
            .unwrap();
        extract(&stream, pos).unwrap()
    }

    #[test]
    fn reads_ordered_parameters() {
        let sig = signature_of("<?php function save(array $row, ?Foo &$out = null, int ...$ids) {}");
        assert_eq!(sig.name.as_deref(), Some("save"));
        let names: Vec<_> = sig.param_names().collect();
        assert_eq!(names, ["$row", "$out", "$ids"]);
        assert!(sig.params[1].by_reference);
        assert!(sig.params[2].variadic);
    }

    #[test]
    fn default_values_do_not_add_parameters() {
        let sig = signature_of("<?php function f($a = [1, 2], $b = array(3), $c = self::X) {}");
        let names: Vec<_> = sig.param_names().collect();
        assert_eq!(names, ["$a", "$b", "$c"]);
    }

    #[test]
    fn by_reference_return_and_closures() {
        let sig = signature_of("<?php function &getRef($x) {}");
        assert_eq!(sig.name.as_deref(), Some("getRef"));

        let sig = signature_of("<?php $f = function ($y) use ($z) {};");
        assert_eq!(sig.name, None);
        assert_eq!(sig.param_names().collect::<Vec<_>>(), ["$y"]);
    }

    #[test]
    fn special_methods() {
        assert!(signature_of("<?php function __construct() {}").is_special_method());
        assert!(signature_of("<?php function __Destruct() {}").is_special_method());
        assert!(!signature_of("<?php function build() {}").is_special_method());
    }
}
