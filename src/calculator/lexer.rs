//! Tokenization of calculator expressions.
//!
//! Tokens keep their byte span so callers can splice the expression in place,
//! and their character position for error reporting.

use std::ops::Range;

use super::error::CalcError;

/// Kind of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A run of digits and decimal points, validated by the evaluator.
    Number,
    /// '+'
    Plus,
    /// '-'
    Minus,
    /// '*' or '×'
    Star,
    /// '/' or '÷'
    Slash,
    /// '('
    LParen,
    /// ')'
    RParen,
}

impl TokenKind {
    /// Whether this token is one of the four arithmetic operators.
    pub fn is_operator(self) -> bool {
        matches!(self, Self::Plus | Self::Minus | Self::Star | Self::Slash)
    }
}

/// A token with its location in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte range into the source string.
    pub span: Range<usize>,
    /// Character offset of the first character.
    pub position: usize,
}

impl Token {
    /// The source text this token covers.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.span.clone()]
    }
}

/// Split an expression into tokens, skipping whitespace.
///
/// Display glyphs are accepted in place of `*` and `/`.
pub fn tokenize(input: &str) -> Result<Vec<Token>, CalcError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().enumerate().peekable();

    while let Some((position, (start, ch))) = chars.next() {
        let kind = match ch {
            c if c.is_whitespace() => continue,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' | '×' => TokenKind::Star,
            '/' | '÷' => TokenKind::Slash,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            c if c.is_ascii_digit() || c == '.' => {
                let mut end = start + c.len_utf8();
                while let Some(&(_, (idx, next))) = chars.peek() {
                    if !(next.is_ascii_digit() || next == '.') {
                        break;
                    }
                    end = idx + next.len_utf8();
                    chars.next();
                }
                tokens.push(Token {
                    kind: TokenKind::Number,
                    span: start..end,
                    position,
                });
                continue;
            }
            other => {
                return Err(CalcError::UnexpectedCharacter {
                    ch: other,
                    position,
                });
            }
        };

        tokens.push(Token {
            kind,
            span: start..start + ch.len_utf8(),
            position,
        });
    }

    Ok(tokens)
}

/// Whether the token at `index` is a sign rather than a binary operator.
///
/// A `+` or `-` is unary at the start of the expression, right after an
/// operator, or right after an opening parenthesis.
pub fn is_unary_sign(tokens: &[Token], index: usize) -> bool {
    let Some(token) = tokens.get(index) else {
        return false;
    };
    if !matches!(token.kind, TokenKind::Plus | TokenKind::Minus) {
        return false;
    }

    match index.checked_sub(1).and_then(|prev| tokens.get(prev)) {
        None => true,
        Some(prev) => prev.kind.is_operator() || prev.kind == TokenKind::LParen,
    }
}
