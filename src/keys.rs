//! Button labels and the commands they stand for.

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    /// Caret move: `@3` for a caret, `@1..4` for a selection.
    static ref CARET_KEY: Regex = Regex::new(r"^@(\d+)(?:\.\.(\d+))?$").unwrap();
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("Unknown key '{0}'")]
    Unknown(String),
    #[error("Invalid caret position '{0}'")]
    InvalidCaret(String),
}

/// One of the four arithmetic operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// The character the evaluator understands.
    pub fn canonical(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }
}

/// A command from the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Digit(char),
    Point,
    Operator(Operator),
    /// Insert whichever parenthesis is needed.
    Parenthesis,
    Open,
    Close,
    Percent,
    ToggleSign,
    Clear,
    Backspace,
    Equals,
    ClearHistory,
    Caret { start: usize, end: usize },
}

impl Key {
    /// The text this key types into the expression, if it types anything.
    pub fn token(&self) -> Option<char> {
        match self {
            Self::Digit(d) => Some(*d),
            Self::Point => Some('.'),
            Self::Operator(op) => Some(op.canonical()),
            Self::Open => Some('('),
            Self::Close => Some(')'),
            _ => None,
        }
    }
}

impl FromStr for Key {
    type Err = KeyError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        let key = match label {
            "." => Self::Point,
            "+" => Self::Operator(Operator::Add),
            "-" => Self::Operator(Operator::Subtract),
            "X" | "x" | "*" | "×" => Self::Operator(Operator::Multiply),
            "/" | "÷" => Self::Operator(Operator::Divide),
            "()" => Self::Parenthesis,
            "(" => Self::Open,
            ")" => Self::Close,
            "%" => Self::Percent,
            "+/-" => Self::ToggleSign,
            "C" | "c" => Self::Clear,
            "=" => Self::Equals,
            "<" | "⌫" => Self::Backspace,
            "CH" => Self::ClearHistory,
            _ => return parse_other(label),
        };
        Ok(key)
    }
}

fn parse_other(label: &str) -> Result<Key, KeyError> {
    let mut chars = label.chars();
    if let (Some(d), None) = (chars.next(), chars.next())
        && d.is_ascii_digit()
    {
        return Ok(Key::Digit(d));
    }

    let Some(caps) = CARET_KEY.captures(label) else {
        return Err(KeyError::Unknown(label.to_string()));
    };

    let offset = |m: regex::Match<'_>| {
        m.as_str()
            .parse::<usize>()
            .map_err(|_| KeyError::InvalidCaret(label.to_string()))
    };
    let start = offset(caps.get(1).ok_or_else(|| KeyError::InvalidCaret(label.to_string()))?)?;
    let end = caps.get(2).map(offset).transpose()?.unwrap_or(start);

    Ok(Key::Caret { start, end })
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Digit(d) => write!(f, "{d}"),
            Self::Point => write!(f, "."),
            Self::Operator(Operator::Multiply) => write!(f, "X"),
            Self::Operator(op) => write!(f, "{}", op.canonical()),
            Self::Parenthesis => write!(f, "()"),
            Self::Open => write!(f, "("),
            Self::Close => write!(f, ")"),
            Self::Percent => write!(f, "%"),
            Self::ToggleSign => write!(f, "+/-"),
            Self::Clear => write!(f, "C"),
            Self::Equals => write!(f, "="),
            Self::Backspace => write!(f, "<"),
            Self::ClearHistory => write!(f, "CH"),
            Self::Caret { start, end } if start == end => write!(f, "@{start}"),
            Self::Caret { start, end } => write!(f, "@{start}..{end}"),
        }
    }
}

/// Parse a whitespace-separated sequence of key labels.
pub fn parse_keys(line: &str) -> Result<Vec<Key>, KeyError> {
    line.split_whitespace().map(str::parse).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_labels() {
        assert_eq!("7".parse(), Ok(Key::Digit('7')));
        assert_eq!("X".parse(), Ok(Key::Operator(Operator::Multiply)));
        assert_eq!("÷".parse(), Ok(Key::Operator(Operator::Divide)));
        assert_eq!("+/-".parse(), Ok(Key::ToggleSign));
        assert_eq!("()".parse(), Ok(Key::Parenthesis));
        assert_eq!("⌫".parse(), Ok(Key::Backspace));
    }

    #[test]
    fn test_caret_keys() {
        assert_eq!("@3".parse(), Ok(Key::Caret { start: 3, end: 3 }));
        assert_eq!("@1..4".parse(), Ok(Key::Caret { start: 1, end: 4 }));
        assert_eq!(
            "@99999999999999999999999".parse::<Key>(),
            Err(KeyError::InvalidCaret("@99999999999999999999999".into()))
        );
    }

    #[test]
    fn test_unknown_keys() {
        assert_eq!("^".parse::<Key>(), Err(KeyError::Unknown("^".into())));
        assert_eq!("12".parse::<Key>(), Err(KeyError::Unknown("12".into())));
        assert_eq!("@".parse::<Key>(), Err(KeyError::Unknown("@".into())));
    }

    #[test]
    fn test_tokens() {
        assert_eq!(Key::Digit('4').token(), Some('4'));
        assert_eq!(Key::Operator(Operator::Multiply).token(), Some('*'));
        assert_eq!(Key::Percent.token(), None);
    }

    #[test]
    fn test_parse_keys_line() {
        let keys = parse_keys("1 + 2 X ( 3 ) =").unwrap();
        assert_eq!(keys.len(), 8);
        assert_eq!(keys[3], Key::Operator(Operator::Multiply));
        assert!(parse_keys("1 ? 2").is_err());
    }

    #[test]
    fn test_labels_round_trip_through_display() {
        for label in ["7", ".", "+", "-", "X", "/", "()", "%", "+/-", "C", "=", "<", "@2..5"] {
            let key: Key = label.parse().unwrap();
            assert_eq!(key.to_string(), label);
        }
    }
}
