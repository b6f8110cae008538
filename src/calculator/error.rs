use thiserror::Error;

/// Reasons an expression has no usable numeric result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("Empty expression")]
    Empty,
    #[error("Unexpected character '{ch}' at position {position}")]
    UnexpectedCharacter { ch: char, position: usize },
    #[error("Invalid number '{0}'")]
    InvalidNumber(String),
    #[error("Unexpected '{token}' at position {position}")]
    UnexpectedToken { token: String, position: usize },
    #[error("Expression ends unexpectedly")]
    UnexpectedEnd,
    #[error("Parenthesis opened at position {position} is never closed")]
    UnbalancedParenthesis { position: usize },
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Result is not a finite number")]
    NotFinite,
    #[error("Expression is nested too deeply")]
    TooDeep,
    #[error("Malformed expression: {0}")]
    Malformed(String),
}

impl CalcError {
    /// Whether the expression could still become valid by typing more.
    ///
    /// Trailing operators and unclosed groups are the normal state of an
    /// expression that is being typed.
    pub fn is_incomplete(&self) -> bool {
        matches!(
            self,
            Self::Empty | Self::UnexpectedEnd | Self::UnbalancedParenthesis { .. }
        )
    }
}
