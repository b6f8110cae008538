//! Operator detection for the live preview.
//!
//! Runs on every keystroke, so it is a single pass over the input with no
//! allocation.

/// Check if an expression contains a binary operator.
///
/// `+`, `*` and `/` (or their glyphs) always count. A `-` only counts when it
/// follows a digit, a decimal point or a closing parenthesis, so a leading
/// negative sign like `-5` is not an operation. Completeness is not checked:
/// `5+` contains an operator.
pub fn has_binary_operator(input: &str) -> bool {
    let mut prev_non_space: Option<char> = None;

    for c in input.chars() {
        match c {
            '+' | '*' | '/' | '×' | '÷' => return true,
            '-' => {
                if let Some(prev) = prev_non_space
                    && (prev.is_ascii_digit() || prev == '.' || prev == ')')
                {
                    return true;
                }
            }
            _ => {}
        }

        if !c.is_whitespace() {
            prev_non_space = Some(c);
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_numbers_have_no_operator() {
        assert!(!has_binary_operator(""));
        assert!(!has_binary_operator("123"));
        assert!(!has_binary_operator("42.5"));
        assert!(!has_binary_operator("-5"));
        assert!(!has_binary_operator("(-5)"));
    }

    #[test]
    fn test_operators_detected() {
        assert!(has_binary_operator("5+3"));
        assert!(has_binary_operator("5+"));
        assert!(has_binary_operator("10 - 5"));
        assert!(has_binary_operator("6×2"));
        assert!(has_binary_operator("6÷2"));
        assert!(has_binary_operator("(2)-1"));
        assert!(has_binary_operator("-5*3"));
    }

    #[test]
    fn test_minus_after_operator_is_unary() {
        // the '*' is what makes this an operation
        assert!(has_binary_operator("2*-3"));
        assert!(!has_binary_operator("--3"));
    }
}
