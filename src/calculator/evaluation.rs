//! Expression evaluation using meval.
//!
//! Wraps meval to evaluate calculator expressions in `f64`. Input is first
//! checked against the calculator's own token alphabet and shape, so meval
//! never sees function names, constants or `^`, and every failure maps onto a
//! [`CalcError`].

use std::ops::Range;

use super::error::CalcError;
use super::lexer::{Token, TokenKind, tokenize};
use super::notation::to_canonical;

/// Decimal places kept when formatting results.
pub const DEFAULT_PRECISION: usize = 10;

/// Largest precision that still fits in an `f64`'s significant digits.
pub const MAX_PRECISION: usize = 15;

/// Maximum nesting of parentheses.
const MAX_DEPTH: usize = 256;

/// Integral results below this magnitude are printed without decimals.
const INTEGER_DISPLAY_LIMIT: f64 = 1e15;

/// Evaluate an arithmetic expression.
///
/// Display glyphs (`×`, `÷`) are accepted. Division by zero and results that
/// overflow are reported as errors rather than infinite values.
pub fn evaluate(input: &str) -> Result<f64, CalcError> {
    let source = to_canonical(input);
    let tokens = tokenize(&source)?;
    if tokens.is_empty() {
        return Err(CalcError::Empty);
    }

    let prepared = prepare(&source, &tokens)?;

    for divisor in &prepared.divisors {
        if eval_str(&prepared.text[divisor.clone()])? == 0.0 {
            return Err(CalcError::DivisionByZero);
        }
    }

    let value = eval_str(&prepared.text)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::NotFinite)
    }
}

/// Evaluate an expression and format the result for display.
pub fn calculate_result(input: &str, precision: usize) -> Result<String, CalcError> {
    evaluate(input).map(|value| format_number(value, precision))
}

/// Format a number without insignificant trailing zeros.
///
/// Never uses scientific notation.
pub fn format_number(value: f64, precision: usize) -> String {
    if value.fract() == 0.0 && value.abs() < INTEGER_DISPLAY_LIMIT {
        // `as i64` also folds -0.0 into 0
        return format!("{}", value as i64);
    }

    let formatted = format!("{:.*}", precision, value);
    let trimmed = if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.')
    } else {
        formatted.as_str()
    };

    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

fn eval_str(expression: &str) -> Result<f64, CalcError> {
    meval::eval_str(expression).map_err(|err| CalcError::Malformed(err.to_string()))
}

/// An expression rewritten for meval, with the location of every divisor.
#[derive(Debug)]
struct Prepared {
    text: String,
    /// Byte ranges into `text`, innermost divisors first.
    divisors: Vec<Range<usize>>,
}

/// Check the token sequence and rewrite it for meval.
///
/// Runs of unary signs collapse into at most one `-`, and numbers like `5.`
/// or `.5` get the zero meval expects. Each operand that follows a `/` is
/// recorded so it can be checked for zero before the division happens.
fn prepare(source: &str, tokens: &[Token]) -> Result<Prepared, CalcError> {
    let mut text = String::with_capacity(source.len());
    let mut divisors = Vec::new();
    // (start in `text`, nesting depth) of each divisor still being read
    let mut pending: Vec<(usize, usize)> = Vec::new();
    let mut open: Vec<usize> = Vec::new();
    let mut expect_operand = true;
    let mut negate = false;

    for token in tokens {
        if expect_operand {
            match token.kind {
                TokenKind::Plus => {}
                TokenKind::Minus => negate = !negate,
                TokenKind::Number => {
                    let literal = token.text(source);
                    if literal.parse::<f64>().is_err() {
                        return Err(CalcError::InvalidNumber(literal.to_string()));
                    }
                    push_sign(&mut text, &mut negate);
                    push_number(&mut text, literal);
                    expect_operand = false;
                    close_divisor(&mut pending, &mut divisors, open.len(), text.len());
                }
                TokenKind::LParen => {
                    if open.len() >= MAX_DEPTH {
                        return Err(CalcError::TooDeep);
                    }
                    push_sign(&mut text, &mut negate);
                    text.push('(');
                    open.push(token.position);
                }
                TokenKind::RParen | TokenKind::Star | TokenKind::Slash => {
                    return Err(unexpected(source, token));
                }
            }
        } else {
            match token.kind {
                TokenKind::Plus => text.push('+'),
                TokenKind::Minus => text.push('-'),
                TokenKind::Star => text.push('*'),
                TokenKind::Slash => {
                    text.push('/');
                    pending.push((text.len(), open.len()));
                }
                TokenKind::RParen => {
                    if open.pop().is_none() {
                        return Err(unexpected(source, token));
                    }
                    text.push(')');
                    close_divisor(&mut pending, &mut divisors, open.len(), text.len());
                    continue;
                }
                TokenKind::Number | TokenKind::LParen => {
                    return Err(unexpected(source, token));
                }
            }
            expect_operand = true;
        }
    }

    if expect_operand {
        return Err(CalcError::UnexpectedEnd);
    }
    if let Some(&position) = open.last() {
        return Err(CalcError::UnbalancedParenthesis { position });
    }

    Ok(Prepared { text, divisors })
}

fn push_sign(text: &mut String, negate: &mut bool) {
    if *negate {
        text.push('-');
        *negate = false;
    }
}

fn push_number(text: &mut String, literal: &str) {
    if literal.starts_with('.') {
        text.push('0');
    }
    text.push_str(literal);
    if literal.ends_with('.') {
        text.push('0');
    }
}

/// Finish the innermost divisor if the operand that just ended was it.
fn close_divisor(
    pending: &mut Vec<(usize, usize)>,
    divisors: &mut Vec<Range<usize>>,
    depth: usize,
    end: usize,
) {
    if let Some(&(start, divisor_depth)) = pending.last()
        && divisor_depth == depth
    {
        pending.pop();
        divisors.push(start..end);
    }
}

fn unexpected(source: &str, token: &Token) -> CalcError {
    CalcError::UnexpectedToken {
        token: token.text(source).to_string(),
        position: token.position,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn eval(input: &str) -> f64 {
        evaluate(input).unwrap()
    }

    #[test]
    fn test_basic_evaluation() {
        assert_eq!(eval("2+2"), 4.0);
        assert_eq!(eval("6/3*2"), 4.0);
        assert_eq!(eval("(1+2)*3"), 9.0);
        assert_eq!(eval("12+3*(4-1)"), 21.0);
    }

    #[test]
    fn test_precedence_and_associativity() {
        assert_eq!(eval("2+3*4"), 14.0);
        assert_eq!(eval("10-4-3"), 3.0);
        assert_eq!(eval("64/4/2"), 8.0);
        assert_eq!(eval("2*3+4*5"), 26.0);
    }

    #[test]
    fn test_unary_signs() {
        assert_eq!(eval("-5"), -5.0);
        assert_eq!(eval("12+-5"), 7.0);
        assert_eq!(eval("-(2+3)"), -5.0);
        assert_eq!(eval("3--2"), 5.0);
        assert_eq!(eval("+4"), 4.0);
    }

    #[test]
    fn test_display_glyphs() {
        assert_eq!(eval("6÷3×2"), 4.0);
    }

    #[test]
    fn test_decimal_forms() {
        assert_eq!(eval(".5+5."), 5.5);
        assert_eq!(eval("0.25*4"), 1.0);
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(evaluate("5/0"), Err(CalcError::DivisionByZero));
        assert_eq!(evaluate("1/(2-2)"), Err(CalcError::DivisionByZero));
        assert_eq!(evaluate("1/(1/0)"), Err(CalcError::DivisionByZero));
        assert_eq!(evaluate("1/-0"), Err(CalcError::DivisionByZero));
        assert_eq!(evaluate("0/5"), Ok(0.0));
        assert_eq!(evaluate("2/3*0"), Ok(0.0));
    }

    #[test]
    fn test_prepare_rewrites_for_meval() {
        let source = "--3*+.5/(2-2.)";
        let tokens = tokenize(source).unwrap();
        let prepared = prepare(source, &tokens).unwrap();
        assert_eq!(prepared.text, "3*0.5/(2-2.0)");
        assert_eq!(prepared.divisors.len(), 1);
        assert_eq!(&prepared.text[prepared.divisors[0].clone()], "(2-2.0)");
    }

    #[test]
    fn test_prepare_marks_nested_divisors_innermost_first() {
        let source = "8/-(4/2)";
        let tokens = tokenize(source).unwrap();
        let prepared = prepare(source, &tokens).unwrap();
        let divisors: Vec<&str> = prepared
            .divisors
            .iter()
            .map(|range| &prepared.text[range.clone()])
            .collect();
        assert_eq!(divisors, vec!["2", "-(4/2)"]);
        assert_eq!(evaluate(source), Ok(-4.0));
    }

    #[test]
    fn test_incomplete_expressions() {
        assert_eq!(evaluate(""), Err(CalcError::Empty));
        assert_eq!(evaluate("   "), Err(CalcError::Empty));
        assert_eq!(evaluate("5+"), Err(CalcError::UnexpectedEnd));
        assert_eq!(evaluate("5*-"), Err(CalcError::UnexpectedEnd));
        assert_eq!(
            evaluate("(1+2"),
            Err(CalcError::UnbalancedParenthesis { position: 0 })
        );
    }

    #[test]
    fn test_malformed_expressions() {
        assert_eq!(
            evaluate("1+2)"),
            Err(CalcError::UnexpectedToken {
                token: ")".to_string(),
                position: 3
            })
        );
        assert!(matches!(
            evaluate("2(3)"),
            Err(CalcError::UnexpectedToken { .. })
        ));
        assert!(matches!(
            evaluate("()"),
            Err(CalcError::UnexpectedToken { .. })
        ));
        assert!(matches!(evaluate("*2"), Err(CalcError::UnexpectedToken { .. })));
        assert_eq!(
            evaluate("1.2.3"),
            Err(CalcError::InvalidNumber("1.2.3".to_string()))
        );
        assert_eq!(evaluate("."), Err(CalcError::InvalidNumber(".".to_string())));
    }

    #[test]
    fn test_overflow_is_not_finite() {
        let huge = format!("1{}", "0".repeat(308));
        assert_eq!(evaluate(&format!("{huge}*10")), Err(CalcError::NotFinite));
    }

    #[test]
    fn test_deep_nesting_is_rejected() {
        let deep = format!("{}1{}", "(".repeat(300), ")".repeat(300));
        assert_eq!(evaluate(&deep), Err(CalcError::TooDeep));

        let fine = format!("{}1{}", "(".repeat(50), ")".repeat(50));
        assert_eq!(evaluate(&fine), Ok(1.0));
    }

    #[test]
    fn test_format_integers() {
        assert_eq!(format_number(4.0, DEFAULT_PRECISION), "4");
        assert_eq!(format_number(-7.0, DEFAULT_PRECISION), "-7");
        assert_eq!(format_number(-0.0, DEFAULT_PRECISION), "0");
    }

    #[test]
    fn test_format_trims_trailing_zeros() {
        assert_eq!(format_number(0.1 + 0.2, DEFAULT_PRECISION), "0.3");
        assert_eq!(format_number(2.5, DEFAULT_PRECISION), "2.5");
        assert!(format_number(1.0 / 3.0, DEFAULT_PRECISION).starts_with("0.333"));
        assert_eq!(format_number(1.0 / 3.0, 2), "0.33");
    }

    #[test]
    fn test_format_tiny_negative_is_zero() {
        assert_eq!(format_number(-1e-12, DEFAULT_PRECISION), "0");
    }

    #[test]
    fn test_format_avoids_scientific_notation() {
        let formatted = format_number(1e20, DEFAULT_PRECISION);
        assert!(!formatted.contains('e'));
        assert_eq!(formatted, "100000000000000000000");
    }

    #[test]
    fn test_calculate_result() {
        assert_eq!(calculate_result("1/4", DEFAULT_PRECISION), Ok("0.25".into()));
        assert!(calculate_result("1/0", DEFAULT_PRECISION).is_err());
    }

    proptest! {
        #[test]
        fn prop_integer_arithmetic_matches(a in -10_000i64..10_000, b in -10_000i64..10_000, c in 1i64..100) {
            let expr = format!("{a}+{b}*{c}");
            prop_assert_eq!(evaluate(&expr), Ok((a + b * c) as f64));

            let grouped = format!("({a}+{b})*{c}");
            prop_assert_eq!(evaluate(&grouped), Ok(((a + b) * c) as f64));
        }

        #[test]
        fn prop_evaluation_is_deterministic(input in "[0-9+*/().-]{0,24}") {
            prop_assert_eq!(evaluate(&input), evaluate(&input));
        }

        #[test]
        fn prop_results_are_finite(input in "[0-9+*/().-]{0,24}") {
            if let Ok(value) = evaluate(&input) {
                prop_assert!(value.is_finite());
            }
        }
    }
}
