use std::ops::Range;

use tracing::debug;

use super::caret::Caret;
use crate::calculator::lexer::{Token, TokenKind, is_unary_sign, tokenize};
use crate::calculator::{
    DEFAULT_PRECISION, MAX_PRECISION, calculate_result, has_binary_operator, to_canonical,
    to_display,
};
use crate::history::HistoryEntry;

/// Whether the screen shows an expression being typed or a committed answer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EditorState {
    #[default]
    Editing,
    /// The expression is the result of the last "=". The next inserted token
    /// starts a new expression.
    ShowingAnswer,
}

/// The expression being typed, with its display twin, caret and preview.
#[derive(Clone, Debug)]
pub struct InputEditor {
    /// Canonical form, fed to the evaluator.
    expression: String,
    /// Same content with `×` and `÷` glyphs.
    display: String,
    preview: String,
    caret: Caret,
    /// Set once the presentation layer has reported a caret position.
    caret_active: bool,
    state: EditorState,
    precision: usize,
    live_preview: bool,
}

impl Default for InputEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl InputEditor {
    pub fn new() -> Self {
        Self {
            expression: String::new(),
            display: String::new(),
            preview: String::new(),
            caret: Caret::default(),
            caret_active: false,
            state: EditorState::Editing,
            precision: DEFAULT_PRECISION,
            live_preview: true,
        }
    }

    /// Set the number of decimals kept in answers and previews.
    ///
    /// Values outside `1..=MAX_PRECISION` are clamped into that range.
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision.clamp(1, MAX_PRECISION);
        self
    }

    /// Enable or disable the live preview.
    pub fn with_live_preview(mut self, enabled: bool) -> Self {
        self.live_preview = enabled;
        self
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    /// Result of the expression so far, or empty when there is nothing to show.
    pub fn preview(&self) -> &str {
        &self.preview
    }

    pub fn caret(&self) -> Caret {
        self.caret
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn is_showing_answer(&self) -> bool {
        self.state == EditorState::ShowingAnswer
    }

    pub fn can_backspace(&self) -> bool {
        !self.expression.is_empty()
    }

    /// Insert a token at the caret, or at the end when the caret is inactive
    /// or already at the end.
    ///
    /// The token may use display glyphs; it is stored in canonical form.
    pub fn insert(&mut self, token: &str) {
        if token.is_empty() {
            return;
        }

        if self.state == EditorState::ShowingAnswer {
            self.reset();
        }

        let token = to_canonical(token);
        let token_len = token.chars().count();
        let len = self.char_len();

        if self.caret_active && self.caret.end != len {
            let at = byte_offset(&self.expression, self.caret.end);
            self.expression.insert_str(at, &token);
        } else {
            self.expression.push_str(&token);
        }

        self.caret = self.caret.advanced(token_len, len + token_len);
        self.update();
    }

    /// Remove the last character of the expression.
    pub fn backspace(&mut self) {
        if self.expression.pop().is_some() {
            self.update();
        }
    }

    /// Negate the number at the end of the expression.
    ///
    /// A sign directly in front of the number is folded into it, so `7`
    /// becomes `-7`, `12+-5` becomes `12+5`, and in `12-5` only the `5` is
    /// negated because that minus is a subtraction.
    ///
    /// Only the sign is edited; the digits are kept exactly as typed.
    pub fn toggle_sign(&mut self) {
        let Some((sign, number)) = self.trailing_operand() else {
            return;
        };

        match sign {
            Some(sign) if sign.kind == TokenKind::Minus => self.replace_operand(sign.span, ""),
            Some(sign) => self.replace_operand(sign.span, "-"),
            None => self.replace_operand(number.span.start..number.span.start, "-"),
        }
    }

    /// Turn the last operand into a percentage.
    ///
    /// The decimal point moves two places left in the literal itself, so no
    /// digits are lost to rounding. A sign in front stays where it is.
    pub fn apply_percent(&mut self) {
        let Some((_, number)) = self.trailing_operand() else {
            return;
        };

        let Some(percent) = shift_point_left(number.text(&self.expression), 2) else {
            return;
        };
        self.replace_operand(number.span, &percent);
    }

    /// Insert whichever parenthesis the expression needs next.
    ///
    /// Closes a group while opening parentheses outnumber closing ones,
    /// otherwise opens a new one.
    pub fn toggle_parenthesis(&mut self) {
        let opens = self.expression.matches('(').count();
        let closes = self.expression.matches(')').count();

        if opens > closes {
            self.insert(")");
        } else {
            self.insert("(");
        }
    }

    /// Empty the expression and go back to editing.
    pub fn clear(&mut self) {
        self.reset();
        self.preview.clear();
    }

    /// Evaluate the expression and replace it with the answer.
    ///
    /// Returns the history entry for the calculation. Returns `None`, leaving
    /// everything untouched, when the expression is empty or has no result.
    pub fn commit(&mut self) -> Option<HistoryEntry> {
        if self.expression.is_empty() {
            return None;
        }

        match calculate_result(&self.expression, self.precision) {
            Ok(answer) => {
                let equation = std::mem::replace(&mut self.expression, answer.clone());
                self.display = to_display(&self.expression);
                self.preview.clear();
                self.caret = Caret::at(self.char_len());
                self.caret_active = false;
                self.state = EditorState::ShowingAnswer;
                Some(HistoryEntry::new(equation, answer))
            }
            Err(err) => {
                debug!(expression = %self.expression, error = %err, "commit rejected");
                None
            }
        }
    }

    /// Record a caret move or selection from the presentation layer.
    pub fn set_caret(&mut self, start: usize, end: usize) {
        let len = self.char_len();
        self.caret = Caret::new(start, end).clamped(len);
        self.caret_active = true;
    }

    fn reset(&mut self) {
        self.expression.clear();
        self.display.clear();
        self.caret = Caret::default();
        self.caret_active = false;
        self.state = EditorState::Editing;
    }

    fn replace_operand(&mut self, span: Range<usize>, replacement: &str) {
        self.expression.replace_range(span, replacement);
        self.state = EditorState::Editing;
        self.update();
    }

    /// The number that ends the expression, with the unary sign in front of
    /// it if there is one.
    fn trailing_operand(&self) -> Option<(Option<Token>, Token)> {
        let mut tokens = tokenize(&self.expression).ok()?;
        let last = tokens.len().checked_sub(1)?;
        if tokens[last].kind != TokenKind::Number {
            return None;
        }

        let sign = last
            .checked_sub(1)
            .filter(|&index| is_unary_sign(&tokens, index))
            .map(|index| tokens[index].clone());
        let number = tokens.swap_remove(last);
        Some((sign, number))
    }

    /// Bring the caret, display twin and preview in line with the expression.
    fn update(&mut self) {
        let len = self.char_len();
        self.caret = if self.caret_active {
            self.caret.clamped(len)
        } else {
            Caret::at(len)
        };
        self.display = to_display(&self.expression);
        self.refresh_preview();
    }

    fn refresh_preview(&mut self) {
        self.preview.clear();
        if !self.live_preview || !has_binary_operator(&self.expression) {
            return;
        }

        match calculate_result(&self.expression, self.precision) {
            Ok(result) => self.preview = result,
            Err(err) if err.is_incomplete() => {}
            Err(err) => debug!(expression = %self.expression, error = %err, "no preview"),
        }
    }

    fn char_len(&self) -> usize {
        self.expression.chars().count()
    }
}

/// Move the decimal point of a number literal `places` digits to the left.
///
/// Returns `None` when the literal is not a valid number.
fn shift_point_left(literal: &str, places: usize) -> Option<String> {
    literal.parse::<f64>().ok()?;

    let (int, frac) = literal.split_once('.').unwrap_or((literal, ""));
    let digits = format!("{int}{frac}");

    let (int, frac) = match int.len().checked_sub(places) {
        Some(point) => (digits[..point].to_string(), digits[point..].to_string()),
        None => {
            let zeros = "0".repeat(places - int.len());
            (String::new(), format!("{zeros}{digits}"))
        }
    };

    let int = match int.trim_start_matches('0') {
        "" => "0",
        trimmed => trimmed,
    };
    let frac = frac.trim_end_matches('0');

    if frac.is_empty() {
        Some(int.to_string())
    } else {
        Some(format!("{int}.{frac}"))
    }
}

/// Byte index of the character at `char_offset`, or the string length.
fn byte_offset(s: &str, char_offset: usize) -> usize {
    s.char_indices()
        .nth(char_offset)
        .map_or(s.len(), |(idx, _)| idx)
}
