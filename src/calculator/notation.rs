//! Conversion between canonical operators and on-screen glyphs.
//!
//! The evaluator only understands `*` and `/`; the screen shows `×` and `÷`.
//! Every substitution is one character for one character, so a caret offset
//! into the canonical expression is also valid in its display twin.

/// Multiplication sign shown on screen.
pub const MULTIPLY_GLYPH: char = '×';
/// Division sign shown on screen.
pub const DIVIDE_GLYPH: char = '÷';

/// Replace display glyphs with the operators the evaluator understands.
pub fn to_canonical(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            MULTIPLY_GLYPH => '*',
            DIVIDE_GLYPH => '/',
            other => other,
        })
        .collect()
}

/// Replace canonical operators with their typographic glyphs.
pub fn to_display(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            '*' => MULTIPLY_GLYPH,
            '/' => DIVIDE_GLYPH,
            other => other,
        })
        .collect()
}
