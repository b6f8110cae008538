//! Calculator module for evaluating arithmetic expressions.
//!
//! This module provides functionality to:
//! - Detect whether an expression contains an operation worth previewing
//! - Tokenize and evaluate expressions
//! - Convert between canonical operators and display glyphs

mod detection;
mod error;
mod evaluation;
pub mod lexer;
mod notation;

pub use detection::has_binary_operator;
pub use error::CalcError;
pub use evaluation::{
    DEFAULT_PRECISION, MAX_PRECISION, calculate_result, evaluate, format_number,
};
pub use notation::{DIVIDE_GLYPH, MULTIPLY_GLYPH, to_canonical, to_display};
