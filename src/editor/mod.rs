//! Input editing for the calculator screen.
//!
//! The editor owns the expression being typed, its display twin, the caret and
//! the live preview. Structural edits (sign toggle, percent, parenthesis
//! balancing) work on lexer tokens rather than on raw text patterns.

mod caret;
mod input;

pub use caret::Caret;
pub use input::{EditorState, InputEditor};
