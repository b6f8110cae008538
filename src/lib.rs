//! Calculator core: expression evaluation, a key-driven input editor with
//! live preview, and a session history.

pub mod calculator;
pub mod config;
pub mod editor;
pub mod history;
pub mod keys;
pub mod session;

pub use calculator::{CalcError, calculate_result, evaluate, has_binary_operator};
pub use config::Config;
pub use editor::{Caret, EditorState, InputEditor};
pub use history::{HistoryEntry, HistoryLog};
pub use keys::{Key, KeyError, parse_keys};
pub use session::{Screen, Session};
