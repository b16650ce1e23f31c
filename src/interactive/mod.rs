//! Interactive TUI interface

mod app;
mod rendering;

pub use app::{App, InputMode, Message, MessageStyle, SessionResults, run_tui};
