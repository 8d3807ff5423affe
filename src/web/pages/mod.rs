//! Maud-based page templates for the web UI.

pub mod boards;

pub use boards::{render_board_page, Notice};
