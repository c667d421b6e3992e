pub mod browser;
pub mod feed;
pub mod tui;

mod tui_shell;
