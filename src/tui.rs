//! Public surface of the terminal UI: the local runner plus what a remote
//! runner needs to drive its own sessions.

use anyhow::Result;

use crate::feed::Feed;

pub use crate::tui_shell::{
    App, Cmd, ListEntry, Msg, RenderError, Theme, decode_keys, draw, to_list_entries,
};

/// Run one session on the local terminal until the user quits.
pub fn run(feed: &Feed) -> Result<()> {
    let theme = Theme::default();
    crate::tui_shell::run(feed, &theme)
}
