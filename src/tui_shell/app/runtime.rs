use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use super::super::theme::Theme;
use super::{App, Msg, event_loop};
use crate::feed::Feed;

pub(crate) fn run(feed: &Feed, theme: &Theme) -> Result<()> {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        anyhow::bail!("TUI requires an interactive terminal (TTY)");
    }

    let mut stdout = io::stdout();
    enable_raw_mode().context("enable raw mode")?;
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    let res = terminal
        .size()
        .context("read terminal size")
        .and_then(|size| {
            let mut app = App::from_feed(feed, size.width, size.height);
            app.update(Msg::Resize {
                width: size.width,
                height: size.height,
            });
            event_loop::run_loop(&mut terminal, &mut app, theme)
        });

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    res
}
