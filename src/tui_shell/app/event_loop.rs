use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use ratatui::Terminal;
use ratatui::backend::Backend;

use super::super::theme::Theme;
use super::{App, Cmd, Msg};

const TICK: Duration = Duration::from_millis(250);

pub(super) fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    theme: &Theme,
) -> Result<()> {
    loop {
        terminal
            .draw(|f| super::draw(f, app, theme))
            .context("draw")?;
        if app.should_quit() {
            tracing::debug!("session quit");
            return Ok(());
        }

        let msg = if event::poll(TICK).context("poll")? {
            match event::read().context("read event")? {
                Event::Key(k) => Msg::Key(k),
                Event::Resize(width, height) => Msg::Resize { width, height },
                _ => continue,
            }
        } else {
            Msg::Tick
        };

        if let Some(cmd) = app.update(msg) {
            run_cmd(cmd);
        }
    }
}

pub(super) fn run_cmd(cmd: Cmd) {
    match cmd {
        Cmd::Quit => {}
        Cmd::OpenBrowser(url) => crate::browser::spawn_open_browser(url),
    }
}
