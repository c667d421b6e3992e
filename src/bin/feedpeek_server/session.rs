use std::io::Write;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::{Terminal, TerminalOptions, Viewport};
use russh::keys::PublicKey;
use russh::server::{Auth, Handler, Msg as ChannelMsg, Session};
use russh::{Channel, ChannelId};

use feedpeek::feed::{self, Feed, FeedError};
use feedpeek::tui::{App, Cmd, Msg, Theme, decode_keys, draw};

use crate::terminal_handle::{ChannelCloser, TerminalHandle};

/// Per-connection SSH handler. Runs, in order: connection logging, the
/// active-terminal check, then one feed UI session bound to the pty.
pub(crate) struct ConnectionHandler {
    peer: SocketAddr,
    feed_url: Arc<str>,
    theme: Arc<Theme>,
    opened_at: Instant,
    user: Option<String>,
    channel: Option<ChannelId>,
    pty: Option<(u16, u16)>,
    tui: Option<RemoteTui>,
}

impl ConnectionHandler {
    pub(crate) fn new(peer: SocketAddr, feed_url: Arc<str>, theme: Arc<Theme>) -> Self {
        tracing::info!(%peer, "connection opened");
        Self {
            peer,
            feed_url,
            theme,
            opened_at: Instant::now(),
            user: None,
            channel: None,
            pty: None,
            tui: None,
        }
    }

    fn accept_user(&mut self, user: &str, method: &str) -> Auth {
        if self.user.is_none() {
            tracing::info!(peer = %self.peer, user, method, "authenticated");
            self.user = Some(user.to_string());
        }
        Auth::Accept
    }

    async fn fetch_app(&self, width: u16, height: u16) -> App {
        let url = self.feed_url.clone();
        load_session_app(self.peer, move || feed::fetch_feed(&url), width, height).await
    }
}

/// Initial state for one connection. The fetch runs off the async workers;
/// a failed or panicked fetch degrades to an empty, untitled list instead of
/// dropping the connection.
pub(crate) async fn load_session_app<F>(peer: SocketAddr, fetch: F, width: u16, height: u16) -> App
where
    F: FnOnce() -> Result<Feed, FeedError> + Send + 'static,
{
    match tokio::task::spawn_blocking(fetch).await {
        Ok(Ok(feed)) => App::from_feed(&feed, width, height),
        Ok(Err(err)) => {
            tracing::error!(%peer, error = %err, "failed to fetch feed");
            App::empty(width, height)
        }
        Err(err) => {
            tracing::error!(%peer, error = %err, "feed fetch task failed");
            App::empty(width, height)
        }
    }
}

impl Drop for ConnectionHandler {
    fn drop(&mut self) {
        tracing::info!(
            peer = %self.peer,
            user = self.user.as_deref().unwrap_or("-"),
            duration_ms = self.opened_at.elapsed().as_millis() as u64,
            "connection closed"
        );
    }
}

struct RemoteTui {
    terminal: Terminal<CrosstermBackend<TerminalHandle>>,
    closer: ChannelCloser,
    app: App,
    theme: Arc<Theme>,
}

impl RemoteTui {
    fn start(mut handle: TerminalHandle, app: App, theme: Arc<Theme>) -> Result<Self> {
        let (width, height) = app.size();
        let closer = handle.closer();
        execute!(handle, EnterAlternateScreen, Hide).context("enter alternate screen")?;
        let backend = CrosstermBackend::new(handle);
        let terminal = Terminal::with_options(
            backend,
            TerminalOptions {
                viewport: Viewport::Fixed(Rect::new(0, 0, width, height)),
            },
        )
        .context("create terminal")?;
        Ok(Self {
            terminal,
            closer,
            app,
            theme,
        })
    }

    fn draw(&mut self) -> Result<()> {
        let Self {
            terminal,
            app,
            theme,
            ..
        } = self;
        terminal
            .draw(|f| draw(f, app, theme))
            .context("draw")?;
        Ok(())
    }

    fn resize(&mut self, width: u16, height: u16) -> Result<()> {
        self.app.update(Msg::Resize { width, height });
        self.terminal
            .resize(Rect::new(0, 0, width, height))
            .context("resize terminal")?;
        self.draw()
    }

    fn finish(mut self) -> Result<()> {
        self.terminal.show_cursor().context("show cursor")?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen, Show)
            .context("leave alternate screen")?;
        self.closer.close(0);
        Ok(())
    }
}

fn dims(cols: u32, rows: u32) -> (u16, u16) {
    (
        u16::try_from(cols).unwrap_or(u16::MAX),
        u16::try_from(rows).unwrap_or(u16::MAX),
    )
}

impl Handler for ConnectionHandler {
    type Error = anyhow::Error;

    async fn auth_none(&mut self, user: &str) -> Result<Auth, Self::Error> {
        Ok(self.accept_user(user, "none"))
    }

    async fn auth_publickey(&mut self, user: &str, _key: &PublicKey) -> Result<Auth, Self::Error> {
        Ok(self.accept_user(user, "publickey"))
    }

    async fn channel_open_session(
        &mut self,
        channel: Channel<ChannelMsg>,
        _session: &mut Session,
    ) -> Result<bool, Self::Error> {
        if self.channel.is_some() {
            return Ok(false);
        }
        self.channel = Some(channel.id());
        Ok(true)
    }

    async fn pty_request(
        &mut self,
        channel: ChannelId,
        term: &str,
        col_width: u32,
        row_height: u32,
        _pix_width: u32,
        _pix_height: u32,
        _modes: &[(russh::Pty, u32)],
        session: &mut Session,
    ) -> Result<(), Self::Error> {
        let (width, height) = dims(col_width, row_height);
        tracing::debug!(peer = %self.peer, term, width, height, "pty requested");
        self.pty = Some((width, height));
        session.channel_success(channel)?;
        Ok(())
    }

    async fn shell_request(
        &mut self,
        channel: ChannelId,
        session: &mut Session,
    ) -> Result<(), Self::Error> {
        session.channel_success(channel)?;
        let mut handle = TerminalHandle::start(session.handle(), channel);

        let Some((width, height)) = self.pty else {
            tracing::info!(peer = %self.peer, "rejecting session without pty");
            let closer = handle.closer();
            handle.write_all(b"Requires an active PTY\r\n")?;
            handle.flush()?;
            closer.close(1);
            return Ok(());
        };

        let app = self.fetch_app(width, height).await;
        tracing::info!(
            peer = %self.peer,
            width,
            height,
            entries = app.entries().len(),
            "session started"
        );
        let mut tui = RemoteTui::start(handle, app, self.theme.clone())?;
        tui.draw()?;
        self.tui = Some(tui);
        Ok(())
    }

    async fn exec_request(
        &mut self,
        channel: ChannelId,
        _data: &[u8],
        session: &mut Session,
    ) -> Result<(), Self::Error> {
        tracing::info!(peer = %self.peer, "rejecting exec request");
        session.channel_failure(channel)?;
        Ok(())
    }

    async fn window_change_request(
        &mut self,
        _channel: ChannelId,
        col_width: u32,
        row_height: u32,
        _pix_width: u32,
        _pix_height: u32,
        _session: &mut Session,
    ) -> Result<(), Self::Error> {
        let (width, height) = dims(col_width, row_height);
        self.pty = Some((width, height));
        if let Some(tui) = self.tui.as_mut() {
            tui.resize(width, height)?;
        }
        Ok(())
    }

    async fn data(
        &mut self,
        _channel: ChannelId,
        data: &[u8],
        _session: &mut Session,
    ) -> Result<(), Self::Error> {
        let Some(tui) = self.tui.as_mut() else {
            return Ok(());
        };

        for key in decode_keys(data) {
            match tui.app.update(Msg::Key(key)) {
                Some(Cmd::Quit) => break,
                Some(Cmd::OpenBrowser(url)) => feedpeek::browser::spawn_open_browser(url),
                None => {}
            }
        }

        if tui.app.should_quit() {
            if let Some(tui) = self.tui.take() {
                tracing::info!(peer = %self.peer, "session quit");
                tui.finish()?;
            }
            return Ok(());
        }
        tui.draw()
    }

    async fn channel_close(
        &mut self,
        channel: ChannelId,
        _session: &mut Session,
    ) -> Result<(), Self::Error> {
        if self.channel == Some(channel) {
            self.tui = None;
        }
        Ok(())
    }
}
