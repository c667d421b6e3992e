use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpStream;
use tokio::task::JoinSet;

use feedpeek::feed::DEFAULT_FEED_URL;
use feedpeek::tui::Theme;

use crate::host_key::load_or_generate_host_key;
use crate::listener::bind_listener;
use crate::session::ConnectionHandler;
use crate::shutdown::{drain_sessions, shutdown_signal};

#[derive(Parser)]
#[command(name = "feedpeek-server")]
#[command(about = "Serve the feed browser to SSH clients", long_about = None)]
struct Args {
    /// Host to listen on
    #[arg(long, default_value = "localhost")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 23234)]
    port: u16,

    /// Ed25519 host key (generated on first start when missing)
    #[arg(long, default_value = ".ssh/id_ed25519")]
    host_key: PathBuf,

    /// RSS feed fetched for every connection
    #[arg(long, default_value = DEFAULT_FEED_URL)]
    feed_url: String,

    /// Close connections after this many seconds without client traffic
    #[arg(long, default_value_t = 600)]
    idle_timeout_secs: u64,

    /// How long open sessions may keep running after a shutdown signal
    #[arg(long, default_value_t = 30)]
    shutdown_grace_secs: u64,

    /// Write bound address to this file (dev/test convenience)
    #[arg(long)]
    addr_file: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<()> {
    let args = Args::parse();

    let key = load_or_generate_host_key(&args.host_key)?;
    let config = Arc::new(russh::server::Config {
        inactivity_timeout: Some(Duration::from_secs(args.idle_timeout_secs)),
        auth_rejection_time: Duration::from_secs(1),
        auth_rejection_time_initial: Some(Duration::from_secs(0)),
        keys: vec![key],
        ..Default::default()
    });

    let listener = bind_listener(&args.host, args.port).await?;
    let local_addr = listener.local_addr().context("read listener local addr")?;
    tracing::info!(addr = %local_addr, feed = %args.feed_url, "starting ssh server");

    if let Some(addr_file) = &args.addr_file {
        std::fs::write(addr_file, local_addr.to_string())
            .with_context(|| format!("write addr file {}", addr_file.display()))?;
    }

    let feed_url: Arc<str> = Arc::from(args.feed_url.as_str());
    let theme = Arc::new(Theme::default());
    let mut sessions = JoinSet::new();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            accepted = listener.accept() => {
                let (stream, peer) = match accepted {
                    Ok(pair) => pair,
                    Err(err) => {
                        tracing::warn!(error = %err, "accept failed");
                        continue;
                    }
                };
                let handler = ConnectionHandler::new(peer, feed_url.clone(), theme.clone());
                sessions.spawn(serve_connection(config.clone(), stream, peer, handler));
            }
            // Reap finished sessions so the set does not grow unbounded.
            Some(_) = sessions.join_next(), if !sessions.is_empty() => {}
        }
    }

    drop(listener);
    tracing::info!(open = sessions.len(), "stopping ssh server");
    drain_sessions(sessions, Duration::from_secs(args.shutdown_grace_secs)).await;
    tracing::info!("ssh server stopped");
    Ok(())
}

async fn serve_connection(
    config: Arc<russh::server::Config>,
    stream: TcpStream,
    peer: SocketAddr,
    handler: ConnectionHandler,
) {
    let session = match russh::server::run_stream(config, stream, handler).await {
        Ok(session) => session,
        Err(err) => {
            tracing::warn!(%peer, error = %err, "ssh handshake failed");
            return;
        }
    };
    if let Err(err) = session.await {
        tracing::debug!(%peer, error = %err, "session ended with error");
    }
}
