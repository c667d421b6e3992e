#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;

pub const TWO_ITEM_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Playbook</title>
    <link>http://example.com</link>
    <description>Morning news</description>
    <item>
      <title>A</title>
      <link>http://a</link>
      <description>first</description>
    </item>
    <item>
      <title>B</title>
      <link>http://b</link>
      <description>second</description>
    </item>
  </channel>
</rss>"#;

/// Local HTTP server serving canned feed responses.
///
/// Routes: `/feed.xml` (valid feed), `/slow.xml` (sleeps 3s), `/broken.xml`
/// (malformed XML), `/missing.xml` (404), `/flaky.xml` (500 on the first,
/// third, ... request; the valid feed otherwise).
pub struct FeedServer {
    pub base_url: String,
    shutdown: Option<tokio::sync::oneshot::Sender<()>>,
    thread: Option<thread::JoinHandle<()>>,
}

impl FeedServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for FeedServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

pub fn spawn_feed_server() -> Result<FeedServer> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("build feed server runtime")?;

    let listener = runtime
        .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
        .context("bind feed server")?;
    let addr: SocketAddr = listener.local_addr().context("read feed server addr")?;

    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route("/feed.xml", get(|| async { TWO_ITEM_FEED }))
        .route(
            "/slow.xml",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                TWO_ITEM_FEED
            }),
        )
        .route("/broken.xml", get(|| async { "<rss><channel><title>oops" }))
        .route(
            "/missing.xml",
            get(|| async { (StatusCode::NOT_FOUND, "not here") }),
        )
        .route(
            "/flaky.xml",
            get(move || {
                let n = hits.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n % 2 == 0 {
                        (StatusCode::INTERNAL_SERVER_ERROR, "try again")
                    } else {
                        (StatusCode::OK, TWO_ITEM_FEED)
                    }
                }
            }),
        );

    let (tx, rx) = tokio::sync::oneshot::channel::<()>();
    let thread = thread::spawn(move || {
        runtime.block_on(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = rx.await;
                })
                .await;
        });
    });

    Ok(FeedServer {
        base_url: format!("http://{}", addr),
        shutdown: Some(tx),
        thread: Some(thread),
    })
}

pub struct SshServerGuard {
    pub addr: String,
    pub host_key: PathBuf,
    _data_dir: tempfile::TempDir,
    child: Child,
}

impl Drop for SshServerGuard {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

impl SshServerGuard {
    /// Send SIGTERM, as a service manager would.
    #[cfg(unix)]
    pub fn terminate(&self) -> Result<()> {
        let status = Command::new("kill")
            .args(["-TERM", &self.child.id().to_string()])
            .status()
            .context("run kill")?;
        anyhow::ensure!(status.success(), "kill -TERM failed: {:?}", status);
        Ok(())
    }

    pub fn wait_exit(&mut self, within: Duration) -> Result<ExitStatus> {
        let start = Instant::now();
        loop {
            if let Some(status) = self.child.try_wait().context("poll server")? {
                return Ok(status);
            }
            if start.elapsed() > within {
                anyhow::bail!("server still running after {:?}", within);
            }
            thread::sleep(Duration::from_millis(20));
        }
    }
}

pub fn spawn_ssh_server(feed_url: &str) -> Result<SshServerGuard> {
    spawn_ssh_server_with(feed_url, &[])
}

pub fn spawn_ssh_server_with(feed_url: &str, extra: &[&str]) -> Result<SshServerGuard> {
    let data_dir = tempfile::tempdir().context("create server tempdir")?;
    let addr_file = data_dir.path().join("addr.txt");
    let host_key = data_dir.path().join(".ssh").join("id_ed25519");

    let child = Command::new(env!("CARGO_BIN_EXE_feedpeek-server"))
        .args([
            "--host",
            "127.0.0.1",
            "--port",
            "0",
            "--addr-file",
            addr_file.to_str().unwrap(),
            "--host-key",
            host_key.to_str().unwrap(),
            "--feed-url",
            feed_url,
        ])
        .args(extra)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .context("spawn feedpeek-server")?;

    let addr = read_addr_file(&addr_file)?;

    Ok(SshServerGuard {
        addr,
        host_key,
        _data_dir: data_dir,
        child,
    })
}

fn read_addr_file(addr_file: &Path) -> Result<String> {
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("addr file not written at {}", addr_file.display());
        }

        if let Ok(s) = std::fs::read_to_string(addr_file) {
            let s = s.trim();
            if !s.is_empty() {
                return Ok(s.to_string());
            }
        }
        thread::sleep(Duration::from_millis(10));
    }
}
