//! Best-effort "open this link" on the host.

use std::process::{Child, Command, Stdio};

#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Program and leading arguments used to open a URL on `os`
/// (one of `std::env::consts::OS`).
pub fn opener_for(os: &str) -> Result<(&'static str, &'static [&'static str]), BrowserError> {
    match os {
        "linux" => Ok(("xdg-open", &[])),
        "macos" => Ok(("open", &[])),
        "windows" => Ok(("rundll32", &["url.dll,FileProtocolHandler"])),
        other => Err(BrowserError::UnsupportedPlatform(other.to_string())),
    }
}

/// Start the opener for `url` without waiting on it.
pub fn open_browser(url: &str) -> Result<Child, BrowserError> {
    let (program, args) = opener_for(std::env::consts::OS)?;
    Command::new(program)
        .args(args)
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| BrowserError::Spawn {
            program: program.to_string(),
            source,
        })
}

/// Fire-and-forget variant for event loops: runs on a detached thread,
/// reaps the child there and only logs failures.
pub fn spawn_open_browser(url: String) {
    std::thread::spawn(move || match open_browser(&url) {
        Ok(mut child) => {
            let _ = child.wait();
        }
        Err(err) => {
            tracing::debug!(%url, error = %err, "open browser failed");
        }
    });
}
