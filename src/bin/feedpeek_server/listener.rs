use anyhow::{Context, Result};

pub(crate) async fn bind_listener(host: &str, port: u16) -> Result<tokio::net::TcpListener> {
    tokio::net::TcpListener::bind((host, port))
        .await
        .with_context(|| format!("bind {}:{}", host, port))
}
