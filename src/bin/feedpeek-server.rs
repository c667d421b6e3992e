use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[path = "feedpeek_server/host_key.rs"]
mod host_key;
#[path = "feedpeek_server/listener.rs"]
mod listener;
#[path = "feedpeek_server/runtime.rs"]
mod runtime;
#[path = "feedpeek_server/session.rs"]
mod session;
#[path = "feedpeek_server/shutdown.rs"]
mod shutdown;
#[path = "feedpeek_server/terminal_handle.rs"]
mod terminal_handle;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(err) = runtime::run().await {
        tracing::error!("{:#}", err);
        std::process::exit(1);
    }
}
