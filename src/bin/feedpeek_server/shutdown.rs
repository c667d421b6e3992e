use std::time::Duration;

use tokio::task::JoinSet;

/// Resolves on Ctrl+C or, on unix, SIGTERM.
pub(crate) async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %err, "listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

/// Wait up to `grace` for open sessions, then abort the rest. Returns true
/// when every session ended on its own.
pub(crate) async fn drain_sessions(mut sessions: JoinSet<()>, grace: Duration) -> bool {
    if sessions.is_empty() {
        return true;
    }
    tracing::info!(open = sessions.len(), grace_secs = grace.as_secs(), "draining sessions");

    let all_done = async {
        while sessions.join_next().await.is_some() {}
    };
    if tokio::time::timeout(grace, all_done).await.is_ok() {
        tracing::info!("all sessions closed");
        return true;
    }

    tracing::warn!(open = sessions.len(), "grace period over; closing sessions");
    sessions.abort_all();
    while sessions.join_next().await.is_some() {}
    false
}
