//! Serving loop with a bounded graceful shutdown.

use std::future::Future;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use mymetrics_core::{MetricsError, Result};

use crate::storage::FileStorage;

/// Serve `app` until `shutdown` resolves, then give in-flight requests
/// `grace` to finish before dropping them.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F, grace: Duration) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        let _ = stop_rx.await;
    });
    let mut task = tokio::spawn(async move { server.await });

    tokio::select! {
        res = &mut task => return join_result(res),
        _ = shutdown => {}
    }

    tracing::info!(grace_ms = grace.as_millis() as u64, "draining in-flight requests");
    let _ = stop_tx.send(());
    match tokio::time::timeout(grace, &mut task).await {
        Ok(res) => join_result(res),
        Err(_) => {
            tracing::warn!("shutdown grace elapsed, dropping remaining connections");
            task.abort();
            Ok(())
        }
    }
}

/// Final flush and close after serving stopped, whatever the serve outcome.
///
/// The storage is always closed. The serve error wins over a flush error.
pub fn finish(storage: &FileStorage, served: Result<()>) -> Result<()> {
    let flushed = storage.flush();
    storage.close();
    match &flushed {
        Ok(()) => tracing::info!(path = %storage.path().display(), "final snapshot written"),
        Err(e) => tracing::error!(path = %storage.path().display(), error = %e, "final flush failed"),
    }
    served.and(flushed)
}

fn join_result(
    res: std::result::Result<std::io::Result<()>, tokio::task::JoinError>,
) -> Result<()> {
    match res {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(MetricsError::Io(format!("server failed: {e}"))),
        Err(e) => Err(MetricsError::Internal(format!("server task failed: {e}"))),
    }
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("signal received, starting graceful shutdown");
}
