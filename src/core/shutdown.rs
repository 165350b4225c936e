//! # OS termination signals.
//!
//! [`wait_for_termination`] completes when the process receives a termination
//! signal. The supervisor treats it as a stop that needs no confirmation.
//!
//! - Unix: `SIGINT`, `SIGTERM`, `SIGQUIT`
//! - elsewhere: Ctrl-C via [`tokio::signal::ctrl_c`]
//!
//! If the handlers cannot be installed the future never completes, so a run
//! without signal support still ends by timeout, stop request or completion.

/// Waits for a termination signal.
#[cfg(unix)]
pub async fn wait_for_termination() {
    use tokio::signal::unix::{SignalKind, signal};

    let (Ok(mut sigint), Ok(mut sigterm), Ok(mut sigquit)) = (
        signal(SignalKind::interrupt()),
        signal(SignalKind::terminate()),
        signal(SignalKind::quit()),
    ) else {
        return std::future::pending().await;
    };

    tokio::select! {
        _ = sigint.recv()  => {},
        _ = sigterm.recv() => {},
        _ = sigquit.recv() => {},
    }
}

/// Waits for a termination signal.
#[cfg(not(unix))]
pub async fn wait_for_termination() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
