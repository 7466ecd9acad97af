use thiserror::Error;

use crate::notify::NotifyError;

/// Bootstrap failures (binding, client construction)
///
/// Request-level failures use [`shared::AppError`] instead.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("notifier setup failed: {0}")]
    Notifier(#[from] NotifyError),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Bootstrap Result alias
pub type Result<T> = std::result::Result<T, ServerError>;
