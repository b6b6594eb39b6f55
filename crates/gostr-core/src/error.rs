use thiserror::Error;

/// Errors surfaced by the core.
///
/// Collaborator failures (relays, signing, encryption) are carried as
/// strings so that every variant stays `Send + Sync + 'static` and can ride
/// inside completion messages.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("no relays configured")]
    NoRelays,

    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("private key not set")]
    MissingKey,

    #[error("signing failed: {0}")]
    Signing(String),

    #[error("encryption failed: {0}")]
    Encryption(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("clipboard error: {0}")]
    Clipboard(String),

    #[error("image preview failed: {0}")]
    Image(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
