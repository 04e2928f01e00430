#[derive(Debug, thiserror::Error)]
pub enum BrowserWalletError {
    #[error("{operation} rejected: {reason}")]
    Rejected { operation: &'static str, reason: String },

    #[error("Wallet not connected")]
    NotConnected,

    #[error("{operation} timed out")]
    Timeout { operation: &'static str },

    #[error("Server error: {0}")]
    ServerError(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
