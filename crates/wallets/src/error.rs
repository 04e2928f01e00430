use alloy_primitives::hex::FromHexError;
use alloy_signer_local::LocalSignerError;
use alloy_transport::TransportError;

#[cfg(feature = "browser")]
use crate::wallet_browser::error::BrowserWalletError;

#[derive(Debug, thiserror::Error)]
pub enum PrivateKeyError {
    #[error("Failed to create wallet from private key. Private key is invalid hex: {0}")]
    InvalidHex(#[from] FromHexError),
    #[error(
        "Failed to create wallet from private key. Invalid private key. But env var {0} exists. Is the `$` anchor missing?"
    )]
    ExistsAsEnvVar(String),
    #[error(transparent)]
    Local(#[from] LocalSignerError),
}

#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("no wallet provider available: {0}")]
    NoProvider(String),
    #[error("wallet is not connected")]
    NotConnected,
    #[error("user rejected the request: {0}")]
    Rejected(String),
    #[error("timed out waiting for the wallet")]
    Timeout,
    #[error(transparent)]
    PrivateKey(#[from] PrivateKeyError),
    #[error(transparent)]
    Rpc(#[from] TransportError),
    #[error(transparent)]
    #[cfg(feature = "browser")]
    Browser(BrowserWalletError),
}

#[cfg(feature = "browser")]
impl From<BrowserWalletError> for WalletError {
    fn from(err: BrowserWalletError) -> Self {
        match err {
            BrowserWalletError::Rejected { reason, .. } => Self::Rejected(reason),
            BrowserWalletError::Timeout { .. } => Self::Timeout,
            BrowserWalletError::NotConnected => Self::NotConnected,
            err => Self::Browser(err),
        }
    }
}

impl WalletError {
    /// Whether the user actively refused the request.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}
