use alloy_primitives::TxHash;
use alloy_rpc_types::TransactionRequest;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Envelope of every bridge API answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "lowercase")]
pub(crate) enum BrowserApiResponse<T> {
    Ok(T),
    Error { message: String },
}

impl<T> BrowserApiResponse<T> {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error { message: message.into() }
    }
}

/// A transaction waiting to be signed and sent by the browser wallet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct BrowserTransaction {
    pub id: Uuid,
    #[serde(flatten)]
    pub request: TransactionRequest,
}

/// The outcome the browser page reports for a [`BrowserTransaction`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct TransactionResponse {
    pub id: Uuid,
    pub hash: Option<TxHash>,
    pub error: Option<String>,
}
