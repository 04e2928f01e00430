use crate::contract::ContractCallError;
use alloy_primitives::ChainId;
use std::time::Duration;
use treemint_wallets::WalletError;

/// Errors of the mint flow operations.
#[derive(Debug, thiserror::Error)]
pub enum MintError {
    /// The wallet is unavailable or the user refused access.
    #[error("wallet connection failed: {0}")]
    Connection(#[source] WalletError),
    /// The wallet is on another network than the one the contract lives on.
    #[error("wallet is on chain {chain_id}, expected chain {expected}")]
    WrongNetwork { chain_id: ChainId, expected: ChainId },
    #[error(transparent)]
    ContractCall(#[from] ContractCallError),
    /// A previous mint is still pending and re-entrant mints are rejected.
    #[error("a mint is already in flight")]
    MintInFlight,
    #[error("operation cancelled")]
    Cancelled,
    #[error("no confirmation within {0:?}")]
    TimedOut(Duration),
}

impl MintError {
    /// Whether the user refused the wallet prompt.
    pub fn is_rejection(&self) -> bool {
        match self {
            Self::Connection(err) | Self::ContractCall(ContractCallError::Send(err)) => {
                err.is_rejection()
            }
            _ => false,
        }
    }
}
