//! The client state record and its transitions.
//!
//! [`MintState`] is never mutated in place by callers: every transition consumes the old record and
//! returns the next one. The controller publishes each record to its subscribers.

use alloy_primitives::TxHash;
use treemint_wallets::Connection;

/// Where the current mint attempt is.
///
/// `Idle → AwaitingSigner → Submitting → Confirming → {Succeeded | Failed}`. Every attempt starts
/// at `Idle`: [`MintState::begin_attempt`] resets the previous outcome to `Idle` and leaves it for
/// `AwaitingSigner` in a single published transition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MintPhase {
    #[default]
    Idle,
    AwaitingSigner,
    Submitting,
    Confirming {
        tx_hash: TxHash,
    },
    Succeeded {
        tx_hash: TxHash,
    },
    Failed,
}

impl MintPhase {
    /// Whether a transaction is between submission and confirmation.
    pub const fn is_in_flight(&self) -> bool {
        matches!(self, Self::Submitting | Self::Confirming { .. })
    }

    /// Whether an attempt has started and not reached a terminal phase.
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::AwaitingSigner | Self::Submitting | Self::Confirming { .. })
    }

    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded { .. } | Self::Failed)
    }
}

/// Outcome of a confirmed mint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MintResult {
    pub success: bool,
    pub tx_hash: TxHash,
    /// Block the transaction was included in, if the node reported it.
    pub block_number: Option<u64>,
    /// Explorer page of the NFT contract. Derived from the contract address, not the receipt.
    pub nft_url: String,
}

/// Snapshot of the client state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MintState {
    /// Set once a connect succeeded on the required network. Never reset by the wallet.
    pub wallet_connected: bool,
    pub connection: Option<Connection>,
    pub phase: MintPhase,
    /// Last successful mint. Later failures leave it in place.
    pub last_result: Option<MintResult>,
    /// Mirror of the contract's `tokenIds()` counter.
    pub minted: String,
}

impl Default for MintState {
    fn default() -> Self {
        Self {
            wallet_connected: false,
            connection: None,
            phase: MintPhase::Idle,
            last_result: None,
            minted: "0".to_string(),
        }
    }
}

impl MintState {
    pub fn in_flight(&self) -> bool {
        self.phase.is_in_flight()
    }

    /// Whether the last successful mint is shown.
    pub fn minted_successfully(&self) -> bool {
        self.last_result.as_ref().is_some_and(|result| result.success)
    }

    #[must_use]
    pub fn connected(self, connection: Connection) -> Self {
        Self { wallet_connected: true, connection: Some(connection), ..self }
    }

    /// Drops the previous attempt's phase and waits for the signer. The implicit `Idle` step is
    /// never published.
    #[must_use]
    pub fn begin_attempt(self) -> Self {
        Self { phase: MintPhase::AwaitingSigner, ..self }
    }

    #[must_use]
    pub fn submitting(self) -> Self {
        Self { phase: MintPhase::Submitting, ..self }
    }

    #[must_use]
    pub fn confirming(self, tx_hash: TxHash) -> Self {
        Self { phase: MintPhase::Confirming { tx_hash }, ..self }
    }

    #[must_use]
    pub fn succeeded(self, result: MintResult) -> Self {
        Self { phase: MintPhase::Succeeded { tx_hash: result.tx_hash }, last_result: Some(result), ..self }
    }

    #[must_use]
    pub fn failed(self) -> Self {
        Self { phase: MintPhase::Failed, ..self }
    }

    #[must_use]
    pub fn with_minted(self, minted: String) -> Self {
        Self { minted, ..self }
    }
}
