//! # treemint-wallets
//!
//! Wallet provider gateways.
//!
//! A [`WalletProvider`] hands out the connected account, the chain the wallet is currently on and a
//! [`WalletSigner`] able to submit transactions. Keys never leave the wallet: the local wallet keeps
//! them inside alloy's signer, the browser wallet keeps them in the browser extension and only
//! reports back transaction hashes.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

use alloy_primitives::{Address, ChainId, TxHash};
use alloy_rpc_types::TransactionRequest;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};

pub mod error;
pub use error::{PrivateKeyError, WalletError};

mod local;
pub use local::LocalWallet;

mod opts;
pub use opts::WalletOpts;

pub mod utils;

#[cfg(feature = "browser")]
pub mod wallet_browser;
#[cfg(feature = "browser")]
pub use wallet_browser::{BrowserWallet, BrowserWalletServer};

/// The account and chain a wallet is connected with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub address: Address,
    pub chain_id: ChainId,
}

impl Connection {
    pub const fn new(address: Address, chain_id: ChainId) -> Self {
        Self { address, chain_id }
    }
}

/// A wallet the mint client can talk to.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Requests access to the wallet. May prompt the user and fail if they refuse.
    async fn connect(&self) -> Result<Connection, WalletError>;

    /// Returns the chain id the wallet is currently on.
    async fn get_network(&self) -> Result<ChainId, WalletError>;

    /// Returns a signer for the connected account.
    async fn get_signer(&self) -> Result<WalletSigner, WalletError>;
}

#[async_trait]
impl<T: WalletProvider + ?Sized> WalletProvider for Arc<T> {
    async fn connect(&self) -> Result<Connection, WalletError> {
        (**self).connect().await
    }

    async fn get_network(&self) -> Result<ChainId, WalletError> {
        (**self).get_network().await
    }

    async fn get_signer(&self) -> Result<WalletSigner, WalletError> {
        (**self).get_signer().await
    }
}

/// Signs and broadcasts a transaction in one step, returning its hash.
#[async_trait]
pub trait TransactionSender: Send + Sync {
    async fn send_transaction(&self, tx: TransactionRequest) -> Result<TxHash, WalletError>;
}

/// Handle able to authorize transactions on behalf of the connected account.
#[derive(Clone)]
pub struct WalletSigner {
    address: Address,
    sender: Arc<dyn TransactionSender>,
}

impl fmt::Debug for WalletSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletSigner").field("address", &self.address).finish_non_exhaustive()
    }
}

impl WalletSigner {
    pub fn new(address: Address, sender: Arc<dyn TransactionSender>) -> Self {
        Self { address, sender }
    }

    /// The account transactions are sent from.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Sends `tx` from this signer's account.
    pub async fn send_transaction(&self, mut tx: TransactionRequest) -> Result<TxHash, WalletError> {
        tx.from = Some(self.address);
        self.sender.send_transaction(tx).await
    }
}

/// The wallets supported by the command line.
#[derive(Debug)]
pub enum Wallet {
    /// Raw private key, transactions go through the RPC endpoint.
    Local(LocalWallet),
    /// Browser extension reached through the local bridge.
    #[cfg(feature = "browser")]
    Browser(BrowserWallet),
}

#[async_trait]
impl WalletProvider for Wallet {
    async fn connect(&self) -> Result<Connection, WalletError> {
        match self {
            Self::Local(wallet) => wallet.connect().await,
            #[cfg(feature = "browser")]
            Self::Browser(wallet) => wallet.connect().await,
        }
    }

    async fn get_network(&self) -> Result<ChainId, WalletError> {
        match self {
            Self::Local(wallet) => wallet.get_network().await,
            #[cfg(feature = "browser")]
            Self::Browser(wallet) => wallet.get_network().await,
        }
    }

    async fn get_signer(&self) -> Result<WalletSigner, WalletError> {
        match self {
            Self::Local(wallet) => wallet.get_signer().await,
            #[cfg(feature = "browser")]
            Self::Browser(wallet) => wallet.get_signer().await,
        }
    }
}
