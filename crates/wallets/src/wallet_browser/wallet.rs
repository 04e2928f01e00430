use std::sync::Arc;

use alloy_primitives::{ChainId, TxHash};
use alloy_rpc_types::TransactionRequest;
use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    Connection, TransactionSender, WalletError, WalletProvider, WalletSigner,
    wallet_browser::{server::BrowserWalletServer, types::BrowserTransaction},
};

/// [`WalletProvider`] backed by a wallet extension reached through [`BrowserWalletServer`].
///
/// The chain id is whatever the page last reported, so switching networks in the extension is
/// picked up by the next [`get_network`](WalletProvider::get_network) call.
#[derive(Debug)]
pub struct BrowserWallet {
    server: BrowserWalletServer,
}

impl BrowserWallet {
    /// Wraps an already started server.
    pub fn new(server: BrowserWalletServer) -> Self {
        Self { server }
    }

    pub fn server(&self) -> &BrowserWalletServer {
        &self.server
    }
}

#[async_trait]
impl WalletProvider for BrowserWallet {
    async fn connect(&self) -> Result<Connection, WalletError> {
        if let Some(connection) = self.server.get_connection() {
            return Ok(connection);
        }
        info!("open {} and connect your wallet", self.server.url());
        Ok(self.server.wait_for_connection().await?)
    }

    async fn get_network(&self) -> Result<ChainId, WalletError> {
        self.server.get_connection().map(|c| c.chain_id).ok_or(WalletError::NotConnected)
    }

    async fn get_signer(&self) -> Result<WalletSigner, WalletError> {
        let connection = self.server.get_connection().ok_or(WalletError::NotConnected)?;
        Ok(WalletSigner::new(
            connection.address,
            Arc::new(BrowserSender { server: self.server.clone() }),
        ))
    }
}

impl Drop for BrowserWallet {
    fn drop(&mut self) {
        let _ = self.server.signal_shutdown();
    }
}

/// Browser wallets sign and send in one step via `eth_sendTransaction`.
#[derive(Debug)]
struct BrowserSender {
    server: BrowserWalletServer,
}

#[async_trait]
impl TransactionSender for BrowserSender {
    async fn send_transaction(&self, tx: TransactionRequest) -> Result<TxHash, WalletError> {
        let request = BrowserTransaction { id: Uuid::new_v4(), request: tx };
        Ok(self.server.request_transaction(request).await?)
    }
}
