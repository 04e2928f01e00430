use crate::{
    Connection, TransactionSender, WalletError, WalletProvider, WalletSigner,
    utils::create_private_key_signer,
};
use alloy_network::EthereumWallet;
use alloy_primitives::{Address, ChainId, TxHash};
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use alloy_rpc_types::TransactionRequest;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use std::{fmt, sync::Arc};
use url::Url;

/// A wallet backed by a raw private key, sending through an RPC endpoint.
///
/// Nonce, gas and chain id are filled in by the provider before signing.
#[derive(Clone)]
pub struct LocalWallet {
    address: Address,
    provider: DynProvider,
}

impl fmt::Debug for LocalWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalWallet").field("address", &self.address).finish_non_exhaustive()
    }
}

impl LocalWallet {
    pub fn new(rpc_url: &str, signer: PrivateKeySigner) -> Result<Self, WalletError> {
        let url: Url = rpc_url
            .parse()
            .map_err(|err| WalletError::NoProvider(format!("invalid RPC URL `{rpc_url}`: {err}")))?;
        let address = signer.address();
        let provider =
            ProviderBuilder::new().wallet(EthereumWallet::from(signer)).connect_http(url).erased();
        Ok(Self { address, provider })
    }

    /// Creates a wallet from a hex encoded private key.
    pub fn from_private_key(rpc_url: &str, private_key: &str) -> Result<Self, WalletError> {
        Self::new(rpc_url, create_private_key_signer(private_key)?)
    }

    pub fn address(&self) -> Address {
        self.address
    }
}

#[async_trait]
impl WalletProvider for LocalWallet {
    async fn connect(&self) -> Result<Connection, WalletError> {
        let chain_id = self
            .provider
            .get_chain_id()
            .await
            .map_err(|err| WalletError::NoProvider(err.to_string()))?;
        debug!(address = %self.address, chain_id, "connected local wallet");
        Ok(Connection::new(self.address, chain_id))
    }

    async fn get_network(&self) -> Result<ChainId, WalletError> {
        Ok(self.provider.get_chain_id().await?)
    }

    async fn get_signer(&self) -> Result<WalletSigner, WalletError> {
        Ok(WalletSigner::new(self.address, Arc::new(self.clone())))
    }
}

#[async_trait]
impl TransactionSender for LocalWallet {
    async fn send_transaction(&self, tx: TransactionRequest) -> Result<TxHash, WalletError> {
        let pending = self.provider.send_transaction(tx).await?;
        let tx_hash = *pending.tx_hash();
        debug!(%tx_hash, "sent transaction");
        Ok(tx_hash)
    }
}
