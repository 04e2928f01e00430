//! Contract Gateway: typed access to the TeamTree NFT contract.

use alloy_primitives::{Address, TxHash, U256};
use alloy_provider::{DynProvider, PendingTransactionBuilder, Provider, ProviderBuilder};
use alloy_sol_types::sol;
use async_trait::async_trait;
use std::fmt;
use treemint_wallets::{WalletError, WalletSigner};
use url::Url;

sol! {
    #[sol(rpc)]
    interface ITeamTreeNFT {
        #[derive(Debug)]
        function tokenIds() external view returns (uint256);
        function mint() external payable;
    }
}

/// Failures of calls against the NFT contract.
#[derive(Debug, thiserror::Error)]
pub enum ContractCallError {
    #[error("invalid RPC URL `{url}`: {reason}")]
    InvalidRpcUrl { url: String, reason: String },
    #[error("contract call failed: {0}")]
    Call(#[from] alloy_contract::Error),
    #[error("failed to send mint transaction: {0}")]
    Send(#[from] WalletError),
    #[error("failed to confirm transaction: {0}")]
    Confirmation(#[from] alloy_provider::PendingTransactionError),
    #[error("transaction {tx_hash} reverted")]
    Reverted { tx_hash: TxHash },
}

/// A confirmed mint transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MintReceipt {
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
}

/// Calls against the NFT contract.
#[async_trait]
pub trait ContractGateway: Send + Sync {
    /// Reads the contract's `tokenIds()` counter.
    async fn token_ids(&self) -> Result<U256, ContractCallError>;

    /// Submits the payable `mint()` call from `signer`, attaching `value` wei.
    async fn mint(&self, signer: &WalletSigner, value: U256) -> Result<TxHash, ContractCallError>;

    /// Suspends until `tx_hash` is included. A reverted transaction is an error.
    async fn wait(&self, tx_hash: TxHash) -> Result<MintReceipt, ContractCallError>;
}

/// [`ContractGateway`] talking to the contract over JSON-RPC.
#[derive(Clone)]
pub struct RpcContractGateway {
    address: Address,
    provider: DynProvider,
}

impl fmt::Debug for RpcContractGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcContractGateway").field("address", &self.address).finish_non_exhaustive()
    }
}

impl RpcContractGateway {
    pub fn new(address: Address, provider: DynProvider) -> Self {
        Self { address, provider }
    }

    /// Creates a gateway with a plain HTTP provider for `rpc_url`.
    pub fn connect_http(address: Address, rpc_url: &str) -> Result<Self, ContractCallError> {
        let url: Url = rpc_url.parse().map_err(|err: url::ParseError| {
            ContractCallError::InvalidRpcUrl { url: rpc_url.to_string(), reason: err.to_string() }
        })?;
        Ok(Self::new(address, ProviderBuilder::new().connect_http(url).erased()))
    }

    pub fn address(&self) -> Address {
        self.address
    }
}

#[async_trait]
impl ContractGateway for RpcContractGateway {
    async fn token_ids(&self) -> Result<U256, ContractCallError> {
        let contract = ITeamTreeNFT::new(self.address, &self.provider);
        let count = contract.tokenIds().call().await?;
        trace!(%count, "read tokenIds");
        Ok(count)
    }

    async fn mint(&self, signer: &WalletSigner, value: U256) -> Result<TxHash, ContractCallError> {
        let contract = ITeamTreeNFT::new(self.address, &self.provider);
        let tx = contract.mint().value(value).from(signer.address()).into_transaction_request();
        debug!(contract = %self.address, from = %signer.address(), %value, "submitting mint");
        Ok(signer.send_transaction(tx).await?)
    }

    async fn wait(&self, tx_hash: TxHash) -> Result<MintReceipt, ContractCallError> {
        let receipt =
            PendingTransactionBuilder::new(self.provider.root().clone(), tx_hash).get_receipt().await?;
        if !receipt.status() {
            return Err(ContractCallError::Reverted { tx_hash });
        }
        Ok(MintReceipt { tx_hash, block_number: receipt.block_number })
    }
}
