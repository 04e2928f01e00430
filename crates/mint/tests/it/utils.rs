//! In-memory wallet and contract gateways.

use alloy_primitives::{Address, ChainId, TxHash, U256, address};
use alloy_rpc_types::TransactionRequest;
use alloy_transport::TransportErrorKind;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicU64, Ordering},
};
use tokio::sync::Semaphore;
use treemint::{
    ContractCallError, ContractGateway, MintController, MintReceipt, MintSettings,
    NotificationLog,
};
use treemint_wallets::{Connection, TransactionSender, WalletError, WalletProvider, WalletSigner};

pub const ALICE: Address = address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
pub const FUJI: ChainId = 43113;

pub type TestController = MintController<MockWallet, MockContract>;

/// Records every transaction it is asked to send.
#[derive(Debug, Default)]
pub struct RecordingSender {
    sent: Mutex<Vec<TransactionRequest>>,
    reject: AtomicBool,
}

impl RecordingSender {
    pub fn sent(&self) -> Vec<TransactionRequest> {
        self.sent.lock().clone()
    }

    /// Makes the user refuse every transaction prompt.
    pub fn reject(&self, reject: bool) {
        self.reject.store(reject, Ordering::SeqCst);
    }
}

#[async_trait]
impl TransactionSender for RecordingSender {
    async fn send_transaction(&self, tx: TransactionRequest) -> Result<TxHash, WalletError> {
        if self.reject.load(Ordering::SeqCst) {
            return Err(WalletError::Rejected("User denied transaction signature.".to_string()));
        }
        let mut sent = self.sent.lock();
        sent.push(tx);
        Ok(TxHash::with_last_byte(sent.len() as u8))
    }
}

/// Wallet on a configurable chain.
#[derive(Debug)]
pub struct MockWallet {
    address: Address,
    chain_id: AtomicU64,
    reject_connect: AtomicBool,
    disconnected: AtomicBool,
    connects: AtomicU64,
    pub sender: Arc<RecordingSender>,
}

impl MockWallet {
    pub fn new(chain_id: ChainId) -> Self {
        Self {
            address: ALICE,
            chain_id: AtomicU64::new(chain_id),
            reject_connect: AtomicBool::new(false),
            disconnected: AtomicBool::new(false),
            connects: AtomicU64::new(0),
            sender: Default::default(),
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Simulates the user switching networks in the wallet.
    pub fn switch_chain(&self, chain_id: ChainId) {
        self.chain_id.store(chain_id, Ordering::SeqCst);
    }

    pub fn reject_connect(&self, reject: bool) {
        self.reject_connect.store(reject, Ordering::SeqCst);
    }

    /// Simulates the extension dropping the account, e.g. after locking.
    pub fn disconnect(&self) {
        self.disconnected.store(true, Ordering::SeqCst);
    }

    fn ensure_connected(&self) -> Result<(), WalletError> {
        if self.disconnected.load(Ordering::SeqCst) {
            return Err(WalletError::NotConnected);
        }
        Ok(())
    }

    pub fn connects(&self) -> u64 {
        self.connects.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WalletProvider for MockWallet {
    async fn connect(&self) -> Result<Connection, WalletError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        if self.reject_connect.load(Ordering::SeqCst) {
            return Err(WalletError::Rejected("User rejected the request.".to_string()));
        }
        self.ensure_connected()?;
        Ok(Connection::new(self.address, self.chain_id.load(Ordering::SeqCst)))
    }

    async fn get_network(&self) -> Result<ChainId, WalletError> {
        self.ensure_connected()?;
        Ok(self.chain_id.load(Ordering::SeqCst))
    }

    async fn get_signer(&self) -> Result<WalletSigner, WalletError> {
        self.ensure_connected()?;
        Ok(WalletSigner::new(self.address, self.sender.clone()))
    }
}

/// NFT contract kept in memory.
///
/// Confirmations can be held back with [`MockContract::gated`] and released one by one.
#[derive(Debug, Default)]
pub struct MockContract {
    minted: AtomicU64,
    mint_calls: Mutex<Vec<(Address, U256)>>,
    reads: AtomicU64,
    revert: AtomicBool,
    fail_reads: AtomicBool,
    gate: Option<Semaphore>,
}

impl MockContract {
    pub fn new() -> Self {
        Self::default()
    }

    /// Confirmations wait for [`release`](Self::release).
    pub fn gated() -> Self {
        Self { gate: Some(Semaphore::new(0)), ..Default::default() }
    }

    pub fn release(&self, confirmations: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(confirmations);
        }
    }

    pub fn set_minted(&self, minted: u64) {
        self.minted.store(minted, Ordering::SeqCst);
    }

    pub fn minted(&self) -> u64 {
        self.minted.load(Ordering::SeqCst)
    }

    pub fn mint_calls(&self) -> Vec<(Address, U256)> {
        self.mint_calls.lock().clone()
    }

    pub fn reads(&self) -> u64 {
        self.reads.load(Ordering::SeqCst)
    }

    /// Every contract interaction, reads and mint submissions.
    pub fn calls(&self) -> u64 {
        self.reads() + self.mint_calls.lock().len() as u64
    }

    pub fn revert(&self, revert: bool) {
        self.revert.store(revert, Ordering::SeqCst);
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl ContractGateway for MockContract {
    async fn token_ids(&self) -> Result<U256, ContractCallError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            let err = TransportErrorKind::custom_str("connection refused");
            return Err(ContractCallError::Call(err.into()));
        }
        Ok(U256::from(self.minted()))
    }

    async fn mint(&self, signer: &WalletSigner, value: U256) -> Result<TxHash, ContractCallError> {
        self.mint_calls.lock().push((signer.address(), value));
        let tx = TransactionRequest::default().value(value);
        Ok(signer.send_transaction(tx).await?)
    }

    async fn wait(&self, tx_hash: TxHash) -> Result<MintReceipt, ContractCallError> {
        if let Some(gate) = &self.gate {
            gate.acquire().await.expect("gate closed").forget();
        }
        if self.revert.load(Ordering::SeqCst) {
            return Err(ContractCallError::Reverted { tx_hash });
        }
        let block = self.minted.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(MintReceipt { tx_hash, block_number: Some(block) })
    }
}

pub struct Harness {
    pub controller: Arc<TestController>,
    pub wallet: Arc<MockWallet>,
    pub contract: Arc<MockContract>,
    pub log: NotificationLog,
}

impl Harness {
    pub fn new(wallet: MockWallet, contract: MockContract, settings: MintSettings) -> Self {
        crate::init_tracing();
        let wallet = Arc::new(wallet);
        let contract = Arc::new(contract);
        let log = NotificationLog::new();
        let controller = Arc::new(MintController::new(
            wallet.clone(),
            contract.clone(),
            Arc::new(log.clone()),
            settings,
        ));
        Self { controller, wallet, contract, log }
    }

    /// Fuji wallet, ungated contract, default settings.
    pub fn fuji() -> Self {
        Self::new(MockWallet::new(FUJI), MockContract::new(), MintSettings::default())
    }

    pub fn gated(settings: MintSettings) -> Self {
        Self::new(MockWallet::new(FUJI), MockContract::gated(), settings)
    }

    /// Connects the wallet, which every contract call needs first.
    pub async fn connect(&self) {
        self.controller.connect_wallet().await.unwrap();
        assert!(self.controller.state().wallet_connected);
    }
}
