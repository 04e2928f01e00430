//! The Mint Flow Controller.

use crate::{
    contract::ContractGateway,
    error::MintError,
    notify::{MINT_SUCCESS_MESSAGE, Notification, Notifier, WRONG_NETWORK_MESSAGE},
    render::MintView,
    state::{MintResult, MintState},
};
use alloy_primitives::{ChainId, U256, utils::parse_ether};
use parking_lot::Mutex;
use std::{future::Future, sync::Arc, time::Duration};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use treemint_config::{
    AVALANCHE_FUJI_CHAIN_ID, ConfigError, DEFAULT_MINT_PRICE, FailureFeedback, MintConfig,
    Reentrancy,
};
use treemint_wallets::{Connection, WalletError, WalletProvider, WalletSigner};

/// Constants and policies the controller runs with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MintSettings {
    /// Every contract interaction is refused on any other chain.
    pub chain_id: ChainId,
    /// Wei attached to every mint call.
    pub mint_price: U256,
    /// Explorer page of the NFT contract.
    pub nft_url: String,
    pub reentrancy: Reentrancy,
    pub on_failure: FailureFeedback,
    /// `None` waits for confirmations forever.
    pub confirmation_timeout: Option<Duration>,
}

impl Default for MintSettings {
    fn default() -> Self {
        Self {
            chain_id: AVALANCHE_FUJI_CHAIN_ID,
            mint_price: parse_ether(DEFAULT_MINT_PRICE).unwrap_or_default(),
            nft_url: MintConfig::default().nft_url(),
            reentrancy: Reentrancy::default(),
            on_failure: FailureFeedback::default(),
            confirmation_timeout: None,
        }
    }
}

impl TryFrom<&MintConfig> for MintSettings {
    type Error = ConfigError;

    fn try_from(config: &MintConfig) -> Result<Self, Self::Error> {
        Ok(Self {
            chain_id: config.chain_id,
            mint_price: config.mint_price_wei()?,
            nft_url: config.nft_url(),
            reentrancy: config.reentrancy,
            on_failure: config.on_failure,
            confirmation_timeout: config.confirmation_timeout(),
        })
    }
}

/// What [`MintController::resolve_provider_or_signer`] hands back.
#[derive(Clone, Debug)]
pub enum ProviderOrSigner {
    Provider(Connection),
    Signer { connection: Connection, signer: WalletSigner },
}

impl ProviderOrSigner {
    pub fn connection(&self) -> Connection {
        match self {
            Self::Provider(connection) | Self::Signer { connection, .. } => *connection,
        }
    }

    pub fn into_signer(self) -> Option<WalletSigner> {
        match self {
            Self::Provider(_) => None,
            Self::Signer { signer, .. } => Some(signer),
        }
    }
}

/// A single mint submission: the fixed payment and who pays it.
#[derive(Clone, Debug)]
pub struct MintRequest {
    pub value: U256,
    pub signer: WalletSigner,
}

/// Drives wallet connection, the network guard and mint submission.
///
/// The controller is the only writer of [`MintState`]; the rendering side observes it through
/// [`subscribe`](Self::subscribe) or pulls a [`MintView`]. Every top-level operation handles its
/// own failure (logging, notification policy, state reset) and returns it to the caller for
/// inspection.
pub struct MintController<W: ?Sized, C: ?Sized> {
    wallet: Arc<W>,
    contract: Arc<C>,
    notifier: Arc<dyn Notifier>,
    settings: MintSettings,
    state: watch::Sender<MintState>,
    shutdown: CancellationToken,
    current: Mutex<CancellationToken>,
}

impl<W, C> MintController<W, C>
where
    W: WalletProvider + ?Sized,
    C: ContractGateway + ?Sized,
{
    pub fn new(
        wallet: Arc<W>,
        contract: Arc<C>,
        notifier: Arc<dyn Notifier>,
        settings: MintSettings,
    ) -> Self {
        Self::with_cancellation(wallet, contract, notifier, settings, CancellationToken::new())
    }

    /// Like [`new`](Self::new), cancelled together with `shutdown`.
    pub fn with_cancellation(
        wallet: Arc<W>,
        contract: Arc<C>,
        notifier: Arc<dyn Notifier>,
        settings: MintSettings,
        shutdown: CancellationToken,
    ) -> Self {
        let (state, _) = watch::channel(MintState::default());
        let current = Mutex::new(shutdown.child_token());
        Self { wallet, contract, notifier, settings, state, shutdown, current }
    }

    pub fn settings(&self) -> &MintSettings {
        &self.settings
    }

    /// Current state snapshot.
    pub fn state(&self) -> MintState {
        self.state.borrow().clone()
    }

    /// Receives every state the controller publishes.
    pub fn subscribe(&self) -> watch::Receiver<MintState> {
        self.state.subscribe()
    }

    /// What the page should show right now.
    pub fn view(&self) -> MintView {
        MintView::from_state(&self.state.borrow())
    }

    /// Aborts every pending wallet prompt and confirmation wait. Later operations run normally.
    pub fn cancel(&self) {
        let previous = std::mem::replace(&mut *self.current.lock(), self.shutdown.child_token());
        debug!("cancelling pending operations");
        previous.cancel();
    }

    /// Requests access to the wallet and marks it connected.
    ///
    /// Goes through the network guard, so connecting on the wrong chain fails.
    pub async fn connect_wallet(&self) -> Result<Connection, MintError> {
        match self.resolve_provider_or_signer(false).await {
            Ok(resolved) => {
                let connection = resolved.connection();
                info!(address = %connection.address, chain_id = connection.chain_id, "wallet connected");
                self.update(|state| state.connected(connection));
                Ok(connection)
            }
            Err(err) => {
                warn!(%err, "failed to connect wallet");
                Err(err)
            }
        }
    }

    /// Obtains a provider or signer handle after checking the wallet's chain id.
    ///
    /// On a chain mismatch exactly one notification is emitted and nothing is sent to the
    /// contract.
    pub async fn resolve_provider_or_signer(
        &self,
        need_signer: bool,
    ) -> Result<ProviderOrSigner, MintError> {
        let token = self.token();
        let connection =
            self.cancellable(&token, self.wallet.connect()).await?.map_err(MintError::Connection)?;
        let chain_id = self.wallet.get_network().await.map_err(MintError::Connection)?;

        if chain_id != self.settings.chain_id {
            self.notifier.notify(Notification::error(WRONG_NETWORK_MESSAGE));
            return Err(MintError::WrongNetwork { chain_id, expected: self.settings.chain_id });
        }

        let connection = Connection { chain_id, ..connection };
        if need_signer {
            let signer = self.wallet.get_signer().await.map_err(MintError::Connection)?;
            Ok(ProviderOrSigner::Signer { connection, signer })
        } else {
            Ok(ProviderOrSigner::Provider(connection))
        }
    }

    /// Reads the contract's mint counter as a display string.
    ///
    /// Needs a connected wallet. On failure the previously stored counter is kept.
    pub async fn get_minted_count(&self) -> Result<String, MintError> {
        self.require_connected()?;
        match self.read_minted_count().await {
            Ok(minted) => {
                self.update(|state| state.with_minted(minted.clone()));
                Ok(minted)
            }
            Err(err) => {
                warn!(%err, "failed to read minted count");
                Err(err)
            }
        }
    }

    async fn read_minted_count(&self) -> Result<String, MintError> {
        self.resolve_provider_or_signer(false).await?;
        let token = self.token();
        let count = self.cancellable(&token, self.contract.token_ids()).await??;
        Ok(count.to_string())
    }

    /// Mints one NFT, paying the fixed price, and waits for the confirmation.
    ///
    /// Refused before any wallet or contract call until
    /// [`connect_wallet`](Self::connect_wallet) has succeeded.
    pub async fn public_mint(&self) -> Result<MintResult, MintError> {
        self.require_connected()?;
        if !self.try_begin_attempt() {
            debug!("rejecting mint while another one is pending");
            return Err(MintError::MintInFlight);
        }

        match self.submit_mint().await {
            Ok(result) => {
                info!(tx_hash = %result.tx_hash, block = ?result.block_number, "mint confirmed");
                self.update(|state| state.succeeded(result.clone()));
                self.notifier.notify(Notification::success(MINT_SUCCESS_MESSAGE));
                Ok(result)
            }
            Err(err) => {
                warn!(%err, "mint failed");
                self.update(MintState::failed);
                let already_notified = matches!(err, MintError::WrongNetwork { .. });
                if self.settings.on_failure == FailureFeedback::Notify && !already_notified {
                    self.notifier.notify(Notification::error(err.to_string()));
                }
                Err(err)
            }
        }
    }

    /// Contract calls are only made once the wallet was connected.
    fn require_connected(&self) -> Result<(), MintError> {
        if self.state.borrow().wallet_connected {
            return Ok(());
        }
        debug!("wallet not connected, refusing contract call");
        Err(MintError::Connection(WalletError::NotConnected))
    }

    /// Starts a new attempt, unless re-entrant mints are rejected and one is pending.
    ///
    /// An overlapping attempt leaves an in-flight phase in place so the spinner stays up.
    fn try_begin_attempt(&self) -> bool {
        let reject = self.settings.reentrancy == Reentrancy::Reject;
        let mut started = false;
        self.state.send_if_modified(|state| {
            if reject && state.phase.is_pending() {
                return false;
            }
            started = true;
            if state.in_flight() {
                return false;
            }
            *state = std::mem::take(state).begin_attempt();
            true
        });
        started
    }

    async fn submit_mint(&self) -> Result<MintResult, MintError> {
        let signer = self
            .resolve_provider_or_signer(true)
            .await?
            .into_signer()
            .ok_or(MintError::Connection(WalletError::NotConnected))?;
        let request = MintRequest { value: self.settings.mint_price, signer };
        let token = self.token();

        self.update(MintState::submitting);
        let tx_hash =
            self.cancellable(&token, self.contract.mint(&request.signer, request.value)).await??;
        debug!(%tx_hash, "mint submitted, waiting for confirmation");

        self.update(|state| state.confirming(tx_hash));
        let receipt = match self.settings.confirmation_timeout {
            Some(timeout) => self
                .cancellable(&token, tokio::time::timeout(timeout, self.contract.wait(tx_hash)))
                .await?
                .map_err(|_| MintError::TimedOut(timeout))??,
            None => self.cancellable(&token, self.contract.wait(tx_hash)).await??,
        };

        Ok(MintResult {
            success: true,
            tx_hash: receipt.tx_hash,
            block_number: receipt.block_number,
            nft_url: self.settings.nft_url.clone(),
        })
    }

    fn token(&self) -> CancellationToken {
        self.current.lock().clone()
    }

    async fn cancellable<F: Future>(
        &self,
        token: &CancellationToken,
        fut: F,
    ) -> Result<F::Output, MintError> {
        tokio::select! {
            biased;
            _ = token.cancelled() => Err(MintError::Cancelled),
            out = fut => Ok(out),
        }
    }

    fn update(&self, transition: impl FnOnce(MintState) -> MintState) {
        self.state.send_modify(|state| {
            *state = transition(std::mem::take(state));
            trace!(phase = ?state.phase, connected = state.wallet_connected, "state updated");
        });
    }
}
