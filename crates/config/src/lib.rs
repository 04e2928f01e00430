//! # treemint-config
//!
//! Configuration for the TeamTree mint client.
//!
//! Values are layered with [`figment`]: built-in defaults, then `treemint.toml`, then `TREEMINT_*`
//! environment variables. Command line options are merged on top by the CLI.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

use alloy_primitives::{Address, ChainId, U256, utils::parse_ether};
use figment::{
    Figment, Provider,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

mod error;
pub use error::{ConfigError, ExtractConfigError};

// reexport so cli types can implement `figment::Provider` to easily merge command line arguments
pub use figment;

/// Chain id of the Avalanche Fuji C-Chain, the only network minting is allowed on.
pub const AVALANCHE_FUJI_CHAIN_ID: ChainId = 43113;

/// Public RPC endpoint of the Avalanche Fuji C-Chain.
pub const AVALANCHE_FUJI_RPC_URL: &str = "https://api.avax-test.network/ext/bc/C/rpc";

/// Block explorer of the Avalanche Fuji C-Chain.
pub const AVALANCHE_FUJI_EXPLORER_URL: &str = "https://testnet.snowtrace.io";

/// Price attached to every mint call, in native currency units.
pub const DEFAULT_MINT_PRICE: &str = "0.1";

/// What to do when `mint` is requested while a previous mint is still awaiting confirmation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reentrancy {
    /// Dispatch the second mint anyway. The in-flight flag only drives the spinner.
    #[default]
    Allow,
    /// Refuse the second mint before touching the wallet.
    Reject,
}

/// User feedback for failed mint transactions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureFeedback {
    /// Log the failure only; the mint button silently returns to idle.
    #[default]
    Silent,
    /// Additionally emit an error notification.
    Notify,
}

/// The mint client configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MintConfig {
    /// RPC endpoint used for reads and receipts.
    pub rpc_url: String,
    /// The chain id every contract interaction is gated on.
    pub chain_id: ChainId,
    /// Address of the NFT contract.
    pub contract_address: Address,
    /// Payment attached to `mint()`, in ether units of the native currency.
    pub mint_price: String,
    /// Base URL of the block explorer used for the NFT link.
    pub explorer_url: String,
    /// Behaviour of overlapping mint submissions.
    pub reentrancy: Reentrancy,
    /// Behaviour on failed mint transactions.
    pub on_failure: FailureFeedback,
    /// Seconds to wait for a mint confirmation, `None` waits forever.
    pub confirmation_timeout: Option<u64>,
    /// Port of the local browser wallet bridge, `0` picks a free port.
    pub browser_port: u16,
    /// Seconds the browser wallet bridge waits for the user.
    pub browser_timeout: u64,
}

impl Default for MintConfig {
    fn default() -> Self {
        Self {
            rpc_url: AVALANCHE_FUJI_RPC_URL.to_string(),
            chain_id: AVALANCHE_FUJI_CHAIN_ID,
            contract_address: Address::ZERO,
            mint_price: DEFAULT_MINT_PRICE.to_string(),
            explorer_url: AVALANCHE_FUJI_EXPLORER_URL.to_string(),
            reentrancy: Reentrancy::default(),
            on_failure: FailureFeedback::default(),
            confirmation_timeout: None,
            browser_port: 9545,
            browser_timeout: 300,
        }
    }
}

impl MintConfig {
    /// The default config file name.
    pub const FILE_NAME: &'static str = "treemint.toml";

    /// Environment variable that overrides the config file location.
    pub const CONFIG_PATH_ENV: &'static str = "TREEMINT_CONFIG";

    /// Prefix of the environment variables merged into the config.
    pub const ENV_PREFIX: &'static str = "TREEMINT_";

    /// Loads the config from the current directory.
    pub fn load() -> Result<Self, ExtractConfigError> {
        Self::try_from(Self::figment())
    }

    /// Loads the config from the given root directory.
    pub fn load_with_root(root: impl AsRef<Path>) -> Result<Self, ExtractConfigError> {
        Self::try_from(Self::figment_with_root(root))
    }

    /// Attempts to extract a `MintConfig` from `provider`.
    pub fn try_from<T: Provider>(provider: T) -> Result<Self, ExtractConfigError> {
        trace!("load config with provider: {:?}", provider.metadata());
        Figment::from(provider).extract::<Self>().map_err(ExtractConfigError::new)
    }

    /// Returns the default [Figment] rooted at the current directory.
    pub fn figment() -> Figment {
        Self::figment_with_root(".")
    }

    /// Returns the default [Figment]: defaults, then the toml file, then the environment.
    pub fn figment_with_root(root: impl AsRef<Path>) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(Self::config_path(root.as_ref())))
            .merge(Env::prefixed(Self::ENV_PREFIX).ignore(&["CONFIG"]))
    }

    fn config_path(root: &Path) -> PathBuf {
        std::env::var_os(Self::CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| root.join(Self::FILE_NAME))
    }

    /// Checks the values that cannot be expressed through the types alone.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.contract_address.is_zero() {
            return Err(ConfigError::MissingContractAddress);
        }
        self.mint_price_wei()?;
        Ok(())
    }

    /// The mint price converted to wei.
    pub fn mint_price_wei(&self) -> Result<U256, ConfigError> {
        parse_ether(&self.mint_price).map_err(|err| ConfigError::InvalidMintPrice {
            price: self.mint_price.clone(),
            reason: err.to_string(),
        })
    }

    /// How long to wait for a mint confirmation.
    pub fn confirmation_timeout(&self) -> Option<Duration> {
        self.confirmation_timeout.map(Duration::from_secs)
    }

    /// How long the browser wallet bridge waits for the user.
    pub fn browser_timeout(&self) -> Duration {
        Duration::from_secs(self.browser_timeout)
    }

    /// Explorer page of the NFT contract, shown after a successful mint.
    pub fn nft_url(&self) -> String {
        format!("{}/address/{}/", self.explorer_url.trim_end_matches('/'), self.contract_address)
    }
}
