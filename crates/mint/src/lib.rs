//! # treemint
//!
//! Mint flow for the TeamTree NFT collection on the Avalanche Fuji testnet.
//!
//! [`MintController`] connects a wallet, refuses to talk to the contract unless the wallet is on
//! the required chain, reads the mint counter and submits the payable `mint()` call. The wallet
//! and the contract are reached through the [`WalletProvider`] and [`ContractGateway`] traits, so
//! either side can be replaced.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

pub mod contract;
pub use contract::{ContractCallError, ContractGateway, MintReceipt, RpcContractGateway};

mod controller;
pub use controller::{MintController, MintRequest, MintSettings, ProviderOrSigner};

mod error;
pub use error::MintError;

pub mod notify;
pub use notify::{Notification, NotificationKind, NotificationLog, Notifier, TracingNotifier};

pub mod render;
pub use render::{MintButton, MintView};

pub mod state;
pub use state::{MintPhase, MintResult, MintState};

pub use treemint_config::{FailureFeedback, MintConfig, Reentrancy};
pub use treemint_wallets::{Connection, WalletProvider, WalletSigner};
