//! Subcommands of `treemint`.

use crate::{notifier::TerminalNotifier, opts::TreemintSubcommand};
use eyre::Result;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use treemint::{
    ContractGateway, MintController, MintError, MintSettings, RpcContractGateway, WalletProvider,
};
use treemint_config::MintConfig;
use treemint_wallets::{Wallet, WalletOpts};
use yansi::Paint;

pub mod connect;
pub mod count;
pub mod mint;

pub type Controller = MintController<Wallet, RpcContractGateway>;

/// Builds the controller for `config`, with the wallet selected on the command line.
pub async fn controller(
    wallet: &WalletOpts,
    config: &MintConfig,
    shutdown: CancellationToken,
) -> Result<Controller> {
    let settings = MintSettings::try_from(config)?;
    let wallet =
        wallet.wallet(&config.rpc_url, config.browser_port, config.browser_timeout()).await?;
    if let Wallet::Browser(browser) = &wallet {
        println!("Approve the wallet requests at {}", browser.server().url().cyan());
    }
    let contract = RpcContractGateway::connect_http(config.contract_address, &config.rpc_url)?;
    Ok(MintController::with_cancellation(
        Arc::new(wallet),
        Arc::new(contract),
        Arc::new(TerminalNotifier),
        settings,
        shutdown,
    ))
}

/// Runs `cmd` against `controller`.
///
/// Failures were already logged by the controller and, where the failure feedback policy asks
/// for it, shown as a notification. Callers only turn them into the exit status.
pub async fn run<W, C>(
    cmd: &TreemintSubcommand,
    controller: &MintController<W, C>,
) -> Result<(), MintError>
where
    W: WalletProvider + ?Sized,
    C: ContractGateway + ?Sized,
{
    match cmd {
        TreemintSubcommand::Connect => connect::run(controller).await,
        TreemintSubcommand::Count => count::run(controller).await,
        TreemintSubcommand::Mint(_) => mint::run(controller).await,
    }
}
