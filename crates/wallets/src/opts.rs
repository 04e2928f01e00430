use crate::{LocalWallet, Wallet, WalletError};
use clap::Parser;
use serde::Serialize;
use std::time::Duration;

#[cfg(feature = "browser")]
use crate::{BrowserWallet, BrowserWalletServer};

/// The wallet options can either be:
/// 1. Raw private key
/// 2. Browser wallet extension
#[derive(Clone, Debug, Default, Serialize, Parser)]
#[command(next_help_heading = "Wallet options")]
pub struct WalletOpts {
    /// Use the provided private key.
    #[arg(
        long,
        value_name = "RAW_PRIVATE_KEY",
        env = "TREEMINT_PRIVATE_KEY",
        hide_env_values = true,
        conflicts_with = "browser"
    )]
    #[serde(skip)]
    pub private_key: Option<String>,

    /// Use a browser wallet extension through a local bridge page.
    #[arg(long)]
    pub browser: bool,

    /// Port of the browser wallet bridge.
    #[arg(long, value_name = "PORT", requires = "browser")]
    #[serde(rename = "browser_port", skip_serializing_if = "Option::is_none")]
    pub browser_port: Option<u16>,

    /// Do not open the bridge page automatically.
    #[arg(long, requires = "browser")]
    #[serde(skip)]
    pub browser_disable_open: bool,
}

impl WalletOpts {
    /// Instantiates the selected wallet.
    ///
    /// The browser wallet starts its bridge server here; it is stopped when the wallet is
    /// dropped.
    pub async fn wallet(
        &self,
        rpc_url: &str,
        browser_port: u16,
        browser_timeout: Duration,
    ) -> Result<Wallet, WalletError> {
        if self.browser {
            return self.browser_wallet(self.browser_port.unwrap_or(browser_port), browser_timeout).await;
        }

        let Some(private_key) = self.private_key.as_deref() else {
            return Err(WalletError::NoProvider(
                "pass --private-key or --browser to select a wallet".to_string(),
            ));
        };
        Ok(Wallet::Local(LocalWallet::from_private_key(rpc_url, private_key)?))
    }

    #[cfg(feature = "browser")]
    async fn browser_wallet(&self, port: u16, timeout: Duration) -> Result<Wallet, WalletError> {
        let mut server = BrowserWalletServer::new(port, !self.browser_disable_open, timeout);
        server.start().await?;
        Ok(Wallet::Browser(BrowserWallet::new(server)))
    }

    #[cfg(not(feature = "browser"))]
    async fn browser_wallet(&self, _port: u16, _timeout: Duration) -> Result<Wallet, WalletError> {
        Err(WalletError::NoProvider("treemint was not built with browser wallet support".into()))
    }
}
