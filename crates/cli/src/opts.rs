use alloy_primitives::Address;
use clap::{Parser, Subcommand};
use treemint_config::{
    MintConfig,
    figment::{
        self, Figment, Metadata, Profile,
        value::{Dict, Map},
    },
};
use treemint_wallets::WalletOpts;

/// Mint TeamTree NFTs on the Avalanche Fuji testnet.
#[derive(Debug, Parser)]
#[command(name = "treemint", version, next_display_order = None)]
pub struct Treemint {
    #[command(flatten)]
    pub wallet: WalletOpts,

    #[command(flatten)]
    pub network: NetworkOpts,

    #[command(subcommand)]
    pub cmd: TreemintSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum TreemintSubcommand {
    /// Connect the wallet and check that it is on Avalanche Fuji.
    #[command(visible_alias = "c")]
    Connect,

    /// Print how many NFTs were minted so far.
    #[command(visible_alias = "n")]
    Count,

    /// Mint one NFT, paying the mint price.
    #[command(visible_alias = "m")]
    Mint(MintArgs),
}

/// Where the NFT contract lives.
#[derive(Clone, Debug, Default, Parser)]
#[command(next_help_heading = "Network options")]
pub struct NetworkOpts {
    /// The RPC endpoint.
    #[arg(long, short, value_name = "URL")]
    pub rpc_url: Option<String>,

    /// Address of the TeamTree NFT contract.
    #[arg(long, value_name = "ADDRESS")]
    pub contract: Option<Address>,
}

impl figment::Provider for NetworkOpts {
    fn metadata(&self) -> Metadata {
        Metadata::named("NetworkOpts")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        Ok(Map::from([(Profile::Default, self.dict())]))
    }
}

impl NetworkOpts {
    pub fn dict(&self) -> Dict {
        let mut dict = Dict::new();
        if let Some(url) = &self.rpc_url {
            dict.insert("rpc_url".into(), url.clone().into());
        }
        if let Some(contract) = self.contract {
            dict.insert("contract_address".into(), contract.to_string().into());
        }
        dict
    }
}

/// Options of `treemint mint`.
#[derive(Clone, Debug, Default, Parser)]
pub struct MintArgs {
    /// Give up waiting for the confirmation after this many seconds.
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Refuse to start a mint while another one is pending.
    #[arg(long)]
    pub reject_reentrant: bool,

    /// Show a notification when the mint fails.
    #[arg(long)]
    pub notify_failure: bool,
}

impl figment::Provider for MintArgs {
    fn metadata(&self) -> Metadata {
        Metadata::named("MintArgs")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        Ok(Map::from([(Profile::Default, self.dict())]))
    }
}

impl MintArgs {
    pub fn dict(&self) -> Dict {
        let mut dict = Dict::new();
        if let Some(timeout) = self.timeout {
            dict.insert("confirmation_timeout".into(), timeout.into());
        }
        if self.reject_reentrant {
            dict.insert("reentrancy".into(), "reject".into());
        }
        if self.notify_failure {
            dict.insert("on_failure".into(), "notify".into());
        }
        dict
    }
}

impl Treemint {
    /// The config figment with the command line options merged on top.
    pub fn figment(&self) -> Figment {
        let figment = MintConfig::figment().merge(self.network.clone());
        match &self.cmd {
            TreemintSubcommand::Mint(args) => figment.merge(args.clone()),
            _ => figment,
        }
    }

    /// Loads the config for this invocation.
    pub fn load_config(&self) -> eyre::Result<MintConfig> {
        Ok(MintConfig::try_from(self.figment())?)
    }
}
