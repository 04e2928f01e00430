//! What the mint page shows for a given state.

use crate::state::MintState;
use std::fmt;

/// The single action offered to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MintButton {
    ConnectWallet,
    /// Spinner while a mint is in flight.
    Loading,
    Mint,
}

impl MintButton {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::ConnectWallet => "Connect your wallet",
            Self::Loading => "Loading...",
            Self::Mint => "Mint 🚀",
        }
    }
}

impl fmt::Display for MintButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MintView {
    pub button: MintButton,
    /// Link to the contract on the explorer, once a mint succeeded.
    pub nft_link: Option<String>,
    pub minted: String,
}

impl MintView {
    pub fn from_state(state: &MintState) -> Self {
        let button = if !state.wallet_connected {
            MintButton::ConnectWallet
        } else if state.in_flight() {
            MintButton::Loading
        } else {
            MintButton::Mint
        };
        let nft_link = state
            .last_result
            .as_ref()
            .filter(|result| result.success)
            .map(|result| result.nft_url.clone());
        Self { button, nft_link, minted: state.minted.clone() }
    }
}

impl fmt::Display for MintView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(link) = &self.nft_link {
            writeln!(f, "Here is your NFT ➡️ {link}")?;
        }
        writeln!(f, "Minted so far: {}", self.minted)?;
        write!(f, "[ {} ]", self.button)
    }
}
