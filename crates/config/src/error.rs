//! Config error types.

use figment::providers::{Format, Toml};
use std::{collections::HashSet, error::Error, fmt};

/// Represents a failed attempt to extract `MintConfig` from a `Figment`.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtractConfigError {
    /// error thrown when extracting the `MintConfig`
    pub(crate) error: figment::Error,
}

impl ExtractConfigError {
    /// Wraps the figment error
    pub fn new(error: figment::Error) -> Self {
        Self { error }
    }
}

impl fmt::Display for ExtractConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut unique = HashSet::with_capacity(self.error.count());
        writeln!(f, "failed to extract treemint config:")?;
        for err in self.error.clone() {
            let from_toml = err
                .metadata
                .as_ref()
                .map(|meta| meta.name.contains(Toml::NAME))
                .unwrap_or_default();
            let mut line =
                format!("{}: {err}", if from_toml { "treemint.toml error" } else { "config error" });
            if !err.path.is_empty() {
                // the path names the offending setting, e.g. `["reentrancy"]`
                line.push_str(&format!(" for setting `{}`", err.path.join(".")));
            }
            if unique.insert(line.clone()) {
                writeln!(f, "{line}")?;
            }
        }
        Ok(())
    }
}

impl Error for ExtractConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Error::source(&self.error)
    }
}

/// Invalid values in an otherwise well-formed config.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no NFT contract address configured; set `contract_address` or TREEMINT_CONTRACT_ADDRESS")]
    MissingContractAddress,
    #[error("invalid mint price `{price}`: {reason}")]
    InvalidMintPrice { price: String, reason: String },
}
