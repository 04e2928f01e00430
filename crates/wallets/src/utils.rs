use crate::error::PrivateKeyError;
use alloy_primitives::{B256, hex::FromHex};
use alloy_signer_local::{LocalSignerError, PrivateKeySigner};

fn ensure_pk_not_env(pk: &str) -> Result<(), PrivateKeyError> {
    if !pk.starts_with("0x") && std::env::var(pk).is_ok() {
        return Err(PrivateKeyError::ExistsAsEnvVar(pk.to_string()));
    }
    Ok(())
}

/// Validates and sanitizes user input, returning a local [PrivateKeySigner].
pub fn create_private_key_signer(private_key_str: &str) -> Result<PrivateKeySigner, PrivateKeyError> {
    let private_key_str = private_key_str.trim();
    let private_key = match B256::from_hex(private_key_str) {
        Ok(private_key) => private_key,
        Err(err) => {
            ensure_pk_not_env(private_key_str)?;
            return Err(err.into());
        }
    };
    match PrivateKeySigner::from_bytes(&private_key) {
        Ok(pk) => Ok(pk),
        Err(err) => {
            ensure_pk_not_env(private_key_str)?;
            Err(LocalSignerError::from(err).into())
        }
    }
}
