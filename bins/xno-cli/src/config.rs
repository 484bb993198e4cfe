//! CLI configuration loaded from environment variables.

use anyhow::{Context, Result, bail};
use xno_core::AddressPrefix;
use xno_wallet::config::{DEFAULT_PARALLEL_THRESHOLD, WalletConfig};

/// Parse a prefix name: `nano` or `xrb`, with or without the underscore.
pub fn parse_prefix(s: &str) -> Result<AddressPrefix> {
    match s.trim_end_matches('_').to_lowercase().as_str() {
        "nano" => Ok(AddressPrefix::Nano),
        "xrb" => Ok(AddressPrefix::Xrb),
        _ => bail!("Invalid address prefix (must be 'nano' or 'xrb')"),
    }
}

/// Build the wallet configuration from `XNO_*` variables.
///
/// - `XNO_ADDRESS_PREFIX`: `nano` (default) or `xrb`
/// - `XNO_PARALLEL_THRESHOLD`: range length that moves derivation onto the
///   thread pool
/// - `XNO_LOG_LEVEL`: default log filter when `RUST_LOG` is unset
pub fn from_env() -> Result<WalletConfig> {
    let prefix = match std::env::var("XNO_ADDRESS_PREFIX") {
        Ok(value) => parse_prefix(&value).context("XNO_ADDRESS_PREFIX")?,
        Err(_) => AddressPrefix::Nano,
    };

    let parallel_threshold: usize = std::env::var("XNO_PARALLEL_THRESHOLD")
        .unwrap_or_else(|_| DEFAULT_PARALLEL_THRESHOLD.to_string())
        .parse()
        .context("XNO_PARALLEL_THRESHOLD must be a non-negative integer")?;

    let log_level = std::env::var("XNO_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    Ok(WalletConfig {
        prefix,
        parallel_threshold,
        log_level,
    })
}
