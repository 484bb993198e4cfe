//! Wallet configuration.
//!
//! [`WalletConfig`] controls how derived accounts are rendered and when
//! account ranges are derived on the rayon pool. Customize it with struct
//! update syntax over [`WalletConfig::default`].

use xno_core::constants::AddressPrefix;

/// Default range length at which derivation moves onto the thread pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 16;

/// Configuration for account derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletConfig {
    /// Prefix for rendered account addresses.
    pub prefix: AddressPrefix,
    /// Ranges with at least this many indices are derived in parallel.
    pub parallel_threshold: usize,
    /// Log level filter string (e.g. "info", "debug", "xno_wallet=trace").
    pub log_level: String,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            prefix: AddressPrefix::Nano,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            log_level: "info".to_string(),
        }
    }
}

impl WalletConfig {
    /// Whether a range of `len` indices should be derived in parallel.
    pub fn use_parallel(&self, len: usize) -> bool {
        len >= self.parallel_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_prefix_is_nano() {
        assert_eq!(WalletConfig::default().prefix, AddressPrefix::Nano);
    }

    #[test]
    fn default_log_level_is_info() {
        assert_eq!(WalletConfig::default().log_level, "info");
    }

    #[test]
    fn parallel_threshold() {
        let cfg = WalletConfig {
            parallel_threshold: 10,
            ..Default::default()
        };
        assert!(!cfg.use_parallel(9));
        assert!(cfg.use_parallel(10));
    }

    #[test]
    fn zero_threshold_always_parallel() {
        let cfg = WalletConfig {
            parallel_threshold: 0,
            ..Default::default()
        };
        assert!(cfg.use_parallel(0));
    }
}
