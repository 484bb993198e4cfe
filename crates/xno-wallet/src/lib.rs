//! # xno-wallet: seeds, accounts and encrypted messages.
//!
//! Turns entropy or a mnemonic into a seed, derives account keys with
//! either the hierarchical or the legacy scheme, and seals messages between
//! accounts. All operations are offline and deterministic apart from the
//! caller-supplied [`EntropySource`].
//!
//! # Modules
//!
//! - [`error`]: `WalletError` enum
//! - [`config`]: `WalletConfig`
//! - [`entropy`]: `EntropySource` and entropy validation
//! - [`mnemonic`]: BIP-39 phrases for both seed schemes
//! - [`keys`]: `Seed`, `LegacySeed`, private key derivation
//! - [`wallet`]: `Wallet`, `Account`, account ranges
//! - [`encryption`]: curve25519 message boxes

pub mod config;
pub mod encryption;
pub mod entropy;
pub mod error;
pub mod keys;
pub mod mnemonic;
pub mod wallet;

pub use config::WalletConfig;
pub use encryption::{decrypt, encrypt};
pub use entropy::EntropySource;
pub use error::WalletError;
pub use keys::{LegacySeed, Seed, derive_legacy_private_key, derive_private_key};
pub use mnemonic::{mnemonic_to_legacy_seed, mnemonic_to_seed, validate_mnemonic};
pub use wallet::{Account, Wallet, derive_accounts, derive_legacy_accounts};
