//! Wallet error types.

use thiserror::Error;
use xno_core::error::{AddressError, CryptoError};

/// Errors that can occur in wallet operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    /// Supplied entropy has the wrong number of bytes.
    #[error("invalid entropy length: expected {expected} bytes, got {got}")]
    InvalidEntropyLength {
        /// Required length in bytes.
        expected: usize,
        /// Supplied length in bytes.
        got: usize,
    },

    /// Input that should be hex is not.
    #[error("invalid hex encoding: {0}")]
    InvalidHexEncoding(String),

    /// Seed has the wrong number of bytes.
    #[error("invalid seed length: expected {expected} bytes, got {got}")]
    InvalidSeedLength {
        /// Required length in bytes.
        expected: usize,
        /// Supplied length in bytes.
        got: usize,
    },

    /// Invalid BIP-39 mnemonic phrase.
    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    /// Hierarchical account indices must fit below the hardened offset.
    #[error("invalid account index: {0}")]
    InvalidAccountIndex(u32),

    /// Range start is after range end.
    #[error("invalid account range: {from} > {to}")]
    InvalidAccountRange {
        /// First index.
        from: u32,
        /// Last index.
        to: u32,
    },

    /// Nothing to encrypt.
    #[error("message is empty")]
    EmptyMessage,

    /// Box could not be opened. Carries no detail.
    #[error("decryption failed")]
    Decryption,

    /// Address error from xno-core.
    #[error(transparent)]
    Address(#[from] AddressError),

    /// Cryptographic error from xno-core.
    #[error(transparent)]
    Crypto(#[from] CryptoError),
}
