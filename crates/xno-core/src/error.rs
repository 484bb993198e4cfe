//! Error types for the xno protocol primitives.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("unknown address prefix")] InvalidPrefix,
    #[error("invalid length: expected {expected} characters after the prefix, got {got}")] InvalidLength { expected: usize, got: usize },
    #[error("invalid character: {0}")] InvalidCharacter(char),
    #[error("invalid checksum")] InvalidChecksum,
    #[error("non-canonical encoding")] NonCanonical,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("invalid public key bytes")] InvalidPublicKey,
    #[error("signature verification failed")] VerificationFailed,
    #[error("invalid hex: {0}")] InvalidHex(String),
    #[error("invalid length: expected {expected} bytes, got {got}")] InvalidLength { expected: usize, got: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlockError {
    #[error("balance underflow: have {balance}, sending {amount}")] BalanceUnderflow { balance: u128, amount: u128 },
    #[error("balance overflow: have {balance}, receiving {amount}")] BalanceOverflow { balance: u128, amount: u128 },
    #[error("invalid block hash: {0}")] InvalidHash(String),
    #[error("invalid work value: {0}")] InvalidWork(String),
    #[error("invalid balance: {0}")] InvalidBalance(String),
    #[error(transparent)] Address(#[from] AddressError),
    #[error(transparent)] Crypto(#[from] CryptoError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnitError {
    #[error("unknown unit: {0}")] UnknownUnit(String),
    #[error("invalid amount: {0}")] InvalidAmount(String),
    #[error("amount exceeds 128 bits of raw")] Overflow,
}
