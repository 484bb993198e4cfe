//! Cross-crate test suite for the xno crates.
//!
//! Integration tests live under `tests/`: published vectors in `vectors.rs`,
//! wallet-to-ledger flows in `flows.rs` and randomized properties in
//! `properties.rs`.

pub mod helpers;
