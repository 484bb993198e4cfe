//! Seeds and deterministic private key derivation.
//!
//! Two incompatible schemes are supported and kept apart:
//!
//! - **Hierarchical**: a 64-byte [`Seed`] (PBKDF2 output of a mnemonic) is
//!   expanded with SLIP-0010 ed25519 derivation along the hardened path
//!   `44'/165'/index'`.
//! - **Legacy**: a 32-byte [`LegacySeed`] is hashed together with the index,
//!   `BLAKE2b-256(seed || be32(index))`. No chain code and no hardening.

use hmac::{Hmac, Mac};
use sha2::Sha512;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use xno_core::crypto::blake2b_256;

use crate::entropy::decode_hex_exact;
use crate::error::WalletError;

type HmacSha512 = Hmac<Sha512>;

/// HMAC key for the SLIP-0010 ed25519 master node.
const MASTER_KEY: &[u8] = b"ed25519 seed";

/// Offset marking a path segment as hardened.
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// BIP-44 purpose segment.
pub const PURPOSE: u32 = 44;

/// Registered coin type for Nano.
pub const COIN_TYPE: u32 = 165;

/// Hierarchical seed length in bytes.
pub const SEED_LEN: usize = 64;

/// Legacy seed length in bytes.
pub const LEGACY_SEED_LEN: usize = 32;

/// A 64-byte hierarchical seed.
///
/// Secret material is zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Seed {
    bytes: [u8; SEED_LEN],
}

impl Seed {
    /// Create a seed from raw bytes.
    pub fn from_bytes(bytes: [u8; SEED_LEN]) -> Self {
        Self { bytes }
    }

    /// Parse a seed from 128 hex characters.
    pub fn from_hex(s: &str) -> Result<Self, WalletError> {
        let bytes = decode_hex_exact(s, |got| WalletError::InvalidSeedLength {
            expected: SEED_LEN,
            got,
        })?;
        Ok(Self { bytes })
    }

    /// Get the raw seed bytes. Handle with care.
    pub fn as_bytes(&self) -> &[u8; SEED_LEN] {
        &self.bytes
    }

    /// Lowercase hex of the seed.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Seed")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// A 32-byte legacy seed. Doubles as mnemonic entropy.
///
/// Secret material is zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct LegacySeed {
    bytes: [u8; LEGACY_SEED_LEN],
}

impl LegacySeed {
    /// Create a legacy seed from raw bytes.
    pub fn from_bytes(bytes: [u8; LEGACY_SEED_LEN]) -> Self {
        Self { bytes }
    }

    /// Parse a legacy seed from 64 hex characters.
    pub fn from_hex(s: &str) -> Result<Self, WalletError> {
        let bytes = decode_hex_exact(s, |got| WalletError::InvalidSeedLength {
            expected: LEGACY_SEED_LEN,
            got,
        })?;
        Ok(Self { bytes })
    }

    /// Get the raw seed bytes. Handle with care.
    pub fn as_bytes(&self) -> &[u8; LEGACY_SEED_LEN] {
        &self.bytes
    }

    /// Lowercase hex of the seed.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }
}

impl fmt::Debug for LegacySeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LegacySeed")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Key and chain code at one node of the derivation path.
///
/// Local to a single derivation; each step consumes the parent.
#[derive(Zeroize, ZeroizeOnDrop)]
struct Chain {
    key: [u8; 32],
    chain_code: [u8; 32],
}

impl Chain {
    fn from_hmac(key: &[u8], data: &[&[u8]]) -> Self {
        let mut mac = HmacSha512::new_from_slice(key).expect("HMAC accepts keys of any length");
        for part in data {
            mac.update(part);
        }
        let out = mac.finalize().into_bytes();
        let mut chain = Self {
            key: [0u8; 32],
            chain_code: [0u8; 32],
        };
        chain.key.copy_from_slice(&out[..32]);
        chain.chain_code.copy_from_slice(&out[32..]);
        chain
    }

    fn master(seed: &[u8]) -> Self {
        Self::from_hmac(MASTER_KEY, &[seed])
    }

    /// Hardened child at `segment` (offset added here).
    fn child(self, segment: u32) -> Self {
        let index = (segment | HARDENED_OFFSET).to_be_bytes();
        Self::from_hmac(&self.chain_code, &[&[0u8][..], &self.key[..], &index[..]])
    }
}

/// Derive the private key for account `index` from a hierarchical seed.
///
/// `index` must be below [`HARDENED_OFFSET`].
pub fn derive_private_key(seed: &Seed, index: u32) -> Result<[u8; 32], WalletError> {
    if index >= HARDENED_OFFSET {
        return Err(WalletError::InvalidAccountIndex(index));
    }
    let chain = [PURPOSE, COIN_TYPE, index]
        .into_iter()
        .fold(Chain::master(seed.as_bytes()), Chain::child);
    Ok(chain.key)
}

/// Derive the private key for account `index` from a legacy seed.
pub fn derive_legacy_private_key(seed: &LegacySeed, index: u32) -> [u8; 32] {
    blake2b_256(&[&seed.as_bytes()[..], &index.to_be_bytes()[..]])
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = "0dc285fde768f7ff29b66ce7252d56ed92fe003b605907f7a4f683c3dc8586d34a914d3c71fc099bb38ee4a59e5b081a3497b7a323e90cc68f67b5837690310c";

    fn seed() -> Seed {
        Seed::from_hex(SEED).unwrap()
    }

    // --- Seed ---

    #[test]
    fn seed_hex_roundtrip() {
        assert_eq!(seed().to_hex(), SEED);
    }

    #[test]
    fn seed_wrong_length() {
        assert_eq!(
            Seed::from_hex(&SEED[..64]).unwrap_err(),
            WalletError::InvalidSeedLength {
                expected: 64,
                got: 32
            }
        );
    }

    #[test]
    fn seed_debug_is_redacted() {
        let debug = format!("{:?}", seed());
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains(&SEED[..16]));
    }

    #[test]
    fn legacy_seed_debug_is_redacted() {
        let debug = format!("{:?}", LegacySeed::from_bytes([0xAB; 32]));
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("abab"));
    }

    // --- Hierarchical derivation ---

    #[test]
    fn hd_index_0() {
        assert_eq!(
            hex::encode(derive_private_key(&seed(), 0).unwrap()),
            "3be4fc2ef3f3b7374e6fc4fb6e7bb153f8a2998b3b3dab50853eabe128024143"
        );
    }

    #[test]
    fn hd_index_14() {
        assert_eq!(
            hex::encode(derive_private_key(&seed(), 14).unwrap()),
            "5f12e37c64daf2501c6a6a20614fd8d977fed65b5b5f0b045ec997f2ed2f53ca"
        );
    }

    #[test]
    fn hd_deterministic() {
        assert_eq!(
            derive_private_key(&seed(), 7).unwrap(),
            derive_private_key(&seed(), 7).unwrap()
        );
    }

    #[test]
    fn hd_max_index() {
        assert!(derive_private_key(&seed(), HARDENED_OFFSET - 1).is_ok());
    }

    #[test]
    fn hd_hardened_index_rejected() {
        assert_eq!(
            derive_private_key(&seed(), HARDENED_OFFSET).unwrap_err(),
            WalletError::InvalidAccountIndex(HARDENED_OFFSET)
        );
    }

    // --- Legacy derivation ---

    #[test]
    fn legacy_zero_seed_index_0() {
        let seed = LegacySeed::from_bytes([0u8; 32]);
        assert_eq!(
            hex::encode(derive_legacy_private_key(&seed, 0)),
            "9f0e444c69f77a49bd0be89db92c38fe713e0963165cca12faf5712d7657120f"
        );
    }

    #[test]
    fn legacy_zero_seed_index_2() {
        let seed = LegacySeed::from_bytes([0u8; 32]);
        assert_eq!(
            hex::encode(derive_legacy_private_key(&seed, 2)),
            "6a1804198020b080996ba45b5891f8227d7a4f41c8479824423780d234939d58"
        );
    }

    #[test]
    fn legacy_accepts_any_index() {
        let seed = LegacySeed::from_bytes([1u8; 32]);
        assert_ne!(
            derive_legacy_private_key(&seed, u32::MAX),
            derive_legacy_private_key(&seed, 0)
        );
    }

    #[test]
    fn legacy_seed_hex_parsing() {
        let hex_str = "BE3E51EE51BAB11950B2495013512FEB110D9898B4137DA268709621CE2862F4";
        let seed = LegacySeed::from_hex(hex_str).unwrap();
        assert_eq!(seed.to_hex(), hex_str.to_lowercase());
        assert!(matches!(
            LegacySeed::from_hex("xyz").unwrap_err(),
            WalletError::InvalidHexEncoding(_)
        ));
    }
}
