//! Fixed-width protocol values: block hashes and proof-of-work strings.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::constants::WORK_HEX_LEN;
use crate::error::{BlockError, CryptoError};

/// A 32-byte block hash.
///
/// Used for the previous-block field ("frontier"), the source hash of a
/// receive, and the hash a signature commits to. Rendered as 64 uppercase
/// hex characters, the way the ledger prints hashes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct BlockHash(pub [u8; 32]);

impl BlockHash {
    /// The zero hash. Used as `previous` on an account's first block.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Create a BlockHash from a byte array.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Return the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Check if this is the zero hash.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Display for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode_upper(self.0))
    }
}

impl FromStr for BlockHash {
    type Err = BlockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_hex32(s)
            .map(Self)
            .map_err(|e| BlockError::InvalidHash(e.to_string()))
    }
}

impl From<[u8; 32]> for BlockHash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for BlockHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for BlockHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BlockHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A precomputed proof-of-work value, carried through signing untouched.
///
/// Must be exactly 16 hex characters. The text is kept as supplied so the
/// signed record echoes the caller's value byte for byte.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Work(String);

impl Work {
    /// The work text as supplied.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Work {
    type Err = BlockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != WORK_HEX_LEN || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(BlockError::InvalidWork(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for Work {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Decode exactly 32 bytes from a hex string (either case).
pub fn decode_hex32(s: &str) -> Result<[u8; 32], CryptoError> {
    decode_hex_array(s)
}

/// Decode exactly `N` bytes from a hex string (either case).
pub fn decode_hex_array<const N: usize>(s: &str) -> Result<[u8; N], CryptoError> {
    let bytes = hex::decode(s).map_err(|e| CryptoError::InvalidHex(e.to_string()))?;
    bytes.try_into().map_err(|b: Vec<u8>| CryptoError::InvalidLength {
        expected: N,
        got: b.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRONTIER: &str = "92BA74A7D6DC7557F3EDA95ADC6341D51AC777A0A6FF0688A5C492AB2B2CB40D";

    #[test]
    fn block_hash_display_is_uppercase() {
        let h: BlockHash = FRONTIER.to_lowercase().parse().unwrap();
        assert_eq!(h.to_string(), FRONTIER);
    }

    #[test]
    fn block_hash_zero() {
        assert!(BlockHash::ZERO.is_zero());
        assert_eq!(BlockHash::ZERO.to_string(), "0".repeat(64));
    }

    #[test]
    fn block_hash_rejects_short() {
        let err = FRONTIER[..62].parse::<BlockHash>().unwrap_err();
        assert!(matches!(err, BlockError::InvalidHash(_)));
    }

    #[test]
    fn block_hash_rejects_non_hex() {
        let bad = format!("Z{}", &FRONTIER[1..]);
        assert!(bad.parse::<BlockHash>().is_err());
    }

    #[test]
    fn block_hash_serde_as_string() {
        let h: BlockHash = FRONTIER.parse().unwrap();
        let json = serde_json::to_string(&h).unwrap();
        assert_eq!(json, format!("\"{FRONTIER}\""));
        let back: BlockHash = serde_json::from_str(&json).unwrap();
        assert_eq!(back, h);
    }

    #[test]
    fn work_accepts_16_hex() {
        let w: Work = "c5cf86de24b24419".parse().unwrap();
        assert_eq!(w.as_str(), "c5cf86de24b24419");
    }

    #[test]
    fn work_rejects_bad_length_and_chars() {
        assert!("c5cf86de24b2441".parse::<Work>().is_err());
        assert!("c5cf86de24b24419a".parse::<Work>().is_err());
        assert!("g5cf86de24b24419".parse::<Work>().is_err());
    }

    #[test]
    fn decode_hex_array_length_mismatch() {
        let err = decode_hex_array::<4>("0011").unwrap_err();
        assert_eq!(err, CryptoError::InvalidLength { expected: 4, got: 2 });
    }
}
