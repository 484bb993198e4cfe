//! Account address encoding.
//!
//! An address is a prefix (`nano_` or the legacy `xrb_`) followed by 60
//! characters of a custom base32 alphabet:
//! - 52 characters encoding the 32-byte public key, left-padded with 4 zero
//!   bits to 260 bits.
//! - 8 characters encoding a 5-byte BLAKE2b digest of the public key, byte
//!   order reversed.
//!
//! The alphabet omits `0`, `2`, `l` and `v` to avoid visually ambiguous
//! characters.

use blake2::Blake2b;
use blake2::Digest;
use blake2::digest::consts::U5;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::constants::{
    ADDRESS_CHECKSUM_CHARS, ADDRESS_CHECKSUM_LEN, ADDRESS_KEY_CHARS, AddressPrefix,
};
use crate::error::AddressError;

/// Base32 alphabet for address encoding.
const ALPHABET: &[u8; 32] = b"13456789abcdefghijkmnopqrstuwxyz";

/// Zero bits prepended to the public key so it fills whole 5-bit groups.
const KEY_PAD_BITS: u32 = 4;

/// Encode a public key as an address with the given prefix.
///
/// # Examples
///
/// ```
/// use xno_core::address::derive_address;
/// use xno_core::constants::{AddressPrefix, BURN_ADDRESS};
/// assert_eq!(derive_address(&[0u8; 32], AddressPrefix::Nano), BURN_ADDRESS);
/// ```
pub fn derive_address(public_key: &[u8; 32], prefix: AddressPrefix) -> String {
    let mut out = String::with_capacity(
        prefix.as_str().len() + ADDRESS_KEY_CHARS + ADDRESS_CHECKSUM_CHARS,
    );
    out.push_str(prefix.as_str());
    out.push_str(&encode_base32(public_key, KEY_PAD_BITS));
    out.push_str(&encode_base32(&checksum(public_key), 0));
    out
}

/// Decode the public key from an address.
///
/// Checks the prefix, the length and the alphabet only. The checksum is not
/// verified; use [`validate_address`] or parse an [`Address`] for that.
pub fn address_to_public_key(address: &str) -> Result<[u8; 32], AddressError> {
    let (_, rest) = AddressPrefix::strip(address).ok_or(AddressError::InvalidPrefix)?;
    let expected = ADDRESS_KEY_CHARS + ADDRESS_CHECKSUM_CHARS;
    if let Some(c) = rest.chars().find(|c| alphabet_index(*c).is_none()) {
        return Err(AddressError::InvalidCharacter(c));
    }
    if rest.len() != expected {
        return Err(AddressError::InvalidLength {
            expected,
            got: rest.len(),
        });
    }

    let bytes = decode_base32(&rest[..ADDRESS_KEY_CHARS], KEY_PAD_BITS)?;
    let mut key = [0u8; 32];
    key.copy_from_slice(&bytes);
    Ok(key)
}

/// Check an address: prefix, length, alphabet, checksum and canonical form.
///
/// Returns `false` rather than an error; call [`Address::decode`] to learn
/// which check failed.
pub fn validate_address(address: &str) -> bool {
    Address::decode(address).is_ok()
}

/// A verified account address.
///
/// Constructing one from text checks the checksum and rejects encodings that
/// are not the canonical rendering of their public key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Address {
    public_key: [u8; 32],
    prefix: AddressPrefix,
}

impl Address {
    /// Create an address for a public key.
    pub fn from_public_key(public_key: [u8; 32], prefix: AddressPrefix) -> Self {
        Self { public_key, prefix }
    }

    /// The public key encoded in this address.
    pub fn public_key(&self) -> &[u8; 32] {
        &self.public_key
    }

    /// The prefix this address is rendered with.
    pub fn prefix(&self) -> AddressPrefix {
        self.prefix
    }

    /// The same key rendered with another prefix.
    pub fn with_prefix(self, prefix: AddressPrefix) -> Self {
        Self { prefix, ..self }
    }

    /// Encode as address text.
    pub fn encode(&self) -> String {
        derive_address(&self.public_key, self.prefix)
    }

    /// Parse and fully verify address text.
    pub fn decode(s: &str) -> Result<Self, AddressError> {
        let public_key = address_to_public_key(s)?;
        // address_to_public_key has already checked the prefix and length
        let (prefix, rest) = AddressPrefix::strip(s).ok_or(AddressError::InvalidPrefix)?;

        let embedded = decode_base32(&rest[ADDRESS_KEY_CHARS..], 0)?;
        if embedded.as_slice() != checksum(&public_key).as_slice() {
            return Err(AddressError::InvalidChecksum);
        }

        // Nonzero pad bits in the first character decode to the same key
        if encode_base32(&public_key, KEY_PAD_BITS) != &rest[..ADDRESS_KEY_CHARS] {
            return Err(AddressError::NonCanonical);
        }

        Ok(Self { public_key, prefix })
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::decode(&s).map_err(serde::de::Error::custom)
    }
}

// --- base32 internals ---

/// Reversed 5-byte BLAKE2b digest of the public key.
fn checksum(public_key: &[u8; 32]) -> [u8; ADDRESS_CHECKSUM_LEN] {
    let digest = Blake2b::<U5>::digest(public_key);
    let mut out = [0u8; ADDRESS_CHECKSUM_LEN];
    out.copy_from_slice(&digest);
    out.reverse();
    out
}

fn alphabet_index(c: char) -> Option<u32> {
    ALPHABET.iter().position(|&a| a as char == c).map(|i| i as u32)
}

/// Encode bytes as 5-bit groups, with `pad_bits` zero bits in front.
///
/// Callers pass inputs whose padded bit length is a multiple of 5.
fn encode_base32(data: &[u8], pad_bits: u32) -> String {
    let mut acc: u32 = 0;
    let mut bits: u32 = pad_bits;
    let mut out = String::with_capacity((data.len() * 8 + pad_bits as usize).div_ceil(5));
    for &byte in data {
        acc = (acc << 8) | byte as u32;
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(ALPHABET[((acc >> bits) & 31) as usize] as char);
        }
        acc &= (1 << bits) - 1;
    }
    out
}

/// Decode 5-bit groups back to bytes, dropping `pad_bits` leading bits.
fn decode_base32(s: &str, pad_bits: u32) -> Result<Vec<u8>, AddressError> {
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let mut skip = pad_bits;
    let mut out = Vec::with_capacity((s.len() * 5).saturating_sub(pad_bits as usize) / 8);
    for c in s.chars() {
        let value = alphabet_index(c).ok_or(AddressError::InvalidCharacter(c))?;
        acc = (acc << 5) | value;
        bits += 5;
        if skip > 0 {
            bits -= skip;
            acc &= (1 << bits) - 1;
            skip = 0;
        }
        while bits >= 8 {
            bits -= 8;
            out.push((acc >> bits) as u8);
            acc &= (1 << bits) - 1;
        }
    }
    Ok(out)
}
