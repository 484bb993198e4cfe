//! Ed25519 operations for the ledger.
//!
//! Keys are ed25519 with BLAKE2b-512 as the internal hash in place of
//! SHA-512, both for expanding the 32-byte private key and inside the
//! signature. ed25519-dalek's `hazmat` layer is used to swap the hash.
//!
//! The same private key can be converted to a curve25519 pair for the box
//! construction in the wallet crate. Converted keys are never used to sign.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Blake2b512, Digest};
use curve25519_dalek::edwards::CompressedEdwardsY;
use curve25519_dalek::scalar::clamp_integer;
use ed25519_dalek::hazmat::{ExpandedSecretKey, raw_sign, raw_verify};
use ed25519_dalek::{Signature, VerifyingKey};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::address::derive_address;
use crate::constants::AddressPrefix;
use crate::error::CryptoError;
use crate::types::decode_hex_array;

/// BLAKE2b with a 32-byte digest, the ledger's general-purpose hash.
pub type Blake2b256 = Blake2b<U32>;

/// Ed25519 keypair derived from a 32-byte private key.
///
/// The exposed private key is the 32-byte input, not the expanded secret.
/// Key material is zeroized on drop.
pub struct KeyPair {
    private_key: [u8; 32],
    expanded: ExpandedSecretKey,
    verifying_key: VerifyingKey,
}

impl KeyPair {
    /// Derive the keypair for a 32-byte private key.
    pub fn from_private_key(private_key: [u8; 32]) -> Self {
        let mut hash = blake2b_512(&private_key);
        let expanded = ExpandedSecretKey::from_bytes(&hash);
        hash.zeroize();
        let verifying_key = VerifyingKey::from(&expanded);
        Self {
            private_key,
            expanded,
            verifying_key,
        }
    }

    /// Parse a private key from 64 hex characters.
    pub fn from_private_key_hex(s: &str) -> Result<Self, CryptoError> {
        Ok(Self::from_private_key(decode_hex_array(s)?))
    }

    /// The 32-byte private key. Handle with care.
    pub fn private_key(&self) -> [u8; 32] {
        self.private_key
    }

    /// The public key for this keypair.
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            verifying_key: self.verifying_key,
        }
    }

    /// Sign a message, returning the raw 64-byte signature.
    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        raw_sign::<Blake2b512>(&self.expanded, message, &self.verifying_key).to_bytes()
    }

    /// The curve25519 equivalent of this keypair.
    pub fn to_curve25519(&self) -> CurveKeyPair {
        CurveKeyPair {
            secret: curve25519_secret(&self.private_key),
            // The point came from scalar multiplication, so it decompresses.
            public: self.verifying_key.to_montgomery().to_bytes(),
        }
    }
}

impl Clone for KeyPair {
    fn clone(&self) -> Self {
        Self::from_private_key(self.private_key)
    }
}

impl Drop for KeyPair {
    fn drop(&mut self) {
        self.private_key.zeroize();
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}

/// Ed25519 public key for verifying signatures and deriving addresses.
#[derive(Clone, Copy)]
pub struct PublicKey {
    verifying_key: VerifyingKey,
}

impl PublicKey {
    /// Create a public key from raw bytes (32 bytes).
    ///
    /// Fails if the bytes are not a valid curve point encoding.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, CryptoError> {
        let vk = VerifyingKey::from_bytes(bytes).map_err(|_| CryptoError::InvalidPublicKey)?;
        Ok(Self { verifying_key: vk })
    }

    /// Parse a public key from 64 hex characters.
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        Self::from_bytes(&decode_hex_array(s)?)
    }

    /// Get the raw public key bytes (32 bytes).
    pub fn to_bytes(&self) -> [u8; 32] {
        self.verifying_key.to_bytes()
    }

    /// The account address for this key.
    pub fn to_address(&self, prefix: AddressPrefix) -> String {
        derive_address(&self.to_bytes(), prefix)
    }

    /// Verify a signature on a message.
    pub fn verify(&self, message: &[u8], signature: &[u8; 64]) -> Result<(), CryptoError> {
        let sig = Signature::from_bytes(signature);
        raw_verify::<Blake2b512>(&self.verifying_key, message, &sig)
            .map_err(|_| CryptoError::VerificationFailed)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", hex::encode(self.to_bytes()))
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.to_bytes()))
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for PublicKey {}

impl std::hash::Hash for PublicKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.to_bytes().hash(state);
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(self.to_bytes()))
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// A curve25519 keypair converted from an ed25519 one.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct CurveKeyPair {
    secret: [u8; 32],
    public: [u8; 32],
}

impl CurveKeyPair {
    /// The clamped curve25519 secret scalar.
    pub fn secret(&self) -> &[u8; 32] {
        &self.secret
    }

    /// The Montgomery u-coordinate of the public point.
    pub fn public(&self) -> &[u8; 32] {
        &self.public
    }
}

impl fmt::Debug for CurveKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CurveKeyPair")
            .field("public", &hex::encode(self.public))
            .finish_non_exhaustive()
    }
}

/// Convert an ed25519 private key to its curve25519 secret scalar.
///
/// Uses the same BLAKE2b-512 expansion as signing, so the result pairs with
/// [`curve25519_public`] of the matching public key.
pub fn curve25519_secret(private_key: &[u8; 32]) -> [u8; 32] {
    let mut hash = blake2b_512(private_key);
    let mut lower = [0u8; 32];
    lower.copy_from_slice(&hash[..32]);
    hash.zeroize();
    clamp_integer(lower)
}

/// Convert an ed25519 public key to its curve25519 (Montgomery) form.
pub fn curve25519_public(public_key: &[u8; 32]) -> Result<[u8; 32], CryptoError> {
    let point = CompressedEdwardsY(*public_key)
        .decompress()
        .ok_or(CryptoError::InvalidPublicKey)?;
    Ok(point.to_montgomery().to_bytes())
}

fn blake2b_512(data: &[u8]) -> [u8; 64] {
    let mut out = [0u8; 64];
    out.copy_from_slice(&Blake2b512::digest(data));
    out
}

/// BLAKE2b-256 over the concatenation of `parts`.
pub fn blake2b_256(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Lowercase hex BLAKE2b-256 of the concatenated UTF-8 strings.
pub fn blake2b_hex(parts: &[&str]) -> String {
    let bytes: Vec<&[u8]> = parts.iter().map(|p| p.as_bytes()).collect();
    hex::encode(blake2b_256(&bytes))
}

/// Sign the BLAKE2b-256 hash of the concatenated strings.
///
/// Returns the signature as 128 lowercase hex characters.
pub fn sign_message(keypair: &KeyPair, parts: &[&str]) -> String {
    let bytes: Vec<&[u8]> = parts.iter().map(|p| p.as_bytes()).collect();
    hex::encode(keypair.sign(&blake2b_256(&bytes)))
}

/// Verify a signature produced by [`sign_message`].
///
/// Malformed keys or signatures verify as `false`.
pub fn verify_message(public_key_hex: &str, signature_hex: &str, parts: &[&str]) -> bool {
    let Ok(public_key) = PublicKey::from_hex(public_key_hex) else {
        return false;
    };
    let Ok(signature) = decode_hex_array::<64>(signature_hex) else {
        return false;
    };
    let bytes: Vec<&[u8]> = parts.iter().map(|p| p.as_bytes()).collect();
    public_key.verify(&blake2b_256(&bytes), &signature).is_ok()
}
