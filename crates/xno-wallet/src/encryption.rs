//! Authenticated messages between two accounts.
//!
//! Both ends convert their ed25519 keys to curve25519 and seal the message
//! with an XSalsa20-Poly1305 box. A fresh nonce is drawn for every message.
//!
//! # Wire format
//! ```text
//! base64( nonce (24 bytes) || box(tag + ciphertext) )
//! ```

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use crypto_box::aead::Aead;
use crypto_box::aead::generic_array::GenericArray;
use crypto_box::{PublicKey, SalsaBox, SecretKey};
use tracing::debug;

use xno_core::address::Address;
use xno_core::crypto::{KeyPair, curve25519_public};

use crate::entropy::{EntropySource, random_bytes};
use crate::error::WalletError;

/// Box nonce length in bytes.
pub const NONCE_LEN: usize = 24;

/// Poly1305 tag length in bytes.
const TAG_LEN: usize = 16;

/// Build the box shared by our private key and the peer's address.
fn shared_box(own_private_key: &[u8; 32], peer_address: &str) -> Result<SalsaBox, WalletError> {
    let peer = Address::decode(peer_address)?;
    let peer_public = PublicKey::from(curve25519_public(peer.public_key())?);
    let own = KeyPair::from_private_key(*own_private_key).to_curve25519();
    let own_secret = SecretKey::from(*own.secret());
    Ok(SalsaBox::new(&peer_public, &own_secret))
}

/// Encrypt `message` from the sender's private key to `recipient_address`.
pub fn encrypt(
    message: &str,
    recipient_address: &str,
    sender_private_key: &[u8; 32],
    source: &mut dyn EntropySource,
) -> Result<String, WalletError> {
    if message.is_empty() {
        return Err(WalletError::EmptyMessage);
    }
    let salsa_box = shared_box(sender_private_key, recipient_address)?;
    let nonce: [u8; NONCE_LEN] = random_bytes(source);

    let sealed = salsa_box
        .encrypt(GenericArray::from_slice(&nonce), message.as_bytes())
        .expect("in-memory box encryption has no failure path");

    let mut full = Vec::with_capacity(NONCE_LEN + sealed.len());
    full.extend_from_slice(&nonce);
    full.extend_from_slice(&sealed);
    debug!(bytes = full.len(), "sealed message");
    Ok(STANDARD.encode(full))
}

/// Open a message produced by [`encrypt`].
///
/// Every failure after the sender address is parsed is reported as
/// [`WalletError::Decryption`] without further detail.
pub fn decrypt(
    encoded: &str,
    sender_address: &str,
    recipient_private_key: &[u8; 32],
) -> Result<String, WalletError> {
    if encoded.is_empty() {
        return Err(WalletError::EmptyMessage);
    }
    let salsa_box = shared_box(recipient_private_key, sender_address)?;

    let full = STANDARD.decode(encoded).map_err(|_| WalletError::Decryption)?;
    if full.len() < NONCE_LEN + TAG_LEN {
        return Err(WalletError::Decryption);
    }
    let (nonce, sealed) = full.split_at(NONCE_LEN);

    let plaintext = salsa_box
        .decrypt(GenericArray::from_slice(nonce), sealed)
        .map_err(|_| WalletError::Decryption)?;
    debug!(bytes = full.len(), "opened message");
    String::from_utf8(plaintext).map_err(|_| WalletError::Decryption)
}
