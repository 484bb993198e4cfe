//! BIP-39 mnemonic encoding for both seed schemes.
//!
//! The word encoding is the same for both schemes. They differ in what the
//! phrase stands for:
//! - hierarchical: the phrase is stretched with PBKDF2-HMAC-SHA512 (2048
//!   rounds, salt `"mnemonic" + password`) into a 64-byte [`Seed`].
//! - legacy: the phrase's 32 bytes of entropy *are* the [`LegacySeed`].

use bip39::{Language, Mnemonic};

use crate::error::WalletError;
use crate::keys::{LEGACY_SEED_LEN, LegacySeed, Seed};

/// Convert 32 bytes of entropy to a 24-word mnemonic phrase.
pub fn entropy_to_mnemonic(entropy: &[u8; 32]) -> String {
    let m = Mnemonic::from_entropy_in(Language::English, entropy)
        .expect("32 bytes always produces valid mnemonic");
    m.to_string()
}

/// The 24-word phrase for a legacy seed.
pub fn legacy_seed_to_mnemonic(seed: &LegacySeed) -> String {
    entropy_to_mnemonic(seed.as_bytes())
}

/// Collapse runs of whitespace and lowercase the phrase.
fn normalize(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn parse(phrase: &str) -> Result<Mnemonic, WalletError> {
    Mnemonic::parse_in(Language::English, &normalize(phrase))
        .map_err(|e| WalletError::InvalidMnemonic(e.to_string()))
}

/// Check a phrase: word count, dictionary membership and checksum.
///
/// Accepts 12 to 24 words in steps of 3 (16 to 32 bytes of entropy).
pub fn validate_mnemonic(phrase: &str) -> bool {
    parse(phrase).is_ok()
}

/// Stretch a phrase and optional password into a hierarchical seed.
///
/// Both are NFKD-normalized before PBKDF2.
pub fn mnemonic_to_seed(phrase: &str, password: &str) -> Result<Seed, WalletError> {
    let m = parse(phrase)?;
    Ok(Seed::from_bytes(m.to_seed(password)))
}

/// Recover a legacy seed from its phrase. Only 24-word phrases qualify.
pub fn mnemonic_to_legacy_seed(phrase: &str) -> Result<LegacySeed, WalletError> {
    let m = parse(phrase)?;
    let entropy = m.to_entropy();
    if entropy.len() != LEGACY_SEED_LEN {
        return Err(WalletError::InvalidMnemonic(format!(
            "legacy seed needs {LEGACY_SEED_LEN} bytes of entropy, got {}",
            entropy.len()
        )));
    }
    let mut bytes = [0u8; LEGACY_SEED_LEN];
    bytes.copy_from_slice(&entropy);
    Ok(LegacySeed::from_bytes(bytes))
}
