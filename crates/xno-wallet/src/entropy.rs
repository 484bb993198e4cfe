//! Entropy source and caller-supplied hex validation.
//!
//! Randomness enters the wallet only through [`EntropySource`], supplied by
//! the caller. Any `rand` generator that is a [`CryptoRng`] qualifies, so
//! applications pass `OsRng` and tests pass a seeded `StdRng`.

use rand::{CryptoRng, RngCore};

use crate::error::WalletError;

/// Entropy length accepted when creating a wallet, in bytes.
pub const WALLET_ENTROPY_LEN: usize = 32;

/// A cryptographically secure byte source.
pub trait EntropySource {
    /// Fill `dest` with random bytes.
    fn fill(&mut self, dest: &mut [u8]);
}

impl<R: RngCore + CryptoRng> EntropySource for R {
    fn fill(&mut self, dest: &mut [u8]) {
        self.fill_bytes(dest);
    }
}

/// Draw `N` random bytes.
pub fn random_bytes<const N: usize>(source: &mut dyn EntropySource) -> [u8; N] {
    let mut out = [0u8; N];
    source.fill(&mut out);
    out
}

/// Decode exactly `N` bytes of caller-supplied hex (either case).
///
/// Characters are checked before length, so `"zz"` is a hex error and a
/// short but well-formed string is a length error reported through
/// `length_error(got_bytes)`.
pub(crate) fn decode_hex_exact<const N: usize>(
    s: &str,
    length_error: impl FnOnce(usize) -> WalletError,
) -> Result<[u8; N], WalletError> {
    if let Some(c) = s.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(WalletError::InvalidHexEncoding(format!(
            "unexpected character {c:?}"
        )));
    }
    if s.len() != N * 2 {
        return Err(length_error(s.len() / 2));
    }
    let mut out = [0u8; N];
    hex::decode_to_slice(s, &mut out)
        .map_err(|e| WalletError::InvalidHexEncoding(e.to_string()))?;
    Ok(out)
}

/// Validate caller-supplied wallet entropy: exactly 32 bytes of hex.
pub fn parse_entropy(s: &str) -> Result<[u8; WALLET_ENTROPY_LEN], WalletError> {
    decode_hex_exact(s, |got| WalletError::InvalidEntropyLength {
        expected: WALLET_ENTROPY_LEN,
        got,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::{OsRng, StdRng};

    #[test]
    fn os_rng_is_an_entropy_source() {
        let a: [u8; 32] = random_bytes(&mut OsRng);
        let b: [u8; 32] = random_bytes(&mut OsRng);
        assert_ne!(a, b);
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let a: [u8; 24] = random_bytes(&mut StdRng::seed_from_u64(7));
        let b: [u8; 24] = random_bytes(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn parse_entropy_accepts_64_hex() {
        let hex_str = "6caf5a42bb8074314aae20295975ece663be7aad945a73613d193b0cc41c7970";
        let bytes = parse_entropy(hex_str).unwrap();
        assert_eq!(hex::encode(bytes), hex_str);
        assert_eq!(parse_entropy(&hex_str.to_uppercase()).unwrap(), bytes);
    }

    #[test]
    fn parse_entropy_rejects_short() {
        assert_eq!(
            parse_entropy(&"ab".repeat(16)).unwrap_err(),
            WalletError::InvalidEntropyLength {
                expected: 32,
                got: 16
            }
        );
    }

    #[test]
    fn parse_entropy_rejects_odd_length() {
        assert!(matches!(
            parse_entropy(&"a".repeat(63)).unwrap_err(),
            WalletError::InvalidEntropyLength { .. }
        ));
    }

    #[test]
    fn parse_entropy_rejects_non_hex() {
        let bad = format!("zz{}", "0".repeat(62));
        assert!(matches!(
            parse_entropy(&bad).unwrap_err(),
            WalletError::InvalidHexEncoding(_)
        ));
    }
}
