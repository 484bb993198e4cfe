//! Wallet assembly: seeds, phrases and derived accounts.
//!
//! A [`Wallet`] is a plain value: the phrase (when known), the seed as hex and
//! the accounts derived so far. Every constructor derives account 0. More
//! accounts come from [`derive_accounts`] / [`derive_legacy_accounts`], which
//! are pure functions of seed and index and fan out across the rayon pool for
//! long ranges.

use rayon::prelude::*;
use serde::Serialize;
use std::fmt;
use tracing::debug;

use xno_core::address::derive_address;
use xno_core::crypto::KeyPair;

use crate::config::WalletConfig;
use crate::entropy::{EntropySource, WALLET_ENTROPY_LEN, parse_entropy, random_bytes};
use crate::error::WalletError;
use crate::keys::{
    HARDENED_OFFSET, LegacySeed, Seed, derive_legacy_private_key, derive_private_key,
};
use crate::mnemonic::{
    entropy_to_mnemonic, legacy_seed_to_mnemonic, mnemonic_to_legacy_seed, mnemonic_to_seed,
};

/// One derived account.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    pub account_index: u32,
    #[serde(with = "hex")]
    pub private_key: [u8; 32],
    #[serde(with = "hex")]
    pub public_key: [u8; 32],
    pub address: String,
}

impl Account {
    /// Build the account for a derived private key.
    pub fn from_private_key(account_index: u32, private_key: [u8; 32], config: &WalletConfig) -> Self {
        let public_key = KeyPair::from_private_key(private_key).public_key().to_bytes();
        Self {
            account_index,
            private_key,
            public_key,
            address: derive_address(&public_key, config.prefix),
        }
    }

    /// The signing keypair for this account.
    pub fn keypair(&self) -> KeyPair {
        KeyPair::from_private_key(self.private_key)
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("account_index", &self.account_index)
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// A wallet: optional phrase, seed hex and derived accounts.
///
/// The phrase is absent when the wallet was imported from a hierarchical
/// seed, which cannot be turned back into words.
#[derive(Clone, Serialize)]
pub struct Wallet {
    pub mnemonic: Option<String>,
    pub seed: String,
    pub accounts: Vec<Account>,
}

impl Wallet {
    /// New hierarchical wallet from 32 random bytes.
    pub fn generate(
        source: &mut dyn EntropySource,
        password: &str,
        config: &WalletConfig,
    ) -> Result<Self, WalletError> {
        let entropy: [u8; WALLET_ENTROPY_LEN] = random_bytes(source);
        Self::from_entropy_bytes(&entropy, password, config)
    }

    /// New hierarchical wallet from caller-supplied entropy (64 hex chars).
    pub fn from_entropy(
        entropy_hex: &str,
        password: &str,
        config: &WalletConfig,
    ) -> Result<Self, WalletError> {
        let entropy = parse_entropy(entropy_hex)?;
        Self::from_entropy_bytes(&entropy, password, config)
    }

    fn from_entropy_bytes(
        entropy: &[u8; WALLET_ENTROPY_LEN],
        password: &str,
        config: &WalletConfig,
    ) -> Result<Self, WalletError> {
        let mnemonic = entropy_to_mnemonic(entropy);
        let seed = mnemonic_to_seed(&mnemonic, password)?;
        Self::hierarchical(Some(mnemonic), &seed, config)
    }

    /// Import a hierarchical wallet from its phrase.
    pub fn from_mnemonic(
        phrase: &str,
        password: &str,
        config: &WalletConfig,
    ) -> Result<Self, WalletError> {
        let seed = mnemonic_to_seed(phrase, password)?;
        Self::hierarchical(Some(phrase.to_string()), &seed, config)
    }

    /// Import a hierarchical wallet from its 64-byte seed (128 hex chars).
    pub fn from_seed(seed_hex: &str, config: &WalletConfig) -> Result<Self, WalletError> {
        let seed = Seed::from_hex(seed_hex)?;
        Self::hierarchical(None, &seed, config)
    }

    fn hierarchical(
        mnemonic: Option<String>,
        seed: &Seed,
        config: &WalletConfig,
    ) -> Result<Self, WalletError> {
        let accounts = derive_accounts(seed, 0, 0, config)?;
        debug!(prefix = config.prefix.as_str(), "created hierarchical wallet");
        Ok(Self {
            mnemonic,
            seed: seed.to_hex(),
            accounts,
        })
    }

    /// New legacy wallet from a random 32-byte seed.
    pub fn generate_legacy(source: &mut dyn EntropySource, config: &WalletConfig) -> Self {
        let seed = LegacySeed::from_bytes(random_bytes(source));
        Self::legacy(&seed, config)
    }

    /// Import a legacy wallet from its 32-byte seed (64 hex chars).
    pub fn from_legacy_seed(seed_hex: &str, config: &WalletConfig) -> Result<Self, WalletError> {
        let seed = LegacySeed::from_hex(seed_hex)?;
        Ok(Self::legacy(&seed, config))
    }

    /// Import a legacy wallet from its 24-word phrase.
    pub fn from_legacy_mnemonic(phrase: &str, config: &WalletConfig) -> Result<Self, WalletError> {
        let seed = mnemonic_to_legacy_seed(phrase)?;
        Ok(Self::legacy(&seed, config))
    }

    fn legacy(seed: &LegacySeed, config: &WalletConfig) -> Self {
        let accounts = vec![legacy_account(seed, 0, config)];
        debug!(prefix = config.prefix.as_str(), "created legacy wallet");
        Self {
            mnemonic: Some(legacy_seed_to_mnemonic(seed)),
            seed: seed.to_hex(),
            accounts,
        }
    }
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("mnemonic", &self.mnemonic.as_ref().map(|_| "[REDACTED]"))
            .field("seed", &"[REDACTED]")
            .field("accounts", &self.accounts)
            .finish()
    }
}

/// Derive hierarchical accounts `from..=to`, in index order.
pub fn derive_accounts(
    seed: &Seed,
    from: u32,
    to: u32,
    config: &WalletConfig,
) -> Result<Vec<Account>, WalletError> {
    check_range(from, to)?;
    if to >= HARDENED_OFFSET {
        return Err(WalletError::InvalidAccountIndex(to));
    }
    derive_range(from, to, config, |index| {
        let private_key = derive_private_key(seed, index)?;
        Ok(Account::from_private_key(index, private_key, config))
    })
}

/// Derive legacy accounts `from..=to`, in index order.
pub fn derive_legacy_accounts(
    seed: &LegacySeed,
    from: u32,
    to: u32,
    config: &WalletConfig,
) -> Result<Vec<Account>, WalletError> {
    check_range(from, to)?;
    derive_range(from, to, config, |index| Ok(legacy_account(seed, index, config)))
}

fn legacy_account(seed: &LegacySeed, index: u32, config: &WalletConfig) -> Account {
    Account::from_private_key(index, derive_legacy_private_key(seed, index), config)
}

fn check_range(from: u32, to: u32) -> Result<(), WalletError> {
    if from > to {
        return Err(WalletError::InvalidAccountRange { from, to });
    }
    Ok(())
}

fn derive_range<F>(from: u32, to: u32, config: &WalletConfig, f: F) -> Result<Vec<Account>, WalletError>
where
    F: Fn(u32) -> Result<Account, WalletError> + Sync + Send,
{
    let len = (to - from) as usize + 1;
    let parallel = config.use_parallel(len);
    debug!(from, to, parallel, "deriving accounts");
    if parallel {
        (from..=to).into_par_iter().map(f).collect()
    } else {
        (from..=to).map(f).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::{OsRng, StdRng};

    const PHRASE: &str = "edge defense waste choose enrich upon flee junk siren film clown finish luggage leader kid quick brick print evidence swap drill paddle truly occur";
    const SEED: &str = "0dc285fde768f7ff29b66ce7252d56ed92fe003b605907f7a4f683c3dc8586d34a914d3c71fc099bb38ee4a59e5b081a3497b7a323e90cc68f67b5837690310c";

    fn config() -> WalletConfig {
        WalletConfig::default()
    }

    // --- Constructors ---

    #[test]
    fn generate_has_phrase_and_account_0() {
        let wallet = Wallet::generate(&mut OsRng, "", &config()).unwrap();
        let phrase = wallet.mnemonic.as_deref().unwrap();
        assert_eq!(phrase.split(' ').count(), 24);
        assert_eq!(wallet.seed.len(), 128);
        assert_eq!(wallet.accounts.len(), 1);
        assert_eq!(wallet.accounts[0].account_index, 0);
        assert!(wallet.accounts[0].address.starts_with("nano_"));
    }

    #[test]
    fn generate_is_reproducible_with_seeded_source() {
        let a = Wallet::generate(&mut StdRng::seed_from_u64(1), "", &config()).unwrap();
        let b = Wallet::generate(&mut StdRng::seed_from_u64(1), "", &config()).unwrap();
        assert_eq!(a.seed, b.seed);
        assert_eq!(a.accounts, b.accounts);
    }

    #[test]
    fn from_entropy_known_vector() {
        let wallet = Wallet::from_entropy(
            "6caf5a42bb8074314aae20295975ece663be7aad945a73613d193b0cc41c7970",
            "",
            &config(),
        )
        .unwrap();
        assert_eq!(
            wallet.seed,
            "1accdd4c25e06e47310d0c62c290ec166071d024352e003e5366e8ba6ba523f2a0cb34116ac55a238a886778880a9b2a547112fd7cffade81d8d8d084ccb7d36"
        );
        assert_eq!(
            wallet.accounts[0].address,
            "nano_3chhhgy11k1msxtwdz4wd1i8e83fdkghzo3gpzor5mqyo5mrrjy79zpw1g34"
        );
    }

    #[test]
    fn from_entropy_with_password() {
        let wallet = Wallet::from_entropy(
            "6caf5a42bb8074314aae20295975ece663be7aad945a73613d193b0cc41c7970",
            "some password",
            &config(),
        )
        .unwrap();
        assert!(wallet.mnemonic.as_deref().unwrap().starts_with("hole kiss mouse"));
        assert_eq!(
            wallet.seed,
            "146e3e2a0530848c9174d45ecec8c3f74a7be3f1ee832f92eb6227284121eb2e48a6b8fc469403984cd5e8f0d1ed05777c78f458d0e98c911841590e5d645dc3"
        );
        assert_eq!(
            hex::encode(wallet.accounts[0].public_key),
            "923b6c7e281c1c5529fd2dc848117781216a1753cfd487fc34009f3591e636d7"
        );
        assert_eq!(
            wallet.accounts[0].address,
            "nano_36jufjz4i91wcnnztdgab1aqh1b3fado9mynizy5a16z8payefpqo81zsshc"
        );
    }

    #[test]
    fn from_entropy_rejects_short() {
        assert!(matches!(
            Wallet::from_entropy("abcd", "", &config()).unwrap_err(),
            WalletError::InvalidEntropyLength { .. }
        ));
    }

    #[test]
    fn from_mnemonic_with_password() {
        let wallet = Wallet::from_mnemonic(PHRASE, "some password", &config()).unwrap();
        assert_eq!(wallet.seed, SEED);
        assert_eq!(wallet.mnemonic.as_deref(), Some(PHRASE));
        assert_eq!(
            hex::encode(wallet.accounts[0].private_key),
            "3be4fc2ef3f3b7374e6fc4fb6e7bb153f8a2998b3b3dab50853eabe128024143"
        );
    }

    #[test]
    fn from_seed_has_no_phrase() {
        let wallet = Wallet::from_seed(SEED, &config()).unwrap();
        assert!(wallet.mnemonic.is_none());
        assert_eq!(
            wallet.accounts[0].address,
            "nano_1pu7p5n3ghq1i1p4rhmek41f5add1uh34xpb94nkbxe8g4a6x1p69emk8y1d"
        );
    }

    #[test]
    fn from_seed_rejects_legacy_length() {
        assert!(matches!(
            Wallet::from_seed(&"0".repeat(64), &config()).unwrap_err(),
            WalletError::InvalidSeedLength { expected: 64, .. }
        ));
    }

    #[test]
    fn legacy_from_zero_seed() {
        let wallet = Wallet::from_legacy_seed(&"0".repeat(64), &config()).unwrap();
        assert!(wallet.mnemonic.as_deref().unwrap().ends_with("abandon art"));
        assert_eq!(
            wallet.accounts[0].address,
            "nano_3i1aq1cchnmbn9x5rsbap8b15akfh7wj7pwskuzi7ahz8oq6cobd99d4r3b7"
        );
    }

    #[test]
    fn legacy_generate() {
        let wallet = Wallet::generate_legacy(&mut OsRng, &config());
        assert_eq!(wallet.seed.len(), 64);
        let restored =
            Wallet::from_legacy_mnemonic(wallet.mnemonic.as_deref().unwrap(), &config()).unwrap();
        assert_eq!(restored.seed, wallet.seed);
        assert_eq!(restored.accounts, wallet.accounts);
    }

    #[test]
    fn xrb_prefix_config() {
        let cfg = WalletConfig {
            prefix: xno_core::AddressPrefix::Xrb,
            ..Default::default()
        };
        let wallet = Wallet::from_seed(SEED, &cfg).unwrap();
        assert!(wallet.accounts[0].address.starts_with("xrb_1pu7p5n3"));
    }

    #[test]
    fn wallet_debug_is_redacted() {
        let wallet = Wallet::from_mnemonic(PHRASE, "", &config()).unwrap();
        let debug = format!("{wallet:?}");
        assert!(!debug.contains("edge defense"));
        assert!(!debug.contains(&wallet.seed));
        assert!(!debug.contains(&hex::encode(wallet.accounts[0].private_key)));
    }

    // --- Ranges ---

    #[test]
    fn derive_range_index_14() {
        let seed = Seed::from_hex(SEED).unwrap();
        let accounts = derive_accounts(&seed, 14, 14, &config()).unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(
            accounts[0].address,
            "nano_3ybte61rw3w4da6ox59qqq9b6iqbr6p7rif7dqkshaoykhx64e5dbp4o1ua1"
        );
    }

    #[test]
    fn parallel_matches_sequential() {
        let seed = Seed::from_hex(SEED).unwrap();
        let sequential = WalletConfig {
            parallel_threshold: usize::MAX,
            ..Default::default()
        };
        let parallel = WalletConfig {
            parallel_threshold: 0,
            ..Default::default()
        };
        let a = derive_accounts(&seed, 0, 40, &sequential).unwrap();
        let b = derive_accounts(&seed, 0, 40, &parallel).unwrap();
        assert_eq!(a, b);
        assert!(b.iter().enumerate().all(|(i, acc)| acc.account_index == i as u32));
    }

    #[test]
    fn high_range_length() {
        let seed = Seed::from_hex(SEED).unwrap();
        let accounts = derive_accounts(&seed, 1_000_000_000, 1_000_000_099, &config()).unwrap();
        assert_eq!(accounts.len(), 100);
        assert_eq!(accounts[0].account_index, 1_000_000_000);
        assert_eq!(accounts[99].account_index, 1_000_000_099);
    }

    #[test]
    fn reversed_range_rejected() {
        let seed = Seed::from_hex(SEED).unwrap();
        assert_eq!(
            derive_accounts(&seed, 5, 2, &config()).unwrap_err(),
            WalletError::InvalidAccountRange { from: 5, to: 2 }
        );
    }

    #[test]
    fn hardened_index_rejected() {
        let seed = Seed::from_hex(SEED).unwrap();
        assert_eq!(
            derive_accounts(&seed, 0, HARDENED_OFFSET, &config()).unwrap_err(),
            WalletError::InvalidAccountIndex(HARDENED_OFFSET)
        );
    }

    #[test]
    fn legacy_range() {
        let seed = LegacySeed::from_bytes([0u8; 32]);
        let accounts = derive_legacy_accounts(&seed, 0, 2, &config()).unwrap();
        assert_eq!(accounts.len(), 3);
        assert_eq!(
            accounts[2].address,
            "nano_1dzcca9ycmtx3q79mocmu95zdduxptp3gp5fqkmb1ownscpweggzah8cb4rb"
        );
    }

    #[test]
    fn legacy_range_at_u32_max() {
        let seed = LegacySeed::from_bytes([3u8; 32]);
        let accounts = derive_legacy_accounts(&seed, u32::MAX - 1, u32::MAX, &config()).unwrap();
        assert_eq!(accounts.len(), 2);
    }

    #[test]
    fn account_json_uses_hex() {
        let wallet = Wallet::from_seed(SEED, &config()).unwrap();
        let value = serde_json::to_value(&wallet.accounts[0]).unwrap();
        assert_eq!(
            value["public_key"],
            "5b65b0e8173ee0802c2c3e6c9080d1a16b06de1176c938a924f58670904e82c4"
        );
        assert_eq!(value["account_index"], 0);
    }
}
