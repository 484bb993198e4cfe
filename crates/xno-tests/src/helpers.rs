//! Shared fixtures for the integration tests.

use xno_core::block::{ReceiveBlock, SendBlock};
use xno_core::{Address, BlockHash};
use xno_wallet::config::WalletConfig;
use xno_wallet::keys::Seed;
use xno_wallet::wallet::{Account, derive_accounts};

/// Seed from the published key-management vectors.
pub const VECTOR_SEED: &str = "0dc285fde768f7ff29b66ce7252d56ed92fe003b605907f7a4f683c3dc8586d34a914d3c71fc099bb38ee4a59e5b081a3497b7a323e90cc68f67b5837690310c";

/// Phrase that, with password "some password", yields [`VECTOR_SEED`].
pub const VECTOR_PHRASE: &str = "edge defense waste choose enrich upon flee junk siren film clown finish luggage leader kid quick brick print evidence swap drill paddle truly occur";

/// One whole NANO in raw.
pub const ONE_NANO: u128 = 1_000_000_000_000_000_000_000_000_000_000;

/// Accounts `0..count` of a seed filled with `fill`.
pub fn accounts(fill: u8, count: u32) -> Vec<Account> {
    derive_accounts(&Seed::from_bytes([fill; 64]), 0, count - 1, &WalletConfig::default())
        .expect("small indices are valid")
}

/// Parse an account's address.
pub fn address(account: &Account) -> Address {
    account.address.parse().expect("derived addresses are canonical")
}

/// A send of `amount_raw` from `from` to `to` with the sender as its own
/// representative.
pub fn make_send(
    from: &Account,
    to: &Account,
    balance: u128,
    amount_raw: u128,
    frontier: BlockHash,
) -> SendBlock {
    SendBlock {
        wallet_balance_raw: balance,
        from_address: address(from),
        to_address: address(to),
        representative_address: address(from),
        frontier,
        amount_raw,
        work: None,
    }
}

/// A receive of `amount_raw` into `to` for the send with hash `source`.
pub fn make_receive(
    to: &Account,
    balance: u128,
    amount_raw: u128,
    frontier: BlockHash,
    source: BlockHash,
) -> ReceiveBlock {
    ReceiveBlock {
        wallet_balance_raw: balance,
        to_address: address(to),
        representative_address: address(to),
        frontier,
        transaction_hash: source,
        amount_raw,
        work: None,
    }
}
