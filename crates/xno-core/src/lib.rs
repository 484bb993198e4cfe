//! # xno-core
//! Protocol primitives for Nano: addresses, ed25519-blake2b keys, state
//! block signing and unit conversion. Holds no wallet state.

pub mod address;
pub mod block;
pub mod constants;
pub mod crypto;
pub mod error;
pub mod types;
pub mod units;

pub use address::{Address, address_to_public_key, derive_address, validate_address};
pub use block::{Block, ChangeBlock, ReceiveBlock, SendBlock, SignedBlock, verify_block};
pub use constants::AddressPrefix;
pub use crypto::{KeyPair, PublicKey};
pub use error::{AddressError, BlockError, CryptoError, UnitError};
pub use types::{BlockHash, Work};
