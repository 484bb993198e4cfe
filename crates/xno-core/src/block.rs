//! State block construction and signing.
//!
//! Every transaction is a state block. The signed preimage is a fixed-width
//! concatenation:
//!
//! | field          | bytes | notes                                   |
//! |----------------|-------|-----------------------------------------|
//! | preamble       | 32    | `0x06` left-padded with zeros           |
//! | account        | 32    | signer's public key                     |
//! | previous       | 32    | frontier hash, zero for the first block |
//! | representative | 32    | representative's public key             |
//! | balance        | 16    | resulting balance, big-endian u128      |
//! | link           | 32    | recipient key / source hash / zero      |
//!
//! The block hash is BLAKE2b-256 of the preimage and the signature covers
//! that hash.
//!
//! A representative change is a zero-amount send to the burn address. Its
//! link is therefore the all-zero key.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::address::Address;
use crate::constants::{AddressPrefix, STATE_BLOCK_PREAMBLE};
use crate::crypto::{KeyPair, PublicKey, blake2b_256};
use crate::error::{BlockError, CryptoError};
use crate::types::{BlockHash, Work};

/// Length of the signed preimage in bytes.
pub const PREIMAGE_LEN: usize = 32 * 5 + 16;

/// Parse a raw amount from its decimal string.
pub fn parse_raw(s: &str) -> Result<u128, BlockError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(BlockError::InvalidBalance(s.to_string()));
    }
    s.parse().map_err(|_| BlockError::InvalidBalance(s.to_string()))
}

/// Send funds from `from_address` to `to_address`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SendBlock {
    /// Balance before this block, in raw.
    pub wallet_balance_raw: u128,
    pub from_address: Address,
    pub to_address: Address,
    pub representative_address: Address,
    /// Hash of the account's latest block.
    pub frontier: BlockHash,
    pub amount_raw: u128,
    pub work: Option<Work>,
}

/// Receive a pending send into `to_address`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReceiveBlock {
    pub wallet_balance_raw: u128,
    pub to_address: Address,
    pub representative_address: Address,
    /// Zero when opening the account.
    pub frontier: BlockHash,
    /// Hash of the pending send being received.
    pub transaction_hash: BlockHash,
    pub amount_raw: u128,
    pub work: Option<Work>,
}

/// Change the representative of `address`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChangeBlock {
    pub wallet_balance_raw: u128,
    pub address: Address,
    pub representative_address: Address,
    pub frontier: BlockHash,
    pub work: Option<Work>,
}

impl From<ChangeBlock> for SendBlock {
    fn from(change: ChangeBlock) -> Self {
        Self {
            wallet_balance_raw: change.wallet_balance_raw,
            from_address: change.address,
            to_address: burn_address(),
            representative_address: change.representative_address,
            frontier: change.frontier,
            amount_raw: 0,
            work: change.work,
        }
    }
}

/// The burn address as an [`Address`].
fn burn_address() -> Address {
    Address::from_public_key([0u8; 32], AddressPrefix::Nano)
}

/// A block to be signed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    Send(SendBlock),
    Receive(ReceiveBlock),
    Change(ChangeBlock),
}

impl Block {
    /// Build the canonical fields and sign them.
    ///
    /// The key is not checked against the block's account; a mismatched key
    /// yields a block the ledger will reject.
    pub fn sign(&self, keypair: &KeyPair) -> Result<SignedBlock, BlockError> {
        match self {
            Block::Send(send) => sign_send(send, keypair),
            Block::Receive(receive) => {
                let balance = receive
                    .wallet_balance_raw
                    .checked_add(receive.amount_raw)
                    .ok_or(BlockError::BalanceOverflow {
                        balance: receive.wallet_balance_raw,
                        amount: receive.amount_raw,
                    })?;
                Ok(SignedBlock::sign(
                    receive.to_address,
                    receive.frontier,
                    receive.representative_address,
                    balance,
                    *receive.transaction_hash.as_bytes(),
                    receive.work.as_ref(),
                    keypair,
                ))
            }
            Block::Change(change) => sign_send(&SendBlock::from(change.clone()), keypair),
        }
    }
}

fn sign_send(send: &SendBlock, keypair: &KeyPair) -> Result<SignedBlock, BlockError> {
    let balance = send
        .wallet_balance_raw
        .checked_sub(send.amount_raw)
        .ok_or(BlockError::BalanceUnderflow {
            balance: send.wallet_balance_raw,
            amount: send.amount_raw,
        })?;
    Ok(SignedBlock::sign(
        send.from_address,
        send.frontier,
        send.representative_address,
        balance,
        *send.to_address.public_key(),
        send.work.as_ref(),
        keypair,
    ))
}

/// Block type tag. Only state blocks are produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    #[default]
    State,
}

/// A signed state block, ready for the ledger's block-processing call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedBlock {
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub account: Address,
    pub previous: BlockHash,
    pub representative: Address,
    #[serde(with = "raw_string")]
    pub balance: u128,
    pub link: BlockHash,
    #[serde(with = "signature_hex")]
    pub signature: [u8; 64],
    /// Proof of work as supplied, or empty.
    pub work: String,
}

impl SignedBlock {
    fn sign(
        account: Address,
        previous: BlockHash,
        representative: Address,
        balance: u128,
        link: [u8; 32],
        work: Option<&Work>,
        keypair: &KeyPair,
    ) -> Self {
        let mut block = Self {
            block_type: BlockType::State,
            account,
            previous,
            representative,
            balance,
            link: BlockHash(link),
            signature: [0u8; 64],
            work: work.map(|w| w.as_str().to_string()).unwrap_or_default(),
        };
        block.signature = keypair.sign(block.hash().as_bytes());
        block
    }

    /// The canonical preimage of this block.
    pub fn preimage(&self) -> [u8; PREIMAGE_LEN] {
        let mut out = [0u8; PREIMAGE_LEN];
        out[31] = STATE_BLOCK_PREAMBLE;
        out[32..64].copy_from_slice(self.account.public_key());
        out[64..96].copy_from_slice(self.previous.as_bytes());
        out[96..128].copy_from_slice(self.representative.public_key());
        out[128..144].copy_from_slice(&self.balance.to_be_bytes());
        out[144..176].copy_from_slice(self.link.as_bytes());
        out
    }

    /// BLAKE2b-256 of the preimage.
    pub fn hash(&self) -> BlockHash {
        BlockHash(blake2b_256(&[&self.preimage()[..]]))
    }

    /// Signature as 128 uppercase hex characters.
    pub fn signature_hex(&self) -> String {
        hex::encode_upper(self.signature)
    }

    /// Verify the signature against the block's own account key.
    pub fn verify(&self) -> Result<(), BlockError> {
        verify_block(self.account.public_key(), self)
    }
}

/// Verify a signed block against `public_key`.
pub fn verify_block(public_key: &[u8; 32], block: &SignedBlock) -> Result<(), BlockError> {
    let public_key = PublicKey::from_bytes(public_key)?;
    public_key.verify(block.hash().as_bytes(), &block.signature)?;
    Ok(())
}

mod raw_string {
    use super::*;

    pub fn serialize<S: Serializer>(value: &u128, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_raw(&s).map_err(serde::de::Error::custom)
    }
}

mod signature_hex {
    use super::*;
    use crate::types::decode_hex_array;

    pub fn serialize<S: Serializer>(value: &[u8; 64], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode_upper(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[u8; 64], D::Error> {
        let s = String::deserialize(deserializer)?;
        decode_hex_array::<64>(&s)
            .map_err(|_: CryptoError| serde::de::Error::custom("invalid signature hex"))
    }
}
