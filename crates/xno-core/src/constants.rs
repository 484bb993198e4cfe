//! Protocol constants. All monetary values in raw (1 NANO = 10^30 raw).

use serde::{Deserialize, Serialize};

/// Raw units per NANO (also per MRAI).
pub const RAW_PER_NANO: u128 = 1_000_000_000_000_000_000_000_000_000_000;

/// Raw units per KRAI.
pub const RAW_PER_KRAI: u128 = 1_000_000_000_000_000_000_000_000_000;

/// Raw units per RAI.
pub const RAW_PER_RAI: u128 = 1_000_000_000_000_000_000_000_000;

/// Address prefix: current or legacy.
///
/// Both prefixes decode to the same public key. New addresses are rendered
/// with [`AddressPrefix::Nano`] unless configured otherwise.
///
/// # Examples
///
/// ```
/// use xno_core::constants::AddressPrefix;
/// assert_eq!(AddressPrefix::default().as_str(), "nano_");
/// assert_eq!(AddressPrefix::Xrb.as_str(), "xrb_");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressPrefix {
    /// `nano_`
    #[default]
    Nano,
    /// `xrb_`, accepted for backwards compatibility.
    Xrb,
}

impl AddressPrefix {
    /// The prefix text including the trailing underscore.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nano => "nano_",
            Self::Xrb => "xrb_",
        }
    }

    /// Split a known prefix off the front of `address`.
    ///
    /// # Examples
    ///
    /// ```
    /// use xno_core::constants::AddressPrefix;
    /// let (prefix, rest) = AddressPrefix::strip("xrb_1abc").unwrap();
    /// assert_eq!(prefix, AddressPrefix::Xrb);
    /// assert_eq!(rest, "1abc");
    /// assert!(AddressPrefix::strip("ban_1abc").is_none());
    /// ```
    pub fn strip(address: &str) -> Option<(Self, &str)> {
        [Self::Nano, Self::Xrb]
            .into_iter()
            .find_map(|p| address.strip_prefix(p.as_str()).map(|rest| (p, rest)))
    }
}

/// Length of the encoded public key part of an address.
pub const ADDRESS_KEY_CHARS: usize = 52;

/// Length of the encoded checksum part of an address.
pub const ADDRESS_CHECKSUM_CHARS: usize = 8;

/// Checksum digest length in bytes.
pub const ADDRESS_CHECKSUM_LEN: usize = 5;

/// Preamble byte for state blocks, left-padded to 32 bytes in the preimage.
pub const STATE_BLOCK_PREAMBLE: u8 = 0x06;

/// Burn address (all-zero public key). Representative changes are encoded
/// as zero-amount sends to this account.
pub const BURN_ADDRESS: &str = "nano_1111111111111111111111111111111111111111111111111111hifc8npp";

/// Length of an encoded proof-of-work value in hex characters.
pub const WORK_HEX_LEN: usize = 16;

/// Length of a rendered signature in hex characters.
pub const SIGNATURE_HEX_LEN: usize = 128;
