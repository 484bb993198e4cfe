//! Conversion between raw and the named denominations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{RAW_PER_KRAI, RAW_PER_NANO, RAW_PER_RAI};
use crate::error::UnitError;

/// A denomination. `Nano` and `Mrai` are the same size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Unit {
    Raw,
    Nano,
    Krai,
    Mrai,
    Rai,
}

impl Unit {
    /// Raw units in one of this unit.
    pub fn raw_per_unit(&self) -> u128 {
        match self {
            Unit::Raw => 1,
            Unit::Nano | Unit::Mrai => RAW_PER_NANO,
            Unit::Krai => RAW_PER_KRAI,
            Unit::Rai => RAW_PER_RAI,
        }
    }

    /// Decimal places between this unit and raw.
    pub fn decimals(&self) -> usize {
        match self {
            Unit::Raw => 0,
            Unit::Nano | Unit::Mrai => 30,
            Unit::Krai => 27,
            Unit::Rai => 24,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Unit::Raw => "RAW",
            Unit::Nano => "NANO",
            Unit::Krai => "KRAI",
            Unit::Mrai => "MRAI",
            Unit::Rai => "RAI",
        };
        f.write_str(name)
    }
}

impl FromStr for Unit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "RAW" => Ok(Unit::Raw),
            "NANO" => Ok(Unit::Nano),
            "KRAI" => Ok(Unit::Krai),
            "MRAI" => Ok(Unit::Mrai),
            "RAI" => Ok(Unit::Rai),
            _ => Err(UnitError::UnknownUnit(s.to_string())),
        }
    }
}

/// Parse a decimal amount in `unit` to raw.
///
/// Digits beyond the unit's decimal places are below one raw and are
/// dropped.
pub fn to_raw(amount: &str, unit: Unit) -> Result<u128, UnitError> {
    let invalid = || UnitError::InvalidAmount(amount.to_string());
    let (whole, fraction) = amount.split_once('.').unwrap_or((amount, ""));
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let whole_raw = if whole.is_empty() {
        0
    } else {
        whole
            .parse::<u128>()
            .map_err(|_| UnitError::Overflow)?
            .checked_mul(unit.raw_per_unit())
            .ok_or(UnitError::Overflow)?
    };

    let decimals = unit.decimals();
    let kept = &fraction[..fraction.len().min(decimals)];
    let fraction_raw = if kept.is_empty() {
        0
    } else {
        // At most 30 digits, always below one unit
        let padded = format!("{kept:0<decimals$}");
        padded.parse::<u128>().map_err(|_| invalid())?
    };

    whole_raw.checked_add(fraction_raw).ok_or(UnitError::Overflow)
}

/// Render a raw amount in `unit`.
///
/// Raw renders as an integer. Other units render with all of their decimal
/// places, e.g. `1.000000000000000000000000000000` for one NANO.
pub fn from_raw(raw: u128, unit: Unit) -> String {
    if unit == Unit::Raw {
        return raw.to_string();
    }
    let scale = unit.raw_per_unit();
    let decimals = unit.decimals();
    format!("{}.{:0>decimals$}", raw / scale, raw % scale)
}

/// Convert a decimal amount between units.
///
/// # Examples
///
/// ```
/// use xno_core::units::{Unit, convert};
/// assert_eq!(
///     convert("1", Unit::Nano, Unit::Raw).unwrap(),
///     "1000000000000000000000000000000"
/// );
/// ```
pub fn convert(amount: &str, from: Unit, to: Unit) -> Result<String, UnitError> {
    Ok(from_raw(to_raw(amount, from)?, to))
}
