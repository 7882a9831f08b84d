//! Monetary Amount Value Object
//!
//! Every amount that enters the ledger passes through [`convert_amount`],
//! which turns loosely typed numeric input into a fixed-point decimal with
//! exactly [`AMOUNT_SCALE`] fractional digits.
//!
//! ## Conversion rules
//! - Integers are whole currency units: `1000` becomes `1000.00`
//! - Floats are expanded exactly and truncated toward zero at the
//!   hundredths: `1500.999` becomes `1500.99`, `0.0099` becomes `0.00`
//! - Anything else is rejected as an unsupported type
//!
//! Stored balances are already decimals and are never converted again.

use derive_more::Display;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// Constants
// ============================================================================

/// Number of fractional digits carried by every amount and balance
pub const AMOUNT_SCALE: u32 = 2;

/// Smallest amount accepted by deposit, withdrawal and transfer (`0.01`)
pub const MINIMUM_AMOUNT: Decimal = Decimal::from_parts(1, 0, 0, false, AMOUNT_SCALE);

/// Zero at the ledger scale (`0.00`)
pub const ZERO_BALANCE: Decimal = Decimal::from_parts(0, 0, 0, false, AMOUNT_SCALE);

// ============================================================================
// Raw input
// ============================================================================

/// Unconverted amount as supplied by a caller
#[derive(Debug, Clone, PartialEq)]
pub enum RawAmount {
    /// Whole currency units
    Integer(i128),
    /// Fractional value, truncated at the hundredths on conversion
    Float(f64),
    /// Input that is neither an integer nor a float
    Unsupported { found: String },
}

impl RawAmount {
    fn unsupported(found: impl Into<String>) -> Self {
        Self::Unsupported {
            found: found.into(),
        }
    }
}

macro_rules! raw_amount_from_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for RawAmount {
                fn from(value: $ty) -> Self {
                    RawAmount::Integer(i128::from(value))
                }
            }
        )*
    };
}

raw_amount_from_integer!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

impl From<usize> for RawAmount {
    fn from(value: usize) -> Self {
        match i128::try_from(value) {
            Ok(value) => RawAmount::Integer(value),
            Err(_) => RawAmount::unsupported("usize"),
        }
    }
}

impl From<f64> for RawAmount {
    fn from(value: f64) -> Self {
        RawAmount::Float(value)
    }
}

impl From<f32> for RawAmount {
    fn from(value: f32) -> Self {
        RawAmount::Float(f64::from(value))
    }
}

impl From<&str> for RawAmount {
    fn from(_: &str) -> Self {
        RawAmount::unsupported("string")
    }
}

impl From<String> for RawAmount {
    fn from(_: String) -> Self {
        RawAmount::unsupported("string")
    }
}

impl From<bool> for RawAmount {
    fn from(_: bool) -> Self {
        RawAmount::unsupported("bool")
    }
}

impl From<&serde_json::Value> for RawAmount {
    fn from(value: &serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Number(number) => {
                if let Some(int) = number.as_i64() {
                    RawAmount::Integer(i128::from(int))
                } else if let Some(int) = number.as_u64() {
                    RawAmount::Integer(i128::from(int))
                } else if let Some(float) = number.as_f64() {
                    RawAmount::Float(float)
                } else {
                    RawAmount::unsupported("number")
                }
            }
            Value::Null => RawAmount::unsupported("null"),
            Value::Bool(_) => RawAmount::unsupported("bool"),
            Value::String(_) => RawAmount::unsupported("string"),
            Value::Array(_) => RawAmount::unsupported("array"),
            Value::Object(_) => RawAmount::unsupported("object"),
        }
    }
}

impl From<serde_json::Value> for RawAmount {
    fn from(value: serde_json::Value) -> Self {
        RawAmount::from(&value)
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Error returned when an amount cannot be accepted
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AmountError {
    #[error("`amount` has to be an integer or a float, got {found}")]
    UnsupportedType { found: String },

    #[error("`amount` has to be a finite number, got {value}")]
    NonFinite { value: f64 },

    #[error("`amount` is too large to be represented with {} decimal places", AMOUNT_SCALE)]
    OutOfRange,

    #[error("amount {amount} is below the minimum of {}", MINIMUM_AMOUNT)]
    BelowMinimum { amount: Decimal },
}

// ============================================================================
// Conversion
// ============================================================================

/// Normalize raw input into a decimal with exactly two fractional digits
///
/// No minimum is enforced here; see [`Amount::new`].
pub fn convert_amount(amount: impl Into<RawAmount>) -> Result<Decimal, AmountError> {
    let value = match amount.into() {
        RawAmount::Integer(units) => Decimal::from_i128(units).ok_or(AmountError::OutOfRange)?,
        RawAmount::Float(float) => {
            if !float.is_finite() {
                return Err(AmountError::NonFinite { value: float });
            }
            Decimal::from_f64_retain(float)
                .ok_or(AmountError::OutOfRange)?
                .round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::ToZero)
        }
        RawAmount::Unsupported { found } => {
            return Err(AmountError::UnsupportedType { found });
        }
    };

    at_ledger_scale(value).ok_or(AmountError::OutOfRange)
}

/// Bring a value to exactly [`AMOUNT_SCALE`] fractional digits
///
/// `rust_decimal` absorbs mantissa overflow by dropping scale, both in
/// `rescale` and in checked arithmetic. A result that cannot carry two
/// places is reported as `None`.
pub(crate) fn at_ledger_scale(mut value: Decimal) -> Option<Decimal> {
    value.rescale(AMOUNT_SCALE);
    (value.scale() == AMOUNT_SCALE).then_some(value)
}

// ============================================================================
// Amount Value Object
// ============================================================================

/// Validated monetary amount
///
/// # Invariants
/// - Scale is exactly [`AMOUNT_SCALE`]
/// - Value is at least [`MINIMUM_AMOUNT`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    /// Convert raw input and enforce the minimum
    pub fn new(amount: impl Into<RawAmount>) -> Result<Self, AmountError> {
        let value = convert_amount(amount)?;
        if value < MINIMUM_AMOUNT {
            return Err(AmountError::BelowMinimum { amount: value });
        }
        Ok(Self(value))
    }

    #[inline]
    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

// ============================================================================
// Operation context
// ============================================================================

/// Balance-moving operation an amount was supplied for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum MoneyOperation {
    #[display("deposit")]
    Deposit,
    #[display("withdrawal")]
    Withdrawal,
    #[display("transaction")]
    Transaction,
}

impl MoneyOperation {
    /// Which account's balance bounds this operation
    pub const fn balance_owner(&self) -> &'static str {
        match self {
            Self::Transaction => "sender account",
            Self::Deposit | Self::Withdrawal => "account",
        }
    }
}
