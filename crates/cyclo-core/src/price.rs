//! Cross-token price derivation through a common stable intermediary.
//!
//! When no pool pairs a token directly with the native gas token, its native
//! price is composed from two independently fetched quotes:
//!
//! ```text
//! price = target_in_stable × 10^adj / native_in_stable
//! ```
//!
//! `adj` lines the two legs up at 18 decimals. It depends on how much input
//! each leg was quoted with and on the decimals of each leg's input and
//! output tokens, so it is derived per pair from [`LegScale`]s and never
//! assumed to be 18.

use primitive_types::{U256, U512};

use crate::fixed_point::{mul_div, narrow, pow10, ONE};
use crate::FIXED_POINT_DECIMALS;

/// Decimal bookkeeping for one quote leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegScale {
    /// The leg was quoted with 10^input_exponent raw input units
    pub input_exponent: u8,
    pub input_decimals: u8,
    pub output_decimals: u8,
}

impl LegScale {
    /// Quoted with exactly one whole input token (10^decimals raw units).
    pub fn whole_unit(input_decimals: u8, output_decimals: u8) -> Self {
        Self {
            input_exponent: input_decimals,
            input_decimals,
            output_decimals,
        }
    }

    /// Quoted with ONE (10^18) raw input units regardless of input decimals.
    pub fn raw_one(input_decimals: u8, output_decimals: u8) -> Self {
        Self {
            input_exponent: FIXED_POINT_DECIMALS,
            input_decimals,
            output_decimals,
        }
    }

    /// Exponent that turns this leg's raw output into "whole output per whole input".
    fn shift(&self) -> i32 {
        i32::from(self.input_decimals) - i32::from(self.input_exponent) - i32::from(self.output_decimals)
    }

    /// This leg's raw output as an 18-decimal price (whole output per whole input).
    pub fn normalize(&self, amount_out: U256) -> U256 {
        scale_by_pow10(amount_out, i32::from(FIXED_POINT_DECIMALS) + self.shift())
    }
}

/// Exponent for [`derive_native_price`] given both legs' scales.
pub fn decimal_adjustment(target: LegScale, native: LegScale) -> i32 {
    i32::from(FIXED_POINT_DECIMALS) + target.shift() - native.shift()
}

/// Native price of the target token at 18 decimals.
/// A zero native leg yields zero; a negative adjustment divides.
pub fn derive_native_price(
    target_in_stable: U256,
    native_in_stable: U256,
    decimal_adjustment: i32,
) -> U256 {
    if native_in_stable.is_zero() {
        return U256::zero();
    }
    if decimal_adjustment >= 0 {
        mul_div(target_in_stable, pow10(decimal_adjustment as u32), native_in_stable)
    } else {
        let denominator = native_in_stable.full_mul(pow10(decimal_adjustment.unsigned_abs()));
        narrow(U512::from(target_in_stable) / denominator)
    }
}

/// Substitute 1:1 parity (`ONE`) for a leg that could not be quoted.
/// The leg must already be normalized with [`LegScale::normalize`];
/// composing normalized legs uses an adjustment of 18.
pub fn leg_or_parity(leg: Option<U256>) -> U256 {
    leg.unwrap_or(ONE)
}

fn scale_by_pow10(value: U256, exp: i32) -> U256 {
    if exp >= 0 {
        mul_div(value, pow10(exp as u32), U256::one())
    } else {
        value / pow10(exp.unsigned_abs())
    }
}
