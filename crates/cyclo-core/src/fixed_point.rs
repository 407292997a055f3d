// ─────────────────────────────────────────────────────────────────
// Fixed-Point Math - 18-decimal U256 helpers
// ─────────────────────────────────────────────────────────────────
// ONE = 10^18. A value `v` in fixed-point units reads as v / ONE.
// Intermediate products are taken in U512 so `a * b / c` never wraps
// for U256 operands; only the final narrowing can saturate.
// Decimal strings are parsed digit-by-digit, never through f64,
// because 18-decimal balances routinely exceed 2^53.
// ─────────────────────────────────────────────────────────────────

use primitive_types::{U256, U512};

use crate::error::{CoreError, CoreResult};

/// 10^18 (fits the low limb)
pub const ONE: U256 = U256([1_000_000_000_000_000_000, 0, 0, 0]);

/// Largest exponent for which 10^exp fits in a U256
pub const MAX_POW10_EXP: u32 = 77;

/// 10^exp, saturating at U256::MAX past 10^77.
pub fn pow10(exp: u32) -> U256 {
    U256::from(10u8)
        .checked_pow(U256::from(exp))
        .unwrap_or(U256::MAX)
}

/// `a * b / denominator` with a 512-bit intermediate.
/// A zero denominator yields zero rather than panicking.
pub fn mul_div(a: U256, b: U256, denominator: U256) -> U256 {
    if denominator.is_zero() {
        return U256::zero();
    }
    narrow(a.full_mul(b) / U512::from(denominator))
}

/// Narrow a 512-bit result back to U256, saturating on overflow.
pub(crate) fn narrow(value: U512) -> U256 {
    match U256::try_from(value) {
        Ok(v) => v,
        Err(_) => {
            log::warn!("fixed-point result exceeds 256 bits, saturating");
            U256::MAX
        }
    }
}

/// `amount * price / ONE`: value of `amount` expressed in the unit `price` is quoted in.
pub fn value_in_native(amount: U256, price: U256) -> U256 {
    mul_div(amount, price, ONE)
}

/// Parse a subgraph / RPC decimal string into an integer.
/// Accepts only ASCII digits (surrounding whitespace is trimmed).
pub fn parse_amount(input: &str) -> CoreResult<U256> {
    let digits = input.trim();
    if digits.is_empty() {
        return Err(CoreError::invalid_amount(input, "empty"));
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::invalid_amount(input, "not a base-10 integer"));
    }
    U256::from_dec_str(digits).map_err(|_| CoreError::invalid_amount(input, "exceeds 256 bits"))
}

/// Parse human decimal text ("1.5") into raw units with `decimals` places.
/// More fractional digits than `decimals` is an error, not a silent truncation.
pub fn parse_units(input: &str, decimals: u8) -> CoreResult<U256> {
    let text = input.trim();
    let (whole, frac) = match text.split_once('.') {
        Some((w, f)) => (w, f),
        None => (text, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return Err(CoreError::invalid_amount(input, "empty"));
    }
    if frac.len() > decimals as usize {
        return Err(CoreError::invalid_amount(input, "too many fractional digits"));
    }
    let mut digits = String::with_capacity(whole.len() + decimals as usize);
    digits.push_str(if whole.is_empty() { "0" } else { whole });
    digits.push_str(frac);
    for _ in frac.len()..decimals as usize {
        digits.push('0');
    }
    parse_amount(&digits).map_err(|e| match e {
        CoreError::InvalidAmount { reason, .. } => CoreError::invalid_amount(input, reason),
        other => other,
    })
}

/// Render raw units as decimal text with trailing fractional zeros trimmed.
pub fn format_units(value: U256, decimals: u8) -> String {
    let raw = value.to_string();
    let places = decimals as usize;
    if places == 0 {
        return raw;
    }
    let padded = if raw.len() <= places {
        format!("{}{}", "0".repeat(places + 1 - raw.len()), raw)
    } else {
        raw
    };
    let (whole, frac) = padded.split_at(padded.len() - places);
    let frac = frac.trim_end_matches('0');
    if frac.is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, frac)
    }
}

/// Lossy conversion for display-only paths. Precision drops above 2^53.
pub fn to_f64(value: U256) -> f64 {
    value.to_string().parse::<f64>().unwrap_or(f64::MAX)
}

/// Fixed-point value → f64 in whole units. Splits integer and fractional
/// parts so exact whole amounts stay exact.
pub fn fixed_to_f64(value: U256) -> f64 {
    to_f64(value / ONE) + to_f64(value % ONE) / 1e18
}

/// Serde adapter: U256 ↔ decimal string. Deserializes from a string or a
/// non-negative integer (TOML and JSON both hand us either form).
pub mod amount_serde {
    use primitive_types::U256;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(val: &U256, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&val.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<U256, D::Error> {
        use serde::de::{self, Visitor};
        struct U256Visitor;

        impl<'de> Visitor<'de> for U256Visitor {
            type Value = U256;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a non-negative integer as a decimal string or number")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<U256, E> {
                super::parse_amount(v).map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<U256, E> {
                Ok(U256::from(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<U256, E> {
                if v >= 0 {
                    Ok(U256::from(v as u64))
                } else {
                    Err(E::custom("negative value for U256"))
                }
            }
        }

        d.deserialize_any(U256Visitor)
    }
}
