// ─────────────────────────────────────────────────────────────────
// APY Estimator
// ─────────────────────────────────────────────────────────────────
// apy = reward_pool × 12 × 100 × ONE × ONE / (total_eligible × price_in_native)
//
// - reward_pool is a monthly distribution (× 12 → annual)
// - × 100 turns the ratio into percentage points
// - total_eligible and price_in_native each carry one ONE, so two ONE
//   factors in the numerator leave the result at a single ONE scale:
//   apy / ONE reads as percentage points.
// Zero denominator → 0, never a panic.
// ─────────────────────────────────────────────────────────────────

use primitive_types::{U256, U512};

use crate::fixed_point::{fixed_to_f64, narrow, ONE};
use crate::rewards_pool::RewardsPools;
use crate::token::{TokenAmounts, TokenSet};
use crate::{MONTHS_PER_YEAR, PERCENT};

pub fn compute_apy(reward_pool: U256, total_eligible: U256, price_in_native: U256) -> U256 {
    let denominator = total_eligible.full_mul(price_in_native);
    if denominator.is_zero() {
        return U256::zero();
    }
    // pool < 2^256, ONE² < 2^120, 1200 < 2^11: the product stays below 2^512
    let numerator =
        reward_pool.full_mul(ONE * ONE) * U512::from(MONTHS_PER_YEAR * PERCENT);
    narrow(numerator / denominator)
}

/// APY in percentage points as f64, for display.
pub fn apy_percent(apy: U256) -> f64 {
    fixed_to_f64(apy)
}

/// APY for every token given pools, eligible totals and native prices.
/// Tokens without a price read as zero price and therefore zero APY.
pub fn apy_per_token(
    pools: &RewardsPools,
    eligible: &TokenAmounts,
    prices_in_native: &TokenAmounts,
    tokens: &TokenSet,
) -> TokenAmounts {
    tokens
        .symbols()
        .map(|s| {
            (
                s.to_string(),
                compute_apy(pools.get(s), eligible.get(s), prices_in_native.get(s)),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ones(n: u64) -> U256 {
        U256::from(n) * ONE
    }

    #[test]
    fn test_zero_guard() {
        assert_eq!(compute_apy(ones(1000), U256::zero(), ONE), U256::zero());
        assert_eq!(compute_apy(ones(1000), ones(10), U256::zero()), U256::zero());
        assert_eq!(compute_apy(U256::zero(), ones(10), ONE), U256::zero());
    }

    #[test]
    fn test_monthly_pool_annualized() {
        // 1,000 reward per month on 100,000 stake priced at 1:1
        // → 1% per month → 12% per year
        let apy = compute_apy(ones(1_000), ones(100_000), ONE);
        assert_eq!(apy, ones(12));
        assert_eq!(apy_percent(apy), 12.0);
    }

    #[test]
    fn test_price_scales_apy_inversely() {
        let at_par = compute_apy(ones(500), ones(10_000), ONE);
        let at_double = compute_apy(ones(500), ones(10_000), ONE * 2);
        assert_eq!(at_par, ones(60));
        assert_eq!(at_double, ones(30));
    }

    #[test]
    fn test_large_pool_does_not_wrap() {
        // pool × ONE² overflows U256; the U512 intermediate keeps it exact
        let pool = U256::from(1_500_000u64) * ONE;
        let apy = compute_apy(pool, ones(1), ONE);
        assert_eq!(apy, pool * 1200);
    }

    #[test]
    fn test_saturates_instead_of_panicking() {
        let apy = compute_apy(U256::MAX, U256::one(), U256::one());
        assert_eq!(apy, U256::MAX);
    }

    #[test]
    fn test_apy_per_token_missing_price() {
        let tokens = TokenSet::new(vec![
            crate::Token::new("cysFLR", 18, "0x01"),
            crate::Token::new("cyWETH", 18, "0x02"),
        ])
        .unwrap();
        let mut pools = TokenAmounts::new();
        pools.set("cysFLR", ones(1_000));
        pools.set("cyWETH", ones(1_000));
        let mut eligible = TokenAmounts::new();
        eligible.set("cysFLR", ones(100_000));
        eligible.set("cyWETH", ones(100_000));
        let mut prices = TokenAmounts::new();
        prices.set("cysFLR", ONE);

        let apy = apy_per_token(&pools, &eligible, &prices, &tokens);
        assert_eq!(apy.get("cysFLR"), ones(12));
        assert_eq!(apy.get("cyWETH"), U256::zero());
    }
}
