use primitive_types::U256;
use serde::Serialize;

use crate::apy::apy_per_token;
use crate::fixed_point::{amount_serde, value_in_native};
use crate::rewards_pool::{EligibleTotals, RewardProgram, RewardsPools};
use crate::token::{TokenAmounts, TokenSet};

/// Aggregate snapshot surfaced to the display layer. Recomputed on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlobalStats {
    pub eligible_holders: u64,
    pub totals_per_token: TokenAmounts,
    #[serde(with = "amount_serde")]
    pub total_eligible_sum: U256,
    pub rewards_pools: RewardsPools,
    /// Percentage points at ONE scale
    pub apy_per_token: TokenAmounts,
    /// Eligible stake valued in the native token
    pub eligible_value_in_native: TokenAmounts,
}

impl RewardProgram {
    pub fn global_stats(
        &self,
        eligible: &EligibleTotals,
        tokens: &TokenSet,
        eligible_holders: u64,
        prices_in_native: &TokenAmounts,
    ) -> GlobalStats {
        let rewards_pools = self.rewards_pools(eligible, tokens);
        let apy_per_token = apy_per_token(&rewards_pools, eligible.totals(), prices_in_native, tokens);
        let eligible_value_in_native = tokens
            .symbols()
            .map(|s| {
                (
                    s.to_string(),
                    value_in_native(eligible.get(s), prices_in_native.get(s)),
                )
            })
            .collect();
        GlobalStats {
            eligible_holders,
            totals_per_token: eligible.totals().clone(),
            total_eligible_sum: eligible.total_eligible_sum(),
            rewards_pools,
            apy_per_token,
            eligible_value_in_native,
        }
    }
}

/// Stats against the canonical total reward.
pub fn compute_global_stats(
    eligible: &EligibleTotals,
    tokens: &TokenSet,
    eligible_holders: u64,
    prices_in_native: &TokenAmounts,
) -> GlobalStats {
    RewardProgram::default().global_stats(eligible, tokens, eligible_holders, prices_in_native)
}
