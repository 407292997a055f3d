// ─────────────────────────────────────────────────────────────────
// Rewards Pool Allocator - Inverse-Fraction Distribution
// ─────────────────────────────────────────────────────────────────
// Total:   TOTAL_REWARD per program period (fixed-point, 10^18)
// Weight:  inverse[t] = total_eligible_sum × ONE / eligible[t]
// Pool:    pool[t]    = inverse[t] × TOTAL_REWARD / Σ inverse
// Effect:  tokens with LESS eligible stake get a LARGER pool, steering
//          new deposits toward under-subscribed tokens.
// Empty:   no stake anywhere → even split, remainder dropped.
//
// No input validation: an entry larger than the sum still produces a
// defined result. Callers own the consistency of EligibleTotals.
// ─────────────────────────────────────────────────────────────────

use primitive_types::U256;

use crate::fixed_point::{fixed_to_f64, mul_div, ONE};
use crate::token::{TokenAmounts, TokenSet};

/// Token symbol → allocated reward (fixed-point, 10^18)
pub type RewardsPools = TokenAmounts;

/// Global eligible stake per token plus the cross-token sum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibleTotals {
    totals: TokenAmounts,
    total_eligible_sum: U256,
}

impl EligibleTotals {
    /// Every configured token gets an explicit entry; tokens missing from
    /// `totals` are recorded as zero.
    pub fn new(tokens: &TokenSet, totals: &TokenAmounts, total_eligible_sum: U256) -> Self {
        let totals = tokens
            .symbols()
            .map(|s| (s.to_string(), totals.get(s)))
            .collect();
        Self {
            totals,
            total_eligible_sum,
        }
    }

    /// Same as `new`, with the sum computed from the entries.
    pub fn from_totals(tokens: &TokenSet, totals: &TokenAmounts) -> Self {
        let mut out = Self::new(tokens, totals, U256::zero());
        out.total_eligible_sum = out.totals.total();
        out
    }

    pub fn get(&self, symbol: &str) -> U256 {
        self.totals.get(symbol)
    }

    pub fn totals(&self) -> &TokenAmounts {
        &self.totals
    }

    pub fn total_eligible_sum(&self) -> U256 {
        self.total_eligible_sum
    }

    /// No stake recorded anywhere: the program has not started.
    pub fn is_empty(&self) -> bool {
        self.total_eligible_sum.is_zero() && self.totals.iter().all(|(_, v)| v.is_zero())
    }

    /// `total_eligible_sum == Σ entries` (only meaningful when every entry
    /// shares one scale).
    pub fn is_consistent(&self) -> bool {
        self.totals.total() == self.total_eligible_sum
    }
}

/// Reward program parameters shared by every allocation path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardProgram {
    total_reward: U256,
}

impl Default for RewardProgram {
    fn default() -> Self {
        Self::new(crate::total_reward())
    }
}

impl RewardProgram {
    pub fn new(total_reward: U256) -> Self {
        Self { total_reward }
    }

    pub fn total_reward(&self) -> U256 {
        self.total_reward
    }

    /// Total reward in whole tokens as f64, for the leaderboard's display policy.
    pub fn total_reward_float(&self) -> f64 {
        fixed_to_f64(self.total_reward)
    }

    /// Allocate the total reward across tokens by inverse eligible fraction.
    pub fn rewards_pools(&self, eligible: &EligibleTotals, tokens: &TokenSet) -> RewardsPools {
        let mut pools = RewardsPools::new();
        if tokens.is_empty() {
            return pools;
        }

        let sum = eligible.total_eligible_sum();
        let inverse: Vec<(&str, U256)> = tokens
            .symbols()
            .map(|symbol| {
                let total = eligible.get(symbol);
                let weight = if total.is_zero() {
                    U256::zero()
                } else {
                    mul_div(sum, ONE, total)
                };
                (symbol, weight)
            })
            .collect();

        let sum_inverse = inverse
            .iter()
            .fold(U256::zero(), |acc, (_, w)| acc.saturating_add(*w));

        if sum_inverse.is_zero() {
            let even = self.total_reward / U256::from(tokens.len());
            log::debug!(
                "no eligible stake across {} tokens, splitting evenly ({} each)",
                tokens.len(),
                even
            );
            for symbol in tokens.symbols() {
                pools.set(symbol, even);
            }
            return pools;
        }

        for (symbol, weight) in inverse {
            pools.set(symbol, mul_div(weight, self.total_reward, sum_inverse));
        }
        pools
    }
}

/// Allocate the canonical total reward (see [`crate::TOTAL_REWARD_RAW`]).
pub fn compute_rewards_pools(eligible: &EligibleTotals, tokens: &TokenSet) -> RewardsPools {
    RewardProgram::default().rewards_pools(eligible, tokens)
}
