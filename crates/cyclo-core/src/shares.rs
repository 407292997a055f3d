//! Per-account share of each token's reward pool.
//!
//! `percentage_share` is a fraction of ONE. It is deliberately NOT clamped:
//! a share above ONE means the account's balance exceeds the token's eligible
//! total, which is an upstream data-integrity problem that should stay visible.

use primitive_types::U256;
use std::collections::BTreeMap;

use crate::fixed_point::{fixed_to_f64, mul_div, ONE};
use crate::rewards_pool::{EligibleTotals, RewardProgram};
use crate::token::TokenSet;

/// One account's position in one token's vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountVaultBalance {
    pub token_symbol: String,
    /// Account balance, token scale
    pub balance: U256,
    /// Token's total eligible stake, same scale
    pub total_eligible: U256,
}

impl AccountVaultBalance {
    pub fn new(token_symbol: &str, balance: U256, total_eligible: U256) -> Self {
        Self {
            token_symbol: token_symbol.to_string(),
            balance,
            total_eligible,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenShare {
    /// Fraction of ONE
    pub percentage_share: U256,
    /// Fixed-point reward amount
    pub rewards_amount: U256,
}

impl TokenShare {
    /// Share above 100%: balance exceeds the eligible total.
    pub fn exceeds_one(&self) -> bool {
        self.percentage_share > ONE
    }

    /// Share in percentage points, for display.
    pub fn percent(&self) -> f64 {
        fixed_to_f64(self.percentage_share) * 100.0
    }
}

/// Per-token shares for one account plus the summed reward.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Shares {
    per_token: BTreeMap<String, TokenShare>,
    total_rewards: U256,
}

impl Shares {
    /// All-zero shares: the "rewards program not yet initialized" result.
    pub fn zeroed(tokens: &TokenSet) -> Self {
        Self {
            per_token: tokens
                .symbols()
                .map(|s| (s.to_string(), TokenShare::default()))
                .collect(),
            total_rewards: U256::zero(),
        }
    }

    /// Share for a token; unknown symbols read as zero.
    pub fn get(&self, symbol: &str) -> TokenShare {
        self.per_token.get(symbol).copied().unwrap_or_default()
    }

    pub fn total_rewards(&self) -> U256 {
        self.total_rewards
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TokenShare)> {
        self.per_token.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Symbols whose share exceeds ONE.
    pub fn over_allocated(&self) -> Vec<&str> {
        self.per_token
            .iter()
            .filter(|(_, s)| s.exceeds_one())
            .map(|(k, _)| k.as_str())
            .collect()
    }
}

impl RewardProgram {
    /// Compute an account's shares. `None` or empty eligible totals resolve
    /// to all-zero shares rather than an error.
    pub fn shares(
        &self,
        balances: &[AccountVaultBalance],
        eligible: Option<&EligibleTotals>,
        tokens: &TokenSet,
    ) -> Shares {
        let eligible = match eligible {
            Some(e) if !e.is_empty() => e,
            _ => return Shares::zeroed(tokens),
        };

        let pools = self.rewards_pools(eligible, tokens);

        let mut per_token = BTreeMap::new();
        let mut total_rewards = U256::zero();

        for symbol in tokens.symbols() {
            let (balance, total) = position(balances, symbol, eligible);

            let percentage_share = if total.is_zero() {
                U256::zero()
            } else {
                mul_div(balance, ONE, total)
            };
            let rewards_amount = mul_div(percentage_share, pools.get(symbol), ONE);

            let share = TokenShare {
                percentage_share,
                rewards_amount,
            };
            if share.exceeds_one() {
                log::warn!(
                    "{} share {} exceeds ONE (balance {} > eligible {})",
                    symbol,
                    percentage_share,
                    balance,
                    total
                );
            }

            total_rewards = total_rewards.saturating_add(rewards_amount);
            per_token.insert(symbol.to_string(), share);
        }

        Shares {
            per_token,
            total_rewards,
        }
    }
}

/// (balance, total_eligible) for one token. Balances from repeated vault
/// records are summed; the denominator comes from the vault record, or the
/// global total when the account holds nothing in that token.
fn position(balances: &[AccountVaultBalance], symbol: &str, eligible: &EligibleTotals) -> (U256, U256) {
    let mut balance = U256::zero();
    let mut total = None;
    for vb in balances.iter().filter(|vb| vb.token_symbol == symbol) {
        balance = balance.saturating_add(vb.balance);
        total.get_or_insert(vb.total_eligible);
    }
    (balance, total.unwrap_or_else(|| eligible.get(symbol)))
}

/// Shares against the canonical total reward.
pub fn compute_shares(
    balances: &[AccountVaultBalance],
    eligible: Option<&EligibleTotals>,
    tokens: &TokenSet,
) -> Shares {
    RewardProgram::default().shares(balances, eligible, tokens)
}
