// ─────────────────────────────────────────────────────────────────
// Leaderboard - Top Contributors with Pro-Rata Estimates
// ─────────────────────────────────────────────────────────────────
// The one f64 path in the engine. Output is a display-only estimate
// and feeds no integer accounting. Rounding intentionally differs
// from the fixed-point calculators.
// ─────────────────────────────────────────────────────────────────

use primitive_types::U256;
use serde::Serialize;

use crate::fixed_point::{amount_serde, to_f64};
use crate::rewards_pool::RewardProgram;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub account: String,
    #[serde(with = "amount_serde")]
    pub net_contribution: U256,
    /// 0–100
    pub percentage: f64,
    /// Whole reward tokens
    pub pro_rata_reward: f64,
}

impl RewardProgram {
    /// Rank by net contribution (descending, stable) and attach estimates.
    pub fn leaderboard(
        &self,
        per_account_net: &[(String, U256)],
        total_net: U256,
        limit: usize,
    ) -> Vec<LeaderboardEntry> {
        rank_top_contributors_with_reward(
            per_account_net,
            total_net,
            limit,
            self.total_reward_float(),
        )
    }
}

/// Rank against the canonical total reward.
pub fn rank_top_contributors(
    per_account_net: &[(String, U256)],
    total_net: U256,
    limit: usize,
) -> Vec<LeaderboardEntry> {
    RewardProgram::default().leaderboard(per_account_net, total_net, limit)
}

/// Rank with an explicit whole-token reward total.
/// Ties keep input order (the subgraph already returns near-sorted rows).
/// A zero `total_net` yields 0% rather than NaN.
pub fn rank_top_contributors_with_reward(
    per_account_net: &[(String, U256)],
    total_net: U256,
    limit: usize,
    total_reward_float: f64,
) -> Vec<LeaderboardEntry> {
    let mut ranked: Vec<&(String, U256)> = per_account_net.iter().collect();
    // sort_by is stable
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(limit);

    let total = to_f64(total_net);
    ranked
        .into_iter()
        .map(|(account, net)| {
            let percentage = if total_net.is_zero() {
                0.0
            } else {
                (to_f64(*net) / total) * 100.0
            };
            LeaderboardEntry {
                account: account.clone(),
                net_contribution: *net,
                percentage,
                pro_rata_reward: percentage * (total_reward_float / 100.0),
            }
        })
        .collect()
}

/// 1-based rank of an account, if it made the board. Account ids compare
/// case-insensitively (EVM addresses).
pub fn rank_of(entries: &[LeaderboardEntry], account: &str) -> Option<usize> {
    entries
        .iter()
        .position(|e| e.account.eq_ignore_ascii_case(account))
        .map(|i| i + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed_point::ONE;
    use crate::LEADERBOARD_LIMIT;

    fn ones(n: u64) -> U256 {
        U256::from(n) * ONE
    }

    fn row(account: &str, n: u64) -> (String, U256) {
        (account.to_string(), ones(n))
    }

    #[test]
    fn test_half_of_total_on_million_pool() {
        let rows = vec![row("acct1", 500), row("acct2", 250)];
        let board = rank_top_contributors_with_reward(&rows, ones(1000), 50, 1_000_000.0);

        assert_eq!(board[0].account, "acct1");
        assert!((board[0].percentage - 50.0).abs() < 1e-9);
        assert!((board[0].pro_rata_reward - 500_000.0).abs() < 1e-6);
        assert!((board[1].percentage - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_canonical_pool() {
        let rows = vec![row("acct1", 500)];
        let board = rank_top_contributors(&rows, ones(1000), LEADERBOARD_LIMIT);
        assert!((board[0].pro_rata_reward - 750_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_sorted_descending_stable_ties() {
        let rows = vec![
            row("low", 1),
            row("tie_first", 10),
            row("high", 100),
            row("tie_second", 10),
        ];
        let board = rank_top_contributors(&rows, ones(121), 10);
        let order: Vec<&str> = board.iter().map(|e| e.account.as_str()).collect();
        assert_eq!(order, vec!["high", "tie_first", "tie_second", "low"]);
    }

    #[test]
    fn test_truncated_to_limit() {
        let rows: Vec<_> = (0..120).map(|i| row(&format!("acct{}", i), i + 1)).collect();
        let board = rank_top_contributors(&rows, ones(10_000), LEADERBOARD_LIMIT);
        assert_eq!(board.len(), 50);
        assert_eq!(board[0].account, "acct119");
        assert_eq!(board[49].account, "acct70");
    }

    #[test]
    fn test_zero_total_is_zero_percent() {
        let rows = vec![row("acct1", 5)];
        let board = rank_top_contributors(&rows, U256::zero(), 50);
        assert_eq!(board[0].percentage, 0.0);
        assert_eq!(board[0].pro_rata_reward, 0.0);
    }

    #[test]
    fn test_rank_of() {
        let rows = vec![row("0xAbC", 5), row("0xdef", 50)];
        let board = rank_top_contributors(&rows, ones(55), 50);
        assert_eq!(rank_of(&board, "0xdef"), Some(1));
        assert_eq!(rank_of(&board, "0xabc"), Some(2));
        assert_eq!(rank_of(&board, "0x999"), None);
    }

    #[test]
    fn test_serializes_contribution_as_string() {
        let board = rank_top_contributors(&[row("a", 1)], ones(1), 1);
        let json = serde_json::to_value(&board[0]).unwrap();
        assert_eq!(json["net_contribution"], "1000000000000000000");
    }
}
