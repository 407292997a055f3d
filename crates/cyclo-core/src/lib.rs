// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// CYCLO - CORE MODULE
//
// Rewards and price aggregation engine for Cyclo receipt tokens (cysFLR,
// cyWETH, ...). Turns raw subgraph / on-chain integers into reward pools,
// per-account shares, APY figures and cross-token native prices.
// All accounting arithmetic uses U256 at 10^18 fixed point (no floating-point).
// The leaderboard is the one deliberate f64 path (display-only estimate).
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub mod apy;
pub mod config;
pub mod error;
pub mod fixed_point;
pub mod leaderboard;
pub mod price;
pub mod rewards_pool;
pub mod shares;
pub mod stats;
pub mod subgraph;
pub mod token;

pub use primitive_types::U256;

pub use apy::compute_apy;
pub use config::{CycloConfig, NetworkConfig, RewardsConfig};
pub use error::{CoreError, CoreResult};
pub use fixed_point::{format_units, mul_div, parse_amount, parse_units, ONE};
pub use leaderboard::{rank_top_contributors, LeaderboardEntry};
pub use price::{decimal_adjustment, derive_native_price, LegScale};
pub use rewards_pool::{compute_rewards_pools, EligibleTotals, RewardProgram, RewardsPools};
pub use shares::{compute_shares, AccountVaultBalance, Shares, TokenShare};
pub use stats::{compute_global_stats, GlobalStats};
pub use token::{Token, TokenAmounts, TokenSet};

/// Decimal places of the fixed-point scale (ONE = 10^18)
pub const FIXED_POINT_DECIMALS: u8 = 18;

// ─────────────────────────────────────────────────────────────────
// REWARD PROGRAM CONSTANTS
// ─────────────────────────────────────────────────────────────────
// One canonical reward total for every consumer: pools, shares, APY and
// the leaderboard's float estimate all derive from TOTAL_REWARD_RAW.
// The reward pool is treated as a monthly distribution; APY extrapolates
// it by MONTHS_PER_YEAR.
// ─────────────────────────────────────────────────────────────────

/// Whole reward tokens distributed per program period
pub const TOTAL_REWARD_TOKENS: u128 = 1_500_000;

/// Total reward in fixed-point units (1,500,000 × 10^18)
pub const TOTAL_REWARD_RAW: u128 = TOTAL_REWARD_TOKENS * 1_000_000_000_000_000_000;

/// Monthly distribution → annual figure
pub const MONTHS_PER_YEAR: u64 = 12;

/// Ratio → percentage points
pub const PERCENT: u64 = 100;

/// Maximum leaderboard rows surfaced to the display layer
pub const LEADERBOARD_LIMIT: usize = 50;

/// Canonical total reward as a U256.
pub fn total_reward() -> U256 {
    U256::from(TOTAL_REWARD_RAW)
}
