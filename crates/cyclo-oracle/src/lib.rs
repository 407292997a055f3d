// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// CYCLO - ORACLE MODULE
//
// Async quote orchestration on top of cyclo-core. Fetches price legs from a
// concentrated-liquidity quoter, applies the fee-tier and parity fallbacks,
// and composes native prices and global stats. The core stays synchronous;
// every await point lives here.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub mod client_cache;
pub mod error;
pub mod price_feed;
pub mod quoter;
pub mod refresh;

pub use client_cache::ClientCache;
pub use error::{OracleError, OracleResult};
pub use price_feed::{NativePriceFeed, PriceLegs};
pub use quoter::{quote_with_fee_fallback, FeeTier, QuoteRow, Quoter, StaticQuoter};
pub use refresh::refresh_global_stats;
