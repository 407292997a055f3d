use cyclo_core::{EligibleTotals, GlobalStats, RewardProgram, TokenAmounts, TokenSet};
use futures::future::join_all;

use crate::price_feed::NativePriceFeed;
use crate::quoter::Quoter;

/// Price every token concurrently, then aggregate pools and APY.
pub async fn refresh_global_stats<Q: Quoter + ?Sized>(
    feed: &NativePriceFeed<Q>,
    program: &RewardProgram,
    eligible: &EligibleTotals,
    tokens: &TokenSet,
    eligible_holders: u64,
) -> GlobalStats {
    let prices = join_all(tokens.iter().map(|token| async move {
        (token.symbol.clone(), feed.price_in_native(token).await)
    }))
    .await;
    let prices: TokenAmounts = prices.into_iter().collect();

    let stats = program.global_stats(eligible, tokens, eligible_holders, &prices);
    log::info!(
        "refreshed stats: {} tokens, {} holders, eligible sum {}",
        tokens.len(),
        eligible_holders,
        stats.total_eligible_sum
    );
    stats
}
