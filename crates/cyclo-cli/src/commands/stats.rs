use super::{Context, Snapshot};
use colored::*;
use cyclo_core::apy::apy_percent;
use cyclo_core::{format_units, GlobalStats, FIXED_POINT_DECIMALS};
use cyclo_oracle::{refresh_global_stats, NativePriceFeed, StaticQuoter};
use std::sync::Arc;

async fn collect(ctx: &Context, snapshot: Snapshot) -> Result<GlobalStats, Box<dyn std::error::Error>> {
    let (eligible, holders) = ctx.eligible(&snapshot)?;
    let quoter = Arc::new(StaticQuoter::from_rows(snapshot.quotes));
    let feed = NativePriceFeed::new(quoter, &ctx.network);
    Ok(refresh_global_stats(&feed, &ctx.program, &eligible, &ctx.tokens, holders).await)
}

pub async fn apy(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let stats = collect(ctx, ctx.snapshot()?).await?;
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&stats.apy_per_token)?);
        return Ok(());
    }

    println!("{}", format!("APY on {}", ctx.network.name).bold());
    for token in &ctx.tokens {
        println!(
            "  {:<8} {:>14.2}%",
            token.symbol.cyan(),
            apy_percent(stats.apy_per_token.get(&token.symbol))
        );
    }
    Ok(())
}

pub async fn stats(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let stats = collect(ctx, ctx.snapshot()?).await?;
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{} {}", "Network:".bold(), ctx.network.name.green());
    println!("{} {}", "Eligible holders:".bold(), stats.eligible_holders);
    println!(
        "{} {}",
        "Total eligible (sum):".bold(),
        format_units(stats.total_eligible_sum, FIXED_POINT_DECIMALS)
    );
    println!();
    println!(
        "  {:<8} {:>24} {:>24} {:>24} {:>14}",
        "token", "eligible", "value (native)", "pool", "apy %"
    );
    for token in &ctx.tokens {
        let s = token.symbol.as_str();
        println!(
            "  {:<8} {:>24} {:>24} {:>24} {:>14.2}",
            s.cyan(),
            format_units(stats.totals_per_token.get(s), FIXED_POINT_DECIMALS),
            format_units(stats.eligible_value_in_native.get(s), FIXED_POINT_DECIMALS),
            format_units(stats.rewards_pools.get(s), FIXED_POINT_DECIMALS),
            apy_percent(stats.apy_per_token.get(s))
        );
    }
    Ok(())
}
