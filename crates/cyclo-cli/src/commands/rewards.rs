use super::Context;
use crate::{print_error, print_info};
use colored::*;
use cyclo_core::{format_units, FIXED_POINT_DECIMALS};
use serde_json::json;

pub fn pools(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = ctx.snapshot()?;
    let (eligible, _) = ctx.eligible(&snapshot)?;
    if !eligible.is_consistent() {
        print_info("totalEligibleSum differs from the per-token totals; using it as given");
    }

    let pools = ctx.program.rewards_pools(&eligible, &ctx.tokens);
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&pools)?);
        return Ok(());
    }

    println!("{}", format!("Rewards pools on {}", ctx.network.name).bold());
    for token in &ctx.tokens {
        println!(
            "  {:<8} {:>28}  {} {}",
            token.symbol.cyan(),
            format_units(pools.get(&token.symbol), FIXED_POINT_DECIMALS).green(),
            "eligible".dimmed(),
            format_units(eligible.get(&token.symbol), FIXED_POINT_DECIMALS)
        );
    }
    Ok(())
}

pub fn shares(ctx: &Context, account: &str) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = ctx.snapshot()?;
    let eligible = match &snapshot.eligible {
        Some(payload) => Some(payload.to_eligible_totals(&ctx.tokens)?),
        None => None,
    };
    let balances = match snapshot.account(account) {
        Some(payload) => payload.vault_balances(&ctx.tokens, eligible.as_ref())?,
        None => {
            print_error(&format!("Account {} not in snapshot", account));
            Vec::new()
        }
    };

    let shares = ctx.program.shares(&balances, eligible.as_ref(), &ctx.tokens);

    if ctx.json {
        let per_token: serde_json::Map<String, serde_json::Value> = shares
            .iter()
            .map(|(symbol, share)| {
                (
                    symbol.to_string(),
                    json!({
                        "percentage_share": share.percentage_share.to_string(),
                        "rewards_amount": share.rewards_amount.to_string(),
                    }),
                )
            })
            .collect();
        let out = json!({
            "account": account,
            "per_token": per_token,
            "total_rewards": shares.total_rewards().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{} {}", "Account:".bold(), account.green());
    for (symbol, share) in shares.iter() {
        println!(
            "  {:<8} {:>10.4}%  {:>28}",
            symbol.cyan(),
            share.percent(),
            format_units(share.rewards_amount, FIXED_POINT_DECIMALS)
        );
    }
    println!(
        "{} {}",
        "Total rewards:".bold(),
        format_units(shares.total_rewards(), FIXED_POINT_DECIMALS).green()
    );
    for symbol in shares.over_allocated() {
        print_error(&format!("{} share exceeds 100% (inconsistent snapshot)", symbol));
    }
    Ok(())
}
