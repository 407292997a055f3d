use super::Context;
use colored::*;
use cyclo_core::format_units;

pub fn handle(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&ctx.config.networks)?);
        return Ok(());
    }

    println!(
        "{} {} {}",
        "Total reward:".bold(),
        format_units(ctx.config.rewards.total_reward, cyclo_core::FIXED_POINT_DECIMALS).green(),
        "per period".dimmed()
    );
    for network in &ctx.config.networks {
        let marker = if network.chain_id == ctx.network.chain_id {
            "●".green()
        } else {
            "○".dimmed()
        };
        println!();
        println!(
            "{} {} {}",
            marker,
            network.name.bold(),
            format!("(chain {})", network.chain_id).dimmed()
        );
        println!(
            "  {} {}  {} {}",
            "native:".dimmed(),
            network.native_symbol,
            "stable:".dimmed(),
            network.stable_symbol
        );
        for token in &network.tokens {
            println!(
                "  {:<8} {:>2} dec  {}",
                token.symbol.cyan(),
                token.decimals,
                token.native_address.dimmed()
            );
        }
    }
    Ok(())
}
