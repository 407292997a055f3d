use super::Context;
use crate::print_info;
use colored::*;
use cyclo_core::leaderboard::rank_of;
use cyclo_core::{format_units, FIXED_POINT_DECIMALS};

pub fn handle(
    ctx: &Context,
    limit: usize,
    account: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = ctx.snapshot()?;
    let payload = snapshot
        .leaderboard
        .as_ref()
        .ok_or("Snapshot has no 'leaderboard' section")?;

    let rows = payload.per_account_net()?;
    let board = ctx.program.leaderboard(&rows, payload.total_net()?, limit);

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&board)?);
        return Ok(());
    }

    println!(
        "{}",
        format!("Top {} of {} contributors", board.len(), rows.len()).bold()
    );
    for (i, entry) in board.iter().enumerate() {
        let highlighted = account.is_some_and(|a| a.eq_ignore_ascii_case(&entry.account));
        let line = format!(
            "{:>3}. {}  {:>24}  {:>7.3}%  ~{:.2}",
            i + 1,
            entry.account,
            format_units(entry.net_contribution, FIXED_POINT_DECIMALS),
            entry.percentage,
            entry.pro_rata_reward
        );
        if highlighted {
            println!("{}", line.green().bold());
        } else {
            println!("{}", line);
        }
    }

    if let Some(account) = account {
        match rank_of(&board, account) {
            Some(rank) => print_info(&format!("{} is ranked #{}", account, rank)),
            None => print_info(&format!("{} is outside the top {}", account, limit)),
        }
    }
    Ok(())
}
