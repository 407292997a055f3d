//! Fuzz target: subgraph payload ingestion
//!
//! Feeds arbitrary JSON to the payload decoders and their conversions.
//! Malformed input must surface as Err, never as a panic.
//!
//! Run: cargo +nightly fuzz run fuzz_subgraph_payload -- -max_len=4096

#![no_main]
use cyclo_core::subgraph::{parse_payload, AccountPayload, EligibleTotalsPayload, LeaderboardPayload};
use cyclo_core::CycloConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };
    let config = CycloConfig::builtin();
    let Some(network) = config.networks.first() else {
        return;
    };
    let Ok(tokens) = network.token_set() else {
        return;
    };

    let eligible = parse_payload::<EligibleTotalsPayload>(json)
        .ok()
        .and_then(|p| p.to_eligible_totals(&tokens).ok());

    if let Ok(account) = parse_payload::<AccountPayload>(json) {
        let _ = account.vault_balances(&tokens, eligible.as_ref());
    }

    if let Ok(board) = parse_payload::<LeaderboardPayload>(json) {
        if let (Ok(rows), Ok(total)) = (board.per_account_net(), board.total_net()) {
            let _ = cyclo_core::rank_top_contributors(&rows, total, cyclo_core::LEADERBOARD_LIMIT);
        }
    }
});
