//! Fuzz target: rewards pool allocation and shares
//!
//! Random eligible totals and balances. Verifies:
//! 1. No panics (zero totals, saturation, inconsistent sums)
//! 2. Pools never exceed the total reward when the sum is consistent
//!
//! Run: cargo +nightly fuzz run fuzz_rewards_pools

#![no_main]
use arbitrary::Arbitrary;
use cyclo_core::{
    compute_apy, AccountVaultBalance, EligibleTotals, RewardProgram, Token, TokenAmounts,
    TokenSet, U256,
};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct FuzzPoolsInput {
    totals: Vec<u128>,
    balances: Vec<(u8, u128, u128)>,
    total_eligible_sum: Option<u128>,
    total_reward: u128,
    price: u128,
}

fuzz_target!(|input: FuzzPoolsInput| {
    // 1..=6 tokens (prevent pointless huge sets)
    let n = input.totals.len().clamp(1, 6);
    let tokens: Vec<Token> = (0..n)
        .map(|i| Token::new(&format!("cyT{}", i), 18, &format!("0x{:040x}", i + 1)))
        .collect();
    let Ok(tokens) = TokenSet::new(tokens) else {
        return;
    };

    let totals: TokenAmounts = tokens
        .symbols()
        .enumerate()
        .map(|(i, s)| (s.to_string(), U256::from(input.totals.get(i).copied().unwrap_or(0))))
        .collect();
    let eligible = match input.total_eligible_sum {
        Some(sum) => EligibleTotals::new(&tokens, &totals, U256::from(sum)),
        None => EligibleTotals::from_totals(&tokens, &totals),
    };

    let program = RewardProgram::new(U256::from(input.total_reward));
    let pools = program.rewards_pools(&eligible, &tokens);
    if eligible.is_consistent() {
        let sum = pools.iter().fold(U256::zero(), |acc, (_, v)| acc.saturating_add(v));
        assert!(sum <= program.total_reward(), "pools exceed total reward");
    }

    let balances: Vec<AccountVaultBalance> = input
        .balances
        .iter()
        .take(16)
        .map(|(idx, balance, total)| {
            AccountVaultBalance::new(
                &format!("cyT{}", *idx as usize % n),
                U256::from(*balance),
                U256::from(*total),
            )
        })
        .collect();
    let shares = program.shares(&balances, Some(&eligible), &tokens);
    let _ = shares.over_allocated();

    for (symbol, pool) in pools.iter() {
        let _ = compute_apy(pool, eligible.get(symbol), U256::from(input.price));
    }
});
