// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// BENCHMARK SUITE - cyclo-core
//
// Measures the per-refresh cost of the reward, share, APY and ranking paths.
// Run: cargo bench -p cyclo-core
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use cyclo_core::{
    compute_apy, compute_rewards_pools, compute_shares, derive_native_price, parse_amount,
    rank_top_contributors, AccountVaultBalance, EligibleTotals, Token, TokenAmounts, TokenSet,
    LEADERBOARD_LIMIT, ONE, U256,
};

fn token_set(n: usize) -> TokenSet {
    let tokens = (0..n)
        .map(|i| Token::new(&format!("cyT{}", i), 18, &format!("0x{:040x}", i + 1)))
        .collect();
    TokenSet::new(tokens).unwrap()
}

fn eligible(tokens: &TokenSet) -> EligibleTotals {
    let totals: TokenAmounts = tokens
        .symbols()
        .enumerate()
        .map(|(i, s)| (s.to_string(), U256::from(1_000u64 * (i as u64 + 1)) * ONE))
        .collect();
    EligibleTotals::from_totals(tokens, &totals)
}

// ─────────────────────────────────────────────────────────────────
// REWARDS POOL BENCHMARKS
// ─────────────────────────────────────────────────────────────────

fn bench_rewards_pools(c: &mut Criterion) {
    let mut group = c.benchmark_group("rewards/pools");
    for n in [2usize, 3, 8] {
        let tokens = token_set(n);
        let eligible = eligible(&tokens);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| black_box(compute_rewards_pools(&eligible, &tokens)))
        });
    }
    group.finish();
}

fn bench_shares(c: &mut Criterion) {
    let tokens = token_set(3);
    let eligible = eligible(&tokens);
    let balances: Vec<AccountVaultBalance> = tokens
        .symbols()
        .map(|s| AccountVaultBalance::new(s, U256::from(25u64) * ONE, eligible.get(s)))
        .collect();

    c.bench_function("rewards/shares_3_tokens", |b| {
        b.iter(|| black_box(compute_shares(&balances, Some(&eligible), &tokens)))
    });
}

// ─────────────────────────────────────────────────────────────────
// APY / PRICE BENCHMARKS
// ─────────────────────────────────────────────────────────────────

fn bench_apy(c: &mut Criterion) {
    let pool = U256::from(750_000u64) * ONE;
    let total = U256::from(123_456u64) * ONE;
    c.bench_function("apy/compute", |b| {
        b.iter(|| black_box(compute_apy(black_box(pool), black_box(total), ONE)))
    });
}

fn bench_derive_price(c: &mut Criterion) {
    let target = U256::from(2_500_000_000u64);
    let native = U256::from(25_000u64);
    c.bench_function("price/derive_native", |b| {
        b.iter(|| black_box(derive_native_price(black_box(target), black_box(native), 18)))
    });
}

fn bench_parse_amount(c: &mut Criterion) {
    c.bench_function("units/parse_amount_77_digits", |b| {
        let text = "9".repeat(77);
        b.iter(|| black_box(parse_amount(black_box(&text))))
    });
}

// ─────────────────────────────────────────────────────────────────
// LEADERBOARD BENCHMARK
// ─────────────────────────────────────────────────────────────────

fn bench_leaderboard(c: &mut Criterion) {
    let rows: Vec<(String, U256)> = (0..1_000u64)
        .map(|i| (format!("0x{:040x}", i), U256::from((i * 7919) % 1_000) * ONE))
        .collect();
    let total = rows.iter().fold(U256::zero(), |acc, (_, v)| acc + *v);
    c.bench_function("leaderboard/rank_1000", |b| {
        b.iter(|| black_box(rank_top_contributors(&rows, total, LEADERBOARD_LIMIT)))
    });
}

// ─────────────────────────────────────────────────────────────────

criterion_group!(
    benches,
    bench_rewards_pools,
    bench_shares,
    bench_apy,
    bench_derive_price,
    bench_parse_amount,
    bench_leaderboard,
);
criterion_main!(benches);
