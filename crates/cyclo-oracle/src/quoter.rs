// ─────────────────────────────────────────────────────────────────
// Quoter - Single-Hop Quotes with Fee-Tier Fallback
// ─────────────────────────────────────────────────────────────────
// A pair may only have liquidity in one fee tier. Every leg tries the
// primary tier (0.3%) and then the secondary tier (1%) exactly once;
// after that the caller decides the fallback value. The two-attempt
// policy is fixed.
// ─────────────────────────────────────────────────────────────────

use std::collections::HashMap;

use async_trait::async_trait;
use cyclo_core::fixed_point::{amount_serde, mul_div};
use primitive_types::U256;
use serde::Deserialize;

use crate::error::{OracleError, OracleResult};

/// Pool fee tiers, in hundredths of a basis point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeeTier {
    /// 0.3%
    Primary,
    /// 1%
    Secondary,
}

impl FeeTier {
    /// Attempt order for every quote leg.
    pub const FALLBACK_ORDER: [FeeTier; 2] = [FeeTier::Primary, FeeTier::Secondary];

    pub fn fee(self) -> u32 {
        match self {
            FeeTier::Primary => 3000,
            FeeTier::Secondary => 10000,
        }
    }

    pub fn from_fee(fee: u32) -> Option<Self> {
        match fee {
            3000 => Some(FeeTier::Primary),
            10000 => Some(FeeTier::Secondary),
            _ => None,
        }
    }
}

/// Exact-input single-hop quoter (Uniswap V3 `QuoterV2` shape).
#[async_trait]
pub trait Quoter: Send + Sync {
    async fn quote_exact_input_single(
        &self,
        token_in: &str,
        token_out: &str,
        fee: FeeTier,
        amount_in: U256,
    ) -> OracleResult<U256>;
}

/// Primary tier, then the secondary tier once. `None` when both fail.
pub async fn quote_with_fee_fallback<Q: Quoter + ?Sized>(
    quoter: &Q,
    token_in: &str,
    token_out: &str,
    amount_in: U256,
) -> Option<U256> {
    for tier in FeeTier::FALLBACK_ORDER {
        match quoter
            .quote_exact_input_single(token_in, token_out, tier, amount_in)
            .await
        {
            Ok(amount_out) => return Some(amount_out),
            Err(e) => log::debug!("quote {} -> {} fee {} failed: {}", token_in, token_out, tier.fee(), e),
        }
    }
    log::warn!("no quote for {} -> {} in any fee tier", token_in, token_out);
    None
}

/// One recorded quote. Requests for other input sizes scale linearly.
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteRow {
    pub token_in: String,
    pub token_out: String,
    pub fee: u32,
    #[serde(with = "amount_serde")]
    pub amount_in: U256,
    #[serde(with = "amount_serde")]
    pub amount_out: U256,
}

/// Table-driven quoter for offline snapshots and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticQuoter {
    rows: HashMap<(String, String, u32), (U256, U256)>,
}

impl StaticQuoter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: impl IntoIterator<Item = QuoteRow>) -> Self {
        let mut quoter = Self::new();
        for row in rows {
            quoter.insert(row);
        }
        quoter
    }

    pub fn from_json(json: &str) -> OracleResult<Self> {
        let rows: Vec<QuoteRow> = serde_json::from_str(json)?;
        Ok(Self::from_rows(rows))
    }

    pub fn insert(&mut self, row: QuoteRow) {
        self.rows.insert(
            key(&row.token_in, &row.token_out, row.fee),
            (row.amount_in, row.amount_out),
        );
    }

    /// Record `amount_in` of `token_in` buying `amount_out` of `token_out`.
    pub fn with_quote(
        mut self,
        token_in: &str,
        token_out: &str,
        fee: FeeTier,
        amount_in: U256,
        amount_out: U256,
    ) -> Self {
        self.insert(QuoteRow {
            token_in: token_in.to_string(),
            token_out: token_out.to_string(),
            fee: fee.fee(),
            amount_in,
            amount_out,
        });
        self
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn key(token_in: &str, token_out: &str, fee: u32) -> (String, String, u32) {
    (token_in.to_ascii_lowercase(), token_out.to_ascii_lowercase(), fee)
}

#[async_trait]
impl Quoter for StaticQuoter {
    async fn quote_exact_input_single(
        &self,
        token_in: &str,
        token_out: &str,
        fee: FeeTier,
        amount_in: U256,
    ) -> OracleResult<U256> {
        let (ref_in, ref_out) = self
            .rows
            .get(&key(token_in, token_out, fee.fee()))
            .ok_or_else(|| OracleError::NoRoute {
                token_in: token_in.to_string(),
                token_out: token_out.to_string(),
                fee: fee.fee(),
            })?;
        Ok(mul_div(*ref_out, amount_in, *ref_in))
    }
}
