//! Subgraph payload shapes and their conversion into engine inputs.
//!
//! Every numeric field arrives as a decimal string and is parsed with
//! [`parse_amount`]. Token references are contract addresses, matched
//! case-insensitively against the configured [`TokenSet`]; addresses that are
//! not configured (retired vaults, other networks) are skipped with a warning.
//!
//! Per-token amounts arrive at each token's own decimals and leave at 18, so
//! every engine input shares one scale. `totalEligibleSum` is already
//! normalized upstream and is taken as given.

use primitive_types::U256;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::fixed_point::{amount_serde, parse_amount};
use crate::rewards_pool::EligibleTotals;
use crate::shares::AccountVaultBalance;
use crate::token::{TokenAmounts, TokenSet};

/// `{ "data": ..., "errors": [...] }` wrapper returned by GraphQL endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlEnvelope<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

impl<T> GraphQlEnvelope<T> {
    /// The data block, or the joined error messages.
    pub fn into_data(self) -> CoreResult<T> {
        if !self.errors.is_empty() {
            let msgs: Vec<&str> = self.errors.iter().map(|e| e.message.as_str()).collect();
            return Err(CoreError::Subgraph(msgs.join("; ")));
        }
        self.data
            .ok_or_else(|| CoreError::Subgraph("no data returned".to_string()))
    }
}

/// Decode any payload from JSON text.
pub fn parse_payload<T: DeserializeOwned>(json: &str) -> CoreResult<T> {
    Ok(serde_json::from_str(json)?)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibleTotalsPayload {
    pub total_eligible_sum: String,
    #[serde(default, deserialize_with = "count_lenient")]
    pub eligible_holders: u64,
    #[serde(default)]
    pub tokens: Vec<TokenEligiblePayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenEligiblePayload {
    /// Receipt token address
    pub address: String,
    pub total_eligible: String,
}

impl EligibleTotalsPayload {
    pub fn to_eligible_totals(&self, tokens: &TokenSet) -> CoreResult<EligibleTotals> {
        let mut totals = TokenAmounts::new();
        for entry in &self.tokens {
            match tokens.by_address(&entry.address) {
                Some(token) => totals.add(
                    &token.symbol,
                    token.to_fixed_point(parse_amount(&entry.total_eligible)?),
                ),
                None => log::warn!("eligible total for unconfigured token {}", entry.address),
            }
        }
        let sum = parse_amount(&self.total_eligible_sum)?;
        Ok(EligibleTotals::new(tokens, &totals, sum))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountPayload {
    pub id: String,
    #[serde(default)]
    pub vault_balances: Vec<VaultBalancePayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultBalancePayload {
    /// Receipt token (vault) address
    pub vault: String,
    pub balance: String,
    /// Falls back to the global eligible total when the query omits it.
    /// Both amounts are at the vault token's decimals.
    #[serde(default)]
    pub total_eligible: Option<String>,
}

impl AccountPayload {
    pub fn vault_balances(
        &self,
        tokens: &TokenSet,
        eligible: Option<&EligibleTotals>,
    ) -> CoreResult<Vec<AccountVaultBalance>> {
        let mut out = Vec::with_capacity(self.vault_balances.len());
        for vb in &self.vault_balances {
            let token = match tokens.by_address(&vb.vault) {
                Some(t) => t,
                None => {
                    log::warn!("account {} holds unconfigured vault {}", self.id, vb.vault);
                    continue;
                }
            };
            let total_eligible = match &vb.total_eligible {
                Some(raw) => token.to_fixed_point(parse_amount(raw)?),
                None => eligible.map(|e| e.get(&token.symbol)).unwrap_or_default(),
            };
            out.push(AccountVaultBalance::new(
                &token.symbol,
                token.to_fixed_point(parse_amount(&vb.balance)?),
                total_eligible,
            ));
        }
        Ok(out)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardPayload {
    pub total_approved_transfers_in: String,
    #[serde(default)]
    pub accounts: Vec<LeaderboardAccountPayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardAccountPayload {
    pub id: String,
    pub total_cy_balance: String,
}

impl LeaderboardPayload {
    pub fn total_net(&self) -> CoreResult<U256> {
        parse_amount(&self.total_approved_transfers_in)
    }

    /// Rows in subgraph order (the ranker's tie-break depends on it).
    pub fn per_account_net(&self) -> CoreResult<Vec<(String, U256)>> {
        self.accounts
            .iter()
            .map(|a| Ok((a.id.clone(), parse_amount(&a.total_cy_balance)?)))
            .collect()
    }
}

/// Count field that may arrive as a GraphQL BigInt string or a JSON number.
fn count_lenient<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
    let value = amount_serde::deserialize(d)?;
    if value > U256::from(u64::MAX) {
        return Err(serde::de::Error::custom("count exceeds u64"));
    }
    Ok(value.low_u64())
}
