//! Token records and symbol-keyed amount maps.
//!
//! Token symbols are dynamic (they come from network configuration), so the
//! key set is validated once into a [`TokenSet`]. Every per-token amount map
//! goes through [`TokenAmounts::get`], which supplies the zero default for
//! missing keys: no caller ever sees an "undefined" entry.

use primitive_types::U256;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

use crate::error::{CoreError, CoreResult};
use crate::fixed_point::pow10;
use crate::FIXED_POINT_DECIMALS;

/// A receipt token as declared in network configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Unique key (e.g. "cysFLR")
    pub symbol: String,
    /// Decimal places of the token's raw integer amounts
    pub decimals: u8,
    /// Contract address on the token's home chain (0x-prefixed hex)
    #[serde(rename = "address")]
    pub native_address: String,
    /// Symbol of the locked underlying asset (e.g. "sFLR")
    #[serde(default)]
    pub underlying: String,
}

impl Token {
    pub fn new(symbol: &str, decimals: u8, native_address: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            decimals,
            native_address: native_address.to_string(),
            underlying: String::new(),
        }
    }

    /// Rescale a raw amount from this token's decimals to 18.
    pub fn to_fixed_point(&self, raw: U256) -> U256 {
        if self.decimals <= FIXED_POINT_DECIMALS {
            raw.saturating_mul(pow10(u32::from(FIXED_POINT_DECIMALS - self.decimals)))
        } else {
            raw / pow10(u32::from(self.decimals - FIXED_POINT_DECIMALS))
        }
    }
}

/// Validated, ordered set of tokens for one network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSet {
    tokens: Vec<Token>,
}

impl TokenSet {
    /// Build a token set; symbols must be unique and the set non-empty.
    pub fn new(tokens: Vec<Token>) -> CoreResult<Self> {
        if tokens.is_empty() {
            return Err(CoreError::InvalidConfig("token list is empty".to_string()));
        }
        for (i, t) in tokens.iter().enumerate() {
            if t.symbol.is_empty() {
                return Err(CoreError::InvalidConfig("token symbol is empty".to_string()));
            }
            if tokens[..i].iter().any(|o| o.symbol == t.symbol) {
                return Err(CoreError::InvalidConfig(format!(
                    "duplicate token symbol {}",
                    t.symbol
                )));
            }
        }
        Ok(Self { tokens })
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|t| t.symbol.as_str())
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.get(symbol).is_some()
    }

    pub fn get(&self, symbol: &str) -> Option<&Token> {
        self.tokens.iter().find(|t| t.symbol == symbol)
    }

    pub fn require(&self, symbol: &str) -> CoreResult<&Token> {
        self.get(symbol)
            .ok_or_else(|| CoreError::UnknownToken(symbol.to_string()))
    }

    /// Lookup by contract address. EVM addresses are case-insensitive
    /// (checksummed vs lowercased subgraph ids).
    pub fn by_address(&self, address: &str) -> Option<&Token> {
        self.tokens
            .iter()
            .find(|t| t.native_address.eq_ignore_ascii_case(address))
    }
}

impl<'a> IntoIterator for &'a TokenSet {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

/// Token symbol → integer amount. Missing keys read as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenAmounts(BTreeMap<String, U256>);

impl TokenAmounts {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Explicit zero entry for every token in the set.
    pub fn zeroed(tokens: &TokenSet) -> Self {
        tokens
            .symbols()
            .map(|s| (s.to_string(), U256::zero()))
            .collect()
    }

    /// The single accessor: absent symbols read as zero.
    pub fn get(&self, symbol: &str) -> U256 {
        self.0.get(symbol).copied().unwrap_or_default()
    }

    pub fn set(&mut self, symbol: &str, amount: U256) {
        self.0.insert(symbol.to_string(), amount);
    }

    /// Accumulate into an entry (saturating).
    pub fn add(&mut self, symbol: &str, amount: U256) {
        let entry = self.0.entry(symbol.to_string()).or_default();
        *entry = entry.saturating_add(amount);
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.0.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, U256)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Saturating sum over all entries.
    pub fn total(&self) -> U256 {
        self.0
            .values()
            .fold(U256::zero(), |acc, v| acc.saturating_add(*v))
    }
}

impl FromIterator<(String, U256)> for TokenAmounts {
    fn from_iter<I: IntoIterator<Item = (String, U256)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for TokenAmounts {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = s.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, &v.to_string())?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flare_tokens() -> TokenSet {
        TokenSet::new(vec![
            Token::new("cysFLR", 18, "0x19831cfB53A0dbeAD9866C43557C1D48DfF76567"),
            Token::new("cyWETH", 18, "0xd8BF1d2720E9fFD01a2F9A2eFc3E101a05B852b4"),
        ])
        .unwrap()
    }

    #[test]
    fn test_token_set_rejects_duplicates() {
        let err = TokenSet::new(vec![
            Token::new("cysFLR", 18, "0x01"),
            Token::new("cysFLR", 18, "0x02"),
        ]);
        assert!(err.is_err());
    }

    #[test]
    fn test_token_set_rejects_empty() {
        assert!(TokenSet::new(vec![]).is_err());
    }

    #[test]
    fn test_token_lookup() {
        let tokens = flare_tokens();
        assert_eq!(tokens.len(), 2);
        assert!(tokens.contains("cyWETH"));
        assert!(tokens.require("cyFOO").is_err());
        let by_addr = tokens
            .by_address("0x19831cfb53a0dbead9866c43557c1d48dff76567")
            .unwrap();
        assert_eq!(by_addr.symbol, "cysFLR");
    }

    #[test]
    fn test_amounts_zero_default() {
        let tokens = flare_tokens();
        let mut amounts = TokenAmounts::zeroed(&tokens);
        assert_eq!(amounts.len(), 2);
        assert_eq!(amounts.get("cysFLR"), U256::zero());
        assert_eq!(amounts.get("not-configured"), U256::zero());

        amounts.add("cysFLR", U256::from(5u8));
        amounts.add("cysFLR", U256::from(7u8));
        assert_eq!(amounts.get("cysFLR"), U256::from(12u8));
        assert_eq!(amounts.total(), U256::from(12u8));
    }

    #[test]
    fn test_to_fixed_point() {
        let wbtc = Token::new("cyWBTC", 8, "0x01");
        assert_eq!(
            wbtc.to_fixed_point(U256::from(100_000_000u64)),
            pow10(18)
        );
        let fxrp = Token::new("cyFXRP", 6, "0x02");
        assert_eq!(fxrp.to_fixed_point(U256::from(2_500_000u64)), pow10(17) * 25);
        let weth = Token::new("cyWETH", 18, "0x03");
        assert_eq!(weth.to_fixed_point(U256::from(7u8)), U256::from(7u8));
        let wide = Token::new("cyWIDE", 24, "0x04");
        assert_eq!(wide.to_fixed_point(pow10(24)), pow10(18));
    }

    #[test]
    fn test_amounts_serialize_as_decimal_strings() {
        let mut amounts = TokenAmounts::new();
        amounts.set("cysFLR", U256::from(10u8).pow(U256::from(24u8)));
        let json = serde_json::to_string(&amounts).unwrap();
        assert_eq!(json, r#"{"cysFLR":"1000000000000000000000000"}"#);
    }
}
