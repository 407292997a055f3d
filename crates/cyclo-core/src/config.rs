use primitive_types::U256;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{CoreError, CoreResult};
use crate::fixed_point::amount_serde;
use crate::token::{Token, TokenSet};

/// Built-in configuration compiled into the binary.
const DEFAULT_CONFIG_TOML: &str = include_str!("../config/default.toml");

/// Token decimals beyond this cannot be scaled to 18 without 10^x overflow risk
pub const MAX_TOKEN_DECIMALS: u8 = 36;

/// Static network + reward configuration.
/// Loaded once at startup, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycloConfig {
    pub rewards: RewardsConfig,
    pub networks: Vec<NetworkConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardsConfig {
    /// Total reward per program period, fixed-point (10^18)
    #[serde(with = "amount_serde")]
    pub total_reward: U256,
}

impl Default for RewardsConfig {
    fn default() -> Self {
        Self {
            total_reward: crate::total_reward(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub chain_id: u64,
    pub name: String,
    /// Wrapped native gas token (price reference unit)
    pub native_symbol: String,
    pub native_decimals: u8,
    pub native_address: String,
    /// Stable intermediary both price legs are quoted against
    pub stable_symbol: String,
    pub stable_decimals: u8,
    pub stable_address: String,
    pub tokens: Vec<Token>,
}

impl NetworkConfig {
    /// Validated token set for this network.
    pub fn token_set(&self) -> CoreResult<TokenSet> {
        TokenSet::new(self.tokens.clone())
    }

    /// The wrapped native token as a Token record.
    pub fn native_token(&self) -> Token {
        Token::new(&self.native_symbol, self.native_decimals, &self.native_address)
    }

    /// The stable intermediary as a Token record.
    pub fn stable_token(&self) -> Token {
        Token::new(&self.stable_symbol, self.stable_decimals, &self.stable_address)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("network name cannot be empty".to_string());
        }
        if self.chain_id == 0 {
            return Err(format!("{}: chain_id cannot be 0", self.name));
        }
        if self.tokens.is_empty() {
            return Err(format!("{}: no tokens configured", self.name));
        }
        check_address(&self.native_address)
            .map_err(|e| format!("{}: native_address {}", self.name, e))?;
        check_address(&self.stable_address)
            .map_err(|e| format!("{}: stable_address {}", self.name, e))?;
        for token in &self.tokens {
            if token.decimals > MAX_TOKEN_DECIMALS {
                return Err(format!(
                    "{}: {} decimals {} > {}",
                    self.name, token.symbol, token.decimals, MAX_TOKEN_DECIMALS
                ));
            }
            check_address(&token.native_address)
                .map_err(|e| format!("{}: {} address {}", self.name, token.symbol, e))?;
        }
        TokenSet::new(self.tokens.clone()).map_err(|e| format!("{}: {}", self.name, e))?;
        Ok(())
    }
}

/// 0x-prefixed, 20-byte hex address.
fn check_address(address: &str) -> Result<(), String> {
    let body = address
        .strip_prefix("0x")
        .ok_or_else(|| format!("{:?} missing 0x prefix", address))?;
    let bytes = hex::decode(body).map_err(|e| format!("{:?} is not hex: {}", address, e))?;
    if bytes.len() != 20 {
        return Err(format!("{:?} is {} bytes, expected 20", address, bytes.len()));
    }
    Ok(())
}

impl Default for CycloConfig {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CycloConfig {
    /// The compiled-in configuration (Flare + Arbitrum).
    pub fn builtin() -> Self {
        match Self::from_toml_str(DEFAULT_CONFIG_TOML) {
            Ok(cfg) => cfg,
            // The embedded file is covered by tests; an empty fallback keeps
            // this infallible for callers.
            Err(e) => {
                log::error!("built-in config is invalid: {}", e);
                Self {
                    rewards: RewardsConfig::default(),
                    networks: Vec::new(),
                }
            }
        }
    }

    pub fn from_toml_str(content: &str) -> CoreResult<Self> {
        let config: CycloConfig = toml::from_str(content)?;
        config.validate().map_err(CoreError::InvalidConfig)?;
        Ok(config)
    }

    /// Load config from a TOML file
    pub fn load_from_file(path: &Path) -> CoreResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load config honoring environment overrides:
    /// - `CYCLO_CONFIG`: path to a TOML file replacing the built-in config
    /// - `CYCLO_TOTAL_REWARD`: total reward in fixed-point units
    pub fn load_from_env() -> CoreResult<Self> {
        let mut config = match std::env::var("CYCLO_CONFIG") {
            Ok(path) if !path.is_empty() => {
                log::debug!("loading config from {}", path);
                Self::load_from_file(Path::new(&path))?
            }
            _ => Self::builtin(),
        };

        if let Ok(raw) = std::env::var("CYCLO_TOTAL_REWARD") {
            config.rewards.total_reward = crate::fixed_point::parse_amount(&raw)?;
        }

        config.validate().map_err(CoreError::InvalidConfig)?;
        Ok(config)
    }

    /// Save config to a TOML file
    pub fn save_to_file(&self, path: &Path) -> CoreResult<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.rewards.total_reward.is_zero() {
            return Err("total_reward cannot be 0".to_string());
        }
        if self.networks.is_empty() {
            return Err("no networks configured".to_string());
        }
        for (i, net) in self.networks.iter().enumerate() {
            net.validate()?;
            if self.networks[..i]
                .iter()
                .any(|o| o.chain_id == net.chain_id || o.name == net.name)
            {
                return Err(format!("duplicate network {} ({})", net.name, net.chain_id));
            }
        }
        Ok(())
    }

    /// Find a network by name (case-insensitive) or decimal chain id.
    pub fn network(&self, key: &str) -> CoreResult<&NetworkConfig> {
        let by_id = key.parse::<u64>().ok();
        self.networks
            .iter()
            .find(|n| n.name.eq_ignore_ascii_case(key) || Some(n.chain_id) == by_id)
            .ok_or_else(|| CoreError::UnknownNetwork(key.to_string()))
    }

    pub fn network_by_chain_id(&self, chain_id: u64) -> CoreResult<&NetworkConfig> {
        self.networks
            .iter()
            .find(|n| n.chain_id == chain_id)
            .ok_or_else(|| CoreError::UnknownNetwork(chain_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed_point::ONE;

    #[test]
    fn test_builtin_config_is_valid() {
        let cfg = CycloConfig::from_toml_str(DEFAULT_CONFIG_TOML).unwrap();
        assert_eq!(cfg.networks.len(), 2);
        assert_eq!(cfg.rewards.total_reward, U256::from(1_500_000u64) * ONE);

        let flare = cfg.network("flare").unwrap();
        assert_eq!(flare.chain_id, 14);
        assert_eq!(flare.token_set().unwrap().len(), 3);
        assert_eq!(flare.stable_decimals, 6);

        let arb = cfg.network("42161").unwrap();
        assert_eq!(arb.name, "arbitrum");
        assert_eq!(arb.token_set().unwrap().len(), 1);
        assert_eq!(arb.token_set().unwrap().require("cyWETH").unwrap().decimals, 18);
    }

    #[test]
    fn test_unknown_network() {
        let cfg = CycloConfig::builtin();
        assert!(cfg.network("solana").is_err());
        assert!(cfg.network_by_chain_id(1).is_err());
        assert!(cfg.network_by_chain_id(14).is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_address() {
        let mut cfg = CycloConfig::builtin();
        cfg.networks[0].tokens[0].native_address = "0x1234".to_string();
        assert!(cfg.validate().unwrap_err().contains("expected 20"));

        cfg.networks[0].tokens[0].native_address = "19831cfB53A0dbeAD9866C43557C1D48DfF76567".to_string();
        assert!(cfg.validate().unwrap_err().contains("0x prefix"));
    }

    #[test]
    fn test_validate_rejects_duplicate_symbol() {
        let mut cfg = CycloConfig::builtin();
        let dup = cfg.networks[0].tokens[0].clone();
        cfg.networks[0].tokens.push(dup);
        assert!(cfg.validate().unwrap_err().contains("duplicate token symbol"));
    }

    #[test]
    fn test_validate_rejects_zero_reward() {
        let mut cfg = CycloConfig::builtin();
        cfg.rewards.total_reward = U256::zero();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_total_reward_accepts_integer() {
        let toml_src = DEFAULT_CONFIG_TOML.replace(
            "total_reward = \"1500000000000000000000000\"",
            "total_reward = 1000",
        );
        let cfg = CycloConfig::from_toml_str(&toml_src).unwrap();
        assert_eq!(cfg.rewards.total_reward, U256::from(1000u64));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cyclo.toml");
        let cfg = CycloConfig::builtin();
        cfg.save_to_file(&path).unwrap();
        let loaded = CycloConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, cfg);
    }
}
