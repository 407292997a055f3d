pub mod leaderboard;
pub mod networks;
pub mod rewards;
pub mod stats;

use cyclo_core::subgraph::{AccountPayload, EligibleTotalsPayload, LeaderboardPayload};
use cyclo_core::{CycloConfig, EligibleTotals, NetworkConfig, RewardProgram, TokenSet};
use cyclo_oracle::QuoteRow;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Everything a command needs, resolved once from flags and environment.
pub struct Context {
    pub config: CycloConfig,
    pub network: NetworkConfig,
    pub tokens: TokenSet,
    pub program: RewardProgram,
    pub snapshot_path: Option<PathBuf>,
    pub json: bool,
}

/// Offline capture of what the live app would fetch.
#[derive(Debug, Default, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub eligible: Option<EligibleTotalsPayload>,
    #[serde(default)]
    pub accounts: Vec<AccountPayload>,
    #[serde(default)]
    pub leaderboard: Option<LeaderboardPayload>,
    #[serde(default)]
    pub quotes: Vec<QuoteRow>,
}

impl Snapshot {
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| format!("Cannot read snapshot {}: {}", path.display(), e))?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn account(&self, id: &str) -> Option<&AccountPayload> {
        self.accounts.iter().find(|a| a.id.eq_ignore_ascii_case(id))
    }
}

impl Context {
    pub fn load(
        config_path: Option<&Path>,
        network: &str,
        snapshot_path: Option<PathBuf>,
        json: bool,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let config = match config_path {
            Some(path) => CycloConfig::load_from_file(path)?,
            None => CycloConfig::load_from_env()?,
        };
        let network = config.network(network)?.clone();
        let tokens = network.token_set()?;
        let program = RewardProgram::new(config.rewards.total_reward);
        Ok(Self {
            config,
            network,
            tokens,
            program,
            snapshot_path,
            json,
        })
    }

    pub fn snapshot(&self) -> Result<Snapshot, Box<dyn std::error::Error>> {
        match &self.snapshot_path {
            Some(path) => Snapshot::load(path),
            None => Err("No snapshot given (use --snapshot or CYCLO_SNAPSHOT)".into()),
        }
    }

    /// Eligible totals from the snapshot plus the holder count.
    pub fn eligible(&self, snapshot: &Snapshot) -> Result<(EligibleTotals, u64), Box<dyn std::error::Error>> {
        let payload = snapshot
            .eligible
            .as_ref()
            .ok_or("Snapshot has no 'eligible' section")?;
        Ok((payload.to_eligible_totals(&self.tokens)?, payload.eligible_holders))
    }
}
