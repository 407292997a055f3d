use cyclo_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("no route {token_in} -> {token_out} at fee {fee}")]
    NoRoute {
        token_in: String,
        token_out: String,
        fee: u32,
    },

    #[error("quoter call failed: {0}")]
    Upstream(String),

    #[error("no client registered for chain {0}")]
    UnknownChain(u64),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("quote table: {0}")]
    Json(#[from] serde_json::Error),
}

pub type OracleResult<T> = Result<T, OracleError>;
