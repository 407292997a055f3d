use thiserror::Error;

/// Errors raised at the engine's boundaries (parsing, configuration, lookups).
/// The calculators themselves never fail: zero denominators and missing data
/// resolve to zero results.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid amount {input:?}: {reason}")]
    InvalidAmount { input: String, reason: &'static str },

    #[error("unknown token: {0}")]
    UnknownToken(String),

    #[error("unknown network: {0}")]
    UnknownNetwork(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("subgraph error: {0}")]
    Subgraph(String),

    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    TomlDecode(#[from] toml::de::Error),

    #[error("config encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),

    #[error("payload decode error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    pub(crate) fn invalid_amount(input: &str, reason: &'static str) -> Self {
        CoreError::InvalidAmount {
            input: input.to_string(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::invalid_amount("-5", "sign not allowed");
        assert!(err.to_string().contains("-5"));
        assert!(err.to_string().contains("sign not allowed"));

        let err = CoreError::UnknownToken("cyFOO".to_string());
        assert_eq!(err.to_string(), "unknown token: cyFOO");

        let err = CoreError::Subgraph("indexing".to_string());
        assert_eq!(err.to_string(), "subgraph error: indexing");
    }
}
