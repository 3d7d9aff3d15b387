use thiserror::Error;

#[derive(Debug, Error)]
pub enum NeatError {
    #[error("expected {expected} input values, got {got}")]
    InputArity { expected: usize, got: usize },
    #[error("failed to load parameters: {0}")]
    Parameters(#[from] config::ConfigError),
    #[error("malformed genome record: {0}")]
    Persistence(#[from] serde_json::Error),
}
