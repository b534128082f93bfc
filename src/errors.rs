use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Initialization error: {0}")]
    InitializationError(String),

    #[error("Config error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, SimulationError>;
