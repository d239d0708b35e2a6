//! Error types for quarrychain

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ChainError {
    #[error("Invalid block linkage at height {0}")]
    InvalidBlockLinkage(usize),
    #[error("Invalid proof of work at height {0}")]
    InvalidProofOfWork(usize),
    #[error("Invalid genesis block")]
    InvalidGenesis,
    #[error("Cryptographic error: {0}")]
    Crypto(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, ChainError>;
