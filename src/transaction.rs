//! Value transfers and the reserved reward sender.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// SHA-256 digest of a transaction's canonical encoding.
pub type TxHash = [u8; 32];

/// Reserved sender address for system-minted mining rewards. Transactions
/// from this sender bypass signature verification and are only created by
/// the mining cycle itself; externally submitted transfers claiming it are
/// rejected before they reach the pool.
pub const REWARD_SENDER: &str = "THE BLOCKCHAIN";

/// A single value transfer. Constructed once and never mutated; identity
/// follows from the three fields alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub recipient: String,
    pub value: f64,
}

impl Transaction {
    pub fn new(sender: &str, recipient: &str, value: f64) -> Self {
        Transaction {
            sender: sender.to_string(),
            recipient: recipient.to_string(),
            value,
        }
    }

    /// True for system-minted reward transactions.
    pub fn is_reward(&self) -> bool {
        self.sender == REWARD_SENDER
    }

    /// Canonical byte encoding used for hashing and signing: length-prefixed
    /// sender and recipient followed by the little-endian IEEE-754 bits of
    /// the value. Field order is fixed, so equal fields always encode to
    /// equal bytes regardless of how the transaction was produced.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.sender.len() + self.recipient.len() + 24);
        bytes.extend_from_slice(&(self.sender.len() as u64).to_le_bytes());
        bytes.extend_from_slice(self.sender.as_bytes());
        bytes.extend_from_slice(&(self.recipient.len() as u64).to_le_bytes());
        bytes.extend_from_slice(self.recipient.as_bytes());
        bytes.extend_from_slice(&self.value.to_le_bytes());
        bytes
    }

    /// SHA-256 digest of the canonical encoding.
    pub fn hash(&self) -> TxHash {
        Sha256::digest(self.canonical_bytes()).into()
    }
}
