//! Blocks and block hashing.

use crate::transaction::Transaction;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// SHA-256 digest of a block's canonical encoding.
pub type BlockHash = [u8; 32];

/// One link in the chain. The stored timestamp is informational; the
/// proof-of-work predicate hashes a pinned timestamp instead so that clock
/// drift between guesses cannot change which nonces are valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub nonce: u64,
    #[serde(with = "hex_digest")]
    pub previous_hash: BlockHash,
    #[serde(rename = "time_stamp")]
    pub timestamp: i64,
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// Build a block stamped with the current wall clock, in nanoseconds.
    pub fn new(nonce: u64, previous_hash: BlockHash, transactions: Vec<Transaction>) -> Self {
        Block {
            nonce,
            previous_hash,
            timestamp: Utc::now().timestamp_nanos_opt().unwrap_or_default(),
            transactions,
        }
    }

    /// The all-zero block whose digest seeds every chain.
    pub fn zero() -> Self {
        Block {
            nonce: 0,
            previous_hash: [0u8; 32],
            timestamp: 0,
            transactions: Vec::new(),
        }
    }

    /// The `previous_hash` carried by every genesis block.
    pub fn genesis_digest() -> BlockHash {
        Self::zero().hash()
    }

    /// SHA-256 over the transaction digests in block order. Reordering the
    /// transactions changes the result.
    pub fn transactions_digest(transactions: &[Transaction]) -> BlockHash {
        let mut hasher = Sha256::new();
        for tx in transactions {
            hasher.update(tx.hash());
        }
        hasher.finalize().into()
    }

    /// Canonical block digest: nonce, previous hash, timestamp and the
    /// transactions digest, hashed in that fixed order.
    pub fn hash(&self) -> BlockHash {
        Self::hash_fields(
            self.nonce,
            &self.previous_hash,
            self.timestamp,
            &Self::transactions_digest(&self.transactions),
        )
    }

    pub(crate) fn hash_fields(
        nonce: u64,
        previous_hash: &BlockHash,
        timestamp: i64,
        transactions_digest: &BlockHash,
    ) -> BlockHash {
        let mut hasher = Sha256::new();
        hasher.update(nonce.to_le_bytes());
        hasher.update(previous_hash);
        hasher.update(timestamp.to_le_bytes());
        hasher.update(transactions_digest);
        hasher.finalize().into()
    }
}

/// Serde helper rendering 32-byte digests as lowercase hex strings.
pub(crate) mod hex_digest {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(digest: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(digest))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[u8; 32], D::Error> {
        let s = String::deserialize(deserializer)?;
        let mut digest = [0u8; 32];
        hex::decode_to_slice(&s, &mut digest).map_err(serde::de::Error::custom)?;
        Ok(digest)
    }
}
