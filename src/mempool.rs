//! Pending-transaction pool and its signature gate.

use crate::crypto::verify_signature;
use crate::transaction::Transaction;
use tracing::warn;

/// Ordered pool of verified, unconfirmed transactions. The pool is owned
/// exclusively by the chain; every mutator takes `&mut self`, so submission,
/// snapshotting and draining are serialized by a single writer.
#[derive(Debug, Default)]
pub struct Mempool {
    transactions: Vec<Transaction>,
}

impl Mempool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gate one transaction into the pool. Reward transactions always pass;
    /// any other sender must present a signature over the transaction's
    /// canonical bytes that verifies against the given public key. Returns
    /// whether the transaction was accepted.
    pub fn submit(
        &mut self,
        tx: Transaction,
        public_key: Option<&[u8]>,
        signature: Option<&[u8]>,
    ) -> bool {
        if tx.is_reward() {
            self.transactions.push(tx);
            return true;
        }

        let verified = match (public_key, signature) {
            (Some(pk), Some(sig)) => verify_signature(pk, &tx.canonical_bytes(), sig).is_ok(),
            _ => false,
        };

        if verified {
            self.transactions.push(tx);
            true
        } else {
            warn!(
                sender = %tx.sender,
                recipient = %tx.recipient,
                "rejected transaction: signature verification failed"
            );
            false
        }
    }

    /// Independent deep copy of the pooled transactions, in submission
    /// order. Later pool mutation cannot reach into a snapshot.
    pub fn snapshot(&self) -> Vec<Transaction> {
        self.transactions.clone()
    }

    /// Empty the pool. Called once per successful mining cycle, after the
    /// snapshot for that block was taken.
    pub fn drain(&mut self) {
        self.transactions.clear();
    }

    /// Remove the trailing reward transaction, if any. Unwinds the reward
    /// injected by a mining cycle that was cancelled before it appended a
    /// block, leaving earlier submissions untouched.
    pub fn retract_reward(&mut self) -> bool {
        if matches!(self.transactions.last(), Some(tx) if tx.is_reward()) {
            self.transactions.pop();
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
