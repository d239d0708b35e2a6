//! Proof-of-work search and validation.

use crate::block::{Block, BlockHash};
use crate::transaction::Transaction;
use std::sync::atomic::{AtomicBool, Ordering};

/// Timestamp pinned into every proof candidate. The search must be
/// reproducible, so clock drift between guesses cannot be allowed to change
/// which nonces are valid.
const PROOF_TIMESTAMP: i64 = 0;

/// True when the candidate block hashes to `difficulty` leading zero hex
/// characters. Difficulty zero accepts every nonce.
pub fn valid_proof(
    nonce: u64,
    previous_hash: &BlockHash,
    transactions: &[Transaction],
    difficulty: usize,
) -> bool {
    valid_proof_digest(
        nonce,
        previous_hash,
        &Block::transactions_digest(transactions),
        difficulty,
    )
}

/// Inner predicate over the precomputed transactions digest, so the search
/// loop hashes the transaction list once instead of once per guess.
fn valid_proof_digest(
    nonce: u64,
    previous_hash: &BlockHash,
    transactions_digest: &BlockHash,
    difficulty: usize,
) -> bool {
    let guess = Block::hash_fields(nonce, previous_hash, PROOF_TIMESTAMP, transactions_digest);
    hex::encode(guess).chars().take(difficulty).all(|c| c == '0')
}

/// Linear scan from zero; returns the smallest nonce satisfying
/// [`valid_proof`]. Does not return until one is found.
pub fn proof_of_work(
    previous_hash: &BlockHash,
    transactions: &[Transaction],
    difficulty: usize,
) -> u64 {
    let transactions_digest = Block::transactions_digest(transactions);
    let mut nonce = 0u64;
    while !valid_proof_digest(nonce, previous_hash, &transactions_digest, difficulty) {
        nonce += 1;
    }
    nonce
}

/// The same scan, but checks `cancel` before every guess and gives up with
/// `None` once it is set. Cancellation never changes which nonces are valid;
/// an uncancelled run returns exactly what [`proof_of_work`] would.
pub fn proof_of_work_interruptible(
    previous_hash: &BlockHash,
    transactions: &[Transaction],
    difficulty: usize,
    cancel: &AtomicBool,
) -> Option<u64> {
    let transactions_digest = Block::transactions_digest(transactions);
    let mut nonce = 0u64;
    loop {
        if cancel.load(Ordering::Relaxed) {
            return None;
        }
        if valid_proof_digest(nonce, previous_hash, &transactions_digest, difficulty) {
            return Some(nonce);
        }
        nonce += 1;
    }
}
