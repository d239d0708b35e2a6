//! The ledger: a hash-linked chain of blocks plus the pending pool.

use crate::block::{Block, BlockHash};
use crate::error::{ChainError, Result};
use crate::mempool::Mempool;
use crate::miner;
use crate::transaction::{Transaction, REWARD_SENDER};
use std::sync::atomic::AtomicBool;
use tracing::{info, warn};

/// Leading zero hex characters a block hash must carry. Fixed for the life
/// of the chain.
pub const MINING_DIFFICULTY: usize = 3;

/// Value credited to the miner by the reward transaction of each mined block.
pub const MINING_REWARD: f64 = 1.0;

/// Sole owner of the chain and its pool. Every mutation goes through
/// `&mut self`, so one writer at a time is enforced by the borrow checker;
/// concurrent hosts wrap the whole ledger in a single lock.
pub struct Blockchain {
    blocks: Vec<Block>,
    mempool: Mempool,
    miner_address: String,
}

impl Blockchain {
    /// Create a chain holding its genesis block: nonce 0, previous hash
    /// equal to the digest of the all-zero block, no transactions.
    /// `miner_address` receives the reward of every block this instance
    /// mines.
    pub fn new(miner_address: &str) -> Self {
        let mut chain = Blockchain {
            blocks: Vec::new(),
            mempool: Mempool::new(),
            miner_address: miner_address.to_string(),
        };
        chain.append_block(0, Block::genesis_digest(), Vec::new());
        chain
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn miner_address(&self) -> &str {
        &self.miner_address
    }

    /// The most recently appended block.
    ///
    /// # Panics
    ///
    /// Panics if the chain is empty, which construction makes impossible; an
    /// empty chain is a torn instance, not a runtime condition to limp past.
    pub fn last_block(&self) -> &Block {
        self.blocks.last().expect("chain holds at least the genesis block")
    }

    /// Pending transactions in submission order, copied out of the pool.
    pub fn pending_transactions(&self) -> Vec<Transaction> {
        self.mempool.snapshot()
    }

    /// Gate one external transfer into the pool. Returns false when the
    /// sender claims the reserved reward address, when the value is not a
    /// finite number, or when the signature does not verify over the
    /// transaction's canonical bytes.
    pub fn submit_transaction(
        &mut self,
        sender: &str,
        recipient: &str,
        value: f64,
        public_key: &[u8],
        signature: &[u8],
    ) -> bool {
        if sender == REWARD_SENDER {
            warn!(%recipient, "rejected transaction: reserved reward sender");
            return false;
        }
        if !value.is_finite() {
            warn!(%sender, "rejected transaction: value is not finite");
            return false;
        }
        let tx = Transaction::new(sender, recipient, value);
        self.mempool.submit(tx, Some(public_key), Some(signature))
    }

    /// One full mining cycle: inject the reward transaction, run the nonce
    /// search over a snapshot of the pool, append the block and drain the
    /// pool. Returns true once the block is appended.
    pub fn mine(&mut self) -> bool {
        self.mine_interruptible(&AtomicBool::new(false))
    }

    /// [`Blockchain::mine`], except the nonce search gives up once `cancel`
    /// is set. On cancellation the injected reward is retracted and both
    /// chain and pool are left exactly as they were before the call.
    pub fn mine_interruptible(&mut self, cancel: &AtomicBool) -> bool {
        let reward = Transaction::new(REWARD_SENDER, &self.miner_address, MINING_REWARD);
        self.mempool.submit(reward, None, None);

        let snapshot = self.mempool.snapshot();
        let previous_hash = self.last_block().hash();

        match miner::proof_of_work_interruptible(
            &previous_hash,
            &snapshot,
            MINING_DIFFICULTY,
            cancel,
        ) {
            Some(nonce) => {
                let height = self.blocks.len();
                let transactions = snapshot.len();
                self.append_block(nonce, previous_hash, snapshot);
                self.mempool.drain();
                info!(height, nonce, transactions, "mined block");
                true
            }
            None => {
                self.mempool.retract_reward();
                warn!("mining cancelled before a valid nonce was found");
                false
            }
        }
    }

    /// Replay the full chain: add the value of every transaction received
    /// by `address`, subtract the value of every transaction it sent. Never
    /// cached; each call walks every block.
    pub fn balance_of(&self, address: &str) -> f64 {
        let mut total = 0.0;
        for block in &self.blocks {
            for tx in &block.transactions {
                if tx.recipient == address {
                    total += tx.value;
                }
                if tx.sender == address {
                    total -= tx.value;
                }
            }
        }
        total
    }

    /// Integrity check over this chain's blocks.
    pub fn verify(&self) -> Result<()> {
        verify_chain(&self.blocks, MINING_DIFFICULTY)
    }

    fn append_block(&mut self, nonce: u64, previous_hash: BlockHash, transactions: Vec<Transaction>) {
        self.blocks.push(Block::new(nonce, previous_hash, transactions));
    }
}

/// Integrity check over any block sequence: the first block must carry the
/// genesis shape, every later block must link to its predecessor's digest
/// and satisfy the proof predicate at `difficulty`.
pub fn verify_chain(blocks: &[Block], difficulty: usize) -> Result<()> {
    if let Some(genesis) = blocks.first() {
        if genesis.nonce != 0
            || genesis.previous_hash != Block::genesis_digest()
            || !genesis.transactions.is_empty()
        {
            return Err(ChainError::InvalidGenesis);
        }
    }
    for (offset, pair) in blocks.windows(2).enumerate() {
        let height = offset + 1;
        let (previous, block) = (&pair[0], &pair[1]);
        if block.previous_hash != previous.hash() {
            return Err(ChainError::InvalidBlockLinkage(height));
        }
        if !miner::valid_proof(block.nonce, &block.previous_hash, &block.transactions, difficulty) {
            return Err(ChainError::InvalidProofOfWork(height));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_reward_submission_is_rejected() {
        let mut chain = Blockchain::new("miner");
        let accepted = chain.submit_transaction(REWARD_SENDER, "mallory", 1_000_000.0, &[], &[]);
        assert!(!accepted);
        assert!(chain.pending_transactions().is_empty());
    }

    #[test]
    fn test_non_finite_value_is_rejected() {
        let mut chain = Blockchain::new("miner");
        assert!(!chain.submit_transaction("alice", "bob", f64::NAN, &[], &[]));
        assert!(!chain.submit_transaction("alice", "bob", f64::INFINITY, &[], &[]));
        assert!(chain.pending_transactions().is_empty());
    }

    #[test]
    fn test_cancelled_mine_leaves_state_untouched() {
        let mut chain = Blockchain::new("miner");
        let cancel = AtomicBool::new(true);

        assert!(!chain.mine_interruptible(&cancel));
        assert_eq!(chain.blocks().len(), 1);
        assert!(chain.pending_transactions().is_empty());
        assert_eq!(chain.balance_of("miner"), 0.0);
    }

    #[test]
    fn test_mined_block_carries_the_reward() {
        let mut chain = Blockchain::new("miner");
        assert!(chain.mine());

        let block = chain.last_block();
        assert_eq!(block.transactions.len(), 1);
        let reward = &block.transactions[0];
        assert!(reward.is_reward());
        assert_eq!(reward.recipient, "miner");
        assert_eq!(reward.value, MINING_REWARD);
        assert_eq!(chain.balance_of("miner"), MINING_REWARD);
    }

    #[test]
    fn test_verify_accepts_a_mined_chain() {
        let mut chain = Blockchain::new("miner");
        chain.mine();
        chain.mine();
        assert!(chain.verify().is_ok());
    }

    #[test]
    fn test_verify_chain_rejects_tampered_transactions() {
        let mut chain = Blockchain::new("miner");
        chain.mine();
        chain.mine();

        let mut blocks = chain.blocks().to_vec();
        blocks[1].transactions[0].value += 1.0;

        assert!(verify_chain(&blocks, MINING_DIFFICULTY).is_err());
    }

    #[test]
    fn test_verify_chain_rejects_broken_linkage() {
        let mut chain = Blockchain::new("miner");
        chain.mine();

        let mut blocks = chain.blocks().to_vec();
        blocks[1].previous_hash = [0xee; 32];

        let result = verify_chain(&blocks, MINING_DIFFICULTY);
        assert!(matches!(result, Err(ChainError::InvalidBlockLinkage(1))));
    }

    #[test]
    fn test_verify_chain_rejects_wrong_genesis() {
        let blocks = vec![Block::new(7, [0u8; 32], Vec::new())];
        let result = verify_chain(&blocks, MINING_DIFFICULTY);
        assert!(matches!(result, Err(ChainError::InvalidGenesis)));
    }
}
