use log::debug;
use serde::{Deserialize, Serialize};

use super::block::Block;
use super::pow::{ProofOfWork, DIFFICULTY};
use super::transaction::Transaction;

/// Default reward credited to a block's reward receiver.
pub const BLOCK_REWARD: f64 = 10.0;

/// An in-memory, append-only chain of blocks.
///
/// The chain is never empty: construction always produces the genesis
/// block. It only ever grows by one block at a time and is never reordered.
///
/// Not internally synchronized: concurrent [`add_block`](Self::add_block)
/// calls on a shared instance require external mutual exclusion (a single
/// owning thread or an outer mutex) to preserve the hash-linking invariant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blockchain {
    /// The chain of blocks, genesis first
    blocks: Vec<Block>,

    /// Mining difficulty used for every block in this chain
    difficulty: u32,

    /// Reward credited by the coinbase transaction of each appended block
    block_reward: f64,
}

impl Blockchain {
    /// Creates a new blockchain containing the genesis block, using the
    /// default difficulty and block reward.
    pub fn new() -> Self {
        Self::with_config(DIFFICULTY, BLOCK_REWARD)
    }

    /// Creates a new blockchain with explicit difficulty and block reward.
    pub fn with_config(difficulty: u32, block_reward: f64) -> Self {
        let genesis = Block::genesis(difficulty);

        Blockchain {
            blocks: vec![genesis],
            difficulty,
            block_reward,
        }
    }

    /// Mines and appends a new block carrying `data` and the given
    /// transactions, with a coinbase transaction crediting the block reward
    /// to `reward_receiver` prepended.
    ///
    /// The new block's `prev_hash` is the current tip's hash. Mining cannot
    /// fail, so neither can this; it blocks until the search completes.
    pub fn add_block(
        &mut self,
        data: impl Into<String>,
        reward_receiver: impl Into<String>,
        transactions: Vec<Transaction>,
    ) {
        let coinbase = Transaction::new_coinbase(reward_receiver, self.block_reward);

        let mut block_transactions = Vec::with_capacity(transactions.len() + 1);
        block_transactions.push(coinbase);
        block_transactions.extend(transactions);

        let prev_hash = self.tip().hash.clone();
        let block = Block::create(data, prev_hash, block_transactions, self.difficulty);

        debug!("appended block {} at height {}", block.hash_hex(), self.blocks.len());

        self.blocks.push(block);
    }

    /// Returns the most recently appended block.
    pub fn tip(&self) -> &Block {
        // the chain is never empty by construction
        self.blocks.last().unwrap()
    }

    /// Returns all blocks, genesis first.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Returns the number of blocks in the chain.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns the difficulty this chain mines at.
    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    /// Checks the whole chain: every block's `prev_hash` must equal its
    /// predecessor's hash and every block must pass proof-of-work
    /// validation at this chain's difficulty.
    pub fn is_valid(&self) -> bool {
        for i in 1..self.blocks.len() {
            if self.blocks[i].prev_hash != self.blocks[i - 1].hash {
                return false;
            }
        }

        self.blocks
            .iter()
            .all(|block| ProofOfWork::new(block, self.difficulty).validate())
    }
}

impl Default for Blockchain {
    fn default() -> Self {
        Self::new()
    }
}
