use rand::Rng;
use serde::{Deserialize, Serialize};

use super::pow::ProofOfWork;
use super::transaction::{Transaction, GENESIS_RECEIVER};

/// Represents a block in the blockchain.
///
/// A block holds a data payload, a reference to the previous block's hash
/// and its own mined hash. Blocks are immutable after mining in correct
/// usage; the hash is only meaningful for the difficulty it was mined at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    /// Digest bytes identifying this block, produced by mining
    pub hash: Vec<u8>,

    /// Opaque payload
    pub data: String,

    /// Hash of the previous block; empty for the genesis block
    pub prev_hash: Vec<u8>,

    /// Winning nonce found by the proof-of-work search
    pub nonce: u64,

    /// Transactions carried by this block
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// Constructs and mines a new block.
    ///
    /// Picks a random initial nonce, runs the proof-of-work search and
    /// returns the block with the winning nonce and hash filled in. Mining
    /// always eventually succeeds, so there is no error path; see
    /// [`ProofOfWork::mine`] for the liveness caveat at high difficulty.
    pub fn create(
        data: impl Into<String>,
        prev_hash: Vec<u8>,
        transactions: Vec<Transaction>,
        difficulty: u32,
    ) -> Self {
        let initial_nonce = rand::thread_rng().gen_range(0..10_000);

        let mut block = Block {
            hash: Vec::new(),
            data: data.into(),
            prev_hash,
            nonce: initial_nonce,
            transactions,
        };

        let (nonce, hash) = ProofOfWork::new(&block, difficulty).mine();

        block.nonce = nonce;
        block.hash = hash;

        block
    }

    /// Creates the first block in a chain: a single coinbase transaction
    /// crediting nothing to the reserved genesis receiver, the `"Genesis"`
    /// payload and an empty previous hash.
    pub fn genesis(difficulty: u32) -> Self {
        let coinbase = Transaction::new_coinbase(GENESIS_RECEIVER, 0.0);

        Block::create("Genesis", Vec::new(), vec![coinbase], difficulty)
    }

    /// Returns the block hash as a hexadecimal string.
    pub fn hash_hex(&self) -> String {
        hex::encode(&self.hash)
    }
}
