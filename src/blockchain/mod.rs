// Blockchain module
//
// This module contains the core blockchain implementation including:
// - Block structure
// - Blockchain structure
// - Transaction structure
// - Proof of work algorithm
// - Wallet and signature utilities

pub mod block;
pub mod chain;
pub mod crypto;
pub mod pow;
pub mod transaction;

// Re-export main components for easier access
pub use block::Block;
pub use chain::{Blockchain, BLOCK_REWARD};
pub use crypto::{verify_transaction, CryptoError, DigitalSignature, Wallet};
pub use pow::{ProofOfWork, DIFFICULTY};
pub use transaction::{Transaction, COINBASE_SENDER, GENESIS_RECEIVER};
