//! A minimal, single-process demonstration of blockchain mechanics: a
//! tamper-evident append-only ledger of proof-of-work blocks carrying
//! signed value-transfer transactions.
//!
//! Built for learners, not production use. The mining digest and the
//! difficulty target are chosen for clarity over security, quirks included;
//! see [`blockchain::ProofOfWork`] for details.
//!
//! ```no_run
//! use toychain::blockchain::{Blockchain, Transaction, Wallet, verify_transaction};
//!
//! let mut chain = Blockchain::new();
//! chain.add_block("first block", "Miner", vec![Transaction::new("Alice", "Bob", 1.5)]);
//! assert!(chain.is_valid());
//!
//! let wallet = Wallet::new()?;
//! let transaction = Transaction::new("Alice", "Bob", 1.5);
//! let signature = wallet.sign_transaction(&transaction)?;
//! verify_transaction(&transaction, wallet.public_key(), &signature)?;
//! # Ok::<(), toychain::blockchain::CryptoError>(())
//! ```

pub mod blockchain;

pub use blockchain::{Blockchain, Block, Transaction, Wallet};
