use serde::{Deserialize, Serialize};

/// Reserved sender identifier for coinbase (block reward) transactions.
pub const COINBASE_SENDER: &str = "Coinbase";

/// Reserved receiver identifier for the genesis block's coinbase transaction.
pub const GENESIS_RECEIVER: &str = "Genesis";

/// Represents a simple transfer of value between two parties.
///
/// Sender and receiver are plain string identifiers and the amount may be
/// fractional. Non-negativity of the amount is a convention, not enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Sender's identifier
    pub sender: String,

    /// Receiver's identifier
    pub receiver: String,

    /// Amount being transferred
    pub amount: f64,

    /// Marks a block-reward (mint) transaction
    pub coinbase: bool,
}

impl Transaction {
    /// Creates an ordinary transfer between two parties.
    pub fn new(sender: impl Into<String>, receiver: impl Into<String>, amount: f64) -> Self {
        Transaction {
            sender: sender.into(),
            receiver: receiver.into(),
            amount,
            coinbase: false,
        }
    }

    /// Creates a coinbase transaction crediting a block reward to `receiver`.
    pub fn new_coinbase(receiver: impl Into<String>, amount: f64) -> Self {
        Transaction {
            sender: COINBASE_SENDER.to_string(),
            receiver: receiver.into(),
            amount,
            coinbase: true,
        }
    }

    /// Returns the deterministic byte representation used for signing and
    /// verification: sender, receiver, the amount with fixed six-decimal
    /// formatting and the coinbase flag as text, concatenated in that order.
    ///
    /// Structurally equal transactions always produce byte-identical output.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        format!(
            "{}{}{:.6}{}",
            self.sender, self.receiver, self.amount, self.coinbase
        )
        .into_bytes()
    }

    /// Checks if this is a coinbase (block reward) transaction.
    pub fn is_coinbase(&self) -> bool {
        self.coinbase
    }
}
