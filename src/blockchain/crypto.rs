use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use super::transaction::Transaction;

/// Errors that can occur during cryptographic operations
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Failed to generate keypair: {0}")]
    KeypairGenerationError(String),

    #[error("Failed to sign transaction: {0}")]
    SigningError(String),

    #[error("Failed to decode signature: {0}")]
    DecodingError(String),

    #[error("Signature does not match transaction and public key")]
    SignatureInvalid,

    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),
}

/// A digital signature over a transaction, base58 encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitalSignature(pub String);

impl DigitalSignature {
    /// Creates a digital signature from raw signature bytes.
    pub fn from_signature(signature: &Signature) -> Self {
        let encoded = bs58::encode(signature.to_bytes()).into_string();
        DigitalSignature(encoded)
    }

    /// Decodes back into a raw signature.
    pub fn to_signature(&self) -> Result<Signature, CryptoError> {
        let bytes = bs58::decode(&self.0)
            .into_vec()
            .map_err(|e| CryptoError::DecodingError(e.to_string()))?;

        let signature_bytes: [u8; 64] = bytes
            .try_into()
            .map_err(|_| CryptoError::DecodingError("invalid signature length".to_string()))?;

        Ok(Signature::from_bytes(&signature_bytes))
    }
}

/// A wallet holding an Ed25519 keypair for signing transactions.
///
/// Keys live in memory only; there is no persistence. Signing and
/// verification are stateless and safe to call concurrently.
#[derive(Debug, Clone)]
pub struct Wallet {
    signing_key: SigningKey,
    verifying_key: VerifyingKey,
}

impl Wallet {
    /// Creates a new wallet with a freshly generated keypair from the
    /// operating system's secure random source.
    pub fn new() -> Result<Self, CryptoError> {
        let mut csprng = OsRng;
        let signing_key = SigningKey::generate(&mut csprng);
        let verifying_key = VerifyingKey::from(&signing_key);

        Ok(Wallet {
            signing_key,
            verifying_key,
        })
    }

    /// Reconstructs a wallet from an exported secret key.
    pub fn from_secret_key(secret_key_bytes: &[u8]) -> Result<Self, CryptoError> {
        let bytes_array: [u8; 32] = secret_key_bytes
            .try_into()
            .map_err(|_| CryptoError::InvalidPrivateKey("invalid private key length".to_string()))?;

        let signing_key = SigningKey::from_bytes(&bytes_array);
        let verifying_key = VerifyingKey::from(&signing_key);

        Ok(Wallet {
            signing_key,
            verifying_key,
        })
    }

    /// Gets the wallet's public verification key.
    pub fn public_key(&self) -> &VerifyingKey {
        &self.verifying_key
    }

    /// Exports the wallet's secret key as bytes.
    pub fn export_secret_key(&self) -> Vec<u8> {
        self.signing_key.to_bytes().to_vec()
    }

    /// Signs a transaction with the wallet's private key.
    ///
    /// The transaction's canonical representation is hashed with SHA-256 and
    /// the digest is signed, so the signature covers every field.
    pub fn sign_transaction(
        &self,
        transaction: &Transaction,
    ) -> Result<DigitalSignature, CryptoError> {
        let digest = Sha256::digest(transaction.canonical_bytes());

        let signature = self
            .signing_key
            .try_sign(&digest)
            .map_err(|e| CryptoError::SigningError(e.to_string()))?;

        Ok(DigitalSignature::from_signature(&signature))
    }
}

/// Verifies that `signature` is valid for `transaction` under `public_key`.
///
/// Recomputes the canonical representation and its SHA-256 digest, so any
/// change to the transaction's fields after signing fails verification.
/// Returns [`CryptoError::DecodingError`] for a malformed signature and
/// [`CryptoError::SignatureInvalid`] for a well-formed one that does not
/// match. Pure: depends only on its three inputs.
pub fn verify_transaction(
    transaction: &Transaction,
    public_key: &VerifyingKey,
    signature: &DigitalSignature,
) -> Result<(), CryptoError> {
    let signature = signature.to_signature()?;

    let digest = Sha256::digest(transaction.canonical_bytes());

    public_key
        .verify(&digest, &signature)
        .map_err(|_| CryptoError::SignatureInvalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallet_creation() {
        let a = Wallet::new().unwrap();
        let b = Wallet::new().unwrap();

        assert_ne!(a.public_key().as_bytes(), b.public_key().as_bytes());
    }

    #[test]
    fn test_secret_key_round_trip() {
        let wallet = Wallet::new().unwrap();
        let secret = wallet.export_secret_key();

        let restored = Wallet::from_secret_key(&secret).unwrap();
        assert_eq!(wallet.public_key().as_bytes(), restored.public_key().as_bytes());
    }

    #[test]
    fn test_from_secret_key_rejects_bad_length() {
        let result = Wallet::from_secret_key(&[0u8; 16]);
        assert!(matches!(result, Err(CryptoError::InvalidPrivateKey(_))));
    }

    #[test]
    fn test_sign_and_verify() {
        let wallet = Wallet::new().unwrap();
        let transaction = Transaction::new("Alice", "Bob", 1.5);

        let signature = wallet.sign_transaction(&transaction).unwrap();
        assert!(verify_transaction(&transaction, wallet.public_key(), &signature).is_ok());
    }

    #[test]
    fn test_verify_fails_after_tampering() {
        let wallet = Wallet::new().unwrap();
        let transaction = Transaction::new("Alice", "Bob", 1.5);
        let signature = wallet.sign_transaction(&transaction).unwrap();

        let mut tampered = transaction.clone();
        tampered.amount = 2.0;
        assert!(matches!(
            verify_transaction(&tampered, wallet.public_key(), &signature),
            Err(CryptoError::SignatureInvalid)
        ));

        let mut tampered = transaction.clone();
        tampered.sender = "Mallory".to_string();
        assert!(verify_transaction(&tampered, wallet.public_key(), &signature).is_err());

        let mut tampered = transaction.clone();
        tampered.receiver = "Carol".to_string();
        assert!(verify_transaction(&tampered, wallet.public_key(), &signature).is_err());

        let mut tampered = transaction.clone();
        tampered.coinbase = true;
        assert!(verify_transaction(&tampered, wallet.public_key(), &signature).is_err());
    }

    #[test]
    fn test_verify_fails_with_wrong_key() {
        let wallet = Wallet::new().unwrap();
        let other = Wallet::new().unwrap();
        let transaction = Transaction::new("Alice", "Bob", 1.5);

        let signature = wallet.sign_transaction(&transaction).unwrap();
        assert!(matches!(
            verify_transaction(&transaction, other.public_key(), &signature),
            Err(CryptoError::SignatureInvalid)
        ));
    }

    #[test]
    fn test_verify_rejects_malformed_signature() {
        let wallet = Wallet::new().unwrap();
        let transaction = Transaction::new("Alice", "Bob", 1.5);

        // Not valid base58
        let garbage = DigitalSignature("not-a-signature!".to_string());
        assert!(matches!(
            verify_transaction(&transaction, wallet.public_key(), &garbage),
            Err(CryptoError::DecodingError(_))
        ));

        // Valid base58, wrong length
        let short = DigitalSignature(bs58::encode([1u8; 8]).into_string());
        assert!(matches!(
            verify_transaction(&transaction, wallet.public_key(), &short),
            Err(CryptoError::DecodingError(_))
        ));
    }
}
