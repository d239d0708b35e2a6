//! Cryptographic primitives: secp256k1 keypairs, ECDSA signing and
//! verification, ledger address derivation.

use crate::error::ChainError;
use once_cell::sync::Lazy;
use rand::rngs::OsRng;
use secp256k1::{
    constants::{COMPACT_SIGNATURE_SIZE, PUBLIC_KEY_SIZE, SECRET_KEY_SIZE},
    ecdsa::Signature,
    All, Message, PublicKey, Secp256k1, SecretKey,
};
use sha2::{Digest, Sha256};

/// A thread-safe, lazily initialized Secp256k1 context shared by every
/// signing and verification call.
static SECP256K1_CONTEXT: Lazy<Secp256k1<All>> = Lazy::new(Secp256k1::new);

/// Derive the ledger address for a public key: lowercase hex of the SHA-256
/// digest of the compressed key bytes. Addresses are opaque strings to the
/// rest of the crate.
pub fn derive_address(public_key: &PublicKey) -> String {
    let pubkey_bytes: [u8; PUBLIC_KEY_SIZE] = public_key.serialize();
    hex::encode(Sha256::digest(pubkey_bytes))
}

#[derive(Debug, Clone)]
pub struct KeyPair {
    pub secret_key: SecretKey,
    pub public_key: PublicKey,
}

impl KeyPair {
    /// Generates a new random KeyPair using the OS random number generator.
    pub fn generate() -> Self {
        let secret_key = SecretKey::new(&mut OsRng);
        let public_key = PublicKey::from_secret_key(&SECP256K1_CONTEXT, &secret_key);
        KeyPair {
            secret_key,
            public_key,
        }
    }

    /// Creates a KeyPair from an existing SecretKey.
    pub fn from_secret_key(secret_key: SecretKey) -> Self {
        let public_key = PublicKey::from_secret_key(&SECP256K1_CONTEXT, &secret_key);
        KeyPair {
            secret_key,
            public_key,
        }
    }

    /// Creates a KeyPair from raw secret key bytes.
    pub fn from_secret_bytes(bytes: &[u8]) -> Result<Self, ChainError> {
        let secret_key = SecretKey::from_slice(bytes).map_err(|e| {
            if bytes.len() != SECRET_KEY_SIZE {
                ChainError::Crypto(format!(
                    "Secret key must be {} bytes, got {}",
                    SECRET_KEY_SIZE,
                    bytes.len()
                ))
            } else {
                ChainError::Crypto(format!("Invalid secret key bytes: {}", e))
            }
        })?;

        Ok(Self::from_secret_key(secret_key))
    }

    /// The ledger address owned by this keypair.
    pub fn address(&self) -> String {
        derive_address(&self.public_key)
    }

    /// Returns the KeyPair's public key as a compressed byte array.
    pub fn public_key_bytes(&self) -> [u8; PUBLIC_KEY_SIZE] {
        self.public_key.serialize()
    }

    /// Signs a message (hashed with SHA-256 first) and returns the compact
    /// signature bytes.
    pub fn sign(&self, message: &[u8]) -> Result<[u8; COMPACT_SIGNATURE_SIZE], ChainError> {
        let digest: [u8; 32] = Sha256::digest(message).into();
        let message = Message::from_digest_slice(&digest)
            .map_err(|e| ChainError::Crypto(format!("Failed to create message: {}", e)))?;

        let signature = SECP256K1_CONTEXT.sign_ecdsa(&message, &self.secret_key);
        Ok(signature.serialize_compact())
    }
}

/// Verifies an ECDSA signature given the raw public key bytes, message, and
/// signature bytes. The message is hashed with SHA-256 before verification,
/// matching [`KeyPair::sign`].
pub fn verify_signature(
    public_key_bytes: &[u8],
    message: &[u8],
    signature_bytes: &[u8],
) -> Result<(), ChainError> {
    if public_key_bytes.len() != PUBLIC_KEY_SIZE {
        return Err(ChainError::Crypto(format!(
            "Public key must be exactly {} bytes (compressed), got {}",
            PUBLIC_KEY_SIZE,
            public_key_bytes.len()
        )));
    }
    if signature_bytes.len() != COMPACT_SIGNATURE_SIZE {
        return Err(ChainError::Crypto(format!(
            "Signature must be exactly {} bytes (compact), got {}",
            COMPACT_SIGNATURE_SIZE,
            signature_bytes.len()
        )));
    }

    let public_key = PublicKey::from_slice(public_key_bytes)
        .map_err(|e| ChainError::Crypto(format!("Invalid public key: {}", e)))?;

    let digest: [u8; 32] = Sha256::digest(message).into();
    let message = Message::from_digest_slice(&digest)
        .map_err(|e| ChainError::Crypto(format!("Failed to create message: {}", e)))?;

    let signature = Signature::from_compact(signature_bytes)
        .map_err(|e| ChainError::Crypto(format!("Invalid signature: {}", e)))?;

    SECP256K1_CONTEXT
        .verify_ecdsa(&message, &signature, &public_key)
        .map_err(|_| ChainError::Crypto("Signature verification failed".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_generation() {
        let keypair = KeyPair::generate();
        assert_eq!(keypair.public_key_bytes().len(), PUBLIC_KEY_SIZE);
        assert_eq!(keypair.secret_key.secret_bytes().len(), SECRET_KEY_SIZE);
    }

    #[test]
    fn test_address_derivation() {
        let keypair = KeyPair::generate();
        let address = keypair.address();
        // Addresses are hex-encoded 32-byte digests
        assert_eq!(address.len(), 64);
        assert!(address.chars().all(|c| c.is_ascii_hexdigit()));
        // Deterministic for the same key
        assert_eq!(address, derive_address(&keypair.public_key));
    }

    #[test]
    fn test_signing_and_verification() {
        let keypair = KeyPair::generate();
        let message = b"Hello, quarrychain!";

        let signature = keypair.sign(message).unwrap();
        let pubkey_bytes = keypair.public_key_bytes();

        assert!(verify_signature(&pubkey_bytes, message, &signature).is_ok());
        assert_eq!(signature.len(), COMPACT_SIGNATURE_SIZE);
    }

    #[test]
    fn test_wrong_key_fails_verification() {
        let keypair1 = KeyPair::generate();
        let keypair2 = KeyPair::generate();

        let message = b"Test message";
        let signature = keypair1.sign(message).unwrap();
        let pubkey2_bytes = keypair2.public_key_bytes();

        let result = verify_signature(&pubkey2_bytes, message, &signature);
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            "Cryptographic error: Signature verification failed"
        );
    }

    #[test]
    fn test_tampered_message_fails_verification() {
        let keypair = KeyPair::generate();
        let message = b"Original message";
        let tampered = b"Tampered message";

        let signature = keypair.sign(message).unwrap();
        let pubkey_bytes = keypair.public_key_bytes();

        let result = verify_signature(&pubkey_bytes, tampered, &signature);
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            "Cryptographic error: Signature verification failed"
        );
    }

    #[test]
    fn test_flipped_signature_byte_fails_verification() {
        let keypair = KeyPair::generate();
        let message = b"Test message";
        let signature = keypair.sign(message).unwrap();
        let pubkey_bytes = keypair.public_key_bytes();

        for position in [0, COMPACT_SIGNATURE_SIZE / 2, COMPACT_SIGNATURE_SIZE - 1] {
            let mut corrupted = signature;
            corrupted[position] ^= 0x01;
            assert!(
                verify_signature(&pubkey_bytes, message, &corrupted).is_err(),
                "signature with byte {} flipped must not verify",
                position
            );
        }
    }

    #[test]
    fn test_invalid_key_or_sig_length_check() {
        let keypair = KeyPair::generate();
        let message = b"Test";
        let signature = keypair.sign(message).unwrap();
        let pubkey_bytes = keypair.public_key_bytes();

        let result = verify_signature(&pubkey_bytes[1..], message, &signature);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Public key must be exactly"));

        let result = verify_signature(&pubkey_bytes, message, &signature[1..]);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Signature must be exactly"));
    }

    #[test]
    fn test_from_secret_bytes_round_trip() {
        let keypair = KeyPair::generate();
        let restored = KeyPair::from_secret_bytes(&keypair.secret_key.secret_bytes()).unwrap();
        assert_eq!(restored.address(), keypair.address());
    }

    #[test]
    fn test_from_secret_bytes_invalid_length() {
        let short_bytes = [0u8; SECRET_KEY_SIZE - 1];
        let result = KeyPair::from_secret_bytes(&short_bytes);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Secret key must be"));
    }
}
