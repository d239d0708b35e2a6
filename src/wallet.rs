//! Caller-side identity: a keypair plus its derived ledger address.
//!
//! The ledger itself never holds a wallet. Callers generate one, sign the
//! canonical bytes of their transfers and submit the signature alongside the
//! public key; only the verification side lives in the chain.

use crate::crypto::KeyPair;
use crate::error::ChainError;
use crate::transaction::Transaction;
use secp256k1::constants::{COMPACT_SIGNATURE_SIZE, PUBLIC_KEY_SIZE};

pub struct Wallet {
    keypair: KeyPair,
    address: String,
}

impl Wallet {
    /// Generate a fresh wallet with a random keypair.
    pub fn generate() -> Self {
        let keypair = KeyPair::generate();
        let address = keypair.address();
        Wallet { keypair, address }
    }

    /// Restore a wallet from a hex-encoded secret key.
    pub fn from_secret_hex(secret_hex: &str) -> Result<Self, ChainError> {
        let bytes = hex::decode(secret_hex)
            .map_err(|e| ChainError::Crypto(format!("Invalid secret key hex: {}", e)))?;
        let keypair = KeyPair::from_secret_bytes(&bytes)?;
        let address = keypair.address();
        Ok(Wallet { keypair, address })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn public_key_bytes(&self) -> [u8; PUBLIC_KEY_SIZE] {
        self.keypair.public_key_bytes()
    }

    pub fn public_key_hex(&self) -> String {
        hex::encode(self.keypair.public_key_bytes())
    }

    pub fn secret_key_hex(&self) -> String {
        hex::encode(self.keypair.secret_key.secret_bytes())
    }

    /// Sign a transaction's canonical bytes with this wallet's secret key.
    pub fn sign_transaction(
        &self,
        tx: &Transaction,
    ) -> Result<[u8; COMPACT_SIGNATURE_SIZE], ChainError> {
        self.keypair.sign(&tx.canonical_bytes())
    }
}
