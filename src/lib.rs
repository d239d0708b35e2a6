//! quarrychain - an append-only proof-of-work ledger of signed value transfers
//!
//! # Architecture
//!
//! The crate is organized into logical modules:
//!
//! ## Core Ledger
//! - [`blockchain`] - Chain ownership, mining cycle, balances, verification
//! - [`block`] - Block structure and hashing
//! - [`transaction`] - Value transfers and the reserved reward sender
//! - [`mempool`] - Pending-transaction pool and its signature gate
//!
//! ## Consensus
//! - [`miner`] - Proof-of-work search and validation
//!
//! ## Cryptography
//! - [`crypto`] - Keypairs, signatures and address derivation (secp256k1)
//! - [`wallet`] - Caller-side identity and transaction signing
//!
//! ## Integration
//! - [`api`] - REST API server
//!
//! ## Configuration & Utilities
//! - [`config`] - Configuration management
//! - [`error`] - Error types

#![forbid(unsafe_code)]

// ============================================================================
// Core Ledger
// ============================================================================
pub mod block;
pub mod blockchain;
pub mod mempool;
pub mod transaction;

// ============================================================================
// Consensus & Mining
// ============================================================================
pub mod miner;

// ============================================================================
// Cryptography & Identity
// ============================================================================
pub mod crypto;
pub mod wallet;

// ============================================================================
// Integration
// ============================================================================
pub mod api;

// ============================================================================
// Configuration & Utilities
// ============================================================================
pub mod config;
pub mod error;
