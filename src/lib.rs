//! Leighton-Micali hash-based signatures (RFC 8554).
//!
//! LMS is a stateful, quantum-resistant signature scheme built entirely
//! from a hash function: a Merkle tree whose leaves are one-time (LM-OTS)
//! public keys. See [`lms`] for anything LMS related and [`ots`] for
//! anything LM-OTS related.
//!
//! The private key is a consumable resource. Every signature spends one
//! tree leaf, the leaf counter only moves forward, and a key whose `2^h`
//! leaves are spent is permanently exhausted. Reusing a leaf (for example
//! by restoring an old copy of a key) leaks enough information to forge
//! signatures, so hosts that persist keys must persist the counter before
//! releasing each signature.
//!
//! Parameter sets are selected at runtime by their registry typecodes; the
//! full Merkle tree is built eagerly at key generation, using a worker
//! pool sized by the caller.
//!
//! # Example
//! ```
//! use leighton_micali::{LmsMode, LmsOtsMode, SigningKey, signature::Verifier};
//!
//! let mut rng = rand::thread_rng();
//!
//! // Generate a key pair with 32 one-time leaves
//! let mut sk = SigningKey::new(LmsMode::Sha256M32H5, LmsOtsMode::Sha256N32W8, 0, &mut rng);
//! let pk = sk.public();
//!
//! let msg = b"hello";
//! let sig = sk.sign(msg).unwrap();
//!
//! assert!(pk.verify(msg, &sig).is_ok());
//! assert_eq!(sk.remaining_signatures(), 31);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod lms;
pub mod ots;

pub(crate) mod constants;
mod error;
pub(crate) mod types;
mod wire;

// Re-export the `signature` crate
pub use signature;

pub use crate::error::Error;
pub use crate::lms::{LmsMode, Signature, SigningKey, VerifyingKey};
pub use crate::ots::LmsOtsMode;
pub use crate::types::{Identifier, Node, Seed};
pub use crate::wire::{public_key_len, signature_len};
