//! Shared type aliases

use crate::constants::{HASH_LEN, ID_LEN, SEED_LEN};

/// The 16 byte identifier `I`, fixed for the lifetime of one key pair.
pub type Identifier = [u8; ID_LEN];

/// The private seed all one-time keys of a tree are derived from.
pub type Seed = [u8; SEED_LEN];

/// A single hash digest: a Merkle tree node, a chain element, or `K`.
pub type Node = [u8; HASH_LEN];
