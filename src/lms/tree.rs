//! Merkle tree construction over a flat, index-addressed node arena.
//!
//! The tree is stored as an array of `2^(h+1)` digest slots: slot `2^h + i`
//! holds the hash of leaf `i`'s one-time public key, slot `r < 2^h` holds
//! `H(I || u32str(r) || D_INTR || T[2r] || T[2r+1])`, and slot 1 is the
//! root. Slot 0 is unused. Leaves are independent and computed in
//! parallel; internal levels are computed bottom-up, each level only after
//! the level below it has fully completed.

use crate::constants::{D_INTR, D_LEAF, HASH_LEN};
use crate::lms::modes::LmsMode;
use crate::ots;
use crate::ots::LmsOtsMode;
use crate::types::{Identifier, Node, Seed};
use digest::Digest;
use rayon::prelude::*;
use sha2::Sha256;

/// `T[r] = H(I || u32str(r) || D_LEAF || K)`
pub(crate) fn leaf_hash(id: &Identifier, r: u32, k: &Node) -> Node {
    Sha256::new()
        .chain_update(id)
        .chain_update(r.to_be_bytes())
        .chain_update(D_LEAF)
        .chain_update(k)
        .finalize()
        .into()
}

/// `T[r] = H(I || u32str(r) || D_INTR || left || right)`
pub(crate) fn internal_hash(id: &Identifier, r: u32, left: &Node, right: &Node) -> Node {
    Sha256::new()
        .chain_update(id)
        .chain_update(r.to_be_bytes())
        .chain_update(D_INTR)
        .chain_update(left)
        .chain_update(right)
        .finalize()
        .into()
}

/// Builds the full node array for the tree rooted at `T[1]`.
///
/// `num_cores` bounds the worker pool; `0` uses the global rayon pool.
/// Allocates `2^(h+1)` digests up front, so `h` must be sized to the
/// available memory (`h = 25` needs 2 GiB).
pub(crate) fn build_tree(
    mode: LmsMode,
    ots_mode: LmsOtsMode,
    id: &Identifier,
    seed: &Seed,
    num_cores: usize,
) -> Vec<Node> {
    if num_cores == 0 {
        return build_levels(mode, ots_mode, id, seed);
    }
    match rayon::ThreadPoolBuilder::new().num_threads(num_cores).build() {
        Ok(pool) => pool.install(|| build_levels(mode, ots_mode, id, seed)),
        // no scoped pool available, run on the global one
        Err(_) => build_levels(mode, ots_mode, id, seed),
    }
}

fn build_levels(mode: LmsMode, ots_mode: LmsOtsMode, id: &Identifier, seed: &Seed) -> Vec<Node> {
    let leaves = mode.leaves() as usize;
    let mut tree = vec![[0u8; HASH_LEN]; 2 * leaves];

    // all leaves are pure functions of their index
    let (_, leaf_slots) = tree.split_at_mut(leaves);
    leaf_slots.par_iter_mut().enumerate().for_each(|(q, slot)| {
        let ots_key = ots::SigningKey::new_from_seed(ots_mode, q as u32, *id, seed);
        *slot = leaf_hash(id, (leaves + q) as u32, &ots_key.public().k);
    });

    // levels strictly bottom-up; `par_iter_mut` joins before the next
    // level starts, so no partial level is ever read
    for level in (0..mode.h()).rev() {
        let row_start = 1usize << level;
        let row_end = 1usize << (level + 1);
        let (head, children) = tree.split_at_mut(row_end);
        head[row_start..]
            .par_iter_mut()
            .enumerate()
            .for_each(|(i, slot)| {
                let r = row_start + i;
                let left = &children[2 * r - row_end];
                let right = &children[2 * r + 1 - row_end];
                *slot = internal_hash(id, r as u32, left, right);
            });
    }

    tree
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ID_LEN;

    #[test]
    fn test_tree_shape_and_links() {
        let id = [0x42; ID_LEN];
        let seed = [7u8; 32];
        let tree = build_tree(
            LmsMode::Sha256M32H2,
            LmsOtsMode::Sha256N32W8,
            &id,
            &seed,
            0,
        );

        assert_eq!(tree.len(), 8);
        // every internal node hashes its two children
        for r in 1..4u32 {
            let expected = internal_hash(
                &id,
                r,
                &tree[2 * r as usize],
                &tree[2 * r as usize + 1],
            );
            assert_eq!(tree[r as usize], expected);
        }
    }

    #[test]
    fn test_build_is_deterministic_across_pools() {
        let id = [0x13; ID_LEN];
        let seed = [0x37; 32];
        let sequentialish = build_tree(
            LmsMode::Sha256M32H5,
            LmsOtsMode::Sha256N32W4,
            &id,
            &seed,
            1,
        );
        let parallel = build_tree(
            LmsMode::Sha256M32H5,
            LmsOtsMode::Sha256N32W4,
            &id,
            &seed,
            4,
        );
        let global = build_tree(
            LmsMode::Sha256M32H5,
            LmsOtsMode::Sha256N32W4,
            &id,
            &seed,
            0,
        );
        assert_eq!(sequentialish, parallel);
        assert_eq!(sequentialish, global);
    }
}
