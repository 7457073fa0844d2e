//! Contains the [`SigningKey`] type

use crate::constants::{ID_LEN, SEED_LEN};
use crate::error::Error;
use crate::lms::modes::LmsMode;
use crate::lms::public::VerifyingKey;
use crate::lms::signature::Signature;
use crate::lms::tree;
use crate::ots;
use crate::ots::LmsOtsMode;
use crate::types::{Identifier, Node, Seed};
use crate::wire::read_u32;
use rand_core::CryptoRngCore;
use std::fmt;
use zeroize::Zeroize;

/// Encoded length of a private-key checkpoint:
/// `u32str(lms type) || u32str(ots type) || I || u32str(q) || SEED`
const CHECKPOINT_LEN: usize = 4 + 4 + ID_LEN + 4 + SEED_LEN;

/// An LMS private key.
///
/// Owns the full Merkle tree, the seed every one-time key is derived from,
/// and the monotonic leaf counter `q`. The key moves one way through its
/// life: `q` starts at 0, every successful [`sign`](Self::sign) advances it
/// by exactly one, and at `q == 2^h` the key is permanently exhausted.
/// `q` is never rewound and there is no reset operation.
///
/// Exclusive access during signing is enforced by `&mut self`; a host that
/// shares one key across threads must wrap it in its own lock. A host that
/// persists keys must write [`q`](Self::q) (or the whole
/// [checkpoint](Self::to_bytes)) to stable storage *before* releasing a
/// signature, or a crash could replay a leaf.
pub struct SigningKey {
    mode: LmsMode,
    ots_mode: LmsOtsMode,
    id: Identifier,
    seed: Seed,
    q: u32,
    tree: Vec<Node>,
}

impl SigningKey {
    /// Generates a fresh key pair: a random identifier and seed from `rng`,
    /// then the full tree, built on `num_cores` workers (0 = default pool).
    ///
    /// The whole tree is held in memory (`2^(h+1)` digests), so the tree
    /// height must be chosen with available memory in mind.
    pub fn new(
        mode: LmsMode,
        ots_mode: LmsOtsMode,
        num_cores: usize,
        rng: &mut impl CryptoRngCore,
    ) -> Self {
        let mut id = [0u8; ID_LEN];
        rng.fill_bytes(&mut id);
        let mut seed = [0u8; SEED_LEN];
        rng.fill_bytes(&mut seed);
        Self::new_from_seed(mode, ots_mode, id, seed, num_cores)
    }

    /// Builds the key pair belonging to a fixed identifier and seed
    pub fn new_from_seed(
        mode: LmsMode,
        ots_mode: LmsOtsMode,
        id: Identifier,
        seed: Seed,
        num_cores: usize,
    ) -> Self {
        let tree = tree::build_tree(mode, ots_mode, &id, &seed, num_cores);
        Self {
            mode,
            ots_mode,
            id,
            seed,
            q: 0,
            tree,
        }
    }

    /// Signs a message with the next unused one-time leaf.
    ///
    /// Fails with [`Error::CapacityExhausted`] once every leaf is spent;
    /// that error is permanent for this key and must not be retried.
    pub fn sign(&mut self, message: &[u8]) -> Result<Signature, Error> {
        if self.q >= self.mode.leaves() {
            return Err(Error::CapacityExhausted);
        }

        let mut ots_key = ots::SigningKey::new_from_seed(self.ots_mode, self.q, self.id, &self.seed);
        let ots_sig = ots_key.sign(message)?;

        // sibling digests from leaf 2^h + q up to (not including) the root
        let mut path = Vec::with_capacity(self.mode.h());
        let mut r = (self.mode.leaves() + self.q) as usize;
        while r > 1 {
            path.push(self.tree[r ^ 1]);
            r /= 2;
        }

        let sig = Signature {
            q: self.q,
            ots_sig,
            mode: self.mode,
            path,
        };

        // advancing the counter is the last effect of a successful call
        self.q += 1;
        Ok(sig)
    }

    /// Returns the public key `(type, ots type, I, T[1])`
    pub fn public(&self) -> VerifyingKey {
        VerifyingKey::new(self.mode, self.ots_mode, self.id, self.tree[1])
    }

    /// How many one-time leaves are still unused
    pub fn remaining_signatures(&self) -> u64 {
        u64::from(self.mode.leaves() - self.q)
    }

    /// The next leaf index. Hosts persist this (or the full checkpoint)
    /// before releasing a signature.
    pub fn q(&self) -> u32 {
        self.q
    }

    /// The LMS parameter set of this key
    pub fn mode(&self) -> LmsMode {
        self.mode
    }

    /// The LM-OTS parameter set of this key's leaves
    pub fn ots_mode(&self) -> LmsOtsMode {
        self.ots_mode
    }

    /// Serializes the mutable state as a 60-byte checkpoint:
    /// `u32str(lms type) || u32str(ots type) || I || u32str(q) || SEED`.
    ///
    /// The checkpoint contains the raw seed; it grants full signing power
    /// and must be stored with the same care as the key itself.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(CHECKPOINT_LEN);
        out.extend_from_slice(&self.mode.typecode().to_be_bytes());
        out.extend_from_slice(&self.ots_mode.typecode().to_be_bytes());
        out.extend_from_slice(&self.id);
        out.extend_from_slice(&self.q.to_be_bytes());
        out.extend_from_slice(&self.seed);
        out
    }

    /// Restores a key from a checkpoint, rebuilding the tree.
    ///
    /// The restored key continues at the recorded `q`; it never rewinds.
    pub fn from_bytes(bytes: &[u8], num_cores: usize) -> Result<Self, Error> {
        if bytes.len() != CHECKPOINT_LEN {
            return Err(Error::Invalid);
        }
        let mode = LmsMode::from_typecode(read_u32(bytes, 0)?).ok_or(Error::Invalid)?;
        let ots_mode = LmsOtsMode::from_typecode(read_u32(bytes, 4)?).ok_or(Error::Invalid)?;
        // the conversions will never panic, the length was checked above
        let id: Identifier = bytes[8..8 + ID_LEN].try_into().unwrap();
        let q = read_u32(bytes, 8 + ID_LEN)?;
        let seed: Seed = bytes[12 + ID_LEN..].try_into().unwrap();

        // q == leaves restores an exhausted key, which is valid state
        if q > mode.leaves() {
            return Err(Error::Invalid);
        }

        let mut key = Self::new_from_seed(mode, ots_mode, id, seed, num_cores);
        key.q = q;
        Ok(key)
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("mode", &self.mode)
            .field("ots_mode", &self.ots_mode)
            .field("id", &self.id)
            .field("q", &self.q)
            .finish_non_exhaustive()
    }
}

impl Drop for SigningKey {
    fn drop(&mut self) {
        self.seed.zeroize();
    }
}

impl signature::SignerMut<Signature> for SigningKey {
    fn try_sign(&mut self, msg: &[u8]) -> Result<Signature, signature::Error> {
        self.sign(msg).map_err(signature::Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::SigningKey;
    use crate::error::Error;
    use crate::lms::modes::LmsMode;
    use crate::ots::LmsOtsMode;
    use hex_literal::hex;
    use signature::Verifier;

    #[test]
    // RFC 8554 appendix F, test case 2: the serialized public key derived
    // from the published seed matches the expected value
    fn test_keygen_kat2() {
        let seed = hex!("558b8966c48ae9cb898b423c83443aae014a72f1b1ab5cc85cf1d892903b5439");
        let id = hex!("d08fabd4a2091ff0a8cb4ed834e74534");
        let expected_pubkey = hex!(
            "
            00000006
            00000003
            d08fabd4a2091ff0a8cb4ed834e74534
            32a58885cd9ba0431235466bff9651c6
            c92124404d45fa53cf161c28f1ad5a8e
            "
        );
        let sk = SigningKey::new_from_seed(
            LmsMode::Sha256M32H10,
            LmsOtsMode::Sha256N32W4,
            id,
            seed,
            0,
        );
        assert_eq!(sk.public().to_bytes(), &expected_pubkey[..]);
    }

    #[test]
    fn test_checkpoint_round_trip() {
        let mut sk = SigningKey::new_from_seed(
            LmsMode::Sha256M32H2,
            LmsOtsMode::Sha256N32W4,
            [0xaa; 16],
            [0xbb; 32],
            0,
        );
        let pk = sk.public();
        sk.sign(b"one").unwrap();
        sk.sign(b"two").unwrap();

        let restored = SigningKey::from_bytes(&sk.to_bytes(), 0);
        let mut restored = restored.unwrap();
        assert_eq!(restored.q(), 2);
        assert_eq!(restored.public(), pk);

        let sig = restored.sign(b"three").unwrap();
        assert_eq!(sig.q(), 2);
        assert!(pk.verify(b"three", &sig).is_ok());
    }

    #[test]
    fn test_checkpoint_rejects_garbage() {
        assert_eq!(
            SigningKey::from_bytes(&[0; 12], 0).err(),
            Some(Error::Invalid)
        );

        let sk = SigningKey::new_from_seed(
            LmsMode::Sha256M32H2,
            LmsOtsMode::Sha256N32W8,
            [0xaa; 16],
            [0xbb; 32],
            0,
        );
        let mut bytes = sk.to_bytes();
        // unknown ots typecode
        bytes[4..8].copy_from_slice(&0u32.to_be_bytes());
        assert_eq!(SigningKey::from_bytes(&bytes, 0).err(), Some(Error::Invalid));

        let mut bytes = sk.to_bytes();
        // q past the end of an h = 2 tree
        bytes[24..28].copy_from_slice(&5u32.to_be_bytes());
        assert_eq!(SigningKey::from_bytes(&bytes, 0).err(), Some(Error::Invalid));
    }

    #[test]
    fn test_restored_exhausted_key_stays_exhausted() {
        let mut sk = SigningKey::new_from_seed(
            LmsMode::Sha256M32H2,
            LmsOtsMode::Sha256N32W8,
            [0x01; 16],
            [0x02; 32],
            0,
        );
        for _ in 0..4 {
            sk.sign(b"m").unwrap();
        }
        let mut restored = SigningKey::from_bytes(&sk.to_bytes(), 0).unwrap();
        assert_eq!(restored.remaining_signatures(), 0);
        assert_eq!(restored.sign(b"m"), Err(Error::CapacityExhausted));
    }
}
