//! Contains the [`VerifyingKey`] type

use crate::constants::ID_LEN;
use crate::error::Error;
use crate::lms::modes::LmsMode;
use crate::lms::signature::Signature;
use crate::lms::tree;
use crate::ots::LmsOtsMode;
use crate::types::{Identifier, Node};
use crate::wire::read_u32;
use signature::Verifier;

/// An LMS public key: the tree root `T[1]` plus the algorithm identifiers
/// it was built under. Immutable and freely shareable.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VerifyingKey {
    mode: LmsMode,
    ots_mode: LmsOtsMode,
    id: Identifier,
    k: Node,
}

impl VerifyingKey {
    pub(crate) fn new(mode: LmsMode, ots_mode: LmsOtsMode, id: Identifier, k: Node) -> Self {
        Self {
            mode,
            ots_mode,
            id,
            k,
        }
    }

    /// The 16-byte identifier of the key pair
    pub fn id(&self) -> &Identifier {
        &self.id
    }

    /// The M-byte root digest as a byte slice
    pub fn k(&self) -> &[u8] {
        &self.k
    }

    /// The LMS parameter set of this key
    pub fn mode(&self) -> LmsMode {
        self.mode
    }

    /// The LM-OTS parameter set this key expects signatures to carry
    pub fn ots_mode(&self) -> LmsOtsMode {
        self.ots_mode
    }

    /// Returns `u32str(type) || u32str(otstype) || I || T[1]`,
    /// exactly `24 + m` bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.mode.public_key_len());
        out.extend_from_slice(&self.mode.typecode().to_be_bytes());
        out.extend_from_slice(&self.ots_mode.typecode().to_be_bytes());
        out.extend_from_slice(&self.id);
        out.extend_from_slice(&self.k);
        out
    }

    /// Parses and verifies a raw signature buffer against a message.
    ///
    /// Every failure mode, from a malformed buffer to a digest mismatch,
    /// surfaces as the same [`Error::Invalid`].
    pub fn verify_bytes(&self, message: &[u8], signature: &[u8]) -> Result<(), Error> {
        let signature = Signature::try_from(signature)?;
        self.verify_signature(message, &signature)
    }

    // this implements algorithm 6a of RFC 8554 section 5.4.2: recompute
    // the root candidate from the recovered leaf and the sibling path
    fn verify_signature(&self, message: &[u8], signature: &Signature) -> Result<(), Error> {
        if signature.mode != self.mode
            || signature.ots_sig.mode != self.ots_mode
            || signature.q >= self.mode.leaves()
            || signature.path.len() != self.mode.h()
        {
            return Err(Error::Invalid);
        }

        let key_candidate = signature.ots_sig.recover_pubkey(self.id, signature.q, message);

        let mut node = self.mode.leaves() + signature.q;
        let mut acc = tree::leaf_hash(&self.id, node, &key_candidate.k);
        for sibling in &signature.path {
            acc = if node % 2 == 1 {
                tree::internal_hash(&self.id, node / 2, sibling, &acc)
            } else {
                tree::internal_hash(&self.id, node / 2, &acc, sibling)
            };
            node /= 2;
        }

        if acc == self.k {
            Ok(())
        } else {
            Err(Error::Invalid)
        }
    }
}

impl Verifier<Signature> for VerifyingKey {
    fn verify(&self, msg: &[u8], signature: &Signature) -> Result<(), signature::Error> {
        self.verify_signature(msg, signature).map_err(Into::into)
    }
}

/// Tries to parse a [`VerifyingKey`] from an exact slice
impl TryFrom<&[u8]> for VerifyingKey {
    type Error = Error;

    fn try_from(pk: &[u8]) -> Result<Self, Self::Error> {
        let mode = LmsMode::from_typecode(read_u32(pk, 0)?).ok_or(Error::Invalid)?;
        if pk.len() != mode.public_key_len() {
            return Err(Error::Invalid);
        }
        let ots_mode = LmsOtsMode::from_typecode(read_u32(pk, 4)?).ok_or(Error::Invalid)?;

        // pk is now guaranteed to be of the form u32(type) || u32(otstype) || I || K
        let (id, k) = pk[8..].split_at(ID_LEN);

        Ok(Self {
            mode,
            ots_mode,
            // the conversions will never panic, lengths were checked above
            id: id.try_into().unwrap(),
            k: k.try_into().unwrap(),
        })
    }
}
