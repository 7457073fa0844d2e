//! Contains the [`Signature`] type

use crate::error::Error;
use crate::lms::modes::LmsMode;
use crate::ots;
use crate::ots::LmsOtsMode;
use crate::types::Node;
use crate::wire::read_u32;

/// An LMS signature: the leaf index `q`, the one-time signature made with
/// leaf `q`'s key, and the authentication path from that leaf to the root
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Signature {
    pub(crate) q: u32,
    pub(crate) ots_sig: ots::Signature,
    pub(crate) mode: LmsMode,
    pub(crate) path: Vec<Node>,
}

impl Signature {
    /// The index of the one-time leaf this signature consumed
    pub fn q(&self) -> u32 {
        self.q
    }

    /// The LMS parameter set this signature was made under
    pub fn mode(&self) -> LmsMode {
        self.mode
    }

    /// The LM-OTS parameter set of the embedded one-time signature
    pub fn ots_mode(&self) -> LmsOtsMode {
        self.ots_sig.mode
    }

    /// Total encoded length in bytes
    pub fn encoded_len(&self) -> usize {
        self.mode.sig_len(self.ots_sig.mode)
    }

    /// Returns `u32str(q) || ots_signature || u32str(type) || path[0] || .. || path[h-1]`
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        out.extend_from_slice(&self.q.to_be_bytes());
        out.extend_from_slice(&self.ots_sig.to_bytes());
        out.extend_from_slice(&self.mode.typecode().to_be_bytes());
        for node in &self.path {
            out.extend_from_slice(node);
        }
        out
    }
}

impl From<Signature> for Vec<u8> {
    fn from(sig: Signature) -> Self {
        sig.to_bytes()
    }
}

/// Tries to parse a [`Signature`] from an exact slice.
///
/// Follows the validations of algorithm 6a in RFC 8554: the embedded
/// typecodes drive the expected lengths, `q` must index an existing leaf,
/// and the slice must contain the structure exactly.
impl TryFrom<&[u8]> for Signature {
    type Error = Error;

    fn try_from(sig: &[u8]) -> Result<Self, Self::Error> {
        let q = read_u32(sig, 0)?;
        let ots_mode = LmsOtsMode::from_typecode(read_u32(sig, 4)?).ok_or(Error::Invalid)?;

        let ots_end = 4 + ots_mode.sig_len();
        let ots_bytes = sig.get(4..ots_end).ok_or(Error::Invalid)?;

        let mode = LmsMode::from_typecode(read_u32(sig, ots_end)?).ok_or(Error::Invalid)?;
        if q >= mode.leaves() {
            return Err(Error::Invalid);
        }
        if sig.len() != mode.sig_len(ots_mode) {
            return Err(Error::Invalid);
        }

        let ots_sig = ots::Signature::try_from(ots_bytes)?;
        let path = sig[ots_end + 4..]
            .chunks_exact(mode.m())
            // will never panic, the total length was checked above
            .map(|chunk| chunk.try_into().unwrap())
            .collect();

        Ok(Self {
            q,
            ots_sig,
            mode,
            path,
        })
    }
}
