//! Contains the one-time [`Signature`] type

use crate::error::Error;
use crate::ots::modes::LmsOtsMode;
use crate::ots::public::VerifyingKey;
use crate::ots::util::{chain, message_digest, public_digest};
use crate::types::{Identifier, Node};
use crate::wire::read_u32;

/// An LM-OTS signature: the randomizer `C` and one partially evaluated
/// chain element per hash chain
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Signature {
    pub(crate) mode: LmsOtsMode,
    pub(crate) c: Node,
    pub(crate) y: Vec<Node>,
}

impl Signature {
    /// Recomputes the public key candidate `Kc` from a message
    /// (RFC 8554 algorithm 4b) by running every chain to its end.
    pub fn recover_pubkey(&self, id: Identifier, q: u32, msg: &[u8]) -> VerifyingKey {
        let q_digest = message_digest(&id, q, &self.c, msg);
        let positions = self.mode.expand(&q_digest);
        let end = ((1 << self.mode.w()) - 1) as u8;

        let z: Vec<Node> = self
            .y
            .iter()
            .enumerate()
            .map(|(i, &y)| chain(&id, q, i as u16, positions[i], end, y))
            .collect();

        VerifyingKey {
            mode: self.mode,
            q,
            id,
            k: public_digest(&id, q, &z),
        }
    }

    /// Returns `u32str(type) || C || y[0] || .. || y[p-1]`
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.mode.sig_len());
        out.extend_from_slice(&self.mode.typecode().to_be_bytes());
        out.extend_from_slice(&self.c);
        for y in &self.y {
            out.extend_from_slice(y);
        }
        out
    }
}

impl From<Signature> for Vec<u8> {
    fn from(sig: Signature) -> Self {
        sig.to_bytes()
    }
}

/// Tries to parse a [`Signature`] from an exact slice
impl TryFrom<&[u8]> for Signature {
    type Error = Error;

    fn try_from(sig: &[u8]) -> Result<Self, Self::Error> {
        let mode = LmsOtsMode::from_typecode(read_u32(sig, 0)?).ok_or(Error::Invalid)?;
        if sig.len() != mode.sig_len() {
            return Err(Error::Invalid);
        }

        let (c, y_bytes) = sig[4..].split_at(mode.n());
        let y = y_bytes
            .chunks_exact(mode.n())
            // will never panic, every chunk is exactly n bytes
            .map(|chunk| chunk.try_into().unwrap())
            .collect();

        Ok(Self {
            mode,
            // will never panic, c is exactly n bytes
            c: c.try_into().unwrap(),
            y,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Signature;
    use crate::constants::ID_LEN;
    use crate::error::Error;
    use crate::ots::modes::LmsOtsMode;
    use crate::ots::private::SigningKey;

    #[test]
    fn test_serialize_parse_round_trip() {
        let mut sk =
            SigningKey::new_from_seed(LmsOtsMode::Sha256N32W4, 3, [0x11; ID_LEN], &[9u8; 32]);
        let sig = sk.sign(b"round trip").unwrap();
        let bytes = sig.to_bytes();
        assert_eq!(bytes.len(), LmsOtsMode::Sha256N32W4.sig_len());

        let parsed = Signature::try_from(bytes.as_slice()).unwrap();
        assert_eq!(parsed, sig);
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        let mut sk =
            SigningKey::new_from_seed(LmsOtsMode::Sha256N32W8, 0, [0x11; ID_LEN], &[9u8; 32]);
        let bytes = sk.sign(b"m").unwrap().to_bytes();
        assert_eq!(
            Signature::try_from(&bytes[..bytes.len() - 1]),
            Err(Error::Invalid)
        );

        let mut long = bytes;
        long.push(0);
        assert_eq!(Signature::try_from(long.as_slice()), Err(Error::Invalid));
    }

    #[test]
    fn test_parse_rejects_unknown_typecode() {
        let mut bytes = vec![0u8; LmsOtsMode::Sha256N32W8.sig_len()];
        bytes[0..4].copy_from_slice(&77u32.to_be_bytes());
        assert_eq!(Signature::try_from(bytes.as_slice()), Err(Error::Invalid));
    }
}
