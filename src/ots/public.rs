//! Contains the [`VerifyingKey`] type

use crate::constants::ID_LEN;
use crate::error::Error;
use crate::ots::modes::LmsOtsMode;
use crate::ots::signature::Signature;
use crate::types::{Identifier, Node};
use crate::wire::read_u32;
use signature::Verifier;

/// An LM-OTS public key
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VerifyingKey {
    pub(crate) mode: LmsOtsMode,
    pub(crate) q: u32,
    pub(crate) id: Identifier,
    pub(crate) k: Node,
}

impl VerifyingKey {
    /// The parameter set of this key
    pub fn mode(&self) -> LmsOtsMode {
        self.mode
    }

    /// The N-byte public value `K`
    pub fn k(&self) -> &[u8] {
        &self.k
    }

    /// Returns `u32str(type) || I || u32str(q) || K`
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(4 + ID_LEN + 4 + self.mode.n());
        out.extend_from_slice(&self.mode.typecode().to_be_bytes());
        out.extend_from_slice(&self.id);
        out.extend_from_slice(&self.q.to_be_bytes());
        out.extend_from_slice(&self.k);
        out
    }
}

impl Verifier<Signature> for VerifyingKey {
    // this implements algorithm 4a of RFC 8554 section 4.6
    fn verify(&self, msg: &[u8], signature: &Signature) -> Result<(), signature::Error> {
        if signature.mode != self.mode {
            return Err(Error::Invalid.into());
        }
        let kc = signature.recover_pubkey(self.id, self.q, msg);
        // if Kc is equal to K, return VALID
        if self.k == kc.k {
            Ok(())
        } else {
            Err(Error::Invalid.into())
        }
    }
}

/// Tries to parse a [`VerifyingKey`] from an exact slice
impl TryFrom<&[u8]> for VerifyingKey {
    type Error = Error;

    fn try_from(pk: &[u8]) -> Result<Self, Self::Error> {
        let mode = LmsOtsMode::from_typecode(read_u32(pk, 0)?).ok_or(Error::Invalid)?;
        if pk.len() != 4 + ID_LEN + 4 + mode.n() {
            return Err(Error::Invalid);
        }

        // pk is now guaranteed to be of the form u32(type) || I || q || K
        let (i, qk) = pk[4..].split_at(ID_LEN);
        let (q, k) = qk.split_at(4);

        // the conversions will never panic, lengths were checked above
        Ok(Self {
            mode,
            q: u32::from_be_bytes(q.try_into().unwrap()),
            id: i.try_into().unwrap(),
            k: k.try_into().unwrap(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::VerifyingKey;
    use crate::constants::ID_LEN;
    use crate::error::Error;
    use crate::ots::modes::LmsOtsMode;
    use crate::ots::private::SigningKey;
    use signature::Verifier;

    #[test]
    fn test_serde() {
        let pk = SigningKey::new(
            LmsOtsMode::Sha256N32W8,
            0,
            [0xbb; ID_LEN],
            &mut rand::thread_rng(),
        )
        .public();
        let bytes = pk.to_bytes();
        let pk_deserialized = VerifyingKey::try_from(bytes.as_slice());

        assert_eq!(pk_deserialized, Ok(pk.clone()));

        let pk_short = VerifyingKey::try_from(&bytes[0..(bytes.len() - 1)]);
        assert_eq!(pk_short, Err(Error::Invalid));

        let mut long_bytes = bytes.clone();
        long_bytes.push(0);
        let pk_long = VerifyingKey::try_from(long_bytes.as_slice());
        assert_eq!(pk_long, Err(Error::Invalid));

        let mut wrong_algo = bytes;
        wrong_algo[0..4].copy_from_slice(&99u32.to_be_bytes());
        assert_eq!(
            VerifyingKey::try_from(wrong_algo.as_slice()),
            Err(Error::Invalid)
        );
    }

    #[test]
    fn test_sign_verify() {
        let mut rng = rand::thread_rng();
        let mut sk = SigningKey::new(LmsOtsMode::Sha256N32W4, 0, [0xcc; ID_LEN], &mut rng);
        let pk = sk.public();
        let msg = b"this is a test message";

        let sig = sk.sign(msg).unwrap();
        assert!(pk.verify(msg, &sig).is_ok());
        assert!(pk.verify(b"another message", &sig).is_err());
    }

    #[test]
    fn test_sign_fail_verify_wrong_key() {
        let mut rng = rand::thread_rng();
        let mut sk = SigningKey::new(LmsOtsMode::Sha256N32W2, 0, [0xcc; ID_LEN], &mut rng);
        let mut pk = sk.public();
        let msg = b"this is a test message";

        let sig = sk.sign(msg).unwrap();
        // modify q to get the wrong public key
        pk.q = 1;
        assert!(pk.verify(msg, &sig).is_err());
    }
}
