//! Contains the [`SigningKey`] type

use crate::constants::HASH_LEN;
use crate::error::Error;
use crate::ots::modes::LmsOtsMode;
use crate::ots::public::VerifyingKey;
use crate::ots::signature::Signature;
use crate::ots::util::{chain, message_digest, public_digest};
use crate::types::{Identifier, Node, Seed};
use digest::Digest;
use rand_core::CryptoRngCore;
use sha2::Sha256;
use std::fmt;
use zeroize::Zeroize;

// Framing of the derived signature randomizer `C`; the chain index 0xfffd
// cannot collide with any Appendix A chain key input (i < p <= 265).
const C_INDEX: u16 = 0xfffd;
const DERIVE_MARKER: u8 = 0xff;

/// An LM-OTS private key. Signs exactly one message; a second `sign` call
/// on the same key is refused.
pub struct SigningKey {
    pub(crate) mode: LmsOtsMode,
    pub(crate) q: u32,
    pub(crate) id: Identifier,
    x: Vec<Node>,
    c: Node,
    valid: bool,
}

impl SigningKey {
    /// Generates a fresh random one-time key for leaf `q` of identifier `id`
    pub fn new(mode: LmsOtsMode, q: u32, id: Identifier, rng: &mut impl CryptoRngCore) -> Self {
        let mut x = vec![[0u8; HASH_LEN]; mode.p()];
        for item in x.iter_mut() {
            rng.fill_bytes(item);
        }
        let mut c = [0u8; HASH_LEN];
        rng.fill_bytes(&mut c);
        Self {
            mode,
            q,
            id,
            x,
            c,
            valid: true,
        }
    }

    /// Derives the one-time key for leaf `q` deterministically from the
    /// tree seed, per RFC 8554 appendix A:
    /// `x_i = H(I || u32str(q) || u16str(i) || u8str(0xff) || SEED)`.
    pub fn new_from_seed(mode: LmsOtsMode, q: u32, id: Identifier, seed: &Seed) -> Self {
        let derive = |i: u16| -> Node {
            Sha256::new()
                .chain_update(id)
                .chain_update(q.to_be_bytes())
                .chain_update(i.to_be_bytes())
                .chain_update([DERIVE_MARKER])
                .chain_update(seed)
                .finalize()
                .into()
        };
        let x = (0..mode.p() as u16).map(derive).collect();
        let c = derive(C_INDEX);
        Self {
            mode,
            q,
            id,
            x,
            c,
            valid: true,
        }
    }

    /// Returns the public key, evaluating every chain to its end
    pub fn public(&self) -> VerifyingKey {
        let y: Vec<Node> = self
            .x
            .iter()
            .enumerate()
            .map(|(i, &x)| {
                chain(
                    &self.id,
                    self.q,
                    i as u16,
                    0,
                    ((1 << self.mode.w()) - 1) as u8,
                    x,
                )
            })
            .collect();
        VerifyingKey {
            mode: self.mode,
            q: self.q,
            id: self.id,
            k: public_digest(&self.id, self.q, &y),
        }
    }

    /// Whether this key may still sign
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Signs one message (RFC 8554 algorithm 3) and consumes the key's
    /// single use. Fails with [`Error::CapacityExhausted`] on reuse.
    pub fn sign(&mut self, message: &[u8]) -> Result<Signature, Error> {
        if !self.valid {
            return Err(Error::CapacityExhausted);
        }

        let q_digest = message_digest(&self.id, self.q, &self.c, message);
        let positions = self.mode.expand(&q_digest);

        let y = self
            .x
            .iter()
            .enumerate()
            .map(|(i, &x)| chain(&self.id, self.q, i as u16, 0, positions[i], x))
            .collect();

        self.valid = false;
        Ok(Signature {
            mode: self.mode,
            c: self.c,
            y,
        })
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("mode", &self.mode)
            .field("q", &self.q)
            .field("id", &self.id)
            .field("valid", &self.valid)
            .finish_non_exhaustive()
    }
}

impl Drop for SigningKey {
    fn drop(&mut self) {
        self.x.zeroize();
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
    use crate::constants::ID_LEN;
    use crate::error::Error;
    use crate::ots::modes::LmsOtsMode;

    #[test]
    fn test_one_shot_enforced() {
        let mut sk =
            SigningKey::new_from_seed(LmsOtsMode::Sha256N32W8, 0, [0xcc; ID_LEN], &[7u8; 32]);
        assert!(sk.is_valid());
        assert!(sk.sign(b"first").is_ok());
        assert!(!sk.is_valid());
        assert_eq!(sk.sign(b"second"), Err(Error::CapacityExhausted));
    }

    #[test]
    fn test_seed_derivation_is_deterministic() {
        let seed = [3u8; 32];
        let a = SigningKey::new_from_seed(LmsOtsMode::Sha256N32W4, 9, [0xab; ID_LEN], &seed);
        let b = SigningKey::new_from_seed(LmsOtsMode::Sha256N32W4, 9, [0xab; ID_LEN], &seed);
        assert_eq!(a.public(), b.public());
        // a different leaf yields a different key
        let c = SigningKey::new_from_seed(LmsOtsMode::Sha256N32W4, 10, [0xab; ID_LEN], &seed);
        assert_ne!(a.public().k, c.public().k);
    }
}
