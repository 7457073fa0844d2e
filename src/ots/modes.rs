//! LM-OTS parameter sets

use crate::ots::util::coefs;
use static_assertions::const_assert_eq;

/// The LM-OTS parameter sets of RFC 8554, keyed by typecode.
///
/// Every set uses SHA-256 (`n = 32`); they differ in the Winternitz window
/// `w`, which trades signature size against hashing work. The derived
/// values `u`, `v`, `p` and `ls` follow Appendix B of the RFC.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum LmsOtsMode {
    /// `LMOTS_SHA256_N32_W1`
    Sha256N32W1 = 1,
    /// `LMOTS_SHA256_N32_W2`
    Sha256N32W2 = 2,
    /// `LMOTS_SHA256_N32_W4`
    Sha256N32W4 = 3,
    /// `LMOTS_SHA256_N32_W8`
    Sha256N32W8 = 4,
}

impl LmsOtsMode {
    /// The `lmots_algorithm_type` registry value
    pub const fn typecode(self) -> u32 {
        self as u32
    }

    /// Looks a parameter set up by its registry value
    pub const fn from_typecode(typecode: u32) -> Option<Self> {
        match typecode {
            1 => Some(Self::Sha256N32W1),
            2 => Some(Self::Sha256N32W2),
            3 => Some(Self::Sha256N32W4),
            4 => Some(Self::Sha256N32W8),
            _ => None,
        }
    }

    /// Length of the hash function output in bytes
    pub const fn n(self) -> usize {
        32
    }

    /// The Winternitz window in bits
    pub const fn w(self) -> usize {
        match self {
            Self::Sha256N32W1 => 1,
            Self::Sha256N32W2 => 2,
            Self::Sha256N32W4 => 4,
            Self::Sha256N32W8 => 8,
        }
    }

    /// Number of `w`-bit fields covering the message hash
    pub const fn u(self) -> usize {
        (8 * self.n() + self.w() - 1) / self.w()
    }

    /// Number of `w`-bit fields covering the checksum
    pub const fn v(self) -> usize {
        ((((1 << self.w()) - 1) * self.u()).ilog2() as usize / self.w()) + 1
    }

    /// Number of hash chains, `u + v`
    pub const fn p(self) -> usize {
        self.u() + self.v()
    }

    /// Left shift aligning the checksum, `16 - v*w`
    pub const fn ls(self) -> usize {
        16 - self.v() * self.w()
    }

    /// Encoded length of a one-time signature, `4 + n*(p+1)`
    pub const fn sig_len(self) -> usize {
        4 + self.n() * (self.p() + 1)
    }

    /// Expands a message hash into its `p` chain positions:
    /// `coef(Q, i, w)` for `i < u` followed by the checksum coefficients.
    pub(crate) fn expand(self, q_digest: &[u8]) -> Vec<u8> {
        let mut arr = vec![0u8; self.p()];
        for (i, c) in coefs(q_digest, self.w()).enumerate().take(self.u()) {
            arr[i] = c;
        }

        // checksum per RFC 8554 section 4.4: the sum of all negated chunks,
        // shifted so its coefficients start at a w-bit boundary
        let cksum = arr
            .iter()
            .take(self.u())
            .map(|&x| ((1u16 << self.w()) - 1 - (x as u16)))
            .sum::<u16>()
            << self.ls();

        let cksum_bytes = cksum.to_be_bytes();
        for (i, c) in coefs(&cksum_bytes, self.w()).take(self.v()).enumerate() {
            arr[self.u() + i] = c;
        }
        arr
    }
}

// make sure the derived u, v, p, ls, sig_len values match RFC 8554 appendix B
const_assert_eq!(LmsOtsMode::Sha256N32W1.p(), 265);
const_assert_eq!(LmsOtsMode::Sha256N32W1.ls(), 7);
const_assert_eq!(LmsOtsMode::Sha256N32W1.sig_len(), 8516);

const_assert_eq!(LmsOtsMode::Sha256N32W2.p(), 133);
const_assert_eq!(LmsOtsMode::Sha256N32W2.ls(), 6);
const_assert_eq!(LmsOtsMode::Sha256N32W2.sig_len(), 4292);

const_assert_eq!(LmsOtsMode::Sha256N32W4.p(), 67);
const_assert_eq!(LmsOtsMode::Sha256N32W4.ls(), 4);
const_assert_eq!(LmsOtsMode::Sha256N32W4.sig_len(), 2180);

const_assert_eq!(LmsOtsMode::Sha256N32W8.p(), 34);
const_assert_eq!(LmsOtsMode::Sha256N32W8.ls(), 0);
const_assert_eq!(LmsOtsMode::Sha256N32W8.sig_len(), 1124);
