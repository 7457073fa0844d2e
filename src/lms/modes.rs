//! LMS parameter sets

use crate::ots::LmsOtsMode;

/// The LMS parameter sets, keyed by typecode.
///
/// Typecodes 5 through 9 are the RFC 8554 registry entries; all use
/// SHA-256 (`m = 32`) and differ only in the tree height `h`, which fixes
/// the number of one-time leaves at `2^h`. [`LmsMode::Sha256M32H2`] is a
/// four-leaf set carried in the SP 800-208 private-use typecode range for
/// protocol tests and constrained deployments.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum LmsMode {
    /// `LMS_SHA256_M32_H5`
    Sha256M32H5 = 5,
    /// `LMS_SHA256_M32_H10`
    Sha256M32H10 = 6,
    /// `LMS_SHA256_M32_H15`
    Sha256M32H15 = 7,
    /// `LMS_SHA256_M32_H20`
    Sha256M32H20 = 8,
    /// `LMS_SHA256_M32_H25`
    Sha256M32H25 = 9,
    /// `LMS_SHA256_M32_H2`, private-use typecode
    Sha256M32H2 = 0xE000_0001,
}

impl LmsMode {
    /// The `lms_algorithm_type` registry value
    pub const fn typecode(self) -> u32 {
        self as u32
    }

    /// Looks a parameter set up by its registry value
    pub const fn from_typecode(typecode: u32) -> Option<Self> {
        match typecode {
            5 => Some(Self::Sha256M32H5),
            6 => Some(Self::Sha256M32H10),
            7 => Some(Self::Sha256M32H15),
            8 => Some(Self::Sha256M32H20),
            9 => Some(Self::Sha256M32H25),
            0xE000_0001 => Some(Self::Sha256M32H2),
            _ => None,
        }
    }

    /// Height of the Merkle tree
    pub const fn h(self) -> usize {
        match self {
            Self::Sha256M32H5 => 5,
            Self::Sha256M32H10 => 10,
            Self::Sha256M32H15 => 15,
            Self::Sha256M32H20 => 20,
            Self::Sha256M32H25 => 25,
            Self::Sha256M32H2 => 2,
        }
    }

    /// Length of the hash function output in bytes
    pub const fn m(self) -> usize {
        32
    }

    /// The number of one-time leaves, `2^h`
    pub const fn leaves(self) -> u32 {
        1 << self.h()
    }

    /// Encoded length of a public key, `24 + m`
    pub const fn public_key_len(self) -> usize {
        24 + self.m()
    }

    /// Encoded length of a signature, `12 + n*(p+1) + m*h`
    pub const fn sig_len(self, ots_mode: LmsOtsMode) -> usize {
        8 + ots_mode.sig_len() + self.m() * self.h()
    }
}
