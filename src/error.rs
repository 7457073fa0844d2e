//! Error types

use std::fmt::{Display, Formatter, Result};

/// The error type of this crate.
///
/// Parsing failures and verification failures are deliberately collapsed
/// into the single opaque [`Error::Invalid`] so callers cannot distinguish
/// *why* an input was rejected.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// A malformed, truncated or mistyped key or signature, or a
    /// verification mismatch. The input is rejected; key state is intact.
    Invalid,
    /// The private key has used every one-time leaf. Permanent: the only
    /// recovery is provisioning a new key pair. Retrying is a logic bug.
    CapacityExhausted,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::Invalid => write!(f, "signature or key rejected"),
            Self::CapacityExhausted => write!(f, "private key has been exhausted"),
        }
    }
}

impl std::error::Error for Error {}

impl From<Error> for signature::Error {
    fn from(err: Error) -> Self {
        signature::Error::from_source(err)
    }
}
