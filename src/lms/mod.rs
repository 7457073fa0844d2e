//! Everything related to LMS (and not LM-OTS)

mod keypair;
mod modes;
mod private;
mod public;
pub mod signature;
pub(crate) mod tree;

pub use modes::LmsMode;
pub use private::SigningKey;
pub use public::VerifyingKey;
pub use signature::Signature;
