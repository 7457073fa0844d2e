//! Everything related to LM-OTS

mod keypair;
mod modes;
mod private;
mod public;
pub mod signature;
pub(crate) mod util;

pub use modes::LmsOtsMode;
pub use private::SigningKey;
pub use public::VerifyingKey;
pub use signature::Signature;
