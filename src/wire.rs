//! Length discovery for LMS structures embedded in longer byte buffers.
//!
//! A hierarchical signature scheme concatenates public keys and signatures
//! back to back; the functions here compute the exact length of the leading
//! structure from its typecode fields alone, without consuming or validating
//! the rest of the buffer. They are pure functions over byte slices and
//! never touch any key state.

use crate::error::Error;
use crate::lms::LmsMode;
use crate::ots::LmsOtsMode;

/// Checked 4-byte big-endian read at `offset`.
pub(crate) fn read_u32(buf: &[u8], offset: usize) -> Result<u32, Error> {
    let bytes = buf.get(offset..offset + 4).ok_or(Error::Invalid)?;
    // will never panic, the slice is 4 bytes long
    Ok(u32::from_be_bytes(bytes.try_into().unwrap()))
}

/// Returns the encoded length of the public key a buffer starts with.
///
/// The buffer may carry trailing bytes; only the leading LMS typecode is
/// decoded. Fails with [`Error::Invalid`] if even that cannot be read or
/// the typecode is unrecognized.
pub fn public_key_len(buf: &[u8]) -> Result<usize, Error> {
    let mode = LmsMode::from_typecode(read_u32(buf, 0)?).ok_or(Error::Invalid)?;
    Ok(24 + mode.m())
}

/// Returns the encoded length of the signature a buffer starts with.
///
/// Decodes the LM-OTS typecode at offset 4 and the LMS typecode behind the
/// embedded one-time signature; trailing bytes are ignored. Fails with
/// [`Error::Invalid`] if the buffer is too short to reach either typecode
/// or a typecode is unrecognized.
pub fn signature_len(buf: &[u8]) -> Result<usize, Error> {
    let ots_mode = LmsOtsMode::from_typecode(read_u32(buf, 4)?).ok_or(Error::Invalid)?;
    let mode =
        LmsMode::from_typecode(read_u32(buf, 4 + ots_mode.sig_len())?).ok_or(Error::Invalid)?;
    Ok(8 + ots_mode.sig_len() + mode.m() * mode.h())
}
