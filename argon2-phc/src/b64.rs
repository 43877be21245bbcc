//! Unpadded standard-alphabet base64, as used by the salt and digest fields.

use base64::Engine;
use base64::engine::general_purpose::STANDARD_NO_PAD;

use crate::codec::grow;
use crate::error::DecodingFailure;

/// Exact length of the unpadded encoding of `len` bytes, or `None` if it does
/// not fit in a `usize`.
#[inline]
pub fn encoded_len(len: usize) -> Option<usize> {
    base64::encoded_len(len, false)
}

/// Number of bytes a well-formed unpadded encoding of `len` characters decodes
/// to.
#[inline]
pub fn decoded_len(len: usize) -> usize {
    // len * 6 / 8 without the intermediate product
    (len / 4) * 3 + (len % 4) * 6 / 8
}

/// [`encoded_len`] for lengths that are already part of an encoded hash.
///
/// # Panics
///
/// Panics if the encoded length does not fit in a `usize`.
pub(crate) fn encoded_len_or_panic(len: usize) -> usize {
    encoded_len(len).unwrap_or_else(|| panic!("encoded argon2 hash length overflows usize"))
}

/// Appends the encoding of `src` to `dst`.
///
/// # Panics
///
/// Panics if the encoded length does not fit in a `usize`.
pub fn append_encoded(dst: &mut Vec<u8>, src: &[u8]) {
    let encoded = encoded_len_or_panic(src.len());
    let start = dst.len();
    grow(dst, encoded);
    dst.resize(start + encoded, 0);

    let written = STANDARD_NO_PAD
        .encode_slice(src, &mut dst[start..])
        .expect("output span sized to the exact encoded length");
    debug_assert_eq!(written, encoded);
}

/// Decodes an unpadded standard-alphabet span.
///
/// Padding, characters outside the alphabet, an impossible length and
/// non-canonical trailing bits are all rejected.
pub fn decode(src: &[u8]) -> Result<Vec<u8>, DecodingFailure> {
    let mut out = Vec::with_capacity(decoded_len(src.len()));
    STANDARD_NO_PAD
        .decode_vec(src, &mut out)
        .map_err(|_| DecodingFailure)?;
    Ok(out)
}
