//! Endianness utility functions
//!
//! Smart card protocols are big-endian throughout: status words, extended
//! length fields and every length prefix inside applet payloads.

/// Convert a u16 from big-endian byte order to native byte order
///
/// Returns `None` when fewer than two bytes are available.
pub fn u16_from_be_bytes(bytes: &[u8]) -> Option<u16> {
    match bytes {
        [hi, lo, ..] => Some(u16::from_be_bytes([*hi, *lo])),
        _ => None,
    }
}

/// Append `value` to `out` as two big-endian bytes
pub fn push_u16_be(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_be_bytes());
}

/// Append `data` to `out` prefixed by its length as a big-endian u16
///
/// Returns `None` (leaving `out` untouched) when `data` is longer than
/// `u16::MAX` bytes.
pub fn push_length_prefixed(out: &mut Vec<u8>, data: &[u8]) -> Option<()> {
    let len = u16::try_from(data.len()).ok()?;
    push_u16_be(out, len);
    out.extend_from_slice(data);
    Some(())
}

/// Split a trailing big-endian u16 off `bytes`
///
/// Returns the leading part and the trailing value, or `None` for inputs
/// shorter than two bytes.
pub fn split_trailing_u16(bytes: &[u8]) -> Option<(&[u8], u16)> {
    if bytes.len() < 2 {
        return None;
    }
    let (head, tail) = bytes.split_at(bytes.len() - 2);
    u16_from_be_bytes(tail).map(|v| (head, v))
}
