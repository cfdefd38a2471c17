//! Content fingerprinting
//!
//! Object identity uses the djb2 hash over a wrapping 64-bit accumulator,
//! rendered as 16 lowercase hex digits. It is deliberately self-contained
//! and NOT collision resistant in a cryptographic sense; it only needs to be
//! deterministic across runs and platforms so that equal content maps to
//! equal ids.

use crate::artifacts::objects::object_id::ObjectId;

/// Fingerprint a byte sequence into an object id.
///
/// The all-zero accumulator is reserved for the "no commit yet" sentinel, so
/// the one input value hashing to zero is remapped onto the djb2 seed.
pub fn fingerprint(data: &[u8]) -> ObjectId {
    let mut hash: u64 = 5381;
    for &byte in data {
        hash = hash.wrapping_mul(33).wrapping_add(u64::from(byte));
    }

    if hash == 0 {
        hash = 5381;
    }

    ObjectId::from_accumulator(hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::OBJECT_ID_LENGTH;

    #[test]
    fn is_deterministic() {
        assert_eq!(fingerprint(b"hello\n"), fingerprint(b"hello\n"));
        assert_eq!(fingerprint(b""), fingerprint(b""));
    }

    #[test]
    fn distinguishes_inputs() {
        assert_ne!(fingerprint(b"hello\n"), fingerprint(b"hello2\n"));
        assert_ne!(fingerprint(b"a"), fingerprint(b"b"));
    }

    #[test]
    fn empty_input_yields_the_seed() {
        // djb2 of the empty string is its seed, 5381 = 0x1505
        assert_eq!(fingerprint(b"").as_ref(), "0000000000001505");
    }

    #[test]
    fn emits_lowercase_hex_of_fixed_width() {
        for sample in [&b"x"[..], b"some longer content", &[0u8, 1, 255]] {
            let id = fingerprint(sample);
            assert_eq!(id.as_ref().len(), OBJECT_ID_LENGTH);
            assert!(
                id.as_ref()
                    .chars()
                    .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
            );
        }
    }

    #[test]
    fn never_emits_the_null_sentinel() {
        for sample in [&b""[..], b"hello\n", b"0000000000000000"] {
            assert!(!fingerprint(sample).is_null());
        }
    }
}
