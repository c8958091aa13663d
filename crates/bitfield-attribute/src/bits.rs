//! Low-level bit packing utilities for a single integer cell.
//!
//! Bits are addressed in LSB-first order: bit 0 is the least significant bit of the raw value.
//! Raw values are carried as `i64` and reinterpreted as `u64` for bit tests, so negative values
//! simply have their high bits set.

/// Returns true if bit `index` of `raw` is set. Indices of 64 and above are never set.
pub fn bit_at(raw: i64, index: usize) -> bool {
    if index >= 64 {
        return false;
    }

    ((raw as u64) >> index) & 1 == 1
}

/// Mask covering the low `count` bits.
pub fn low_mask(count: usize) -> u64 {
    if count >= 64 {
        u64::MAX
    } else {
        (1u64 << count) - 1
    }
}

/// Returns true if `raw` has any bit set at index `count` or above.
pub fn has_bits_above(raw: i64, count: usize) -> bool {
    (raw as u64) & !low_mask(count) != 0
}

/// Decodes the low `count` bits of `raw` into booleans, index `i` holding bit `i`.
///
/// Bits at or above `count` are not inspected.
pub fn decode(raw: i64, count: usize) -> Vec<bool> {
    let mut values = vec![false; count];

    for (index, value) in values.iter_mut().enumerate() {
        if bit_at(raw, index) {
            *value = true;
        }
    }

    values
}

/// Encodes booleans into a raw value, index `i` becoming bit `i`. Every bit above
/// `values.len()` is zero.
pub fn encode(values: &[bool]) -> i64 {
    let mut raw = 0u64;

    for (index, &value) in values.iter().enumerate().take(64) {
        if value {
            raw |= 1u64 << index;
        }
    }

    raw as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_at() {
        assert!(bit_at(0b101, 0));
        assert!(!bit_at(0b101, 1));
        assert!(bit_at(0b101, 2));
        assert!(!bit_at(0b101, 64));
    }

    #[test]
    fn test_bit_at_negative() {
        assert!(bit_at(-1, 63));
        assert!(bit_at(i64::MIN, 63));
        assert!(!bit_at(i64::MIN, 0));
    }

    #[test]
    fn test_low_mask() {
        assert_eq!(low_mask(0), 0);
        assert_eq!(low_mask(3), 0b111);
        assert_eq!(low_mask(32), 0xffff_ffff);
        assert_eq!(low_mask(64), u64::MAX);
    }

    #[test]
    fn test_has_bits_above() {
        assert!(!has_bits_above(0b111, 3));
        assert!(has_bits_above(0b1000, 3));
        assert!(has_bits_above(-1, 32));
        assert!(!has_bits_above(-1, 64));
    }

    #[test]
    fn test_decode() {
        assert_eq!(decode(0b101, 3), vec![true, false, true]);
        assert_eq!(decode(0, 2), vec![false, false]);
    }

    #[test]
    fn test_decode_ignores_high_bits() {
        assert_eq!(decode(0b1101, 2), vec![true, false]);
    }

    #[test]
    fn test_encode() {
        assert_eq!(encode(&[true, false, true]), 0b101);
        assert_eq!(encode(&[]), 0);
        assert_eq!(encode(&[false; 5]), 0);
    }

    #[test]
    fn test_encode_full_width() {
        assert_eq!(encode(&[true; 64]), -1);
        assert_eq!(encode(&[true; 32]), 0xffff_ffff);
    }
}
