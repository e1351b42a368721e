//! record/checksum — 4-байтовый трейлер CRC32 (IEEE) поверх payload.
//!
//! - CRC считается только по payload, сам трейлер в хеш не входит;
//! - на диске трейлер хранится big-endian (как и все скаляры формата);
//! - stored == 0 не имеет особого смысла: сравнение всегда честное.

use byteorder::{BigEndian, ByteOrder};
use crc32fast::Hasher as Crc32;

use crate::consts::CHECKSUM_LEN;

/// CRC32 (IEEE 802.3) of the payload bytes.
#[inline]
pub fn crc32(payload: &[u8]) -> u32 {
    let mut hasher = Crc32::new();
    hasher.update(payload);
    hasher.finalize()
}

/// CRC32 of the payload in its on-disk (big-endian) form.
#[inline]
pub fn crc32_be(payload: &[u8]) -> [u8; CHECKSUM_LEN] {
    let mut out = [0u8; CHECKSUM_LEN];
    BigEndian::write_u32(&mut out, crc32(payload));
    out
}

/// Split a whole-file buffer into (payload, stored trailer value).
/// None when the buffer cannot even hold the trailer.
#[inline]
pub fn split_trailer(buf: &[u8]) -> Option<(&[u8], u32)> {
    if buf.len() < CHECKSUM_LEN {
        return None;
    }
    let (payload, trailer) = buf.split_at(buf.len() - CHECKSUM_LEN);
    Some((payload, BigEndian::read_u32(trailer)))
}

/// Verify a whole-file buffer: trailer == CRC32(payload). Short buffers are never valid.
pub fn verify_trailer(buf: &[u8]) -> bool {
    match split_trailer(buf) {
        Some((payload, stored)) => crc32(payload) == stored,
        None => false,
    }
}

/// Hex rendering of a checksum value, as printed in reports (8 lowercase digits).
#[inline]
pub fn checksum_hex(value: u32) -> String {
    format!("{:08x}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Bitwise reference CRC32 (reflected, poly 0xEDB88320), independent from crc32fast.
    fn crc32_reference(data: &[u8]) -> u32 {
        let mut crc = 0xFFFF_FFFFu32;
        for &b in data {
            crc ^= b as u32;
            for _ in 0..8 {
                let mask = (crc & 1).wrapping_neg();
                crc = (crc >> 1) ^ (0xEDB8_8320 & mask);
            }
        }
        !crc
    }

    #[test]
    fn crc32_check_value() {
        assert_eq!(crc32(b"123456789"), 0xCBF4_3926);
        assert_eq!(crc32_be(b"123456789"), [0xCB, 0xF4, 0x39, 0x26]);
        assert_eq!(crc32(b""), 0);
    }

    #[test]
    fn crc32_matches_reference_impl() {
        let mut rng = oorandom::Rand64::new(0x5EED_CAFE);
        for len in [1usize, 7, 64, 1000, 4099] {
            let data: Vec<u8> = (0..len).map(|_| rng.rand_u64() as u8).collect();
            assert_eq!(crc32(&data), crc32_reference(&data), "len={len}");
        }
    }

    #[test]
    fn trailer_split_and_verify() {
        let mut buf = b"hello world".to_vec();
        let tr = crc32_be(&buf);
        buf.extend_from_slice(&tr);

        let (payload, stored) = split_trailer(&buf).unwrap();
        assert_eq!(payload, b"hello world");
        assert_eq!(stored, crc32(b"hello world"));
        assert!(verify_trailer(&buf));

        buf[0] ^= 0x01;
        assert!(!verify_trailer(&buf));

        assert!(split_trailer(&[1, 2, 3]).is_none());
        assert!(!verify_trailer(&[1, 2, 3]));
    }

    #[test]
    fn hex_is_zero_padded() {
        assert_eq!(checksum_hex(0x0000_00ab), "000000ab");
        assert_eq!(checksum_hex(0xCBF4_3926), "cbf43926");
    }
}
