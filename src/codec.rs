//! Text/bit/integer conversions and modulus-bounded chunking.
//!
//! Messages are encoded as a concatenation of fixed 8-bit big-endian fields,
//! one per character, held in a [`BitVec`]. Only code points up to U+00FF
//! (the Latin-1 range) fit this encoding; wider characters are rejected at
//! encode time rather than silently mangled. The encoding also cannot
//! distinguish a leading NUL byte from absent padding, so plaintexts whose
//! first character of a chunk is `'\0'` do not survive a round trip.

use bitvec::prelude::*;
use num_bigint::BigUint;
use num_traits::Zero;

use crate::error::{Error, Result};

/// Bit sequence type used throughout the engine: big-endian within each byte.
pub type Bits = BitVec<u8, Msb0>;

/// Encodes `text` as one 8-bit big-endian field per character.
///
/// Returns an `Encode` error for any character above U+00FF.
pub fn encode_text(text: &str) -> Result<Bits> {
    let mut bits = Bits::with_capacity(text.len() * 8);
    for ch in text.chars() {
        let code = ch as u32;
        if code > 0xFF {
            return Err(Error::Encode(ch));
        }
        for i in (0..8).rev() {
            bits.push(code >> i & 1 == 1);
        }
    }
    Ok(bits)
}

/// Decodes a bit sequence back to text: left-pads with zero bits to a whole
/// number of bytes, then maps each byte to its Latin-1 character.
pub fn decode_bits(bits: &BitSlice<u8, Msb0>) -> String {
    let pad = (8 - bits.len() % 8) % 8;
    let mut padded = Bits::repeat(false, pad);
    padded.extend_from_bitslice(bits);

    padded
        .chunks(8)
        .map(|byte| {
            let value = byte.iter().fold(0u8, |acc, bit| acc << 1 | u8::from(*bit));
            char::from(value)
        })
        .collect()
}

/// The chunk width for a modulus of `modulus_bits` bits: the largest
/// multiple of 8 strictly below the modulus bit length, so every chunk's
/// integer value stays below the modulus.
pub fn chunk_width(modulus_bits: u64) -> u64 {
    modulus_bits.saturating_sub(1) / 8 * 8
}

/// Splits `bits` into successive chunks of [`chunk_width`] bits; the final
/// chunk may be shorter. A modulus of 8 bits or fewer leaves no room for a
/// whole byte per chunk and is rejected.
pub fn chunk(bits: &BitSlice<u8, Msb0>, modulus_bits: u64) -> Result<Vec<&BitSlice<u8, Msb0>>> {
    let width = chunk_width(modulus_bits);
    if width == 0 {
        return Err(Error::invalid_parameter(
            "modulus too small to hold one byte per chunk",
        ));
    }
    Ok(bits.chunks(width as usize).collect())
}

/// Interprets a bit sequence as a big-endian unsigned integer; the empty
/// sequence maps to zero.
pub fn bits_to_uint(bits: &BitSlice<u8, Msb0>) -> BigUint {
    let mut value = BigUint::zero();
    for bit in bits.iter() {
        value <<= 1;
        if *bit {
            value += 1u32;
        }
    }
    value
}

/// Renders an integer as its binary representation left-padded with zero
/// bits to a whole number of bytes. Zero maps to the empty sequence, the
/// inverse of [`bits_to_uint`] on empty input.
pub fn uint_to_bits(value: &BigUint) -> Bits {
    if value.is_zero() {
        return Bits::new();
    }
    let width = (value.bits() + 7) / 8 * 8;
    let mut bits = Bits::with_capacity(width as usize);
    for i in (0..width).rev() {
        bits.push(value.bit(i));
    }
    bits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_text_bit_layout() {
        // 'H' = 0x48 = 0b01001000
        let bits = encode_text("H").unwrap();
        assert_eq!(bits.len(), 8);
        let byte = bits.iter().fold(0u8, |acc, b| acc << 1 | u8::from(*b));
        assert_eq!(byte, 0x48);
    }

    #[test]
    fn test_encode_rejects_wide_chars() {
        assert_eq!(encode_text("\u{20AC}"), Err(Error::Encode('\u{20AC}')));
        // Latin-1 characters are fine.
        assert!(encode_text("caf\u{E9}").is_ok());
    }

    #[test]
    fn test_encode_decode_round_trip() {
        for msg in ["", "A", "HI", "Hello, world", "caf\u{E9} \u{FF}"] {
            let bits = encode_text(msg).unwrap();
            assert_eq!(decode_bits(&bits), msg);
        }
    }

    #[test]
    fn test_decode_left_pads_short_input() {
        // 0b1001000 (7 bits) pads to 0b01001000 = 'H'.
        let mut bits = Bits::new();
        for b in [true, false, false, true, false, false, false] {
            bits.push(b);
        }
        assert_eq!(decode_bits(&bits), "H");
    }

    #[test]
    fn test_chunk_width_keeps_values_below_modulus() {
        // 257-bit modulus: 256-bit chunks.
        assert_eq!(chunk_width(257), 256);
        // A 16-bit modulus must drop to 8-bit chunks, since a 16-bit chunk
        // value could reach the modulus.
        assert_eq!(chunk_width(16), 8);
        assert_eq!(chunk_width(8), 0);
    }

    #[test]
    fn test_chunk_splits_with_short_tail() {
        let bits = encode_text("abcde").unwrap(); // 40 bits
        let chunks = chunk(&bits, 17).unwrap(); // width 16
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 16);
        assert_eq!(chunks[1].len(), 16);
        assert_eq!(chunks[2].len(), 8);
    }

    #[test]
    fn test_chunk_rejects_tiny_modulus() {
        let bits = encode_text("x").unwrap();
        assert!(matches!(chunk(&bits, 8), Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn test_bits_uint_conversions() {
        let bits = encode_text("HI").unwrap();
        let value = bits_to_uint(&bits);
        assert_eq!(value, BigUint::from(0x4849u32));
        assert_eq!(uint_to_bits(&value), bits);

        assert_eq!(bits_to_uint(&Bits::new()), BigUint::zero());
        assert_eq!(uint_to_bits(&BigUint::zero()), Bits::new());
    }
}
