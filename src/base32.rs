use std::str::from_utf8_unchecked;

use crate::Error;

// cspell:disable-next-line
const ALPHABET: [u8; 32] = *b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

const INVALID: u8 = 0xFF;
const __: u8 = INVALID;

/// Maps ASCII code points to 5-bit symbol values. `I` and `L` alias to 1,
/// `O` aliases to 0, `U` is always invalid. Bytes >= 0x80 are handled by
/// the bounds check in [`lookup`].
#[rustfmt::skip]
const DECODE: [u8; 128] = [
    /* 0x00 */  __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __,
    /* 0x10 */  __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __,
    /* 0x20 */  __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __,
    /* 0x30 */   0,  1,  2,  3,  4,  5,  6,  7,  8,  9, __, __, __, __, __, __,
    /* 0x40 */  __, 10, 11, 12, 13, 14, 15, 16, 17,  1, 18, 19,  1, 20, 21,  0,
    /* 0x50 */  22, 23, 24, 25, 26, __, 27, 28, 29, 30, 31, __, __, __, __, __,
    /* 0x60 */  __, 10, 11, 12, 13, 14, 15, 16, 17,  1, 18, 19,  1, 20, 21,  0,
    /* 0x70 */  22, 23, 24, 25, 26, __, 27, 28, 29, 30, 31, __, __, __, __, __,
];

fn lookup(byte: u8) -> Option<u8> {
    let value = *DECODE.get(usize::from(byte))?;
    (value != INVALID).then_some(value)
}

pub fn encode(mut n: u128, buffer: &mut [u8; 26]) -> &str {
    for byte in buffer.iter_mut().rev() {
        *byte = ALPHABET[(n & 0x1F) as usize];
        n >>= 5;
    }

    // Safety: Every byte written above is ASCII from the alphabet
    unsafe { from_utf8_unchecked(buffer) }
}

/// Decodes 26 Crockford Base32 characters into a 128-bit value.
///
/// The 26 symbols carry 130 bits; the two bits shifted out beyond the
/// `u128` belong to no field and are dropped, so a first symbol >= 8 is
/// silently truncated to its low 3 bits.
pub fn decode(ascii_bytes: &[u8; 26]) -> Result<u128, Error> {
    let mut n: u128 = 0;

    for (position, &byte) in ascii_bytes.iter().enumerate() {
        let value = lookup(byte).ok_or(Error::InvalidCharacter { byte, position })?;
        n = (n << 5) | u128::from(value);
    }

    Ok(n)
}

pub fn validate(buffer: &[u8; 26]) -> Result<(), Error> {
    for (position, &byte) in buffer.iter().enumerate() {
        if lookup(byte).is_none() {
            return Err(Error::InvalidCharacter { byte, position });
        }
    }

    Ok(())
}

pub fn canonicalize(buffer: &mut [u8; 26]) -> Result<&str, Error> {
    for (position, slot) in buffer.iter_mut().enumerate() {
        let byte = *slot;
        *slot = normalize(byte).ok_or(Error::InvalidCharacter { byte, position })?;
    }

    // Safety: `normalize` only returns bytes from the canonical alphabet
    Ok(unsafe { from_utf8_unchecked(buffer) })
}

const fn normalize(c: u8) -> Option<u8> {
    match c {
        b'i' | b'I' | b'l' | b'L' => Some(b'1'),
        b'o' | b'O' => Some(b'0'),
        b'u' | b'U' => None,
        c if c.is_ascii_alphanumeric() => Some(c.to_ascii_uppercase()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphabet_round_trips_through_decode_table() {
        for (value, &symbol) in ALPHABET.iter().enumerate() {
            assert_eq!(lookup(symbol), Some(value as u8));
            assert_eq!(lookup(symbol.to_ascii_lowercase()), Some(value as u8));
        }
    }

    #[test]
    fn aliases_and_exclusions() {
        for alias in [b'i', b'I', b'l', b'L'] {
            assert_eq!(lookup(alias), Some(1));
        }
        for alias in [b'o', b'O'] {
            assert_eq!(lookup(alias), Some(0));
        }
        assert_eq!(lookup(b'u'), None);
        assert_eq!(lookup(b'U'), None);
        assert_eq!(lookup(b' '), None);
        assert_eq!(lookup(b'@'), None);
        assert_eq!(lookup(0x80), None);
        assert_eq!(lookup(0xFF), None);
    }

    #[test]
    fn normalize_agrees_with_decode_table() {
        for byte in 0..=u8::MAX {
            match normalize(byte) {
                Some(canonical) => assert_eq!(lookup(byte), Some(ALPHABET.iter().position(|&c| c == canonical).unwrap() as u8)),
                None => assert_eq!(lookup(byte), None),
            }
        }
    }
}
