//! Various convenience utilities for splitting 16-bit panel words
//! into bytes and bytes into nibbles, and for joining them together.
//!
//! Word-wide panel registers are byte pairs: the low byte lives at
//! the even address and the high byte at the following one.
use crate::nibble::Unsigned4Bit;

/// Join a low and a high byte into a 16-bit word.
pub fn join_bytes(low: u8, high: u8) -> u16 {
    u16::from(low) | (u16::from(high) << 8)
}

/// Split a 16-bit word into its (low, high) bytes.
pub fn split_word(word: u16) -> (u8, u8) {
    let [low, high] = word.to_le_bytes();
    (low, high)
}

/// Extract the less-significant nibble of a byte.
pub fn low_nibble(byte: u8) -> Unsigned4Bit {
    Unsigned4Bit::truncating_from(byte)
}

/// Extract the more-significant nibble of a byte.
pub fn high_nibble(byte: u8) -> Unsigned4Bit {
    Unsigned4Bit::truncating_from(byte >> 4)
}

/// Split a byte into (low, high) nibbles.
pub fn split_byte(byte: u8) -> (Unsigned4Bit, Unsigned4Bit) {
    (low_nibble(byte), high_nibble(byte))
}

/// Join a low and a high nibble into a byte.
pub fn join_nibbles(low: Unsigned4Bit, high: Unsigned4Bit) -> u8 {
    u8::from(low) | (u8::from(high) << 4)
}
