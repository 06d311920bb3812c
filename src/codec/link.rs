//! Packed source/target word indices of a pointer.
//!
//! The high byte is the source word index, the low byte the target word index;
//! 0 in either half addresses the whole synset.

/// Splits a packed link into `(source, target)` word indices.
pub fn decode_link(packed: u16) -> (u8, u8) {
    ((packed / 256) as u8, (packed % 256) as u8)
}

/// Packs `(source, target)` word indices.
pub fn encode_link(source: u8, target: u8) -> u16 {
    u16::from(source) * 256 + u16::from(target)
}
