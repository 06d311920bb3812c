use crate::types::{Offset, PartOfSpeech};

/// Source of fresh synset offsets. Called exactly once per created synset; every
/// returned value must be unique for the lifetime of the dictionary.
pub trait OffsetAllocator {
    /// Returns the next unused offset for a synset of `pos`.
    fn allocate(&mut self, pos: PartOfSpeech) -> Offset;
}

/// Monotonic counter shared by all parts of speech.
#[derive(Clone, Debug)]
pub struct SequentialAllocator {
    next: u64,
}

impl SequentialAllocator {
    /// Starts handing out offsets at `first`.
    pub fn new(first: u64) -> Self {
        Self { next: first }
    }

    /// Continues after `last`, never going below `first`.
    pub fn resume(first: u64, last: Option<Offset>) -> Self {
        let next = last.map_or(first, |offset| offset.0.saturating_add(1).max(first));
        Self { next }
    }
}

impl Default for SequentialAllocator {
    fn default() -> Self {
        Self::new(1)
    }
}

impl OffsetAllocator for SequentialAllocator {
    fn allocate(&mut self, _pos: PartOfSpeech) -> Offset {
        let offset = Offset(self.next);
        self.next += 1;
        offset
    }
}

impl<F> OffsetAllocator for F
where
    F: FnMut(PartOfSpeech) -> Offset,
{
    fn allocate(&mut self, pos: PartOfSpeech) -> Offset {
        self(pos)
    }
}
