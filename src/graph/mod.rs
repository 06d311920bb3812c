//! In-memory lexical graph.
//!
//! [`LexGraph`] owns every synset, index entry and exception entry of one
//! dictionary. Decoded records enter through the `insert_*` methods unchanged;
//! edits go through the mutation entry points, which keep mirrored pointers, index
//! entries and verb-frame flags consistent as side effects.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use crate::error::{LexError, Result};
use crate::model::{Anchor, ExceptionEntry, IndexEntry, Synset};
use crate::types::{Offset, PartOfSpeech, SynsetId};

mod alloc;
mod entry_ops;
mod frame_ops;
mod pointer_ops;
mod synset_ops;

pub use alloc::{OffsetAllocator, SequentialAllocator};

type EntryKey = (PartOfSpeech, String);

/// Index lookups are case-insensitive.
pub(crate) fn index_key(pos: PartOfSpeech, lemma: &str) -> EntryKey {
    (pos, lemma.to_lowercase())
}

/// All entities of one dictionary.
#[derive(Debug, Default)]
pub struct LexGraph {
    synsets: FxHashMap<SynsetId, Synset>,
    index: BTreeMap<EntryKey, IndexEntry>,
    exceptions: BTreeMap<EntryKey, ExceptionEntry>,
}

impl LexGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a synset.
    pub fn synset(&self, id: SynsetId) -> Option<&Synset> {
        self.synsets.get(&id)
    }

    pub(crate) fn synset_mut(&mut self, id: SynsetId) -> Result<&mut Synset> {
        self.synsets
            .get_mut(&id)
            .ok_or_else(|| LexError::NotFound(format!("synset {id}")))
    }

    pub(crate) fn require_synset(&self, id: SynsetId) -> Result<&Synset> {
        self.synsets
            .get(&id)
            .ok_or_else(|| LexError::NotFound(format!("synset {id}")))
    }

    /// Synsets of `pos` ordered by offset.
    pub fn synsets(&self, pos: PartOfSpeech) -> Vec<&Synset> {
        let mut out: Vec<&Synset> = self.synsets.values().filter(|s| s.pos() == pos).collect();
        out.sort_unstable_by_key(|s| s.offset());
        out
    }

    /// Total number of synsets.
    pub fn synset_count(&self) -> usize {
        self.synsets.len()
    }

    /// Largest offset in use, across every part of speech.
    pub fn max_offset(&self) -> Option<Offset> {
        self.synsets.keys().map(|id| id.offset).max()
    }

    /// Index entry for `lemma`.
    pub fn index_entry(&self, pos: PartOfSpeech, lemma: &str) -> Option<&IndexEntry> {
        self.index.get(&index_key(pos, lemma))
    }

    /// Index entries of `pos` ordered by lemma.
    pub fn index_entries(&self, pos: PartOfSpeech) -> impl Iterator<Item = &IndexEntry> {
        self.index
            .iter()
            .filter(move |((entry_pos, _), _)| *entry_pos == pos)
            .map(|(_, entry)| entry)
    }

    /// Synsets listed as senses of `lemma`, in sense order. Senses whose synset is
    /// not loaded are skipped.
    pub fn senses(&self, pos: PartOfSpeech, lemma: &str) -> Vec<&Synset> {
        self.index_entry(pos, lemma)
            .map(|entry| {
                entry
                    .senses
                    .iter()
                    .filter_map(|offset| self.synsets.get(&SynsetId::new(pos, *offset)))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Exception entry for `lemma`.
    pub fn exception(&self, pos: PartOfSpeech, lemma: &str) -> Option<&ExceptionEntry> {
        self.exceptions.get(&(pos, lemma.to_string()))
    }

    /// Exception entries of `pos` ordered by lemma.
    pub fn exceptions(&self, pos: PartOfSpeech) -> impl Iterator<Item = &ExceptionEntry> {
        self.exceptions
            .iter()
            .filter(move |((entry_pos, _), _)| *entry_pos == pos)
            .map(|(_, entry)| entry)
    }

    /// Whether `anchor` points at an existing synset or word.
    pub fn resolves(&self, anchor: &Anchor) -> bool {
        self.synsets
            .get(&anchor.synset())
            .is_some_and(|synset| synset.resolves(anchor))
    }

    /// Stores a decoded synset as-is. Offsets are identity, so a second synset at
    /// the same address is rejected.
    pub fn insert_synset(&mut self, synset: Synset) -> Result<()> {
        if self.synsets.contains_key(&synset.id) {
            return Err(LexError::InvalidArgument(format!(
                "duplicate synset {}",
                synset.id
            )));
        }
        self.synsets.insert(synset.id, synset);
        Ok(())
    }

    /// Stores a decoded index entry, replacing any entry with the same key.
    pub fn insert_index_entry(&mut self, entry: IndexEntry) {
        self.index.insert(index_key(entry.pos, &entry.lemma), entry);
    }
}
