use tracing::debug;

use super::{index_key, LexGraph, OffsetAllocator};
use crate::error::{LexError, Result};
use crate::model::{Anchor, IndexEntry, Synset, Word, MAX_WORD_INDEX};
use crate::types::{SynsetId, SynsetKind};

/// Lemmas must survive the underscore encoding and the space-delimited grammar.
fn validate_lemma(lemma: &str) -> Result<()> {
    if lemma.trim().is_empty() {
        return Err(LexError::InvalidArgument("lemma must be non-empty".into()));
    }
    if lemma.contains('_') {
        return Err(LexError::InvalidArgument(format!(
            "lemma {lemma:?} contains '_'; use spaces"
        )));
    }
    if lemma.contains('|') || lemma.chars().any(|c| c.is_whitespace() && c != ' ') {
        return Err(LexError::InvalidArgument(format!(
            "lemma {lemma:?} contains a reserved character"
        )));
    }
    Ok(())
}

impl LexGraph {
    /// Creates an empty synset at a freshly allocated offset.
    pub fn create_synset(
        &mut self,
        kind: SynsetKind,
        allocator: &mut dyn OffsetAllocator,
    ) -> Result<SynsetId> {
        let pos = kind.pos();
        let offset = allocator.allocate(pos);
        let mut synset = Synset::new(pos, offset);
        synset.adjective_cluster = kind.is_satellite();
        let id = synset.id;
        self.insert_synset(synset)?;
        debug!(synset = %id, "lexgraph.synset.created");
        Ok(id)
    }

    /// Appends a word to `synset` and returns its 1-based index.
    ///
    /// The lemma's index entry gains the synset as a sense and picks up the
    /// symbols of the synset-level pointers. On verbs the word inherits the
    /// synset-wide frames.
    pub fn add_word(&mut self, synset: SynsetId, lemma: &str) -> Result<u8> {
        validate_lemma(lemma)?;
        let target = self.synset_mut(synset)?;
        if target.words.len() >= usize::from(MAX_WORD_INDEX) {
            return Err(LexError::InvalidArgument(format!(
                "synset {synset} already holds {MAX_WORD_INDEX} words"
            )));
        }
        let index = (target.words.len() + 1) as u8;
        let mut word = Word::new(synset, index, lemma);
        word.frames = target.frames;
        target.words.push(word);

        let inherited: Vec<_> = target
            .pointers
            .iter()
            .filter(|p| matches!(p.source, Anchor::Synset(_)))
            .map(|p| p.kind)
            .collect();

        let entry = self
            .index
            .entry(index_key(synset.pos, lemma))
            .or_insert_with(|| IndexEntry::new(synset.pos, lemma.to_lowercase()));
        entry.add_sense(synset.offset);
        for kind in inherited {
            entry.note_pointer(kind);
        }
        debug!(synset = %synset, index, lemma, "lexgraph.word.added");
        Ok(index)
    }

    /// Replaces the gloss. The text is stored byte-exact and must stay on one line.
    pub fn set_gloss(&mut self, synset: SynsetId, gloss: Option<String>) -> Result<()> {
        if let Some(text) = gloss.as_deref() {
            if text.contains('\n') || text.contains('\r') {
                return Err(LexError::InvalidArgument("gloss must be a single line".into()));
            }
        }
        self.synset_mut(synset)?.gloss = gloss;
        Ok(())
    }

    /// Sets the lexicographer file number.
    pub fn set_lex_file_num(&mut self, synset: SynsetId, lex_file_num: u64) -> Result<()> {
        self.synset_mut(synset)?.lex_file_num = lex_file_num;
        Ok(())
    }

    /// Sets the lex id of word `index`.
    pub fn set_lex_id(&mut self, synset: SynsetId, index: u8, lex_id: u8) -> Result<()> {
        let target = self.synset_mut(synset)?;
        let word_count = target.words.len();
        let word = target.word_mut(index).ok_or(LexError::InvalidLinkIndex {
            synset: synset.offset,
            index,
            word_count,
        })?;
        word.lex_id = lex_id;
        Ok(())
    }
}
