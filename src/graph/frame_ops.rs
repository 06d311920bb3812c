use super::LexGraph;
use crate::error::{LexError, Result};
use crate::model::MAX_FRAME;
use crate::types::{PartOfSpeech, SynsetId};

impl LexGraph {
    /// Marks verb frame `frame` as valid.
    ///
    /// `word_index` 0 applies the frame to the synset and every word in it. A
    /// nonzero index sets only that word; the synset-level flag follows once every
    /// word carries the frame.
    pub fn set_verb_frame(&mut self, synset: SynsetId, frame: u8, word_index: u8) -> Result<()> {
        if synset.pos != PartOfSpeech::Verb {
            return Err(LexError::InvalidArgument(format!(
                "verb frames on non-verb synset {synset}"
            )));
        }
        if frame == 0 || frame > MAX_FRAME {
            return Err(LexError::InvalidArgument(format!(
                "frame {frame} outside 1..={MAX_FRAME}"
            )));
        }
        let target = self.synset_mut(synset)?;
        if word_index == 0 {
            target.frames.insert(frame);
            for word in &mut target.words {
                word.frames.insert(frame);
            }
            return Ok(());
        }

        let word_count = target.words.len();
        let word = target.word_mut(word_index).ok_or(LexError::InvalidLinkIndex {
            synset: synset.offset,
            index: word_index,
            word_count,
        })?;
        word.frames.insert(frame);
        if target.words.iter().all(|w| w.frames.contains(frame)) {
            target.frames.insert(frame);
        }
        Ok(())
    }
}
