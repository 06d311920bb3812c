//! `data.<pos>` lines.
//!
//! ```text
//! offset lex_filenum ss_type w_cnt (word lex_id)... p_cnt (ptr offset pos link)...
//!     [f_cnt (+ f_num w_num)...] | gloss
//! ```
//!
//! `w_cnt`, `lex_id`, `link` and `w_num` are hexadecimal; every other number is
//! decimal.

use tracing::trace;

use super::{decode_link, lemma_from_wire, lemma_to_wire, FieldReader};
use crate::error::{LexError, Result};
use crate::model::{Anchor, Pointer, Synset, Word, MAX_FRAME};
use crate::relation::PointerKind;
use crate::types::{Offset, PartOfSpeech, RecordKind, SynsetId, SynsetKind};

/// Returns the gloss slice: from two bytes after the first `|` to two bytes before
/// the end of the line, untrimmed. `None` when the line has no gloss marker.
pub fn extract_gloss(line: &str) -> Result<Option<&str>> {
    let bar = match line.find('|') {
        Some(index) if index > 0 => index,
        _ => return Ok(None),
    };
    let start = bar + 2;
    let end = line.len().saturating_sub(2);
    if start > end {
        return Err(LexError::malformed(
            RecordKind::Synset,
            "gloss",
            0,
            "gloss marker too close to end of line",
            line,
        ));
    }
    line.get(start..end).map(Some).ok_or_else(|| {
        LexError::malformed(
            RecordKind::Synset,
            "gloss",
            0,
            "gloss slice splits a character",
            line,
        )
    })
}

/// Decodes one synset line belonging to the `pos` file.
pub fn decode_synset(pos: PartOfSpeech, line: &str) -> Result<Synset> {
    let mut reader = FieldReader::spaced(line, RecordKind::Synset);

    let offset = Offset(reader.next_long("synset_offset")?);
    let lex_file_num = reader.next_long("lex_filenum")?;
    let kind_token = reader.next_token("ss_type")?;
    let kind = SynsetKind::from_key(kind_token).ok_or_else(|| reader.unknown_pos(kind_token))?;
    if kind.pos() != pos {
        return Err(reader.malformed("ss_type", format!("{} synset in the {pos} file", kind.pos())));
    }

    let mut synset = Synset::new(pos, offset);
    synset.lex_file_num = lex_file_num;
    synset.adjective_cluster = kind.is_satellite();
    let id = synset.id;

    let word_count = reader.next_hex("w_cnt")?;
    if word_count > u32::from(u8::MAX) {
        return Err(reader.malformed("w_cnt", format!("{word_count} words exceed the 255 limit")));
    }
    for i in 0..word_count {
        let lemma = lemma_from_wire(reader.next_token("word")?);
        let lex_id = reader.next_hex("lex_id")?;
        let lex_id = u8::try_from(lex_id)
            .map_err(|_| reader.malformed("lex_id", format!("lex id {lex_id:x} exceeds ff")))?;
        let mut word = Word::new(id, (i + 1) as u8, lemma);
        word.lex_id = lex_id;
        synset.words.push(word);
    }

    let pointer_count = reader.next_int("p_cnt")?;
    for _ in 0..pointer_count {
        let symbol = reader.next_token("pointer_symbol")?;
        let pointer_kind =
            PointerKind::from_symbol(symbol).ok_or_else(|| reader.unknown_relation(symbol))?;
        let target_offset = Offset(reader.next_long("pointer_offset")?);
        let target_token = reader.next_token("pointer_pos")?;
        let target_kind =
            SynsetKind::from_key(target_token).ok_or_else(|| reader.unknown_pos(target_token))?;
        let packed = reader.next_hex("source_target")?;
        let packed = u16::try_from(packed)
            .map_err(|_| reader.malformed("source_target", format!("link {packed:x} exceeds ffff")))?;
        let (source_index, target_index) = decode_link(packed);

        if usize::from(source_index) > synset.words.len() {
            return Err(LexError::InvalidLinkIndex {
                synset: offset,
                index: source_index,
                word_count: synset.words.len(),
            });
        }
        let target_id = SynsetId::new(target_kind.pos(), target_offset);
        synset.pointers.push(Pointer::new(
            pointer_kind,
            Anchor::from_link(id, source_index),
            Anchor::from_link(target_id, target_index),
            target_kind,
        ));
    }

    if pos == PartOfSpeech::Verb {
        decode_frames(&mut reader, &mut synset)?;
    }

    synset.gloss = extract_gloss(line)?.map(str::to_string);

    trace!(pos = %pos, offset = %offset, words = synset.words.len(), "lexgraph.codec.synset.decoded");
    Ok(synset)
}

fn decode_frames(reader: &mut FieldReader<'_>, synset: &mut Synset) -> Result<()> {
    let frame_count = reader.next_int("f_cnt")?;
    for _ in 0..frame_count {
        // Literal "+" marker.
        reader.next_token("frame_marker")?;
        let frame = reader.next_int("f_num")?;
        let frame = match u8::try_from(frame) {
            Ok(value) if (1..=MAX_FRAME).contains(&value) => value,
            _ => return Err(reader.malformed("f_num", format!("frame {frame} out of range"))),
        };
        let word_index = reader.next_hex("w_num")?;
        if word_index == 0 {
            synset.frames.insert(frame);
            for word in &mut synset.words {
                word.frames.insert(frame);
            }
            continue;
        }
        let index = u8::try_from(word_index)
            .ok()
            .filter(|index| usize::from(*index) <= synset.words.len());
        match index {
            Some(index) => {
                if let Some(word) = synset.word_mut(index) {
                    word.frames.insert(frame);
                }
            }
            None => {
                return Err(LexError::InvalidLinkIndex {
                    synset: synset.offset(),
                    index: u8::try_from(word_index).unwrap_or(u8::MAX),
                    word_count: synset.words.len(),
                })
            }
        }
    }
    Ok(())
}

/// Frame entries in canonical order: `(frame, word_index)` ascending, synset-wide
/// frames carrying word index 0.
pub(crate) fn frame_entries(synset: &Synset) -> Vec<(u8, u8)> {
    let mut entries: Vec<(u8, u8)> = synset.frames.iter().map(|frame| (frame, 0)).collect();
    for word in &synset.words {
        entries.extend(
            word.frames
                .iter()
                .filter(|frame| !synset.frames.contains(*frame))
                .map(|frame| (frame, word.index)),
        );
    }
    entries.sort_unstable();
    entries
}

/// Encodes a synset in canonical layout.
pub fn encode_synset(synset: &Synset) -> String {
    let mut out = format!(
        "{:08} {:02} {} {:02x} ",
        synset.offset().0,
        synset.lex_file_num,
        synset.kind().key(),
        synset.words.len()
    );
    for word in &synset.words {
        out.push_str(&format!("{} {:x} ", lemma_to_wire(&word.lemma), word.lex_id));
    }

    out.push_str(&format!("{:03} ", synset.pointers.len()));
    for pointer in &synset.pointers {
        out.push_str(&format!(
            "{} {:08} {} {:04x} ",
            pointer.kind.symbol(),
            pointer.target.synset().offset.0,
            pointer.target_kind.key(),
            pointer.link()
        ));
    }

    if synset.pos() == PartOfSpeech::Verb {
        let entries = frame_entries(synset);
        out.push_str(&format!("{:02} ", entries.len()));
        for (frame, word) in entries {
            out.push_str(&format!("+ {frame:02} {word:02x} "));
        }
    }

    match &synset.gloss {
        Some(gloss) => {
            out.push_str("| ");
            out.push_str(gloss);
            out.push_str("  ");
        }
        None => out.push(' '),
    }
    out
}
