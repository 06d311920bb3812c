//! `index.<pos>` lines.
//!
//! `lemma pos sense_cnt p_cnt [ptr_symbol...] sense_cnt tagsense_cnt synset_offset...`

use tracing::trace;

use super::{lemma_from_wire, lemma_to_wire, FieldReader};
use crate::error::Result;
use crate::model::IndexEntry;
use crate::types::{Offset, PartOfSpeech, RecordKind};

/// Decodes one index line belonging to the `pos` file.
pub fn decode_index(pos: PartOfSpeech, line: &str) -> Result<IndexEntry> {
    let mut reader = FieldReader::spaced(line, RecordKind::Index);
    let lemma = lemma_from_wire(reader.next_token("lemma")?);

    let pos_token = reader.next_token("pos")?;
    match PartOfSpeech::from_key(pos_token) {
        Some(found) if found == pos => {}
        Some(found) => {
            return Err(reader.malformed("pos", format!("{found} entry in the {pos} index")))
        }
        None => return Err(reader.unknown_pos(pos_token)),
    }
    // The leading sense count duplicates the authoritative one below.
    reader.next_int("synset_cnt")?;

    let pointer_count = reader.next_int("p_cnt")?;
    let mut pointer_symbols = Vec::with_capacity(pointer_count as usize);
    for _ in 0..pointer_count {
        pointer_symbols.push(reader.next_token("ptr_symbol")?.to_string());
    }

    let sense_count = reader.next_int("sense_cnt")?;
    let tagged_sense_count = reader.next_int("tagsense_cnt")?;

    let mut senses = Vec::with_capacity(sense_count as usize);
    for _ in 0..sense_count {
        senses.push(Offset(reader.next_long("synset_offset")?));
    }

    trace!(pos = %pos, lemma = %lemma, senses = senses.len(), "lexgraph.codec.index.decoded");
    Ok(IndexEntry {
        pos,
        lemma,
        senses,
        pointer_symbols,
        tagged_sense_count,
    })
}

/// Encodes an index entry in canonical layout.
pub fn encode_index(entry: &IndexEntry) -> String {
    let senses = entry.senses.len();
    let mut out = format!(
        "{} {} {} {} ",
        lemma_to_wire(&entry.lemma),
        entry.pos.key(),
        senses,
        entry.pointer_symbols.len()
    );
    for symbol in &entry.pointer_symbols {
        out.push_str(symbol);
        out.push(' ');
    }
    out.push_str(&format!("{} {} ", senses, entry.tagged_sense_count));
    for offset in &entry.senses {
        out.push_str(&format!("{:08} ", offset.0));
    }
    out.push(' ');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LexError;

    #[test]
    fn decodes_single_sense_entry() -> Result<()> {
        let entry = decode_index(PartOfSpeech::Noun, "entity n 1 1 ~ 1 0 100000001  ")?;
        assert_eq!(entry.lemma, "entity");
        assert_eq!(entry.senses, vec![Offset(100000001)]);
        assert_eq!(entry.pointer_symbols, vec!["~".to_string()]);
        Ok(())
    }

    #[test]
    fn canonical_line_round_trips() -> Result<()> {
        let line = "physical_entity n 2 3 @ ~ + 2 1 00001930 00002137  ";
        let entry = decode_index(PartOfSpeech::Noun, line)?;
        assert_eq!(entry.lemma, "physical entity");
        assert_eq!(entry.tagged_sense_count, 1);
        assert_eq!(encode_index(&entry), line);
        Ok(())
    }

    #[test]
    fn pointer_symbols_are_not_validated() -> Result<()> {
        let entry = decode_index(PartOfSpeech::Verb, "run v 1 1 zz 1 0 00000005  ")?;
        assert_eq!(entry.pointer_symbols, vec!["zz".to_string()]);
        Ok(())
    }

    #[test]
    fn short_sense_list_is_malformed() {
        let err = decode_index(PartOfSpeech::Noun, "entity n 2 0 2 0 00000001  ").unwrap_err();
        assert!(matches!(
            err,
            LexError::MalformedRecord { field: "synset_offset", position: 7, .. }
        ));
    }

    #[test]
    fn unknown_pos_token_is_reported() {
        let err = decode_index(PartOfSpeech::Noun, "entity x 1 0 1 0 00000001  ").unwrap_err();
        assert!(matches!(err, LexError::UnknownPartOfSpeech { ref token, position: 1, .. } if token == "x"));
    }
}
