//! `<pos>.exc` lines: an inflected form followed by its base forms.

use tracing::trace;

use super::{lemma_from_wire, lemma_to_wire, FieldReader};
use crate::error::Result;
use crate::model::ExceptionEntry;
use crate::types::{PartOfSpeech, RecordKind};

/// Decodes one exception line.
pub fn decode_exception(pos: PartOfSpeech, line: &str) -> Result<ExceptionEntry> {
    let mut reader = FieldReader::whitespace(line, RecordKind::Exception);
    let lemma = lemma_from_wire(reader.next_token("lemma")?);
    let mut bases = Vec::new();
    while reader.has_more() {
        bases.push(lemma_from_wire(reader.next_token("base_form")?));
    }
    trace!(pos = %pos, lemma = %lemma, "lexgraph.codec.exception.decoded");
    Ok(ExceptionEntry::new(pos, lemma, bases))
}

/// Encodes an exception entry.
pub fn encode_exception(entry: &ExceptionEntry) -> String {
    let mut out = lemma_to_wire(&entry.lemma);
    for base in &entry.bases {
        out.push(' ');
        out.push_str(&lemma_to_wire(base));
    }
    out
}
