//! Line codecs for the three record grammars.
//!
//! Every grammar is positional: fields are consumed strictly left to right through a
//! [`FieldReader`], numeric radix depends on the field, and decoding fails on the
//! first field that does not fit. Encoders emit the canonical layout so that
//! `decode(encode(record)) == record` and, for canonical lines,
//! `encode(decode(line)) == line`.

pub mod exception;
pub mod index;
pub mod link;
pub mod reader;
pub mod synset;

pub use exception::{decode_exception, encode_exception};
pub use index::{decode_index, encode_index};
pub use link::{decode_link, encode_link};
pub use reader::FieldReader;
pub use synset::{decode_synset, encode_synset, extract_gloss};

/// Lemmas store spaces; the wire uses underscores.
pub(crate) fn lemma_from_wire(token: &str) -> String {
    token.replace('_', " ")
}

pub(crate) fn lemma_to_wire(lemma: &str) -> String {
    lemma.replace(' ', "_")
}
