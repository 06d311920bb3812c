//! Error type shared by the codec, graph and store.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::relation::PointerKind;
use crate::types::{Offset, RecordKind};

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, LexError>;

/// Errors raised while decoding, editing, or persisting a lexical graph.
#[derive(Debug, Error)]
pub enum LexError {
    /// Underlying filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// A field is missing or does not parse in its expected radix.
    #[error("malformed {record} record at field {position} ({field}): {reason}; line: {line:?}")]
    MalformedRecord {
        /// Record grammar being decoded.
        record: RecordKind,
        /// Name of the field that failed.
        field: &'static str,
        /// Zero-based token position within the line.
        position: usize,
        /// What went wrong.
        reason: String,
        /// The offending line.
        line: String,
    },
    /// A pointer symbol outside the relation vocabulary.
    #[error("unknown relation kind {token:?} at field {position}; line: {line:?}")]
    UnknownRelationKind {
        /// The unrecognised symbol.
        token: String,
        /// Zero-based token position within the line.
        position: usize,
        /// The offending line.
        line: String,
    },
    /// A part-of-speech token outside `n v a s r`.
    #[error("unknown part of speech {token:?} at field {position}; line: {line:?}")]
    UnknownPartOfSpeech {
        /// The unrecognised token.
        token: String,
        /// Zero-based token position within the line.
        position: usize,
        /// The offending line.
        line: String,
    },
    /// A packed link field references a word the synset does not have.
    #[error("word index {index} out of range for synset {synset} with {word_count} words")]
    InvalidLinkIndex {
        /// Synset the index was resolved against.
        synset: Offset,
        /// The unresolved 1-based word index.
        index: u8,
        /// Number of words actually present.
        word_count: usize,
    },
    /// The mirror slot of a relation already holds a contradicting kind.
    #[error(
        "mirror conflict between {source_synset} and {target_synset}: existing {existing} contradicts {requested}"
    )]
    DuplicateMirrorConflict {
        /// Synset the new edge starts from.
        source_synset: Offset,
        /// Synset the new edge points at.
        target_synset: Offset,
        /// Relation already stored.
        existing: PointerKind,
        /// Relation being inserted.
        requested: PointerKind,
    },
    /// The store is not in edit mode.
    #[error("dictionary is read-only; call edit() first")]
    ReadOnly,
    /// A referenced entity does not exist.
    #[error("{0} not found")]
    NotFound(String),
    /// Caller supplied an unusable value.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Failed to read a configuration file.
    #[error("failed to parse config {path}: {source}")]
    Config {
        /// Path of the config file.
        path: PathBuf,
        /// Parser error.
        #[source]
        source: toml::de::Error,
    },
}

impl LexError {
    pub(crate) fn malformed(
        record: RecordKind,
        field: &'static str,
        position: usize,
        reason: impl Into<String>,
        line: &str,
    ) -> Self {
        LexError::MalformedRecord {
            record,
            field,
            position,
            reason: reason.into(),
            line: line.to_string(),
        }
    }
}
