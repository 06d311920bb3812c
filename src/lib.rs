//! File-backed lexical graph store.
//!
//! Decodes the Princeton line formats (`data.*`, `index.*`, `*.exc`) into a
//! [`LexGraph`], keeps mirrored pointers, index entries and verb-frame flags
//! consistent across edits, and writes the graph back so that reloading it yields
//! the same graph.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod codec;
pub mod config;
pub mod error;
pub mod frames;
pub mod graph;
pub mod model;
pub mod relation;
pub mod store;
pub mod types;

pub use config::StoreOptions;
pub use error::{LexError, Result};
pub use frames::VerbFrameRegistry;
pub use graph::{LexGraph, OffsetAllocator, SequentialAllocator};
pub use model::{Anchor, ExceptionEntry, FrameSet, IndexEntry, Pointer, Synset, Word};
pub use relation::PointerKind;
pub use store::verify::{verify, VerifyLevel, VerifyReport};
pub use store::{Dictionary, Mode, StoreStats};
pub use types::{Offset, PartOfSpeech, RecordKind, SynsetId, SynsetKind};
