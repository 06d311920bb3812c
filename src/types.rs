//! Identifiers and small vocabularies shared by the codec and the graph.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable synset address, assigned once at creation.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Offset(pub u64);

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Offset {
    fn from(value: u64) -> Self {
        Offset(value)
    }
}

impl From<Offset> for u64 {
    fn from(value: Offset) -> Self {
        value.0
    }
}

/// Part of speech partitioning the dictionary files.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
    /// `n`
    Noun,
    /// `v`
    Verb,
    /// `a`, including satellite adjectives.
    Adjective,
    /// `r`
    Adverb,
}

impl PartOfSpeech {
    /// Every part of speech in file order.
    pub const ALL: [PartOfSpeech; 4] = [
        PartOfSpeech::Noun,
        PartOfSpeech::Verb,
        PartOfSpeech::Adjective,
        PartOfSpeech::Adverb,
    ];

    /// Single-letter key used in index lines and pointer targets.
    pub fn key(self) -> char {
        match self {
            PartOfSpeech::Noun => 'n',
            PartOfSpeech::Verb => 'v',
            PartOfSpeech::Adjective => 'a',
            PartOfSpeech::Adverb => 'r',
        }
    }

    /// Parses a POS key; the satellite marker `s` maps to adjective.
    pub fn from_key(token: &str) -> Option<Self> {
        SynsetKind::from_key(token).map(SynsetKind::pos)
    }

    /// File name suffix (`data.noun`, `index.adj`, `verb.exc`).
    pub fn file_suffix(self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Adjective => "adj",
            PartOfSpeech::Adverb => "adv",
        }
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_suffix())
    }
}

/// Synset format letter; distinguishes satellite adjectives from head adjectives.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SynsetKind {
    /// `n`
    Noun,
    /// `v`
    Verb,
    /// `a`
    Adjective,
    /// `s`
    AdjectiveSatellite,
    /// `r`
    Adverb,
}

impl SynsetKind {
    /// Parses one of `n v a s r`.
    pub fn from_key(token: &str) -> Option<Self> {
        match token {
            "n" => Some(SynsetKind::Noun),
            "v" => Some(SynsetKind::Verb),
            "a" => Some(SynsetKind::Adjective),
            "s" => Some(SynsetKind::AdjectiveSatellite),
            "r" => Some(SynsetKind::Adverb),
            _ => None,
        }
    }

    /// Wire letter.
    pub fn key(self) -> char {
        match self {
            SynsetKind::AdjectiveSatellite => 's',
            other => other.pos().key(),
        }
    }

    /// Part of speech the kind belongs to.
    pub fn pos(self) -> PartOfSpeech {
        match self {
            SynsetKind::Noun => PartOfSpeech::Noun,
            SynsetKind::Verb => PartOfSpeech::Verb,
            SynsetKind::Adjective | SynsetKind::AdjectiveSatellite => PartOfSpeech::Adjective,
            SynsetKind::Adverb => PartOfSpeech::Adverb,
        }
    }

    /// Whether this is the satellite-adjective marker.
    pub fn is_satellite(self) -> bool {
        matches!(self, SynsetKind::AdjectiveSatellite)
    }

    /// Builds the kind for a part of speech and cluster flag.
    pub fn for_pos(pos: PartOfSpeech, adjective_cluster: bool) -> Self {
        match pos {
            PartOfSpeech::Noun => SynsetKind::Noun,
            PartOfSpeech::Verb => SynsetKind::Verb,
            PartOfSpeech::Adjective if adjective_cluster => SynsetKind::AdjectiveSatellite,
            PartOfSpeech::Adjective => SynsetKind::Adjective,
            PartOfSpeech::Adverb => SynsetKind::Adverb,
        }
    }
}

/// Synset identity: part of speech plus offset.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct SynsetId {
    /// Part of speech.
    pub pos: PartOfSpeech,
    /// Offset within that part of speech.
    pub offset: Offset,
}

impl SynsetId {
    /// Creates an id.
    pub fn new(pos: PartOfSpeech, offset: impl Into<Offset>) -> Self {
        Self {
            pos,
            offset: offset.into(),
        }
    }
}

impl fmt::Display for SynsetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.pos.key(), self.offset)
    }
}

/// The three line grammars.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum RecordKind {
    /// `index.<pos>` lines.
    Index,
    /// `data.<pos>` lines.
    Synset,
    /// `<pos>.exc` lines.
    Exception,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RecordKind::Index => "index",
            RecordKind::Synset => "synset",
            RecordKind::Exception => "exception",
        })
    }
}
