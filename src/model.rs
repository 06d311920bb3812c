//! Entities of the lexical graph.

use std::hash::{Hash, Hasher};

use crate::relation::PointerKind;
use crate::types::{Offset, PartOfSpeech, SynsetId, SynsetKind};

/// Largest word index a packed link field can address.
pub const MAX_WORD_INDEX: u8 = u8::MAX;

/// Largest frame number a [`FrameSet`] can hold.
pub const MAX_FRAME: u8 = 127;

/// Set of 1-based verb-frame numbers.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct FrameSet(u128);

impl FrameSet {
    /// Empty set.
    pub const fn new() -> Self {
        FrameSet(0)
    }

    /// Adds `frame`; returns whether it was newly inserted. Frame 0 and
    /// frames above [`MAX_FRAME`] are ignored.
    pub fn insert(&mut self, frame: u8) -> bool {
        if frame == 0 || frame > MAX_FRAME {
            return false;
        }
        let bit = 1u128 << frame;
        let fresh = self.0 & bit == 0;
        self.0 |= bit;
        fresh
    }

    /// Membership test.
    pub fn contains(&self, frame: u8) -> bool {
        frame != 0 && frame <= MAX_FRAME && self.0 & (1u128 << frame) != 0
    }

    /// Number of frames set.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Whether no frame is set.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Frames in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (1..=MAX_FRAME).filter(move |frame| self.contains(*frame))
    }
}

impl FromIterator<u8> for FrameSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = FrameSet::new();
        for frame in iter {
            set.insert(frame);
        }
        set
    }
}

/// One lemma occurrence inside a synset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Word {
    /// Owning synset; a handle, not an owning reference.
    pub synset: SynsetId,
    /// 1-based position, permanent once assigned.
    pub index: u8,
    /// Lemma with spaces (underscores are a wire detail).
    pub lemma: String,
    /// Small disambiguator, hex on the wire.
    pub lex_id: u8,
    /// Verb frames valid for this word.
    pub frames: FrameSet,
}

impl Word {
    /// Creates a word with lex id 0 and no frames.
    pub fn new(synset: SynsetId, index: u8, lemma: impl Into<String>) -> Self {
        Self {
            synset,
            index,
            lemma: lemma.into(),
            lex_id: 0,
            frames: FrameSet::new(),
        }
    }
}

/// Endpoint of a pointer: a whole synset or one word of it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Anchor {
    /// The whole synset.
    Synset(SynsetId),
    /// Word `index` (1-based) of `synset`.
    Word {
        /// Owning synset.
        synset: SynsetId,
        /// 1-based word index.
        index: u8,
    },
}

impl Anchor {
    /// Builds an anchor from a link half; 0 addresses the whole synset.
    pub fn from_link(synset: SynsetId, index: u8) -> Self {
        if index == 0 {
            Anchor::Synset(synset)
        } else {
            Anchor::Word { synset, index }
        }
    }

    /// Synset the anchor lives in.
    pub fn synset(&self) -> SynsetId {
        match *self {
            Anchor::Synset(id) => id,
            Anchor::Word { synset, .. } => synset,
        }
    }

    /// Word index, or 0 for a whole-synset anchor.
    pub fn word_index(&self) -> u8 {
        match *self {
            Anchor::Synset(_) => 0,
            Anchor::Word { index, .. } => index,
        }
    }
}

/// Directed, typed edge owned by the source synset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pointer {
    /// Relation.
    pub kind: PointerKind,
    /// Where the edge starts; always inside the owning synset.
    pub source: Anchor,
    /// Where the edge ends.
    pub target: Anchor,
    /// Target format letter as written on the wire (`s` for satellites).
    pub target_kind: SynsetKind,
}

impl Pointer {
    /// Creates a pointer. `target_kind` is the target synset's own kind, so a
    /// satellite target is written `s`.
    pub fn new(kind: PointerKind, source: Anchor, target: Anchor, target_kind: SynsetKind) -> Self {
        Self {
            kind,
            source,
            target,
            target_kind,
        }
    }

    /// Packed link field for this edge.
    pub fn link(&self) -> u16 {
        crate::codec::link::encode_link(self.source.word_index(), self.target.word_index())
    }

    /// Whether two pointers express the same logical edge.
    pub fn same_edge(&self, kind: PointerKind, source: &Anchor, target: &Anchor) -> bool {
        self.kind == kind && &self.source == source && &self.target == target
    }
}

/// A set of synonymous word senses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Synset {
    /// Identity.
    pub id: SynsetId,
    /// Lexicographer file number.
    pub lex_file_num: u64,
    /// True iff the format letter is `s`.
    pub adjective_cluster: bool,
    /// Owned words; position `i` holds word index `i + 1`.
    pub words: Vec<Word>,
    /// Owned outgoing edges.
    pub pointers: Vec<Pointer>,
    /// Gloss text, byte-exact.
    pub gloss: Option<String>,
    /// Frames valid for every word (verbs only).
    pub frames: FrameSet,
}

impl Synset {
    /// Creates an empty synset.
    pub fn new(pos: PartOfSpeech, offset: Offset) -> Self {
        Self {
            id: SynsetId::new(pos, offset),
            lex_file_num: 0,
            adjective_cluster: false,
            words: Vec::new(),
            pointers: Vec::new(),
            gloss: None,
            frames: FrameSet::new(),
        }
    }

    /// Part of speech.
    pub fn pos(&self) -> PartOfSpeech {
        self.id.pos
    }

    /// Offset.
    pub fn offset(&self) -> Offset {
        self.id.offset
    }

    /// Wire format letter.
    pub fn kind(&self) -> SynsetKind {
        SynsetKind::for_pos(self.id.pos, self.adjective_cluster)
    }

    /// Word by 1-based index.
    pub fn word(&self, index: u8) -> Option<&Word> {
        index
            .checked_sub(1)
            .and_then(|i| self.words.get(usize::from(i)))
    }

    pub(crate) fn word_mut(&mut self, index: u8) -> Option<&mut Word> {
        index
            .checked_sub(1)
            .and_then(|i| self.words.get_mut(usize::from(i)))
    }

    /// Whether `anchor` resolves inside this synset.
    pub fn resolves(&self, anchor: &Anchor) -> bool {
        anchor.synset() == self.id
            && match anchor {
                Anchor::Synset(_) => true,
                Anchor::Word { index, .. } => self.word(*index).is_some(),
            }
    }

    /// Outgoing pointers of `kind`.
    pub fn pointers_of(&self, kind: PointerKind) -> impl Iterator<Item = &Pointer> {
        self.pointers.iter().filter(move |p| p.kind == kind)
    }
}

/// Headword record: lemma to ordered senses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexEntry {
    /// Part of speech.
    pub pos: PartOfSpeech,
    /// Lemma with spaces.
    pub lemma: String,
    /// Synset offsets in sense order.
    pub senses: Vec<Offset>,
    /// Pointer symbols listed on the line; informational, never validated.
    pub pointer_symbols: Vec<String>,
    /// Senses ranked by tagged frequency; informational.
    pub tagged_sense_count: u32,
}

impl IndexEntry {
    /// Creates an entry without senses.
    pub fn new(pos: PartOfSpeech, lemma: impl Into<String>) -> Self {
        Self {
            pos,
            lemma: lemma.into(),
            senses: Vec::new(),
            pointer_symbols: Vec::new(),
            tagged_sense_count: 0,
        }
    }

    pub(crate) fn add_sense(&mut self, offset: Offset) -> bool {
        if self.senses.contains(&offset) {
            return false;
        }
        self.senses.push(offset);
        true
    }

    pub(crate) fn note_pointer(&mut self, kind: PointerKind) {
        let symbol = kind.symbol();
        if !self.pointer_symbols.iter().any(|s| s == symbol) {
            self.pointer_symbols.push(symbol.to_string());
        }
    }
}

/// Irregular inflections of a lemma. Equality uses `(pos, lemma)` only.
#[derive(Clone, Debug)]
pub struct ExceptionEntry {
    /// Part of speech.
    pub pos: PartOfSpeech,
    /// Inflected form with spaces.
    pub lemma: String,
    /// Base forms, in file order.
    pub bases: Vec<String>,
}

impl ExceptionEntry {
    /// Creates an entry.
    pub fn new(pos: PartOfSpeech, lemma: impl Into<String>, bases: Vec<String>) -> Self {
        Self {
            pos,
            lemma: lemma.into(),
            bases,
        }
    }
}

impl PartialEq for ExceptionEntry {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos && self.lemma == other.lemma
    }
}

impl Eq for ExceptionEntry {}

impl Hash for ExceptionEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pos.hash(state);
        self.lemma.hash(state);
    }
}
