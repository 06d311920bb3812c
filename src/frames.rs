//! Verb sentence frames.
//!
//! Frame texts come from a message bundle keyed `VERB_FRAME_001` through
//! `VERB_FRAME_NNN`, with the count under `NUMBER_OF_VERB_FRAMES`. The table is
//! immutable once built; build it once and pass it by reference.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::error::{LexError, Result};
use crate::model::{FrameSet, MAX_FRAME};

/// Bundle key holding the frame count.
pub const FRAME_COUNT_KEY: &str = "NUMBER_OF_VERB_FRAMES";

/// Stand-in for the verb inside a frame text.
pub const PLACEHOLDER: &str = "----";

const PRINCETON_FRAMES: [&str; 35] = [
    "Something ----s",
    "Somebody ----s",
    "It is ----ing",
    "Something is ----ing PP",
    "Something ----s something Adjective/Noun",
    "Something ----s Adjective/Noun",
    "Somebody ----s Adjective",
    "Somebody ----s something",
    "Somebody ----s somebody",
    "Something ----s somebody",
    "Something ----s something",
    "Something ----s to somebody",
    "Somebody ----s on something",
    "Somebody ----s somebody something",
    "Somebody ----s something to somebody",
    "Somebody ----s something from somebody",
    "Somebody ----s somebody with something",
    "Somebody ----s somebody of something",
    "Somebody ----s something on somebody",
    "Somebody ----s somebody PP",
    "Somebody ----s something PP",
    "Somebody ----s PP",
    "Somebody's (body part) ----s",
    "Somebody ----s somebody to INFINITIVE",
    "Somebody ----s somebody INFINITIVE",
    "Somebody ----s that CLAUSE",
    "Somebody ----s to somebody",
    "Somebody ----s to INFINITIVE",
    "Somebody ----s whether INFINITIVE",
    "Somebody ----s somebody into V-ing something",
    "Somebody ----s something with something",
    "Somebody ----s INFINITIVE",
    "Somebody ----s VERB-ing",
    "It ----s that CLAUSE",
    "Something ----s INFINITIVE",
];

static SHARED: OnceLock<VerbFrameRegistry> = OnceLock::new();

/// Immutable table of frame templates indexed from 1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerbFrameRegistry {
    frames: Vec<String>,
}

impl VerbFrameRegistry {
    /// The 35 Princeton frames.
    pub fn builtin() -> Self {
        Self {
            frames: PRINCETON_FRAMES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Process-wide builtin table, constructed by the first caller.
    pub fn shared() -> &'static VerbFrameRegistry {
        SHARED.get_or_init(Self::builtin)
    }

    /// Bundle key for frame `index` (`VERB_FRAME_003`).
    pub fn key_for(index: u8) -> String {
        format!("VERB_FRAME_{index:03}")
    }

    /// Builds the table from a message bundle.
    pub fn from_bundle(bundle: &HashMap<String, String>) -> Result<Self> {
        let count = bundle
            .get(FRAME_COUNT_KEY)
            .ok_or_else(|| LexError::NotFound(format!("bundle key {FRAME_COUNT_KEY}")))?;
        let count: u8 = count.trim().parse().map_err(|_| {
            LexError::InvalidArgument(format!("{FRAME_COUNT_KEY} = {count:?} is not a frame count"))
        })?;
        if count > MAX_FRAME {
            return Err(LexError::InvalidArgument(format!(
                "{count} frames exceed the {MAX_FRAME} supported"
            )));
        }
        let mut frames = Vec::with_capacity(usize::from(count));
        for index in 1..=count {
            let key = Self::key_for(index);
            let text = bundle
                .get(&key)
                .ok_or_else(|| LexError::NotFound(format!("bundle key {key}")))?;
            frames.push(text.clone());
        }
        Ok(Self { frames })
    }

    /// Builds the table from a TOML bundle (`KEY = "text"` pairs).
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let bundle: HashMap<String, toml::Value> = toml::from_str(source)
            .map_err(|err| LexError::InvalidArgument(format!("frame bundle: {err}")))?;
        let bundle = bundle
            .into_iter()
            .map(|(key, value)| {
                let text = match value {
                    toml::Value::String(s) => s,
                    other => other.to_string(),
                };
                (key, text)
            })
            .collect();
        Self::from_bundle(&bundle)
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Template text of frame `index`.
    pub fn frame(&self, index: u8) -> Option<&str> {
        index
            .checked_sub(1)
            .and_then(|i| self.frames.get(usize::from(i)))
            .map(String::as_str)
    }

    /// Frame numbers set in `bits`, ascending.
    pub fn indices(&self, bits: &FrameSet) -> Vec<u8> {
        bits.iter().collect()
    }

    /// Template texts for the frames set in `bits`; unknown numbers are skipped.
    pub fn frames(&self, bits: &FrameSet) -> Vec<&str> {
        bits.iter().filter_map(|index| self.frame(index)).collect()
    }

    /// Frame `index` with the placeholder replaced by `lemma`.
    pub fn instantiate(&self, index: u8, lemma: &str) -> Option<String> {
        self.frame(index).map(|text| text.replace(PLACEHOLDER, lemma))
    }
}

impl Default for VerbFrameRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
