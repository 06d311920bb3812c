use tracing::debug;

use super::LexGraph;
use crate::error::{LexError, Result};
use crate::model::ExceptionEntry;
use crate::types::PartOfSpeech;

fn validate_form(form: &str) -> Result<()> {
    let storable = !form.trim().is_empty()
        && !form.contains('_')
        && !form.chars().any(|c| c.is_whitespace() && c != ' ');
    if storable {
        Ok(())
    } else {
        Err(LexError::InvalidArgument(format!(
            "exception form {form:?} cannot be stored"
        )))
    }
}

impl LexGraph {
    /// Adds an exception entry. Entries are keyed by `(pos, lemma)`; when the key
    /// exists the stored entry is kept and `false` is returned.
    pub fn add_exception(
        &mut self,
        pos: PartOfSpeech,
        lemma: &str,
        bases: Vec<String>,
    ) -> Result<bool> {
        validate_form(lemma)?;
        for base in &bases {
            validate_form(base)?;
        }
        let inserted = self.insert_exception(ExceptionEntry::new(pos, lemma, bases));
        if inserted {
            debug!(pos = %pos, lemma, "lexgraph.exception.added");
        }
        Ok(inserted)
    }

    /// Stores a decoded exception entry; returns `false` if the key already exists.
    pub fn insert_exception(&mut self, entry: ExceptionEntry) -> bool {
        let key = (entry.pos, entry.lemma.clone());
        if self.exceptions.contains_key(&key) {
            return false;
        }
        self.exceptions.insert(key, entry);
        true
    }
}
