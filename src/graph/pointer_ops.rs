use tracing::{debug, warn};

use super::{index_key, LexGraph};
use crate::error::{LexError, Result};
use crate::model::{Anchor, Pointer};
use crate::relation::PointerKind;

impl LexGraph {
    /// Adds a `kind` edge from `source` to `target`.
    ///
    /// When `kind` has a mirror, the reverse edge is inserted on the target (or
    /// found already there). Re-adding an existing edge is a no-op. Returns whether
    /// the forward edge was new.
    pub fn add_pointer(&mut self, kind: PointerKind, source: Anchor, target: Anchor) -> Result<bool> {
        self.ensure_anchor(&source)?;
        self.ensure_anchor(&target)?;
        if source == target {
            return Err(LexError::InvalidArgument(format!(
                "{kind} pointer from an anchor to itself"
            )));
        }
        self.check_mirror_slot(kind, &source, &target)?;

        let inserted = self.push_pointer(kind, source, target)?;
        self.note_pointer_kind(kind, &source);

        if let Some(mirror) = kind.mirror() {
            if self.push_pointer(mirror, target, source)? {
                debug!(
                    kind = %mirror,
                    source = %target.synset(),
                    target = %source.synset(),
                    "lexgraph.mirror.inserted"
                );
            }
            self.note_pointer_kind(mirror, &target);
        }
        Ok(inserted)
    }

    /// Inserts every mirror edge missing from the loaded data and returns how many
    /// were added. Edges whose target synset is absent are logged and skipped.
    pub fn reconcile_mirrors(&mut self) -> Result<usize> {
        let mut wanted = Vec::new();
        for synset in self.synsets.values() {
            for pointer in &synset.pointers {
                if let Some(mirror) = pointer.kind.mirror() {
                    wanted.push((mirror, pointer.target, pointer.source));
                }
            }
        }

        let mut added = 0;
        for (kind, source, target) in wanted {
            let Some(owner) = self.synsets.get(&source.synset()) else {
                warn!(
                    source = %target.synset(),
                    target = %source.synset(),
                    "lexgraph.mirror.dangling"
                );
                continue;
            };
            if !owner.resolves(&source) {
                return Err(LexError::InvalidLinkIndex {
                    synset: owner.offset(),
                    index: source.word_index(),
                    word_count: owner.words.len(),
                });
            }
            if self.push_pointer(kind, source, target)? {
                added += 1;
            }
        }
        if added > 0 {
            warn!(added, "lexgraph.mirror.reconciled");
        }
        Ok(added)
    }

    fn ensure_anchor(&self, anchor: &Anchor) -> Result<()> {
        let synset = self.require_synset(anchor.synset())?;
        if synset.resolves(anchor) {
            Ok(())
        } else {
            Err(LexError::InvalidLinkIndex {
                synset: synset.offset(),
                index: anchor.word_index(),
                word_count: synset.words.len(),
            })
        }
    }

    /// A non-self-mirroring relation must not be asserted in both directions, nor
    /// alongside its own mirror in the same direction.
    fn check_mirror_slot(&self, kind: PointerKind, source: &Anchor, target: &Anchor) -> Result<()> {
        let Some(mirror) = kind.mirror() else {
            return Ok(());
        };
        if mirror == kind {
            return Ok(());
        }
        let conflict = |existing: PointerKind| LexError::DuplicateMirrorConflict {
            source_synset: source.synset().offset,
            target_synset: target.synset().offset,
            existing,
            requested: kind,
        };
        let target_synset = self.require_synset(target.synset())?;
        if target_synset
            .pointers
            .iter()
            .any(|p| p.same_edge(kind, target, source))
        {
            return Err(conflict(kind));
        }
        let source_synset = self.require_synset(source.synset())?;
        if source_synset
            .pointers
            .iter()
            .any(|p| p.same_edge(mirror, source, target))
        {
            return Err(conflict(mirror));
        }
        Ok(())
    }

    /// Appends the edge to the source synset unless it is already present.
    fn push_pointer(&mut self, kind: PointerKind, source: Anchor, target: Anchor) -> Result<bool> {
        let target_kind = self.require_synset(target.synset())?.kind();
        let owner = self.synset_mut(source.synset())?;
        if owner
            .pointers
            .iter()
            .any(|p| p.same_edge(kind, &source, &target))
        {
            return Ok(false);
        }
        owner.pointers.push(Pointer::new(kind, source, target, target_kind));
        Ok(true)
    }

    /// Records `kind` on the index entries of the lemmas the edge starts from.
    fn note_pointer_kind(&mut self, kind: PointerKind, source: &Anchor) {
        let Some(synset) = self.synsets.get(&source.synset()) else {
            return;
        };
        let pos = synset.pos();
        let lemmas: Vec<String> = match source {
            Anchor::Synset(_) => synset.words.iter().map(|w| w.lemma.clone()).collect(),
            Anchor::Word { index, .. } => synset.word(*index).map(|w| w.lemma.clone()).into_iter().collect(),
        };
        for lemma in lemmas {
            if let Some(entry) = self.index.get_mut(&index_key(pos, &lemma)) {
                entry.note_pointer(kind);
            }
        }
    }
}
