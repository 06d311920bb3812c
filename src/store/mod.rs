//! File-backed dictionary: loads the Princeton files into a [`LexGraph`], gates
//! edits behind edit mode, allocates offsets and writes everything back.

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::{error, info, warn};

use crate::codec::{
    decode_exception, decode_index, decode_synset, encode_exception, encode_index, encode_synset,
};
use crate::config::StoreOptions;
use crate::error::{LexError, Result};
use crate::frames::VerbFrameRegistry;
use crate::graph::{LexGraph, SequentialAllocator};
use crate::model::Anchor;
use crate::relation::PointerKind;
use crate::types::{PartOfSpeech, RecordKind, SynsetId, SynsetKind};

pub mod files;
pub mod verify;

/// Access mode of an open dictionary.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Mode {
    /// Lookups only.
    Read,
    /// Mutations allowed.
    Edit,
}

/// Counts reported by a load or save.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct StoreStats {
    /// Synset records.
    pub synsets: usize,
    /// Index records.
    pub index_entries: usize,
    /// Exception records.
    pub exceptions: usize,
    /// Mirror edges inserted while loading.
    pub mirrors_added: usize,
}

/// An open dictionary directory.
pub struct Dictionary {
    options: StoreOptions,
    graph: LexGraph,
    mode: Mode,
    allocator: SequentialAllocator,
    frames: VerbFrameRegistry,
    loaded: StoreStats,
}

impl Dictionary {
    /// Opens the dictionary in read mode, loading every file under the root.
    pub fn open(options: StoreOptions) -> Result<Self> {
        if !options.root.exists() {
            if !options.create_if_missing {
                return Err(LexError::NotFound(format!(
                    "dictionary directory {}",
                    options.root.display()
                )));
            }
            fs::create_dir_all(&options.root)?;
        }
        let frames = match options.frame_bundle.as_deref() {
            Some(path) => VerbFrameRegistry::from_toml_str(&fs::read_to_string(path)?)?,
            None => VerbFrameRegistry::builtin(),
        };

        let mut graph = LexGraph::new();
        let mut stats = load_into(&mut graph, &options)?;
        if options.reconcile_mirrors {
            stats.mirrors_added = graph.reconcile_mirrors()?;
        }
        let allocator = SequentialAllocator::resume(options.first_offset, graph.max_offset());
        info!(
            root = %options.root.display(),
            synsets = stats.synsets,
            index_entries = stats.index_entries,
            exceptions = stats.exceptions,
            mirrors_added = stats.mirrors_added,
            "lexgraph.store.loaded"
        );
        Ok(Self {
            options,
            graph,
            mode: Mode::Read,
            allocator,
            frames,
            loaded: stats,
        })
    }

    /// Options the dictionary was opened with.
    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switches to edit mode.
    pub fn edit(&mut self) {
        if self.mode != Mode::Edit {
            info!(root = %self.options.root.display(), "lexgraph.store.edit");
            self.mode = Mode::Edit;
        }
    }

    /// Read access to the graph.
    pub fn graph(&self) -> &LexGraph {
        &self.graph
    }

    /// Write access to the graph; edit mode only.
    pub fn graph_mut(&mut self) -> Result<&mut LexGraph> {
        self.ensure_editable()?;
        Ok(&mut self.graph)
    }

    /// Counts recorded while opening.
    pub fn load_stats(&self) -> StoreStats {
        self.loaded
    }

    /// Verb-frame table for this dictionary.
    pub fn frames(&self) -> &VerbFrameRegistry {
        &self.frames
    }

    /// Creates a synset at the next free offset.
    pub fn create_synset(&mut self, kind: SynsetKind) -> Result<SynsetId> {
        self.ensure_editable()?;
        self.graph.create_synset(kind, &mut self.allocator)
    }

    /// See [`LexGraph::add_word`].
    pub fn add_word(&mut self, synset: SynsetId, lemma: &str) -> Result<u8> {
        self.graph_mut()?.add_word(synset, lemma)
    }

    /// See [`LexGraph::add_pointer`].
    pub fn add_pointer(&mut self, kind: PointerKind, source: Anchor, target: Anchor) -> Result<bool> {
        self.graph_mut()?.add_pointer(kind, source, target)
    }

    /// See [`LexGraph::set_gloss`].
    pub fn set_gloss(&mut self, synset: SynsetId, gloss: impl Into<String>) -> Result<()> {
        self.graph_mut()?.set_gloss(synset, Some(gloss.into()))
    }

    /// See [`LexGraph::set_verb_frame`].
    pub fn set_verb_frame(&mut self, synset: SynsetId, frame: u8, word_index: u8) -> Result<()> {
        self.graph_mut()?.set_verb_frame(synset, frame, word_index)
    }

    /// See [`LexGraph::add_exception`].
    pub fn add_exception(&mut self, pos: PartOfSpeech, lemma: &str, bases: Vec<String>) -> Result<bool> {
        self.graph_mut()?.add_exception(pos, lemma, bases)
    }

    /// Re-encodes every entity and replaces the files. Stays in edit mode.
    pub fn save(&mut self) -> Result<StoreStats> {
        self.ensure_editable()?;
        let root = &self.options.root;
        fs::create_dir_all(root)?;
        let mut stats = StoreStats::default();
        for pos in PartOfSpeech::ALL {
            let synsets: Vec<String> = self.graph.synsets(pos).into_iter().map(encode_synset).collect();
            stats.synsets += synsets.len();
            files::write_atomic(&files::record_path(root, RecordKind::Synset, pos), synsets)?;

            let index: Vec<String> = self.graph.index_entries(pos).map(encode_index).collect();
            stats.index_entries += index.len();
            files::write_atomic(&files::record_path(root, RecordKind::Index, pos), index)?;

            let exceptions: Vec<String> = self.graph.exceptions(pos).map(encode_exception).collect();
            stats.exceptions += exceptions.len();
            files::write_atomic(&files::record_path(root, RecordKind::Exception, pos), exceptions)?;
        }
        info!(
            root = %root.display(),
            synsets = stats.synsets,
            index_entries = stats.index_entries,
            exceptions = stats.exceptions,
            "lexgraph.store.saved"
        );
        Ok(stats)
    }

    /// Releases the in-memory graph without saving.
    pub fn close(self) {
        info!(root = %self.options.root.display(), "lexgraph.store.closed");
    }

    /// Removes every dictionary file, and the directory when nothing else is left.
    pub fn delete(self) -> Result<()> {
        let root = self.options.root.clone();
        for path in files::all_paths(&root) {
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
                Err(err) => return Err(err.into()),
            }
        }
        if fs::read_dir(&root)?.next().is_none() {
            fs::remove_dir(&root)?;
        }
        info!(root = %root.display(), "lexgraph.store.deleted");
        Ok(())
    }

    fn ensure_editable(&self) -> Result<()> {
        match self.mode {
            Mode::Edit => Ok(()),
            Mode::Read => Err(LexError::ReadOnly),
        }
    }
}

fn load_into(graph: &mut LexGraph, options: &StoreOptions) -> Result<StoreStats> {
    let mut stats = StoreStats::default();
    for pos in PartOfSpeech::ALL {
        for_each_record(options, RecordKind::Synset, pos, |line| {
            graph.insert_synset(decode_synset(pos, line)?)?;
            stats.synsets += 1;
            Ok(())
        })?;
        for_each_record(options, RecordKind::Index, pos, |line| {
            graph.insert_index_entry(decode_index(pos, line)?);
            stats.index_entries += 1;
            Ok(())
        })?;
        for_each_record(options, RecordKind::Exception, pos, |line| {
            let entry = decode_exception(pos, line)?;
            if !graph.insert_exception(entry) {
                warn!(pos = %pos, line, "lexgraph.store.duplicate_exception");
            }
            stats.exceptions += 1;
            Ok(())
        })?;
    }
    Ok(stats)
}

fn for_each_record<F>(options: &StoreOptions, record: RecordKind, pos: PartOfSpeech, mut apply: F) -> Result<()>
where
    F: FnMut(&str) -> Result<()>,
{
    let path = files::record_path(&options.root, record, pos);
    let contents = files::read_or_empty(&path)?;
    for (number, line) in contents.lines().enumerate() {
        if line.trim().is_empty() || (options.skip_header_lines && line.starts_with(' ')) {
            continue;
        }
        if let Err(err) = apply(line) {
            log_record_error(&path, number + 1, &err);
            return Err(err);
        }
    }
    Ok(())
}

fn log_record_error(path: &Path, line_number: usize, err: &LexError) {
    error!(
        file = %path.display(),
        line_number,
        error = %err,
        "lexgraph.store.decode_failed"
    );
}
