//! Consistency checks over a dictionary directory.

use rustc_hash::FxHashSet;
use serde::Serialize;

use super::files;
use crate::codec::{
    decode_exception, decode_index, decode_synset, encode_exception, encode_index, encode_synset,
};
use crate::config::StoreOptions;
use crate::error::{LexError, Result};
use crate::graph::LexGraph;
use crate::types::{PartOfSpeech, RecordKind, SynsetId};

use super::Dictionary;

const MAX_FINDINGS: usize = 32;

/// How much checking [`verify`] performs.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifyLevel {
    /// Decode and re-encode every line, requiring byte-identical output.
    Fast,
    /// Also load the graph and check pointer targets, mirrors and index senses.
    Full,
}

/// One problem found by [`verify`].
#[derive(Clone, Debug, Serialize)]
pub struct VerifyFinding {
    /// File the problem was found in, when it is tied to one line.
    pub file: Option<String>,
    /// 1-based line number within `file`.
    pub line_number: Option<usize>,
    /// Description.
    pub message: String,
}

/// Totals gathered while verifying.
#[derive(Clone, Debug, Default, Serialize)]
pub struct VerifyCounts {
    /// Files present and read.
    pub files_checked: u64,
    /// Record lines decoded.
    pub lines_checked: u64,
    /// Lines that failed to decode.
    pub decode_errors: u64,
    /// Lines whose re-encoding differs from the input.
    pub mismatches: u64,
    /// Synset lines repeating an offset already seen in the same file.
    pub duplicate_offsets: u64,
    /// Graph-level problems (full level only).
    pub graph_errors: u64,
}

/// Result of [`verify`].
#[derive(Clone, Debug, Serialize)]
pub struct VerifyReport {
    /// Level that was run.
    pub level: VerifyLevel,
    /// Whether nothing was found.
    pub success: bool,
    /// At most the first 32 findings.
    pub findings: Vec<VerifyFinding>,
    /// Totals.
    pub counts: VerifyCounts,
}

/// Checks the dictionary described by `options`.
///
/// Decode failures, mismatches and graphs that fail to load are reported as
/// findings rather than errors; only I/O failures abort the run.
pub fn verify(options: &StoreOptions, level: VerifyLevel) -> Result<VerifyReport> {
    let mut findings = Vec::new();
    let mut counts = VerifyCounts::default();

    for pos in PartOfSpeech::ALL {
        for record in [RecordKind::Synset, RecordKind::Index, RecordKind::Exception] {
            check_file(options, record, pos, &mut findings, &mut counts)?;
        }
    }

    if matches!(level, VerifyLevel::Full) && counts.decode_errors == 0 {
        match Dictionary::open(options.clone().reconcile_mirrors(false)) {
            Ok(dictionary) => check_graph(dictionary.graph(), &mut findings, &mut counts),
            Err(LexError::Io(err)) => return Err(err.into()),
            Err(err) => {
                counts.graph_errors += 1;
                push(&mut findings, None, None, format!("graph failed to load: {err}"));
            }
        }
    }

    Ok(VerifyReport {
        level,
        success: counts.decode_errors == 0
            && counts.mismatches == 0
            && counts.duplicate_offsets == 0
            && counts.graph_errors == 0,
        findings,
        counts,
    })
}

fn check_file(
    options: &StoreOptions,
    record: RecordKind,
    pos: PartOfSpeech,
    findings: &mut Vec<VerifyFinding>,
    counts: &mut VerifyCounts,
) -> Result<()> {
    let path = files::record_path(&options.root, record, pos);
    if !path.exists() {
        return Ok(());
    }
    counts.files_checked += 1;
    let contents = files::read_or_empty(&path)?;
    let file = path.display().to_string();
    let mut offsets = FxHashSet::default();

    for (number, line) in contents.lines().enumerate() {
        if line.trim().is_empty() || (options.skip_header_lines && line.starts_with(' ')) {
            continue;
        }
        counts.lines_checked += 1;
        let encoded = match record {
            RecordKind::Synset => decode_synset(pos, line).map(|synset| {
                if !offsets.insert(synset.offset()) {
                    counts.duplicate_offsets += 1;
                    push(
                        findings,
                        Some(&file),
                        Some(number + 1),
                        format!("offset {} already used earlier in the file", synset.offset()),
                    );
                }
                encode_synset(&synset)
            }),
            RecordKind::Index => decode_index(pos, line).map(|e| encode_index(&e)),
            RecordKind::Exception => decode_exception(pos, line).map(|e| encode_exception(&e)),
        };
        match encoded {
            Ok(encoded) if encoded == line => {}
            Ok(encoded) => {
                counts.mismatches += 1;
                push(findings, Some(&file), Some(number + 1), format!("re-encoded as {encoded:?}"));
            }
            Err(err) => {
                counts.decode_errors += 1;
                push(findings, Some(&file), Some(number + 1), err.to_string());
            }
        }
    }
    Ok(())
}

fn check_graph(graph: &LexGraph, findings: &mut Vec<VerifyFinding>, counts: &mut VerifyCounts) {
    for pos in PartOfSpeech::ALL {
        for synset in graph.synsets(pos) {
            for pointer in &synset.pointers {
                if !graph.resolves(&pointer.target) {
                    counts.graph_errors += 1;
                    push(
                        findings,
                        None,
                        None,
                        format!("{} {} targets missing {}", synset.id, pointer.kind, pointer.target.synset()),
                    );
                    continue;
                }
                let Some(mirror) = pointer.kind.mirror() else {
                    continue;
                };
                let mirrored = graph.synset(pointer.target.synset()).is_some_and(|target| {
                    target
                        .pointers
                        .iter()
                        .any(|p| p.same_edge(mirror, &pointer.target, &pointer.source))
                });
                if !mirrored {
                    counts.graph_errors += 1;
                    push(
                        findings,
                        None,
                        None,
                        format!(
                            "{} {} to {} has no {} back",
                            synset.id,
                            pointer.kind,
                            pointer.target.synset(),
                            mirror
                        ),
                    );
                }
            }
        }

        for entry in graph.index_entries(pos) {
            for offset in &entry.senses {
                if graph.synset(SynsetId::new(pos, *offset)).is_none() {
                    counts.graph_errors += 1;
                    push(
                        findings,
                        None,
                        None,
                        format!("index entry {:?} lists missing sense {offset}", entry.lemma),
                    );
                }
            }
        }
    }
}

fn push(findings: &mut Vec<VerifyFinding>, file: Option<&str>, line_number: Option<usize>, message: String) {
    if findings.len() < MAX_FINDINGS {
        findings.push(VerifyFinding {
            file: file.map(str::to_string),
            line_number,
            message,
        });
    }
}
