//! Dictionary file layout and atomic replacement.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::Result;
use crate::types::{PartOfSpeech, RecordKind};

/// Path of the file holding `record` lines for `pos`.
pub fn record_path(root: &Path, record: RecordKind, pos: PartOfSpeech) -> PathBuf {
    let suffix = pos.file_suffix();
    match record {
        RecordKind::Synset => root.join(format!("data.{suffix}")),
        RecordKind::Index => root.join(format!("index.{suffix}")),
        RecordKind::Exception => root.join(format!("{suffix}.exc")),
    }
}

/// Every file a dictionary under `root` may own.
pub fn all_paths(root: &Path) -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(12);
    for pos in PartOfSpeech::ALL {
        for record in [RecordKind::Synset, RecordKind::Index, RecordKind::Exception] {
            paths.push(record_path(root, record, pos));
        }
    }
    paths
}

/// Reads a whole file; a missing file reads as empty.
pub fn read_or_empty(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(contents),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(String::new()),
        Err(err) => Err(err.into()),
    }
}

/// Replaces `path` with `lines`, one per line, via a temp file in the same
/// directory.
pub fn write_atomic<I, S>(path: &Path, lines: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let temp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(temp.as_file());
        for line in lines {
            writer.write_all(line.as_ref().as_bytes())?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
    }
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|err| err.error)?;
    Ok(())
}
