//! Store configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LexError, Result};

/// Configuration supplied when opening a [`crate::store::Dictionary`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreOptions {
    /// Directory holding the dictionary files.
    pub root: PathBuf,
    /// Create `root` when it does not exist.
    pub create_if_missing: bool,
    /// Lowest offset handed to new synsets.
    pub first_offset: u64,
    /// Insert mirror edges missing from loaded files.
    pub reconcile_mirrors: bool,
    /// Skip lines starting with a space (license headers).
    pub skip_header_lines: bool,
    /// Optional TOML message bundle with verb-frame texts.
    pub frame_bundle: Option<PathBuf>,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("dict"),
            create_if_missing: false,
            first_offset: 1,
            reconcile_mirrors: true,
            skip_header_lines: true,
            frame_bundle: None,
        }
    }
}

impl StoreOptions {
    /// Options for the dictionary under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Reads options from a TOML file. Relative paths resolve against the file's
    /// directory.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let mut options: StoreOptions =
            toml::from_str(&contents).map_err(|source| LexError::Config {
                path: path.to_path_buf(),
                source,
            })?;
        if let Some(base) = path.parent() {
            if options.root.is_relative() {
                options.root = base.join(&options.root);
            }
            if let Some(bundle) = options.frame_bundle.as_mut() {
                if bundle.is_relative() {
                    *bundle = base.join(&*bundle);
                }
            }
        }
        Ok(options)
    }

    /// Creates the directory on open when missing.
    pub fn create_if_missing(mut self, enabled: bool) -> Self {
        self.create_if_missing = enabled;
        self
    }

    /// Sets the first offset handed out.
    pub fn first_offset(mut self, offset: u64) -> Self {
        self.first_offset = offset;
        self
    }

    /// Enables or disables mirror reconciliation on load.
    pub fn reconcile_mirrors(mut self, enabled: bool) -> Self {
        self.reconcile_mirrors = enabled;
        self
    }

    /// Enables or disables skipping of header lines.
    pub fn skip_header_lines(mut self, enabled: bool) -> Self {
        self.skip_header_lines = enabled;
        self
    }

    /// Sets the verb-frame bundle.
    pub fn frame_bundle(mut self, path: impl Into<PathBuf>) -> Self {
        self.frame_bundle = Some(path.into());
        self
    }
}
