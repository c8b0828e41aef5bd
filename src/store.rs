use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::Local;
use log::{debug, info};

use crate::registry::RegistryResponse;

/// File name prefix for plain registry search responses.
pub const DEFAULT_PREFIX: &str = "kcdb_response";

/// Directory of raw registry responses, one timestamped file per query.
#[derive(Debug, Clone)]
pub struct ResponseStore {
    root: PathBuf,
}

impl ResponseStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ResponseStore { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `raw` byte for byte to `<root>/<prefix>_<YYYYmmdd_HHMMSS>.json`.
    ///
    /// An existing file is never overwritten: a second save within the same
    /// second lands in `<prefix>_<timestamp>_1.json`, then `_2`, and so on.
    pub fn save(&self, prefix: &str, raw: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("creating {}", self.root.display()))?;

        let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        let (path, mut file) = self.create_unique(prefix, &timestamp)?;
        file.write_all(raw.as_bytes())
            .with_context(|| format!("writing {}", path.display()))?;

        info!("stored registry response at {}", path.display());
        Ok(path)
    }

    fn create_unique(&self, prefix: &str, timestamp: &str) -> Result<(PathBuf, File)> {
        for n in 0..10_000u32 {
            let name = match n {
                0 => format!("{prefix}_{timestamp}.json"),
                n => format!("{prefix}_{timestamp}_{n}.json"),
            };
            let path = self.root.join(name);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => return Ok((path, file)),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    debug!("{} exists, trying next suffix", path.display());
                }
                Err(e) => {
                    return Err(e).with_context(|| format!("creating {}", path.display()));
                }
            }
        }
        bail!("no free file name for {prefix}_{timestamp} in {}", self.root.display())
    }

    /// Stored response files, sorted by name (and so by time within a prefix).
    pub fn list(&self) -> Result<Vec<PathBuf>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let mut files = Vec::new();
        for entry in fs::read_dir(&self.root)
            .with_context(|| format!("listing {}", self.root.display()))?
        {
            let path = entry.context("reading directory entry")?.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

/// Read a stored response back into the registry model.
pub fn load(path: &Path) -> Result<RegistryResponse> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    RegistryResponse::parse(&text).with_context(|| format!("loading {}", path.display()))
}
