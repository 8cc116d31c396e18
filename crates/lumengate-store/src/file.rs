//! JSON-lines flat-file store.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use lumengate_types::Profile;

use crate::error::{Result, StoreError};
use crate::traits::ProfileStore;

/// Profile store backed by a JSON-lines file.
///
/// The full file is loaded at open; a missing file is an empty store.
/// `insert` appends a single line, `update_identifier` rewrites the
/// whole file. Durability is exactly "the file was written"; nothing
/// more is promised.
#[derive(Debug)]
pub struct FlatFileStore {
    path: PathBuf,
    profiles: Vec<Profile>,
}

impl FlatFileStore {
    /// Opens the store at `path`, creating parent directories as needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let profiles = match File::open(&path) {
            Ok(file) => Self::load(file)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(
            path = %path.display(),
            profiles = profiles.len(),
            "Opened profile store"
        );

        Ok(Self { path, profiles })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(file: File) -> Result<Vec<Profile>> {
        let reader = BufReader::new(file);
        let mut profiles = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let profile = serde_json::from_str(&line)
                .map_err(|source| StoreError::CorruptRecord {
                    line: idx + 1,
                    source,
                })?;
            profiles.push(profile);
        }
        Ok(profiles)
    }

    fn append_line(&self, profile: &Profile) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let line = serde_json::to_string(profile)?;
        writeln!(file, "{line}")?;
        Ok(())
    }

    fn rewrite(&self) -> Result<()> {
        let mut out = String::new();
        for profile in &self.profiles {
            out.push_str(&serde_json::to_string(profile)?);
            out.push('\n');
        }
        std::fs::write(&self.path, out)?;
        Ok(())
    }
}

impl ProfileStore for FlatFileStore {
    fn all(&self) -> &[Profile] {
        &self.profiles
    }

    fn insert(&mut self, profile: Profile) -> Result<()> {
        self.append_line(&profile)?;
        tracing::info!(display_name = %profile.display_name, "Stored new profile");
        self.profiles.push(profile);
        Ok(())
    }

    fn update_identifier(&mut self, old: &str, new: &str) -> Result<()> {
        let profile = self
            .profiles
            .iter_mut()
            .find(|p| p.identifier == old)
            .ok_or(StoreError::NotFound)?;
        profile.identifier = new.to_string();
        self.rewrite()?;
        tracing::info!("Rewrote stored identifier form");
        Ok(())
    }
}
