//! State document persistence with file locking.
//!
//! The whole document is rewritten on every save: it is serialized into a
//! temp file next to the target, synced, then renamed over the original so
//! a crash mid-write never leaves a truncated file behind.

use crate::{Error, Result, State};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Handle to the JSON file backing the [`State`] document
#[derive(Clone, Debug)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sidecar file locked for the duration of [`StateStore::update`]
    fn lock_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".lock");
        self.path.with_file_name(name)
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.parent_dir() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    fn parent_dir(&self) -> Option<&Path> {
        self.path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
    }

    /// Load the state document with shared locking
    ///
    /// Returns the default (empty) state if the file doesn't exist.
    /// A corrupted file is reported as [`Error::Parse`] and left untouched.
    pub fn load(&self) -> Result<State> {
        if !self.path.exists() {
            tracing::info!("No state file at {:?}, starting empty", self.path);
            return Ok(State::default());
        }

        let file = File::open(&self.path)?;
        file.lock_shared()?;

        let mut contents = String::new();
        let read = std::io::BufReader::new(&file).read_to_string(&mut contents);
        file.unlock()?;
        read?;

        let state = serde_json::from_str::<State>(&contents).map_err(|source| Error::Parse {
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!(
            "Loaded state from {:?}: {} weight entries, {} meal days",
            self.path,
            state.weight_history.len(),
            state.meals.len()
        );
        Ok(state)
    }

    /// Save the state document atomically
    ///
    /// 1. Write pretty JSON to a temp file in the same directory
    /// 2. Sync it to disk
    /// 3. Rename it over the original
    ///
    /// A state holding NaN or infinite values is refused before anything is
    /// written, since JSON would store them as `null` and the next load fails.
    pub fn save(&self, state: &State) -> Result<()> {
        state.check_finite()?;
        self.ensure_parent_dir()?;

        let dir = self.parent_dir().unwrap_or_else(|| Path::new("."));
        let temp = NamedTempFile::new_in(dir)?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string_pretty(state)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved state to {:?}", self.path);
        Ok(())
    }

    /// Load state, modify it, and save it back under an exclusive lock
    ///
    /// The lock is held on a sidecar `.lock` file from load through save, so
    /// concurrent writers are serialized rather than interleaved. If `f`
    /// fails, or `save` refuses the result, nothing is written. Returns the
    /// saved state together with the closure's output.
    pub fn update<F, T>(&self, f: F) -> Result<(State, T)>
    where
        F: FnOnce(&mut State) -> Result<T>,
    {
        self.ensure_parent_dir()?;

        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.lock_path())?;
        lock.lock_exclusive()?;

        let result = self.load().and_then(|mut state| {
            let output = f(&mut state)?;
            self.save(&state)?;
            Ok((state, output))
        });

        lock.unlock()?;
        result
    }
}
