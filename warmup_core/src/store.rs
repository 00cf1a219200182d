//! Custom exercise persistence with file locking.
//!
//! User-added exercises are stored as a JSON array next to the rest of the
//! application data. Reads take a shared lock, writes go through a locked
//! temp file that is renamed over the original. Read-modify-write cycles
//! hold an exclusive lock on a sidecar `.lock` file for their whole length.

use crate::{Error, Exercise, ExerciseLibrary, Result};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// File name of the custom exercise store inside the data directory
pub const CUSTOM_EXERCISES_FILE: &str = "custom_exercises.json";

/// JSON file holding the user's custom exercises
#[derive(Clone, Debug)]
pub struct ExerciseStore {
    path: PathBuf,
}

impl ExerciseStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store located in `data_dir`
    pub fn in_data_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(CUSTOM_EXERCISES_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sidecar file serializing read-modify-write cycles
    pub fn lock_path(&self) -> PathBuf {
        let mut lock_path = self.path.clone().into_os_string();
        lock_path.push(".lock");
        PathBuf::from(lock_path)
    }

    /// Load custom exercises with shared locking
    ///
    /// Returns an empty list if the file doesn't exist.
    /// If the file is unreadable or corrupted, logs a warning and returns an empty list.
    pub fn load(&self) -> Result<Vec<Exercise>> {
        let path = &self.path;
        if !path.exists() {
            tracing::debug!("No custom exercises at {:?}", path);
            return Ok(Vec::new());
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(
                    "Unable to open custom exercises {:?}: {}. Ignoring them.",
                    path,
                    e
                );
                return Ok(Vec::new());
            }
        };

        if let Err(e) = file.lock_shared() {
            tracing::warn!(
                "Unable to lock custom exercises {:?}: {}. Ignoring them.",
                path,
                e
            );
            return Ok(Vec::new());
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        if let Err(e) = reader.read_to_string(&mut contents) {
            let _ = file.unlock();
            tracing::warn!(
                "Failed to read custom exercises {:?}: {}. Ignoring them.",
                path,
                e
            );
            return Ok(Vec::new());
        }

        file.unlock()?;

        match serde_json::from_str::<Vec<Exercise>>(&contents) {
            Ok(exercises) => {
                tracing::debug!("Loaded {} custom exercises from {:?}", exercises.len(), path);
                Ok(exercises)
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to parse custom exercises {:?}: {}. Ignoring them.",
                    path,
                    e
                );
                Ok(Vec::new())
            }
        }
    }

    /// Save custom exercises with exclusive locking
    ///
    /// Atomically writes by:
    /// 1. Writing to a temp file
    /// 2. Syncing to disk
    /// 3. Renaming over the original
    pub fn save(&self, exercises: &[Exercise]) -> Result<()> {
        let path = &self.path;
        let parent = path.parent().ok_or_else(|| {
            Error::Other(format!("custom exercise path {:?} has no parent", path))
        })?;
        std::fs::create_dir_all(parent)?;

        let temp = NamedTempFile::new_in(parent)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string_pretty(exercises)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved {} custom exercises to {:?}", exercises.len(), path);
        Ok(())
    }

    /// Build a library from the built-ins and the stored custom exercises
    ///
    /// A hand-edited file can introduce duplicates; they are logged, not fatal.
    pub fn load_library(&self) -> Result<ExerciseLibrary> {
        let library = ExerciseLibrary::new(self.load()?);
        for problem in library.validate() {
            tracing::warn!("Exercise library {:?}: {}", self.path, problem);
        }
        Ok(library)
    }

    /// Persist the custom part of `library`
    pub fn save_library(&self, library: &ExerciseLibrary) -> Result<()> {
        self.save(library.custom_exercises())
    }

    /// Load the library, modify it, and save it back
    ///
    /// The sidecar lock is held from load through save, so concurrent
    /// updates are applied one after another instead of overwriting each
    /// other. Nothing is saved if `f` fails.
    pub fn update<F>(&self, f: F) -> Result<ExerciseLibrary>
    where
        F: FnOnce(&mut ExerciseLibrary) -> Result<()>,
    {
        let lock_path = self.lock_path();
        if let Some(parent) = lock_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let lock = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)?;
        lock.lock_exclusive()?;

        let result = self.load_library().and_then(|mut library| {
            f(&mut library)?;
            self.save_library(&library)?;
            Ok(library)
        });

        lock.unlock()?;
        result
    }
}
