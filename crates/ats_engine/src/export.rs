use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use ats_logging::{ats_debug, ats_info, ats_warn};
use tempfile::NamedTempFile;
use thiserror::Error;

/// How long the staged copy outlives the save that used it.
pub const DEFAULT_RELEASE_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure output directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), SaveError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| SaveError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(SaveError::OutputDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| SaveError::OutputDir(e.to_string()))?;
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedEmail {
    /// Where the email now lives.
    pub path: PathBuf,
    /// The staged temporary copy; gone once the release delay has passed.
    pub staged_path: PathBuf,
}

/// Saves email drafts as plain-text files.
///
/// The text is first staged as a temporary resource, the save copies it to
/// its final name, and the staged copy is released on a timer whether or not
/// anything else looked at it.
#[derive(Debug, Clone)]
pub struct EmailExporter {
    output_dir: PathBuf,
    release_delay: Duration,
}

impl EmailExporter {
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            release_delay: DEFAULT_RELEASE_DELAY,
        }
    }

    pub fn with_release_delay(mut self, release_delay: Duration) -> Self {
        self.release_delay = release_delay;
        self
    }

    pub fn save(&self, file_name: &str, text: &str) -> Result<SavedEmail, SaveError> {
        ensure_output_dir(&self.output_dir)?;

        let mut staged = tempfile::Builder::new()
            .prefix("ats-email-")
            .suffix(".txt")
            .tempfile()?;
        staged.write_all(text.as_bytes())?;
        staged.flush()?;

        let target = self.output_dir.join(file_name);
        self.write_from(staged.path(), &target)?;
        let staged_path = staged.path().to_path_buf();
        ats_info!("Saved email ({} bytes) to {:?}", text.len(), target);

        release_after(staged, self.release_delay);
        Ok(SavedEmail {
            path: target,
            staged_path,
        })
    }

    fn write_from(&self, source: &Path, target: &Path) -> Result<(), SaveError> {
        let mut tmp = NamedTempFile::new_in(&self.output_dir)?;
        io::copy(&mut File::open(source)?, &mut tmp)?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        // Replace an earlier export of the same name.
        if target.exists() {
            fs::remove_file(target)?;
        }
        tmp.persist(target).map_err(|e| SaveError::Io(e.error))?;
        Ok(())
    }
}

fn release_after(staged: NamedTempFile, delay: Duration) {
    thread::spawn(move || {
        thread::sleep(delay);
        let path = staged.path().to_path_buf();
        match staged.close() {
            Ok(()) => ats_debug!("Released staged export {:?}", path),
            Err(err) => ats_warn!("Could not release staged export {:?}: {}", path, err),
        }
    });
}
