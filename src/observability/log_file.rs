//! Size-rotated log file used as the fmt layer's writer.
//!
//! When the file grows past its size limit it is renamed to
//! `<name>.<unix_timestamp>` and a fresh file is started. Only the newest
//! backups are kept.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Maximum file size before rotation (10 MB).
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Number of backup files to retain after rotation.
const MAX_BACKUP_FILES: usize = 3;

/// Thread-safe rotating log file.
///
/// `&LogFile` implements [`Write`], so an `Arc<LogFile>` can be handed to
/// `tracing_subscriber::fmt::layer().with_writer(..)` directly.
pub struct LogFile {
    path: PathBuf,
    max_bytes: u64,
    max_backups: usize,
    /// Opened on first write.
    file: Mutex<Option<File>>,
}

impl LogFile {
    /// Creates a writer for `path` with the default limits. Nothing is opened
    /// until the first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_limits(path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    #[must_use]
    pub fn with_limits(path: impl Into<PathBuf>, max_bytes: u64, max_backups: usize) -> Self {
        Self {
            path: path.into(),
            max_bytes,
            max_backups,
            file: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_all_rotating(&self, buf: &[u8]) -> io::Result<()> {
        let mut file = self
            .file
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Mutex poisoned: {e}")))?;

        self.check_and_rotate(&mut file)?;

        if file.is_none() {
            *file = Some(OpenOptions::new().create(true).append(true).open(&self.path)?);
        }

        let handle = file
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No file available"))?;
        handle.write_all(buf)?;
        handle.flush()
    }

    fn check_and_rotate(&self, file: &mut Option<File>) -> io::Result<()> {
        if let Ok(metadata) = fs::metadata(&self.path) {
            if metadata.len() > self.max_bytes {
                *file = None;
                self.rotate()?;
            }
        }
        Ok(())
    }

    fn rotate(&self) -> io::Result<()> {
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        let mut backup = self.path.clone().into_os_string();
        backup.push(format!(".{timestamp}"));

        if self.path.exists() {
            fs::rename(&self.path, backup)?;
        }

        self.cleanup_old_backups()
    }

    fn cleanup_old_backups(&self) -> io::Result<()> {
        let parent = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let prefix = self
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .map(|name| format!("{name}."))
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "Invalid file name"))?;

        let mut backups: Vec<PathBuf> = fs::read_dir(parent)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(&prefix))
            })
            .collect();

        // newest first
        backups.sort_by(|a, b| {
            let a_time = fs::metadata(a).and_then(|m| m.modified()).ok();
            let b_time = fs::metadata(b).and_then(|m| m.modified()).ok();
            b_time.cmp(&a_time)
        });

        for old in backups.iter().skip(self.max_backups) {
            let _ = fs::remove_file(old);
        }

        Ok(())
    }
}

impl Write for &LogFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_all_rotating(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl std::fmt::Debug for LogFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogFile")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let log = LogFile::new(dir.path().join("pext.log"));
        (&log).write_all(b"first\n").unwrap();
        (&log).write_all(b"second\n").unwrap();
        assert_eq!(fs::read_to_string(log.path()).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn rotates_past_size_limit() {
        let dir = tempfile::tempdir().unwrap();
        let log = LogFile::with_limits(dir.path().join("pext.log"), 8, 3);
        (&log).write_all(b"0123456789\n").unwrap();
        (&log).write_all(b"fresh\n").unwrap();

        assert_eq!(fs::read_to_string(log.path()).unwrap(), "fresh\n");
        let backups: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().starts_with("pext.log."))
            .collect();
        assert_eq!(backups.len(), 1);
        assert_eq!(fs::read_to_string(backups[0].path()).unwrap(), "0123456789\n");
    }
}
