//! Rotating log file with size-based rotation and backup retention.
//!
//! [`LogFile`] is a cheaply cloneable handle implementing [`std::io::Write`],
//! so a closure returning a clone can serve as the fmt layer's writer. All
//! clones share one file handle behind a mutex.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Maximum file size before rotation (10 MB).
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Number of backup files to retain after rotation.
const MAX_BACKUP_FILES: usize = 3;

/// Shared handle to a rotating log file.
///
/// # Rotation Strategy
///
/// 1. Check file size before each write
/// 2. If size > 10MB, rotate:
///    - Rename current file to `<name>.<timestamp>`
///    - Reopen an empty file
///    - Remove oldest backups beyond 3
#[derive(Clone)]
pub struct LogFile {
    inner: Arc<Mutex<Inner>>,
}

struct Inner {
    path: PathBuf,
    file: Option<fs::File>,
}

impl LogFile {
    /// Creates a handle for `path`. The file is opened on first write.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner { path, file: None })),
        }
    }

    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.inner
            .lock()
            .map(|inner| inner.path.clone())
            .unwrap_or_default()
    }
}

impl Inner {
    fn check_and_rotate(&mut self) -> io::Result<()> {
        if let Ok(metadata) = fs::metadata(&self.path) {
            if metadata.len() > MAX_FILE_SIZE_BYTES {
                self.file = None;
                self.rotate_files()?;
            }
        }
        Ok(())
    }

    fn rotate_files(&self) -> io::Result<()> {
        let timestamp = chrono::Utc::now().timestamp();
        let mut backup = self.path.clone().into_os_string();
        backup.push(format!(".{timestamp}"));

        if self.path.exists() {
            fs::rename(&self.path, PathBuf::from(backup))?;
        }
        cleanup_old_backups(&self.path)
    }

    fn file(&mut self) -> io::Result<&mut fs::File> {
        if self.file.is_none() {
            let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
            self.file = Some(file);
        }
        self.file
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "log file unavailable"))
    }
}

/// Removes backups of `path` beyond the retention limit, newest kept.
fn cleanup_old_backups(path: &Path) -> io::Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "no parent directory"))?;
    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "invalid file name"))?;
    let prefix = format!("{file_name}.");

    let mut backups: Vec<PathBuf> = fs::read_dir(parent)?
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|candidate| {
            candidate
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(&prefix))
        })
        .collect();

    backups.sort_by(|a, b| {
        let a_time = fs::metadata(a).and_then(|m| m.modified()).ok();
        let b_time = fs::metadata(b).and_then(|m| m.modified()).ok();
        b_time.cmp(&a_time)
    });

    for old_backup in backups.iter().skip(MAX_BACKUP_FILES) {
        let _ = fs::remove_file(old_backup);
    }
    Ok(())
}

fn poisoned<T>(e: std::sync::PoisonError<T>) -> io::Error {
    io::Error::new(io::ErrorKind::Other, format!("log file mutex poisoned: {e}"))
}

impl Write for LogFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut inner = self.inner.lock().map_err(poisoned)?;
        inner.check_and_rotate()?;
        inner.file()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut inner = self.inner.lock().map_err(poisoned)?;
        match inner.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for LogFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogFile")
            .field("path", &self.path())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_append_to_the_same_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("confview.log");
        let mut a = LogFile::new(path.clone());
        let mut b = a.clone();
        writeln!(a, "first").unwrap();
        writeln!(b, "second").unwrap();
        b.flush().unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn keeps_at_most_three_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("confview.log");
        for i in 0..5 {
            fs::write(dir.path().join(format!("confview.log.{i}")), "old").unwrap();
        }
        cleanup_old_backups(&path).unwrap();
        let remaining = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(remaining, MAX_BACKUP_FILES);
    }
}
