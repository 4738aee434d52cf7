use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Advisory write lock on the data directory.
///
/// Held only for the duration of one board rewrite; a concurrent writer (a
/// running TUI and a `focus` CLI invocation) waits its turn instead of
/// interleaving. flock on Unix, a no-op elsewhere. Released when the handle
/// drops and the fd closes.
pub struct StoreLock {
    _file: File,
}

/// Error type for lock operations
#[derive(Debug, thiserror::Error)]
pub enum LockError {
    #[error("could not create lock file at {path}: {source}")]
    CreateError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not acquire lock on {path}: another focus process may be writing")]
    Timeout { path: PathBuf },
}

const RETRY_INTERVAL: Duration = Duration::from_millis(25);
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

impl StoreLock {
    /// Acquire the lock, waiting up to `timeout` for a concurrent holder.
    pub fn acquire(data_dir: &Path, timeout: Duration) -> Result<Self, LockError> {
        fs::create_dir_all(data_dir).map_err(|e| LockError::CreateError {
            path: data_dir.to_path_buf(),
            source: e,
        })?;
        let lock_path = data_dir.join(".lock");
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| LockError::CreateError {
                path: lock_path.clone(),
                source: e,
            })?;

        let deadline = Instant::now() + timeout;
        while flock_exclusive(&file).is_err() {
            if Instant::now() >= deadline {
                return Err(LockError::Timeout { path: lock_path });
            }
            std::thread::sleep(RETRY_INTERVAL);
        }
        Ok(StoreLock { _file: file })
    }

    pub fn acquire_default(data_dir: &Path) -> Result<Self, LockError> {
        Self::acquire(data_dir, DEFAULT_TIMEOUT)
    }
}

// The lock file stays in place on release. Unlinking it would let a waiter
// still holding the old fd coexist with a fresh lock on a new inode.

#[cfg(unix)]
fn flock_exclusive(file: &File) -> Result<(), std::io::Error> {
    use std::os::unix::io::AsRawFd;
    let result = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_EX | libc::LOCK_NB) };
    if result == 0 {
        Ok(())
    } else {
        Err(std::io::Error::last_os_error())
    }
}

#[cfg(not(unix))]
fn flock_exclusive(_file: &File) -> Result<(), std::io::Error> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn acquire_and_release() {
        let tmp = TempDir::new().unwrap();
        let data_dir = tmp.path().join("focus");

        let lock = StoreLock::acquire_default(&data_dir);
        assert!(lock.is_ok());
        drop(lock);

        let again = StoreLock::acquire_default(&data_dir);
        assert!(again.is_ok());
    }

    #[test]
    fn contention_times_out() {
        let tmp = TempDir::new().unwrap();
        let data_dir = tmp.path().join("focus");

        let _held = StoreLock::acquire_default(&data_dir).unwrap();
        let second = StoreLock::acquire(&data_dir, Duration::from_millis(50));
        assert!(second.is_err());
    }

    #[test]
    fn lock_file_survives_release() {
        let tmp = TempDir::new().unwrap();
        let data_dir = tmp.path().join("focus");

        let lock = StoreLock::acquire_default(&data_dir).unwrap();
        drop(lock);

        // The marker must not be unlinked; a fresh lock reuses the inode
        assert!(data_dir.join(".lock").exists());
        assert!(StoreLock::acquire_default(&data_dir).is_ok());
    }
}
