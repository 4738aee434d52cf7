use std::fs;
use std::path::{Path, PathBuf};

use crate::io::lock::{LockError, StoreLock};
use crate::model::board::Board;

/// Name of the persisted board file inside the data directory.
pub const BOARD_FILE: &str = "board.json";

/// Error type for store persistence
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not serialize board: {0}")]
    SerializeError(#[from] serde_json::Error),
    #[error(transparent)]
    LockError(#[from] LockError),
}

type Listener = Box<dyn FnMut(&Board)>;

/// Owns the board and its backing file.
///
/// All mutations go through [`Store::mutate`], which applies the closure as
/// one transition, rewrites the whole file, and then notifies subscribers —
/// observers never see a half-applied compound operation.
pub struct Store {
    board: Board,
    path: PathBuf,
    listeners: Vec<Listener>,
}

impl Store {
    /// Load the board from `dir/board.json`. A missing or unparseable file
    /// falls back to the seeded default board; that is a recovery, not an
    /// error, so nothing is surfaced.
    pub fn load_or_default(dir: &Path) -> Store {
        let path = dir.join(BOARD_FILE);
        let board = fs::read_to_string(&path)
            .ok()
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or_default();
        Store {
            board,
            path,
            listeners: Vec::new(),
        }
    }

    /// Read-only snapshot of the current state.
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Register a change observer, called after every committed mutation.
    pub fn subscribe(&mut self, listener: impl FnMut(&Board) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Apply a mutation, persist the new snapshot, notify observers.
    ///
    /// A transition that leaves the board equal to what it was (a failed
    /// precondition, a same-container drag preview) skips the rewrite and
    /// the notifications entirely.
    pub fn mutate<R>(&mut self, f: impl FnOnce(&mut Board) -> R) -> Result<R, StoreError> {
        let before = self.board.clone();
        let out = f(&mut self.board);
        if self.board == before {
            return Ok(out);
        }
        self.save()?;
        for listener in &mut self.listeners {
            listener(&self.board);
        }
        Ok(out)
    }

    /// Re-read the board from disk (another process wrote it).
    /// Returns true if the in-memory board changed.
    pub fn reload(&mut self) -> bool {
        let fresh: Board = match fs::read_to_string(&self.path)
            .ok()
            .and_then(|text| serde_json::from_str(&text).ok())
        {
            Some(b) => b,
            None => return false,
        };
        if fresh == self.board {
            return false;
        }
        self.board = fresh;
        for listener in &mut self.listeners {
            listener(&self.board);
        }
        true
    }

    /// Atomic write: serialize to a temp file in the same directory, then
    /// rename over the board file. The advisory lock is held only for the
    /// rewrite itself, so a concurrent process waits briefly rather than
    /// finding the lock taken for a whole TUI run.
    fn save(&self) -> Result<(), StoreError> {
        let text = serde_json::to_string_pretty(&self.board)?;
        let dir = self.path.parent().unwrap_or(Path::new("."));
        let _lock = StoreLock::acquire_default(dir)?;

        let tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| StoreError::WriteError {
            path: self.path.clone(),
            source: e,
        })?;
        fs::write(tmp.path(), text).map_err(|e| StoreError::WriteError {
            path: self.path.clone(),
            source: e,
        })?;
        tmp.persist(&self.path).map_err(|e| StoreError::WriteError {
            path: self.path.clone(),
            source: e.error,
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::board_ops::add_task;
    use std::cell::Cell;
    use std::rc::Rc;
    use tempfile::TempDir;

    #[test]
    fn missing_file_falls_back_to_default() {
        let dir = TempDir::new().unwrap();
        let store = Store::load_or_default(dir.path());
        assert_eq!(store.board(), &Board::default());
    }

    #[test]
    fn corrupt_file_falls_back_to_default() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(BOARD_FILE), "not json {{{").unwrap();
        let store = Store::load_or_default(dir.path());
        assert_eq!(store.board(), &Board::default());
    }

    #[test]
    fn mutate_persists_and_reloads() {
        let dir = TempDir::new().unwrap();
        let mut store = Store::load_or_default(dir.path());
        let id = store.mutate(|b| add_task(b, 1234)).unwrap();

        let reopened = Store::load_or_default(dir.path());
        assert_eq!(reopened.board(), store.board());
        assert!(reopened.board().backlog.contains(&id));
    }

    #[test]
    fn observers_see_each_committed_snapshot() {
        let dir = TempDir::new().unwrap();
        let mut store = Store::load_or_default(dir.path());
        let seen = Rc::new(Cell::new(0usize));
        let seen_in_listener = Rc::clone(&seen);
        store.subscribe(move |board| {
            seen_in_listener.set(board.backlog.len());
        });

        store.mutate(|b| add_task(b, 1)).unwrap();
        assert_eq!(seen.get(), 2); // seed task + new one
        store.mutate(|b| add_task(b, 2)).unwrap();
        assert_eq!(seen.get(), 3);
    }

    #[test]
    fn reload_picks_up_external_writes() {
        let dir = TempDir::new().unwrap();
        let mut a = Store::load_or_default(dir.path());
        let mut b = Store::load_or_default(dir.path());
        a.mutate(|board| add_task(board, 99)).unwrap();

        assert!(b.reload());
        assert_eq!(b.board(), a.board());
        assert!(!b.reload());
    }

    #[test]
    fn write_lock_is_released_after_each_mutate() {
        use std::time::Duration;

        let dir = TempDir::new().unwrap();
        let mut store = Store::load_or_default(dir.path());
        store.mutate(|b| add_task(b, 1)).unwrap();

        // The lock must be free again the moment the save returns
        let lock = StoreLock::acquire(dir.path(), Duration::from_millis(50));
        assert!(lock.is_ok());

        drop(lock);
        store.mutate(|b| add_task(b, 2)).unwrap();
    }

    #[test]
    fn unchanged_board_skips_save_and_notify() {
        use crate::ops::session_ops::start_session;

        let dir = TempDir::new().unwrap();
        let mut store = Store::load_or_default(dir.path());
        store.mutate(|b| add_task(b, 1)).unwrap();

        let seen = Rc::new(Cell::new(0usize));
        let seen_in_listener = Rc::clone(&seen);
        store.subscribe(move |_| seen_in_listener.set(seen_in_listener.get() + 1));

        // With the file gone, any save would recreate it
        fs::remove_file(store.path()).unwrap();

        store.mutate(|_| ()).unwrap();
        let rejected = store.mutate(|b| start_session(b, 0)).unwrap();
        assert!(rejected.is_err());

        assert_eq!(seen.get(), 0);
        assert!(!store.path().exists());
    }
}
