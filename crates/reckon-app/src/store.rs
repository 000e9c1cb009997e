//! Key-value storage for player progress.
//!
//! Storage is asynchronous so that hosts can back it with anything from an
//! in-memory map to a disk. [`FileStore`] does its blocking I/O on a worker
//! thread and answers over oneshot channels; nothing here blocks the caller.

use std::{
    cell::RefCell,
    collections::HashMap,
    fs,
    future::{self, Future},
    io,
    path::{Path, PathBuf},
    pin::Pin,
    rc::Rc,
    sync::mpsc,
    thread,
};

use futures_channel::oneshot;

/// Errors reported by stores.
#[derive(
    Debug, derive_more::Display, derive_more::Error, derive_more::From, derive_more::IsVariant,
)]
pub enum StoreError {
    /// A level number below 1 was passed to a progress write.
    #[display("{_0} is not a valid level number")]
    InvalidLevel(#[error(not(source))] u32),
    /// Reading or writing the backing storage failed.
    #[display("storage I/O failed: {_0}")]
    Io(#[from] io::Error),
    /// A stored value could not be decoded.
    #[display("stored value for {key:?} is corrupt: {source}")]
    Corrupt {
        /// Key of the value.
        key: String,
        /// Decoding error.
        source: serde_json::Error,
    },
    /// The storage worker is gone.
    #[display("storage worker disconnected")]
    Disconnected,
}

/// Boxed future returned by [`KeyValueStore`] operations.
pub type StoreFuture<T> = Pin<Box<dyn Future<Output = Result<T, StoreError>>>>;

/// Asynchronous string key-value storage.
pub trait KeyValueStore {
    /// Reads the value stored under `key`.
    fn get(&self, key: &str) -> StoreFuture<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: String) -> StoreFuture<()>;
}

/// In-memory store; clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the value under `key` without going through a future.
    #[must_use]
    pub fn peek(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreFuture<Option<String>> {
        Box::pin(future::ready(Ok(self.peek(key))))
    }

    fn set(&self, key: &str, value: String) -> StoreFuture<()> {
        self.entries.borrow_mut().insert(key.to_owned(), value);
        Box::pin(future::ready(Ok(())))
    }
}

enum FileRequest {
    Get {
        path: PathBuf,
        reply: oneshot::Sender<io::Result<Option<String>>>,
    },
    Set {
        path: PathBuf,
        value: String,
        reply: oneshot::Sender<io::Result<()>>,
    },
}

impl FileRequest {
    fn handle(self) {
        match self {
            Self::Get { path, reply } => {
                let _ = reply.send(read_value(&path));
            }
            Self::Set { path, value, reply } => {
                let _ = reply.send(write_value(&path, &value));
            }
        }
    }
}

fn read_value(path: &Path) -> io::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

fn write_value(path: &Path, value: &str) -> io::Result<()> {
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, value)?;
    fs::rename(&tmp, path)
}

/// Store keeping one JSON file per key in a directory.
///
/// Writes go to a temporary file that is renamed over the target, so a value
/// is either fully replaced or left as it was. Clones share one worker
/// thread, which exits once every clone is dropped.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
    sender: mpsc::Sender<FileRequest>,
}

impl FileStore {
    /// Opens a store in `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created or the
    /// worker thread cannot be started.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        let (sender, receiver) = mpsc::channel::<FileRequest>();
        thread::Builder::new()
            .name("reckon-store".to_owned())
            .spawn(move || {
                while let Ok(request) = receiver.recv() {
                    request.handle();
                }
            })?;

        log::debug!("opened file store at {}", dir.display());
        Ok(Self { dir, sender })
    }

    /// Returns the directory holding the files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    fn request<T: 'static>(
        &self,
        make: impl FnOnce(oneshot::Sender<io::Result<T>>) -> FileRequest,
    ) -> StoreFuture<T> {
        let (reply, receiver) = oneshot::channel();
        let sent = self.sender.send(make(reply)).is_ok();
        Box::pin(async move {
            if !sent {
                return Err(StoreError::Disconnected);
            }
            let result = receiver.await.map_err(|_| StoreError::Disconnected)?;
            Ok(result?)
        })
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StoreFuture<Option<String>> {
        let path = self.path_for(key);
        self.request(|reply| FileRequest::Get { path, reply })
    }

    fn set(&self, key: &str, value: String) -> StoreFuture<()> {
        let path = self.path_for(key);
        self.request(|reply| FileRequest::Set { path, value, reply })
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::block_on;

    #[test]
    fn test_memory_store_clones_share_entries() {
        let store = MemoryStore::new();
        let other = store.clone();
        block_on(store.set("a", "1".to_owned())).unwrap();
        assert_eq!(block_on(other.get("a")).unwrap().as_deref(), Some("1"));
        assert_eq!(block_on(other.get("b")).unwrap(), None);
    }

    #[test]
    fn test_file_store_round_trips_values() {
        let temp = tempdir().unwrap();
        // Missing parent directories are created on open.
        let dir = temp.path().join("progress");
        let store = FileStore::open(&dir).unwrap();

        assert_eq!(block_on(store.get("currentLevel")).unwrap(), None);
        block_on(store.set("currentLevel", "4".to_owned())).unwrap();
        block_on(store.set("currentLevel", "5".to_owned())).unwrap();
        assert_eq!(
            block_on(store.get("currentLevel")).unwrap().as_deref(),
            Some("5")
        );

        assert!(dir.join("currentLevel.json").is_file());
        assert!(!dir.join("currentLevel.json.tmp").exists());

        // A second store on the same directory sees the data.
        let reopened = FileStore::open(&dir).unwrap();
        assert_eq!(
            block_on(reopened.get("currentLevel")).unwrap().as_deref(),
            Some("5")
        );
    }

    #[test]
    fn test_file_store_reports_io_errors() {
        let temp = tempdir().unwrap();
        let dir = temp.path();
        let store = FileStore::open(dir).unwrap();
        // A directory where the value file should be cannot be read as text.
        fs::create_dir(dir.join("broken.json")).unwrap();

        let err = block_on(store.get("broken")).unwrap_err();
        assert!(err.is_io(), "unexpected error: {err}");
    }
}
