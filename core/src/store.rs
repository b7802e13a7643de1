//! File-backed todo store.
//!
//! # Design
//! `TodoStore` owns the authoritative in-memory collection and the path of
//! its JSON mirror. Every mutation holds the write lock across
//! read-length, mutate and persist, so ids never collide and file writes land
//! in the same order as the mutations they describe. Reads take the read lock
//! and never touch the file.
//!
//! Write-through is not transactional. If persisting fails the mutation stays
//! in memory and the caller gets `StoreError::Write`; the file catches up on
//! the next successful write.
//!
//! Writes never block a runtime worker: overwrites go through `tokio::fs` and
//! the fsync-and-rename path runs on the blocking pool. The write guard stays
//! held across those awaits.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::types::{CreateTodo, TodoItem};

/// How the collection is written back to disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Truncate and rewrite the data file in place. A crash mid-write can
    /// leave a truncated file behind.
    #[default]
    Overwrite,
    /// Write a sibling temp file, fsync it, then rename it over the data file.
    AtomicRename,
}

#[derive(Debug)]
pub struct TodoStore {
    path: PathBuf,
    write_mode: WriteMode,
    todos: RwLock<Vec<TodoItem>>,
}

impl TodoStore {
    /// Load the collection from `path`.
    ///
    /// A missing or zero-length file yields an empty collection. Anything else
    /// must parse as a JSON array of todo items.
    pub fn open(path: impl Into<PathBuf>, write_mode: WriteMode) -> Result<Self, StoreError> {
        let path = path.into();
        let todos = load(&path)?;
        tracing::info!(path = %path.display(), count = todos.len(), "loaded todos");
        Ok(Self {
            path,
            write_mode,
            todos: RwLock::new(todos),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn len(&self) -> usize {
        self.todos.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.todos.read().await.is_empty()
    }

    /// Snapshot of the collection in insertion order.
    pub async fn list(&self) -> Vec<TodoItem> {
        self.todos.read().await.clone()
    }

    /// Append a new item with `id = len + 1` and persist the collection.
    pub async fn create(&self, input: CreateTodo) -> Result<Vec<TodoItem>, StoreError> {
        let mut todos = self.todos.write().await;
        let id = todos.len() as i64 + 1;
        todos.push(TodoItem {
            id,
            title: input.title,
            done: false,
            body: input.body,
        });
        tracing::debug!(id, "created todo");
        self.persist(&todos).await?;
        Ok(todos.clone())
    }

    /// Mark the first item with a matching id as done and persist the
    /// collection. An unknown id leaves the collection untouched but is still
    /// persisted and reported as success.
    pub async fn mark_done(&self, id: i64) -> Result<Vec<TodoItem>, StoreError> {
        let mut todos = self.todos.write().await;
        match todos.iter_mut().find(|todo| todo.id == id) {
            Some(todo) => todo.done = true,
            None => tracing::debug!(id, "mark_done: no such todo"),
        }
        self.persist(&todos).await?;
        Ok(todos.clone())
    }

    async fn persist(&self, todos: &[TodoItem]) -> Result<(), StoreError> {
        let encoded = serde_json::to_vec_pretty(todos)?;
        let result = match self.write_mode {
            WriteMode::Overwrite => tokio::fs::write(&self.path, encoded).await,
            WriteMode::AtomicRename => {
                let path = self.path.clone();
                tokio::task::spawn_blocking(move || write_atomic(&path, &encoded))
                    .await
                    .unwrap_or_else(|err| Err(io::Error::other(err)))
            }
        };
        result.map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = %self.path.display(), count = todos.len(), "saved todos");
        Ok(())
    }
}

fn load(path: &Path) -> Result<Vec<TodoItem>, StoreError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    if bytes.is_empty() {
        return Ok(Vec::new());
    }
    // `null` decodes to None and loads as an empty collection.
    let todos: Option<Vec<TodoItem>> =
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Format {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(todos.unwrap_or_default())
}

fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    // Temp files are created 0600; keep the data file's own mode instead.
    if let Some(permissions) = target_permissions(path)? {
        tmp.as_file().set_permissions(permissions)?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|err| err.error)?;
    Ok(())
}

fn target_permissions(path: &Path) -> io::Result<Option<fs::Permissions>> {
    match fs::metadata(path) {
        Ok(meta) => Ok(Some(meta.permissions())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(new_file_permissions()),
        Err(err) => Err(err),
    }
}

#[cfg(unix)]
fn new_file_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<fs::Permissions> {
    None
}
