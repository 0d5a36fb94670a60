//! Catalog of books backed by a single JSON file.
//!
//! The whole collection lives in memory and is rewritten to disk after
//! every mutation. Ids are assigned from a counter that is recomputed from
//! the loaded data, never stored on its own.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info, instrument, warn};

use crate::domain::{Book, BookStatus};

use super::display;

/// Suffix given to a corrupted data file when it is moved aside
pub const CORRUPT_SUFFIX: &str = "corrupt";

/// Errors that can occur while loading or updating the catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Data file is corrupted: {path}")]
    Corrupted {
        path: PathBuf,
        #[source]
        source: CorruptionError,
    },

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Book id counter exhausted at {next}")]
    IdsExhausted { next: u64 },
}

/// Why a data file could not be loaded
#[derive(Debug, Error)]
pub enum CorruptionError {
    #[error("not a JSON array of books")]
    Parse(#[from] serde_json::Error),

    #[error("entry {index} is not a valid book")]
    Entry {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("entry {index}: id must be positive")]
    ZeroId { index: usize },

    #[error("entry {index}: duplicate id {id}")]
    DuplicateId { index: usize, id: u64 },

    #[error("id {id} leaves no id for the next book")]
    IdOverflow { id: u64 },
}

impl CatalogError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        CatalogError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// In-memory book collection with write-through persistence
#[derive(Debug)]
pub struct Catalog {
    /// Data file the collection is loaded from and saved to
    path: PathBuf,

    /// Books in insertion order
    books: Vec<Book>,

    /// Id handed to the next added book
    next_id: u64,

    /// Set when the last load found a corrupted file that is still on disk
    corrupted_on_disk: bool,
}

impl Catalog {
    /// Create an empty catalog bound to `path` without touching the disk
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            books: Vec::new(),
            next_id: 1,
            corrupted_on_disk: false,
        }
    }

    /// Create a catalog and load it from `path`.
    ///
    /// A corrupted file is not fatal: the error is returned alongside an
    /// empty catalog so the caller can report it and carry on.
    pub async fn open(path: impl Into<PathBuf>) -> Result<(Self, Option<CatalogError>), CatalogError> {
        let mut catalog = Self::new(path);

        match catalog.load().await {
            Ok(_) => Ok((catalog, None)),
            Err(e @ CatalogError::Corrupted { .. }) => Ok((catalog, Some(e))),
            Err(e) => Err(e),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Load the collection from the data file.
    ///
    /// Returns the number of books loaded. A missing file yields an empty
    /// catalog. On a corrupted file the collection is left empty and the
    /// file itself is not modified.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn load(&mut self) -> Result<usize, CatalogError> {
        self.books.clear();
        self.next_id = 1;
        self.corrupted_on_disk = false;

        if !self.path.exists() {
            debug!("No data file yet, starting empty");
            return Ok(0);
        }

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| CatalogError::io(&self.path, e))?;

        match parse_books(&content) {
            Ok((books, next_id)) => {
                self.books = books;
                self.next_id = next_id;
                info!(count = self.books.len(), next_id = self.next_id, "Catalog loaded");
                Ok(self.books.len())
            }
            Err(source) => {
                warn!(reason = %source, "Data file is corrupted, starting empty");
                self.corrupted_on_disk = true;
                Err(CatalogError::Corrupted {
                    path: self.path.clone(),
                    source,
                })
            }
        }
    }

    /// Write the whole collection to the data file.
    ///
    /// The content goes to a temporary file in the same directory which is
    /// then renamed over the target. A corrupted file left by the last load
    /// is first moved to `<file>.corrupt`.
    #[instrument(skip(self), fields(path = %self.path.display(), count = self.books.len()))]
    pub async fn save(&mut self) -> Result<(), CatalogError> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };

        fs::create_dir_all(&parent)
            .await
            .map_err(|e| CatalogError::io(&parent, e))?;

        if self.corrupted_on_disk {
            let backup = corrupt_backup_path(&self.path);
            if self.path.exists() {
                fs::rename(&self.path, &backup)
                    .await
                    .map_err(|e| CatalogError::io(&backup, e))?;
                warn!(backup = %backup.display(), "Moved corrupted data file aside");
            }
            self.corrupted_on_disk = false;
        }

        let content = serialize_books(&self.books)?;
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || write_atomic(&parent, &path, &content))
            .await
            .map_err(|e| CatalogError::io(&self.path, std::io::Error::other(e)))??;

        debug!("Catalog saved");
        Ok(())
    }

    /// Add a new available book and persist the catalog
    #[instrument(skip(self, title, author))]
    pub async fn add(
        &mut self,
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
    ) -> Result<&Book, CatalogError> {
        let title = title.into();
        let author = author.into();
        require_non_empty("title", &title)?;
        require_non_empty("author", &author)?;

        let next_id = self
            .next_id
            .checked_add(1)
            .ok_or(CatalogError::IdsExhausted { next: self.next_id })?;

        let book = Book::new(self.next_id, title, author, year);
        self.books.push(book);
        self.next_id = next_id;
        self.save().await?;

        let index = self.books.len() - 1;
        let book = &self.books[index];
        info!(id = book.id(), title = book.title(), "Book added");
        Ok(book)
    }

    /// Remove a book by id.
    ///
    /// Returns `None` without writing anything if no book has that id.
    #[instrument(skip(self))]
    pub async fn remove(&mut self, id: u64) -> Result<Option<Book>, CatalogError> {
        let Some(pos) = self.position(id) else {
            debug!("Book not found");
            return Ok(None);
        };

        let removed = self.books.remove(pos);
        self.save().await?;

        info!(title = removed.title(), "Book removed");
        Ok(Some(removed))
    }

    /// Get a book by id
    pub fn find_by_id(&self, id: u64) -> Option<&Book> {
        self.books.iter().find(|b| b.id() == id)
    }

    /// Books whose title, author or year contain `keyword` (case-insensitive)
    pub fn search(&self, keyword: &str) -> Vec<&Book> {
        self.books.iter().filter(|b| b.matches(keyword)).collect()
    }

    /// Set the status of a book and persist the catalog.
    ///
    /// Returns `None` without writing anything if no book has that id.
    #[instrument(skip(self))]
    pub async fn update_status(
        &mut self,
        id: u64,
        status: BookStatus,
    ) -> Result<Option<&Book>, CatalogError> {
        let Some(pos) = self.position(id) else {
            debug!("Book not found");
            return Ok(None);
        };

        self.books[pos].set_status(status);
        self.save().await?;

        info!("Book status updated");
        Ok(Some(&self.books[pos]))
    }

    /// Table of every book, or the empty-library message
    pub fn display(&self) -> String {
        self.display_books(None)
    }

    /// Table of `books` (every book when `None`), or the empty-library message
    pub fn display_books(&self, books: Option<&[&Book]>) -> String {
        match books {
            Some(books) => display::render(books.iter().copied()),
            None => display::render(&self.books),
        }
    }

    fn position(&self, id: u64) -> Option<usize> {
        self.books.iter().position(|b| b.id() == id)
    }
}

/// Path a corrupted data file is moved to (`library.json` -> `library.json.corrupt`)
pub fn corrupt_backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".");
    name.push(CORRUPT_SUFFIX);
    path.with_file_name(name)
}

fn require_non_empty(field: &'static str, value: &str) -> Result<(), CatalogError> {
    if value.trim().is_empty() {
        return Err(CatalogError::InvalidField {
            field,
            reason: "must not be empty".to_string(),
        });
    }
    Ok(())
}

/// Parse the data file into books and the id for the next added book
fn parse_books(content: &str) -> Result<(Vec<Book>, u64), CorruptionError> {
    let entries: Vec<Map<String, Value>> = serde_json::from_str(content)?;

    let mut books: Vec<Book> = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let book =
            Book::from_mapping(entry).map_err(|source| CorruptionError::Entry { index, source })?;

        if book.id() == 0 {
            return Err(CorruptionError::ZeroId { index });
        }
        if books.iter().any(|b| b.id() == book.id()) {
            return Err(CorruptionError::DuplicateId { index, id: book.id() });
        }

        books.push(book);
    }

    let next_id = match books.iter().map(Book::id).max() {
        Some(max) => max
            .checked_add(1)
            .ok_or(CorruptionError::IdOverflow { id: max })?,
        None => 1,
    };

    Ok((books, next_id))
}

/// Pretty JSON with four-space indentation, non-ASCII left unescaped
fn serialize_books(books: &[Book]) -> Result<Vec<u8>, CatalogError> {
    let entries: Vec<Map<String, Value>> = books.iter().map(Book::to_mapping).collect();

    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    entries.serialize(&mut serializer)?;
    Ok(out)
}

fn write_atomic(dir: &Path, path: &Path, content: &[u8]) -> Result<(), CatalogError> {
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| CatalogError::io(dir, e))?;
    tmp.write_all(content).map_err(|e| CatalogError::io(tmp.path(), e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| CatalogError::io(tmp.path(), e))?;
    tmp.persist(path)
        .map_err(|e| CatalogError::io(path, e.error))?;
    Ok(())
}
