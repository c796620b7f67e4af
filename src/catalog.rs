// Catalog store: the in-memory list of books bound to its backing file.
// Every mutation is written to disk before the call returns.

use crate::book::{Book, NewBook};
use crate::config::Config;
use crate::error::Result;
use crate::storage;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Which field a search matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Title,
    Author,
}

impl SearchField {
    fn value<'a>(&self, book: &'a Book) -> &'a str {
        match self {
            SearchField::Title => &book.title,
            SearchField::Author => &book.author,
        }
    }
}

/// Read/unread summary for a non-empty catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadingStats {
    pub total: usize,
    pub read: usize,
    pub unread: usize,
    pub percent_read: f64,
}

/// The catalog store. Owns the records and the path they persist to.
#[derive(Debug)]
pub struct Library {
    path: PathBuf,
    books: Vec<Book>,
}

impl Library {
    /// Open the library described by `config`, loading whatever the backing
    /// file holds (an empty catalog if it cannot be used).
    pub fn open(config: &Config) -> Self {
        let path = config.library_path().to_path_buf();
        let books = storage::load(&path);
        Library { path, books }
    }

    /// A library with the given records that has not been saved yet.
    pub fn with_books(path: impl Into<PathBuf>, books: Vec<Book>) -> Self {
        Library {
            path: path.into(),
            books,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the whole catalog to the backing file.
    pub fn save(&self) -> Result<()> {
        storage::save(&self.path, &self.books)
    }

    /// Validate `draft`, append it and save. An invalid year leaves both the
    /// catalog and the file untouched. If the save fails the record is
    /// dropped again so memory matches disk.
    pub fn add(&mut self, draft: NewBook) -> Result<Book> {
        let book = draft.into_book()?;
        self.books.push(book.clone());
        if let Err(e) = self.save() {
            warn!(error = %e, "save after add failed, rolling back");
            self.books.pop();
            return Err(e);
        }
        Ok(book)
    }

    /// Delete every book whose title equals `title`, ignoring case, and
    /// return how many went. Nothing is written when nothing matched.
    pub fn remove(&mut self, title: &str) -> Result<usize> {
        let needle = title.to_lowercase();
        if !self.books.iter().any(|b| b.title.to_lowercase() == needle) {
            return Ok(0);
        }

        // Keep each removed book with its position so a failed save can put
        // it back exactly where it was.
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.books.len());
        for (i, book) in std::mem::take(&mut self.books).into_iter().enumerate() {
            if book.title.to_lowercase() == needle {
                removed.push((i, book));
            } else {
                kept.push(book);
            }
        }
        self.books = kept;

        if let Err(e) = self.save() {
            warn!(error = %e, "save after remove failed, rolling back");
            for (i, book) in removed {
                self.books.insert(i, book);
            }
            return Err(e);
        }
        Ok(removed.len())
    }

    /// Books whose `field` contains `keyword`, ignoring case, in catalog order.
    pub fn search(&self, field: SearchField, keyword: &str) -> Vec<&Book> {
        let needle = keyword.to_lowercase();
        self.books
            .iter()
            .filter(|b| field.value(b).to_lowercase().contains(&needle))
            .collect()
    }

    /// All books in stored order.
    pub fn list(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// `None` for an empty catalog.
    pub fn statistics(&self) -> Option<ReadingStats> {
        let total = self.books.len();
        if total == 0 {
            return None;
        }
        let read = self.books.iter().filter(|b| b.read).count();
        Some(ReadingStats {
            total,
            read,
            unread: total - read,
            percent_read: read as f64 * 100.0 / total as f64,
        })
    }
}
