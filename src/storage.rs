// Storage: read and write the backing JSON file.
//
// The canonical document is `{"books": [...]}`. A bare top-level array of
// records (the older layout) is still accepted on read; anything else
// loads as an empty catalog.

use crate::book::Book;
use crate::error::{CatalogError, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Shapes a backing file can take once parsed.
#[derive(Debug, PartialEq)]
pub enum LibraryFile {
    /// `{"books": [...]}`
    Canonical(Vec<Book>),
    /// `[...]` at the document root.
    Legacy(Vec<Book>),
    /// Valid JSON that is not a catalog.
    Unrecognized,
}

impl LibraryFile {
    /// Classify a parsed document. Records must match the `Book` shape
    /// exactly, otherwise the whole document is unrecognized.
    pub fn decode(value: Value) -> Self {
        match value {
            Value::Object(mut map) => match map.remove("books") {
                Some(books) => match serde_json::from_value(books) {
                    Ok(books) => LibraryFile::Canonical(books),
                    Err(e) => {
                        debug!(error = %e, "\"books\" field does not hold book records");
                        LibraryFile::Unrecognized
                    }
                },
                None => LibraryFile::Unrecognized,
            },
            array @ Value::Array(_) => match serde_json::from_value(array) {
                Ok(books) => LibraryFile::Legacy(books),
                Err(e) => {
                    debug!(error = %e, "top-level array does not hold book records");
                    LibraryFile::Unrecognized
                }
            },
            _ => LibraryFile::Unrecognized,
        }
    }

    pub fn into_books(self) -> Vec<Book> {
        match self {
            LibraryFile::Canonical(books) | LibraryFile::Legacy(books) => books,
            LibraryFile::Unrecognized => Vec::new(),
        }
    }
}

/// Wire form written by [`save`].
#[derive(Serialize)]
struct CatalogDocument<'a> {
    books: &'a [Book],
}

/// Load the catalog stored at `path`. A missing, unreadable or malformed
/// file yields an empty catalog.
pub fn load(path: &Path) -> Vec<Book> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "no readable library file, starting empty");
            return Vec::new();
        }
    };
    let value: Value = match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "library file is not valid JSON, starting empty");
            return Vec::new();
        }
    };
    let file = LibraryFile::decode(value);
    if matches!(file, LibraryFile::Legacy(_)) {
        debug!(path = %path.display(), "read legacy array layout; next save rewrites it");
    }
    file.into_books()
}

/// Write `books` to `path` as `{"books": [...]}` with 4-space indentation.
/// The document goes to a sibling temp file first and is renamed over the
/// target, so a reader never sees a truncated file.
pub fn save(path: &Path, books: &[Book]) -> Result<()> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    CatalogDocument { books }.serialize(&mut ser)?;
    buf.push(b'\n');

    let tmp = temp_path(path);
    if let Err(e) = std::fs::write(&tmp, &buf) {
        let _ = std::fs::remove_file(&tmp);
        return Err(CatalogError::io(&tmp, e));
    }
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(CatalogError::io(path, e));
    }
    debug!(path = %path.display(), count = books.len(), "library saved");
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::TempDir;

    fn book(title: &str, read: bool) -> Book {
        Book {
            title: title.into(),
            author: "Someone".into(),
            year: 1999,
            genre: "Fiction".into(),
            read,
        }
    }

    #[test]
    fn save_then_load_keeps_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("library.json");
        let books = vec![book("B", true), book("A", false), book("B", false)];

        save(&path, &books).unwrap();

        assert_eq!(load(&path), books);
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn save_writes_canonical_indented_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("library.json");
        save(&path, &[book("Dune", true)]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\n    \"books\": [\n        {\n"));
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            value,
            json!({"books": [{
                "title": "Dune",
                "author": "Someone",
                "year": 1999,
                "genre": "Fiction",
                "read": true
            }]})
        );
    }

    #[test]
    fn save_overwrites_previous_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("library.json");
        save(&path, &[book("A", false), book("B", false)]).unwrap();
        save(&path, &[book("C", true)]).unwrap();
        assert_eq!(load(&path), vec![book("C", true)]);
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        assert!(load(&dir.path().join("nope.json")).is_empty());
    }

    #[test]
    fn legacy_array_is_accepted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("library.json");
        let books = vec![book("Old", true), book("Older", false)];
        std::fs::write(&path, serde_json::to_string(&books).unwrap()).unwrap();

        assert_eq!(load(&path), books);
    }

    #[test]
    fn malformed_documents_load_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("library.json");
        for text in [
            "{not json",
            r#"{"shelves": []}"#,
            r#"[1, "two", null]"#,
            r#"{"books": [{"title": "No other fields"}]}"#,
            r#"{"books": 7}"#,
            "42",
            "",
        ] {
            std::fs::write(&path, text).unwrap();
            assert!(load(&path).is_empty(), "expected empty catalog for {text:?}");
        }
    }

    #[test]
    fn decode_distinguishes_shapes() {
        let record = json!({"title": "T", "author": "A", "year": 1, "genre": "G", "read": false});
        assert!(matches!(
            LibraryFile::decode(json!({"books": [record.clone()], "extra": true})),
            LibraryFile::Canonical(ref b) if b.len() == 1
        ));
        assert!(matches!(
            LibraryFile::decode(json!([record])),
            LibraryFile::Legacy(ref b) if b.len() == 1
        ));
        assert_eq!(LibraryFile::decode(json!("books")), LibraryFile::Unrecognized);
        assert_eq!(LibraryFile::decode(json!([])), LibraryFile::Legacy(Vec::new()));
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("library.json");
        let err = save(&path, &[]).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
        assert!(!temp_path(&path).exists());
        assert!(!path.exists());
    }
}
