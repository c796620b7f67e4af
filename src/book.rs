// Book records: the typed shape stored in the backing file, plus the
// unvalidated draft the UI collects before a record is created.

use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One catalog entry. Field names mirror the JSON keys in the backing file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub year: i64,
    pub genre: String,
    pub read: bool,
}

/// Fields as typed by the user. `year` is still raw text; it becomes a
/// `Book` only after [`NewBook::into_book`] parses it.
#[derive(Debug, Clone, Default)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub year: String,
    pub genre: String,
    pub read: bool,
}

impl NewBook {
    pub fn into_book(self) -> Result<Book> {
        let year = parse_year(&self.year)?;
        Ok(Book {
            title: self.title,
            author: self.author,
            year,
            genre: self.genre,
            read: self.read,
        })
    }
}

/// Parse a year typed by the user. Surrounding whitespace is ignored and
/// a leading sign is accepted.
pub fn parse_year(input: &str) -> Result<i64> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|_| CatalogError::InvalidYear {
            input: input.to_string(),
        })
}

/// Interpret a yes/no answer. Only "yes" (any case) counts as read.
pub fn parse_read_answer(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case("yes")
}

impl Book {
    pub fn status_label(&self) -> &'static str {
        if self.read {
            "Read"
        } else {
            "Unread"
        }
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} by {} ({}) - {} - {}",
            self.title,
            self.author,
            self.year,
            self.genre,
            self.status_label()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn year_accepts_padded_and_signed_numbers() {
        assert_eq!(parse_year(" 1965 ").unwrap(), 1965);
        assert_eq!(parse_year("-450").unwrap(), -450);
        assert_eq!(parse_year("+2001").unwrap(), 2001);
    }

    #[test]
    fn year_rejects_text() {
        let err = parse_year("not-a-year").unwrap_err();
        assert!(matches!(err, CatalogError::InvalidYear { ref input } if input == "not-a-year"));
        assert!(parse_year("").is_err());
        assert!(parse_year("19.5").is_err());
    }

    #[test]
    fn only_yes_means_read() {
        assert!(parse_read_answer("yes"));
        assert!(parse_read_answer(" YES "));
        assert!(!parse_read_answer("y"));
        assert!(!parse_read_answer("no"));
        assert!(!parse_read_answer(""));
    }

    #[test]
    fn draft_becomes_book() {
        let draft = NewBook {
            title: "Dune".into(),
            author: "Frank Herbert".into(),
            year: "1965".into(),
            genre: "Science Fiction".into(),
            read: true,
        };
        let book = draft.into_book().unwrap();
        assert_eq!(book.year, 1965);
        assert_eq!(
            book.to_string(),
            "Dune by Frank Herbert (1965) - Science Fiction - Read"
        );
    }
}
