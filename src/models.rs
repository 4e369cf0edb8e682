//! Domain models that mirror the SQLite schema, plus the raw form a book takes
//! while it is still operator input.

use crate::error::{Operation, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq)]
/// A login identity. Seeded once at bootstrap and only ever read afterwards.
pub struct Account {
    pub id: i64,
    pub username: String,
    /// Stored and compared as plain text.
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One row of the `books` table. Titles are not unique.
pub struct Book {
    /// Primary key from the SQLite store.
    pub id: i64,
    pub title: String,
    pub author: String,
    pub publisher: String,
    /// Publication year, always an integer in storage.
    pub year: i64,
}

/// Validated book fields ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub year: i64,
}

/// Book fields exactly as the operator typed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub year: String,
}

impl BookDraft {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        publisher: impl Into<String>,
        year: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            publisher: publisher.into(),
            year: year.into(),
        }
    }

    /// Check that every field is present and the year is an integer.
    ///
    /// Emptiness is checked on the raw text, so a field of spaces counts as
    /// filled. The year tolerates surrounding whitespace but is otherwise
    /// never coerced: `"1965.0"` or `"19x5"` are rejected.
    pub fn validate(&self, operation: Operation) -> Result<NewBook, ValidationError> {
        if self.title.is_empty()
            || self.author.is_empty()
            || self.publisher.is_empty()
            || self.year.is_empty()
        {
            return Err(ValidationError::MissingFields(operation));
        }

        let year = self
            .year
            .trim()
            .parse::<i64>()
            .map_err(|_| ValidationError::YearNotInteger(self.year.clone()))?;

        Ok(NewBook {
            title: self.title.clone(),
            author: self.author.clone(),
            publisher: self.publisher.clone(),
            year,
        })
    }
}
