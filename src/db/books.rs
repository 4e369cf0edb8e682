use rusqlite::{params, Connection, Row};
use tracing::error;

use crate::error::{LibraryError, Operation, Result, ValidationError};
use crate::models::{Book, BookDraft, NewBook};
use crate::seed::SeedBook;

use super::connection::Store;

const BOOK_COLUMNS: &str = "id, title, author, publisher, year";

fn book_from_row(row: &Row<'_>) -> rusqlite::Result<Book> {
    Ok(Book {
        id: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        publisher: row.get(3)?,
        year: row.get(4)?,
    })
}

/// Every book in insertion order.
pub fn fetch_books(conn: &Connection) -> rusqlite::Result<Vec<Book>> {
    let mut stmt = conn.prepare(&format!("SELECT {BOOK_COLUMNS} FROM books ORDER BY id"))?;
    let books = stmt
        .query_map([], book_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(books)
}

/// Books whose title or author contains `keyword`. The test is a plain
/// case-sensitive substring check, so `%` and `_` carry no wildcard meaning.
pub fn search_books(conn: &Connection, keyword: &str) -> rusqlite::Result<Vec<Book>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {BOOK_COLUMNS} FROM books
         WHERE instr(title, ?1) > 0 OR instr(author, ?1) > 0
         ORDER BY id"
    ))?;
    let books = stmt
        .query_map([keyword], book_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(books)
}

/// Insert one validated book and return the number of rows written.
pub fn insert_book(conn: &Connection, book: &NewBook) -> rusqlite::Result<usize> {
    conn.execute(
        "INSERT INTO books (title, author, publisher, year) VALUES (?1, ?2, ?3, ?4)",
        params![book.title, book.author, book.publisher, book.year],
    )
}

/// Seed rows go in as given; the table constraints decide what is kept. A
/// field that cannot be bound at all fails the row the same way.
pub fn insert_seed_book(conn: &Connection, book: &SeedBook) -> rusqlite::Result<usize> {
    conn.execute(
        "INSERT INTO books (title, author, publisher, year) VALUES (?1, ?2, ?3, ?4)",
        params![
            book.title.as_text()?,
            book.author.as_text()?,
            book.publisher.as_text()?,
            book.year.as_integer()?,
        ],
    )
}

/// Remove every row whose title equals `title`.
pub fn delete_books_by_title(conn: &Connection, title: &str) -> rusqlite::Result<usize> {
    conn.execute("DELETE FROM books WHERE title = ?1", params![title])
}

/// Overwrite every row whose title equals `title`.
pub fn update_books_by_title(
    conn: &Connection,
    title: &str,
    book: &NewBook,
) -> rusqlite::Result<usize> {
    conn.execute(
        "UPDATE books SET title = ?1, author = ?2, publisher = ?3, year = ?4 WHERE title = ?5",
        params![book.title, book.author, book.publisher, book.year, title],
    )
}

/// Result of a mutating repository call: the affected-row count and, when it
/// could be read, the full listing afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationReport {
    pub affected: usize,
    pub listing: Option<Vec<Book>>,
}

/// Validated CRUD over the `books` table.
///
/// Operations that match "by title" are bulk operations: every row with that
/// exact title is deleted or revised, not just the first. Nothing in here
/// writes to the console; callers decide how to present the results.
#[derive(Debug, Clone)]
pub struct BookRepository {
    store: Store,
}

impl BookRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Insert one book, then list the table.
    pub fn add(&self, draft: &BookDraft) -> Result<MutationReport> {
        let book = draft.validate(Operation::Add)?;
        let affected = {
            let conn = self.store.connect()?;
            insert_book(&conn, &book)?
        };
        Ok(self.report(affected))
    }

    /// Delete every book titled exactly `title`. Storage failures are logged
    /// and reported as zero affected rows with no listing.
    pub fn delete(&self, title: &str) -> Result<MutationReport> {
        if title.is_empty() {
            return Err(ValidationError::MissingFields(Operation::Delete).into());
        }

        let deleted = self
            .store
            .connect()
            .and_then(|conn| delete_books_by_title(&conn, title).map_err(LibraryError::from));

        match deleted {
            Ok(affected) => Ok(self.report(affected)),
            Err(err) => {
                error!(error = %err, "delete failed");
                Ok(MutationReport {
                    affected: 0,
                    listing: None,
                })
            }
        }
    }

    /// Rewrite every book titled exactly `title` with the draft's fields.
    pub fn revise(&self, title: &str, draft: &BookDraft) -> Result<MutationReport> {
        if title.is_empty() {
            return Err(ValidationError::MissingFields(Operation::Revise).into());
        }
        let book = draft.validate(Operation::Revise)?;

        let affected = {
            let conn = self.store.connect()?;
            update_books_by_title(&conn, title, &book)?
        };
        Ok(self.report(affected))
    }

    /// Title-or-author substring search. A storage failure is logged and
    /// yields no rows.
    pub fn search(&self, keyword: &str) -> Vec<Book> {
        let found = self
            .store
            .connect()
            .and_then(|conn| search_books(&conn, keyword).map_err(LibraryError::from));

        found.unwrap_or_else(|err| {
            error!(error = %err, "search failed");
            Vec::new()
        })
    }

    pub fn list(&self) -> Result<Vec<Book>> {
        let conn = self.store.connect()?;
        Ok(fetch_books(&conn)?)
    }

    fn report(&self, affected: usize) -> MutationReport {
        let listing = match self.list() {
            Ok(books) => Some(books),
            Err(err) => {
                error!(error = %err, "listing after mutation failed");
                None
            }
        };
        MutationReport { affected, listing }
    }
}
