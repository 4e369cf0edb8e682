//! Persistence module split across logical submodules.

mod accounts;
mod books;
mod connection;

pub use accounts::{find_account, insert_account};
pub use books::{
    delete_books_by_title, fetch_books, insert_book, search_books, update_books_by_title,
    BookRepository, MutationReport,
};
pub use connection::{
    create_schema, ensure_store, seed_store, BootstrapOutcome, BootstrapReport, SeedTally, Store,
};
