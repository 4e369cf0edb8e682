//! Seed file readers used only while bootstrapping a fresh store.
//!
//! Accounts come from a header-first CSV table and stay as loose text
//! mappings; books come from a JSON array of objects. Neither loader enforces
//! the table constraints: a row with a missing or mistyped cell is passed
//! through and the store rejects it at insert time. Only a file that is not a
//! JSON array of objects fails to load.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use rusqlite::types::Value as SqlValue;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{LibraryError, Result};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// One CSV row keyed by header name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedRecord(BTreeMap<String, String>);

impl SeedRecord {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }
}

impl FromIterator<(String, String)> for SeedRecord {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A catalog entry as written in the seed file. Any field may be absent or
/// hold an unexpected JSON type; nothing is checked until the row is inserted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SeedBook {
    #[serde(default)]
    pub title: SeedValue,
    #[serde(default)]
    pub author: SeedValue,
    #[serde(default)]
    pub publisher: SeedValue,
    #[serde(default)]
    pub year: SeedValue,
}

/// One catalog field, kept as whatever JSON the file held.
///
/// A wrongly typed field is not a parse error. It is bound the way its column
/// expects where that makes sense, and otherwise handed to the store as is, so
/// the table constraints reject the row and bootstrap skips it like any other
/// bad row. An absent field and an explicit `null` both bind as SQL NULL.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct SeedValue(Value);

impl SeedValue {
    /// Bind for a text column. Numbers and booleans become their JSON text.
    pub fn as_text(&self) -> rusqlite::Result<SqlValue> {
        match &self.0 {
            Value::Null => Ok(SqlValue::Null),
            Value::String(text) => Ok(SqlValue::Text(text.clone())),
            Value::Number(number) => Ok(SqlValue::Text(number.to_string())),
            Value::Bool(flag) => Ok(SqlValue::Text(flag.to_string())),
            other => Err(unbindable(other)),
        }
    }

    /// Bind for an integer column. Whole numbers, including `1815.0`, and
    /// text holding an integer become integers; fractional numbers, other text
    /// and booleans pass through unchanged.
    pub fn as_integer(&self) -> rusqlite::Result<SqlValue> {
        match &self.0 {
            Value::Null => Ok(SqlValue::Null),
            Value::Number(number) => Ok(match (number.as_i64(), number.as_f64()) {
                (Some(whole), _) => SqlValue::Integer(whole),
                (None, Some(real)) if is_whole(real) => SqlValue::Integer(real as i64),
                (None, Some(real)) => SqlValue::Real(real),
                (None, None) => SqlValue::Text(number.to_string()),
            }),
            Value::String(text) => Ok(match text.trim().parse::<i64>() {
                Ok(whole) => SqlValue::Integer(whole),
                Err(_) => SqlValue::Text(text.clone()),
            }),
            Value::Bool(flag) => Ok(SqlValue::Text(flag.to_string())),
            other => Err(unbindable(other)),
        }
    }
}

fn is_whole(real: f64) -> bool {
    real.fract() == 0.0 && (i64::MIN as f64..i64::MAX as f64).contains(&real)
}

fn unbindable(value: &Value) -> rusqlite::Error {
    let kind = if value.is_array() { "array" } else { "object" };
    rusqlite::Error::ToSqlConversionFailure(format!("a JSON {kind} cannot fill a column").into())
}

fn open_seed(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| LibraryError::File {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_error(
    path: &Path,
    source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
) -> LibraryError {
    LibraryError::Parse {
        path: path.to_path_buf(),
        source: source.into(),
    }
}

/// Read a header-first CSV file into one mapping per data row.
pub fn load_accounts_table(path: &Path) -> Result<Vec<SeedRecord>> {
    let file = open_seed(path)?;
    read_accounts_table(file).map_err(|err| parse_error(path, err))
}

fn read_accounts_table<R: Read>(source: R) -> std::result::Result<Vec<SeedRecord>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|header| header.trim_start_matches(BYTE_ORDER_MARK).to_string())
        .collect();

    reader
        .records()
        .map(|record| -> std::result::Result<SeedRecord, csv::Error> {
            let record = record?;
            Ok(headers
                .iter()
                .cloned()
                .zip(record.iter().map(str::to_string))
                .collect())
        })
        .collect()
}

/// Read a JSON array of book objects.
pub fn load_books_catalog(path: &Path) -> Result<Vec<SeedBook>> {
    let file = open_seed(path)?;
    serde_json::from_reader(BufReader::new(file)).map_err(|err| parse_error(path, err))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde_json::json;
    use tempfile::NamedTempFile;

    use super::*;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn accounts_table_maps_header_to_cells() {
        let file = write_temp("username,password\nalice,secret\nbob,hunter2\n");
        let rows = load_accounts_table(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("username"), Some("alice"));
        assert_eq!(rows[1].get("password"), Some("hunter2"));
    }

    #[test]
    fn accounts_table_ignores_byte_order_mark() {
        let file = write_temp("\u{feff}username,password\nalice,secret\n");
        let rows = load_accounts_table(file.path()).unwrap();
        assert_eq!(rows[0].get("username"), Some("alice"));
    }

    #[test]
    fn short_rows_leave_cells_missing() {
        let file = write_temp("username,password\ncarol\n");
        let rows = load_accounts_table(file.path()).unwrap();
        assert_eq!(rows[0].get("username"), Some("carol"));
        assert_eq!(rows[0].get("password"), None);
    }

    #[test]
    fn missing_seed_is_a_file_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_accounts_table(&dir.path().join("user.csv")).unwrap_err();
        assert!(matches!(err, LibraryError::File { .. }));
        let err = load_books_catalog(&dir.path().join("books.json")).unwrap_err();
        assert!(matches!(err, LibraryError::File { .. }));
    }

    #[test]
    fn catalog_keeps_fields_as_written() {
        let file = write_temp(
            r#"[
                {"title": "Dune", "author": "Herbert", "publisher": "Ace", "year": 1965},
                {"title": 1984, "author": "Orwell", "publisher": "Secker", "year": "1949"},
                {"title": "Untitled"}
            ]"#,
        );
        let books = load_books_catalog(file.path()).unwrap();
        assert_eq!(books.len(), 3);
        assert_eq!(books[0].year, SeedValue(json!(1965)));
        assert_eq!(books[1].title, SeedValue(json!(1984)));
        assert_eq!(books[2].author, SeedValue::default());
    }

    #[test]
    fn text_columns_take_json_scalars_as_text() {
        assert_eq!(
            SeedValue(json!("Dune")).as_text().unwrap(),
            SqlValue::Text("Dune".into())
        );
        assert_eq!(
            SeedValue(json!(1984)).as_text().unwrap(),
            SqlValue::Text("1984".into())
        );
        assert_eq!(SeedValue::default().as_text().unwrap(), SqlValue::Null);
        assert!(SeedValue(json!(["Herbert"])).as_text().is_err());
    }

    #[test]
    fn integer_columns_keep_only_whole_numbers_as_integers() {
        for (raw, bound) in [
            (json!(1965), SqlValue::Integer(1965)),
            (json!(1815.0), SqlValue::Integer(1815)),
            (json!(" 1949 "), SqlValue::Integer(1949)),
            (json!(1815.5), SqlValue::Real(1815.5)),
            (json!("soon"), SqlValue::Text("soon".into())),
            (json!(true), SqlValue::Text("true".into())),
        ] {
            assert_eq!(SeedValue(raw.clone()).as_integer().unwrap(), bound, "{raw}");
        }
        assert!(SeedValue(json!({"year": 1901})).as_integer().is_err());
    }

    #[test]
    fn malformed_catalog_is_a_parse_error() {
        for contents in [r#"{"title": "Dune"}"#, "[1984]", "[{"] {
            let file = write_temp(contents);
            let err = load_books_catalog(file.path()).unwrap_err();
            assert!(matches!(err, LibraryError::Parse { .. }), "{contents}");
        }
    }
}
