use rusqlite::{params, Connection, OptionalExtension};

use crate::models::Account;

/// Insert one account row. Missing values bind as NULL and are rejected by
/// the table constraints.
pub fn insert_account(
    conn: &Connection,
    username: Option<&str>,
    password: Option<&str>,
) -> rusqlite::Result<usize> {
    conn.execute(
        "INSERT INTO accounts (username, password) VALUES (?1, ?2)",
        params![username, password],
    )
}

/// Look up the account matching both fields exactly (case-sensitive).
pub fn find_account(
    conn: &Connection,
    username: &str,
    password: &str,
) -> rusqlite::Result<Option<Account>> {
    conn.query_row(
        "SELECT id, username, password FROM accounts
         WHERE username = ?1 AND password = ?2
         ORDER BY id
         LIMIT 1",
        params![username, password],
        |row| {
            Ok(Account {
                id: row.get(0)?,
                username: row.get(1)?,
                password: row.get(2)?,
            })
        },
    )
    .optional()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_schema;

    fn seeded() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_schema(&conn).unwrap();
        insert_account(&conn, Some("alice"), Some("secret")).unwrap();
        conn
    }

    #[test]
    fn match_requires_both_fields() {
        let conn = seeded();
        let account = find_account(&conn, "alice", "secret").unwrap().unwrap();
        assert_eq!(account.username, "alice");
        assert!(find_account(&conn, "alice", "wrong").unwrap().is_none());
        assert!(find_account(&conn, "bob", "secret").unwrap().is_none());
    }

    #[test]
    fn match_is_case_sensitive() {
        let conn = seeded();
        assert!(find_account(&conn, "Alice", "secret").unwrap().is_none());
        assert!(find_account(&conn, "alice", "SECRET").unwrap().is_none());
    }

    #[test]
    fn missing_password_is_rejected() {
        let conn = seeded();
        assert!(insert_account(&conn, Some("carol"), None).is_err());
        let total: i64 = conn
            .query_row("SELECT COUNT(*) FROM accounts", [], |row| row.get(0))
            .unwrap();
        assert_eq!(total, 1);
    }
}
