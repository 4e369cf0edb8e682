use std::fs;
use std::io::Cursor;
use std::path::Path;

use bookshelf_manager::{
    ensure_store, App, AppConfig, BookRepository, BootstrapOutcome, Console, ExitStatus, Store,
};
use tempfile::TempDir;

const USERS: &str = "username,password\nalice,secret\n";
const BOOKS: &str = r#"[
    {"title": "Dune", "author": "Frank Herbert", "publisher": "Chilton", "year": 1965},
    {"title": "Emma", "author": "Jane Austen", "publisher": "Murray", "year": 1815}
]"#;

fn library() -> (TempDir, AppConfig) {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("user.csv"), USERS).unwrap();
    fs::write(dir.path().join("books.json"), BOOKS).unwrap();
    let config = AppConfig::default().rooted_at(dir.path());
    assert!(matches!(
        ensure_store(&config).unwrap(),
        BootstrapOutcome::Created(_)
    ));
    (dir, config)
}

fn run_session(config: &AppConfig, script: &[&str]) -> (ExitStatus, String) {
    let mut input = script.join("\n");
    input.push('\n');
    let console = Console::new(Cursor::new(input), Vec::new());
    let mut app = App::new(config, console);
    let status = app.run().unwrap();
    let output = String::from_utf8(app.into_console().into_output()).unwrap();
    (status, output)
}

fn repository(path: &Path) -> BookRepository {
    BookRepository::new(Store::new(path))
}

#[test]
fn full_crud_session() {
    let (_dir, config) = library();
    let (status, output) = run_session(
        &config,
        &[
            "alice",
            "secret",
            "1",
            "Neuromancer",
            "William Gibson",
            "Ace",
            "1984",
            "3",
            "Dune",
            "Dune",
            "Frank Herbert",
            "Ace",
            "1990",
            "4",
            "Austen",
            "2",
            "Emma",
            "5",
            "",
        ],
    );

    assert_eq!(status, ExitStatus::Success);
    assert_eq!(output.matches("異動 1 記錄").count(), 3);
    assert!(output.contains("Neuromancer"));

    let books = repository(&config.store_path).list().unwrap();
    let titles: Vec<&str> = books.iter().map(|book| book.title.as_str()).collect();
    assert_eq!(titles, vec!["Dune", "Neuromancer"]);
    assert_eq!(books[0].year, 1990);
    assert_eq!(books[0].publisher, "Ace");
}

#[test]
fn invalid_add_leaves_store_untouched() {
    let (_dir, config) = library();
    let (status, output) = run_session(
        &config,
        &["alice", "secret", "1", "Dune", "Herbert", "", "1965", ""],
    );

    assert_eq!(status, ExitStatus::Success);
    assert!(output.contains("=>給定的條件不足，無法進行新增作業"));
    assert_eq!(repository(&config.store_path).list().unwrap().len(), 2);
}

#[test]
fn wrong_password_three_times_ends_session() {
    let (_dir, config) = library();
    let (status, output) = run_session(
        &config,
        &["alice", "wrong", "alice", "wrong", "alice", "wrong", "1"],
    );

    assert_eq!(status, ExitStatus::Failure);
    assert!(output.contains("登入次數超過三次"));
    assert!(!output.contains("資料表 CRUD"));
}

#[test]
fn attempt_limit_follows_configuration() {
    let (_dir, config) = library();
    let config = config.with_max_login_attempts(1);
    let (status, output) = run_session(&config, &["alice", "wrong", "alice", "secret", ""]);

    assert_eq!(status, ExitStatus::Failure);
    assert!(output.contains("登入次數超過一次"));
    assert!(!output.contains("資料表 CRUD"));
}

#[test]
fn search_without_match_reports_no_data() {
    let (_dir, config) = library();
    let (_, output) = run_session(&config, &["alice", "secret", "4", "Tolkien", ""]);
    assert!(output.contains("查無資料"));
}

#[test]
fn deleting_unknown_title_reports_zero_rows() {
    let (_dir, config) = library();
    let (_, output) = run_session(&config, &["alice", "secret", "2", "Ulysses", ""]);
    assert!(output.contains("異動 0 記錄"));
    assert_eq!(repository(&config.store_path).list().unwrap().len(), 2);
}
