use std::fmt::Display;
use std::io::{self, Write};

use crossterm::style::Stylize;

use crate::db::MutationReport;
use crate::models::Book;

use super::helpers::{center, pad_end, FULL_WIDTH_SPACE};

/// Width of the dashed rules framing the menu.
const RULE_WIDTH: usize = 19;
/// Field the menu title and entries are centered in.
const MENU_WIDTH: usize = 16;
const MENU_TITLE: &str = "資料表 CRUD";
const MENU_ENTRIES: [&str; 5] = [
    "1. 增加記錄",
    "2. 刪除記錄",
    "3. 修改記錄",
    "4. 查詢記錄",
    "5. 資料清單",
];

/// Column headers and their widths, in characters.
const TEXT_COLUMNS: [&str; 3] = ["書名", "作者", "出版社"];
const TEXT_COLUMN_WIDTH: usize = 10;
const YEAR_HEADER: &str = "年份";
const YEAR_HEADER_WIDTH: usize = 4;
const YEAR_CELL_WIDTH: usize = 6;

pub const NO_DATA: &str = "查無資料";
pub const INVALID_CHOICE: &str = "=>無效的選擇";

/// Renders menus, book tables and operation results as plain console text.
#[derive(Debug, Clone, Copy, Default)]
pub struct Presenter {
    color: bool,
}

impl Presenter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Print the main menu after one blank line. A rule sits above and below
    /// the title and closes the list of five numbered entries. Only the title
    /// is ever colored.
    pub fn menu<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let rule = "-".repeat(RULE_WIDTH);
        let title = center(MENU_TITLE, MENU_WIDTH, ' ');
        writeln!(out)?;
        writeln!(out, "{rule}")?;
        if self.color {
            writeln!(out, "{}", title.bold().cyan())?;
        } else {
            writeln!(out, "{title}")?;
        }
        writeln!(out, "{rule}")?;
        for entry in MENU_ENTRIES {
            writeln!(out, "{}", center(entry, MENU_WIDTH, ' '))?;
        }
        writeln!(out, "{rule}")
    }

    /// Print `books` as a four-column table, or the no-data notice.
    pub fn books<W: Write>(&self, out: &mut W, books: &[Book]) -> io::Result<()> {
        if books.is_empty() {
            return writeln!(out, "{NO_DATA}");
        }
        writeln!(out, "{}", table_header())?;
        for book in books {
            writeln!(out, "{}", table_row(book))?;
        }
        Ok(())
    }

    /// The "rows changed" line shown after every add, delete and revise,
    /// including when nothing matched.
    pub fn affected<W: Write>(&self, out: &mut W, rows: usize) -> io::Result<()> {
        writeln!(out, "異動 {rows} 記錄")
    }

    /// Row count first, then the refreshed listing when there is one.
    pub fn report<W: Write>(&self, out: &mut W, report: &MutationReport) -> io::Result<()> {
        self.affected(out, report.affected)?;
        match &report.listing {
            Some(books) => self.books(out, books),
            None => Ok(()),
        }
    }

    pub fn error<W: Write>(&self, out: &mut W, err: &dyn Display) -> io::Result<()> {
        if self.color {
            writeln!(out, "{}", err.to_string().red())
        } else {
            writeln!(out, "{err}")
        }
    }
}

fn table_header() -> String {
    let mut line = String::from("|");
    for header in TEXT_COLUMNS {
        line.push_str(&center(header, TEXT_COLUMN_WIDTH, FULL_WIDTH_SPACE));
        line.push('|');
    }
    line.push_str(&center(YEAR_HEADER, YEAR_HEADER_WIDTH, FULL_WIDTH_SPACE));
    line.push('|');
    line
}

fn table_row(book: &Book) -> String {
    let mut line = String::from("|");
    for cell in [&book.title, &book.author, &book.publisher] {
        line.push_str(&pad_end(cell, TEXT_COLUMN_WIDTH, FULL_WIDTH_SPACE));
        line.push('|');
    }
    line.push_str(&pad_end(&book.year.to_string(), YEAR_CELL_WIDTH, FULL_WIDTH_SPACE));
    line.push('|');
    line
}
