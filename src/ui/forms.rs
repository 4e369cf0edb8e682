use std::io::{BufRead, Write};

use crate::error::Result;
use crate::models::BookDraft;

use super::console::Console;

pub(crate) const MENU_PROMPT: &str = "選擇要執行的功能(Enter離開)：";
pub(crate) const DELETE_PROMPT: &str = "請問要刪除哪一本書？：";
pub(crate) const REVISE_TARGET_PROMPT: &str = "請問要修改哪一本書的標題？：";
pub(crate) const SEARCH_PROMPT: &str = "請輸入想查詢的關鍵字：";

/// Prompt labels for the four book fields, asked in this order.
pub(crate) struct BookPrompts {
    title: &'static str,
    author: &'static str,
    publisher: &'static str,
    year: &'static str,
}

pub(crate) const ADD_PROMPTS: BookPrompts = BookPrompts {
    title: "請輸入要新增的標題：",
    author: "請輸入要新增的作者：",
    publisher: "請輸入要新增的出版社：",
    year: "請輸入要新增的年份：",
};

pub(crate) const REVISE_PROMPTS: BookPrompts = BookPrompts {
    title: "請輸入要更改的標題：",
    author: "請輸入要更改的作者：",
    publisher: "請輸入要更改的出版社：",
    year: "請輸入要更改的年份：",
};

impl BookPrompts {
    /// Ask for every field. Validation is left to the repository.
    pub(crate) fn read<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
    ) -> Result<BookDraft> {
        Ok(BookDraft {
            title: console.prompt(self.title)?,
            author: console.prompt(self.author)?,
            publisher: console.prompt(self.publisher)?,
            year: console.prompt(self.year)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn fields_are_read_in_prompt_order() {
        let mut console = Console::new(Cursor::new("Dune\nHerbert\nAce\n1965\n"), Vec::new());
        let draft = ADD_PROMPTS.read(&mut console).unwrap();
        assert_eq!(draft, BookDraft::new("Dune", "Herbert", "Ace", "1965"));

        let shown = String::from_utf8(console.into_output()).unwrap();
        assert!(shown.starts_with(ADD_PROMPTS.title));
        assert!(shown.ends_with(ADD_PROMPTS.year));
    }

    #[test]
    fn empty_answers_are_kept_for_validation() {
        let mut console = Console::new(Cursor::new("\n\n\n\n"), Vec::new());
        let draft = REVISE_PROMPTS.read(&mut console).unwrap();
        assert_eq!(draft, BookDraft::default());
    }
}
