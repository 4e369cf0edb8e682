//! Error taxonomy shared by every layer. Validation problems are recoverable
//! and shown to the operator; seed-file problems and login exhaustion end the
//! session. Storage errors are either absorbed by the repository or handed to
//! the command loop for printing, never past it.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, LibraryError>;

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("無法讀取檔案 {}：{source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("無法解析檔案 {}：{source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("登入次數超過{}次", attempts_label(.attempts))]
    AuthExhausted { attempts: u32 },

    #[error("資料庫錯誤：{0}")]
    Storage(#[from] rusqlite::Error),

    /// The input stream reached end-of-file while a prompt was waiting.
    #[error("輸入已結束")]
    InputClosed,

    #[error("主控台 I/O 錯誤：{0}")]
    Io(#[from] io::Error),
}

/// Rejected operator input. Nothing touches storage once one of these is
/// raised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("帳號或密碼不可為空")]
    EmptyCredentials,

    #[error("=>給定的條件不足，無法進行{0}作業")]
    MissingFields(Operation),

    #[error("year 必須是整數")]
    YearNotInteger(String),
}

/// Mutating repository operations, named in validation messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Delete,
    Revise,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Operation::Add => "新增",
            Operation::Delete => "刪除",
            Operation::Revise => "修改",
        };
        f.write_str(label)
    }
}

/// Small counts read better as CJK numerals in the exhaustion message.
fn attempts_label(attempts: &u32) -> String {
    const NUMERALS: [&str; 11] = [
        "零", "一", "二", "三", "四", "五", "六", "七", "八", "九", "十",
    ];
    NUMERALS
        .get(*attempts as usize)
        .map(|numeral| numeral.to_string())
        .unwrap_or_else(|| attempts.to_string())
}

impl LibraryError {
    /// True for errors that must end the session instead of re-prompting.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            LibraryError::AuthExhausted { .. }
                | LibraryError::File { .. }
                | LibraryError::Parse { .. }
                | LibraryError::InputClosed
                | LibraryError::Io(_)
        )
    }
}
