//! 输入文件分类
//!
//! 只根据后缀名判断文件类型，不读取文件

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// 输入文件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// excel 文件（.xlsx / .xls）
    Spreadsheet,
    /// word 文件（.docx）
    Document,
}

impl FileKind {
    /// 按后缀名（忽略大小写）判断文件类型
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("xlsx" | "xls") => Ok(FileKind::Spreadsheet),
            Some("docx") => Ok(FileKind::Document),
            _ => Err(ConfigError::UnsupportedExtension {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// 导入模式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    /// 问题在 excel 中，答案在 word 中
    Paired {
        spreadsheet: PathBuf,
        document: PathBuf,
    },
    /// 问题和答案都在 excel 中
    SpreadsheetOnly { spreadsheet: PathBuf },
    /// 问题和答案都在 word 中（标题为问题）
    DocumentOnly { document: PathBuf },
}

impl InputMode {
    /// 根据传入的 1~2 个文件路径确定导入模式
    pub fn classify<P: AsRef<Path>>(paths: &[P]) -> Result<Self, ConfigError> {
        if paths.is_empty() {
            return Err(ConfigError::NoInput);
        }

        let mut spreadsheets = Vec::new();
        let mut documents = Vec::new();
        for path in paths {
            let path = path.as_ref();
            match FileKind::from_path(path)? {
                FileKind::Spreadsheet => spreadsheets.push(path.to_path_buf()),
                FileKind::Document => documents.push(path.to_path_buf()),
            }
        }

        let invalid = ConfigError::InvalidInputCombination {
            count: paths.len(),
            spreadsheets: spreadsheets.len(),
            documents: documents.len(),
        };
        match (spreadsheets.pop(), documents.pop(), paths.len()) {
            (Some(spreadsheet), Some(document), 2) => Ok(InputMode::Paired {
                spreadsheet,
                document,
            }),
            (Some(spreadsheet), None, 1) => Ok(InputMode::SpreadsheetOnly { spreadsheet }),
            (None, Some(document), 1) => Ok(InputMode::DocumentOnly { document }),
            _ => Err(invalid),
        }
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputMode::Paired { .. } => write!(f, "excel + word"),
            InputMode::SpreadsheetOnly { .. } => write!(f, "仅 excel"),
            InputMode::DocumentOnly { .. } => write!(f, "仅 word"),
        }
    }
}
