use std::fmt;

use indexmap::IndexMap;

use crate::config::Config;
use crate::error::RowError;

/// excel 单元格的值
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }

    /// 只有数值单元格才算数字，文本 "4" 不算
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(text) => write!(f, "{}", text),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// excel 中表头以下的一行，按表头名索引
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetRow {
    /// excel 中的行号（从1开始，表头为第1行）
    pub line: usize,
    pub cells: IndexMap<String, CellValue>,
}

impl SheetRow {
    pub fn new(line: usize) -> Self {
        Self {
            line,
            cells: IndexMap::new(),
        }
    }

    pub fn with_cell(mut self, header: impl Into<String>, value: CellValue) -> Self {
        self.cells.insert(header.into(), value);
        self
    }

    /// 按表头别名查找单元格（忽略首尾空白和 ASCII 大小写）
    pub fn get(&self, aliases: &[String]) -> Option<&CellValue> {
        self.cells.iter().find_map(|(header, value)| {
            let header = header.trim();
            aliases
                .iter()
                .any(|alias| header.eq_ignore_ascii_case(alias.trim()))
                .then_some(value)
        })
    }

    pub fn is_blank(&self) -> bool {
        self.cells.values().all(CellValue::is_empty)
    }
}

/// 经过校验的问答行
#[derive(Debug, Clone, PartialEq)]
pub struct QaRow {
    pub line: usize,
    pub question: String,
    pub answer: String,
    pub serial_number: Option<f64>,
}

impl QaRow {
    /// 在表格行边界上校验字段：问题、答案必填，序号可选
    pub fn from_sheet_row(row: &SheetRow, config: &Config) -> Result<Self, RowError> {
        let question = row
            .get(&config.question_headers)
            .ok_or(RowError::MissingField {
                row: row.line,
                field: "question",
            })?;
        let answer = row
            .get(&config.answer_headers)
            .ok_or(RowError::MissingField {
                row: row.line,
                field: "answer",
            })?;

        if question.is_empty() {
            return Err(RowError::EmptyQuestion { row: row.line });
        }

        Ok(Self {
            line: row.line,
            question: question.to_string(),
            answer: answer.to_string(),
            serial_number: row.get(&config.serial_headers).and_then(CellValue::as_number),
        })
    }
}
