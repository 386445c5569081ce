//! excel 表格读取 - 基础设施层
//!
//! 第一行为表头，其余每行按表头名映射为 `SheetRow`

use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use tracing::debug;

use crate::error::SpreadsheetError;
use crate::models::{CellValue, SheetRow};

/// 读取工作簿中第一个工作表的所有数据行
pub fn read_rows(path: &Path) -> Result<Vec<SheetRow>, SpreadsheetError> {
    let mut workbook = open_workbook_auto(path).map_err(|source| SpreadsheetError::OpenFailed {
        path: path.to_path_buf(),
        source,
    })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SpreadsheetError::NoWorksheet {
            path: path.to_path_buf(),
        })?
        .map_err(|source| SpreadsheetError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;

    let rows = rows_from_range(&range);
    debug!("读取 {}: {} 行数据", path.display(), rows.len());
    Ok(rows)
}

/// 把工作表区域转换为按表头索引的行
///
/// 行号按 excel 显示的行号计算；表头中重复的列名以最后一列为准
pub fn rows_from_range(range: &Range<Data>) -> Vec<SheetRow> {
    let first_line = range.start().map(|(row, _)| row as usize + 1).unwrap_or(1);
    let mut rows = range.rows();

    let headers: Vec<String> = match rows.next() {
        Some(header) => header.iter().map(|cell| cell_value(cell).to_string()).collect(),
        None => return Vec::new(),
    };

    rows.enumerate()
        .map(|(offset, cells)| {
            let mut row = SheetRow::new(first_line + offset + 1);
            for (header, cell) in headers.iter().zip(cells) {
                if header.trim().is_empty() {
                    continue;
                }
                row.cells.insert(header.clone(), cell_value(cell));
            }
            row
        })
        .collect()
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(text) => CellValue::Text(text.clone()),
        Data::Float(n) => CellValue::Number(*n),
        Data::Int(n) => CellValue::Number(*n as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        other => CellValue::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Data {
        Data::String(s.to_string())
    }

    #[test]
    fn test_rows_are_keyed_by_header() {
        let mut range = Range::new((0, 0), (2, 2));
        range.set_value((0, 0), text("序号"));
        range.set_value((0, 1), text("问题"));
        range.set_value((0, 2), text("答案"));
        range.set_value((1, 0), Data::Float(1.0));
        range.set_value((1, 1), text("问题一"));
        range.set_value((1, 2), text("答案一"));
        range.set_value((2, 1), text("问题二"));
        range.set_value((2, 2), text("见附件.docx"));

        let rows = rows_from_range(&range);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].line, 2);
        assert_eq!(rows[0].cells["序号"], CellValue::Number(1.0));
        assert_eq!(rows[0].cells["问题"], CellValue::Text("问题一".to_string()));
        assert_eq!(rows[1].line, 3);
        assert_eq!(rows[1].cells["序号"], CellValue::Empty);
        assert_eq!(rows[1].cells["答案"], CellValue::Text("见附件.docx".to_string()));
    }

    #[test]
    fn test_header_only_sheet() {
        let mut range = Range::new((0, 0), (0, 1));
        range.set_value((0, 0), text("问题"));
        range.set_value((0, 1), text("答案"));

        assert!(rows_from_range(&range).is_empty());
        assert!(rows_from_range(&Range::<Data>::empty()).is_empty());
    }

    #[test]
    fn test_unnamed_columns_are_ignored() {
        let mut range = Range::new((0, 0), (1, 1));
        range.set_value((0, 0), text("问题"));
        range.set_value((1, 0), text("问题一"));
        range.set_value((1, 1), text("备注"));

        let rows = rows_from_range(&range);

        assert_eq!(rows[0].cells.len(), 1);
    }
}
