mod cell;

pub use cell::cell_to_string;

use crate::error::{DailyPerformanceError, Result};
use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use daily_performance_common::layout::parse_a1;
use daily_performance_common::RawTable;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// 入力ブック（xlsx/xlsm/xlsb/xls/ods）
pub struct InputWorkbook {
    sheets: Sheets<BufReader<File>>,
}

impl InputWorkbook {
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DailyPerformanceError::FileNotFound(path.display().to_string()));
        }
        let sheets = open_workbook_auto(path)
            .map_err(|e| DailyPerformanceError::WorkbookRead(format!("{}: {}", path.display(), e)))?;
        Ok(Self { sheets })
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names()
    }

    pub fn has_sheet(&self, name: &str) -> bool {
        self.sheet_names().iter().any(|n| n == name)
    }

    fn range(&mut self, sheet: &str) -> Result<Range<Data>> {
        if !self.has_sheet(sheet) {
            return Err(DailyPerformanceError::SheetNotFound(sheet.to_string()));
        }
        self.sheets
            .worksheet_range(sheet)
            .map_err(|e| DailyPerformanceError::WorkbookRead(format!("{}: {}", sheet, e)))
    }

    /// シート全体をA1起点の文字列行として読み込む
    pub fn read_values(&mut self, sheet: &str) -> Result<Vec<Vec<String>>> {
        let range = self.range(sheet)?;
        let Some((start_row, start_col)) = range.start() else {
            return Ok(Vec::new());
        };

        // 範囲がA1から始まらない場合は先頭の空行・空列を補う
        let mut values = vec![Vec::new(); start_row as usize];
        for row in range.rows() {
            let mut cells = vec![String::new(); start_col as usize];
            cells.extend(row.iter().map(cell_to_string));
            values.push(cells);
        }

        tracing::debug!(sheet, rows = values.len(), "sheet loaded");
        Ok(values)
    }

    /// シートを入力表として読み込む（1行目がヘッダー）
    pub fn read_table(&mut self, sheet: &str) -> Result<RawTable> {
        Ok(RawTable::from_values(self.read_values(sheet)?))
    }

    /// "B1" 形式の番地でセル値を取得（空セルは空文字）
    pub fn read_cell(&mut self, sheet: &str, reference: &str) -> Result<String> {
        let (row, col) = parse_a1(reference)
            .ok_or_else(|| DailyPerformanceError::InvalidCellReference(reference.to_string()))?;
        let range = self.range(sheet)?;
        Ok(range
            .get_value((row, col as u32))
            .map(cell_to_string)
            .unwrap_or_default())
    }

}
