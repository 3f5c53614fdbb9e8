//! シート上の配置とA1形式のセル番地
//!
//! Daily_Performance シートの配置:
//! - 1行目: フィルタ（A1 "Start", B1 開始日, C1 終了日, D1 "Shift", E1 シフト）
//! - 3行目〜: 表1（A列起点）と表2（表1の右に1列空けて配置）
//! - メッセージのみの場合は A3 に出力

use crate::report::{CellRange, PercentRegion, ReportTable, ReportTables, TableKind};

/// 表の起点行（0始まり → 3行目）
pub const REPORT_ORIGIN_ROW: u32 = 2;
/// 表1の起点列（A列）
pub const REPORT_ORIGIN_COL: u16 = 0;
/// 表1と表2の間の空き列数
pub const TABLE_GAP_COLS: u16 = 1;

/// フィルタ行のラベル位置
pub const START_LABEL_CELL: (u32, u16) = (0, 0);
pub const SHIFT_LABEL_CELL: (u32, u16) = (0, 3);

/// 2表の起点セル（0始まり）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub summary: (u32, u16),
    pub detailed: (u32, u16),
}

impl Placement {
    /// 表1の列数から表2の位置を決める
    pub fn for_summary_width(summary_width: usize) -> Self {
        let detailed_col = REPORT_ORIGIN_COL + summary_width as u16 + TABLE_GAP_COLS;
        Self {
            summary: (REPORT_ORIGIN_ROW, REPORT_ORIGIN_COL),
            detailed: (REPORT_ORIGIN_ROW, detailed_col),
        }
    }

    pub fn for_tables(tables: &ReportTables) -> Self {
        Self::for_summary_width(tables.summary.width())
    }

    pub fn origin(&self, table: TableKind) -> (u32, u16) {
        match table {
            TableKind::Summary => self.summary,
            TableKind::Detailed => self.detailed,
        }
    }

    /// 表がシート上で占める範囲（ヘッダー行を含む）
    pub fn extent(&self, kind: TableKind, table: &ReportTable) -> CellRange {
        let (row, col) = self.origin(kind);
        CellRange {
            first_row: row,
            first_col: col,
            last_row: row + table.height() as u32 - 1,
            last_col: col + table.width().max(1) as u16 - 1,
        }
    }

    /// 相対範囲をシート上の絶対範囲に変換
    pub fn absolute(&self, region: &PercentRegion) -> CellRange {
        let (row, col) = self.origin(region.table);
        region.range.offset(row, col)
    }
}

/// 列番号（1始まり）を列名に変換: 1 → A, 26 → Z, 27 → AA
pub fn column_letters(col: u32) -> String {
    let mut letters = Vec::new();
    let mut c = col;
    while c > 0 {
        let rem = (c - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        c = (c - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// A1形式の番地（列・行とも1始まり）
pub fn a1(col: u32, row: u32) -> String {
    format!("{}{}", column_letters(col), row)
}

/// 0始まりの範囲を "A3:F10" 形式に変換
pub fn range_a1(range: &CellRange) -> String {
    format!(
        "{}:{}",
        a1(range.first_col as u32 + 1, range.first_row + 1),
        a1(range.last_col as u32 + 1, range.last_row + 1)
    )
}

/// "B1" 形式の番地を0始まりの (行, 列) に変換
pub fn parse_a1(reference: &str) -> Option<(u32, u16)> {
    let reference = reference.trim();
    let split = reference.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = reference.split_at(split);
    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let mut col: u32 = 0;
    for c in letters.chars() {
        let value = c.to_ascii_uppercase() as u32 - 'A' as u32 + 1;
        col = col.checked_mul(26)?.checked_add(value)?;
    }
    let row: u32 = digits.parse().ok()?;
    if row == 0 || col == 0 || col > u16::MAX as u32 {
        return None;
    }
    Some((row - 1, (col - 1) as u16))
}
