//! レポート表の生成
//!
//! 集計結果から2つの表を作る:
//! - 表1（サマリー）: 作業者ごとの合計。回転ありパフォーマンス平均の降順
//! - 表2（詳細）: 表1と同じ並びで、作業種別ごとに5列のブロック
//!
//! 入力が空・日付不正・フィルタ結果なしの場合は表の代わりに [`Diagnostic`] を返す。

use crate::aggregator::{aggregate, Accumulator, Aggregation, AggregationStats};
use crate::columns::ColumnAliases;
use crate::error::Result;
use crate::types::{FilterInput, FilterSpec, RawTable, TaskType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 表1のヘッダー
pub const SUMMARY_HEADER: [&str; 6] = [
    "full_name",
    "quantity",
    "occupied_hours",
    "Negative_Minutes",
    "performance_without_rotation",
    "performance_with_rotation",
];

/// 作業種別ブロックの列サフィックス
const BLOCK_SUFFIXES: [&str; 5] = [
    "quantity",
    "occupied_hours",
    "Negative_Minutes",
    "performance_without_rotation",
    "performance_with_rotation",
];

/// 作業種別1つあたりの列数
pub const BLOCK_WIDTH: usize = BLOCK_SUFFIXES.len();

/// 出力セル
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    Empty,
}

impl Cell {
    /// 合計値用: ゼロは空欄で表示
    pub fn total(value: f64) -> Self {
        if value == 0.0 {
            Cell::Empty
        } else {
            Cell::Number(value)
        }
    }

    /// 平均値用: サンプルが無ければ空欄
    pub fn average(value: Option<f64>) -> Self {
        value.map_or(Cell::Empty, Cell::Number)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// ヘッダー付きの出力表
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl ReportTable {
    /// 列数
    pub fn width(&self) -> usize {
        self.header.len()
    }

    /// ヘッダーを含む行数
    pub fn height(&self) -> usize {
        self.rows.len() + 1
    }
}

/// 表の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Summary,
    Detailed,
}

/// 矩形のセル範囲（0始まり、両端を含む）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRange {
    pub first_row: u32,
    pub first_col: u16,
    pub last_row: u32,
    pub last_col: u16,
}

impl CellRange {
    pub fn contains(&self, row: u32, col: u16) -> bool {
        (self.first_row..=self.last_row).contains(&row) && (self.first_col..=self.last_col).contains(&col)
    }

    /// 起点セル分だけずらす
    pub fn offset(&self, row: u32, col: u16) -> Self {
        Self {
            first_row: self.first_row + row,
            first_col: self.first_col + col,
            last_row: self.last_row + row,
            last_col: self.last_col + col,
        }
    }
}

/// パーセント表示が必要な範囲（表の左上＝ヘッダー先頭セルからの相対位置）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PercentRegion {
    pub table: TableKind,
    pub range: CellRange,
}

/// 表の代わりに出力するメッセージ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// 開始日・終了日が解釈できない
    InvalidDates,
    /// 入力表がヘッダーのみ、または空
    EmptyInput,
    /// 必須列が見つからない
    MissingColumns { fields: Vec<String> },
    /// フィルタ結果が0件
    EmptyResult { start: String, end: String, shift: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::InvalidDates => write!(f, "Start/End dates (B1/C1) are not valid."),
            Diagnostic::EmptyInput => write!(f, "All_Data is empty."),
            Diagnostic::MissingColumns { fields } => {
                write!(f, "Required columns not found in All_Data: {}", fields.join(", "))
            }
            Diagnostic::EmptyResult { start, end, shift } => {
                let shift = if shift.trim().is_empty() { "(empty)" } else { shift.trim() };
                write!(f, "Filter result is empty. Start={}  End={}  Shift={}", start, end, shift)
            }
        }
    }
}

/// 集計済みの2表
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportTables {
    pub summary: ReportTable,
    pub detailed: ReportTable,
    pub percent_regions: Vec<PercentRegion>,
    pub stats: AggregationStats,
}

/// レポート生成結果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Report {
    Tables(ReportTables),
    Diagnostic(Diagnostic),
}

impl Report {
    pub fn tables(&self) -> Option<&ReportTables> {
        match self {
            Report::Tables(t) => Some(t),
            Report::Diagnostic(_) => None,
        }
    }

    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            Report::Tables(_) => None,
            Report::Diagnostic(d) => Some(d),
        }
    }
}

/// 表2のヘッダー
pub fn detailed_header() -> Vec<String> {
    let mut header = vec![SUMMARY_HEADER[0].to_string()];
    for task in TaskType::ALL {
        header.extend(BLOCK_SUFFIXES.iter().map(|suffix| format!("{}_{}", task.label(), suffix)));
    }
    header
}

fn summary_row(name: &str, acc: &Accumulator) -> Vec<Cell> {
    vec![
        Cell::Text(name.to_string()),
        Cell::total(acc.quantity),
        Cell::total(acc.occupied_hours),
        Cell::total(acc.negative_minutes),
        Cell::average(acc.avg_without_rotation()),
        Cell::average(acc.avg_with_rotation()),
    ]
}

fn task_block(acc: &Accumulator) -> [Cell; BLOCK_WIDTH] {
    if acc.is_idle() {
        return [Cell::Empty, Cell::Empty, Cell::Empty, Cell::Empty, Cell::Empty];
    }
    [
        Cell::total(acc.quantity),
        Cell::total(acc.occupied_hours),
        Cell::total(acc.negative_minutes),
        Cell::average(acc.avg_without_rotation()),
        Cell::average(acc.avg_with_rotation()),
    ]
}

/// 並び替えキー: 平均が無い行は -1 扱いで末尾へ
fn sort_key(acc: &Accumulator) -> f64 {
    acc.avg_with_rotation().unwrap_or(-1.0)
}

fn percent_regions(data_rows: usize) -> Vec<PercentRegion> {
    if data_rows == 0 {
        return Vec::new();
    }
    let last_row = data_rows as u32;
    let mut regions = vec![PercentRegion {
        table: TableKind::Summary,
        range: CellRange { first_row: 1, first_col: 4, last_row, last_col: 5 },
    }];
    for b in 0..TaskType::COUNT {
        let block_start = (1 + b * BLOCK_WIDTH) as u16;
        regions.push(PercentRegion {
            table: TableKind::Detailed,
            range: CellRange {
                first_row: 1,
                first_col: block_start + 3,
                last_row,
                last_col: block_start + 4,
            },
        });
    }
    regions
}

/// 集計結果から2表を作成
pub fn build_tables(aggregation: &Aggregation) -> ReportTables {
    let mut workers: Vec<_> = aggregation.workers().iter().collect();
    // 安定ソート: 同値は初出順のまま
    workers.sort_by(|a, b| sort_key(&b.summary).total_cmp(&sort_key(&a.summary)));

    let summary_rows = workers.iter().map(|w| summary_row(&w.name, &w.summary)).collect();

    let detailed_rows = workers
        .iter()
        .map(|w| {
            let mut row = vec![Cell::Text(w.name.clone())];
            for task in TaskType::ALL {
                row.extend(task_block(w.task(task)));
            }
            row
        })
        .collect();

    ReportTables {
        summary: ReportTable {
            header: SUMMARY_HEADER.iter().map(|s| s.to_string()).collect(),
            rows: summary_rows,
        },
        detailed: ReportTable {
            header: detailed_header(),
            rows: detailed_rows,
        },
        percent_regions: percent_regions(workers.len()),
        stats: aggregation.stats.clone(),
    }
}

/// 入力表とフィルタからレポートを生成
///
/// 判定順: 日付 → 入力行数 → 必須列。必須列が無い場合のみ `Err(MissingColumns)`。
///
/// # Arguments
/// * `table` - 入力表（ヘッダー + 行）
/// * `filter` - 開始日・終了日・シフトの生の値
/// * `aliases` - 列エイリアス
pub fn build_report(table: &RawTable, filter: &FilterInput, aliases: &ColumnAliases) -> Result<Report> {
    let Some(spec) = FilterSpec::resolve(filter) else {
        tracing::warn!(start = %filter.start, end = %filter.end, "boundary dates are not valid");
        return Ok(Report::Diagnostic(Diagnostic::InvalidDates));
    };

    if table.total_rows() < 2 {
        return Ok(Report::Diagnostic(Diagnostic::EmptyInput));
    }

    let columns = aliases.resolve(&table.headers)?;
    let aggregation = aggregate(&table.rows, &spec, &columns);

    if aggregation.is_empty() {
        return Ok(Report::Diagnostic(Diagnostic::EmptyResult {
            start: filter.start.clone(),
            end: filter.end.clone(),
            shift: filter.shift.clone(),
        }));
    }

    Ok(Report::Tables(build_tables(&aggregation)))
}
