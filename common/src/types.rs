//! 集計で扱う型定義
//!
//! - RawTable: シートから読み込んだままの表（ヘッダー + 行）
//! - FilterInput / FilterSpec: 期間・シフトのフィルタ（生の値 / 解決済み）
//! - TaskType: 詳細表に並べる作業種別（固定順）
//! - TaskRecord: 1行から導出した作業実績

use crate::date::{end_of_day, parse_date};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 親カテゴリ "Pack"。集計対象は Pack_Multi / Pack_Single のみ
pub const PARENT_PACK_CATEGORY: &str = "Pack";

/// 「全シフト」を意味するセレクタ値（trim後、大文字小文字を無視）
const SHIFT_ALL_ALIASES: [&str; 7] = ["", "all", "total", "total_daily", "total-daily", "جمع", "کل"];

/// 作業種別（詳細表の列ブロック順）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskType {
    Receive,
    Locate,
    Sort,
    #[serde(rename = "Pack_Multi")]
    PackMulti,
    #[serde(rename = "Pack_Single")]
    PackSingle,
    #[serde(rename = "Pick_Small")]
    PickSmall,
    #[serde(rename = "Presort_Small")]
    PresortSmall,
    #[serde(rename = "Stock taking")]
    StockTaking,
    #[serde(rename = "Pick_Larg")]
    PickLarg,
    #[serde(rename = "Presort_Larg")]
    PresortLarg,
}

impl TaskType {
    pub const COUNT: usize = 10;

    /// 表示順
    pub const ALL: [TaskType; Self::COUNT] = [
        TaskType::Receive,
        TaskType::Locate,
        TaskType::Sort,
        TaskType::PackMulti,
        TaskType::PackSingle,
        TaskType::PickSmall,
        TaskType::PresortSmall,
        TaskType::StockTaking,
        TaskType::PickLarg,
        TaskType::PresortLarg,
    ];

    /// シート上の表記
    pub fn label(&self) -> &'static str {
        match self {
            TaskType::Receive => "Receive",
            TaskType::Locate => "Locate",
            TaskType::Sort => "Sort",
            TaskType::PackMulti => "Pack_Multi",
            TaskType::PackSingle => "Pack_Single",
            TaskType::PickSmall => "Pick_Small",
            TaskType::PresortSmall => "Presort_Small",
            TaskType::StockTaking => "Stock taking",
            TaskType::PickLarg => "Pick_Larg",
            TaskType::PresortLarg => "Presort_Larg",
        }
    }

    /// 表記から種別を取得（完全一致）
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.label() == label)
    }

    /// 表示順でのインデックス
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// 入力表（1行目がヘッダー）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// シート全体の値から作成（先頭行をヘッダーとする）
    ///
    /// 末尾の空行（書式だけ残ったセル範囲など）は読み込まない。
    pub fn from_values(mut values: Vec<Vec<String>>) -> Self {
        while values
            .last()
            .is_some_and(|row| row.iter().all(String::is_empty))
        {
            values.pop();
        }
        if values.is_empty() {
            return Self::default();
        }
        let headers = values.remove(0);
        Self { headers, rows: values }
    }

    /// ヘッダーを含む行数
    pub fn total_rows(&self) -> usize {
        if self.headers.is_empty() && self.rows.is_empty() {
            0
        } else {
            self.rows.len() + 1
        }
    }
}

/// 行からセル値を取得（短い行の欠損セルは空文字）
pub fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("")
}

/// フィルタ入力（シートのB1/C1/E1など、未解釈の値）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterInput {
    pub start: String,
    pub end: String,
    pub shift: String,
}

impl FilterInput {
    pub fn new(start: impl Into<String>, end: impl Into<String>, shift: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            shift: shift.into(),
        }
    }
}

/// 解決済みフィルタ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    /// 開始日 00:00
    pub start: NaiveDateTime,
    /// 終了日 23:59:59.999
    pub end: NaiveDateTime,
    /// None = 全シフト
    pub shift: Option<String>,
}

impl FilterSpec {
    /// 生の値からフィルタを解決。どちらかの日付が解釈できなければ None
    pub fn resolve(input: &FilterInput) -> Option<Self> {
        let start = parse_date(&input.start)?;
        let end = end_of_day(parse_date(&input.end)?);
        if start > end {
            tracing::warn!("start date {} is after end date {}", start, end);
        }
        Some(Self {
            start,
            end,
            shift: normalize_shift_selector(&input.shift),
        })
    }

    /// 期間内か（両端を含む）
    pub fn contains(&self, date: &NaiveDateTime) -> bool {
        self.start <= *date && *date <= self.end
    }

    /// シフト条件に一致するか
    pub fn matches_shift(&self, shift_cell: &str) -> bool {
        match &self.shift {
            Some(selected) => shift_cell.trim() == selected,
            None => true,
        }
    }
}

/// シフトセレクタを正規化。「全体」を意味する値は None
pub fn normalize_shift_selector(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let lowered = trimmed.to_lowercase();
    if SHIFT_ALL_ALIASES.contains(&lowered.as_str()) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// 1行分の作業実績
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRecord {
    pub worker: String,
    pub task_type: String,
    pub quantity: f64,
    pub occupied_hours: f64,
    pub negative_minutes: f64,
    /// 比率（0.589 = 58.9%）。解釈不能なら None
    pub perf_without_rotation: Option<f64>,
    pub perf_with_rotation: Option<f64>,
    pub date: NaiveDateTime,
    pub shift: String,
}

impl TaskRecord {
    /// 親カテゴリ "Pack" そのものか
    pub fn is_parent_category(&self) -> bool {
        self.task_type == PARENT_PACK_CATEGORY
    }

    /// 固定の作業種別に該当すれば返す
    pub fn known_task(&self) -> Option<TaskType> {
        TaskType::from_label(&self.task_type)
    }
}
