//! 作業実績の集計
//!
//! 入力行を1件ずつ読み、期間・シフト・親カテゴリで絞り込んだうえで
//! 作業者ごとの合計と、作業者×作業種別ごとの合計を積み上げる。

use crate::columns::{ColumnMap, Field};
use crate::date::parse_date;
use crate::locale::{parse_number, parse_percent};
use crate::types::{cell, FilterSpec, TaskRecord, TaskType};
use serde::Serialize;
use std::collections::HashMap;

/// 合計値とパフォーマンスのサンプル
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Accumulator {
    pub quantity: f64,
    pub occupied_hours: f64,
    pub negative_minutes: f64,
    pub perf_without_rotation: Vec<f64>,
    pub perf_with_rotation: Vec<f64>,
}

impl Accumulator {
    /// レコードを加算（パフォーマンスは値があるときだけサンプルに追加）
    pub fn add(&mut self, record: &TaskRecord) {
        self.quantity += record.quantity;
        self.occupied_hours += record.occupied_hours;
        self.negative_minutes += record.negative_minutes;
        if let Some(p) = record.perf_without_rotation {
            self.perf_without_rotation.push(p);
        }
        if let Some(p) = record.perf_with_rotation {
            self.perf_with_rotation.push(p);
        }
    }

    pub fn avg_without_rotation(&self) -> Option<f64> {
        mean(&self.perf_without_rotation)
    }

    pub fn avg_with_rotation(&self) -> Option<f64> {
        mean(&self.perf_with_rotation)
    }

    /// 合計が全てゼロでサンプルも無い（＝実績なし）
    pub fn is_idle(&self) -> bool {
        self.quantity == 0.0
            && self.occupied_hours == 0.0
            && self.negative_minutes == 0.0
            && self.perf_without_rotation.is_empty()
            && self.perf_with_rotation.is_empty()
    }
}

fn mean(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        None
    } else {
        Some(samples.iter().sum::<f64>() / samples.len() as f64)
    }
}

/// 作業者1人分の集計
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WorkerStats {
    pub name: String,
    /// 全作業の合計
    pub summary: Accumulator,
    /// TaskType::ALL の順
    pub by_task: [Accumulator; TaskType::COUNT],
}

impl WorkerStats {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn task(&self, task: TaskType) -> &Accumulator {
        &self.by_task[task.index()]
    }
}

/// 集計の統計情報
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregationStats {
    /// 読み込んだ行数
    pub rows_read: usize,
    /// 集計に使った行数
    pub rows_kept: usize,
    /// 日付が解釈できずスキップ
    pub skipped_bad_date: usize,
    /// 期間外でスキップ
    pub skipped_out_of_range: usize,
    /// シフト不一致でスキップ
    pub skipped_shift: usize,
    /// 親カテゴリ "Pack" でスキップ
    pub skipped_parent_category: usize,
    /// 固定の作業種別に無い（合計にのみ反映）
    pub unlisted_task_rows: usize,
}

/// 集計結果（作業者は初出順）
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    workers: Vec<WorkerStats>,
    index: HashMap<String, usize>,
    pub stats: AggregationStats,
}

impl Aggregation {
    pub fn workers(&self) -> &[WorkerStats] {
        &self.workers
    }

    pub fn get(&self, name: &str) -> Option<&WorkerStats> {
        self.index.get(name).map(|&i| &self.workers[i])
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.workers.len()
    }

    fn worker_mut(&mut self, name: &str) -> &mut WorkerStats {
        let i = match self.index.get(name) {
            Some(&i) => i,
            None => {
                self.workers.push(WorkerStats::new(name));
                let i = self.workers.len() - 1;
                self.index.insert(name.to_string(), i);
                i
            }
        };
        &mut self.workers[i]
    }

    fn add(&mut self, record: &TaskRecord) {
        let known = record.known_task();
        let worker = self.worker_mut(&record.worker);
        worker.summary.add(record);
        if let Some(task) = known {
            worker.by_task[task.index()].add(record);
        }
        if known.is_none() {
            self.stats.unlisted_task_rows += 1;
        }
    }
}

/// 1行を作業実績に変換。日付が解釈できなければ None
///
/// 数量系はパース不能なら 0.0、パフォーマンスは None（サンプルに含めない）
pub fn parse_record(row: &[String], columns: &ColumnMap) -> Option<TaskRecord> {
    let field = |f: Field| cell(row, columns.get(f));

    let date = parse_date(field(Field::Date))?;
    Some(TaskRecord {
        worker: field(Field::Worker).to_string(),
        task_type: field(Field::TaskType).trim().to_string(),
        quantity: parse_number(field(Field::Quantity), 0.0),
        occupied_hours: parse_number(field(Field::OccupiedHours), 0.0),
        negative_minutes: parse_number(field(Field::NegativeMinutes), 0.0),
        perf_without_rotation: parse_percent(field(Field::PerfWithoutRotation), None),
        perf_with_rotation: parse_percent(field(Field::PerfWithRotation), None),
        date,
        shift: field(Field::Shift).to_string(),
    })
}

/// 行を集計する
///
/// 呼び出しごとに新しい状態から集計するため、同じ入力なら常に同じ結果になる。
pub fn aggregate(rows: &[Vec<String>], filter: &FilterSpec, columns: &ColumnMap) -> Aggregation {
    let mut aggregation = Aggregation::default();

    for row in rows {
        aggregation.stats.rows_read += 1;

        let Some(record) = parse_record(row, columns) else {
            aggregation.stats.skipped_bad_date += 1;
            continue;
        };
        if !filter.contains(&record.date) {
            aggregation.stats.skipped_out_of_range += 1;
            continue;
        }
        if !filter.matches_shift(&record.shift) {
            aggregation.stats.skipped_shift += 1;
            continue;
        }
        if record.is_parent_category() {
            aggregation.stats.skipped_parent_category += 1;
            continue;
        }

        aggregation.add(&record);
        aggregation.stats.rows_kept += 1;
    }

    tracing::debug!(
        workers = aggregation.len(),
        stats = ?aggregation.stats,
        "aggregation finished"
    );
    aggregation
}
