//! 列エイリアス解決モジュール
//!
//! 入力シートのヘッダー表記ゆれ（full_name / Full_Name / FULL_NAME 等）を吸収し、
//! 論理フィールドを列番号に対応付ける。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// 集計に必要な論理フィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Worker,
    TaskType,
    Quantity,
    OccupiedHours,
    NegativeMinutes,
    PerfWithoutRotation,
    PerfWithRotation,
    Date,
    Shift,
}

impl Field {
    pub const COUNT: usize = 9;

    pub const ALL: [Field; Self::COUNT] = [
        Field::Worker,
        Field::TaskType,
        Field::Quantity,
        Field::OccupiedHours,
        Field::NegativeMinutes,
        Field::PerfWithoutRotation,
        Field::PerfWithRotation,
        Field::Date,
        Field::Shift,
    ];

    /// エイリアスJSONのキー名
    pub fn key(&self) -> &'static str {
        match self {
            Field::Worker => "worker",
            Field::TaskType => "task_type",
            Field::Quantity => "quantity",
            Field::OccupiedHours => "occupied_hours",
            Field::NegativeMinutes => "negative_minutes",
            Field::PerfWithoutRotation => "perf_without_rotation",
            Field::PerfWithRotation => "perf_with_rotation",
            Field::Date => "date",
            Field::Shift => "shift",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.key() == key)
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.key())
    }
}

/// 組み込みのエイリアス定義（先頭が優先）
pub const DEFAULT_ALIASES: [(Field, &[&str]); Field::COUNT] = [
    (Field::Worker, &["full_name", "Full_Name", "FULL_NAME"]),
    (Field::TaskType, &["task_type", "Task_Type", "TASK_TYPE"]),
    (Field::Quantity, &["quantity", "Quantity", "QUANTITY"]),
    (Field::OccupiedHours, &["occupied_hours", "Occupied_Hours", "OCCUPIED_HOURS"]),
    (Field::NegativeMinutes, &["Negative_Minutes", "negative_minutes", "NEGATIVE_MINUTES"]),
    (Field::PerfWithoutRotation, &["performance_without_rotation"]),
    (Field::PerfWithRotation, &["performance_with_rotation"]),
    (Field::Date, &["date", "Date", "DATE"]),
    (Field::Shift, &["Shift", "shift", "SHIFT"]),
];

/// ヘッダーからエイリアスに一致する列を探す（大文字小文字を区別、先に一致したエイリアスが優先）
pub fn resolve_column<S: AsRef<str>>(headers: &[String], aliases: &[S]) -> Option<usize> {
    aliases
        .iter()
        .find_map(|alias| headers.iter().position(|h| h == alias.as_ref()))
}

/// フィールドごとのエイリアス一覧
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnAliases {
    entries: Vec<Vec<String>>,
}

impl Default for ColumnAliases {
    fn default() -> Self {
        let entries = DEFAULT_ALIASES
            .iter()
            .map(|(_, names)| names.iter().map(|n| n.to_string()).collect())
            .collect();
        Self { entries }
    }
}

impl ColumnAliases {
    /// JSON文字列で追加エイリアスを読み込み（組み込み定義の後ろに追加）
    ///
    /// ```json
    /// { "worker": ["Name"], "date": ["Day"] }
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let mut aliases = Self::default();
        aliases.merge_json(json)?;
        Ok(aliases)
    }

    /// JSONファイルから読み込み
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn aliases(&self, field: Field) -> &[String] {
        &self.entries[field.index()]
    }

    /// エイリアスを追加（重複は無視）
    pub fn push(&mut self, field: Field, alias: impl Into<String>) {
        let alias = alias.into();
        let names = &mut self.entries[field.index()];
        if !names.contains(&alias) {
            names.push(alias);
        }
    }

    /// JSONの追加定義をマージ。未知のキーは設定エラー
    pub fn merge_json(&mut self, json: &str) -> Result<()> {
        let extra: HashMap<String, Vec<String>> = serde_json::from_str(json)?;
        for (key, names) in extra {
            let field = Field::from_key(&key)
                .ok_or_else(|| Error::Config(format!("unknown column field '{}'", key)))?;
            for name in names {
                self.push(field, name);
            }
        }
        Ok(())
    }

    /// フィールドごとの解決結果（列が無ければ None）
    pub fn resolve_each(&self, headers: &[String]) -> Vec<(Field, Option<usize>)> {
        Field::ALL
            .iter()
            .map(|&field| (field, resolve_column(headers, self.aliases(field))))
            .collect()
    }

    /// 全必須列を解決。欠けている列があれば MissingColumns
    pub fn resolve(&self, headers: &[String]) -> Result<ColumnMap> {
        let mut indices = [0usize; Field::COUNT];
        let mut missing = Vec::new();

        for (field, index) in self.resolve_each(headers) {
            match index {
                Some(i) => indices[field.index()] = i,
                None => missing.push(field.key().to_string()),
            }
        }

        if !missing.is_empty() {
            return Err(Error::MissingColumns(missing));
        }
        Ok(ColumnMap { indices })
    }
}

/// 論理フィールド → 列番号
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    indices: [usize; Field::COUNT],
}

impl ColumnMap {
    pub fn get(&self, field: Field) -> usize {
        self.indices[field.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn full_headers() -> Vec<String> {
        headers(&[
            "date", "Shift", "full_name", "task_type", "quantity", "occupied_hours",
            "Negative_Minutes", "performance_without_rotation", "performance_with_rotation",
        ])
    }

    #[test]
    fn test_resolve_column_first_alias_wins() {
        let h = headers(&["FULL_NAME", "full_name"]);
        assert_eq!(resolve_column(&h, &["full_name", "FULL_NAME"]), Some(1));
        assert_eq!(resolve_column(&h, &["FULL_NAME", "full_name"]), Some(0));
    }

    #[test]
    fn test_resolve_column_case_sensitive() {
        let h = headers(&["Full_name"]);
        assert_eq!(resolve_column(&h, &["full_name", "Full_Name", "FULL_NAME"]), None);
    }

    #[test]
    fn test_resolve_all_columns() {
        let map = ColumnAliases::default().resolve(&full_headers()).unwrap();
        assert_eq!(map.get(Field::Date), 0);
        assert_eq!(map.get(Field::Shift), 1);
        assert_eq!(map.get(Field::Worker), 2);
        assert_eq!(map.get(Field::PerfWithRotation), 8);
    }

    #[test]
    fn test_resolve_missing_columns() {
        let h = headers(&["full_name", "task_type", "quantity"]);
        let err = ColumnAliases::default().resolve(&h).unwrap_err();
        match err {
            Error::MissingColumns(fields) => {
                assert_eq!(fields.len(), 6);
                assert!(fields.contains(&"date".to_string()));
                assert!(!fields.contains(&"worker".to_string()));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_custom_aliases_from_json() {
        let aliases = ColumnAliases::from_json(r#"{"worker": ["Name", "full_name"], "date": ["Day"]}"#).unwrap();
        assert_eq!(aliases.aliases(Field::Worker), &["full_name", "Full_Name", "FULL_NAME", "Name"]);
        assert_eq!(aliases.aliases(Field::Date).last().map(String::as_str), Some("Day"));

        let mut h = full_headers();
        h[2] = "Name".to_string();
        let map = aliases.resolve(&h).unwrap();
        assert_eq!(map.get(Field::Worker), 2);
    }

    #[test]
    fn test_custom_aliases_unknown_field() {
        let err = ColumnAliases::from_json(r#"{"employee": ["Name"]}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_field_key_round_trip() {
        for field in Field::ALL {
            assert_eq!(Field::from_key(field.key()), Some(field));
        }
    }
}
