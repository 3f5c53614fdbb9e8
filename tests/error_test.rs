//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use daily_performance::config::Config;
use daily_performance::error::DailyPerformanceError;
use daily_performance::pipeline::{build, load_aliases, RunOptions};
use daily_performance::source::InputWorkbook;
use rust_xlsxwriter::Workbook;
use std::path::Path;
use tempfile::tempdir;

/// 存在しないファイルを開いた場合
#[test]
fn test_open_nonexistent_file() {
    let result = InputWorkbook::open(Path::new("/nonexistent/path/12345.xlsx"));
    assert!(matches!(result, Err(DailyPerformanceError::FileNotFound(_))));
}

/// ブックとして読めないファイル
#[test]
fn test_open_invalid_workbook() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("broken.xlsx");
    std::fs::write(&path, b"not a workbook").unwrap();

    let result = InputWorkbook::open(&path);
    assert!(matches!(result, Err(DailyPerformanceError::WorkbookRead(_))));
}

/// 作業実績シートが無い場合
#[test]
fn test_missing_data_sheet() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("input.xlsx");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Daily_Performance").unwrap();
    sheet.write_string(0, 1, "2024-03-01").unwrap();
    sheet.write_string(0, 2, "2024-03-01").unwrap();
    workbook.save(&path).unwrap();

    let result = build(&path, &Config::default(), &RunOptions::default());
    match result {
        Err(DailyPerformanceError::SheetNotFound(name)) => assert_eq!(name, "All_Data"),
        other => panic!("unexpected result: {:?}", other.map(|o| o.report)),
    }
}

/// 不正なセル番地
#[test]
fn test_invalid_cell_reference() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("input.xlsx");
    let mut workbook = Workbook::new();
    workbook.add_worksheet().set_name("All_Data").unwrap();
    workbook.save(&path).unwrap();

    let mut input = InputWorkbook::open(&path).unwrap();
    let result = input.read_cell("All_Data", "B");
    assert!(matches!(result, Err(DailyPerformanceError::InvalidCellReference(_))));
}

/// 未知のフィールドを含むエイリアスファイル
#[test]
fn test_alias_file_unknown_field() {
    let dir = tempdir().expect("Failed to create temp dir");
    let alias_path = dir.path().join("aliases.json");
    std::fs::write(&alias_path, r#"{"employee": ["Name"]}"#).unwrap();

    let result = load_aliases(&Config::default(), Some(&alias_path));
    assert!(matches!(result, Err(DailyPerformanceError::Core(_))));
}

/// エラーメッセージの表示
#[test]
fn test_error_display() {
    let err = DailyPerformanceError::SheetNotFound("All_Data".into());
    assert_eq!(err.to_string(), "シートが見つかりません: All_Data");

    let err = DailyPerformanceError::FileNotFound("input.xlsx".into());
    assert!(err.to_string().contains("input.xlsx"));

    let core = daily_performance_common::Error::MissingColumns(vec!["date".into(), "shift".into()]);
    let err = DailyPerformanceError::from(core);
    assert_eq!(err.to_string(), "集計エラー: Required columns not found: date, shift");
}
