//! 入力ブックからレポートを生成するまでの一連の処理

use crate::config::Config;
use crate::error::Result;
use crate::source::InputWorkbook;
use daily_performance_common::{build_report, ColumnAliases, Diagnostic, Error, FilterInput, Report};
use std::path::{Path, PathBuf};

/// コマンドラインで指定された上書き値
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub start: Option<String>,
    pub end: Option<String>,
    pub shift: Option<String>,
    pub aliases: Option<PathBuf>,
}

/// 生成結果
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// 実際に使ったフィルタ値（出力シートの1行目に書き戻す）
    pub filter: FilterInput,
    pub report: Report,
}

/// 列エイリアスを読み込む（コマンドライン指定 → 設定ファイル → 組み込みのみ）
pub fn load_aliases(config: &Config, override_path: Option<&Path>) -> Result<ColumnAliases> {
    match override_path.or(config.aliases.as_deref()) {
        Some(path) => {
            tracing::info!("column aliases: {}", path.display());
            Ok(ColumnAliases::from_file(path)?)
        }
        None => Ok(ColumnAliases::default()),
    }
}

/// フィルタ値を決定。指定が無い項目だけ報告シートから読む
pub fn resolve_filter(workbook: &mut InputWorkbook, config: &Config, options: &RunOptions) -> Result<FilterInput> {
    let mut read = |given: &Option<String>, cell: &str| -> Result<String> {
        match given {
            Some(value) => Ok(value.clone()),
            None => workbook.read_cell(&config.report_sheet, cell),
        }
    };

    Ok(FilterInput {
        start: read(&options.start, &config.start_cell)?,
        end: read(&options.end, &config.end_cell)?,
        shift: read(&options.shift, &config.shift_cell)?,
    })
}

/// 入力ブックを読み込んでレポートを生成
///
/// 必須列が無い場合もエラーにせず、メッセージとして出力できる形で返す。
pub fn build(input: &Path, config: &Config, options: &RunOptions) -> Result<RunOutcome> {
    let aliases = load_aliases(config, options.aliases.as_deref())?;
    let mut workbook = InputWorkbook::open(input)?;

    let filter = resolve_filter(&mut workbook, config, options)?;
    tracing::info!(start = %filter.start, end = %filter.end, shift = %filter.shift, "filter resolved");

    let table = workbook.read_table(&config.data_sheet)?;

    let report = match build_report(&table, &filter, &aliases) {
        Ok(report) => report,
        Err(Error::MissingColumns(fields)) => {
            tracing::warn!("required columns missing in {}: {}", config.data_sheet, fields.join(", "));
            Report::Diagnostic(Diagnostic::MissingColumns { fields })
        }
        Err(e) => return Err(e.into()),
    };

    Ok(RunOutcome { filter, report })
}
