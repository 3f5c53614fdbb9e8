//! Excel生成（CLI版）
//!
//! 共通ライブラリの excel_core でバッファを作り、ファイルに書き出す

use crate::config::Config;
use crate::error::{DailyPerformanceError, Result};
use crate::pipeline::RunOutcome;
use daily_performance_common::export::excel_core::{generate_report_buffer, SheetOptions};
use std::path::Path;

pub fn generate_excel(outcome: &RunOutcome, output_path: &Path, config: &Config) -> Result<()> {
    let options = SheetOptions {
        sheet_name: &config.report_sheet,
        percent_format: &config.percent_format,
    };
    let buffer = generate_report_buffer(&outcome.report, &outcome.filter, &options)
        .map_err(DailyPerformanceError::ExcelGeneration)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(output_path, buffer)?;
    tracing::info!("excel written: {}", output_path.display());
    Ok(())
}
