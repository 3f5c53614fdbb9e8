pub mod excel;
pub mod json;

use crate::cli::ExportFormat;
use crate::config::Config;
use crate::error::Result;
use crate::pipeline::RunOutcome;
use std::path::{Path, PathBuf};

fn output_path_for_format(output: &Path, title: &str, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", title, extension))
    } else {
        output.to_path_buf()
    }
}

fn output_paths_for_both(output: &Path, title: &str) -> (PathBuf, PathBuf) {
    if output.is_dir() || output.extension().is_none() {
        let excel_path = output.join(format!("{}.xlsx", title));
        let json_path = output.join(format!("{}.json", title));
        (excel_path, json_path)
    } else {
        let parent = output.parent().unwrap_or_else(|| Path::new("."));
        let stem = output
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(title);
        let excel_path = parent.join(format!("{}.xlsx", stem));
        let json_path = parent.join(format!("{}.json", stem));
        (excel_path, json_path)
    }
}

/// 生成結果を出力し、書き出したファイルのパスを返す
pub fn export_outcome(
    outcome: &RunOutcome,
    format: &ExportFormat,
    output: &Path,
    config: &Config,
) -> Result<Vec<PathBuf>> {
    let title = config.report_sheet.as_str();
    let mut written = Vec::new();

    match format {
        ExportFormat::Excel => {
            let path = output_path_for_format(output, title, "xlsx");
            println!("- Excelを生成中...");
            excel::generate_excel(outcome, &path, config)?;
            println!("✔ Excel出力: {}", path.display());
            written.push(path);
        }
        ExportFormat::Json => {
            let path = output_path_for_format(output, title, "json");
            println!("- JSONを生成中...");
            json::generate_json(outcome, &path)?;
            println!("✔ JSON出力: {}", path.display());
            written.push(path);
        }
        ExportFormat::Both => {
            let (excel_path, json_path) = output_paths_for_both(output, title);

            println!("- Excelを生成中...");
            excel::generate_excel(outcome, &excel_path, config)?;
            println!("✔ Excel出力: {}", excel_path.display());

            println!("- JSONを生成中...");
            json::generate_json(outcome, &json_path)?;
            println!("✔ JSON出力: {}", json_path.display());

            written.push(excel_path);
            written.push(json_path);
        }
    }

    Ok(written)
}
