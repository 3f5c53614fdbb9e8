//! JSON出力

use crate::error::Result;
use crate::pipeline::RunOutcome;
use daily_performance_common::{FilterInput, Report};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct JsonPayload<'a> {
    generated_at: String,
    filter: &'a FilterInput,
    report: &'a Report,
}

pub fn generate_json(outcome: &RunOutcome, output_path: &Path) -> Result<()> {
    let payload = JsonPayload {
        generated_at: chrono::Local::now().to_rfc3339(),
        filter: &outcome.filter,
        report: &outcome.report,
    };

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(&payload)?;
    std::fs::write(output_path, json)?;
    tracing::info!("json written: {}", output_path.display());
    Ok(())
}
