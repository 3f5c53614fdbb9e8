use anyhow::{Context, Result};
use clap::Parser;
use daily_performance::{cli, config, export, logging, pipeline, source};
use cli::{Cli, Commands};
use config::Config;
use daily_performance_common::Report;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Run { input, output, start, end, shift, format, aliases } => {
            println!("📊 daily-performance - 日次集計\n");

            // 1. 読み込み・集計
            println!("[1/2] 入力ブックを集計中...");
            let options = pipeline::RunOptions { start, end, shift, aliases };
            let outcome = pipeline::build(&input, &config, &options)
                .with_context(|| format!("集計に失敗: {}", input.display()))?;

            match &outcome.report {
                Report::Tables(tables) => {
                    println!(
                        "✔ {}名を集計（{}/{}行を使用）\n",
                        tables.summary.rows.len(),
                        tables.stats.rows_kept,
                        tables.stats.rows_read
                    );
                }
                Report::Diagnostic(diagnostic) => {
                    println!("⚠ {}\n", diagnostic);
                }
            }

            // 2. 出力
            println!("[2/2] 出力中...");
            let output_dir = output.unwrap_or_else(|| {
                input
                    .parent()
                    .map(|p| p.to_path_buf())
                    .unwrap_or_else(|| std::path::PathBuf::from("."))
            });
            export::export_outcome(&outcome, &format, &output_dir, &config)
                .with_context(|| format!("出力に失敗: {}", output_dir.display()))?;

            println!("\n✅ 完了");
        }

        Commands::Columns { input, aliases } => {
            let aliases = pipeline::load_aliases(&config, aliases.as_deref())?;
            let mut workbook = source::InputWorkbook::open(&input)?;
            let table = workbook.read_table(&config.data_sheet)?;

            println!("列の解決結果 ({}):", config.data_sheet);
            let mut missing = 0;
            for (field, index) in aliases.resolve_each(&table.headers) {
                match index {
                    Some(i) => println!("  ✔ {:<22} → {} ({})", field, table.headers[i], i + 1),
                    None => {
                        missing += 1;
                        println!("  ✘ {:<22} → 見つかりません（候補: {}）", field, aliases.aliases(field).join(", "));
                    }
                }
            }
            if missing > 0 {
                println!("\n⚠ {}列が見つかりません", missing);
            }
        }

        Commands::Config { set_data_sheet, set_report_sheet, show } => {
            let mut config = config;

            if let Some(name) = set_data_sheet {
                config.set_data_sheet(name)?;
                println!("✔ 作業実績シートを設定しました");
            }

            if let Some(name) = set_report_sheet {
                config.set_report_sheet(name)?;
                println!("✔ 報告シートを設定しました");
            }

            if show {
                println!("設定:");
                println!("  作業実績シート: {}", config.data_sheet);
                println!("  報告シート: {}", config.report_sheet);
                println!("  フィルタセル: 開始 {} / 終了 {} / シフト {}", config.start_cell, config.end_cell, config.shift_cell);
                println!("  パーセント形式: {}", config.percent_format);
                println!(
                    "  列エイリアス: {}",
                    config.aliases.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| "組み込みのみ".into())
                );
            }
        }
    }

    Ok(())
}
