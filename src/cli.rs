use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "daily-performance")]
#[command(about = "作業実績(All_Data)から Daily_Performance を生成するツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力（-v: info, -vv: debug, -vvv: trace）
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 入力ブックを集計して Daily_Performance を出力
    Run {
        /// 入力ブック（.xlsx/.xlsm/.xlsb/.xls/.ods）
        #[arg(required = true)]
        input: PathBuf,

        /// 出力ファイル/ディレクトリ（デフォルト: 入力ブックと同じフォルダ）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 開始日（省略時は報告シートの開始日セル）
        #[arg(long)]
        start: Option<String>,

        /// 終了日（省略時は報告シートの終了日セル）
        #[arg(long)]
        end: Option<String>,

        /// シフト（all/total で全シフト。省略時は報告シートのシフトセル）
        #[arg(long)]
        shift: Option<String>,

        /// 出力形式 (excel/json/both)
        #[arg(short, long, default_value = "excel")]
        format: ExportFormat,

        /// 列エイリアスの追加定義（JSON）
        #[arg(long)]
        aliases: Option<PathBuf>,
    },

    /// 作業実績シートの列解決結果を表示
    Columns {
        /// 入力ブック
        #[arg(required = true)]
        input: PathBuf,

        /// 列エイリアスの追加定義（JSON）
        #[arg(long)]
        aliases: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// 作業実績シート名を設定
        #[arg(long)]
        set_data_sheet: Option<String>,

        /// 報告シート名を設定
        #[arg(long)]
        set_report_sheet: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Excel,
    Json,
    Both,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "json" => Ok(ExportFormat::Json),
            "both" => Ok(ExportFormat::Both),
            _ => Err(format!("Unknown format: {}. Use excel, json, or both", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Excel => write!(f, "excel"),
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Both => write!(f, "both"),
        }
    }
}
