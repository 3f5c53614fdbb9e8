use thiserror::Error;

#[derive(Error, Debug)]
pub enum DailyPerformanceError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("シートが見つかりません: {0}")]
    SheetNotFound(String),

    #[error("ブック読み込みエラー: {0}")]
    WorkbookRead(String),

    #[error("セル番地が不正です: {0}")]
    InvalidCellReference(String),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("集計エラー: {0}")]
    Core(#[from] daily_performance_common::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DailyPerformanceError>;
