//! Daily Performance Common Library
//!
//! 作業実績（All_Data）の集計エンジン。シートの読み書きは行わず、
//! 読み込み済みの表とフィルタ値を受け取って出力用の表を返す。

pub mod types;
pub mod locale;
pub mod date;
pub mod columns;
pub mod aggregator;
pub mod report;
pub mod layout;
pub mod export;
pub mod error;

pub use types::{FilterInput, FilterSpec, RawTable, TaskRecord, TaskType};
pub use locale::{parse_number, parse_percent};
pub use date::parse_date;
pub use columns::{ColumnAliases, ColumnMap, Field};
pub use aggregator::{aggregate, Aggregation, AggregationStats};
pub use report::{build_report, Cell, Diagnostic, Report, ReportTable, ReportTables};
pub use layout::Placement;
pub use error::{Error, Result};
