use crate::error::{DailyPerformanceError, Result};
use daily_performance_common::layout::parse_a1;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 作業実績シート
    pub data_sheet: String,
    /// フィルタ入力・出力シート
    pub report_sheet: String,
    pub start_cell: String,
    pub end_cell: String,
    pub shift_cell: String,
    /// パーセント列の表示形式
    pub percent_format: String,
    /// 列エイリアスの追加定義（JSON）
    pub aliases: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_sheet: "All_Data".into(),
            report_sheet: "Daily_Performance".into(),
            start_cell: "B1".into(),
            end_cell: "C1".into(),
            shift_cell: "E1".into(),
            percent_format: "0.00%".into(),
            aliases: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.validate()?;
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| DailyPerformanceError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("daily-performance").join("config.json"))
    }

    /// セル番地とシート名の妥当性を確認
    pub fn validate(&self) -> Result<()> {
        for cell in [&self.start_cell, &self.end_cell, &self.shift_cell] {
            if parse_a1(cell).is_none() {
                return Err(DailyPerformanceError::InvalidCellReference(cell.clone()));
            }
        }
        if self.data_sheet.trim().is_empty() || self.report_sheet.trim().is_empty() {
            return Err(DailyPerformanceError::Config("シート名が空です".into()));
        }
        Ok(())
    }

    pub fn set_data_sheet(&mut self, name: String) -> Result<()> {
        self.data_sheet = name;
        self.save()
    }

    pub fn set_report_sheet(&mut self, name: String) -> Result<()> {
        self.report_sheet = name;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.data_sheet, "All_Data");
        assert_eq!(config.start_cell, "B1");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"data_sheet": "Raw"}"#).unwrap();
        assert_eq!(config.data_sheet, "Raw");
        assert_eq!(config.report_sheet, "Daily_Performance");
        assert_eq!(config.percent_format, "0.00%");
    }

    #[test]
    fn test_invalid_cell_reference() {
        let config = Config {
            shift_cell: "1E".into(),
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(DailyPerformanceError::InvalidCellReference(_))
        ));
    }
}
