use calamine::Data;

/// 1904年起点のブックと1900年起点のシリアル値の差（日数）
const EPOCH_1904_OFFSET_DAYS: f64 = 1462.0;

/// 整数として書き出す上限（これを超える値は f64 表記のまま）
const MAX_WHOLE_NUMBER: f64 = 1.0e15;

fn format_float(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < MAX_WHOLE_NUMBER {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// セル値を文字列に変換
///
/// 日付セルは1900年起点のシリアル値の文字列になる（集計側でシリアル値として解釈する）。
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => format_float(*f),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => {
            let serial = if dt.is_1904() {
                dt.as_f64() + EPOCH_1904_OFFSET_DAYS
            } else {
                dt.as_f64()
            };
            format_float(serial)
        }
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("#ERR:{:?}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{ExcelDateTime, ExcelDateTimeType};

    #[test]
    fn test_cell_to_string() {
        assert_eq!(cell_to_string(&Data::Empty), "");
        assert_eq!(cell_to_string(&Data::String("Ali".into())), "Ali");
        assert_eq!(cell_to_string(&Data::Int(7)), "7");
        assert_eq!(cell_to_string(&Data::Float(45352.0)), "45352");
        assert_eq!(cell_to_string(&Data::Float(0.589)), "0.589");
        assert_eq!(cell_to_string(&Data::Bool(true)), "true");
    }

    #[test]
    fn test_date_cell_1904_system() {
        let dt_1900 = ExcelDateTime::new(45352.0, ExcelDateTimeType::DateTime, false);
        assert_eq!(cell_to_string(&Data::DateTime(dt_1900)), "45352");

        // 同じ 2024-03-01 が1904年起点では 43890
        let dt_1904 = ExcelDateTime::new(43890.0, ExcelDateTimeType::DateTime, true);
        assert_eq!(cell_to_string(&Data::DateTime(dt_1904)), "45352");
    }
}
