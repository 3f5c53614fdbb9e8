//! 日付正規化
//!
//! シリアル値（1899-12-30起点の日数）または文字列の日付を、
//! 時刻を切り捨てた 00:00 の日時に変換する。

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime};

/// 文字列日付のパターン（この順で試行）と、年が何番目の数字列か
const TEXT_PATTERNS: [(&str, usize); 5] = [
    ("%m/%d/%Y", 2),
    ("%Y-%m-%d", 0),
    ("%Y/%m/%d", 0),
    ("%d/%m/%Y", 2),
    ("%Y-%m-%d %H:%M:%S", 0),
];

/// ISO 8601 形式のフォールバック
const ISO_DATETIME_PATTERNS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const MICROS_PER_DAY: f64 = 86_400_000_000.0;

/// カレンダーに収まらないシリアル値を弾く上限（日数）
const MAX_SERIAL_DAYS: f64 = 1.0e8;

/// シリアル値を日時に変換（1899-12-30 00:00 起点、小数部は時刻）
///
/// 西暦1〜9999年に収まらない値は None（文字列パターンの試行に回す）
pub fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial.abs() > MAX_SERIAL_DAYS {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let offset = Duration::microseconds((serial * MICROS_PER_DAY).round() as i64);
    epoch
        .checked_add_signed(offset)
        .filter(|dt| (1..=9999).contains(&dt.year()))
}

/// 時刻を 00:00 に切り捨て
pub fn floor_to_midnight(dt: NaiveDateTime) -> NaiveDateTime {
    dt.date().and_hms_opt(0, 0, 0).unwrap_or(dt)
}

/// 終了日用: 同じ日の 23:59:59.999 に進める
pub fn end_of_day(dt: NaiveDateTime) -> NaiveDateTime {
    dt.date().and_hms_milli_opt(23, 59, 59, 999).unwrap_or(dt)
}

/// 指定位置の数字列がちょうど4桁か（chrono の %Y は桁数を問わないため）
fn has_four_digit_year(s: &str, group: usize) -> bool {
    s.split(|c: char| !c.is_ascii_digit())
        .filter(|g| !g.is_empty())
        .nth(group)
        .is_some_and(|g| g.len() == 4)
}

fn parse_text(s: &str) -> Option<NaiveDateTime> {
    for (pattern, year_group) in TEXT_PATTERNS {
        if !has_four_digit_year(s, year_group) {
            continue;
        }
        let parsed = if pattern.contains("%H") {
            NaiveDateTime::parse_from_str(s, pattern).ok()
        } else {
            NaiveDate::parse_from_str(s, pattern)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        };
        if parsed.is_some() {
            return parsed;
        }
    }
    None
}

fn parse_iso(s: &str) -> Option<NaiveDateTime> {
    // 基本形式 YYYYMMDD
    if s.len() == 8 && s.bytes().all(|b| b.is_ascii_digit()) {
        return NaiveDate::parse_from_str(s, "%Y%m%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0));
    }
    if !has_four_digit_year(s, 0) {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    ISO_DATETIME_PATTERNS
        .iter()
        .find_map(|pattern| NaiveDateTime::parse_from_str(s, pattern).ok())
}

/// 日付をパースし 00:00 に切り捨てる。解釈できなければ None
///
/// 試行順: シリアル値 → 固定パターン → ISO 8601
///
/// # Examples
/// ```
/// use daily_performance_common::date::parse_date;
///
/// let d = parse_date("45000").unwrap();
/// assert_eq!(d.to_string(), "2023-03-15 00:00:00");
/// assert_eq!(parse_date("03/15/2023"), Some(d));
/// assert_eq!(parse_date("yesterday"), None);
/// ```
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(serial) = s.parse::<f64>() {
        if let Some(dt) = serial_to_datetime(serial) {
            return Some(floor_to_midnight(dt));
        }
    }

    parse_text(s).or_else(|| parse_iso(s)).map(floor_to_midnight)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(0, 0, 0).unwrap()
    }

    #[test]
    fn test_serial_day_count() {
        assert_eq!(parse_date("45000"), Some(day(2023, 3, 15)));
        assert_eq!(parse_date("45352"), Some(day(2024, 3, 1)));
        assert_eq!(parse_date("0"), Some(day(1899, 12, 30)));
        assert_eq!(parse_date("1"), Some(day(1899, 12, 31)));
    }

    #[test]
    fn test_serial_fraction_is_truncated() {
        assert_eq!(parse_date("45000.75"), Some(day(2023, 3, 15)));
        // 負の小数は前日に切り捨て
        assert_eq!(parse_date("-0.5"), Some(day(1899, 12, 29)));
    }

    #[test]
    fn test_serial_time_of_day() {
        let dt = serial_to_datetime(45000.75).unwrap();
        assert_eq!(dt.to_string(), "2023-03-15 18:00:00");
    }

    #[test]
    fn test_serial_beyond_year_9999_is_rejected() {
        assert_eq!(serial_to_datetime(20_240_325.0), None);
        assert_eq!(serial_to_datetime(f64::NAN), None);
    }

    #[test]
    fn test_text_patterns_are_equivalent() {
        let expected = Some(day(2024, 3, 25));
        assert_eq!(parse_date("03/25/2024"), expected);
        assert_eq!(parse_date("2024-03-25"), expected);
        assert_eq!(parse_date("2024/03/25"), expected);
        assert_eq!(parse_date("25/03/2024"), expected);
        assert_eq!(parse_date("2024-03-25 17:45:10"), expected);
    }

    #[test]
    fn test_two_digit_year_is_rejected() {
        assert_eq!(parse_date("3/25/24"), None);
        assert_eq!(parse_date("25/03/24"), None);
        assert_eq!(parse_date("24/03/25"), None);
        assert_eq!(parse_date("24-03-25"), None);
        assert_eq!(parse_date("24-03-25T08:30"), None);
        assert_eq!(parse_date("12024-03-25"), None);
        assert_eq!(parse_date("3/25/2024"), Some(day(2024, 3, 25)));
    }

    #[test]
    fn test_serial_rounds_to_microseconds() {
        assert_eq!(parse_date("45000.999999995"), Some(day(2023, 3, 15)));
        let dt = serial_to_datetime(45000.5).unwrap();
        assert_eq!(dt.to_string(), "2023-03-15 12:00:00");
    }

    #[test]
    fn test_month_day_pattern_wins_when_ambiguous() {
        assert_eq!(parse_date("03/04/2024"), Some(day(2024, 3, 4)));
    }

    #[test]
    fn test_iso_fallback() {
        assert_eq!(parse_date("2024-03-25T08:30:00"), Some(day(2024, 3, 25)));
        assert_eq!(parse_date("2024-03-25T08:30"), Some(day(2024, 3, 25)));
        assert_eq!(parse_date("2024-03-25T23:30:00+03:30"), Some(day(2024, 3, 25)));
        assert_eq!(parse_date("20240325"), Some(day(2024, 3, 25)));
    }

    #[test]
    fn test_unrecognized_yields_none() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("   "), None);
        assert_eq!(parse_date("tomorrow"), None);
        assert_eq!(parse_date("2024-13-45"), None);
        assert_eq!(parse_date("inf"), None);
    }

    #[test]
    fn test_end_of_day() {
        let end = end_of_day(day(2024, 3, 25));
        assert_eq!(end.to_string(), "2024-03-25 23:59:59.999");
        assert!(end < day(2024, 3, 26));
    }
}
