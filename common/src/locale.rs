//! ロケール混在の数値パーサー
//!
//! 入力シートにはペルシア数字・アラビア数字、桁区切りと小数点の揺れ、
//! ％記号付きの値が混在する。ここでそれらを f64 に揃える。
//!
//! ## 処理順序
//! 1. 数字をASCIIに変換
//! 2. 空白・NBSP・％記号を除去
//! 3. アラビア小数点 `٫` を `.` に置換
//! 4. `,` と `.` の役割を判定
//! 5. f64としてパース

const NBSP: char = '\u{00A0}';
const ARABIC_PERCENT: char = '\u{066A}';
const ARABIC_DECIMAL_SEPARATOR: char = '\u{066B}';

/// ペルシア数字（۰-۹）とアラビア・インド数字（٠-٩）をASCII数字に変換
pub fn normalize_digits(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '\u{06F0}'..='\u{06F9}' => ascii_digit(c as u32 - 0x06F0),
            '\u{0660}'..='\u{0669}' => ascii_digit(c as u32 - 0x0660),
            _ => c,
        })
        .collect()
}

fn ascii_digit(offset: u32) -> char {
    (b'0' + offset as u8) as char
}

/// 桁区切りと小数点を判定して `.` 小数表記に揃える
///
/// - `,` と `.` が両方ある場合: 右側に現れる方が小数点
/// - `,` のみ: 最後の区切り以降が1〜2桁なら小数点、それ以外は桁区切り
fn disambiguate_separators(s: &str) -> String {
    match (s.rfind(','), s.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => s.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => s.replace(',', ""),
        (Some(_), None) => {
            let last_segment = s.rsplit(',').next().unwrap_or("");
            if matches!(last_segment.chars().count(), 1 | 2) {
                s.replace(',', ".")
            } else {
                s.replace(',', "")
            }
        }
        _ => s.to_string(),
    }
}

/// 数値をパース。解釈できなければ None
pub fn try_parse_number(raw: &str) -> Option<f64> {
    if raw.is_empty() {
        return None;
    }

    let digits = normalize_digits(raw);
    let cleaned: String = digits
        .trim()
        .chars()
        .filter(|c| !matches!(*c, ' ' | NBSP | '%' | ARABIC_PERCENT))
        .map(|c| if c == ARABIC_DECIMAL_SEPARATOR { '.' } else { c })
        .collect();

    disambiguate_separators(&cleaned).parse::<f64>().ok()
}

/// 数値をパース。解釈できなければ `default`
///
/// # Examples
/// ```
/// use daily_performance_common::locale::parse_number;
///
/// assert_eq!(parse_number("1,234.56", 0.0), 1234.56);
/// assert_eq!(parse_number("۱۲۳", 0.0), 123.0);
/// assert_eq!(parse_number("abc", 0.0), 0.0);
/// ```
pub fn parse_number(raw: &str, default: f64) -> f64 {
    try_parse_number(raw).unwrap_or(default)
}

/// パフォーマンス値を比率としてパース
///
/// - `0 <= v <= 1`: そのまま比率とみなす（1.0 もここに含む）
/// - `1 < v <= 1000`: パーセント表記とみなし 100 で割る
/// - それ以外・解釈不能: `default`
pub fn parse_percent(raw: &str, default: Option<f64>) -> Option<f64> {
    match try_parse_number(raw) {
        Some(v) if (0.0..=1.0).contains(&v) => Some(v),
        Some(v) if v > 1.0 && v <= 1000.0 => Some(v / 100.0),
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_plain_decimal() {
        assert_eq!(parse_number("123.45", 0.0), 123.45);
        assert_eq!(parse_number("-7", 0.0), -7.0);
    }

    #[test]
    fn test_empty_and_garbage_use_default() {
        assert_eq!(parse_number("", 0.0), 0.0);
        assert_eq!(parse_number("   ", 3.0), 3.0);
        assert_eq!(parse_number("n/a", 0.0), 0.0);
        assert_eq!(try_parse_number("12a"), None);
    }

    #[test]
    fn test_persian_and_arabic_digits() {
        assert_eq!(normalize_digits("۰۱۲۳۴۵۶۷۸۹"), "0123456789");
        assert_eq!(normalize_digits("٠١٢٣٤٥٦٧٨٩"), "0123456789");
        assert_eq!(parse_number("۱۲۳.۴۵", 0.0), 123.45);
        assert_eq!(parse_number("١٢٣.٤٥", 0.0), 123.45);
    }

    #[test]
    fn test_arabic_decimal_separator() {
        assert_eq!(parse_number("۱۳۱٫۵", 0.0), 131.5);
    }

    #[test]
    fn test_separator_disambiguation() {
        assert_eq!(parse_number("1,234.56", 0.0), 1234.56);
        assert_eq!(parse_number("1.234,56", 0.0), 1234.56);
        assert_eq!(parse_number("1234,5", 0.0), 1234.5);
        assert_eq!(parse_number("12,34", 0.0), 12.34);
        assert_eq!(parse_number("1,234,567", 0.0), 1234567.0);
    }

    #[test]
    fn test_ambiguous_multiple_decimal_commas_fall_back() {
        // 末尾2桁のため全ての , が小数点扱いになり、パース不能
        assert_eq!(parse_number("1,234,56", -1.0), -1.0);
    }

    #[test]
    fn test_spaces_nbsp_and_percent_are_stripped() {
        assert_eq!(parse_number("1 234", 0.0), 1234.0);
        assert_eq!(parse_number("1\u{00A0}234", 0.0), 1234.0);
        assert_eq!(parse_number(" 58.9% ", 0.0), 58.9);
        assert_eq!(parse_number("58.9٪", 0.0), 58.9);
    }

    #[test]
    fn test_percent_whole_number_notation() {
        assert!(approx(parse_percent("58.9%", None).unwrap(), 0.589));
        assert!(approx(parse_percent("131.5", None).unwrap(), 1.315));
        assert!(approx(parse_percent("۱۳۱٫۵٪", None).unwrap(), 1.315));
    }

    #[test]
    fn test_percent_fraction_kept() {
        assert_eq!(parse_percent("0.78", None), Some(0.78));
        assert_eq!(parse_percent("0", None), Some(0.0));
        assert_eq!(parse_percent("1", None), Some(1.0));
    }

    #[test]
    fn test_percent_out_of_range_uses_default() {
        assert_eq!(parse_percent("1000.5", None), None);
        assert_eq!(parse_percent("-0.2", None), None);
        assert_eq!(parse_percent("5000", Some(0.5)), Some(0.5));
        assert_eq!(parse_percent("", Some(0.1)), Some(0.1));
    }
}
