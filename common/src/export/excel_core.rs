//! Excel生成（共通ライブラリ）
//!
//! layout.rs の配置に従って Daily_Performance シートを生成

use crate::layout::{range_a1, Placement, REPORT_ORIGIN_COL, REPORT_ORIGIN_ROW, SHIFT_LABEL_CELL, START_LABEL_CELL};
use crate::report::{Cell, CellRange, Report, ReportTable, TableKind};
use crate::types::FilterInput;
use rust_xlsxwriter::*;

/// 出力シートの設定
pub struct SheetOptions<'a> {
    /// シート名
    pub sheet_name: &'a str,
    /// パーセント列の表示形式（例: "0.00%"）
    pub percent_format: &'a str,
}

impl Default for SheetOptions<'_> {
    fn default() -> Self {
        Self {
            sheet_name: "Daily_Performance",
            percent_format: "0.00%",
        }
    }
}

fn write_table(
    worksheet: &mut Worksheet,
    table: &ReportTable,
    origin: (u32, u16),
    percent_ranges: &[CellRange],
    header_format: &Format,
    percent_format: &Format,
) -> Result<(), String> {
    let (origin_row, origin_col) = origin;

    for (c, title) in table.header.iter().enumerate() {
        worksheet
            .write_string_with_format(origin_row, origin_col + c as u16, title, header_format)
            .map_err(|e| format!("ヘッダー書き込みエラー: {}", e))?;
    }

    for (r, row) in table.rows.iter().enumerate() {
        let sheet_row = origin_row + 1 + r as u32;
        for (c, cell) in row.iter().enumerate() {
            let sheet_col = origin_col + c as u16;
            match cell {
                Cell::Empty => {}
                Cell::Text(text) => {
                    worksheet
                        .write_string(sheet_row, sheet_col, text)
                        .map_err(|e| format!("セル書き込みエラー: {}", e))?;
                }
                Cell::Number(value) => {
                    let is_percent = percent_ranges.iter().any(|range| range.contains(sheet_row, sheet_col));
                    if is_percent {
                        worksheet
                            .write_number_with_format(sheet_row, sheet_col, *value, percent_format)
                            .map_err(|e| format!("セル書き込みエラー: {}", e))?;
                    } else {
                        worksheet
                            .write_number(sheet_row, sheet_col, *value)
                            .map_err(|e| format!("セル書き込みエラー: {}", e))?;
                    }
                }
            }
        }
    }

    Ok(())
}

/// レポートをExcelバッファに生成
///
/// # Arguments
/// * `report` - 生成済みレポート（表またはメッセージ）
/// * `filter` - 1行目に書き戻すフィルタ値
/// * `options` - シート名・パーセント表示形式
pub fn generate_report_buffer(
    report: &Report,
    filter: &FilterInput,
    options: &SheetOptions<'_>,
) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xAAAAAA));
    let label_format = Format::new().set_bold();
    let percent_format = Format::new().set_num_format(options.percent_format);

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(options.sheet_name)
        .map_err(|e| format!("シート名設定エラー: {}", e))?;

    // フィルタ行
    let (label_row, label_col) = START_LABEL_CELL;
    let (shift_row, shift_col) = SHIFT_LABEL_CELL;
    let filter_cells = [
        (label_row, label_col, "Start", Some(&label_format)),
        (label_row, label_col + 1, filter.start.as_str(), None),
        (label_row, label_col + 2, filter.end.as_str(), None),
        (shift_row, shift_col, "Shift", Some(&label_format)),
        (shift_row, shift_col + 1, filter.shift.as_str(), None),
    ];
    for (row, col, value, format) in filter_cells {
        if value.is_empty() {
            continue;
        }
        let written = match format {
            Some(format) => worksheet.write_string_with_format(row, col, value, format),
            None => worksheet.write_string(row, col, value),
        };
        written.map_err(|e| format!("フィルタ書き込みエラー: {}", e))?;
    }

    match report {
        Report::Diagnostic(diagnostic) => {
            worksheet
                .write_string(REPORT_ORIGIN_ROW, REPORT_ORIGIN_COL, diagnostic.to_string())
                .map_err(|e| format!("メッセージ書き込みエラー: {}", e))?;
        }
        Report::Tables(tables) => {
            let placement = Placement::for_tables(tables);
            let ranges_for = |kind: TableKind| -> Vec<CellRange> {
                tables
                    .percent_regions
                    .iter()
                    .filter(|region| region.table == kind)
                    .map(|region| placement.absolute(region))
                    .collect()
            };

            write_table(
                worksheet,
                &tables.summary,
                placement.summary,
                &ranges_for(TableKind::Summary),
                &header_format,
                &percent_format,
            )?;
            write_table(
                worksheet,
                &tables.detailed,
                placement.detailed,
                &ranges_for(TableKind::Detailed),
                &header_format,
                &percent_format,
            )?;

            tracing::debug!(
                summary = %range_a1(&placement.extent(TableKind::Summary, &tables.summary)),
                detailed = %range_a1(&placement.extent(TableKind::Detailed, &tables.detailed)),
                percent = ?tables
                    .percent_regions
                    .iter()
                    .map(|region| range_a1(&placement.absolute(region)))
                    .collect::<Vec<_>>(),
                "report tables written"
            );

            worksheet
                .set_column_width(placement.summary.1, 20)
                .map_err(|e| format!("列幅設定エラー: {}", e))?;
            worksheet
                .set_column_width(placement.detailed.1, 20)
                .map_err(|e| format!("列幅設定エラー: {}", e))?;
        }
    }

    workbook
        .save_to_buffer()
        .map_err(|e| format!("Excel保存エラー: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::ColumnAliases;
    use crate::report::{build_report, Diagnostic};
    use crate::types::RawTable;
    use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
    use std::io::Cursor;

    fn read_back(buffer: Vec<u8>) -> calamine::Range<Data> {
        let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(buffer)).expect("xlsx open");
        workbook.worksheet_range("Daily_Performance").expect("sheet")
    }

    fn text(range: &calamine::Range<Data>, pos: (u32, u32)) -> Option<String> {
        match range.get_value(pos) {
            Some(Data::String(s)) => Some(s.clone()),
            _ => None,
        }
    }

    #[test]
    fn test_diagnostic_written_at_a3() {
        let report = Report::Diagnostic(Diagnostic::EmptyInput);
        let filter = FilterInput::new("2024-03-01", "2024-03-02", "all");
        let buffer = generate_report_buffer(&report, &filter, &SheetOptions::default()).unwrap();

        let range = read_back(buffer);
        assert_eq!(text(&range, (0, 0)).as_deref(), Some("Start"));
        assert_eq!(text(&range, (0, 1)).as_deref(), Some("2024-03-01"));
        assert_eq!(text(&range, (0, 4)).as_deref(), Some("all"));
        assert_eq!(text(&range, (2, 0)).as_deref(), Some("All_Data is empty."));
    }

    #[test]
    fn test_tables_written_side_by_side() {
        let table = RawTable::new(
            [
                "full_name", "task_type", "quantity", "occupied_hours", "Negative_Minutes",
                "performance_without_rotation", "performance_with_rotation", "date", "Shift",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            vec![["Ali", "Receive", "12", "3", "", "50%", "0.75", "2024-03-01", "A"]
                .iter()
                .map(|s| s.to_string())
                .collect()],
        );
        let filter = FilterInput::new("2024-03-01", "2024-03-01", "");
        let report = build_report(&table, &filter, &ColumnAliases::default()).unwrap();
        let buffer = generate_report_buffer(&report, &filter, &SheetOptions::default()).unwrap();

        let range = read_back(buffer);
        assert_eq!(text(&range, (2, 0)).as_deref(), Some("full_name"));
        assert_eq!(text(&range, (3, 0)).as_deref(), Some("Ali"));
        assert_eq!(range.get_value((3, 1)), Some(&Data::Float(12.0)));
        assert_eq!(range.get_value((3, 5)), Some(&Data::Float(0.75)));
        // 表2はH列から
        assert_eq!(text(&range, (2, 7)).as_deref(), Some("full_name"));
        assert_eq!(text(&range, (2, 8)).as_deref(), Some("Receive_quantity"));
        assert_eq!(range.get_value((3, 8)), Some(&Data::Float(12.0)));
        assert_eq!(range.get_value((3, 11)), Some(&Data::Float(0.5)));
    }
}
