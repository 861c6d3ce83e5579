//! FILENAME: core/persistence/src/report_writer.rs
//! PURPOSE: Document generation - writes an export table as a printable xlsx report.

use crate::PersistenceError;
use engine::{CellValue, ExportTable};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook as XlsxWorkbook};
use std::path::Path;

/// Narrowest column, in pixels.
pub const MIN_COLUMN_WIDTH_PX: f64 = 60.0;
/// Width allotted per character of the longest entry, in pixels.
pub const CHAR_WIDTH_PX: f64 = 6.0;
/// Landscape A4 width minus left and right margins, in points.
pub const USABLE_PAGE_WIDTH: f64 = 842.0 - 40.0;

const MAX_COLUMNS: usize = 16_384;
const HEADER_FILL: u32 = 0x808080;
const HEADER_FONT: u32 = 0xF5F5F5;
/// 20pt page margins, expressed in inches.
const MARGIN_INCHES: f64 = 20.0 / 72.0;
const PAPER_A4: u8 = 9;

/// Column widths sized to the longest entry of each column, scaled down
/// proportionally when the total does not fit the landscape page.
pub fn column_widths(table: &ExportTable) -> Vec<f64> {
    let mut widths: Vec<f64> = (0..table.column_count())
        .map(|col| {
            let longest = std::iter::once(table.headers[col].chars().count())
                .chain(
                    table
                        .rows
                        .iter()
                        .map(|row| row.get(col).map_or(0, |c| c.display_value().chars().count())),
                )
                .max()
                .unwrap_or(0);
            MIN_COLUMN_WIDTH_PX.max(longest as f64 * CHAR_WIDTH_PX)
        })
        .collect();

    let total: f64 = widths.iter().sum();
    if total > USABLE_PAGE_WIDTH {
        let scale = USABLE_PAGE_WIDTH / total;
        for width in &mut widths {
            *width *= scale;
        }
    }

    widths
}

/// Writes `table` to `path`: bold grey header row repeated on every printed
/// page, thin grid borders, centered cells.
pub fn write_report_to_path(table: &ExportTable, path: &Path) -> Result<(), PersistenceError> {
    if table.column_count() == 0 {
        return Err(PersistenceError::InvalidFormat(
            "Report needs at least one column".to_string(),
        ));
    }
    if table.column_count() > MAX_COLUMNS {
        return Err(PersistenceError::InvalidFormat(format!(
            "Report has {} columns, at most {} are supported",
            table.column_count(),
            MAX_COLUMNS
        )));
    }

    let mut xlsx = XlsxWorkbook::new();
    let worksheet = xlsx.add_worksheet();
    worksheet.set_name("Report")?;
    worksheet.set_landscape();
    worksheet.set_paper_size(PAPER_A4);
    worksheet.set_margins(
        MARGIN_INCHES,
        MARGIN_INCHES,
        MARGIN_INCHES,
        MARGIN_INCHES,
        0.0,
        0.0,
    );
    worksheet.set_repeat_rows(0, 0)?;

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(HEADER_FILL))
        .set_font_color(Color::RGB(HEADER_FONT))
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center);
    let body_format = Format::new()
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center);

    // Excel uses character width, roughly pixels / 7
    for (col, width) in column_widths(table).iter().enumerate() {
        worksheet.set_column_width(col as u16, *width / 7.0)?;
    }

    for (col, header) in table.headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, header, &header_format)?;
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        let row_num = (row_idx + 1) as u32;
        for col in 0..table.column_count() {
            match row.get(col).unwrap_or(&CellValue::Empty) {
                CellValue::Empty => {
                    worksheet.write_blank(row_num, col as u16, &body_format)?;
                }
                CellValue::Number(n) => {
                    worksheet.write_number_with_format(row_num, col as u16, *n, &body_format)?;
                }
                CellValue::Text(s) => {
                    worksheet.write_string_with_format(row_num, col as u16, s, &body_format)?;
                }
            }
        }
    }

    xlsx.save(path)?;
    Ok(())
}
