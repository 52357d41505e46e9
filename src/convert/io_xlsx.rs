use std::io::Cursor;

use calamine::{DataType, Range, Reader, Xlsx};
use chrono::{Duration, NaiveDate};
use log::debug;
use snafu::prelude::*;
use xlsform_survey::{SheetRow, Workbook, Worksheet};

use super::io_common::FormFile;
use super::{ConvertResult, OpeningExcelSnafu};

/// Reads all the worksheets of an Excel file.
pub fn read_workbook(form: &FormFile) -> ConvertResult<Workbook> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(form.bytes.clone())).context(
        OpeningExcelSnafu {
            path: form.path.clone(),
        },
    )?;
    let worksheets: Vec<Worksheet> = workbook
        .worksheets()
        .into_iter()
        .map(|(name, range)| read_worksheet(name, &range))
        .collect();
    Ok(Workbook::new(worksheets))
}

fn read_worksheet(name: String, wrange: &Range<DataType>) -> Worksheet {
    // The range starts at the first non-empty cell.
    let (first_row, first_col) = wrange.start().unwrap_or((0, 0));
    let rows: Vec<SheetRow> = wrange
        .rows()
        .enumerate()
        .map(|(idx, row)| SheetRow {
            number: first_row + idx as u32 + 1,
            cells: std::iter::repeat(None)
                .take(first_col as usize)
                .chain(row.iter().map(cell_text))
                .collect(),
        })
        .collect();
    debug!("read_worksheet: {:?}: {} rows", name, rows.len());
    Worksheet { name, rows }
}

/// The plain text of a cell. Numbers without a fractional part are written as integers.
#[allow(unreachable_patterns)]
fn cell_text(cell: &DataType) -> Option<String> {
    match cell {
        DataType::String(s) => Some(s.clone()),
        DataType::Int(i) => Some(i.to_string()),
        DataType::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => {
            Some(format!("{}", *f as i64))
        }
        DataType::Float(f) => Some(f.to_string()),
        DataType::Bool(b) => Some(if *b { "TRUE" } else { "FALSE" }.to_string()),
        DataType::DateTime(f) => Some(excel_datetime_text(*f).unwrap_or_else(|| f.to_string())),
        DataType::Error(_) | DataType::Empty => None,
        _ => None,
    }
}

// Excel stores dates as days since 1899-12-30, the time of day as the fraction.
fn excel_datetime_text(serial: f64) -> Option<String> {
    if !serial.is_finite() || !(0.0..3_000_000.0).contains(&serial) {
        return None;
    }
    let seconds = (serial * 86_400.0).round() as i64;
    let dt = NaiveDate::from_ymd_opt(1899, 12, 30)?
        .and_hms_opt(0, 0, 0)?
        .checked_add_signed(Duration::seconds(seconds))?;
    let text = if seconds < 86_400 {
        dt.format("%H:%M:%S").to_string()
    } else if seconds % 86_400 == 0 {
        dt.format("%Y-%m-%d").to_string()
    } else {
        dt.format("%Y-%m-%d %H:%M:%S").to_string()
    };
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_texts() {
        assert_eq!(cell_text(&DataType::String("text".to_string())), Some("text".to_string()));
        assert_eq!(cell_text(&DataType::Float(2.0)), Some("2".to_string()));
        assert_eq!(cell_text(&DataType::Float(2.5)), Some("2.5".to_string()));
        assert_eq!(cell_text(&DataType::Int(7)), Some("7".to_string()));
        assert_eq!(cell_text(&DataType::Bool(true)), Some("TRUE".to_string()));
        assert_eq!(cell_text(&DataType::Empty), None);
    }

    #[test]
    fn date_cells() {
        assert_eq!(cell_text(&DataType::DateTime(44927.0)), Some("2023-01-01".to_string()));
        assert_eq!(
            cell_text(&DataType::DateTime(44927.75)),
            Some("2023-01-01 18:00:00".to_string())
        );
        assert_eq!(cell_text(&DataType::DateTime(0.5)), Some("12:00:00".to_string()));
        assert_eq!(cell_text(&DataType::DateTime(-1.0)), Some("-1".to_string()));
    }

    #[test]
    fn worksheet_positions() {
        let mut range: Range<DataType> = Range::new((1, 2), (2, 3));
        range.set_value((1, 2), DataType::String("type".to_string()));
        range.set_value((1, 3), DataType::String("name".to_string()));
        range.set_value((2, 2), DataType::String("text".to_string()));
        let ws = read_worksheet("survey".to_string(), &range);
        assert_eq!(ws.rows.len(), 2);
        assert_eq!(ws.rows[0].number, 2);
        assert_eq!(ws.rows[0].trimmed_plain_string(2), Some("type".to_string()));
        assert_eq!(ws.rows[1].trimmed_plain_string(3), None);
    }

    #[test]
    fn not_a_spreadsheet() {
        let res = read_workbook(&FormFile::new("form.xlsx", b"not a zip".to_vec()));
        assert!(res.is_err());
    }
}
