// ********* Input grid ***********
//
// The decoded content of a spreadsheet file, as handed over by a container
// decoder (xlsx reader, JSON dump, ...).

use serde::{Deserialize, Serialize};

/// A spreadsheet file, decoded into named worksheets of plain string cells.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct Workbook {
    pub worksheets: Vec<Worksheet>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct Worksheet {
    pub name: String,
    pub rows: Vec<SheetRow>,
}

/// One row of a worksheet.
///
/// `number` is the 1-based row number in the spreadsheet. The position of a
/// cell in `cells` is its column position.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SheetRow {
    pub number: u32,
    pub cells: Vec<Option<String>>,
}

impl Workbook {
    pub fn new(worksheets: Vec<Worksheet>) -> Workbook {
        Workbook { worksheets }
    }

    /// The first worksheet whose name contains the given fragment.
    pub fn worksheet_containing(&self, fragment: &str) -> Option<&Worksheet> {
        self.worksheets.iter().find(|ws| ws.name.contains(fragment))
    }
}

impl Worksheet {
    /// Builds a worksheet from literal rows, numbering them from 1.
    pub fn from_rows(name: &str, rows: &[&[&str]]) -> Worksheet {
        let rows = rows
            .iter()
            .enumerate()
            .map(|(idx, cells)| SheetRow {
                number: (idx + 1) as u32,
                cells: cells.iter().map(|c| Some(c.to_string())).collect(),
            })
            .collect();
        Worksheet {
            name: name.to_string(),
            rows,
        }
    }

    /// The rows that carry at least one non-blank cell, in sheet order.
    pub fn non_vacant_rows(&self) -> Vec<&SheetRow> {
        self.rows.iter().filter(|r| !r.is_vacant()).collect()
    }
}

impl SheetRow {
    /// The trimmed text of the cell, absent when the cell is missing or blank.
    pub fn trimmed_plain_string(&self, column: usize) -> Option<String> {
        self.cells
            .get(column)
            .and_then(|c| c.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    pub fn is_vacant(&self) -> bool {
        (0..self.cells.len()).all(|idx| self.trimmed_plain_string(idx).is_none())
    }

    /// The row number, as displayed by a spreadsheet program.
    pub fn reference(&self) -> String {
        self.number.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trimmed_cells() {
        let row = SheetRow {
            number: 3,
            cells: vec![Some("  a ".to_string()), Some("   ".to_string()), None],
        };
        assert_eq!(row.trimmed_plain_string(0), Some("a".to_string()));
        assert_eq!(row.trimmed_plain_string(1), None);
        assert_eq!(row.trimmed_plain_string(2), None);
        assert_eq!(row.trimmed_plain_string(7), None);
        assert!(!row.is_vacant());
        assert_eq!(row.reference(), "3");
    }

    #[test]
    fn vacant_rows_are_skipped() {
        let ws = Worksheet::from_rows("survey", &[&["type", "name"], &[" ", ""], &["text", "q1"]]);
        let rows = ws.non_vacant_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].number, 3);
    }

    #[test]
    fn worksheet_lookup_by_fragment() {
        let wb = Workbook::new(vec![
            Worksheet::from_rows("my survey", &[]),
            Worksheet::from_rows("choices", &[]),
        ]);
        assert_eq!(
            wb.worksheet_containing("survey").map(|ws| ws.name.as_str()),
            Some("my survey")
        );
        assert!(wb.worksheet_containing("settings").is_none());
    }
}
