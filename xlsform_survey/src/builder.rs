use crate::workbook::{Workbook, Worksheet};

/// A builder for assembling a workbook in code.
///
/// Rows are given as cell texts; they are numbered from 1 in each worksheet.
///
/// ```
/// use xlsform_survey::builder::Builder;
/// use xlsform_survey::{parse_survey, ParseOptions, SheetsError};
///
/// let workbook = Builder::new()
///     .survey(&[&["type", "name", "label::English", "relevant"],
///               &["text", "q1", "Your name", ""]])
///     .settings(&[&["form_title"], &["Census"]])
///     .build();
///
/// let survey = parse_survey(&workbook, &ParseOptions::DEFAULT)?;
/// assert_eq!(survey.form_title.as_deref(), Some("Census"));
/// assert_eq!(survey.items.len(), 1);
/// # Ok::<(), SheetsError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Builder {
    worksheets: Vec<Worksheet>,
}

impl Builder {
    pub fn new() -> Builder {
        Builder::default()
    }

    /// Adds a worksheet with an arbitrary name.
    pub fn worksheet(mut self, name: &str, rows: &[&[&str]]) -> Builder {
        self.worksheets.push(Worksheet::from_rows(name, rows));
        self
    }

    pub fn survey(self, rows: &[&[&str]]) -> Builder {
        self.worksheet("survey", rows)
    }

    pub fn choices(self, rows: &[&[&str]]) -> Builder {
        self.worksheet("choices", rows)
    }

    pub fn settings(self, rows: &[&[&str]]) -> Builder {
        self.worksheet("settings", rows)
    }

    pub fn build(self) -> Workbook {
        Workbook::new(self.worksheets)
    }
}
