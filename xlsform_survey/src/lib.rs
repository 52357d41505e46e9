//! Conversion of XLSForm spreadsheets into a [Survey] document.
//!
//! The input is a [Workbook] already decoded from its file format. The output
//! is a tree of groups and questions with their labels in every language, the
//! relevance expressions rendered as sentences, and the structural problems
//! found in the form as warnings.

mod assembler;
pub mod builder;
mod columns;
mod config;
mod error;
mod language;
pub mod manual;
mod question_type;
pub mod relevance;
mod sheets;
mod survey;
mod warning;
mod workbook;

use log::debug;

pub use crate::assembler::{assemble_items, with_relevance, AssembledItems};
pub use crate::columns::*;
pub use crate::config::*;
pub use crate::error::*;
pub use crate::language::*;
pub use crate::question_type::*;
pub use crate::sheets::*;
pub use crate::survey::*;
pub use crate::warning::*;
pub use crate::workbook::*;

/// Converts a workbook into a survey.
///
/// Missing worksheets, header rows or required columns are errors. Other
/// problems are reported in the warnings of the survey.
pub fn parse_survey(workbook: &Workbook, options: &ParseOptions) -> SheetsResult<Survey> {
    debug!(
        "parse_survey: worksheets: {:?} options: {:?}",
        workbook
            .worksheets
            .iter()
            .map(|ws| ws.name.as_str())
            .collect::<Vec<&str>>(),
        options
    );
    let sheets = Sheets::from_workbook(workbook)?;
    Ok(Survey::from_sheets(&sheets, options))
}
