//! Typed views over the three worksheets of a form.

mod choices_sheet;
mod settings_sheet;
mod survey_sheet;

use log::{info, warn};

pub use choices_sheet::*;
pub use settings_sheet::*;
pub use survey_sheet::*;

use crate::columns::HeaderRow;
use crate::error::*;
use crate::workbook::{SheetRow, Workbook, Worksheet};

/// The parsed worksheets of a form. Only the survey sheet is mandatory.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Sheets {
    pub survey: SurveySheet,
    pub choices: Option<ChoicesSheet>,
    pub settings: Option<SettingsSheet>,
}

impl Sheets {
    pub fn from_workbook(workbook: &Workbook) -> SheetsResult<Sheets> {
        let survey_ws = workbook.worksheet_containing(SheetKind::Survey.title());
        let choices_ws = workbook.worksheet_containing(SheetKind::Choices.title());
        let settings_ws = workbook.worksheet_containing(SheetKind::Settings.title());

        let survey_ws = match survey_ws {
            Some(ws) => ws,
            None => {
                let missing: Vec<SheetKind> = [
                    (SheetKind::Survey, true),
                    (SheetKind::Choices, choices_ws.is_none()),
                    (SheetKind::Settings, settings_ws.is_none()),
                ]
                .iter()
                .filter(|(_, m)| *m)
                .map(|(k, _)| *k)
                .collect();
                if missing.len() > 1 {
                    return MultipleWorksheetsNotFoundSnafu { sheets: missing }.fail();
                }
                return WorksheetNotFoundSnafu {
                    sheet: SheetKind::Survey,
                }
                .fail();
            }
        };

        let survey = SurveySheet::parse(survey_ws)?;
        let choices = match choices_ws {
            Some(ws) => Some(ChoicesSheet::parse(ws)?),
            None => {
                warn!("from_workbook: no \"choices\" worksheet, selection questions will have no answers");
                None
            }
        };
        let settings = match settings_ws {
            Some(ws) => Some(SettingsSheet::parse(ws)?),
            None => {
                warn!("from_workbook: no \"settings\" worksheet, the form has no metadata");
                None
            }
        };
        info!(
            "from_workbook: survey rows: {} choices rows: {:?}",
            survey.rows.len(),
            choices.as_ref().map(|c| c.rows.len())
        );
        Ok(Sheets {
            survey,
            choices,
            settings,
        })
    }
}

/// Drops the blank rows and separates the header from the content rows.
pub(crate) fn split_rows(sheet: SheetKind, ws: &Worksheet) -> SheetsResult<(HeaderRow, Vec<&SheetRow>)> {
    let rows = ws.non_vacant_rows();
    if rows.is_empty() {
        return WorksheetIsEmptySnafu { sheet }.fail();
    }
    let mut rows = rows.into_iter();
    let header = match rows.next() {
        Some(r) => HeaderRow::new(sheet, r),
        None => return HeaderRowNotFoundSnafu { sheet }.fail(),
    };
    let content: Vec<&SheetRow> = rows.collect();
    if content.is_empty() {
        return ContentRowsNotFoundSnafu { sheet }.fail();
    }
    Ok((header, content))
}
