// ********* Warnings ***********
//
// Problems found in a form that do not prevent its conversion.

use log::warn;
use serde::Serialize;

#[derive(Eq, PartialEq, Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum WarningKind {
    GroupStartedWithoutEnding,
    GroupEndedWithoutStarting,
    #[serde(rename_all = "camelCase")]
    ReferenceToChoicesSheetButMissing {
        question: String,
        question_type: String,
    },
    #[serde(rename_all = "camelCase")]
    ReferenceToListButListMissing {
        question: String,
        question_type: String,
        list_name: String,
    },
    #[serde(rename_all = "camelCase")]
    InvalidQuestionTypeOptions { item: String, item_type: String },
    #[serde(rename_all = "camelCase")]
    InvalidAgeGroup { item: String, age_group: String },
}

/// The two renderings of a warning: in the list of all the warnings of a
/// form, and next to the item it concerns.
#[derive(Eq, PartialEq, Debug, Clone, Serialize)]
pub struct WarningDescription {
    #[serde(rename = "inList")]
    pub in_list: String,
    #[serde(rename = "onItem")]
    pub on_item: String,
}

impl WarningKind {
    pub fn description(&self) -> WarningDescription {
        let (in_list, on_item) = match self {
            WarningKind::GroupStartedWithoutEnding => (
                "A question group in the worksheet \"survey\" was started, but was not ended."
                    .to_string(),
                "This group was started, but was not ended.".to_string(),
            ),
            WarningKind::GroupEndedWithoutStarting => (
                "A question group in the worksheet \"survey\" was ended, but was not started."
                    .to_string(),
                "This group was ended, but was not started.".to_string(),
            ),
            WarningKind::ReferenceToChoicesSheetButMissing {
                question,
                question_type,
            } => (
                format!("A question (name: \"{}\", type: \"{}\") in the worksheet \"survey\" refers to a list from worksheet \"choices\" which is missing.", question, question_type),
                "This question requires a list from the worksheet \"choices\", but the worksheet \"choices\" is missing.".to_string(),
            ),
            WarningKind::ReferenceToListButListMissing {
                question,
                question_type,
                list_name,
            } => (
                format!("A question (name: \"{}\", type: \"{}\") in the worksheet \"survey\" refers to a missing list (name: \"{}\") from the worksheet \"choices\".", question, question_type, list_name),
                "This question requires a list from the worksheet \"choices\", but the list is missing.".to_string(),
            ),
            WarningKind::InvalidQuestionTypeOptions { item, item_type } => (
                format!(
                    "Invalid or unsupported question type (name: \"{}\", type: \"{}\").",
                    item, item_type
                ),
                "This question has an invalid or unsupported type.".to_string(),
            ),
            WarningKind::InvalidAgeGroup { item, age_group } => (
                format!(
                    "Invalid age group (name: \"{}\", age group: \"{}\"). Valid age groups are N, C, A, N_C, C_A and ALL.",
                    item, age_group
                ),
                "This item has an invalid age group.".to_string(),
            ),
        };
        WarningDescription { in_list, on_item }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize)]
pub struct SurveyWarning {
    pub kind: WarningKind,
    /// The row number in the survey worksheet.
    pub row: Option<String>,
    pub column: Option<String>,
    pub cell: Option<String>,
    #[serde(rename = "formItemId")]
    pub form_item_id: Option<String>,
    #[serde(rename = "formItemType")]
    pub form_item_type: Option<String>,
}

impl SurveyWarning {
    pub fn new(kind: WarningKind, row: Option<String>) -> SurveyWarning {
        let w = SurveyWarning {
            kind,
            row,
            column: None,
            cell: None,
            form_item_id: None,
            form_item_type: None,
        };
        warn!("{} (row {:?})", w.kind.description().in_list, w.row);
        w
    }

    pub fn with_cell(mut self, column: &str, cell: Option<String>) -> SurveyWarning {
        self.column = Some(column.to_string());
        self.cell = cell;
        self
    }

    pub fn with_item(mut self, id: Option<String>, item_type: Option<String>) -> SurveyWarning {
        self.form_item_id = id;
        self.form_item_type = item_type;
        self
    }
}

/// The warnings of a form: `general` concerns the structure of the survey
/// worksheet, `specific` concerns single items.
#[derive(Eq, PartialEq, Debug, Clone, Serialize)]
pub struct Warnings {
    pub general: Option<Vec<SurveyWarning>>,
    pub specific: Option<Vec<SurveyWarning>>,
}

impl Warnings {
    /// None when there is nothing to report.
    pub fn collect(general: Vec<SurveyWarning>, specific: Vec<SurveyWarning>) -> Option<Warnings> {
        if general.is_empty() && specific.is_empty() {
            return None;
        }
        let non_empty = |v: Vec<SurveyWarning>| if v.is_empty() { None } else { Some(v) };
        Some(Warnings {
            general: non_empty(general),
            specific: non_empty(specific),
        })
    }
}
