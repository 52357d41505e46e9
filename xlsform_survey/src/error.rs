use serde::Serialize;
use snafu::Snafu;
use std::fmt::Display;

/// The three worksheets of a form.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Serialize)]
pub enum SheetKind {
    #[serde(rename = "survey")]
    Survey,
    #[serde(rename = "choices")]
    Choices,
    #[serde(rename = "settings")]
    Settings,
}

impl SheetKind {
    /// The fragment a worksheet name must contain to be recognized.
    pub fn title(&self) -> &'static str {
        match self {
            SheetKind::Survey => "survey",
            SheetKind::Choices => "choices",
            SheetKind::Settings => "settings",
        }
    }
}

impl Display for SheetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

fn quoted_list<T: Display>(elts: &[T]) -> String {
    elts.iter()
        .map(|e| format!("\"{}\"", e))
        .collect::<Vec<String>>()
        .join(", ")
}

/// Errors that prevent a form from being converted at all.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SheetsError {
    #[snafu(display("The \"{sheet}\" worksheet is missing."))]
    WorksheetNotFound { sheet: SheetKind },
    #[snafu(display(
        "Multiple worksheets are missing: {}. The \"survey\" sheet is required, the \"choices\" and \"settings\" sheets are optional.",
        quoted_list(sheets)
    ))]
    MultipleWorksheetsNotFound { sheets: Vec<SheetKind> },
    #[snafu(display("The \"{sheet}\" worksheet is blank."))]
    WorksheetIsEmpty { sheet: SheetKind },
    #[snafu(display("The \"{sheet}\" worksheet's header row is missing."))]
    HeaderRowNotFound { sheet: SheetKind },
    #[snafu(display("The \"{sheet}\" worksheet's content rows are missing."))]
    ContentRowsNotFound { sheet: SheetKind },
    #[snafu(display("Can not find column in worksheet \"{sheet}\" with header title \"{title}\"."))]
    ColumnNotFound { title: String, sheet: SheetKind },
    #[snafu(display(
        "Can not find column in worksheet \"{sheet}\" with header title \"{}\" or with one of its synonyms ({}).",
        titles.first().map(String::as_str).unwrap_or_default(),
        quoted_list(titles.get(1..).unwrap_or_default())
    ))]
    ColumnByTitleOrSynonymsNotFound { titles: Vec<String>, sheet: SheetKind },
    #[snafu(display(
        "Can not find columns in worksheet \"{sheet}\" with header title either being \"{prefix}\" or starting with \"{prefix}::\"."
    ))]
    ColumnsNotFound { prefix: String, sheet: SheetKind },
}

pub type SheetsResult<T> = Result<T, SheetsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_worksheet() {
        let e = SheetsError::MultipleWorksheetsNotFound {
            sheets: vec![SheetKind::Survey, SheetKind::Choices],
        };
        assert_eq!(
            e.to_string(),
            "Multiple worksheets are missing: \"survey\", \"choices\". The \"survey\" sheet is required, the \"choices\" and \"settings\" sheets are optional."
        );
        let e = SheetsError::ColumnNotFound {
            title: "type".to_string(),
            sheet: SheetKind::Survey,
        };
        assert_eq!(
            e.to_string(),
            "Can not find column in worksheet \"survey\" with header title \"type\"."
        );
        let e = SheetsError::ColumnByTitleOrSynonymsNotFound {
            titles: vec!["list_name".to_string(), "list name".to_string()],
            sheet: SheetKind::Choices,
        };
        assert_eq!(
            e.to_string(),
            "Can not find column in worksheet \"choices\" with header title \"list_name\" or with one of its synonyms (\"list name\")."
        );
        let e = SheetsError::ColumnsNotFound {
            prefix: "label".to_string(),
            sheet: SheetKind::Choices,
        };
        assert!(e.to_string().ends_with("either being \"label\" or starting with \"label::\"."));
    }
}
