use crate::columns::{ColumnCluster, HeaderRow};
use crate::error::*;
use crate::language::LocalizedValue;
use crate::workbook::{SheetRow, Worksheet};

/// One content row of the survey worksheet.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SurveyRow {
    pub number: u32,
    /// The row as a spreadsheet program shows it, for warnings.
    pub reference: String,
    pub vacant: bool,
    pub type_raw: Option<String>,
    pub name: Option<String>,
    pub label: LocalizedValue,
    pub hint: LocalizedValue,
    pub relevant: Option<String>,
    pub required: Option<String>,
    pub notes: Option<String>,
    pub appearance: Option<String>,
    pub calculation: Option<String>,
    pub default: Option<String>,
    pub constraint: Option<String>,
    pub constraint_message: LocalizedValue,
    pub read_only: Option<String>,
    pub age_group: Option<String>,
    pub choice_filter: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone)]
struct SurveyColumns {
    type_: usize,
    name: usize,
    relevant: usize,
    label: Option<ColumnCluster>,
    hint: Option<ColumnCluster>,
    constraint_message: Option<ColumnCluster>,
    required: Option<usize>,
    notes: Option<usize>,
    appearance: Option<usize>,
    calculation: Option<usize>,
    default: Option<usize>,
    constraint: Option<usize>,
    read_only: Option<usize>,
    age_group: Option<usize>,
    choice_filter: Option<usize>,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SurveySheet {
    pub header: HeaderRow,
    pub label_cluster: Option<ColumnCluster>,
    pub hint_cluster: Option<ColumnCluster>,
    pub rows: Vec<SurveyRow>,
}

impl SurveySheet {
    pub fn parse(ws: &Worksheet) -> SheetsResult<SurveySheet> {
        let (header, content) = super::split_rows(SheetKind::Survey, ws)?;
        let cols = SurveyColumns {
            type_: header.column("type")?,
            name: header.column("name")?,
            relevant: header.column("relevant")?,
            label: header.optional_cluster("label"),
            hint: header.optional_cluster("hint"),
            constraint_message: header.optional_cluster("constraint_message"),
            required: header.optional_column_any_of(&["required"]),
            notes: header.optional_column_any_of(&["notes"]),
            appearance: header.optional_column_any_of(&["appearance"]),
            calculation: header.optional_column_any_of(&["calculation"]),
            default: header.optional_column_any_of(&["default"]),
            constraint: header.optional_column_any_of(&["constraint"]),
            read_only: header.optional_column_any_of(&["read_only"]),
            age_group: header.optional_column_any_of(&["agegroup", "age_group", "age group"]),
            choice_filter: header.optional_column_any_of(&["choice_filter", "choice filter"]),
        };
        let rows = content.iter().map(|r| cols.read(r)).collect();
        Ok(SurveySheet {
            header,
            label_cluster: cols.label,
            hint_cluster: cols.hint,
            rows,
        })
    }
}

fn localized(cluster: &Option<ColumnCluster>, row: &SheetRow) -> LocalizedValue {
    cluster
        .as_ref()
        .map(|c| c.localized(row))
        .unwrap_or_default()
}

impl SurveyColumns {
    fn read(&self, row: &SheetRow) -> SurveyRow {
        let cell = |c: Option<usize>| c.and_then(|c| row.trimmed_plain_string(c));
        SurveyRow {
            number: row.number,
            reference: row.reference(),
            vacant: row.is_vacant(),
            type_raw: row.trimmed_plain_string(self.type_),
            name: row.trimmed_plain_string(self.name),
            label: localized(&self.label, row),
            hint: localized(&self.hint, row),
            relevant: row.trimmed_plain_string(self.relevant),
            required: cell(self.required),
            notes: cell(self.notes),
            appearance: cell(self.appearance),
            calculation: cell(self.calculation),
            default: cell(self.default),
            constraint: cell(self.constraint),
            constraint_message: localized(&self.constraint_message, row),
            read_only: cell(self.read_only),
            age_group: cell(self.age_group),
            choice_filter: cell(self.choice_filter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn survey_rows() {
        let ws = Worksheet::from_rows(
            "survey",
            &[
                &["type", "name", "label::English", "relevant", "age group", "hint::English"],
                &["text", "q1", "Name", "", "A", "Your name"],
                &["", "", "", "", "", ""],
                &["integer", "q2", "", "${q1} != ''", "", ""],
            ],
        );
        let sheet = SurveySheet::parse(&ws).unwrap();
        assert_eq!(sheet.rows.len(), 2);
        let r = &sheet.rows[0];
        assert_eq!(r.type_raw.as_deref(), Some("text"));
        assert_eq!(r.age_group.as_deref(), Some("A"));
        assert_eq!(r.hint.data()[0].translation.as_deref(), Some("Your name"));
        let r = &sheet.rows[1];
        assert_eq!(r.number, 4);
        assert_eq!(r.reference, "4");
        assert_eq!(r.relevant.as_deref(), Some("${q1} != ''"));
        assert!(r.label.is_vacant());
        assert!(sheet.label_cluster.is_some());
    }

    #[test]
    fn required_columns() {
        let ws = Worksheet::from_rows("survey", &[&["type", "name"], &["text", "q1"]]);
        match SurveySheet::parse(&ws) {
            Err(SheetsError::ColumnNotFound { title, sheet }) => {
                assert_eq!(title, "relevant");
                assert_eq!(sheet, SheetKind::Survey);
            }
            x => panic!("unexpected result {:?}", x),
        }
    }
}
