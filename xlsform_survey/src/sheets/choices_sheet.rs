use serde::{Deserialize, Serialize};

use crate::columns::{ColumnCluster, HeaderRow};
use crate::error::*;
use crate::language::LocalizedValue;
use crate::workbook::Worksheet;

/// A value of an extra column of the choices worksheet, used for cascading selections.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ChoiceFilter {
    pub name: String,
    pub value: String,
}

/// One content row of the choices worksheet.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ChoiceRow {
    pub number: u32,
    pub list_name: Option<String>,
    pub name: Option<String>,
    pub label: LocalizedValue,
    pub choice_filters: Vec<ChoiceFilter>,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ChoicesSheet {
    pub header: HeaderRow,
    pub label_cluster: ColumnCluster,
    pub rows: Vec<ChoiceRow>,
}

impl ChoicesSheet {
    pub fn parse(ws: &Worksheet) -> SheetsResult<ChoicesSheet> {
        let (header, content) = super::split_rows(SheetKind::Choices, ws)?;
        let list_name_col = header.column_any_of(&["list_name", "list name"])?;
        let name_col = header.column("name")?;
        let label_cluster = header.cluster("label")?;

        // Every other column may filter the choices.
        let filter_cols: Vec<(usize, String)> = header
            .titles()
            .filter(|(idx, _)| {
                *idx != list_name_col && *idx != name_col && !label_cluster.contains_column(*idx)
            })
            .map(|(idx, title)| (idx, title.to_string()))
            .collect();

        let rows = content
            .iter()
            .map(|row| ChoiceRow {
                number: row.number,
                list_name: row.trimmed_plain_string(list_name_col),
                name: row.trimmed_plain_string(name_col),
                label: label_cluster.localized(row),
                choice_filters: filter_cols
                    .iter()
                    .filter_map(|(idx, title)| {
                        row.trimmed_plain_string(*idx).map(|value| ChoiceFilter {
                            name: title.clone(),
                            value,
                        })
                    })
                    .collect(),
            })
            .collect();
        Ok(ChoicesSheet {
            header,
            label_cluster,
            rows,
        })
    }

    /// The choices of a list, in sheet order.
    pub fn list(&self, list_name: &str) -> Vec<&ChoiceRow> {
        self.rows
            .iter()
            .filter(|r| r.list_name.as_deref() == Some(list_name))
            .collect()
    }
}
