//! Locating the columns of a worksheet from its header row.

use log::debug;

use crate::error::*;
use crate::language::{DatumLanguage, LocalizedValue};
use crate::workbook::SheetRow;

/// Separates the title of a cluster column from its language (`label::English`).
pub const CLUSTER_SEPARATOR: &str = "::";

/// The header row of a worksheet.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct HeaderRow {
    pub sheet: SheetKind,
    titles: Vec<Option<String>>,
}

/// One column of a multi-language cluster.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ClusterColumn {
    /// The full header title.
    pub title: String,
    /// The part after the separator, once made presentable.
    pub title_tail: String,
    pub column: usize,
    pub language: DatumLanguage,
}

/// The columns sharing the same title prefix, in column order.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ColumnCluster {
    pub prefix: String,
    pub columns: Vec<ClusterColumn>,
}

impl HeaderRow {
    pub fn new(sheet: SheetKind, row: &SheetRow) -> HeaderRow {
        let titles = (0..row.cells.len())
            .map(|idx| row.trimmed_plain_string(idx))
            .collect();
        HeaderRow { sheet, titles }
    }

    /// All the non-blank titles with their column positions.
    pub fn titles(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.titles
            .iter()
            .enumerate()
            .filter_map(|(idx, t)| t.as_deref().map(|t| (idx, t)))
    }

    fn position(&self, title: &str) -> Option<usize> {
        self.titles().find(|(_, t)| *t == title).map(|(idx, _)| idx)
    }

    pub fn column(&self, title: &str) -> SheetsResult<usize> {
        match self.position(title) {
            Some(idx) => Ok(idx),
            None => ColumnNotFoundSnafu {
                title,
                sheet: self.sheet,
            }
            .fail(),
        }
    }

    /// Looks up a column by its title, then by each of its synonyms in order.
    pub fn column_any_of(&self, titles: &[&str]) -> SheetsResult<usize> {
        match titles.iter().find_map(|t| self.position(t)) {
            Some(idx) => Ok(idx),
            None => ColumnByTitleOrSynonymsNotFoundSnafu {
                titles: titles.iter().map(|t| t.to_string()).collect::<Vec<String>>(),
                sheet: self.sheet,
            }
            .fail(),
        }
    }

    pub fn optional_column_any_of(&self, titles: &[&str]) -> Option<usize> {
        self.column_any_of(titles).ok()
    }

    /// Finds all the columns titled `prefix` or `prefix::<language>`.
    pub fn cluster(&self, prefix: &str) -> SheetsResult<ColumnCluster> {
        let lang_prefix = format!("{}{}", prefix, CLUSTER_SEPARATOR);
        let found: Vec<(usize, String, String)> = self
            .titles()
            .filter_map(|(idx, title)| {
                if title == prefix {
                    Some((idx, title.to_string(), String::new()))
                } else {
                    title
                        .strip_prefix(lang_prefix.as_str())
                        .map(|tail| (idx, title.to_string(), tail.trim().to_string()))
                }
            })
            .collect();
        if found.is_empty() {
            return ColumnsNotFoundSnafu {
                prefix,
                sheet: self.sheet,
            }
            .fail();
        }

        let tails = presentable_tails(found.iter().map(|(_, _, t)| t.as_str()).collect());
        let columns: Vec<ClusterColumn> = found
            .into_iter()
            .zip(tails)
            .map(|((column, title, _), title_tail)| ClusterColumn {
                title,
                language: DatumLanguage::from_label(&title_tail),
                title_tail,
                column,
            })
            .collect();
        debug!("cluster: {}: {:?} {:?}", self.sheet, prefix, columns);
        Ok(ColumnCluster {
            prefix: prefix.to_string(),
            columns,
        })
    }

    pub fn optional_cluster(&self, prefix: &str) -> Option<ColumnCluster> {
        self.cluster(prefix).ok()
    }
}

fn starts_with_letter(s: &str) -> bool {
    s.chars().next().map(|c| c.is_alphabetic()).unwrap_or(false)
}

// Turns the raw language suffixes into display labels.
fn presentable_tails(tails: Vec<&str>) -> Vec<String> {
    let only_language =
        tails.len() == 1 && !tails[0].chars().any(|c| c.is_alphanumeric());
    if only_language {
        return vec!["Only Language".to_string()];
    }
    if tails.len() > 1 && tails.iter().all(|t| !starts_with_letter(t)) {
        return (1..=tails.len())
            .map(|idx| format!("Language {:02}", idx))
            .collect();
    }
    tails
        .into_iter()
        .map(|t| {
            if starts_with_letter(t) {
                t.to_string()
            } else {
                format!("L {}", t).trim().to_string()
            }
        })
        .collect()
}

impl ColumnCluster {
    pub fn languages(&self) -> Vec<DatumLanguage> {
        self.columns.iter().map(|c| c.language.clone()).collect()
    }

    /// Reads the translations of a row, one per cluster column.
    pub fn localized(&self, row: &SheetRow) -> LocalizedValue {
        self.columns
            .iter()
            .map(|c| (c.language.clone(), row.trimmed_plain_string(c.column)))
            .collect()
    }

    pub fn contains_column(&self, column: usize) -> bool {
        self.columns.iter().any(|c| c.column == column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workbook::Worksheet;

    fn header(titles: &[&str]) -> HeaderRow {
        let ws = Worksheet::from_rows("survey", &[titles]);
        HeaderRow::new(SheetKind::Survey, &ws.rows[0])
    }

    fn tails(c: &ColumnCluster) -> Vec<&str> {
        c.columns.iter().map(|c| c.title_tail.as_str()).collect()
    }

    #[test]
    fn single_and_synonyms() {
        let h = header(&["type", " name ", "", "list name"]);
        assert_eq!(h.column("name").unwrap(), 1);
        assert_eq!(h.column_any_of(&["list_name", "list name"]).unwrap(), 3);
        assert!(matches!(
            h.column("relevant"),
            Err(SheetsError::ColumnNotFound { .. })
        ));
        assert!(matches!(
            h.column_any_of(&["agegroup", "age_group"]),
            Err(SheetsError::ColumnByTitleOrSynonymsNotFound { .. })
        ));
    }

    #[test]
    fn cluster_with_languages() {
        let h = header(&["type", "label::English", "hint::English", "label::Français"]);
        let c = h.cluster("label").unwrap();
        assert_eq!(tails(&c), vec!["English", "Français"]);
        assert_eq!(c.columns[1].column, 3);
        assert_eq!(c.columns[1].language.string_id, "français");
    }

    #[test]
    fn single_unnamed_language() {
        let h = header(&["type", "label"]);
        let c = h.cluster("label").unwrap();
        assert_eq!(tails(&c), vec!["Only Language"]);
        assert_eq!(c.columns[0].language.string_id, "onlylanguage");
    }

    #[test]
    fn synthesized_languages() {
        let h = header(&["label::1", "label::2", "name"]);
        let c = h.cluster("label").unwrap();
        assert_eq!(tails(&c), vec!["Language 01", "Language 02"]);
    }

    #[test]
    fn prefixed_languages() {
        let h = header(&["label::English", "label::2"]);
        let c = h.cluster("label").unwrap();
        assert_eq!(tails(&c), vec!["English", "L 2"]);
        assert_eq!(c.columns[1].language.string_id, "l2");
    }

    #[test]
    fn missing_cluster() {
        let h = header(&["type", "labels", "name"]);
        assert!(matches!(
            h.cluster("label"),
            Err(SheetsError::ColumnsNotFound { .. })
        ));
        assert!(h.optional_cluster("hint").is_none());
    }
}
