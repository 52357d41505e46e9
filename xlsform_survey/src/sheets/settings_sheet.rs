use serde::{Deserialize, Serialize};

use crate::error::*;
use crate::workbook::Worksheet;

/// The layout requested for the form.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Style {
    #[serde(rename = "pages")]
    Pages,
    #[serde(rename = "theme-grid")]
    ThemeGrid,
    #[serde(rename = "theme-formhub")]
    ThemeFormhub,
}

impl Style {
    pub fn parse(s: &str) -> Option<Style> {
        match s {
            "pages" => Some(Style::Pages),
            "theme-grid" => Some(Style::ThemeGrid),
            "theme-formhub" => Some(Style::ThemeFormhub),
            _ => None,
        }
    }
}

/// The first content row of the settings worksheet.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct SettingsSheet {
    pub form_title: Option<String>,
    pub form_id: Option<String>,
    pub version: Option<String>,
    pub default_language: Option<String>,
    pub style: Option<String>,
    pub instance_name: Option<String>,
    pub public_key: Option<String>,
    pub submission_url: Option<String>,
}

impl SettingsSheet {
    pub fn parse(ws: &Worksheet) -> SheetsResult<SettingsSheet> {
        let (header, content) = super::split_rows(SheetKind::Settings, ws)?;
        let row = content[0];
        let cell = |title: &str| {
            header
                .optional_column_any_of(&[title])
                .and_then(|c| row.trimmed_plain_string(c))
        };
        Ok(SettingsSheet {
            form_title: cell("form_title"),
            form_id: cell("form_id"),
            version: cell("version"),
            default_language: cell("default_language"),
            style: cell("style"),
            instance_name: cell("instance_name"),
            public_key: cell("public_key"),
            submission_url: cell("submission_url"),
        })
    }
}
