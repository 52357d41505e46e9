// ********* Conversion options ***********

use crate::language::{DatumLanguage, LanguagesAvailable};

/// The languages in which relevance expressions are rendered.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum LanguageSelection {
    /// The languages of both the survey labels and the choice labels.
    InCommon,
    /// The languages of the survey labels.
    GroupsAndQuestions,
    /// Every language found in the form.
    All,
}

impl LanguageSelection {
    pub fn select<'a>(&self, languages: &'a LanguagesAvailable) -> &'a [DatumLanguage] {
        match self {
            LanguageSelection::InCommon => &languages.for_label_cluster.in_common,
            LanguageSelection::GroupsAndQuestions => {
                &languages.for_label_cluster.in_groups_and_questions
            }
            LanguageSelection::All => &languages.all,
        }
    }
}

/// Options that change how a form is converted.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub struct ParseOptions {
    pub relevance_languages: LanguageSelection,
    /// Line breaks in question labels become `<br />`.
    pub label_line_breaks_as_html: bool,
    /// Renders `${is_xxx} = '1'` as "is True" when `is_xxx` is a calculation.
    pub calculate_is_prefix_as_boolean: bool,
    /// Logs every intermediate rewrite of the relevance expressions.
    pub debug_relevance: bool,
}

impl ParseOptions {
    pub const DEFAULT: ParseOptions = ParseOptions {
        relevance_languages: LanguageSelection::InCommon,
        label_line_breaks_as_html: true,
        calculate_is_prefix_as_boolean: true,
        debug_relevance: false,
    };
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions::DEFAULT
    }
}
