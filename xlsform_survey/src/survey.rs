// ******** Output data structures *********

use serde::Serialize;

use crate::language::{DatumLanguage, LanguagesAvailable, LocalizedValue};
use crate::question_type::{FormQuestionType, FormQuestionTypeAndOptions};
use crate::sheets::{ChoiceFilter, Style};
use crate::warning::{SurveyWarning, Warnings};

/// The ages a group or question is meant for.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Serialize)]
pub enum AgeGroup {
    /// Neonates
    N,
    /// Children
    C,
    /// Adults
    A,
    #[serde(rename = "N_C")]
    NC,
    #[serde(rename = "C_A")]
    CA,
    #[serde(rename = "ALL")]
    All,
}

impl AgeGroup {
    /// Case-insensitive.
    pub fn parse(s: &str) -> Option<AgeGroup> {
        match s.trim().to_uppercase().as_str() {
            "N" => Some(AgeGroup::N),
            "C" => Some(AgeGroup::C),
            "A" => Some(AgeGroup::A),
            "N_C" => Some(AgeGroup::NC),
            "C_A" => Some(AgeGroup::CA),
            "ALL" => Some(AgeGroup::All),
            _ => None,
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy, Serialize)]
pub enum GroupType {
    #[serde(rename = "basic")]
    Basic,
    /// A repeated group, shown as one column per repetition.
    #[serde(rename = "repeatTable")]
    RepeatTable,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyGroup {
    pub group_type: GroupType,
    pub name: Option<String>,
    pub label: LocalizedValue,
    pub age_group: Option<AgeGroup>,
    pub relevance_unprocessed: Option<String>,
    pub relevance: Option<LocalizedValue>,
    pub relevance_steps: Vec<LocalizedValue>,
    pub items: Vec<SurveyItem>,
}

/// The columns of a question row that are carried as-is.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDetails {
    pub required: Option<String>,
    pub notes: Option<String>,
    pub appearance: Option<String>,
    pub calculation: Option<String>,
    pub default: Option<String>,
    pub constraint: Option<String>,
    pub constraint_message: LocalizedValue,
    pub read_only: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionAnswer {
    #[serde(rename = "answerID")]
    pub answer_id: String,
    pub answer_label: LocalizedValue,
    pub choice_filters: Option<Vec<ChoiceFilter>>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyQuestion {
    pub type_and_options: FormQuestionTypeAndOptions,
    pub type_full_raw: String,
    pub name: String,
    /// The label, with line breaks turned into markup.
    pub label: LocalizedValue,
    pub label_full: LocalizedValue,
    pub hint: LocalizedValue,
    pub age_group: Option<AgeGroup>,
    pub answers: Vec<SelectionAnswer>,
    pub relevance_unprocessed: Option<String>,
    pub relevance: Option<LocalizedValue>,
    pub relevance_steps: Vec<LocalizedValue>,
    pub choice_filter_unprocessed: Option<String>,
    pub details: QuestionDetails,
    pub warnings: Option<Vec<SurveyWarning>>,
}

impl SurveyQuestion {
    pub fn question_type(&self) -> FormQuestionType {
        self.type_and_options.type_
    }

    pub fn answer(&self, answer_id: &str) -> Option<&SelectionAnswer> {
        self.answers.iter().find(|a| a.answer_id == answer_id)
    }

    pub fn has_choice_filters(&self) -> bool {
        self.answers
            .iter()
            .any(|a| a.choice_filters.as_ref().map(|f| !f.is_empty()).unwrap_or(false))
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize)]
pub enum SurveyItem {
    #[serde(rename = "group")]
    Group(SurveyGroup),
    #[serde(rename = "question")]
    Question(SurveyQuestion),
}

impl SurveyItem {
    pub fn age_group(&self) -> Option<AgeGroup> {
        match self {
            SurveyItem::Group(g) => g.age_group,
            SurveyItem::Question(q) => q.age_group,
        }
    }
}

/// Walks a tree of items depth-first, in sheet order.
pub fn walk_items<'a>(items: &'a [SurveyItem], f: &mut dyn FnMut(&'a SurveyItem)) {
    for item in items {
        f(item);
        if let SurveyItem::Group(g) = item {
            walk_items(&g.items, f);
        }
    }
}

/// All the questions of a tree of items, depth-first.
pub fn all_questions(items: &[SurveyItem]) -> Vec<&SurveyQuestion> {
    let mut res: Vec<&SurveyQuestion> = Vec::new();
    walk_items(items, &mut |item| {
        if let SurveyItem::Question(q) = item {
            res.push(q);
        }
    });
    res
}

/// The first question with the given name.
pub fn find_question<'a>(items: &'a [SurveyItem], name: &str) -> Option<&'a SurveyQuestion> {
    all_questions(items).into_iter().find(|q| q.name == name)
}

/// A converted form.
#[derive(Eq, PartialEq, Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Survey {
    pub form_title: Option<String>,
    pub form_id: Option<String>,
    pub version: Option<String>,
    pub default_language: Option<DatumLanguage>,
    pub style: Option<Style>,
    pub instance_name: Option<String>,
    pub public_key: Option<String>,
    pub submission_url: Option<String>,
    pub languages_available: LanguagesAvailable,
    pub items: Vec<SurveyItem>,
    pub warnings: Option<Warnings>,
}

impl Survey {
    /// The default language, or else the first language of the form.
    pub fn auto_default_language(&self) -> Option<&DatumLanguage> {
        self.default_language
            .as_ref()
            .filter(|l| self.languages_available.all.contains(l))
            .or_else(|| self.languages_available.all.first())
    }

    pub fn has_age_groups(&self) -> bool {
        let mut found = false;
        walk_items(&self.items, &mut |item| {
            found = found || item.age_group().is_some();
        });
        found
    }

    pub fn questions(&self) -> Vec<&SurveyQuestion> {
        all_questions(&self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_groups() {
        assert_eq!(AgeGroup::parse("n_c"), Some(AgeGroup::NC));
        assert_eq!(AgeGroup::parse("All"), Some(AgeGroup::All));
        assert_eq!(AgeGroup::parse("adults"), None);
    }
}
