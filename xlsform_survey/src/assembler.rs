//! Builds the tree of groups and questions from the rows of the survey worksheet.

use log::{debug, info};

use crate::config::ParseOptions;
use crate::language::{DatumLanguage, LanguagesAvailable};
use crate::question_type::{FormQuestionType, FormQuestionTypeAndOptions};
use crate::relevance::translate;
use crate::sheets::{ChoicesSheet, Sheets, Style, SurveyRow};
use crate::survey::*;
use crate::warning::{SurveyWarning, WarningKind, Warnings};

/// The result of walking the survey worksheet.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct AssembledItems {
    pub items: Vec<SurveyItem>,
    pub general_warnings: Vec<SurveyWarning>,
    pub specific_warnings: Vec<SurveyWarning>,
}

struct Assembler<'a> {
    choices: Option<&'a ChoicesSheet>,
    options: &'a ParseOptions,
    // The groups currently open, innermost last.
    stack: Vec<SurveyGroup>,
    items: Vec<SurveyItem>,
    general_warnings: Vec<SurveyWarning>,
    specific_warnings: Vec<SurveyWarning>,
}

impl<'a> Assembler<'a> {
    fn append(&mut self, item: SurveyItem) {
        match self.stack.last_mut() {
            Some(group) => group.items.push(item),
            None => self.items.push(item),
        }
    }

    fn close_group(&mut self) -> bool {
        match self.stack.pop() {
            Some(g) => {
                debug!("close_group: {:?}", g.name);
                self.append(SurveyItem::Group(g));
                true
            }
            None => false,
        }
    }

    fn process_row(&mut self, row: &SurveyRow) {
        let type_raw = match (&row.type_raw, row.vacant) {
            (Some(t), false) => t.clone(),
            _ => return,
        };
        let mut item_warnings: Vec<SurveyWarning> = Vec::new();

        let type_and_options = match FormQuestionTypeAndOptions::parse(&type_raw) {
            Ok(t) => t,
            Err(e) => {
                debug!("process_row: row {}: {}", row.number, e);
                item_warnings.push(
                    SurveyWarning::new(
                        WarningKind::InvalidQuestionTypeOptions {
                            item: row.name.clone().unwrap_or_default(),
                            item_type: type_raw.clone(),
                        },
                        Some(row.reference.clone()),
                    )
                    .with_cell("type", Some(type_raw.clone()))
                    .with_item(row.name.clone(), Some(type_raw.clone())),
                );
                FormQuestionTypeAndOptions::unknown()
            }
        };
        let type_full = match type_and_options.type_ {
            FormQuestionType::Unknown => type_raw.clone(),
            _ => type_and_options.to_string(),
        };

        let age_group = row.age_group.as_ref().and_then(|ag| {
            let parsed = AgeGroup::parse(ag);
            if parsed.is_none() {
                item_warnings.push(
                    SurveyWarning::new(
                        WarningKind::InvalidAgeGroup {
                            item: row.name.clone().unwrap_or_default(),
                            age_group: ag.clone(),
                        },
                        Some(row.reference.clone()),
                    )
                    .with_cell("agegroup", Some(ag.clone()))
                    .with_item(row.name.clone(), Some(type_full.clone())),
                );
            }
            parsed
        });

        match type_and_options.type_ {
            FormQuestionType::BeginGroup | FormQuestionType::BeginRepeat => {
                let group_type = if type_and_options.type_ == FormQuestionType::BeginRepeat {
                    GroupType::RepeatTable
                } else {
                    GroupType::Basic
                };
                debug!("process_row: row {}: open {:?} {:?}", row.number, group_type, row.name);
                self.stack.push(SurveyGroup {
                    group_type,
                    name: row.name.clone(),
                    label: row.label.clone(),
                    age_group,
                    relevance_unprocessed: row.relevant.clone(),
                    relevance: None,
                    relevance_steps: vec![],
                    items: vec![],
                });
            }
            FormQuestionType::EndGroup | FormQuestionType::EndRepeat => {
                if !self.close_group() {
                    self.general_warnings.push(
                        SurveyWarning::new(
                            WarningKind::GroupEndedWithoutStarting,
                            Some(row.reference.clone()),
                        )
                        .with_item(row.name.clone(), Some(type_full.clone())),
                    );
                }
            }
            _ => {
                let answers = self.answers(row, &type_and_options, &type_full, &mut item_warnings);
                let label = if self.options.label_line_breaks_as_html {
                    row.label.map_translations(|l| l.replace('\n', "<br />"))
                } else {
                    row.label.clone()
                };
                let question = SurveyQuestion {
                    type_and_options,
                    type_full_raw: type_raw,
                    name: row.name.clone().unwrap_or_default(),
                    label,
                    label_full: row.label.clone(),
                    hint: row.hint.clone(),
                    age_group,
                    answers,
                    relevance_unprocessed: row.relevant.clone(),
                    relevance: None,
                    relevance_steps: vec![],
                    choice_filter_unprocessed: row.choice_filter.clone(),
                    details: QuestionDetails {
                        required: row.required.clone(),
                        notes: row.notes.clone(),
                        appearance: row.appearance.clone(),
                        calculation: row.calculation.clone(),
                        default: row.default.clone(),
                        constraint: row.constraint.clone(),
                        constraint_message: row.constraint_message.clone(),
                        read_only: row.read_only.clone(),
                    },
                    warnings: if item_warnings.is_empty() {
                        None
                    } else {
                        Some(item_warnings.clone())
                    },
                };
                self.append(SurveyItem::Question(question));
            }
        }
        self.specific_warnings.extend(item_warnings);
    }

    fn answers(
        &self,
        row: &SurveyRow,
        type_and_options: &FormQuestionTypeAndOptions,
        type_full: &str,
        item_warnings: &mut Vec<SurveyWarning>,
    ) -> Vec<SelectionAnswer> {
        if !type_and_options.type_.requires_selection_answers() {
            return vec![];
        }
        let question = row.name.clone().unwrap_or_default();
        let list_name = type_and_options.list_name().unwrap_or_default();
        let choices = match self.choices {
            Some(c) => c,
            None => {
                item_warnings.push(
                    SurveyWarning::new(
                        WarningKind::ReferenceToChoicesSheetButMissing {
                            question: question.clone(),
                            question_type: type_full.to_string(),
                        },
                        Some(row.reference.clone()),
                    )
                    .with_cell("type", row.type_raw.clone())
                    .with_item(row.name.clone(), Some(type_full.to_string())),
                );
                return vec![];
            }
        };
        let rows = choices.list(list_name);
        if rows.is_empty() {
            item_warnings.push(
                SurveyWarning::new(
                    WarningKind::ReferenceToListButListMissing {
                        question,
                        question_type: type_full.to_string(),
                        list_name: list_name.to_string(),
                    },
                    Some(row.reference.clone()),
                )
                .with_cell("type", row.type_raw.clone())
                .with_item(row.name.clone(), Some(type_full.to_string())),
            );
        }
        rows.into_iter()
            .filter_map(|c| {
                let answer_id = c.name.clone()?;
                Some(SelectionAnswer {
                    answer_id,
                    answer_label: c.label.clone(),
                    choice_filters: if c.choice_filters.is_empty() {
                        None
                    } else {
                        Some(c.choice_filters.clone())
                    },
                })
            })
            .collect()
    }
}

/// Walks the rows of the survey worksheet. Groups left open at the end are
/// closed, with a warning.
pub fn assemble_items(sheets: &Sheets, options: &ParseOptions) -> AssembledItems {
    let mut asm = Assembler {
        choices: sheets.choices.as_ref(),
        options,
        stack: vec![],
        items: vec![],
        general_warnings: vec![],
        specific_warnings: vec![],
    };
    for row in sheets.survey.rows.iter() {
        asm.process_row(row);
    }
    let last_row = sheets.survey.rows.last().map(|r| r.reference.clone());
    while let Some(name) = asm.stack.last().map(|g| g.name.clone()) {
        asm.general_warnings.push(
            SurveyWarning::new(WarningKind::GroupStartedWithoutEnding, last_row.clone())
                .with_item(name, None),
        );
        asm.close_group();
    }
    AssembledItems {
        items: asm.items,
        general_warnings: asm.general_warnings,
        specific_warnings: asm.specific_warnings,
    }
}

/// Fills the relevance of every item. Questions are looked up in `all_items`.
pub fn with_relevance(
    items: &[SurveyItem],
    all_items: &[SurveyItem],
    languages: &[DatumLanguage],
    options: &ParseOptions,
) -> Vec<SurveyItem> {
    let tr = |r: &Option<String>| {
        r.as_deref()
            .map(|r| translate(r, all_items, languages, options))
    };
    items
        .iter()
        .map(|item| match item {
            SurveyItem::Group(g) => {
                let t = tr(&g.relevance_unprocessed);
                SurveyItem::Group(SurveyGroup {
                    group_type: g.group_type,
                    name: g.name.clone(),
                    label: g.label.clone(),
                    age_group: g.age_group,
                    relevance_unprocessed: g.relevance_unprocessed.clone(),
                    relevance_steps: t.as_ref().map(|t| t.steps.clone()).unwrap_or_default(),
                    relevance: t.map(|t| t.relevance),
                    items: with_relevance(&g.items, all_items, languages, options),
                })
            }
            SurveyItem::Question(q) => {
                let t = tr(&q.relevance_unprocessed);
                let mut q = q.clone();
                q.relevance_steps = t.as_ref().map(|t| t.steps.clone()).unwrap_or_default();
                q.relevance = t.map(|t| t.relevance);
                SurveyItem::Question(q)
            }
        })
        .collect()
}

impl Survey {
    /// Assembles a survey from the worksheets of a form.
    pub fn from_sheets(sheets: &Sheets, options: &ParseOptions) -> Survey {
        let languages_available = LanguagesAvailable::compute(
            sheets
                .survey
                .label_cluster
                .as_ref()
                .map(|c| c.languages())
                .as_deref(),
            sheets
                .survey
                .hint_cluster
                .as_ref()
                .map(|c| c.languages())
                .as_deref(),
            sheets
                .choices
                .as_ref()
                .map(|c| c.label_cluster.languages())
                .as_deref(),
        );

        let assembled = assemble_items(sheets, options);
        let relevance_languages = options.relevance_languages.select(&languages_available);
        let items = with_relevance(
            &assembled.items,
            &assembled.items,
            relevance_languages,
            options,
        );

        let settings = sheets.settings.clone().unwrap_or_default();
        let default_language = settings
            .default_language
            .as_deref()
            .and_then(|l| languages_available.by_label(l))
            .cloned();
        let survey = Survey {
            form_title: settings.form_title,
            form_id: settings.form_id,
            version: settings.version,
            default_language,
            style: settings.style.as_deref().and_then(Style::parse),
            instance_name: settings.instance_name,
            public_key: settings.public_key,
            submission_url: settings.submission_url,
            languages_available,
            items,
            warnings: Warnings::collect(assembled.general_warnings, assembled.specific_warnings),
        };
        info!(
            "from_sheets: {:?}: {} top-level items, {} questions, languages: {:?}",
            survey.form_title,
            survey.items.len(),
            survey.questions().len(),
            survey
                .languages_available
                .all
                .iter()
                .map(|l| l.label.as_str())
                .collect::<Vec<&str>>()
        );
        survey
    }
}
