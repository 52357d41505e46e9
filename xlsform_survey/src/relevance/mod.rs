//! Translation of relevance expressions (`selected(${q1}, 'yes') and ${age} > 18`)
//! into readable sentences.
//!
//! The expression is split into tokens, the shorthand function forms are
//! rewritten into comparisons, and the result is rendered into markup for each
//! language. Every intermediate rendering is kept, to help debugging forms.

mod lexer;
mod render;
mod rewrite;

use log::debug;

pub use lexer::{tokenize, Comparison, Logical, Token};

use crate::config::ParseOptions;
use crate::language::{DatumLanguage, LocalizedValue};
use crate::survey::SurveyItem;
use render::{Renderer, Stage};

pub const ALWAYS_RELEVANT: &str = "Always relevant.";

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RelevanceTranslation {
    pub relevance: LocalizedValue,
    /// The successive rewrites, from the raw expression to the final rendering.
    pub steps: Vec<LocalizedValue>,
}

fn for_all(languages: &[DatumLanguage], text: &str) -> LocalizedValue {
    languages
        .iter()
        .map(|l| (l.clone(), Some(text.to_string())))
        .collect()
}

/// Translates one expression in each of the languages. Questions are looked
/// up by name in `items`.
///
/// References to missing questions or answers do not fail the translation,
/// they are rendered as "not found" in the text.
pub fn translate(
    expression: &str,
    items: &[SurveyItem],
    languages: &[DatumLanguage],
    options: &ParseOptions,
) -> RelevanceTranslation {
    let expression = expression.trim();
    if expression.is_empty() || expression == "true()" {
        let relevance = for_all(languages, ALWAYS_RELEVANT);
        return RelevanceTranslation {
            steps: vec![relevance.clone()],
            relevance,
        };
    }

    // The rewrites that do not depend on the language.
    let mut token_steps: Vec<Vec<Token>> = Vec::new();
    let mut tokens = tokenize(expression);
    token_steps.push(tokens.clone());
    for rule in rewrite::SUGAR_RULES {
        tokens = rewrite::apply(&tokens, rule);
        token_steps.push(tokens.clone());
    }
    tokens = rewrite::apply(&tokens, rewrite::ANSWERED_RULE);
    token_steps.push(tokens.clone());

    let mut steps: Vec<LocalizedValue> = vec![for_all(languages, expression)];
    let mut per_language: Vec<Vec<String>> = Vec::new();
    for language in languages {
        let renderer = Renderer {
            items,
            language,
            options,
        };
        let mut texts: Vec<String> = token_steps
            .iter()
            .map(|t| renderer.render(t, Stage::Tokens))
            .collect();
        for stage in Stage::RENDERING {
            texts.push(renderer.render(&tokens, stage));
        }
        if let Some(last) = texts.last() {
            if !last.ends_with('.') {
                let finished = format!("{}.", last);
                texts.push(finished);
            }
        }
        if options.debug_relevance {
            for (idx, t) in texts.iter().enumerate() {
                debug!("translate: {} step {}: {}", language.label, idx, t);
            }
        }
        per_language.push(texts);
    }

    let num_steps = per_language.iter().map(|t| t.len()).max().unwrap_or(0);
    for idx in 0..num_steps {
        steps.push(
            languages
                .iter()
                .zip(per_language.iter())
                .map(|(l, texts)| (l.clone(), texts.get(idx).or(texts.last()).cloned()))
                .collect(),
        );
    }
    let relevance = steps.last().cloned().unwrap_or_default();
    RelevanceTranslation { relevance, steps }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::DatumLanguage;
    use crate::question_type::FormQuestionTypeAndOptions;
    use crate::survey::{QuestionDetails, SelectionAnswer, SurveyQuestion};

    fn question(name: &str, ty: &str, label: &str, answers: &[(&str, &str)]) -> SurveyItem {
        let en = DatumLanguage::from_label("English");
        let fr = DatumLanguage::from_label("French");
        let label: LocalizedValue = vec![(en.clone(), Some(label.to_string())), (fr.clone(), None)]
            .into_iter()
            .collect();
        SurveyItem::Question(SurveyQuestion {
            type_and_options: FormQuestionTypeAndOptions::parse(ty).unwrap(),
            type_full_raw: ty.to_string(),
            name: name.to_string(),
            label: label.clone(),
            label_full: label,
            hint: LocalizedValue::new(),
            age_group: None,
            answers: answers
                .iter()
                .map(|(id, l)| SelectionAnswer {
                    answer_id: id.to_string(),
                    answer_label: vec![(en.clone(), Some(l.to_string()))].into_iter().collect(),
                    choice_filters: None,
                })
                .collect(),
            relevance_unprocessed: None,
            relevance: None,
            relevance_steps: vec![],
            choice_filter_unprocessed: None,
            details: QuestionDetails::default(),
            warnings: None,
        })
    }

    fn items() -> Vec<SurveyItem> {
        vec![
            question("q1", "select_one yn", "Do you smoke?", &[("yes", "Yes"), ("no", "No")]),
            question("age", "integer", "Age", &[]),
            question("is_adult", "calculate", "Adult", &[]),
            question("name", "text", "Name", &[]),
        ]
    }

    fn english(expr: &str) -> String {
        let en = DatumLanguage::from_label("English");
        let t = translate(expr, &items(), &[en.clone()], &ParseOptions::DEFAULT);
        t.relevance.translation(&en).unwrap_or_default().to_string()
    }

    #[test]
    fn always_relevant() {
        assert_eq!(english(""), ALWAYS_RELEVANT);
        assert_eq!(english(" true() "), ALWAYS_RELEVANT);
    }

    #[test]
    fn resolved_selection() {
        let s = english("${q1} = 'yes'");
        assert_eq!(
            s,
            "<span class=\"relevance-precondition\">\
             <span class=\"relevance-segment rsg-qs\">Do you smoke?</span> \
             <span class=\"relevance-segment rsg-co\">was answered with</span> \
             <span class=\"relevance-segment rsg-as\">Yes</span></span>."
        );
        let s = english("selected(${q1}, 'maybe')");
        assert!(s.contains("rsg-nf\">Answer \"maybe\" not found;"));
    }

    #[test]
    fn missing_question() {
        let s = english("${q9} = 'yes'");
        assert!(s.contains("Question \"q9\" not found;"));
        assert!(s.contains("Answer \"yes\" not found;"));
        assert!(s.ends_with('.'));
    }

    #[test]
    fn other_answer_is_unresolved() {
        let s = english("${q1} = 'other'");
        assert!(s.contains("rsg-nf\">Answer \"other\" not found;"));
    }

    #[test]
    fn boolean_calculations() {
        let s = english("${is_adult} = '1'");
        assert!(s.contains("rsg-co\">is</span>"));
        assert!(s.contains("rsg-as\">True</span>"));
        let s = english("${is_adult} = '0'");
        assert!(s.contains("rsg-as\">False</span>"));
        let options = ParseOptions {
            calculate_is_prefix_as_boolean: false,
            ..ParseOptions::DEFAULT
        };
        let en = DatumLanguage::from_label("English");
        let t = translate("${is_adult} = '1'", &items(), &[en.clone()], &options);
        assert!(t
            .relevance
            .translation(&en)
            .unwrap_or_default()
            .contains("rsg-as\">1</span>"));
    }

    #[test]
    fn references_with_tails() {
        let s = english("${age} >= 18 and count-selected(${q1}) > 1");
        assert!(s.contains("rsg-qs\">Age</span> <span class=\"relevance-segment rsg-tp\">is greater than or equal with 18</span>"));
        assert!(s.contains("rsg-lo\">&nbsp;AND&nbsp;</span>"));
        assert!(s.contains("was answered with more than 1 option</span>"));
        let s = english("string-length(${name}) = 3");
        assert!(s.contains("was answered with 3 characters"));
        let s = english("${name} = 'NaN' or string-length(${name}) = 0");
        assert!(s.contains("rsg-tp\">was NOT answered</span>"));
        assert!(!s.contains("rsg-lo"));
    }

    #[test]
    fn empty_literal_is_a_plain_comparison() {
        let s = english("${name} = ''");
        assert_eq!(
            s,
            "<span class=\"relevance-precondition\">\
             <span class=\"relevance-segment rsg-qs\">Name</span> \
             <span class=\"relevance-segment rsg-co\">was answered with</span> \
             <span class=\"relevance-segment rsg-as\"></span></span>."
        );
        let s = english("${name} != ''");
        assert!(s.contains("rsg-co\">was NOT answered with</span>"));
        assert!(!s.contains("rsg-tp"));
    }

    #[test]
    fn parentheses() {
        let s = english("(${age} > 3)");
        assert!(s.starts_with(
            "<span class=\"relevance-precondition\"><span class=\"relevance-segment rsg-lp\">(</span>&nbsp;</span>"
        ));
        assert!(s.ends_with(
            "<span class=\"relevance-precondition\">&nbsp;<span class=\"relevance-segment rsg-lp\">)</span></span>."
        ));
    }

    #[test]
    fn symbols_for_other_languages() {
        let fr = DatumLanguage::from_label("French");
        let t = translate(
            "${age} > 3 or ${q1} != 'no'",
            &items(),
            &[fr.clone()],
            &ParseOptions::DEFAULT,
        );
        let s = t.relevance.translation(&fr).unwrap_or_default();
        assert!(s.contains("rsg-tp\">&gt; 3</span>"));
        assert!(s.contains("&nbsp;||&nbsp;"));
        assert!(s.contains("Question \"q1\" translation not found;"));
        assert!(s.contains("rsg-co\">≠</span>"));
    }

    #[test]
    fn step_trace() {
        let en = DatumLanguage::from_label("English");
        let t = translate(
            "not(selected(${q1}, 'yes'))",
            &items(),
            &[en.clone()],
            &ParseOptions::DEFAULT,
        );
        let steps: Vec<&str> = t
            .steps
            .iter()
            .map(|s| s.translation(&en).unwrap_or_default())
            .collect();
        assert_eq!(steps[0], "not(selected(${q1}, 'yes'))");
        assert_eq!(steps[1], "not ( selected ( ${q1} , 'yes' ) )");
        assert_eq!(steps[2], "not ( ${q1} = 'yes' )");
        assert!(steps.contains(&"${q1} != 'yes'"));
        assert!(steps.contains(&"${q1} was NOT answered with 'yes'"));
        assert_eq!(Some(&t.relevance), t.steps.last());
    }

    #[test]
    fn no_languages() {
        let t = translate("${age} > 3", &items(), &[], &ParseOptions::DEFAULT);
        assert!(t.relevance.is_empty());
    }
}
