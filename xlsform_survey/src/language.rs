use log::debug;
use serde::{Deserialize, Serialize};

/// A language, as found in the suffix of a cluster column title (`label::English`).
#[derive(Eq, PartialEq, Debug, Clone, Hash, Serialize, Deserialize)]
pub struct DatumLanguage {
    #[serde(rename = "stringId")]
    pub string_id: String,
    pub label: String,
}

impl DatumLanguage {
    /// Builds a language from its display label. The identifier is the
    /// lower-cased alphanumeric projection of the label, starting with a letter.
    pub fn from_label(label: &str) -> DatumLanguage {
        let alnum: String = label
            .chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect();
        let string_id = match alnum.chars().next() {
            Some(c) if c.is_alphabetic() => alnum,
            _ => format!("l{}", alnum),
        };
        DatumLanguage {
            string_id,
            label: label.to_string(),
        }
    }

    /// English gets worded renderings, other languages get symbols.
    pub fn is_english(&self) -> bool {
        let l = self.label.to_lowercase();
        l.contains("english") || l.contains("(en)")
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct LocalizedDatum {
    pub language: DatumLanguage,
    pub translation: Option<String>,
}

/// One text in several languages. There is at most one entry per language.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedValue(Vec<LocalizedDatum>);

impl LocalizedValue {
    pub fn new() -> LocalizedValue {
        LocalizedValue(Vec::new())
    }

    /// Adds a translation. An existing entry for the same language is replaced.
    pub fn insert(&mut self, language: DatumLanguage, translation: Option<String>) {
        match self.0.iter_mut().find(|d| d.language == language) {
            Some(d) => d.translation = translation,
            None => self.0.push(LocalizedDatum {
                language,
                translation,
            }),
        }
    }

    pub fn data(&self) -> &[LocalizedDatum] {
        &self.0
    }

    pub fn get(&self, language: &DatumLanguage) -> Option<&LocalizedDatum> {
        self.0.iter().find(|d| &d.language == language)
    }

    pub fn translation(&self, language: &DatumLanguage) -> Option<&str> {
        self.get(language).and_then(|d| d.translation.as_deref())
    }

    /// True when no language carries a translation.
    pub fn is_vacant(&self) -> bool {
        self.0.iter().all(|d| d.translation.is_none())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Only keeps the entries for the given languages.
    pub fn filtered(&self, languages: &[DatumLanguage]) -> LocalizedValue {
        LocalizedValue(
            self.0
                .iter()
                .filter(|d| languages.contains(&d.language))
                .cloned()
                .collect(),
        )
    }

    /// Applies a function to every present translation.
    pub fn map_translations<F: Fn(&str) -> String>(&self, f: F) -> LocalizedValue {
        LocalizedValue(
            self.0
                .iter()
                .map(|d| LocalizedDatum {
                    language: d.language.clone(),
                    translation: d.translation.as_deref().map(&f),
                })
                .collect(),
        )
    }
}

impl FromIterator<(DatumLanguage, Option<String>)> for LocalizedValue {
    fn from_iter<I: IntoIterator<Item = (DatumLanguage, Option<String>)>>(iter: I) -> Self {
        let mut res = LocalizedValue::new();
        for (language, translation) in iter {
            if res.get(&language).is_none() {
                res.insert(language, translation);
            }
        }
        res
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForLabelCluster {
    #[serde(rename = "inCommon")]
    pub in_common: Vec<DatumLanguage>,
    #[serde(rename = "inGroupsAndQuestions")]
    pub in_groups_and_questions: Vec<DatumLanguage>,
    #[serde(rename = "inSelectionAnswers")]
    pub in_selection_answers: Vec<DatumLanguage>,
}

/// The languages found in a form.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct LanguagesAvailable {
    pub all: Vec<DatumLanguage>,
    #[serde(rename = "forLabelCluster")]
    pub for_label_cluster: ForLabelCluster,
}

impl LanguagesAvailable {
    /// Computes the languages from the cluster languages of the survey labels,
    /// survey hints and choice labels. A missing cluster has no languages.
    pub fn compute(
        survey_labels: Option<&[DatumLanguage]>,
        survey_hints: Option<&[DatumLanguage]>,
        choice_labels: Option<&[DatumLanguage]>,
    ) -> LanguagesAvailable {
        let mut all: Vec<DatumLanguage> = Vec::new();
        for lang in [survey_labels, survey_hints, choice_labels]
            .into_iter()
            .flatten()
            .flatten()
        {
            if !all.iter().any(|l| l.label == lang.label) {
                all.push(lang.clone());
            }
        }

        let present_in_all = |clusters: &[Option<&[DatumLanguage]>]| -> Vec<DatumLanguage> {
            all.iter()
                .filter(|lang| {
                    clusters.iter().all(|c| match c {
                        Some(langs) => langs.iter().any(|l| l.label == lang.label),
                        None => false,
                    })
                })
                .cloned()
                .collect()
        };

        let for_label_cluster = ForLabelCluster {
            in_common: present_in_all(&[survey_labels, choice_labels]),
            in_groups_and_questions: present_in_all(&[survey_labels]),
            in_selection_answers: present_in_all(&[choice_labels]),
        };
        debug!(
            "compute: all: {:?} for_label_cluster: {:?}",
            all, for_label_cluster
        );
        LanguagesAvailable {
            all,
            for_label_cluster,
        }
    }

    /// Finds a language by its display label.
    pub fn by_label(&self, label: &str) -> Option<&DatumLanguage> {
        self.all.iter().find(|l| l.label == label)
    }
}
