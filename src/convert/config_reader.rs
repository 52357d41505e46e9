use log::debug;
use serde::{Deserialize, Serialize};
use snafu::prelude::*;
use std::fs;
use std::path::Path;

use xlsform_survey::{LanguageSelection, ParseOptions};

use super::io_common::FormFile;
use super::*;
use crate::args::Args;

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum InputType {
    Xlsx,
    Json,
}

impl InputType {
    pub fn parse(s: &str) -> ConvertResult<InputType> {
        match s.to_lowercase().as_str() {
            "xlsx" | "excel" => Ok(InputType::Xlsx),
            "json" => Ok(InputType::Json),
            _ => UnknownInputTypeSnafu { input_type: s }.fail(),
        }
    }
}

pub fn parse_language_selection(s: &str) -> ConvertResult<LanguageSelection> {
    match s {
        "in-common" | "inCommon" => Ok(LanguageSelection::InCommon),
        "groups-and-questions" | "groupsAndQuestions" => Ok(LanguageSelection::GroupsAndQuestions),
        "all" => Ok(LanguageSelection::All),
        _ => UnknownLanguageSelectionSnafu { selection: s }.fail(),
    }
}

/// The settings of one conversion.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionConfig {
    pub input: Option<String>,
    #[serde(rename = "inputType")]
    pub input_type: Option<String>,
    pub output: Option<String>,
    pub reference: Option<String>,
    #[serde(rename = "relevanceLanguages")]
    pub relevance_languages: Option<String>,
    #[serde(rename = "labelLineBreaksAsHtml")]
    pub label_line_breaks_as_html: Option<bool>,
    #[serde(rename = "calculateIsPrefixAsBoolean")]
    pub calculate_is_prefix_as_boolean: Option<bool>,
    #[serde(rename = "debugRelevance")]
    pub debug_relevance: Option<bool>,
}

// Paths in a configuration file are relative to its directory.
fn resolve(root: &Path, p: Option<String>) -> Option<String> {
    p.map(|p| {
        if p == "stdout" || Path::new(&p).is_absolute() {
            p
        } else {
            root.join(&p).display().to_string()
        }
    })
}

pub fn read_config(path: &str) -> ConvertResult<ConversionConfig> {
    let contents = fs::read_to_string(path).context(ReadingFileSnafu { path })?;
    let config: ConversionConfig =
        serde_json::from_str(&contents).context(ParsingJsonSnafu { path })?;
    debug!("read_config: {:?}", config);
    let root = Path::new(path).parent().unwrap_or_else(|| Path::new("."));
    Ok(ConversionConfig {
        input: resolve(root, config.input),
        output: resolve(root, config.output),
        reference: resolve(root, config.reference),
        ..config
    })
}

impl ConversionConfig {
    /// The command line arguments take precedence.
    pub fn with_args(self, args: &Args) -> ConversionConfig {
        ConversionConfig {
            input: args.input.clone().or(self.input),
            input_type: args.input_type.clone().or(self.input_type),
            output: args.out.clone().or(self.output),
            reference: args.reference.clone().or(self.reference),
            relevance_languages: args.languages.clone().or(self.relevance_languages),
            debug_relevance: if args.debug_relevance {
                Some(true)
            } else {
                self.debug_relevance
            },
            ..self
        }
    }

    pub fn parse_options(&self) -> ConvertResult<ParseOptions> {
        let d = ParseOptions::DEFAULT;
        Ok(ParseOptions {
            relevance_languages: match &self.relevance_languages {
                Some(s) => parse_language_selection(s)?,
                None => d.relevance_languages,
            },
            label_line_breaks_as_html: self
                .label_line_breaks_as_html
                .unwrap_or(d.label_line_breaks_as_html),
            calculate_is_prefix_as_boolean: self
                .calculate_is_prefix_as_boolean
                .unwrap_or(d.calculate_is_prefix_as_boolean),
            debug_relevance: self.debug_relevance.unwrap_or(d.debug_relevance),
        })
    }

    /// The declared input type, or else the one given by the file extension.
    pub fn input_type(&self, form: &FormFile) -> ConvertResult<InputType> {
        match (&self.input_type, form.extension().as_deref()) {
            (Some(t), _) => InputType::parse(t),
            (None, Some("json")) => Ok(InputType::Json),
            (None, _) => Ok(InputType::Xlsx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn config_file_format() {
        let config: ConversionConfig = serde_json::from_str(
            r#"{"input": "form.xlsx", "relevanceLanguages": "all", "debugRelevance": true}"#,
        )
        .unwrap();
        assert_eq!(config.input.as_deref(), Some("form.xlsx"));
        let options = config.parse_options().unwrap();
        assert_eq!(options.relevance_languages, LanguageSelection::All);
        assert!(options.debug_relevance);
        assert!(options.label_line_breaks_as_html);
    }

    #[test]
    fn arguments_override_config() {
        let args = Args::parse_from([
            "xlsform2survey",
            "--input",
            "other.xlsx",
            "--languages",
            "groups-and-questions",
            "--debug-relevance",
        ]);
        let config = ConversionConfig {
            input: Some("form.xlsx".to_string()),
            output: Some("out.json".to_string()),
            ..ConversionConfig::default()
        }
        .with_args(&args);
        assert_eq!(config.input.as_deref(), Some("other.xlsx"));
        assert_eq!(config.output.as_deref(), Some("out.json"));
        let options = config.parse_options().unwrap();
        assert_eq!(options.relevance_languages, LanguageSelection::GroupsAndQuestions);
        assert!(options.debug_relevance);
    }

    #[test]
    fn invalid_values() {
        assert!(matches!(
            InputType::parse("csv"),
            Err(ConvertError::UnknownInputType { .. })
        ));
        assert_eq!(InputType::parse("XLSX").unwrap(), InputType::Xlsx);
        assert!(parse_language_selection("some").is_err());
    }
}
