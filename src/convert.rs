use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};
use xlsform_survey::*;

use std::fs;
use std::time::Instant;

use serde_json::Value as JSValue;
use text_diff::print_diff;

mod config_reader;
mod io_common;
mod io_json;
mod io_xlsx;

use crate::args::Args;
pub use config_reader::*;
use io_common::FormFile;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ConvertError {
    #[snafu(display("Error reading file {path}"))]
    ReadingFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error writing file {path}"))]
    WritingFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error opening spreadsheet {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Error parsing JSON file {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error serializing the survey"))]
    WritingJson { source: serde_json::Error },
    #[snafu(display("The form {file_name} could not be converted: {source}"))]
    ConvertingForm {
        source: SheetsError,
        file_name: String,
    },
    #[snafu(display("No input file was provided"))]
    MissingInput {},
    #[snafu(display("Unknown input type {input_type}"))]
    UnknownInputType { input_type: String },
    #[snafu(display("Unknown language selection {selection}"))]
    UnknownLanguageSelection { selection: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type ConvertResult<T> = Result<T, ConvertError>;

fn read_reference(path: &str) -> ConvertResult<JSValue> {
    let contents = fs::read_to_string(path).context(ReadingFileSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    Ok(js)
}

fn write_output(output: Option<&str>, contents: &str) -> ConvertResult<()> {
    match output {
        None | Some("stdout") => {
            println!("{}", contents);
        }
        Some(path) => {
            info!("Writing survey to {:?}", path);
            fs::write(path, contents).context(WritingFileSnafu { path })?;
        }
    }
    Ok(())
}

/// Runs a conversion with the settings from the command line, and from the
/// configuration file if any.
pub fn run_conversion_args(args: &Args) -> ConvertResult<()> {
    let config = match &args.config {
        Some(path) => read_config(path)?,
        None => ConversionConfig::default(),
    };
    let config = config.with_args(args);
    run_conversion(&config)?;
    Ok(())
}

pub fn run_conversion(config: &ConversionConfig) -> ConvertResult<Survey> {
    info!("config: {:?}", config);
    let input = config.input.clone().context(MissingInputSnafu {})?;
    let options = config.parse_options()?;

    let form = FormFile::read(&input)?;
    info!(
        "Read form {:?}: {} bytes, sha256: {}",
        form.file_name,
        form.bytes.len(),
        form.checksum()
    );
    let input_type = config.input_type(&form)?;
    debug!("run_conversion: input type: {:?}", input_type);
    let workbook = match input_type {
        InputType::Xlsx => io_xlsx::read_workbook(&form)?,
        InputType::Json => io_json::read_workbook(&form)?,
    };

    let start = Instant::now();
    let survey = parse_survey(&workbook, &options).context(ConvertingFormSnafu {
        file_name: form.file_name.clone(),
    })?;
    info!(
        "Converted {:?} in {:?}: {} questions",
        form.name_without_extension(),
        start.elapsed(),
        survey.questions().len()
    );
    if let Some(w) = &survey.warnings {
        warn!(
            "The form has {} general and {} specific warnings",
            w.general.as_ref().map(|x| x.len()).unwrap_or(0),
            w.specific.as_ref().map(|x| x.len()).unwrap_or(0)
        );
    }

    // Going through a JSON value gives the same key order as the reference.
    let survey_js = serde_json::to_value(&survey).context(WritingJsonSnafu {})?;
    let pretty_js_survey = serde_json::to_string_pretty(&survey_js).context(WritingJsonSnafu {})?;
    write_output(config.output.as_deref(), &pretty_js_survey)?;

    // The reference survey, if provided for comparison
    if let Some(reference_p) = &config.reference {
        let survey_ref = read_reference(reference_p)?;
        let pretty_js_survey_ref =
            serde_json::to_string_pretty(&survey_ref).context(WritingJsonSnafu {})?;
        if pretty_js_survey_ref != pretty_js_survey {
            warn!("Found differences with the reference survey");
            print_diff(
                pretty_js_survey_ref.as_str(),
                pretty_js_survey.as_ref(),
                "\n",
            );
            whatever!("Difference detected between converted survey and reference survey")
        }
    }

    Ok(survey)
}

#[cfg(test)]
fn run_conversion_test(test_name: &str, workbook_lpath: &str, survey_lpath: &str) -> ConvertResult<Survey> {
    let test_dir = option_env!("XLSFORM_TEST_DIR")
        .unwrap_or(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data"));
    info!("Running test {}", test_name);
    let config = ConversionConfig {
        input: Some(format!("{}/{}/{}", test_dir, test_name, workbook_lpath)),
        output: Some(format!(
            "{}/xlsform2survey_{}.json",
            std::env::temp_dir().display(),
            test_name
        )),
        reference: Some(format!("{}/{}/{}", test_dir, test_name, survey_lpath)),
        ..ConversionConfig::default()
    };
    let res = run_conversion(&config);
    if let Err(e) = &res {
        warn!("Error occured {:?}", e);
        eprintln!("An error occured {}", e);
    }
    res
}

#[cfg(test)]
pub fn test_wrapper(test_name: &str) -> ConvertResult<Survey> {
    run_conversion_test(
        test_name,
        format!("{}_workbook.json", test_name).as_str(),
        format!("{}_expected_survey.json", test_name).as_str(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn census() {
        init();
        let survey = test_wrapper("census").unwrap();
        assert_eq!(survey.form_title.as_deref(), Some("Census"));
    }

    #[test]
    fn household_warnings() {
        init();
        let survey = test_wrapper("household_warnings").unwrap();
        assert!(survey.warnings.is_some());
    }

    #[test]
    fn reference_mismatch() {
        init();
        let res = run_conversion_test(
            "census",
            "census_workbook.json",
            "../household_warnings/household_warnings_expected_survey.json",
        );
        assert!(matches!(res, Err(ConvertError::Whatever { .. })));
    }

    #[test]
    fn missing_input() {
        init();
        let res = run_conversion(&ConversionConfig::default());
        assert!(matches!(res, Err(ConvertError::MissingInput {})));
        let config = ConversionConfig {
            input: Some("/nonexistent/form.xlsx".to_string()),
            ..ConversionConfig::default()
        };
        assert!(matches!(
            run_conversion(&config),
            Err(ConvertError::ReadingFile { .. })
        ));
    }
}
