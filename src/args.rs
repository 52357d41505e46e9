use clap::Parser;

/// Converts XLSForm spreadsheets into survey documents.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file with the conversion settings. Settings passed on the
    /// command line take precedence. Relative paths in this file are relative to its directory.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) A survey document in JSON format. If provided, the converted survey is
    /// checked against it.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) Where the survey is written in JSON format.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) The form to convert.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (xlsx or json, default from the file extension) The type of the input. 'json' is a
    /// workbook already decoded into worksheets and rows.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (in-common, groups-and-questions or all) The languages in which the relevance
    /// expressions are translated. By default, the languages shared by the survey and
    /// choices labels.
    #[clap(long, value_parser)]
    pub languages: Option<String>,

    /// If passed as an argument, logs every intermediate step of the relevance translations.
    #[clap(long, takes_value = false)]
    pub debug_relevance: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
