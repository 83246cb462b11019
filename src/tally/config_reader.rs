use log::{debug, info};

use serde::{Deserialize, Serialize};
use snafu::prelude::*;

use std::fs;
use std::path::{Path, PathBuf};

use legislative_tally::Dataset;

use crate::args::Args;
use crate::tally::io_csv::{read_csv_dataset, TableFiles};
use crate::tally::io_excel::{read_excel_dataset, WorkbookSource, WorksheetNames};
use crate::tally::io_output::{DEFAULT_BILLS_REPORT, DEFAULT_LEGISLATORS_REPORT};
use crate::tally::*;

pub const DEFAULT_DATA_DIRECTORY: &str = "data";
pub const DEFAULT_OUTPUT_DIRECTORY: &str = "output";
pub const DEFAULT_WORKBOOK: &str = "data.xlsx";

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputSettings {
    pub provider: Option<String>,
    #[serde(rename = "dataDirectory")]
    pub data_directory: Option<String>,
    #[serde(rename = "billsFile")]
    pub bills_file: Option<String>,
    #[serde(rename = "legislatorsFile")]
    pub legislators_file: Option<String>,
    #[serde(rename = "votesFile")]
    pub votes_file: Option<String>,
    #[serde(rename = "voteResultsFile")]
    pub vote_results_file: Option<String>,
    // Options for the xlsx provider
    #[serde(rename = "workbookPath")]
    pub workbook_path: Option<String>,
    #[serde(rename = "billsWorksheet")]
    pub bills_worksheet: Option<String>,
    #[serde(rename = "legislatorsWorksheet")]
    pub legislators_worksheet: Option<String>,
    #[serde(rename = "votesWorksheet")]
    pub votes_worksheet: Option<String>,
    #[serde(rename = "voteResultsWorksheet")]
    pub vote_results_worksheet: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
    #[serde(rename = "legislatorsFile")]
    pub legislators_file: Option<String>,
    #[serde(rename = "billsFile")]
    pub bills_file: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct TallyConfig {
    #[serde(rename = "inputSettings", default)]
    pub input_settings: InputSettings,
    #[serde(rename = "outputSettings", default)]
    pub output_settings: OutputSettings,
}

/// Where the four tables are read from.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum InputSource {
    Csv(TableFiles),
    Excel(WorkbookSource),
}

impl InputSource {
    pub fn read_dataset(&self) -> BTallyResult<Dataset> {
        match self {
            InputSource::Csv(files) => read_csv_dataset(files),
            InputSource::Excel(wb) => read_excel_dataset(wb),
        }
    }

    pub fn ignores_table_overrides(&self) -> bool {
        matches!(self, InputSource::Excel(_))
    }
}

/// Where the two reports are written.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct OutputTarget {
    pub directory: PathBuf,
    pub legislators_file: String,
    pub bills_file: String,
}

impl OutputTarget {
    pub fn in_directory(dir: &Path) -> OutputTarget {
        OutputTarget {
            directory: dir.to_path_buf(),
            legislators_file: DEFAULT_LEGISLATORS_REPORT.to_string(),
            bills_file: DEFAULT_BILLS_REPORT.to_string(),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RunSettings {
    pub input: InputSource,
    pub output: OutputTarget,
    pub reference: Option<PathBuf>,
}

pub fn read_config(path: &str) -> BTallyResult<TallyConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read_config: content: {:?}", contents);
    let config: TallyConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    Ok(config)
}

/// Combines the configuration file (if any) with the command line.
///
/// Command line paths are taken as given. Paths of the configuration file
/// are relative to the directory of that file.
pub fn resolve_settings(args: &Args) -> BTallyResult<RunSettings> {
    let (config, root) = match &args.config {
        Some(config_path) => {
            let config = read_config(config_path)?;
            info!("resolve_settings: config: {:?}", config);
            let root = Path::new(config_path)
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_default();
            (config, root)
        }
        None => (TallyConfig::default(), PathBuf::new()),
    };
    let ins = &config.input_settings;
    let outs = &config.output_settings;
    let from_config = |s: &Option<String>| s.as_ref().map(|p| root.join(p));

    let provider = args
        .input_type
        .clone()
        .or_else(|| ins.provider.clone())
        .unwrap_or_else(|| "csv".to_string());

    let input = match provider.as_str() {
        "csv" => {
            let data_dir = args
                .input
                .as_ref()
                .map(PathBuf::from)
                .or_else(|| from_config(&ins.data_directory))
                .unwrap_or_else(|| root.join(DEFAULT_DATA_DIRECTORY));
            let defaults = TableFiles::in_directory(&data_dir);
            // The command line takes precedence, then the file names of the
            // config, then the default names.
            let pick = |arg: &Option<String>, conf: &Option<String>, default: PathBuf| {
                arg.as_ref()
                    .map(PathBuf::from)
                    .or_else(|| conf.as_ref().map(|f| data_dir.join(f)))
                    .unwrap_or(default)
            };
            InputSource::Csv(TableFiles {
                bills: pick(&args.bills, &ins.bills_file, defaults.bills),
                legislators: pick(
                    &args.legislators,
                    &ins.legislators_file,
                    defaults.legislators,
                ),
                votes: pick(&args.votes, &ins.votes_file, defaults.votes),
                vote_results: pick(
                    &args.vote_results,
                    &ins.vote_results_file,
                    defaults.vote_results,
                ),
            })
        }
        "xlsx" => {
            let workbook = args
                .input
                .as_ref()
                .map(PathBuf::from)
                .or_else(|| from_config(&ins.workbook_path))
                .unwrap_or_else(|| root.join(DEFAULT_WORKBOOK));
            let defaults = WorksheetNames::default();
            InputSource::Excel(WorkbookSource {
                path: workbook,
                worksheets: WorksheetNames {
                    bills: ins.bills_worksheet.clone().unwrap_or(defaults.bills),
                    legislators: ins
                        .legislators_worksheet
                        .clone()
                        .unwrap_or(defaults.legislators),
                    votes: ins.votes_worksheet.clone().unwrap_or(defaults.votes),
                    vote_results: ins
                        .vote_results_worksheet
                        .clone()
                        .unwrap_or(defaults.vote_results),
                },
            })
        }
        x => {
            return UnknownInputTypeSnafu { input_type: x }
                .fail()
                .map_err(Box::new);
        }
    };

    let directory = args
        .out
        .as_ref()
        .map(PathBuf::from)
        .or_else(|| from_config(&outs.output_directory))
        .unwrap_or_else(|| root.join(DEFAULT_OUTPUT_DIRECTORY));
    let output = OutputTarget {
        directory,
        legislators_file: outs
            .legislators_file
            .clone()
            .unwrap_or_else(|| DEFAULT_LEGISLATORS_REPORT.to_string()),
        bills_file: outs
            .bills_file
            .clone()
            .unwrap_or_else(|| DEFAULT_BILLS_REPORT.to_string()),
    };

    Ok(RunSettings {
        input,
        output,
        reference: args.reference.as_ref().map(PathBuf::from),
    })
}
