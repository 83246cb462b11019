use log::{debug, info, warn};

use legislative_tally::*;
use snafu::Snafu;

use std::path::PathBuf;

use crate::args::Args;
use crate::tally::config_reader::*;
use crate::tally::io_output::*;

pub mod config_reader;
pub mod io_common;
pub mod io_csv;
pub mod io_excel;
pub mod io_output;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum TallyError {
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading CSV file {path}"))]
    CsvLineParse { source: csv::Error, path: String },
    #[snafu(display("Error opening Excel workbook {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Cannot find worksheet {worksheet} in {path}"))]
    MissingWorksheet { worksheet: String, path: String },
    #[snafu(display("Table {table} has no header row"))]
    EmptyTable { table: String },
    #[snafu(display("Table {table}: missing column {column}"))]
    MissingColumn { table: String, column: String },
    #[snafu(display("Table {table}: line {lineno} is too short"))]
    LineTooShort { table: String, lineno: usize },
    #[snafu(display("Table {table}: line {lineno}: cannot read {column} from {content:?}"))]
    InvalidCell {
        table: String,
        lineno: usize,
        column: String,
        content: String,
    },
    #[snafu(display("Error opening JSON file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON file {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Input type {input_type} is not supported (expected csv or xlsx)"))]
    UnknownInputType { input_type: String },
    #[snafu(display("Error rendering report {name}"))]
    CsvWrite { source: csv::Error, name: String },
    #[snafu(display("Error rendering report {name}"))]
    CsvFlush {
        source: std::io::Error,
        name: String,
    },
    #[snafu(display("Error opening reference report {path}"))]
    OpeningReference {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Difference detected between report {name} and the reference report"))]
    ReferenceMismatch { name: String },
    #[snafu(display("Error creating output directory {path}"))]
    CreatingOutputDirectory {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error writing report {path}"))]
    WritingReport {
        source: std::io::Error,
        path: String,
    },
}

pub type TallyResult<T> = Result<T, TallyError>;
pub type BTallyResult<T> = Result<T, Box<TallyError>>;

/// Reads the tables, computes both reports and writes them.
///
/// Returns the directory in which the reports were written. Nothing is
/// written if any step fails.
pub fn run_tally_files(settings: &RunSettings) -> BTallyResult<PathBuf> {
    info!("run_tally_files: settings: {:?}", settings);
    let dataset = settings.input.read_dataset()?;
    debug!(
        "run_tally_files: read {} bills, {} legislators, {} votes, {} vote results",
        dataset.bills.len(),
        dataset.legislators.len(),
        dataset.votes.len(),
        dataset.vote_results.len()
    );

    let report = run_tally(&dataset);
    let rendered = render_reports(&report, &settings.output)?;

    // The reference reports, if provided for comparison
    if let Some(reference_dir) = &settings.reference {
        info!(
            "run_tally_files: checking reports against {}",
            reference_dir.display()
        );
        check_reference(&rendered, reference_dir)?;
    }

    write_reports(&rendered, &settings.output.directory)?;
    Ok(settings.output.directory.clone())
}

pub fn run_tally_cli(args: &Args) -> BTallyResult<()> {
    let settings = resolve_settings(args)?;
    if settings.input.ignores_table_overrides() && has_table_overrides(args) {
        warn!("The per-table path options are ignored for the xlsx input type");
    }
    let out_dir = run_tally_files(&settings)?;
    println!("Output generated in {}", out_dir.display());
    Ok(())
}

fn has_table_overrides(args: &Args) -> bool {
    args.bills.is_some()
        || args.legislators.is_some()
        || args.votes.is_some()
        || args.vote_results.is_some()
}
