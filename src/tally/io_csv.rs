// Primitives for reading CSV files.

use log::{debug, info};
use snafu::prelude::*;

use std::path::{Path, PathBuf};

use legislative_tally::Dataset;

use crate::tally::{
    io_common::{parse_dataset, RawTable, BILLS_TABLE, LEGISLATORS_TABLE, VOTES_TABLE, VOTE_RESULTS_TABLE},
    *,
};

/// The locations of the four CSV tables.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TableFiles {
    pub bills: PathBuf,
    pub legislators: PathBuf,
    pub votes: PathBuf,
    pub vote_results: PathBuf,
}

impl TableFiles {
    /// The conventional file names in the given directory.
    pub fn in_directory(dir: &Path) -> TableFiles {
        TableFiles {
            bills: dir.join(format!("{}.csv", BILLS_TABLE)),
            legislators: dir.join(format!("{}.csv", LEGISLATORS_TABLE)),
            votes: dir.join(format!("{}.csv", VOTES_TABLE)),
            vote_results: dir.join(format!("{}.csv", VOTE_RESULTS_TABLE)),
        }
    }
}

pub fn read_csv_table(path: &Path, table: &str) -> BTallyResult<RawTable> {
    let path_s = path.display().to_string();
    info!("Attempting to read table {} from {:?}", table, path_s);
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .context(CsvOpenSnafu { path: path_s.as_str() })?;

    let headers: Vec<String> = rdr
        .headers()
        .context(CsvLineParseSnafu { path: path_s.as_str() })?
        .iter()
        .map(|s| s.to_string())
        .collect();
    debug!("read_csv_table: {}: header: {:?}", table, headers);

    let mut rows: Vec<Vec<String>> = Vec::new();
    for line_r in rdr.into_records() {
        let line = line_r.context(CsvLineParseSnafu { path: path_s.as_str() })?;
        rows.push(line.iter().map(|s| s.to_string()).collect());
    }
    debug!("read_csv_table: {}: {} rows", table, rows.len());

    Ok(RawTable {
        name: table.to_string(),
        headers,
        rows,
    })
}

pub fn read_csv_dataset(files: &TableFiles) -> BTallyResult<Dataset> {
    let bills = read_csv_table(&files.bills, BILLS_TABLE)?;
    let legislators = read_csv_table(&files.legislators, LEGISLATORS_TABLE)?;
    let votes = read_csv_table(&files.votes, VOTES_TABLE)?;
    let vote_results = read_csv_table(&files.vote_results, VOTE_RESULTS_TABLE)?;
    parse_dataset(&bills, &legislators, &votes, &vote_results)
}
