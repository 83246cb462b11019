use calamine::{open_workbook, DataType, Range, Reader, Xlsx};
use log::{debug, info};
use snafu::prelude::*;

use std::path::PathBuf;

use legislative_tally::Dataset;

use crate::tally::{
    io_common::{parse_dataset, RawTable, BILLS_TABLE, LEGISLATORS_TABLE, VOTES_TABLE, VOTE_RESULTS_TABLE},
    *,
};

/// The names of the worksheets holding each table.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct WorksheetNames {
    pub bills: String,
    pub legislators: String,
    pub votes: String,
    pub vote_results: String,
}

impl Default for WorksheetNames {
    fn default() -> WorksheetNames {
        WorksheetNames {
            bills: BILLS_TABLE.to_string(),
            legislators: LEGISLATORS_TABLE.to_string(),
            votes: VOTES_TABLE.to_string(),
            vote_results: VOTE_RESULTS_TABLE.to_string(),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct WorkbookSource {
    pub path: PathBuf,
    pub worksheets: WorksheetNames,
}

pub fn read_excel_dataset(source: &WorkbookSource) -> BTallyResult<Dataset> {
    let path = source.path.display().to_string();
    info!("Attempting to read workbook {:?}", path);
    let mut workbook: Xlsx<_> =
        open_workbook(&source.path).context(OpeningExcelSnafu { path: path.as_str() })?;

    let mut read_sheet = |worksheet: &str, table: &str| -> BTallyResult<RawTable> {
        debug!("read_excel_dataset: table {} from worksheet {:?}", table, worksheet);
        let wrange = found_worksheet(workbook.worksheet_range(worksheet), worksheet, &path)?;
        range_to_table(table, &wrange)
    };

    let ws = &source.worksheets;
    let bills = read_sheet(ws.bills.as_str(), BILLS_TABLE)?;
    let legislators = read_sheet(ws.legislators.as_str(), LEGISLATORS_TABLE)?;
    let votes = read_sheet(ws.votes.as_str(), VOTES_TABLE)?;
    let vote_results = read_sheet(ws.vote_results.as_str(), VOTE_RESULTS_TABLE)?;
    parse_dataset(&bills, &legislators, &votes, &vote_results)
}

fn found_worksheet(
    lookup: Option<Result<Range<DataType>, calamine::XlsxError>>,
    worksheet: &str,
    path: &str,
) -> BTallyResult<Range<DataType>> {
    let wrange = lookup
        .context(MissingWorksheetSnafu { worksheet, path })?
        .context(OpeningExcelSnafu { path })?;
    Ok(wrange)
}

/// Converts a worksheet into a raw table. The first row is the header.
pub fn range_to_table(table: &str, wrange: &Range<DataType>) -> BTallyResult<RawTable> {
    let mut iter = wrange.rows();
    let header = iter.next().context(EmptyTableSnafu { table })?;
    let headers: Vec<String> = header.iter().map(read_cell).collect();
    debug!("range_to_table: {}: header: {:?}", table, headers);

    let mut rows: Vec<Vec<String>> = Vec::new();
    for row in iter {
        let cells: Vec<String> = row.iter().map(read_cell).collect();
        // Worksheets often carry trailing formatted but empty rows.
        if cells.iter().all(|c| c.is_empty()) {
            continue;
        }
        rows.push(cells);
    }
    Ok(RawTable {
        name: table.to_string(),
        headers,
        rows,
    })
}

/// Renders a cell as text. Cells that are not text or numbers are kept in
/// their debug form: they are only rejected if a required integer column
/// contains them.
fn read_cell(cell: &DataType) -> String {
    match cell {
        DataType::String(s) => s.trim().to_string(),
        DataType::Int(i) => i.to_string(),
        DataType::Float(f) => f.to_string(),
        DataType::Bool(b) => b.to_string(),
        DataType::Empty => "".to_string(),
        other => format!("{:?}", other),
    }
}
