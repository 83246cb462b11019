// Primitives shared by all the readers: raw tables and cell parsing.

use log::debug;
use snafu::prelude::*;

use std::collections::HashMap;

use legislative_tally::builder::Builder;
use legislative_tally::*;

use crate::tally::*;

pub const BILLS_TABLE: &str = "bills";
pub const LEGISLATORS_TABLE: &str = "legislators";
pub const VOTES_TABLE: &str = "votes";
pub const VOTE_RESULTS_TABLE: &str = "vote_results";

/// A table as read from a file, before any interpretation of the cells.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RawTable {
    pub name: String,
    /// Column names, from the first row.
    pub headers: Vec<String>,
    /// The other rows. The first one is at line 2.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Finds the position of each of the requested columns.
    pub fn column_indexes(&self, req_col_names: &[&str]) -> BTallyResult<Vec<usize>> {
        let col_names: HashMap<&str, usize> = self
            .headers
            .iter()
            .enumerate()
            .map(|(idx, s)| (s.trim(), idx))
            .rev()
            .collect();
        debug!("column_indexes: {}: col_names: {:?}", self.name, col_names);

        let mut res: Vec<usize> = Vec::new();
        for cname in req_col_names {
            let idx = col_names.get(cname).context(MissingColumnSnafu {
                table: self.name.as_str(),
                column: *cname,
            })?;
            res.push(*idx);
        }
        Ok(res)
    }

    /// Iterates over the rows, with their line numbers, restricted to the requested columns.
    fn select<'a>(
        &'a self,
        req_col_names: &[&str],
    ) -> BTallyResult<impl Iterator<Item = TallyResult<(usize, Vec<&'a str>)>> + 'a> {
        let indexes = self.column_indexes(req_col_names)?;
        let name = self.name.as_str();
        Ok(self.rows.iter().enumerate().map(move |(idx, row)| {
            let lineno = idx + 2;
            let mut cells: Vec<&'a str> = Vec::new();
            for col_idx in indexes.iter() {
                let cell = row
                    .get(*col_idx)
                    .context(LineTooShortSnafu { table: name, lineno })?;
                cells.push(cell.trim());
            }
            Ok((lineno, cells))
        }))
    }
}

/// Reads an integer cell.
///
/// Integer-valued decimals like `12.0` are accepted: this is how nullable
/// integer columns get exported by spreadsheets and dataframes.
pub fn parse_int(table: &str, lineno: usize, column: &str, content: &str) -> TallyResult<i64> {
    let s = content.trim();
    if let Ok(x) = s.parse::<i64>() {
        return Ok(x);
    }
    match s.parse::<f64>() {
        // `i64::MAX as f64` rounds up to 2^63, which is out of range.
        Ok(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => Ok(f as i64),
        _ => InvalidCellSnafu {
            table,
            lineno,
            column,
            content,
        }
        .fail(),
    }
}

/// Reads an integer cell that may be empty.
pub fn parse_optional_int(
    table: &str,
    lineno: usize,
    column: &str,
    content: &str,
) -> TallyResult<Option<i64>> {
    let s = content.trim();
    if s.is_empty() || ["nan", "null", "none"].contains(&s.to_lowercase().as_str()) {
        Ok(None)
    } else {
        parse_int(table, lineno, column, s).map(Some)
    }
}

pub fn read_bills(table: &RawTable, builder: &mut Builder) -> BTallyResult<()> {
    let name = table.name.as_str();
    for row in table.select(&["id", "title", "sponsor_id"])? {
        let (lineno, cells) = row?;
        let sponsor_id = parse_optional_int(name, lineno, "sponsor_id", cells[2])?;
        builder.add_bill(&Bill {
            id: BillId(parse_int(name, lineno, "id", cells[0])?),
            title: cells[1].to_string(),
            sponsor_id: sponsor_id.map(LegislatorId),
        });
    }
    Ok(())
}

pub fn read_legislators(table: &RawTable, builder: &mut Builder) -> BTallyResult<()> {
    let name = table.name.as_str();
    for row in table.select(&["id", "name"])? {
        let (lineno, cells) = row?;
        builder.add_legislator(&Legislator {
            id: LegislatorId(parse_int(name, lineno, "id", cells[0])?),
            name: cells[1].to_string(),
        });
    }
    Ok(())
}

pub fn read_votes(table: &RawTable, builder: &mut Builder) -> BTallyResult<()> {
    let name = table.name.as_str();
    for row in table.select(&["id", "bill_id"])? {
        let (lineno, cells) = row?;
        builder.add_vote(&Vote {
            id: VoteId(parse_int(name, lineno, "id", cells[0])?),
            bill_id: BillId(parse_int(name, lineno, "bill_id", cells[1])?),
        });
    }
    Ok(())
}

pub fn read_vote_results(table: &RawTable, builder: &mut Builder) -> BTallyResult<()> {
    let name = table.name.as_str();
    for row in table.select(&["id", "legislator_id", "vote_id", "vote_type"])? {
        let (lineno, cells) = row?;
        let vote_type = parse_int(name, lineno, "vote_type", cells[3])?;
        builder.add_vote_result(&VoteResult {
            id: parse_int(name, lineno, "id", cells[0])?,
            legislator_id: LegislatorId(parse_int(name, lineno, "legislator_id", cells[1])?),
            vote_id: VoteId(parse_int(name, lineno, "vote_id", cells[2])?),
            vote_type: VoteType::from(vote_type),
        });
    }
    Ok(())
}

/// Interprets the four raw tables.
pub fn parse_dataset(
    bills: &RawTable,
    legislators: &RawTable,
    votes: &RawTable,
    vote_results: &RawTable,
) -> BTallyResult<Dataset> {
    let mut builder = Builder::new();
    read_bills(bills, &mut builder)?;
    read_legislators(legislators, &mut builder)?;
    read_votes(votes, &mut builder)?;
    read_vote_results(vote_results, &mut builder)?;
    Ok(builder.build())
}
