// Rendering and writing of the reports.

use log::{info, warn};
use serde::Serialize;
use snafu::prelude::*;
use text_diff::print_diff;

use std::fs;
use std::path::Path;

use legislative_tally::{BillSupport, LegislatorSupport, TallyReport};

use crate::tally::config_reader::OutputTarget;
use crate::tally::*;

pub const DEFAULT_LEGISLATORS_REPORT: &str = "legislators-support-oppose-count.csv";
pub const DEFAULT_BILLS_REPORT: &str = "bills.csv";

const LEGISLATOR_COLUMNS: [&str; 4] = ["id", "name", "num_supported_bills", "num_opposed_bills"];
const BILL_COLUMNS: [&str; 5] = [
    "id",
    "title",
    "supporter_count",
    "opposer_count",
    "primary_sponsor",
];

#[derive(Debug, Serialize)]
struct LegislatorSupportRecord<'a> {
    id: i64,
    name: &'a str,
    num_supported_bills: u64,
    num_opposed_bills: u64,
}

#[derive(Debug, Serialize)]
struct BillSupportRecord<'a> {
    id: i64,
    title: &'a str,
    supporter_count: u64,
    opposer_count: u64,
    primary_sponsor: &'a str,
}

/// A report rendered in memory, ready to be written.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RenderedReport {
    pub file_name: String,
    pub content: Vec<u8>,
}

impl RenderedReport {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.content).to_string()
    }
}

fn render_csv<S: Serialize>(name: &str, header: &[&str], records: &[S]) -> BTallyResult<RenderedReport> {
    let mut content: Vec<u8> = Vec::new();
    {
        // The header is written by hand so that empty reports still carry it.
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(&mut content);
        wtr.write_record(header).context(CsvWriteSnafu { name })?;
        for r in records.iter() {
            wtr.serialize(r).context(CsvWriteSnafu { name })?;
        }
        wtr.flush().context(CsvFlushSnafu { name })?;
    }
    Ok(RenderedReport {
        file_name: name.to_string(),
        content,
    })
}

pub fn render_legislators(name: &str, rows: &[LegislatorSupport]) -> BTallyResult<RenderedReport> {
    let records: Vec<LegislatorSupportRecord> = rows
        .iter()
        .map(|r| LegislatorSupportRecord {
            id: r.id.0,
            name: r.name.as_str(),
            num_supported_bills: r.num_supported_bills,
            num_opposed_bills: r.num_opposed_bills,
        })
        .collect();
    render_csv(name, &LEGISLATOR_COLUMNS, &records)
}

pub fn render_bills(name: &str, rows: &[BillSupport]) -> BTallyResult<RenderedReport> {
    let records: Vec<BillSupportRecord> = rows
        .iter()
        .map(|r| BillSupportRecord {
            id: r.id.0,
            title: r.title.as_str(),
            supporter_count: r.supporter_count,
            opposer_count: r.opposer_count,
            primary_sponsor: r.primary_sponsor.as_str(),
        })
        .collect();
    render_csv(name, &BILL_COLUMNS, &records)
}

pub fn render_reports(report: &TallyReport, target: &OutputTarget) -> BTallyResult<Vec<RenderedReport>> {
    Ok(vec![
        render_legislators(&target.legislators_file, &report.legislators)?,
        render_bills(&target.bills_file, &report.bills)?,
    ])
}

/// Compares the reports with the files of the same name in the reference directory.
pub fn check_reference(reports: &[RenderedReport], reference_dir: &Path) -> BTallyResult<()> {
    let mut mismatches: Vec<String> = Vec::new();
    for r in reports.iter() {
        let p = reference_dir.join(&r.file_name);
        let expected = fs::read_to_string(&p).context(OpeningReferenceSnafu {
            path: p.display().to_string(),
        })?;
        // Line endings may differ depending on the tool that wrote the reference.
        let expected = expected.replace("\r\n", "\n");
        let calculated = r.text();
        if expected != calculated {
            warn!("Found differences with the reference report {}", r.file_name);
            print_diff(expected.as_str(), calculated.as_str(), "\n");
            mismatches.push(r.file_name.clone());
        }
    }
    if let Some(name) = mismatches.first() {
        return ReferenceMismatchSnafu { name: name.as_str() }
            .fail()
            .map_err(Box::new);
    }
    Ok(())
}

pub fn write_reports(reports: &[RenderedReport], out_dir: &Path) -> BTallyResult<()> {
    fs::create_dir_all(out_dir).context(CreatingOutputDirectorySnafu {
        path: out_dir.display().to_string(),
    })?;
    for r in reports.iter() {
        let p = out_dir.join(&r.file_name);
        info!("Writing report {}", p.display());
        fs::write(&p, &r.content).context(WritingReportSnafu {
            path: p.display().to_string(),
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_reports_keep_their_header() {
        let r = render_legislators(DEFAULT_LEGISLATORS_REPORT, &[]).unwrap();
        assert_eq!(
            r.text(),
            "id,name,num_supported_bills,num_opposed_bills\n"
        );
    }

    #[test]
    fn titles_are_quoted() {
        let rows = vec![BillSupport {
            id: BillId(10),
            title: "An act, with a comma".to_string(),
            supporter_count: 3,
            opposer_count: 0,
            primary_sponsor: UNKNOWN_SPONSOR.to_string(),
        }];
        let r = render_bills(DEFAULT_BILLS_REPORT, &rows).unwrap();
        assert_eq!(
            r.text(),
            "id,title,supporter_count,opposer_count,primary_sponsor\n10,\"An act, with a comma\",3,0,Unknown\n"
        );
    }

    #[test]
    fn reference_ignores_line_endings() {
        let tmp = tempfile::tempdir().unwrap();
        let r = render_legislators("l.csv", &[]).unwrap();
        fs::write(
            tmp.path().join("l.csv"),
            "id,name,num_supported_bills,num_opposed_bills\r\n",
        )
        .unwrap();
        check_reference(&[r], tmp.path()).unwrap();
    }

    #[test]
    fn missing_reference() {
        let tmp = tempfile::tempdir().unwrap();
        let r = render_legislators("l.csv", &[]).unwrap();
        let res = check_reference(&[r], tmp.path());
        assert!(matches!(
            res.map_err(|e| *e),
            Err(TallyError::OpeningReference { .. })
        ));
    }

    #[test]
    fn write_reports_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("a").join("b");
        let r = render_bills("bills.csv", &[]).unwrap();
        write_reports(&[r.clone()], &out).unwrap();
        // A second run into the existing directory works too.
        write_reports(&[r], &out).unwrap();
        assert!(out.join("bills.csv").exists());
    }
}
