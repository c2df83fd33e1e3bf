//! Arguments and file output for the report commands.

use std::future::Future;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use super::Outcome;
use crate::client::ComteleError;
use crate::domain::{
    DeliveryStatus, DetailedReportQuery, OperationResult, ReportQuery, Timestamp, ValidationError,
};
use crate::report::{CsvRecord, to_csv};

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// API key
    #[arg(short = 'k', long = "key", env = "COMTELE_API_KEY", hide_env_values = true)]
    pub key: String,
    /// First day of the report, e.g. "2024-01-01"
    #[arg(short = 's', long = "startdate")]
    pub start_date: String,
    /// Last day of the report, inclusive, e.g. "2024-01-31"
    #[arg(short = 'e', long = "enddate")]
    pub end_date: String,
    /// Output CSV file
    #[arg(short = 'f', long = "file")]
    pub file: Option<PathBuf>,
}

/// User-facing wording and default file for one report command.
#[derive(Debug)]
pub struct ReportKind {
    pub default_file: &'static str,
    noun: &'static str,
    title: &'static str,
}

pub const REPLIES: ReportKind = ReportKind {
    default_file: "replies.csv",
    noun: "replies",
    title: "Replies",
};

pub const DETAILED: ReportKind = ReportKind {
    default_file: "report.csv",
    noun: "report",
    title: "Report",
};

#[derive(Debug)]
pub struct ReplyReportConfig {
    pub query: ReportQuery,
    pub file: PathBuf,
}

#[derive(Debug)]
pub struct DetailedReportConfig {
    pub query: DetailedReportQuery,
    pub file: PathBuf,
}

impl ReportArgs {
    fn range(&self) -> Result<ReportQuery, ValidationError> {
        ReportQuery::new(
            Timestamp::parse("start date", &self.start_date)?,
            Timestamp::parse_end_of_day("end date", &self.end_date)?,
        )
    }

    fn file_or(&self, kind: &ReportKind) -> PathBuf {
        self.file
            .clone()
            .unwrap_or_else(|| PathBuf::from(kind.default_file))
    }
}

impl TryFrom<ReportArgs> for ReplyReportConfig {
    type Error = ValidationError;

    fn try_from(args: ReportArgs) -> Result<Self, Self::Error> {
        Ok(Self {
            query: args.range()?,
            file: args.file_or(&REPLIES),
        })
    }
}

impl TryFrom<ReportArgs> for DetailedReportConfig {
    type Error = ValidationError;

    fn try_from(args: ReportArgs) -> Result<Self, Self::Error> {
        Ok(Self {
            query: DetailedReportQuery::new(args.range()?, DeliveryStatus::All),
            file: args.file_or(&DETAILED),
        })
    }
}

/// Fetch a report and write it to `file` as CSV.
///
/// The CSV is built in memory and written in one call; nothing is written when
/// the request fails or Comtele rejects it.
pub async fn save<R, F, W>(
    kind: &ReportKind,
    fetch: F,
    file: &Path,
    out: &mut W,
) -> Result<Outcome>
where
    R: CsvRecord,
    F: Future<Output = Result<OperationResult<Vec<R>>, ComteleError>>,
    W: Write,
{
    writeln!(out, "Fetching {}...", kind.noun)?;
    let records = match fetch.await?.into_result() {
        Ok((_, payload)) => payload.unwrap_or_default(),
        Err(failure) => {
            writeln!(out, "{}", failure.message)?;
            return Ok(Outcome::Rejected);
        }
    };

    writeln!(out, "Processing {}...", kind.noun)?;
    let csv = to_csv(&records);

    writeln!(out, "Saving {} to file...", kind.noun)?;
    std::fs::write(file, csv).with_context(|| format!("failed to write {}", file.display()))?;
    tracing::info!(file = %file.display(), rows = records.len(), "report saved");

    writeln!(out, "{} saved to file \"{}\".", kind.title, file.display())?;
    Ok(Outcome::Succeeded)
}
