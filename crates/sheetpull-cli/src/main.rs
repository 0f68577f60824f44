//! sheetpull CLI - pull typed records out of a shared spreadsheet link

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use sheetpull::prelude::*;
use sheetpull::{create_link, parse_link, validate, Backoff};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Longest pause between retries when `--backoff-ms` is set
const MAX_BACKOFF: Duration = Duration::from_secs(30);

#[derive(Parser)]
#[command(name = "sheetpull")]
#[command(
    author,
    version,
    about = "Extract typed records from publicly shared spreadsheets"
)]
struct Cli {
    /// More log output on stderr (-v info, -vv debug, -vvv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download a spreadsheet and print its records
    Fetch {
        /// Spreadsheet link
        link: String,

        /// Comma-separated sheet names (default: all sheets)
        #[arg(short, long)]
        sheets: Option<String>,

        /// Keep records from this 1-based row on
        #[arg(long)]
        start_from_row: Option<i64>,

        /// Per-attempt timeout in seconds
        #[arg(long, env = "SHEETPULL_TIMEOUT_SECS", default_value = "30")]
        timeout_secs: u64,

        /// Number of download attempts
        #[arg(long, env = "SHEETPULL_RETRIES", default_value = "3")]
        retries: u32,

        /// Base delay for exponential backoff between attempts (default: retry immediately)
        #[arg(long)]
        backoff_ms: Option<u64>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: Format,

        /// Report download progress on stderr
        #[arg(long)]
        progress: bool,
    },

    /// List the sheet names of a spreadsheet
    Sheets {
        /// Spreadsheet link
        link: String,
    },

    /// Check whether a link carries a spreadsheet identifier
    Validate {
        /// Spreadsheet link
        link: String,
    },

    /// Print the identifier and gid of a link as JSON
    ParseLink {
        /// Spreadsheet link
        link: String,
    },

    /// Build the canonical link for an identifier
    Link {
        /// Spreadsheet identifier
        identifier: String,

        /// Sub-sheet reference
        #[arg(long)]
        gid: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// The full fetch result as pretty JSON
    Json,
    /// The records of a single sheet as CSV
    Csv,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Fetch {
            link,
            sheets,
            start_from_row,
            timeout_secs,
            retries,
            backoff_ms,
            output,
            format,
            progress,
        } => {
            let mut options = FetchOptions::new(link)
                .with_timeout(Duration::from_secs(timeout_secs))
                .with_retries(retries)
                .with_backoff(backoff(backoff_ms));
            if let Some(sheets) = sheets {
                options = options.with_sheet_list(&sheets);
            }
            fetch(&options, start_from_row, output.as_deref(), format, progress).await
        }
        Commands::Sheets { link } => list_sheets(&link).await,
        Commands::Validate { link } => {
            let valid = validate(&link);
            println!("{}", if valid { "valid" } else { "invalid" });
            Ok(exit_code(valid))
        }
        Commands::ParseLink { link } => {
            let parsed = serde_json::to_string_pretty(&parse_link(&link))?;
            println!("{}", parsed);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Link { identifier, gid } => {
            println!("{}", create_link(&identifier, gid.as_deref()));
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn backoff(backoff_ms: Option<u64>) -> Backoff {
    match backoff_ms {
        Some(ms) if ms > 0 => Backoff::Exponential {
            base: Duration::from_millis(ms),
            max: MAX_BACKOFF,
        },
        _ => Backoff::None,
    }
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn fetch(
    options: &FetchOptions,
    start_from_row: Option<i64>,
    output: Option<&Path>,
    format: Format,
    show_progress: bool,
) -> Result<ExitCode> {
    let fetcher = SheetFetcher::new().context("Failed to create HTTP client")?;

    let report = |p: DownloadProgress| {
        if p.total > 0 {
            eprint!("\rDownloaded {} of {} bytes ({}%)", p.loaded, p.total, p.percent);
        } else {
            eprint!("\rDownloaded {} bytes", p.loaded);
        }
    };
    let progress: &dyn ProgressListener = if show_progress { &report } else { &NoProgress };

    let result = match start_from_row {
        Some(start) => fetcher.fetch_from_row(options, start, progress).await,
        None => fetcher.fetch_with_progress(options, progress).await,
    };
    if show_progress {
        eprintln!();
    }

    if !result.is_success() {
        eprintln!("Error: {}", result.error().unwrap_or("fetch failed"));
        if format == Format::Json {
            emit(output, serde_json::to_vec_pretty(&result)?)?;
        }
        return Ok(ExitCode::FAILURE);
    }

    let body = match format {
        Format::Json => serde_json::to_vec_pretty(&result)?,
        Format::Csv => {
            let (name, records) = single_sheet(&result)?;
            tracing::info!(sheet = %name, records = records.len(), "writing CSV");
            records_to_csv(records)?
        }
    };
    emit(output, body)?;

    if let Some(path) = output {
        eprintln!(
            "Wrote {} records from {} sheet(s) to '{}'",
            result.record_count(),
            result.total_sheets(),
            path.display()
        );
    }

    Ok(ExitCode::SUCCESS)
}

fn single_sheet(result: &FetchResult) -> Result<(&str, &[Record])> {
    let mut sheets = result.data().iter();
    match (sheets.next(), sheets.next()) {
        (Some((name, records)), None) => Ok((name.as_str(), records.as_slice())),
        (None, _) => bail!("No sheets to write"),
        (Some(_), Some(_)) => bail!(
            "CSV output holds a single sheet, but the result has {}; pick one with --sheets",
            result.total_sheets()
        ),
    }
}

/// Render records as CSV, using the first record's keys as the header
fn records_to_csv(records: &[Record]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    if let Some(first) = records.first() {
        writer.write_record(first.keys())?;
        for record in records {
            writer.write_record(record.values().map(|value| value.to_string()))?;
        }
    }

    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV: {}", e.error()))
}

fn emit(output: Option<&Path>, mut body: Vec<u8>) -> Result<()> {
    if !body.ends_with(b"\n") {
        body.push(b'\n');
    }

    if let Some(path) = output {
        std::fs::write(path, &body)
            .with_context(|| format!("Failed to write '{}'", path.display()))
    } else {
        io::stdout()
            .write_all(&body)
            .context("Failed to write to stdout")
    }
}

async fn list_sheets(link: &str) -> Result<ExitCode> {
    let fetcher = SheetFetcher::new().context("Failed to create HTTP client")?;
    let names = fetcher
        .list_sheet_names(link)
        .await
        .with_context(|| format!("Failed to list sheets of '{}'", link))?;

    for (i, name) in names.iter().enumerate() {
        println!("{}\t{}", i, name);
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(fields: &[(&str, FieldValue)]) -> Record {
        fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_fetch_flags() {
        let cli = Cli::try_parse_from([
            "sheetpull",
            "fetch",
            "https://docs.google.com/spreadsheets/d/ABC123",
            "--sheets",
            "a,b",
            "--start-from-row",
            "2",
            "--retries",
            "5",
            "--format",
            "csv",
        ])
        .unwrap();

        match cli.command {
            Commands::Fetch {
                sheets,
                start_from_row,
                retries,
                format,
                ..
            } => {
                assert_eq!(sheets.as_deref(), Some("a,b"));
                assert_eq!(start_from_row, Some(2));
                assert_eq!(retries, 5);
                assert_eq!(format, Format::Csv);
            }
            _ => panic!("expected fetch"),
        }
    }

    #[test]
    fn test_backoff_flag() {
        assert_eq!(backoff(None), Backoff::None);
        assert_eq!(backoff(Some(0)), Backoff::None);
        assert_eq!(
            backoff(Some(250)),
            Backoff::Exponential {
                base: Duration::from_millis(250),
                max: MAX_BACKOFF,
            }
        );
    }

    #[test]
    fn test_records_to_csv() {
        let records = vec![
            record(&[
                ("id", FieldValue::Integer(1)),
                ("name", FieldValue::String("Widget, large".into())),
                ("price", FieldValue::Float(9.5)),
            ]),
            record(&[
                ("id", FieldValue::Integer(2)),
                ("name", FieldValue::String("Gadget".into())),
                ("price", FieldValue::Null),
            ]),
        ];

        let csv = String::from_utf8(records_to_csv(&records).unwrap()).unwrap();
        assert_eq!(csv, "id,name,price\n1,\"Widget, large\",9.5\n2,Gadget,\n");
    }

    #[test]
    fn test_records_to_csv_empty() {
        assert!(records_to_csv(&[]).unwrap().is_empty());
    }
}
