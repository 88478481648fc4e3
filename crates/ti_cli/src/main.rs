//! Tactical Intelligence CLI
//!
//! `ti analyze` reports on one snapshot file, `ti serve` answers
//! JSON-lines worker messages on stdin, `ti schema` prints the report
//! JSON Schema.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use ti_core::api::encode_response;
use ti_core::{
    report_schema, AsyncComputeHost, IntelConfig, IntelError, ReportAggregator, RequestId,
    Snapshot, WorkerRequest, WorkerResponse,
};

#[derive(Parser)]
#[command(name = "ti")]
#[command(about = "Tactical intelligence reports from round telemetry", long_about = None)]
#[command(version = ti_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a JSON array of player samples
    Analyze {
        /// Input snapshot JSON file
        #[arg(long)]
        r#in: PathBuf,

        /// Threshold config (YAML or JSON); falls back to TI_CONFIG_PATH
        #[arg(long)]
        config: Option<PathBuf>,

        /// Pretty-print the result
        #[arg(long, default_value = "false")]
        pretty: bool,
    },

    /// Answer ANALYZE_TACTICAL_DATA messages, one JSON object per line
    Serve {
        /// Threshold config (YAML or JSON); falls back to TI_CONFIG_PATH
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the JSON Schema of the analysis result
    Schema,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            r#in,
            config,
            pretty,
        } => analyze(&r#in, load_config(config.as_deref())?, pretty),
        Commands::Serve { config } => serve(load_config(config.as_deref())?),
        Commands::Schema => {
            println!("{}", serde_json::to_string_pretty(&report_schema())?);
            Ok(())
        }
    }
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ti_core=info,ti=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<IntelConfig> {
    match path {
        Some(path) => IntelConfig::from_path(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(IntelConfig::from_env_or_default()),
    }
}

fn analyze(input: &Path, config: IntelConfig, pretty: bool) -> Result<()> {
    let text = fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let samples: Snapshot = serde_json::from_str(&text)
        .with_context(|| format!("{} is not a sample array", input.display()))?;

    config.check()?;
    let result = ReportAggregator::new(config).analyze(&samples)?;
    info!(
        samples = result.data_points,
        ms = result.processing_time_ms,
        advantage = result.report.tactical_advantage.advantage.label(),
        "analysis complete"
    );

    let out = if pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{}", out);
    Ok(())
}

fn serve(config: IntelConfig) -> Result<()> {
    let mut host = AsyncComputeHost::spawn(config)?;
    let replies = serve_lines(&mut host, io::stdin().lock(), io::stdout().lock())?;
    info!(replies, "input closed, worker shutting down");
    Ok(())
}

/// Answer every message line from `input` on `output`, one reply per
/// non-blank line. Returns the number of replies written.
fn serve_lines<R: BufRead, W: Write>(
    host: &mut AsyncComputeHost,
    input: R,
    mut output: W,
) -> Result<usize> {
    let mut pending = 0usize;
    let mut written = 0usize;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let rejected = match serde_json::from_str::<WorkerRequest>(&line) {
            Ok(request) => {
                let request_id = request.request_id();
                match host.post(request) {
                    Ok(id) => {
                        debug!(request = %id, "queued");
                        pending += 1;
                        None
                    }
                    Err(err @ IntelError::DuplicateRequest(_)) => Some(WorkerResponse::AnalysisError {
                        error: err.to_string(),
                        request_id: request_id.unwrap_or(RequestId(0)),
                    }),
                    Err(err) => return Err(err.into()),
                }
            }
            Err(err) => {
                warn!(error = %err, "malformed worker message");
                Some(WorkerResponse::AnalysisError {
                    error: format!("Invalid message: {}", err),
                    request_id: RequestId(0),
                })
            }
        };
        if let Some(reply) = rejected {
            writeln!(output, "{}", encode_response(&reply))?;
            written += 1;
        }

        while let Some(reply) = host.try_recv()? {
            writeln!(output, "{}", encode_response(&reply))?;
            pending -= 1;
            written += 1;
        }
        output.flush()?;
    }

    while pending > 0 {
        let reply = host.recv()?;
        writeln!(output, "{}", encode_response(&reply))?;
        pending -= 1;
        written += 1;
    }
    output.flush()?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(input: &str) -> (usize, Vec<WorkerResponse>) {
        let mut host = AsyncComputeHost::spawn(IntelConfig::default()).unwrap();
        let mut output = Vec::new();
        let written = serve_lines(&mut host, Cursor::new(input), &mut output).unwrap();
        let replies = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        (written, replies)
    }

    #[test]
    fn test_one_reply_per_message() {
        let input = concat!(
            r#"{"type":"ANALYZE_TACTICAL_DATA","data":[],"requestId":7}"#,
            "\n\n",
            r#"{"type":"ANALYZE_TACTICAL_DATA","data":[{"side":"T","health":100,"position":{"x":0,"y":0}}]}"#,
            "\n",
        );
        let (written, replies) = run(input);

        assert_eq!(written, 2);
        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0].request_id(), RequestId(7));
        assert_eq!(replies[0].result().unwrap().data_points, 0);
        assert_eq!(replies[1].request_id(), RequestId(8));
        assert_eq!(replies[1].result().unwrap().data_points, 1);
    }

    #[test]
    fn test_malformed_line_is_answered_and_serving_continues() {
        let input = "not json\n{\"type\":\"ANALYZE_TACTICAL_DATA\",\"data\":[],\"requestId\":3}\n";
        let (written, replies) = run(input);

        assert_eq!(written, 2);
        match &replies[0] {
            WorkerResponse::AnalysisError { error, request_id } => {
                assert_eq!(*request_id, RequestId(0));
                assert!(error.starts_with("Invalid message"));
            }
            other => panic!("expected error, got {:?}", other),
        }
        assert_eq!(replies[1].request_id(), RequestId(3));
    }

    #[test]
    fn test_max_request_id_is_served() {
        let input = r#"{"type":"ANALYZE_TACTICAL_DATA","data":[],"requestId":18446744073709551615}"#;
        let (written, replies) = run(input);
        assert_eq!(written, 1);
        assert_eq!(replies[0].request_id(), RequestId(u64::MAX));
    }
}
