//! Run command implementation.

use crate::error::{CliError, CliResult};
use crate::script::{parse_script, Command};
use serde::Serialize;
use stagekv_core::{StatsSnapshot, Store};
use std::io::{self, Read, Write};
use std::path::Path;
use tracing::{debug, info};

/// Summary of an executed script.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct RunReport {
    /// Number of commands executed.
    pub commands: usize,
    /// Number of commands the store rejected.
    pub rejected: usize,
    /// Store status after the last command.
    pub status: String,
    /// Open transaction levels after the last command.
    pub depth: usize,
    /// Keys in the committed base state.
    pub committed_keys: usize,
    /// Operation counters.
    pub stats: StatsReport,
}

/// Serializable copy of the store counters.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct StatsReport {
    /// Total reads.
    pub reads: u64,
    /// Accepted writes.
    pub writes: u64,
    /// Transactions begun.
    pub transactions_begun: u64,
    /// Commits.
    pub transactions_committed: u64,
    /// Rollbacks.
    pub transactions_rolled_back: u64,
    /// Rejected operations.
    pub rejected: u64,
}

impl From<StatsSnapshot> for StatsReport {
    fn from(snap: StatsSnapshot) -> Self {
        Self {
            reads: snap.reads,
            writes: snap.writes,
            transactions_begun: snap.transactions_begun,
            transactions_committed: snap.transactions_committed,
            transactions_rolled_back: snap.transactions_rolled_back,
            rejected: snap.rejected,
        }
    }
}

/// Runs a script from a file, or from stdin when no path is given.
pub fn run(
    store: &mut Store,
    path: Option<&Path>,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = match path {
        Some(path) => {
            info!("Running script {:?}", path);
            std::fs::read_to_string(path)?
        }
        None => {
            info!("Running script from stdin");
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let stdout = io::stdout();
    let stderr = io::stderr();
    report_source(store, &source, format, &mut stdout.lock(), &mut stderr.lock())?;
    Ok(())
}

/// Executes a script and writes its report to `out`.
///
/// The per-command transcript goes to `out` in text format. In json format it
/// goes to `transcript` instead, leaving `out` a single JSON document.
pub fn report_source(
    store: &mut Store,
    source: &str,
    format: &str,
    out: &mut impl Write,
    transcript: &mut impl Write,
) -> CliResult<RunReport> {
    let report = match format {
        "text" => execute_source(store, source, out)?,
        "json" => execute_source(store, source, transcript)?,
        other => return Err(CliError::UnknownFormat(other.to_string())),
    };
    write_report(&report, format, out)?;
    Ok(report)
}

/// Parses and executes a script, printing one line per command.
pub fn execute_source(
    store: &mut Store,
    source: &str,
    out: &mut impl Write,
) -> CliResult<RunReport> {
    let commands = parse_script(source)?;
    execute(store, &commands, out)
}

/// Executes parsed commands.
///
/// Rejected operations are printed and counted; execution continues.
pub fn execute(
    store: &mut Store,
    commands: &[(usize, Command)],
    out: &mut impl Write,
) -> CliResult<RunReport> {
    let mut rejected = 0;

    for (line, command) in commands {
        debug!(line, ?command, "executing");
        let result = match command {
            Command::Get(key) => {
                writeln!(out, "GET {key} -> {}", store.get(key))?;
                continue;
            }
            Command::Status => {
                print_status(store, out)?;
                continue;
            }
            Command::Put(key, value) => {
                write!(out, "PUT {key} {value}")?;
                store.put(key.as_str(), *value)
            }
            Command::Begin => {
                write!(out, "BEGIN")?;
                store.begin_transaction()
            }
            Command::Commit => {
                write!(out, "COMMIT")?;
                store.commit()
            }
            Command::Rollback => {
                write!(out, "ROLLBACK")?;
                store.rollback()
            }
        };

        match result {
            Ok(()) => writeln!(out)?,
            Err(err) => {
                rejected += 1;
                writeln!(out, " -> error: {err}")?;
            }
        }
    }

    Ok(RunReport {
        commands: commands.len(),
        rejected,
        status: store.status().to_string(),
        depth: store.depth(),
        committed_keys: store.committed_len(),
        stats: store.stats().snapshot().into(),
    })
}

fn print_status(store: &Store, out: &mut impl Write) -> CliResult<()> {
    writeln!(out, "STATUS {} (depth {})", store.status(), store.depth())?;
    for (key, value) in store.committed() {
        writeln!(out, "  committed {key} = {value}")?;
    }
    for (key, value) in store.pending() {
        writeln!(out, "  staged    {key} = {value}")?;
    }
    Ok(())
}

/// Prints a run report in the requested format.
pub fn write_report(report: &RunReport, format: &str, out: &mut impl Write) -> CliResult<()> {
    match format {
        "json" => {
            writeln!(out, "{}", serde_json::to_string_pretty(report)?)?;
        }
        "text" => {
            writeln!(out)?;
            writeln!(out, "Summary")?;
            writeln!(out, "=======")?;
            writeln!(out, "  Commands:        {}", report.commands)?;
            writeln!(out, "  Rejected:        {}", report.rejected)?;
            writeln!(out, "  Status:          {} (depth {})", report.status, report.depth)?;
            writeln!(out, "  Committed keys:  {}", report.committed_keys)?;
            writeln!(out, "  Commits:         {}", report.stats.transactions_committed)?;
            writeln!(out, "  Rollbacks:       {}", report.stats.transactions_rolled_back)?;
        }
        other => return Err(CliError::UnknownFormat(other.to_string())),
    }
    Ok(())
}
