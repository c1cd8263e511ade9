//! Demo command implementation.

use crate::commands::run::{execute_source, RunReport};
use crate::error::CliResult;
use stagekv_core::Store;
use std::io::{self, Write};
use tracing::info;

/// The reference walkthrough.
pub const WALKTHROUGH: &str = "\
# A does not exist yet
GET A
# no transaction in progress
PUT A 5
BEGIN
PUT A 5
# staged value is visible inside the transaction
GET A
PUT A 6
COMMIT
GET A
# nothing left to commit or roll back
COMMIT
ROLLBACK
GET B
BEGIN
PUT B 10
ROLLBACK
# B was rolled back
GET B
";

/// Runs the walkthrough against a fresh store and prints each step.
pub fn run(store: &mut Store) -> Result<(), Box<dyn std::error::Error>> {
    info!("Running walkthrough in {:?} mode", store.config().mode);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let report = walkthrough(store, &mut out)?;
    writeln!(
        out,
        "\n{} steps, {} rejected as expected",
        report.commands, report.rejected
    )?;
    Ok(())
}

/// Executes the walkthrough, writing its transcript to `out`.
pub fn walkthrough(store: &mut Store, out: &mut impl Write) -> CliResult<RunReport> {
    execute_source(store, WALKTHROUGH, out)
}
