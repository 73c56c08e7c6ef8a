//! Line-oriented interactive session.

use std::io::Write;

use aeos_core::{CostLedger, DispatchError, Registry, Sealed};
use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

use crate::render;

/// Dispatch every non-blank input line, recording results in `ledger`.
///
/// An unhandled query is reported inline and the session continues. A
/// division failure is reported on stderr and the session continues.
pub async fn run<R, W>(
    registry: &Registry<Sealed>,
    ledger: &CostLedger,
    input: R,
    out: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let router = registry.router();
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        debug!(query, "Session query");

        match router.route(query) {
            Ok(routed) => {
                ledger.record(&routed);
                write!(out, "{}", render::routed(&routed))?;
            }
            Err(DispatchError::NoHandler { query }) => {
                writeln!(out, "No division can handle {query:?}.")?;
            }
            Err(err) => {
                warn!(error = %err, "Session query failed");
                eprintln!("error: {err}");
            }
        }
    }
    out.flush()?;
    Ok(())
}
