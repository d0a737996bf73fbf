use std::io::Write;

use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::researcher::youtube_crew;
use crate::traits::{Executor, Inputs};

/// Loads configuration from `lookup`, runs the trend crew once through the
/// executor built by `build_executor` and writes the result to `out`.
/// Executor failures are returned before anything is written.
pub async fn launch<L, B, E, W>(lookup: L, build_executor: B, inputs: &Inputs, out: &mut W) -> Result<()>
where
    L: Fn(&str) -> Option<String>,
    B: FnOnce(&Config) -> E,
    E: Executor,
    W: Write,
{
    let config = Config::from_lookup(lookup, out)?;
    let executor = build_executor(&config);
    let crew = youtube_crew(&config)?;

    let result = crew.kickoff(&executor, inputs).await?;
    info!(chars = result.len(), "crew finished");

    writeln!(out, "{}", result)?;
    out.flush()?;
    Ok(())
}
