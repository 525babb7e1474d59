/// Batch processing: resolve → dispatch → render for every identifier.
pub mod dispatch;
pub mod render;

use std::io::Write;
use std::path::PathBuf;

use crate::cli::output::{DebugTimer, write_schedule_list};
use crate::cli::{Cli, OutputFormat};
use crate::filing::{FilingError, Runner, resolve};
use crate::types::BatchSummary;

pub use dispatch::{Dispatched, dispatch};
pub use render::{Render, render};

/// Options captured once per invocation.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub object_ids: Vec<String>,
    pub verbose: bool,
    pub schedule: Option<String>,
    /// Show xpaths in csv/txt output (`--xpath`).
    pub documentation: bool,
    pub format: OutputFormat,
    pub file: Option<PathBuf>,
    pub list_schedules: bool,
    pub debug: bool,
    pub filing_dir: PathBuf,
}

impl From<Cli> for RunOptions {
    fn from(cli: Cli) -> Self {
        Self {
            object_ids: cli.object_ids,
            verbose: cli.verbose,
            schedule: cli.schedule,
            documentation: cli.documentation,
            format: cli.format,
            file: cli.file,
            list_schedules: cli.list_schedules,
            debug: cli.debug,
            filing_dir: cli.filing_dir,
        }
    }
}

impl RunOptions {
    /// Start a named debug timer. Prints elapsed on drop only when `--debug` is set.
    #[must_use]
    pub fn timer(&self, label: &'static str) -> DebugTimer {
        DebugTimer::new(label, self.debug)
    }
}

/// Process every identifier in order.
///
/// The runner and its standardizer are shared by the whole batch. The first
/// error aborts the batch.
///
/// # Errors
///
/// Returns the first `FilingError` from resolution, the runner, a renderer, or
/// writing to `out`.
pub fn run_batch(
    opts: &RunOptions,
    runner: &dyn Runner,
    renderer: &dyn Render,
    out: &mut dyn Write,
) -> Result<BatchSummary, FilingError> {
    let standardizer = runner.standardizer();
    let mut summary = BatchSummary::default();

    for reference in &opts.object_ids {
        let _t_resolve = opts.timer("resolve");
        let resolved = resolve(reference)?;
        drop(_t_resolve);

        let _t_dispatch = opts.timer("dispatch");
        let dispatched = dispatch(&resolved, opts, runner, out)?;
        drop(_t_dispatch);

        match dispatched {
            Dispatched::Listing(names) => {
                write_schedule_list(&names, out)?;
                summary.processed += 1;
                summary.listed = true;
                // Listing stops after the first identifier, even when more were
                // given. Unclear whether per-identifier listing was intended.
                return Ok(summary);
            }
            Dispatched::Parsed(parsed) => {
                let _t_render = opts.timer("render");
                render(&parsed, &resolved.object_id, standardizer, opts, renderer)?;
            }
        }
        summary.processed += 1;
    }

    Ok(summary)
}
