/// Processing mode selection for a single resolved reference.
use std::io::Write;

use super::RunOptions;
use crate::filing::{FilingError, ResolvedReference, Runner};
use crate::types::ParsedFiling;

/// Processing mode, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode<'a> {
    /// Only list the filing's schedules.
    ListSchedules,
    /// Parse a single named schedule.
    Schedule(&'a str),
    /// Parse every schedule.
    Filing,
}

impl RunOptions {
    /// Mode selected by these options. `--list_schedules` wins over `--schedule`.
    #[must_use]
    pub fn mode(&self) -> Mode<'_> {
        if self.list_schedules {
            Mode::ListSchedules
        } else if let Some(schedule) = &self.schedule {
            Mode::Schedule(schedule)
        } else {
            Mode::Filing
        }
    }
}

/// What a dispatch produced.
#[derive(Debug)]
pub enum Dispatched {
    /// Schedule names, from list-schedules mode.
    Listing(Vec<String>),
    /// A parsed filing to render.
    Parsed(ParsedFiling),
}

/// Run the selected mode for one reference.
///
/// Verbose echoes go to `out` before the runner is called.
///
/// # Errors
///
/// Returns runner errors unchanged, or `Io` if `out` cannot be written.
pub fn dispatch(
    resolved: &ResolvedReference,
    opts: &RunOptions,
    runner: &dyn Runner,
    out: &mut dyn Write,
) -> Result<Dispatched, FilingError> {
    let object_id = resolved.object_id.as_str();
    let filepath = resolved.filepath.as_deref();

    if opts.verbose {
        writeln!(out, "Processing filing {object_id}")?;
        if let Some(file) = &opts.file {
            writeln!(out, "Printing result to file {}", file.display())?;
        }
    }

    match opts.mode() {
        Mode::ListSchedules => runner
            .list_schedules(object_id, filepath)
            .map(Dispatched::Listing),
        Mode::Schedule(schedule) => runner
            .run_sked(object_id, schedule, opts.verbose, filepath)
            .map(Dispatched::Parsed),
        Mode::Filing => runner
            .run_filing(object_id, opts.verbose, filepath)
            .map(Dispatched::Parsed),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::cli::OutputFormat;
    use crate::commands::tests::{RecordingRunner, RunnerCall, options};

    fn reference(filepath: Option<&str>) -> ResolvedReference {
        ResolvedReference {
            object_id: "93432084004350".to_owned(),
            filepath: filepath.map(PathBuf::from),
        }
    }

    #[test]
    fn test_mode_priority() {
        let mut opts = options(OutputFormat::Json);
        assert_eq!(opts.mode(), Mode::Filing);
        opts.schedule = Some("IRS990".to_owned());
        assert_eq!(opts.mode(), Mode::Schedule("IRS990"));
        opts.list_schedules = true;
        assert_eq!(opts.mode(), Mode::ListSchedules);
    }

    #[test]
    fn test_schedule_mode_calls_run_sked_only() {
        let runner = RecordingRunner::default();
        let mut opts = options(OutputFormat::Json);
        opts.schedule = Some("SKED_A".to_owned());
        opts.verbose = true;
        let r = reference(Some("/tmp/93432084004350_public.xml"));
        let mut out: Vec<u8> = Vec::new();
        dispatch(&r, &opts, &runner, &mut out).unwrap();
        assert_eq!(
            *runner.calls.borrow(),
            [RunnerCall::RunSked {
                object_id: "93432084004350".to_owned(),
                schedule: "SKED_A".to_owned(),
                verbose: true,
                filepath: Some(PathBuf::from("/tmp/93432084004350_public.xml")),
            }]
        );
    }

    #[test]
    fn test_default_mode_calls_run_filing() {
        let runner = RecordingRunner::default();
        let opts = options(OutputFormat::Json);
        let mut out: Vec<u8> = Vec::new();
        let dispatched = dispatch(&reference(None), &opts, &runner, &mut out).unwrap();
        assert!(matches!(dispatched, Dispatched::Parsed(_)));
        assert_eq!(
            *runner.calls.borrow(),
            [RunnerCall::RunFiling {
                object_id: "93432084004350".to_owned(),
                verbose: false,
                filepath: None,
            }]
        );
        assert!(out.is_empty(), "no echo without --verbose");
    }

    #[test]
    fn test_list_mode() {
        let runner = RecordingRunner::default();
        let mut opts = options(OutputFormat::Json);
        opts.list_schedules = true;
        opts.schedule = Some("IRS990".to_owned());
        let mut out: Vec<u8> = Vec::new();
        let dispatched = dispatch(&reference(None), &opts, &runner, &mut out).unwrap();
        assert!(matches!(dispatched, Dispatched::Listing(ref names) if names == &["IRS990"]));
        assert!(matches!(
            runner.calls.borrow()[0],
            RunnerCall::ListSchedules { .. }
        ));
    }

    #[test]
    fn test_verbose_echo() {
        let runner = RecordingRunner::default();
        let mut opts = options(OutputFormat::Json);
        opts.verbose = true;
        opts.file = Some(PathBuf::from("out.json"));
        let mut out: Vec<u8> = Vec::new();
        dispatch(&reference(None), &opts, &runner, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Processing filing 93432084004350\nPrinting result to file out.json\n"
        );
    }

    #[test]
    fn test_runner_error_propagates() {
        let runner = RecordingRunner {
            fail: true,
            ..RecordingRunner::default()
        };
        let opts = options(OutputFormat::Json);
        let mut out: Vec<u8> = Vec::new();
        let err = dispatch(&reference(None), &opts, &runner, &mut out).unwrap_err();
        assert!(matches!(err, FilingError::MalformedFiling { .. }));
    }
}
