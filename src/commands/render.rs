/// Output renderer selection.
///
/// The renderers do not all take the same inputs: json only sees the data
/// payload, csv also gets the object id, txt does not. [`RENDER_CONTRACTS`]
/// records which fields each format receives, and [`render`] builds the
/// request from it.
use std::path::Path;

use super::RunOptions;
use crate::cli::OutputFormat;
use crate::filing::{FilingError, Standardizer};
use crate::types::{ParsedFiling, ScheduleResult};

/// Which fields a format's renderer receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContract {
    pub format: OutputFormat,
    /// Whole `ParsedFiling` rather than just `get_result()`.
    pub full_result: bool,
    pub object_id: bool,
    pub standardizer: bool,
    pub documentation: bool,
}

/// One entry per output format. Every renderer receives the output file.
pub const RENDER_CONTRACTS: [RenderContract; 3] = [
    RenderContract {
        format: OutputFormat::Json,
        full_result: false,
        object_id: false,
        standardizer: false,
        documentation: false,
    },
    RenderContract {
        format: OutputFormat::Csv,
        full_result: true,
        object_id: true,
        standardizer: true,
        documentation: true,
    },
    RenderContract {
        format: OutputFormat::Txt,
        full_result: true,
        object_id: false,
        standardizer: true,
        documentation: true,
    },
];

/// Look up the contract for `format`.
#[must_use]
pub fn contract(format: OutputFormat) -> &'static RenderContract {
    match format {
        OutputFormat::Json => &RENDER_CONTRACTS[0],
        OutputFormat::Csv => &RENDER_CONTRACTS[1],
        OutputFormat::Txt => &RENDER_CONTRACTS[2],
    }
}

/// What a renderer is given to write.
#[derive(Clone, Copy)]
pub enum Payload<'a> {
    /// Only the extracted schedules.
    Data(&'a [ScheduleResult]),
    /// The full parsed filing.
    Filing(&'a ParsedFiling),
}

/// Inputs for a single render call, filled according to a [`RenderContract`].
#[derive(Clone, Copy)]
pub struct RenderRequest<'a> {
    pub payload: Payload<'a>,
    pub object_id: Option<&'a str>,
    pub standardizer: Option<&'a dyn Standardizer>,
    pub documentation: Option<bool>,
    /// Write here instead of stdout.
    pub outfile: Option<&'a Path>,
}

/// A set of output renderers, one per format.
pub trait Render {
    /// Write `request` in `format`.
    ///
    /// # Errors
    ///
    /// Serialization or I/O failure, or `RenderContract` when the request does
    /// not carry what `format` expects.
    fn render(&self, format: OutputFormat, request: &RenderRequest<'_>) -> Result<(), FilingError>;
}

/// Build the request for the configured format and hand it to `renderer`.
///
/// # Errors
///
/// Propagates the renderer's error unchanged.
pub fn render(
    parsed: &ParsedFiling,
    object_id: &str,
    standardizer: &dyn Standardizer,
    opts: &RunOptions,
    renderer: &dyn Render,
) -> Result<(), FilingError> {
    let c = contract(opts.format);
    let request = RenderRequest {
        payload: if c.full_result {
            Payload::Filing(parsed)
        } else {
            Payload::Data(parsed.get_result())
        },
        object_id: c.object_id.then_some(object_id),
        standardizer: c.standardizer.then_some(standardizer),
        documentation: c.documentation.then_some(opts.documentation),
        outfile: opts.file.as_deref(),
    };
    renderer.render(c.format, &request)
}
