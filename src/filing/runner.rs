/// Filing runners: the processing entry points the batch loop calls.
use std::path::{Path, PathBuf};

use super::document::Filing;
use super::standardizer::{Standardizer, XpathStandardizer};
use super::FilingError;
use crate::types::ParsedFiling;

/// Processing entry points for one batch.
///
/// One runner is built per invocation and shared, read-only, across all
/// identifiers.
pub trait Runner {
    /// Standardizer handed to the csv and txt renderers.
    fn standardizer(&self) -> &dyn Standardizer;

    /// Process the filing and return the names of its schedules.
    ///
    /// # Errors
    ///
    /// Any failure loading or parsing the filing.
    fn list_schedules(
        &self,
        object_id: &str,
        filepath: Option<&Path>,
    ) -> Result<Vec<String>, FilingError>;

    /// Process the filing, keeping only `schedule`.
    ///
    /// # Errors
    ///
    /// Any failure loading or parsing the filing.
    fn run_sked(
        &self,
        object_id: &str,
        schedule: &str,
        verbose: bool,
        filepath: Option<&Path>,
    ) -> Result<ParsedFiling, FilingError>;

    /// Process the whole filing.
    ///
    /// # Errors
    ///
    /// Any failure loading or parsing the filing.
    fn run_filing(
        &self,
        object_id: &str,
        verbose: bool,
        filepath: Option<&Path>,
    ) -> Result<ParsedFiling, FilingError>;
}

/// Runner over local XML files.
#[derive(Debug, Clone)]
pub struct XmlRunner {
    filing_dir: PathBuf,
    standardizer: XpathStandardizer,
}

impl XmlRunner {
    /// Runner that looks up bare object ids in `filing_dir`.
    #[must_use]
    pub fn new(filing_dir: impl Into<PathBuf>) -> Self {
        Self {
            filing_dir: filing_dir.into(),
            standardizer: XpathStandardizer,
        }
    }

    fn load(
        &self,
        object_id: &str,
        verbose: bool,
        filepath: Option<&Path>,
    ) -> Result<Filing, FilingError> {
        let mut filing = Filing::new(object_id, filepath, &self.filing_dir);
        if verbose {
            eprintln!("Reading {}", filing.location().display());
        }
        filing.process()?;
        Ok(filing)
    }
}

impl Runner for XmlRunner {
    fn standardizer(&self) -> &dyn Standardizer {
        &self.standardizer
    }

    fn list_schedules(
        &self,
        object_id: &str,
        filepath: Option<&Path>,
    ) -> Result<Vec<String>, FilingError> {
        Ok(self.load(object_id, false, filepath)?.list_schedules())
    }

    fn run_sked(
        &self,
        object_id: &str,
        schedule: &str,
        verbose: bool,
        filepath: Option<&Path>,
    ) -> Result<ParsedFiling, FilingError> {
        let mut results = self.load(object_id, verbose, filepath)?.into_schedules();
        results.retain(|s| s.schedule_name == schedule);
        if results.is_empty() && verbose {
            eprintln!("Filing {object_id} has no {schedule} schedule");
        }
        Ok(ParsedFiling {
            object_id: object_id.to_owned(),
            results,
        })
    }

    fn run_filing(
        &self,
        object_id: &str,
        verbose: bool,
        filepath: Option<&Path>,
    ) -> Result<ParsedFiling, FilingError> {
        Ok(ParsedFiling {
            object_id: object_id.to_owned(),
            results: self.load(object_id, verbose, filepath)?.into_schedules(),
        })
    }
}
