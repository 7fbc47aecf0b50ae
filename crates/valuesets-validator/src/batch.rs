//! # Batch Validation
//!
//! Runs schema validation over many files with failures isolated per file:
//! a schema that fails to load, or a validation that panics, becomes a
//! single error on that schema's result and the batch moves on.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::evaluator::EnumEvaluator;
use crate::issue::{Severity, ValidationResult};
use crate::report::{Reporter, Target};

/// Files under a directory with this name belong to the LinkML metamodel
/// and are never validated.
pub const EXCLUDED_PATH_COMPONENT: &str = "linkml_model";

const SCHEMA_EXTENSION: &str = "yaml";

/// Every `*.yaml` schema under `dir`, sorted by path, skipping the metamodel.
pub fn discover_schema_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_entry(|entry| entry.file_name() != EXCLUDED_PATH_COMPONENT)
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read directory entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|path| path.extension().is_some_and(|ext| ext == SCHEMA_EXTENSION))
        .collect();
    files.sort();
    files
}

/// Results of a batch run, in the order the files were given.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub results: Vec<ValidationResult>,
}

impl BatchOutcome {
    pub fn total(&self, severity: Severity) -> usize {
        self.results.iter().map(|r| r.count(severity)).sum()
    }

    pub fn total_errors(&self) -> usize {
        self.total(Severity::Error)
    }

    pub fn total_warnings(&self) -> usize {
        self.total(Severity::Warning)
    }

    pub fn files_with_errors(&self) -> usize {
        self.results.iter().filter(|r| r.has_errors()).count()
    }

    pub fn files_with_warnings(&self) -> usize {
        self.results.iter().filter(|r| r.has_warnings()).count()
    }

    /// True when nothing needs attention: no errors and no warnings.
    pub fn is_clean(&self) -> bool {
        self.total_errors() == 0 && self.total_warnings() == 0
    }

    /// Process exit status: 1 on any error, or any warning under strict mode.
    pub fn exit_code(&self, strict: bool) -> u8 {
        if self.total_errors() > 0 || (strict && self.total_warnings() > 0) {
            1
        } else {
            0
        }
    }
}

/// Validate `files` one by one, reporting progress as each finishes.
///
/// While the batch runs, panics are reported through tracing instead of the
/// default hook, since each one is already recorded as a schema failure.
pub fn validate_files<W: std::io::Write>(
    evaluator: &mut EnumEvaluator,
    files: &[PathBuf],
    target: Target,
    reporter: &mut Reporter<W>,
) -> std::io::Result<BatchOutcome> {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(|info| {
        tracing::debug!(%info, "panic while validating schema");
    }));

    let outcome = report_each(evaluator, files, target, reporter);

    panic::set_hook(default_hook);
    outcome
}

fn report_each<W: std::io::Write>(
    evaluator: &mut EnumEvaluator,
    files: &[PathBuf],
    target: Target,
    reporter: &mut Reporter<W>,
) -> std::io::Result<BatchOutcome> {
    let mut outcome = BatchOutcome::default();

    for path in files {
        reporter.schema_started(path, target)?;
        let result = validate_isolated(evaluator, path);
        reporter.schema_finished(&result)?;
        outcome.results.push(result);
    }

    Ok(outcome)
}

/// Validate one schema, turning a panic into a schema-failure result.
fn validate_isolated(evaluator: &mut EnumEvaluator, path: &Path) -> ValidationResult {
    match panic::catch_unwind(AssertUnwindSafe(|| evaluator.validate_schema(path))) {
        Ok(result) => result,
        Err(payload) => {
            let reason = panic_message(payload.as_ref());
            tracing::warn!(path = %path.display(), reason, "schema validation panicked");
            ValidationResult::failed(path, reason)
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "validation panicked"
    }
}
