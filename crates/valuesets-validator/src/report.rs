//! # Console Reporting
//!
//! Renders validation outcomes for people. The terse form prints a single
//! check mark on success, or the full list of errors followed by a capped
//! list of warnings. The verbose form prints per-schema summaries and every
//! issue, including informational ones.
//!
//! The reporter writes to any [`Write`] sink and decides the process exit
//! status, so the CLI never formats output itself.

use std::io::{self, Write};
use std::path::Path;

use crate::batch::BatchOutcome;
use crate::config::ValidationConfig;
use crate::issue::{Severity, ValidationIssue, ValidationResult};

const SUCCESS_MARK: &str = "✅";
const RULE_WIDTH: usize = 60;

/// What the user asked to validate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// A single schema file.
    File,
    /// A directory tree of schema files.
    Directory,
}

#[derive(Debug)]
pub struct Reporter<W: Write> {
    out: W,
    verbose: bool,
    strict: bool,
    warning_limit: usize,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, verbose: bool, strict: bool, warning_limit: usize) -> Self {
        Self {
            out,
            verbose,
            strict,
            warning_limit,
        }
    }

    /// Reporter honoring the strictness and warning limit of `config`.
    pub fn from_config(out: W, config: &ValidationConfig, verbose: bool) -> Self {
        Self::new(out, verbose, config.strict_mode, config.warning_limit)
    }

    /// Recover the sink, e.g. to inspect captured output.
    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn batch_started(&mut self, file_count: usize) -> io::Result<()> {
        if self.verbose {
            writeln!(self.out, "🔍 Validating {file_count} schema files...\n")?;
        }
        Ok(())
    }

    /// Announce one schema of a directory run. Single files are not announced.
    pub fn schema_started(&mut self, path: &Path, target: Target) -> io::Result<()> {
        if self.verbose && target == Target::Directory {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy())
                .unwrap_or_else(|| path.to_string_lossy());
            writeln!(self.out, "Validating {name}...")?;
        }
        Ok(())
    }

    pub fn schema_finished(&mut self, result: &ValidationResult) -> io::Result<()> {
        if self.verbose {
            self.summary(result)?;
        }
        Ok(())
    }

    /// The counters and per-severity totals of one result.
    pub fn summary(&mut self, result: &ValidationResult) -> io::Result<()> {
        writeln!(self.out, "\nValidation Summary:")?;
        writeln!(self.out, "  Enums checked: {}", result.enums_checked())?;
        writeln!(self.out, "  Values checked: {}", result.values_checked())?;
        writeln!(self.out, "  Mappings checked: {}", result.mappings_checked())?;
        writeln!(self.out, "  Errors: {}", result.count(Severity::Error))?;
        writeln!(self.out, "  Warnings: {}", result.count(Severity::Warning))?;
        writeln!(self.out, "  Info: {}", result.count(Severity::Info))?;
        Ok(())
    }

    pub fn path_error(&mut self, path: &Path) -> io::Result<()> {
        writeln!(
            self.out,
            "Error: {} is not a file or directory",
            path.display()
        )
    }

    /// Render the final report and return the process exit status.
    pub fn finish(&mut self, outcome: &BatchOutcome, target: Target) -> io::Result<u8> {
        if outcome.is_clean() {
            self.success(outcome, target)?;
        } else if self.verbose {
            self.verbose_failure(outcome, target)?;
        } else {
            self.terse_failure(outcome, target)?;
        }
        self.out.flush()?;
        Ok(outcome.exit_code(self.strict))
    }

    fn success(&mut self, outcome: &BatchOutcome, target: Target) -> io::Result<()> {
        match (self.verbose, target) {
            (false, _) => writeln!(self.out, "{SUCCESS_MARK}"),
            // The per-schema summary has already been printed.
            (true, Target::File) => Ok(()),
            (true, Target::Directory) => {
                writeln!(self.out, "\n{}", "=".repeat(RULE_WIDTH))?;
                writeln!(
                    self.out,
                    "{SUCCESS_MARK} All {} schemas validated successfully!",
                    outcome.results.len()
                )
            }
        }
    }

    fn verbose_failure(&mut self, outcome: &BatchOutcome, target: Target) -> io::Result<()> {
        for result in &outcome.results {
            for issue in result.issues() {
                writeln!(
                    self.out,
                    "\n{}: {}.{}",
                    issue.severity, issue.enum_name, issue.value_name
                )?;
                if target == Target::Directory {
                    writeln!(self.out, "  Schema: {}", result.schema_name())?;
                }
                writeln!(self.out, "  {}", issue.message)?;
                if let Some(meaning) = &issue.meaning {
                    writeln!(self.out, "  CURIE: {meaning}")?;
                }
            }
        }

        if target == Target::Directory {
            writeln!(self.out, "\n{}", "=".repeat(RULE_WIDTH))?;
            writeln!(
                self.out,
                "Overall: {} errors, {} warnings in {} files",
                outcome.total_errors(),
                outcome.total_warnings(),
                outcome.results.len()
            )?;
        }
        Ok(())
    }

    fn terse_failure(&mut self, outcome: &BatchOutcome, target: Target) -> io::Result<()> {
        let total_errors = outcome.total_errors();
        if total_errors > 0 {
            match target {
                Target::File => {
                    writeln!(self.out, "❌ Validation failed with {total_errors} error(s)\n")?
                }
                Target::Directory => writeln!(
                    self.out,
                    "❌ Validation failed with {total_errors} error(s) in {} file(s)\n",
                    outcome.files_with_errors()
                )?,
            }
            writeln!(self.out, "ERRORS:")?;
            for result in &outcome.results {
                for issue in result.with_severity(Severity::Error) {
                    writeln!(
                        self.out,
                        "  • {}:{}.{}: {}",
                        result.schema_name(),
                        issue.enum_name,
                        issue.value_name,
                        issue.message
                    )?;
                    if let Some(meaning) = &issue.meaning {
                        writeln!(self.out, "    Fix: Check CURIE {meaning}")?;
                    }
                }
            }
        }

        let total_warnings = outcome.total_warnings();
        if total_warnings == 0 || self.strict {
            return Ok(());
        }

        match target {
            Target::File => writeln!(self.out, "\n⚠️  {total_warnings} warning(s):")?,
            Target::Directory => writeln!(
                self.out,
                "\n⚠️  {total_warnings} warning(s) in {} file(s)",
                outcome.files_with_warnings()
            )?,
        }

        let warnings = outcome.results.iter().flat_map(|result| {
            result
                .with_severity(Severity::Warning)
                .map(move |issue| (result, issue))
        });
        for (result, issue) in warnings.take(self.warning_limit) {
            let line = warning_line(result, issue, target);
            writeln!(self.out, "{line}")?;
        }
        if total_warnings > self.warning_limit {
            writeln!(
                self.out,
                "  ... and {} more warnings",
                total_warnings - self.warning_limit
            )?;
        }
        Ok(())
    }
}

fn warning_line(result: &ValidationResult, issue: &ValidationIssue, target: Target) -> String {
    let id_info = issue
        .meaning
        .as_ref()
        .map(|m| format!(" [{m}]"))
        .unwrap_or_default();
    let location = match target {
        Target::File => format!("{}.{}", issue.enum_name, issue.value_name),
        Target::Directory => format!(
            "{}:{}.{}",
            result.schema_name(),
            issue.enum_name,
            issue.value_name
        ),
    };
    format!("  • {location}{id_info}: {}", issue.message)
}
