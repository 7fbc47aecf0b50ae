//! # Validate Subcommand
//!
//! Validates one schema file, or every schema under a directory, and
//! prints the report to stdout. Returns the process exit status:
//!
//! - `0`: no errors, and no warnings in strict mode.
//! - `1`: validation failed, the adapter locator is unsupported, or the
//!   path is neither a file nor a directory.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use valuesets_ontology::DYNAMIC_LOCATOR;
use valuesets_validator::{
    discover_schema_files, validate_files, EnumEvaluator, Reporter, Target, ValidationConfig,
    DEFAULT_WARNING_LIMIT,
};

/// Arguments for `validate-enums`.
#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Schema file or directory of schema files.
    pub path: PathBuf,

    /// Ontology adapter locator: `sqlite:obo:` (per-prefix databases),
    /// `sqlite:obo:<name>`, or `sqlite:<path-to-db>`.
    #[arg(long, default_value = DYNAMIC_LOCATOR)]
    pub adapter: String,

    /// Treat label mismatches as errors.
    #[arg(long)]
    pub strict: bool,

    /// Look up every label afresh instead of caching results.
    #[arg(long)]
    pub no_cache: bool,

    /// Print per-schema summaries and every issue.
    #[arg(short, long)]
    pub verbose: bool,

    /// Directory holding SemSQL databases (`<prefix>.db`, `merged.db`).
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Maximum number of warnings listed in the terse report.
    #[arg(long, default_value_t = DEFAULT_WARNING_LIMIT)]
    pub warning_limit: usize,
}

impl ValidateArgs {
    pub fn config(&self) -> ValidationConfig {
        let config = ValidationConfig::default()
            .with_adapter(self.adapter.clone())
            .with_strict_mode(self.strict)
            .with_cache_labels(!self.no_cache)
            .with_warning_limit(self.warning_limit);
        match &self.data_dir {
            Some(dir) => config.with_data_dir(dir.clone()),
            None => config,
        }
    }
}

/// Run validation, printing the report to stdout.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let stdout = io::stdout();
    run_validate_to(args, stdout.lock())
}

/// Run validation, printing the report to `out`.
pub fn run_validate_to<W: Write>(args: &ValidateArgs, mut out: W) -> Result<u8> {
    let config = args.config();

    let mut evaluator = match EnumEvaluator::new(config.clone()) {
        Ok(evaluator) => evaluator,
        Err(e) => {
            tracing::warn!(adapter = %config.adapter, error = %e, "cannot build ontology adapter");
            writeln!(out, "Error: {e}").context("writing report")?;
            return Ok(1);
        }
    };

    let mut reporter = Reporter::from_config(out, &config, args.verbose);
    let code = if args.path.is_file() {
        validate_file(&mut evaluator, &args.path, &mut reporter)?
    } else if args.path.is_dir() {
        validate_directory(&mut evaluator, &args.path, &mut reporter)?
    } else {
        reporter.path_error(&args.path).context("writing report")?;
        1
    };

    tracing::info!(
        labels_cached = evaluator.resolver().cached_count(),
        exit_code = code,
        "validation finished"
    );
    Ok(code)
}

fn validate_file<W: Write>(
    evaluator: &mut EnumEvaluator,
    path: &Path,
    reporter: &mut Reporter<W>,
) -> Result<u8> {
    let outcome = validate_files(evaluator, &[path.to_path_buf()], Target::File, reporter)
        .context("writing report")?;
    reporter
        .finish(&outcome, Target::File)
        .context("writing report")
}

fn validate_directory<W: Write>(
    evaluator: &mut EnumEvaluator,
    dir: &Path,
    reporter: &mut Reporter<W>,
) -> Result<u8> {
    let files = discover_schema_files(dir);
    tracing::info!(dir = %dir.display(), files = files.len(), "discovered schema files");

    reporter
        .batch_started(files.len())
        .context("writing report")?;
    let outcome = validate_files(evaluator, &files, Target::Directory, reporter)
        .context("writing report")?;
    reporter
        .finish(&outcome, Target::Directory)
        .context("writing report")
}
