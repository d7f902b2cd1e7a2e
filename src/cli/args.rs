//! Command-line argument definitions using clap

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::pipeline::{PrepConfig, DEFAULT_CABIN_FILL};

/// manifest-prep - Prepare a training and a held-out passenger manifest
/// with shared imputation statistics and matching one-hot columns
#[derive(Parser, Debug)]
#[command(name = "manifest-prep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Training set (CSV or Parquet). Imputation statistics are fitted on it.
    #[arg(long)]
    pub train: PathBuf,

    /// Held-out set (CSV or Parquet) with the same columns, target optional
    #[arg(long)]
    pub test: PathBuf,

    /// Output path for the prepared training set.
    /// Defaults to the input directory with a '_prepared' suffix (e.g., train.csv → train_prepared.csv).
    #[arg(long)]
    pub train_output: Option<PathBuf>,

    /// Output path for the prepared held-out set. Defaults like --train-output.
    #[arg(long)]
    pub test_output: Option<PathBuf>,

    /// JSON file receiving the fitted parameters.
    /// Defaults to '<train stem>_prep_params.json' next to the training set.
    #[arg(long)]
    pub params_output: Option<PathBuf>,

    /// Target column, required in the training set only
    #[arg(short, long, default_value = "Survived")]
    pub target: String,

    /// Category written into missing Cabin values
    #[arg(long, default_value = DEFAULT_CABIN_FILL, value_parser = validate_cabin_fill)]
    pub cabin_fill: String,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,

    /// Skip interactive confirmation prompts
    #[arg(long, default_value = "false")]
    pub no_confirm: bool,
}

impl Cli {
    /// Prepared training set path, derived from --train if not explicit
    pub fn train_output_path(&self) -> PathBuf {
        self.train_output
            .clone()
            .unwrap_or_else(|| derive_path(&self.train, "_prepared", None))
    }

    /// Prepared held-out set path, derived from --test if not explicit
    pub fn test_output_path(&self) -> PathBuf {
        self.test_output
            .clone()
            .unwrap_or_else(|| derive_path(&self.test, "_prepared", None))
    }

    /// Fitted-parameter JSON path, derived from --train if not explicit
    pub fn params_output_path(&self) -> PathBuf {
        self.params_output
            .clone()
            .unwrap_or_else(|| derive_path(&self.train, "_prep_params", Some("json")))
    }

    /// Reject output paths that collide with each other or with an input file
    pub fn check_output_paths(&self) -> anyhow::Result<()> {
        let outputs = [
            ("--train-output", self.train_output_path()),
            ("--test-output", self.test_output_path()),
            ("--params-output", self.params_output_path()),
        ];
        let inputs = [("--train", &self.train), ("--test", &self.test)];

        for (i, (flag, path)) in outputs.iter().enumerate() {
            let resolved = resolve_path(path);
            for (other_flag, other) in &outputs[i + 1..] {
                if resolved == resolve_path(other) {
                    anyhow::bail!(
                        "{} and {} both resolve to {}",
                        flag,
                        other_flag,
                        path.display()
                    );
                }
            }
            for (input_flag, input) in &inputs {
                if resolved == resolve_path(input) {
                    anyhow::bail!(
                        "{} would overwrite the {} input {}",
                        flag,
                        input_flag,
                        input.display()
                    );
                }
            }
        }

        Ok(())
    }

    /// Library configuration for this invocation
    pub fn prep_config(&self) -> PrepConfig {
        PrepConfig {
            target: self.target.clone(),
            cabin_fill: self.cabin_fill.clone(),
        }
    }
}

/// Sibling of `input` with `suffix` appended to its stem; keeps the input
/// extension unless `extension` is given.
fn derive_path(input: &Path, suffix: &str, extension: Option<&str>) -> PathBuf {
    let parent = input.parent().unwrap_or_else(|| Path::new("."));
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let extension = extension
        .or_else(|| input.extension().and_then(|e| e.to_str()))
        .unwrap_or("parquet");
    parent.join(format!("{}{}.{}", stem, suffix, extension))
}

/// Absolute form of `path` for comparison. Existing paths are canonicalized;
/// otherwise the parent directory is, when it exists.
fn resolve_path(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    match (parent.canonicalize(), path.file_name()) {
        (Ok(dir), Some(name)) => dir.join(name),
        _ => path.to_path_buf(),
    }
}

/// Validator for cabin_fill parameter
fn validate_cabin_fill(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cabin_fill must not be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}
