//! manifest-prep: Feature Preparation CLI Tool
//!
//! Loads a training and a held-out manifest, prepares both with shared
//! statistics and writes the results next to the inputs.

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use console::style;

use manifest_prep::cli::{confirm_overwrite, Cli};
use manifest_prep::pipeline::{load_dataset_with_progress, prepare, save_dataset};
use manifest_prep::report::{export_params, ParamsExport, PreparationSummary};
use manifest_prep::utils::{
    create_spinner, finish_with_error, finish_with_success, print_banner, print_completion,
    print_config, print_count, print_info, print_step_header, print_step_time, print_success,
    ConfigCard,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.check_output_paths()?;
    let config = cli.prep_config();

    let train_output = cli.train_output_path();
    let test_output = cli.test_output_path();
    let params_output = cli.params_output_path();

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(&ConfigCard {
        train: &cli.train,
        test: &cli.test,
        train_output: &train_output,
        test_output: &test_output,
        target: &config.target,
        cabin_fill: &config.cabin_fill,
    });

    if !cli.no_confirm
        && !confirm_overwrite(&[
            train_output.as_path(),
            test_output.as_path(),
            params_output.as_path(),
        ])?
    {
        println!("Cancelled by user.");
        return Ok(());
    }

    // Step 1: Load both record sets
    print_step_header(1, "Load Datasets");
    let step_start = Instant::now();
    let (train, train_rows, train_cols, train_mb) =
        load_dataset_with_progress(&cli.train, cli.infer_schema_length)?;
    let (holdout, test_rows, test_cols, test_mb) =
        load_dataset_with_progress(&cli.test, cli.infer_schema_length)?;

    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!(
        "      Train: {} rows × {} columns ({:.2} MB)",
        train_rows, train_cols, train_mb
    );
    println!(
        "      Test:  {} rows × {} columns ({:.2} MB)",
        test_rows, test_cols, test_mb
    );
    print_step_time(step_start.elapsed());

    // Step 2: Run the preparation stages
    print_step_header(2, "Prepare Features");
    let step_start = Instant::now();
    let spinner = create_spinner("Imputing, deriving and encoding...");
    let prepared = match prepare(&train, &holdout, &config) {
        Ok(prepared) => {
            finish_with_success(&spinner, "Preparation stages complete");
            prepared
        }
        Err(e) => {
            finish_with_error(&spinner, "Preparation failed");
            return Err(e.into());
        }
    };

    let indicators = prepared.params.indicator_columns();
    if indicators.is_empty() {
        print_info("No categorical values to encode");
    } else {
        print_count(
            "indicator column(s) added",
            indicators.len(),
            Some("(shared by both sets)"),
        );
    }
    print_step_time(step_start.elapsed());

    // Step 3: Save outputs
    print_step_header(3, "Save Results");
    let step_start = Instant::now();
    let mut prepared_train = prepared.train;
    let mut prepared_holdout = prepared.holdout;

    let spinner = create_spinner("Writing output files...");
    save_dataset(&mut prepared_train, &train_output)?;
    save_dataset(&mut prepared_holdout, &test_output)?;
    finish_with_success(&spinner, "Prepared datasets written");
    print_success(&format!("Train → {}", train_output.display()));
    print_success(&format!("Test  → {}", test_output.display()));

    let export = ParamsExport::new(
        &cli.train,
        &cli.test,
        &config,
        &prepared.params,
        &prepared.stats,
    );
    export_params(&export, &params_output)?;
    print_success(&format!("Parameters → {}", params_output.display()));
    print_step_time(step_start.elapsed());

    PreparationSummary::new(&prepared.stats, &prepared.params).display(&config.cabin_fill);

    print_completion();

    Ok(())
}
