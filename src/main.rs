//! LUCS-DN: Supervised Discretisation CLI Tool
//!
//! A command-line tool that replaces numeric features with class-labelled
//! interval categories.

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use console::style;

use lucs_dn::cli::{confirm_discretize_features, select_class_column, Cli};
use lucs_dn::pipeline::{
    apply_discretization, discretize_features, get_column_names, get_schema, guess_class_column,
    load_dataset_with_progress, save_dataset, select_feature_columns, DiscretizeConfig,
};
use lucs_dn::report::{display_divisions, export_divisions, DiscretizationSummary, ExportParams};
use lucs_dn::utils::{
    create_spinner, finish_with_success, print_banner, print_completion, print_config,
    print_count, print_info, print_step_header, print_step_time, print_success, print_warning,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let input = &cli.input;
    let output_path = cli.output_path();

    let class = match &cli.class_column {
        Some(class) => class.clone(),
        None if cli.no_confirm => {
            let schema = get_schema(input, cli.infer_schema_length)?;
            guess_class_column(&schema).ok_or_else(|| {
                anyhow::anyhow!(
                    "No non-numeric column to use as class column. Use -c/--class-column to specify."
                )
            })?
        }
        None => {
            let columns = get_column_names(input)?;
            select_class_column(&columns)?
        }
    };

    let mut config = DiscretizeConfig::new(cli.max_divisions);
    if let Some(fallback) = &cli.fallback_class {
        config = config.with_fallback_class(fallback.as_str());
    }
    config.validate()?;

    // Print styled banner
    print_banner(env!("CARGO_PKG_VERSION"));

    // Print configuration card
    print_config(input, &class, &output_path, config.max_divisions);

    // Step 1: Load dataset
    print_step_header(1, "Load Dataset");
    let step_start = Instant::now();
    let (df, rows, cols, memory_mb) = load_dataset_with_progress(input, cli.infer_schema_length)?;

    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", rows);
    println!("      Columns: {}", cols);
    println!("      Estimated memory: {:.2} MB", memory_mb);
    print_step_time(step_start.elapsed());

    // Verify class column exists
    let column_names: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    if !column_names.contains(&class) {
        anyhow::bail!(
            "Class column '{}' not found in dataset. Available columns: {:?}",
            class,
            column_names
        );
    }

    // Step 2: Feature selection
    print_step_header(2, "Select Features");
    let features = select_feature_columns(&df, &class, &cli.features, &cli.exclude)?;
    if features.is_empty() {
        print_warning("No numeric features to discretise; output will match the input");
    } else {
        print_count(
            "numeric feature(s) to discretise",
            features.len(),
            Some(&format!("(class: {})", class)),
        );
    }

    if !cli.no_confirm
        && !features.is_empty()
        && !confirm_discretize_features(features.len(), config.max_divisions)?
    {
        println!("Cancelled by user.");
        return Ok(());
    }

    // Step 3: Discretisation
    print_step_header(3, "Discretisation");
    let step_start = Instant::now();
    let run = discretize_features(&df, &class, &features, &config)?;
    for skipped in &run.skipped {
        print_warning(&format!(
            "Left '{}' unchanged: {}",
            skipped.feature_name, skipped.reason
        ));
    }
    if !run.results.is_empty() {
        print_success(&format!("Discretised {} feature(s)", run.results.len()));
    }
    print_step_time(step_start.elapsed());

    // Step 4: Save output
    print_step_header(4, "Save Results");
    let step_start = Instant::now();
    let mut output = apply_discretization(&df, &run.results)?;
    let spinner = create_spinner("Writing output file...");
    save_dataset(&mut output, &output_path)?;
    finish_with_success(&spinner, &format!("Saved to {}", output_path.display()));

    if let Some(json_path) = &cli.divisions_json {
        let input_file = input.display().to_string();
        let params = ExportParams {
            input_file: &input_file,
            class_column: &class,
            max_divisions: config.max_divisions,
            fallback_class: config.fallback_class.as_deref(),
        };
        export_divisions(json_path, &params, &run.results, &run.skipped)?;
        print_info(&format!("Divisions written to {}", json_path.display()));
    }
    print_step_time(step_start.elapsed());

    // Display summary
    let mut summary = DiscretizationSummary::new(cols, config.max_divisions);
    summary.add_run(&run);
    summary.display();

    if cli.verbose {
        display_divisions(&run.results);
    }

    print_completion();

    Ok(())
}
