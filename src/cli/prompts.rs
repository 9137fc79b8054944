//! Interactive prompts using dialoguer

use anyhow::{bail, Result};
use dialoguer::{theme::ColorfulTheme, Confirm, Select};

/// Prompt user to confirm proceeding with an action
pub fn confirm_step(message: &str) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(message)
        .default(true)
        .interact()?;
    Ok(confirmed)
}

/// Prompt user to confirm discretising the selected features
pub fn confirm_discretize_features(feature_count: usize, max_divisions: usize) -> Result<bool> {
    let message = format!(
        "Discretise {} feature(s) into at most {} division(s) each?",
        feature_count, max_divisions
    );
    confirm_step(&message)
}

/// Let the user pick the class column from the dataset's columns
pub fn select_class_column(columns: &[String]) -> Result<String> {
    if columns.is_empty() {
        bail!("Dataset has no columns to choose a class column from");
    }

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select the class column")
        .items(columns)
        .default(columns.len() - 1)
        .interact()?;

    Ok(columns[selection].clone())
}
