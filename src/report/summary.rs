//! Discretisation summary report generation

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;

use crate::pipeline::{DiscretizationRun, FeatureDiscretization};

/// Summary of a discretisation run
#[derive(Debug, Default)]
pub struct DiscretizationSummary {
    pub total_columns: usize,
    pub max_divisions: usize,
    /// (feature, divisions after forming, final divisions, observations)
    pub features: Vec<(String, usize, usize, usize)>,
    pub skipped: Vec<(String, String)>,
}

impl DiscretizationSummary {
    pub fn new(total_columns: usize, max_divisions: usize) -> Self {
        Self {
            total_columns,
            max_divisions,
            ..Default::default()
        }
    }

    pub fn add_run(&mut self, run: &DiscretizationRun) {
        self.features.extend(run.results.iter().map(|r| {
            (
                r.feature_name.clone(),
                r.formed_divisions,
                r.divisions.len(),
                r.observations,
            )
        }));
        self.skipped.extend(
            run.skipped
                .iter()
                .map(|s| (s.feature_name.clone(), s.reason.clone())),
        );
    }

    /// Render the per-feature overview table
    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Feature").add_attribute(Attribute::Bold),
            Cell::new("Formed").add_attribute(Attribute::Bold),
            Cell::new("Divisions").add_attribute(Attribute::Bold),
            Cell::new("Observations").add_attribute(Attribute::Bold),
        ]);

        for (feature, formed, divisions, observations) in &self.features {
            let reduced = formed > divisions;
            table.add_row(vec![
                Cell::new(feature),
                Cell::new(formed).set_alignment(CellAlignment::Right),
                Cell::new(divisions)
                    .set_alignment(CellAlignment::Right)
                    .fg(if reduced { Color::Yellow } else { Color::Green }),
                Cell::new(observations).set_alignment(CellAlignment::Right),
            ]);
        }

        table
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("DISCRETISATION SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();
        println!(
            "      Columns: {}   Discretised: {}   Skipped: {}   Max divisions: {}",
            self.total_columns,
            style(self.features.len()).green().bold(),
            style(self.skipped.len()).yellow(),
            self.max_divisions
        );
        println!();

        if !self.features.is_empty() {
            for line in self.to_table().to_string().lines() {
                println!("    {}", line);
            }
        }

        if !self.skipped.is_empty() {
            println!();
            println!(
                "    {} {}",
                style("📝").cyan(),
                style("SKIPPED FEATURES").white().bold()
            );
            println!("    {}", style("─".repeat(50)).dim());
            for (feature, reason) in &self.skipped {
                println!("        {} {} {}", style("•").dim(), feature, style(reason).dim());
            }
        }
    }
}

/// Table listing every division of one feature
pub fn divisions_table(result: &FeatureDiscretization) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Category").add_attribute(Attribute::Bold),
        Cell::new("Class").add_attribute(Attribute::Bold),
        Cell::new("Range").add_attribute(Attribute::Bold),
        Cell::new("Count").add_attribute(Attribute::Bold),
    ]);

    for division in &result.divisions {
        table.add_row(vec![
            Cell::new(&division.category),
            Cell::new(division.dominant_class.as_deref().unwrap_or("?")),
            Cell::new(division.range.to_string()),
            Cell::new(division.count).set_alignment(CellAlignment::Right),
        ]);
    }

    table
}

/// Print the division table of every feature
pub fn display_divisions(results: &[FeatureDiscretization]) {
    for result in results {
        println!();
        println!(
            "    {} {}",
            style(&result.feature_name).cyan().bold(),
            style(format!("[{} .. {}]", result.low, result.high)).dim()
        );
        for line in divisions_table(result).to_string().lines() {
            println!("    {}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{discretize_features, DiscretizeConfig, SkippedFeature};
    use polars::prelude::*;

    fn sample_run() -> DiscretizationRun {
        let df = df! {
            "x" => [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0],
            "class" => ["A", "A", "A", "B", "B", "B"],
        }
        .unwrap();
        let mut run =
            discretize_features(&df, "class", &["x".to_string()], &DiscretizeConfig::default()).unwrap();
        run.skipped.push(SkippedFeature {
            feature_name: "empty".to_string(),
            reason: "no values".to_string(),
        });
        run
    }

    #[test]
    fn test_summary_collects_run() {
        let mut summary = DiscretizationSummary::new(3, 5);
        summary.add_run(&sample_run());

        assert_eq!(summary.features.len(), 1);
        assert_eq!(summary.features[0].0, "x");
        assert_eq!(summary.features[0].2, 2);
        assert_eq!(summary.features[0].3, 6);
        assert_eq!(summary.skipped, vec![("empty".to_string(), "no values".to_string())]);
    }

    #[test]
    fn test_divisions_table_lists_ranges() {
        let run = sample_run();
        let rendered = divisions_table(&run.results[0]).to_string();
        assert!(rendered.contains("Interval_0"));
        assert!(rendered.contains("Interval_1"));
        assert!(rendered.contains("(-∞.."));
        assert!(rendered.contains("+∞)"));
    }
}
