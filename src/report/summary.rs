//! Preparation summary report

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::schema::{AGE, CABIN, EMBARKED};
use crate::pipeline::{FittedParameters, MissingCount, PrepStats};

/// Summary of a preparation run, printed at the end of the CLI
#[derive(Debug)]
pub struct PreparationSummary<'a> {
    pub stats: &'a PrepStats,
    pub params: &'a FittedParameters,
}

impl<'a> PreparationSummary<'a> {
    pub fn new(stats: &'a PrepStats, params: &'a FittedParameters) -> Self {
        Self { stats, params }
    }

    /// Fill value used for a column, formatted for display
    fn fill_value(&self, column: &str, cabin_fill: &str) -> String {
        match column {
            AGE => self
                .params
                .age_median
                .map(|m| format!("{:.2}", m))
                .unwrap_or_else(|| "-".to_string()),
            EMBARKED => self.params.embarked_mode.clone().unwrap_or_else(|| "-".to_string()),
            CABIN => cabin_fill.to_string(),
            _ => "-".to_string(),
        }
    }

    fn count_cell(count: usize) -> Cell {
        Cell::new(count).fg(if count == 0 { Color::White } else { Color::Yellow })
    }

    /// Build the imputation table
    pub fn imputation_table(&self, cabin_fill: &str) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Column").add_attribute(Attribute::Bold),
            Cell::new("Filled (train)").add_attribute(Attribute::Bold),
            Cell::new("Filled (test)").add_attribute(Attribute::Bold),
            Cell::new("Fill value").add_attribute(Attribute::Bold),
        ]);

        for MissingCount { column, training, holdout } in &self.stats.filled {
            table.add_row(vec![
                Cell::new(column),
                Self::count_cell(*training),
                Self::count_cell(*holdout),
                Cell::new(self.fill_value(column, cabin_fill)).fg(Color::Cyan),
            ]);
        }

        table
    }

    /// Build the overview table
    pub fn overview_table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("🚂 Training rows"),
            Cell::new(self.stats.training_rows),
        ]);
        table.add_row(vec![
            Cell::new("🧪 Held-out rows"),
            Cell::new(self.stats.holdout_rows),
        ]);
        table.add_row(vec![
            Cell::new("📁 Input columns"),
            Cell::new(self.stats.input_columns),
        ]);
        if let Some(untitled) = &self.stats.untitled {
            table.add_row(vec![
                Cell::new("❔ Names without title"),
                Cell::new(format!("{} / {}", untitled.training, untitled.holdout)),
            ]);
        }
        table.add_row(vec![
            Cell::new("🔢 Indicator columns"),
            Cell::new(self.params.indicator_columns().len()),
        ]);
        table.add_row(vec![
            Cell::new("✅ Output columns"),
            Cell::new(self.stats.output_columns)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);

        table
    }

    pub fn display(&self, cabin_fill: &str) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("PREPARATION SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        // Indent the tables
        for line in self.overview_table().to_string().lines() {
            println!("    {}", line);
        }
        println!();
        for line in self.imputation_table(cabin_fill).to_string().lines() {
            println!("    {}", line);
        }

        if !self.params.encodings.is_empty() {
            println!();
            println!(
                "    {} {}",
                style("📝").cyan(),
                style("ENCODED COLUMNS").white().bold()
            );
            println!("    {}", style("─".repeat(50)).dim());

            for encoding in &self.params.encodings {
                println!();
                println!(
                    "      {} {}:",
                    style(&encoding.column).yellow(),
                    style(format!(
                        "(baseline: {})",
                        encoding.reference.as_deref().unwrap_or("none")
                    ))
                    .dim()
                );
                for name in encoding.indicator_names() {
                    println!("        {} {}", style("•").dim(), name);
                }
            }
        }
    }
}
