//! Terminal output: tables, JSON and status lines.

use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// How listings are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Rounded table
    #[default]
    Table,
    /// Pretty JSON array
    Json,
}

/// Renders `rows` in `format`.
pub fn render<T: Serialize + Tabled>(rows: &[T], format: OutputFormat) -> String {
    match format {
        OutputFormat::Table if rows.is_empty() => "(no rows)".to_string(),
        OutputFormat::Table => Table::new(rows).with(Style::rounded()).to_string(),
        OutputFormat::Json => {
            serde_json::to_string_pretty(rows).unwrap_or_else(|_| "[]".to_string())
        }
    }
}

/// Prints `rows` in `format`.
pub fn print_list<T: Serialize + Tabled>(rows: &[T], format: OutputFormat) {
    println!("{}", render(rows, format));
}

pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}

pub fn print_warning(msg: &str) {
    println!("! {msg}");
}

pub fn print_error(msg: &str) {
    eprintln!("error: {msg}");
}

/// Prints an indented `label: value` line.
pub fn print_field(label: &str, value: &str) {
    println!("    {:<10} {value}", format!("{label}:"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize, Tabled)]
    struct Row {
        name: &'static str,
        rooms: u32,
    }

    #[test]
    fn test_json_output_is_an_array() {
        let rows = [Row { name: "Lab", rooms: 2 }];
        let parsed: serde_json::Value =
            serde_json::from_str(&render(&rows, OutputFormat::Json)).unwrap();
        assert_eq!(parsed[0]["rooms"], 2);
    }

    #[test]
    fn test_empty_table() {
        let rows: [Row; 0] = [];
        assert_eq!(render(&rows, OutputFormat::Table), "(no rows)");
        assert_eq!(render(&rows, OutputFormat::Json), "[]");
    }
}
