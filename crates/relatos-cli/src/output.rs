use crate::errors::{CliError, Severity};
use console::style;
use relatos_core::models::Report;
use serde::Serialize;
use std::fmt::Display;
use tabled::{settings::Style, Table, Tabled};

/// Output format mode
#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Human,
    Json,
}

pub struct OutputWriter {
    format: OutputFormat,
}

fn print_json(value: &serde_json::Value) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()));
}

fn eprint_json(value: &serde_json::Value) {
    eprintln!("{}", serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()));
}

impl OutputWriter {
    pub fn new(json: bool) -> Self {
        Self {
            format: if json {
                OutputFormat::Json
            } else {
                OutputFormat::Human
            },
        }
    }

    pub fn success(&self, message: impl Display) {
        match self.format {
            OutputFormat::Human => {
                println!("{} {}", style("✓").green().bold(), message);
            }
            OutputFormat::Json => {
                print_json(&serde_json::json!({
                    "status": "success",
                    "message": message.to_string(),
                }));
            }
        }
    }

    pub fn info(&self, message: impl Display) {
        match self.format {
            OutputFormat::Human => {
                println!("{} {}", style("ℹ").blue().bold(), message);
            }
            OutputFormat::Json => {
                print_json(&serde_json::json!({
                    "status": "info",
                    "message": message.to_string(),
                }));
            }
        }
    }

    pub fn warning(&self, message: impl Display) {
        match self.format {
            OutputFormat::Human => {
                eprintln!("{} {}", style("⚠").yellow().bold(), message);
            }
            OutputFormat::Json => {
                eprint_json(&serde_json::json!({
                    "status": "warning",
                    "message": message.to_string(),
                }));
            }
        }
    }

    /// Report a business-rule rejection. Not a process failure.
    pub fn rejection(&self, error: &CliError) {
        match self.format {
            OutputFormat::Human => error.display(),
            OutputFormat::Json => {
                let status = match error.severity {
                    Severity::Warning => "warning",
                    Severity::Error => "rejected",
                };
                print_json(&serde_json::json!({
                    "status": status,
                    "message": error.message,
                    "suggestions": error.suggestions,
                }));
            }
        }
    }

    /// Print a table (human output only; JSON callers go through `result`)
    pub fn table<T: Tabled>(&self, data: Vec<T>) {
        if let OutputFormat::Human = self.format {
            if data.is_empty() {
                println!("{}", style("(no data)").dim());
            } else {
                let mut table = Table::new(data);
                table.with(Style::rounded());
                println!("{}", table);
            }
        }
    }

    pub fn result<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Human => {
                println!("{}", serde_json::to_string_pretty(&data)?);
            }
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "status": "success",
                    "data": data,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
        }
        Ok(())
    }

    pub fn kv(&self, key: impl Display, value: impl Display) {
        match self.format {
            OutputFormat::Human => {
                println!("{}: {}", style(key).bold(), value);
            }
            OutputFormat::Json => {
                print_json(&serde_json::json!({
                    key.to_string(): value.to_string(),
                }));
            }
        }
    }

    pub fn section(&self, title: impl Display) {
        match self.format {
            OutputFormat::Human => {
                println!("\n{}", style(title).bold().underlined());
            }
            OutputFormat::Json => {}
        }
    }

    /// Print one report as a card (human output only; JSON callers go through `result`)
    pub fn report(&self, report: &Report) {
        if let OutputFormat::Human = self.format {
            println!();
            println!("{}", style("Incident Report").cyan().bold());
            println!("{}: {}", style("Type").bold(), report.kind);
            println!("{}: {}", style("Description").bold(), report.description);
            println!(
                "{}: {}  {}: {}",
                style("Date").bold(),
                report.date,
                style("Time").bold(),
                report.time
            );
            println!("{}: {}", style("Location").bold(), report.location);
            match &report.reporter {
                Some(reporter) => println!("{}: {}", style("Reporter").bold(), reporter.name),
                None => println!("{} Reporter not found", style("⚠").yellow().bold()),
            }
            println!("{}", "=".repeat(40));
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }
}
