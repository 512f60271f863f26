use console::style;
use relatos_core::models::Coordinate;
use relatos_core::RelatosError;
use std::fmt;

/// How loudly a problem is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// Enhanced error type with suggestions
pub struct CliError {
    pub message: String,
    pub severity: Severity,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
    pub help_command: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
            context: None,
            suggestions: Vec::new(),
            help_command: None,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { severity: Severity::Warning, ..Self::new(message) }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_help(mut self, command: impl Into<String>) -> Self {
        self.help_command = Some(command.into());
        self
    }

    pub fn display(&self) {
        match self.severity {
            Severity::Warning => {
                eprintln!("{} {}\n", style("⚠").yellow().bold(), style(&self.message).yellow().bold())
            }
            Severity::Error => {
                eprintln!("{} {}\n", style("✗").red().bold(), style(&self.message).red().bold())
            }
        }

        if let Some(ref context) = self.context {
            eprintln!("{}", context);
            eprintln!();
        }

        if !self.suggestions.is_empty() {
            eprintln!("{}", style("To fix this:").yellow().bold());
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, suggestion);
            }
            eprintln!();
        }

        if let Some(ref help_cmd) = self.help_command {
            eprintln!("{} {}", style("Need help?").cyan(), style(help_cmd).cyan().bold());
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Create error for a document that is already registered
pub fn duplicate_reporter(name: &str, document: &str) -> CliError {
    CliError::warning(format!(
        "Reporter {} is already registered with document {}",
        name, document
    ))
    .with_context("Reporters cannot be updated once registered. Nothing was written.")
}

/// Create error for a report naming an unknown reporter
pub fn reporter_not_found(document: &str) -> CliError {
    CliError::new(format!("Reporter with document '{}' not found", document))
        .with_suggestion(format!(
            "Register the reporter first: relatos adicionar_relator <nome> {} <email> <telefone> <lat> <long>",
            document
        ))
        .with_help("Run: relatos adicionar_relato --help")
}

/// Create error for a report outside the acceptance radius
pub fn out_of_radius(distance_km: f64, radius_km: f64, center: Coordinate) -> CliError {
    CliError::new("The report is outside the allowed radius")
        .with_context(format!(
            "Report location is {:.2} km from the central point {}.\nReports must be within {} km.",
            distance_km, center, radius_km
        ))
        .with_suggestion("Check the latitude and longitude order (lat first, then long)")
        .with_suggestion("Check the configured center and radius: relatos status")
}

/// Create error for a date that is not YYYY-MM-DD
pub fn invalid_date(value: &str) -> CliError {
    CliError::new(format!("Invalid date '{}'", value))
        .with_context("Dates must be calendar dates written as YYYY-MM-DD.")
        .with_suggestion("Example: 2024-01-31")
}

/// Create error for a reporter that fails basic checks
pub fn invalid_reporter(reason: &str) -> CliError {
    CliError::new(format!("Invalid reporter: {}", reason))
        .with_help("Run: relatos adicionar_relator --help")
}

/// Map a business-rule rejection from the registry to a CLI message
pub fn from_rejection(error: &RelatosError, center: Coordinate) -> CliError {
    match error {
        RelatosError::DuplicateDocument { document } => duplicate_reporter("", document),
        RelatosError::ReporterNotFound { document } => reporter_not_found(document),
        RelatosError::OutOfRadius { distance_km, radius_km } => {
            out_of_radius(*distance_km, *radius_km, center)
        }
        RelatosError::InvalidDateFormat { value } => invalid_date(value),
        RelatosError::InvalidReporter { reason } => invalid_reporter(reason),
        other => CliError::new(other.to_string()),
    }
}

/// Convert anyhow::Error to CliError with context
pub fn from_anyhow(error: &anyhow::Error) -> CliError {
    let message = format!("{:#}", error);

    if message.contains("No such file or directory") {
        CliError::new("File not found")
            .with_context(format!("Error: {}", message))
            .with_suggestion("Check the file path and try again")
    } else if message.to_lowercase().contains("permission denied") {
        CliError::new("Permission denied")
            .with_context(format!("Error: {}", message))
            .with_suggestion("Check file permissions")
            .with_suggestion("Or point --reporters-file / --reports-file at a writable location")
    } else if message.contains("Invalid configuration value") {
        CliError::new("Invalid configuration")
            .with_context(format!("Error: {}", message))
            .with_suggestion("Check relatos.toml and RELATOS_* environment variables")
            .with_help("Run: relatos status")
    } else {
        CliError::new(message)
    }
}
