// ─── Run Report ───
// Severity tags for operator-facing messages and the warning/error tally.

use std::fmt;

use tracing::level_filters::LevelFilter;
use tracing::{debug, error, info, warn, Level};

/// How serious an operator-facing message is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    /// Something unusual that needs no action, e.g. an overridden version.
    InfoWarn,
    Warning,
    Error,
}

impl Severity {
    /// Level the message is emitted at.
    pub const fn level(self) -> Level {
        match self {
            Severity::Info => Level::DEBUG,
            Severity::InfoWarn => Level::INFO,
            Severity::Warning => Level::WARN,
            Severity::Error => Level::ERROR,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::InfoWarn => "INFO-WARN",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Highest accepted verbosity.
pub const MAX_VERBOSITY: u8 = 4;

/// Verbosity threshold table.
///
/// 0 silent, 1 errors, 2 + warnings, 3 + info-warnings, 4 everything.
pub fn verbosity_filter(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::OFF,
        1 => LevelFilter::ERROR,
        2 => LevelFilter::WARN,
        3 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    }
}

/// Warning and error counts for one run (or one part of it).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub warnings: usize,
    pub errors: usize,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit `message` and count it.
    pub fn record(&mut self, severity: Severity, message: impl fmt::Display) {
        match severity {
            Severity::Info => debug!(severity = %severity, "{}", message),
            Severity::InfoWarn => info!(severity = %severity, "{}", message),
            Severity::Warning => {
                self.warnings += 1;
                warn!(severity = %severity, "{}", message)
            }
            Severity::Error => {
                self.errors += 1;
                error!(severity = %severity, "{}", message)
            }
        }
    }

    pub fn info(&mut self, message: impl fmt::Display) {
        self.record(Severity::Info, message);
    }

    pub fn info_warn(&mut self, message: impl fmt::Display) {
        self.record(Severity::InfoWarn, message);
    }

    pub fn warning(&mut self, message: impl fmt::Display) {
        self.record(Severity::Warning, message);
    }

    pub fn error(&mut self, message: impl fmt::Display) {
        self.record(Severity::Error, message);
    }

    pub fn merge(&mut self, other: RunSummary) {
        self.warnings += other.warnings;
        self.errors += other.errors;
    }

    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    /// Closing line of a run, e.g. `Completed with 1 error and 2 warnings.`
    pub fn closing_line(&self) -> String {
        if self.warnings + self.errors == 0 {
            return "Completed with no errors or warnings.".to_string();
        }
        format!(
            "Completed with {} and {}.",
            plural(self.errors, "error"),
            plural(self.warnings, "warning")
        )
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Join names as English prose: `a`, `a and b`, `a, b, and c`.
pub fn english_list(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [one] => one.clone(),
        [first, second] => format!("{first} and {second}"),
        [rest @ .., last] => format!("{}, and {}", rest.join(", "), last),
    }
}
