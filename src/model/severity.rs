//! Severity lattice and status classification shared by every check mode.

/// Sentinel recorded for components that carry no status at all.
pub const NO_STATUS: &str = "empty";

/// Nagios service states, ordered from least to most severe for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Ok,
    Warning,
    Unknown,
    Critical,
}

impl Severity {
    /// Label used as the summary-line prefix.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Ok => "OK",
            Severity::Warning => "WARNING",
            Severity::Unknown => "UNKNOWN",
            Severity::Critical => "CRITICAL",
        }
    }

    /// Process exit code consumed by the monitoring system.
    pub fn exit_code(self) -> u8 {
        match self {
            Severity::Ok => 0,
            Severity::Warning => 1,
            Severity::Critical => 2,
            Severity::Unknown => 3,
        }
    }

    /// Background color of the status cell in the HTML table.
    pub fn color(self) -> &'static str {
        match self {
            Severity::Ok => "#23a34e",
            Severity::Warning => "#ffa500",
            Severity::Unknown => "#eb7d34",
            Severity::Critical => "#ff5b33",
        }
    }
}

/// Map a raw health string onto the severity lattice.
///
/// Matching is case-insensitive and exact: `ok` and `warning` map to their
/// states, a missing value or the literal `empty` sentinel is `Unknown`, and
/// everything else (including vendor states like `Degraded`) is `Critical`.
pub fn classify(raw: Option<&str>) -> Severity {
    let Some(raw) = raw else {
        return Severity::Unknown;
    };
    match raw.to_lowercase().as_str() {
        "ok" => Severity::Ok,
        "warning" => Severity::Warning,
        NO_STATUS => Severity::Unknown,
        _ => Severity::Critical,
    }
}
