//! Evaluated component reports and the per-mode result they fold into.

use super::severity::Severity;

/// One evaluated hardware item.
#[derive(Debug, Clone)]
pub struct ComponentReport {
    /// First label cell (component type, description or instance id).
    pub kind: String,
    /// Second label cell; absent for modes with a single-label table.
    pub name: Option<String>,
    /// Normalized (lowercased) status as received, or the absence sentinel.
    pub status: String,
    pub severity: Severity,
}

/// Per-severity component counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeverityCounts {
    pub ok: usize,
    pub warning: usize,
    pub unknown: usize,
    pub critical: usize,
}

impl SeverityCounts {
    pub fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Ok => self.ok += 1,
            Severity::Warning => self.warning += 1,
            Severity::Unknown => self.unknown += 1,
            Severity::Critical => self.critical += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.ok + self.warning + self.unknown + self.critical
    }

    /// Everything that is not outright critical counts as healthy in the
    /// summary line; components without status are reported separately.
    pub fn healthy(&self) -> usize {
        self.ok + self.warning + self.unknown
    }
}

/// Outcome of evaluating one check mode.
#[derive(Debug, Clone)]
pub struct ModeResult {
    /// Reports in presentation order.
    pub components: Vec<ComponentReport>,
    pub counts: SeverityCounts,
    /// Subsystem noun for the summary line, e.g. "disk(s)".
    pub noun: &'static str,
    /// Table column headers, label cells first, health cell last.
    pub columns: &'static [&'static str],
}

impl ModeResult {
    /// Worst severity across all components for the summary label.
    ///
    /// Components without status never raise the label on their own; they
    /// only show up in the counters and the rendered rows.
    pub fn aggregate(&self) -> Severity {
        if self.counts.critical > 0 {
            Severity::Critical
        } else if self.counts.warning > 0 {
            Severity::Warning
        } else {
            Severity::Ok
        }
    }

    /// Process exit code: critical wins over warning; a result whose worst
    /// finding is a component without status maps to the dedicated
    /// unknown code instead of silently passing as OK.
    pub fn exit_code(&self) -> u8 {
        if self.counts.critical > 0 {
            Severity::Critical.exit_code()
        } else if self.counts.warning > 0 {
            Severity::Warning.exit_code()
        } else if self.counts.unknown > 0 {
            Severity::Unknown.exit_code()
        } else {
            Severity::Ok.exit_code()
        }
    }
}
