//! Subsystem checks: per-mode item sources and the shared evaluator.
//!
//! Every mode reduces to the same pipeline: project raw Redfish items into
//! `RawComponent`s, classify each against the severity lattice, and fold
//! them into one `ModeResult`. Only the item source and the row labels
//! differ per mode.

mod modes;
mod render;

use crate::cli::Mode;
use crate::model::{classify, ComponentReport, ModeResult, SeverityCounts, NO_STATUS};
use crate::redfish::{RedfishError, Session};

/// Per-mode rendering descriptor.
pub struct ModeSpec {
    /// Subsystem noun for the summary line, e.g. "disk(s)".
    pub noun: &'static str,
    /// Table column headers, label cells first, health cell last.
    pub columns: &'static [&'static str],
}

/// One raw item projected out of a Redfish document, before classification.
#[derive(Debug, Clone)]
pub struct RawComponent {
    pub kind: String,
    pub name: Option<String>,
    pub status: Option<String>,
}

/// What a check invocation produces on success.
pub enum Outcome {
    Report(ModeResult),
    Version { firmware: String, model: String },
}

impl Outcome {
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::Report(result) => result.exit_code(),
            Outcome::Version { .. } => 0,
        }
    }

    pub fn render(&self, hostname: &str) -> String {
        match self {
            Outcome::Report(result) => render::mode_summary(result),
            Outcome::Version { firmware, model } => {
                render::version_summary(hostname, firmware, model)
            }
        }
    }
}

/// Run one check mode against an established session.
pub async fn run_mode(session: &Session, mode: Mode) -> Result<Outcome, RedfishError> {
    if mode == Mode::Version {
        return modes::firmware_version(session).await;
    }
    let raw = modes::collect(session, mode).await?;
    Ok(Outcome::Report(evaluate(raw, mode_spec(mode))))
}

fn mode_spec(mode: Mode) -> ModeSpec {
    match mode {
        Mode::Health => ModeSpec {
            noun: "component(s)",
            columns: &["Component", "Category", "Health"],
        },
        Mode::Controller => ModeSpec {
            noun: "controller(s)",
            columns: &["Description", "Name", "Health"],
        },
        Mode::Powersupply => ModeSpec {
            noun: "powersupplies",
            columns: &["Type", "Name", "Health"],
        },
        Mode::Disk => ModeSpec {
            noun: "disk(s)",
            columns: &["Type", "Name", "Health"],
        },
        Mode::Thermal => ModeSpec {
            noun: "thermal sensors",
            columns: &["Type", "Name", "Health"],
        },
        Mode::Memory => ModeSpec {
            noun: "memory modules",
            columns: &["Type", "Name", "Health"],
        },
        // version reports the manager directly and never renders a table
        Mode::Dellsystem | Mode::Version => ModeSpec {
            noun: "component(s)",
            columns: &["Component", "Health"],
        },
    }
}

/// Classify every raw component and fold the results.
fn evaluate(raw: Vec<RawComponent>, spec: ModeSpec) -> ModeResult {
    let mut counts = SeverityCounts::default();
    let mut components = Vec::with_capacity(raw.len());

    for item in raw {
        let severity = classify(item.status.as_deref());
        counts.record(severity);
        components.push(ComponentReport {
            kind: item.kind,
            name: item.name,
            status: item
                .status
                .map(|s| s.to_lowercase())
                .unwrap_or_else(|| NO_STATUS.to_string()),
            severity,
        });
    }

    ModeResult {
        components,
        counts,
        noun: spec.noun,
        columns: spec.columns,
    }
}
