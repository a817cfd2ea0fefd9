pub mod report;
pub mod severity;

pub use report::{ComponentReport, ModeResult, SeverityCounts};
pub use severity::{classify, Severity, NO_STATUS};
