//! Plain-text summary line and HTML table rendering.

use std::fmt::Write;

use crate::model::ModeResult;

/// Summary line plus the per-component HTML table.
///
/// The line format is fixed; monitoring systems parse it:
/// `<LABEL>: <healthy>/<total> <noun> are healthy. <n> without status.`
pub fn mode_summary(result: &ModeResult) -> String {
    format!(
        "{}: {}/{} {} are healthy. {} without status.\n{}",
        result.aggregate().label(),
        result.counts.healthy(),
        result.counts.total(),
        result.noun,
        result.counts.unknown,
        html_table(result),
    )
}

pub fn version_summary(hostname: &str, firmware: &str, model: &str) -> String {
    format!("OK: iDRAC '{hostname}' reachable. Version '{firmware}' / Model '{model}'")
}

fn html_table(result: &ModeResult) -> String {
    let mut rows = String::from("<tr>");
    for column in result.columns {
        let _ = write!(rows, "<th>{column}</th>");
    }
    rows.push_str("</tr>");

    for component in &result.components {
        rows.push_str("<tr>");
        let _ = write!(rows, "<td>{}</td>", component.kind);
        if let Some(name) = &component.name {
            let _ = write!(rows, "<td>{name}</td>");
        }
        let _ = write!(
            rows,
            "<td style=\"background-color:{}\">{}</td>",
            component.severity.color(),
            component.status.to_uppercase()
        );
        rows.push_str("</tr>");
    }

    format!("<table>{rows}</table>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ComponentReport, Severity, SeverityCounts};

    fn disk_result(components: Vec<ComponentReport>) -> ModeResult {
        let mut counts = SeverityCounts::default();
        for component in &components {
            counts.record(component.severity);
        }
        ModeResult {
            components,
            counts,
            noun: "disk(s)",
            columns: &["Type", "Name", "Health"],
        }
    }

    fn report(status: &str, severity: Severity) -> ComponentReport {
        ComponentReport {
            kind: "#Drive.v1_9_0.Drive".to_string(),
            name: Some("Disk 0".to_string()),
            status: status.to_string(),
            severity,
        }
    }

    #[test]
    fn test_summary_line_format() {
        let output = mode_summary(&disk_result(vec![
            report("ok", Severity::Ok),
            report("warning", Severity::Warning),
            report("empty", Severity::Unknown),
        ]));
        assert!(output.starts_with("WARNING: 3/3 disk(s) are healthy. 1 without status.\n"));
    }

    #[test]
    fn test_table_header_and_colored_cells() {
        let output = mode_summary(&disk_result(vec![report("critical", Severity::Critical)]));
        assert!(output.contains("<tr><th>Type</th><th>Name</th><th>Health</th></tr>"));
        assert!(output.contains(
            "<tr><td>#Drive.v1_9_0.Drive</td><td>Disk 0</td>\
             <td style=\"background-color:#ff5b33\">CRITICAL</td></tr>"
        ));
    }

    #[test]
    fn test_single_label_rows_omit_name_cell() {
        let result = ModeResult {
            components: vec![ComponentReport {
                kind: "Fan".to_string(),
                name: None,
                status: "ok".to_string(),
                severity: Severity::Ok,
            }],
            counts: SeverityCounts {
                ok: 1,
                ..Default::default()
            },
            noun: "component(s)",
            columns: &["Component", "Health"],
        };
        let output = mode_summary(&result);
        assert!(output.contains("<tr><th>Component</th><th>Health</th></tr>"));
        assert!(output
            .contains("<tr><td>Fan</td><td style=\"background-color:#23a34e\">OK</td></tr>"));
    }

    #[test]
    fn test_empty_result_renders_header_only() {
        let output = mode_summary(&disk_result(Vec::new()));
        assert!(output.starts_with("OK: 0/0 disk(s) are healthy. 0 without status.\n"));
        assert!(output.ends_with("<table><tr><th>Type</th><th>Name</th><th>Health</th></tr></table>"));
    }

    #[test]
    fn test_version_summary() {
        assert_eq!(
            version_summary("idrac.example.com", "4.40.00.00", "14G Monolithic"),
            "OK: iDRAC 'idrac.example.com' reachable. Version '4.40.00.00' / Model '14G Monolithic'"
        );
    }
}
