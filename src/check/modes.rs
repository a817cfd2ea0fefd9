//! Item-source rules for each check mode.
//!
//! The async collectors only fetch; projection from parsed documents into
//! `RawComponent`s is kept in plain functions.

use serde_json::Value;

use super::{Outcome, RawComponent};
use crate::cli::Mode;
use crate::redfish::documents::{
    ControllerDrives, DellSystemCollection, ManagerCollection, MemberCollection, PowerDocument,
    RollupCollection, StorageCollection, ThermalDocument, TypedMember,
};
use crate::redfish::{RedfishError, Session};

const STORAGE_PATH: &str = "/Systems/System.Embedded.1/Storage?$expand=*($levels=1)";
const MEMORY_PATH: &str = "/Systems/System.Embedded.1/Memory?$expand=*($levels=1)";
const POWER_PATH: &str = "/Chassis/System.Embedded.1/Power";
const THERMAL_PATH: &str = "/Chassis/System.Embedded.1/Thermal";
const ROLLUP_PATH: &str = "/Systems/System.Embedded.1/Oem/Dell/DellRollupStatus";
const DELL_SYSTEM_PATH: &str = "/Dell/Systems/System.Embedded.1/DellSystem";
const MANAGERS_PATH: &str = "/Managers?$expand=*($levels=1)";

/// Fetch and project the raw items for one evaluating mode.
pub async fn collect(session: &Session, mode: Mode) -> Result<Vec<RawComponent>, RedfishError> {
    match mode {
        Mode::Health => {
            let doc: RollupCollection = session.get(ROLLUP_PATH).await?;
            Ok(rollup_components(doc))
        }
        Mode::Controller => {
            let doc: StorageCollection = session.get(STORAGE_PATH).await?;
            Ok(controller_components(doc))
        }
        Mode::Disk => collect_disks(session).await,
        Mode::Powersupply => {
            let doc: PowerDocument = session.get(POWER_PATH).await?;
            Ok(doc.power_supplies.into_iter().map(health_member).collect())
        }
        Mode::Thermal => {
            let doc: ThermalDocument = session.get(THERMAL_PATH).await?;
            Ok(thermal_components(doc))
        }
        Mode::Memory => {
            let doc: MemberCollection = session.get(MEMORY_PATH).await?;
            Ok(doc.members.into_iter().map(health_member).collect())
        }
        Mode::Dellsystem => {
            let doc: DellSystemCollection = session.get(DELL_SYSTEM_PATH).await?;
            Ok(dellsystem_components(doc))
        }
        // handled by firmware_version
        Mode::Version => Ok(Vec::new()),
    }
}

/// Drives hang one fetch below their controller: expand the storage
/// collection, select each controller's drive list, then fetch every drive
/// individually for its rollup status.
async fn collect_disks(session: &Session) -> Result<Vec<RawComponent>, RedfishError> {
    let storage: StorageCollection = session.get(STORAGE_PATH).await?;
    let mut out = Vec::new();
    for controller in storage.members {
        let detail: ControllerDrives = session
            .get(&format!("{}?$select=Drives", controller.id))
            .await?;
        for drive_ref in detail.drives {
            let drive: TypedMember = session.get(&drive_ref.id).await?;
            out.push(RawComponent {
                kind: drive.odata_type.unwrap_or_default(),
                name: Some(drive.name.unwrap_or_default()),
                status: drive.status.health_rollup,
            });
        }
    }
    Ok(out)
}

/// Firmware version and model of the first manager; no evaluation.
pub async fn firmware_version(session: &Session) -> Result<Outcome, RedfishError> {
    let doc: ManagerCollection = session.get(MANAGERS_PATH).await?;
    let manager = doc
        .members
        .into_iter()
        .next()
        .ok_or_else(|| RedfishError::Payload {
            endpoint: MANAGERS_PATH.to_string(),
            detail: "manager collection is empty".to_string(),
        })?;
    Ok(Outcome::Version {
        firmware: manager.firmware_version.unwrap_or_default(),
        model: manager.model.unwrap_or_default(),
    })
}

/// Subsystem rollup entries, reported in ascending raw-status order.
fn rollup_components(doc: RollupCollection) -> Vec<RawComponent> {
    let mut members = doc.members;
    members.sort_by(|a, b| a.rollup_status.cmp(&b.rollup_status));
    members
        .into_iter()
        .map(|entry| RawComponent {
            kind: entry.instance_id.unwrap_or_default(),
            name: Some(entry.sub_system.unwrap_or_default()),
            status: entry.rollup_status,
        })
        .collect()
}

fn controller_components(doc: StorageCollection) -> Vec<RawComponent> {
    doc.members
        .into_iter()
        .map(|controller| RawComponent {
            kind: controller.description.unwrap_or_default(),
            name: Some(controller.name.unwrap_or_default()),
            status: controller.status.health_rollup,
        })
        .collect()
}

/// Fans, redundancy groups and temperature probes, in that fixed order.
fn thermal_components(doc: ThermalDocument) -> Vec<RawComponent> {
    doc.fans
        .into_iter()
        .chain(doc.redundancy)
        .chain(doc.temperatures)
        .map(health_member)
        .collect()
}

/// Every non-null `...RollupStatus` field of a DellSystem member becomes
/// its own pseudo-component, labeled by the field name without the suffix.
fn dellsystem_components(doc: DellSystemCollection) -> Vec<RawComponent> {
    let mut out = Vec::new();
    for member in &doc.members {
        for (field, value) in member {
            if !field.to_lowercase().contains("rollupstatus") {
                continue;
            }
            let status = match value {
                Value::Null => continue,
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            out.push(RawComponent {
                kind: field.replace("RollupStatus", ""),
                name: None,
                status: Some(status),
            });
        }
    }
    out
}

fn health_member(member: TypedMember) -> RawComponent {
    RawComponent {
        kind: member.odata_type.unwrap_or_default(),
        name: Some(member.name.unwrap_or_default()),
        status: member.status.health,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rollup_components_sorted_by_status() {
        let doc: RollupCollection = serde_json::from_value(json!({
            "Members": [
                {"InstanceID": "iDRAC.Embedded.1#SubSystem.1#Storage", "SubSystem": "Storage", "RollupStatus": "Warning"},
                {"InstanceID": "iDRAC.Embedded.1#SubSystem.1#CPU", "SubSystem": "CPU", "RollupStatus": "OK"},
                {"InstanceID": "iDRAC.Embedded.1#SubSystem.1#Fan", "SubSystem": "Fan", "RollupStatus": "Critical"}
            ]
        }))
        .unwrap();
        let components = rollup_components(doc);
        let order: Vec<&str> = components
            .iter()
            .map(|c| c.status.as_deref().unwrap())
            .collect();
        assert_eq!(order, vec!["Critical", "OK", "Warning"]);
        assert_eq!(components[0].kind, "iDRAC.Embedded.1#SubSystem.1#Fan");
        assert_eq!(components[0].name.as_deref(), Some("Fan"));
    }

    #[test]
    fn test_controller_components_labels() {
        let doc: StorageCollection = serde_json::from_value(json!({
            "Members": [{
                "@odata.id": "/redfish/v1/Systems/System.Embedded.1/Storage/RAID.Integrated.1-1",
                "Name": "PERC H730P Mini",
                "Description": "Integrated RAID Controller",
                "Status": {"Health": "OK", "HealthRollup": "Warning"}
            }]
        }))
        .unwrap();
        let components = controller_components(doc);
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].kind, "Integrated RAID Controller");
        assert_eq!(components[0].name.as_deref(), Some("PERC H730P Mini"));
        // controllers report the rollup, not their own health
        assert_eq!(components[0].status.as_deref(), Some("Warning"));
    }

    #[test]
    fn test_thermal_components_fixed_order() {
        let doc: ThermalDocument = serde_json::from_value(json!({
            "Temperatures": [{"Name": "CPU1 Temp", "Status": {"Health": "OK"}}],
            "Fans": [{"Name": "Fan1", "Status": {"Health": "OK"}}],
            "Redundancy": [{"Name": "System Board Fan Redundancy", "Status": {"Health": "OK"}}]
        }))
        .unwrap();
        let names: Vec<String> = thermal_components(doc)
            .into_iter()
            .map(|c| c.name.unwrap_or_default())
            .collect();
        assert_eq!(
            names,
            vec!["Fan1", "System Board Fan Redundancy", "CPU1 Temp"]
        );
    }

    #[test]
    fn test_dellsystem_filters_rollup_fields() {
        let doc: DellSystemCollection = serde_json::from_value(json!({
            "Members": [{
                "FooRollupStatus": "OK",
                "Bar": "x",
                "BazRollupStatus": null
            }]
        }))
        .unwrap();
        let components = dellsystem_components(doc);
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].kind, "Foo");
        assert!(components[0].name.is_none());
        assert_eq!(components[0].status.as_deref(), Some("OK"));
    }

    #[test]
    fn test_dellsystem_matches_case_insensitively() {
        let doc: DellSystemCollection = serde_json::from_value(json!({
            "Members": [{
                "StorageRollupStatus": "Degraded",
                "SELRollupStatus": "OK"
            }]
        }))
        .unwrap();
        let mut kinds: Vec<String> = dellsystem_components(doc)
            .into_iter()
            .map(|c| c.kind)
            .collect();
        kinds.sort();
        assert_eq!(kinds, vec!["SEL", "Storage"]);
    }

    #[test]
    fn test_health_member_reads_plain_health() {
        let member: TypedMember = serde_json::from_value(json!({
            "@odata.type": "#Power.v1_5_0.PowerSupply",
            "Name": "PS1 Status",
            "Status": {"Health": "Warning", "HealthRollup": "Critical"}
        }))
        .unwrap();
        let component = health_member(member);
        assert_eq!(component.kind, "#Power.v1_5_0.PowerSupply");
        assert_eq!(component.status.as_deref(), Some("Warning"));
    }
}
