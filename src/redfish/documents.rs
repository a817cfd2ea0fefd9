//! Partial Redfish document models.
//!
//! Only the fields the checks actually read are modeled; everything else in
//! the payload is ignored. iDRAC firmware revisions disagree on which
//! optional fields are present, so every field defaults when missing.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Common `Status` object carried by most Redfish resources.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceStatus {
    #[serde(default)]
    pub health: Option<String>,
    #[serde(default)]
    pub health_rollup: Option<String>,
}

/// Bare `@odata.id` reference to another resource.
#[derive(Debug, Clone, Deserialize)]
pub struct ODataRef {
    #[serde(rename = "@odata.id")]
    pub id: String,
}

/// Storage controller entry from the expanded Storage collection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StorageController {
    #[serde(rename = "@odata.id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: ResourceStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StorageCollection {
    #[serde(default)]
    pub members: Vec<StorageController>,
}

/// `?$select=Drives` projection of one storage controller.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ControllerDrives {
    #[serde(default)]
    pub drives: Vec<ODataRef>,
}

/// Generic member carrying `@odata.type`/`Name`/`Status`: drives, power
/// supplies, memory modules, fans, temperature probes.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TypedMember {
    #[serde(rename = "@odata.type", default)]
    pub odata_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: ResourceStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MemberCollection {
    #[serde(default)]
    pub members: Vec<TypedMember>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PowerDocument {
    #[serde(default)]
    pub power_supplies: Vec<TypedMember>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ThermalDocument {
    #[serde(default)]
    pub fans: Vec<TypedMember>,
    #[serde(default)]
    pub redundancy: Vec<TypedMember>,
    #[serde(default)]
    pub temperatures: Vec<TypedMember>,
}

/// One subsystem entry of the Dell rollup-status collection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RollupEntry {
    #[serde(rename = "InstanceID", default)]
    pub instance_id: Option<String>,
    #[serde(default)]
    pub sub_system: Option<String>,
    #[serde(default)]
    pub rollup_status: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RollupCollection {
    #[serde(default)]
    pub members: Vec<RollupEntry>,
}

/// DellSystem members carry an open-ended set of `...RollupStatus` fields
/// that varies by platform generation, so they stay an untyped map.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DellSystemCollection {
    #[serde(default)]
    pub members: Vec<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Manager {
    #[serde(default)]
    pub firmware_version: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ManagerCollection {
    #[serde(default)]
    pub members: Vec<Manager>,
}

/// Extended-error envelope returned with non-success responses.
#[derive(Debug, Default, Deserialize)]
pub struct FaultDocument {
    #[serde(default)]
    pub error: FaultBody,
}

#[derive(Debug, Default, Deserialize)]
pub struct FaultBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(rename = "@Message.ExtendedInfo", default)]
    pub extended_info: Vec<FaultMessage>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FaultMessage {
    #[serde(rename = "Message", default)]
    pub message: Option<String>,
}

impl FaultDocument {
    /// First extended-info message, falling back to the flat message field.
    pub fn first_message(&self) -> Option<&str> {
        self.error
            .extended_info
            .iter()
            .find_map(|m| m.message.as_deref())
            .or(self.error.message.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_fields_default_when_missing() {
        let member: TypedMember = serde_json::from_value(json!({
            "Name": "Fan 1"
        }))
        .unwrap();
        assert_eq!(member.name.as_deref(), Some("Fan 1"));
        assert!(member.status.health.is_none());
        assert!(member.status.health_rollup.is_none());
    }

    #[test]
    fn test_fault_prefers_extended_info() {
        let fault: FaultDocument = serde_json::from_value(json!({
            "error": {
                "message": "generic failure",
                "@Message.ExtendedInfo": [
                    {"Message": "The resource at the URI was not found."},
                    {"Message": "second entry"}
                ]
            }
        }))
        .unwrap();
        assert_eq!(
            fault.first_message(),
            Some("The resource at the URI was not found.")
        );
    }

    #[test]
    fn test_fault_falls_back_to_flat_message() {
        let fault: FaultDocument = serde_json::from_value(json!({
            "error": {"message": "generic failure"}
        }))
        .unwrap();
        assert_eq!(fault.first_message(), Some("generic failure"));

        let empty: FaultDocument = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty.first_message(), None);
    }
}
