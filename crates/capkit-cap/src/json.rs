//! JSON projection of the alert graph
//!
//! A straight structural dump: fields appear in declaration order and empty
//! optionals are kept (`""`, `[]`, or `null` for unset resource attributes),
//! unlike the XML writer which leaves them out.

use crate::alert::Alert;

impl Alert {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        to_json(self)
    }
}

/// Pretty-printed JSON with two-space indentation
pub fn to_json(alert: &Alert) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(alert)
}

/// Rebuild an alert from its JSON projection
pub fn from_json(json: &str) -> Result<Alert, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_alert_json() {
        let alert = Alert::new();
        let json = to_json(&alert).unwrap();
        assert_eq!(
            json,
            r#"{
  "identifier": "",
  "sender": "",
  "sent": "",
  "status": "Actual",
  "msgType": "Alert",
  "scope": "Public",
  "source": "",
  "restriction": "",
  "addresses": "",
  "code": "",
  "note": "",
  "references": "",
  "incidents": "",
  "infos": []
}"#
        );
    }

    #[test]
    fn test_empty_collections_are_kept() {
        let mut alert = Alert::new();
        alert.add_info().add_parameter("parameter_type", "silly");

        let json = to_json(&alert).unwrap();
        assert!(json.contains("\"resources\": []"));
        assert!(json.contains("\"areas\": []"));
        assert!(json.contains("\"valueName\": \"parameter_type\""));
    }

    #[test]
    fn test_unset_resource_attributes_are_null() {
        let mut alert = Alert::new();
        let resource = alert.add_info().add_resource("file");
        resource.mime_type = Some(String::new());

        let json = to_json(&alert).unwrap();
        assert!(json.contains("\"resourceDesc\": \"file\""));
        assert!(json.contains("\"mimeType\": \"\""));
        assert!(json.contains("\"size\": null"));
    }

    #[test]
    fn test_from_json_restores_graph() {
        let mut alert = Alert::new();
        alert.identifier = "json-1".to_string();
        let info = alert.add_info();
        info.add_category("Met");
        info.add_area("กรุงเทพมหานคร").add_circle("100.54386,13.81390 30.99990");

        let json = to_json(&alert).unwrap();
        let back = from_json(&json).unwrap();
        assert_eq!(back, alert);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(from_json("{ not json").is_err());
    }
}
