//! Reader for CAP 1.2 XML documents
//!
//! Missing elements are not errors: every absent field reads as an empty
//! string (or `None` for resource attributes), so partial or non-conforming
//! alerts still produce a best-effort [`Alert`]. Only malformed markup fails.
//!
//! Only the first `<info>` block is read. Further blocks are skipped.

use crate::alert::{Alert, Area, Info, NameValue, Resource};
use crate::dom::{Document, TreeQuery};
use crate::error::ParseError;
use crate::CAP_NAMESPACE;
use tracing::debug;

/// Parse a CAP alert from XML text
pub fn parse_alert(xml: &str) -> Result<Alert, ParseError> {
    let document = Document::parse(xml)?;
    Ok(alert_from_document(&document))
}

/// Parse a CAP alert from UTF-8 XML bytes
pub fn parse_alert_bytes(xml: &[u8]) -> Result<Alert, ParseError> {
    parse_alert(std::str::from_utf8(xml)?)
}

/// Build an alert from an already-parsed document
///
/// A document without an `<alert>` root yields an alert whose fields are
/// all empty.
pub fn alert_from_document(document: &Document) -> Alert {
    let root = document.find_root("alert");
    match root.and_then(|alert| alert.namespace()) {
        Some(CAP_NAMESPACE) | None => {}
        Some(other) => debug!(namespace = other, "alert root is not in the CAP 1.2 namespace"),
    }
    alert_from_tree(root)
}

/// Build an alert from an `<alert>` node of any tree implementing [`TreeQuery`]
pub fn alert_from_tree<N: TreeQuery>(node: Option<&N>) -> Alert {
    let mut alert = Alert {
        identifier: text_of(node, "identifier"),
        sender: text_of(node, "sender"),
        sent: text_of(node, "sent"),
        status: text_of(node, "status").into(),
        msg_type: text_of(node, "msgType").into(),
        source: text_of(node, "source"),
        scope: text_of(node, "scope").into(),
        restriction: text_of(node, "restriction"),
        addresses: text_of(node, "addresses"),
        code: text_of(node, "code"),
        note: text_of(node, "note"),
        references: text_of(node, "references"),
        incidents: text_of(node, "incidents"),
        infos: Vec::new(),
    };

    if let Some(alert_node) = node {
        let info_nodes = alert_node.children_named("info");
        if let Some(first) = info_nodes.first() {
            alert.infos.push(parse_info(*first));
        }
        if info_nodes.len() > 1 {
            debug!(
                identifier = %alert.identifier,
                ignored = info_nodes.len() - 1,
                "only the first <info> block is read"
            );
        }
    }

    debug!(
        identifier = %alert.identifier,
        infos = alert.infos.len(),
        "parsed CAP alert"
    );
    alert
}

fn parse_info<N: TreeQuery>(node: &N) -> Info {
    let mut info = Info::new();
    info.language = node.child_text("language");
    for category in node.children_named("category") {
        info.add_category(category.text());
    }
    info.event = node.child_text("event");
    for response_type in node.children_named("responseType") {
        info.add_response_type(response_type.text());
    }
    info.urgency = node.child_text("urgency").into();
    info.severity = node.child_text("severity").into();
    info.certainty = node.child_text("certainty").into();
    info.audience = node.child_text("audience");
    info.event_codes = name_values(node, "eventCode");
    info.effective = node.child_text("effective");
    info.onset = node.child_text("onset");
    info.expires = node.child_text("expires");
    info.sender_name = node.child_text("senderName");
    info.headline = node.child_text("headline");
    info.description = node.child_text("description");
    info.instruction = node.child_text("instruction");
    info.web = node.child_text("web");
    info.contact = node.child_text("contact");
    info.resources = node
        .children_named("resource")
        .into_iter()
        .map(parse_resource)
        .collect();
    info.parameters = name_values(node, "parameter");
    info.areas = node
        .children_named("area")
        .into_iter()
        .map(parse_area)
        .collect();
    info
}

fn parse_resource<N: TreeQuery>(node: &N) -> Resource {
    Resource {
        resource_desc: node.child_text("resourceDesc"),
        mime_type: optional_text(node, "mimeType"),
        size: optional_text(node, "size"),
        uri: optional_text(node, "uri"),
        digest: optional_text(node, "digest"),
    }
}

fn parse_area<N: TreeQuery>(node: &N) -> Area {
    Area {
        area_desc: node.child_text("areaDesc"),
        polygons: texts(node, "polygon"),
        circles: texts(node, "circle"),
        geocodes: name_values(node, "geocode"),
        altitude: node.child_text("altitude"),
        ceiling: node.child_text("ceiling"),
    }
}

/// Text of a child of a node that may itself be absent
fn text_of<N: TreeQuery>(parent: Option<&N>, name: &str) -> String {
    parent
        .map(|node| node.child_text(name))
        .unwrap_or_default()
}

/// `None` when the element is absent, its text (possibly empty) otherwise
fn optional_text<N: TreeQuery>(parent: &N, name: &str) -> Option<String> {
    parent.first_child(name).map(|node| node.text())
}

fn texts<N: TreeQuery>(parent: &N, name: &str) -> Vec<String> {
    parent
        .children_named(name)
        .into_iter()
        .map(|node| node.text())
        .collect()
}

fn name_values<N: TreeQuery>(parent: &N, name: &str) -> Vec<NameValue> {
    parent
        .children_named(name)
        .into_iter()
        .map(|node| NameValue::new(node.child_text("valueName"), node.child_text("value")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Element;
    use crate::vocab::{Category, Certainty, MsgType, ResponseType, Scope, Status, Urgency};

    const EXAMPLE_CAP: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<alert xmlns="urn:oasis:names:tc:emergency:cap:1.2">
  <identifier>KSTO1055887203</identifier>
  <sender>KSTO@NWS.NOAA.GOV</sender>
  <sent>2003-06-17T14:57:00-07:00</sent>
  <status>Actual</status>
  <msgType>Alert</msgType>
  <scope>Public</scope>
  <info>
    <category>Met</category>
    <event>SEVERE THUNDERSTORM</event>
    <responseType>Shelter</responseType>
    <urgency>Immediate</urgency>
    <severity>Severe</severity>
    <certainty>Observed</certainty>
    <eventCode>
      <valueName>SAME</valueName>
      <value>SVR</value>
    </eventCode>
    <expires>2003-06-17T16:00:00-07:00</expires>
    <senderName>NATIONAL WEATHER SERVICE SACRAMENTO CA</senderName>
    <headline>SEVERE THUNDERSTORM WARNING</headline>
    <description>AT 254 PM PDT...HAIL &amp; WIND &lt; 60 MPH</description>
    <resource>
      <resourceDesc>Radar image</resourceDesc>
      <mimeType>image/gif</mimeType>
    </resource>
    <area>
      <areaDesc>EXTREME NORTH CENTRAL TUOLUMNE COUNTY IN CALIFORNIA</areaDesc>
      <polygon>38.47,-120.14 38.34,-119.95 38.52,-119.74 38.62,-119.89 38.47,-120.14</polygon>
      <geocode>
        <valueName>SAME</valueName>
        <value>006109</value>
      </geocode>
    </area>
  </info>
</alert>"#;

    #[test]
    fn test_parse_alert() {
        let alert = parse_alert(EXAMPLE_CAP).expect("Failed to parse CAP");

        assert_eq!(alert.identifier, "KSTO1055887203");
        assert_eq!(alert.sender, "KSTO@NWS.NOAA.GOV");
        assert_eq!(alert.sent, "2003-06-17T14:57:00-07:00");
        assert_eq!(alert.status, Status::Actual);
        assert_eq!(alert.msg_type, MsgType::Alert);
        assert_eq!(alert.scope, Scope::Public);
        assert_eq!(alert.source, "");
        assert_eq!(alert.infos.len(), 1);

        let info = &alert.infos[0];
        assert_eq!(info.language, "");
        assert_eq!(info.categories, vec![Category::Met]);
        assert_eq!(info.response_types, vec![ResponseType::Shelter]);
        assert_eq!(info.urgency, Urgency::Immediate);
        assert_eq!(info.certainty, Certainty::Observed);
        assert_eq!(info.event_codes, vec![NameValue::new("SAME", "SVR")]);
        assert_eq!(info.description, "AT 254 PM PDT...HAIL & WIND < 60 MPH");
        assert_eq!(info.onset, "");
    }

    #[test]
    fn test_parse_resource_optionals() {
        let alert = parse_alert(EXAMPLE_CAP).unwrap();
        let resource = &alert.infos[0].resources[0];
        assert_eq!(resource.resource_desc, "Radar image");
        assert_eq!(resource.mime_type.as_deref(), Some("image/gif"));
        assert_eq!(resource.size, None);
        assert_eq!(resource.uri, None);
        assert_eq!(resource.digest, None);
    }

    #[test]
    fn test_parse_area() {
        let alert = parse_alert(EXAMPLE_CAP).unwrap();
        let area = &alert.infos[0].areas[0];
        assert_eq!(area.polygons.len(), 1);
        assert!(area.circles.is_empty());
        assert_eq!(area.geocodes, vec![NameValue::new("SAME", "006109")]);
        assert_eq!(area.altitude, "");
    }

    #[test]
    fn test_parse_bytes() {
        let alert = parse_alert_bytes(EXAMPLE_CAP.as_bytes()).unwrap();
        assert_eq!(alert.identifier, "KSTO1055887203");
        assert!(parse_alert_bytes(&[0x3c, 0xff, 0xfe]).is_err());
    }

    #[test]
    fn test_missing_root_yields_empty_alert() {
        let alert = parse_alert("<notcap><identifier>x</identifier></notcap>").unwrap();
        assert_eq!(alert.identifier, "");
        assert_eq!(alert.status, Status::Raw(String::new()));
        assert_eq!(alert.msg_type.as_str(), "");
        assert!(alert.infos.is_empty());
    }

    #[test]
    fn test_empty_document_yields_empty_alert() {
        let alert = parse_alert("").unwrap();
        assert_eq!(alert.sender, "");
        assert!(alert.infos.is_empty());
    }

    #[test]
    fn test_only_first_info_is_read() {
        let xml = r#"<alert xmlns="urn:oasis:names:tc:emergency:cap:1.2">
  <info><language>en-US</language><event>first</event></info>
  <info><language>es-US</language><event>second</event></info>
</alert>"#;
        let alert = parse_alert(xml).unwrap();
        assert_eq!(alert.infos.len(), 1);
        assert_eq!(alert.infos[0].event, "first");
    }

    #[test]
    fn test_malformed_markup_is_error() {
        assert!(parse_alert("<alert><identifier>x</alert>").is_err());
        let err = parse_alert("<alert><identifier>x</identifier>").unwrap_err();
        assert!(matches!(err, ParseError::UnclosedElement(name) if name == "alert"));
        assert!(parse_alert("<alert>&bogus;</alert>").is_err());
    }

    #[test]
    fn test_non_vocabulary_values_are_preserved() {
        let xml = "<alert><status>actual</status><scope>Everyone</scope></alert>";
        let alert = parse_alert(xml).unwrap();
        assert_eq!(alert.status, Status::Raw("actual".to_string()));
        assert_eq!(alert.scope.as_str(), "Everyone");
    }

    #[test]
    fn test_alert_from_hand_built_tree() {
        let tree = Element::new("alert")
            .with_child(Element::new("identifier").with_text("built"))
            .with_child(
                Element::new("info").with_child(
                    Element::new("area")
                        .with_child(Element::new("circle").with_text("0,0 1"))
                        .with_child(Element::new("circle").with_text("1,1 2")),
                ),
            );

        let alert = alert_from_tree(Some(&tree));
        assert_eq!(alert.identifier, "built");
        assert_eq!(alert.infos[0].areas[0].circles, vec!["0,0 1", "1,1 2"]);
        assert_eq!(alert.infos[0].areas[0].area_desc, "");
    }

    #[test]
    fn test_absent_node_yields_defaults() {
        let alert = alert_from_tree::<Element>(None);
        assert_eq!(alert.identifier, "");
        assert!(alert.infos.is_empty());
    }
}
