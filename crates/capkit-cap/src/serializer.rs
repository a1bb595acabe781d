//! XML serialization for CAP alerts
//!
//! Elements are written in the order fixed by the CAP 1.2 schema. Optional
//! elements with empty values are left out entirely. Indentation is two
//! spaces per nesting level, derived from the depth passed down each call.

use crate::alert::{Alert, Area, Info, NameValue, Resource};
use crate::escape::normalize;
use crate::CAP_NAMESPACE;
use tracing::debug;

/// Serialize an alert to CAP 1.2 XML
///
/// Blank area descriptions are replaced with
/// [`UNSPECIFIED_AREA`](crate::alert::UNSPECIFIED_AREA) first, and the
/// replacement stays in `alert`.
pub fn serialize_alert(alert: &mut Alert) -> String {
    alert.apply_area_defaults();

    let mut xml = String::with_capacity(1024);
    xml.push_str("<alert xmlns=\"");
    xml.push_str(CAP_NAMESPACE);
    xml.push_str("\">\n");
    write_alert_body(&mut xml, alert, 1);
    xml.push_str("</alert>");

    debug!(
        identifier = %alert.identifier,
        infos = alert.infos.len(),
        bytes = xml.len(),
        "serialized CAP alert"
    );
    xml
}

impl Alert {
    /// See [`serialize_alert`]
    pub fn to_xml(&mut self) -> String {
        serialize_alert(self)
    }
}

fn write_alert_body(xml: &mut String, alert: &Alert, depth: usize) {
    write_element(xml, depth, "identifier", &alert.identifier);
    write_element(xml, depth, "sender", &alert.sender);
    write_element(xml, depth, "sent", &alert.sent);
    write_element(xml, depth, "status", alert.status.as_str());
    write_element(xml, depth, "msgType", alert.msg_type.as_str());
    write_optional(xml, depth, "source", &alert.source);
    write_element(xml, depth, "scope", alert.scope.as_str());
    write_optional(xml, depth, "restriction", &alert.restriction);
    write_optional(xml, depth, "addresses", &alert.addresses);
    write_optional(xml, depth, "code", &alert.code);
    write_optional(xml, depth, "note", &alert.note);
    write_optional(xml, depth, "references", &alert.references);
    write_optional(xml, depth, "incidents", &alert.incidents);

    for info in &alert.infos {
        open_tag(xml, depth, "info");
        write_info(xml, info, depth + 1);
        close_tag(xml, depth, "info");
    }
}

fn write_info(xml: &mut String, info: &Info, depth: usize) {
    write_element(xml, depth, "language", &info.language);
    for category in &info.categories {
        write_element(xml, depth, "category", category.as_str());
    }
    write_element(xml, depth, "event", &info.event);
    for response_type in &info.response_types {
        write_element(xml, depth, "responseType", response_type.as_str());
    }
    write_element(xml, depth, "urgency", info.urgency.as_str());
    write_element(xml, depth, "severity", info.severity.as_str());
    write_element(xml, depth, "certainty", info.certainty.as_str());
    write_optional(xml, depth, "audience", &info.audience);
    for event_code in &info.event_codes {
        write_name_value(xml, depth, "eventCode", event_code);
    }
    write_optional(xml, depth, "effective", &info.effective);
    write_optional(xml, depth, "onset", &info.onset);
    write_optional(xml, depth, "expires", &info.expires);
    write_optional(xml, depth, "senderName", &info.sender_name);
    write_optional(xml, depth, "headline", &info.headline);
    write_optional(xml, depth, "description", &info.description);
    write_optional(xml, depth, "instruction", &info.instruction);
    write_optional(xml, depth, "web", &info.web);
    write_optional(xml, depth, "contact", &info.contact);
    for parameter in &info.parameters {
        write_name_value(xml, depth, "parameter", parameter);
    }
    for resource in &info.resources {
        open_tag(xml, depth, "resource");
        write_resource(xml, resource, depth + 1);
        close_tag(xml, depth, "resource");
    }
    for area in &info.areas {
        open_tag(xml, depth, "area");
        write_area(xml, area, depth + 1);
        close_tag(xml, depth, "area");
    }
}

fn write_resource(xml: &mut String, resource: &Resource, depth: usize) {
    write_element(xml, depth, "resourceDesc", &resource.resource_desc);
    for (name, value) in [
        ("mimeType", &resource.mime_type),
        ("size", &resource.size),
        ("uri", &resource.uri),
        ("digest", &resource.digest),
    ] {
        if let Some(value) = value {
            write_optional(xml, depth, name, value);
        }
    }
}

fn write_area(xml: &mut String, area: &Area, depth: usize) {
    write_element(xml, depth, "areaDesc", &area.area_desc);
    for polygon in &area.polygons {
        write_element(xml, depth, "polygon", polygon);
    }
    for circle in &area.circles {
        write_element(xml, depth, "circle", circle);
    }
    for geocode in &area.geocodes {
        write_name_value(xml, depth, "geocode", geocode);
    }
    write_optional(xml, depth, "altitude", &area.altitude);
    write_optional(xml, depth, "ceiling", &area.ceiling);
}

fn write_name_value(xml: &mut String, depth: usize, tag: &str, pair: &NameValue) {
    open_tag(xml, depth, tag);
    write_element(xml, depth + 1, "valueName", &pair.value_name);
    write_element(xml, depth + 1, "value", &pair.value);
    close_tag(xml, depth, tag);
}

/// `<tag>value</tag>` on its own line, written even when `value` is empty
fn write_element(xml: &mut String, depth: usize, tag: &str, value: &str) {
    indent(xml, depth);
    xml.push('<');
    xml.push_str(tag);
    xml.push('>');
    xml.push_str(&normalize(value));
    xml.push_str("</");
    xml.push_str(tag);
    xml.push_str(">\n");
}

fn write_optional(xml: &mut String, depth: usize, tag: &str, value: &str) {
    if !value.is_empty() {
        write_element(xml, depth, tag, value);
    }
}

fn open_tag(xml: &mut String, depth: usize, tag: &str) {
    indent(xml, depth);
    xml.push('<');
    xml.push_str(tag);
    xml.push_str(">\n");
}

fn close_tag(xml: &mut String, depth: usize, tag: &str) {
    indent(xml, depth);
    xml.push_str("</");
    xml.push_str(tag);
    xml.push_str(">\n");
}

fn indent(xml: &mut String, depth: usize) {
    for _ in 0..depth {
        xml.push_str("  ");
    }
}
