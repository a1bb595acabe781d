//! CAP alert message structures

use crate::vocab::{Category, Certainty, MsgType, ResponseType, Scope, Severity, Status, Urgency};
use chrono::{DateTime, FixedOffset, SecondsFormat, TimeZone};
use serde::{Deserialize, Serialize};

/// Area description written when an `<area>` is serialized with a blank one
pub const UNSPECIFIED_AREA: &str = "Unspecified Area";

/// CAP alert message, the top-level envelope
///
/// Required CAP fields are not enforced here. Optional fields are plain
/// strings where empty means absent; the XML writer omits them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Alert {
    /// Unique identifier assigned by the sender
    pub identifier: String,
    /// Identifier of the originator
    pub sender: String,
    /// Time and date of origination (CAP timestamp text)
    pub sent: String,
    pub status: Status,
    pub msg_type: MsgType,
    pub scope: Scope,
    /// Particular source of this alert, e.g. an operator
    pub source: String,
    /// Rule for limiting distribution of a restricted alert
    pub restriction: String,
    /// Space-separated group listing of intended recipients
    pub addresses: String,
    /// Code denoting special handling
    pub code: String,
    pub note: String,
    /// Space-separated `sender,identifier,sent` triples of earlier messages
    pub references: String,
    pub incidents: String,
    pub infos: Vec<Info>,
}

/// One alert-information block
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Info {
    /// RFC 3066 language code; CAP treats empty as "en-US"
    pub language: String,
    pub categories: Vec<Category>,
    /// Text denoting the type of the subject event
    pub event: String,
    pub response_types: Vec<ResponseType>,
    pub urgency: Urgency,
    pub severity: Severity,
    pub certainty: Certainty,
    pub audience: String,
    pub event_codes: Vec<NameValue>,
    pub effective: String,
    pub onset: String,
    pub expires: String,
    pub sender_name: String,
    pub headline: String,
    pub description: String,
    pub instruction: String,
    pub web: String,
    pub contact: String,
    pub resources: Vec<Resource>,
    pub parameters: Vec<NameValue>,
    pub areas: Vec<Area>,
}

/// Additional file referenced by an info block
///
/// The optional attributes stay `None` until explicitly set, which is
/// distinct from being set to an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Resource {
    pub resource_desc: String,
    pub mime_type: Option<String>,
    /// Size in bytes, as text
    pub size: Option<String>,
    pub uri: Option<String>,
    /// SHA-1 digest of the resource
    pub digest: Option<String>,
}

/// Geographic area affected by an info block
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Area {
    pub area_desc: String,
    /// Closed rings of `lat,lon` pairs separated by spaces
    pub polygons: Vec<String>,
    /// `lat,lon radius` with radius in kilometers
    pub circles: Vec<String>,
    pub geocodes: Vec<NameValue>,
    /// Altitude in feet above mean sea level
    pub altitude: String,
    /// Maximum altitude in feet, only meaningful with `altitude`
    pub ceiling: String,
}

/// `valueName`/`value` pair used by eventCode, parameter and geocode
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NameValue {
    pub value_name: String,
    pub value: String,
}

impl NameValue {
    pub fn new(value_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            value_name: value_name.into(),
            value: value.into(),
        }
    }
}

impl Alert {
    /// Create an empty alert with status Actual, msgType Alert and scope Public
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new, empty info block and return it for population
    pub fn add_info(&mut self) -> &mut Info {
        self.infos.push(Info::default());
        let last = self.infos.len() - 1;
        &mut self.infos[last]
    }

    /// Parse `sent` as a CAP timestamp
    pub fn sent_time(&self) -> Option<DateTime<FixedOffset>> {
        parse_cap_timestamp(&self.sent)
    }

    /// The `sender,identifier,sent` triple other alerts use to reference this one
    pub fn reference_string(&self) -> String {
        format!("{},{},{}", self.sender, self.identifier, self.sent)
    }

    /// Replace every blank area description with [`UNSPECIFIED_AREA`]
    ///
    /// The XML writer calls this before rendering, so serializing an alert
    /// leaves the substitution visible in memory.
    pub fn apply_area_defaults(&mut self) {
        for area in self.infos.iter_mut().flat_map(|info| info.areas.iter_mut()) {
            if area.area_desc.is_empty() {
                area.area_desc = UNSPECIFIED_AREA.to_string();
            }
        }
    }
}

impl Info {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_category(&mut self, category: impl Into<Category>) {
        self.categories.push(category.into());
    }

    pub fn add_response_type(&mut self, response_type: impl Into<ResponseType>) {
        self.response_types.push(response_type.into());
    }

    pub fn add_event_code(&mut self, value_name: impl Into<String>, value: impl Into<String>) {
        self.event_codes.push(NameValue::new(value_name, value));
    }

    pub fn add_parameter(&mut self, value_name: impl Into<String>, value: impl Into<String>) {
        self.parameters.push(NameValue::new(value_name, value));
    }

    /// Append a new area with the given description and return it
    pub fn add_area(&mut self, area_desc: impl Into<String>) -> &mut Area {
        self.areas.push(Area::new(area_desc));
        let last = self.areas.len() - 1;
        &mut self.areas[last]
    }

    /// Append a new resource with the given description and return it
    pub fn add_resource(&mut self, resource_desc: impl Into<String>) -> &mut Resource {
        self.resources.push(Resource::new(resource_desc));
        let last = self.resources.len() - 1;
        &mut self.resources[last]
    }

    pub fn effective_time(&self) -> Option<DateTime<FixedOffset>> {
        parse_cap_timestamp(&self.effective)
    }

    pub fn onset_time(&self) -> Option<DateTime<FixedOffset>> {
        parse_cap_timestamp(&self.onset)
    }

    pub fn expires_time(&self) -> Option<DateTime<FixedOffset>> {
        parse_cap_timestamp(&self.expires)
    }
}

impl Resource {
    pub fn new(resource_desc: impl Into<String>) -> Self {
        Self {
            resource_desc: resource_desc.into(),
            ..Default::default()
        }
    }
}

impl Area {
    pub fn new(area_desc: impl Into<String>) -> Self {
        Self {
            area_desc: area_desc.into(),
            ..Default::default()
        }
    }

    pub fn add_polygon(&mut self, polygon: impl Into<String>) {
        self.polygons.push(polygon.into());
    }

    pub fn add_circle(&mut self, circle: impl Into<String>) {
        self.circles.push(circle.into());
    }

    pub fn add_geocode(&mut self, value_name: impl Into<String>, value: impl Into<String>) {
        self.geocodes.push(NameValue::new(value_name, value));
    }
}

/// Parse a CAP timestamp such as `2015-04-21T19:19:08+00:00`
///
/// Returns `None` for empty or unparsable text.
pub fn parse_cap_timestamp(text: &str) -> Option<DateTime<FixedOffset>> {
    if text.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(text.trim()).ok()
}

/// Render a timestamp the way CAP requires: whole seconds and a numeric
/// offset, never `Z`.
pub fn format_cap_timestamp<Tz: TimeZone>(time: &DateTime<Tz>) -> String {
    time.fixed_offset()
        .to_rfc3339_opts(SecondsFormat::Secs, false)
}
