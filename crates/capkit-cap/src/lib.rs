//! Common Alerting Protocol (CAP) 1.2 messages for public-warning systems
//!
//! This crate models a CAP alert as a plain owned tree of structs and
//! converts it to and from the CAP 1.2 XML wire format, plus a JSON
//! projection of the same graph.
//!
//! # Features
//!
//! - Schema-ordered XML output with optional elements omitted when empty
//! - Escaping that never double-encodes already-escaped text
//! - Tolerant XML reader: missing elements read as empty, only malformed
//!   markup is an error
//! - Closed CAP vocabularies that still carry non-conforming values through
//!
//! # Example
//!
//! ```rust
//! use capkit_cap::{parse_alert, Alert, MsgType};
//!
//! let mut alert = Alert::new();
//! alert.identifier = "id2".to_string();
//! alert.msg_type = MsgType::Update;
//! let info = alert.add_info();
//! info.add_category("Met");
//! info.add_area("Downtown").add_circle("0,0 1000");
//!
//! let xml = alert.to_xml();
//! let parsed = parse_alert(&xml).expect("Failed to parse CAP");
//! assert_eq!(parsed.identifier, "id2");
//! assert_eq!(parsed.infos[0].areas[0].circles, vec!["0,0 1000"]);
//! ```
//!
//! Only the first `<info>` block of a document is read back; see
//! [`parser`].

pub mod alert;
pub mod dom;
pub mod error;
pub mod escape;
pub mod json;
pub mod parser;
pub mod serializer;
pub mod vocab;

/// XML namespace of CAP 1.2 documents
pub const CAP_NAMESPACE: &str = "urn:oasis:names:tc:emergency:cap:1.2";

pub use alert::{
    format_cap_timestamp, parse_cap_timestamp, Alert, Area, Info, NameValue, Resource,
    UNSPECIFIED_AREA,
};
pub use dom::{Document, Element, TreeQuery};
pub use error::ParseError;
pub use escape::{escape, unescape};
pub use json::{from_json, to_json};
pub use parser::{alert_from_document, alert_from_tree, parse_alert, parse_alert_bytes};
pub use serializer::serialize_alert;
pub use vocab::{Category, Certainty, MsgType, ResponseType, Scope, Severity, Status, Urgency};
