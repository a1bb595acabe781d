//! CAP 1.2 value vocabularies
//!
//! Each vocabulary is a closed enum with one variant per value listed in the
//! CAP 1.2 schema plus a `Raw` variant. `Raw` carries any other text verbatim,
//! so a non-conforming document (or an empty element) survives a round trip
//! unchanged. Nothing here rejects input.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

macro_rules! cap_vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// Text outside the CAP vocabulary, kept as-is
            Raw(String),
        }

        impl $name {
            /// The text written to the wire
            pub fn as_str(&self) -> &str {
                match self {
                    $( $name::$variant => $text, )+
                    $name::Raw(text) => text.as_str(),
                }
            }

            /// True when the value is a member of the CAP vocabulary
            pub fn is_recognized(&self) -> bool {
                !matches!(self, $name::Raw(_))
            }
        }

        impl From<&str> for $name {
            fn from(text: &str) -> Self {
                match text {
                    $( $text => $name::$variant, )+
                    other => $name::Raw(other.to_string()),
                }
            }
        }

        impl From<String> for $name {
            fn from(text: String) -> Self {
                match $name::from(text.as_str()) {
                    $name::Raw(_) => $name::Raw(text),
                    known => known,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                String::deserialize(deserializer).map($name::from)
            }
        }
    };
}

/// Unset vocabulary fields start out as empty raw text, which is what the
/// parser produces for a missing element.
macro_rules! empty_by_default {
    ($($name:ident),+) => {
        $(
            impl Default for $name {
                fn default() -> Self {
                    $name::Raw(String::new())
                }
            }
        )+
    };
}

cap_vocabulary! {
    /// Code denoting the appropriate handling of the alert message
    Status {
        Actual => "Actual",
        Exercise => "Exercise",
        System => "System",
        Test => "Test",
        Draft => "Draft",
    }
}

cap_vocabulary! {
    /// Code denoting the nature of the alert message
    MsgType {
        Alert => "Alert",
        Update => "Update",
        Cancel => "Cancel",
        Ack => "Ack",
        Error => "Error",
    }
}

cap_vocabulary! {
    /// Code denoting the intended distribution of the alert message
    Scope {
        Public => "Public",
        Restricted => "Restricted",
        Private => "Private",
    }
}

cap_vocabulary! {
    /// Category of the subject event
    Category {
        /// Geophysical (including landslide)
        Geo => "Geo",
        /// Meteorological (including flood)
        Met => "Met",
        /// General emergency and public safety
        Safety => "Safety",
        /// Law enforcement, military, homeland and local/private security
        Security => "Security",
        /// Rescue and recovery
        Rescue => "Rescue",
        /// Fire suppression and rescue
        Fire => "Fire",
        /// Medical and public health
        Health => "Health",
        /// Pollution and other environmental
        Env => "Env",
        /// Public and private transportation
        Transport => "Transport",
        /// Utility, telecommunication, other non-transport infrastructure
        Infra => "Infra",
        /// Chemical, biological, radiological, nuclear or high-yield explosive
        Cbrne => "CBRNE",
        /// Other events
        Other => "Other",
    }
}

cap_vocabulary! {
    /// Recommended type of action for the target audience
    ResponseType {
        Shelter => "Shelter",
        Evacuate => "Evacuate",
        Prepare => "Prepare",
        Execute => "Execute",
        Avoid => "Avoid",
        Monitor => "Monitor",
        Assess => "Assess",
        AllClear => "AllClear",
        None => "None",
    }
}

cap_vocabulary! {
    /// Urgency of the subject event
    Urgency {
        Immediate => "Immediate",
        Expected => "Expected",
        Future => "Future",
        Past => "Past",
        Unknown => "Unknown",
    }
}

cap_vocabulary! {
    /// Severity of the subject event
    Severity {
        Extreme => "Extreme",
        Severe => "Severe",
        Moderate => "Moderate",
        Minor => "Minor",
        Unknown => "Unknown",
    }
}

cap_vocabulary! {
    /// Certainty of the subject event
    Certainty {
        Observed => "Observed",
        Likely => "Likely",
        Possible => "Possible",
        Unlikely => "Unlikely",
        Unknown => "Unknown",
    }
}

empty_by_default!(Category, ResponseType, Urgency, Severity, Certainty);

impl Default for Status {
    fn default() -> Self {
        Status::Actual
    }
}

impl Default for MsgType {
    fn default() -> Self {
        MsgType::Alert
    }
}

impl Default for Scope {
    fn default() -> Self {
        Scope::Public
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values_map_to_variants() {
        assert_eq!(Status::from("Exercise"), Status::Exercise);
        assert_eq!(MsgType::from("Update"), MsgType::Update);
        assert_eq!(Category::from("CBRNE"), Category::Cbrne);
        assert_eq!(ResponseType::from("AllClear"), ResponseType::AllClear);
        assert_eq!(Certainty::from("Likely"), Certainty::Likely);
    }

    #[test]
    fn test_unknown_values_are_kept_raw() {
        let scope = Scope::from("public");
        assert_eq!(scope, Scope::Raw("public".to_string()));
        assert!(!scope.is_recognized());
        assert_eq!(scope.as_str(), "public");

        let urgency = Urgency::from(String::from("Soon-ish"));
        assert_eq!(urgency.to_string(), "Soon-ish");
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Status::default(), Status::Actual);
        assert_eq!(MsgType::default(), MsgType::Alert);
        assert_eq!(Scope::default(), Scope::Public);
        assert_eq!(Severity::default().as_str(), "");
        assert!(!Category::default().is_recognized());
    }

    #[test]
    fn test_json_uses_wire_text() {
        let categories = vec![Category::Met, Category::Raw("Weird".into())];
        let json = serde_json::to_string(&categories).unwrap();
        assert_eq!(json, r#"["Met","Weird"]"#);

        let back: Vec<Category> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, categories);
    }
}
