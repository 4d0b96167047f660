//! Data models for the shipments backend
//!
//! `Shipment` mirrors the records returned by the list endpoint. Decoding is
//! permissive: unknown fields are ignored and any optional field may be
//! missing or `null`. Numbers are accepted where text is expected, and the
//! identifier may arrive as a quoted number.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::status;

/// A delivery record as served by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipment {
    /// Unique shipment identifier
    #[serde(deserialize_with = "id_from_number_or_text")]
    pub id: i64,
    /// Display title
    #[serde(default, deserialize_with = "text_from_scalar")]
    pub title: Option<String>,
    /// Free-text or canonical status label
    #[serde(default, deserialize_with = "text_from_scalar")]
    pub status: Option<String>,
    /// Tracking reference
    #[serde(default, deserialize_with = "text_from_scalar")]
    pub track: Option<String>,
    /// Destination description
    #[serde(default, deserialize_with = "text_from_scalar")]
    pub dest: Option<String>,
}

impl Shipment {
    /// Create a shipment with only its identifier set
    pub fn new(id: i64) -> Self {
        Self {
            id,
            title: None,
            status: None,
            track: None,
            dest: None,
        }
    }

    /// Set the status label
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Title to render, falling back to a placeholder
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(status::UNTITLED)
    }

    /// Status to render; missing and blank statuses share one placeholder
    pub fn display_status(&self) -> &str {
        match self.status.as_deref() {
            Some(s) if !s.trim().is_empty() => s,
            _ => status::UNKNOWN,
        }
    }

    /// Destination, if present and not blank
    pub fn destination(&self) -> Option<&str> {
        self.dest.as_deref().filter(|d| !d.trim().is_empty())
    }

    /// Status text used for comparisons; missing reads as empty
    pub fn status_or_empty(&self) -> &str {
        self.status.as_deref().unwrap_or("")
    }
}

/// Integer id, either as a JSON number or as a quoted number
fn id_from_number_or_text<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let id = match &value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    id.ok_or_else(|| de::Error::custom(format!("invalid shipment id: {}", value)))
}

/// Optional text; numbers and booleans become their textual form, while
/// arrays and objects read as absent
fn text_from_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

/// JSON body of a status update request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRequest {
    pub id: i64,
    pub status: String,
}

/// Result of a status update that reached the backend
///
/// A rejection is an ordinary outcome, not an error: the backend answered,
/// it just declined the change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// 2xx response; the body is informational and kept verbatim
    Applied { body: String },
    /// Non-2xx response; `message` is the HTTP reason phrase, or the trimmed
    /// body for codes without one
    Rejected {
        status: u16,
        message: String,
        body: String,
    },
}

impl UpdateOutcome {
    /// Whether the backend accepted the update
    pub fn is_applied(&self) -> bool {
        matches!(self, UpdateOutcome::Applied { .. })
    }

    /// Human-readable summary of the outcome
    pub fn describe(&self) -> String {
        match self {
            UpdateOutcome::Applied { body } => body.clone(),
            UpdateOutcome::Rejected {
                status, message, ..
            } if message.is_empty() => format!("Error: {}", status),
            UpdateOutcome::Rejected {
                status, message, ..
            } => format!("Error: {} {}", status, message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipment_permissive_decoding() {
        let json = r#"[
            {"id": 7, "title": null, "extra": {"nested": true}},
            {"id": 8, "title": "Box B", "status": "Entregado (Livré)", "track": "TRK-1", "dest": "Thiès"}
        ]"#;

        let shipments: Vec<Shipment> = serde_json::from_str(json).unwrap();
        assert_eq!(shipments.len(), 2);
        assert_eq!(shipments[0], Shipment::new(7));
        assert_eq!(shipments[1].track.as_deref(), Some("TRK-1"));
        assert_eq!(shipments[1].destination(), Some("Thiès"));
    }

    #[test]
    fn test_shipment_coerces_scalar_fields() {
        let json = r#"[
            {"id": 2, "title": "Box B", "track": 12345, "dest": ["not", "text"]},
            {"id": "7", "title": "Box C", "status": true},
            {"id": 9.0, "title": 42}
        ]"#;

        let shipments: Vec<Shipment> = serde_json::from_str(json).unwrap();
        assert_eq!(shipments.len(), 3);
        assert_eq!(shipments[0].track.as_deref(), Some("12345"));
        assert_eq!(shipments[0].dest, None);
        assert_eq!(shipments[1].id, 7);
        assert_eq!(shipments[1].status.as_deref(), Some("true"));
        assert_eq!(shipments[2].id, 9);
        assert_eq!(shipments[2].display_title(), "42");
    }

    #[test]
    fn test_shipment_rejects_unusable_id() {
        for json in [r#"{"id": "abc"}"#, r#"{"id": null}"#, r#"{"id": 1.5}"#] {
            assert!(serde_json::from_str::<Shipment>(json).is_err(), "accepted {}", json);
        }
    }

    #[test]
    fn test_shipment_requires_id() {
        let result: Result<Vec<Shipment>, _> = serde_json::from_str(r#"[{"title": "no id"}]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_display_placeholders() {
        let shipment = Shipment::new(1).with_status("   ");
        assert_eq!(shipment.display_title(), "Sin título");
        assert_eq!(shipment.display_status(), "—");
        assert_eq!(Shipment::new(2).display_status(), "—");

        let blank_dest = Shipment {
            dest: Some(" ".to_string()),
            ..Shipment::new(3)
        };
        assert_eq!(blank_dest.destination(), None);
    }

    #[test]
    fn test_update_request_body() {
        let body = serde_json::to_value(UpdateRequest {
            id: 42,
            status: "Entregado (Livré)".to_string(),
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"id": 42, "status": "Entregado (Livré)"})
        );
    }

    #[test]
    fn test_update_outcome_describe() {
        let applied = UpdateOutcome::Applied {
            body: "{\"ok\":true}".to_string(),
        };
        assert!(applied.is_applied());
        assert_eq!(applied.describe(), "{\"ok\":true}");

        let rejected = UpdateOutcome::Rejected {
            status: 500,
            message: "Internal Server Error".to_string(),
            body: "{\"code\":\"db_error\"}".to_string(),
        };
        assert!(!rejected.is_applied());
        assert_eq!(rejected.describe(), "Error: 500 Internal Server Error");

        let unnamed = UpdateOutcome::Rejected {
            status: 599,
            message: String::new(),
            body: String::new(),
        };
        assert_eq!(unnamed.describe(), "Error: 599");
    }
}
