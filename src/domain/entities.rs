//! Domain Entities - Core business objects
//!
//! Outlets as the core sees them, the wire records they are parsed from,
//! and the replies exchanged with the upstream chatbot backend.

use crate::domain::errors::LocatorError;
use crate::domain::value_objects::Coordinate;
use serde::{Deserialize, Serialize};

/// A physical retail location.
///
/// Outlets are immutable once fetched from the directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outlet {
    /// Unique identifier assigned by the directory
    pub id: i64,
    pub name: String,
    pub address: String,
    /// Validated position
    #[serde(flatten)]
    pub coordinate: Coordinate,
    /// Free-form opening hours, e.g. "Monday - Sunday, 8:00 AM - 10:00 PM"
    pub operating_hours: String,
    /// Navigation deep link, when the directory has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waze_link: Option<String>,
}

/// Latitude or longitude as the directory sends it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawDegrees {
    Number(f64),
    Text(String),
}

impl RawDegrees {
    fn to_text(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

/// Outlet record before coordinate validation.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawOutlet {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub address: String,
    pub latitude: Option<RawDegrees>,
    pub longitude: Option<RawDegrees>,
    #[serde(default)]
    pub operating_hours: Option<String>,
    #[serde(default)]
    pub waze_link: Option<String>,
}

impl TryFrom<RawOutlet> for Outlet {
    type Error = LocatorError;

    fn try_from(raw: RawOutlet) -> Result<Self, Self::Error> {
        let (lat, lon) = match (&raw.latitude, &raw.longitude) {
            (Some(lat), Some(lon)) => (lat.to_text(), lon.to_text()),
            _ => {
                return Err(LocatorError::Parse(format!(
                    "outlet {} has no coordinates",
                    raw.id
                )))
            }
        };
        let coordinate = Coordinate::parse(&lat, &lon)?;

        Ok(Outlet {
            id: raw.id,
            name: raw.name,
            address: raw.address,
            coordinate,
            operating_hours: raw.operating_hours.unwrap_or_default(),
            waze_link: raw.waze_link.filter(|l| !l.is_empty()),
        })
    }
}

/// Parse a batch of raw records, dropping the ones with bad coordinates.
pub fn parse_outlets(raw: Vec<RawOutlet>) -> Vec<Outlet> {
    raw.into_iter()
        .filter_map(|r| {
            let id = r.id;
            match Outlet::try_from(r) {
                Ok(outlet) => Some(outlet),
                Err(e) => {
                    tracing::warn!("skipping outlet {}: {}", id, e);
                    None
                }
            }
        })
        .collect()
}

/// Outcome reported by the upstream free-text search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchStatus {
    Single,
    Multiple,
    None,
    Error,
}

/// Reply from the upstream free-text search.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SearchResponse {
    pub status: SearchStatus,
    #[serde(default)]
    pub message: String,
    /// Ordered candidate names when the status is `multiple`
    #[serde(default)]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub outlet: Option<String>,
    #[serde(default)]
    pub operating_hours: Option<String>,
}

/// Outcome reported by the upstream selection call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionStatus {
    Success,
    Error,
}

/// Reply from the upstream selection call.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SelectionResponse {
    pub status: SelectionStatus,
    #[serde(default)]
    pub outlet: Option<String>,
    #[serde(default)]
    pub operating_hours: Option<String>,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: i64, lat: Option<RawDegrees>, lon: Option<RawDegrees>) -> RawOutlet {
        RawOutlet {
            id,
            name: format!("Outlet {}", id),
            address: "Jalan Ampang".to_string(),
            latitude: lat,
            longitude: lon,
            operating_hours: Some("8:00 AM - 10:00 PM".to_string()),
            waze_link: None,
        }
    }

    // ===== RawOutlet Parsing Tests =====

    #[test]
    fn test_raw_outlet_from_json_text_coordinates() {
        let json = serde_json::json!({
            "id": 1,
            "name": "Subway KLCC",
            "address": "Suria KLCC, Kuala Lumpur",
            "operating_hours": "Monday - Sunday, 10:00 AM - 10:00 PM",
            "latitude": "3.1579",
            "longitude": "101.7123",
            "waze_link": "https://waze.com/ul?ll=3.1579,101.7123"
        });

        let raw: RawOutlet = serde_json::from_value(json).unwrap();
        let outlet = Outlet::try_from(raw).unwrap();

        assert_eq!(outlet.id, 1);
        assert_eq!(outlet.coordinate.latitude, 3.1579);
        assert_eq!(outlet.coordinate.longitude, 101.7123);
        assert!(outlet.waze_link.is_some());
    }

    #[test]
    fn test_raw_outlet_from_json_numeric_coordinates() {
        let json = serde_json::json!({
            "id": 2,
            "name": "Subway Bukit Bintang",
            "latitude": 3.146,
            "longitude": 101.711
        });

        let raw: RawOutlet = serde_json::from_value(json).unwrap();
        let outlet = Outlet::try_from(raw).unwrap();

        assert_eq!(outlet.coordinate.latitude, 3.146);
        assert_eq!(outlet.address, "");
        assert_eq!(outlet.operating_hours, "");
    }

    #[test]
    fn test_raw_outlet_missing_coordinates() {
        let result = Outlet::try_from(raw(3, None, Some(RawDegrees::Number(101.0))));
        assert!(matches!(result, Err(LocatorError::Parse(_))));
    }

    #[test]
    fn test_raw_outlet_malformed_coordinates() {
        let result = Outlet::try_from(raw(
            4,
            Some(RawDegrees::Text("north".to_string())),
            Some(RawDegrees::Text("101.7".to_string())),
        ));
        assert!(matches!(result, Err(LocatorError::Parse(_))));
    }

    #[test]
    fn test_empty_waze_link_is_dropped() {
        let mut r = raw(5, Some(RawDegrees::Number(3.0)), Some(RawDegrees::Number(101.0)));
        r.waze_link = Some(String::new());
        assert!(Outlet::try_from(r).unwrap().waze_link.is_none());
    }

    #[test]
    fn test_parse_outlets_skips_invalid() {
        let batch = vec![
            raw(1, Some(RawDegrees::Number(3.1)), Some(RawDegrees::Number(101.6))),
            raw(2, Some(RawDegrees::Text("".to_string())), Some(RawDegrees::Number(101.6))),
            raw(3, Some(RawDegrees::Number(95.0)), Some(RawDegrees::Number(101.6))),
            raw(4, Some(RawDegrees::Text("3.2".to_string())), Some(RawDegrees::Text("101.7".to_string()))),
        ];

        let outlets = parse_outlets(batch);
        let ids: Vec<i64> = outlets.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    // ===== Upstream Reply Tests =====

    #[test]
    fn test_search_response_multiple() {
        let json = serde_json::json!({
            "status": "multiple",
            "message": "Which outlet did you mean?",
            "options": ["Subway KLCC", "Subway KL Sentral"]
        });

        let resp: SearchResponse = serde_json::from_value(json).unwrap();
        assert_eq!(resp.status, SearchStatus::Multiple);
        assert_eq!(resp.options.unwrap(), vec!["Subway KLCC", "Subway KL Sentral"]);
    }

    #[test]
    fn test_search_response_minimal() {
        let resp: SearchResponse =
            serde_json::from_value(serde_json::json!({ "status": "none" })).unwrap();
        assert_eq!(resp.status, SearchStatus::None);
        assert!(resp.message.is_empty());
        assert!(resp.options.is_none());
    }

    #[test]
    fn test_selection_response_success() {
        let json = serde_json::json!({
            "status": "success",
            "outlet": "Subway KLCC",
            "operating_hours": "10:00 AM - 10:00 PM",
            "message": "Subway KLCC is open 10:00 AM - 10:00 PM"
        });

        let resp: SelectionResponse = serde_json::from_value(json).unwrap();
        assert_eq!(resp.status, SelectionStatus::Success);
        assert_eq!(resp.operating_hours.as_deref(), Some("10:00 AM - 10:00 PM"));
    }
}
