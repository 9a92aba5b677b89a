use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Booking lifecycle as shown in the portal. Statuses serialize in the title
/// case the UI renders ("Confirmed", not "CONFIRMED").
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FlightStatus {
    Pending,
    Confirmed,
    Complete,
    Cancelled,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RequestStatus {
    Open,
    Fulfilled,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MembershipTier {
    Platinum,
    Gold,
    Member,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TripType {
    OneWay,
    RoundTrip,
}

/// Account record. Seed-only: nothing in this system creates or updates users
/// beyond the cosmetic profile form, which is not persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub tier: MembershipTier,
    pub balance: i64,
    pub joined_date: DateTime<Utc>,
}

/// A booking record. Ids use the display form the portal shows ("FL-1042").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flight {
    pub id: String,
    pub user_id: String,
    pub origin: String,
    pub destination: String,
    pub date: DateTime<Utc>,
    pub aircraft: String,
    pub status: FlightStatus,
    pub passengers: u32,
    pub price: i64,
}

/// A free-text service add-on tied to a flight and the requesting user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConciergeRequest {
    pub id: String,
    pub flight_id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub service_type: String,
    pub details: String,
    pub status: RequestStatus,
    pub submitted_at: DateTime<Utc>,
}

/// Static catalog entry for one airframe in the charter fleet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Aircraft {
    pub id: String,
    pub name: String,
    pub category: String,
    pub seats: u32,
    pub speed: String,
    pub range: String,
    pub estimate: i64,
    pub image: String,
}

/// Airport reference data, shaped after the AirportDB record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Airport {
    pub iata: String,
    pub icao: String,
    pub name: String,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
}

/// Lead-passenger contact captured on the wizard details screen.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl FlightStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlightStatus::Pending => "Pending",
            FlightStatus::Confirmed => "Confirmed",
            FlightStatus::Complete => "Complete",
            FlightStatus::Cancelled => "Cancelled",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_casing() {
        let json = serde_json::to_string(&FlightStatus::Confirmed).unwrap();
        assert_eq!(json, "\"Confirmed\"");

        let status: FlightStatus = serde_json::from_str("\"Cancelled\"").unwrap();
        assert_eq!(status, FlightStatus::Cancelled);
    }

    #[test]
    fn test_trip_type_kebab_case() {
        assert_eq!(
            serde_json::to_string(&TripType::RoundTrip).unwrap(),
            "\"round-trip\""
        );
        let t: TripType = serde_json::from_str("\"one-way\"").unwrap();
        assert_eq!(t, TripType::OneWay);
    }

    #[test]
    fn test_airport_optional_fields_skipped() {
        let airport = Airport {
            iata: "BDN".to_string(),
            icao: "KBDN".to_string(),
            name: "Bend Municipal Airport".to_string(),
            city: "Bend".to_string(),
            state: Some("OR".to_string()),
            country: "USA".to_string(),
            elevation: None,
            lat: None,
            lon: None,
        };
        let json = serde_json::to_value(&airport).unwrap();
        assert!(json.get("elevation").is_none());
        assert_eq!(json["state"], "OR");
    }
}
