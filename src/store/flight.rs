use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// One endpoint of a route: an airport plus the terminal served there.
///
/// `code` is conventionally a 3-letter IATA code, but no format is enforced;
/// any non-empty string is accepted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub code: String,
    pub city: String,
    pub terminal: String,
}

/// Operational status of a flight.
///
/// The set is open: feeds may carry values beyond the recognized ones, and
/// those round-trip unchanged through the fallback variant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum FlightStatus {
    #[serde(rename = "On Time")]
    OnTime,
    Delayed,
    Boarding,
    #[serde(untagged)]
    Other(String),
}

/// One scheduled flight: identity, route, timing, and status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    pub flight_number: String,
    pub airline: String,
    pub origin: Location,
    pub destination: Location,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub status: FlightStatus,
    pub gate: String,
}

impl Flight {
    /// Scheduled duration, or `None` when the record is not chronological
    /// (`arrival_time <= departure_time`). Such records are stored and served
    /// unmodified; only the computed duration is withheld.
    pub fn duration(&self) -> Option<TimeDelta> {
        let duration = self.arrival_time - self.departure_time;
        (duration > TimeDelta::zero()).then_some(duration)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn flight_json(departure: &str, arrival: &str, status: &str) -> String {
        format!(
            r#"{{"flightNumber":"AA123","airline":"American Airlines","origin":{{"code":"JFK","city":"New York","terminal":"8"}},"destination":{{"code":"LAX","city":"Los Angeles","terminal":"4"}},"departureTime":"{departure}","arrivalTime":"{arrival}","status":"{status}","gate":"B22"}}"#
        )
    }

    #[test]
    fn deserialize_flight() {
        let flight: Flight = serde_json::from_str(&flight_json(
            "2025-03-15T14:30:00Z",
            "2025-03-15T20:45:00Z",
            "On Time",
        ))
        .unwrap();
        assert_eq!(flight.flight_number, "AA123");
        assert_eq!(flight.origin.code, "JFK");
        assert_eq!(flight.status, FlightStatus::OnTime);
    }

    #[test]
    fn status_set_is_open() {
        let flight: Flight = serde_json::from_str(&flight_json(
            "2025-03-15T14:30:00Z",
            "2025-03-15T20:45:00Z",
            "Diverted",
        ))
        .unwrap();
        assert_eq!(flight.status, FlightStatus::Other("Diverted".to_string()));

        // Free-form values must survive re-serialization unchanged.
        let json = serde_json::to_value(&flight).unwrap();
        assert_eq!(json["status"], "Diverted");
    }

    #[test]
    fn recognized_status_serializes_to_wire_spelling() {
        assert_eq!(
            serde_json::to_value(FlightStatus::OnTime).unwrap(),
            "On Time"
        );
        assert_eq!(
            serde_json::to_value(FlightStatus::Delayed).unwrap(),
            "Delayed"
        );
    }

    #[test]
    fn deserialize_rejects_missing_field() {
        let data = r#"{"flightNumber":"AA123","airline":"American Airlines"}"#;
        assert!(serde_json::from_str::<Flight>(data).is_err());
    }

    #[test]
    fn duration_of_chronological_flight() {
        let flight: Flight = serde_json::from_str(&flight_json(
            "2025-03-15T14:30:00Z",
            "2025-03-15T20:45:00Z",
            "On Time",
        ))
        .unwrap();
        assert_eq!(flight.duration(), Some(TimeDelta::minutes(375)));
    }

    #[test]
    fn duration_is_none_when_not_chronological() {
        let flight: Flight = serde_json::from_str(&flight_json(
            "2025-03-15T20:45:00Z",
            "2025-03-15T14:30:00Z",
            "On Time",
        ))
        .unwrap();
        assert_eq!(flight.duration(), None);

        let flight: Flight = serde_json::from_str(&flight_json(
            "2025-03-15T14:30:00Z",
            "2025-03-15T14:30:00Z",
            "On Time",
        ))
        .unwrap();
        assert_eq!(flight.duration(), None);
    }
}
