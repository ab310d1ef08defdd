pub mod flight;

use std::{io, path::Path};

use tracing::info;

pub use crate::store::flight::{Flight, FlightStatus, Location};

/// The seed dataset compiled into the binary, used when no dataset file is
/// configured.
const SEED: &str = include_str!("seed.json");

/// Read-only collection of flight records for the lifetime of a run.
///
/// Constructed once at startup and never mutated afterwards; request handling
/// only reads it. Lookup does not assume unique flight numbers: duplicate
/// records are legal and every matching duplicate is served.
#[derive(Debug, Clone)]
pub struct FlightStore {
    flights: Vec<Flight>,
}

impl FlightStore {
    /// Builds the store from the embedded seed dataset.
    pub fn seeded() -> Result<Self, Error> {
        let store = Self::from_json(SEED)?;
        info!("Loaded {} flights from the embedded seed", store.len());
        Ok(store)
    }

    /// Builds the store from a JSON dataset file.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let data = std::fs::read_to_string(path).map_err(|cause| Error::IO {
            message: format!("failed to read dataset file: {}", path.display()),
            cause,
        })?;
        let store = Self::from_json(&data)?;
        info!("Loaded {} flights from {}", store.len(), path.display());
        Ok(store)
    }

    /// Deserializes a JSON array of flight records, validating each record
    /// against the schema. Records with missing or mistyped fields are a load
    /// error, not a silent skip.
    pub fn from_json(data: &str) -> Result<Self, Error> {
        let flights = serde_json::from_str(data)?;
        Ok(Self { flights })
    }

    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    pub fn len(&self) -> usize {
        self.flights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }
}

impl From<Vec<Flight>> for FlightStore {
    fn from(flights: Vec<Flight>) -> Self {
        Self { flights }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {message}: {cause}")]
    IO { message: String, cause: io::Error },
    #[error("Serde JSON error: {0}")]
    JSON(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use pretty_assertions::assert_eq;
    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn seed_loads_and_contains_known_flight() {
        let store = FlightStore::seeded().unwrap();
        assert!(!store.is_empty());
        assert_eq!(
            store
                .flights()
                .iter()
                .filter(|f| f.flight_number == "AA123")
                .count(),
            1
        );
    }

    #[test]
    fn seed_carries_a_free_form_status() {
        let store = FlightStore::seeded().unwrap();
        assert!(
            store
                .flights()
                .iter()
                .any(|f| f.status == FlightStatus::Other("Cancelled".to_string()))
        );
    }

    #[test]
    fn from_path_reads_a_dataset_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SEED.as_bytes()).unwrap();

        let store = FlightStore::from_path(file.path()).unwrap();
        assert_eq!(store.len(), FlightStore::seeded().unwrap().len());
    }

    #[test]
    fn from_path_reports_missing_file() {
        let Error::IO { message, .. } =
            FlightStore::from_path(Path::new("/nonexistent/flights.json")).unwrap_err()
        else {
            panic!("expected IO error");
        };
        assert!(message.contains("/nonexistent/flights.json"));
    }

    #[test]
    fn malformed_dataset_is_rejected() {
        let data = r#"[{"flightNumber":"AA123"}]"#;
        assert!(matches!(
            FlightStore::from_json(data).unwrap_err(),
            Error::JSON(_)
        ));
    }
}
