use crate::{entities::Coordinate, gateways::geocode::*};
use std::{collections::HashMap, sync::Mutex};

/// Answers geocoding requests from a fixed table and records every request.
///
/// Unknown addresses resolve to no candidates.
#[derive(Default)]
pub struct DummyGeoGW {
    responses: HashMap<String, Result<Vec<GeocodeCandidate>, GeocodeError>>,
    requests: Mutex<Vec<String>>,
}

impl DummyGeoGW {
    pub fn with_result(mut self, address: &str, candidates: Vec<(f64, f64)>) -> Self {
        let candidates = candidates
            .into_iter()
            .map(|(lat, lng)| Coordinate::new(lat, lng).into())
            .collect();
        self.responses.insert(address.to_owned(), Ok(candidates));
        self
    }

    pub fn with_error(mut self, address: &str, err: GeocodeError) -> Self {
        self.responses.insert(address.to_owned(), Err(err));
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl GeoCodingGateway for DummyGeoGW {
    fn geocode(&self, address: &str) -> Result<Vec<GeocodeCandidate>, GeocodeError> {
        self.requests.lock().unwrap().push(address.to_owned());
        self.responses
            .get(address)
            .cloned()
            .unwrap_or_else(|| Ok(vec![]))
    }
}
