use geocoding::{Forward, Opencage, Point};
use geoenrich_core::{
    entities::Coordinate,
    gateways::geocode::{GeoCodingGateway, GeocodeCandidate, GeocodeError},
};

/// Geocoding gateway based on the OpenCage Geocoding API.
pub struct OpenCage {
    client: Opencage<'static>,
}

impl OpenCage {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Opencage::new(api_key),
        }
    }
}

impl GeoCodingGateway for OpenCage {
    fn geocode(&self, address: &str) -> Result<Vec<GeocodeCandidate>, GeocodeError> {
        let points: Vec<Point<f64>> = self
            .client
            .forward(address)
            .map_err(|err| GeocodeError::Unavailable(err.to_string()))?;
        log::debug!("Received {} candidate(s) for '{}'", points.len(), address);
        Ok(points.into_iter().map(candidate_from_point).collect())
    }
}

// Points are (x, y) = (lng, lat)
fn candidate_from_point(point: Point<f64>) -> GeocodeCandidate {
    Coordinate::new(point.y(), point.x()).into()
}
