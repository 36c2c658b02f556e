use geoenrich_entities::geo::Coordinate;
use std::sync::Arc;
use thiserror::Error;

/// A single candidate returned by a geocoding service.
///
/// Everything but the location is ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeocodeCandidate {
    pub location: Coordinate,
}

impl From<Coordinate> for GeocodeCandidate {
    fn from(location: Coordinate) -> Self {
        Self { location }
    }
}

#[derive(Debug, Clone, Error)]
pub enum GeocodeError {
    /// Transport failures, rejected requests, exceeded quotas and
    /// any other error reported by the service.
    #[error("Geocoding service unavailable: {0}")]
    Unavailable(String),
    #[error("Malformed geocoding response: {0}")]
    MalformedResponse(String),
}

pub trait GeoCodingGateway {
    /// Resolve a free-text address into an ordered list of candidates.
    ///
    /// The call blocks until the service responds. An address that
    /// could not be resolved yields an empty list.
    fn geocode(&self, address: &str) -> Result<Vec<GeocodeCandidate>, GeocodeError>;
}

impl<G> GeoCodingGateway for Box<G>
where
    G: GeoCodingGateway + ?Sized,
{
    fn geocode(&self, address: &str) -> Result<Vec<GeocodeCandidate>, GeocodeError> {
        (**self).geocode(address)
    }
}

impl<G> GeoCodingGateway for Arc<G>
where
    G: GeoCodingGateway + ?Sized,
{
    fn geocode(&self, address: &str) -> Result<Vec<GeocodeCandidate>, GeocodeError> {
        (**self).geocode(address)
    }
}
