use crate::gateways::geocode::GeocodeError;
use thiserror::Error;

/// Reasons for dropping a record from the enriched output.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Could not geocode '{address}': {reason}")]
    GeocodingUnavailable { address: String, reason: String },
    #[error("No geocoding result for '{address}'")]
    NoGeocodeResult { address: String },
    #[error("Malformed geocoding response for '{address}': {reason}")]
    MalformedResponse { address: String, reason: String },
}

impl Error {
    pub(crate) fn from_gateway(address: &str, err: GeocodeError) -> Self {
        let address = address.to_owned();
        match err {
            GeocodeError::Unavailable(reason) => Self::GeocodingUnavailable { address, reason },
            GeocodeError::MalformedResponse(reason) => Self::MalformedResponse { address, reason },
        }
    }

    pub fn address(&self) -> &str {
        match self {
            Self::GeocodingUnavailable { address, .. }
            | Self::NoGeocodeResult { address }
            | Self::MalformedResponse { address, .. } => address,
        }
    }
}
