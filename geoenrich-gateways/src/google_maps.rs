use geoenrich_core::{
    entities::Coordinate,
    gateways::geocode::{GeoCodingGateway, GeocodeCandidate, GeocodeError},
};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Geocoding gateway based on the Google Maps Geocoding API.
#[derive(Debug, Clone)]
pub struct GoogleMaps {
    api_key: String,
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl GoogleMaps {
    /// Without a `timeout` requests wait for the service indefinitely.
    pub fn new(api_key: String, timeout: Option<Duration>) -> reqwest::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            api_key,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            client,
        })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn fetch(&self, address: &str) -> reqwest::Result<String> {
        self.client
            .get(&self.endpoint)
            .query(&[("address", address), ("key", self.api_key.as_str())])
            .send()?
            .error_for_status()?
            .text()
    }
}

impl GeoCodingGateway for GoogleMaps {
    fn geocode(&self, address: &str) -> Result<Vec<GeocodeCandidate>, GeocodeError> {
        let body = self.fetch(address).map_err(|err| {
            // The request URL contains the API key.
            GeocodeError::Unavailable(err.without_url().to_string())
        })?;
        let candidates = parse_response(&body)?;
        log::debug!(
            "Received {} candidate(s) for '{}'",
            candidates.len(),
            address
        );
        Ok(candidates)
    }
}

#[derive(Debug, Deserialize)]
struct Response {
    status: String,
    #[serde(default)]
    results: Vec<GeocodingResult>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

fn parse_response(body: &str) -> Result<Vec<GeocodeCandidate>, GeocodeError> {
    let Response {
        status,
        results,
        error_message,
    } = serde_json::from_str(body).map_err(|err| GeocodeError::MalformedResponse(err.to_string()))?;
    match status.as_str() {
        "OK" => Ok(results
            .into_iter()
            .map(|r| Coordinate::new(r.geometry.location.lat, r.geometry.location.lng).into())
            .collect()),
        "ZERO_RESULTS" => Ok(vec![]),
        // REQUEST_DENIED, OVER_QUERY_LIMIT, INVALID_REQUEST, UNKNOWN_ERROR, ...
        _ => {
            let msg = match error_message {
                Some(msg) => format!("{status}: {msg}"),
                None => status,
            };
            Err(GeocodeError::Unavailable(msg))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ok_response() {
        let body = r#"{
           "results" : [
              {
                 "formatted_address" : "500 E Monroe St, Springfield, IL 62701, USA",
                 "geometry" : {
                    "location" : { "lat" : 39.7990175, "lng" : -89.6439575 },
                    "location_type" : "ROOFTOP"
                 },
                 "place_id" : "ChIJ"
              },
              {
                 "geometry" : { "location" : { "lat" : 1.0, "lng" : 2.0 } }
              }
           ],
           "status" : "OK"
        }"#;
        let candidates = parse_response(body).unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(
            candidates[0].location,
            Coordinate::new(39.7990175, -89.6439575)
        );
    }

    #[test]
    fn parse_zero_results() {
        let body = r#"{ "results" : [], "status" : "ZERO_RESULTS" }"#;
        assert!(parse_response(body).unwrap().is_empty());
    }

    #[test]
    fn parse_request_denied() {
        let body = r#"{
           "error_message" : "The provided API key is invalid.",
           "results" : [],
           "status" : "REQUEST_DENIED"
        }"#;
        let err = parse_response(body).unwrap_err();
        match err {
            GeocodeError::Unavailable(msg) => {
                assert_eq!(msg, "REQUEST_DENIED: The provided API key is invalid.")
            }
            _ => panic!("unexpected error: {err}"),
        }
    }

    #[test]
    fn parse_over_query_limit_without_message() {
        let body = r#"{ "results" : [], "status" : "OVER_QUERY_LIMIT" }"#;
        assert!(matches!(
            parse_response(body),
            Err(GeocodeError::Unavailable(msg)) if msg == "OVER_QUERY_LIMIT"
        ));
    }

    #[test]
    fn parse_malformed_response() {
        assert!(matches!(
            parse_response("<html>502 Bad Gateway</html>"),
            Err(GeocodeError::MalformedResponse(_))
        ));
        let missing_location = r#"{ "results" : [ { "geometry" : {} } ], "status" : "OK" }"#;
        assert!(matches!(
            parse_response(missing_location),
            Err(GeocodeError::MalformedResponse(_))
        ));
    }

    #[test]
    #[ignore]
    fn unreachable_service_is_unavailable() {
        let gw = GoogleMaps::new("secret".into(), Some(Duration::from_secs(1)))
            .unwrap()
            .with_endpoint("http://127.0.0.1:9/geocode/json");
        match gw.geocode("500 Main St, Springfield, IL 62701") {
            Err(GeocodeError::Unavailable(msg)) => assert!(!msg.contains("secret")),
            res => panic!("unexpected result: {res:?}"),
        }
    }
}
