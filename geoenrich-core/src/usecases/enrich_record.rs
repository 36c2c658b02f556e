use super::{build_address, prelude::*};

pub const LATITUDE: &str = "latitude";
pub const LONGITUDE: &str = "longitude";

/// Adds the geocoded location of a business address to records.
///
/// The enricher holds no mutable state and can be shared between threads
/// as long as the injected gateway can.
pub struct GeoEnricher {
    gateway: Box<dyn GeoCodingGateway + Send + Sync>,
    target: DatastoreTarget,
}

impl GeoEnricher {
    pub fn new<G>(gateway: G, target: DatastoreTarget) -> Self
    where
        G: GeoCodingGateway + Send + Sync + 'static,
    {
        Self {
            gateway: Box::new(gateway),
            target,
        }
    }

    /// Destination of the enriched records.
    pub fn target(&self) -> &DatastoreTarget {
        &self.target
    }

    /// Geocode the address of a record.
    ///
    /// Returns a copy of the record with two additional unindexed
    /// properties [`LATITUDE`] and [`LONGITUDE`]. The input record is never modified.
    ///
    /// Exactly one request is sent to the gateway per invocation,
    /// failed requests are not retried.
    pub fn enrich(&self, record: &Record) -> Result<Record> {
        let address = build_address(record);
        if !address.is_complete() {
            log::warn!(
                "Incomplete address of record {}: missing {}",
                record_label(record),
                address.missing_fields().join(", ")
            );
        }
        let address = address.to_string();
        let candidates = self
            .gateway
            .geocode(&address)
            .map_err(|err| Error::from_gateway(&address, err))?;
        // Only the first candidate is considered, regardless of its quality.
        let Some(GeocodeCandidate { location }) = candidates.into_iter().next() else {
            return Err(Error::NoGeocodeResult { address });
        };
        if !(location.lat.is_finite() && location.lng.is_finite()) {
            return Err(Error::MalformedResponse {
                address,
                reason: format!("non-finite coordinate {location:?}"),
            });
        }
        log::debug!("Resolved address location '{}': {:?}", address, location);

        let mut enriched = record.clone();
        enriched.set(LATITUDE, Value::unindexed(ValueKind::Double(location.lat)));
        enriched.set(LONGITUDE, Value::unindexed(ValueKind::Double(location.lng)));
        Ok(enriched)
    }

    /// Like [`GeoEnricher::enrich`] but logs failures and drops the record.
    pub fn enrich_or_drop(&self, record: &Record) -> Option<Record> {
        match self.enrich(record) {
            Ok(enriched) => Some(enriched),
            Err(err) => {
                log::warn!("Dropping record {}: {}", record_label(record), err);
                None
            }
        }
    }
}

fn record_label(record: &Record) -> String {
    record
        .key
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "<no key>".to_string())
}
