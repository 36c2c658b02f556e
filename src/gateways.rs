use crate::config::{Geocoding, GeocodingGateway};
use anyhow::{anyhow, Result};
use geoenrich_core::gateways::geocode::GeoCodingGateway;
use geoenrich_gateways::{google_maps::GoogleMaps, opencage::OpenCage};

pub type GeoGw = Box<dyn GeoCodingGateway + Send + Sync + 'static>;

pub fn geocoding_gateway(cfg: &Geocoding) -> Result<GeoGw> {
    match &cfg.gateway {
        Some(GeocodingGateway::GoogleMaps { api_key, timeout }) => {
            match timeout {
                Some(t) => log::info!("Use Google Maps geocoding gateway (timeout: {t:?})"),
                None => log::info!("Use Google Maps geocoding gateway"),
            }
            let gw = GoogleMaps::new(api_key.clone(), *timeout)?;
            Ok(Box::new(gw))
        }
        Some(GeocodingGateway::OpenCage { api_key }) => {
            log::info!("Use OpenCage geocoding gateway");
            Ok(Box::new(OpenCage::new(api_key.clone())))
        }
        None => Err(anyhow!(
            "No geocoding gateway configured: set GOOGLE_MAPS_API_KEY or OPENCAGE_API_KEY"
        )),
    }
}
