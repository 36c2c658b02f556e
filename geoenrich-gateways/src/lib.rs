//! Geocoding gateways backed by external web services.

pub mod google_maps;
pub mod opencage;
