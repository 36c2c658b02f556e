//! # geoenrich-core
//!
//! Enrichment of location records with geographic coordinates.
//! The geocoding service is accessed only through [`gateways::geocode::GeoCodingGateway`].

pub mod gateways;
pub mod usecases;

pub mod entities {
    pub use geoenrich_entities::{address::*, geo::*, record::*, target::*};
}
