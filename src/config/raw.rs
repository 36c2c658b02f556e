use duration_str::deserialize_option_duration;
use serde::Deserialize;
use std::{env, time::Duration};

pub use super::FailurePolicy;

const DEFAULT_CONFIG_FILE: &str = include_str!("geoenrich.default.toml");

const ENV_NAME_GOOGLE_MAPS_API_KEY: &str = "GOOGLE_MAPS_API_KEY";
const ENV_NAME_OPENCAGE_API_KEY: &str = "OPENCAGE_API_KEY";

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub datastore: Option<Datastore>,
    pub geocoding: Option<Geocoding>,
    pub gateway: Option<Gateway>,
    pub enrichment: Option<Enrichment>,
}

impl Default for Config {
    fn default() -> Self {
        let cfg: Self = toml::from_str(DEFAULT_CONFIG_FILE).expect("Default configuration");
        cfg
    }
}

impl Config {
    /// API keys from the environment take precedence over the file.
    pub fn apply_env(&mut self) {
        if let Ok(api_key) = env::var(ENV_NAME_GOOGLE_MAPS_API_KEY) {
            let gateway = self.gateway.get_or_insert_with(Gateway::default);
            gateway.google_maps.get_or_insert_with(GoogleMaps::default).api_key = Some(api_key);
        }
        if let Ok(api_key) = env::var(ENV_NAME_OPENCAGE_API_KEY) {
            let gateway = self.gateway.get_or_insert_with(Gateway::default);
            gateway.opencage.get_or_insert_with(OpenCage::default).api_key = Some(api_key);
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Datastore {
    pub project_id: String,
    pub namespace: Option<String>,
    #[serde(default)]
    pub parents: Vec<Parent>,
    pub kind: String,
    pub key_column: String,
    #[serde(default)]
    pub indexed_columns: Vec<String>,
}

impl Default for Datastore {
    fn default() -> Self {
        Config::default().datastore.expect("Datastore configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Parent {
    pub kind: String,
    pub name: String,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Geocoding {
    pub gateway: Option<GeocodingGateway>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeocodingGateway {
    GoogleMaps,
    Opencage,
}

impl GeocodingGateway {
    pub const fn name(self) -> &'static str {
        match self {
            Self::GoogleMaps => "google-maps",
            Self::Opencage => "opencage",
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Gateway {
    pub google_maps: Option<GoogleMaps>,
    pub opencage: Option<OpenCage>,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GoogleMaps {
    pub api_key: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_duration")]
    pub timeout: Option<Duration>,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OpenCage {
    pub api_key: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Enrichment {
    pub on_failure: FailurePolicy,
}

impl Default for Enrichment {
    fn default() -> Self {
        Config::default()
            .enrichment
            .expect("Enrichment configuration")
    }
}
