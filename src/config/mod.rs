use anyhow::{anyhow, Result};
use geoenrich_entities::target::DatastoreTarget;
use serde::Deserialize;
use std::{fs, io::ErrorKind, path::Path, time::Duration};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "geoenrich.toml";

pub struct Config {
    pub datastore: DatastoreTarget,
    pub geocoding: Geocoding,
    pub enrichment: Enrichment,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let mut raw_config: raw::Config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!(
                        "{} not found => load default configuration.",
                        file_path.display()
                    );
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        raw_config.apply_env();
        Self::try_from(raw_config)
    }
}

pub struct Geocoding {
    pub gateway: Option<GeocodingGateway>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeocodingGateway {
    GoogleMaps {
        api_key: String,
        timeout: Option<Duration>,
    },
    OpenCage {
        api_key: String,
    },
}

pub struct Enrichment {
    pub on_failure: FailurePolicy,
}

/// What to do with a record that could not be enriched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Log the failure and continue without the record.
    Drop,
    /// Abort on the first failure.
    Halt,
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            datastore,
            geocoding,
            gateway,
            enrichment,
        } = from;

        let raw::Datastore {
            project_id,
            namespace,
            parents,
            kind,
            key_column,
            indexed_columns,
        } = datastore.unwrap_or_default();

        if kind.is_empty() {
            return Err(anyhow!("No datastore kind defined"));
        }
        let datastore = DatastoreTarget {
            project_id,
            namespace: namespace.filter(|ns| !ns.is_empty()),
            parents: parents.into_iter().map(|p| (p.kind, p.name)).collect(),
            kind,
            key_column,
            indexed_columns,
        };

        let raw::Gateway {
            google_maps,
            opencage,
        } = gateway.unwrap_or_default();

        let google_maps = google_maps.unwrap_or_default();
        let opencage = opencage.unwrap_or_default();

        let geo_gateway = match geocoding.and_then(|g| g.gateway) {
            Some(gw_name) => {
                let name = gw_name.name();
                let gw = match gw_name {
                    raw::GeocodingGateway::GoogleMaps => {
                        let raw::GoogleMaps { api_key, timeout } = google_maps;
                        let api_key = api_key
                            .ok_or_else(|| anyhow!("Missing API key for '{name}' gateway"))?;
                        GeocodingGateway::GoogleMaps { api_key, timeout }
                    }
                    raw::GeocodingGateway::Opencage => {
                        let raw::OpenCage { api_key } = opencage;
                        let api_key = api_key
                            .ok_or_else(|| anyhow!("Missing API key for '{name}' gateway"))?;
                        GeocodingGateway::OpenCage { api_key }
                    }
                };
                Some(gw)
            }
            None => {
                if let Some(api_key) = google_maps.api_key {
                    Some(GeocodingGateway::GoogleMaps {
                        api_key,
                        timeout: google_maps.timeout,
                    })
                } else {
                    opencage
                        .api_key
                        .map(|api_key| GeocodingGateway::OpenCage { api_key })
                }
            }
        };
        let geocoding = Geocoding {
            gateway: geo_gateway,
        };

        let raw::Enrichment { on_failure } = enrichment.unwrap_or_default();
        let enrichment = Enrichment { on_failure };

        Ok(Self {
            datastore,
            geocoding,
            enrichment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> Result<Config> {
        Config::try_from(toml::from_str::<raw::Config>(toml)?)
    }

    #[test]
    fn load_default_config() {
        let file: Option<&Path> = None;
        let cfg = Config::try_load_from_file_or_default(file).unwrap();
        assert_eq!(cfg.datastore.kind, "Provider");
        assert_eq!(cfg.enrichment.on_failure, FailurePolicy::Drop);
    }

    #[test]
    fn convert_full_example() {
        let cfg = parse(include_str!("geoenrich.full-example.toml")).unwrap();
        assert_eq!(cfg.datastore.namespace.as_deref(), Some("providers"));
        assert_eq!(
            cfg.datastore.parents,
            vec![
                ("Country".to_string(), "US".to_string()),
                ("Registry".to_string(), "NPPES".to_string())
            ]
        );
        assert_eq!(
            cfg.geocoding.gateway,
            Some(GeocodingGateway::GoogleMaps {
                api_key: "YOUR-GOOGLE-MAPS-API-KEY".into(),
                timeout: Some(Duration::from_secs(10)),
            })
        );
        assert_eq!(cfg.enrichment.on_failure, FailurePolicy::Halt);
    }

    #[test]
    fn selected_gateway_requires_api_key() {
        let err = parse(
            r#"
            [geocoding]
            gateway = "opencage"
            "#,
        )
        .err()
        .unwrap();
        assert!(err.to_string().contains("opencage"));
    }

    #[test]
    fn fall_back_to_gateway_with_api_key() {
        let cfg = parse(
            r#"
            [gateway.opencage]
            api-key = "abc"
            "#,
        )
        .unwrap();
        assert_eq!(
            cfg.geocoding.gateway,
            Some(GeocodingGateway::OpenCage {
                api_key: "abc".into()
            })
        );
    }

    #[test]
    fn empty_namespace_is_none() {
        let cfg = parse(
            r#"
            [datastore]
            project-id = "p"
            namespace = ""
            kind = "Provider"
            key-column = "npi"
            "#,
        )
        .unwrap();
        assert!(cfg.datastore.namespace.is_none());
        assert!(cfg.datastore.indexed_columns.is_empty());
        assert!(cfg.geocoding.gateway.is_none());
    }
}
