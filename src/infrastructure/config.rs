use crate::domain::hospital::HOSPITAL_ALL;
use serde::Deserialize;
use std::collections::HashSet;

const ENV_PREFIX: &str = "FLEET";

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub server: ServerSettings,
    #[serde(default)]
    pub noise: NoiseSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
}

/// Jitter source selection. A seed makes generated figures reproducible.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct NoiseSettings {
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    pub hospitals: Vec<String>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog must list at least one hospital")]
    NoHospitals,
    #[error("hospital listed more than once: {0}")]
    DuplicateHospital(String),
    #[error("\"All\" is reserved for the all-hospitals view")]
    ReservedHospitalName,
}

impl CatalogConfig {
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.hospitals.is_empty() {
            return Err(CatalogError::NoHospitals);
        }
        let mut seen = HashSet::new();
        for hospital in &self.hospitals {
            if hospital == HOSPITAL_ALL {
                return Err(CatalogError::ReservedHospitalName);
            }
            if !seen.insert(hospital.as_str()) {
                return Err(CatalogError::DuplicateHospital(hospital.clone()));
            }
        }
        Ok(())
    }
}

fn env_source() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("hospitals")
        .try_parsing(true)
}

pub fn load_server_config() -> anyhow::Result<ServerConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/server"))
        .add_source(env_source())
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_catalog_config() -> anyhow::Result<CatalogConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/catalog"))
        .add_source(env_source())
        .build()?;

    catalog_from(settings)
}

fn catalog_from(settings: config::Config) -> anyhow::Result<CatalogConfig> {
    let catalog: CatalogConfig = settings.try_deserialize()?;
    catalog.validate()?;
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{Config, File, FileFormat};

    fn catalog(toml: &str) -> anyhow::Result<CatalogConfig> {
        let settings = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;
        catalog_from(settings)
    }

    #[test]
    fn test_catalog_from_toml() {
        let catalog = catalog(r#"hospitals = ["Mayo Clinic Rochester", "Mayo Clinic Phoenix"]"#).unwrap();
        assert_eq!(catalog.hospitals, ["Mayo Clinic Rochester", "Mayo Clinic Phoenix"]);
    }

    #[test]
    fn test_catalog_validation() {
        let err = catalog("hospitals = []").unwrap_err();
        assert_eq!(err.downcast_ref::<CatalogError>(), Some(&CatalogError::NoHospitals));

        let err = catalog(r#"hospitals = ["A", "B", "A"]"#).unwrap_err();
        assert_eq!(
            err.downcast_ref::<CatalogError>(),
            Some(&CatalogError::DuplicateHospital("A".to_string()))
        );

        let err = catalog(r#"hospitals = ["All"]"#).unwrap_err();
        assert_eq!(err.downcast_ref::<CatalogError>(), Some(&CatalogError::ReservedHospitalName));
    }

    #[test]
    fn test_server_config_noise_is_optional() {
        let settings = Config::builder()
            .add_source(File::from_str("[server]\nbind = \"127.0.0.1:9000\"", FileFormat::Toml))
            .build()
            .unwrap();
        let config: ServerConfig = settings.try_deserialize().unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:9000");
        assert_eq!(config.noise.seed, None);

        let settings = Config::builder()
            .add_source(File::from_str(
                "[server]\nbind = \"127.0.0.1:9000\"\n[noise]\nseed = 42",
                FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let config: ServerConfig = settings.try_deserialize().unwrap();
        assert_eq!(config.noise.seed, Some(42));
    }
}
