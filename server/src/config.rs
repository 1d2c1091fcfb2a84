//! Server settings
//!
//! Read from an optional `genealogy.toml` in the working directory, then
//! overridden by `GENEALOGY__*` environment variables, e.g.
//! `GENEALOGY__PORT=8080` or `GENEALOGY__SIMULATION__SEED=7`.

use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, Environment, File};
use serde::Deserialize;
use simulation::SimulationConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("invalid listen address {0}")]
    Address(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub simulation: SimulationConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 5001,
            simulation: SimulationConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_builder(
            Config::builder()
                .add_source(File::with_name("genealogy").required(false))
                .add_source(
                    Environment::with_prefix("GENEALOGY")
                        .prefix_separator("__")
                        .separator("__")
                        .try_parsing(true),
                ),
        )
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        Ok(builder.build()?.try_deserialize()?)
    }

    pub fn listen_addr(&self) -> Result<std::net::SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::Address(format!("{}:{}", self.host, self.port)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::config::FileFormat;

    #[test]
    fn test_empty_source_uses_defaults() {
        let config = ServerConfig::from_builder(Config::builder()).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.port, 5001);
        assert_eq!(config.simulation.tick_interval_ms, 10_000);
    }

    #[test]
    fn test_toml_overrides() {
        let toml = r#"
            port = 8080

            [simulation]
            seed = 7
            initial_population = 50
        "#;
        let config = ServerConfig::from_builder(
            Config::builder().add_source(File::from_str(toml, FileFormat::Toml)),
        )
        .unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.simulation.seed, Some(7));
        assert_eq!(config.simulation.initial_population, 50);
        assert_eq!(config.simulation.tick_interval_ms, 10_000);
        assert_eq!(config.listen_addr().unwrap().port(), 8080);
    }

    #[test]
    fn test_bad_host_is_reported() {
        let config = ServerConfig {
            host: "not a host".into(),
            ..Default::default()
        };
        assert!(matches!(config.listen_addr(), Err(ConfigError::Address(_))));
    }
}
