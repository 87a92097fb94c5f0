use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::{agri, weather};

pub const DEFAULT_CONFIG_FILE: &str = "config/default.toml";
pub const ENV_PREFIX: &str = "LAND__";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub weather: WeatherConfig,
    pub soil: SoilConfig,
    pub pricing: PricingConfig,
    pub agri: AgriConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout_secs: 60,
            enable_cors: false,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub base_url: String,
    pub http_timeout_seconds: u64,
    pub cache_ttl_seconds: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: weather::open_meteo::DEFAULT_BASE_URL.to_string(),
            http_timeout_seconds: 30,
            cache_ttl_seconds: 3600,
        }
    }
}

impl WeatherConfig {
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_seconds)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SoilConfig {
    pub base_url: String,
    pub http_timeout_seconds: u64,
    /// Skip SoilGrids and always use the reference profile
    pub use_mock: bool,
}

impl Default for SoilConfig {
    fn default() -> Self {
        Self {
            base_url: agri::soil::DEFAULT_BASE_URL.to_string(),
            http_timeout_seconds: 15,
            use_mock: false,
        }
    }
}

impl SoilConfig {
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_seconds)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Flat energy price the scenario optimizer applies to PV and wind output
    pub scenario_price_per_kwh: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            scenario_price_per_kwh: 6.0,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AgriConfig {
    /// TOML crop table replacing the built-in one
    pub crop_catalog: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::from_figment(
            Figment::new()
                .merge(Toml::file(DEFAULT_CONFIG_FILE))
                .merge(Env::prefixed(ENV_PREFIX).split("__")),
        )
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: Self = figment.extract().context("failed to load configuration")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.pricing.scenario_price_per_kwh.is_finite()
                && self.pricing.scenario_price_per_kwh >= 0.0,
            "pricing.scenario_price_per_kwh must be a non-negative number"
        );
        anyhow::ensure!(
            self.weather.http_timeout_seconds > 0 && self.soil.http_timeout_seconds > 0,
            "http timeouts must be positive"
        );
        Ok(())
    }
}
