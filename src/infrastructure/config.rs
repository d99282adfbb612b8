use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct GatewayConfig {
    pub server: ServerSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    pub rollup: RollupSettings,
    pub log: LogSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
}

impl ServerSettings {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct StorageSettings {
    #[serde(default)]
    pub seed_path: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct RollupSettings {
    pub max_span_days: u32,
    pub top_fields: usize,
}

impl Default for RollupSettings {
    fn default() -> Self {
        Self {
            max_span_days: 30,
            top_fields: 5,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    pub filter: String,
}

const ENV_PREFIX: &str = "METRICS_GATEWAY";

pub fn load_gateway_config() -> anyhow::Result<GatewayConfig> {
    load_gateway_config_from("config/gateway")
}

/// Layer defaults, the optional config file at `path` (extension resolved by
/// the `config` crate) and `METRICS_GATEWAY__SECTION__KEY` variables.
pub fn load_gateway_config_from(path: &str) -> anyhow::Result<GatewayConfig> {
    let settings = config::Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080)?
        .set_default("server.request_timeout_secs", 30)?
        .set_default("rollup.max_span_days", 30)?
        .set_default("rollup.top_fields", 5)?
        .set_default("log.filter", "info,metrics_gateway=debug")?
        .add_source(config::File::with_name(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config: GatewayConfig = settings.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

/// Cap on the fields averaged per rollup bucket
pub const MAX_TOP_FIELDS: usize = 5;

impl GatewayConfig {
    /// Rejects settings the services cannot run with
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            (1..=MAX_TOP_FIELDS).contains(&self.rollup.top_fields),
            "rollup.top_fields must be between 1 and {} (got {})",
            MAX_TOP_FIELDS,
            self.rollup.top_fields
        );
        anyhow::ensure!(
            self.server.request_timeout_secs > 0,
            "server.request_timeout_secs must be at least 1"
        );
        Ok(())
    }
}
