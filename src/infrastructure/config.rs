use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub store: StoreSettings,
    #[serde(default)]
    pub feed: FeedSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_listen")]
    pub listen: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreSettings {
    #[serde(default = "default_data_file")]
    pub data_file: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FeedSettings {
    #[serde(default = "default_interval_seconds")]
    pub interval_seconds: u64,
}

fn default_listen() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_data_file() -> String {
    "data/farm-data.json".to_string()
}

fn default_interval_seconds() -> u64 {
    60
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
        }
    }
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            interval_seconds: default_interval_seconds(),
        }
    }
}

/// Load `config/server.toml`; a missing file or section falls back to the
/// code defaults.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/server").required(false))
        .build()?;

    Ok(settings.try_deserialize()?)
}
