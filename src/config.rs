use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditorConfig {
    pub kg_core: KgCoreConfig,
}

/// Where the remote graph store lives
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KgCoreConfig {
    pub endpoint: String,
    pub api_version: String,
    pub timeout_secs: u64,
}

impl Default for KgCoreConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8000".to_string(),
            api_version: "v3-beta".to_string(),
            timeout_secs: 30,
        }
    }
}

impl EditorConfig {
    /// Load configuration from environment variables and config file
    pub fn load() -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        config = config.add_source(config::Config::try_from(&EditorConfig::default())?);

        config = config.add_source(config::File::with_name("config").required(false));

        // e.g. KG_EDITOR_KG_CORE__ENDPOINT
        config = config.add_source(
            config::Environment::with_prefix("KG_EDITOR")
                .prefix_separator("_")
                .separator("__"),
        );

        let config = config.build()?;
        let editor_config: EditorConfig = config.try_deserialize()?;

        Ok(editor_config)
    }

    /// Endpoint joined with the API version, without a trailing slash
    pub fn api_base(&self) -> String {
        format!(
            "{}/{}",
            self.kg_core.endpoint.trim_end_matches('/'),
            self.kg_core.api_version.trim_matches('/')
        )
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.kg_core.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_base_joins_cleanly() {
        let mut config = EditorConfig::default();
        assert_eq!(config.api_base(), "http://localhost:8000/v3-beta");

        config.kg_core.endpoint = "https://core.kg.ebrains.eu/".to_string();
        config.kg_core.api_version = "/v3/".to_string();
        assert_eq!(config.api_base(), "https://core.kg.ebrains.eu/v3");
    }

    #[test]
    fn test_default_timeout() {
        assert_eq!(EditorConfig::default().timeout(), Duration::from_secs(30));
    }
}
