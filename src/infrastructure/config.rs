use crate::domain::data_source::{ColorRule, DataSource};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    pub provider: ProviderSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProviderSettings {
    pub base_url: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub server: ServerSettings,
    pub refresh: RefreshSettings,
    pub snapshot: SnapshotSettings,
    pub map: MapSettings,
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind_addr: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RefreshSettings {
    pub debounce_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SnapshotSettings {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MapSettings {
    pub center_lon: f64,
    pub center_lat: f64,
    pub zoom: u8,
}

/// A data source shipped as content config, the way widget definitions are.
#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    pub id: String,
    pub name: String,
    pub field: String,
    #[serde(default)]
    pub rules: Vec<ColorRule>,
}

impl SourceConfig {
    pub fn into_data_source(self) -> DataSource {
        DataSource {
            id: self.id,
            name: self.name,
            field: self.field,
            rules: self.rules,
        }
    }
}

pub fn load_provider_config() -> anyhow::Result<ProviderConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/provider"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::data_source::RuleOperator;

    #[test]
    fn test_source_config_parses_operator_symbols() {
        let toml = r##"
            [[sources]]
            id = "open-meteo-temperature"
            name = "Temperature (°C)"
            field = "temperature_2m"

            [[sources.rules]]
            operator = "<"
            threshold = 10.0
            color = "#3b82f6"
            label = "Cold"

            [[sources.rules]]
            operator = ">="
            threshold = 25.0
            color = "#ef4444"
            label = "Hot"
        "##;

        #[derive(Debug, Deserialize)]
        struct Sources {
            sources: Vec<SourceConfig>,
        }

        let settings = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap();
        let parsed: Sources = settings.try_deserialize().unwrap();

        let source = parsed.sources[0].clone().into_data_source();
        assert_eq!(source.field, "temperature_2m");
        assert_eq!(source.rules[0].operator, RuleOperator::Less);
        assert_eq!(source.rules[1].operator, RuleOperator::GreaterOrEqual);
    }
}
