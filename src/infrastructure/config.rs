use crate::application::chart_builder::BuilderOptions;
use crate::domain::palette::{
    Color, Palette, PaletteError, DEFAULT_CHANNEL_COLORS, DEFAULT_LOG_EVENTS_COLOR,
    DEFAULT_UNASSIGNED_COLOR,
};
use serde::Deserialize;

const ENV_PREFIX: &str = "MODEM_CHARTS";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub source: SourceSettings,
    pub charts: ChartsSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
    pub listen: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SourceSettings {
    /// Base URL of the service exposing `GET /data`.
    pub endpoint: String,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8000".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ChartsSettings {
    pub time_axis_label: String,
    pub overlay_log_events: bool,
    pub palette: Vec<String>,
    pub unassigned_color: String,
    pub log_events_color: String,
    pub families: Vec<FamilyConfig>,
}

impl Default for ChartsSettings {
    fn default() -> Self {
        Self {
            time_axis_label: "Time".to_string(),
            overlay_log_events: true,
            palette: DEFAULT_CHANNEL_COLORS.iter().map(|c| c.to_string()).collect(),
            unassigned_color: DEFAULT_UNASSIGNED_COLOR.to_string(),
            log_events_color: DEFAULT_LOG_EVENTS_COLOR.to_string(),
            families: default_families(),
        }
    }
}

impl ChartsSettings {
    pub fn palette(&self) -> Result<Palette, PaletteError> {
        Palette::new(
            self.palette.iter().map(Color::new).collect(),
            Color::new(&self.unassigned_color),
        )
    }

    pub fn builder_options(&self) -> BuilderOptions {
        BuilderOptions {
            time_axis_label: self.time_axis_label.clone(),
            overlay_log_events: self.overlay_log_events,
            log_events_color: Color::new(&self.log_events_color),
        }
    }
}

/// One chart on the dashboard.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct FamilyConfig {
    pub family: String,
    pub title: Option<String>,
    /// Primary value axis label.
    pub label: String,
}

impl FamilyConfig {
    fn new(family: &str, title: &str, label: &str) -> Self {
        Self {
            family: family.to_string(),
            title: Some(title.to_string()),
            label: label.to_string(),
        }
    }
}

fn default_families() -> Vec<FamilyConfig> {
    vec![
        FamilyConfig::new("downstream_power", "Downstream power", "Power (dBmV)"),
        FamilyConfig::new("downstream_snr", "Downstream SNR", "SNR (dB)"),
        FamilyConfig::new("downstream_rxmer", "Downstream RxMER", "RxMER (dB)"),
        FamilyConfig::new("upstream_power", "Upstream power", "Power (dBmV)"),
    ]
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct LoggingSettings {
    /// Emit one JSON object per log line.
    pub json: bool,
}

pub fn load_settings() -> anyhow::Result<Settings> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{Config, File, FileFormat};

    fn from_toml(toml: &str) -> Settings {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let settings = from_toml("");

        assert_eq!(settings.server.listen, "0.0.0.0:8080");
        assert_eq!(settings.source.endpoint, "http://127.0.0.1:8000");
        assert_eq!(settings.charts.time_axis_label, "Time");
        assert!(settings.charts.overlay_log_events);
        assert!(!settings.logging.json);
        assert_eq!(settings.charts.palette().unwrap(), Palette::default());

        let families: Vec<_> = settings
            .charts
            .families
            .iter()
            .map(|f| f.family.as_str())
            .collect();
        assert_eq!(
            families,
            vec!["downstream_power", "downstream_snr", "downstream_rxmer", "upstream_power"]
        );
    }

    #[test]
    fn test_default_source_is_not_this_service() {
        let settings = Settings::default();

        let listen: std::net::SocketAddr = settings.server.listen.parse().unwrap();
        let endpoint = reqwest::Url::parse(&settings.source.endpoint).unwrap();

        assert_ne!(endpoint.port_or_known_default(), Some(listen.port()));
    }

    #[test]
    fn test_file_overrides() {
        let palette: Vec<String> = (1..=24).map(|n| format!("\"color-{}\"", n)).collect();
        let settings = from_toml(&format!(
            r#"
            [source]
            endpoint = "http://modem.local:9000/"

            [charts]
            time_axis_label = "Date"
            overlay_log_events = false
            palette = [{}]

            [[charts.families]]
            family = "upstream_power"
            label = "dBmV"
            "#,
            palette.join(", ")
        ));

        assert_eq!(settings.source.endpoint, "http://modem.local:9000/");
        assert_eq!(settings.charts.families.len(), 1);
        assert_eq!(settings.charts.families[0].title, None);

        let palette = settings.charts.palette().unwrap();
        assert_eq!(palette.len(), 24);
        assert_eq!(palette.colors()[0].as_str(), "color-1");

        let options = settings.charts.builder_options();
        assert_eq!(options.time_axis_label, "Date");
        assert!(!options.overlay_log_events);
    }

    #[test]
    fn test_short_palette_rejected() {
        let settings = from_toml(
            r#"
            [charts]
            palette = ["red", "green", "blue"]
            "#,
        );

        assert_eq!(
            settings.charts.palette(),
            Err(PaletteError::TooFew { len: 3, min: 24 })
        );
    }

    #[test]
    fn test_duplicate_palette_rejected() {
        let mut palette: Vec<String> = (1..=24).map(|n| format!("\"color-{}\"", n)).collect();
        palette[10] = "\"color-3\"".to_string();
        let settings = from_toml(&format!("[charts]\npalette = [{}]\n", palette.join(", ")));

        assert_eq!(
            settings.charts.palette(),
            Err(PaletteError::DuplicateColor("color-3".to_string()))
        );
    }
}
