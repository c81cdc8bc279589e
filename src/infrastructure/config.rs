use crate::domain::display::UnitPreferences;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub store: StoreSettings,
    #[serde(default)]
    pub preferences: UnitPreferences,
    #[serde(default)]
    pub charts: ChartSettings,
    #[serde(default)]
    pub history: HistorySettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreSettings {
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from("data/fillups.json")
}

/// Plot area of the statistics charts.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct ChartSettings {
    #[serde(default = "default_chart_width")]
    pub width: f64,
    #[serde(default = "default_chart_height")]
    pub height: f64,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            width: default_chart_width(),
            height: default_chart_height(),
        }
    }
}

fn default_chart_width() -> f64 {
    600.0
}

fn default_chart_height() -> f64 {
    160.0
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct HistorySettings {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

fn default_page_size() -> usize {
    25
}

/// Load `config/app.*` (optional) overlaid with `FUEL_LEDGER__SECTION__KEY`
/// environment variables.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/app").required(false))
        .add_source(
            config::Environment::with_prefix("FUEL_LEDGER")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let mut app: AppConfig = settings.try_deserialize()?;
    if app.history.page_size == 0 {
        tracing::warn!("history.page_size must be positive, using {}", default_page_size());
        app.history.page_size = default_page_size();
    }
    Ok(app)
}
