use std::path::PathBuf;

use config::{Config, ConfigError, Environment, Source};
use serde::Deserialize;

pub const DEFAULT_OUTPUT: &str = "World_Cup_Players_Data.csv";
pub const DEFAULT_CONVERTER: &str = "pdftotext";
pub const DEFAULT_PAGINATED_MARKER: &str = "2018";

/// Runtime settings: built-in defaults, then `WC_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub output: PathBuf,
    pub converter: String,
    pub paginated_marker: String,
    pub reuse_text: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            output: PathBuf::from(DEFAULT_OUTPUT),
            converter: DEFAULT_CONVERTER.to_string(),
            paginated_marker: DEFAULT_PAGINATED_MARKER.to_string(),
            reuse_text: false,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_source(Environment::with_prefix("WC").try_parsing(true))
    }

    fn from_source<S>(source: S) -> Result<Self, ConfigError>
    where
        S: Source + Send + Sync + 'static,
    {
        Config::builder()
            .set_default("output", DEFAULT_OUTPUT)?
            .set_default("converter", DEFAULT_CONVERTER)?
            .set_default("paginated_marker", DEFAULT_PAGINATED_MARKER)?
            .set_default("reuse_text", false)?
            .add_source(source)
            .build()?
            .try_deserialize()
    }
}
