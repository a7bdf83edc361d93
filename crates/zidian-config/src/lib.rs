use std::env;

use serde::{Deserialize, Serialize};

use self::lookup::LookupConfig;
use self::ui::UiConfig;

pub mod lookup;
pub mod ui;

pub use self::ui::OutputFormat;

fn default_log_filter() -> String {
    "warn".to_string()
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct Config {
    pub lookup: LookupConfig,
    pub ui: UiConfig,
    /// Default tracing filter, used when `RUST_LOG` is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lookup: LookupConfig::default(),
            ui: UiConfig::default(),
            log_filter: default_log_filter(),
        }
    }
}

impl Config {
    /// Override fields from `ZIDIAN_*` environment variables.
    /// Called after a config file has been read so deploy-time values win.
    pub fn apply_env(&mut self) {
        self.lookup.apply_env();

        if let Ok(filter) = env::var("ZIDIAN_LOG") {
            self.log_filter = filter;
        }
    }
}
