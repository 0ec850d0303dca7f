use std::{env, path::Path, path::PathBuf, time::Duration};

use color_eyre::Result;
use directories::BaseDirs;
use lazy_static::lazy_static;
use serde::Deserialize;
use tracing::warn;

use crate::tui::{KeyBinding, KeyBindings, Theme};

const CONFIG: &str = include_str!("../.config/config.json5");

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Config {
    /// Backend root that `/issues` and `/events` are joined onto
    #[serde(default = "default_service_root")]
    pub service_root: String,
    /// Unset means requests never time out
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Layered over the built-in bindings
    #[serde(default)]
    pub keybindings: Vec<KeyBinding>,
}

fn default_service_root() -> String {
    "http://localhost:8000".to_string()
}

fn default_theme() -> String {
    "dark".to_string()
}

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase().to_string();
    pub static ref CONFIG_FOLDER: Option<PathBuf> =
        env::var(format!("{}_CONFIG", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
}

impl Config {
    /// Load embedded defaults, then the user file
    ///
    /// An explicit path must exist. Without one, `config.json5` in the config
    /// directory and `~/.datafetcher-config.json5` are read when present.
    pub fn from_path(config_path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let config_dir = get_config_dir();
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(CONFIG, config::FileFormat::Json5));

        builder = match config_path {
            Some(path) => builder.add_source(
                config::File::from(expand_tilde(path))
                    .format(config::FileFormat::Json5)
                    .required(true),
            ),
            None => builder
                .add_source(
                    config::File::from(config_dir.join("config.json5"))
                        .format(config::FileFormat::Json5)
                        .required(false),
                )
                .add_source(
                    config::File::from(default_home_config_path())
                        .format(config::FileFormat::Json5)
                        .required(false),
                ),
        };

        builder.build()?.try_deserialize()
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Built-in theme by name; unknown names fall back to dark
    pub fn theme(&self) -> Theme {
        Theme::by_name(&self.theme).unwrap_or_else(|| {
            warn!("unknown theme '{}', using dark", self.theme);
            Theme::dark()
        })
    }

    /// Defaults plus configured overrides. Problems are logged, not fatal.
    pub fn keybindings(&self) -> KeyBindings {
        let bindings = KeyBindings::with_overrides(&self.keybindings);
        for warning in bindings.validate() {
            warn!("keybindings: {warning}");
        }
        bindings
    }
}

fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(rest) = path.to_str().and_then(|s| s.strip_prefix('~')) {
        if let Some(base) = BaseDirs::new() {
            return base.home_dir().join(rest.trim_start_matches(['/', '\\']));
        }
    }
    path.to_path_buf()
}

fn default_home_config_path() -> PathBuf {
    if let Some(base) = BaseDirs::new() {
        return base.home_dir().join(".datafetcher-config.json5");
    }
    PathBuf::from(".datafetcher-config.json5")
}

pub fn get_config_dir() -> PathBuf {
    if let Some(s) = CONFIG_FOLDER.clone() {
        s
    } else if let Some(base) = BaseDirs::new() {
        base.config_dir().join(env!("CARGO_PKG_NAME"))
    } else {
        PathBuf::from(".").join(".config")
    }
}
