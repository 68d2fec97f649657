use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub window: WindowConfig,
}

fn default_base_url() -> String {
    // LuxeDrive-operated relay: the real gateway credential stays server-side,
    // shipped binaries and config files never carry it.
    "https://concierge-relay.luxedrive.example/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_web_search() -> bool {
    true
}

#[derive(Debug, Deserialize, Serialize)]
pub struct GatewayConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_web_search")]
    pub web_search: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        GatewayConfig {
            base_url: default_base_url(),
            model: default_model(),
            web_search: default_web_search(),
        }
    }
}

fn default_window_width() -> u32 {
    420
}

fn default_window_height() -> u32 {
    640
}

#[derive(Debug, Deserialize, Serialize)]
pub struct WindowConfig {
    #[serde(default = "default_window_width")]
    pub width: u32,
    #[serde(default = "default_window_height")]
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            width: default_window_width(),
            height: default_window_height(),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let config_path = Self::get_config_path();

        if config_path.exists() {
            match fs::read_to_string(&config_path) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(config) => return config,
                    Err(e) => eprintln!("Error parsing config.toml: {}. Using defaults.", e),
                },
                Err(e) => eprintln!("Error reading config.toml: {}. Using defaults.", e),
            }
        } else {
            // Create config directory if it doesn't exist
            if let Some(parent) = config_path.parent() {
                let _ = fs::create_dir_all(parent);
            }
        }

        Config::default()
    }

    pub fn get_config_path() -> PathBuf {
        Self::get_config_dir().join("config.toml")
    }

    pub fn get_config_dir() -> PathBuf {
        if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home).join(".config/luxedrive-concierge")
        } else {
            PathBuf::from(".")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_falls_back_to_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.gateway.model, "gemini-3-flash-preview");
        assert!(config.gateway.web_search);
        assert_eq!(config.window.width, 420);
        assert_eq!(config.window.height, 640);
    }

    #[test]
    fn test_partial_section_keeps_remaining_defaults() {
        let config: Config =
            toml::from_str("[gateway]\nmodel = \"gemini-3-pro\"\nweb_search = false\n").unwrap();
        assert_eq!(config.gateway.model, "gemini-3-pro");
        assert!(!config.gateway.web_search);
        assert_eq!(config.gateway.base_url, default_base_url());
        assert_eq!(config.window.width, 420);
    }
}
