#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::collections::HashMap;
use std::env;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use tokio::fs;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    ApiURL,
    ConfigFile,
    SessionFile,
}

pub struct Config {}

pub fn cache_dir() -> path::PathBuf {
    return dirs::cache_dir()
        .unwrap_or_else(env::temp_dir)
        .join("dogcodes");
}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn default(key: ConfigKey) -> String {
        #[cfg(not(target_os = "macos"))]
        let config_path = dirs::config_dir()
            .unwrap_or_else(env::temp_dir)
            .join("dogcodes/config.toml");
        #[cfg(target_os = "macos")]
        let config_path = dirs::home_dir()
            .unwrap_or_else(env::temp_dir)
            .join(".config/dogcodes/config.toml");

        let session_path = cache_dir().join("session.yaml");

        let res = match key {
            ConfigKey::ApiURL => "http://localhost:5000".to_string(),

            // Special
            ConfigKey::ConfigFile => config_path.to_string_lossy().to_string(),
            ConfigKey::SessionFile => session_path.to_string_lossy().to_string(),
        };

        return res;
    }

    /// Layers defaults, the TOML config file, and CLI/env arguments, in that
    /// order of precedence, without touching the global config.
    pub async fn resolve(clap_arg_matches: Vec<&ArgMatches>) -> Result<HashMap<ConfigKey, String>> {
        let mut resolved = ConfigKey::iter()
            .map(|key| return (key, Config::default(key)))
            .collect::<HashMap<ConfigKey, String>>();

        for matches in clap_arg_matches.as_slice() {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                resolved.insert(ConfigKey::ConfigFile, arg_config_file.to_string());
            }
        }

        let config_path = path::PathBuf::from(&resolved[&ConfigKey::ConfigFile]);
        if config_path.exists() {
            let toml_str = fs::read_to_string(config_path).await?;
            let doc = toml_str.parse::<toml_edit::Document>()?;

            for key in ConfigKey::iter() {
                if key == ConfigKey::ConfigFile {
                    continue;
                }

                if let Some(val) = doc.get(&key.to_string()) {
                    let Some(val_str) = val.as_str() else {
                        bail!(format!(
                            "config.toml has an invalid value for key '{key}': expected a string"
                        ));
                    };
                    if val_str.is_empty() {
                        continue;
                    }
                    if key == ConfigKey::ApiURL && !val_str.starts_with("http") {
                        bail!(format!("config.toml has an invalid value for key '{key}': {val_str}\nExpected an http(s) URL"));
                    }
                    resolved.insert(key, val_str.to_string());
                }
            }
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    resolved.insert(key, val.to_string());
                }
            }
        }

        return Ok(resolved);
    }

    pub async fn load(clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        for (key, val) in Config::resolve(clap_arg_matches).await? {
            Config::set(key, &val);
        }

        tracing::debug!(
            api_url = Config::get(ConfigKey::ApiURL),
            session_file = Config::get(ConfigKey::SessionFile),
            "config"
        );

        return Ok(());
    }

    pub fn serialize_default(cmd: Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::ConfigFile {
                    return None;
                }

                let description = cmd
                    .get_arguments()
                    .find(|e| return e.get_long() == Some(key.to_string().as_str()))
                    .and_then(|arg| return arg.get_help())
                    .map(|help| {
                        return help
                            .to_string()
                            .split("[default:")
                            .next()
                            .unwrap_or_default()
                            .trim()
                            .to_string();
                    })
                    .unwrap_or_default();

                let val = Config::default(key);
                return Some(format!("# {description}\n{key} = \"{val}\""));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}
