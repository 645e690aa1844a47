use crate::events::AppEvent;
use async_channel::Sender;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use wheelkit::items::{ItemRegistry, ItemSpec};
use wheelkit::WheelError;
use wheelkit::settings::WheelSettings;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub wheel: WheelSettings,
    #[serde(default)]
    pub items: Vec<ItemSpec>,
}

impl Config {
    pub fn registry(&self) -> ItemRegistry {
        ItemRegistry::load(&self.items)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error("Invalid config: {0}")]
    Invalid(#[from] WheelError),
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "orbit", "orbit").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// Layers the config file (if any) and `ORBIT_*` variables over the defaults.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix("ORBIT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    validated(s)
}

pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&get_config_path()?)
}

pub fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    validated(s)
}

pub fn bundled_config() -> Result<Config, ConfigError> {
    parse_config(DEFAULT_CONFIG)
}

fn validated(s: config::Config) -> Result<Config, ConfigError> {
    let config: Config = s.try_deserialize()?;
    config.wheel.validate()?;
    Ok(config)
}

/// Falls back to the bundled sample wheel when there is no usable config.
pub fn load_or_default() -> Config {
    if let Ok(path) = get_config_path()
        && !path.exists()
    {
        log::info!(
            "No config at {}, showing the bundled sample (run `orbit --write-config` to customize)",
            path.display()
        );
        return bundled_or_empty();
    }

    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config, using the bundled sample: {}", e);
            bundled_or_empty()
        }
    }
}

fn bundled_or_empty() -> Config {
    bundled_config().unwrap_or_else(|e| {
        log::error!("Bundled config is invalid: {}", e);
        Config::default()
    })
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", ConfigError::from(e));
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", ConfigError::from(e));
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn parse(toml: &str) -> Config {
        parse_config(toml).unwrap()
    }

    #[test]
    fn test_bundled_config_is_valid() {
        let config = bundled_config().unwrap();
        let registry = config.registry();

        assert!(registry.count() >= 5);
        assert!(registry.iter().all(|item| !item.title.is_empty()));
        assert_eq!(config.wheel, WheelSettings::default());
    }

    #[test]
    fn test_partial_wheel_section() {
        let config = parse(
            r#"
            [wheel]
            speed = 0.2
            click_cooldown_ms = 8000

            [[items]]
            position = 2
            title = "Second"

            [[items]]
            position = 1
            title = "First"
            description = "Comes first"
            button = "Go"
            "#,
        );

        assert_eq!(config.wheel.speed, 0.2);
        assert_eq!(config.wheel.click_cooldown, Duration::from_millis(8000));
        assert_eq!(config.wheel.tolerance, WheelSettings::default().tolerance);

        let registry = config.registry();
        let first = registry.get(0).unwrap();
        assert_eq!(first.title.as_str(), "First");
        assert_eq!(first.button_label.as_str(), "Go");
        assert!(registry.get(1).unwrap().description.is_empty());
    }

    #[test]
    fn test_missing_sections_give_empty_wheel() {
        let config = parse("");
        assert!(config.items.is_empty());
        assert!(config.registry().is_empty());
    }

    #[test]
    fn test_unusable_wheel_settings_are_rejected() {
        for toml in [
            "[wheel]\nspeed = -0.08",
            "[wheel]\ntolerance = 0.0",
            "[wheel]\ntick_period_ms = 0",
        ] {
            let result = parse_config(toml);
            assert!(
                matches!(
                    result,
                    Err(ConfigError::Invalid(WheelError::InvalidSetting { .. }))
                ),
                "accepted {:?}",
                toml
            );
        }
    }

    #[test]
    fn test_invalid_file_is_an_error_not_a_panic() {
        let dir = std::env::temp_dir().join(format!("orbit-config-{}", std::process::id()));
        fs_err::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs_err::write(&path, "[wheel]\nspeed = -1.0\n").unwrap();

        let result = load_config_from(&path);
        fs_err::remove_dir_all(&dir).unwrap();

        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_config_json_roundtrip_of_items() {
        let json = r#"{ "items": [ { "title": "Solo" } ] }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.items.len(), 1);
        assert_eq!(config.wheel, WheelSettings::default());
    }
}
