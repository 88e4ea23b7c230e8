use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

pub mod migrate;

/// Upper bound for `lookback_days` and `horizon_days` (about ten years).
pub const MAX_WINDOW_DAYS: u32 = 3660;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    /// Days walked back by the streak reconciler, today included.
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,
    /// Days scanned forward for the next required check-in.
    #[serde(default = "default_horizon_days")]
    pub horizon_days: u32,
    /// strftime pattern for the next check-in label.
    #[serde(default = "default_next_label_format")]
    pub next_label_format: String,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
    #[serde(default = "default_team")]
    pub default_team: String,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_lookback_days() -> u32 {
    30
}
fn default_horizon_days() -> u32 {
    30
}
fn default_next_label_format() -> String {
    "%A, %B %-d".to_string()
}
fn default_separator_char() -> String {
    "-".to_string()
}
fn default_team() -> String {
    "default".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            lookback_days: default_lookback_days(),
            horizon_days: default_horizon_days(),
            next_label_format: default_next_label_format(),
            separator_char: default_separator_char(),
            default_team: default_team(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rcheckin")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rcheckin")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rcheckin.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rcheckin.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
            Self::from_yaml(&content)
        } else {
            Ok(Config::default())
        }
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        let cfg: Config = serde_yaml::from_str(content)?;
        if !(1..=MAX_WINDOW_DAYS).contains(&cfg.lookback_days) {
            return Err(AppError::Config(format!(
                "lookback_days must be between 1 and {MAX_WINDOW_DAYS}"
            )));
        }
        if cfg.horizon_days > MAX_WINDOW_DAYS {
            return Err(AppError::Config(format!(
                "horizon_days must be at most {MAX_WINDOW_DAYS}"
            )));
        }
        Ok(cfg)
    }

    pub fn save(&self) -> AppResult<()> {
        let yaml = serde_yaml::to_string(self)?;
        let mut file = fs::File::create(Self::config_file()).map_err(|_| AppError::ConfigSave)?;
        file.write_all(yaml.as_bytes())
            .map_err(|_| AppError::ConfigSave)?;
        Ok(())
    }

    /// Initialize configuration and database files.
    /// Returns the database path that was set up.
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_name {
            let p = std::path::Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            dir.join("rcheckin.sqlite")
        };

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write config file
        if !is_test {
            fs::create_dir_all(&dir)?;
            let config = Config {
                database: db_path.to_string_lossy().to_string(),
                ..Config::default()
            };
            config.save()?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        // Create empty DB file if not exists
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(db_path)
    }
}
