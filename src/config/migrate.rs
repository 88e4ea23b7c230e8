//! Configuration file upgrades: detect fields missing from an older file and
//! fill them with their defaults, keeping every value the user already set.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Field names of the current `Config`, in file order.
fn expected_fields() -> AppResult<Vec<String>> {
    let defaults = serde_yaml::to_value(Config::default())?;
    match defaults {
        Value::Mapping(map) => Ok(map
            .keys()
            .filter_map(|k| k.as_str().map(str::to_string))
            .collect()),
        _ => Err(AppError::Config("default configuration is not a mapping".into())),
    }
}

fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    match serde_yaml::from_str::<Value>(&content)? {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Mapping::new()),
        _ => Err(AppError::Config(format!(
            "{} is not a YAML mapping",
            path.display()
        ))),
    }
}

/// Fields the file at `path` does not define.
pub fn missing_fields(path: &Path) -> AppResult<Vec<String>> {
    let map = read_mapping(path)?;
    Ok(expected_fields()?
        .into_iter()
        .filter(|f| !map.contains_key(Value::String(f.clone())))
        .collect())
}

/// Add missing fields with default values. Returns how many were added.
pub fn migrate_config_file(path: &Path) -> AppResult<usize> {
    let mut map = read_mapping(path)?;

    let defaults = match serde_yaml::to_value(Config::default())? {
        Value::Mapping(m) => m,
        _ => return Err(AppError::Config("default configuration is not a mapping".into())),
    };

    let mut added = 0;
    for (k, v) in defaults {
        if !map.contains_key(&k) {
            if let Some(name) = k.as_str() {
                info(format!("Adding missing field '{}'", name));
            }
            map.insert(k, v);
            added += 1;
        }
    }

    if added > 0 {
        let yaml = serde_yaml::to_string(&Value::Mapping(map))?;
        fs::write(path, yaml).map_err(|_| AppError::ConfigSave)?;
        success(format!("Configuration updated ({} field(s) added).", added));
    } else {
        success("Configuration is up to date.");
    }

    Ok(added)
}
