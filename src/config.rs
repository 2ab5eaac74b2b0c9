/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/***************************************/
/*             Constants               */
/***************************************/
pub const DEFAULT_CAPACITY: u32 = 10;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct Config {
    pub car: CarConfig,
    pub logging: LoggingConfig,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct CarConfig {
    pub capacity: u32,
    pub base_floor: i32,
    pub travel_time_ms: u64,
    pub idle_time_ms: u64,
    pub door_exit_time_ms: u64,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    Read(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
}

impl Default for CarConfig {
    fn default() -> CarConfig {
        CarConfig {
            capacity: DEFAULT_CAPACITY,
            base_floor: 0,
            travel_time_ms: 1000,
            idle_time_ms: 100,
            door_exit_time_ms: 1000,
        }
    }
}

impl CarConfig {
    pub fn travel_time(&self) -> Duration {
        Duration::from_millis(self.travel_time_ms)
    }

    pub fn idle_time(&self) -> Duration {
        Duration::from_millis(self.idle_time_ms)
    }

    pub fn door_exit_time(&self) -> Duration {
        Duration::from_millis(self.door_exit_time_ms)
    }
}

impl Default for LoggingConfig {
    fn default() -> LoggingConfig {
        LoggingConfig {
            level: "info".to_string(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read(path, e) => {
                write!(f, "failed to read configuration file {}: {}", path.display(), e)
            }
            ConfigError::Parse(path, e) => {
                write!(f, "failed to parse configuration file {}: {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read(_, e) => Some(e),
            ConfigError::Parse(_, e) => Some(e),
        }
    }
}

/***************************************/
/*             Public API              */
/***************************************/
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let config_str =
        fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
    parse_config(&config_str).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
}

pub fn parse_config(config_str: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(config_str)
}

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        // Purpose: Verify that every field is read from the TOML document

        // Arrange
        let text = r#"
            [car]
            capacity = 4
            base_floor = 2
            travel_time_ms = 10
            idle_time_ms = 5
            door_exit_time_ms = 7

            [logging]
            level = "debug"
        "#;

        // Act
        let config = parse_config(text).unwrap();

        // Assert
        assert_eq!(config.car.capacity, 4);
        assert_eq!(config.car.base_floor, 2);
        assert_eq!(config.car.travel_time(), Duration::from_millis(10));
        assert_eq!(config.car.idle_time(), Duration::from_millis(5));
        assert_eq!(config.car.door_exit_time(), Duration::from_millis(7));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_parse_partial_config_uses_defaults() {
        // Purpose: Verify that missing tables and keys fall back to defaults

        // Act
        let config = parse_config("[car]\ncapacity = 3\n").unwrap();

        // Assert
        assert_eq!(config.car.capacity, 3);
        assert_eq!(config.car.travel_time_ms, 1000);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_load_missing_file() {
        // Purpose: Verify that a missing file is reported as a read error with its path

        // Act
        let result = load_config(Path::new("does/not/exist.toml"));

        // Assert
        match result {
            Err(ConfigError::Read(path, _)) => assert_eq!(path, PathBuf::from("does/not/exist.toml")),
            other => panic!("Expected read error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_malformed_config() {
        // Purpose: Verify that a wrongly typed value is rejected
        assert!(parse_config("[car]\ncapacity = \"ten\"\n").is_err());
    }
}
