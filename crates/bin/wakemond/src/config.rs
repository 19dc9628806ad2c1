//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `wakemon.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use chrono::NaiveTime;
use serde::Deserialize;

use wakemon_domain::window::WakeWindow;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Entity wiring.
    pub entities: EntitiesConfig,
    /// Reset time and wake window.
    pub schedule: ScheduleConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Entity ids the controller reads from and writes to.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EntitiesConfig {
    /// Entity the derived presence state is written to.
    pub awake_state: String,
    /// Manually operated toggle mirroring "user is currently awake".
    pub ux_awake_state: String,
    /// Sensor holding the next scheduled alarm timestamp.
    pub next_alarm_sensor: String,
    /// Entity the accepted alarm time is published to.
    pub next_wake_state: String,
}

/// Daily reset time and wake window bounds.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Time of day of the unconditional awake reset (`HH:MM:SS`).
    pub reset_time: String,
    /// First hour of day (0-23) at which an alarm counts.
    pub wake_time_start: u32,
    /// Last hour of day (0-23) at which an alarm counts.
    pub wake_time_end: u32,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `wakemon.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if
    /// the schedule section is semantically invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("wakemon.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("WAKEMON_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.wake_window()?;
        self.reset_time()?;
        Ok(())
    }

    /// Build the configured wake window.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] for inverted or out-of-range
    /// hours.
    pub fn wake_window(&self) -> Result<WakeWindow, ConfigError> {
        WakeWindow::new(self.schedule.wake_time_start, self.schedule.wake_time_end)
            .map_err(|err| ConfigError::Validation(err.to_string()))
    }

    /// Parse the configured daily reset time.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] when the value is not a valid
    /// `HH:MM:SS` time of day.
    pub fn reset_time(&self) -> Result<NaiveTime, ConfigError> {
        self.schedule
            .reset_time
            .parse()
            .map_err(|_| {
                ConfigError::Validation(format!(
                    "reset_time must be HH:MM:SS, got {:?}",
                    self.schedule.reset_time
                ))
            })
    }
}

impl Default for EntitiesConfig {
    fn default() -> Self {
        Self {
            awake_state: "binary_sensor.monitor_awake_state".to_string(),
            ux_awake_state: "input_boolean.ux_awake_state".to_string(),
            next_alarm_sensor: "sensor.next_alarm".to_string(),
            next_wake_state: "sensor.next_awake_time".to_string(),
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            reset_time: "09:00:00".to_string(),
            wake_time_start: 4,
            wake_time_end: 9,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "wakemond=info,wakemon=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(
            config.entities.awake_state,
            "binary_sensor.monitor_awake_state"
        );
        assert_eq!(config.schedule.wake_time_start, 4);
        assert_eq!(config.schedule.wake_time_end, 9);
        assert_eq!(config.schedule.reset_time, "09:00:00");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.schedule.wake_time_start, 4);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [entities]
            awake_state = 'binary_sensor.awake'
            ux_awake_state = 'input_boolean.awake'
            next_alarm_sensor = 'sensor.phone_next_alarm'
            next_wake_state = 'sensor.wake_at'

            [schedule]
            reset_time = '07:30:00'
            wake_time_start = 5
            wake_time_end = 10

            [logging]
            filter = 'debug'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.entities.next_alarm_sensor, "sensor.phone_next_alarm");
        assert_eq!(config.schedule.wake_time_start, 5);
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(
            config.reset_time().unwrap(),
            NaiveTime::from_hms_opt(7, 30, 0).unwrap()
        );
    }

    #[test]
    fn should_parse_partial_toml_with_defaults() {
        let toml = "
            [schedule]
            wake_time_end = 11
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.schedule.wake_time_end, 11);
        assert_eq!(config.schedule.wake_time_start, 4);
        assert_eq!(config.entities.next_wake_state, "sensor.next_awake_time");
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.schedule.wake_time_start, 4);
    }

    #[test]
    fn should_reject_inverted_wake_window() {
        let mut config = Config::default();
        config.schedule.wake_time_start = 10;
        config.schedule.wake_time_end = 4;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn should_reject_out_of_range_hours() {
        let mut config = Config::default();
        config.schedule.wake_time_end = 24;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_malformed_reset_time() {
        let mut config = Config::default();
        config.schedule.reset_time = "7 o'clock".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn should_build_wake_window_from_schedule() {
        let config = Config::default();
        let window = config.wake_window().unwrap();
        assert_eq!(window.start_hour(), 4);
        assert_eq!(window.end_hour(), 9);
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}
