//! User configuration and notification preferences.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// User configuration for the money and reduction projections.
///
/// Setters and `apply` store whatever they are given; out-of-range stored
/// values are corrected back to defaults at load time only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    /// Assumed pre-quit daily cigarette count.
    #[serde(default = "default_cigarettes_per_day")]
    pub cigarettes_per_day: u32,
    /// Price of one cigarette.
    #[serde(default = "default_cigarette_price")]
    pub cigarette_price: f64,
    /// When the quit attempt started. Defaults to first use.
    #[serde(default = "Utc::now")]
    pub quit_start_date: DateTime<Utc>,
}

pub(crate) fn default_cigarettes_per_day() -> u32 {
    10
}
pub(crate) fn default_cigarette_price() -> f64 {
    5.0
}
fn default_true() -> bool {
    true
}
fn default_reminder_hour() -> u32 {
    20
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            cigarettes_per_day: default_cigarettes_per_day(),
            cigarette_price: default_cigarette_price(),
            quit_start_date: Utc::now(),
        }
    }
}

impl UserConfig {
    /// Apply a string value to a named setting.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value cannot be parsed.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "cigarettes_per_day" => {
                self.cigarettes_per_day = value.parse().map_err(|_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("cannot parse '{value}' as an integer"),
                })?;
            }
            "cigarette_price" => {
                self.cigarette_price = value.parse().map_err(|_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("cannot parse '{value}' as a number"),
                })?;
            }
            "quit_start_date" => {
                self.quit_start_date =
                    value
                        .parse::<DateTime<Utc>>()
                        .map_err(|_| ConfigError::InvalidValue {
                            key: key.to_string(),
                            message: format!("cannot parse '{value}' as an RFC 3339 date"),
                        })?;
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}

/// Notification preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationPrefs {
    #[serde(default = "default_true")]
    pub daily_reminder_enabled: bool,
    #[serde(default = "default_reminder_hour")]
    pub daily_reminder_hour: u32,
    #[serde(default)]
    pub daily_reminder_minute: u32,
    #[serde(default = "default_true")]
    pub high_risk_enabled: bool,
    #[serde(default = "default_true")]
    pub encouragement_enabled: bool,
}

impl Default for NotificationPrefs {
    fn default() -> Self {
        Self {
            daily_reminder_enabled: true,
            daily_reminder_hour: default_reminder_hour(),
            daily_reminder_minute: 0,
            high_risk_enabled: true,
            encouragement_enabled: true,
        }
    }
}

impl NotificationPrefs {
    /// Apply a string value to a named preference.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value cannot be parsed.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let parse_bool = |value: &str| {
            value.parse::<bool>().map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("cannot parse '{value}' as a boolean"),
            })
        };
        match key {
            "daily_reminder_enabled" => self.daily_reminder_enabled = parse_bool(value)?,
            "high_risk_enabled" => self.high_risk_enabled = parse_bool(value)?,
            "encouragement_enabled" => self.encouragement_enabled = parse_bool(value)?,
            "daily_reminder_hour" => {
                self.daily_reminder_hour = value.parse().map_err(|_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("cannot parse '{value}' as an hour"),
                })?;
            }
            "daily_reminder_minute" => {
                self.daily_reminder_minute =
                    value.parse().map_err(|_| ConfigError::InvalidValue {
                        key: key.to_string(),
                        message: format!("cannot parse '{value}' as a minute"),
                    })?;
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = UserConfig::default();
        assert_eq!(config.cigarettes_per_day, 10);
        assert_eq!(config.cigarette_price, 5.0);
    }

    #[test]
    fn apply_updates_known_keys() {
        let mut config = UserConfig::default();
        config.apply("cigarettes_per_day", "20").unwrap();
        config.apply("cigarette_price", "7.5").unwrap();
        assert_eq!(config.cigarettes_per_day, 20);
        assert_eq!(config.cigarette_price, 7.5);
    }

    #[test]
    fn apply_rejects_unknown_key() {
        let mut config = UserConfig::default();
        let err = config.apply("cigars_per_day", "3").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownKey(_)));
    }

    #[test]
    fn apply_rejects_unparseable_value() {
        let mut config = UserConfig::default();
        assert!(config.apply("cigarette_price", "cheap").is_err());
    }

    #[test]
    fn prefs_default_reminder_is_eight_pm() {
        let prefs = NotificationPrefs::default();
        assert!(prefs.daily_reminder_enabled);
        assert_eq!(prefs.daily_reminder_hour, 20);
        assert_eq!(prefs.daily_reminder_minute, 0);
    }

    #[test]
    fn prefs_apply_toggles_flags() {
        let mut prefs = NotificationPrefs::default();
        prefs.apply("encouragement_enabled", "false").unwrap();
        assert!(!prefs.encouragement_enabled);
        assert!(prefs.apply("volume", "50").is_err());
    }
}
