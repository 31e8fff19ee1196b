use chrono::Duration;
use config::ConfigError;
use livadai_booking::WindowPolicy;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub windows: WindowRules,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

/// Window offsets in minutes. Anything left out keeps the marketplace default.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct WindowRules {
    pub dispute_opens_after_end_minutes: i64,
    pub dispute_closes_after_end_minutes: i64,
    pub attendance_opens_after_start_minutes: i64,
    pub attendance_closes_after_end_minutes: i64,
    pub review_opens_after_end_minutes: i64,
    pub history_delay_after_end_minutes: i64,
    pub single_day_fallback_minutes: i64,
}

impl Default for WindowRules {
    fn default() -> Self {
        let policy = WindowPolicy::default();
        Self {
            dispute_opens_after_end_minutes: policy.dispute_opens_after_end.num_minutes(),
            dispute_closes_after_end_minutes: policy.dispute_closes_after_end.num_minutes(),
            attendance_opens_after_start_minutes: policy
                .attendance_opens_after_start
                .num_minutes(),
            attendance_closes_after_end_minutes: policy
                .attendance_closes_after_end
                .num_minutes(),
            review_opens_after_end_minutes: policy.review_opens_after_end.num_minutes(),
            history_delay_after_end_minutes: policy.history_delay_after_end.num_minutes(),
            single_day_fallback_minutes: policy.single_day_fallback.num_minutes(),
        }
    }
}

impl WindowRules {
    /// Converts the minute offsets into a window policy, rejecting offsets
    /// that are negative, out of range, or a dispute window that closes
    /// before it opens.
    pub fn policy(&self) -> Result<WindowPolicy, ConfigError> {
        let policy = WindowPolicy {
            dispute_opens_after_end: offset(
                "dispute_opens_after_end_minutes",
                self.dispute_opens_after_end_minutes,
            )?,
            dispute_closes_after_end: offset(
                "dispute_closes_after_end_minutes",
                self.dispute_closes_after_end_minutes,
            )?,
            attendance_opens_after_start: offset(
                "attendance_opens_after_start_minutes",
                self.attendance_opens_after_start_minutes,
            )?,
            attendance_closes_after_end: offset(
                "attendance_closes_after_end_minutes",
                self.attendance_closes_after_end_minutes,
            )?,
            review_opens_after_end: offset(
                "review_opens_after_end_minutes",
                self.review_opens_after_end_minutes,
            )?,
            history_delay_after_end: offset(
                "history_delay_after_end_minutes",
                self.history_delay_after_end_minutes,
            )?,
            single_day_fallback: offset(
                "single_day_fallback_minutes",
                self.single_day_fallback_minutes,
            )?,
        };

        if policy.dispute_opens_after_end > policy.dispute_closes_after_end {
            return Err(ConfigError::Message(format!(
                "windows: dispute window opens after {} minutes but closes after {}",
                self.dispute_opens_after_end_minutes, self.dispute_closes_after_end_minutes
            )));
        }

        Ok(policy)
    }
}

fn offset(key: &str, minutes: i64) -> Result<Duration, ConfigError> {
    if minutes < 0 {
        return Err(ConfigError::Message(format!(
            "windows.{key} must not be negative, got {minutes}"
        )));
    }
    Duration::try_minutes(minutes)
        .ok_or_else(|| ConfigError::Message(format!("windows.{key} is out of range: {minutes}")))
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Optional per-environment overrides
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local, never checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg.. `LIVADAI_WINDOWS__DISPUTE_CLOSES_AFTER_END_MINUTES=1440`
            .add_source(
                config::Environment::with_prefix("LIVADAI")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let config: Self = s.try_deserialize()?;
        config.windows.policy()?;
        Ok(config)
    }
}
