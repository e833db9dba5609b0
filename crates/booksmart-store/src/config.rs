#![forbid(unsafe_code)]

//! Store configuration.
//!
//! Every field has a default, so a JSON document only needs the keys it
//! changes. Durations are whole milliseconds.
//!
//! ```json
//! { "login_delay_ms": 10, "seed_users": false }
//! ```

use std::time::Duration;

use booksmart_validate::{PatternKey, matches};
use serde::{Deserialize, Serialize};

/// Errors raised while loading a [`StoreConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The document is not valid JSON for this shape.
    #[error("invalid store config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value parsed but is not usable.
    #[error("invalid store config field `{field}`: {reason}")]
    Invalid {
        /// Offending key.
        field: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let ms = u64::try_from(value.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(ms)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

/// Delays, demo credentials and seed data for an [`AppStore`](crate::AppStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Simulated latency of a sign-in.
    #[serde(rename = "login_delay_ms", with = "millis")]
    pub login_delay: Duration,
    /// Simulated latency of a sign-up.
    #[serde(rename = "register_delay_ms", with = "millis")]
    pub register_delay: Duration,
    /// Simulated latency of an email confirmation.
    #[serde(rename = "confirm_delay_ms", with = "millis")]
    pub confirm_delay: Duration,
    /// The one email accepted by sign-in.
    pub demo_email: String,
    /// The one password accepted by sign-in.
    pub demo_password: String,
    /// Name shown for the demo account.
    pub demo_name: String,
    /// Start with the three sample users.
    pub seed_users: bool,
    /// Age recorded for users created by sign-up.
    pub default_age: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            login_delay: Duration::from_millis(1000),
            register_delay: Duration::from_millis(1500),
            confirm_delay: Duration::from_millis(1000),
            demo_email: "admin@booksmart.com".to_string(),
            demo_password: "password".to_string(),
            demo_name: "Administrador".to_string(),
            seed_users: true,
            default_age: 25,
        }
    }
}

impl StoreConfig {
    /// Parse and check a JSON document.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] on malformed JSON, [`ConfigError::Invalid`]
    /// when [`validate`](Self::validate) rejects the result.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        tracing::debug!(?config, "store config loaded");
        Ok(config)
    }

    /// Check the demo credentials.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !matches(&self.demo_email, PatternKey::Email) {
            return Err(ConfigError::Invalid {
                field: "demo_email",
                reason: "not an email address",
            });
        }
        if self.demo_password.is_empty() {
            return Err(ConfigError::Invalid {
                field: "demo_password",
                reason: "must not be empty",
            });
        }
        Ok(())
    }

    /// Zero every simulated delay.
    #[must_use]
    pub fn instant(mut self) -> Self {
        self.login_delay = Duration::ZERO;
        self.register_delay = Duration::ZERO;
        self.confirm_delay = Duration::ZERO;
        self
    }

    #[must_use]
    pub fn with_login_delay(mut self, delay: Duration) -> Self {
        self.login_delay = delay;
        self
    }

    #[must_use]
    pub fn with_register_delay(mut self, delay: Duration) -> Self {
        self.register_delay = delay;
        self
    }

    #[must_use]
    pub fn with_confirm_delay(mut self, delay: Duration) -> Self {
        self.confirm_delay = delay;
        self
    }

    /// Replace the accepted sign-in pair.
    #[must_use]
    pub fn with_demo_credentials(
        mut self,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.demo_email = email.into();
        self.demo_password = password.into();
        self
    }

    #[must_use]
    pub fn with_seed_users(mut self, enabled: bool) -> Self {
        self.seed_users = enabled;
        self
    }

    #[must_use]
    pub fn with_default_age(mut self, age: u32) -> Self {
        self.default_age = age;
        self
    }
}
