#![forbid(unsafe_code)]

//! Subscriber bootstrap for binaries and examples.
//!
//! Libraries in this workspace only emit `tracing` events. A binary that
//! wants them on stderr calls [`init`] once at startup.
//!
//! ```no_run
//! use booksmart::logging::{LoggingConfig, init};
//!
//! init(&LoggingConfig::default().with_filter("booksmart_store=debug"))
//!     .expect("subscriber installed once");
//! ```

use tracing_subscriber::EnvFilter;

/// Environment variable consulted before [`LoggingConfig::filter`].
pub const FILTER_ENV: &str = "BOOKSMART_LOG";

/// Configuration for the stderr subscriber.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Directive used when `BOOKSMART_LOG` is unset. Default: `info`.
    pub filter: String,
    /// Show the tracing target (module path). Default: true.
    pub show_target: bool,
    /// Emit ANSI colours. Default: false.
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            show_target: true,
            ansi: false,
        }
    }
}

impl LoggingConfig {
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    #[must_use]
    pub fn with_target(mut self, show: bool) -> Self {
        self.show_target = show;
        self
    }

    #[must_use]
    pub fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    fn env_filter(&self) -> Result<EnvFilter, crate::Error> {
        match std::env::var(FILTER_ENV) {
            Ok(directives) => Ok(EnvFilter::try_new(directives)?),
            Err(_) => Ok(EnvFilter::try_new(&self.filter)?),
        }
    }
}

/// Install a global fmt subscriber writing to stderr.
///
/// # Errors
///
/// [`Error::LogFilter`](crate::Error::LogFilter) for a bad directive,
/// [`Error::Logging`](crate::Error::Logging) if a global subscriber is
/// already set.
pub fn init(config: &LoggingConfig) -> Result<(), crate::Error> {
    let filter = config.env_filter()?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.show_target)
        .with_ansi(config.ansi)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| crate::Error::Logging(err.to_string()))?;
    tracing::debug!(filter = %config.filter, "subscriber installed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_parses() {
        assert!(EnvFilter::try_new(LoggingConfig::default().filter).is_ok());
    }

    #[test]
    fn bad_directive_is_reported() {
        let err = EnvFilter::try_new("booksmart=notalevel").map_err(crate::Error::from);
        assert!(matches!(err, Err(crate::Error::LogFilter(_))));
    }
}
