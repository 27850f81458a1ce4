//! Logging configuration and setup.

use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::LoggingError;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Multi-line, human-readable.
    Pretty,
    /// One line per event.
    #[default]
    Compact,
    /// Structured JSON lines.
    Json,
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(LoggingError::UnknownFormat(s.to_string())),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LogConfig {
    pub level: Level,
    pub format: LogFormat,
    /// Source file and line of each event.
    pub include_location: bool,
    pub include_thread_names: bool,
    /// Span enter and close events.
    pub include_span_events: bool,
    /// Directive string such as `svgkit_scene=debug,svgkit_css=warn`.
    /// Replaces `RUST_LOG` when set.
    pub filter: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            format: LogFormat::Compact,
            include_location: false,
            include_thread_names: false,
            include_span_events: false,
            filter: None,
        }
    }
}

impl LogConfig {
    /// Debug output with locations and span timings.
    pub fn debug() -> Self {
        Self {
            level: Level::DEBUG,
            format: LogFormat::Pretty,
            include_location: true,
            include_span_events: true,
            ..Default::default()
        }
    }

    /// Everything, including per-frame and per-element events.
    pub fn trace() -> Self {
        Self {
            level: Level::TRACE,
            include_thread_names: true,
            ..Self::debug()
        }
    }

    /// JSON lines at info level.
    pub fn production() -> Self {
        Self {
            level: Level::INFO,
            format: LogFormat::Json,
            ..Default::default()
        }
    }

    /// Configuration for a level name such as `debug` or `WARN`.
    pub fn from_level_str(level: &str) -> Result<Self, LoggingError> {
        let level = Level::from_str(level).map_err(|_| LoggingError::UnknownLevel(level.to_string()))?;
        Ok(Self {
            level,
            ..Default::default()
        })
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// The filter this configuration installs.
    ///
    /// A custom filter wins, then `RUST_LOG`, then the configured level. An
    /// invalid custom filter falls back to the level.
    pub fn env_filter(&self) -> EnvFilter {
        let level = EnvFilter::new(self.level.to_string());
        match &self.filter {
            Some(directives) => EnvFilter::try_new(directives).unwrap_or(level),
            None => EnvFilter::try_from_default_env().unwrap_or(level),
        }
    }
}

/// Install the global subscriber.
///
/// Fails when a subscriber is already installed.
pub fn try_init_logging(config: &LogConfig) -> Result<(), LoggingError> {
    let filter = config.env_filter();
    let span_events = if config.include_span_events {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };
    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_file(config.include_location)
                    .with_line_number(config.include_location)
                    .with_thread_names(config.include_thread_names)
                    .with_span_events(span_events),
            )
            .try_init(),
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_file(config.include_location)
                    .with_line_number(config.include_location)
                    .with_thread_names(config.include_thread_names)
                    .with_span_events(span_events),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_events(span_events),
            )
            .try_init(),
    };
    result.map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))
}

/// Install the global subscriber, keeping an existing one.
pub fn init_logging(config: LogConfig) {
    if let Err(e) = try_init_logging(&config) {
        tracing::debug!(error = %e, "Logging already initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_config_default() {
        let config = LogConfig::default();
        assert_eq!(config.level, Level::WARN);
        assert_eq!(config.format, LogFormat::Compact);
        assert!(!config.include_location);
    }

    #[test]
    fn test_presets() {
        assert_eq!(LogConfig::debug().level, Level::DEBUG);
        assert!(LogConfig::debug().include_span_events);
        let trace = LogConfig::trace();
        assert_eq!(trace.level, Level::TRACE);
        assert!(trace.include_location && trace.include_thread_names);
        assert_eq!(LogConfig::production().format, LogFormat::Json);
    }

    #[test]
    fn test_parse_level_and_format() {
        assert_eq!(LogConfig::from_level_str("debug").unwrap().level, Level::DEBUG);
        assert_eq!(LogConfig::from_level_str("ERROR").unwrap().level, Level::ERROR);
        assert!(matches!(
            LogConfig::from_level_str("loud"),
            Err(LoggingError::UnknownLevel(_))
        ));
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_log_config_with_filter() {
        let config = LogConfig::default().with_filter("svgkit_scene=debug");
        assert_eq!(config.filter.as_deref(), Some("svgkit_scene=debug"));
        assert_eq!(config.env_filter().to_string(), "svgkit_scene=debug");
    }

    #[test]
    fn test_second_init_fails() {
        let config = LogConfig::default();
        let _ = try_init_logging(&config);
        assert!(try_init_logging(&config).is_err());
        // The lenient entry point keeps the installed subscriber.
        init_logging(config);
    }
}
