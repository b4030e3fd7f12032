//! Structured Logging & Tracing
//!
//! Structured logging via the `tracing` crate:
//! - Level-based filtering (TRACE/DEBUG/INFO/WARN/ERROR), per module
//! - Spans for operation timing
//! - Idempotent initialization, safe from tests and binaries alike

use serde::{Deserialize, Serialize};
use std::sync::Once;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    /// Case-insensitive; unknown names fall back to Info
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "trace" => LogLevel::Trace,
            "debug" => LogLevel::Debug,
            "warn" | "warning" => LogLevel::Warn,
            "error" => LogLevel::Error,
            _ => LogLevel::Info,
        }
    }
}

/// Configuration for tracing initialization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TracingConfig {
    pub default_level: LogLevel,
    pub module_filters: Vec<(String, LogLevel)>,
    pub show_timestamps: bool,
    pub show_thread_ids: bool,
    pub show_targets: bool,
    pub show_file_line: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            default_level: LogLevel::Info,
            module_filters: vec![
                ("hunter_core::system".to_string(), LogLevel::Info),
                ("hunter_core::titles".to_string(), LogLevel::Warn),
                ("hunter_core::questgen".to_string(), LogLevel::Info),
                ("hunter_core::balance".to_string(), LogLevel::Warn),
            ],
            show_timestamps: true,
            show_thread_ids: false,
            show_targets: true,
            show_file_line: false,
        }
    }
}

impl TracingConfig {
    pub fn to_env_filter_string(&self) -> String {
        let mut parts = vec![self.default_level.as_str().to_string()];
        for (module, level) in &self.module_filters {
            parts.push(format!("{}={}", module, level.as_str()));
        }
        parts.join(",")
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn from_json(json: &str) -> Option<Self> {
        serde_json::from_str(json).ok()
    }
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing with default settings (idempotent)
pub fn init_tracing_default() {
    init_tracing(&TracingConfig::default());
}

/// Initialize tracing with custom config (first call wins).
/// `RUST_LOG` overrides the configured filter when set.
pub fn init_tracing(config: &TracingConfig) {
    let config = config.clone();
    TRACING_INIT.call_once(move || {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.to_env_filter_string()));

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(config.show_targets)
            .with_thread_ids(config.show_thread_ids)
            .with_file(config.show_file_line)
            .with_line_number(config.show_file_line)
            .compact();

        // A global subscriber may already be installed by the host
        let _ = if config.show_timestamps {
            builder.try_init()
        } else {
            builder.without_time().try_init()
        };
    });
}

/// Times one controller operation. The span is never entered, so the guard
/// can be held across `.await`; elapsed time is logged under it on drop.
pub struct TimingSpan {
    span: tracing::Span,
    started: Instant,
}

impl TimingSpan {
    pub fn new(operation: &'static str, hunter_id: &str) -> Self {
        Self {
            span: tracing::info_span!("operation", operation, hunter_id),
            started: Instant::now(),
        }
    }

    pub fn span(&self) -> &tracing::Span {
        &self.span
    }

    pub fn elapsed_us(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_micros()).unwrap_or(u64::MAX)
    }
}

impl Drop for TimingSpan {
    fn drop(&mut self) {
        let elapsed_us = self.elapsed_us();
        tracing::debug!(parent: &self.span, elapsed_us, "operation finished");
    }
}

/// The filter actually in force, for startup diagnostics
#[derive(Debug, Serialize, Deserialize)]
pub struct LoggingSnapshot {
    pub filter: String,
    /// `RUST_LOG` replaced the configured filter
    pub from_env: bool,
    pub config: TracingConfig,
}

impl LoggingSnapshot {
    pub fn capture(config: &TracingConfig) -> Self {
        let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
        Self {
            from_env: env.is_some(),
            filter: env.unwrap_or_else(|| config.to_env_filter_string()),
            config: config.clone(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_from_name() {
        assert_eq!(LogLevel::from_name("trace"), LogLevel::Trace);
        assert_eq!(LogLevel::from_name("DEBUG"), LogLevel::Debug);
        assert_eq!(LogLevel::from_name("warning"), LogLevel::Warn);
        assert_eq!(LogLevel::from_name("error"), LogLevel::Error);
        assert_eq!(LogLevel::from_name("loud"), LogLevel::Info); // fallback
    }

    #[test]
    fn test_all_levels_roundtrip_through_names() {
        for level in [
            LogLevel::Trace,
            LogLevel::Debug,
            LogLevel::Info,
            LogLevel::Warn,
            LogLevel::Error,
        ] {
            assert_eq!(LogLevel::from_name(level.as_str()), level);
        }
    }

    #[test]
    fn test_env_filter_string() {
        let filter = TracingConfig::default().to_env_filter_string();
        assert!(filter.starts_with("info"));
        assert!(filter.contains("hunter_core::titles=warn"));
        assert!(filter.contains("hunter_core::system=info"));
    }

    #[test]
    fn test_tracing_config_json_roundtrip() {
        let config = TracingConfig {
            default_level: LogLevel::Debug,
            module_filters: vec![("hunter_core::upgrade".to_string(), LogLevel::Trace)],
            show_timestamps: false,
            ..Default::default()
        };
        let restored = TracingConfig::from_json(&config.to_json()).unwrap();
        assert_eq!(restored, config);
        assert!(TracingConfig::from_json("not json").is_none());
    }

    #[test]
    fn test_init_tracing_idempotent() {
        init_tracing_default();
        init_tracing_default();
        init_tracing(&TracingConfig::default());
        let timing = TimingSpan::new("test_operation", "h1");
        tracing::info!(parent: timing.span(), "still alive");
    }

    #[test]
    fn test_timing_span_measures() {
        let timing = TimingSpan::new("complete_quest", "h1");
        let first = timing.elapsed_us();
        std::thread::sleep(std::time::Duration::from_millis(2));
        assert!(timing.elapsed_us() >= first + 1_000);
        drop(timing);
    }

    #[test]
    fn test_logging_snapshot() {
        let config = TracingConfig::default();
        let snapshot = LoggingSnapshot::capture(&config);
        if !snapshot.from_env {
            assert_eq!(snapshot.filter, config.to_env_filter_string());
        }
        assert_eq!(snapshot.config, config);
        assert!(snapshot.to_json().contains("\"filter\""));
    }
}
