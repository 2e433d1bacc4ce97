//! App configuration
//!
//! Compiled-in defaults, with the log level optionally overridden from the
//! page URL (`?log=debug`). There are no environment variables.

use serde::{Deserialize, Serialize};

use crate::consts::STORAGE_KEY;

/// Log verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }

    pub fn to_level(self) -> log::Level {
        match self {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

/// Where the id counter starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum IdSeed {
    /// Current wall-clock time in milliseconds
    #[default]
    Clock,
    /// A fixed starting value (tests, reproducible demos)
    Fixed(u64),
}

impl IdSeed {
    pub fn resolve(self) -> u64 {
        match self {
            IdSeed::Clock => crate::platform::now_millis(),
            IdSeed::Fixed(seed) => seed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Persistence slot name
    pub storage_key: String,
    pub log_level: LogLevel,
    pub id_seed: IdSeed,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_string(),
            log_level: LogLevel::Info,
            id_seed: IdSeed::Clock,
        }
    }
}

impl AppConfig {
    /// Defaults with ids counting up from `seed`
    pub fn with_fixed_seed(seed: u64) -> Self {
        Self {
            id_seed: IdSeed::Fixed(seed),
            ..Self::default()
        }
    }

    /// Apply overrides from a URL query string (`?log=debug&x=y`).
    /// Unknown keys and unparsable values are ignored.
    pub fn apply_query(&mut self, query: &str) {
        let query = query.strip_prefix('?').unwrap_or(query);
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            if key == "log" {
                match LogLevel::from_str(value) {
                    Some(level) => self.log_level = level,
                    None => log::warn!("Ignoring unknown log level {:?}", value),
                }
            }
        }
    }

    /// Config for the running page
    #[cfg(target_arch = "wasm32")]
    pub fn from_page() -> Self {
        let mut config = Self::default();
        config.apply_query(&crate::platform::location_search());
        config
    }
}
