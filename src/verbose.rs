//! Verbosity-gated logging capability.
//!
//! Every component that reports what it is doing takes a [`Logger`] by
//! reference. A logger pairs the configured verbosity with a callback; a
//! message is forwarded only when the verbosity meets the message's tier.
//! A logger without a callback swallows everything, so passing
//! [`Logger::silent`] is always valid.
//!
//! # Example
//!
//! ```rust
//! use exportpack::verbose::{LogCallback, Logger, Verbosity};
//! use std::sync::{Arc, Mutex};
//!
//! let lines = Arc::new(Mutex::new(Vec::new()));
//! let sink = lines.clone();
//! let callback: LogCallback = Arc::new(move |_, message| {
//!     sink.lock().unwrap().push(message.to_string());
//! });
//!
//! let logger = Logger::new(Verbosity::Low, callback);
//! logger.low("shown");
//! logger.high("hidden");
//! assert_eq!(*lines.lock().unwrap(), vec!["shown".to_string()]);
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Verbosity tiers.
///
/// `Quiet` is the configured level when `-v` is absent; messages are only
/// ever emitted at `Low` or `High`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// Nothing is logged.
    #[default]
    Quiet = 0,
    /// Which path was taken, what was written.
    Low = 1,
    /// Per-item detail: deduplication diffs, every generated filename.
    High = 2,
}

impl Verbosity {
    /// Maps a `-v` occurrence count onto a tier. Counts above 2 saturate.
    pub fn from_count(count: u8) -> Self {
        match count {
            0 => Verbosity::Quiet,
            1 => Verbosity::Low,
            _ => Verbosity::High,
        }
    }
}

impl From<u8> for Verbosity {
    fn from(count: u8) -> Self {
        Verbosity::from_count(count)
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verbosity::Quiet => write!(f, "quiet"),
            Verbosity::Low => write!(f, "low"),
            Verbosity::High => write!(f, "high"),
        }
    }
}

/// Callback receiving every message that passed the verbosity gate.
pub type LogCallback = Arc<dyn Fn(Verbosity, &str) + Send + Sync>;

/// Verbosity-gated logger handed to each component explicitly.
#[derive(Clone, Default)]
pub struct Logger {
    verbosity: Verbosity,
    callback: Option<LogCallback>,
}

impl Logger {
    /// Creates a logger forwarding messages at or below `verbosity`.
    pub fn new(verbosity: Verbosity, callback: LogCallback) -> Self {
        Self {
            verbosity,
            callback: Some(callback),
        }
    }

    /// A logger that drops every message.
    pub fn silent() -> Self {
        Self::default()
    }

    /// Logger forwarding to the `log` facade: `Low` as info, `High` as debug.
    pub fn log_facade(verbosity: Verbosity) -> Self {
        Self::new(
            verbosity,
            Arc::new(|level, message| match level {
                Verbosity::High => log::debug!("{message}"),
                _ => log::info!("{message}"),
            }),
        )
    }

    /// Returns the configured verbosity.
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Returns `true` if a message at `level` would be forwarded.
    pub fn enabled(&self, level: Verbosity) -> bool {
        level != Verbosity::Quiet && self.callback.is_some() && self.verbosity >= level
    }

    /// Forwards `message` if `level` passes the gate.
    pub fn log(&self, level: Verbosity, message: impl AsRef<str>) {
        if !self.enabled(level) {
            return;
        }
        if let Some(callback) = &self.callback {
            callback(level, message.as_ref());
        }
    }

    /// Logs at [`Verbosity::Low`].
    pub fn low(&self, message: impl AsRef<str>) {
        self.log(Verbosity::Low, message);
    }

    /// Logs at [`Verbosity::High`].
    pub fn high(&self, message: impl AsRef<str>) {
        self.log(Verbosity::High, message);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("verbosity", &self.verbosity)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

/// Test helper: a logger capturing every forwarded line.
#[cfg(test)]
pub(crate) fn capture(verbosity: Verbosity) -> (Logger, Arc<std::sync::Mutex<Vec<String>>>) {
    let lines = Arc::new(std::sync::Mutex::new(Vec::new()));
    let sink = lines.clone();
    let logger = Logger::new(
        verbosity,
        Arc::new(move |_, message| sink.lock().unwrap().push(message.to_string())),
    );
    (logger, lines)
}
