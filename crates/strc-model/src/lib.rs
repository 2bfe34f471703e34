//! Configuration and policy types shared by the strcleaner crates.

pub mod config;
mod de;
pub mod dedupe;
pub mod enums;
pub mod error;
pub mod options;

pub use config::{Config, LogSettings, OutputSettings, Timeout};
pub use dedupe::{DEFAULT_KEY_DELIMITER, DEFAULT_KEY_HEADER, DedupePolicy};
pub use enums::{CodePage, KeepMode, LineEnding, LogFormat, LogLevel, LogOutput};
pub use error::{ConfigError, Result};
pub use options::{CharRemoval, NormalizationRuleSet, NormalizeSettings};
