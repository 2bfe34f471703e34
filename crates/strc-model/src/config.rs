//! Top-level run configuration.
//!
//! A [`Config`] is the fully merged view of defaults, the TOML file,
//! environment overrides, and command-line flags. Merging happens in the
//! CLI; this module owns the shape, the defaults, and [`Config::validate`].

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::dedupe::DedupePolicy;
use crate::de::one_or_many;
use crate::enums::{CodePage, LineEnding, LogFormat, LogLevel, LogOutput};
use crate::error::{ConfigError, Result};
use crate::options::NormalizeSettings;

/// Merged configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Normalization target columns, 1-origin.
    #[serde(deserialize_with = "one_or_many")]
    pub columns: Vec<i64>,
    /// Encoding of both input and output.
    pub code_page: CodePage,
    /// Treat the first record as a header row.
    pub has_header: bool,
    /// Accept data records whose field count differs from the first data record.
    pub flexible: bool,
    /// Carried run timeout; never enforced inside the pipeline.
    pub timeout: Timeout,
    pub log: LogSettings,
    pub normalize: NormalizeSettings,
    pub dedupe: DedupePolicy,
    pub output: OutputSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            columns: vec![1],
            code_page: CodePage::Utf8,
            has_header: false,
            flexible: false,
            timeout: Timeout::default(),
            log: LogSettings::default(),
            normalize: NormalizeSettings::default(),
            dedupe: DedupePolicy::default(),
            output: OutputSettings::default(),
        }
    }
}

impl Config {
    /// Checks constraints that the type system does not enforce.
    pub fn validate(&self) -> Result<()> {
        if self.columns.iter().any(|&column| column <= 0) {
            return Err(ConfigError::InvalidColumns {
                field: "columns",
                columns: self.columns.clone(),
            });
        }
        if self.dedupe.columns.iter().any(|&column| column <= 0) {
            return Err(ConfigError::InvalidColumns {
                field: "dedupe.columns",
                columns: self.dedupe.columns.clone(),
            });
        }
        Ok(())
    }
}

/// The `[log]` configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub level: LogLevel,
    pub format: LogFormat,
    pub output: LogOutput,
    /// Append logs to this file instead of a standard stream.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

/// The `[output]` configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub line_ending: LineEnding,
    /// Prefix UTF-8 output with a byte-order mark.
    pub utf8_bom: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            line_ending: LineEnding::Crlf,
            utf8_bom: true,
        }
    }
}

/// Run timeout, written as `<n>ms`, `<n>s`, `<n>m`, `<n>h`, or a bare
/// number of seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TimeoutRepr", into = "String")]
pub struct Timeout(pub Duration);

impl Default for Timeout {
    fn default() -> Self {
        Timeout(Duration::from_secs(10 * 60))
    }
}

impl Timeout {
    pub fn as_duration(&self) -> Duration {
        self.0
    }

    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let split = trimmed
            .find(|ch: char| !ch.is_ascii_digit())
            .unwrap_or(trimmed.len());
        let (digits, unit) = trimmed.split_at(split);
        let invalid = || ConfigError::InvalidTimeout(text.to_string());
        let amount: u64 = digits.parse().map_err(|_| invalid())?;
        let duration = match unit.trim() {
            "ms" => Duration::from_millis(amount),
            "" | "s" => Duration::from_secs(amount),
            "m" => Duration::from_secs(amount.checked_mul(60).ok_or_else(invalid)?),
            "h" => Duration::from_secs(amount.checked_mul(60 * 60).ok_or_else(invalid)?),
            _ => return Err(invalid()),
        };
        Ok(Timeout(duration))
    }
}

impl fmt::Display for Timeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let millis = self.0.as_millis();
        if millis % 3_600_000 == 0 && millis > 0 {
            write!(f, "{}h", millis / 3_600_000)
        } else if millis % 60_000 == 0 && millis > 0 {
            write!(f, "{}m", millis / 60_000)
        } else if millis % 1000 == 0 {
            write!(f, "{}s", millis / 1000)
        } else {
            write!(f, "{millis}ms")
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TimeoutRepr {
    Seconds(u64),
    Text(String),
}

impl TryFrom<TimeoutRepr> for Timeout {
    type Error = ConfigError;

    fn try_from(value: TimeoutRepr) -> Result<Self> {
        match value {
            TimeoutRepr::Seconds(seconds) => Ok(Timeout(Duration::from_secs(seconds))),
            TimeoutRepr::Text(text) => Timeout::parse(&text),
        }
    }
}

impl From<Timeout> for String {
    fn from(value: Timeout) -> Self {
        value.to_string()
    }
}
