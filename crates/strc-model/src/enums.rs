//! Type-safe enumerations for configuration values.
//!
//! Values arrive as strings from TOML, environment variables, or flags.
//! `keep` and `line_ending` are lenient (unknown values fall back to the
//! default), while `code_page` and `log.level` are strict and reject
//! anything they do not recognize.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Character encoding of the input and output byte streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CodePage {
    /// UTF-8 (optionally with a BOM on output).
    #[default]
    Utf8,
    /// Microsoft CP932 (Shift_JIS).
    Cp932,
}

impl CodePage {
    /// Returns the canonical configuration name.
    pub fn as_str(&self) -> &'static str {
        match self {
            CodePage::Utf8 => "utf8",
            CodePage::Cp932 => "cp932",
        }
    }

    pub fn is_utf8(&self) -> bool {
        matches!(self, CodePage::Utf8)
    }
}

impl fmt::Display for CodePage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CodePage {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(CodePage::Utf8),
            "cp932" | "shift_jis" | "shift-jis" | "sjis" | "windows-31j" => Ok(CodePage::Cp932),
            _ => Err(ConfigError::UnsupportedCodePage(s.to_string())),
        }
    }
}

impl TryFrom<String> for CodePage {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, ConfigError> {
        value.parse()
    }
}

impl From<CodePage> for String {
    fn from(value: CodePage) -> Self {
        value.as_str().to_string()
    }
}

/// Record terminator written after every output record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LineEnding {
    #[default]
    Crlf,
    Lf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Crlf => "crlf",
            LineEnding::Lf => "lf",
        }
    }
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for LineEnding {
    /// Anything other than `lf` selects CRLF.
    fn from(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("lf") {
            LineEnding::Lf
        } else {
            LineEnding::Crlf
        }
    }
}

impl From<String> for LineEnding {
    fn from(value: String) -> Self {
        LineEnding::from(value.as_str())
    }
}

impl From<LineEnding> for String {
    fn from(value: LineEnding) -> Self {
        value.as_str().to_string()
    }
}

/// Which occurrence of a duplicated key survives when duplicates are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum KeepMode {
    /// First occurrence in input order wins.
    #[default]
    First,
    /// Last occurrence in input order wins.
    Last,
}

impl KeepMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeepMode::First => "first",
            KeepMode::Last => "last",
        }
    }
}

impl fmt::Display for KeepMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for KeepMode {
    /// Anything other than `last` selects `first`.
    fn from(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("last") {
            KeepMode::Last
        } else {
            KeepMode::First
        }
    }
}

impl From<String> for KeepMode {
    fn from(value: String) -> Self {
        KeepMode::from(value.as_str())
    }
}

impl From<KeepMode> for String {
    fn from(value: KeepMode) -> Self {
        value.as_str().to_string()
    }
}

/// Minimum severity of log events that are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
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
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, ConfigError> {
        match s.trim().to_ascii_lowercase().as_str() {
            // An empty level means "use the default".
            "" | "info" => Ok(LogLevel::Info),
            "error" | "fatal" | "panic" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl TryFrom<String> for LogLevel {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, ConfigError> {
        value.parse()
    }
}

impl From<LogLevel> for String {
    fn from(value: LogLevel) -> Self {
        value.as_str().to_string()
    }
}

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable multi-field output.
    #[default]
    #[serde(alias = "text")]
    Pretty,
    /// Single-line output.
    Compact,
    /// JSON lines for machine parsing.
    Json,
}

/// Standard stream used for logs when no log file is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    #[default]
    Stderr,
    Stdout,
}
