//! Layered configuration loading.
//!
//! Layers are merged into one TOML table in increasing precedence:
//! built-in defaults, the `--config` file, `STRCLEANER_*` environment
//! variables, then command-line flags. The merged table is deserialized
//! once, checked for unknown keys, and validated.

use std::fs;
use std::path::{Path, PathBuf};

use strc_model::{Config, ConfigError};
use toml::{Table, Value};

/// Prefix of environment variables that override configuration keys.
pub const ENV_PREFIX: &str = "STRCLEANER_";

/// Separator between nested keys in an environment variable name.
const ENV_NESTING: &str = "__";

/// Flag-level overrides. `None` means the flag was not given.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub columns: Option<Vec<i64>>,
    pub code_page: Option<String>,
    pub has_header: Option<bool>,
    pub line_ending: Option<String>,
    pub utf8_bom: Option<bool>,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl Overrides {
    fn apply(&self, document: &mut Table) {
        let mut set = |path: &[&str], value: Value| {
            // Fails only when an earlier layer made the section a scalar,
            // which deserialization rejects afterwards.
            let _ = insert_path(document, path, value);
        };
        if let Some(columns) = &self.columns {
            set(
                &["columns"],
                Value::Array(columns.iter().copied().map(Value::Integer).collect()),
            );
        }
        if let Some(code_page) = &self.code_page {
            set(&["code_page"], Value::String(code_page.clone()));
        }
        if let Some(has_header) = self.has_header {
            set(&["has_header"], Value::Boolean(has_header));
        }
        if let Some(line_ending) = &self.line_ending {
            set(&["output", "line_ending"], Value::String(line_ending.clone()));
        }
        if let Some(utf8_bom) = self.utf8_bom {
            set(&["output", "utf8_bom"], Value::Boolean(utf8_bom));
        }
        if let Some(level) = &self.log_level {
            set(&["log", "level"], Value::String(level.clone()));
        }
        if let Some(format) = &self.log_format {
            set(&["log", "format"], Value::String(format.clone()));
        }
        if let Some(file) = &self.log_file {
            set(&["log", "file"], Value::String(file.display().to_string()));
        }
    }
}

/// A validated configuration plus the keys that were ignored in
/// non-strict mode.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: Config,
    /// Dotted paths of unknown keys. Always empty in strict mode.
    pub ignored_keys: Vec<String>,
}

/// Builder for one configuration load.
#[derive(Debug)]
pub struct ConfigLoader {
    file: Option<PathBuf>,
    env: Vec<(String, String)>,
    overrides: Overrides,
    strict: bool,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self {
            file: None,
            env: Vec::new(),
            overrides: Overrides::default(),
            strict: true,
        }
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the TOML file layer.
    #[must_use]
    pub fn with_file(mut self, path: Option<PathBuf>) -> Self {
        self.file = path;
        self
    }

    /// Set the environment layer. Variables without the prefix are ignored.
    #[must_use]
    pub fn with_env<I>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut env: Vec<_> = vars
            .into_iter()
            .filter(|(name, _)| name.starts_with(ENV_PREFIX))
            .collect();
        env.sort();
        self.env = env;
        self
    }

    #[must_use]
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Reject unknown keys (the default) or only report them.
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Merges every layer and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or parsed, an
    /// environment variable names an impossible path, a value has the wrong
    /// type, unknown keys are present in strict mode, or validation fails.
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let mut document = match &self.file {
            Some(path) => read_document(path)?,
            None => Table::new(),
        };
        if !self.env.is_empty() {
            let hints = type_hints()?;
            for (name, raw) in &self.env {
                apply_env(&mut document, &hints, name, raw)?;
            }
        }
        self.overrides.apply(&mut document);

        let config: Config = Value::Table(document.clone())
            .try_into()
            .map_err(|source| ConfigError::Invalid { source })?;

        let known = match Value::try_from(&config)? {
            Value::Table(table) => table,
            _ => Table::new(),
        };
        let mut unknown = Vec::new();
        collect_unknown(&document, &known, "", &mut unknown);
        if self.strict && !unknown.is_empty() {
            return Err(ConfigError::UnknownKeys { keys: unknown });
        }

        config.validate()?;
        Ok(LoadedConfig {
            config,
            ignored_keys: unknown,
        })
    }
}

fn read_document(path: &Path) -> Result<Table, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// The serialized form of a configuration in which every setting, list
/// elements included, holds a value. Environment text is typed after the
/// value found at the same path.
fn type_hints() -> Result<Table, ConfigError> {
    let mut hints = Config::default();
    hints.dedupe.columns = vec![1];
    hints.normalize.rules.remove_html_tags = vec![String::new()];
    hints.normalize.rules.remove_substrings = vec![String::new()];
    hints.log.file = Some(PathBuf::new());
    Ok(match Value::try_from(&hints)? {
        Value::Table(table) => table,
        _ => Table::new(),
    })
}

fn lookup<'a>(table: &'a Table, path: &[&str]) -> Option<&'a Value> {
    let (first, rest) = path.split_first()?;
    let value = table.get(*first)?;
    if rest.is_empty() {
        Some(value)
    } else {
        lookup(value.as_table()?, rest)
    }
}

/// Applies one `STRCLEANER_A__B=value` variable to the document.
fn apply_env(
    document: &mut Table,
    hints: &Table,
    name: &str,
    raw: &str,
) -> Result<(), ConfigError> {
    let Some(rest) = name.strip_prefix(ENV_PREFIX) else {
        return Ok(());
    };
    let path: Vec<String> = rest
        .split(ENV_NESTING)
        .map(str::to_ascii_lowercase)
        .collect();
    let environment_error = |message: String| ConfigError::Environment {
        name: name.to_string(),
        message,
    };
    if path.iter().any(String::is_empty) {
        return Err(environment_error("empty key segment".to_string()));
    }
    let path: Vec<&str> = path.iter().map(String::as_str).collect();
    let value = parse_env_value(raw, lookup(hints, &path));
    insert_path(document, &path, value).map_err(environment_error)
}

/// Types `raw` after `hint`: strings stay verbatim, lists split on commas,
/// other scalars parse as TOML. Without a hint the type is guessed.
fn parse_env_value(raw: &str, hint: Option<&Value>) -> Value {
    match hint {
        Some(Value::String(_)) => Value::String(raw.to_string()),
        Some(Value::Array(items)) => Value::Array(
            raw.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(|item| parse_env_value(item, items.first()))
                .collect(),
        ),
        Some(Value::Table(_)) | None => guess_value(raw),
        Some(_) => parse_scalar(raw).unwrap_or_else(|| Value::String(raw.to_string())),
    }
}

/// TOML scalar when the text parses as one, an array for comma-separated
/// text, a plain string otherwise.
fn guess_value(raw: &str) -> Value {
    if let Some(value) = parse_scalar(raw) {
        return value;
    }
    if raw.contains(',') {
        return Value::Array(
            raw.split(',')
                .map(str::trim)
                .map(|item| parse_scalar(item).unwrap_or_else(|| Value::String(item.to_string())))
                .collect(),
        );
    }
    Value::String(raw.to_string())
}

fn parse_scalar(raw: &str) -> Option<Value> {
    let mut parsed: Table = toml::from_str(&format!("value = {raw}")).ok()?;
    if parsed.len() != 1 {
        return None;
    }
    parsed.remove("value")
}

/// Sets `value` at `path`, creating intermediate tables.
fn insert_path(document: &mut Table, path: &[&str], value: Value) -> Result<(), String> {
    let (last, parents) = path.split_last().ok_or("empty key")?;
    let mut current = document;
    for key in parents {
        current = current
            .entry((*key).to_string())
            .or_insert(Value::Table(Table::new()))
            .as_table_mut()
            .ok_or_else(|| format!("{key} is not a section"))?;
    }
    current.insert((*last).to_string(), value);
    Ok(())
}

/// Collects dotted paths present in `input` but absent from `known`.
fn collect_unknown(input: &Table, known: &Table, prefix: &str, unknown: &mut Vec<String>) {
    for (key, value) in input {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match (known.get(key), value) {
            (None, _) => unknown.push(path),
            (Some(Value::Table(known_child)), Value::Table(child)) => {
                collect_unknown(child, known_child, &path, unknown);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_values_parse_as_toml_scalars() {
        assert_eq!(guess_value("true"), Value::Boolean(true));
        assert_eq!(guess_value("3"), Value::Integer(3));
        assert_eq!(guess_value("cp932"), Value::String("cp932".to_string()));
        assert_eq!(guess_value(" -"), Value::String(" -".to_string()));
        assert_eq!(
            guess_value("1,2"),
            Value::Array(vec![Value::Integer(1), Value::Integer(2)])
        );
        assert_eq!(
            guess_value("b, i"),
            Value::Array(vec![
                Value::String("b".to_string()),
                Value::String("i".to_string())
            ])
        );
    }

    fn hinted(name: &str, raw: &str) -> Value {
        let mut document = Table::new();
        apply_env(&mut document, &type_hints().unwrap(), name, raw).unwrap();
        let path: Vec<String> = name[ENV_PREFIX.len()..]
            .split(ENV_NESTING)
            .map(str::to_ascii_lowercase)
            .collect();
        let path: Vec<&str> = path.iter().map(String::as_str).collect();
        lookup(&document, &path).unwrap().clone()
    }

    #[test]
    fn string_settings_keep_env_text_verbatim() {
        assert_eq!(
            hinted("STRCLEANER_DEDUPE__DELIMITER", ","),
            Value::String(",".to_string())
        );
        assert_eq!(
            hinted("STRCLEANER_DEDUPE__OUTPUT_HEADER", "2024"),
            Value::String("2024".to_string())
        );
        assert_eq!(
            hinted("STRCLEANER_TIMEOUT", "45"),
            Value::String("45".to_string())
        );
    }

    #[test]
    fn list_settings_split_and_type_elements() {
        assert_eq!(
            hinted("STRCLEANER_DEDUPE__COLUMNS", "2, 3"),
            Value::Array(vec![Value::Integer(2), Value::Integer(3)])
        );
        assert_eq!(
            hinted("STRCLEANER_NORMALIZE__REMOVE_HTML_TAGS", "2024"),
            Value::Array(vec![Value::String("2024".to_string())])
        );
        assert_eq!(hinted("STRCLEANER_COLUMNS", ""), Value::Array(Vec::new()));
    }

    #[test]
    fn scalar_settings_parse_as_toml() {
        assert_eq!(
            hinted("STRCLEANER_NORMALIZE__TO_UPPER", "true"),
            Value::Boolean(true)
        );
        assert_eq!(
            hinted("STRCLEANER_HAS_HEADER", "maybe"),
            Value::String("maybe".to_string())
        );
    }

    #[test]
    fn scalar_parse_ignores_injected_keys() {
        assert_eq!(parse_scalar("1\nother = 2"), None);
    }

    #[test]
    fn env_names_nest_on_double_underscore() {
        let mut document = Table::new();
        apply_env(&mut document, &Table::new(), "STRCLEANER_DEDUPE__KEEP", "last").unwrap();
        assert_eq!(document["dedupe"]["keep"].as_str(), Some("last"));
    }

    #[test]
    fn env_rejects_empty_segments() {
        let mut document = Table::new();
        let err = apply_env(&mut document, &Table::new(), "STRCLEANER_DEDUPE____KEEP", "last").unwrap_err();
        assert!(matches!(err, ConfigError::Environment { .. }));
    }

    #[test]
    fn env_cannot_descend_into_a_scalar() {
        let mut document = Table::new();
        document.insert("columns".to_string(), Value::Integer(1));
        let err = apply_env(&mut document, &Table::new(), "STRCLEANER_COLUMNS__X", "1").unwrap_err();
        assert!(err.to_string().contains("columns is not a section"), "{err}");
    }

    #[test]
    fn unknown_keys_are_dotted_paths() {
        let input: Table = toml::from_str("colums = [1]\n[dedupe]\nkeap = 'last'\nkeep = 'last'")
            .unwrap();
        let known = match Value::try_from(Config::default()).unwrap() {
            Value::Table(table) => table,
            _ => unreachable!(),
        };
        let mut unknown = Vec::new();
        collect_unknown(&input, &known, "", &mut unknown);
        unknown.sort();
        assert_eq!(unknown, vec!["colums", "dedupe.keap"]);
    }
}
