//! Configuration layering tests.

use std::fs;
use std::path::PathBuf;

use strc_cli::config::{ConfigLoader, Overrides};
use strc_model::{CodePage, ConfigError, KeepMode, LineEnding, LogFormat, LogLevel};
use tempfile::TempDir;

fn write_config(dir: &TempDir, text: &str) -> PathBuf {
    let path = dir.path().join("strcleaner.toml");
    fs::write(&path, text).unwrap();
    path
}

fn env(vars: &[(&str, &str)]) -> Vec<(String, String)> {
    vars.iter()
        .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
        .collect()
}

#[test]
fn defaults_without_any_layer() {
    let loaded = ConfigLoader::new().load().unwrap();
    assert_eq!(loaded.config.columns, vec![1]);
    assert_eq!(loaded.config.code_page, CodePage::Utf8);
    assert!(loaded.ignored_keys.is_empty());
}

#[test]
fn file_env_and_flags_layer_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        r#"
columns = [2]
code_page = "cp932"

[dedupe]
enabled = true
keep = "last"

[output]
line_ending = "lf"
"#,
    );
    let loaded = ConfigLoader::new()
        .with_file(Some(path))
        .with_env(env(&[
            ("STRCLEANER_COLUMNS", "3"),
            ("STRCLEANER_DEDUPE__DROP_DUPLICATES", "true"),
            ("UNRELATED_COLUMNS", "9"),
        ]))
        .with_overrides(Overrides {
            code_page: Some("utf8".to_string()),
            ..Overrides::default()
        })
        .load()
        .unwrap();
    let config = loaded.config;
    assert_eq!(config.columns, vec![3]);
    assert_eq!(config.code_page, CodePage::Utf8);
    assert!(config.dedupe.enabled);
    assert!(config.dedupe.drop_duplicates);
    assert_eq!(config.dedupe.keep, KeepMode::Last);
    assert_eq!(config.output.line_ending, LineEnding::Lf);
}

#[test]
fn env_lists_and_nested_rules() {
    let loaded = ConfigLoader::new()
        .with_env(env(&[
            ("STRCLEANER_COLUMNS", "1,2"),
            ("STRCLEANER_NORMALIZE__TO_UPPER", "true"),
            ("STRCLEANER_NORMALIZE__REMOVE_HTML_TAGS", "b,i"),
            ("STRCLEANER_LOG__LEVEL", "debug"),
        ]))
        .load()
        .unwrap();
    let config = loaded.config;
    assert_eq!(config.columns, vec![1, 2]);
    assert!(config.normalize.rules.to_upper);
    assert_eq!(config.normalize.rules.remove_html_tags, vec!["b", "i"]);
    assert_eq!(config.log.level, LogLevel::Debug);
}

#[test]
fn env_text_settings_are_not_coerced() {
    let loaded = ConfigLoader::new()
        .with_env(env(&[
            ("STRCLEANER_DEDUPE__DELIMITER", ","),
            ("STRCLEANER_DEDUPE__OUTPUT_HEADER", "2024"),
            ("STRCLEANER_NORMALIZE__REMOVE_CHARS", "-,_"),
        ]))
        .load()
        .unwrap();
    let config = loaded.config;
    assert_eq!(config.dedupe.delimiter, ",");
    assert_eq!(config.dedupe.output_header, "2024");
    assert_eq!(config.normalize.rules.remove_chars.text, "-,_");
}

#[test]
fn flags_override_log_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "[log]\nlevel = \"warn\"\nformat = \"text\"\n");
    let loaded = ConfigLoader::new()
        .with_file(Some(path.clone()))
        .load()
        .unwrap();
    assert_eq!(loaded.config.log.format, LogFormat::Pretty);

    let loaded = ConfigLoader::new()
        .with_file(Some(path))
        .with_overrides(Overrides {
            log_level: Some("error".to_string()),
            log_format: Some("json".to_string()),
            ..Overrides::default()
        })
        .load()
        .unwrap();
    assert_eq!(loaded.config.log.level, LogLevel::Error);
    assert_eq!(loaded.config.log.format, LogFormat::Json);
}

#[test]
fn strict_mode_rejects_unknown_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "colums = [1]\n[dedupe]\nkeap = \"last\"\n");
    let err = ConfigLoader::new()
        .with_file(Some(path))
        .load()
        .unwrap_err();
    match err {
        ConfigError::UnknownKeys { mut keys } => {
            keys.sort();
            assert_eq!(keys, vec!["colums", "dedupe.keap"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn non_strict_mode_reports_unknown_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "colums = [1]\ncolumns = [2]\n");
    let loaded = ConfigLoader::new()
        .with_file(Some(path))
        .strict(false)
        .load()
        .unwrap();
    assert_eq!(loaded.config.columns, vec![2]);
    assert_eq!(loaded.ignored_keys, vec!["colums"]);
}

#[test]
fn unsupported_code_page_is_rejected() {
    let err = ConfigLoader::new()
        .with_overrides(Overrides {
            code_page: Some("latin1".to_string()),
            ..Overrides::default()
        })
        .load()
        .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { .. }), "{err}");
    assert!(err.to_string().contains("latin1"), "{err}");
}

#[test]
fn non_positive_columns_are_rejected() {
    let err = ConfigLoader::new()
        .with_overrides(Overrides {
            columns: Some(vec![0]),
            ..Overrides::default()
        })
        .load()
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidColumns { .. }), "{err}");
}

#[test]
fn invalid_timeout_is_rejected() {
    let err = ConfigLoader::new()
        .with_env(env(&[("STRCLEANER_TIMEOUT", "soon")]))
        .load()
        .unwrap_err();
    assert!(err.to_string().contains("soon"), "{err}");
}

#[test]
fn unparsable_file_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "columns = [1\n");
    let err = ConfigLoader::new()
        .with_file(Some(path))
        .load()
        .unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }), "{err}");
    assert!(err.to_string().contains("strcleaner.toml"), "{err}");
}

#[test]
fn missing_file_is_a_read_error() {
    let err = ConfigLoader::new()
        .with_file(Some(PathBuf::from("/nonexistent/strcleaner.toml")))
        .load()
        .unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }), "{err}");
}
