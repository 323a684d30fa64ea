use std::env;
use std::path::{Path, PathBuf};

use assigndrop_core::config::{AppConfig, LoadOptions, LogFormat};
use toml::Value;

/// Prints the effective configuration with per-field source attribution.
/// Nothing here needs redaction: the config carries no secrets.
pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];

    let fields: [(&str, String, Option<&str>); 5] = [
        ("database.url", config.database.url.clone(), Some("ASSIGNDROP_DATABASE_URL")),
        (
            "database.max_connections",
            config.database.max_connections.to_string(),
            Some("ASSIGNDROP_DATABASE_MAX_CONNECTIONS"),
        ),
        (
            "database.timeout_secs",
            config.database.timeout_secs.to_string(),
            Some("ASSIGNDROP_DATABASE_TIMEOUT_SECS"),
        ),
        ("logging.level", config.logging.level.clone(), Some("ASSIGNDROP_LOGGING_LEVEL")),
        (
            "logging.format",
            log_format_value(config.logging.format).to_string(),
            Some("ASSIGNDROP_LOGGING_FORMAT"),
        ),
    ];

    for (key, value, env_var) in fields {
        let source =
            field_source(key, env_var, config_file_doc.as_ref(), config_file_path.as_deref());
        lines.push(format!("{key} = {value}  (source: {source})"));
    }

    lines.join("\n")
}

fn log_format_value(format: LogFormat) -> &'static str {
    match format {
        LogFormat::Compact => "compact",
        LogFormat::Pretty => "pretty",
        LogFormat::Json => "json",
    }
}

fn detect_config_path() -> Option<PathBuf> {
    [PathBuf::from("assigndrop.toml"), PathBuf::from("config/assigndrop.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = std::fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key: &str,
    env_var: Option<&str>,
    doc: Option<&Value>,
    path: Option<&Path>,
) -> String {
    if let Some(var) = env_var {
        let set = env::var(var).map(|value| !value.trim().is_empty()).unwrap_or(false);
        if set {
            return format!("env:{var}");
        }
        // The logging keys accept shorter aliases too.
        if let Some(alias) = var.strip_prefix("ASSIGNDROP_LOGGING_") {
            let alias_var = format!("ASSIGNDROP_LOG_{alias}");
            let alias_set =
                env::var(&alias_var).map(|value| !value.trim().is_empty()).unwrap_or(false);
            if alias_set {
                return format!("env:{alias_var}");
            }
        }
    }

    if let (Some(doc), Some(path)) = (doc, path) {
        if doc_has_key(doc, key) {
            return format!("file:{}", path.display());
        }
    }

    "default".to_string()
}

fn doc_has_key(doc: &Value, dotted_key: &str) -> bool {
    let mut current = doc;
    for part in dotted_key.split('.') {
        match current.get(part) {
            Some(next) => current = next,
            None => return false,
        }
    }
    true
}
