//! Environment variable handling for the FreightDesk client.
//!
//! Configuration values are layered from files and `FREIGHTDESK__`-prefixed
//! variables. Secrets are never written to config files: a value of
//! `"secret_from_env"` is replaced by the matching `FREIGHTDESK_SECRET_`
//! variable when the configuration is loaded.

use std::env;

use tracing::warn;

/// The default prefix for configuration environment variables
pub const DEFAULT_PREFIX: &str = "FREIGHTDESK";

/// The prefix for secret environment variables
pub const SECRET_PREFIX: &str = "FREIGHTDESK_SECRET";

/// The separator for configuration environment variables
pub const CONFIG_SEPARATOR: &str = "__";

/// The separator for secret environment variables
pub const SECRET_SEPARATOR: &str = "_";

/// Marker value that asks the loader to pull a value from the environment.
pub const SECRET_MARKER: &str = "secret_from_env";

/// Get the prefix for configuration environment variables
pub fn get_config_prefix() -> String {
    env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string())
}

/// Convert a configuration path to an environment variable name
///
/// # Arguments
///
/// * `path` - The configuration path (e.g., "gateway.mode")
///
/// # Returns
///
/// The environment variable name (e.g., "FREIGHTDESK__GATEWAY__MODE")
pub fn config_path_to_env_var(path: &str) -> String {
    let prefix = get_config_prefix();
    let path = path.replace('.', CONFIG_SEPARATOR);
    format!("{}{}{}", prefix, CONFIG_SEPARATOR, path).to_uppercase()
}

/// Convert a secret path to an environment variable name
///
/// # Arguments
///
/// * `path` - The secret path (e.g., "database.url")
///
/// # Returns
///
/// The environment variable name (e.g., "FREIGHTDESK_SECRET_DATABASE_URL")
pub fn secret_path_to_env_var(path: &str) -> String {
    let path = path.replace('.', SECRET_SEPARATOR);
    format!("{}{}{}", SECRET_PREFIX, SECRET_SEPARATOR, path).to_uppercase()
}

/// Get an environment variable for a secret path.
///
/// Falls back to the bare upper-cased path (`database.url` -> `DATABASE_URL`)
/// so conventional deployment variables keep working.
pub fn get_secret_env_var(path: &str) -> Option<String> {
    if let Ok(value) = env::var(secret_path_to_env_var(path)) {
        return Some(value);
    }

    let legacy = path.replace('.', SECRET_SEPARATOR).to_uppercase();
    env::var(legacy).ok()
}

/// Inject environment variables into a JSON value
///
/// Recursively replaces every `"secret_from_env"` string with the value of the
/// matching secret environment variable. Missing variables are logged and the
/// marker is left in place.
///
/// # Returns
///
/// `true` if any values were replaced, `false` otherwise
pub fn inject_env_vars(value: &mut serde_json::Value) -> bool {
    use serde_json::Value;

    fn walk(path: Vec<String>, obj: &mut Value) -> bool {
        let mut replaced = false;

        match obj {
            Value::Object(map) => {
                for (k, v) in map.iter_mut() {
                    let mut new_path = path.clone();
                    new_path.push(k.to_string());
                    replaced |= walk(new_path, v);
                }
            }
            Value::Array(arr) => {
                for (i, v) in arr.iter_mut().enumerate() {
                    let mut new_path = path.clone();
                    new_path.push(i.to_string());
                    replaced |= walk(new_path, v);
                }
            }
            Value::String(s) if s == SECRET_MARKER => {
                let path_str = path.join(".");
                if let Some(env_val) = get_secret_env_var(&path_str) {
                    *s = env_val;
                    replaced = true;
                } else {
                    warn!("env var for {} not found", path_str);
                }
            }
            _ => {}
        }

        replaced
    }

    walk(vec![], value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_config_path_to_env_var() {
        assert_eq!(
            config_path_to_env_var("gateway.mode"),
            "FREIGHTDESK__GATEWAY__MODE"
        );
        assert_eq!(
            config_path_to_env_var("session.durable_path"),
            "FREIGHTDESK__SESSION__DURABLE_PATH"
        );
    }

    #[test]
    fn test_secret_path_to_env_var() {
        assert_eq!(
            secret_path_to_env_var("database.url"),
            "FREIGHTDESK_SECRET_DATABASE_URL"
        );
    }

    #[test]
    fn test_inject_env_vars_replaces_marker() {
        env::set_var("FREIGHTDESK_SECRET_INJECTTEST_URL", "postgres://db/freight");
        let mut value = json!({
            "injecttest": { "url": "secret_from_env" },
            "gateway": { "host": "localhost" }
        });

        assert!(inject_env_vars(&mut value));
        assert_eq!(value["injecttest"]["url"], "postgres://db/freight");
        assert_eq!(value["gateway"]["host"], "localhost");
        env::remove_var("FREIGHTDESK_SECRET_INJECTTEST_URL");
    }

    #[test]
    fn test_inject_env_vars_keeps_marker_when_missing() {
        let mut value = json!({ "missingsecret": { "token": "secret_from_env" } });

        assert!(!inject_env_vars(&mut value));
        assert_eq!(value["missingsecret"]["token"], SECRET_MARKER);
    }
}
