use std::{env, fs, io, path::Path};

use serde::Deserialize;
use thiserror::Error;

const SETTINGS_FILENAME: &str = "settings.json";
const SETTINGS_PATH_VAR: &str = "TODO_SETTINGS";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tcp_socket_binding: String,
    pub tcp_socket_port: u16,
    pub database_path: String,
    pub jwt_secret: String,
    pub jwt_expiration_in_minutes: i64,
    pub default_admin_username: String,
    pub default_admin_email: String,
    pub default_admin_password: String,
    /// Built frontend to serve for any non-API path.
    pub static_dir: Option<String>,
    /// Used when RUST_LOG is not set.
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tcp_socket_binding: "0.0.0.0".to_string(),
            tcp_socket_port: 5000,
            database_path: "todos.redb".to_string(),
            jwt_secret: "change-me-in-settings-json".to_string(),
            jwt_expiration_in_minutes: 7 * 24 * 60,
            default_admin_username: "admin".to_string(),
            default_admin_email: "admin@localhost.local".to_string(),
            default_admin_password: "admin123".to_string(),
            static_dir: None,
            log_filter: "teamtodo_server=info,tower_http=info".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings file {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("cannot parse settings file {path}: {source}")]
    Parse { path: String, source: serde_json::Error },
}

impl Settings {
    /// Load from `$TODO_SETTINGS`, else `settings.json` in the working
    /// directory. A missing file means defaults; a malformed one is an error.
    pub fn load() -> Result<Settings, SettingsError> {
        let path = Settings::path();
        if !Path::new(&path).exists() {
            return Ok(Settings::default());
        }
        Settings::load_from(&path)
    }

    pub fn path() -> String {
        env::var(SETTINGS_PATH_VAR).unwrap_or_else(|_| SETTINGS_FILENAME.to_string())
    }

    pub fn load_from(path: &str) -> Result<Settings, SettingsError> {
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_string(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_string(),
            source,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.tcp_socket_binding, self.tcp_socket_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "tcp_socket_port": 8080, "jwt_secret": "s3cret" }}"#).unwrap();

        let settings = Settings::load_from(file.path().to_str().unwrap()).unwrap();
        assert_eq!(settings.tcp_socket_port, 8080);
        assert_eq!(settings.jwt_secret, "s3cret");
        assert_eq!(settings.database_path, "todos.redb");
        assert_eq!(settings.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = Settings::load_from(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
    }
}
