use thiserror::Error;

const DEFAULT_DATABASE_URL: &str = "sqlite://bvb_stats.db?mode=rwc";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_HTTP_HOST: &str = "127.0.0.1";
const DEFAULT_HTTP_PORT: u16 = 8000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got '{value}'")]
    InvalidValue {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
    #[error("LOG_FILE_PATH and LOG_ARCHIVE_PATTERN must be set together")]
    IncompleteFileLogging,
}

/// Rolling log file settings. File logging is off unless both variables are set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLogConfig {
    pub file_path: String,
    pub archive_pattern: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub http_host: String,
    pub http_port: u16,
    pub file_log: Option<FileLogConfig>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url =
            lookup("BVB_DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let max_connections = match lookup("BVB_DB_MAX_CONNECTIONS") {
            Some(value) => parse_value("BVB_DB_MAX_CONNECTIONS", "positive integer", &value)
                .and_then(|n: u32| {
                    if n == 0 {
                        Err(ConfigError::InvalidValue {
                            name: "BVB_DB_MAX_CONNECTIONS",
                            expected: "positive integer",
                            value,
                        })
                    } else {
                        Ok(n)
                    }
                })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        let http_host = lookup("BVB_HTTP_HOST").unwrap_or_else(|| DEFAULT_HTTP_HOST.to_string());
        let http_port = match lookup("BVB_HTTP_PORT") {
            Some(value) => parse_value("BVB_HTTP_PORT", "port number", &value)?,
            None => DEFAULT_HTTP_PORT,
        };
        let file_log = match (lookup("LOG_FILE_PATH"), lookup("LOG_ARCHIVE_PATTERN")) {
            (Some(file_path), Some(archive_pattern)) => Some(FileLogConfig {
                file_path,
                archive_pattern,
            }),
            (None, None) => None,
            _ => return Err(ConfigError::IncompleteFileLogging),
        };

        Ok(ServerConfig {
            database_url,
            max_connections,
            http_host,
            http_port,
            file_log,
        })
    }
}

fn parse_value<T: std::str::FromStr>(
    name: &'static str,
    expected: &'static str,
    value: &str,
) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name,
        expected,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.database_url, "sqlite://bvb_stats.db?mode=rwc");
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.http_host, "127.0.0.1");
        assert_eq!(config.http_port, 8000);
        assert_eq!(config.file_log, None);
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("BVB_DATABASE_URL", "sqlite::memory:"),
            ("BVB_DB_MAX_CONNECTIONS", "1"),
            ("BVB_HTTP_HOST", "0.0.0.0"),
            ("BVB_HTTP_PORT", "9090"),
            ("LOG_FILE_PATH", "logs/bvb.log"),
            ("LOG_ARCHIVE_PATTERN", "logs/bvb.{}.log.gz"),
        ])
        .unwrap();
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.max_connections, 1);
        assert_eq!(config.http_host, "0.0.0.0");
        assert_eq!(config.http_port, 9090);
        assert_eq!(
            config.file_log,
            Some(FileLogConfig {
                file_path: "logs/bvb.log".to_string(),
                archive_pattern: "logs/bvb.{}.log.gz".to_string(),
            })
        );
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            config(&[("BVB_HTTP_PORT", "eighty")]),
            Err(ConfigError::InvalidValue {
                name: "BVB_HTTP_PORT",
                ..
            })
        ));
        assert!(matches!(
            config(&[("BVB_HTTP_PORT", "70000")]),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            config(&[("BVB_DB_MAX_CONNECTIONS", "0")]),
            Err(ConfigError::InvalidValue {
                name: "BVB_DB_MAX_CONNECTIONS",
                ..
            })
        ));
        assert_eq!(
            config(&[("LOG_FILE_PATH", "bvb.log")]),
            Err(ConfigError::IncompleteFileLogging)
        );
    }
}
