use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};
use crate::infrastructure::tabular::DEFAULT_MISSING_MARKERS;

/// Optional config file, looked up from the working directory upwards
pub const CONFIG_FILE: &str = "tabula.toml";

/// Environment variables with this prefix override the file (`TABULA_PORT=9000`)
pub const ENV_PREFIX: &str = "TABULA_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,

    /// Upper bound for a single uploaded file, in bytes
    pub max_upload_bytes: usize,

    /// Default tracing filter when `RUST_LOG` is not set
    pub log_level: String,

    /// Raw tokens read as "no value" by the CSV and spreadsheet readers
    pub missing_markers: Vec<String>,

    /// Replaces the built-in date format list when set
    #[serde(default)]
    pub date_formats: Option<Vec<String>>,

    /// Forces the CSV delimiter instead of sniffing it
    #[serde(default)]
    pub csv_delimiter: Option<char>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            max_upload_bytes: 50 * 1024 * 1024,
            log_level: "info".to_string(),
            missing_markers: DEFAULT_MISSING_MARKERS
                .iter()
                .map(|m| m.to_string())
                .collect(),
            date_formats: None,
            csv_delimiter: None,
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(AppError::ConfigError("host must not be empty".to_string()));
        }
        if self.max_upload_bytes == 0 {
            return Err(AppError::ConfigError(
                "max_upload_bytes must be > 0".to_string(),
            ));
        }
        if let Some(formats) = &self.date_formats {
            if formats.is_empty() || formats.iter().any(|f| f.trim().is_empty()) {
                return Err(AppError::ConfigError(
                    "date_formats must contain non-empty format strings".to_string(),
                ));
            }
        }
        if let Some(delimiter) = self.csv_delimiter {
            if !delimiter.is_ascii() || delimiter == '"' || delimiter == '\n' {
                return Err(AppError::ConfigError(format!(
                    "csv_delimiter {:?} is not a usable single-byte delimiter",
                    delimiter
                )));
            }
        }
        Ok(())
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

/// Layered configuration: defaults, then `tabula.toml`, then `TABULA_*` env vars
pub struct ConfigService {
    figment: Figment,
}

impl ConfigService {
    pub fn new() -> Self {
        Self {
            figment: Figment::from(Serialized::defaults(AppConfig::default()))
                .merge(Toml::file(CONFIG_FILE))
                .merge(Env::prefixed(ENV_PREFIX)),
        }
    }

    pub fn from_figment(figment: Figment) -> Self {
        Self { figment }
    }

    pub fn load(&self) -> Result<AppConfig> {
        let config: AppConfig = self
            .figment
            .extract()
            .map_err(|e| AppError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults() {
        Jail::expect_with(|_jail| {
            let config = ConfigService::new().load().unwrap();
            assert_eq!(config.port, 8000);
            assert_eq!(config.host, "0.0.0.0");
            assert!(config.missing_markers.iter().any(|m| m == "NA"));
            assert!(config.date_formats.is_none());
            Ok(())
        });
    }

    #[test]
    fn test_file_then_env_override() {
        Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE,
                r#"
                port = 9100
                log_level = "debug"
                date_formats = ["%d.%m.%Y"]
                "#,
            )?;
            jail.set_env("TABULA_PORT", "9200");

            let config = ConfigService::new().load().unwrap();
            assert_eq!(config.port, 9200);
            assert_eq!(config.log_level, "debug");
            assert_eq!(config.date_formats, Some(vec!["%d.%m.%Y".to_string()]));
            Ok(())
        });
    }

    #[test]
    fn test_rejects_empty_date_formats() {
        Jail::expect_with(|jail| {
            jail.create_file(CONFIG_FILE, "date_formats = []")?;
            let err = ConfigService::new().load().unwrap_err();
            assert!(matches!(err, AppError::ConfigError(_)));
            Ok(())
        });
    }

    #[test]
    fn test_rejects_zero_upload_limit() {
        let config = AppConfig {
            max_upload_bytes: 0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
