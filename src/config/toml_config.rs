use crate::core::codec::DEFAULT_DELIMITER;
use crate::core::store::DEFAULT_FILE;
use crate::core::ConfigProvider;
use crate::domain::model::AliasTable;
use crate::utils::error::{RegistryError, Result};
use crate::utils::validation::{validate_delimiter, validate_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub store: StoreConfig,
    pub logging: LoggingConfig,
    pub aliases: AliasConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub default_path: String,
    pub delimiter: String,
    pub auto_load: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            default_path: DEFAULT_FILE.to_string(),
            delimiter: DEFAULT_DELIMITER.to_string(),
            auto_load: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// 額外的欄位別名，附加在內建別名之後
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AliasConfig {
    pub id: Vec<String>,
    pub name: Vec<String>,
    pub address: Vec<String>,
    pub budget: Vec<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RegistryError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RegistryError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RegistryError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_path("store.default_path", &self.store.default_path)?;
        validate_delimiter("store.delimiter", &self.store.delimiter)?;

        if let Some(level) = &self.logging.level {
            if !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
                return Err(RegistryError::InvalidConfigValueError {
                    field: "logging.level".to_string(),
                    value: level.clone(),
                    reason: format!("Valid levels: {}", LOG_LEVELS.join(", ")),
                });
            }
        }

        Ok(())
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.level.as_deref()
    }
}

impl ConfigProvider for TomlConfig {
    fn default_path(&self) -> &str {
        &self.store.default_path
    }

    fn delimiter(&self) -> char {
        self.store.delimiter.chars().next().unwrap_or(DEFAULT_DELIMITER)
    }

    fn auto_load(&self) -> bool {
        self.store.auto_load
    }

    fn alias_table(&self) -> AliasTable {
        let mut table = AliasTable::default();
        table.extend(&AliasTable {
            id: self.aliases.id.clone(),
            name: self.aliases.name.clone(),
            address: self.aliases.address.clone(),
            budget: self.aliases.budget.clone(),
        });
        table
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_from_empty_file() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert_eq!(config.default_path(), "companies.txt");
        assert_eq!(config.delimiter(), '|');
        assert!(config.auto_load());
        assert_eq!(config.logging.format, LogFormat::Compact);
        assert_eq!(config.alias_table(), AliasTable::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[store]
default_path = "data/empresas.json"
delimiter = ";"
auto_load = false

[logging]
level = "debug"
format = "json"

[aliases]
name = ["razon_social"]
budget = ["valor"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.default_path(), "data/empresas.json");
        assert_eq!(config.delimiter(), ';');
        assert!(!config.auto_load());
        assert_eq!(config.log_level(), Some("debug"));
        assert_eq!(config.logging.format, LogFormat::Json);

        let table = config.alias_table();
        assert_eq!(table.name.last().map(String::as_str), Some("razon_social"));
        assert_eq!(table.budget.last().map(String::as_str), Some("valor"));
        assert_eq!(table.id, AliasTable::default().id);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("COMPANY_REGISTRY_TEST_DIR", "/tmp/registry");

        let toml_content = r#"
[store]
default_path = "${COMPANY_REGISTRY_TEST_DIR}/companies.csv"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.default_path(), "/tmp/registry/companies.csv");

        std::env::remove_var("COMPANY_REGISTRY_TEST_DIR");
    }

    #[test]
    fn test_config_validation() {
        let bad_delimiter = TomlConfig::from_toml_str("[store]\ndelimiter = \"||\"\n").unwrap();
        assert!(bad_delimiter.validate().is_err());

        let bad_path = TomlConfig::from_toml_str("[store]\ndefault_path = \"\"\n").unwrap();
        assert!(bad_path.validate().is_err());

        let bad_level = TomlConfig::from_toml_str("[logging]\nlevel = \"loud\"\n").unwrap();
        assert!(bad_level.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[store\n").unwrap_err();
        assert!(matches!(err, RegistryError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[store]\ndefault_path = \"from-file.csv\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.default_path(), "from-file.csv");
    }
}
