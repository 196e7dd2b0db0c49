use crate::config::{DEFAULT_TIMEOUT_SECONDS, MAX_TIMEOUT_SECONDS};
use crate::core::{ConfigProvider, OutputFormat};
use crate::utils::error::{DirectoryError, Result};
use crate::utils::validation::{validate_path, validate_range, validate_source_location, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub directory: Option<DirectoryInfo>,
    pub source: SourceConfig,
    pub output: Option<OutputConfig>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryInfo {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub location: String,
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub search: Option<String>,
    pub select: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DirectoryError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CSV_URL})，找不到的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| DirectoryError::ConfigError {
            message: format!("invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn directory_name(&self) -> &str {
        self.directory
            .as_ref()
            .map(|d| d.name.as_str())
            .unwrap_or("Ocean Research Directory")
    }

    fn output_config(&self) -> Option<&OutputConfig> {
        self.output.as_ref()
    }

    fn display_config(&self) -> Option<&DisplayConfig> {
        self.display.as_ref()
    }

    /// 命令列參數優先於檔案設定
    pub fn apply_overrides(
        &mut self,
        output: Option<String>,
        format: Option<OutputFormat>,
        search: Option<String>,
        select: Option<String>,
    ) {
        let out = self.output.get_or_insert_with(OutputConfig::default);
        if output.is_some() {
            out.path = output;
        }
        if format.is_some() {
            out.format = format;
        }

        let display = self.display.get_or_insert_with(DisplayConfig::default);
        if search.is_some() {
            display.search = search;
        }
        if select.is_some() {
            display.select = select;
        }
    }
}

impl ConfigProvider for TomlConfig {
    fn source_location(&self) -> &str {
        &self.source.location
    }

    fn request_timeout_seconds(&self) -> u64 {
        self.source.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn user_agent(&self) -> Option<&str> {
        self.source.user_agent.as_deref()
    }

    fn output_path(&self) -> Option<&str> {
        self.output_config().and_then(|o| o.path.as_deref())
    }

    fn output_format(&self) -> OutputFormat {
        self.output_config()
            .and_then(|o| o.format)
            .unwrap_or_default()
    }

    fn search_query(&self) -> Option<&str> {
        self.display_config().and_then(|d| d.search.as_deref())
    }

    fn selected_name(&self) -> Option<&str> {
        self.display_config().and_then(|d| d.select.as_deref())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_source_location("source.location", &self.source.location)?;
        validate_range(
            "source.timeout_seconds",
            self.request_timeout_seconds(),
            1,
            MAX_TIMEOUT_SECONDS,
        )?;
        if let Some(path) = self.output_path() {
            validate_path("output.path", path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[directory]
name = "Ocean Research Directory"

[source]
location = "https://docs.google.com/spreadsheets/d/e/abc/pub?output=csv"
timeout_seconds = 10

[output]
format = "csv"
path = "exports/organizations.csv"

[display]
search = "coral"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.directory_name(), "Ocean Research Directory");
        assert_eq!(config.request_timeout_seconds(), 10);
        assert_eq!(config.output_format(), OutputFormat::Csv);
        assert_eq!(config.output_path(), Some("exports/organizations.csv"));
        assert_eq!(config.search_query(), Some("coral"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_minimal_config_defaults() {
        let config = TomlConfig::from_toml_str("[source]\nlocation = \"organizations.csv\"\n").unwrap();

        assert_eq!(config.request_timeout_seconds(), DEFAULT_TIMEOUT_SECONDS);
        assert_eq!(config.output_format(), OutputFormat::Table);
        assert!(config.output_path().is_none());
        assert!(config.selected_name().is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("OCEAN_DIRECTORY_TEST_CSV_URL", "https://sheets.example.com/pub");

        let toml_content = r#"
[source]
location = "${OCEAN_DIRECTORY_TEST_CSV_URL}"
user_agent = "${OCEAN_DIRECTORY_UNSET_VAR}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.source.location, "https://sheets.example.com/pub");
        assert_eq!(config.user_agent(), Some("${OCEAN_DIRECTORY_UNSET_VAR}"));

        std::env::remove_var("OCEAN_DIRECTORY_TEST_CSV_URL");
    }

    #[test]
    fn test_config_validation() {
        let bad_scheme =
            TomlConfig::from_toml_str("[source]\nlocation = \"ftp://example.com/orgs.csv\"\n")
                .unwrap();
        assert!(bad_scheme.validate().is_err());

        let bad_timeout = TomlConfig::from_toml_str(
            "[source]\nlocation = \"orgs.csv\"\ntimeout_seconds = 0\n",
        )
        .unwrap();
        assert!(bad_timeout.validate().is_err());
    }

    #[test]
    fn test_overrides_take_precedence() {
        let mut config = TomlConfig::from_toml_str(
            "[source]\nlocation = \"orgs.csv\"\n[output]\nformat = \"csv\"\n",
        )
        .unwrap();

        config.apply_overrides(None, Some(OutputFormat::Json), Some("kelp".to_string()), None);

        assert_eq!(config.output_format(), OutputFormat::Json);
        assert_eq!(config.search_query(), Some("kelp"));
        assert!(config.output_path().is_none());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[directory]\nname = \"file-test\"\n[source]\nlocation = \"orgs.csv\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.directory_name(), "file-test");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[source\nlocation = 1").unwrap_err();
        assert!(matches!(err, DirectoryError::ConfigValidationError { .. }));
    }
}
