use crate::config::CallConfig;
use crate::utils::error::{CallError, Result};
use crate::utils::validation::validate_required_field;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A saved call, e.g.
///
/// ```toml
/// [server]
/// host = "${MODEL_HOST}"
/// timeout_seconds = 600
///
/// [request]
/// template = "call.json"
/// data = "B100_hour_SS_input.csv"
/// send_inline = true
///
/// [output]
/// path = "callResult.json"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallProfile {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub request: RequestSection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerSection {
    pub host: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub ascii_only: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestSection {
    pub template: Option<String>,
    pub data: Option<String>,
    pub send_inline: Option<bool>,
    pub field_separator: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSection {
    pub path: Option<String>,
}

impl CallProfile {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| CallError::file(path.display().to_string(), e))?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CallError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MODEL_HOST})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CallError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Requires host, template and output path to be present.
    pub fn to_call_config(&self) -> Result<CallConfig> {
        let host = validate_required_field("server.host", &self.server.host)?;
        let template = validate_required_field("request.template", &self.request.template)?;
        let output = validate_required_field("output.path", &self.output.path)?;

        let mut config = CallConfig::new(host, template, output).with_data_file(
            self.request.data.as_deref().unwrap_or_default(),
            self.request.send_inline.unwrap_or(true),
        );
        config.field_separator = self.request.field_separator.clone();
        config.timeout_seconds = self.server.timeout_seconds;
        if let Some(ascii_only) = self.server.ascii_only {
            config.ascii_only = ascii_only;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ConfigProvider;
    use crate::utils::validation::Validate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_profile() {
        let toml_content = r#"
[server]
host = "localhost:8096"
timeout_seconds = 120
ascii_only = false

[request]
template = "call.json"
data = "input.csv"
send_inline = false
field_separator = ";"

[output]
path = "callResult.json"
"#;

        let profile = CallProfile::from_toml_str(toml_content).unwrap();
        let config = profile.to_call_config().unwrap();

        assert_eq!(config.host_and_port(), "localhost:8096");
        assert_eq!(config.data_path(), Some("input.csv"));
        assert!(!config.send_inline());
        assert_eq!(config.field_separator(), Some(";"));
        assert_eq!(config.timeout_seconds(), Some(120));
        assert!(!config.ascii_only());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_for_optional_keys() {
        let toml_content = r#"
[server]
host = "localhost:8096"

[request]
template = "call.json"

[output]
path = "out.json"
"#;

        let config = CallProfile::from_toml_str(toml_content)
            .unwrap()
            .to_call_config()
            .unwrap();

        assert_eq!(config.data_path(), None);
        assert!(config.send_inline());
        assert!(config.ascii_only());
        assert_eq!(config.timeout_seconds(), None);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("MODELCALL_TEST_HOST", "model.example.org:8096");

        let profile = CallProfile::from_toml_str(
            r#"
[server]
host = "${MODELCALL_TEST_HOST}"
"#,
        )
        .unwrap();
        assert_eq!(profile.server.host.as_deref(), Some("model.example.org:8096"));

        std::env::remove_var("MODELCALL_TEST_HOST");
    }

    #[test]
    fn test_unset_env_var_is_kept() {
        let profile = CallProfile::from_toml_str(
            r#"
[output]
path = "${MODELCALL_SURELY_UNSET_VAR}/out.json"
"#,
        )
        .unwrap();
        assert_eq!(
            profile.output.path.as_deref(),
            Some("${MODELCALL_SURELY_UNSET_VAR}/out.json")
        );
    }

    #[test]
    fn test_missing_host_is_reported() {
        let profile = CallProfile::from_toml_str("[request]\ntemplate = \"call.json\"\n").unwrap();
        let err = profile.to_call_config().unwrap_err();
        assert!(matches!(err, CallError::MissingConfigError { field } if field == "server.host"));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            CallProfile::from_toml_str("[server\nhost = 1"),
            Err(CallError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_profile_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[server]\nhost = \"localhost:9000\"\n")
            .unwrap();

        let profile = CallProfile::from_file(temp_file.path()).unwrap();
        assert_eq!(profile.server.host.as_deref(), Some("localhost:9000"));
    }
}
