pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_range, validate_required_field, Validate,
};

#[cfg(feature = "cli")]
use crate::config::toml_config::CallProfile;
#[cfg(feature = "cli")]
use clap::{Parser, ValueEnum};

const MAX_TIMEOUT_SECONDS: u64 = 24 * 60 * 60;

/// Fully resolved parameters of one `buildModel` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallConfig {
    pub host_and_port: String,
    pub template_path: String,
    pub data_path: Option<String>,
    pub send_inline: bool,
    pub output_path: String,
    pub field_separator: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub ascii_only: bool,
}

impl CallConfig {
    pub fn new(
        host_and_port: impl Into<String>,
        template_path: impl Into<String>,
        output_path: impl Into<String>,
    ) -> Self {
        Self {
            host_and_port: host_and_port.into(),
            template_path: template_path.into(),
            data_path: None,
            send_inline: true,
            output_path: output_path.into(),
            field_separator: None,
            timeout_seconds: None,
            ascii_only: true,
        }
    }

    /// An empty path means "no data file".
    pub fn with_data_file(mut self, data_path: impl Into<String>, send_inline: bool) -> Self {
        let data_path = data_path.into();
        self.data_path = (!data_path.is_empty()).then_some(data_path);
        self.send_inline = send_inline;
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }
}

impl ConfigProvider for CallConfig {
    fn host_and_port(&self) -> &str {
        &self.host_and_port
    }

    fn template_path(&self) -> &str {
        &self.template_path
    }

    fn data_path(&self) -> Option<&str> {
        self.data_path.as_deref()
    }

    fn send_inline(&self) -> bool {
        self.send_inline
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn field_separator(&self) -> Option<&str> {
        self.field_separator.as_deref()
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }

    fn ascii_only(&self) -> bool {
        self.ascii_only
    }
}

impl Validate for CallConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("host", &self.host_and_port)?;
        crate::adapters::http::build_model_endpoint(&self.host_and_port)?;
        validate_path("template", &self.template_path)?;
        validate_path("output", &self.output_path)?;
        if let Some(data_path) = &self.data_path {
            validate_path("data", data_path)?;
        }
        if let Some(separator) = &self.field_separator {
            validate_non_empty_string("field_separator", separator)?;
        }
        if let Some(timeout) = self.timeout_seconds {
            validate_range("timeout_seconds", timeout, 1, MAX_TIMEOUT_SECONDS)?;
        }
        Ok(())
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DataMode {
    /// Embed the data file in the request
    Inline,
    /// Send only the path; the server reads the file
    File,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "modelcall")]
#[command(about = "Send a buildModel request to a modelling service and save the reply")]
pub struct CliConfig {
    #[arg(long, help = "Model service address as host:port")]
    pub host: Option<String>,

    #[arg(long, help = "JSON request template")]
    pub template: Option<String>,

    #[arg(long, help = "CSV or JSON data file")]
    pub data: Option<String>,

    #[arg(long, value_enum, help = "How the data file is handed to the server [default: inline]")]
    pub mode: Option<DataMode>,

    #[arg(long, help = "Where to write the pretty-printed reply")]
    pub output: Option<String>,

    #[arg(long, help = "CSV field separator sent as dataSource.fieldSep")]
    pub field_sep: Option<String>,

    #[arg(long, help = "Request timeout in seconds (none by default)")]
    pub timeout: Option<u64>,

    #[arg(long, help = "Send and save raw UTF-8 instead of \\u-escaped ASCII")]
    pub utf8: bool,

    #[arg(long, help = "TOML profile supplying defaults for the options above")]
    pub profile: Option<String>,

    #[arg(long, help = "Print the request body instead of sending it")]
    pub dry_run: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 合併 profile 與命令列參數，命令列優先
    pub fn resolve(&self) -> Result<CallConfig> {
        let profile = match &self.profile {
            Some(path) => CallProfile::from_file(path)?,
            None => CallProfile::default(),
        };
        self.merge(profile)
    }

    pub fn merge(&self, profile: CallProfile) -> Result<CallConfig> {
        let host = self.host.clone().or(profile.server.host);
        let template = self.template.clone().or(profile.request.template);
        let output = self.output.clone().or(profile.output.path);

        let host = validate_required_field("host", &host)?;
        let template = validate_required_field("template", &template)?;
        let output = validate_required_field("output", &output)?;

        let send_inline = match self.mode {
            Some(mode) => mode == DataMode::Inline,
            None => profile.request.send_inline.unwrap_or(true),
        };
        let data = self.data.clone().or(profile.request.data).unwrap_or_default();

        let mut config =
            CallConfig::new(host, template, output).with_data_file(data, send_inline);
        config.field_separator = self.field_sep.clone().or(profile.request.field_separator);
        config.timeout_seconds = self.timeout.or(profile.server.timeout_seconds);
        config.ascii_only = if self.utf8 {
            false
        } else {
            profile.server.ascii_only.unwrap_or(true)
        };
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_data_path_means_none() {
        let config = CallConfig::new("localhost:8096", "call.json", "out.json")
            .with_data_file("", false);
        assert_eq!(config.data_path(), None);
        assert!(!config.send_inline());
    }

    #[test]
    fn test_validate_call_config() {
        let config = CallConfig::new("localhost:8096", "call.json", "out.json")
            .with_data_file("d.csv", true)
            .with_timeout(30);
        assert!(config.validate().is_ok());

        let bad_host = CallConfig::new("http://localhost:8096", "call.json", "out.json");
        assert!(bad_host.validate().is_err());

        let bad_timeout = CallConfig::new("localhost:8096", "call.json", "out.json").with_timeout(0);
        assert!(bad_timeout.validate().is_err());

        let bad_output = CallConfig::new("localhost:8096", "call.json", "");
        assert!(bad_output.validate().is_err());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_overrides_profile() {
        let cli = CliConfig::parse_from([
            "modelcall",
            "--host",
            "cli-host:9000",
            "--mode",
            "file",
            "--utf8",
        ]);
        let profile = CallProfile::from_toml_str(
            r#"
[server]
host = "profile-host:8096"
timeout_seconds = 60

[request]
template = "call.json"
data = "input.csv"
send_inline = true

[output]
path = "out.json"
"#,
        )
        .unwrap();

        let config = cli.merge(profile).unwrap();
        assert_eq!(config.host_and_port, "cli-host:9000");
        assert_eq!(config.template_path, "call.json");
        assert_eq!(config.data_path.as_deref(), Some("input.csv"));
        assert!(!config.send_inline);
        assert_eq!(config.timeout_seconds, Some(60));
        assert!(!config.ascii_only);
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_requires_host() {
        let cli = CliConfig::parse_from(["modelcall", "--template", "t.json", "--output", "o.json"]);
        assert!(cli.merge(CallProfile::default()).is_err());
    }
}
