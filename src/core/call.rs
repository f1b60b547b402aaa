use crate::adapters::HttpModelService;
use crate::config::{cli::LocalStorage, CallConfig};
use crate::core::encoding::{to_pretty_bytes, to_request_bytes};
use crate::core::request::{build_request, parse_template};
use crate::core::{
    CallOutcome, ConfigProvider, DataFileSpec, ModelService, ResponseSummary, Storage,
};
use crate::utils::error::{CallError, Result};
use serde_json::Value;

/// One `buildModel` round trip: template in, pretty-printed reply out.
pub struct ModelCall<S: Storage, C: ConfigProvider, M: ModelService> {
    storage: S,
    config: C,
    service: M,
}

impl<S: Storage, C: ConfigProvider, M: ModelService> ModelCall<S, C, M> {
    pub fn new(storage: S, config: C, service: M) -> Self {
        Self {
            storage,
            config,
            service,
        }
    }

    fn data_file(&self) -> Option<DataFileSpec> {
        let path = self.config.data_path().filter(|p| !p.is_empty())?;
        let spec = DataFileSpec::new(path, self.config.send_inline());
        Some(match self.config.field_separator() {
            Some(separator) => spec.with_field_separator(separator),
            None => spec,
        })
    }

    /// Loads the template and applies the data file, without contacting the server.
    pub async fn prepare(&self) -> Result<Value> {
        let template_path = self.config.template_path();
        tracing::debug!("Loading template from {}", template_path);
        let bytes = self.storage.read_file(template_path).await?;
        let template = parse_template(&bytes, template_path)?;

        build_request(&self.storage, template, self.data_file().as_ref()).await
    }

    pub async fn run(&self) -> Result<CallOutcome> {
        let request = self.prepare().await?;
        let body = to_request_bytes(&request, self.config.ascii_only())?;
        let request_bytes = body.len();

        let reply = self.service.build_model(body).await?;
        if !reply.is_success() {
            tracing::warn!("Model service answered with HTTP {}", reply.status);
        }

        let response: Value = serde_json::from_slice(&reply.body)
            .map_err(|e| CallError::parse(format!("response body (HTTP {})", reply.status), e))?;

        let summary = ResponseSummary::from_reply(&response);
        if summary.is_error() {
            tracing::warn!("Model service reported status 'error'");
            for error in &summary.errors {
                tracing::warn!("  - {}", error);
            }
        }

        let output_path = self.config.output_path();
        let pretty = to_pretty_bytes(&response, self.config.ascii_only())?;
        self.storage.write_file(output_path, &pretty).await?;
        tracing::debug!("Wrote {} bytes to {}", pretty.len(), output_path);

        Ok(CallOutcome {
            output_path: output_path.to_string(),
            request_bytes,
            http_status: reply.status,
            response_bytes: reply.body.len(),
            summary,
        })
    }
}

/// Runs a call against the real filesystem and HTTP service.
pub async fn run_call(config: CallConfig) -> Result<CallOutcome> {
    let service = HttpModelService::new(config.host_and_port(), config.timeout_seconds())?;
    ModelCall::new(LocalStorage::default(), config, service)
        .run()
        .await
}

/// Template at `template_path`, optional data file (empty string for none), reply
/// saved to `output_path`.
pub async fn build_and_send(
    host_and_port: &str,
    template_path: &str,
    data_path: &str,
    send_inline: bool,
    output_path: &str,
) -> Result<CallOutcome> {
    let config = CallConfig::new(host_and_port, template_path, output_path)
        .with_data_file(data_path, send_inline);
    run_call(config).await
}
