use crate::domain::model::ServiceReply;
use crate::domain::ports::ModelService;
use crate::utils::error::{CallError, Result};
use crate::utils::validation::validate_url;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;

pub const BUILD_MODEL_PATH: &str = "/buildModel";

/// `http://{host_and_port}/buildModel`
pub fn build_model_endpoint(host_and_port: &str) -> Result<String> {
    let host = host_and_port.trim();
    if host.is_empty() || host.contains("://") || host.contains('/') {
        return Err(CallError::ConfigError {
            message: format!("expected host[:port], got '{}'", host_and_port),
        });
    }

    let endpoint = format!("http://{}{}", host, BUILD_MODEL_PATH);
    validate_url("host_and_port", &endpoint).map_err(|e| CallError::ConfigError {
        message: e.to_string(),
    })?;
    Ok(endpoint)
}

#[derive(Debug, Clone)]
pub struct HttpModelService {
    endpoint: String,
    client: Client,
}

impl HttpModelService {
    pub fn new(host_and_port: &str, timeout_seconds: Option<u64>) -> Result<Self> {
        let endpoint = build_model_endpoint(host_and_port)?;

        let mut builder = Client::builder();
        if let Some(seconds) = timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let client = builder.build()?;

        Ok(Self { endpoint, client })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ModelService for HttpModelService {
    async fn build_model(&self, body: Vec<u8>) -> Result<ServiceReply> {
        tracing::info!("Sending request ({} bytes) to {}", body.len(), self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        tracing::info!("Response: {}", status.as_u16());
        tracing::debug!("Response headers: {:?}", response.headers());

        let body = response.bytes().await?.to_vec();
        tracing::info!("Response body: {} bytes", body.len());

        Ok(ServiceReply {
            status: status.as_u16(),
            body,
        })
    }
}
