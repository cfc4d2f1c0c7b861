//! HTTP implementation of the execution service boundary

use async_trait::async_trait;
use browserflow_graph::WorkflowAttachment;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::config::ServiceConfig;
use crate::constants::endpoints;
use crate::error::{Result, ServiceError};
use crate::schedule::ScheduleBody;
use crate::transport::WorkflowService;
use crate::types::{
    RunResponse, ScheduleResponse, StatusResponse, UploadResponse, WorkflowListResponse,
};

/// Execution service reached over HTTP
///
/// Timeouts are whatever the underlying reqwest client applies.
#[derive(Debug, Clone)]
pub struct HttpWorkflowService {
    /// HTTP client for API requests
    http_client: Client,
    /// Base URL of the service
    base_url: Url,
}

impl HttpWorkflowService {
    /// Create a client for the configured service
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        Self::with_client(Client::new(), config)
    }

    /// Create a client reusing an existing reqwest client
    pub fn with_client(http_client: Client, config: &ServiceConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ServiceError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ServiceError::InvalidUrl(config.base_url.clone()));
        }

        log::debug!("Execution service client for {}", base_url);
        Ok(Self {
            http_client,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build an endpoint URL from path segments
    ///
    /// Segments are percent-encoded, so workflow names may contain spaces
    /// or slashes.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ServiceError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Check the status and decode the JSON body
    async fn decode<T: DeserializeOwned>(endpoint: &str, response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::status(endpoint, status.as_u16()));
        }
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl WorkflowService for HttpWorkflowService {
    async fn upload(&self, attachment: WorkflowAttachment) -> Result<UploadResponse> {
        let url = self.endpoint(&[endpoints::UPLOAD])?;
        let part = reqwest::multipart::Part::bytes(attachment.bytes)
            .file_name(attachment.file_name)
            .mime_str(attachment.content_type)?;
        let form = reqwest::multipart::Form::new().part(endpoints::UPLOAD_FIELD, part);

        let response = self.http_client.post(url).multipart(form).send().await?;
        Self::decode(endpoints::UPLOAD, response).await
    }

    async fn run(&self, workflow: &str) -> Result<RunResponse> {
        let url = self.endpoint(&[endpoints::RUN, workflow])?;
        let response = self.http_client.post(url).send().await?;
        Self::decode(endpoints::RUN, response).await
    }

    async fn schedule(&self, body: &ScheduleBody) -> Result<ScheduleResponse> {
        let url = self.endpoint(&[endpoints::SCHEDULE])?;
        let response = self.http_client.post(url).json(body).send().await?;
        Self::decode(endpoints::SCHEDULE, response).await
    }

    async fn list_workflows(&self) -> Result<WorkflowListResponse> {
        let url = self.endpoint(&[endpoints::WORKFLOWS])?;
        let response = self.http_client.get(url).send().await?;
        Self::decode(endpoints::WORKFLOWS, response).await
    }

    async fn status(&self, workflow: &str) -> Result<StatusResponse> {
        let url = self.endpoint(&[endpoints::STATUS, workflow])?;
        let response = self.http_client.get(url).send().await?;
        Self::decode(endpoints::STATUS, response).await
    }
}
