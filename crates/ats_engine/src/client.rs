use async_trait::async_trait;
use ats_logging::{ats_info, ats_warn};
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;

use crate::types::ErrorBody;
use crate::{AnalysisError, AnalysisReport, AnalysisRequest, GENERIC_SERVICE_ERROR};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub base_url: String,
    pub analyze_path: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            analyze_path: "/analyze".to_string(),
        }
    }
}

impl ClientSettings {
    pub fn endpoint(&self) -> Result<reqwest::Url, AnalysisError> {
        let joined = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.analyze_path.trim_start_matches('/')
        );
        reqwest::Url::parse(&joined)
            .map_err(|err| AnalysisError::InvalidEndpoint(format!("{joined}: {err}")))
    }
}

/// One network exchange per call. Implementations must not retry.
#[async_trait]
pub trait AnalysisClient: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisReport, AnalysisError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestAnalysisClient {
    settings: ClientSettings,
    http: reqwest::Client,
}

impl ReqwestAnalysisClient {
    /// No request timeout is configured; the transport decides when to give up.
    pub fn new(settings: ClientSettings) -> Result<Self, AnalysisError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|err| AnalysisError::Transport(err.to_string()))?;
        Ok(Self { settings, http })
    }

    fn build_form(request: &AnalysisRequest) -> Result<Form, AnalysisError> {
        let document = &request.document;
        let part = Part::bytes(document.contents.to_vec())
            .file_name(document.file_name.clone())
            .mime_str(&document.media_type)
            .map_err(|err| AnalysisError::Transport(err.to_string()))?;
        Ok(Form::new()
            .part("resume", part)
            .text("job_link", request.job_link.clone()))
    }
}

#[async_trait]
impl AnalysisClient for ReqwestAnalysisClient {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisReport, AnalysisError> {
        let endpoint = self.settings.endpoint()?;
        let form = Self::build_form(request)?;
        ats_info!(
            "POST {} request_id={} resume={} ({} bytes) job_link={}",
            endpoint,
            request.request_id,
            request.document.file_name,
            request.document.contents.len(),
            request.job_link
        );

        let response = self
            .http
            .post(endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|err| AnalysisError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.ok();
            let err = service_error(status, body.as_deref());
            ats_warn!("request_id={} failed: {}", request.request_id, err);
            return Err(err);
        }

        // A response arrived; losing its body is a malformed response.
        let body = response
            .bytes()
            .await
            .map_err(|err| AnalysisError::MalformedResponse(err.to_string()))?;
        serde_json::from_slice::<AnalysisReport>(&body)
            .map_err(|err| AnalysisError::MalformedResponse(err.to_string()))
    }
}

fn service_error(status: StatusCode, body: Option<&[u8]>) -> AnalysisError {
    let detail = body
        .and_then(|bytes| serde_json::from_slice::<ErrorBody>(bytes).ok())
        .map(|body| body.detail)
        .filter(|detail| !detail.is_empty());
    match detail {
        Some(detail) => AnalysisError::Service(detail),
        None => {
            ats_warn!("error response with status {} had no readable detail", status);
            AnalysisError::Service(GENERIC_SERVICE_ERROR.to_string())
        }
    }
}
