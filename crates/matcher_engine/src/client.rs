use std::time::Duration;

use futures_util::StreamExt;
use matcher_logging::{matcher_debug, matcher_info};
use reqwest::multipart::{Form, Part};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{
    BackendError, BooleanRequest, BooleanResponse, ExtractResponse, FailureKind, PointersRequest,
    PointersResponse, Upload,
};

const EXTRACT_JD: &str = "extract-jd";
const EXTRACT_JD_TEXT: &str = "extract-jd-text";
const GENERATE_BOOLEAN: &str = "generate-boolean";
const GENERATE_POINTERS: &str = "generate-pointers";

#[derive(Debug, Clone)]
pub struct BackendSettings {
    /// Root the four endpoints are resolved against.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_response_bytes: u64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
            max_response_bytes: 8 * 1024 * 1024,
        }
    }
}

/// The four analysis endpoints. No local fallback: every failure is returned.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    async fn extract_jd_file(&self, file: &Upload) -> Result<ExtractResponse, BackendError>;

    async fn extract_jd_text(&self, text: &str) -> Result<ExtractResponse, BackendError>;

    async fn generate_boolean(
        &self,
        request: &BooleanRequest,
    ) -> Result<BooleanResponse, BackendError>;

    async fn generate_pointers(
        &self,
        request: &PointersRequest,
    ) -> Result<PointersResponse, BackendError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    client: reqwest::Client,
    base_url: Url,
    max_response_bytes: u64,
}

#[derive(Serialize)]
struct ExtractTextBody<'a> {
    text: &'a str,
}

impl ReqwestBackend {
    pub fn new(settings: BackendSettings) -> Result<Self, BackendError> {
        let base_url = parse_base_url(&settings.base_url)?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| BackendError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            client,
            base_url,
            max_response_bytes: settings.max_response_bytes,
        })
    }

    pub fn endpoint(&self, name: &str) -> Result<Url, BackendError> {
        self.base_url
            .join(name)
            .map_err(|err| BackendError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        name: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, BackendError> {
        let response = request.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.max_response_bytes {
                return Err(too_large(self.max_response_bytes, content_len));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > self.max_response_bytes {
                return Err(too_large(self.max_response_bytes, next_len));
            }
            body.extend_from_slice(&chunk);
        }
        matcher_debug!("{} returned {} bytes", name, body.len());

        serde_json::from_slice(&body)
            .map_err(|err| BackendError::new(FailureKind::MalformedResponse, err.to_string()))
    }
}

#[async_trait::async_trait]
impl Backend for ReqwestBackend {
    async fn extract_jd_file(&self, file: &Upload) -> Result<ExtractResponse, BackendError> {
        let url = self.endpoint(EXTRACT_JD)?;
        matcher_info!("POST {} file={} len={}", url, file.file_name, file.bytes.len());
        let form = Form::new().part("file", file_part(file)?);
        self.send(EXTRACT_JD, self.client.post(url).multipart(form))
            .await
    }

    async fn extract_jd_text(&self, text: &str) -> Result<ExtractResponse, BackendError> {
        let url = self.endpoint(EXTRACT_JD_TEXT)?;
        matcher_info!("POST {} text_len={}", url, text.len());
        self.send(
            EXTRACT_JD_TEXT,
            self.client.post(url).json(&ExtractTextBody { text }),
        )
        .await
    }

    async fn generate_boolean(
        &self,
        request: &BooleanRequest,
    ) -> Result<BooleanResponse, BackendError> {
        let url = self.endpoint(GENERATE_BOOLEAN)?;
        matcher_info!(
            "POST {} groups={} exclude={}",
            url,
            request.groups.len(),
            request.exclude.len()
        );
        self.send(GENERATE_BOOLEAN, self.client.post(url).json(request))
            .await
    }

    async fn generate_pointers(
        &self,
        request: &PointersRequest,
    ) -> Result<PointersResponse, BackendError> {
        let url = self.endpoint(GENERATE_POINTERS)?;
        matcher_info!(
            "POST {} resume={} target_match={} jd_text_len={}",
            url,
            request.resume.file_name,
            request.target_match,
            request.jd_text.len()
        );
        let form = Form::new()
            .part("resume", file_part(&request.resume)?)
            .text("target_match", request.target_match.to_string())
            .text("jd_text", request.jd_text.clone());
        self.send(GENERATE_POINTERS, self.client.post(url).multipart(form))
            .await
    }
}

/// Parse the base URL and make sure endpoint names are appended to its path
/// rather than replacing its last segment.
fn parse_base_url(raw: &str) -> Result<Url, BackendError> {
    let mut url = Url::parse(raw.trim())
        .map_err(|err| BackendError::new(FailureKind::InvalidUrl, err.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(BackendError::new(
            FailureKind::InvalidUrl,
            format!("{raw} cannot be used as a base url"),
        ));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn file_part(file: &Upload) -> Result<Part, BackendError> {
    Part::bytes(file.bytes.clone())
        .file_name(file.file_name.clone())
        .mime_str(&file.mime)
        .map_err(|err| BackendError::new(FailureKind::InvalidRequest, err.to_string()))
}

fn too_large(max_bytes: u64, actual: u64) -> BackendError {
    BackendError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> BackendError {
    if err.is_timeout() {
        return BackendError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return BackendError::new(FailureKind::MalformedResponse, err.to_string());
    }
    BackendError::new(FailureKind::Network, err.to_string())
}
