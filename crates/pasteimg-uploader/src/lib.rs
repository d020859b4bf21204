//! Uploaders for pasted images.
//!
//! Provides the endpoint-backed uploader (multipart file upload and JSON
//! upload-by-URL), the executor that normalizes server responses, and
//! `build_capabilities`, which picks the upload strategy for a tool instance.

pub mod executor;
pub mod provider;

use async_trait::async_trait;
use pasteimg_core::config::{DEFAULT_FIELD_NAME, DEFAULT_URL_FIELD_NAME};
use pasteimg_core::{
    ImageFile, PasteError, Result, ToolConfig, UploadByFile, UploadByUrl, UploadResult,
};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub use executor::{execute, extract_url, normalize_response};
pub use provider::{build_capabilities, UploadStrategy};

/// Settings for [`EndpointUploader`]
#[derive(Clone, Debug)]
pub struct EndpointUploaderConfig {
    pub by_file_endpoint: Option<String>,
    pub by_url_endpoint: Option<String>,
    pub headers: BTreeMap<String, String>,
    /// Multipart field carrying the file
    pub field_name: String,
    /// JSON field carrying the URL
    pub url_field_name: String,
    pub additional_request_data: Map<String, Value>,
}

impl Default for EndpointUploaderConfig {
    fn default() -> Self {
        Self {
            by_file_endpoint: None,
            by_url_endpoint: None,
            headers: BTreeMap::new(),
            field_name: DEFAULT_FIELD_NAME.to_string(),
            url_field_name: DEFAULT_URL_FIELD_NAME.to_string(),
            additional_request_data: Map::new(),
        }
    }
}

impl EndpointUploaderConfig {
    pub fn from_tool_config(config: &ToolConfig) -> Self {
        Self {
            by_file_endpoint: config.by_file_endpoint().map(String::from),
            by_url_endpoint: config.by_url_endpoint().map(String::from),
            headers: config.additional_request_headers.clone(),
            field_name: config.field_name().to_string(),
            url_field_name: DEFAULT_URL_FIELD_NAME.to_string(),
            additional_request_data: config.additional_request_data.clone(),
        }
    }
}

/// Uploads to configured HTTP endpoints.
#[derive(Clone, Debug)]
pub struct EndpointUploader {
    client: Client,
    by_file_endpoint: Option<String>,
    by_url_endpoint: Option<String>,
    headers: HeaderMap,
    field_name: String,
    url_field_name: String,
    additional_request_data: Map<String, Value>,
}

impl EndpointUploader {
    /// At least one of the two endpoints is required; header names and values
    /// are validated here so no request can be built from a broken config.
    pub fn new(config: EndpointUploaderConfig) -> Result<Self> {
        if config.by_file_endpoint.is_none() && config.by_url_endpoint.is_none() {
            return Err(PasteError::Config(
                "at least one endpoint (byFile or byUrl) is required".to_string(),
            ));
        }

        let mut headers = HeaderMap::new();
        for (name, value) in &config.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| PasteError::Config(format!("Invalid header name {}: {}", name, e)))?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                PasteError::Config(format!("Invalid value for header {}: {}", name, e))
            })?;
            headers.insert(name, value);
        }

        let client = Client::builder()
            .build()
            .map_err(|e| PasteError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            by_file_endpoint: config.by_file_endpoint,
            by_url_endpoint: config.by_url_endpoint,
            headers,
            field_name: config.field_name,
            url_field_name: config.url_field_name,
            additional_request_data: config.additional_request_data,
        })
    }

    pub fn by_file_endpoint(&self) -> Option<&str> {
        self.by_file_endpoint.as_deref()
    }

    pub fn by_url_endpoint(&self) -> Option<&str> {
        self.by_url_endpoint.as_deref()
    }

    /// Multipart body: the file under `field_name`, then every additional
    /// data entry as a text field. Strings are sent as-is, other values as
    /// JSON text, nulls are skipped.
    pub fn build_form(&self, file: ImageFile) -> Result<Form> {
        let part = Part::bytes(file.bytes.to_vec())
            .file_name(file.name)
            .mime_str(&file.mime_type)
            .map_err(|e| {
                PasteError::Decode(format!("Invalid file type {}: {}", file.mime_type, e))
            })?;

        let mut form = Form::new().part(self.field_name.clone(), part);
        for (key, value) in &self.additional_request_data {
            let text = match value {
                Value::Null => continue,
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            form = form.text(key.clone(), text);
        }
        Ok(form)
    }

    /// JSON body `{ <url_field_name>: url, ...additional_request_data }`.
    /// Additional data wins on key collision.
    pub fn build_url_body(&self, url: &str) -> Value {
        let mut body = Map::new();
        body.insert(self.url_field_name.clone(), Value::String(url.to_string()));
        body.extend(self.additional_request_data.clone());
        Value::Object(body)
    }

    /// `Content-Type: application/json` plus configured headers. A configured
    /// header with the same name replaces the default.
    pub fn json_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (name, value) in &self.headers {
            headers.insert(name.clone(), value.clone());
        }
        headers
    }

    /// Configured headers minus `Content-Type`, which reqwest sets with the
    /// multipart boundary.
    pub fn form_headers(&self) -> HeaderMap {
        let mut headers = self.headers.clone();
        if headers.remove(CONTENT_TYPE).is_some() {
            tracing::debug!("Configured Content-Type ignored for multipart upload");
        }
        headers
    }

    fn file_request(&self, endpoint: &str, file: ImageFile) -> Result<RequestBuilder> {
        let form = self.build_form(file)?;
        Ok(self
            .client
            .post(endpoint)
            .headers(self.form_headers())
            .multipart(form))
    }
}

#[async_trait]
impl UploadByFile for EndpointUploader {
    async fn upload_by_file(&self, file: ImageFile) -> Result<UploadResult> {
        let Some(endpoint) = self.by_file_endpoint.as_deref() else {
            return Ok(UploadResult::failed("File upload endpoint not configured"));
        };

        tracing::debug!(
            endpoint = %endpoint,
            file_name = %file.name,
            size = file.size(),
            "Uploading pasted file"
        );

        match self.file_request(endpoint, file) {
            Ok(request) => Ok(execute(request).await),
            Err(e) => Ok(UploadResult::failed(e.to_string())),
        }
    }
}

#[async_trait]
impl UploadByUrl for EndpointUploader {
    async fn upload_by_url(&self, url: &str) -> Result<UploadResult> {
        let Some(endpoint) = self.by_url_endpoint.as_deref() else {
            return Ok(UploadResult::failed("URL upload endpoint not configured"));
        };

        tracing::debug!(endpoint = %endpoint, url = %url, "Uploading pasted image url");

        let body = serde_json::to_vec(&self.build_url_body(url))
            .map_err(|e| PasteError::Protocol(format!("Failed to encode request body: {}", e)))?;

        let request = self
            .client
            .post(endpoint)
            .headers(self.json_headers())
            .body(body);

        Ok(execute(request).await)
    }
}
