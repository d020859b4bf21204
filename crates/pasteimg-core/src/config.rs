//! Configuration module
//!
//! `ToolConfig` is the immutable snapshot a tool instance is constructed with.
//! It deserializes from the camelCase JSON shape editors pass to block tools
//! and can be overridden from the environment.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::path::Path;

use crate::error::{PasteError, Result};
use crate::uploader::UploaderCapabilities;

pub const DEFAULT_FIELD_NAME: &str = "image";
pub const DEFAULT_URL_FIELD_NAME: &str = "url";
pub const DEFAULT_TYPES: &str = "image/*";
pub const DEFAULT_PLACEHOLDER: &str = "Paste  image here...";

/// Upload endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoints {
    /// Multipart file upload endpoint
    pub by_file: Option<String>,
    /// Upload-by-URL endpoint (server fetches the image)
    pub by_url: Option<String>,
}

impl Endpoints {
    pub fn is_empty(&self) -> bool {
        non_empty(&self.by_file).is_none() && non_empty(&self.by_url).is_none()
    }
}

/// Settings menu action. Parsed for compatibility, not rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolAction {
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub title: String,
}

/// Optional block features. Parsed for compatibility, not rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Features {
    pub border: Option<bool>,
    pub background: Option<bool>,
    pub caption: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolConfig {
    pub toolbox_title: Option<String>,
    pub placeholder: Option<String>,
    #[serde(default)]
    pub endpoints: Endpoints,
    /// Multipart field carrying the file (default: "image")
    pub field: Option<String>,
    /// Accepted MIME patterns for pasted files, comma separated (default: "image/*")
    pub types: Option<String>,
    /// Extra fields sent with every upload request
    #[serde(default)]
    pub additional_request_data: serde_json::Map<String, serde_json::Value>,
    /// Extra headers sent with every upload request
    #[serde(default)]
    pub additional_request_headers: BTreeMap<String, String>,
    pub caption_placeholder: Option<String>,
    pub button_content: Option<String>,
    #[serde(default)]
    pub actions: Vec<ToolAction>,
    #[serde(default)]
    pub features: Features,
    pub max_size_bytes: Option<u64>,
    /// Custom upload operations, used when no endpoint is configured
    #[serde(skip)]
    pub uploader: Option<UploaderCapabilities>,
}

impl ToolConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            PasteError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&contents)
    }

    /// Apply PASTEIMG_* environment variables on top of the loaded values.
    pub fn apply_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("PASTEIMG_BY_FILE_ENDPOINT") {
            self.endpoints.by_file = Some(v);
        }
        if let Ok(v) = env::var("PASTEIMG_BY_URL_ENDPOINT") {
            self.endpoints.by_url = Some(v);
        }
        if let Ok(v) = env::var("PASTEIMG_FIELD") {
            self.field = Some(v);
        }
        if let Ok(v) = env::var("PASTEIMG_TOOLBOX_TITLE") {
            self.toolbox_title = Some(v);
        }
        self
    }

    pub fn with_uploader(mut self, uploader: UploaderCapabilities) -> Self {
        self.uploader = Some(uploader);
        self
    }

    pub fn by_file_endpoint(&self) -> Option<&str> {
        non_empty(&self.endpoints.by_file)
    }

    pub fn by_url_endpoint(&self) -> Option<&str> {
        non_empty(&self.endpoints.by_url)
    }

    pub fn field_name(&self) -> &str {
        non_empty(&self.field).unwrap_or(DEFAULT_FIELD_NAME)
    }

    pub fn placeholder(&self) -> &str {
        non_empty(&self.placeholder).unwrap_or(DEFAULT_PLACEHOLDER)
    }

    pub fn types(&self) -> &str {
        non_empty(&self.types).unwrap_or(DEFAULT_TYPES)
    }

    /// Whether a pasted file of `mime_type` matches the configured `types`.
    pub fn accepts_mime(&self, mime_type: &str) -> bool {
        let mime_type = mime_type.trim().to_ascii_lowercase();
        self.types()
            .split(',')
            .map(|pattern| pattern.trim().to_ascii_lowercase())
            .filter(|pattern| !pattern.is_empty())
            .any(|pattern| {
                if pattern == "*" || pattern == "*/*" {
                    return true;
                }
                match pattern.strip_suffix("/*") {
                    Some(prefix) => mime_type
                        .split_once('/')
                        .is_some_and(|(kind, _)| kind == prefix),
                    None => pattern == mime_type,
                }
            })
    }

    /// Whether a pasted file of `size` bytes is within `maxSizeBytes`.
    pub fn accepts_size(&self, size: u64) -> bool {
        self.max_size_bytes.map_or(true, |max| size <= max)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parses_camel_case_config() {
        let config = ToolConfig::from_json_str(
            r#"{
                "toolboxTitle": "Paste Doc Image",
                "endpoints": { "byFile": "http://localhost:3002/upload" },
                "additionalRequestHeaders": { "Authorization": "Bearer abc" },
                "additionalRequestData": { "folder": "kb", "meta": { "a": 1 } },
                "features": { "caption": false },
                "actions": [{ "name": "stretch" }],
                "maxSizeBytes": 1024
            }"#,
        )
        .unwrap();

        assert_eq!(config.toolbox_title.as_deref(), Some("Paste Doc Image"));
        assert_eq!(config.by_file_endpoint(), Some("http://localhost:3002/upload"));
        assert_eq!(config.by_url_endpoint(), None);
        assert_eq!(
            config.additional_request_headers.get("Authorization").map(String::as_str),
            Some("Bearer abc")
        );
        assert_eq!(config.additional_request_data.len(), 2);
        assert_eq!(config.features.caption, Some(false));
        assert_eq!(config.actions[0].name, "stretch");
        assert_eq!(config.max_size_bytes, Some(1024));
        assert!(config.uploader.is_none());
    }

    #[test]
    fn test_defaults() {
        let config = ToolConfig::default();
        assert_eq!(config.field_name(), "image");
        assert_eq!(config.types(), "image/*");
        assert_eq!(config.placeholder(), DEFAULT_PLACEHOLDER);
        assert!(config.endpoints.is_empty());
    }

    #[test]
    fn test_blank_endpoint_counts_as_missing() {
        let config = ToolConfig {
            endpoints: Endpoints {
                by_file: Some("  ".to_string()),
                by_url: None,
            },
            ..Default::default()
        };
        assert!(config.endpoints.is_empty());
        assert_eq!(config.by_file_endpoint(), None);
    }

    #[test]
    fn test_accepts_mime_wildcard_and_exact() {
        let config = ToolConfig::default();
        assert!(config.accepts_mime("image/png"));
        assert!(config.accepts_mime("IMAGE/JPEG"));
        assert!(!config.accepts_mime("text/plain"));

        let config = ToolConfig {
            types: Some("image/png, image/webp".to_string()),
            ..Default::default()
        };
        assert!(config.accepts_mime("image/png"));
        assert!(config.accepts_mime("image/webp"));
        assert!(!config.accepts_mime("image/gif"));

        let config = ToolConfig {
            types: Some("*/*".to_string()),
            ..Default::default()
        };
        assert!(config.accepts_mime("application/octet-stream"));
    }

    #[test]
    fn test_accepts_size() {
        let config = ToolConfig {
            max_size_bytes: Some(10),
            ..Default::default()
        };
        assert!(config.accepts_size(10));
        assert!(!config.accepts_size(11));
        assert!(ToolConfig::default().accepts_size(u64::MAX));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"endpoints": {{"byUrl": "https://api.test/fetch"}}}}"#).unwrap();
        let config = ToolConfig::from_file(file.path()).unwrap();
        assert_eq!(config.by_url_endpoint(), Some("https://api.test/fetch"));
    }

    #[test]
    fn test_from_missing_file_is_config_error() {
        let err = ToolConfig::from_file("/nonexistent/pasteimg.json").unwrap_err();
        assert!(matches!(err, PasteError::Config(_)));
    }
}
