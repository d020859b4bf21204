//! Upload strategy selection
//!
//! Decided once per tool instance, in priority order: configured endpoints,
//! then a custom uploader from the configuration, then no upload at all.

use pasteimg_core::{Result, ToolConfig, UploaderCapabilities};
use std::sync::Arc;

use crate::{EndpointUploader, EndpointUploaderConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStrategy {
    /// Upload through `endpoints.byFile` / `endpoints.byUrl`
    Endpoint,
    /// Upload through the configured custom uploader
    Custom,
    /// Pastes are resolved but never uploaded
    Disabled,
}

impl UploadStrategy {
    pub fn for_config(config: &ToolConfig) -> Self {
        if config.by_file_endpoint().is_some() || config.by_url_endpoint().is_some() {
            UploadStrategy::Endpoint
        } else if config.uploader.is_some() {
            UploadStrategy::Custom
        } else {
            UploadStrategy::Disabled
        }
    }
}

/// Build the capability set for `config`.
///
/// In endpoint mode each operation is exposed only when its own endpoint is
/// configured.
pub fn build_capabilities(config: &ToolConfig) -> Result<UploaderCapabilities> {
    let strategy = UploadStrategy::for_config(config);
    let capabilities = match strategy {
        UploadStrategy::Endpoint => {
            let uploader = Arc::new(EndpointUploader::new(
                EndpointUploaderConfig::from_tool_config(config),
            )?);
            let mut capabilities = UploaderCapabilities::none();
            if config.by_file_endpoint().is_some() {
                capabilities = capabilities.with_by_file(uploader.clone());
            }
            if config.by_url_endpoint().is_some() {
                capabilities = capabilities.with_by_url(uploader);
            }
            capabilities
        }
        UploadStrategy::Custom => config.uploader.clone().unwrap_or_default(),
        UploadStrategy::Disabled => UploaderCapabilities::none(),
    };

    tracing::debug!(
        strategy = ?strategy,
        capabilities = ?capabilities,
        "Upload capabilities built"
    );

    Ok(capabilities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pasteimg_core::{Endpoints, ImageFile, UploadByFile, UploadResult};

    struct CustomFileUploader;

    #[async_trait]
    impl UploadByFile for CustomFileUploader {
        async fn upload_by_file(&self, _file: ImageFile) -> Result<UploadResult> {
            Ok(UploadResult::uploaded("https://custom/file.png"))
        }
    }

    fn with_endpoints(by_file: Option<&str>, by_url: Option<&str>) -> ToolConfig {
        ToolConfig {
            endpoints: Endpoints {
                by_file: by_file.map(String::from),
                by_url: by_url.map(String::from),
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_file_endpoint_only() {
        let caps = build_capabilities(&with_endpoints(Some("http://localhost/f"), None)).unwrap();
        assert!(caps.by_file().is_some());
        assert!(caps.by_url().is_none());
    }

    #[test]
    fn test_url_endpoint_only() {
        let caps = build_capabilities(&with_endpoints(None, Some("http://localhost/u"))).unwrap();
        assert!(caps.by_file().is_none());
        assert!(caps.by_url().is_some());
    }

    #[test]
    fn test_both_endpoints() {
        let caps = build_capabilities(&with_endpoints(
            Some("http://localhost/f"),
            Some("http://localhost/u"),
        ))
        .unwrap();
        assert!(caps.by_file().is_some());
        assert!(caps.by_url().is_some());
    }

    #[test]
    fn test_endpoints_take_priority_over_custom_uploader() {
        let custom = UploaderCapabilities::none().with_by_file(Arc::new(CustomFileUploader));
        let config = with_endpoints(None, Some("http://localhost/u")).with_uploader(custom);

        assert_eq!(UploadStrategy::for_config(&config), UploadStrategy::Endpoint);
        let caps = build_capabilities(&config).unwrap();
        assert!(caps.by_file().is_none());
        assert!(caps.by_url().is_some());
    }

    #[tokio::test]
    async fn test_custom_uploader_used_verbatim() {
        let custom = UploaderCapabilities::none().with_by_file(Arc::new(CustomFileUploader));
        let config = ToolConfig::default().with_uploader(custom);

        assert_eq!(UploadStrategy::for_config(&config), UploadStrategy::Custom);
        let caps = build_capabilities(&config).unwrap();
        assert!(caps.by_url().is_none());
        let result = caps
            .by_file()
            .unwrap()
            .upload_by_file(ImageFile::pasted("image/png", Default::default()))
            .await
            .unwrap();
        assert_eq!(result.url(), Some("https://custom/file.png"));
    }

    #[test]
    fn test_no_configuration_disables_upload() {
        let config = ToolConfig::default();
        assert_eq!(UploadStrategy::for_config(&config), UploadStrategy::Disabled);
        assert!(build_capabilities(&config).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_header_fails_construction() {
        let mut config = with_endpoints(Some("http://localhost/f"), None);
        config
            .additional_request_headers
            .insert("bad header".to_string(), "x".to_string());
        assert!(build_capabilities(&config).is_err());
    }
}
