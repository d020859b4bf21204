//! Upload operations and the capability set built from configuration
//!
//! Each operation is its own trait so an uploader can implement either one or
//! both. `UploaderCapabilities` holds an optional handle per operation; callers
//! branch on presence instead of calling something that fails internally.

use async_trait::async_trait;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use crate::error::Result;
use crate::models::{ImageFile, ImageReference, UploadResult};

/// Upload a binary image
#[async_trait]
pub trait UploadByFile: Send + Sync {
    async fn upload_by_file(&self, file: ImageFile) -> Result<UploadResult>;
}

/// Ask the server to fetch an image by URL
#[async_trait]
pub trait UploadByUrl: Send + Sync {
    async fn upload_by_url(&self, url: &str) -> Result<UploadResult>;
}

/// Upload call bound to one image reference, ready to be awaited once
pub type UploadJob = BoxFuture<'static, Result<UploadResult>>;

/// Upload operations available to a tool instance.
///
/// Built once per instance and never changed afterwards.
#[derive(Clone, Default)]
pub struct UploaderCapabilities {
    by_file: Option<Arc<dyn UploadByFile>>,
    by_url: Option<Arc<dyn UploadByUrl>>,
}

impl UploaderCapabilities {
    /// No upload operation at all
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_by_file(mut self, uploader: Arc<dyn UploadByFile>) -> Self {
        self.by_file = Some(uploader);
        self
    }

    pub fn with_by_url(mut self, uploader: Arc<dyn UploadByUrl>) -> Self {
        self.by_url = Some(uploader);
        self
    }

    pub fn by_file(&self) -> Option<&Arc<dyn UploadByFile>> {
        self.by_file.as_ref()
    }

    pub fn by_url(&self) -> Option<&Arc<dyn UploadByUrl>> {
        self.by_url.as_ref()
    }

    pub fn supports(&self, reference: &ImageReference) -> bool {
        match reference {
            ImageReference::File(_) => self.by_file.is_some(),
            ImageReference::Url(_) => self.by_url.is_some(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.by_file.is_none() && self.by_url.is_none()
    }

    /// Bind the matching operation to `reference`.
    ///
    /// Returns `None` when the operation for this kind of reference is absent.
    pub fn bind(&self, reference: ImageReference) -> Option<UploadJob> {
        match reference {
            ImageReference::File(file) => {
                let uploader = Arc::clone(self.by_file.as_ref()?);
                Some(async move { uploader.upload_by_file(file).await }.boxed())
            }
            ImageReference::Url(url) => {
                let uploader = Arc::clone(self.by_url.as_ref()?);
                Some(async move { uploader.upload_by_url(&url).await }.boxed())
            }
        }
    }
}

impl Debug for UploaderCapabilities {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("UploaderCapabilities")
            .field("by_file", &self.by_file.is_some())
            .field("by_url", &self.by_url.is_some())
            .finish()
    }
}
