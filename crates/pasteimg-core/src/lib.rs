//! Pasteimg Core Library
//!
//! Data contracts, configuration, error types and host traits shared by the
//! paste-image block tool and its uploaders.

pub mod config;
pub mod error;
pub mod host;
pub mod models;
pub mod uploader;

// Re-export commonly used types
pub use config::{Endpoints, Features, ToolAction, ToolConfig};
pub use error::{LogLevel, PasteError, Result};
pub use host::{BlockApi, BlockHandle, NoOpBlockApi, ViewNode};
pub use models::{BlockData, BlockFile, ImageFile, ImageReference, UploadResult, UploadedFile};
pub use uploader::{UploadByFile, UploadByUrl, UploadJob, UploaderCapabilities};
