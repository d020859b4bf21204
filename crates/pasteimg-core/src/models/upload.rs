use bytes::Bytes;
use serde::{Serialize, Serializer};

/// File name used for images decoded out of pasted content
pub const PASTED_IMAGE_NAME: &str = "pasted-image";

/// Binary image taken from the clipboard or decoded from a data URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    /// File name sent in the multipart part (e.g. "pasted-image.png")
    pub name: String,
    /// Declared MIME type (e.g. "image/png")
    pub mime_type: String,
    /// Raw file contents
    pub bytes: Bytes,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Bytes) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Build a file named `pasted-image.<subtype>` from its MIME type.
    pub fn pasted(mime_type: &str, bytes: Bytes) -> Self {
        let extension = mime_type
            .split('/')
            .nth(1)
            .filter(|subtype| !subtype.is_empty())
            .unwrap_or("png");
        Self::new(
            format!("{}.{}", PASTED_IMAGE_NAME, extension),
            mime_type,
            bytes,
        )
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Image reference extracted from a paste event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageReference {
    /// Binary image to upload as multipart
    File(ImageFile),
    /// Remote image the server should fetch
    Url(String),
}

impl ImageReference {
    pub fn kind(&self) -> &'static str {
        match self {
            ImageReference::File(_) => "file",
            ImageReference::Url(_) => "url",
        }
    }
}

/// Hosted file returned by a successful upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadedFile {
    pub url: String,
}

/// Outcome of a single upload attempt.
///
/// `file` is present exactly when `success` is set, `error` exactly when it
/// is not. Fields are private so the pair cannot drift apart; build results
/// through [`UploadResult::uploaded`] and [`UploadResult::failed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadResult {
    #[serde(serialize_with = "serialize_flag")]
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<UploadedFile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn serialize_flag<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(u8::from(*value))
}

impl UploadResult {
    /// Successful upload. An empty URL is not a success and becomes a failure.
    pub fn uploaded(url: impl Into<String>) -> Self {
        let url = url.into();
        if url.is_empty() {
            return Self::failed("Invalid response format: missing url field");
        }
        Self {
            success: true,
            file: Some(UploadedFile { url }),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            file: None,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// 1 when the upload succeeded, 0 otherwise
    pub fn success_flag(&self) -> u8 {
        u8::from(self.success)
    }

    pub fn url(&self) -> Option<&str> {
        self.file.as_ref().map(|f| f.url.as_str())
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
