//! Clipboard content resolution
//!
//! Turns a paste event into at most one image reference, trying in order:
//! a binary `image/*` item, the first `<img>` in the HTML representation,
//! then a plain-text image URL.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use bytes::Bytes;
use pasteimg_core::{ImageFile, ImageReference, PasteError, Result};
use percent_encoding::percent_decode_str;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

pub const HTML_MIME: &str = "text/html";
pub const TEXT_MIME: &str = "text/plain";
const DEFAULT_DATA_URL_MIME: &str = "image/png";

/// Standard alphabet, `=` padding optional as browsers accept it
const DATA_URL_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

static IMG_SRC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<img[^>]+src=["']([^"']+)["']"#).expect("img src pattern compiles")
});

static GOOGLE_DOCS_SIZE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"=s\d+$").expect("size suffix pattern compiles"));

static IMAGE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i:https?)://\S+\.(?i:gif|jpe?g|tiff|png|svg|webp)(\?[a-z0-9=]*)?$")
        .expect("image url pattern compiles")
});

/// Whether a clipboard item carries a file or a string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    File,
    String,
}

/// One entry of the clipboard's item list
#[derive(Debug, Clone)]
pub struct ClipboardItem {
    pub kind: ItemKind,
    pub mime_type: String,
    pub name: Option<String>,
    pub data: Bytes,
}

impl ClipboardItem {
    pub fn file(mime_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            kind: ItemKind::File,
            mime_type: mime_type.into(),
            name: None,
            data: data.into(),
        }
    }

    pub fn string(mime_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: ItemKind::String,
            mime_type: mime_type.into(),
            name: None,
            data: Bytes::from(value.into()),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The item as a file, `None` for string items
    pub fn as_file(&self) -> Option<ImageFile> {
        if self.kind != ItemKind::File {
            return None;
        }
        Some(match &self.name {
            Some(name) => ImageFile::new(name.clone(), self.mime_type.clone(), self.data.clone()),
            None => ImageFile::pasted(&self.mime_type, self.data.clone()),
        })
    }
}

/// Representations available on the clipboard for one paste
#[derive(Debug, Clone, Default)]
pub struct ClipboardData {
    items: Vec<ClipboardItem>,
    representations: BTreeMap<String, String>,
}

impl ClipboardData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(mut self, item: ClipboardItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn with_data(mut self, mime_type: impl Into<String>, value: impl Into<String>) -> Self {
        self.representations.insert(mime_type.into(), value.into());
        self
    }

    pub fn with_html(self, html: impl Into<String>) -> Self {
        self.with_data(HTML_MIME, html)
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_data(TEXT_MIME, text)
    }

    pub fn items(&self) -> &[ClipboardItem] {
        &self.items
    }

    pub fn get_data(&self, mime_type: &str) -> Option<&str> {
        self.representations
            .get(mime_type)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

/// Paste event as delivered by the host, with its default-action flags
#[derive(Debug, Clone, Default)]
pub struct PasteEvent {
    clipboard_data: Option<ClipboardData>,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl PasteEvent {
    pub fn new(clipboard_data: ClipboardData) -> Self {
        Self {
            clipboard_data: Some(clipboard_data),
            ..Default::default()
        }
    }

    /// Event without clipboard data
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn clipboard_data(&self) -> Option<&ClipboardData> {
        self.clipboard_data.as_ref()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Extract at most one image reference from the clipboard.
pub fn resolve(data: &ClipboardData) -> Option<ImageReference> {
    let image_item = data
        .items()
        .iter()
        .find(|item| item.mime_type.starts_with("image/"));
    if let Some(file) = image_item.and_then(ClipboardItem::as_file) {
        return Some(ImageReference::File(file));
    }

    if let Some(src) = data.get_data(HTML_MIME).and_then(extract_image_url_from_html) {
        if is_data_url(&src) {
            return match data_url_to_file(&src) {
                Ok(file) => Some(ImageReference::File(file)),
                Err(e) => {
                    e.log("Ignoring pasted data url");
                    None
                }
            };
        }
        return Some(ImageReference::Url(src));
    }

    let text = data.get_data(TEXT_MIME)?.trim();
    if is_image_url(text) {
        return Some(ImageReference::Url(text.to_string()));
    }

    None
}

/// `src` of the first `<img>` tag. Normal URLs lose a trailing Google Docs
/// size suffix (`=s500`).
pub fn extract_image_url_from_html(html: &str) -> Option<String> {
    let src = IMG_SRC.captures(html)?.get(1)?.as_str().trim();
    let src = if is_data_url(src) {
        src
    } else {
        strip_google_docs_size_suffix(src)
    };
    Some(src.to_string()).filter(|s| !s.is_empty())
}

pub fn strip_google_docs_size_suffix(url: &str) -> &str {
    match GOOGLE_DOCS_SIZE_SUFFIX.find(url) {
        Some(m) => &url[..m.start()],
        None => url,
    }
}

/// Plain-text image URL: http(s), image extension, optional `?[a-z0-9=]*` query.
pub fn is_image_url(text: &str) -> bool {
    IMAGE_URL.is_match(text)
}

pub fn is_data_url(src: &str) -> bool {
    src.get(..5)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("data:"))
}

/// Decode a `data:` URL into a file named `pasted-image.<subtype>`.
///
/// The MIME type defaults to `image/png` when the URL declares none. Both
/// base64 and percent-encoded payloads are accepted.
pub fn data_url_to_file(data_url: &str) -> Result<ImageFile> {
    let rest = data_url
        .get(5..)
        .filter(|_| is_data_url(data_url))
        .ok_or_else(|| PasteError::Decode("not a data url".to_string()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| PasteError::Decode("data url has no payload".to_string()))?;

    let mut params = header.split(';');
    let mime_type = params
        .next()
        .map(str::trim)
        .filter(|mime| !mime.is_empty())
        .unwrap_or(DEFAULT_DATA_URL_MIME)
        .to_ascii_lowercase();
    let is_base64 = params.any(|param| param.trim().eq_ignore_ascii_case("base64"));

    let bytes = if is_base64 {
        let cleaned: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
        DATA_URL_BASE64
            .decode(cleaned)
            .map_err(|e| PasteError::Decode(format!("Base64 decode failed: {}", e)))?
    } else {
        percent_decode_str(payload).collect::<Vec<u8>>()
    };

    Ok(ImageFile::pasted(&mime_type, Bytes::from(bytes)))
}
