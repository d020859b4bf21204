//! View model for the block
//!
//! The host turns a `ToolView` into real nodes; this module only decides what
//! is shown and which key presses the read-only paste input lets through.

use serde::Serialize;

pub const STATUS_LABEL: &str = "Uploading...";
pub const PASTE_ONLY_HINT: &str =
    "Only pasting is allowed. Use Ctrl+V or Cmd+V to paste an image.";
pub const PREVIEW_ALT: &str = "Image preview";

/// What the block renders
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ToolView {
    /// Hosted image already stored in the block
    Preview { url: String, alt: String },
    /// Read-only input accepting paste only
    PasteInput {
        placeholder: String,
        read_only: bool,
        hint: String,
    },
}

impl ToolView {
    pub fn preview(url: impl Into<String>) -> Self {
        ToolView::Preview {
            url: url.into(),
            alt: PREVIEW_ALT.to_string(),
        }
    }

    pub fn paste_input(placeholder: impl Into<String>) -> Self {
        ToolView::PasteInput {
            placeholder: placeholder.into(),
            read_only: true,
            hint: PASTE_ONLY_HINT.to_string(),
        }
    }
}

/// Key press on the paste input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyPress {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl KeyPress {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }
}

/// Ctrl+V, Cmd+V and Shift+Insert pass; everything else is suppressed.
pub fn is_paste_shortcut(press: &KeyPress) -> bool {
    let is_paste = (press.ctrl || press.meta) && press.key == "v";
    let is_shift_insert = press.shift && press.key == "Insert";
    is_paste || is_shift_insert
}

/// Value the input must hold after any input event: always empty.
pub fn sanitize_input(value: &str) -> &'static str {
    if !value.is_empty() {
        tracing::trace!("Clearing typed input from paste box");
    }
    ""
}
