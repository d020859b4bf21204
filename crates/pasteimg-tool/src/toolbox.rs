//! Toolbox metadata and the editor-wide default title
//!
//! The title is shared by every tool instance in the process: it is set
//! explicitly (or by the first instance configured with `toolboxTitle`) and
//! read whenever the host asks for toolbox metadata.

use serde::Serialize;
use std::sync::{LazyLock, RwLock};

pub const DEFAULT_TOOLBOX_TITLE: &str = "Paste Image";

static DEFAULT_TITLE: LazyLock<RwLock<String>> =
    LazyLock::new(|| RwLock::new(DEFAULT_TOOLBOX_TITLE.to_string()));

/// Clipboard with a downward arrow
pub const TOOL_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="64" height="64" viewBox="0 0 64 64" role="img" aria-labelledby="titleDesc">
  <title id="titleDesc">Paste icon</title>
  <desc>Clipboard with a paper and a downward arrow representing paste action</desc>
  <rect x="12" y="10" width="40" height="44" rx="4" ry="4" fill="none" stroke="currentColor" stroke-width="2.8"/>
  <rect x="22" y="4" width="20" height="8" rx="2" ry="2" fill="currentColor" />
  <rect x="18" y="16" width="28" height="26" rx="2" ry="2" fill="none" stroke="currentColor" stroke-width="1.8"/>
  <path d="M 40 16 L 40 24 L 48 24" fill="none" stroke="currentColor" stroke-width="1.6" stroke-linecap="round"/>
  <line x1="32" y1="44" x2="32" y2="30" stroke="currentColor" stroke-width="2.8" stroke-linecap="round"/>
  <polyline points="26,36 32,44 38,36" fill="none" stroke="currentColor" stroke-width="2.8" stroke-linejoin="round" stroke-linecap="round"/>
  <line x1="22" y1="24" x2="36" y2="24" stroke="currentColor" stroke-width="1.2" stroke-linecap="round" opacity="0.9"/>
  <line x1="22" y1="28" x2="42" y2="28" stroke="currentColor" stroke-width="1.2" stroke-linecap="round" opacity="0.7"/>
</svg>
"#;

/// Toolbox entry shown by the host editor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toolbox {
    pub title: String,
    pub icon: &'static str,
}

/// Set the toolbox title used by all instances from now on.
pub fn set_default_title(title: impl Into<String>) {
    let title = title.into();
    tracing::debug!(title = %title, "Toolbox title updated");
    let mut guard = DEFAULT_TITLE.write().unwrap_or_else(|e| e.into_inner());
    *guard = title;
}

pub fn default_title() -> String {
    DEFAULT_TITLE
        .read()
        .unwrap_or_else(|e| e.into_inner())
        .clone()
}

pub fn toolbox() -> Toolbox {
    Toolbox {
        title: default_title(),
        icon: TOOL_ICON,
    }
}
