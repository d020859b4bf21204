//! Console-backed host for driving the paste-image tool from a terminal.

use async_trait::async_trait;
use pasteimg_core::{BlockApi, BlockData, BlockHandle, Result, ViewNode};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Block API that keeps every update in memory and logs it
#[derive(Default)]
pub struct ConsoleBlockApi {
    updates: Mutex<Vec<BlockData>>,
}

impl ConsoleBlockApi {
    /// Most recent data written to the block, if any
    pub fn last_update(&self) -> Option<BlockData> {
        self.updates
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .cloned()
    }
}

#[async_trait]
impl BlockApi for ConsoleBlockApi {
    async fn update(&self, block_id: &str, data: BlockData) -> Result<()> {
        tracing::info!(block_id = %block_id, url = %data.file.url, "Block updated");
        self.updates
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(data);
        Ok(())
    }
}

/// Wrapper node that logs status indicator changes
#[derive(Default)]
pub struct ConsoleView {
    indicator: AtomicBool,
}

impl ConsoleView {
    pub fn has_indicator(&self) -> bool {
        self.indicator.load(Ordering::SeqCst)
    }
}

impl ViewNode for ConsoleView {
    fn is_attached(&self) -> bool {
        true
    }

    fn append_status_indicator(&self, label: &str) {
        self.indicator.store(true, Ordering::SeqCst);
        tracing::info!(label = %label, "Status shown");
    }

    fn remove_status_indicator(&self) {
        self.indicator.store(false, Ordering::SeqCst);
        tracing::info!("Status hidden");
    }
}

pub struct ConsoleBlock {
    id: String,
    wrapper: Arc<ConsoleView>,
}

impl ConsoleBlock {
    pub fn new(wrapper: Arc<ConsoleView>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            wrapper,
        }
    }
}

impl BlockHandle for ConsoleBlock {
    fn id(&self) -> &str {
        &self.id
    }

    fn closest_wrapper(&self) -> Option<Arc<dyn ViewNode>> {
        Some(self.wrapper.clone())
    }
}

/// Image MIME type from a file extension.
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "tif" | "tiff" => "image/tiff",
        "bmp" => "image/bmp",
        _ => return None,
    };
    Some(mime)
}

/// Parse a `KEY=VALUE` command-line pair.
pub fn parse_key_value(raw: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("invalid KEY=VALUE: no `=` found in `{}`", raw))?;
    if key.trim().is_empty() {
        return Err(format!("invalid KEY=VALUE: empty key in `{}`", raw));
    }
    Ok((key.trim().to_string(), value.to_string()))
}

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
