//! Block tool instance
//!
//! One `ImageTool` exists per block in the document. It is created by the
//! host with the block's persisted data and the tool configuration, and is
//! marked inert by `destroy` when the host tears the block down.

use pasteimg_core::{
    BlockApi, BlockData, BlockHandle, ImageReference, Result, ToolConfig, UploaderCapabilities,
    ViewNode,
};
use pasteimg_uploader::{build_capabilities, UploadStrategy};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::clipboard::{resolve, PasteEvent};
use crate::controller::{PasteOutcome, RejectReason};
use crate::toolbox::{self, Toolbox};
use crate::view::ToolView;

/// The tool renders in read-only editors too
pub const IS_READ_ONLY_SUPPORTED: bool = true;

/// Everything the host hands over when instantiating the tool for a block
#[derive(Clone)]
pub struct ToolContext {
    /// Block mutation API
    pub api: Arc<dyn BlockApi>,
    /// Handle to the block this instance belongs to
    pub block: Arc<dyn BlockHandle>,
    /// Persisted block data at construction time
    pub data: BlockData,
    pub config: ToolConfig,
}

pub struct ImageTool {
    pub(crate) api: Arc<dyn BlockApi>,
    pub(crate) block: Arc<dyn BlockHandle>,
    data: BlockData,
    pub(crate) config: ToolConfig,
    pub(crate) uploader: UploaderCapabilities,
    pub(crate) destroyed: AtomicBool,
    pub(crate) is_uploading: AtomicBool,
    pub(crate) wrapper: Mutex<Option<Arc<dyn ViewNode>>>,
}

impl ImageTool {
    /// Build the instance and its upload capabilities.
    ///
    /// Fails when the endpoint configuration is unusable (e.g. an invalid
    /// header); nothing can be uploaded from such a setup.
    pub fn new(context: ToolContext) -> Result<Self> {
        let ToolContext {
            api,
            block,
            data,
            config,
        } = context;

        if let Some(title) = config.toolbox_title.as_deref().filter(|t| !t.is_empty()) {
            toolbox::set_default_title(title);
        }

        let uploader = build_capabilities(&config)?;

        tracing::debug!(
            block_id = %block.id(),
            strategy = ?UploadStrategy::for_config(&config),
            has_image = data.image_url().is_some(),
            "Image tool created"
        );

        Ok(Self {
            api,
            block,
            data,
            config,
            uploader,
            destroyed: AtomicBool::new(false),
            is_uploading: AtomicBool::new(false),
            wrapper: Mutex::new(None),
        })
    }

    pub fn toolbox() -> Toolbox {
        toolbox::toolbox()
    }

    pub fn is_read_only_supported() -> bool {
        IS_READ_ONLY_SUPPORTED
    }

    /// Image preview when the block already has a URL, otherwise the paste input.
    pub fn render(&self) -> ToolView {
        match self.data.image_url() {
            Some(url) => ToolView::preview(url),
            None => ToolView::paste_input(self.config.placeholder()),
        }
    }

    /// Record the wrapper node the host created for the rendered view.
    pub fn mount(&self, wrapper: Arc<dyn ViewNode>) {
        let mut slot = self.wrapper.lock().unwrap_or_else(|e| e.into_inner());
        *slot = Some(wrapper);
    }

    /// `{ file: { url }, caption: "" }` from the block data this instance holds.
    pub fn save(&self) -> BlockData {
        BlockData::with_url(self.data.image_url().unwrap_or_default())
    }

    /// Mark the instance inert; later upload completions become no-ops.
    pub fn destroy(&self) {
        self.destroyed.store(true, Ordering::Release);
        tracing::debug!(block_id = %self.block.id(), "Image tool destroyed");
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::Acquire)
    }

    pub fn is_uploading(&self) -> bool {
        self.is_uploading.load(Ordering::Acquire)
    }

    pub fn capabilities(&self) -> &UploaderCapabilities {
        &self.uploader
    }

    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    /// Handle a paste on the input box.
    ///
    /// The event's default action and propagation are suppressed as soon as it
    /// carries clipboard data, whether or not an image is found in it.
    pub async fn handle_paste(&self, event: &mut PasteEvent) -> PasteOutcome {
        if event.clipboard_data().is_none() {
            return PasteOutcome::Ignored;
        }
        event.prevent_default();
        event.stop_propagation();

        let Some(reference) = event.clipboard_data().and_then(resolve) else {
            tracing::debug!(block_id = %self.block.id(), "Paste contained no image");
            return PasteOutcome::Ignored;
        };

        if let ImageReference::File(file) = &reference {
            if !self.config.accepts_mime(&file.mime_type) {
                tracing::warn!(
                    mime_type = %file.mime_type,
                    types = %self.config.types(),
                    "Pasted file type not accepted"
                );
                return PasteOutcome::Rejected(RejectReason::UnacceptedType);
            }
            if !self.config.accepts_size(file.size()) {
                tracing::warn!(
                    size = file.size(),
                    max_size_bytes = ?self.config.max_size_bytes,
                    "Pasted file too large"
                );
                return PasteOutcome::Rejected(RejectReason::TooLarge);
            }
        }

        self.reconcile(reference).await
    }
}
