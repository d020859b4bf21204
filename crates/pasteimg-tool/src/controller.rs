//! Upload lifecycle for a tool instance
//!
//! Runs the bound upload, shows the status indicator while it is in flight,
//! and writes the hosted URL back into the block unless the instance was
//! destroyed in the meantime.

use pasteimg_core::{BlockData, ImageReference, PasteError, ViewNode};
use std::sync::atomic::Ordering;
use std::sync::Arc;

use crate::tool::ImageTool;
use crate::view::STATUS_LABEL;

/// What a paste ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasteOutcome {
    /// No clipboard data, or nothing image-like in it
    Ignored,
    /// No upload operation for this kind of reference
    Unsupported,
    Rejected(RejectReason),
    /// Block updated with the hosted URL
    Uploaded(String),
    /// Upload failed; the block is unchanged
    Failed(String),
    /// Upload finished after the instance was destroyed
    Discarded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    Destroyed,
    /// Another upload is already in flight
    Busy,
    UnacceptedType,
    TooLarge,
}

/// Clears the uploading state when dropped, on every exit path.
pub(crate) struct UploadStatusGuard<'a> {
    tool: &'a ImageTool,
}

impl Drop for UploadStatusGuard<'_> {
    fn drop(&mut self) {
        self.tool.hide_upload_status();
    }
}

impl ImageTool {
    /// Upload `reference` and reconcile the block with the result.
    pub(crate) async fn reconcile(&self, reference: ImageReference) -> PasteOutcome {
        if self.is_destroyed() {
            tracing::debug!(block_id = %self.block.id(), "Paste on destroyed tool ignored");
            return PasteOutcome::Rejected(RejectReason::Destroyed);
        }

        let kind = reference.kind();
        let Some(job) = self.uploader.bind(reference) else {
            PasteError::UnsupportedReference(format!("no {} upload configured", kind))
                .log("Paste not uploaded");
            return PasteOutcome::Unsupported;
        };

        let Some(_status) = self.begin_upload() else {
            tracing::warn!(block_id = %self.block.id(), "Upload already in progress, paste dropped");
            return PasteOutcome::Rejected(RejectReason::Busy);
        };

        tracing::debug!(block_id = %self.block.id(), kind, "Upload started");
        let result = job.await;

        if self.is_destroyed() {
            tracing::debug!(
                block_id = %self.block.id(),
                "Tool destroyed during upload, result discarded"
            );
            return PasteOutcome::Discarded;
        }

        match result {
            Ok(result) => match result.url() {
                Some(url) if result.is_success() => {
                    let url = url.to_string();
                    match self
                        .api
                        .update(self.block.id(), BlockData::with_url(url.as_str()))
                        .await
                    {
                        Ok(()) => {
                            tracing::info!(block_id = %self.block.id(), url = %url, "Block updated with image");
                            PasteOutcome::Uploaded(url)
                        }
                        Err(e) => {
                            e.log("Block update failed");
                            PasteOutcome::Failed(e.to_string())
                        }
                    }
                }
                _ => {
                    let error = result.error().unwrap_or("Upload failed").to_string();
                    tracing::warn!(block_id = %self.block.id(), error = %error, "Upload failed");
                    PasteOutcome::Failed(error)
                }
            },
            Err(e) => {
                e.log("Upload failed");
                PasteOutcome::Failed(e.to_string())
            }
        }
    }

    /// Enter the uploading state, or `None` when an upload is already running.
    pub(crate) fn begin_upload(&self) -> Option<UploadStatusGuard<'_>> {
        if self.is_uploading.swap(true, Ordering::AcqRel) {
            return None;
        }
        self.show_upload_status();
        Some(UploadStatusGuard { tool: self })
    }

    fn show_upload_status(&self) {
        match self.current_wrapper() {
            Some(wrapper) => wrapper.append_status_indicator(STATUS_LABEL),
            None => tracing::debug!(block_id = %self.block.id(), "No wrapper for status indicator"),
        }
    }

    fn hide_upload_status(&self) {
        self.is_uploading.store(false, Ordering::Release);
        if self.is_destroyed() {
            return;
        }
        if let Some(wrapper) = self.current_wrapper() {
            wrapper.remove_status_indicator();
        }
    }

    /// The mounted wrapper if still attached, otherwise the block's current one.
    ///
    /// The slot lock is never held while host callbacks run.
    fn current_wrapper(&self) -> Option<Arc<dyn ViewNode>> {
        let stored = self
            .wrapper
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        if let Some(node) = stored.filter(|node| node.is_attached()) {
            return Some(node);
        }

        let resolved = self.block.closest_wrapper()?;
        *self.wrapper.lock().unwrap_or_else(|e| e.into_inner()) = Some(Arc::clone(&resolved));
        Some(resolved)
    }
}
