//! Host editor traits
//!
//! The block tool only needs a narrow slice of the surrounding editor: one
//! block mutation, a stable block handle, and the view node the tool was
//! mounted into. Hosts implement these traits; tests use recording stand-ins.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;
use crate::models::BlockData;

/// Block mutation API supplied by the host editor
#[async_trait]
pub trait BlockApi: Send + Sync {
    /// Replace the persisted data of block `block_id`
    async fn update(&self, block_id: &str, data: BlockData) -> Result<()>;
}

/// Rendered wrapper node the upload status indicator is attached to
pub trait ViewNode: Send + Sync {
    /// Whether the node is still part of the document
    fn is_attached(&self) -> bool;

    fn append_status_indicator(&self, label: &str);

    fn remove_status_indicator(&self);
}

/// Stable handle to the block the tool lives in
pub trait BlockHandle: Send + Sync {
    fn id(&self) -> &str;

    /// Walk up from the block holder to the tool's current wrapper node.
    ///
    /// The host may swap the block's root element (e.g. during a conversion),
    /// so callers re-resolve through this instead of trusting an old node.
    fn closest_wrapper(&self) -> Option<Arc<dyn ViewNode>>;
}

/// Block API that discards every update
pub struct NoOpBlockApi;

#[async_trait]
impl BlockApi for NoOpBlockApi {
    async fn update(&self, _block_id: &str, _data: BlockData) -> Result<()> {
        Ok(())
    }
}
