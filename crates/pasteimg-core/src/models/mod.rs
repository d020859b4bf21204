//! Data contracts shared by the resolver, uploaders and the block tool

pub mod block;
pub mod upload;

pub use block::{BlockData, BlockFile};
pub use upload::{ImageFile, ImageReference, UploadResult, UploadedFile, PASTED_IMAGE_NAME};
