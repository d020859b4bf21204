//! Paste-image block tool
//!
//! Turns a paste event into an image reference, uploads it through the
//! configured strategy and writes the hosted URL back into the block.

pub mod clipboard;
pub mod controller;
pub mod tool;
pub mod toolbox;
pub mod view;

pub use clipboard::{resolve, ClipboardData, ClipboardItem, ItemKind, PasteEvent};
pub use controller::{PasteOutcome, RejectReason};
pub use tool::{ImageTool, ToolContext, IS_READ_ONLY_SUPPORTED};
pub use toolbox::{set_default_title, Toolbox, DEFAULT_TOOLBOX_TITLE, TOOL_ICON};
pub use view::{is_paste_shortcut, sanitize_input, KeyPress, ToolView, STATUS_LABEL};
