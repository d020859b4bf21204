//! Clipboard fixtures.

use pasteimg_tool::{ClipboardData, ClipboardItem, PasteEvent};

/// Stand-in for binary image bytes; content is never inspected.
pub fn png_bytes() -> Vec<u8> {
    b"fake-png-bytes".to_vec()
}

pub fn image_file_paste() -> PasteEvent {
    PasteEvent::new(ClipboardData::new().with_item(ClipboardItem::file("image/png", png_bytes())))
}

pub fn html_paste(html: &str) -> PasteEvent {
    PasteEvent::new(ClipboardData::new().with_html(html))
}

pub fn text_paste(text: &str) -> PasteEvent {
    PasteEvent::new(ClipboardData::new().with_text(text))
}
