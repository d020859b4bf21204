//! Editor-wide toolbox title.
//!
//! Kept in its own test binary: the title is process-wide state.

mod helpers;

use helpers::setup_tool;
use pasteimg_core::ToolConfig;
use pasteimg_tool::{ImageTool, DEFAULT_TOOLBOX_TITLE, TOOL_ICON};

#[test]
fn test_configured_title_becomes_shared_default() {
    assert_eq!(ImageTool::toolbox().title, DEFAULT_TOOLBOX_TITLE);

    let config = ToolConfig {
        toolbox_title: Some("Paste Doc Image".to_string()),
        ..Default::default()
    };
    let _first = setup_tool(config);
    let _second = setup_tool(ToolConfig::default());

    let toolbox = ImageTool::toolbox();
    assert_eq!(toolbox.title, "Paste Doc Image");
    assert_eq!(toolbox.icon, TOOL_ICON);
}
