use serde::{Deserialize, Serialize};

/// Hosted image stored in a block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockFile {
    #[serde(default)]
    pub url: String,
}

/// Persisted state of one editor block. Owned by the host editor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockData {
    #[serde(default)]
    pub file: BlockFile,
    /// Always saved empty; captions are not edited by this tool
    #[serde(default)]
    pub caption: String,
}

impl BlockData {
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            file: BlockFile { url: url.into() },
            caption: String::new(),
        }
    }

    /// Current image URL, `None` while the block still shows the paste input
    pub fn image_url(&self) -> Option<&str> {
        Some(self.file.url.as_str()).filter(|url| !url.is_empty())
    }
}
