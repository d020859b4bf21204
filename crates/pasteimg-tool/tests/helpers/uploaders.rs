//! Custom uploaders for driving the upload lifecycle from tests.

use async_trait::async_trait;
use pasteimg_core::{
    ImageFile, PasteError, Result, UploadByFile, UploadByUrl, UploadResult, UploaderCapabilities,
};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// What the uploader answers with
#[derive(Clone)]
pub enum Reply {
    Url(String),
    Failure(String),
    Error(String),
}

impl Reply {
    fn into_result(self) -> Result<UploadResult> {
        match self {
            Reply::Url(url) => Ok(UploadResult::uploaded(url)),
            Reply::Failure(msg) => Ok(UploadResult::failed(msg)),
            Reply::Error(msg) => Err(PasteError::Transport(msg)),
        }
    }
}

/// Records each call and answers with a fixed reply.
///
/// When gated, every call signals `started` and then waits for `release`.
pub struct ScriptedUploader {
    reply: Reply,
    files: Mutex<Vec<ImageFile>>,
    urls: Mutex<Vec<String>>,
    gate: Option<(Arc<Notify>, Arc<Notify>)>,
}

impl ScriptedUploader {
    pub fn replying(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            files: Mutex::new(Vec::new()),
            urls: Mutex::new(Vec::new()),
            gate: None,
        })
    }

    /// Returns the uploader plus its `(started, release)` notifiers.
    pub fn gated(reply: Reply) -> (Arc<Self>, Arc<Notify>, Arc<Notify>) {
        let started = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let uploader = Arc::new(Self {
            reply,
            files: Mutex::new(Vec::new()),
            urls: Mutex::new(Vec::new()),
            gate: Some((started.clone(), release.clone())),
        });
        (uploader, started, release)
    }

    pub fn files(&self) -> Vec<ImageFile> {
        self.files.lock().unwrap().clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.files.lock().unwrap().len() + self.urls.lock().unwrap().len()
    }

    async fn wait_for_release(&self) {
        if let Some((started, release)) = &self.gate {
            started.notify_one();
            release.notified().await;
        }
    }
}

#[async_trait]
impl UploadByFile for ScriptedUploader {
    async fn upload_by_file(&self, file: ImageFile) -> Result<UploadResult> {
        self.files.lock().unwrap().push(file);
        self.wait_for_release().await;
        self.reply.clone().into_result()
    }
}

#[async_trait]
impl UploadByUrl for ScriptedUploader {
    async fn upload_by_url(&self, url: &str) -> Result<UploadResult> {
        self.urls.lock().unwrap().push(url.to_string());
        self.wait_for_release().await;
        self.reply.clone().into_result()
    }
}

pub fn both(uploader: &Arc<ScriptedUploader>) -> UploaderCapabilities {
    UploaderCapabilities::none()
        .with_by_file(uploader.clone())
        .with_by_url(uploader.clone())
}
