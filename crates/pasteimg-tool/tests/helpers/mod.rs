//! Test helpers: host stand-ins that record what the tool does to the block.
//!
//! Run from workspace root: `cargo test -p pasteimg-tool`.

#![allow(dead_code)]

pub mod fixtures;
pub mod uploaders;

use async_trait::async_trait;
use pasteimg_core::{
    BlockApi, BlockData, BlockHandle, PasteError, Result, ToolConfig, ViewNode,
};
use pasteimg_tool::{ImageTool, ToolContext};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const BLOCK_ID: &str = "block-1";

/// Block API that records every update
#[derive(Default)]
pub struct RecordingBlockApi {
    updates: Mutex<Vec<(String, BlockData)>>,
    fail: AtomicBool,
}

impl RecordingBlockApi {
    pub fn failing() -> Self {
        let api = Self::default();
        api.fail.store(true, Ordering::SeqCst);
        api
    }

    pub fn updates(&self) -> Vec<(String, BlockData)> {
        self.updates.lock().unwrap().clone()
    }
}

#[async_trait]
impl BlockApi for RecordingBlockApi {
    async fn update(&self, block_id: &str, data: BlockData) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(PasteError::Host("block no longer exists".to_string()));
        }
        self.updates
            .lock()
            .unwrap()
            .push((block_id.to_string(), data));
        Ok(())
    }
}

/// Wrapper node counting status indicator changes
pub struct RecordingView {
    attached: AtomicBool,
    shown: AtomicUsize,
    hidden: AtomicUsize,
    labels: Mutex<Vec<String>>,
}

impl RecordingView {
    pub fn attached() -> Arc<Self> {
        Arc::new(Self {
            attached: AtomicBool::new(true),
            shown: AtomicUsize::new(0),
            hidden: AtomicUsize::new(0),
            labels: Mutex::new(Vec::new()),
        })
    }

    pub fn detach(&self) {
        self.attached.store(false, Ordering::SeqCst);
    }

    pub fn shown(&self) -> usize {
        self.shown.load(Ordering::SeqCst)
    }

    pub fn hidden(&self) -> usize {
        self.hidden.load(Ordering::SeqCst)
    }

    pub fn labels(&self) -> Vec<String> {
        self.labels.lock().unwrap().clone()
    }
}

impl ViewNode for RecordingView {
    fn is_attached(&self) -> bool {
        self.attached.load(Ordering::SeqCst)
    }

    fn append_status_indicator(&self, label: &str) {
        self.shown.fetch_add(1, Ordering::SeqCst);
        self.labels.lock().unwrap().push(label.to_string());
    }

    fn remove_status_indicator(&self) {
        self.hidden.fetch_add(1, Ordering::SeqCst);
    }
}

/// Block whose current wrapper can be swapped, as a host does on conversion
pub struct TestBlock {
    wrapper: Mutex<Option<Arc<RecordingView>>>,
}

impl TestBlock {
    pub fn new(wrapper: Option<Arc<RecordingView>>) -> Arc<Self> {
        Arc::new(Self {
            wrapper: Mutex::new(wrapper),
        })
    }

    pub fn replace_wrapper(&self, wrapper: Arc<RecordingView>) {
        *self.wrapper.lock().unwrap() = Some(wrapper);
    }
}

impl BlockHandle for TestBlock {
    fn id(&self) -> &str {
        BLOCK_ID
    }

    fn closest_wrapper(&self) -> Option<Arc<dyn ViewNode>> {
        let wrapper = self.wrapper.lock().unwrap().clone()?;
        Some(wrapper)
    }
}

/// Tool mounted into an attached wrapper, with every host piece exposed.
pub struct TestHarness {
    pub tool: ImageTool,
    pub api: Arc<RecordingBlockApi>,
    pub block: Arc<TestBlock>,
    pub view: Arc<RecordingView>,
}

pub fn setup_tool(config: ToolConfig) -> TestHarness {
    setup_tool_with(config, BlockData::default(), Arc::new(RecordingBlockApi::default()))
}

pub fn setup_tool_with(
    config: ToolConfig,
    data: BlockData,
    api: Arc<RecordingBlockApi>,
) -> TestHarness {
    let view = RecordingView::attached();
    let block = TestBlock::new(Some(view.clone()));
    let tool = ImageTool::new(ToolContext {
        api: api.clone(),
        block: block.clone(),
        data,
        config,
    })
    .expect("tool construction");
    tool.mount(view.clone());

    TestHarness {
        tool,
        api,
        block,
        view,
    }
}
