//! pasteimg: simulate pasting into an image block from the command line.
//!
//! Endpoints come from `--config`, `--by-file`/`--by-url`, or the
//! PASTEIMG_BY_FILE_ENDPOINT / PASTEIMG_BY_URL_ENDPOINT environment variables.

use anyhow::Context;
use clap::{ArgGroup, Args, Parser, Subcommand};
use pasteimg_cli::{
    init_tracing, mime_for_path, parse_key_value, ConsoleBlock, ConsoleBlockApi, ConsoleView,
};
use pasteimg_core::{BlockData, BlockHandle, ToolConfig};
use pasteimg_tool::{
    set_default_title, ClipboardData, ClipboardItem, ImageTool, PasteEvent, ToolContext,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "pasteimg", about = "Paste-image block tool playground")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Paste an image, HTML or text into a fresh image block
    Paste(PasteArgs),
    /// Print toolbox metadata
    Toolbox {
        /// Tool configuration JSON file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args)]
#[command(group(ArgGroup::new("source").required(true)))]
struct PasteArgs {
    /// Image file pasted as binary clipboard data
    #[arg(long, group = "source")]
    image: Option<PathBuf>,
    /// HTML clipboard representation
    #[arg(long, group = "source")]
    html: Option<String>,
    /// File holding the HTML clipboard representation
    #[arg(long, group = "source")]
    html_file: Option<PathBuf>,
    /// Plain-text clipboard representation
    #[arg(long, group = "source")]
    text: Option<String>,
    /// Tool configuration JSON file
    #[arg(long)]
    config: Option<PathBuf>,
    /// File upload endpoint
    #[arg(long)]
    by_file: Option<String>,
    /// URL upload endpoint
    #[arg(long)]
    by_url: Option<String>,
    /// Extra request header, KEY=VALUE (repeatable)
    #[arg(long = "header", value_parser = parse_key_value)]
    headers: Vec<(String, String)>,
    /// Extra request field, KEY=VALUE (repeatable)
    #[arg(long = "data", value_parser = parse_key_value)]
    data: Vec<(String, String)>,
}

#[derive(Serialize)]
struct PasteReport {
    block_id: String,
    outcome: String,
    data: BlockData,
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize output")?;
    println!("{}", out);
    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ToolConfig> {
    let config = match path {
        Some(path) => ToolConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ToolConfig::default(),
    };
    Ok(config.apply_env_overrides())
}

async fn clipboard_from_args(args: &PasteArgs) -> anyhow::Result<ClipboardData> {
    let data = ClipboardData::new();
    if let Some(path) = &args.image {
        let mime = mime_for_path(path)
            .with_context(|| format!("Unrecognized image extension: {}", path.display()))?;
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut item = ClipboardItem::file(mime, bytes);
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            item = item.with_name(name);
        }
        return Ok(data.with_item(item));
    }
    if let Some(html) = &args.html {
        return Ok(data.with_html(html.as_str()));
    }
    if let Some(path) = &args.html_file {
        let html = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        return Ok(data.with_html(html));
    }
    if let Some(text) = &args.text {
        return Ok(data.with_text(text.as_str()));
    }
    anyhow::bail!("Nothing to paste: pass --image, --html, --html-file or --text")
}

async fn paste(args: PasteArgs) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(endpoint) = &args.by_file {
        config.endpoints.by_file = Some(endpoint.clone());
    }
    if let Some(endpoint) = &args.by_url {
        config.endpoints.by_url = Some(endpoint.clone());
    }
    for (name, value) in &args.headers {
        config
            .additional_request_headers
            .insert(name.clone(), value.clone());
    }
    for (key, value) in &args.data {
        config
            .additional_request_data
            .insert(key.clone(), serde_json::Value::String(value.clone()));
    }

    let clipboard = clipboard_from_args(&args).await?;

    let api = Arc::new(ConsoleBlockApi::default());
    let view = Arc::new(ConsoleView::default());
    let block = Arc::new(ConsoleBlock::new(view.clone()));
    let block_id = block.id().to_string();

    let tool = ImageTool::new(ToolContext {
        api: api.clone(),
        block,
        data: BlockData::default(),
        config,
    })
    .context("Failed to create image tool")?;
    tool.mount(view);

    let mut event = PasteEvent::new(clipboard);
    let outcome = tool.handle_paste(&mut event).await;

    print_json(&PasteReport {
        block_id,
        outcome: format!("{:?}", outcome),
        data: api.last_update().unwrap_or_else(|| tool.save()),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Paste(args) => paste(args).await?,
        Commands::Toolbox { config } => {
            let config = load_config(config.as_deref())?;
            if let Some(title) = config.toolbox_title.as_deref() {
                set_default_title(title);
            }
            print_json(&ImageTool::toolbox())?;
        }
    }

    Ok(())
}
