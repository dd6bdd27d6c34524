use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sprig", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply message batches in order and write the final frame as a PNG.
    Frame(FrameArgs),
    /// Apply message batches and print the final frame's surface calls and tree order.
    Dump(DumpArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input messages JSON (one batch, or an array of batches).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Renderer config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the canvas width.
    #[arg(long)]
    width: Option<u32>,

    /// Override the canvas height.
    #[arg(long)]
    height: Option<u32>,
}

#[derive(Parser, Debug)]
struct DumpArgs {
    /// Input messages JSON (one batch, or an array of batches).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Renderer config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Dump(args) => cmd_dump(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<sprig::RendererConfig> {
    match path {
        Some(path) => sprig::RendererConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display())),
        None => Ok(sprig::RendererConfig::default()),
    }
}

fn read_batches(path: &Path) -> anyhow::Result<Vec<sprig::Batch>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read messages '{}'", path.display()))?;
    let batches = sprig::decode_frames(&json).with_context(|| "parse messages JSON")?;
    let rejected: usize = batches.iter().map(|b| b.rejected).sum();
    if rejected > 0 {
        eprintln!("skipped {rejected} undecodable message(s)");
    }
    Ok(batches)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(width) = args.width {
        config.canvas.width = width;
    }
    if let Some(height) = args.height {
        config.canvas.height = height;
    }

    let batches = read_batches(&args.in_path)?;
    let mut renderer = sprig::Renderer::new(config)?;
    let mut surface = renderer.cpu_surface()?;
    for (index, batch) in batches.into_iter().enumerate() {
        let report = renderer.render(&mut surface, batch.messages);
        tracing::debug!(index, ?report, "frame rendered");
    }
    let frame = surface.finish().to_straight();

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_dump(args: DumpArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let batches = read_batches(&args.in_path)?;
    let mut renderer = sprig::Renderer::new(config)?;
    let mut surface = sprig::RecordingSurface::new();
    for batch in batches {
        surface.take_commands();
        renderer.render(&mut surface, batch.messages);
    }

    println!("commands:");
    for command in surface.commands() {
        println!("  {command:?}");
    }

    println!("tree:");
    let graph = renderer.graph();
    for id in graph.traversal_order() {
        let Some(node) = graph.get(id) else {
            continue;
        };
        let mut depth = 0;
        let mut up = node.parent();
        while let Some(parent) = up {
            depth += 1;
            up = graph.get(parent).and_then(sprig::Node::parent);
        }
        println!(
            "  {:indent$}{id} {}",
            "",
            node.kind().unwrap_or("-"),
            indent = depth * 2
        );
    }
    Ok(())
}
