use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use planviz::{AssetManager, PlanTrace, RenderConfig, RenderSession, RendererContext};

#[derive(Parser, Debug)]
#[command(name = "planviz", version, about = "Render planning-state traces as 2D scenes")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single state as PNG or SVG (chosen by the output extension).
    Frame(FrameArgs),
    /// Render every state of a trace into a directory.
    Render(RenderArgs),
    /// Print the recorded draw commands of one state as JSON.
    Ops(OpsArgs),
    /// List registered domain tags.
    Domains,
}

#[derive(Parser, Debug)]
struct CommonArgs {
    /// Input trace JSON (array of states or `{ domain, plan, states }`).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Renderer config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory with robot.png, truck.png, package.png, rover.png, camera.png.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Extra directory of .ttf/.otf/.ttc files used when rasterizing text.
    #[arg(long)]
    fonts: Option<PathBuf>,

    /// Zoom factor, clamped to the configured range.
    #[arg(long, default_value_t = 1.0)]
    zoom: f64,

    /// Horizontal pan in pixels.
    #[arg(long, default_value_t = 0.0)]
    pan_x: f64,

    /// Vertical pan in pixels.
    #[arg(long, default_value_t = 0.0)]
    pan_y: f64,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// State index (0-based).
    #[arg(long, default_value_t = 0)]
    index: usize,

    /// Output path ending in `.png` or `.svg`.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Output directory; files are named `state_0000.<ext>`.
    #[arg(long)]
    out_dir: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Png)]
    format: Format,
}

#[derive(Parser, Debug)]
struct OpsArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// State index (0-based).
    #[arg(long, default_value_t = 0)]
    index: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Png,
    Svg,
}

impl Format {
    fn ext(self) -> &'static str {
        match self {
            Format::Png => "png",
            Format::Svg => "svg",
        }
    }

    fn from_path(path: &Path) -> anyhow::Result<Self> {
        match path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase) {
            Some(ext) if ext == "png" => Ok(Format::Png),
            Some(ext) if ext == "svg" => Ok(Format::Svg),
            _ => anyhow::bail!(
                "cannot infer output format from '{}' (use .png or .svg)",
                path.display()
            ),
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
        Command::Ops(args) => cmd_ops(args),
        Command::Domains => cmd_domains(),
    }
}

fn open_session(args: &CommonArgs) -> anyhow::Result<RenderSession> {
    let trace = PlanTrace::from_json_file(&args.in_path)?;
    let mut config = match &args.config {
        Some(path) => RenderConfig::from_json_file(path)?,
        None => RenderConfig::default(),
    };
    if let Some(dir) = &args.assets {
        config.assets.dir = Some(dir.clone());
    }

    let mut context = RendererContext::new(config)?;
    // An explicit flag beats the environment override.
    if let Some(dir) = &args.assets {
        context = context.with_assets(AssetManager::new(Some(dir.clone())));
    }
    let loaded = context.assets().load_blocking();
    tracing::info!(loaded, "assets ready");

    let viewport = context.viewport_mut();
    viewport.set_scale(args.zoom);
    viewport.pan(args.pan_x, args.pan_y);

    let session = RenderSession::new(trace, context);
    Ok(match &args.fonts {
        Some(dir) => session.with_font_dir(dir),
        None => session,
    })
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn write_state(
    session: &mut RenderSession,
    index: usize,
    format: Format,
    out: &Path,
) -> anyhow::Result<()> {
    match format {
        Format::Png => session.render_png(index, out)?,
        Format::Svg => {
            let svg = session.render_svg(index)?;
            std::fs::write(out, svg).with_context(|| format!("write svg '{}'", out.display()))?;
        }
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let format = Format::from_path(&args.out)?;
    let mut session = open_session(&args.common)?;
    ensure_parent(&args.out)?;
    write_state(&mut session, args.index, format, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut session = open_session(&args.common)?;
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;
    for index in 0..session.len() {
        let out = args
            .out_dir
            .join(format!("state_{index:04}.{}", args.format.ext()));
        write_state(&mut session, index, args.format, &out)?;
    }
    eprintln!(
        "wrote {} states to {}",
        session.len(),
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_ops(args: OpsArgs) -> anyhow::Result<()> {
    let mut session = open_session(&args.common)?;
    let cmds = session.draw_commands(args.index)?;
    let json = serde_json::to_string_pretty(&cmds).context("serialize draw commands")?;
    println!("{json}");
    Ok(())
}

fn cmd_domains() -> anyhow::Result<()> {
    for reg in planviz::dispatch::registry() {
        if reg.canonical {
            println!("{}", reg.tag);
        } else {
            println!("{} (alias of {})", reg.tag, reg.domain.tag());
        }
    }
    println!("* (anything else renders with generic)");
    Ok(())
}
