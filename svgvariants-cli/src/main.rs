use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

use svgvariants::{
    ConvertOpts, DirSink, Preset, ProcessRenderer, RenderRequest, Renderer, ResvgRenderer,
    SourceDocument, VariantManifest, VariantSpec, convert, preset_variants,
};

#[derive(Parser, Debug)]
#[command(name = "svgvariants", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one SVG into many PNG variants.
    Convert(ConvertArgs),
    /// Render a single PNG. Used as the external renderer process by `convert`.
    Rasterize(RasterizeArgs),
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input SVG document.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output directory; variant names are resolved below it.
    #[arg(long)]
    out: PathBuf,

    /// Built-in size preset, used when neither `--variant` nor `--manifest` is given.
    #[arg(long, value_enum, conflicts_with_all = ["manifest", "variants"])]
    preset: Option<PresetArg>,

    /// JSON manifest with variants and run options.
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Variant descriptor `<W>x<H>[:<name>]`, e.g. `64x` or `32x32:icons/{name}_32`.
    #[arg(long = "variant", value_name = "DESC")]
    variants: Vec<VariantSpec>,

    /// Maximum number of variants rendering at once.
    #[arg(long)]
    max_concurrency: Option<usize>,

    /// Scale factor for documents with explicit pixel sizes.
    #[arg(long)]
    scale: Option<f64>,

    /// Rendering engine.
    #[arg(long, value_enum, default_value_t = RendererArg::Process)]
    renderer: RendererArg,

    /// Log per-variant progress at debug level.
    #[arg(long, short, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors.
    #[arg(long, short)]
    quiet: bool,
}

#[derive(Parser, Debug)]
struct RasterizeArgs {
    /// Input SVG document.
    source: PathBuf,
    /// Output PNG path.
    dest: PathBuf,
    /// Target width in pixels, 0 to infer.
    width: u32,
    /// Target height in pixels, 0 to infer.
    height: u32,
    /// Scale factor for documents with explicit pixel sizes.
    scale: Option<f64>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PresetArg {
    Web,
    Android,
    Ios,
    Windows,
    All,
}

impl From<PresetArg> for Preset {
    fn from(p: PresetArg) -> Self {
        match p {
            PresetArg::Web => Preset::Web,
            PresetArg::Android => Preset::Android,
            PresetArg::Ios => Preset::Ios,
            PresetArg::Windows => Preset::Windows,
            PresetArg::All => Preset::All,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum RendererArg {
    /// One `svgvariants rasterize` process per variant.
    Process,
    /// In-process resvg on worker threads.
    Inline,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Convert(args) => cmd_convert(args),
        Command::Rasterize(args) => cmd_rasterize(args),
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else if quiet {
        tracing::Level::WARN
    } else {
        tracing::Level::INFO
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn cmd_convert(args: ConvertArgs) -> anyhow::Result<()> {
    init_logging(args.verbose, args.quiet);

    std::fs::metadata(&args.in_path)
        .with_context(|| format!("open input '{}'", args.in_path.display()))?;
    let source = SourceDocument::new(&args.in_path)?;

    let manifest = args
        .manifest
        .as_deref()
        .map(VariantManifest::from_path)
        .transpose()?;

    let variants = if manifest.is_none() && args.variants.is_empty() {
        preset_variants(args.preset.unwrap_or(PresetArg::All).into())
    } else {
        let mut variants = manifest
            .as_ref()
            .map(VariantManifest::variant_specs)
            .unwrap_or_default();
        variants.extend(args.variants);
        variants
    };

    let mut opts = ConvertOpts::default();
    if let Some(m) = &manifest {
        if let Some(n) = m.max_concurrency {
            opts.max_concurrency = n;
        }
        opts.scale = m.scale.or(opts.scale);
    }
    if let Some(n) = args.max_concurrency {
        opts.max_concurrency = n;
    }
    opts.scale = args.scale.or(opts.scale);

    let renderer: Box<dyn Renderer> = match args.renderer {
        RendererArg::Process => {
            let exe = std::env::current_exe().context("locate current executable")?;
            Box::new(ProcessRenderer::new(exe).with_args(["rasterize"]))
        }
        RendererArg::Inline => Box::new(ResvgRenderer::new()),
    };

    let mut sink = DirSink::new(&args.out);
    let stats = convert(&source, &variants, renderer.as_ref(), &opts, &mut sink)?;

    for (path, err) in sink.failures() {
        eprintln!("failed {}: {err}", path.display());
    }
    eprintln!(
        "wrote {} of {} variants to {}",
        stats.succeeded,
        stats.total,
        args.out.display()
    );

    if stats.failed > 0 {
        anyhow::bail!("{} of {} variants failed", stats.failed, stats.total);
    }
    Ok(())
}

fn cmd_rasterize(args: RasterizeArgs) -> anyhow::Result<()> {
    let request = RenderRequest {
        width: Some(args.width).filter(|w| *w > 0),
        height: Some(args.height).filter(|h| *h > 0),
        scale: args.scale,
    };
    ResvgRenderer::new().render(&args.source, &request, &args.dest)?;
    Ok(())
}
