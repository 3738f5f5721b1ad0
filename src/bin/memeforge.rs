use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use sha2::Digest as _;

#[derive(Parser, Debug)]
#[command(name = "memeforge", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Caption one image and write it as a PNG.
    Render(RenderArgs),
    /// Caption every job listed in a JSON manifest, in parallel.
    Batch(BatchArgs),
    /// Print which font tier resolves and a SHA-256 of its bytes.
    Fonts(FontsArgs),
}

#[derive(Parser, Debug)]
struct SpecArgs {
    /// Render spec JSON. Missing fields take their defaults.
    #[arg(long)]
    spec: Option<PathBuf>,

    /// Font file tried before every fallback.
    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input image (any format the `image` crate decodes).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[arg(long, default_value = "")]
    top: String,

    #[arg(long, default_value = "")]
    bottom: String,

    #[command(flatten)]
    spec: SpecArgs,

    #[arg(long)]
    padding: Option<u32>,

    #[arg(long)]
    stroke_width: Option<u32>,

    #[arg(long, value_enum)]
    stroke_mode: Option<StrokeChoice>,

    /// Draw the default drop shadow.
    #[arg(long)]
    shadow: bool,

    /// Size text, padding and outline from the image dimensions.
    #[arg(long)]
    relative: bool,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// JSON list of `{ "image", "top", "bottom", "out" }`. Relative paths resolve against the
    /// manifest's directory.
    #[arg(long)]
    manifest: PathBuf,

    #[command(flatten)]
    spec: SpecArgs,

    /// Worker threads (defaults to the number of CPUs).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct FontsArgs {
    #[command(flatten)]
    spec: SpecArgs,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StrokeChoice {
    Auto,
    Native,
    Offset,
}

impl From<StrokeChoice> for memeforge::StrokeMode {
    fn from(c: StrokeChoice) -> Self {
        match c {
            StrokeChoice::Auto => Self::Auto,
            StrokeChoice::Native => Self::Native,
            StrokeChoice::Offset => Self::Offset,
        }
    }
}

#[derive(Deserialize, Debug)]
struct ManifestJob {
    image: PathBuf,
    #[serde(default)]
    top: String,
    #[serde(default)]
    bottom: String,
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Batch(args) => cmd_batch(args),
        Command::Fonts(args) => cmd_fonts(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_spec(args: &SpecArgs) -> anyhow::Result<memeforge::RenderSpec> {
    let mut spec = match &args.spec {
        Some(path) => {
            let f = File::open(path).with_context(|| format!("open spec '{}'", path.display()))?;
            serde_json::from_reader(BufReader::new(f))
                .with_context(|| format!("parse spec JSON '{}'", path.display()))?
        }
        None => memeforge::RenderSpec::default(),
    };
    if let Some(font) = &args.font {
        spec.font.path = Some(font.clone());
    }
    Ok(spec)
}

fn read_image(path: &Path) -> anyhow::Result<image::DynamicImage> {
    image::open(path).with_context(|| format!("decode image '{}'", path.display()))
}

fn write_png(path: &Path, img: &image::RgbaImage) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    img.save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", path.display()))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut spec = load_spec(&args.spec)?;
    if args.relative {
        let rel = memeforge::RenderSpec::image_relative();
        spec.start_size_ratio = rel.start_size_ratio;
        spec.padding_ratio = rel.padding_ratio;
        spec.max_width_ratio = rel.max_width_ratio;
        spec.stroke_width_ratio = rel.stroke_width_ratio;
        spec.block_height_ratio = rel.block_height_ratio;
    }
    if let Some(p) = args.padding {
        spec.padding = p;
        spec.padding_ratio = None;
    }
    if let Some(w) = args.stroke_width {
        spec.stroke_width = w;
        spec.stroke_width_ratio = None;
    }
    if let Some(m) = args.stroke_mode {
        spec.stroke_mode = m.into();
    }
    if args.shadow && spec.shadow.is_none() {
        spec.shadow = Some(memeforge::ShadowSpec::default());
    }
    spec.validate()?;

    let input = read_image(&args.in_path)?;
    let out = memeforge::render(&input, &args.top, &args.bottom, &spec)?;
    write_png(&args.out, &out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_batch(args: BatchArgs) -> anyhow::Result<()> {
    let spec = load_spec(&args.spec)?;
    spec.validate()?;

    let f = File::open(&args.manifest)
        .with_context(|| format!("open manifest '{}'", args.manifest.display()))?;
    let manifest: Vec<ManifestJob> =
        serde_json::from_reader(BufReader::new(f)).with_context(|| "parse manifest JSON")?;
    let root = args.manifest.parent().unwrap_or_else(|| Path::new("."));

    let mut jobs = Vec::with_capacity(manifest.len());
    let mut decoded = Vec::with_capacity(manifest.len());
    for entry in &manifest {
        match read_image(&root.join(&entry.image)) {
            Ok(image) => {
                decoded.push(Ok(jobs.len()));
                jobs.push(memeforge::BatchJob {
                    image,
                    top: entry.top.clone(),
                    bottom: entry.bottom.clone(),
                });
            }
            Err(e) => decoded.push(Err(e)),
        }
    }

    let mut results: Vec<Option<memeforge::MemeResult<image::RgbaImage>>> =
        memeforge::render_batch(&jobs, &spec, args.threads)?
            .into_iter()
            .map(Some)
            .collect();

    let mut failed = 0usize;
    for (entry, slot) in manifest.iter().zip(decoded) {
        let out_path = root.join(&entry.out);
        let rendered = match slot {
            Ok(idx) => results
                .get_mut(idx)
                .and_then(Option::take)
                .with_context(|| format!("missing batch result for '{}'", entry.image.display()))?
                .map_err(anyhow::Error::from),
            Err(e) => Err(e),
        };
        match rendered {
            Ok(img) => {
                write_png(&out_path, &img)?;
                eprintln!("wrote {}", out_path.display());
            }
            Err(e) => {
                failed += 1;
                eprintln!("failed {}: {e:#}", entry.image.display());
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} jobs failed", manifest.len());
    }
    Ok(())
}

fn cmd_fonts(args: FontsArgs) -> anyhow::Result<()> {
    let spec = load_spec(&args.spec)?;
    let resolver = memeforge::FontResolver::new(&spec.font)?;

    eprintln!("font diagnostics:");
    eprintln!("  source:         {}", resolver.source_label());
    eprintln!(
        "  family:         {}",
        resolver.family_name().unwrap_or("(built-in bitmap)")
    );
    eprintln!("  native_stroke:  {}", resolver.supports_native_stroke());
    if let Some(bytes) = resolver.font_bytes() {
        eprintln!("  sha256:         {}", sha256_hex(bytes));
    }
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
