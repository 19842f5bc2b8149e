use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use palette_quant::{
    calculate_display_size, ColorSelection, PaletteBuild, PalettePreset, ResampleMode, Session,
    DEFAULT_PREVIEW_MAX,
};
use pixelize::config::{clamp_target_width, AppConfig};
use pixelize::image_io::{load_raster, save_png, OutputPaths};

#[derive(Parser)]
#[command(name = "pixelize")]
#[command(about = "Pixelize - convert images into palette-constrained pixel art")]
struct Cli {
    /// Config file (defaults to $PIXELIZE_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an image to pixel art
    Convert(ConvertArgs),
    /// Print the resolved palette
    Palette(PaletteArgs),
    /// Print image dimensions and the output size for a target width
    Info {
        /// Input image (jpg, png, gif, webp)
        input: PathBuf,

        /// Target width in logical pixels (8-200)
        #[arg(short, long)]
        width: Option<u32>,

        /// Print a JSON summary
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct PaletteSelectionArgs {
    /// Built-in color set: "free" or "locked"
    #[arg(short, long)]
    palette: Option<PalettePreset>,

    /// Custom colors as comma-separated hex RGB (e.g. "#000000,#FFFFFF,#FF4500")
    #[arg(long)]
    colors: Option<String>,
}

#[derive(Args)]
struct ConvertArgs {
    /// Input image (jpg, png, gif, webp)
    input: PathBuf,

    /// Target width in logical pixels (8-200)
    #[arg(short, long)]
    width: Option<u32>,

    /// Resampling mode: "direct" or "two-stage"
    #[arg(short, long)]
    mode: Option<ResampleMode>,

    #[command(flatten)]
    selection: PaletteSelectionArgs,

    /// Draw the grid on every output
    #[arg(long)]
    grid: bool,

    /// Also write the upscaled on-screen render
    #[arg(long)]
    preview: bool,

    /// Also write the high-resolution export
    #[arg(long)]
    high_res: bool,

    /// Scale factor of the high-resolution export
    #[arg(long)]
    scale: Option<u32>,

    /// Directory for output files (defaults to the input's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Print a JSON summary
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct PaletteArgs {
    #[command(flatten)]
    selection: PaletteSelectionArgs,

    /// Print JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pixelize=warn,palette_quant=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let config = AppConfig::load(cli.config.as_deref());

    match cli.command {
        Some(Commands::Convert(args)) => run_convert_command(&config, args),
        Some(Commands::Palette(args)) => run_palette_command(&config, &args),
        Some(Commands::Info { input, width, json }) => {
            run_info_command(&config, &input, width, json)
        }
        None => {
            run_status_command(&config);
            Ok(())
        }
    }
}

/// Resolve the palette from CLI flags, falling back to the config.
fn resolve_palette(config: &AppConfig, args: &PaletteSelectionArgs) -> PaletteBuild {
    let selection = match (&args.colors, args.palette) {
        (Some(colors), _) => ColorSelection::Custom(
            colors
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
        ),
        (None, Some(PalettePreset::Free)) => ColorSelection::Free,
        (None, Some(preset)) => {
            ColorSelection::Custom(preset.hex().iter().map(|s| s.to_string()).collect())
        }
        (None, None) => config.color_selection(),
    };

    let build = selection.resolve();
    for rejected in &build.rejected {
        eprintln!(
            "Skipping invalid color #{} {:?}: {}",
            rejected.index + 1,
            rejected.input,
            rejected.error
        );
    }
    if build.used_fallback {
        eprintln!("No usable colors, using the built-in fallback palette");
    }
    build
}

/// Convert an image and write the requested outputs
fn run_convert_command(config: &AppConfig, args: ConvertArgs) -> anyhow::Result<()> {
    let build = resolve_palette(config, &args.selection);
    let width = clamp_target_width(args.width.unwrap_or(config.target_width));
    if args.width.is_some_and(|w| w != width) {
        eprintln!("Target width clamped to {width}");
    }
    let mode = args.mode.unwrap_or_else(|| config.mode.into());
    let grid = args.grid || config.grid;
    let converter = config.converter(build.palette).mode(mode);

    let source = load_raster(&args.input)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;
    let mut session = Session::new();
    session.load(source);

    let (out_width, out_height, total, off_palette, distinct) = {
        let result = session.convert_with(&converter, width)?;
        (
            result.width,
            result.height,
            result.total_pixels,
            result.off_palette_pixels(),
            result.check.found.len(),
        )
    };

    let out_dir = args
        .output_dir
        .clone()
        .or_else(|| args.input.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;
    let paths = OutputPaths::new(&args.input, &out_dir);

    let mut written = Vec::new();

    let standard = session.render_standard(grid)?;
    let bytes = save_png(&paths.pixel_art, &standard, config.optimize_png)?;
    written.push((paths.pixel_art.clone(), bytes));

    if args.preview {
        let display = session.render_display(grid)?;
        let bytes = save_png(&paths.preview, &display.raster, config.optimize_png)?;
        written.push((paths.preview.clone(), bytes));
    }

    if args.high_res {
        let scale = args.scale.unwrap_or(config.export_scale);
        let export = session.render_high_res(scale, grid)?;
        let bytes = save_png(&paths.high_res, &export, config.optimize_png)?;
        written.push((paths.high_res.clone(), bytes));
    }

    if args.json {
        let summary = serde_json::json!({
            "input": args.input,
            "width": out_width,
            "height": out_height,
            "total_pixels": total,
            "mode": mode.to_string(),
            "colors_used": distinct,
            "off_palette_pixels": off_palette,
            "outputs": written
                .iter()
                .map(|(path, bytes)| serde_json::json!({ "path": path, "bytes": bytes }))
                .collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "Converted {} to {out_width}x{out_height} ({total} pixels, {distinct} colors, {mode})",
            args.input.display()
        );
        for (path, bytes) in &written {
            println!("  {} ({bytes} bytes)", path.display());
        }
    }

    if off_palette > 0 {
        eprintln!("Warning: {off_palette} pixels outside the palette");
    }

    Ok(())
}

/// Print the palette a conversion would use
fn run_palette_command(config: &AppConfig, args: &PaletteArgs) -> anyhow::Result<()> {
    let build = resolve_palette(config, &args.selection);
    let colors = build.palette.to_hex();

    if args.json {
        let summary = serde_json::json!({
            "colors": colors,
            "rejected": build
                .rejected
                .iter()
                .map(|r| serde_json::json!({
                    "index": r.index,
                    "input": r.input,
                    "error": r.error.to_string(),
                }))
                .collect::<Vec<_>>(),
            "used_fallback": build.used_fallback,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Palette ({} colors):", colors.len());
    for hex in &colors {
        println!("  {hex}");
    }
    Ok(())
}

/// Print image info without converting
fn run_info_command(
    config: &AppConfig,
    input: &Path,
    width: Option<u32>,
    json: bool,
) -> anyhow::Result<()> {
    let source =
        load_raster(input).with_context(|| format!("Failed to load {}", input.display()))?;
    let mut session = Session::new();
    session.load(source);

    let info = session.info().context("No image loaded")?;
    let (preview_w, preview_h) =
        calculate_display_size(info.width, info.height, DEFAULT_PREVIEW_MAX);
    let target = clamp_target_width(width.unwrap_or(config.target_width));
    let count = session.pixel_count(target)?;

    if json {
        let summary = serde_json::json!({
            "width": info.width,
            "height": info.height,
            "aspect_ratio": info.aspect_ratio,
            "preview": { "width": preview_w, "height": preview_h },
            "output": {
                "width": count.width,
                "height": count.height,
                "total_pixels": count.total,
            },
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}", input.display());
    println!("  Size:         {}x{}", info.width, info.height);
    println!("  Aspect ratio: {:.3}", info.aspect_ratio);
    println!("  Preview:      {preview_w}x{preview_h}");
    println!(
        "  Output:       {}x{} ({} pixels)",
        count.width, count.height, count.total
    );
    Ok(())
}

/// Show the effective configuration
fn run_status_command(config: &AppConfig) {
    let build = config.color_selection().resolve();
    let mode: ResampleMode = config.mode.into();

    println!("Pixelize - palette-constrained pixel art\n");
    println!("Configuration:");
    println!("  Target width:  {}", config.target_width());
    println!("  Mode:          {mode}");
    println!(
        "  Palette:       {:?} ({} colors)",
        config.palette,
        build.palette.len()
    );
    println!("  Grid:          {}", if config.grid { "on" } else { "off" });
    println!("  Export scale:  {}x", config.export_scale);
    println!();
    println!("Run `pixelize convert <IMAGE>` to convert an image.");
    println!("Run `pixelize --help` for all commands.");
}
