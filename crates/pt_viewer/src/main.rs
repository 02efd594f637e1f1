use anyhow::{anyhow, bail, Context, Result};
use pt_core::{Material, MeshSource, RenderSettings, SceneDescription, ToneMapSettings, ToneMapping};
use pt_math::Vec3;
use pt_renderer::{DisplayImage, Renderer};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Placement of a mesh passed with `--mesh`
const MESH_SCALE: f32 = 75.0;
const MESH_OFFSET: Vec3 = Vec3::new(2.0, -10.0, 0.0);

/// Command line options
#[derive(Debug, Clone, PartialEq)]
struct Options {
    scene: Option<PathBuf>,
    mesh: Option<PathBuf>,
    output: PathBuf,
    frames: u32,
    snapshot_every: Option<u32>,
    width: u32,
    height: u32,
    seed: u64,
    tone: ToneMapSettings,
    help: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            scene: None,
            mesh: None,
            output: PathBuf::from("render.png"),
            frames: 16,
            snapshot_every: None,
            width: 512,
            height: 512,
            seed: 0,
            tone: ToneMapSettings::default(),
            help: false,
        }
    }
}

fn print_usage(prog: &str) {
    println!("Progressive path tracer");
    println!();
    println!("Usage: {} [options] [scene.json]", prog);
    println!();
    println!("Without a scene file the Cornell box is rendered.");
    println!();
    println!("Options:");
    println!("  --mesh <file.obj>     Add an OBJ mesh to the scene");
    println!("  -o, --output <file>   Output PNG (default render.png)");
    println!("  -f, --frames <n>      Number of progressive frames (default 16)");
    println!("  --every <n>           Also write a snapshot every n frames");
    println!("  --size <WxH>          Image size (default 512x512)");
    println!("  --seed <n>            Random seed (default 0)");
    println!("  --tone <mode>         linear, reinhard or uncharted2 (default)");
    println!("  --exposure <value>    Exposure multiplier (default 16)");
    println!("  -h, --help            Show this help");
}

fn parse_options(args: impl IntoIterator<Item = String>) -> Result<Options> {
    let mut options = Options::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let mut value = || args.next().ok_or_else(|| anyhow!("Missing value for {}", arg));
        match arg.as_str() {
            "-h" | "--help" => options.help = true,
            "--mesh" => options.mesh = Some(PathBuf::from(value()?)),
            "-o" | "--output" => options.output = PathBuf::from(value()?),
            "-f" | "--frames" => options.frames = value()?.parse().context("Invalid frame count")?,
            "--every" => options.snapshot_every = Some(value()?.parse().context("Invalid snapshot interval")?),
            "--seed" => options.seed = value()?.parse().context("Invalid seed")?,
            "--exposure" => options.tone.exposure = value()?.parse().context("Invalid exposure")?,
            "--tone" => options.tone.mode = parse_tone(&value()?)?,
            "--size" => {
                let (width, height) = parse_size(&value()?)?;
                options.width = width;
                options.height = height;
            }
            other if other.starts_with('-') => bail!("Unknown option: {}", other),
            other => {
                if options.scene.is_some() {
                    bail!("More than one scene file given");
                }
                options.scene = Some(PathBuf::from(other));
            }
        }
    }

    if options.frames == 0 {
        bail!("Frame count must be at least 1");
    }
    if options.snapshot_every == Some(0) {
        bail!("Snapshot interval must be at least 1");
    }

    Ok(options)
}

fn parse_tone(name: &str) -> Result<ToneMapping> {
    match name.to_ascii_lowercase().as_str() {
        "linear" => Ok(ToneMapping::Linear),
        "reinhard" | "global_reinhard" => Ok(ToneMapping::GlobalReinhard),
        "uncharted2" | "filmic" => Ok(ToneMapping::Uncharted2),
        _ => bail!("Unknown tone mapping mode: {}", name),
    }
}

fn parse_size(text: &str) -> Result<(u32, u32)> {
    let (w, h) = text
        .split_once('x')
        .ok_or_else(|| anyhow!("Expected size as WIDTHxHEIGHT, got {}", text))?;
    let width: u32 = w.parse().with_context(|| format!("Invalid width in {}", text))?;
    let height: u32 = h.parse().with_context(|| format!("Invalid height in {}", text))?;
    if width == 0 || height == 0 {
        bail!("Image size must be non-zero, got {}", text);
    }
    Ok((width, height))
}

/// Scene from the options: a JSON file or the Cornell box, plus an optional OBJ mesh.
fn build_scene(options: &Options) -> Result<SceneDescription> {
    let mut description = match &options.scene {
        Some(path) => SceneDescription::load_json(path)
            .with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => SceneDescription::cornell_box(),
    };

    if let Some(path) = &options.mesh {
        let mesh = MeshSource::Obj {
            path: path.clone(),
            scale: MESH_SCALE,
            offset: MESH_OFFSET,
        };
        description = description.with_mesh("mesh", mesh, true, Material::cyan());
    }

    Ok(description)
}

/// Write a tone mapped image as PNG.
fn save_png(image: &DisplayImage, path: &Path) -> Result<()> {
    let buffer = image::RgbaImage::from_raw(image.width, image.height, image.to_rgba8())
        .ok_or_else(|| anyhow!("Pixel buffer does not match {}x{}", image.width, image.height))?;
    buffer
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("Saved {}", path.display());
    Ok(())
}

/// Path for an intermediate snapshot: `render.png` becomes `render_0008.png`.
fn snapshot_path(output: &Path, samples: u32) -> PathBuf {
    let stem = output.file_stem().and_then(|s| s.to_str()).unwrap_or("render");
    output.with_file_name(format!("{}_{:04}.png", stem, samples))
}

fn run(options: &Options) -> Result<()> {
    let description = build_scene(options)?;
    let settings = RenderSettings::default()
        .with_resolution(options.width, options.height)
        .with_seed(options.seed)
        .with_target_samples(options.frames);

    let mut renderer = Renderer::from_description(&description, settings)?;
    log::info!(
        "Rendering {} frames at {}x{} ({:?})",
        options.frames,
        options.width,
        options.height,
        options.tone.mode
    );

    let start = Instant::now();
    while let Some(stats) = renderer.render() {
        log::info!(
            "Frame {}: {:.1} ms, {} spp",
            stats.frame,
            stats.elapsed.as_secs_f64() * 1000.0,
            stats.samples_per_pixel
        );

        if let Some(every) = options.snapshot_every {
            if stats.samples_per_pixel % every == 0 && !renderer.is_complete() {
                let image = renderer.tone_map(&options.tone);
                save_png(&image, &snapshot_path(&options.output, stats.samples_per_pixel))?;
            }
        }
    }
    log::info!("Total rendering time: {:.2}s", start.elapsed().as_secs_f64());

    let image = renderer.tone_map(&options.tone);
    save_png(&image, &options.output)
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut args = std::env::args();
    let prog = args.next().unwrap_or_else(|| "pt_viewer".to_string());
    let options = parse_options(args)?;

    if options.help {
        print_usage(&prog);
        return Ok(());
    }

    log::info!("Starting path tracer");
    run(&options)
}
