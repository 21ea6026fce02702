use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use wallgen::generate::params::FilterOrder;
use wallgen::{
    ConfigManager, FileSelection, GenerationInputs, OutputColors, OutputTarget,
    PostProcessingParameters, Presets, Rgb8, ScalingMethod, StoryMethod, UnsharpenLevel,
    WallgenError, WallsetSession,
};

#[derive(Parser, Debug)]
#[command(name = "wallgen", version, about = "Generate perspective wallsets from flat textures")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List resolutions, output formats and output file types.
    Profiles(ProfilesArgs),
    /// Generate a wallset and write it to disk.
    Generate(GenerateArgs),
    /// Write the preview strip of a wallset as a PNG.
    Preview(PreviewArgs),
}

#[derive(Args, Debug)]
struct ProfilesArgs {
    /// Configuration JSON.
    #[arg(long)]
    config: PathBuf,
}

#[derive(Args, Debug)]
struct SelectionArgs {
    /// Configuration JSON.
    #[arg(long)]
    config: PathBuf,

    /// Settings presets JSON; defaults to `default-settings.json` in the working directory.
    #[arg(long)]
    presets: Option<PathBuf>,

    /// Resolution profile name.
    #[arg(long)]
    profile: Option<String>,

    /// Source image; repeat for one source per story.
    #[arg(long = "source", required = true)]
    sources: Vec<PathBuf>,

    /// Number of stories (1-3).
    #[arg(long, default_value_t = 1)]
    stories: u32,

    /// How multi-story sources are obtained.
    #[arg(long, value_enum, default_value_t = StoryMethodChoice::Tiled)]
    story_method: StoryMethodChoice,

    /// Near darkening strength (0-1).
    #[arg(long)]
    near_darkening: Option<f32>,

    /// Far darkening strength (0-1).
    #[arg(long)]
    far_darkening: Option<f32>,

    /// Scaling method (nearest-neighbour, bilinear, bicubic, resample).
    #[arg(long)]
    scaling: Option<ScalingMethod>,

    /// Unsharp mask level (none, soft, normal, very-sharp, oversharpened).
    #[arg(long)]
    unsharpen: Option<UnsharpenLevel>,

    /// Softening factor (0-1).
    #[arg(long)]
    soften: Option<f32>,

    /// Order of unsharp masking and softening.
    #[arg(long, value_enum)]
    filter_order: Option<FilterOrderChoice>,

    /// Distance blend color as `#rrggbb`.
    #[arg(long, value_parser = Rgb8::parse_hex)]
    blend_color: Option<Rgb8>,

    /// Store the effective settings as presets JSON.
    #[arg(long)]
    save_presets: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[command(flatten)]
    selection: SelectionArgs,

    /// Output configuration name.
    #[arg(long)]
    output_format: Option<String>,

    /// Output file type name (e.g. PNG).
    #[arg(long)]
    file_type: Option<String>,

    /// Directory receiving the output files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Base output file name.
    #[arg(long)]
    name: String,

    /// Write real alpha transparency when the file type supports it.
    #[arg(long)]
    transparency: bool,

    /// Caption color as `#rrggbb`.
    #[arg(long, value_parser = Rgb8::parse_hex)]
    text_color: Option<Rgb8>,

    /// Atlas background color as `#rrggbb`.
    #[arg(long, value_parser = Rgb8::parse_hex)]
    background_color: Option<Rgb8>,

    /// Color-key marker as `#rrggbb`.
    #[arg(long, value_parser = Rgb8::parse_hex)]
    transparency_color: Option<Rgb8>,

    /// Region outline color as `#rrggbb`.
    #[arg(long, value_parser = Rgb8::parse_hex)]
    border_color: Option<Rgb8>,
}

#[derive(Args, Debug)]
struct PreviewArgs {
    #[command(flatten)]
    selection: SelectionArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StoryMethodChoice {
    Tiled,
    SingleFile,
    IndividualFiles,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FilterOrderChoice {
    UnsharpFirst,
    SoftenFirst,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let res = match cli.cmd {
        Command::Profiles(args) => cmd_profiles(args),
        Command::Generate(args) => cmd_generate(args),
        Command::Preview(args) => cmd_preview(args),
    };
    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = ?err, "wallgen failed");
            match err.downcast_ref::<WallgenError>() {
                Some(e) => eprintln!("{}\n{e}", e.user_message()),
                None => eprintln!("{err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: &Path) -> anyhow::Result<ConfigManager> {
    ConfigManager::from_path(path)
        .with_context(|| format!("load configuration '{}'", path.display()))
}

fn cmd_profiles(args: ProfilesArgs) -> anyhow::Result<()> {
    let config = load_config(&args.config)?;
    println!("resolutions:");
    for r in config.available_resolutions() {
        println!("  {r}");
    }
    println!("output formats:");
    for f in config.available_output_formats() {
        println!("  {f}");
    }
    println!("output file types:");
    for t in config.available_output_file_types() {
        println!("  {t}");
    }
    Ok(())
}

/// Settings merged from presets and command-line overrides.
struct Resolved {
    presets: Presets,
    inputs: GenerationInputs,
}

impl SelectionArgs {
    fn base_presets(&self) -> anyhow::Result<Presets> {
        if let Some(path) = &self.presets {
            return Ok(Presets::from_path(path)?);
        }
        let cwd = std::env::current_dir().context("resolve working directory")?;
        Ok(Presets::load_default(cwd)?.unwrap_or_default())
    }

    fn resolve(&self) -> anyhow::Result<Resolved> {
        let mut presets = self.base_presets()?;
        if let Some(p) = &self.profile {
            presets.basic_options.resolution = Some(p.clone());
        }
        let p = &mut presets.processing_options;
        if let Some(v) = self.near_darkening {
            p.near_darkening = v;
        }
        if let Some(v) = self.far_darkening {
            p.far_darkening = v;
        }
        if let Some(v) = self.scaling {
            p.scaling_method = v;
        }
        if let Some(v) = self.unsharpen {
            p.unsharp_mask = v;
        }
        if self.soften.is_some() {
            p.soften = self.soften;
        }
        if let Some(v) = self.filter_order {
            p.filter_order = match v {
                FilterOrderChoice::UnsharpFirst => FilterOrder::UnsharpThenSoften,
                FilterOrderChoice::SoftenFirst => FilterOrder::SoftenThenUnsharp,
            };
        }
        if let Some(c) = self.blend_color {
            presets.color_options.distance_blend_color = c;
        }

        let resolution = presets
            .basic_options
            .resolution
            .clone()
            .context("no resolution profile given (use --profile or presets)")?;
        let selection = FileSelection {
            sources: self.sources.iter().cloned().map(Some).collect(),
            story_count: self.stories,
            story_method: match self.story_method {
                StoryMethodChoice::Tiled => StoryMethod::Tiled,
                StoryMethodChoice::SingleFile => StoryMethod::SingleFile,
                StoryMethodChoice::IndividualFiles => StoryMethod::IndividualFiles,
            },
        };
        let params: PostProcessingParameters = presets.post_processing();
        Ok(Resolved {
            inputs: GenerationInputs {
                selection,
                params,
                resolution,
            },
            presets,
        })
    }
}

fn save_presets(path: Option<&Path>, presets: &Presets) -> anyhow::Result<()> {
    if let Some(path) = path {
        presets.to_path(path)?;
        eprintln!("presets saved to {}", path.display());
    }
    Ok(())
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let Resolved {
        mut presets,
        inputs,
    } = args.selection.resolve()?;

    let basic = &mut presets.basic_options;
    if let Some(f) = &args.output_format {
        basic.output_format = Some(f.clone());
    }
    if let Some(t) = &args.file_type {
        basic.output_file_type = Some(t.clone());
    }
    let output_format = basic
        .output_format
        .clone()
        .context("no output format given (use --output-format or presets)")?;
    let file_type = basic
        .output_file_type
        .clone()
        .context("no output file type given (use --file-type or presets)")?;

    let colors_opt = &mut presets.color_options;
    if args.transparency {
        colors_opt.use_alpha_transparency = true;
    }
    let overrides = [
        (args.text_color, &mut colors_opt.text_color),
        (args.background_color, &mut colors_opt.background_color),
        (args.transparency_color, &mut colors_opt.transparency_color),
        (args.border_color, &mut colors_opt.border_color),
    ];
    for (value, slot) in overrides {
        if let Some(c) = value {
            *slot = c;
        }
    }
    let colors: OutputColors = presets.output_colors();

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let target = OutputTarget {
        output_format,
        file_type,
        target_dir: args.out_dir.clone(),
        base_name: args.name.clone(),
        use_transparency: presets.color_options.use_alpha_transparency,
        colors,
    };

    let mut session = WallsetSession::new(load_config(&args.selection.config)?);
    let written = session.generate_output(&inputs, &target)?;
    for path in &written {
        eprintln!("wrote {}", path.display());
    }
    save_presets(args.selection.save_presets.as_deref(), &presets)
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let Resolved { presets, inputs } = args.selection.resolve()?;
    let mut session = WallsetSession::new(load_config(&args.selection.config)?);
    let preview = session.generate_preview(&inputs)?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    preview
        .save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());

    save_presets(args.selection.save_presets.as_deref(), &presets)
}
