//! Argument parsing, config file handling and the run itself.
//!
//! Parameters come from three layers: built-in defaults, an optional JSON
//! config file (`--config`), and explicit flags. Later layers win.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, ValueEnum};
use edgeefy::io::{self, OutputFormat};
use edgeefy::{
    BlurCombine, CannyConfig, CannyStages, Image, Pixel, ThresholdRatios, WeakEdgePolicy,
    detect_with_stages,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_OUTPUT: &str = "out.jpg";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Parser, Debug)]
#[command(name = "edgeefy")]
#[command(about = "Detect edges in a PNG or JPEG image with the Canny method")]
pub struct Cli {
    /// Input image (PNG or JPEG)
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Output image; `.png` keeps alpha, anything else is written as JPEG
    /// [default: out.jpg]
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Smooth before edge detection [default: true]
    #[arg(long)]
    pub blur: Option<bool>,

    /// Lower threshold as a ratio of the brightest pixel, in (0, 1) [default: 0.2]
    #[arg(long)]
    pub min: Option<f64>,

    /// Upper threshold as a ratio of the brightest pixel, in (0, 1) [default: 0.6]
    #[arg(long)]
    pub max: Option<f64>,

    /// Odd binomial kernel length for smoothing [default: 5]
    #[arg(long)]
    pub kernel_size: Option<usize>,

    /// How horizontal and vertical smoothing are combined [default: separable]
    #[arg(long, value_enum)]
    pub blur_combine: Option<CombineName>,

    /// What happens to weak pixels next to strong ones [default: keep-promoted]
    #[arg(long, value_enum)]
    pub weak_policy: Option<WeakPolicyName>,

    /// JSON file with any of the run parameters
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write run statistics as JSON to this path
    #[arg(long)]
    pub stats_json: Option<PathBuf>,

    /// Write every intermediate stage as PNG into this directory
    #[arg(long)]
    pub dump_stages: Option<PathBuf>,

    /// Log filter, e.g. `info` or `edgeefy_canny=debug` [default: info]
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CombineName {
    Separable,
    Magnitude,
}

impl From<CombineName> for BlurCombine {
    fn from(v: CombineName) -> Self {
        match v {
            CombineName::Separable => BlurCombine::Separable,
            CombineName::Magnitude => BlurCombine::Magnitude,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeakPolicyName {
    KeepPromoted,
    EraseWeak,
}

impl From<WeakPolicyName> for WeakEdgePolicy {
    fn from(v: WeakPolicyName) -> Self {
        match v {
            WeakPolicyName::KeepPromoted => WeakEdgePolicy::KeepPromoted,
            WeakPolicyName::EraseWeak => WeakEdgePolicy::EraseWeak,
        }
    }
}

/// Run parameters; every field is optional so files and flags can be layered.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub blur: Option<bool>,
    pub min_ratio: Option<f64>,
    pub max_ratio: Option<f64>,
    pub kernel_size: Option<usize>,
    pub blur_combine: Option<CombineName>,
    pub weak_policy: Option<WeakPolicyName>,
    pub stats_json: Option<PathBuf>,
    pub dump_stages: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl RunConfig {
    /// Fields set in `other` replace those in `self`.
    pub fn overlay(self, other: RunConfig) -> RunConfig {
        RunConfig {
            input: other.input.or(self.input),
            output: other.output.or(self.output),
            blur: other.blur.or(self.blur),
            min_ratio: other.min_ratio.or(self.min_ratio),
            max_ratio: other.max_ratio.or(self.max_ratio),
            kernel_size: other.kernel_size.or(self.kernel_size),
            blur_combine: other.blur_combine.or(self.blur_combine),
            weak_policy: other.weak_policy.or(self.weak_policy),
            stats_json: other.stats_json.or(self.stats_json),
            dump_stages: other.dump_stages.or(self.dump_stages),
            log_level: other.log_level.or(self.log_level),
        }
    }

    /// Pipeline parameters with defaults filled in; rejects bad ratios and
    /// kernel sizes before any image is touched.
    pub fn canny_config(&self) -> Result<CannyConfig> {
        let defaults = CannyConfig::default();
        let ratios = ThresholdRatios::new(
            self.min_ratio.unwrap_or(defaults.ratios.min()),
            self.max_ratio.unwrap_or(defaults.ratios.max()),
        )
        .context("invalid threshold ratios")?;

        let cfg = CannyConfig {
            blur: self.blur.unwrap_or(defaults.blur),
            kernel_size: self.kernel_size.unwrap_or(defaults.kernel_size),
            blur_combine: self.blur_combine.map_or(defaults.blur_combine, Into::into),
            ratios,
            weak_policy: self.weak_policy.map_or(defaults.weak_policy, Into::into),
        };
        cfg.validate().context("invalid pipeline parameters")?;
        Ok(cfg)
    }

    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }
}

impl From<Cli> for RunConfig {
    fn from(cli: Cli) -> Self {
        RunConfig {
            input: cli.input,
            output: cli.output,
            blur: cli.blur,
            min_ratio: cli.min,
            max_ratio: cli.max,
            kernel_size: cli.kernel_size,
            blur_combine: cli.blur_combine,
            weak_policy: cli.weak_policy,
            stats_json: cli.stats_json,
            dump_stages: cli.dump_stages,
            log_level: cli.log_level,
        }
    }
}

pub fn load_config(path: &Path) -> Result<RunConfig> {
    let file = File::open(path).with_context(|| format!("opening config {}", path.display()))?;
    let cfg: RunConfig = serde_json::from_reader(file)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(cfg)
}

/// Defaults < config file < flags.
pub fn resolve_config(cli: Cli) -> Result<RunConfig> {
    let file_cfg = match &cli.config {
        Some(path) => load_config(path)?,
        None => RunConfig::default(),
    };
    Ok(file_cfg.overlay(RunConfig::from(cli)))
}

pub fn init_logging(level: Option<&str>) -> Result<()> {
    let filter = EnvFilter::try_new(level.unwrap_or(DEFAULT_LOG_LEVEL))
        .context("parsing log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("installing log subscriber: {e}"))
}

#[derive(Debug, Serialize)]
pub struct RunStats {
    pub input: String,
    pub output: String,
    pub format: &'static str,
    pub width: usize,
    pub height: usize,
    pub blur: bool,
    pub kernel_size: usize,
    pub blur_combine: CombineName,
    pub weak_policy: WeakPolicyName,
    pub min_ratio: f64,
    pub max_ratio: f64,
    pub low_threshold: f64,
    pub high_threshold: f64,
    pub strong_edges: usize,
    pub promoted: usize,
    /// Wall-clock time for the pipeline alone, in milliseconds.
    pub elapsed_ms: f64,
}

pub fn run(cfg: &RunConfig) -> Result<RunStats> {
    let Some(input) = cfg.input.as_deref() else {
        bail!("no input image given; pass --input or set `input` in the config file");
    };
    let canny = cfg.canny_config()?;
    let output = cfg.output_path();

    let img = io::load(input)?;
    info!(
        input = %input.display(),
        width = img.width(),
        height = img.height(),
        "loaded image"
    );

    let t0 = Instant::now();
    let stages = detect_with_stages(&img.as_view(), &canny)
        .with_context(|| format!("detecting edges in {}", input.display()))?;
    let elapsed_ms = t0.elapsed().as_secs_f64() * 1e3;

    let format = io::save(&stages.edges.image, &output)?;
    info!(
        output = %output.display(),
        strong = stages.edges.strong.len(),
        elapsed_ms,
        "wrote edge map"
    );

    if let Some(dir) = &cfg.dump_stages {
        dump_stages(&stages, dir)?;
    }

    let stats = RunStats {
        input: input.to_string_lossy().into_owned(),
        output: output.to_string_lossy().into_owned(),
        format: match format {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpeg",
        },
        width: img.width(),
        height: img.height(),
        blur: canny.blur,
        kernel_size: canny.kernel_size,
        blur_combine: match canny.blur_combine {
            BlurCombine::Separable => CombineName::Separable,
            BlurCombine::Magnitude => CombineName::Magnitude,
        },
        weak_policy: match canny.weak_policy {
            WeakEdgePolicy::KeepPromoted => WeakPolicyName::KeepPromoted,
            WeakEdgePolicy::EraseWeak => WeakPolicyName::EraseWeak,
        },
        min_ratio: canny.ratios.min(),
        max_ratio: canny.ratios.max(),
        low_threshold: stages.thresholds.low,
        high_threshold: stages.thresholds.high,
        strong_edges: stages.edges.strong.len(),
        promoted: stages.edges.promoted.len(),
        elapsed_ms,
    };

    if let Some(path) = &cfg.stats_json {
        write_json(path, &stats)?;
        debug!(path = %path.display(), "wrote stats");
    }

    Ok(stats)
}

fn dump_stages(stages: &CannyStages, dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    // Direction field, [-90, 90] degrees mapped onto the full gray range.
    let direction: Image<Pixel> = stages
        .gradient
        .direction
        .map(|&d| Pixel::opaque(((d + 90.0) / 180.0 * 255.0).round().clamp(0.0, 255.0) as u8));

    let images = [
        ("smoothed.png", &stages.smoothed),
        ("magnitude.png", &stages.gradient.magnitude),
        ("direction.png", &direction),
        ("suppressed.png", &stages.suppressed),
        ("edges.png", &stages.edges.image),
    ];
    for (name, img) in images {
        io::save(img, &dir.join(name))?;
    }
    debug!(dir = %dir.display(), "dumped stages");
    Ok(())
}

fn write_json(path: &Path, value: &impl Serialize) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("creating json {}", path.display()))?;
    serde_json::to_writer_pretty(&mut file, value).context("serializing json")?;
    file.write_all(b"\n")?;
    Ok(())
}
