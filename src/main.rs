use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use eq_emotion_detector::modules::face::crop_face;
use eq_emotion_detector::{
    BackendKind, DetectorConfig, EmotionDetector, FaceRegion, HeuristicScorer, Page,
};
use image::GrayImage;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "eq-emotion", version, about = "Detect the dominant emotion in a face image")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score an image and print the companion response as JSON
    Score {
        image: PathBuf,

        /// Requesting page: chat, exercise or checkin
        #[arg(long)]
        page: Option<String>,

        /// TOML configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Emotion backend, overrides the configuration
        #[arg(long, value_parser = parse_backend)]
        backend: Option<BackendKind>,

        /// Face rectangle as x,y,width,height
        #[arg(long, value_parser = parse_region)]
        region: Option<FaceRegion>,
    },
    /// Print the heuristic measurements of a face crop
    Features {
        image: PathBuf,

        /// Face rectangle as x,y,width,height
        #[arg(long, value_parser = parse_region)]
        region: Option<FaceRegion>,
    },
}

fn parse_backend(value: &str) -> Result<BackendKind, String> {
    match value.to_ascii_lowercase().as_str() {
        "heuristic" => Ok(BackendKind::Heuristic),
        "onnx" => Ok(BackendKind::Onnx),
        other => Err(format!("unknown backend '{}', expected heuristic or onnx", other)),
    }
}

fn parse_region(value: &str) -> Result<FaceRegion, String> {
    let parts = value
        .split(',')
        .map(|part| part.trim().parse::<u32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid region '{}': {}", value, e))?;

    match parts.as_slice() {
        [x, y, width, height] if *width > 0 && *height > 0 => {
            Ok(FaceRegion::new(*x, *y, *width, *height))
        }
        _ => Err(format!("region must be x,y,width,height with a non-zero size, got '{}'", value)),
    }
}

fn load_gray(path: &Path) -> Result<GrayImage, Box<dyn std::error::Error>> {
    let image = image::open(path)?;
    Ok(image.to_luma8())
}

fn run_score(
    image_path: &Path,
    page: Option<String>,
    config_path: Option<PathBuf>,
    backend: Option<BackendKind>,
    region: Option<FaceRegion>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match config_path {
        Some(path) => DetectorConfig::load(path)?,
        None => DetectorConfig::default(),
    };
    if let Some(kind) = backend {
        config.backend.kind = kind;
    }
    if region.is_some() {
        config.detection.face_region = region;
    }
    config.validate()?;

    let page = match page {
        Some(p) => Page::from_param(Some(&p)),
        None => config.detection.default_page,
    };

    let mut detector = EmotionDetector::from_config(&config)?;
    info!("Scoring {} with {} backend", image_path.display(), detector.backend_name());

    let frame = load_gray(image_path)?;
    let response = detector.detect(&frame, page);

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn run_features(image_path: &Path, region: Option<FaceRegion>) -> Result<(), Box<dyn std::error::Error>> {
    let frame = load_gray(image_path)?;
    let (width, height) = frame.dimensions();
    let region = region.unwrap_or_else(|| FaceRegion::new(0, 0, width, height));

    let face = crop_face(&frame, &region)
        .ok_or_else(|| format!("region {:?} lies outside the {}x{} image", region, width, height))?;

    let grid = HeuristicScorer::canonicalize(&face)?;
    let features = HeuristicScorer::extract_features(grid.view())?;
    let scores = HeuristicScorer::score_features(&features);

    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "features": features,
            "scores": scores,
        }))?
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Score { image, page, config, backend, region } => {
            run_score(&image, page, config, backend, region)
        }
        Command::Features { image, region } => run_features(&image, region),
    }
}
