use eq_emotion_detector::utils::SetupUtils;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let model_dir = SetupUtils::ensure_models().await?;
    println!("{}", model_dir.display());
    Ok(())
}
