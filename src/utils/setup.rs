use std::path::PathBuf;
use tracing::info;
use super::model_manager::{ModelManager, create_ferplus_model_info};

pub struct SetupUtils;

impl SetupUtils {
    /// Downloads the FER+ model if it is missing and returns its directory.
    pub async fn ensure_models() -> Result<PathBuf, Box<dyn std::error::Error>> {
        let model_manager = ModelManager::with_default_dir();
        let model_info = create_ferplus_model_info();

        let model_dir = model_manager.ensure_model(&model_info).await?;
        model_manager.verify_model(&model_info).await?;
        info!("Models ready in {}", model_dir.display());

        Ok(model_dir)
    }
}
