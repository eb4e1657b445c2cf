pub mod downloader;
pub mod model_manager;
pub mod setup;

pub use downloader::{ModelDownloader, DownloadError, DownloadResult, sha256_file};
pub use model_manager::{
    ModelManager, ModelInfo, ModelFile, ModelConfig,
    ModelManagerError, ModelManagerResult, create_ferplus_model_info, FERPLUS_MODEL_NAME,
};
pub use setup::SetupUtils;
