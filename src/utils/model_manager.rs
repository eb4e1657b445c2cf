use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use crate::utils::downloader::{sha256_file, DownloadError, ModelDownloader};

pub const FERPLUS_MODEL_NAME: &str = "emotion-ferplus-8";
const FERPLUS_MODEL_URL: &str =
    "https://github.com/onnx/models/raw/main/validated/vision/body_analysis/emotion_ferplus/model/emotion-ferplus-8.onnx";
const MODEL_INFO_FILE: &str = "model_info.json";

#[derive(Error, Debug)]
pub enum ModelManagerError {
    #[error("Download error: {0}")]
    Download(#[from] DownloadError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Model not found at path: {0}")]
    ModelNotFound(String),

    #[error("Checksum mismatch for {file}: expected {expected}, got {actual}")]
    ChecksumMismatch { file: String, expected: String, actual: String },
}

pub type ModelManagerResult<T> = Result<T, ModelManagerError>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    pub version: String,
    pub source: String,
    pub files: Vec<ModelFile>,
    pub config: ModelConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelFile {
    pub filename: String,
    pub url: String,
    pub sha256: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub task: String,
    /// Input tensor shape, NCHW.
    pub input_shape: Vec<usize>,
    /// Output label order.
    pub labels: Vec<String>,
}

pub struct ModelManager {
    models_dir: PathBuf,
    downloader: ModelDownloader,
}

impl ModelManager {
    pub fn new<P: AsRef<Path>>(models_dir: P) -> Self {
        Self {
            models_dir: models_dir.as_ref().to_path_buf(),
            downloader: ModelDownloader::new(),
        }
    }

    pub fn default_models_dir() -> PathBuf {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join("models")
    }

    pub fn with_default_dir() -> Self {
        Self::new(Self::default_models_dir())
    }

    pub fn model_path(&self, model_name: &str) -> PathBuf {
        self.models_dir.join(model_name)
    }

    pub fn model_exists(&self, model_info: &ModelInfo) -> bool {
        let model_dir = self.model_path(&model_info.name);

        model_dir.join(MODEL_INFO_FILE).exists()
            && model_info
                .files
                .iter()
                .all(|file| model_dir.join(&file.filename).exists())
    }

    pub async fn ensure_model(&self, model_info: &ModelInfo) -> ModelManagerResult<PathBuf> {
        let model_dir = self.model_path(&model_info.name);

        if self.model_exists(model_info) {
            return Ok(model_dir);
        }

        info!("Downloading model '{}'...", model_info.name);
        self.download_model(model_info).await?;

        Ok(model_dir)
    }

    pub async fn download_model(&self, model_info: &ModelInfo) -> ModelManagerResult<()> {
        let model_dir = self.model_path(&model_info.name);

        tokio::fs::create_dir_all(&model_dir).await?;

        let downloads: Vec<_> = model_info
            .files
            .iter()
            .map(|file| {
                let dest_path = model_dir.join(&file.filename);
                (file.url.as_str(), dest_path, file.sha256.as_deref())
            })
            .collect();

        self.downloader.download_files(downloads).await?;

        let info_json = serde_json::to_string_pretty(model_info)?;
        tokio::fs::write(model_dir.join(MODEL_INFO_FILE), info_json).await?;

        info!("Model '{}' downloaded to {}", model_info.name, model_dir.display());
        Ok(())
    }

    /// Re-hashes every file that has a pinned checksum.
    pub async fn verify_model(&self, model_info: &ModelInfo) -> ModelManagerResult<()> {
        let model_dir = self.model_path(&model_info.name);

        for file in &model_info.files {
            let path = model_dir.join(&file.filename);
            if !path.exists() {
                return Err(ModelManagerError::ModelNotFound(path.display().to_string()));
            }

            if let Some(expected) = &file.sha256 {
                let actual = sha256_file(&path).await?;
                if !actual.eq_ignore_ascii_case(expected) {
                    return Err(ModelManagerError::ChecksumMismatch {
                        file: file.filename.clone(),
                        expected: expected.clone(),
                        actual,
                    });
                }
            }
        }

        Ok(())
    }

    pub async fn load_model_info<P: AsRef<Path>>(&self, model_path: P) -> ModelManagerResult<ModelInfo> {
        let info_path = model_path.as_ref().join(MODEL_INFO_FILE);

        if !info_path.exists() {
            return Err(ModelManagerError::ModelNotFound(info_path.display().to_string()));
        }

        let info_json = tokio::fs::read_to_string(info_path).await?;
        Ok(serde_json::from_str(&info_json)?)
    }

    pub async fn remove_model(&self, model_name: &str) -> ModelManagerResult<()> {
        let model_dir = self.model_path(model_name);

        if model_dir.exists() {
            tokio::fs::remove_dir_all(model_dir).await?;
            info!("Model '{}' removed", model_name);
        }

        Ok(())
    }
}

/// The ONNX model zoo FER+ network: 64x64 grayscale in, 8 logits out.
pub fn create_ferplus_model_info() -> ModelInfo {
    ModelInfo {
        name: FERPLUS_MODEL_NAME.to_string(),
        version: "8".to_string(),
        source: "onnx/models".to_string(),
        files: vec![ModelFile {
            filename: "model.onnx".to_string(),
            url: FERPLUS_MODEL_URL.to_string(),
            sha256: None,
        }],
        config: ModelConfig {
            task: "facial-expression-recognition".to_string(),
            input_shape: vec![1, 1, 64, 64],
            labels: ["neutral", "happiness", "surprise", "sadness", "anger", "disgust", "fear", "contempt"]
                .iter()
                .map(|label| label.to_string())
                .collect(),
        },
    }
}
