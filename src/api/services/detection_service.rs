use std::sync::{Arc, Mutex, OnceLock};
use image::GrayImage;
use tracing::info;
use crate::{DetectionResponse, DetectorConfig, EmotionDetector, HistoryConfig, Page};
use crate::api::types::ApiResult;
use crate::modules::checkin::{CheckInRecord, CheckInStore};

pub struct DetectorState {
    pub config: DetectorConfig,
    pub detector: EmotionDetector,
}

pub static SHARED_DETECTOR: OnceLock<Arc<Mutex<DetectorState>>> = OnceLock::new();

pub fn initialize_shared_detector(config: DetectorConfig) -> Result<String, *mut ApiResult> {
    let detector = EmotionDetector::from_config(&config)
        .map_err(|e| ApiResult::error_ptr(format!("Failed to initialize detector: {}", e)))?;
    let backend = detector.backend_name();

    SHARED_DETECTOR.set(Arc::new(Mutex::new(DetectorState { config, detector })))
        .map_err(|_| ApiResult::error_ptr("Detector already initialized"))?;

    info!("Emotion detector initialized with {} backend", backend);
    Ok(backend.to_string())
}

/// The shared detector, falling back to the default heuristic setup when
/// `initialize_detector` was never called.
pub fn shared_detector() -> &'static Arc<Mutex<DetectorState>> {
    SHARED_DETECTOR.get_or_init(|| {
        info!("Emotion detector not initialized, using default heuristic backend");
        Arc::new(Mutex::new(DetectorState {
            config: DetectorConfig::default(),
            detector: EmotionDetector::heuristic(),
        }))
    })
}

/// Configured history window. Reading it never installs a detector, so
/// `initialize_detector` still works after a history query.
pub fn recent_days_setting() -> Result<u32, String> {
    match SHARED_DETECTOR.get() {
        Some(shared) => {
            let state = shared.lock()
                .map_err(|_| "Failed to acquire detector lock".to_string())?;
            Ok(state.config.history.recent_days)
        }
        None => Ok(HistoryConfig::default().recent_days),
    }
}

/// Runs detection on the shared detector. A missing page uses the configured
/// default; when a session id is given the result is stored as a check-in.
pub fn detect_with_shared_detector(
    frame: &GrayImage,
    page: Option<&str>,
    session_id: Option<&str>,
) -> Result<DetectionResponse, String> {
    let session_id = session_id.map(|s| s.to_string());
    if let Some(session_id) = &session_id {
        if !CheckInStore::has_session(session_id)? {
            return Err(format!("Session '{}' not found. Call create_detection_session first.", session_id));
        }
    }

    let mut state = shared_detector().lock()
        .map_err(|_| "Failed to acquire detector lock".to_string())?;

    let page = match page {
        Some(p) => Page::from_param(Some(p)),
        None => state.config.detection.default_page,
    };
    let record_check_ins = state.config.detection.record_check_ins;

    let response = state.detector.detect(frame, page);
    drop(state);

    if let (Some(session_id), true) = (&session_id, record_check_ins) {
        let record = CheckInRecord::new(response.emotion, response.confidence, page);
        CheckInStore::insert(session_id, record)
            .map_err(|e| format!("Failed to store check-in: {}", e))?;
    }

    Ok(response)
}

pub fn format_detection_json(response: &DetectionResponse) -> Result<String, String> {
    serde_json::to_string(response)
        .map_err(|e| format!("Failed to serialize detection result: {}", e))
}
