pub mod mock;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use eq_emotion_detector::api::*;
use serde_json::Value;

use mock::TestFaces;

/// Reads and frees an endpoint result, returning `Ok(data)` or `Err(error)`.
fn take_result(result: *mut ApiResult) -> Result<String, String> {
    assert!(!result.is_null());
    let outcome = unsafe {
        let api_result = &*result;
        if api_result.success == 1 {
            Ok(CStr::from_ptr(api_result.data).to_string_lossy().into_owned())
        } else {
            Err(CStr::from_ptr(api_result.error).to_string_lossy().into_owned())
        }
    };
    free_api_result(result);
    outcome
}

fn new_session() -> CString {
    let data = take_result(create_detection_session()).unwrap();
    let json: Value = serde_json::from_str(&data).unwrap();
    CString::new(json["session_id"].as_str().unwrap()).unwrap()
}

fn detect(frame: &image::GrayImage, page: Option<&str>, session: Option<&CString>) -> Result<Value, String> {
    let page = page.map(|p| CString::new(p).unwrap());
    let page_ptr = page.as_ref().map_or(std::ptr::null(), |p| p.as_ptr());
    let session_ptr: *const c_char = session.map_or(std::ptr::null(), |s| s.as_ptr());

    take_result(detect_emotion(
        frame.as_raw().as_ptr(),
        frame.width(),
        frame.height(),
        page_ptr,
        session_ptr,
    ))
    .map(|data| serde_json::from_str(&data).unwrap())
}

#[test]
fn test_health_check() {
    let data = take_result(health_check()).unwrap();
    let json: Value = serde_json::from_str(&data).unwrap();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["message"], "Emotion detection service is running");
}

#[test]
fn test_initialize_detector_once() {
    let config = CString::new(r#"{"backend": {"kind": "heuristic"}}"#).unwrap();
    match take_result(initialize_detector(config.as_ptr())) {
        Ok(message) => assert!(message.contains("heuristic")),
        Err(error) => assert!(error.contains("already initialized")),
    }

    let again = take_result(initialize_detector(std::ptr::null()));
    assert!(again.unwrap_err().contains("already initialized"));
}

#[test]
fn test_initialize_detector_rejects_bad_config() {
    let empty = CString::new("  ").unwrap();
    assert_eq!(take_result(initialize_detector(empty.as_ptr())).unwrap_err(), "Config string is empty");

    let invalid = CString::new(r#"{"history": {"recent_days": 0}}"#).unwrap();
    assert!(take_result(initialize_detector(invalid.as_ptr()))
        .unwrap_err()
        .starts_with("Failed to parse config"));
}

#[test]
fn test_detect_emotion_from_buffer() {
    let json = detect(&TestFaces::surprised(), Some("exercise"), None).unwrap();

    assert_eq!(json["emotion"], "surprise");
    let all = json["all_emotions"].as_object().unwrap();
    let total: f64 = all.values().map(|v| v.as_f64().unwrap()).sum();
    assert!((total - 1.0).abs() < 1e-4);
    assert!(!json["chat_response"].as_str().unwrap().is_empty());
}

#[test]
fn test_detect_emotion_page_changes_reply() {
    let chat = detect(&TestFaces::sad(), Some("chat"), None).unwrap();
    let checkin = detect(&TestFaces::sad(), Some("checkin"), None).unwrap();
    let unknown = detect(&TestFaces::sad(), Some("settings"), None).unwrap();

    assert_eq!(chat["emotion"], "sad");
    assert_ne!(chat["chat_response"], checkin["chat_response"]);
    assert_eq!(chat["chat_response"], unknown["chat_response"]);

    let padded = detect(&TestFaces::sad(), Some(" CheckIn "), None).unwrap();
    assert_eq!(chat["chat_response"], padded["chat_response"]);
}

#[test]
fn test_detect_emotion_rejects_bad_input() {
    let null_pixels = take_result(detect_emotion(std::ptr::null(), 48, 48, std::ptr::null(), std::ptr::null()));
    assert_eq!(null_pixels.unwrap_err(), "Pixel buffer is null");

    let pixels = [0u8; 4];
    let empty = take_result(detect_emotion(pixels.as_ptr(), 0, 4, std::ptr::null(), std::ptr::null()));
    assert!(empty.unwrap_err().contains("at least 1x1"));
}

#[test]
fn test_detect_emotion_unknown_session() {
    let session = CString::new("missing-session").unwrap();
    let error = detect(&TestFaces::neutral(), None, Some(&session)).unwrap_err();
    assert!(error.contains("not found"));
}

#[test]
fn test_detect_emotion_rejects_invalid_session_string() {
    let session = CString::new(vec![0xffu8, 0xfe, 0x41]).unwrap();
    let error = detect(&TestFaces::neutral(), None, Some(&session)).unwrap_err();
    assert_eq!(error, "Invalid UTF-8 string for Session ID string");
}

#[test]
fn test_detect_after_session_removed() {
    let session = new_session();
    take_result(remove_detection_session(session.as_ptr())).unwrap();

    assert!(detect(&TestFaces::sad(), None, Some(&session)).unwrap_err().contains("not found"));
    let all: Value = serde_json::from_str(&take_result(get_check_ins(session.as_ptr())).unwrap()).unwrap();
    assert!(all.as_array().unwrap().is_empty());
    assert!(take_result(remove_detection_session(session.as_ptr())).is_err());
}

#[test]
fn test_import_check_ins_unknown_session() {
    let session = CString::new(format!("never-created-{}", uuid::Uuid::new_v4())).unwrap();
    let records = CString::new("[]").unwrap();

    let error = take_result(import_check_ins(session.as_ptr(), records.as_ptr())).unwrap_err();
    assert!(error.contains("not found"));
    assert!(take_result(remove_detection_session(session.as_ptr())).is_err());
}

#[test]
fn test_session_check_in_flow() {
    let session = new_session();

    detect(&TestFaces::sad(), Some("checkin"), Some(&session)).unwrap();
    detect(&TestFaces::sad(), Some("checkin"), Some(&session)).unwrap();
    detect(&TestFaces::surprised(), Some("checkin"), Some(&session)).unwrap();

    let all: Value = serde_json::from_str(&take_result(get_check_ins(session.as_ptr())).unwrap()).unwrap();
    assert_eq!(all.as_array().unwrap().len(), 3);

    let recent: Value =
        serde_json::from_str(&take_result(get_recent_check_ins(session.as_ptr(), 0)).unwrap()).unwrap();
    assert_eq!(recent.as_array().unwrap().len(), 3);

    let summary: Value =
        serde_json::from_str(&take_result(get_mood_summary(session.as_ptr(), 7)).unwrap()).unwrap();
    assert_eq!(summary["total"], 3);
    assert_eq!(summary["dominant"], "sad");
    assert_eq!(summary["counts"]["sad"], 2);
    assert_eq!(summary["counts"]["surprise"], 1);

    take_result(clear_check_ins(session.as_ptr())).unwrap();
    let cleared: Value = serde_json::from_str(&take_result(get_check_ins(session.as_ptr())).unwrap()).unwrap();
    assert!(cleared.as_array().unwrap().is_empty());

    take_result(remove_detection_session(session.as_ptr())).unwrap();
    assert!(take_result(remove_detection_session(session.as_ptr())).is_err());
}

#[test]
fn test_import_check_ins() {
    let session = new_session();
    let records = CString::new(
        r#"[
            {"id": "a", "emotion": "happy", "confidence": 0.9, "page": "checkin", "recorded_at": "2026-01-01T10:00:00Z"},
            {"id": "b", "emotion": "neutral", "confidence": 0.6, "page": "chat", "recorded_at": "2026-01-02T10:00:00Z"}
        ]"#,
    )
    .unwrap();

    let message = take_result(import_check_ins(session.as_ptr(), records.as_ptr())).unwrap();
    assert_eq!(message, "Imported 2 check-ins");

    let all: Value = serde_json::from_str(&take_result(get_check_ins(session.as_ptr())).unwrap()).unwrap();
    assert_eq!(all.as_array().unwrap().len(), 2);

    let bad = CString::new(r#"[{"id": "c", "emotion": "happy", "confidence": 1.5, "page": "chat", "recorded_at": "2026-01-01T10:00:00Z"}]"#).unwrap();
    assert!(take_result(import_check_ins(session.as_ptr(), bad.as_ptr())).is_err());

    take_result(remove_detection_session(session.as_ptr())).unwrap();
}

#[test]
fn test_null_session_pointers() {
    assert_eq!(take_result(get_check_ins(std::ptr::null())).unwrap_err(), "Session ID string is null");
    assert!(take_result(clear_check_ins(std::ptr::null())).is_err());
    assert!(take_result(get_mood_summary(std::ptr::null(), 7)).is_err());
}

#[test]
fn test_free_null_result() {
    free_api_result(std::ptr::null_mut());
}
