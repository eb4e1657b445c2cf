use std::os::raw::c_char;
use crate::DetectorConfig;
use crate::api::{
    types::ApiResult,
    services::{
        validation_service::*,
        detection_service::{initialize_shared_detector, detect_with_shared_detector, format_detection_json, recent_days_setting},
        checkin_service::{
            create_session, remove_session, import_check_ins as import_session_check_ins,
            get_all_check_ins, get_recent_check_ins as recent_session_check_ins,
            clear_check_ins as clear_session_check_ins, mood_summary,
        },
    }
};

#[no_mangle]
pub extern "C" fn initialize_detector(config_json: *const c_char) -> *mut ApiResult {
    let config = match parse_optional_c_string(config_json) {
        Some(config_str) => {
            if let Err(result) = validate_config_json(&config_str) {
                return result;
            }
            match DetectorConfig::from_json_str(&config_str) {
                Ok(c) => c,
                Err(e) => return ApiResult::error_ptr(format!("Failed to parse config: {}", e)),
            }
        }
        None => DetectorConfig::default(),
    };

    match initialize_shared_detector(config) {
        Ok(backend) => ApiResult::success(format!("Detector initialized with {} backend", backend)).into_raw(),
        Err(result) => result,
    }
}

#[no_mangle]
pub extern "C" fn create_detection_session() -> *mut ApiResult {
    ApiResult::from_result(create_session().map(|session_id| {
        serde_json::json!({
            "session_id": session_id
        }).to_string()
    }))
}

#[no_mangle]
pub extern "C" fn remove_detection_session(session_id: *const c_char) -> *mut ApiResult {
    let session_id_str = match parse_c_string(session_id, "Session ID string") {
        Ok(s) => s,
        Err(result) => return result,
    };

    ApiResult::from_result(
        remove_session(&session_id_str)
            .map(|_| format!("Session '{}' removed successfully", session_id_str)),
    )
}

/// `pixels` must point at `width * height` bytes of row-major grayscale data.
/// `page` and `session_id` may be null; a non-null `session_id` must be valid UTF-8.
#[no_mangle]
pub extern "C" fn detect_emotion(
    pixels: *const u8,
    width: u32,
    height: u32,
    page: *const c_char,
    session_id: *const c_char,
) -> *mut ApiResult {
    let frame = match parse_gray_frame(pixels, width, height) {
        Ok(frame) => frame,
        Err(result) => return result,
    };

    let page_str = parse_optional_c_string(page);
    let session_str = if session_id.is_null() {
        None
    } else {
        match parse_c_string(session_id, "Session ID string") {
            Ok(s) => Some(s),
            Err(result) => return result,
        }
    };

    ApiResult::from_result(
        detect_with_shared_detector(&frame, page_str.as_deref(), session_str.as_deref())
            .and_then(|response| format_detection_json(&response)),
    )
}

#[no_mangle]
pub extern "C" fn get_check_ins(session_id: *const c_char) -> *mut ApiResult {
    let session_id_str = match parse_c_string(session_id, "Session ID string") {
        Ok(s) => s,
        Err(result) => return result,
    };

    ApiResult::from_result(get_all_check_ins(&session_id_str))
}

/// `days == 0` uses the configured history window.
#[no_mangle]
pub extern "C" fn get_recent_check_ins(session_id: *const c_char, days: u32) -> *mut ApiResult {
    let session_id_str = match parse_c_string(session_id, "Session ID string") {
        Ok(s) => s,
        Err(result) => return result,
    };

    ApiResult::from_result(
        resolve_days(days).and_then(|days| recent_session_check_ins(&session_id_str, days)),
    )
}

#[no_mangle]
pub extern "C" fn import_check_ins(session_id: *const c_char, check_ins_json: *const c_char) -> *mut ApiResult {
    let session_id_str = match parse_c_string(session_id, "Session ID string") {
        Ok(s) => s,
        Err(result) => return result,
    };

    let json_str = match parse_c_string(check_ins_json, "Check-ins string") {
        Ok(s) => s,
        Err(result) => return result,
    };

    ApiResult::from_result(
        import_session_check_ins(&session_id_str, &json_str)
            .map(|count| format!("Imported {} check-ins", count)),
    )
}

#[no_mangle]
pub extern "C" fn clear_check_ins(session_id: *const c_char) -> *mut ApiResult {
    let session_id_str = match parse_c_string(session_id, "Session ID string") {
        Ok(s) => s,
        Err(result) => return result,
    };

    ApiResult::from_result(clear_session_check_ins(&session_id_str))
}

/// `days == 0` uses the configured history window.
#[no_mangle]
pub extern "C" fn get_mood_summary(session_id: *const c_char, days: u32) -> *mut ApiResult {
    let session_id_str = match parse_c_string(session_id, "Session ID string") {
        Ok(s) => s,
        Err(result) => return result,
    };

    ApiResult::from_result(
        resolve_days(days)
            .and_then(|days| mood_summary(&session_id_str, days))
            .map(|summary| summary.to_string()),
    )
}

#[no_mangle]
pub extern "C" fn health_check() -> *mut ApiResult {
    let response_data = serde_json::json!({
        "status": "healthy",
        "message": "Emotion detection service is running"
    }).to_string();

    ApiResult::success(response_data).into_raw()
}

#[no_mangle]
pub extern "C" fn free_api_result(result: *mut ApiResult) {
    if result.is_null() {
        return;
    }

    unsafe {
        let result = Box::from_raw(result);
        if !result.data.is_null() {
            let _ = std::ffi::CString::from_raw(result.data);
        }
        if !result.error.is_null() {
            let _ = std::ffi::CString::from_raw(result.error);
        }
    }
}

fn resolve_days(days: u32) -> Result<u32, String> {
    if days == 0 {
        recent_days_setting()
    } else {
        Ok(days)
    }
}
