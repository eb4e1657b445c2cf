use chrono::Utc;
use serde_json::{Map, Value};
use crate::Emotion;
use crate::api::types::SessionId;
use crate::modules::checkin::{CheckInRecord, CheckInStore};

pub fn create_session() -> Result<SessionId, String> {
    let session_id = uuid::Uuid::new_v4().to_string();
    CheckInStore::open_session(&session_id)?;
    Ok(session_id)
}

pub fn remove_session(session_id: &SessionId) -> Result<(), String> {
    if !CheckInStore::has_session(session_id)? {
        return Err(format!("Session '{}' not found", session_id));
    }
    CheckInStore::remove_session(session_id)
}

pub fn import_check_ins(session_id: &SessionId, records_json: &str) -> Result<usize, String> {
    if !CheckInStore::has_session(session_id)? {
        return Err(format!("Session '{}' not found", session_id));
    }

    if records_json.trim().is_empty() {
        return Ok(0);
    }

    let records: Vec<CheckInRecord> = serde_json::from_str(records_json)
        .map_err(|e| format!("Failed to parse check-ins: {}", e))?;
    let count = records.len();

    CheckInStore::import(session_id, records)
        .map_err(|e| format!("Failed to import check-ins: {}", e))?;

    Ok(count)
}

pub fn get_all_check_ins(session_id: &SessionId) -> Result<String, String> {
    let records = CheckInStore::get_all(session_id)
        .map_err(|e| format!("Failed to get check-ins: {}", e))?;

    serde_json::to_string(&records)
        .map_err(|e| format!("Failed to serialize check-ins: {}", e))
}

pub fn get_recent_check_ins(session_id: &SessionId, days: u32) -> Result<String, String> {
    let records = CheckInStore::get_recent(session_id, days, Utc::now())
        .map_err(|e| format!("Failed to get check-ins: {}", e))?;

    serde_json::to_string(&records)
        .map_err(|e| format!("Failed to serialize check-ins: {}", e))
}

pub fn clear_check_ins(session_id: &SessionId) -> Result<String, String> {
    CheckInStore::clear(session_id)
        .map_err(|e| format!("Failed to clear check-ins: {}", e))?;
    Ok("Check-ins cleared successfully".to_string())
}

/// Emotion frequencies over the last `days` days plus the most frequent one
/// (earlier label wins ties).
pub fn mood_summary(session_id: &SessionId, days: u32) -> Result<Value, String> {
    let counts = CheckInStore::emotion_counts(session_id, days, Utc::now())?;

    let total: usize = counts.iter().map(|(_, count)| count).sum();
    let dominant = counts
        .iter()
        .fold(None, |best: Option<&(Emotion, usize)>, entry| match best {
            Some(b) if entry.1 <= b.1 => Some(b),
            _ => Some(entry),
        })
        .map(|(emotion, _)| emotion.as_str());

    let mut count_map = Map::new();
    for (emotion, count) in &counts {
        count_map.insert(emotion.as_str().to_string(), Value::from(*count));
    }

    Ok(serde_json::json!({
        "session_id": session_id,
        "days": days,
        "total": total,
        "dominant": dominant,
        "counts": count_map,
    }))
}
