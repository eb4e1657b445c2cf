use crate::api::types::SessionId;
use crate::modules::emotion::Emotion;
use crate::modules::response::Page;
use chrono::{DateTime, Duration, Utc};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;

lazy_static! {
    static ref CHECK_INS: Mutex<HashMap<SessionId, Vec<CheckInRecord>>> = Mutex::new(HashMap::new());
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckInRecord {
    pub id: String,
    pub emotion: Emotion,
    pub confidence: f32,
    pub page: Page,
    pub recorded_at: DateTime<Utc>,
}

impl CheckInRecord {
    pub fn new(emotion: Emotion, confidence: f32, page: Page) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            emotion,
            confidence,
            page,
            recorded_at: Utc::now(),
        }
    }
}

/// Process-wide check-in log keyed by session id.
pub struct CheckInStore;

impl CheckInStore {
    pub fn open_session(session_id: &SessionId) -> Result<(), String> {
        let mut check_ins = CHECK_INS.lock().map_err(|_| "Failed to acquire lock")?;

        if check_ins.contains_key(session_id) {
            return Err(format!("Session '{}' already exists", session_id));
        }
        check_ins.insert(session_id.clone(), Vec::new());

        Ok(())
    }

    pub fn has_session(session_id: &SessionId) -> Result<bool, String> {
        let check_ins = CHECK_INS.lock().map_err(|_| "Failed to acquire lock")?;

        Ok(check_ins.contains_key(session_id))
    }

    /// Appends to an open session. Unknown sessions are an error, never created here.
    pub fn insert(session_id: &SessionId, record: CheckInRecord) -> Result<(), String> {
        let mut check_ins = CHECK_INS.lock().map_err(|_| "Failed to acquire lock")?;
        let session = check_ins
            .get_mut(session_id)
            .ok_or_else(|| format!("Session '{}' not found", session_id))?;

        session.push(record);

        Ok(())
    }

    pub fn get_all(session_id: &SessionId) -> Result<Vec<CheckInRecord>, String> {
        let check_ins = CHECK_INS.lock().map_err(|_| "Failed to acquire lock")?;

        Ok(check_ins.get(session_id).cloned().unwrap_or_default())
    }

    /// Records no older than `days` before `now`, newest first.
    pub fn get_recent(session_id: &SessionId, days: u32, now: DateTime<Utc>) -> Result<Vec<CheckInRecord>, String> {
        let cutoff = now - Duration::days(i64::from(days));

        let mut recent: Vec<CheckInRecord> = Self::get_all(session_id)?
            .into_iter()
            .filter(|record| record.recorded_at >= cutoff)
            .collect();

        recent.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));

        Ok(recent)
    }

    /// How often each emotion was recorded in the window, in label order,
    /// omitting emotions that never occurred.
    pub fn emotion_counts(session_id: &SessionId, days: u32, now: DateTime<Utc>) -> Result<Vec<(Emotion, usize)>, String> {
        let recent = Self::get_recent(session_id, days, now)?;

        Ok(Emotion::ALL
            .iter()
            .map(|&emotion| (emotion, recent.iter().filter(|r| r.emotion == emotion).count()))
            .filter(|(_, count)| *count > 0)
            .collect())
    }

    pub fn import(session_id: &SessionId, records: Vec<CheckInRecord>) -> Result<(), String> {
        for (index, record) in records.iter().enumerate() {
            if record.id.is_empty() {
                return Err(format!("Record at index {} has empty ID", index));
            }
            if !(0.0..=1.0).contains(&record.confidence) {
                return Err(format!(
                    "Record {} has invalid confidence: {} (must be between 0.0 and 1.0)",
                    record.id, record.confidence
                ));
            }
        }

        let mut check_ins = CHECK_INS.lock().map_err(|_| "Failed to acquire lock")?;
        let session = check_ins
            .get_mut(session_id)
            .ok_or_else(|| format!("Session '{}' not found", session_id))?;

        session.clear();
        session.extend(records);

        Ok(())
    }

    pub fn clear(session_id: &SessionId) -> Result<(), String> {
        let mut check_ins = CHECK_INS.lock().map_err(|_| "Failed to acquire lock")?;

        if let Some(session) = check_ins.get_mut(session_id) {
            session.clear();
        }

        Ok(())
    }

    pub fn remove_session(session_id: &SessionId) -> Result<(), String> {
        let mut check_ins = CHECK_INS.lock().map_err(|_| "Failed to acquire lock")?;

        check_ins.remove(session_id);

        Ok(())
    }

    pub fn get_count(session_id: &SessionId) -> Result<usize, String> {
        let check_ins = CHECK_INS.lock().map_err(|_| "Failed to acquire lock")?;

        Ok(check_ins.get(session_id).map(|session| session.len()).unwrap_or(0))
    }
}
