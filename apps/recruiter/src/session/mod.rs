//! Session hand-off store: tab-scoped, string-serialized slots that carry one wizard
//! step's output into the next step.
//!
//! Handles are cheap clones of one shared map. Only the step in focus writes, so the
//! lock is never contended; a poisoned lock is simply recovered.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::wizard::Step;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandoffKey {
    /// `ApplicationRecord`, written by CV upload, read by match analysis.
    ApplicationData,
    /// CV text as submitted, written by CV upload, read when asking for recommendations.
    CvText,
    /// `ApplicationId`, written by match analysis, read by interview and reverse recruitment.
    ApplicationId,
    /// `Vec<AnswerRecord>`, written by the interview, read by reverse recruitment.
    InterviewAnswers,
}

impl HandoffKey {
    pub const ALL: [HandoffKey; 4] = [
        HandoffKey::ApplicationData,
        HandoffKey::CvText,
        HandoffKey::ApplicationId,
        HandoffKey::InterviewAnswers,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HandoffKey::ApplicationData => "applicationData",
            HandoffKey::CvText => "cvText",
            HandoffKey::ApplicationId => "applicationId",
            HandoffKey::InterviewAnswers => "interviewAnswers",
        }
    }
}

impl fmt::Display for HandoffKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    slots: Arc<Mutex<HashMap<HandoffKey, String>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<HandoffKey, String>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn put<T: Serialize + ?Sized>(&self, key: HandoffKey, value: &T) -> Result<(), AppError> {
        let raw = serde_json::to_string(value)?;
        debug!("session: write {key} ({} bytes)", raw.len());
        self.slots().insert(key, raw);
        Ok(())
    }

    /// `Ok(None)` when the key was never written.
    pub fn get<T: DeserializeOwned>(&self, key: HandoffKey) -> Result<Option<T>, AppError> {
        let raw = self.slots().get(&key).cloned();
        raw.map(|raw| serde_json::from_str(&raw).map_err(AppError::from))
            .transpose()
    }

    /// Reads a key every caller depends on. Absent or undecodable data yields
    /// `MissingState` pointing at `redirect`.
    pub fn require<T: DeserializeOwned>(
        &self,
        key: HandoffKey,
        redirect: Step,
    ) -> Result<T, AppError> {
        match self.get(key) {
            Ok(Some(value)) => Ok(value),
            Ok(None) => {
                debug!("session: {key} missing, redirecting to {redirect}");
                Err(AppError::MissingState { key, redirect })
            }
            Err(e) => {
                warn!("session: {key} unreadable ({e}), redirecting to {redirect}");
                Err(AppError::MissingState { key, redirect })
            }
        }
    }

    pub fn contains(&self, key: HandoffKey) -> bool {
        self.slots().contains_key(&key)
    }

    pub fn remove(&self, key: HandoffKey) -> bool {
        self.slots().remove(&key).is_some()
    }

    /// Drops every wizard key: on completion or when the candidate abandons the flow.
    pub fn clear_wizard(&self) {
        let mut slots = self.slots();
        for key in HandoffKey::ALL {
            slots.remove(&key);
        }
        debug!("session: wizard state cleared");
    }

    pub fn len(&self) -> usize {
        self.slots().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::application::{AnswerRecord, ApplicationId};

    #[test]
    fn test_put_then_require() {
        let store = SessionStore::new();
        store
            .put(HandoffKey::ApplicationId, &ApplicationId::new("app_1"))
            .unwrap();

        let id: ApplicationId = store
            .require(HandoffKey::ApplicationId, Step::CvUpload)
            .unwrap();
        assert_eq!(id.as_str(), "app_1");
    }

    #[test]
    fn test_missing_key_redirects() {
        let store = SessionStore::new();
        let err = store
            .require::<ApplicationId>(HandoffKey::ApplicationId, Step::CvUpload)
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::MissingState {
                key: HandoffKey::ApplicationId,
                redirect: Step::CvUpload
            }
        ));
    }

    #[test]
    fn test_wrong_shape_redirects() {
        let store = SessionStore::new();
        store.put(HandoffKey::InterviewAnswers, "not a list").unwrap();
        let err = store
            .require::<Vec<AnswerRecord>>(HandoffKey::InterviewAnswers, Step::Interview)
            .unwrap_err();
        assert_eq!(err.redirect(), Some(Step::Interview));
        assert!(store.get::<Vec<AnswerRecord>>(HandoffKey::InterviewAnswers).is_err());
    }

    #[test]
    fn test_clones_share_slots() {
        let store = SessionStore::new();
        let other = store.clone();
        store.put(HandoffKey::CvText, "React").unwrap();
        assert!(other.contains(HandoffKey::CvText));
        assert_eq!(other.get::<String>(HandoffKey::CvText).unwrap().as_deref(), Some("React"));
    }

    #[test]
    fn test_clear_wizard_drops_every_key() {
        let store = SessionStore::new();
        for key in HandoffKey::ALL {
            store.put(key, "x").unwrap();
        }
        assert_eq!(store.len(), 4);
        store.clear_wizard();
        assert!(store.is_empty());
        assert!(!store.remove(HandoffKey::CvText));
    }
}
