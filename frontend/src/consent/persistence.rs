//! Versioned, best-effort storage of the visitor's consent decision.
//!
//! One key per schema version (`analytics_consent_v1`). Bumping the version
//! makes every previously stored decision invisible instead of migrating it.

use std::rc::Rc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use super::store::ConsentDecision;

pub const CONSENT_KEY_PREFIX: &str = "analytics_consent";
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("browser storage is unavailable")]
    Unavailable,
    #[error("storage operation failed: {0}")]
    Operation(String),
}

/// Minimal key/value surface over per-browser storage.
pub trait ConsentStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// `window.localStorage`. Every call re-resolves the storage object so a
/// privacy mode that revokes access mid-session just produces errors.
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .ok_or(StorageError::Unavailable)?
            .local_storage()
            .map_err(|e| StorageError::Operation(format!("{:?}", e)))?
            .ok_or(StorageError::Unavailable)
    }
}

impl ConsentStorage for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StorageError::Operation(format!("{:?}", e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Operation(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Operation(format!("{:?}", e)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConsentRecord {
    pub decision: ConsentDecision,
    pub decided_at: Option<DateTime<Utc>>,
    pub schema_version: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StoredConsent {
    analytics: bool,
    decided_at: String,
}

#[derive(Clone)]
pub struct ConsentPersistence {
    storage: Rc<dyn ConsentStorage>,
    schema_version: u32,
}

impl ConsentPersistence {
    pub fn new(storage: Rc<dyn ConsentStorage>) -> Self {
        Self::with_schema_version(storage, SCHEMA_VERSION)
    }

    pub fn with_schema_version(storage: Rc<dyn ConsentStorage>, schema_version: u32) -> Self {
        Self {
            storage,
            schema_version,
        }
    }

    pub fn key(&self) -> String {
        format!("{}_v{}", CONSENT_KEY_PREFIX, self.schema_version)
    }

    /// Anything missing, unreadable or malformed counts as "no decision yet".
    pub fn load(&self) -> Option<ConsentRecord> {
        let raw = match self.storage.get(&self.key()) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("Could not read consent record: {}", e);
                return None;
            }
        };
        let value: Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Ignoring unparseable consent record: {}", e);
                return None;
            }
        };
        let object = value.as_object()?;
        let analytics = coerce_bool(object.get("analytics")?)?;
        let decided_at = object
            .get("decidedAt")
            .and_then(Value::as_str)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc));

        Some(ConsentRecord {
            decision: ConsentDecision::new(analytics),
            decided_at,
            schema_version: self.schema_version,
        })
    }

    /// Failures are logged and dropped; the in-memory decision stays authoritative.
    pub fn save(&self, decision: &ConsentDecision) {
        let stored = StoredConsent {
            analytics: decision.analytics(),
            decided_at: Utc::now().to_rfc3339(),
        };
        let result = serde_json::to_string(&stored)
            .map_err(|e| StorageError::Operation(e.to_string()))
            .and_then(|raw| self.storage.set(&self.key(), &raw));
        if let Err(e) = result {
            log::warn!("Consent decision not persisted: {}", e);
        }
    }

    pub fn clear(&self) {
        if let Err(e) = self.storage.remove(&self.key()) {
            log::warn!("Could not clear consent record: {}", e);
        }
    }
}

fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Value::String(s) => match s.as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}
