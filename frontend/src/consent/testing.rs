use std::cell::RefCell;
use std::collections::HashMap;

use super::loader::{ConsentCommand, ConsentModeUpdate, LoadCallback, ScriptHost, ScriptLoadError};
use super::persistence::{ConsentStorage, StorageError};

#[derive(Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn put(&self, key: &str, value: &str) {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    pub fn remove_raw(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

impl ConsentStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.raw(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.put(key, value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.remove_raw(key);
        Ok(())
    }
}

/// Behaves like a browser with storage blocked or over quota.
pub struct FailingStorage;

impl ConsentStorage for FailingStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Operation("QuotaExceededError".to_string()))
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    Inject(String),
    Consent(ConsentCommand, ConsentModeUpdate),
    PageView(String),
}

/// Records what the loader asks of the page and holds load callbacks until
/// the test decides how the script load ends.
#[derive(Default)]
pub struct RecordingHost {
    events: RefCell<Vec<HostEvent>>,
    pending: RefCell<Vec<LoadCallback>>,
}

impl RecordingHost {
    pub fn events(&self) -> Vec<HostEvent> {
        self.events.borrow().clone()
    }

    pub fn clear_events(&self) {
        self.events.borrow_mut().clear();
    }

    pub fn injections(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| matches!(e, HostEvent::Inject(_)))
            .count()
    }

    pub fn pending_loads(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn finish_load(&self) {
        self.complete(Ok(()));
    }

    pub fn fail_load(&self) {
        self.complete(Err(ScriptLoadError::Network));
    }

    fn complete(&self, result: Result<(), ScriptLoadError>) {
        let callback = self.pending.borrow_mut().remove(0);
        callback(result);
    }
}

impl ScriptHost for RecordingHost {
    fn inject(&self, src: &str, on_complete: LoadCallback) {
        self.events.borrow_mut().push(HostEvent::Inject(src.to_string()));
        self.pending.borrow_mut().push(on_complete);
    }

    fn consent(&self, command: ConsentCommand, update: &ConsentModeUpdate) {
        self.events.borrow_mut().push(HostEvent::Consent(command, *update));
    }

    fn page_view(&self, measurement_id: &str) {
        self.events.borrow_mut().push(HostEvent::PageView(measurement_id.to_string()));
    }
}
