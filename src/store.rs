// 📦 Registration Store - Ordered, id-unique collection of submissions
// Append-only in normal operation; fully replaced on load

use crate::registration::Registration;
use crate::storage::KeyValueStore;
use anyhow::{Context, Result};
use std::collections::HashSet;

/// Storage key shared with the original browser deployment.
pub const STORAGE_KEY: &str = "techmania2025_registrations";

// ============================================================================
// STORE ERROR
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A record with this id is already present.
    DuplicateId(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::DuplicateId(id) => write!(f, "duplicate registration id: {}", id),
        }
    }
}

impl std::error::Error for StoreError {}

// ============================================================================
// REGISTRATION STORE
// ============================================================================

/// Sole owner of registration records. Insertion order is submission
/// order; readers get slices or clones, never mutable access.
#[derive(Debug, Default)]
pub struct RegistrationStore {
    records: Vec<Registration>,
    ids: HashSet<String>,
}

impl RegistrationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a freshly built registration. Guards against id collisions
    /// even though UUID ids should never produce one.
    pub fn append(&mut self, registration: Registration) -> Result<(), StoreError> {
        if !self.ids.insert(registration.id.clone()) {
            return Err(StoreError::DuplicateId(registration.id));
        }
        self.records.push(registration);
        Ok(())
    }

    /// Read-only view in insertion order.
    pub fn all(&self) -> &[Registration] {
        &self.records
    }

    /// Replace the whole contents, discarding what was there. Used on load;
    /// trusts the persistence collaborator and does not re-validate.
    pub fn replace_all(&mut self, records: Vec<Registration>) {
        self.ids = records.iter().map(|r| r.id.clone()).collect();
        self.records = records;
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ============================================================================
// PERSISTENCE MAPPING
// ============================================================================

/// Serialize the whole store to the collaborator under [`STORAGE_KEY`].
pub fn save(store: &RegistrationStore, kv: &mut dyn KeyValueStore) -> Result<()> {
    let payload =
        serde_json::to_string(store.all()).context("Failed to serialize registrations")?;
    kv.set(STORAGE_KEY, &payload)
        .context("Failed to save registrations")?;
    Ok(())
}

/// Load the store from the collaborator. A missing key yields an empty
/// store; an unreadable or malformed value yields an empty store with a
/// logged warning (the registration flow continues without history).
pub fn load_or_empty(kv: &dyn KeyValueStore) -> RegistrationStore {
    let mut store = RegistrationStore::new();

    let payload = match kv.get(STORAGE_KEY) {
        Ok(Some(payload)) => payload,
        Ok(None) => return store,
        Err(err) => {
            tracing::warn!("failed to read persisted registrations: {err:#}");
            return store;
        }
    };

    match serde_json::from_str::<Vec<Registration>>(&payload) {
        Ok(records) => store.replace_all(records),
        Err(err) => {
            tracing::warn!("malformed persisted registrations, starting empty: {err}");
        }
    }

    store
}

// ============================================================================
// TESTS
// ============================================================================
