// Session-persisted identity records.
//
// Small records ("which customer / Form 60 submission is currently open, with
// what status") survive a page reload by living under a fixed session-storage
// key. Storage failures never surface to the caller: reads fall back to the
// empty record, writes degrade to in-memory-only, and every failure is logged
// at the point it is collapsed.

pub mod backend;

use crate::utils::logging::mask_identifier;
use backend::{SessionBackend, StorageError};
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Storage key for the customer-identity view record.
pub const CUSTOMER_IDENTITY_KEY: &str = "customerIdentity";
/// Storage key for the Form 60 identity record.
pub const FORM60_IDENTITY_KEY: &str = "form60Identity";

/// The persisted blob. Unknown fields are ignored on read and missing fields
/// default, so the format stays forward compatible.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdentityRecord {
    pub identity: Option<String>,
    /// Secondary business code; older writers used `customerId` for the same
    /// field, so both spellings are accepted on read.
    #[serde(rename = "customerCode", alias = "customerId")]
    pub secondary_code: Option<String>,
    pub status: Option<String>,
    pub is_initialized: bool,
    /// Audit timestamp of the last write. Absent in blobs written by older
    /// versions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

/// One identity record bound to a fixed storage key.
///
/// The in-memory record is authoritative for the current session; the backend
/// copy is best-effort so a reload can resume the same record.
pub struct IdentityStore {
    backend: Arc<dyn SessionBackend>,
    key: &'static str,
    record: IdentityRecord,
}

impl IdentityStore {
    /// Bind to `key` and load whatever the previous session left there.
    ///
    /// This runs before any UI renders and must never fail: a missing key,
    /// malformed JSON, or an unreadable backend all yield the empty record.
    pub fn load_initial(backend: Arc<dyn SessionBackend>, key: &'static str) -> Self {
        let record = match Self::try_load(backend.as_ref(), key) {
            Ok(Some(record)) => record,
            Ok(None) => IdentityRecord::default(),
            Err(e) => {
                warn!(
                    "[FLOW: session] [STEP: load] Falling back to empty record for '{}': {}",
                    key, e
                );
                IdentityRecord::default()
            }
        };
        Self {
            backend,
            key,
            record,
        }
    }

    fn try_load(
        backend: &dyn SessionBackend,
        key: &str,
    ) -> Result<Option<IdentityRecord>, StorageError> {
        let Some(raw) = backend.read(key)? else {
            return Ok(None);
        };
        let record =
            serde_json::from_str::<IdentityRecord>(&raw).map_err(|e| StorageError::Malformed {
                key: key.to_string(),
                source: e,
            })?;
        Ok(Some(record))
    }

    pub fn record(&self) -> &IdentityRecord {
        &self.record
    }

    /// Record that a specific business record is now open. The in-memory
    /// record is updated even when persistence fails, so the current session
    /// keeps working with storage unavailable.
    pub fn write(
        &mut self,
        identity: impl Into<String>,
        secondary_code: Option<String>,
        status: Option<String>,
    ) {
        let identity = identity.into();
        info!(
            "[FLOW: session] [STEP: write] Persisting '{}' record for identity {}",
            self.key,
            mask_identifier(&identity)
        );
        self.record = IdentityRecord {
            identity: Some(identity),
            secondary_code,
            status,
            is_initialized: true,
            saved_at: Some(Utc::now()),
        };
        self.persist();
    }

    /// Replace only the status, re-serializing the entire record. A partial
    /// update is never written.
    pub fn update_status(&mut self, status: impl Into<String>) {
        self.record.status = Some(status.into());
        self.record.saved_at = Some(Utc::now());
        self.persist();
    }

    /// Reset to the empty record and best-effort remove the storage key.
    pub fn clear(&mut self) {
        self.record = IdentityRecord::default();
        if let Err(e) = self.backend.remove(self.key) {
            warn!(
                "[FLOW: session] [STEP: clear] Failed to remove session key '{}': {}",
                self.key, e
            );
        }
    }

    fn persist(&self) {
        let serialized = match serde_json::to_string(&self.record) {
            Ok(s) => s,
            Err(e) => {
                warn!(
                    "[FLOW: session] [STEP: persist] Failed to serialize record for '{}': {}",
                    self.key, e
                );
                return;
            }
        };
        if let Err(e) = self.backend.write(self.key, &serialized) {
            // Degrade to in-memory-only; a reload simply starts fresh.
            warn!(
                "[FLOW: session] [STEP: persist] Failed to persist session key '{}': {}",
                self.key, e
            );
        }
    }
}
