//! # Event Store — In-Memory CRUD with Synchronous Enrichment
//!
//! An in-memory table of regulatory events keyed by store-assigned id, with
//! a strict 1:1 cache of enriched records. Every write path validates
//! against the event schema first, then normalizes synchronously before the
//! operation returns, so consumers of the filtering and aggregation layers
//! always observe a derived record consistent with the latest base record.
//!
//! ## Identity
//!
//! Ids increase monotonically across the store's lifetime, even past
//! deletions. A `related_events` reference to a deleted event therefore
//! fails lookups predictably instead of resolving to an unrelated, reused
//! id. Dangling references are permitted — the store never cross-checks
//! them.
//!
//! ## Ownership
//!
//! The store is explicitly constructed and owned by its caller; there is no
//! process-wide singleton. Mutations take `&mut self`, making each write an
//! indivisible critical section under Rust's borrow rules on any runtime.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::debug;

use regintel_core::{EventDraft, EventId, EventPatch, NormalizedRegulatoryEvent, RegulatoryEvent};
use regintel_schema::{RecordKind, SchemaValidationError, SchemaValidator};

/// Errors raised by store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The record to write violated the event schema. The store is left
    /// unchanged.
    #[error(transparent)]
    Schema(#[from] SchemaValidationError),

    /// No event with the given id exists. The store is left unchanged.
    #[error("no event with id {id}")]
    NotFound {
        /// The id that was requested.
        id: EventId,
    },

    /// A record could not be serialized for validation.
    #[error("event serialization failed: {reason}")]
    Serialization {
        /// Serializer diagnostics.
        reason: String,
    },
}

/// In-memory table of base records and their enriched counterparts.
#[derive(Debug)]
pub struct EventStore {
    validator: SchemaValidator,
    events: BTreeMap<EventId, RegulatoryEvent>,
    normalized: BTreeMap<EventId, NormalizedRegulatoryEvent>,
    /// Next id to assign. Never decremented, never reset.
    next_id: u64,
}

impl EventStore {
    /// Create an empty store using the given validator for write-path checks.
    pub fn new(validator: SchemaValidator) -> Self {
        Self {
            validator,
            events: BTreeMap::new(),
            normalized: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Validate, assign an id, enrich, and insert a new event.
    ///
    /// Returns the stored base record. The enriched record is available via
    /// [`get_normalized`](Self::get_normalized) as soon as this returns.
    ///
    /// # Errors
    ///
    /// [`StoreError::Schema`] if the draft violates the event schema; the
    /// store is unchanged and no id is consumed.
    pub fn add(&mut self, draft: EventDraft) -> Result<RegulatoryEvent, StoreError> {
        let payload = serde_json::to_value(&draft).map_err(|e| StoreError::Serialization {
            reason: e.to_string(),
        })?;
        self.validator.validate(RecordKind::RegulatoryEvent, &payload)?;

        let id = EventId::from_raw(self.next_id);
        self.next_id += 1;

        let event = draft.into_event(id);
        let enriched = crate::normalize::normalize(&event);
        self.events.insert(id, event.clone());
        self.normalized.insert(id, enriched);
        debug!(id = id.value(), title = %event.title, "event added");
        Ok(event)
    }

    /// Look up a base record.
    pub fn get(&self, id: EventId) -> Option<&RegulatoryEvent> {
        self.events.get(&id)
    }

    /// Look up an enriched record.
    pub fn get_normalized(&self, id: EventId) -> Option<&NormalizedRegulatoryEvent> {
        self.normalized.get(&id)
    }

    /// All base records in ascending id order.
    pub fn list(&self) -> Vec<&RegulatoryEvent> {
        self.events.values().collect()
    }

    /// All enriched records in ascending id order.
    pub fn list_normalized(&self) -> Vec<&NormalizedRegulatoryEvent> {
        self.normalized.values().collect()
    }

    /// Number of stored events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Merge a patch onto an existing event, re-validate the merged record
    /// in full, re-enrich, and replace both cached records together.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if the id is absent, [`StoreError::Schema`]
    /// if the merged record violates the event schema. Either way the store
    /// is left unchanged.
    pub fn update(&mut self, id: EventId, patch: &EventPatch) -> Result<RegulatoryEvent, StoreError> {
        let current = self.events.get(&id).ok_or(StoreError::NotFound { id })?;
        let merged = patch.apply_to(current);

        let payload = serde_json::to_value(&merged).map_err(|e| StoreError::Serialization {
            reason: e.to_string(),
        })?;
        self.validator.validate(RecordKind::RegulatoryEvent, &payload)?;

        let enriched = crate::normalize::normalize(&merged);
        self.events.insert(id, merged.clone());
        self.normalized.insert(id, enriched);
        debug!(id = id.value(), "event updated");
        Ok(merged)
    }

    /// Remove an event and its enriched record together.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if the id is absent.
    pub fn delete(&mut self, id: EventId) -> Result<(), StoreError> {
        if self.events.remove(&id).is_none() {
            return Err(StoreError::NotFound { id });
        }
        self.normalized.remove(&id);
        debug!(id = id.value(), "event deleted");
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
