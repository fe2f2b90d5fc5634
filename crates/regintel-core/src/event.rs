//! # Event Records
//!
//! The base regulatory event record, its store-assigned identifier, the
//! draft shape used for insertion, the patch shape used for partial updates,
//! and the enriched record produced by normalization.
//!
//! A base record is immutable-by-replacement: updates merge a patch onto a
//! copy, re-validate the whole result, and replace the stored record. The
//! enriched record embeds its base record so the two can never drift apart.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::taxonomy::{
    EventCategory, EventPriority, EventStatus, EventType, Framework, Jurisdiction,
};

// ─── Identifier ──────────────────────────────────────────────────────

/// Store-assigned identifier for a regulatory event.
///
/// Ids increase monotonically across the lifetime of a store and are never
/// reused, even past deletions. A dangling reference in `related_events`
/// therefore fails a lookup predictably instead of silently resolving to an
/// unrelated, reused id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(u64);

impl EventId {
    /// Wrap a raw id value.
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// The raw id value.
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── Base record ─────────────────────────────────────────────────────

/// One regulatory occurrence tracked by the platform.
///
/// Every enumerated field is guaranteed in-domain by the type system; the
/// schema layer additionally enforces the constraints types cannot express
/// (non-empty title/source, `impact_score` within `[0, 100]`, date formats).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegulatoryEvent {
    /// Store-assigned identifier.
    pub id: EventId,
    /// Short headline.
    pub title: String,
    /// Full description.
    pub description: String,
    /// Kind of occurrence.
    #[serde(rename = "type")]
    pub event_type: EventType,
    /// Urgency.
    pub priority: EventPriority,
    /// Review workflow status.
    pub status: EventStatus,
    /// Functional category.
    pub category: EventCategory,
    /// Regulatory regime.
    pub framework: Framework,
    /// Geography.
    pub jurisdiction: Jurisdiction,
    /// Name of the originating source (regulator, feed, publication).
    pub source: String,
    /// Link to the source document, when available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// Date the event was published by its source.
    pub published_date: NaiveDate,
    /// Date the requirements enter into application, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<NaiveDate>,
    /// Compliance deadline, when one exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline_date: Option<NaiveDate>,
    /// Free-form labels.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Source-supplied impact estimate in `[0, 100]`, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact_score: Option<f64>,
    /// Ids of related events. Not cross-checked against the store; a
    /// reference to a deleted event stays dangling by design.
    #[serde(default)]
    pub related_events: Vec<EventId>,
    /// Open key/value map for source-specific extras.
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
}

// ─── Draft ───────────────────────────────────────────────────────────

/// A regulatory event as submitted for insertion — identical to
/// [`RegulatoryEvent`] minus the store-assigned id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDraft {
    /// Short headline.
    pub title: String,
    /// Full description.
    pub description: String,
    /// Kind of occurrence.
    #[serde(rename = "type")]
    pub event_type: EventType,
    /// Urgency.
    pub priority: EventPriority,
    /// Review workflow status.
    pub status: EventStatus,
    /// Functional category.
    pub category: EventCategory,
    /// Regulatory regime.
    pub framework: Framework,
    /// Geography.
    pub jurisdiction: Jurisdiction,
    /// Name of the originating source.
    pub source: String,
    /// Link to the source document, when available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// Date the event was published by its source.
    pub published_date: NaiveDate,
    /// Date the requirements enter into application, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<NaiveDate>,
    /// Compliance deadline, when one exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline_date: Option<NaiveDate>,
    /// Free-form labels.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Source-supplied impact estimate in `[0, 100]`, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact_score: Option<f64>,
    /// Ids of related events.
    #[serde(default)]
    pub related_events: Vec<EventId>,
    /// Open key/value map for source-specific extras.
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
}

impl EventDraft {
    /// Build a draft with the required fields; optional fields default to
    /// empty/absent and can be set afterwards.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        event_type: EventType,
        priority: EventPriority,
        status: EventStatus,
        category: EventCategory,
        framework: Framework,
        jurisdiction: Jurisdiction,
        source: impl Into<String>,
        published_date: NaiveDate,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            event_type,
            priority,
            status,
            category,
            framework,
            jurisdiction,
            source: source.into(),
            source_url: None,
            published_date,
            effective_date: None,
            deadline_date: None,
            tags: Vec::new(),
            impact_score: None,
            related_events: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    /// Attach the store-assigned id, producing the stored base record.
    pub fn into_event(self, id: EventId) -> RegulatoryEvent {
        RegulatoryEvent {
            id,
            title: self.title,
            description: self.description,
            event_type: self.event_type,
            priority: self.priority,
            status: self.status,
            category: self.category,
            framework: self.framework,
            jurisdiction: self.jurisdiction,
            source: self.source,
            source_url: self.source_url,
            published_date: self.published_date,
            effective_date: self.effective_date,
            deadline_date: self.deadline_date,
            tags: self.tags,
            impact_score: self.impact_score,
            related_events: self.related_events,
            metadata: self.metadata,
        }
    }
}

// ─── Patch ───────────────────────────────────────────────────────────

/// Partial update to an existing event. `None` fields keep their current
/// value; `Some` fields replace it. The merged result is re-validated in
/// full before it replaces the stored record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventPatch {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement event type.
    #[serde(rename = "type")]
    pub event_type: Option<EventType>,
    /// Replacement priority.
    pub priority: Option<EventPriority>,
    /// Replacement status.
    pub status: Option<EventStatus>,
    /// Replacement category.
    pub category: Option<EventCategory>,
    /// Replacement framework.
    pub framework: Option<Framework>,
    /// Replacement jurisdiction.
    pub jurisdiction: Option<Jurisdiction>,
    /// Replacement source.
    pub source: Option<String>,
    /// Replacement source link.
    pub source_url: Option<String>,
    /// Replacement published date.
    pub published_date: Option<NaiveDate>,
    /// Replacement effective date.
    pub effective_date: Option<NaiveDate>,
    /// Replacement deadline.
    pub deadline_date: Option<NaiveDate>,
    /// Replacement tag set.
    pub tags: Option<Vec<String>>,
    /// Replacement impact score.
    pub impact_score: Option<f64>,
    /// Replacement related-event list.
    pub related_events: Option<Vec<EventId>>,
    /// Replacement metadata map.
    pub metadata: Option<BTreeMap<String, Value>>,
}

impl EventPatch {
    /// Merge this patch onto a copy of `base`, returning the merged record.
    pub fn apply_to(&self, base: &RegulatoryEvent) -> RegulatoryEvent {
        let mut merged = base.clone();
        if let Some(v) = &self.title {
            merged.title = v.clone();
        }
        if let Some(v) = &self.description {
            merged.description = v.clone();
        }
        if let Some(v) = self.event_type {
            merged.event_type = v;
        }
        if let Some(v) = self.priority {
            merged.priority = v;
        }
        if let Some(v) = self.status {
            merged.status = v;
        }
        if let Some(v) = self.category {
            merged.category = v;
        }
        if let Some(v) = self.framework {
            merged.framework = v;
        }
        if let Some(v) = self.jurisdiction {
            merged.jurisdiction = v;
        }
        if let Some(v) = &self.source {
            merged.source = v.clone();
        }
        if let Some(v) = &self.source_url {
            merged.source_url = Some(v.clone());
        }
        if let Some(v) = self.published_date {
            merged.published_date = v;
        }
        if let Some(v) = self.effective_date {
            merged.effective_date = Some(v);
        }
        if let Some(v) = self.deadline_date {
            merged.deadline_date = Some(v);
        }
        if let Some(v) = &self.tags {
            merged.tags = v.clone();
        }
        if let Some(v) = self.impact_score {
            merged.impact_score = Some(v);
        }
        if let Some(v) = &self.related_events {
            merged.related_events = v.clone();
        }
        if let Some(v) = &self.metadata {
            merged.metadata = v.clone();
        }
        merged
    }
}

// ─── Enriched record ─────────────────────────────────────────────────

/// A base event plus the read-only fields derived by normalization.
///
/// Exactly one enriched record exists per base record at all times; the
/// store creates, replaces, and removes the pair together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRegulatoryEvent {
    /// The base record this enrichment was derived from.
    #[serde(flatten)]
    pub event: RegulatoryEvent,
    /// Title converted to upper case, verbatim.
    pub normalized_title: String,
    /// Description with surrounding whitespace trimmed.
    pub normalized_description: String,
    /// Entity labels: framework, jurisdiction, and keyword-derived labels.
    /// Set semantics — insertion order, no duplicates.
    pub key_entities: Vec<String>,
    /// Ordered requirement sentences (one type-triggered, at most one
    /// framework-triggered).
    pub key_requirements: Vec<String>,
    /// Heuristic risk score in `[50, 100]`.
    pub risk_score: u8,
    /// Impact-area labels. Set semantics.
    pub impact_areas: Vec<String>,
    /// Ordered suggested actions (type pair, then framework pair when defined).
    pub suggested_actions: Vec<String>,
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> EventDraft {
        EventDraft::new(
            "SFDR Level 2 Implementation Deadline",
            "Principal adverse impact reporting and pre-contractual disclosures.",
            EventType::Deadline,
            EventPriority::High,
            EventStatus::New,
            EventCategory::Disclosure,
            Framework::Sfdr,
            Jurisdiction::Eu,
            "ESMA",
            NaiveDate::from_ymd_opt(2023, 11, 15).unwrap(),
        )
    }

    #[test]
    fn test_draft_into_event_keeps_fields() {
        let d = draft();
        let event = d.clone().into_event(EventId::from_raw(7));
        assert_eq!(event.id.value(), 7);
        assert_eq!(event.title, d.title);
        assert_eq!(event.framework, Framework::Sfdr);
        assert!(event.deadline_date.is_none());
    }

    #[test]
    fn test_draft_serializes_without_id() {
        let json = serde_json::to_value(draft()).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["type"], "deadline");
        assert_eq!(json["published_date"], "2023-11-15");
        // Absent optionals are omitted, not null.
        assert!(json.get("impact_score").is_none());
    }

    #[test]
    fn test_patch_merges_only_set_fields() {
        let base = draft().into_event(EventId::from_raw(1));
        let patch = EventPatch {
            priority: Some(EventPriority::Critical),
            tags: Some(vec!["esg".to_string()]),
            ..EventPatch::default()
        };
        let merged = patch.apply_to(&base);
        assert_eq!(merged.priority, EventPriority::Critical);
        assert_eq!(merged.tags, vec!["esg"]);
        // Untouched fields survive.
        assert_eq!(merged.title, base.title);
        assert_eq!(merged.id, base.id);
    }

    #[test]
    fn test_event_serde_roundtrip() {
        let event = draft().into_event(EventId::from_raw(42));
        let json = serde_json::to_string(&event).unwrap();
        let back: RegulatoryEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_event_id_ordering() {
        assert!(EventId::from_raw(1) < EventId::from_raw(2));
        assert_eq!(EventId::from_raw(3).to_string(), "3");
    }
}
