//! # Aggregate Statistics
//!
//! Single-pass counting over a caller-supplied sequence of events, across
//! the six taxonomy dimensions plus a month bucket. Every enum value is
//! pre-seeded to zero so absent values still appear in the output — a
//! consumer can chart the full domain without filling gaps itself.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use regintel_core::{
    EventCategory, EventPriority, EventStatus, EventType, Framework, Jurisdiction, RegulatoryEvent,
};

/// Counts over a snapshot of events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventStats {
    /// Number of events in the snapshot.
    pub total: u64,
    /// Count per event type (every type present, zero-seeded).
    pub by_type: BTreeMap<EventType, u64>,
    /// Count per priority.
    pub by_priority: BTreeMap<EventPriority, u64>,
    /// Count per workflow status.
    pub by_status: BTreeMap<EventStatus, u64>,
    /// Count per category.
    pub by_category: BTreeMap<EventCategory, u64>,
    /// Count per framework.
    pub by_framework: BTreeMap<Framework, u64>,
    /// Count per jurisdiction.
    pub by_jurisdiction: BTreeMap<Jurisdiction, u64>,
    /// Count per zero-padded `YYYY-MM` of `published_date`. Only months
    /// that occur appear here; there is no finite month domain to seed.
    pub by_month: BTreeMap<String, u64>,
}

fn zero_seeded<T: Copy + Ord>(all: &[T]) -> BTreeMap<T, u64> {
    all.iter().map(|v| (*v, 0)).collect()
}

/// Count `events` across all dimensions in a single pass.
pub fn aggregate<'a, I>(events: I) -> EventStats
where
    I: IntoIterator<Item = &'a RegulatoryEvent>,
{
    let mut stats = EventStats {
        total: 0,
        by_type: zero_seeded(EventType::all()),
        by_priority: zero_seeded(EventPriority::all()),
        by_status: zero_seeded(EventStatus::all()),
        by_category: zero_seeded(EventCategory::all()),
        by_framework: zero_seeded(Framework::all()),
        by_jurisdiction: zero_seeded(Jurisdiction::all()),
        by_month: BTreeMap::new(),
    };

    for event in events {
        stats.total += 1;
        *stats.by_type.entry(event.event_type).or_insert(0) += 1;
        *stats.by_priority.entry(event.priority).or_insert(0) += 1;
        *stats.by_status.entry(event.status).or_insert(0) += 1;
        *stats.by_category.entry(event.category).or_insert(0) += 1;
        *stats.by_framework.entry(event.framework).or_insert(0) += 1;
        *stats.by_jurisdiction.entry(event.jurisdiction).or_insert(0) += 1;

        let month = event.published_date.format("%Y-%m").to_string();
        *stats.by_month.entry(month).or_insert(0) += 1;
    }

    stats
}

// ─── Tests ───────────────────────────────────────────────────────────
