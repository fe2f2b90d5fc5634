//! # Filtering — Stateless Predicate Evaluation
//!
//! Evaluates a filter specification over a caller-supplied snapshot of
//! events. Pure functions: no store access, no mutation, input order
//! preserved.
//!
//! ## Semantics
//!
//! - List-valued fields: OR *within* the field (the event's value must be a
//!   member of the provided set), AND *across* fields. An empty list is a
//!   wildcard.
//! - `date_range`: inclusive bounds against `published_date`; either bound
//!   may be omitted.
//! - `search_term`: case-insensitive substring match against title OR
//!   description.
//! - `tags`: OR — the event passes if it carries *any* requested tag.
//! - `impact_score_range`: applies only when the event's `impact_score` is
//!   present; an event without one always passes, whatever the bounds.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use regintel_core::{
    EventCategory, EventPriority, EventStatus, EventType, Framework, Jurisdiction, RegulatoryEvent,
};

/// Inclusive date bounds against `published_date`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    /// Earliest date to include, if bounded below.
    pub start: Option<NaiveDate>,
    /// Latest date to include, if bounded above.
    pub end: Option<NaiveDate>,
}

/// Inclusive bounds against `impact_score`.
///
/// Deliberate pass-through: an event whose `impact_score` is undefined
/// passes this constraint regardless of the bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ImpactScoreRange {
    /// Lowest score to include, if bounded below.
    pub min: Option<f64>,
    /// Highest score to include, if bounded above.
    pub max: Option<f64>,
}

/// A filter specification. The default value matches every event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventFilter {
    /// Event types to include (empty = any).
    #[serde(default)]
    pub types: Vec<EventType>,
    /// Priorities to include (empty = any).
    #[serde(default)]
    pub priorities: Vec<EventPriority>,
    /// Statuses to include (empty = any).
    #[serde(default)]
    pub statuses: Vec<EventStatus>,
    /// Categories to include (empty = any).
    #[serde(default)]
    pub categories: Vec<EventCategory>,
    /// Frameworks to include (empty = any).
    #[serde(default)]
    pub frameworks: Vec<Framework>,
    /// Jurisdictions to include (empty = any).
    #[serde(default)]
    pub jurisdictions: Vec<Jurisdiction>,
    /// Published-date window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
    /// Case-insensitive substring over title or description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_term: Option<String>,
    /// Tags, any of which qualifies the event (empty = any).
    #[serde(default)]
    pub tags: Vec<String>,
    /// Impact-score window (pass-through for events without a score).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact_score_range: Option<ImpactScoreRange>,
}

impl EventFilter {
    /// Whether `event` satisfies every non-empty constraint.
    pub fn matches(&self, event: &RegulatoryEvent) -> bool {
        if !member_or_wildcard(&self.types, &event.event_type) {
            return false;
        }
        if !member_or_wildcard(&self.priorities, &event.priority) {
            return false;
        }
        if !member_or_wildcard(&self.statuses, &event.status) {
            return false;
        }
        if !member_or_wildcard(&self.categories, &event.category) {
            return false;
        }
        if !member_or_wildcard(&self.frameworks, &event.framework) {
            return false;
        }
        if !member_or_wildcard(&self.jurisdictions, &event.jurisdiction) {
            return false;
        }

        if let Some(range) = &self.date_range {
            if let Some(start) = range.start {
                if event.published_date < start {
                    return false;
                }
            }
            if let Some(end) = range.end {
                if event.published_date > end {
                    return false;
                }
            }
        }

        if let Some(term) = &self.search_term {
            let needle = term.to_lowercase();
            let in_title = event.title.to_lowercase().contains(&needle);
            let in_description = event.description.to_lowercase().contains(&needle);
            if !in_title && !in_description {
                return false;
            }
        }

        if !self.tags.is_empty() {
            let any_tag = self.tags.iter().any(|t| event.tags.contains(t));
            if !any_tag {
                return false;
            }
        }

        if let Some(range) = &self.impact_score_range {
            // Events without a score pass unconditionally.
            if let Some(score) = event.impact_score {
                if let Some(min) = range.min {
                    if score < min {
                        return false;
                    }
                }
                if let Some(max) = range.max {
                    if score > max {
                        return false;
                    }
                }
            }
        }

        true
    }
}

fn member_or_wildcard<T: PartialEq>(allowed: &[T], value: &T) -> bool {
    allowed.is_empty() || allowed.contains(value)
}

/// Apply `filter` to `events`, preserving the relative order of the input.
pub fn filter_events<'a>(
    events: &'a [RegulatoryEvent],
    filter: &EventFilter,
) -> Vec<&'a RegulatoryEvent> {
    events.iter().filter(|e| filter.matches(e)).collect()
}

// ─── Tests ───────────────────────────────────────────────────────────
