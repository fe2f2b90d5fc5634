//! # regintel-core — Foundational Types for the Regulatory Intelligence Engine
//!
//! Defines the type-system primitives every other crate in the workspace
//! builds on: the six regulatory taxonomies, the `EventId` newtype, and the
//! base/draft/patch/enriched event record shapes. Depends on nothing
//! internal.
//!
//! ## Key Design Principles
//!
//! 1. **Exhaustive taxonomy enums.** Event type, priority, status, category,
//!    framework, and jurisdiction are each a single enum definition with
//!    exhaustive `match` everywhere. Adding a variant forces every consumer
//!    (derivation tables, aggregation seeding) to handle it at compile time.
//!
//! 2. **Newtype event identifiers.** `EventId` wraps the store-assigned
//!    integer. Ids are monotonically increasing and never reused, so a stale
//!    reference fails a lookup instead of resolving to an unrelated record.
//!
//! 3. **Base and derived records travel together.** The enriched record
//!    embeds its base record; there is no way to construct derived fields
//!    detached from the event they describe.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `regintel-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement `Serialize`/`Deserialize`.

pub mod error;
pub mod event;
pub mod taxonomy;

pub use error::CoreError;
pub use event::{EventDraft, EventId, EventPatch, NormalizedRegulatoryEvent, RegulatoryEvent};
pub use taxonomy::{EventCategory, EventPriority, EventStatus, EventType, Framework, Jurisdiction};
