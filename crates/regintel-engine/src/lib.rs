//! # regintel-engine — Regulatory Intelligence Engine
//!
//! The data-shaping core: an in-memory table of regulatory events with a
//! deterministic enrichment step, a stateless filtering layer, a stateless
//! aggregation layer, and a passive registry of feed sources.
//!
//! ## Components
//!
//! - **Store** (`store.rs`): CRUD over base records. Every successful write
//!   is schema-validated and synchronously normalized, maintaining a strict
//!   1:1 base→derived cache — no caller ever observes a base record without
//!   its matching enriched record.
//!
//! - **Normalizer** (`normalize.rs`): pure, total, idempotent enrichment of
//!   one validated base record into derived analytical fields (key entities,
//!   requirements, risk score, impact areas, suggested actions). All
//!   derivation rules are declarative lookup data, not nested conditionals.
//!
//! - **Filter** (`filter.rs`): stateless predicate evaluation over
//!   caller-supplied snapshots. OR within a field, AND across fields.
//!
//! - **Stats** (`stats.rs`): single-pass multi-dimension counting, with
//!   every enum value pre-seeded to zero so absent values still appear.
//!
//! - **Sources** (`sources.rs`): read-only registry of external feed
//!   configurations. A registry entry describes a feed; nothing here
//!   crawls one.
//!
//! ## Concurrency
//!
//! The store's mutating operations take `&mut self`, so the exclusive
//! borrow is the critical section: base and derived records are written
//! together before the borrow ends, on any runtime. Filtering and
//! aggregation are pure functions and need no synchronization.

pub mod filter;
pub mod normalize;
pub mod sources;
pub mod stats;
pub mod store;

pub use filter::{filter_events, DateRange, EventFilter, ImpactScoreRange};
pub use normalize::normalize;
pub use sources::{SourceAuth, SourceConfig, SourceRegistry, SourceType};
pub use stats::{aggregate, EventStats};
pub use store::{EventStore, StoreError};
