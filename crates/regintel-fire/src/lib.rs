//! # regintel-fire — FIRE Record Validation
//!
//! Read-side integration with FIRE-shaped record endpoints: typed record
//! shapes, an injectable HTTP fetcher, and an orchestrator that assembles a
//! schema-validated bundle (entity, securities, optional customer,
//! accounts) with fail-fast semantics.
//!
//! ## Layout
//!
//! - [`types`] — the FIRE record shapes.
//! - [`fetch`] — the [`RecordFetcher`] capability and its HTTP
//!   implementation.
//! - [`orchestrator`] — [`ValidationOrchestrator`] and its request/result
//!   types.

pub mod fetch;
pub mod orchestrator;
pub mod types;

pub use fetch::{FetchError, FetcherConfig, HttpRecordFetcher, RecordFetcher};
pub use orchestrator::{
    OrchestratorError, ValidationOrchestrator, ValidationRequest, ValidationResult,
};
pub use types::{
    Account, AccountType, Customer, CustomerType, Entity, EntityType, RecordIdentifier,
    RiskRating, Security,
};
