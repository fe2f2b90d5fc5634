//! # Validation Orchestration
//!
//! Assembles a validated bundle of FIRE records for one entity: the entity
//! itself, the requested securities, an optional customer, and the entity's
//! accounts. Every payload is schema-validated before it is accepted.
//!
//! ## Fail-fast semantics
//!
//! The entity fetch runs first; if it fails, nothing further executes. The
//! dependent fetches then fan out concurrently and join with fail-fast
//! semantics — the first error rejects the whole call, in-flight siblings
//! are discarded, and a partially-populated result is never returned. There
//! is no built-in retry; a failed call must be reissued by the caller.

use std::sync::Arc;

use chrono::NaiveDate;
use futures::future::try_join_all;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use regintel_schema::{RecordKind, SchemaValidationError, SchemaValidator};

use crate::fetch::{FetchError, RecordFetcher};
use crate::types::{Account, Customer, Entity, Security};

/// Errors from a [`ValidationOrchestrator::run`] call.
#[derive(Debug, thiserror::Error)]
pub enum OrchestratorError {
    /// A record could not be fetched.
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// A fetched record violated its schema.
    #[error(transparent)]
    Schema(#[from] SchemaValidationError),
}

/// What to fetch and validate in one orchestration run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRequest {
    /// The primary entity. Its fetch failing is fatal to the whole run.
    pub entity_id: String,
    /// Securities to fetch, one call per id. Result order matches this order.
    #[serde(default)]
    pub security_ids: Vec<String>,
    /// Customer to fetch, if any. Absence is not an error; a supplied id
    /// that fetches or validates badly is fatal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    /// Start of the reporting window, carried onto the result.
    pub start_date: NaiveDate,
    /// End of the reporting window, carried onto the result.
    pub end_date: NaiveDate,
}

/// A fully validated record bundle. Only ever constructed when every fetch
/// succeeded and every payload passed schema validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub entity: Entity,
    /// In the same order as the request's `security_ids`.
    pub securities: Vec<Security>,
    /// Present iff the request supplied a `customer_id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
    /// Always a list; a single-object endpoint response is normalized into
    /// a one-element list.
    pub accounts: Vec<Account>,
    /// The reporting window from the request.
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Always `true` — there is no partial-result state.
    pub validated: bool,
}

/// Fetches FIRE records through an injected [`RecordFetcher`] and validates
/// each against the embedded schemas.
pub struct ValidationOrchestrator {
    fetcher: Arc<dyn RecordFetcher>,
    validator: SchemaValidator,
}

impl ValidationOrchestrator {
    /// Create an orchestrator over the given fetcher and validator.
    pub fn new(fetcher: Arc<dyn RecordFetcher>, validator: SchemaValidator) -> Self {
        Self { fetcher, validator }
    }

    /// Fetch and validate every record the request names.
    ///
    /// # Errors
    ///
    /// [`OrchestratorError::Fetch`] on any transport failure,
    /// [`OrchestratorError::Schema`] when any payload violates its schema.
    /// Either way no partial result is returned.
    pub async fn run(
        &self,
        request: &ValidationRequest,
    ) -> Result<ValidationResult, OrchestratorError> {
        debug!(entity_id = %request.entity_id, "orchestration started");

        // The entity gates everything else.
        let entity: Entity = self
            .fetch_validated(
                RecordKind::Entity,
                format!("/api/fire/entities/{}", request.entity_id),
            )
            .await?;

        let securities = try_join_all(request.security_ids.iter().map(|id| {
            self.fetch_validated::<Security>(
                RecordKind::Security,
                format!("/api/fire/securities/{id}"),
            )
        }));

        let customer = async {
            match &request.customer_id {
                Some(id) => self
                    .fetch_validated::<Customer>(
                        RecordKind::Customer,
                        format!("/api/fire/customers/{id}"),
                    )
                    .await
                    .map(Some),
                None => Ok(None),
            }
        };

        let accounts = self.fetch_accounts(&request.entity_id);

        let (securities, customer, accounts) = tokio::try_join!(securities, customer, accounts)?;

        debug!(
            entity_id = %request.entity_id,
            securities = securities.len(),
            accounts = accounts.len(),
            "orchestration succeeded"
        );

        Ok(ValidationResult {
            entity,
            securities,
            customer,
            accounts,
            start_date: request.start_date,
            end_date: request.end_date,
            validated: true,
        })
    }

    async fn fetch_validated<T: DeserializeOwned>(
        &self,
        kind: RecordKind,
        path: String,
    ) -> Result<T, OrchestratorError> {
        let payload = self.fetcher.fetch_json(&path).await?;
        Ok(self.validator.validate_as(kind, payload)?)
    }

    /// The accounts endpoint may serve one object or a list; both shapes
    /// normalize into a list, validated per element.
    async fn fetch_accounts(&self, entity_id: &str) -> Result<Vec<Account>, OrchestratorError> {
        let path = format!("/api/fire/accounts?entityId={entity_id}");
        let payload = self.fetcher.fetch_json(&path).await?;
        let elements = match payload {
            Value::Array(items) => items,
            single => vec![single],
        };
        elements
            .into_iter()
            .map(|element| {
                Ok(self
                    .validator
                    .validate_as::<Account>(RecordKind::Account, element)?)
            })
            .collect()
    }
}

impl std::fmt::Debug for ValidationOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationOrchestrator").finish_non_exhaustive()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
