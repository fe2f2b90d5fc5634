//! # regintel-schema — Kind-Tagged Record Validation
//!
//! Runtime validation of JSON payloads against JSON Schema definitions
//! (Draft 2020-12) via the `jsonschema` crate.
//!
//! Schema validation is a trust boundary: the event store validates every
//! write before it is accepted, and the validation orchestrator validates
//! every external payload before it is assembled into a result. A payload
//! that fails validation is rejected with the failing record kind, the JSON
//! Pointer to the violating field, and the violation message — never
//! silently ignored.
//!
//! ## Schemas
//!
//! All schemas ship embedded in the crate (`schemas/*.schema.json`,
//! `include_str!`) and are compiled once at construction, so validation is
//! pure and performs no I/O. There are five record kinds: the regulatory
//! event shape used by the store, and the four FIRE-shaped external record
//! shapes (entity, security, customer, account) consumed by the
//! orchestrator.

use std::sync::Arc;

use jsonschema::Validator;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

// ─── Record kinds ────────────────────────────────────────────────────

/// The named record shapes this engine validates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// A regulatory event (store writes; id optional, store-assigned).
    RegulatoryEvent,
    /// A FIRE-shaped legal entity.
    Entity,
    /// A FIRE-shaped security.
    Security,
    /// A FIRE-shaped customer.
    Customer,
    /// A FIRE-shaped account.
    Account,
}

impl RecordKind {
    /// The snake_case identifier, matching the serde serialization format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RegulatoryEvent => "regulatory_event",
            Self::Entity => "entity",
            Self::Security => "security",
            Self::Customer => "customer",
            Self::Account => "account",
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Errors ──────────────────────────────────────────────────────────

/// A payload violated its record-kind schema.
///
/// Reports the first violated constraint. Always fatal to the operation
/// that triggered the validation (store write or orchestrator fetch step).
#[derive(Error, Debug, Clone)]
#[error("schema validation failed for kind '{kind}' at {path}: {message}")]
pub struct SchemaValidationError {
    /// The record kind the payload was validated against.
    pub kind: RecordKind,
    /// JSON Pointer to the violating field (`(root)` for whole-document
    /// violations such as a missing required field).
    pub path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

/// An embedded schema failed to parse or compile.
///
/// Constructor-time only: once a [`SchemaValidator`] exists, every schema
/// it holds is compiled and validation itself cannot fail this way.
#[derive(Error, Debug)]
pub enum SchemaBuildError {
    /// The embedded schema source is not valid JSON.
    #[error("embedded schema for '{kind}' is not valid JSON: {reason}")]
    Parse {
        /// The record kind whose schema failed to parse.
        kind: RecordKind,
        /// Parser diagnostics.
        reason: String,
    },

    /// The schema parsed but could not be compiled into a validator.
    #[error("schema for '{kind}' failed to compile: {reason}")]
    Compile {
        /// The record kind whose schema failed to compile.
        kind: RecordKind,
        /// Compiler diagnostics.
        reason: String,
    },
}

// ─── Validator ───────────────────────────────────────────────────────

struct CompiledSchemas {
    regulatory_event: Validator,
    entity: Validator,
    security: Validator,
    customer: Validator,
    account: Validator,
}

/// A schema validator backed by the `jsonschema` crate.
///
/// Compiles all embedded schemas at construction. Cheap to clone (the
/// compiled validators are shared behind an `Arc`) and `Send + Sync`, so a
/// single instance can serve the store and the orchestrator concurrently.
#[derive(Clone)]
pub struct SchemaValidator {
    schemas: Arc<CompiledSchemas>,
}

impl std::fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaValidator").finish_non_exhaustive()
    }
}

/// Parse and compile one embedded schema source.
fn compile(kind: RecordKind, source: &str) -> Result<Validator, SchemaBuildError> {
    let schema: Value = serde_json::from_str(source).map_err(|e| SchemaBuildError::Parse {
        kind,
        reason: e.to_string(),
    })?;
    jsonschema::options()
        .with_draft(jsonschema::Draft::Draft202012)
        .build(&schema)
        .map_err(|e| SchemaBuildError::Compile {
            kind,
            reason: e.to_string(),
        })
}

impl SchemaValidator {
    /// Compile all embedded schemas.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaBuildError`] if any embedded schema fails to parse or
    /// compile — a defect in the crate itself, not in caller input.
    pub fn new() -> Result<Self, SchemaBuildError> {
        let schemas = CompiledSchemas {
            regulatory_event: compile(
                RecordKind::RegulatoryEvent,
                include_str!("../schemas/regulatory-event.schema.json"),
            )?,
            entity: compile(RecordKind::Entity, include_str!("../schemas/entity.schema.json"))?,
            security: compile(
                RecordKind::Security,
                include_str!("../schemas/security.schema.json"),
            )?,
            customer: compile(
                RecordKind::Customer,
                include_str!("../schemas/customer.schema.json"),
            )?,
            account: compile(RecordKind::Account, include_str!("../schemas/account.schema.json"))?,
        };

        Ok(Self {
            schemas: Arc::new(schemas),
        })
    }

    fn validator_for(&self, kind: RecordKind) -> &Validator {
        match kind {
            RecordKind::RegulatoryEvent => &self.schemas.regulatory_event,
            RecordKind::Entity => &self.schemas.entity,
            RecordKind::Security => &self.schemas.security,
            RecordKind::Customer => &self.schemas.customer,
            RecordKind::Account => &self.schemas.account,
        }
    }

    /// Validate a payload against the schema for `kind`.
    ///
    /// Pure and deterministic. Reports the first violated constraint.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaValidationError`] carrying the kind, the JSON Pointer
    /// to the violating field, and the violation message.
    pub fn validate(&self, kind: RecordKind, payload: &Value) -> Result<(), SchemaValidationError> {
        match self.validator_for(kind).iter_errors(payload).next() {
            None => Ok(()),
            Some(violation) => {
                let instance_path = violation.instance_path.to_string();
                Err(SchemaValidationError {
                    kind,
                    path: if instance_path.is_empty() {
                        "(root)".to_string()
                    } else {
                        instance_path
                    },
                    message: violation.to_string(),
                })
            }
        }
    }

    /// Validate a payload against the schema for `kind`, then deserialize it
    /// into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaValidationError`] if the payload violates the schema,
    /// or if it passes the schema but cannot be deserialized into `T` (a
    /// schema/type mismatch inside this crate family).
    pub fn validate_as<T: DeserializeOwned>(
        &self,
        kind: RecordKind,
        payload: Value,
    ) -> Result<T, SchemaValidationError> {
        self.validate(kind, &payload)?;
        serde_json::from_value(payload).map_err(|e| SchemaValidationError {
            kind,
            path: "(root)".to_string(),
            message: format!("deserialization failed: {e}"),
        })
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validator() -> SchemaValidator {
        SchemaValidator::new().expect("embedded schemas must compile")
    }

    fn valid_event() -> Value {
        json!({
            "title": "SFDR Level 2 Implementation Deadline",
            "description": "Principal adverse impact reporting and pre-contractual disclosures.",
            "type": "deadline",
            "priority": "high",
            "status": "new",
            "category": "disclosure",
            "framework": "sfdr",
            "jurisdiction": "eu",
            "source": "ESMA",
            "published_date": "2023-11-15"
        })
    }

    #[test]
    fn test_all_embedded_schemas_compile() {
        let _ = validator();
    }

    #[test]
    fn test_valid_event_passes() {
        validator()
            .validate(RecordKind::RegulatoryEvent, &valid_event())
            .unwrap();
    }

    #[test]
    fn test_event_missing_required_field_fails() {
        let mut doc = valid_event();
        doc.as_object_mut().unwrap().remove("priority");
        let err = validator()
            .validate(RecordKind::RegulatoryEvent, &doc)
            .unwrap_err();
        assert_eq!(err.kind, RecordKind::RegulatoryEvent);
        assert_eq!(err.path, "(root)");
        assert!(err.message.contains("priority"), "got: {}", err.message);
    }

    #[test]
    fn test_event_unknown_enum_value_fails() {
        let mut doc = valid_event();
        doc["priority"] = json!("urgent");
        let err = validator()
            .validate(RecordKind::RegulatoryEvent, &doc)
            .unwrap_err();
        assert_eq!(err.path, "/priority");
    }

    #[test]
    fn test_event_impact_score_bounds() {
        let mut doc = valid_event();
        doc["impact_score"] = json!(100.0);
        validator().validate(RecordKind::RegulatoryEvent, &doc).unwrap();

        doc["impact_score"] = json!(100.5);
        let err = validator()
            .validate(RecordKind::RegulatoryEvent, &doc)
            .unwrap_err();
        assert_eq!(err.path, "/impact_score");
    }

    #[test]
    fn test_event_empty_title_fails() {
        let mut doc = valid_event();
        doc["title"] = json!("");
        let err = validator()
            .validate(RecordKind::RegulatoryEvent, &doc)
            .unwrap_err();
        assert_eq!(err.path, "/title");
    }

    #[test]
    fn test_event_bad_date_pattern_fails() {
        let mut doc = valid_event();
        doc["published_date"] = json!("15 Nov 2023");
        let err = validator()
            .validate(RecordKind::RegulatoryEvent, &doc)
            .unwrap_err();
        assert_eq!(err.path, "/published_date");
    }

    #[test]
    fn test_event_accepts_stored_record_with_id() {
        let mut doc = valid_event();
        doc["id"] = json!(7);
        validator().validate(RecordKind::RegulatoryEvent, &doc).unwrap();
    }

    #[test]
    fn test_entity_requires_id_name_type() {
        let v = validator();
        v.validate(
            RecordKind::Entity,
            &json!({"id": "ent-1", "name": "Acme Capital", "type": "company"}),
        )
        .unwrap();

        let err = v
            .validate(RecordKind::Entity, &json!({"id": "ent-1", "name": "Acme Capital"}))
            .unwrap_err();
        assert!(err.message.contains("type"), "got: {}", err.message);
    }

    #[test]
    fn test_identifier_needs_value_and_type_tag() {
        let v = validator();
        let doc = json!({
            "id": "sec-1",
            "identifiers": [{"id": "US0378331005"}]
        });
        let err = v.validate(RecordKind::Security, &doc).unwrap_err();
        assert_eq!(err.path, "/identifiers/0");

        let doc = json!({
            "id": "sec-1",
            "identifiers": [{"id": "US0378331005", "type": "isin"}]
        });
        v.validate(RecordKind::Security, &doc).unwrap();
    }

    #[test]
    fn test_account_currency_pattern() {
        let v = validator();
        v.validate(RecordKind::Account, &json!({"id": "acc-1", "currency": "EUR"}))
            .unwrap();
        let err = v
            .validate(RecordKind::Account, &json!({"id": "acc-1", "currency": "euro"}))
            .unwrap_err();
        assert_eq!(err.path, "/currency");
    }

    #[test]
    fn test_customer_risk_rating_enum() {
        let v = validator();
        v.validate(
            RecordKind::Customer,
            &json!({"id": "cus-1", "name": "Jane Doe", "risk_rating": "medium"}),
        )
        .unwrap();
        assert!(v
            .validate(
                RecordKind::Customer,
                &json!({"id": "cus-1", "name": "Jane Doe", "risk_rating": "severe"}),
            )
            .is_err());
    }

    #[test]
    fn test_validate_as_deserializes_core_draft() {
        use regintel_core::EventDraft;
        let v = validator();
        let draft: EventDraft = v
            .validate_as(RecordKind::RegulatoryEvent, valid_event())
            .unwrap();
        assert_eq!(draft.source, "ESMA");
        assert_eq!(
            draft.published_date,
            chrono::NaiveDate::from_ymd_opt(2023, 11, 15).unwrap()
        );
    }

    #[test]
    fn test_core_draft_serialization_passes_schema() {
        use chrono::NaiveDate;
        use regintel_core::{
            EventCategory, EventDraft, EventPriority, EventStatus, EventType, Framework,
            Jurisdiction,
        };
        let draft = EventDraft::new(
            "CSRD scope update",
            "Scope thresholds amended.",
            EventType::Update,
            EventPriority::Medium,
            EventStatus::New,
            EventCategory::Reporting,
            Framework::Csrd,
            Jurisdiction::Eu,
            "EFRAG",
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        );
        let doc = serde_json::to_value(&draft).unwrap();
        validator().validate(RecordKind::RegulatoryEvent, &doc).unwrap();
    }

    #[test]
    fn test_error_display_carries_kind_and_path() {
        let err = SchemaValidationError {
            kind: RecordKind::Security,
            path: "/identifiers/0".to_string(),
            message: "\"type\" is a required property".to_string(),
        };
        let s = err.to_string();
        assert!(s.contains("security"));
        assert!(s.contains("/identifiers/0"));
    }

    #[test]
    fn test_first_violation_only() {
        // Multiple violations present; the error reports exactly one.
        let doc = json!({"title": "", "description": 4});
        let err = validator()
            .validate(RecordKind::RegulatoryEvent, &doc)
            .unwrap_err();
        assert!(!err.message.is_empty());
    }
}
