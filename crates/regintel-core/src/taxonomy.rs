//! # Regulatory Taxonomies — Single Source of Truth
//!
//! The six enumerated domains that classify a regulatory event: type,
//! priority, workflow status, category, framework, and jurisdiction. Each is
//! defined exactly once here and matched exhaustively everywhere else —
//! adding a variant forces every derivation table and every aggregation
//! seeding loop to handle it at compile time.
//!
//! Every taxonomy exposes:
//! - `all()` — every variant in canonical order (used to pre-seed aggregate
//!   counts so absent values still appear with zero),
//! - `as_str()` — the snake_case identifier matching the serde format,
//! - `Display` and `FromStr` round-tripping through the same strings.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CoreError;

// ─── Event type ──────────────────────────────────────────────────────

/// What kind of regulatory occurrence an event describes.
///
/// The event type drives the type-triggered derivation tables in the
/// normalizer: the requirement sentence, the type weight of the risk score,
/// and the suggested-action pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// A compliance deadline is approaching or has been set.
    Deadline,
    /// New requirements enter into application and must be implemented.
    Implementation,
    /// A regulator has opened a consultation.
    Consultation,
    /// A regulator has published guidance, standards, or a report.
    Publication,
    /// Existing requirements have been amended or clarified.
    Update,
    /// An enforcement action or penalty decision.
    Enforcement,
    /// Non-binding supervisory guidance.
    Guidance,
}

impl EventType {
    /// All event types in canonical order.
    pub fn all() -> &'static [EventType] {
        &[
            Self::Deadline,
            Self::Implementation,
            Self::Consultation,
            Self::Publication,
            Self::Update,
            Self::Enforcement,
            Self::Guidance,
        ]
    }

    /// The snake_case identifier, matching the serde serialization format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deadline => "deadline",
            Self::Implementation => "implementation",
            Self::Consultation => "consultation",
            Self::Publication => "publication",
            Self::Update => "update",
            Self::Enforcement => "enforcement",
            Self::Guidance => "guidance",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deadline" => Ok(Self::Deadline),
            "implementation" => Ok(Self::Implementation),
            "consultation" => Ok(Self::Consultation),
            "publication" => Ok(Self::Publication),
            "update" => Ok(Self::Update),
            "enforcement" => Ok(Self::Enforcement),
            "guidance" => Ok(Self::Guidance),
            other => Err(CoreError::UnknownVariant {
                domain: "event type",
                value: other.to_string(),
            }),
        }
    }
}

// ─── Priority ────────────────────────────────────────────────────────

/// Urgency of an event, contributing the priority weight of the risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventPriority {
    /// Immediate attention required.
    Critical,
    /// Material impact, near-term action.
    High,
    /// Relevant, schedule for review.
    Medium,
    /// Informational.
    Low,
}

impl EventPriority {
    /// All priorities in canonical order (most to least urgent).
    pub fn all() -> &'static [EventPriority] {
        &[Self::Critical, Self::High, Self::Medium, Self::Low]
    }

    /// The snake_case identifier, matching the serde serialization format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl std::fmt::Display for EventPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventPriority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "critical" => Ok(Self::Critical),
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(CoreError::UnknownVariant {
                domain: "event priority",
                value: other.to_string(),
            }),
        }
    }
}

// ─── Workflow status ─────────────────────────────────────────────────

/// Where an event sits in the review workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    /// Newly ingested, not yet triaged.
    New,
    /// Under review by the compliance team.
    InReview,
    /// Actioned; follow-ups recorded.
    Actioned,
    /// Archived; no further action.
    Archived,
}

impl EventStatus {
    /// All statuses in canonical workflow order.
    pub fn all() -> &'static [EventStatus] {
        &[Self::New, Self::InReview, Self::Actioned, Self::Archived]
    }

    /// The snake_case identifier, matching the serde serialization format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::InReview => "in_review",
            Self::Actioned => "actioned",
            Self::Archived => "archived",
        }
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "in_review" => Ok(Self::InReview),
            "actioned" => Ok(Self::Actioned),
            "archived" => Ok(Self::Archived),
            other => Err(CoreError::UnknownVariant {
                domain: "event status",
                value: other.to_string(),
            }),
        }
    }
}

// ─── Category ────────────────────────────────────────────────────────

/// Functional category of an event, driving the category-triggered
/// impact-area labels in the normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    /// Disclosure obligations (product, entity, or transaction level).
    Disclosure,
    /// Periodic or ad-hoc regulatory reporting.
    Reporting,
    /// Governance and oversight arrangements.
    Governance,
    /// Risk management frameworks and controls.
    RiskManagement,
    /// Market conduct and client treatment.
    MarketConduct,
    /// Tax and levy obligations.
    Taxation,
}

impl EventCategory {
    /// All categories in canonical order.
    pub fn all() -> &'static [EventCategory] {
        &[
            Self::Disclosure,
            Self::Reporting,
            Self::Governance,
            Self::RiskManagement,
            Self::MarketConduct,
            Self::Taxation,
        ]
    }

    /// The snake_case identifier, matching the serde serialization format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Disclosure => "disclosure",
            Self::Reporting => "reporting",
            Self::Governance => "governance",
            Self::RiskManagement => "risk_management",
            Self::MarketConduct => "market_conduct",
            Self::Taxation => "taxation",
        }
    }
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "disclosure" => Ok(Self::Disclosure),
            "reporting" => Ok(Self::Reporting),
            "governance" => Ok(Self::Governance),
            "risk_management" => Ok(Self::RiskManagement),
            "market_conduct" => Ok(Self::MarketConduct),
            "taxation" => Ok(Self::Taxation),
            other => Err(CoreError::UnknownVariant {
                domain: "event category",
                value: other.to_string(),
            }),
        }
    }
}

// ─── Framework ───────────────────────────────────────────────────────

/// The regulatory regime an event belongs to.
///
/// Frameworks with dedicated derivation entries (requirement sentence,
/// impact-area pair, action pair) are SFDR, CSRD, Taxonomy, financial crime,
/// AML, and KYC; the remaining frameworks contribute nothing framework-specific
/// and fall through the generic paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Framework {
    /// Sustainable Finance Disclosure Regulation.
    Sfdr,
    /// Corporate Sustainability Reporting Directive.
    Csrd,
    /// EU Taxonomy Regulation.
    Taxonomy,
    /// Financial crime prevention regimes.
    FinancialCrime,
    /// Anti-money laundering.
    Aml,
    /// Know Your Customer.
    Kyc,
    /// Markets in Financial Instruments Directive II.
    #[serde(rename = "mifid_ii")]
    MifidII,
    /// General Data Protection Regulation.
    Gdpr,
    /// Any regime without a dedicated derivation entry.
    Other,
}

impl Framework {
    /// All frameworks in canonical order.
    pub fn all() -> &'static [Framework] {
        &[
            Self::Sfdr,
            Self::Csrd,
            Self::Taxonomy,
            Self::FinancialCrime,
            Self::Aml,
            Self::Kyc,
            Self::MifidII,
            Self::Gdpr,
            Self::Other,
        ]
    }

    /// The snake_case identifier, matching the serde serialization format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sfdr => "sfdr",
            Self::Csrd => "csrd",
            Self::Taxonomy => "taxonomy",
            Self::FinancialCrime => "financial_crime",
            Self::Aml => "aml",
            Self::Kyc => "kyc",
            Self::MifidII => "mifid_ii",
            Self::Gdpr => "gdpr",
            Self::Other => "other",
        }
    }

    /// The upper-cased entity label for this framework
    /// (e.g. `"SFDR"`, `"FINANCIAL_CRIME"`).
    pub fn label(&self) -> String {
        self.as_str().to_uppercase()
    }
}

impl std::fmt::Display for Framework {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Framework {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sfdr" => Ok(Self::Sfdr),
            "csrd" => Ok(Self::Csrd),
            "taxonomy" => Ok(Self::Taxonomy),
            "financial_crime" => Ok(Self::FinancialCrime),
            "aml" => Ok(Self::Aml),
            "kyc" => Ok(Self::Kyc),
            "mifid_ii" => Ok(Self::MifidII),
            "gdpr" => Ok(Self::Gdpr),
            "other" => Ok(Self::Other),
            other => Err(CoreError::UnknownVariant {
                domain: "framework",
                value: other.to_string(),
            }),
        }
    }
}

// ─── Jurisdiction ────────────────────────────────────────────────────

/// Geography an event applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Jurisdiction {
    /// European Union.
    Eu,
    /// United Kingdom.
    Uk,
    /// United States.
    Us,
    /// Asia-Pacific.
    Apac,
    /// Multi-jurisdictional or global standards bodies.
    Global,
}

impl Jurisdiction {
    /// All jurisdictions in canonical order.
    pub fn all() -> &'static [Jurisdiction] {
        &[Self::Eu, Self::Uk, Self::Us, Self::Apac, Self::Global]
    }

    /// The snake_case identifier, matching the serde serialization format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eu => "eu",
            Self::Uk => "uk",
            Self::Us => "us",
            Self::Apac => "apac",
            Self::Global => "global",
        }
    }

    /// The upper-cased entity label for this jurisdiction (e.g. `"EU"`).
    pub fn label(&self) -> String {
        self.as_str().to_uppercase()
    }
}

impl std::fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Jurisdiction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eu" => Ok(Self::Eu),
            "uk" => Ok(Self::Uk),
            "us" => Ok(Self::Us),
            "apac" => Ok(Self::Apac),
            "global" => Ok(Self::Global),
            other => Err(CoreError::UnknownVariant {
                domain: "jurisdiction",
                value: other.to_string(),
            }),
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_roundtrips<T>(all: &[T])
    where
        T: Copy + PartialEq + std::fmt::Debug + std::fmt::Display + FromStr<Err = CoreError>,
        T: Serialize + for<'de> Deserialize<'de>,
    {
        for variant in all {
            let s = variant.to_string();
            let parsed: T = s.parse().unwrap_or_else(|e| panic!("failed to parse {s:?}: {e}"));
            assert_eq!(*variant, parsed);

            let json = serde_json::to_string(variant).unwrap();
            assert_eq!(json, format!("\"{s}\""), "serde format must match as_str");
            let back: T = serde_json::from_str(&json).unwrap();
            assert_eq!(*variant, back);
        }
    }

    #[test]
    fn test_event_type_roundtrip() {
        assert_roundtrips(EventType::all());
        assert_eq!(EventType::all().len(), 7);
    }

    #[test]
    fn test_priority_roundtrip() {
        assert_roundtrips(EventPriority::all());
        assert_eq!(EventPriority::all().len(), 4);
    }

    #[test]
    fn test_status_roundtrip() {
        assert_roundtrips(EventStatus::all());
        assert_eq!(EventStatus::all().len(), 4);
    }

    #[test]
    fn test_category_roundtrip() {
        assert_roundtrips(EventCategory::all());
        assert_eq!(EventCategory::all().len(), 6);
    }

    #[test]
    fn test_framework_roundtrip() {
        assert_roundtrips(Framework::all());
        assert_eq!(Framework::all().len(), 9);
    }

    #[test]
    fn test_jurisdiction_roundtrip() {
        assert_roundtrips(Jurisdiction::all());
        assert_eq!(Jurisdiction::all().len(), 5);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!("nonexistent".parse::<EventType>().is_err());
        assert!("HIGH".parse::<EventPriority>().is_err()); // case-sensitive
        assert!("".parse::<Framework>().is_err());
    }

    #[test]
    fn test_all_variants_unique() {
        let mut seen = std::collections::HashSet::new();
        for f in Framework::all() {
            assert!(seen.insert(f.as_str()), "duplicate framework: {f}");
        }
    }

    #[test]
    fn test_framework_labels() {
        assert_eq!(Framework::Sfdr.label(), "SFDR");
        assert_eq!(Framework::FinancialCrime.label(), "FINANCIAL_CRIME");
        assert_eq!(Jurisdiction::Eu.label(), "EU");
    }
}
