//! # Normalization — Deterministic Event Enrichment
//!
//! Derives the analytical fields of a regulatory event from its base
//! record: key entities, key requirements, risk score, impact areas, and
//! suggested actions.
//!
//! ## Contract
//!
//! Total over the validated domain — never fails for a record that passed
//! schema validation — and idempotent: normalizing an unchanged base record
//! twice yields field-for-field identical output.
//!
//! ## Derivation rules
//!
//! Every rule is declarative lookup data: const keyword tables and
//! exhaustive matches over the taxonomy enums. Adding a taxonomy variant
//! forces the corresponding table to make a choice at compile time.

use regintel_core::{
    EventCategory, EventPriority, EventType, Framework, NormalizedRegulatoryEvent, RegulatoryEvent,
};

/// Keyword → entity label table, scanned case-insensitively over the
/// concatenated title and description. Each label is added at most once
/// regardless of how many keywords map to it or how often they appear.
const ENTITY_KEYWORDS: &[(&str, &str)] = &[
    ("disclosure", "DISCLOSURE REQUIREMENTS"),
    ("reporting", "REPORTING OBLIGATIONS"),
    ("compliance", "COMPLIANCE PROCEDURES"),
    ("sustainable", "SUSTAINABILITY"),
    ("sustainability", "SUSTAINABILITY"),
    ("climate", "CLIMATE"),
    ("esg", "ESG"),
    ("financial", "FINANCIAL INSTITUTIONS"),
    ("risk", "RISK MANAGEMENT"),
    ("governance", "GOVERNANCE"),
];

/// Risk-score base. Priority and type weights are added on top and the sum
/// is clamped to `[0, 100]`; the lowest reachable score is 55.
const RISK_BASE: i32 = 50;

/// Enrich one validated base record.
pub fn normalize(event: &RegulatoryEvent) -> NormalizedRegulatoryEvent {
    NormalizedRegulatoryEvent {
        event: event.clone(),
        normalized_title: event.title.to_uppercase(),
        normalized_description: event.description.trim().to_string(),
        key_entities: key_entities(event),
        key_requirements: key_requirements(event),
        risk_score: risk_score(event),
        impact_areas: impact_areas(event),
        suggested_actions: suggested_actions(event),
    }
}

/// Push `label` unless it is already present (set semantics, insertion order).
fn push_unique(labels: &mut Vec<String>, label: &str) {
    if !labels.iter().any(|existing| existing == label) {
        labels.push(label.to_string());
    }
}

fn key_entities(event: &RegulatoryEvent) -> Vec<String> {
    let mut entities = Vec::new();
    push_unique(&mut entities, &event.framework.label());
    push_unique(&mut entities, &event.jurisdiction.label());

    let haystack = format!("{} {}", event.title, event.description).to_lowercase();
    for (keyword, label) in ENTITY_KEYWORDS {
        if haystack.contains(keyword) {
            push_unique(&mut entities, label);
        }
    }
    entities
}

fn key_requirements(event: &RegulatoryEvent) -> Vec<String> {
    let mut requirements = vec![type_requirement(event)];
    if let Some(sentence) = framework_requirement(event.framework) {
        requirements.push(sentence.to_string());
    }
    requirements
}

/// Exactly one type-triggered requirement sentence. Deadline and
/// implementation events interpolate their date when it is known.
fn type_requirement(event: &RegulatoryEvent) -> String {
    match event.event_type {
        EventType::Deadline => match event.deadline_date {
            Some(date) => format!("Meet the compliance deadline of {date}."),
            None => "Meet the compliance deadline once it is confirmed.".to_string(),
        },
        EventType::Implementation => match event.effective_date {
            Some(date) => format!("Implement the required changes by {date}."),
            None => "Implement the required changes once the effective date is confirmed."
                .to_string(),
        },
        EventType::Consultation => {
            "Review the consultation paper and consider submitting a response.".to_string()
        }
        EventType::Publication => {
            "Review the published material and assess its applicability.".to_string()
        }
        EventType::Update => {
            "Assess the impact of the updated requirements on existing controls.".to_string()
        }
        EventType::Enforcement | EventType::Guidance => {
            "Review and assess the applicability of this development.".to_string()
        }
    }
}

/// At most one framework-triggered requirement sentence. Defined for SFDR,
/// CSRD, Taxonomy, and financial crime; other frameworks contribute nothing.
fn framework_requirement(framework: Framework) -> Option<&'static str> {
    match framework {
        Framework::Sfdr => Some("Review SFDR disclosure obligations for in-scope products."),
        Framework::Csrd => Some("Assess CSRD sustainability reporting scope and timelines."),
        Framework::Taxonomy => Some("Evaluate EU Taxonomy alignment of economic activities."),
        Framework::FinancialCrime => {
            Some("Review financial crime controls and screening procedures.")
        }
        Framework::Aml
        | Framework::Kyc
        | Framework::MifidII
        | Framework::Gdpr
        | Framework::Other => None,
    }
}

/// `50 + priority weight + type weight`, clamped to `[0, 100]`.
///
/// The floor clamp is unreachable (the minimum sum is 55) but kept so the
/// score can never leave its declared bounds if a weight table changes.
fn risk_score(event: &RegulatoryEvent) -> u8 {
    let priority_weight = match event.priority {
        EventPriority::Critical => 30,
        EventPriority::High => 20,
        EventPriority::Medium => 10,
        EventPriority::Low => 0,
    };
    let type_weight = match event.event_type {
        EventType::Enforcement => 20,
        EventType::Deadline | EventType::Implementation => 15,
        EventType::Update | EventType::Publication => 10,
        EventType::Consultation | EventType::Guidance => 5,
    };
    (RISK_BASE + priority_weight + type_weight).clamp(0, 100) as u8
}

/// Category-triggered impact-area labels: a fixed pair per category with a
/// dedicated entry, one generic label for the rest.
fn category_impact_areas(category: EventCategory) -> &'static [&'static str] {
    match category {
        EventCategory::Disclosure => &["Product Disclosures", "Client Communications"],
        EventCategory::Reporting => &["Regulatory Reporting", "Data Management"],
        EventCategory::Governance => &["Board Oversight", "Internal Policies"],
        EventCategory::RiskManagement => &["Risk Frameworks", "Control Testing"],
        EventCategory::MarketConduct | EventCategory::Taxation => &["General Compliance"],
    }
}

/// Framework-triggered impact-area pair. Defined for SFDR, CSRD, Taxonomy,
/// financial crime, AML, and KYC; other frameworks contribute nothing.
fn framework_impact_areas(framework: Framework) -> &'static [&'static str] {
    match framework {
        Framework::Sfdr => &["Sustainability Disclosures", "Product Classification"],
        Framework::Csrd => &["Sustainability Reporting", "Assurance Readiness"],
        Framework::Taxonomy => &["Taxonomy Alignment", "Green Asset Ratios"],
        Framework::FinancialCrime => &["Transaction Monitoring", "Sanctions Screening"],
        Framework::Aml => &["AML Controls", "Suspicious Activity Reporting"],
        Framework::Kyc => &["Customer Due Diligence", "Identity Verification"],
        Framework::MifidII | Framework::Gdpr | Framework::Other => &[],
    }
}

fn impact_areas(event: &RegulatoryEvent) -> Vec<String> {
    let mut areas = Vec::new();
    for label in category_impact_areas(event.category) {
        push_unique(&mut areas, label);
    }
    for label in framework_impact_areas(event.framework) {
        push_unique(&mut areas, label);
    }
    areas
}

/// Type-triggered action pair, with a generic pair for types without a
/// dedicated entry.
fn type_actions(event_type: EventType) -> &'static [&'static str] {
    match event_type {
        EventType::Deadline => &[
            "Confirm readiness against the deadline.",
            "Escalate gaps to the compliance committee.",
        ],
        EventType::Implementation => &[
            "Plan the implementation workstream.",
            "Assign owners for each required change.",
        ],
        EventType::Consultation => &[
            "Draft a consultation response.",
            "Coordinate positions with industry bodies.",
        ],
        EventType::Publication => &[
            "Circulate the publication to affected teams.",
            "Update the regulatory inventory.",
        ],
        EventType::Update => &[
            "Map the changes against current controls.",
            "Update affected policies and procedures.",
        ],
        EventType::Enforcement | EventType::Guidance => &[
            "Review the development with legal counsel.",
            "Record the assessment in the compliance log.",
        ],
    }
}

/// Framework-triggered action pair. Defined for SFDR, CSRD, and Taxonomy
/// only; other frameworks contribute nothing.
fn framework_actions(framework: Framework) -> &'static [&'static str] {
    match framework {
        Framework::Sfdr => &[
            "Review SFDR entity-level and product-level disclosures.",
            "Reassess principal adverse impact statements.",
        ],
        Framework::Csrd => &[
            "Scope the double materiality assessment.",
            "Prepare ESRS data collection.",
        ],
        Framework::Taxonomy => &[
            "Reassess taxonomy eligibility screening.",
            "Update green ratio calculations.",
        ],
        Framework::FinancialCrime
        | Framework::Aml
        | Framework::Kyc
        | Framework::MifidII
        | Framework::Gdpr
        | Framework::Other => &[],
    }
}

fn suggested_actions(event: &RegulatoryEvent) -> Vec<String> {
    let mut actions: Vec<String> = type_actions(event.event_type)
        .iter()
        .map(|a| a.to_string())
        .collect();
    actions.extend(framework_actions(event.framework).iter().map(|a| a.to_string()));
    actions
}

// ─── Tests ───────────────────────────────────────────────────────────
