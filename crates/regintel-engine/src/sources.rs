//! # Feed Sources — Passive Registry
//!
//! Configuration records describing the external feeds regulatory events
//! originate from. The registry is read-only: it is constructed once and
//! offers lookups, never mutation, and nothing in this engine crawls a
//! feed. Ingestion is an external concern; a registry entry just tells the
//! ingester where to go and how to map what it finds.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use regintel_core::{Framework, Jurisdiction};

/// How a feed is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    /// Structured API endpoint.
    Api,
    /// RSS/Atom feed.
    Rss,
    /// Scraped web page.
    Webscrape,
}

/// Authentication requirements of a feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceAuth {
    /// Scheme name (e.g. "api_key", "bearer", "basic").
    pub scheme: String,
    /// Scheme-specific settings (header names, token env vars, ...).
    /// Never the secret itself.
    #[serde(default)]
    pub config: BTreeMap<String, String>,
}

/// One external feed configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Stable registry identifier.
    pub id: String,
    /// Human-readable feed name.
    pub name: String,
    /// Feed endpoint.
    pub url: String,
    /// How the feed is consumed.
    #[serde(rename = "type")]
    pub source_type: SourceType,
    /// Geography the feed covers.
    pub jurisdiction: Jurisdiction,
    /// Frameworks the feed reports on.
    pub frameworks: Vec<Framework>,
    /// How often an ingester should poll, in minutes.
    pub fetch_interval_minutes: u32,
    /// Whether the feed is currently active.
    pub enabled: bool,
    /// Authentication requirements, when the feed is not public.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<SourceAuth>,
    /// Parsing mapping: source field name → event field name.
    #[serde(default)]
    pub field_map: BTreeMap<String, String>,
}

/// Read-only collection of feed configurations.
#[derive(Debug, Clone, Default)]
pub struct SourceRegistry {
    sources: Vec<SourceConfig>,
}

impl SourceRegistry {
    /// Build a registry from a fixed set of configurations.
    pub fn new(sources: Vec<SourceConfig>) -> Self {
        Self { sources }
    }

    /// Look up a source by registry id.
    pub fn get(&self, id: &str) -> Option<&SourceConfig> {
        self.sources.iter().find(|s| s.id == id)
    }

    /// All sources, in registration order.
    pub fn all(&self) -> &[SourceConfig] {
        &self.sources
    }

    /// Sources currently enabled, in registration order.
    pub fn enabled(&self) -> impl Iterator<Item = &SourceConfig> {
        self.sources.iter().filter(|s| s.enabled)
    }

    /// Sources that report on the given framework.
    pub fn for_framework(&self, framework: Framework) -> impl Iterator<Item = &SourceConfig> {
        self.sources
            .iter()
            .filter(move |s| s.frameworks.contains(&framework))
    }

    /// Number of registered sources.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn source(id: &str, enabled: bool, frameworks: Vec<Framework>) -> SourceConfig {
        SourceConfig {
            id: id.to_string(),
            name: format!("Feed {id}"),
            url: format!("https://feeds.example.org/{id}"),
            source_type: SourceType::Rss,
            jurisdiction: Jurisdiction::Eu,
            frameworks,
            fetch_interval_minutes: 60,
            enabled,
            auth: None,
            field_map: BTreeMap::new(),
        }
    }

    fn registry() -> SourceRegistry {
        SourceRegistry::new(vec![
            source("esma-news", true, vec![Framework::Sfdr, Framework::MifidII]),
            source("efrag-csrd", true, vec![Framework::Csrd]),
            source("legacy-feed", false, vec![Framework::Sfdr]),
        ])
    }

    #[test]
    fn test_get_by_id() {
        let r = registry();
        assert_eq!(r.get("efrag-csrd").unwrap().name, "Feed efrag-csrd");
        assert!(r.get("missing").is_none());
    }

    #[test]
    fn test_enabled_filters_disabled_feeds() {
        let r = registry();
        let ids: Vec<&str> = r.enabled().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["esma-news", "efrag-csrd"]);
    }

    #[test]
    fn test_for_framework() {
        let r = registry();
        let ids: Vec<&str> = r.for_framework(Framework::Sfdr).map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["esma-news", "legacy-feed"]);
        assert_eq!(r.for_framework(Framework::Gdpr).count(), 0);
    }

    #[test]
    fn test_serde_roundtrip_with_auth() {
        let mut s = source("secured", true, vec![Framework::Aml]);
        s.auth = Some(SourceAuth {
            scheme: "api_key".to_string(),
            config: BTreeMap::from([("header".to_string(), "X-Api-Key".to_string())]),
        });
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"type\":\"rss\""));
        let back: SourceConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn test_registry_len() {
        let r = registry();
        assert_eq!(r.len(), 3);
        assert!(!r.is_empty());
        assert_eq!(r.all().len(), 3);
    }
}
