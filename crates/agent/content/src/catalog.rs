//! Named agent configurations.

use std::collections::BTreeMap;
use std::str::FromStr;

use agent_core::{AgentConfig, Archetype};

/// Agent tunings keyed by name (e.g. `"boss"`, `"sentry"`).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ArchetypeCatalog {
    entries: BTreeMap<String, AgentConfig>,
}

impl ArchetypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, config: AgentConfig) {
        self.entries.insert(name.into(), config);
    }

    pub fn get(&self, name: &str) -> Option<&AgentConfig> {
        self.entries.get(name)
    }

    /// Catalog entry for `name`, or the built-in defaults of the archetype
    /// with that name.
    pub fn resolve(&self, name: &str) -> Option<AgentConfig> {
        self.get(name)
            .cloned()
            .or_else(|| Archetype::from_str(name).ok().map(AgentConfig::new))
    }

    /// Entry names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AgentConfig)> {
        self.entries
            .iter()
            .map(|(name, config)| (name.as_str(), config))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_prefers_entries_over_builtins() {
        let mut catalog = ArchetypeCatalog::new();
        catalog.insert(
            "boss",
            AgentConfig {
                max_health: 900.0,
                ..AgentConfig::new(Archetype::Boss)
            },
        );

        assert_eq!(catalog.resolve("boss").map(|c| c.max_health), Some(900.0));
        assert_eq!(
            catalog.resolve("support"),
            Some(AgentConfig::new(Archetype::Support))
        );
        assert_eq!(catalog.resolve("dragon"), None);
    }

    #[test]
    fn names_are_sorted() {
        let mut catalog = ArchetypeCatalog::new();
        catalog.insert("support", AgentConfig::default());
        catalog.insert("boss", AgentConfig::default());

        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["boss", "support"]);
    }
}
