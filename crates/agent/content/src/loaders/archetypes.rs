//! Archetype catalog loader.

use std::path::Path;

use crate::ArchetypeCatalog;
use crate::loaders::{LoadResult, read_file};

const EMBEDDED: &str = include_str!("../../data/archetypes.ron");

/// Loader for archetype catalogs stored as RON.
///
/// File format: a map from name to [`AgentConfig`](agent_core::AgentConfig).
/// Omitted fields take the grunt defaults.
///
/// ```ron
/// {
///     "boss": (archetype: Boss, max_health: 400.0, fallback: Some(())),
///     "sentry": (weapon_range: 12.0, move_speed: 0.0),
/// }
/// ```
pub struct ArchetypeLoader;

impl ArchetypeLoader {
    /// The catalog shipped with the crate.
    pub fn embedded() -> LoadResult<ArchetypeCatalog> {
        Self::parse(EMBEDDED, "embedded archetypes.ron")
    }

    /// Loads and validates a catalog file.
    pub fn load(path: &Path) -> LoadResult<ArchetypeCatalog> {
        let content = read_file(path)?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Parses and validates catalog text. `origin` names the source in errors.
    pub fn parse(content: &str, origin: &str) -> LoadResult<ArchetypeCatalog> {
        let catalog: ArchetypeCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse archetype RON at {}: {}", origin, e))?;

        for (name, config) in catalog.iter() {
            config
                .validate()
                .map_err(|e| anyhow::anyhow!("Invalid archetype '{}' in {}: {}", name, origin, e))?;
        }

        tracing::debug!("Loaded {} archetypes from {}", catalog.len(), origin);
        Ok(catalog)
    }
}
