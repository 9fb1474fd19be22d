//! Selectable-area catalog built from the JMA area metadata document.

use crate::client::JmaClient;
use crate::types::{AreaEntry, AreaMetadata, JmaError};
use std::collections::HashMap;

/// The office-level areas a user can pick from.
///
/// Entries keep the metadata document's order and are keyed by code; the
/// display name is a label only. Name lookup is first-match-wins, so a
/// duplicated upstream name cannot silently shadow an earlier area.
#[derive(Debug, Clone, Default)]
pub struct AreaCatalog {
    entries: Vec<AreaEntry>,
    index: HashMap<String, String>,
}

impl AreaCatalog {
    /// Fetch the metadata document and build the catalog.
    pub async fn load(client: &JmaClient) -> Result<Self, JmaError> {
        let metadata = client.fetch_area_metadata().await?;
        Ok(Self::from_metadata(&metadata))
    }

    /// Build the catalog from an already-fetched metadata document.
    ///
    /// Offices without a `name` field are skipped with a warning.
    pub fn from_metadata(metadata: &AreaMetadata) -> Self {
        let mut entries = Vec::with_capacity(metadata.offices.len());
        let mut index = HashMap::with_capacity(metadata.offices.len());

        for (code, office) in &metadata.offices {
            let Some(name) = office.get("name").and_then(|v| v.as_str()) else {
                tracing::warn!("office {} has no name, skipping", code);
                continue;
            };

            entries.push(AreaEntry {
                name: name.to_string(),
                code: code.clone(),
            });

            if !index.contains_key(name) {
                index.insert(name.to_string(), code.clone());
            } else {
                tracing::warn!("duplicate office name {:?}, keeping first code", name);
            }
        }

        Self { entries, index }
    }

    /// An empty catalog, used when the metadata fetch failed and the
    /// selection list degrades to nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Entries in document order.
    pub fn entries(&self) -> &[AreaEntry] {
        &self.entries
    }

    /// Resolve a display name to an area code.
    pub fn code_for(&self, name: &str) -> Option<&str> {
        self.index.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
