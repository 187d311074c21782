use crate::keywords::GroupRegistry;

/// Ordered groups of ordered keyword strings, the shape sent to the backend.
pub type CanonicalGroups = Vec<Vec<String>>;

/// Recompute the canonical groups from the registry.
///
/// Keywords are trimmed and empty ones dropped; a group left without keywords
/// is omitted even though it stays in the registry.
pub fn canonical_groups(registry: &GroupRegistry) -> CanonicalGroups {
    registry
        .groups()
        .iter()
        .map(|group| {
            group
                .tags()
                .iter()
                .map(|tag| tag.text().trim())
                .filter(|text| !text.is_empty())
                .map(ToOwned::to_owned)
                .collect::<Vec<_>>()
        })
        .filter(|keywords| !keywords.is_empty())
        .collect()
}
