/// Identifies where enriched records end up in the destination store.
///
/// None of these values influence the enrichment itself.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DatastoreTarget {
    pub project_id: String,
    pub namespace: Option<String>,
    /// Ancestor path as ordered `(kind, name)` pairs.
    pub parents: Vec<(String, String)>,
    pub kind: String,
    pub key_column: String,
    pub indexed_columns: Vec<String>,
}
