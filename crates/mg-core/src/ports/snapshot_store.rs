use super::SnapshotStoreError;

/// Session-scoped key-value slots holding serialized restoration snapshots.
///
/// Each listing page reads and writes only its own key, so implementations
/// need no cross-key coordination.
pub trait SnapshotStorePort: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, SnapshotStoreError>;

    /// Overwrites any existing value.
    fn set(&self, key: &str, value: String) -> Result<(), SnapshotStoreError>;

    /// Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), SnapshotStoreError>;
}
