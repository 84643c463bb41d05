//! Summary of the edits a patch run performed.

/// What a single patch run changed, for progress reporting.
///
/// The patcher itself never prints; the CLI renders this report (or ignores
/// it under `--quiet`).
#[derive(Debug, Clone, Default)]
pub struct PatchReport {
    /// The value the root's `base` attribute was set to.
    pub base_dir: String,

    /// Per-style counts of deleted rules, in document order. Styles with no
    /// deletions are omitted.
    pub deleted_rules: Vec<(String, usize)>,

    /// Names of layers that had `clear-label-cache` set.
    pub label_cache_cleared: Vec<String>,

    /// Names of layers that had `cache-features` enabled.
    pub feature_cached: Vec<String>,

    /// Names of layers removed because they referenced no style.
    pub removed_layers: Vec<String>,
}

impl PatchReport {
    /// Total number of rules deleted across all styles.
    pub fn total_deleted_rules(&self) -> usize {
        self.deleted_rules.iter().map(|(_, n)| n).sum()
    }

    /// Whether the run deleted any rules or layers.
    ///
    /// Attribute rewrites alone do not count: re-patching an already-patched
    /// document rewrites the same attributes but deletes nothing.
    pub fn deleted_anything(&self) -> bool {
        self.total_deleted_rules() > 0 || !self.removed_layers.is_empty()
    }
}
