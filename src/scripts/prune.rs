use crate::scripts::entry::ScriptEntry;

/// Whether an entry stays at the top level when pruning.
///
/// Hooks and namespaced scripts referenced elsewhere are hidden, since they show
/// up under their owner. A referenced script without a namespace stays visible.
#[must_use]
pub fn is_top_level(entry: &ScriptEntry) -> bool {
    !(entry.is_hook() || entry.is_explicit_sub)
}

/// Filter `entries` down to the ones shown at the top level, keeping their order
pub fn prune<'a>(entries: impl IntoIterator<Item = &'a ScriptEntry>) -> Vec<&'a ScriptEntry> {
    entries.into_iter().filter(|e| is_top_level(e)).collect()
}
