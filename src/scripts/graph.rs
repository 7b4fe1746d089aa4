use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};
use log::debug;

use crate::scripts::entry::{ScriptEntry, script_label};
use crate::scripts::extract::Extractor;
use crate::scripts::lifecycle::{Hook, hook_of, is_lifecycle};
use crate::scripts::{ResolveError, ScriptMap, wildcard};

/// Every script of a manifest with its relationships resolved, keyed by name
#[derive(Debug, Clone, Default)]
pub struct ScriptGraph {
    entries: IndexMap<String, ScriptEntry>,
}

impl ScriptGraph {
    /// Resolve all scripts. Entries keep the manifest's declaration order.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::NoScripts` if `scripts` is empty.
    pub fn build(scripts: &ScriptMap, extractor: &Extractor) -> Result<Self, ResolveError> {
        if scripts.is_empty() {
            return Err(ResolveError::NoScripts);
        }
        let mut entries: IndexMap<String, ScriptEntry> = scripts
            .iter()
            .map(|(name, command)| {
                (
                    name.clone(),
                    local_facts(name, command, scripts, extractor),
                )
            })
            .collect();
        link_entries(&mut entries);
        debug!("Resolved {} scripts", entries.len());
        Ok(Self { entries })
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ScriptEntry> {
        self.entries.get(name)
    }

    /// Entries in declaration order
    pub fn entries(&self) -> impl Iterator<Item = &ScriptEntry> {
        self.entries.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// First pass: everything that only depends on this script and the set of names.
fn local_facts(
    name: &str,
    command: &str,
    scripts: &ScriptMap,
    extractor: &Extractor,
) -> ScriptEntry {
    let is_pre = is_lifecycle(Hook::Pre, name, scripts);
    let is_post = is_lifecycle(Hook::Post, name, scripts);
    if is_pre || is_post {
        debug!("`{name}` is a lifecycle hook");
    }

    let child_names: IndexSet<String> = extractor
        .extract(command)
        .iter()
        .flat_map(|reference| wildcard::resolve(reference, scripts))
        .collect();

    ScriptEntry {
        name: name.to_string(),
        command: command.to_string(),
        is_pre,
        is_post,
        pre_hook: hook_of(Hook::Pre, name, scripts),
        post_hook: hook_of(Hook::Post, name, scripts),
        child_names: child_names.into_iter().collect(),
        ..Default::default()
    }
}

/// Second pass: facts that need every entry's references.
fn link_entries(entries: &mut IndexMap<String, ScriptEntry>) {
    // Self-references do not make a script a sub-script
    let referenced: HashSet<String> = entries
        .values()
        .flat_map(|entry| {
            entry
                .child_names
                .iter()
                .filter(move |child| **child != entry.name)
                .cloned()
        })
        .collect();

    for entry in entries.values_mut() {
        entry.is_sub = referenced.contains(&entry.name);
        entry.is_explicit_sub = entry.is_sub && entry.is_namespaced();
        entry.label = script_label(&entry.name, &entry.command);

        let hooks = [entry.pre_hook.as_ref(), entry.post_hook.as_ref()];
        let mut nodes = Vec::with_capacity(entry.child_names.len() + 2);
        nodes.extend(entry.pre_hook.clone());
        nodes.extend(
            entry
                .child_names
                .iter()
                .filter(|child| !hooks.contains(&Some(*child)))
                .cloned(),
        );
        nodes.extend(entry.post_hook.clone());
        entry.nodes = nodes;
    }
}
