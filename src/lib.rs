//! Core implementation of scriptree
//!
//! scriptree reads the `scripts` section of a `package.json` and reconstructs how the
//! scripts call each other: direct `npm run` invocations, batch runs through
//! npm-run-all (including `name:*` patterns) and `pre`/`post` lifecycle hooks. The
//! result is a labelled tree that can be rendered as text or serialized.

use log::debug;

use crate::scripts::extract::{Extractor, InvocationRule, default_rules};
use crate::scripts::graph::ScriptGraph;
use crate::scripts::{ResolveError, ScriptMap};
use crate::tree::{Labeler, PlainLabels, TreeBuilder, TreeNode};

pub mod config_file;
pub mod logger;
pub mod manifest;
pub mod render;
pub mod scripts;
pub mod theme;
pub mod tree;
pub mod watch;

/// Options controlling how scripts are resolved and arranged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Sort top-level scripts alphabetically
    pub alpha: bool,
    /// Hide hooks and namespaced sub-scripts from the top level
    pub prune: bool,
    /// Invocation idioms recognised in commands
    pub rules: Vec<InvocationRule>,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            alpha: false,
            prune: false,
            rules: default_rules(),
        }
    }
}

/// Resolve `scripts` into a tree with plain text labels.
///
/// # Errors
///
/// Returns `ResolveError::NoScripts` if `scripts` is empty, or
/// `ResolveError::Rule` if an invocation rule does not compile.
pub fn resolve(scripts: &ScriptMap, options: &ResolveOptions) -> Result<TreeNode, ResolveError> {
    resolve_with(scripts, options, &PlainLabels)
}

/// Resolve `scripts` into a tree, producing labels with `labeler`.
///
/// # Errors
///
/// Returns `ResolveError::NoScripts` if `scripts` is empty, or
/// `ResolveError::Rule` if an invocation rule does not compile.
pub fn resolve_with(
    scripts: &ScriptMap,
    options: &ResolveOptions,
    labeler: &dyn Labeler,
) -> Result<TreeNode, ResolveError> {
    if scripts.is_empty() {
        return Err(ResolveError::NoScripts);
    }
    let extractor = Extractor::new(&options.rules)?;
    let graph = ScriptGraph::build(scripts, &extractor)?;
    debug!(
        "Building tree (alpha: {}, prune: {})",
        options.alpha, options.prune
    );
    Ok(TreeBuilder::new(&graph)
        .alpha(options.alpha)
        .prune(options.prune)
        .labeler(labeler)
        .build())
}
