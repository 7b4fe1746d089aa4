//! Script relationship resolution
//!
//! Scripts in a manifest reference each other through a couple of shell idioms
//! (`npm run build`, `npm-run-all -p lint:*`) and through the `pre`/`post` naming
//! convention for lifecycle hooks. This module recovers those links and arranges
//! them into a graph keyed by script name.
//!
//! Resolution happens in two passes: every entry is first built from facts local
//! to its own name and command, then cross-entry facts (whether a script is
//! referenced by another one, the ordered child list including hooks) are filled
//! in once the whole set exists.

pub mod entry;
pub mod extract;
pub mod graph;
pub mod lifecycle;
pub mod prune;
pub mod wildcard;

use indexmap::IndexMap;
use thiserror::Error;

/// Script name to command string, in manifest declaration order
pub type ScriptMap = IndexMap<String, String>;

/// Separator between the segments of a namespaced script name (`test:unit`)
pub const SEGMENT_SEPARATOR: char = ':';

/// Errors that can occur while resolving scripts into a tree
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("no scripts available")]
    NoScripts,
    #[error("Invalid invocation rule pattern `{pattern}`: {source}")]
    Rule {
        source: regex::Error,
        pattern: String,
    },
}
