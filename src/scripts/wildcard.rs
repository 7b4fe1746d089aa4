//! Wildcard expansion of script references
//!
//! Batch runners accept patterns such as `lint:*` or `test:**`. Script names are
//! colon-delimited, while glob semantics are path-shaped, so names and patterns are
//! translated by swapping `:` and `/` before matching. A `*` then stays within one
//! name segment and `**` spans any number of them.

use glob::{MatchOptions, Pattern};
use log::debug;

use crate::scripts::{SEGMENT_SEPARATOR, ScriptMap};

const PATH_SEPARATOR: char = '/';

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

#[must_use]
pub fn is_wildcard(reference: &str) -> bool {
    reference.contains('*')
}

/// Swap the segment separator and the path separator. Applying it twice is the identity.
fn swap_separators(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            SEGMENT_SEPARATOR => PATH_SEPARATOR,
            PATH_SEPARATOR => SEGMENT_SEPARATOR,
            c => c,
        })
        .collect()
}

/// Every script name matching `pattern`, in map order. An invalid pattern matches nothing.
#[must_use]
pub fn expand(pattern: &str, scripts: &ScriptMap) -> Vec<String> {
    let glob = match Pattern::new(&swap_separators(pattern)) {
        Ok(glob) => glob,
        Err(e) => {
            debug!("Ignoring invalid script pattern `{pattern}`: {e}");
            return Vec::new();
        }
    };
    scripts
        .keys()
        .map(|name| swap_separators(name.as_str()))
        .filter(|candidate| glob.matches_with(candidate, MATCH_OPTIONS))
        .map(|candidate| swap_separators(&candidate))
        .collect()
}

/// Resolve one extracted reference into existing script names.
///
/// Wildcards are expanded, plain names pass through. Names without a matching
/// script are dropped.
#[must_use]
pub fn resolve(reference: &str, scripts: &ScriptMap) -> Vec<String> {
    if is_wildcard(reference) {
        let expanded = expand(reference, scripts);
        if expanded.is_empty() {
            debug!("Pattern `{reference}` matched no scripts");
        }
        expanded
    } else if scripts.contains_key(reference) {
        vec![reference.to_string()]
    } else {
        debug!("Dropping reference to unknown script `{reference}`");
        Vec::new()
    }
}
