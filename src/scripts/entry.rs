use crate::scripts::SEGMENT_SEPARATOR;

/// A single manifest script and everything resolved about its relationships.
///
/// Relationships are stored by name; entries are looked up through the owning
/// [`ScriptGraph`](crate::scripts::graph::ScriptGraph).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptEntry {
    pub name: String,
    pub command: String,
    /// `pre<owner>` where the owner is a script or a built-in command
    pub is_pre: bool,
    /// `post<owner>` where the owner is a script or a built-in command
    pub is_post: bool,
    /// This script's own `pre<name>` script, if declared
    pub pre_hook: Option<String>,
    /// This script's own `post<name>` script, if declared
    pub post_hook: Option<String>,
    /// Existing scripts referenced by the command, in extraction order
    pub child_names: Vec<String>,
    /// Referenced by at least one other script
    pub is_sub: bool,
    /// Referenced and namespaced (`test:unit`)
    pub is_explicit_sub: bool,
    pub label: String,
    /// Children as displayed: pre hook, referenced scripts, post hook
    pub nodes: Vec<String>,
}

impl ScriptEntry {
    #[must_use]
    pub fn is_hook(&self) -> bool {
        self.is_pre || self.is_post
    }

    #[must_use]
    pub fn is_namespaced(&self) -> bool {
        self.name.contains(SEGMENT_SEPARATOR)
    }
}

/// Display text for a script: its name followed by its command
#[must_use]
pub fn script_label(name: &str, command: &str) -> String {
    format!("{name} → {command}")
}
