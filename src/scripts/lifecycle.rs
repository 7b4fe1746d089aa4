use crate::scripts::ScriptMap;

/// npm commands that run `pre<cmd>`/`post<cmd>` scripts even without a script of that name
pub const BUILTIN_COMMANDS: [&str; 8] = [
    "publish",
    "install",
    "uninstall",
    "test",
    "stop",
    "start",
    "restart",
    "version",
];

/// Which side of its owner a lifecycle hook runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hook {
    Pre,
    Post,
}

impl Hook {
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Hook::Pre => "pre",
            Hook::Post => "post",
        }
    }

    /// Name the hook of `owner` would have, e.g. `prebuild` for `build`
    #[must_use]
    pub fn hook_name(self, owner: &str) -> String {
        format!("{}{owner}", self.prefix())
    }
}

/// Returns true if `name` is a `hook` script of an existing script or of a built-in command.
///
/// The bare prefix (`pre`, `post`) is never a lifecycle script.
#[must_use]
pub fn is_lifecycle(hook: Hook, name: &str, scripts: &ScriptMap) -> bool {
    match name.strip_prefix(hook.prefix()) {
        Some(owner) if !owner.is_empty() => {
            scripts.contains_key(owner) || BUILTIN_COMMANDS.contains(&owner)
        }
        _ => false,
    }
}

/// The `hook` script declared for `owner`, if any
#[must_use]
pub fn hook_of(hook: Hook, owner: &str, scripts: &ScriptMap) -> Option<String> {
    let name = hook.hook_name(owner);
    scripts.contains_key(&name).then_some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scripts(names: &[&str]) -> ScriptMap {
        names
            .iter()
            .map(|name| ((*name).to_string(), format!("echo {name}")))
            .collect()
    }

    #[test]
    fn test_pre_of_existing_script() {
        let map = scripts(&["build", "prebuild", "postpublish"]);
        assert!(is_lifecycle(Hook::Pre, "prebuild", &map));
        assert!(!is_lifecycle(Hook::Post, "prebuild", &map));
    }

    #[test]
    fn test_post_of_builtin_command() {
        let map = scripts(&["build", "prebuild", "postpublish"]);
        assert!(is_lifecycle(Hook::Post, "postpublish", &map));
    }

    #[test]
    fn test_prefix_without_owner() {
        let map = scripts(&["prefoo", "prettier"]);
        assert!(!is_lifecycle(Hook::Pre, "prefoo", &map));
        assert!(!is_lifecycle(Hook::Pre, "prettier", &map));
    }

    #[test]
    fn test_bare_prefix_is_not_a_hook() {
        let map = scripts(&["pre", "post", ""]);
        assert!(!is_lifecycle(Hook::Pre, "pre", &map));
        assert!(!is_lifecycle(Hook::Post, "post", &map));
    }

    #[test]
    fn test_hook_of() {
        let map = scripts(&["build", "prebuild", "test"]);
        assert_eq!(hook_of(Hook::Pre, "build", &map), Some("prebuild".to_string()));
        assert_eq!(hook_of(Hook::Post, "build", &map), None);
        assert_eq!(hook_of(Hook::Pre, "test", &map), None);
    }
}
