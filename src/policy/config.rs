use std::collections::BTreeSet;

/// Policy facts the verifier and executor consume.
///
/// An explicit value passed into calls — the engine holds no process-wide
/// mutable settings. Owned by the caller, read-only to the core.
#[derive(Clone, Debug)]
pub struct Policy {
    /// Bare executable names a `run` action may invoke. Allowlist-by-default:
    /// anything absent is denied.
    pub allow_commands: BTreeSet<String>,
    /// Bare executable names that are always denied, checked before the
    /// allowlist so an explicit deny is reported even for unlisted commands.
    pub disallow_commands: BTreeSet<String>,
    /// Ceiling on the number of actions in a single plan.
    pub max_actions: usize,
    /// When true, `edit` actions carrying a patch require a git work tree.
    pub enforce_git_for_patches: bool,
    /// Workspace entries external tooling should skip; read-only to the core.
    pub ignores: Vec<String>,
}

const DEFAULT_ALLOW: &[&str] = &[
    "cargo", "git", "make", "npm", "pnpm", "yarn", "tsc", "eslint", "pytest", "python",
];

impl Default for Policy {
    fn default() -> Self {
        Self {
            allow_commands: DEFAULT_ALLOW.iter().map(|s| s.to_string()).collect(),
            disallow_commands: BTreeSet::new(),
            max_actions: 20,
            enforce_git_for_patches: true,
            ignores: Vec::new(),
        }
    }
}
