//! Verifier behavior: accumulating, ordered, no side effects.

use plangate::policy::{verify_plan, Policy};
use plangate::types::{Action, Plan};

fn run_action(cmd: &[&str]) -> Action {
    Action::Run {
        cmd: cmd.iter().map(|s| s.to_string()).collect(),
        why: None,
    }
}

fn create_action(file: &str) -> Action {
    Action::Create {
        file: file.to_string(),
        content: Some("x\n".to_string()),
        why: None,
    }
}

#[test]
fn empty_plan_is_a_violation() {
    let td = tempfile::tempdir().unwrap();
    let errs = verify_plan(&Plan::default(), td.path(), &Policy::default(), false);
    assert_eq!(errs.len(), 1);
    assert!(errs[0].contains("no actions"));
}

#[test]
fn too_many_actions_reports_both_counts() {
    let td = tempfile::tempdir().unwrap();
    let policy = Policy {
        max_actions: 2,
        ..Policy::default()
    };
    let plan = Plan {
        actions: vec![create_action("a"), create_action("b"), create_action("c")],
    };
    let errs = verify_plan(&plan, td.path(), &policy, false);
    assert!(errs.iter().any(|e| e.contains("3 > 2")), "{errs:?}");
}

#[test]
fn dotdot_and_absolute_paths_are_violations() {
    let td = tempfile::tempdir().unwrap();
    let plan = Plan {
        actions: vec![
            create_action("../evil.txt"),
            create_action("a/../../b"),
            create_action("/etc/passwd"),
        ],
    };
    let errs = verify_plan(&plan, td.path(), &Policy::default(), false);
    assert_eq!(errs.len(), 3);
    assert!(errs[0].contains("'..'"));
    assert!(errs[1].contains("'..'"));
    assert!(errs[2].contains("invalid path"));
}

#[test]
fn edit_patch_without_git_violates_when_enforced() {
    let td = tempfile::tempdir().unwrap();
    let plan = Plan {
        actions: vec![Action::Edit {
            file: "f.txt".into(),
            content: None,
            patch: Some("--- a\n+++ b\n".into()),
            why: None,
        }],
    };
    let errs = verify_plan(&plan, td.path(), &Policy::default(), false);
    assert!(errs.iter().any(|e| e.contains("requires a git repo")), "{errs:?}");

    // With git present the same plan passes.
    let errs = verify_plan(&plan, td.path(), &Policy::default(), true);
    assert!(errs.is_empty(), "{errs:?}");
}

#[test]
fn shell_operators_are_violations_regardless_of_position() {
    let td = tempfile::tempdir().unwrap();
    for op in ["|", ">", ">>", "<", "2>", "2>>", "&&", "||", ";"] {
        let plan = Plan {
            actions: vec![run_action(&["git", "status", op, "out"])],
        };
        let errs = verify_plan(&plan, td.path(), &Policy::default(), true);
        assert!(
            errs.iter().any(|e| e.contains("shell operators forbidden")),
            "operator {op} not caught: {errs:?}"
        );
    }
}

#[test]
fn operators_inside_normalized_tokens_are_caught() {
    let td = tempfile::tempdir().unwrap();
    let plan = Plan {
        actions: vec![run_action(&["git status > out.txt"])],
    };
    let errs = verify_plan(&plan, td.path(), &Policy::default(), true);
    assert!(errs.iter().any(|e| e.contains("shell operators forbidden")));
}

#[test]
fn denylist_fires_before_and_alongside_allowlist() {
    let td = tempfile::tempdir().unwrap();
    let mut policy = Policy::default();
    policy.disallow_commands.insert("rm".to_string());
    let plan = Plan {
        actions: vec![run_action(&["rm", "-rf", "x"])],
    };
    let errs = verify_plan(&plan, td.path(), &policy, true);
    let deny_idx = errs.iter().position(|e| e.contains("explicitly forbidden"));
    let allow_idx = errs.iter().position(|e| e.contains("not allowed"));
    assert!(deny_idx.is_some() && allow_idx.is_some(), "{errs:?}");
    assert!(deny_idx < allow_idx);
}

#[test]
fn sudo_anywhere_in_argv_is_a_violation() {
    let td = tempfile::tempdir().unwrap();
    let plan = Plan {
        actions: vec![run_action(&["git", "sudo", "pull"])],
    };
    let errs = verify_plan(&plan, td.path(), &Policy::default(), true);
    assert!(errs.iter().any(|e| e.contains("'sudo' forbidden")));
}

#[test]
fn all_violations_reported_together() {
    let td = tempfile::tempdir().unwrap();
    let plan = Plan {
        actions: vec![
            create_action("../a"),
            run_action(&["nc", "-l", ";", "sudo"]),
        ],
    };
    let errs = verify_plan(&plan, td.path(), &Policy::default(), false);
    // dotdot + operators + not-allowed + sudo
    assert!(errs.len() >= 4, "{errs:?}");
    assert!(errs.iter().any(|e| e.starts_with("[0]")));
    assert!(errs.iter().any(|e| e.starts_with("[1]")));
}

#[test]
fn valid_plan_passes_clean() {
    let td = tempfile::tempdir().unwrap();
    let plan = Plan {
        actions: vec![
            create_action("src/new.rs"),
            run_action(&["cargo", "check"]),
        ],
    };
    let errs = verify_plan(&plan, td.path(), &Policy::default(), true);
    assert!(errs.is_empty(), "{errs:?}");
}
