//! Preview → approve → execute lifecycle, including code rotation.

use plangate::constants::{APPROVAL_CODE_FILE, STATE_FILE};
use plangate::policy::Policy;
use plangate::types::{Action, ErrorKind, Plan};
use plangate::Executor;

fn create_plan(file: &str, content: &str) -> Plan {
    Plan {
        actions: vec![Action::Create {
            file: file.to_string(),
            content: Some(content.to_string()),
            why: None,
        }],
    }
}

#[test]
fn approve_without_preview_is_a_mismatch() {
    let td = tempfile::tempdir().unwrap();
    let api = Executor::new(td.path(), Policy::default()).unwrap();
    let err = api.approve("whatever").unwrap_err();
    assert_eq!(err.kind, ErrorKind::ApprovalMismatch);
}

#[test]
fn execute_without_approval_is_refused() {
    let td = tempfile::tempdir().unwrap();
    let api = Executor::new(td.path(), Policy::default()).unwrap();
    let plan = create_plan("foo.txt", "hi\n");
    api.preview(&plan).unwrap();
    let err = api.execute(&plan).unwrap_err();
    assert_eq!(err.kind, ErrorKind::ApprovalMismatch);
    assert!(!td.path().join("foo.txt").exists());
}

#[test]
fn second_preview_invalidates_the_first_code() {
    let td = tempfile::tempdir().unwrap();
    let api = Executor::new(td.path(), Policy::default()).unwrap();
    let plan = create_plan("foo.txt", "hi\n");

    let first = api.preview(&plan).unwrap();
    let second = api.preview(&plan).unwrap();
    assert_ne!(first.code, second.code);

    let persisted = std::fs::read_to_string(td.path().join(APPROVAL_CODE_FILE)).unwrap();
    assert_eq!(persisted.trim(), second.code);

    let err = api.approve(&first.code).unwrap_err();
    assert_eq!(err.kind, ErrorKind::ApprovalMismatch);
    api.approve(&second.code).unwrap();
}

#[test]
fn approve_trims_presented_code() {
    let td = tempfile::tempdir().unwrap();
    let api = Executor::new(td.path(), Policy::default()).unwrap();
    let p = api.preview(&create_plan("foo.txt", "hi\n")).unwrap();
    api.approve(&format!("  {}\n", p.code)).unwrap();
}

#[test]
fn full_flow_creates_file_and_clears_marker() {
    let td = tempfile::tempdir().unwrap();
    let api = Executor::new(td.path(), Policy::default()).unwrap();
    let plan = create_plan("foo.txt", "hi\n");

    let p = api.preview(&plan).unwrap();
    assert_eq!(p.items.len(), 1);
    let diff = p.items[0].diff.as_deref().unwrap();
    assert!(diff.contains("+hi"), "{diff}");

    api.approve(&p.code).unwrap();
    let report = api.execute(&plan).unwrap();
    assert!(report.success, "{:?}", report.messages);
    assert_eq!(report.run_id, p.code);
    assert_eq!(
        std::fs::read_to_string(td.path().join("foo.txt")).unwrap(),
        "hi\n"
    );
    assert!(report.messages.iter().any(|m| m == "CREATE foo.txt"));

    // Marker consumed: a replay is refused.
    assert!(!td.path().join(STATE_FILE).exists());
    let err = api.execute(&plan).unwrap_err();
    assert_eq!(err.kind, ErrorKind::ApprovalMismatch);
}

#[test]
fn execute_writes_the_run_audit_log() {
    let td = tempfile::tempdir().unwrap();
    let api = Executor::new(td.path(), Policy::default()).unwrap();
    let plan = create_plan("bar.txt", "x\n");
    let p = api.preview(&plan).unwrap();
    api.approve(&p.code).unwrap();
    api.execute(&plan).unwrap();

    let log = td
        .path()
        .join(".plangate/logs")
        .join(format!("{}.jsonl", p.code));
    let text = std::fs::read_to_string(log).unwrap();
    let events: Vec<serde_json::Value> = text
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert!(events.iter().any(|e| e["event"] == "step"));
    assert_eq!(events.last().unwrap()["event"], "done");
}

#[test]
fn plan_round_trips_through_the_drafted_file() {
    let td = tempfile::tempdir().unwrap();
    let api = Executor::new(td.path(), Policy::default()).unwrap();
    let plan = Plan {
        actions: vec![
            Action::Run {
                cmd: vec!["cargo".into(), "check".into()],
                why: Some("sanity".into()),
            },
            Action::Delete {
                file: "old.txt".into(),
                why: None,
            },
        ],
    };
    api.save_plan(&plan).unwrap();
    assert_eq!(api.load_plan().unwrap(), plan);
}
