//! The action/plan data model.
//!
//! Planner output is an untrusted tagged union. It is validated exactly once,
//! at construction: deserialization goes through [`RawAction`] and the
//! per-variant required-field constraints, so a malformed action is rejected
//! before a [`Plan`] exists. Downstream stages never re-validate the shape.

use serde::{Deserialize, Serialize};

use super::errors::{Error, ErrorKind};

/// One atomic operation proposed by the planner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAction", into = "RawAction")]
pub enum Action {
    Create {
        file: String,
        content: Option<String>,
        why: Option<String>,
    },
    Edit {
        file: String,
        content: Option<String>,
        patch: Option<String>,
        why: Option<String>,
    },
    Delete {
        file: String,
        why: Option<String>,
    },
    Run {
        cmd: Vec<String>,
        why: Option<String>,
    },
}

impl Action {
    /// The wire-format type tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Create { .. } => "create",
            Action::Edit { .. } => "edit",
            Action::Delete { .. } => "delete",
            Action::Run { .. } => "run",
        }
    }

    /// Workspace-relative path for file-touching actions.
    pub fn file(&self) -> Option<&str> {
        match self {
            Action::Create { file, .. } | Action::Edit { file, .. } | Action::Delete { file, .. } => {
                Some(file)
            }
            Action::Run { .. } => None,
        }
    }
}

/// Ordered sequence of actions; order is execution order and is preserved
/// end-to-end through serialization, verification, and execution.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    #[serde(default)]
    pub actions: Vec<Action>,
}

/// The planner's wire shape, before per-variant validation.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct RawAction {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    patch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cmd: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    why: Option<String>,
}

impl TryFrom<RawAction> for Action {
    type Error = Error;

    fn try_from(raw: RawAction) -> Result<Self, Error> {
        let invalid = |msg: &str| Error::new(ErrorKind::InvalidAction, msg);
        let file_required = |file: Option<String>| {
            file.filter(|f| !f.is_empty())
                .ok_or_else(|| invalid("file required for create/edit/delete"))
        };
        match raw.kind.as_str() {
            "create" => Ok(Action::Create {
                file: file_required(raw.file)?,
                content: raw.content,
                why: raw.why,
            }),
            "edit" => {
                if raw.content.is_none() && raw.patch.is_none() {
                    return Err(invalid("edit requires content or patch"));
                }
                Ok(Action::Edit {
                    file: file_required(raw.file)?,
                    content: raw.content,
                    patch: raw.patch,
                    why: raw.why,
                })
            }
            "delete" => Ok(Action::Delete {
                file: file_required(raw.file)?,
                why: raw.why,
            }),
            "run" => {
                let cmd = raw.cmd.unwrap_or_default();
                if cmd.is_empty() {
                    return Err(invalid("cmd required for run"));
                }
                Ok(Action::Run { cmd, why: raw.why })
            }
            other => Err(invalid(&format!("unknown action type: {other}"))),
        }
    }
}

impl From<Action> for RawAction {
    fn from(a: Action) -> Self {
        let empty = RawAction {
            kind: String::new(),
            file: None,
            content: None,
            patch: None,
            cmd: None,
            why: None,
        };
        match a {
            Action::Create { file, content, why } => RawAction {
                kind: "create".into(),
                file: Some(file),
                content,
                why,
                ..empty
            },
            Action::Edit {
                file,
                content,
                patch,
                why,
            } => RawAction {
                kind: "edit".into(),
                file: Some(file),
                content,
                patch,
                why,
                ..empty
            },
            Action::Delete { file, why } => RawAction {
                kind: "delete".into(),
                file: Some(file),
                why,
                ..empty
            },
            Action::Run { cmd, why } => RawAction {
                kind: "run".into(),
                cmd: Some(cmd),
                why,
                ..empty
            },
        }
    }
}
