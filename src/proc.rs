//! Bounded subprocess execution and argument-vector hygiene.
//!
//! Commands are spawned directly (no shell). A timed-out child is killed and
//! reaped, and its result carries [`TIMEOUT_EXIT_CODE`] rather than an error:
//! a timeout is a form of non-zero exit, not an engine failure.

use std::io::{Read, Write};
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Duration;

use wait_timeout::ChildExt;

use crate::constants::TIMEOUT_EXIT_CODE;
use crate::types::{Error, ErrorKind, Result};

/// Tokens that would hand argv semantics over to a shell.
const SHELL_OPERATORS: [&str; 9] = ["|", ">", ">>", "<", "2>", "2>>", "&&", "||", ";"];

/// Captured result of a finished (or killed) subprocess.
#[derive(Clone, Debug)]
pub struct ProcOutput {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Flatten intra-token whitespace so `["cargo check"]` and
/// `["cargo", "check"]` verify and execute identically.
pub fn normalize_cmd(argv: &[String]) -> Vec<String> {
    argv.iter()
        .flat_map(|a| a.split_whitespace())
        .map(str::to_string)
        .collect()
}

/// True when any token in the argument list is a shell operator.
pub fn has_shell_operator(argv: &[String]) -> bool {
    argv.iter().any(|t| SHELL_OPERATORS.contains(&t.as_str()))
}

/// Run `argv` with piped stdio, optionally feeding `stdin_data` and bounding
/// the wait by `timeout`. Output pipes are drained on threads so a chatty
/// child cannot deadlock against a full pipe buffer.
pub fn run_cmd(
    argv: &[String],
    cwd: Option<&Path>,
    stdin_data: Option<&str>,
    timeout: Option<Duration>,
) -> Result<ProcOutput> {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| Error::new(ErrorKind::Io, "empty command"))?;

    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(if stdin_data.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    let mut child = cmd
        .spawn()
        .map_err(|e| Error::new(ErrorKind::Io, format!("spawn {program}: {e}")))?;

    if let (Some(data), Some(mut stdin)) = (stdin_data, child.stdin.take()) {
        // A hook that never reads its stdin would stall the write; the data
        // is small, so hand it off to a thread and let the pipe break.
        let data = data.to_string();
        std::thread::spawn(move || {
            let _ = stdin.write_all(data.as_bytes());
        });
    }

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    let out_thread = std::thread::spawn(move || read_to_string_lossy(stdout));
    let err_thread = std::thread::spawn(move || read_to_string_lossy(stderr));

    let code = match timeout {
        Some(limit) => match child
            .wait_timeout(limit)
            .map_err(|e| Error::new(ErrorKind::Io, format!("wait {program}: {e}")))?
        {
            Some(status) => status.code().unwrap_or(-1),
            None => {
                let _ = child.kill();
                let _ = child.wait(); // reap
                TIMEOUT_EXIT_CODE
            }
        },
        None => child
            .wait()
            .map_err(|e| Error::new(ErrorKind::Io, format!("wait {program}: {e}")))?
            .code()
            .unwrap_or(-1),
    };

    let stdout = out_thread.join().unwrap_or_default();
    let stderr = err_thread.join().unwrap_or_default();
    Ok(ProcOutput {
        code,
        stdout,
        stderr,
    })
}

fn read_to_string_lossy(pipe: Option<impl Read>) -> String {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        let _ = pipe.read_to_end(&mut buf);
    }
    String::from_utf8_lossy(&buf).into_owned()
}
