// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Implements `CommandRunner` on top of `std::process::Command`.

use std::io::Read;
use std::os::unix::process::ExitStatusExt;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use wait_timeout::ChildExt;

use super::{display_command, CommandError, CommandOutput, CommandResult, CommandRunner};

/// Default timeout for a single command invocation (30 seconds).
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

/// Runs commands on the local host.
///
/// Every command runs with `LC_ALL=C` so that tool output (dates, headers, `apt-cache` keys) does
/// not depend on the caller's locale.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    timeout: Duration,
}

impl SystemRunner {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new(DEFAULT_COMMAND_TIMEOUT)
    }
}

impl CommandRunner for SystemRunner {
    /// Run a command and capture its standard output.
    ///
    /// # Timeout
    /// If the command takes longer than the configured timeout, it is killed and a `Timeout`
    /// error is returned.
    fn run(&self, program: &str, args: &[&str]) -> CommandResult<CommandOutput> {
        let command = display_command(program, args);
        log::debug!("Running command: {command}");

        let mut child = match Command::new(program)
            .args(args)
            .env("LC_ALL", "C")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                if e.kind() == std::io::ErrorKind::NotFound {
                    return Err(CommandError::NotFound { command });
                }
                return Err(CommandError::SpawnFailed { command, source: e });
            }
        };
        let pid = child.id();

        // Both pipes must be drained while waiting, the child blocks on a full pipe buffer.
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());
        let status = wait_with_timeout(&mut child, self.timeout, &command);
        let stdout = collect(stdout);
        let stderr = collect(stderr);

        let status = status?;
        if status.success() {
            Ok(CommandOutput { pid, stdout })
        } else {
            Err(CommandError::NonZeroExit {
                command,
                code: status.code().unwrap_or(-1),
                stderr: stderr.trim().to_string(),
            })
        }
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<String>> {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buffer = Vec::new();
            // A read error leaves whatever was captured so far.
            let _ = pipe.read_to_end(&mut buffer);
            String::from_utf8_lossy(&buffer).into_owned()
        })
    })
}

fn collect(handle: Option<JoinHandle<String>>) -> String {
    handle
        .map(|handle| handle.join().unwrap_or_default())
        .unwrap_or_default()
}

/// Wait for a child process to complete with a timeout.
///
/// If the timeout is reached, the process is killed.
fn wait_with_timeout(
    child: &mut Child,
    timeout: Duration,
    command: &str,
) -> CommandResult<ExitStatus> {
    let waited = child
        .wait_timeout(timeout)
        .map_err(|e| CommandError::SpawnFailed {
            command: command.to_string(),
            source: e,
        })?;

    match waited {
        Some(status) if status.code().is_some() => Ok(status),
        Some(status) => Err(CommandError::Signaled {
            command: command.to_string(),
            signal: status.signal().unwrap_or(-1),
        }),
        None => {
            let _ = child.kill();
            let _ = child.wait();
            Err(CommandError::Timeout {
                command: command.to_string(),
                timeout,
            })
        }
    }
}
