// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Defines the `CommandRunner` trait used to invoke native introspection tools.

mod system;

#[cfg(test)]
pub(crate) mod testing;

use std::time::Duration;
use thiserror::Error;

pub use system::{SystemRunner, DEFAULT_COMMAND_TIMEOUT};

/// Result type for command invocations.
pub type CommandResult<T> = std::result::Result<T, CommandError>;

/// Errors that can occur while invoking an external command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Command not found: {command}")]
    NotFound { command: String },
    #[error("Command failed to start: {command}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Command timed out after {timeout:?}: {command}")]
    Timeout { command: String, timeout: Duration },
    #[error("Command terminated by signal {signal}: {command}")]
    Signaled { command: String, signal: i32 },
    #[error("Command exited with non-zero status {code}: {command}: {stderr}")]
    NonZeroExit {
        command: String,
        code: i32,
        stderr: String,
    },
}

impl CommandError {
    /// Exit code of the command, if it ran to completion and failed.
    #[must_use]
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::NonZeroExit { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Captured output of a successful command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// PID the command ran under.
    pub pid: u32,
    pub stdout: String,
}

/// Runs a native command to completion and captures its standard output.
///
/// Implementations must fail on a non-zero exit status or a missing executable and must never
/// hand back the output of a failed invocation.
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args`.
    ///
    /// # Errors
    /// Returns an error if the command cannot be started, is killed, or exits unsuccessfully.
    fn run(&self, program: &str, args: &[&str]) -> CommandResult<CommandOutput>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for std::sync::Arc<R> {
    fn run(&self, program: &str, args: &[&str]) -> CommandResult<CommandOutput> {
        (**self).run(program, args)
    }
}

/// Render a command line for diagnostics.
pub(crate) fn display_command(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_command() {
        assert_eq!(display_command("pmap", &["1234"]), "pmap 1234");
        assert_eq!(display_command("ps", &[]), "ps");
    }

    #[test]
    fn test_exit_code() {
        let error = CommandError::NonZeroExit {
            command: "pgrep -f foo".to_string(),
            code: 1,
            stderr: String::new(),
        };
        assert_eq!(error.exit_code(), Some(1));

        let error = CommandError::NotFound {
            command: "pldd".to_string(),
        };
        assert_eq!(error.exit_code(), None);
    }
}
