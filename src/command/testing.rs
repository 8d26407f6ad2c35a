// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Canned `CommandRunner` for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use super::{display_command, CommandError, CommandOutput, CommandResult, CommandRunner};

enum Response {
    Stdout(String),
    Exit(i32),
}

/// Answers commands from a fixed table and records every invocation.
///
/// Commands missing from the table fail with `CommandError::NotFound`.
pub(crate) struct FakeRunner {
    pid: u32,
    responses: HashMap<String, Response>,
    calls: Mutex<Vec<String>>,
}

impl FakeRunner {
    pub(crate) fn new() -> Self {
        Self {
            pid: 4242,
            responses: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// PID reported for every invocation.
    pub(crate) fn with_pid(mut self, pid: u32) -> Self {
        self.pid = pid;
        self
    }

    pub(crate) fn with_output(mut self, command: &str, stdout: &str) -> Self {
        self.responses
            .insert(command.to_string(), Response::Stdout(stdout.to_string()));
        self
    }

    pub(crate) fn with_exit(mut self, command: &str, code: i32) -> Self {
        self.responses
            .insert(command.to_string(), Response::Exit(code));
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, program: &str, args: &[&str]) -> CommandResult<CommandOutput> {
        let command = display_command(program, args);
        self.calls.lock().unwrap().push(command.clone());
        match self.responses.get(&command) {
            Some(Response::Stdout(stdout)) => Ok(CommandOutput {
                pid: self.pid,
                stdout: stdout.clone(),
            }),
            Some(Response::Exit(code)) => Err(CommandError::NonZeroExit {
                command,
                code: *code,
                stderr: String::new(),
            }),
            None => Err(CommandError::NotFound { command }),
        }
    }
}
