// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Process queries via `ps` and `pgrep`.

use super::run_matching;
use crate::command::{display_command, CommandRunner};
use crate::error::{Error, Result};
use crate::model::{Pid, Timestamp};
use crate::parse::{
    parse_lstart, parse_pid_list, parse_process_listing, ParseResult, ProcessRecord,
};

/// Start time of `pid`.
pub(crate) fn started(runner: &dyn CommandRunner, pid: Pid) -> Result<Timestamp> {
    let value = field(runner, pid, "lstart=")?;
    parse_lstart(&value).map_err(|e| {
        e.with_command(display_command("ps", &["-p", &pid.to_string(), "-o", "lstart="]))
            .into()
    })
}

/// Full command line of `pid`.
pub(crate) fn command_line(runner: &dyn CommandRunner, pid: Pid) -> Result<String> {
    field(runner, pid, "args=")
}

/// Executable name of `pid`.
pub(crate) fn command_name(runner: &dyn CommandRunner, pid: Pid) -> Result<String> {
    field(runner, pid, "comm=")
}

/// Every process on the host, one parse result per row, along with the PID `ps` itself ran as.
pub(crate) fn listing(runner: &dyn CommandRunner) -> Result<(Pid, Vec<ParseResult<ProcessRecord>>)> {
    let args = ["axww", "-o", "lstart:30,pid:10,args"];
    let output = runner.run("ps", &args)?;
    Ok((output.pid, parse_process_listing(&output.stdout)))
}

/// PIDs whose full command line contains `pattern`.
pub(crate) fn search(runner: &dyn CommandRunner, pattern: &str) -> Result<Vec<Pid>> {
    // `--` keeps patterns such as `-bash` from being read as options.
    let args = ["-f", "--", pattern];
    // pgrep exits with 1 when nothing matched.
    let Some(stdout) = run_matching(runner, "pgrep", &args)? else {
        return Ok(Vec::new());
    };
    parse_pid_list(&stdout).map_err(|e| e.with_command(display_command("pgrep", &args)).into())
}

/// One header-less `ps` column for a single process.
///
/// `ps` exits with 1 for an unknown PID; some platforms print nothing instead.
fn field(runner: &dyn CommandRunner, pid: Pid, format: &str) -> Result<String> {
    let pid_arg = pid.to_string();
    let value = run_matching(runner, "ps", &["-p", &pid_arg, "-o", format])?
        .map(|stdout| stdout.trim().to_string())
        .unwrap_or_default();
    if value.is_empty() {
        return Err(Error::ProcessNotFound { pid });
    }
    Ok(value)
}
