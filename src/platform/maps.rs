// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

use std::path::PathBuf;

use super::{invoke, LibraryMapper};
use crate::command::CommandRunner;
use crate::error::Result;
use crate::model::Pid;
use crate::parse::{parse_loaded_objects, parse_memory_map};

// procps `pmap` prints only the basename of each mapping unless asked for the full path.
const PMAP_FLAGS: &[&str] = if cfg!(target_os = "linux") {
    &["-p"]
} else {
    &[]
};

/// Reads the memory map printed by `pmap PID` (`pmap -p PID` on Linux).
pub struct PmapMapper;

impl PmapMapper {
    fn args(pid: &str) -> Vec<&str> {
        PMAP_FLAGS.iter().copied().chain([pid]).collect()
    }
}

/// The `pmap` command line `PmapMapper` runs for `pid`.
#[cfg(test)]
pub(crate) fn pmap_command(pid: Pid) -> String {
    let pid = pid.to_string();
    crate::command::display_command("pmap", &PmapMapper::args(&pid))
}

impl LibraryMapper for PmapMapper {
    fn name(&self) -> &'static str {
        "pmap"
    }

    fn libraries(&self, runner: &dyn CommandRunner, pid: Pid) -> Result<Vec<PathBuf>> {
        let pid = pid.to_string();
        invoke(runner, "pmap", &PmapMapper::args(&pid), parse_memory_map)
    }
}

/// Reads the dynamic objects printed by `pldd PID`.
pub struct PlddMapper;

impl LibraryMapper for PlddMapper {
    fn name(&self) -> &'static str {
        "pldd"
    }

    fn libraries(&self, runner: &dyn CommandRunner, pid: Pid) -> Result<Vec<PathBuf>> {
        invoke(runner, "pldd", &[&pid.to_string()], parse_loaded_objects)
    }
}
