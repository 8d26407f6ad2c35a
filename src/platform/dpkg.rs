// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Debian package database via `dpkg -S` and `apt-cache policy`.

use super::{invoke, run_matching, PackageManager};
use crate::command::{display_command, CommandRunner};
use crate::error::Result;
use crate::parse::{parse_package_policy, parse_package_search, LibraryRecord, PackageRecord};

pub struct Dpkg;

impl PackageManager for Dpkg {
    fn name(&self) -> &'static str {
        "dpkg"
    }

    fn search(&self, runner: &dyn CommandRunner, path: &str) -> Result<Vec<LibraryRecord>> {
        let args = ["-S", path];
        // dpkg exits with 1 when no installed file matches.
        let Some(stdout) = run_matching(runner, "dpkg", &args)? else {
            return Ok(Vec::new());
        };
        parse_package_search(&stdout)
            .map_err(|e| e.with_command(display_command("dpkg", &args)).into())
    }

    fn metadata(&self, runner: &dyn CommandRunner, name: &str) -> Result<PackageRecord> {
        invoke(runner, "apt-cache", &["policy", name], parse_package_policy)
    }
}
