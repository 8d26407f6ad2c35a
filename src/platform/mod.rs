// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Platform adapters: build the argv for a native tool, run it and parse what it printed.
//!
//! The strategies that differ between platforms are traits selected once at configuration time:
//! how to list the objects mapped into a process (`LibraryMapper`), which file timestamp marks a
//! library as replaced (`LibraryFreshnessClock`) and which package manager owns files on disk
//! (`PackageManager`).

mod clock;
mod dpkg;
mod maps;
pub(crate) mod ps;

use std::path::{Path, PathBuf};

pub use clock::{ChangedClock, ModifiedClock};
pub use dpkg::Dpkg;
pub use maps::{PlddMapper, PmapMapper};
#[cfg(test)]
pub(crate) use maps::pmap_command;

use crate::command::{display_command, CommandRunner};
use crate::error::Result;
use crate::model::{Pid, Timestamp};
use crate::parse::{LibraryRecord, PackageRecord, ParseResult};

/// Lists the files currently mapped into a process.
pub trait LibraryMapper: Send + Sync {
    /// Name of the native tool, for diagnostics.
    fn name(&self) -> &'static str;

    /// Rooted paths mapped into `pid`, each once, in the order the tool reported them.
    ///
    /// # Errors
    /// Returns an error if the tool fails or prints something unexpected.
    fn libraries(&self, runner: &dyn CommandRunner, pid: Pid) -> Result<Vec<PathBuf>>;
}

/// Reads the timestamp that changes when a library file is replaced.
pub trait LibraryFreshnessClock: Send + Sync {
    /// # Errors
    /// Returns an error if the file cannot be inspected.
    fn freshness(&self, path: &Path) -> std::io::Result<Timestamp>;
}

/// Answers ownership and version questions about installed packages.
pub trait PackageManager: Send + Sync {
    fn name(&self) -> &'static str;

    /// Packages owning files whose path contains `path`.
    ///
    /// # Errors
    /// Returns an error if the package manager fails or prints something unexpected.
    fn search(&self, runner: &dyn CommandRunner, path: &str) -> Result<Vec<LibraryRecord>>;

    /// Installed version of package `name`.
    ///
    /// # Errors
    /// Returns an error if the package manager fails or prints something unexpected.
    fn metadata(&self, runner: &dyn CommandRunner, name: &str) -> Result<PackageRecord>;
}

/// Selects the `LibraryMapper` implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapperKind {
    /// `pmap PID` (`pmap -p PID` on Linux), Linux and BSD.
    Pmap,
    /// `pldd PID`, Solaris and illumos.
    Pldd,
}

impl MapperKind {
    /// Mapper available on the platform this binary was built for.
    #[must_use]
    pub fn native() -> Self {
        if cfg!(any(target_os = "solaris", target_os = "illumos")) {
            Self::Pldd
        } else {
            Self::Pmap
        }
    }

    pub(crate) fn build(self) -> Box<dyn LibraryMapper> {
        match self {
            Self::Pmap => Box::new(PmapMapper),
            Self::Pldd => Box::new(PlddMapper),
        }
    }
}

/// Selects the `LibraryFreshnessClock` implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockKind {
    /// Content modification time (mtime).
    Modified,
    /// Inode change time (ctime).
    Changed,
}

impl ClockKind {
    /// Clock suited to the platform this binary was built for.
    ///
    /// Package managers that restore archived modification times (dpkg does) leave the mtime of
    /// a freshly upgraded library in the past, its ctime is always the install time.
    #[must_use]
    pub fn native() -> Self {
        if cfg!(any(target_os = "linux", target_os = "macos")) {
            Self::Changed
        } else {
            Self::Modified
        }
    }

    pub(crate) fn build(self) -> Box<dyn LibraryFreshnessClock> {
        match self {
            Self::Modified => Box::new(ModifiedClock),
            Self::Changed => Box::new(ChangedClock),
        }
    }
}

/// Run a command and parse its standard output.
///
/// Invocation failures are returned as they are, a parse failure is tagged with the command.
pub(crate) fn invoke<T>(
    runner: &dyn CommandRunner,
    program: &str,
    args: &[&str],
    parse: impl FnOnce(&str) -> ParseResult<T>,
) -> Result<T> {
    let output = runner.run(program, args)?;
    parse(&output.stdout).map_err(|e| e.with_command(display_command(program, args)).into())
}

/// Run a command for which exit status 1 means "nothing matched".
///
/// Returns `None` in that case, the standard output otherwise.
pub(crate) fn run_matching(
    runner: &dyn CommandRunner,
    program: &str,
    args: &[&str],
) -> Result<Option<String>> {
    match runner.run(program, args) {
        Ok(output) => Ok(Some(output.stdout)),
        Err(e) if e.exit_code() == Some(1) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
