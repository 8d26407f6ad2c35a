// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Lookup coordinator: the single entry point for every query against the running system.
//!
//! A `Host` owns the command runner and the platform strategies. Entities never hold on to it,
//! it is passed into each method that has to look something up.

use std::path::Path;
use std::time::Duration;

use crate::command::{CommandRunner, SystemRunner, DEFAULT_COMMAND_TIMEOUT};
use crate::error::{Error, Result};
use crate::model::{Library, Package, Pid, Process, Timestamp};
use crate::platform::{
    ps, ClockKind, Dpkg, LibraryFreshnessClock, LibraryMapper, MapperKind, PackageManager,
};

/// Strategy selection for a `Host`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostConfig {
    pub mapper: MapperKind,
    pub clock: ClockKind,
    /// Upper bound for a single tool invocation.
    pub timeout: Duration,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            mapper: MapperKind::native(),
            clock: ClockKind::native(),
            timeout: DEFAULT_COMMAND_TIMEOUT,
        }
    }
}

/// The running system, as seen through its native introspection tools.
pub struct Host {
    runner: Box<dyn CommandRunner>,
    mapper: Box<dyn LibraryMapper>,
    clock: Box<dyn LibraryFreshnessClock>,
    packages: Box<dyn PackageManager>,
}

impl Host {
    #[must_use]
    pub fn new(config: &HostConfig) -> Self {
        Self::with_parts(
            SystemRunner::new(config.timeout),
            config.mapper.build(),
            config.clock.build(),
            Box::new(Dpkg),
        )
    }

    /// Host using the platform's native tools and the default timeout.
    #[must_use]
    pub fn native() -> Self {
        Self::new(&HostConfig::default())
    }

    /// Assemble a host from explicit parts.
    #[must_use]
    pub fn with_parts(
        runner: impl CommandRunner + 'static,
        mapper: Box<dyn LibraryMapper>,
        clock: Box<dyn LibraryFreshnessClock>,
        packages: Box<dyn PackageManager>,
    ) -> Self {
        Self {
            runner: Box::new(runner),
            mapper,
            clock,
            packages,
        }
    }

    /// Name of the tool used to list mapped libraries.
    #[must_use]
    pub fn mapper_name(&self) -> &'static str {
        self.mapper.name()
    }

    #[must_use]
    pub fn package_manager_name(&self) -> &'static str {
        self.packages.name()
    }

    /// Every process currently running, from a single listing.
    ///
    /// Rows that cannot be parsed are logged and skipped. The listing tool's own process is not
    /// part of the result.
    ///
    /// # Errors
    /// Returns an error if the listing tool cannot be run.
    pub fn all_processes(&self) -> Result<Vec<Process>> {
        let (own_pid, rows) = ps::listing(self.runner.as_ref())?;
        Ok(rows
            .into_iter()
            .filter_map(|row| match row {
                Ok(record) => Some(record),
                Err(e) => {
                    log::warn!("Skipping process listing row: {e}");
                    None
                }
            })
            .filter(|record| record.pid != own_pid)
            .map(Process::from_record)
            .collect())
    }

    /// Processes whose full command line contains `substring`.
    ///
    /// # Errors
    /// Returns an error if the search tool fails or prints something unexpected.
    pub fn find_process(&self, substring: &str) -> Result<Vec<Process>> {
        Ok(ps::search(self.runner.as_ref(), substring)?
            .into_iter()
            .map(Process::new)
            .collect())
    }

    /// Packaged files whose path contains `path_substring`, each tagged with its owning package.
    ///
    /// # Errors
    /// Returns an error if the package manager fails or prints something unexpected.
    pub fn find_library(&self, path_substring: &str) -> Result<Vec<Library>> {
        self.packages
            .search(self.runner.as_ref(), path_substring)?
            .into_iter()
            .map(|record| Ok(Library::new(record.path)?.with_package_hint(record.package)))
            .collect()
    }

    /// Installed package called `name`.
    ///
    /// # Errors
    /// Returns `NoPackageSpecified` for an empty name, `PackageMismatch` if the package manager
    /// answers for a different package, or any error of the lookup itself.
    pub fn package(&self, name: &str) -> Result<Package> {
        if name.is_empty() {
            return Err(Error::NoPackageSpecified);
        }
        let record = self.packages.metadata(self.runner.as_ref(), name)?;
        if record.name != name {
            return Err(Error::PackageMismatch {
                requested: name.to_string(),
                reported: record.name,
            });
        }
        Ok(record.into())
    }

    pub(crate) fn process_libraries(&self, pid: Pid) -> Result<Vec<Library>> {
        self.mapper
            .libraries(self.runner.as_ref(), pid)?
            .into_iter()
            .map(Library::new)
            .collect()
    }

    pub(crate) fn process_started(&self, pid: Pid) -> Result<Timestamp> {
        ps::started(self.runner.as_ref(), pid)
    }

    pub(crate) fn process_command_line(&self, pid: Pid) -> Result<String> {
        ps::command_line(self.runner.as_ref(), pid)
    }

    pub(crate) fn process_command_name(&self, pid: Pid) -> Result<String> {
        ps::command_name(self.runner.as_ref(), pid)
    }

    pub(crate) fn library_modified(&self, path: &Path) -> Result<Timestamp> {
        self.clock
            .freshness(path)
            .map_err(|source| Error::FileUnavailable {
                path: path.to_path_buf(),
                source,
            })
    }
}
