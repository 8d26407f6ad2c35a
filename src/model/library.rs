// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Shared library entity.

use path_clean::PathClean;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use super::{Package, Process, Timestamp};
use crate::error::{Error, Result};
use crate::host::Host;
use crate::outdated::{outdated, OnHost};

/// A dynamically linked library or shared object on the filesystem.
#[derive(Debug, Clone)]
pub struct Library {
    path: PathBuf,
    package_hint: Option<String>,
    modified: OnceLock<Timestamp>,
    package: OnceLock<Package>,
}

impl Library {
    /// Create a library handle for an absolute path. No I/O is performed.
    ///
    /// # Errors
    /// Returns `InvalidLibraryPath` if the path is empty or relative.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.is_absolute() {
            return Err(Error::InvalidLibraryPath { path });
        }
        Ok(Self {
            path: path.clean(),
            package_hint: None,
            modified: OnceLock::new(),
            package: OnceLock::new(),
        })
    }

    /// Record the name of the package known to own this library.
    #[must_use]
    pub fn with_package_hint(mut self, package: impl Into<String>) -> Self {
        self.package_hint = Some(package.into());
        self
    }

    /// Absolute path of the library on the filesystem.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name of the owning package, when known without a lookup.
    #[must_use]
    pub fn package_hint(&self) -> Option<&str> {
        self.package_hint.as_deref()
    }

    /// Freshness timestamp of the library file, as defined by the host's clock.
    ///
    /// # Errors
    /// Returns `FileUnavailable` if the file cannot be inspected (e.g. it was removed).
    pub fn modified(&self, host: &Host) -> Result<Timestamp> {
        if let Some(modified) = self.modified.get() {
            return Ok(*modified);
        }
        let modified = host.library_modified(&self.path)?;
        Ok(*self.modified.get_or_init(|| modified))
    }

    /// Package that owns this library.
    ///
    /// Uses the package hint when present. Otherwise the package manager is searched by path and
    /// exactly one package must claim the file.
    ///
    /// # Errors
    /// Returns `UnknownOwner` or `AmbiguousOwner` if zero or several packages claim the file, or
    /// any error of the underlying lookups.
    pub fn package(&self, host: &Host) -> Result<&Package> {
        if let Some(package) = self.package.get() {
            return Ok(package);
        }
        let package = match &self.package_hint {
            Some(name) => host.package(name)?,
            None => self.resolve_owner(host)?,
        };
        Ok(self.package.get_or_init(|| package))
    }

    /// Whether `process` is running a copy of this library older than the one on disk.
    #[must_use]
    pub fn outdated(&self, process: &Process, host: &Host) -> bool {
        outdated(
            &OnHost { entity: self, host },
            &OnHost {
                entity: process,
                host,
            },
        )
    }

    fn resolve_owner(&self, host: &Host) -> Result<Package> {
        let mut owners: Vec<String> = host
            .find_library(&self.path.to_string_lossy())?
            .into_iter()
            .filter_map(|candidate| candidate.package_hint)
            .collect();
        owners.sort();
        owners.dedup();

        match owners.as_slice() {
            [] => Err(Error::UnknownOwner {
                path: self.path.clone(),
            }),
            [owner] => host.package(owner),
            _ => Err(Error::AmbiguousOwner {
                path: self.path.clone(),
                packages: owners,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::testing::FakeRunner;
    use crate::host::testing::host_with;
    use crate::platform::{LibraryFreshnessClock, ModifiedClock};
    use chrono::Duration;
    use std::io::Write;
    use std::sync::Arc;
    use tempfile::NamedTempFile;

    const POLICY_LIBC6: &str = "libc6:\n  Installed: 2.17-93ubuntu4\n  Candidate: 2.17-93ubuntu4\n";

    #[test]
    fn test_new_rejects_relative_and_empty_paths() {
        assert!(matches!(
            Library::new("lib/libc.so.6"),
            Err(Error::InvalidLibraryPath { .. })
        ));
        assert!(matches!(
            Library::new(""),
            Err(Error::InvalidLibraryPath { .. })
        ));
    }

    #[test]
    fn test_new_normalizes_path() {
        let library = Library::new("/usr/lib/../lib/./libc.so.6").unwrap();
        assert_eq!(library.path(), Path::new("/usr/lib/libc.so.6"));
        assert_eq!(library.package_hint(), None);
    }

    #[test]
    fn test_modified_reads_file_once() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not really a library").unwrap();
        let host = host_with(FakeRunner::new());
        let library = Library::new(file.path()).unwrap();

        let first = library.modified(&host).unwrap();
        file.close().unwrap();
        // Cached, the file is gone by now.
        assert_eq!(library.modified(&host).unwrap(), first);
    }

    #[test]
    fn test_modified_missing_file() {
        let host = host_with(FakeRunner::new());
        let library = Library::new("/nonexistent/libspector-test.so").unwrap();
        assert!(matches!(
            library.modified(&host),
            Err(Error::FileUnavailable { .. })
        ));
    }

    #[test]
    fn test_package_from_hint() {
        let runner = FakeRunner::new().with_output("apt-cache policy libc6", POLICY_LIBC6);
        let host = host_with(runner);
        let library = Library::new("/lib/x86_64-linux-gnu/libc.so.6")
            .unwrap()
            .with_package_hint("libc6");

        let package = library.package(&host).unwrap();
        assert_eq!(package.name(), "libc6");
        assert_eq!(package.version(), "2.17-93ubuntu4");
    }

    #[test]
    fn test_package_by_path_single_owner() {
        let runner = FakeRunner::new()
            .with_output(
                "dpkg -S /lib/x86_64-linux-gnu/libc.so.6",
                "libc6:amd64: /lib/x86_64-linux-gnu/libc.so.6\n",
            )
            .with_output("apt-cache policy libc6", POLICY_LIBC6);
        let host = host_with(runner);
        let library = Library::new("/lib/x86_64-linux-gnu/libc.so.6").unwrap();

        assert_eq!(library.package(&host).unwrap().name(), "libc6");
    }

    #[test]
    fn test_package_by_path_same_owner_twice() {
        let runner = FakeRunner::new()
            .with_output(
                "dpkg -S /usr/lib/libfoo.so",
                "libfoo:amd64: /usr/lib/libfoo.so\nlibfoo:i386: /usr/lib/libfoo.so\n",
            )
            .with_output("apt-cache policy libfoo", "libfoo:\n  Installed: 1.0\n");
        let host = host_with(runner);
        let library = Library::new("/usr/lib/libfoo.so").unwrap();

        assert_eq!(library.package(&host).unwrap().version(), "1.0");
    }

    #[test]
    fn test_package_by_path_ambiguous() {
        let runner = FakeRunner::new().with_output(
            "dpkg -S /usr/lib/libfoo.so",
            "libfoo1: /usr/lib/libfoo.so\nlibfoo-compat: /usr/lib/libfoo.so\n",
        );
        let host = host_with(runner);
        let library = Library::new("/usr/lib/libfoo.so").unwrap();

        match library.package(&host) {
            Err(Error::AmbiguousOwner { path, packages }) => {
                assert_eq!(path, PathBuf::from("/usr/lib/libfoo.so"));
                assert_eq!(packages, vec!["libfoo-compat", "libfoo1"]);
            }
            other => panic!("expected AmbiguousOwner, got {other:?}"),
        }
    }

    #[test]
    fn test_package_by_path_unknown() {
        let runner = FakeRunner::new().with_exit("dpkg -S /opt/vendor/libbar.so", 1);
        let host = host_with(runner);
        let library = Library::new("/opt/vendor/libbar.so").unwrap();

        assert!(matches!(
            library.package(&host),
            Err(Error::UnknownOwner { .. })
        ));
    }

    #[test]
    fn test_package_is_cached() {
        let runner =
            Arc::new(FakeRunner::new().with_output("apt-cache policy libc6", POLICY_LIBC6));
        let host = host_with(Arc::clone(&runner));
        let library = Library::new("/lib/libc.so.6")
            .unwrap()
            .with_package_hint("libc6");

        library.package(&host).unwrap();
        library.package(&host).unwrap();
        assert_eq!(runner.calls(), vec!["apt-cache policy libc6"]);
    }

    #[test]
    fn test_outdated_with_real_file() {
        let file = NamedTempFile::new().unwrap();
        let host = host_with(FakeRunner::new());
        let library = Library::new(file.path()).unwrap();
        let modified = ModifiedClock.freshness(file.path()).unwrap();

        let before = Process::with_started(1234, modified - Duration::hours(1));
        let after = Process::with_started(1234, modified + Duration::hours(1));
        assert!(library.outdated(&before, &host));
        assert!(!library.outdated(&after, &host));
    }

    #[test]
    fn test_restart_in_the_second_of_the_upgrade_is_current() {
        let file = NamedTempFile::new().unwrap();
        let replaced = crate::parse::parse_lstart("Thu Oct  9 08:53:20 2025").unwrap()
            + Duration::milliseconds(300);
        file.as_file()
            .set_modified(std::time::SystemTime::from(replaced))
            .unwrap();
        let host = host_with(
            FakeRunner::new().with_output("ps -p 77 -o lstart=", "Thu Oct  9 08:53:20 2025\n"),
        );

        let library = Library::new(file.path()).unwrap();
        assert!(!library.outdated(&Process::new(77), &host));
    }

    #[test]
    fn test_outdated_missing_file_and_gone_process() {
        let host = host_with(FakeRunner::new().with_exit("ps -p 1234 -o lstart=", 1));
        let gone = Process::new(1234);

        let missing = Library::new("/nonexistent/libspector-test.so").unwrap();
        assert!(missing.outdated(&gone, &host));

        let file = NamedTempFile::new().unwrap();
        let present = Library::new(file.path()).unwrap();
        assert!(!present.outdated(&gone, &host));
    }
}
