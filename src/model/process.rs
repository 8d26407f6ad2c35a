// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Running process entity.

use std::sync::OnceLock;

use super::{Library, Pid, Timestamp};
use crate::error::Result;
use crate::host::Host;
use crate::parse::ProcessRecord;

/// A currently-running process.
#[derive(Debug, Clone)]
pub struct Process {
    pid: Pid,
    started: OnceLock<Timestamp>,
    command_line: OnceLock<String>,
    command_name: OnceLock<String>,
}

impl Process {
    /// Create a handle for a known PID. No I/O is performed.
    #[must_use]
    pub fn new(pid: Pid) -> Self {
        Self {
            pid,
            started: OnceLock::new(),
            command_line: OnceLock::new(),
            command_name: OnceLock::new(),
        }
    }

    pub(crate) fn from_record(record: ProcessRecord) -> Self {
        let process = Self::new(record.pid);
        let _ = process.started.set(record.started);
        let _ = process.command_line.set(record.command_line);
        process
    }

    #[must_use]
    pub fn pid(&self) -> Pid {
        self.pid
    }

    /// When the process was started.
    ///
    /// # Errors
    /// Returns `ProcessNotFound` if the process is no longer running.
    pub fn started(&self, host: &Host) -> Result<Timestamp> {
        if let Some(started) = self.started.get() {
            return Ok(*started);
        }
        let started = host.process_started(self.pid)?;
        Ok(*self.started.get_or_init(|| started))
    }

    /// Full command line the process was invoked with.
    ///
    /// # Errors
    /// Returns `ProcessNotFound` if the process is no longer running.
    pub fn command_line(&self, host: &Host) -> Result<&str> {
        if let Some(command_line) = self.command_line.get() {
            return Ok(command_line);
        }
        let command_line = host.process_command_line(self.pid)?;
        Ok(self.command_line.get_or_init(|| command_line))
    }

    /// Short name of the executable.
    ///
    /// # Errors
    /// Returns `ProcessNotFound` if the process is no longer running.
    pub fn command_name(&self, host: &Host) -> Result<&str> {
        if let Some(command_name) = self.command_name.get() {
            return Ok(command_name);
        }
        let command_name = host.process_command_name(self.pid)?;
        Ok(self.command_name.get_or_init(|| command_name))
    }

    /// Libraries currently mapped into this process.
    ///
    /// The result is not cached and carries no package hints.
    ///
    /// # Errors
    /// Returns an error if the platform's listing tool fails or its output cannot be parsed.
    pub fn libraries(&self, host: &Host) -> Result<Vec<Library>> {
        host.process_libraries(self.pid)
    }

    /// Create a process whose start time is already known.
    #[cfg(test)]
    pub(crate) fn with_started(pid: Pid, started: Timestamp) -> Self {
        let process = Self::new(pid);
        let _ = process.started.set(started);
        process
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::testing::FakeRunner;
    use crate::error::Error;
    use crate::host::testing::host_with;
    use crate::parse::parse_lstart;
    use crate::platform::pmap_command;
    use std::sync::Arc;

    #[test]
    fn test_started_is_cached() {
        let runner = Arc::new(
            FakeRunner::new().with_output("ps -p 812 -o lstart=", "Thu Jan 15 09:00:00 2026\n"),
        );
        let host = host_with(Arc::clone(&runner));
        let process = Process::new(812);

        let expected = parse_lstart("Thu Jan 15 09:00:00 2026").unwrap();
        assert_eq!(process.started(&host).unwrap(), expected);
        assert_eq!(process.started(&host).unwrap(), expected);
        assert_eq!(runner.calls().len(), 1);
    }

    #[test]
    fn test_started_process_gone() {
        let host = host_with(FakeRunner::new().with_exit("ps -p 812 -o lstart=", 1));
        assert!(matches!(
            Process::new(812).started(&host),
            Err(Error::ProcessNotFound { pid: 812 })
        ));
    }

    #[test]
    fn test_command_line_and_name() {
        let runner = FakeRunner::new()
            .with_output("ps -p 812 -o args=", "nginx: master process /usr/sbin/nginx\n")
            .with_output("ps -p 812 -o comm=", "nginx\n");
        let host = host_with(runner);
        let process = Process::new(812);

        assert_eq!(
            process.command_line(&host).unwrap(),
            "nginx: master process /usr/sbin/nginx"
        );
        assert_eq!(process.command_name(&host).unwrap(), "nginx");
    }

    #[test]
    fn test_command_line_process_gone() {
        let host = host_with(FakeRunner::new().with_exit("ps -p 812 -o args=", 1));
        assert!(matches!(
            Process::new(812).command_line(&host),
            Err(Error::ProcessNotFound { pid: 812 })
        ));
    }

    #[test]
    fn test_from_record_needs_no_lookup() {
        let runner = Arc::new(FakeRunner::new());
        let host = host_with(Arc::clone(&runner));
        let started = parse_lstart("Mon Jan  5 08:15:00 2026").unwrap();
        let process = Process::from_record(ProcessRecord {
            pid: 1,
            started,
            command_line: "/sbin/init".to_string(),
        });

        assert_eq!(process.pid(), 1);
        assert_eq!(process.started(&host).unwrap(), started);
        assert_eq!(process.command_line(&host).unwrap(), "/sbin/init");
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_libraries_carry_no_package_hint() {
        let runner = FakeRunner::new().with_output(
            &pmap_command(1234),
            "1234:   nginx\n0000000000400000    788K r-x--  /usr/sbin/nginx\n",
        );
        let host = host_with(runner);
        let libraries = Process::new(1234).libraries(&host).unwrap();

        assert_eq!(libraries.len(), 1);
        assert_eq!(libraries[0].path().to_str(), Some("/usr/sbin/nginx"));
        assert!(libraries[0].package_hint().is_none());
    }
}
