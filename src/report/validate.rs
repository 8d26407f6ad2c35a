// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Validates reports and returns errors for outdated libraries.

use super::{Owner, Report, ScanReport};
use anyhow::Result;

/// Validate a process report.
///
/// # Errors
/// Returns an error if the process runs any outdated library.
pub fn validate_report(report: &Report) -> Result<()> {
    for entry in report.outdated() {
        if let Some(Owner::Unresolved(reason)) = &entry.owner {
            eprintln!("ERROR: {}: {}", entry.path.display(), reason);
        }
    }
    if report.totals.outdated > 0 {
        return Err(anyhow::anyhow!(
            "Outdated libraries found in the report: {} outdated libraries",
            report.totals.outdated
        ));
    }
    Ok(())
}

/// Validate a host scan.
///
/// # Errors
/// Returns an error if any process runs an outdated library.
pub fn validate_scan(scan: &ScanReport) -> Result<()> {
    if !scan.processes.is_empty() {
        return Err(anyhow::anyhow!(
            "Processes running outdated libraries: {}",
            scan.processes.len()
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::totals::ReportTotals;
    use crate::report::{FileKind, LibraryEntry, LibraryStatus};
    use chrono::Utc;
    use std::path::PathBuf;

    fn report(files: Vec<LibraryEntry>) -> Report {
        Report {
            pid: 812,
            command_line: "nginx".to_string(),
            started: Utc::now(),
            totals: ReportTotals::calculate(&files),
            files,
        }
    }

    #[test]
    fn test_current_report_passes() {
        let report = report(vec![LibraryEntry {
            path: PathBuf::from("/usr/sbin/nginx"),
            kind: FileKind::SharedObject,
            status: LibraryStatus::Current,
            owner: None,
        }]);
        assert!(validate_report(&report).is_ok());
    }

    #[test]
    fn test_outdated_report_fails() {
        let report = report(vec![LibraryEntry {
            path: PathBuf::from("/opt/vendor/libbar.so"),
            kind: FileKind::Unreadable,
            status: LibraryStatus::Outdated,
            owner: Some(Owner::Unresolved("No package owns library".to_string())),
        }]);
        let error = validate_report(&report).unwrap_err();
        assert!(error.to_string().contains("1 outdated"));
    }

    #[test]
    fn test_scan() {
        let clean = ScanReport {
            scanned: 10,
            skipped: 2,
            processes: Vec::new(),
        };
        assert!(validate_scan(&clean).is_ok());

        let affected = ScanReport {
            scanned: 10,
            skipped: 0,
            processes: vec![report(Vec::new())],
        };
        assert!(validate_scan(&affected).is_err());
    }
}
