// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Report structs and public API for inspecting the libraries mapped into running processes.

mod console;
mod elf;
mod entry;
mod totals;
mod validate;

pub use console::{library_table, process_table, summarize_report, summarize_scan};
pub use elf::FileKind;
pub use entry::{LibraryEntry, LibraryStatus, Owner};
pub use validate::{validate_report, validate_scan};

use rayon::prelude::*;
use serde::Serialize;

use crate::error::Result;
use crate::host::Host;
use crate::model::{Pid, Process, Timestamp};
use totals::ReportTotals;

/// The files mapped into one process and whether the process still runs their current version.
#[derive(Debug, Serialize)]
pub struct Report {
    pid: Pid,
    command_line: String,
    started: Timestamp,
    totals: ReportTotals,
    files: Vec<LibraryEntry>,
}

impl Report {
    /// Create a report for `process`.
    ///
    /// # Errors
    /// Returns an error if the process is gone or its mapped files cannot be listed.
    pub fn new(process: &Process, host: &Host) -> Result<Self> {
        let started = process.started(host)?;
        let command_line = process.command_line(host)?.to_string();
        // Collecting an indexed parallel iterator keeps the mapper's order.
        let files: Vec<LibraryEntry> = process
            .libraries(host)?
            .par_iter()
            .map(|library| LibraryEntry::evaluate(library, process, host))
            .collect();

        Ok(Self {
            pid: process.pid(),
            command_line,
            started,
            totals: ReportTotals::calculate(&files),
            files,
        })
    }

    #[must_use]
    pub fn pid(&self) -> Pid {
        self.pid
    }

    #[must_use]
    pub fn command_line(&self) -> &str {
        &self.command_line
    }

    #[must_use]
    pub fn started(&self) -> Timestamp {
        self.started
    }

    #[must_use]
    pub fn files(&self) -> &[LibraryEntry] {
        &self.files
    }

    /// Mapped files the process runs a stale copy of.
    pub fn outdated(&self) -> impl Iterator<Item = &LibraryEntry> {
        self.files
            .iter()
            .filter(|entry| entry.status == LibraryStatus::Outdated)
    }
}

/// Every process on the host that runs at least one outdated library.
#[derive(Debug, Serialize)]
pub struct ScanReport {
    scanned: usize,
    skipped: usize,
    processes: Vec<Report>,
}

impl ScanReport {
    /// Scan all processes of `host`.
    ///
    /// Processes that exit during the scan or whose mappings cannot be read (e.g. for lack of
    /// privileges) are counted as skipped.
    ///
    /// # Errors
    /// Returns an error if the processes cannot be listed.
    pub fn new(host: &Host) -> Result<Self> {
        let processes = host.all_processes()?;
        let reports: Vec<Option<Report>> = processes
            .par_iter()
            .map(|process| match Report::new(process, host) {
                Ok(report) => Some(report),
                Err(e) => {
                    log::info!("Skipping process {}: {e}", process.pid());
                    None
                }
            })
            .collect();
        let skipped = reports.iter().filter(|report| report.is_none()).count();

        Ok(Self {
            scanned: processes.len(),
            skipped,
            processes: reports
                .into_iter()
                .flatten()
                .filter(|report| report.totals.outdated > 0)
                .collect(),
        })
    }

    #[must_use]
    pub fn processes(&self) -> &[Report] {
        &self.processes
    }
}
