// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Formats and prints reports and lookup results to the console.

use comfy_table::{Attribute, Cell, Color, Table};

use super::{FileKind, LibraryEntry, LibraryStatus, Owner, Report, ScanReport};
use crate::host::Host;
use crate::model::{Library, Process, Timestamp};

/// Summarize a process report to the console.
///
/// Prints the process, a table of every mapped file and the totals.
pub fn summarize_report(report: &Report) {
    println!("Process: {} ({})", report.pid, report.command_line);
    println!("Started: {}\n", format_timestamp(report.started));

    println!("{}\n", files_table(&report.files));
    println!("{}", totals_table(report));
}

/// Summarize a host scan to the console.
pub fn summarize_scan(scan: &ScanReport) {
    println!(
        "Scanned {} process(es), skipped {}.",
        scan.scanned, scan.skipped
    );
    if scan.processes.is_empty() {
        println!("No process runs an outdated library.");
        return;
    }

    let mut table = default_table_preset();
    table.set_header(vec![
        header_cell("PID"),
        header_cell("Command"),
        header_cell("Outdated libraries"),
        header_cell("Packages"),
    ]);
    for report in &scan.processes {
        let mut packages: Vec<&str> = report
            .outdated()
            .filter_map(|entry| match &entry.owner {
                Some(Owner::Resolved(package)) => Some(package.name()),
                _ => None,
            })
            .collect();
        packages.sort_unstable();
        packages.dedup();
        table.add_row(vec![
            Cell::new(report.pid),
            Cell::new(&report.command_line),
            Cell::new(report.totals.outdated),
            Cell::new(packages.join(", ")),
        ]);
    }
    println!("{table}");
    println!(
        "\nTotal: {} process(es) running outdated libraries",
        scan.processes.len()
    );
}

/// Table of processes with their start time and command line.
///
/// Processes that exit before they can be queried are shown as gone.
#[must_use]
pub fn process_table(processes: &[Process], host: &Host) -> Table {
    let mut table = default_table_preset();
    table.set_header(vec![
        header_cell("PID"),
        header_cell("Started"),
        header_cell("Command line"),
    ]);
    for process in processes {
        let started = process
            .started(host)
            .map_or_else(|_| "gone".to_string(), format_timestamp);
        let command_line = process.command_line(host).unwrap_or("-");
        table.add_row(vec![
            Cell::new(process.pid()),
            Cell::new(started),
            Cell::new(command_line),
        ]);
    }
    table
}

/// Table of packaged files and the package that ships them.
#[must_use]
pub fn library_table(libraries: &[Library]) -> Table {
    let mut table = default_table_preset();
    table.set_header(vec![header_cell("Path"), header_cell("Package")]);
    for library in libraries {
        table.add_row(vec![
            Cell::new(library.path().display()),
            Cell::new(library.package_hint().unwrap_or("-")),
        ]);
    }
    table
}

/// Create a table with the default preset styling.
fn default_table_preset() -> Table {
    let mut table = Table::new();
    table
        .load_preset(comfy_table::presets::UTF8_FULL_CONDENSED)
        .apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS)
        .set_content_arrangement(comfy_table::ContentArrangement::Dynamic);
    table
}

fn header_cell(title: &str) -> Cell {
    Cell::new(title).add_attribute(Attribute::Bold)
}

fn files_table(files: &[LibraryEntry]) -> Table {
    let mut table = default_table_preset();
    table.set_header(vec![
        header_cell("Mapped file"),
        header_cell("Kind"),
        header_cell("Status"),
        header_cell("Package"),
    ]);
    for entry in files {
        let status = match entry.status {
            LibraryStatus::Current => Cell::new("current"),
            LibraryStatus::Outdated => Cell::new("OUTDATED")
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
        };
        let owner = match &entry.owner {
            Some(Owner::Resolved(package)) => {
                format!("{} {}", package.name(), package.version())
            }
            Some(Owner::Unresolved(reason)) => reason.clone(),
            None => String::new(),
        };
        table.add_row(vec![
            Cell::new(entry.path.display()),
            Cell::new(entry.kind.label()),
            status,
            Cell::new(owner),
        ]);
    }
    table
}

fn totals_table(report: &Report) -> Table {
    let totals = &report.totals;
    let mut table = default_table_preset();
    table
        .set_header(vec![header_cell("Mapped files"), header_cell("Count")])
        .add_row(vec![Cell::new("Files"), Cell::new(totals.files)])
        .add_row(vec![
            Cell::new(FileKind::SharedObject.label()),
            Cell::new(totals.shared_objects),
        ])
        .add_row(vec![
            Cell::new("Outdated").add_attribute(Attribute::Bold),
            Cell::new(totals.outdated).add_attribute(Attribute::Bold),
        ])
        .add_row(vec![
            Cell::new("Outdated packages"),
            Cell::new(totals.outdated_packages),
        ])
        .add_row(vec![
            Cell::new("Unresolved owners"),
            Cell::new(totals.unresolved),
        ]);
    table
}

fn format_timestamp(timestamp: Timestamp) -> String {
    timestamp
        .with_timezone(&chrono::Local)
        .format("%Y-%m-%d %H:%M:%S %Z")
        .to_string()
}
