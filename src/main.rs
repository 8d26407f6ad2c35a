// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.
mod args;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};

use args::{Args, Command};
use libspector::report::{
    library_table, process_table, summarize_report, summarize_scan, validate_report,
    validate_scan, Report, ScanReport,
};
use libspector::{Host, Pid, Process};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let host = Host::new(&args.host_config());
    match args.command {
        Command::Process { pid, json, strict } => inspect_process(&host, pid, json, strict),
        Command::FindProcess { substring } => find_process(&host, &substring),
        Command::FindLibrary { substring } => find_library(&host, &substring),
        Command::Scan { json, strict } => scan(&host, json, strict),
    }
}

fn inspect_process(host: &Host, pid: Pid, json: Option<PathBuf>, strict: bool) -> Result<()> {
    eprintln!(
        "Inspecting process: pid={pid}, mapper={}",
        host.mapper_name()
    );
    let report = Report::new(&Process::new(pid), host)
        .with_context(|| format!("Failed to inspect process: {pid}"))?;
    eprintln!(
        "Inspection completed: pid={pid}, files={}",
        report.files().len()
    );

    if let Some(dest) = json {
        write_report_to_file(&report, &dest)?;
    }
    summarize_report(&report);
    if strict {
        validate_report(&report)?;
    }
    Ok(())
}

fn find_process(host: &Host, substring: &str) -> Result<()> {
    let processes = host
        .find_process(substring)
        .with_context(|| format!("Failed to search processes: {substring}"))?;
    if processes.is_empty() {
        eprintln!("No process matches: {substring}");
        return Ok(());
    }
    println!("{}", process_table(&processes, host));
    Ok(())
}

fn find_library(host: &Host, substring: &str) -> Result<()> {
    let libraries = host.find_library(substring).with_context(|| {
        format!(
            "Failed to search {} database: {substring}",
            host.package_manager_name()
        )
    })?;
    if libraries.is_empty() {
        eprintln!("No packaged file matches: {substring}");
        return Ok(());
    }
    println!("{}", library_table(&libraries));
    Ok(())
}

fn scan(host: &Host, json: Option<PathBuf>, strict: bool) -> Result<()> {
    eprintln!("Scanning processes: mapper={}", host.mapper_name());
    let scan = ScanReport::new(host).context("Failed to scan processes")?;

    if let Some(dest) = json {
        write_report_to_file(&scan, &dest)?;
    }
    summarize_scan(&scan);
    if strict {
        validate_scan(&scan)?;
    }
    Ok(())
}

/// Write the report to a file.
///
/// # Errors
/// Returns an error if the report cannot be serialized to JSON or if the file cannot be created.
fn write_report_to_file(report: &impl Serialize, dest: &Path) -> Result<()> {
    eprintln!("Writing report to file: file={}", dest.display());
    let file = File::create(dest)
        .with_context(|| format!("Failed to create JSON output file: {}", dest.display()))?;
    serde_json::to_writer_pretty(file, report)
        .with_context(|| format!("Failed to serialize report to JSON: {}", dest.display()))?;
    Ok(())
}
