// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Parses process information reported by `ps` and `pgrep`.

use chrono::{Local, NaiveDateTime, TimeZone, Utc};

use super::{ParseError, ParseResult};
use crate::model::{Pid, Timestamp};

// `ps` prints `lstart` as e.g. `Mon Oct 19 10:22:33 2026`; some platforms put the day first.
const LSTART_FORMATS: [&str; 2] = ["%a %b %d %H:%M:%S %Y", "%a %d %b %H:%M:%S %Y"];

// Column layout of `ps axww -o lstart:30,pid:10,args`.
const LSTART_COLUMNS: std::ops::Range<usize> = 0..30;
const PID_COLUMNS: std::ops::Range<usize> = 31..41;
const ARGS_COLUMN: usize = 42;

/// One row of the bulk process listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord {
    pub pid: Pid,
    pub started: Timestamp,
    pub command_line: String,
}

/// Parse a process start time as printed by `ps -o lstart`.
///
/// The time is interpreted in the local time zone, which is what `ps` prints.
///
/// # Errors
/// Returns an error if the value matches none of the known layouts.
pub fn parse_lstart(value: &str) -> ParseResult<Timestamp> {
    // Day numbers are space padded (`Jan  5`), so runs of whitespace are collapsed first.
    let normalized = value.split_whitespace().collect::<Vec<_>>().join(" ");
    LSTART_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(&normalized, format).ok())
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| ParseError::new("expected `<weekday> <month> <day> <time> <year>`", value))
}

/// Parse `ps axww -o lstart:30,pid:10,args` output.
///
/// The header is skipped. Every row yields its own result so that a single malformed row (e.g. a
/// line wrapped by a terminal) can be skipped without losing the rest of the listing.
#[must_use]
pub fn parse_process_listing(output: &str) -> Vec<ParseResult<ProcessRecord>> {
    output
        .lines()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(parse_listing_row)
        .collect()
}

fn parse_listing_row(line: &str) -> ParseResult<ProcessRecord> {
    let (Some(lstart), Some(pid)) = (line.get(LSTART_COLUMNS), line.get(PID_COLUMNS)) else {
        return Err(ParseError::new("row is narrower than the listing columns", line));
    };
    let started = parse_lstart(lstart)
        .map_err(|_| ParseError::new("expected a start time in the first column", line))?;
    let pid = parse_pid(pid).ok_or_else(|| ParseError::new("expected a PID column", line))?;
    let command_line = line.get(ARGS_COLUMN..).unwrap_or_default().trim_end();

    Ok(ProcessRecord {
        pid,
        started,
        command_line: command_line.to_string(),
    })
}

/// Parse `pgrep` output: one PID per line.
///
/// # Errors
/// Returns an error if any non-blank line is not a positive integer.
pub fn parse_pid_list(output: &str) -> ParseResult<Vec<Pid>> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| parse_pid(line).ok_or_else(|| ParseError::new("expected a PID", line)))
        .collect()
}

fn parse_pid(value: &str) -> Option<Pid> {
    value.trim().parse::<Pid>().ok().filter(|pid| *pid > 0)
}
