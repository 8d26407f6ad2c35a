// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Parses per-process library listings (`pmap` and `pldd`).
//!
//! Both parsers produce the same shape: the distinct file paths mapped into the process, in the
//! order the tool first reported them.

use std::path::PathBuf;

use super::{ParseError, ParseResult, UniquePaths};

/// Parse `pmap <pid>` output.
///
/// ```text
/// 1234:   nginx: master process /usr/sbin/nginx
/// 0000000000400000    788K r-x--  /usr/sbin/nginx
/// 00000000006da000     60K rw---    [ anon ]
///  total            12345K
/// ```
///
/// The header is skipped, the fourth column of every row is the mapped file and the indented
/// `total` line ends the listing.
///
/// # Errors
/// Returns an error if a row has fewer than four columns.
pub fn parse_memory_map(output: &str) -> ParseResult<Vec<PathBuf>> {
    let mut paths = UniquePaths::default();
    for line in output.lines().skip(1) {
        if line.starts_with(char::is_whitespace) {
            break;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(ParseError::new(
                "expected `<address> <size> <mode> <mapping>`",
                line,
            ));
        }
        paths.insert(fields[3]);
    }
    Ok(paths.into_paths())
}

/// Parse `pldd <pid>` output.
///
/// ```text
/// 1234:   /usr/sbin/nginx
/// linux-vdso.so.1
/// /lib/x86_64-linux-gnu/libc.so.6
/// ```
///
/// The header is skipped and every other line names one loaded object; virtual objects without a
/// path are ignored.
///
/// # Errors
/// This parser accepts any text; the `Result` keeps it interchangeable with `parse_memory_map`.
pub fn parse_loaded_objects(output: &str) -> ParseResult<Vec<PathBuf>> {
    let mut paths = UniquePaths::default();
    output
        .lines()
        .skip(1)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .for_each(|line| paths.insert(line));
    Ok(paths.into_paths())
}
