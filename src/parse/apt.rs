// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Parses `apt-cache policy` output.

use super::{ParseError, ParseResult};

/// Name and installed version of a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRecord {
    pub name: String,
    pub version: String,
}

/// Parse `apt-cache policy <name>` output.
///
/// Only the first two lines matter:
///
/// ```text
/// libc6:
///   Installed: 2.17-93ubuntu4
///   Candidate: 2.17-93ubuntu4
///   ...
/// ```
///
/// # Errors
/// Returns an error if the name header is missing or the second line is not `Key: Value`.
pub fn parse_package_policy(output: &str) -> ParseResult<PackageRecord> {
    let mut lines = output.lines();

    let header = lines.next().unwrap_or_default();
    let name = header
        .trim()
        .strip_suffix(':')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ParseError::new("expected `<package>:` header", header))?;

    let installed = lines.next().unwrap_or_default();
    let version = match installed.split(": ").collect::<Vec<_>>().as_slice() {
        [_, version] if !version.trim().is_empty() => version.trim(),
        _ => return Err(ParseError::new("expected `Installed: <version>`", installed)),
    };

    Ok(PackageRecord {
        name: name.to_string(),
        version: version.to_string(),
    })
}
