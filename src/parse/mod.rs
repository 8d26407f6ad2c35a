// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Parsers for the output of native introspection tools.
//!
//! Parsers never perform I/O: they are handed the captured output of one command and return
//! either the records it describes or a `ParseError` naming the line that did not fit. A
//! malformed line rejects the whole output, except for the bulk process listing which reports
//! each row separately.

mod apt;
mod dpkg;
mod maps;
mod ps;

use std::collections::HashSet;
use std::path::PathBuf;
use thiserror::Error;

pub use apt::{parse_package_policy, PackageRecord};
pub use dpkg::{parse_package_search, LibraryRecord};
pub use maps::{parse_loaded_objects, parse_memory_map};
pub use ps::{parse_lstart, parse_pid_list, parse_process_listing, ProcessRecord};

/// Result type for parser operations.
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Captured output that does not match the shape expected from its command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to parse{} output ({reason}): {line:?}", in_command(.command))]
pub struct ParseError {
    /// The offending line.
    pub line: String,
    pub reason: &'static str,
    /// The command that produced the output, when known.
    pub command: Option<String>,
}

impl ParseError {
    pub(crate) fn new(reason: &'static str, line: &str) -> Self {
        Self {
            line: line.to_string(),
            reason,
            command: None,
        }
    }

    /// Attach the command that produced the offending output.
    #[must_use]
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }
}

fn in_command(command: &Option<String>) -> String {
    command
        .as_ref()
        .map(|command| format!(" `{command}`"))
        .unwrap_or_default()
}

/// Collects rooted paths once each, in first-seen order.
#[derive(Default)]
pub(crate) struct UniquePaths {
    seen: HashSet<PathBuf>,
    paths: Vec<PathBuf>,
}

impl UniquePaths {
    /// Record `candidate` unless it is not rooted (anonymous mappings, `[heap]`, ...) or was
    /// already seen.
    pub(crate) fn insert(&mut self, candidate: &str) {
        if !candidate.starts_with('/') {
            return;
        }
        let path = PathBuf::from(candidate);
        if self.seen.insert(path.clone()) {
            self.paths.push(path);
        }
    }

    pub(crate) fn into_paths(self) -> Vec<PathBuf> {
        self.paths
    }
}
