// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Error taxonomy shared by the entity model and the host queries.

use std::path::PathBuf;
use thiserror::Error;

use crate::command::CommandError;
use crate::model::Pid;
use crate::parse::ParseError;

/// Result type for host queries.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while inspecting the host.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invocation failed: {0}")]
    Invocation(#[from] CommandError),
    #[error("{0}")]
    Parse(#[from] ParseError),
    #[error("Process not found: {pid}")]
    ProcessNotFound { pid: Pid },
    #[error("Library file unavailable: {path:?}")]
    FileUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Library {path:?} is owned by several packages: {packages:?}")]
    AmbiguousOwner { path: PathBuf, packages: Vec<String> },
    #[error("No package owns library {path:?}")]
    UnknownOwner { path: PathBuf },
    #[error("No package name provided")]
    NoPackageSpecified,
    #[error("Parsed package mismatch: {reported:?} != {requested:?}")]
    PackageMismatch { requested: String, reported: String },
    #[error("Library path must be absolute: {path:?}")]
    InvalidLibraryPath { path: PathBuf },
}
