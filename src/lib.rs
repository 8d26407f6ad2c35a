// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! A tool for finding running processes that still use replaced shared libraries.
//!
//! This crate provides functionality to:
//! - Query processes, their mapped files and installed packages through native tools
//! - Decide whether a process was started before a library it maps was replaced on disk
//! - Resolve the package that owns an outdated library
//! - Generate reports for a single process or the whole host

pub mod command;
pub mod error;
pub mod host;
pub mod model;
pub mod outdated;
pub mod parse;
pub mod platform;
pub mod report;

// Re-export key types for convenience
pub use error::{Error, Result};
pub use host::{Host, HostConfig};
pub use model::{Library, Package, Pid, Process, Timestamp};
pub use platform::{ClockKind, MapperKind};
pub use report::{Report, ScanReport};
