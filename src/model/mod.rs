// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Process, library and package entities.
//!
//! Entities hold their identity plus derived attributes that are fetched from the host on first
//! access and cached for the lifetime of the instance. They never keep a reference to the `Host`,
//! every method that may need I/O takes it as an argument.

mod library;
mod package;
mod process;

use chrono::{DateTime, Utc};

pub use library::Library;
pub use package::Package;
pub use process::Process;

/// Operating-system process identifier.
pub type Pid = u32;

/// An absolute point in time.
pub type Timestamp = DateTime<Utc>;
