// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Decides whether a process runs a stale copy of a library.

use chrono::SubsecRound;

use crate::error::Result;
use crate::host::Host;
use crate::model::{Library, Process, Timestamp};

/// Something with a filesystem freshness timestamp.
pub trait LibraryFreshness {
    /// # Errors
    /// Returns an error if the file cannot be inspected.
    fn modified(&self) -> Result<Timestamp>;
}

/// Something with a start timestamp.
pub trait ProcessStart {
    /// # Errors
    /// Returns an error if the process is gone or cannot be queried.
    fn started(&self) -> Result<Timestamp>;
}

/// Whether `process` was started before `library` last changed on disk.
///
/// An unreadable library is reported as outdated, its on-disk state cannot vouch for the mapped
/// code. A process that can no longer be queried is never reported, a dead process runs nothing.
/// The two rules are not interchangeable and are checked in this order.
///
/// Start times are only known to the second, so the library timestamp is truncated to whole
/// seconds before comparing.
pub fn outdated<L, P>(library: &L, process: &P) -> bool
where
    L: LibraryFreshness + ?Sized,
    P: ProcessStart + ?Sized,
{
    let modified = match library.modified() {
        Ok(modified) => modified,
        Err(e) => {
            log::debug!("Treating library as outdated: {e}");
            return true;
        }
    };
    let started = match process.started() {
        Ok(started) => started,
        Err(e) => {
            log::debug!("Treating library as current: {e}");
            return false;
        }
    };
    started < modified.trunc_subsecs(0)
}

/// An entity paired with the host used to resolve its attributes.
pub(crate) struct OnHost<'a, T> {
    pub(crate) entity: &'a T,
    pub(crate) host: &'a Host,
}

impl LibraryFreshness for OnHost<'_, Library> {
    fn modified(&self) -> Result<Timestamp> {
        self.entity.modified(self.host)
    }
}

impl ProcessStart for OnHost<'_, Process> {
    fn started(&self) -> Result<Timestamp> {
        self.entity.started(self.host)
    }
}
