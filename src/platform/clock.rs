// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

use chrono::{DateTime, Utc};
use std::path::Path;

use super::LibraryFreshnessClock;
use crate::model::Timestamp;

/// Uses the file's content modification time.
pub struct ModifiedClock;

impl LibraryFreshnessClock for ModifiedClock {
    fn freshness(&self, path: &Path) -> std::io::Result<Timestamp> {
        let modified = std::fs::metadata(path)?.modified()?;
        Ok(DateTime::<Utc>::from(modified))
    }
}

/// Uses the file's inode change time.
pub struct ChangedClock;

#[cfg(unix)]
impl LibraryFreshnessClock for ChangedClock {
    fn freshness(&self, path: &Path) -> std::io::Result<Timestamp> {
        use chrono::TimeZone;
        use std::os::unix::fs::MetadataExt;

        let metadata = std::fs::metadata(path)?;
        let nanos = u32::try_from(metadata.ctime_nsec()).unwrap_or_default();
        Utc.timestamp_opt(metadata.ctime(), nanos)
            .single()
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("ctime out of range: {}", metadata.ctime()),
                )
            })
    }
}

// No inode change time off unix.
#[cfg(not(unix))]
impl LibraryFreshnessClock for ChangedClock {
    fn freshness(&self, path: &Path) -> std::io::Result<Timestamp> {
        ModifiedClock.freshness(path)
    }
}
