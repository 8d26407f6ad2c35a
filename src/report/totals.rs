// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Statistics over the files mapped into a process.

use dashmap::DashSet;
use rayon::prelude::*;
use serde::Serialize;
use std::ops::Add;

use super::{FileKind, LibraryEntry, LibraryStatus, Owner};

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct ReportTotals {
    pub(crate) files: usize,
    pub(crate) shared_objects: usize,
    pub(crate) outdated: usize,
    pub(crate) outdated_packages: usize,
    pub(crate) unresolved: usize,
}

impl ReportTotals {
    pub(crate) fn calculate(entries: &[LibraryEntry]) -> Self {
        let packages = DashSet::new();
        let mut totals = entries
            .par_iter()
            .fold(ReportTotals::default, |mut totals, entry| {
                totals.files += 1;
                if entry.kind == FileKind::SharedObject {
                    totals.shared_objects += 1;
                }
                if entry.status == LibraryStatus::Outdated {
                    totals.outdated += 1;
                }
                match &entry.owner {
                    Some(Owner::Resolved(package)) => {
                        packages.insert(package.name().to_string());
                    }
                    Some(Owner::Unresolved(_)) => totals.unresolved += 1,
                    None => {}
                }
                totals
            })
            .reduce(ReportTotals::default, |a, b| a + b);
        totals.outdated_packages = packages.len();
        totals
    }
}

impl Add for ReportTotals {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            files: self.files + other.files,
            shared_objects: self.shared_objects + other.shared_objects,
            outdated: self.outdated + other.outdated,
            outdated_packages: 0, // Handled by the calculate function.
            unresolved: self.unresolved + other.unresolved,
        }
    }
}
