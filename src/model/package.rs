// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.
use serde::Serialize;

use crate::parse::PackageRecord;

/// A package managed by the distribution's package manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Package {
    name: String,
    version: String,
}

impl Package {
    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Installed version, as reported by the package manager when it was looked up.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }
}

impl From<PackageRecord> for Package {
    fn from(record: PackageRecord) -> Self {
        Self::new(record.name, record.version)
    }
}
