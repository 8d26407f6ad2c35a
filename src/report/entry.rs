// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

use serde::Serialize;
use std::path::PathBuf;

use super::FileKind;
use crate::host::Host;
use crate::model::{Library, Package, Process};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LibraryStatus {
    Current,
    Outdated,
}

/// Owner of an outdated library, or why it could not be determined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Owner {
    Resolved(Package),
    Unresolved(String),
}

/// One file mapped into the reported process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibraryEntry {
    pub(crate) path: PathBuf,
    pub(crate) kind: FileKind,
    pub(crate) status: LibraryStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) owner: Option<Owner>,
}

impl LibraryEntry {
    /// Evaluate `library` as mapped into `process`. The owner is only looked up for outdated
    /// libraries.
    pub(crate) fn evaluate(library: &Library, process: &Process, host: &Host) -> Self {
        let kind = FileKind::classify(library.path());
        if !library.outdated(process, host) {
            return Self {
                path: library.path().to_path_buf(),
                kind,
                status: LibraryStatus::Current,
                owner: None,
            };
        }
        let owner = match library.package(host) {
            Ok(package) => Owner::Resolved(package.clone()),
            Err(e) => Owner::Unresolved(e.to_string()),
        };
        Self {
            path: library.path().to_path_buf(),
            kind,
            status: LibraryStatus::Outdated,
            owner: Some(owner),
        }
    }

    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    #[must_use]
    pub fn kind(&self) -> FileKind {
        self.kind
    }

    #[must_use]
    pub fn status(&self) -> LibraryStatus {
        self.status
    }

    #[must_use]
    pub fn owner(&self) -> Option<&Owner> {
        self.owner.as_ref()
    }
}
