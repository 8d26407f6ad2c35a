// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Classifies mapped files by their on-disk ELF header. Uses the `goblin` crate for parsing.

use goblin::elf::{header, Elf};
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

// Size of an ELF64 header, the larger of the two classes.
const HEADER_SIZE: usize = 64;

/// What a mapped file is, according to the header of the file currently on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    SharedObject,
    Executable,
    Relocatable,
    Core,
    /// A valid ELF header of any other type.
    OtherElf,
    NotElf,
    /// The file could not be opened or read.
    Unreadable,
}

impl FileKind {
    /// Classify the file at `path`. Only the header is read.
    #[must_use]
    pub fn classify(path: &Path) -> Self {
        let bytes = match Self::read_header(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::debug!("Cannot read {}: {e}", path.display());
                return Self::Unreadable;
            }
        };
        match Elf::parse_header(&bytes) {
            Ok(header) => Self::from_type(header.e_type),
            Err(_) => Self::NotElf,
        }
    }

    fn from_type(e_type: u16) -> Self {
        match e_type {
            header::ET_DYN => Self::SharedObject,
            header::ET_EXEC => Self::Executable,
            header::ET_REL => Self::Relocatable,
            header::ET_CORE => Self::Core,
            _ => Self::OtherElf,
        }
    }

    fn read_header(path: &Path) -> std::io::Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(HEADER_SIZE);
        File::open(path)?
            .take(HEADER_SIZE as u64)
            .read_to_end(&mut bytes)?;
        Ok(bytes)
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::SharedObject => "shared object",
            Self::Executable => "executable",
            Self::Relocatable => "relocatable",
            Self::Core => "core",
            Self::OtherElf => "other ELF",
            Self::NotElf => "not ELF",
            Self::Unreadable => "unreadable",
        }
    }
}
