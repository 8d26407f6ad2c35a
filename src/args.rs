// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

use libspector::{ClockKind, HostConfig, MapperKind, Pid};

#[derive(Parser)]
#[command(name = "libspect")]
#[command(version)]
#[command(about = "Finds running processes that still use replaced shared libraries")]
pub(crate) struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Tool used to list the files mapped into a process.
    #[arg(long, global = true, value_enum)]
    pub mapper: Option<Mapper>,

    #[arg(
        long,
        global = true,
        value_enum,
        long_help = "File timestamp that marks a library as replaced.\n\
                `changed` (ctime) is reliable with package managers that restore archived\n\
                modification times, `modified` (mtime) is the fallback elsewhere."
    )]
    pub clock: Option<Clock>,

    /// Timeout in seconds for each invocation of a native tool.
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Report the files mapped into a process and which of them are outdated.
    Process {
        pid: Pid,

        /// Path to the file to write the report in JSON format.
        #[arg(long, value_name = "FILE")]
        json: Option<PathBuf>,

        /// Exit with an error if any outdated library is found.
        #[arg(long)]
        strict: bool,
    },
    /// List processes whose command line contains SUBSTRING.
    FindProcess {
        #[arg(allow_hyphen_values = true)]
        substring: String,
    },
    /// List packaged files whose path contains SUBSTRING.
    FindLibrary { substring: String },
    /// List every process that runs an outdated library.
    Scan {
        /// Path to the file to write the scan in JSON format.
        #[arg(long, value_name = "FILE")]
        json: Option<PathBuf>,

        /// Exit with an error if any process runs an outdated library.
        #[arg(long)]
        strict: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Mapper {
    Pmap,
    Pldd,
}

#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Clock {
    Modified,
    Changed,
}

impl Args {
    /// Host configuration: native defaults overridden by the given flags.
    pub fn host_config(&self) -> HostConfig {
        let mut config = HostConfig::default();
        if let Some(mapper) = self.mapper {
            config.mapper = match mapper {
                Mapper::Pmap => MapperKind::Pmap,
                Mapper::Pldd => MapperKind::Pldd,
            };
        }
        if let Some(clock) = self.clock {
            config.clock = match clock {
                Clock::Modified => ClockKind::Modified,
                Clock::Changed => ClockKind::Changed,
            };
        }
        if let Some(timeout) = self.timeout {
            config.timeout = Duration::from_secs(timeout);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_command() {
        let args = Args::try_parse_from([
            "libspect", "process", "812", "--json", "out.json", "--strict",
        ])
        .unwrap();
        match args.command {
            Command::Process { pid, json, strict } => {
                assert_eq!(pid, 812);
                assert_eq!(json, Some(PathBuf::from("out.json")));
                assert!(strict);
            }
            _ => panic!("expected the process command"),
        }
    }

    #[test]
    fn test_global_options_override_defaults() {
        let args = Args::try_parse_from([
            "libspect", "scan", "--mapper", "pldd", "--clock", "modified", "--timeout", "5",
        ])
        .unwrap();
        let config = args.host_config();
        assert_eq!(config.mapper, MapperKind::Pldd);
        assert_eq!(config.clock, ClockKind::Modified);
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_find_process_accepts_leading_dash() {
        let args = Args::try_parse_from(["libspect", "find-process", "-bash"]).unwrap();
        match args.command {
            Command::FindProcess { substring } => assert_eq!(substring, "-bash"),
            _ => panic!("expected the find-process command"),
        }
    }

    #[test]
    fn test_defaults_are_native() {
        let args = Args::try_parse_from(["libspect", "find-library", "libssl"]).unwrap();
        assert_eq!(args.host_config(), HostConfig::default());
    }
}
