// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Parses `dpkg -S` (search installed files by path) output.

use std::path::PathBuf;

use super::{ParseError, ParseResult};

/// An installed file together with the package that owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryRecord {
    pub package: String,
    pub path: PathBuf,
}

// Diversion notes are not ownership records.
const DIVERSION_PREFIXES: [&str; 2] = ["diversion by ", "local diversion "];

/// Parse `dpkg -S` output.
///
/// Each line looks like `libpython2.7:amd64: /usr/lib/x86_64-linux-gnu/libpython2.7.so.1`. The
/// package specification may carry colons of its own (architecture qualifiers), so the path is
/// whatever follows the last colon while the package name ends at the first one.
///
/// # Errors
/// Returns an error if any line lacks a `:` separator.
pub fn parse_package_search(output: &str) -> ParseResult<Vec<LibraryRecord>> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter(|line| !DIVERSION_PREFIXES.iter().any(|prefix| line.starts_with(prefix)))
        .map(parse_line)
        .collect()
}

fn parse_line(line: &str) -> ParseResult<LibraryRecord> {
    let (Some((package, _)), Some((_, path))) = (line.split_once(':'), line.rsplit_once(':'))
    else {
        return Err(ParseError::new("expected `<package>: <path>`", line));
    };
    Ok(LibraryRecord {
        package: package.trim().to_string(),
        path: PathBuf::from(path.trim()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_OUTPUT: &str = "libept1.4.12: /usr/lib/libept.so.1.0.5.4.12
libpython2.7:amd64: /usr/lib/x86_64-linux-gnu/libpython2.7.so.1
libc6:amd64: /lib/x86_64-linux-gnu/libthread_db.so.1
libnss3-1d:amd64: /usr/lib/x86_64-linux-gnu/libnssutil3.so.1d
liblxc0: /usr/lib/x86_64-linux-gnu/liblxc.so.1.0.0.alpha1
";

    #[test]
    fn test_parse_sample_output() {
        let records = parse_package_search(SAMPLE_OUTPUT).unwrap();
        let paths: Vec<_> = records.iter().map(|r| r.path.to_str().unwrap()).collect();
        assert_eq!(
            paths,
            vec![
                "/usr/lib/libept.so.1.0.5.4.12",
                "/usr/lib/x86_64-linux-gnu/libpython2.7.so.1",
                "/lib/x86_64-linux-gnu/libthread_db.so.1",
                "/usr/lib/x86_64-linux-gnu/libnssutil3.so.1d",
                "/usr/lib/x86_64-linux-gnu/liblxc.so.1.0.0.alpha1",
            ]
        );
        let packages: Vec<_> = records.iter().map(|r| r.package.as_str()).collect();
        assert_eq!(
            packages,
            vec!["libept1.4.12", "libpython2.7", "libc6", "libnss3-1d", "liblxc0"]
        );
    }

    #[test]
    fn test_parse_plain_package() {
        let records = parse_package_search("libept1.4.12: /usr/lib/libept.so.1.0.5.4.12").unwrap();
        assert_eq!(
            records,
            vec![LibraryRecord {
                package: "libept1.4.12".to_string(),
                path: PathBuf::from("/usr/lib/libept.so.1.0.5.4.12"),
            }]
        );
    }

    #[test]
    fn test_parse_architecture_qualified_package() {
        let records =
            parse_package_search("libc6:amd64: /lib/x86_64-linux-gnu/libthread_db.so.1").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].package, "libc6");
        assert_eq!(
            records[0].path,
            PathBuf::from("/lib/x86_64-linux-gnu/libthread_db.so.1")
        );
    }

    #[test]
    fn test_parse_multi_package_line() {
        let records =
            parse_package_search("libc6:amd64, libc6:i386: /usr/share/doc/libc6").unwrap();
        assert_eq!(records[0].package, "libc6");
        assert_eq!(records[0].path, PathBuf::from("/usr/share/doc/libc6"));
    }

    #[test]
    fn test_parse_skips_blank_lines_and_diversions() {
        let output = "\ndiversion by libc6 from: /lib/ld-linux.so.2\nlibc6: /lib/ld-linux.so.2\n\n";
        let records = parse_package_search(output).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].package, "libc6");
    }

    #[test]
    fn test_parse_skips_local_diversions() {
        let output = "local diversion from: /usr/lib/libfoo.so.1\n\
                      local diversion to: /usr/lib/libfoo.so.1.distrib\n\
                      libfoo1:amd64: /usr/lib/libfoo.so.1\n";
        let records = parse_package_search(output).unwrap();
        assert_eq!(
            records,
            vec![LibraryRecord {
                package: "libfoo1".to_string(),
                path: PathBuf::from("/usr/lib/libfoo.so.1"),
            }]
        );
    }

    #[test]
    fn test_parse_missing_separator_rejects_everything() {
        let output = "libc6: /lib/libc.so.6\nthis line has no separator\n";
        let error = parse_package_search(output).unwrap_err();
        assert_eq!(error.line, "this line has no separator");
        assert!(error.command.is_none());
    }

    #[test]
    fn test_parse_empty_output() {
        assert!(parse_package_search("").unwrap().is_empty());
    }
}
