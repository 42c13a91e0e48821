// Light filesystem abstractions
//
//  Copyright (C) 2015-2022 The m2c Authors.
//
//  This file is part of m2c.
//
//  This program is free software: you can redistribute it and/or modify
//  it under the terms of the GNU General Public License as published by
//  the Free Software Foundation, either version 3 of the License, or
//  (at your option) any later version.
//
//  This program is distributed in the hope that it will be useful,
//  but WITHOUT ANY WARRANTY; without even the implied warranty of
//  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//  GNU General Public License for more details.
//
//  You should have received a copy of the GNU General Public License
//  along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Lightweight filesystem abstraction.
//!
//! This abstraction makes no attempt to be comprehensive---it
//!   includes only what is needed by the front end:
//!
//!   - [`Filesystem`] provides metadata probes and whole-file reads by
//!       path,
//!       so that callers can substitute an in-memory filesystem;
//!   - [`LocalFilesystem`] implements it atop of [`std::fs`]; and
//!   - [`split_path`] and [`split_filename`] decompose paths the way
//!       source file names are checked.

use std::env;
use std::fs;
use std::io::{Read, Result};
use std::path::Path;

/// A filesystem.
///
/// All probes answer `false` or `None` for paths that cannot be
///   inspected rather than failing.
pub trait Filesystem {
    /// Whether anything exists at `path`.
    fn file_exists(&self, path: &Path) -> bool;

    /// Whether `path` names a regular file,
    ///   following symlinks.
    fn is_regular_file(&self, path: &Path) -> bool;

    /// Size of the file at `path` in bytes.
    fn file_size(&self, path: &Path) -> Option<u64>;

    /// Read the entire file at `path` into memory.
    fn read_all(&self, path: &Path) -> Result<Vec<u8>>;

    /// Current working directory,
    ///   if it can be represented as a string.
    fn current_working_directory(&self) -> Option<String>;
}

/// The operating system's filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFilesystem;

impl Filesystem for LocalFilesystem {
    fn file_exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_regular_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn file_size(&self, path: &Path) -> Option<u64> {
        fs::metadata(path).ok().map(|meta| meta.len())
    }

    fn read_all(&self, path: &Path) -> Result<Vec<u8>> {
        let mut file = fs::File::open(path)?;
        let mut buf = Vec::new();

        file.read_to_end(&mut buf)?;
        Ok(buf)
    }

    fn current_working_directory(&self) -> Option<String> {
        env::current_dir()
            .ok()
            .and_then(|dir| dir.to_str().map(String::from))
    }
}

/// Split `path` into its directory and file name at the last `/`.
///
/// The directory retains its trailing separator;
///   it is empty if `path` has no directory component.
pub fn split_path(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(i) => path.split_at(i + 1),
        None => ("", path),
    }
}

/// Split `filename` into its base name and suffix at the last `.`.
///
/// The suffix retains its leading `.`;
///   it is empty if there is no `.` or if the only `.` begins the name
///   (as in `.hidden`).
pub fn split_filename(filename: &str) -> (&str, &str) {
    match filename.rfind('.') {
        Some(i) if i > 0 => filename.split_at(i),
        _ => (filename, ""),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn splits_path() {
        assert_eq!(("a/b/", "c.mod"), split_path("a/b/c.mod"));
        assert_eq!(("/", "c.mod"), split_path("/c.mod"));
        assert_eq!(("", "c.mod"), split_path("c.mod"));
        assert_eq!(("dir/", ""), split_path("dir/"));
    }

    #[test]
    fn splits_filename() {
        assert_eq!(("Foo", ".def"), split_filename("Foo.def"));
        assert_eq!(("Foo.bar", ".MOD"), split_filename("Foo.bar.MOD"));
        assert_eq!(("Foo", ""), split_filename("Foo"));
        assert_eq!((".hidden", ""), split_filename(".hidden"));
    }

    #[test]
    fn local_probes_missing_file() {
        let fs = LocalFilesystem;
        let path = Path::new("this/path/does/not/exist.mod");

        assert!(!fs.file_exists(path));
        assert!(!fs.is_regular_file(path));
        assert_eq!(None, fs.file_size(path));
        assert!(fs.read_all(path).is_err());
    }

    #[test]
    fn local_cwd_is_a_directory() {
        let fs = LocalFilesystem;
        let cwd = fs.current_working_directory().unwrap();

        assert!(fs.file_exists(Path::new(&cwd)));
        assert!(!fs.is_regular_file(Path::new(&cwd)));
    }
}
