// Modula-2 compiler front end (m2c)
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

//! This is the m2c compiler front end.
//!
//! `m2c` reads a single Modula-2 source file,
//!   reports any lexical or syntax problems on standard error,
//!   and prints a one-line summary on standard output.

extern crate m2c;

use m2c::{
    diagnose::{Diagnostic, ErrorKind, VisualReporter},
    fs::{split_filename, split_path, Filesystem, LocalFilesystem},
    options::{self, Command, Flag, Options},
    parse::{self, SourceType, Stats},
    source::InfileError,
    sym::{self, InternError},
};
use std::{
    env,
    error::Error,
    fmt::{self, Display},
    io,
    path::Path,
    process,
};

/// Entrypoint for the compiler
pub fn main() {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map_or("m2c", String::as_str);

    let code = match options::process_args(&args) {
        Ok(Command::Compile { path, options }) => {
            match compile(&LocalFilesystem, &path, options) {
                Ok(stats) => {
                    println!("{}", summary(&path, &stats));

                    match stats.errors {
                        0 => exitcode::OK,
                        _ => exitcode::DATAERR,
                    }
                }
                Err(e) => {
                    eprintln!("{e}");
                    eprintln!("fatal: failed to compile `{path}`");
                    e.exit_code()
                }
            }
        }
        Ok(Command::Help) => {
            println!("{}", options::usage(program));
            exitcode::OK
        }
        Ok(Command::Version) => {
            println!("m2c {}", env!("CARGO_PKG_VERSION"));
            exitcode::OK
        }
        Err(diagnostics) => {
            diagnostics.iter().for_each(|d| eprintln!("{d}"));
            eprintln!("Try `{program} --help` for more information.");
            exitcode::USAGE
        }
    };

    process::exit(code);
}

/// Parse the source file at `path`,
///   rendering diagnostics on standard error.
fn compile<F: Filesystem>(
    fs: &F,
    path: &str,
    options: Options,
) -> Result<Stats, M2cError> {
    let source = check_filename(path)?;

    if !fs.file_exists(Path::new(path)) {
        return Err(M2cError::Usage(
            Diagnostic::new(ErrorKind::InputFileNotFound).with_text(path),
        ));
    }

    if !fs.is_regular_file(Path::new(path)) {
        return Err(M2cError::Usage(
            Diagnostic::new(ErrorKind::InvalidFilename).with_text(path),
        ));
    }

    sym::init(0)?;

    let mut reporter =
        VisualReporter::new(io::stderr(), options.get(Flag::Verbose));
    let output = parse::parse_file(source, path, options, &mut reporter)?;

    reporter.into_inner()?;

    Ok(output.stats)
}

/// Determine the kind of compilation unit from the suffix of `path`.
fn check_filename(path: &str) -> Result<SourceType, M2cError> {
    let (_, filename) = split_path(path);
    let (base, suffix) = split_filename(filename);

    if base.is_empty() {
        return Err(M2cError::Usage(
            Diagnostic::new(ErrorKind::InvalidFilename).with_text(path),
        ));
    }

    suffix
        .strip_prefix('.')
        .and_then(SourceType::for_suffix)
        .ok_or_else(|| {
            M2cError::Usage(
                Diagnostic::new(ErrorKind::InvalidFilenameSuffix)
                    .with_text(path),
            )
        })
}

fn summary(path: &str, stats: &Stats) -> String {
    format!(
        "{path}: {} lines, {} warning(s), {} error(s)",
        stats.lines, stats.warnings, stats.errors
    )
}

/// Compiler (`m2c`) error.
///
/// This represents failures that prevent a source file from being parsed
///   at all;
///     problems within the source are diagnostics,
///     not errors.
#[derive(Debug)]
pub enum M2cError {
    /// The command line names a file that cannot be compiled.
    Usage(Diagnostic),
    Infile(InfileError),
    Intern(InternError),
    Io(io::Error),
}

impl M2cError {
    fn exit_code(&self) -> exitcode::ExitCode {
        match self {
            Self::Usage(d) if d.kind == ErrorKind::InputFileNotFound => {
                exitcode::NOINPUT
            }
            Self::Usage(_) => exitcode::USAGE,
            Self::Infile(InfileError::FileNotFound) => exitcode::NOINPUT,
            Self::Infile(InfileError::AccessDenied) => exitcode::NOPERM,
            Self::Infile(_) => exitcode::DATAERR,
            Self::Intern(_) => exitcode::SOFTWARE,
            Self::Io(_) => exitcode::IOERR,
        }
    }
}

impl From<InfileError> for M2cError {
    fn from(e: InfileError) -> Self {
        Self::Infile(e)
    }
}

impl From<InternError> for M2cError {
    fn from(e: InternError) -> Self {
        Self::Intern(e)
    }
}

impl From<io::Error> for M2cError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl Display for M2cError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usage(d) => Display::fmt(d, f),
            Self::Infile(e) => Display::fmt(e, f),
            Self::Intern(e) => Display::fmt(e, f),
            Self::Io(e) => Display::fmt(e, f),
        }
    }
}

impl Error for M2cError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Usage(_) => None,
            Self::Infile(e) => Some(e),
            Self::Intern(e) => Some(e),
            Self::Io(e) => Some(e),
        }
    }
}
