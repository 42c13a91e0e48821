// Source file reader
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

//! Character stream over a source file with two characters of lookahead.
//!
//! An [`Infile`] reads the entire source file into memory on open and
//!   yields it one byte at a time.
//! Line endings are normalised:
//!   each of `LF`, `CR` and `CR LF` is read as a single `LF`.
//! Reading beyond the end of the buffer yields [`EOT`] without advancing,
//!   at which point [`Infile::is_past_eof`] holds.
//!
//! Line and column numbers are 1-based and always describe the position of
//!   the _next_ character to be read,
//!     so that the lexer can snapshot the start position of a symbol
//!     before consuming it.
//!
//! A lexeme is captured by marking the position of the lookahead
//!   character with [`Infile::mark_lexeme`],
//!     consuming the characters of the lexeme,
//!     and then interning everything consumed since the mark with
//!     [`Infile::read_marked_lexeme`].

use crate::fs::{Filesystem, LocalFilesystem};
use crate::global::{self, SourcePosSize};
use crate::sym::{self, Symbol};
use memchr::memchr2_iter;
use std::error::Error;
use std::fmt::{self, Display};
use std::io;
use std::ops::Range;
use std::path::Path;

/// End-of-transmission character yielded beyond the end of the buffer.
pub const EOT: u8 = 0x04;
pub const TAB: u8 = b'\t';
pub const LF: u8 = b'\n';
pub const CR: u8 = b'\r';

/// Line and column of a character within a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub line: SourcePosSize,
    pub col: SourcePosSize,
}

impl Pos {
    pub fn new(line: SourcePosSize, col: SourcePosSize) -> Self {
        Self { line, col }
    }
}

impl Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.col)
    }
}

/// Provider of source lines for diagnostic echo.
pub trait LineSource {
    /// Text of the 1-based line `line`,
    ///   excluding its terminator.
    fn source_for_line(&self, line: SourcePosSize) -> Option<Symbol>;
}

/// A [`LineSource`] with no lines.
///
/// Used for diagnostics raised before any file is open.
pub struct NoSource;

impl LineSource for NoSource {
    fn source_for_line(&self, _line: SourcePosSize) -> Option<Symbol> {
        None
    }
}

/// Failure to open a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfileError {
    FileNotFound,
    AccessDenied,
    AllocationFailed,
    /// The file contains no bytes.
    Empty,
    /// Any other I/O failure.
    Io(io::ErrorKind),
    FileTooLarge { size: u64 },
    TooManyLines { lines: usize },
    /// Line `line` is `len` columns long.
    LineTooLong { line: usize, len: usize },
}

impl From<io::Error> for InfileError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::NotFound => Self::FileNotFound,
            io::ErrorKind::PermissionDenied => Self::AccessDenied,
            io::ErrorKind::OutOfMemory => Self::AllocationFailed,
            kind => Self::Io(kind),
        }
    }
}

impl Display for InfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileNotFound => write!(f, "file not found"),
            Self::AccessDenied => write!(f, "access denied"),
            Self::AllocationFailed => write!(f, "memory allocation failed"),
            Self::Empty => write!(f, "file is empty"),
            Self::Io(kind) => write!(f, "I/O error: {kind}"),
            Self::FileTooLarge { size } => write!(
                f,
                "file size of {size} bytes exceeds maximum of {}",
                global::MAX_SOURCE_BYTES
            ),
            Self::TooManyLines { lines } => write!(
                f,
                "file has {lines} lines, exceeding maximum of {}",
                global::MAX_SOURCE_LINES
            ),
            Self::LineTooLong { line, len } => write!(
                f,
                "line {line} is {len} columns long, \
                 exceeding maximum of {}",
                global::MAX_LINE_COLUMNS
            ),
        }
    }
}

impl Error for InfileError {}

/// Source file held entirely in memory.
pub struct Infile {
    name: String,
    buf: Vec<u8>,

    /// Index of the lookahead character.
    index: usize,

    line: SourcePosSize,
    col: SourcePosSize,

    /// Buffer index at which the current lexeme begins.
    mark: Option<usize>,

    /// Content range of each line,
    ///   excluding its terminator.
    lines: Vec<Range<usize>>,
}

impl Infile {
    /// Open the file at `path` on the local filesystem.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, InfileError> {
        Self::open_in(&LocalFilesystem, path.as_ref())
    }

    /// Open the file at `path` on the given filesystem.
    ///
    /// The size limit is checked before the file is read.
    pub fn open_in<F: Filesystem>(
        fs: &F,
        path: &Path,
    ) -> Result<Self, InfileError> {
        if !fs.file_exists(path) {
            return Err(InfileError::FileNotFound);
        }

        match fs.file_size(path) {
            Some(size) if size > global::MAX_SOURCE_BYTES as u64 => {
                return Err(InfileError::FileTooLarge { size })
            }
            _ => (),
        }

        let buf = fs.read_all(path)?;
        Self::from_bytes(path.to_string_lossy(), buf)
    }

    /// Construct from an in-memory buffer,
    ///   subject to the same limits as a file.
    pub fn from_bytes<S: Into<String>, B: Into<Vec<u8>>>(
        name: S,
        bytes: B,
    ) -> Result<Self, InfileError> {
        let buf = bytes.into();

        if buf.is_empty() {
            return Err(InfileError::Empty);
        }
        if buf.len() > global::MAX_SOURCE_BYTES {
            return Err(InfileError::FileTooLarge {
                size: buf.len() as u64,
            });
        }

        let lines = index_lines(&buf);

        if lines.len() > global::MAX_SOURCE_LINES {
            return Err(InfileError::TooManyLines { lines: lines.len() });
        }

        if let Some((i, range)) = lines
            .iter()
            .enumerate()
            .find(|(_, range)| range.len() > global::MAX_LINE_COLUMNS)
        {
            return Err(InfileError::LineTooLong {
                line: i + 1,
                len: range.len(),
            });
        }

        Ok(Self {
            name: name.into(),
            buf,
            index: 0,
            line: 1,
            col: 1,
            mark: None,
            lines,
        })
    }

    /// Name of the file as it was opened.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalised character at buffer index `i`.
    fn char_at(&self, i: usize) -> u8 {
        match self.buf.get(i) {
            None => EOT,
            Some(&CR) => LF,
            Some(&c) => c,
        }
    }

    /// Buffer index of the character following the one at `i`.
    fn index_after(&self, i: usize) -> usize {
        match (self.buf.get(i), self.buf.get(i + 1)) {
            (None, _) => i,
            (Some(&CR), Some(&LF)) => i + 2,
            _ => i + 1,
        }
    }

    /// Lookahead character,
    ///   without consuming it.
    #[inline]
    pub fn next_char(&self) -> u8 {
        self.char_at(self.index)
    }

    /// Character following the lookahead character,
    ///   without consuming anything.
    #[inline]
    pub fn la2_char(&self) -> u8 {
        self.char_at(self.index_after(self.index))
    }

    /// Consume and return the lookahead character.
    ///
    /// At the end of the buffer this yields [`EOT`] and does not advance.
    pub fn read_char(&mut self) -> u8 {
        let c = self.next_char();

        if self.is_past_eof() {
            return c;
        }

        self.index = self.index_after(self.index);

        if c == LF {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }

        c
    }

    /// Consume the lookahead character and return the new lookahead.
    #[inline]
    pub fn consume_char(&mut self) -> u8 {
        self.read_char();
        self.next_char()
    }

    /// Mark the lookahead character as the start of a lexeme.
    #[inline]
    pub fn mark_lexeme(&mut self) {
        self.mark = Some(self.index);
    }

    /// Intern all characters consumed since [`Infile::mark_lexeme`].
    ///
    /// Yields [`None`] if there is no mark or nothing has been consumed
    ///   since it was set,
    ///     in which case the mark is left intact.
    /// Yields [`None`] if the lexeme cannot be interned,
    ///   which is the case for lexemes containing control characters
    ///   (including line terminators).
    /// The mark is otherwise cleared.
    pub fn read_marked_lexeme(&mut self) -> Option<Symbol> {
        let start = self.mark.filter(|&start| start < self.index)?;
        self.mark = None;

        sym::intern_slice(&self.buf, start, self.index - start).ok()
    }

    /// Whether the buffer has been exhausted.
    #[inline]
    pub fn is_past_eof(&self) -> bool {
        self.index >= self.buf.len()
    }

    /// Line of the lookahead character.
    #[inline]
    pub fn line(&self) -> SourcePosSize {
        self.line
    }

    /// Column of the lookahead character.
    #[inline]
    pub fn col(&self) -> SourcePosSize {
        self.col
    }

    #[inline]
    pub fn pos(&self) -> Pos {
        Pos::new(self.line, self.col)
    }

    /// Number of lines in the file.
    ///
    /// A final line lacking a terminator is counted.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

impl LineSource for Infile {
    fn source_for_line(&self, line: SourcePosSize) -> Option<Symbol> {
        let range = self.lines.get((line as usize).checked_sub(1)?)?;
        sym::intern(&self.buf[range.clone()]).ok()
    }
}

/// Content range of each line of `buf`.
fn index_lines(buf: &[u8]) -> Vec<Range<usize>> {
    let mut lines = Vec::new();
    let mut start = 0;

    for i in memchr2_iter(LF, CR, buf) {
        // LF of a CR LF pair, already accounted for
        if i < start {
            continue;
        }

        lines.push(start..i);

        start = match (buf[i], buf.get(i + 1)) {
            (CR, Some(&LF)) => i + 2,
            _ => i + 1,
        };
    }

    if start < buf.len() {
        lines.push(start..buf.len());
    }

    lines
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::init_sym;
    use std::path::PathBuf;

    fn sut(src: &str) -> Infile {
        init_sym();
        Infile::from_bytes("test.mod", src).unwrap()
    }

    #[test]
    fn reads_chars_with_positions() {
        let mut sut = sut("ab\ncd");

        assert_eq!(Pos::new(1, 1), sut.pos());
        assert_eq!(b'a', sut.next_char());
        assert_eq!(b'b', sut.la2_char());

        assert_eq!(b'a', sut.read_char());
        assert_eq!(Pos::new(1, 2), sut.pos());
        assert_eq!(LF, sut.consume_char());
        assert_eq!(Pos::new(1, 3), sut.pos());

        assert_eq!(LF, sut.read_char());
        assert_eq!(Pos::new(2, 1), sut.pos());
        assert_eq!(b'd', sut.consume_char());
        assert_eq!(EOT, sut.la2_char());
        assert!(!sut.is_past_eof());

        assert_eq!(EOT, sut.consume_char());
        assert!(sut.is_past_eof());
        assert_eq!(Pos::new(2, 3), sut.pos());

        // Reading beyond the end does not advance.
        assert_eq!(EOT, sut.read_char());
        assert_eq!(Pos::new(2, 3), sut.pos());
    }

    #[test]
    fn normalises_line_endings() {
        let mut sut = sut("a\rb\r\nc\nd");

        let mut read = Vec::new();
        let mut positions = Vec::new();

        while !sut.is_past_eof() {
            positions.push(sut.pos());
            read.push(sut.read_char());
        }

        assert_eq!(b"a\nb\nc\nd".to_vec(), read);
        assert_eq!(
            vec![
                Pos::new(1, 1),
                Pos::new(1, 2),
                Pos::new(2, 1),
                Pos::new(2, 2),
                Pos::new(3, 1),
                Pos::new(3, 2),
                Pos::new(4, 1),
            ],
            positions
        );
        assert_eq!(4, sut.line_count());
    }

    #[test]
    fn la2_skips_crlf_pair() {
        let sut = sut("\r\nx");

        assert_eq!(LF, sut.next_char());
        assert_eq!(b'x', sut.la2_char());
    }

    #[test]
    fn marks_lexemes() {
        let mut sut = sut("foo bar");

        // No mark yet.
        assert_eq!(None, sut.read_marked_lexeme());

        sut.mark_lexeme();
        // Nothing consumed since the mark.
        assert_eq!(None, sut.read_marked_lexeme());

        sut.read_char();
        sut.read_char();
        sut.read_char();

        let lexeme = sut.read_marked_lexeme().unwrap();
        assert_eq!(b"foo", lexeme.as_bytes());

        // Mark is single-shot.
        sut.read_char();
        assert_eq!(None, sut.read_marked_lexeme());
    }

    #[test]
    fn marked_lexeme_with_control_char_is_none() {
        let mut sut = sut("a\tb");

        sut.mark_lexeme();
        sut.read_char();
        sut.read_char();
        sut.read_char();

        assert_eq!(None, sut.read_marked_lexeme());
    }

    #[test]
    fn provides_source_lines() {
        let sut = sut("first\r\nsecond\n\nfourth");

        assert_eq!(b"first", sut.source_for_line(1).unwrap().as_bytes());
        assert_eq!(b"second", sut.source_for_line(2).unwrap().as_bytes());
        assert_eq!(b"", sut.source_for_line(3).unwrap().as_bytes());
        assert_eq!(b"fourth", sut.source_for_line(4).unwrap().as_bytes());
        assert_eq!(None, sut.source_for_line(0));
        assert_eq!(None, sut.source_for_line(5));
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(
            Err(InfileError::Empty),
            Infile::from_bytes("e.mod", "").map(|_| ())
        );
    }

    #[test]
    fn rejects_oversized() {
        let big = vec![b'\n'; global::MAX_SOURCE_BYTES + 1];

        assert_eq!(
            Err(InfileError::FileTooLarge {
                size: global::MAX_SOURCE_BYTES as u64 + 1
            }),
            Infile::from_bytes("big.mod", big).map(|_| ())
        );
    }

    #[test]
    fn rejects_too_many_lines() {
        let lines = vec![b'\n'; global::MAX_SOURCE_LINES + 1];

        assert_eq!(
            Err(InfileError::TooManyLines {
                lines: global::MAX_SOURCE_LINES + 1
            }),
            Infile::from_bytes("lines.mod", lines).map(|_| ())
        );
    }

    #[test]
    fn rejects_long_line() {
        let mut src = b"ok\n".to_vec();
        src.extend(vec![b'x'; global::MAX_LINE_COLUMNS + 1]);

        assert_eq!(
            Err(InfileError::LineTooLong {
                line: 2,
                len: global::MAX_LINE_COLUMNS + 1
            }),
            Infile::from_bytes("long.mod", src).map(|_| ())
        );
    }

    struct StubFilesystem(Option<&'static [u8]>);

    impl Filesystem for StubFilesystem {
        fn file_exists(&self, _path: &Path) -> bool {
            self.0.is_some()
        }

        fn is_regular_file(&self, _path: &Path) -> bool {
            self.0.is_some()
        }

        fn file_size(&self, _path: &Path) -> Option<u64> {
            self.0.map(|bytes| bytes.len() as u64)
        }

        fn read_all(&self, _path: &Path) -> io::Result<Vec<u8>> {
            self.0
                .map(|bytes| bytes.to_vec())
                .ok_or_else(|| io::ErrorKind::NotFound.into())
        }

        fn current_working_directory(&self) -> Option<String> {
            None
        }
    }

    #[test]
    fn opens_through_filesystem() {
        let path = PathBuf::from("Stub.mod");

        let sut =
            Infile::open_in(&StubFilesystem(Some(b"MODULE")), &path).unwrap();
        assert_eq!("Stub.mod", sut.name());
        assert_eq!(b'M', sut.next_char());

        assert_eq!(
            Err(InfileError::FileNotFound),
            Infile::open_in(&StubFilesystem(None), &path).map(|_| ())
        );
    }

    #[test]
    fn maps_io_errors() {
        assert_eq!(
            InfileError::FileNotFound,
            io::Error::from(io::ErrorKind::NotFound).into()
        );
        assert_eq!(
            InfileError::AccessDenied,
            io::Error::from(io::ErrorKind::PermissionDenied).into()
        );
        assert_eq!(
            InfileError::Io(io::ErrorKind::InvalidData),
            io::Error::from(io::ErrorKind::InvalidData).into()
        );
    }
}
