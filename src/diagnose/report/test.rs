// Tests for diagnostic report rendering
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

use super::*;
use crate::diagnose::ErrorKind;
use crate::source::{Infile, NoSource, Pos};
use crate::test::init_sym;

fn render(verbose: bool, src: &str, diagnostic: Diagnostic) -> String {
    init_sym();

    let infile = Infile::from_bytes("test.mod", src).unwrap();
    let mut sut = VisualReporter::new(Vec::new(), verbose);

    sut.emit(&diagnostic, &infile);
    String::from_utf8(sut.into_inner().unwrap()).unwrap()
}

#[test]
fn terse_omits_source() {
    let given = Diagnostic::at(ErrorKind::InvalidInputChar, Pos::new(1, 3))
        .with_char(b'$');

    assert_eq!(
        "line 1, column 3, error: invalid character in input, \
         offending character: $\n",
        render(false, "ab$cd", given),
    );
}

#[test]
fn verbose_echoes_line_with_caret() {
    let given = Diagnostic::at(ErrorKind::InvalidInputChar, Pos::new(2, 3))
        .with_char(b'$');

    assert_eq!(
        "line 2, column 3, error: invalid character in input, \
         offending character: $\n\
         ab$cd\n  ^\n",
        render(true, "first\nab$cd\n", given),
    );
}

#[test]
fn caret_preserves_tabs() {
    let given = Diagnostic::at(ErrorKind::InvalidInputChar, Pos::new(1, 4))
        .with_char(b'$');

    assert_eq!(
        "line 1, column 4, error: invalid character in input, \
         offending character: $\n\
         \tx $\n\t  ^\n",
        render(true, "\tx $", given),
    );
}

#[test]
fn verbose_skips_echo_of_control_char() {
    let given = Diagnostic::at(ErrorKind::InvalidInputChar, Pos::new(1, 2))
        .with_char(0x07);

    assert_eq!(
        "line 1, column 2, error: invalid character in input, \
         offending character: 0x07\n",
        render(true, "a\x07b", given),
    );
}

#[test]
fn verbose_without_position_omits_source() {
    let mut sut = VisualReporter::new(Vec::new(), true);

    sut.emit(&Diagnostic::new(ErrorKind::MissingFilename), &NoSource);

    assert_eq!(
        b"error: missing filename\n".to_vec(),
        sut.into_inner().unwrap()
    );
}

#[test]
fn caret_indent_clamps_to_line() {
    assert_eq!("   ", caret_indent(b"abc", 10));
    assert_eq!("", caret_indent(b"abc", 1));
    assert_eq!("", caret_indent(b"abc", 0));
}

#[test]
fn collecting_reporter_retains_order() {
    let mut sut = CollectingReporter::new();

    sut.emit(&Diagnostic::new(ErrorKind::InvalidOption), &NoSource);
    sut.emit(&Diagnostic::new(ErrorKind::InvalidArgument), &NoSource);

    // Via a mutable reference, as the lexer holds it.
    fn emit_via<R: Reporter>(mut reporter: R, kind: ErrorKind) {
        reporter.emit(&Diagnostic::new(kind), &NoSource);
    }
    emit_via(&mut sut, ErrorKind::MissingFilename);

    assert_eq!(
        vec![
            ErrorKind::InvalidOption,
            ErrorKind::InvalidArgument,
            ErrorKind::MissingFilename
        ],
        sut.kinds()
    );
}

struct FailingWriter;

impl io::Write for FailingWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::ErrorKind::BrokenPipe.into())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn retains_write_failure() {
    let mut sut = VisualReporter::new(FailingWriter, false);

    sut.emit(&Diagnostic::new(ErrorKind::InvalidOption), &NoSource);

    assert_eq!(
        io::ErrorKind::BrokenPipe,
        sut.into_inner().map(|_| ()).unwrap_err().kind()
    );
}
