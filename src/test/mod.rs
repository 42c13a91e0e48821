// Helpers and stubs shared by tests
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

use crate::diagnose::{CollectingReporter, ErrorKind};
use crate::lexer::Lexer;
use crate::options::Options;
use crate::source::Infile;
use crate::sym::{self, InternError};
use crate::token::Token;

/// Initialise the interner of the current test thread.
///
/// Each test runs on its own thread and so gets its own repository;
///   initialising more than once within a test is harmless.
pub fn init_sym() {
    match sym::init(0) {
        Ok(()) | Err(InternError::AlreadyInitialised) => (),
        Err(e) => panic!("unable to initialise interner: {e}"),
    }
}

/// Lexer over the in-memory source `src`.
pub fn lexer<'a>(
    src: &str,
    options: Options,
    reporter: &'a mut CollectingReporter,
) -> Lexer<&'a mut CollectingReporter> {
    init_sym();

    let infile = Infile::from_bytes("test.mod", src)
        .expect("test source must be a valid infile");

    Lexer::new(infile, options, reporter)
}

/// Lex all of `src`,
///   yielding each token up to and including [`Token::EndOfFile`] with its
///   lexeme,
///   and the kinds of all diagnostics reported.
pub fn lex_all(
    src: &str,
    options: Options,
) -> (Vec<(Token, Option<String>)>, Vec<ErrorKind>) {
    let mut reporter = CollectingReporter::new();
    let mut lexer = lexer(src, options, &mut reporter);
    let mut syms = Vec::new();

    loop {
        let token = lexer.read_sym();
        let lexeme = lexer.current_lexeme().map(|l| l.to_string());

        syms.push((token, lexeme));

        if token == Token::EndOfFile {
            break;
        }
    }

    drop(lexer);
    (syms, reporter.kinds())
}

/// Ensures that tests will hit debug assertions.
///
/// Debug assertions are used to enforce invariants that would certainly be
///   hit by tests if violated,
///     and so have no need to be included in release builds.
///
/// If this test fails,
///   then optimization settings are inhibiting debug assertions.
/// See the documentation for [`debug_assert!`] for more information.
#[test]
#[should_panic]
fn uses_debug_assertions() {
    debug_assert!(false, "should panic");
}
