// Lexer and parser debug traces
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

//! Tracing for lexing and parsing operations.
//!
//! This provides human-readable traces on standard error any time the
//!   lexer produces a symbol (with `--lexer-debug`) or the parser enters a
//!   production (with `--parser-debug`).
//!
//! Parser traces can also be forced on at configuration-time using the
//!   `parser-trace-stderr` feature flag,
//!     regardless of options.
//!
//! _These traces are not meant to be machine-readable!_
//! Do not try to use the human-readable traces in that way since the format
//!   is subject to change without notice.

use crate::grammar::Production;
use crate::lexer::Sym;

pub trait Trace {
    /// Trace a symbol that has just become the lexer's lookahead.
    ///
    /// There is no means to return an error and a failure to output the
    ///   trace should not interrupt processing.
    fn trace_sym(&mut self, sym: &Sym);

    /// Trace entry into the production `p` with lookahead `la`.
    fn trace_production(&mut self, p: Production, la: &Sym);
}

/// Perform no tracing.
///
/// This should be used by default,
///   since tracing can incur a significant performance cost.
#[derive(Debug, PartialEq, Default)]
pub struct VoidTrace;

impl Trace for VoidTrace {
    fn trace_sym(&mut self, _sym: &Sym) {
        // Do nothing at all.
    }

    fn trace_production(&mut self, _p: Production, _la: &Sym) {
        // Do nothing at all.
    }
}

/// Human-readable [`Trace`] on standard error.
///
/// See [module-level](self) documentation for more information.
#[derive(Debug, PartialEq, Default)]
pub struct HumanReadableTrace;

impl Trace for HumanReadableTrace {
    fn trace_sym(&mut self, sym: &Sym) {
        eprint!("{}", sym_line(sym));
    }

    fn trace_production(&mut self, p: Production, la: &Sym) {
        eprint!("{}", production_line(p, la));
    }
}

fn sym_line(sym: &Sym) -> String {
    format!("[Lexer::read_sym] {sym}\n")
}

fn production_line(p: Production, la: &Sym) -> String {
    format!("[Parser::{p}] lookahead {la}\n")
}

/// Lexer trace selected by the `lexer-debug` flag.
pub fn lexer_trace(enabled: bool) -> Box<dyn Trace> {
    if enabled {
        Box::new(HumanReadableTrace)
    } else {
        Box::new(VoidTrace)
    }
}

/// Parser trace selected by the `parser-debug` flag,
///   or forced by the `parser-trace-stderr` feature.
pub fn parser_trace(enabled: bool) -> Box<dyn Trace> {
    if enabled || cfg!(feature = "parser-trace-stderr") {
        Box::new(HumanReadableTrace)
    } else {
        Box::new(VoidTrace)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::source::Pos;
    use crate::sym;
    use crate::test::init_sym;
    use crate::token::Token;

    #[test]
    fn formats_symbol() {
        init_sym();

        let foo = sym::intern(b"Foo").ok();
        let sym = Sym::new(Token::Identifier, Pos::new(3, 5), foo);

        assert_eq!(
            "[Lexer::read_sym] identifier \"Foo\" at 3:5\n",
            sym_line(&sym)
        );
    }

    #[test]
    fn formats_production() {
        let sym = Sym::new(Token::Begin, Pos::new(1, 1), None);

        assert_eq!(
            "[Parser::statementSequence] lookahead `BEGIN` at 1:1\n",
            production_line(Production::StatementSequence, &sym),
        );
    }
}
