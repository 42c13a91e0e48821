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

//! Front end of a compiler for Modula-2 as described in Wirth's
//!   _Programming in Modula-2_ (PIM),
//!     third and fourth editions.
//!
//! A source file is read into an [`Infile`](source::Infile),
//!   tokenised by the [`Lexer`](lexer::Lexer)
//!   and parsed by the [`Parser`](parse::Parser) into an
//!   [`AstNode`](ast::AstNode) tree.
//! Lexemes are interned as [`Symbol`](sym::Symbol)s and problems are
//!   reported as [`Diagnostic`](diagnose::Diagnostic)s,
//!     neither of which aborts processing.
//! The accepted language is configured by [`Options`](options::Options).
//!
//! Most callers need only [`parse::parse_file`].

#![allow(rustdoc::private_intra_doc_links)]

pub mod global;

#[macro_use]
extern crate static_assertions;

pub mod ast;
pub mod diagnose;
pub mod fmt;
pub mod fs;
pub mod grammar;
pub mod lexer;
pub mod options;
pub mod parse;
pub mod source;
pub mod sym;
pub mod token;
pub mod trace;

#[cfg(test)]
pub mod test;
