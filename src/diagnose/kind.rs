// Classification of diagnostics
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

//! Kinds of diagnostics.
//!
//! Kinds are partitioned into contiguous ranges by the stage that reports
//!   them:
//!     command line options,
//!     lexical analysis,
//!     syntax analysis,
//!     and semantic analysis.
//! Semantic kinds are reserved for downstream stages and are never
//!   reported by the front end.

use super::Level;
use std::fmt::{self, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorKind {
    // Option errors.
    InvalidOption,
    InvalidArgument,
    MissingFilename,
    InvalidFilename,
    InputFileNotFound,
    InvalidFilenameSuffix,

    // Lexical warnings and errors.
    DisabledCodeSection,
    InvalidInputChar,
    EofInBlockComment,
    NewlineInString,
    EofInString,
    InvalidEscapeSequence,
    EofInPragma,
    MissingStringDelimiter,
    MissingSuffix,
    MissingExponent,

    // Syntax warnings and errors.
    UnexpectedToken,
    DuplicateIdentInIdentList,
    NestingTooDeep,
    SemicolonAfterFieldListSeq,
    EmptyFieldListSeq,
    SemicolonAfterFormalParamList,
    SemicolonAfterStmtSeq,
    EmptyStmtSeq,

    // Semantic errors.
    UndeclaredIdentifier,
    DuplicateDeclaration,
    IncompatibleTypes,
}

impl ErrorKind {
    pub fn is_option_error(self) -> bool {
        (Self::InvalidOption..=Self::InvalidFilenameSuffix).contains(&self)
    }

    pub fn is_lexical(self) -> bool {
        (Self::DisabledCodeSection..=Self::MissingExponent).contains(&self)
    }

    pub fn is_syntax(self) -> bool {
        (Self::UnexpectedToken..=Self::EmptyStmtSeq).contains(&self)
    }

    pub fn is_semantic(self) -> bool {
        self >= Self::UndeclaredIdentifier
    }

    pub fn level(self) -> Level {
        use ErrorKind::*;

        match self {
            DisabledCodeSection
            | SemicolonAfterFieldListSeq
            | EmptyFieldListSeq
            | SemicolonAfterFormalParamList
            | SemicolonAfterStmtSeq
            | EmptyStmtSeq => Level::Warning,
            _ => Level::Error,
        }
    }

    /// Canonical English message.
    pub fn message(self) -> &'static str {
        use ErrorKind::*;

        match self {
            InvalidOption => "invalid option",
            InvalidArgument => "invalid argument",
            MissingFilename => "missing filename",
            InvalidFilename => "invalid filename",
            InputFileNotFound => "input file not found",
            InvalidFilenameSuffix => "invalid filename suffix",

            DisabledCodeSection => "disabled code section",
            InvalidInputChar => "invalid character in input",
            EofInBlockComment => "premature end of file in block comment",
            NewlineInString => "new line in string literal",
            EofInString => "premature end of file in string literal",
            InvalidEscapeSequence => "invalid escape sequence",
            EofInPragma => "premature end of file in pragma",
            MissingStringDelimiter => "missing string delimiter",
            MissingSuffix => "missing suffix in number literal",
            MissingExponent => "missing exponent in real number literal",

            UnexpectedToken => "unexpected symbol",
            DuplicateIdentInIdentList => {
                "duplicate identifier in identifier list"
            }
            NestingTooDeep => "constructs nested too deeply",
            SemicolonAfterFieldListSeq => {
                "semicolon after field list sequence"
            }
            EmptyFieldListSeq => "empty field list sequence",
            SemicolonAfterFormalParamList => {
                "semicolon after formal parameter list"
            }
            SemicolonAfterStmtSeq => "semicolon after statement sequence",
            EmptyStmtSeq => "empty statement sequence",

            UndeclaredIdentifier => "undeclared identifier",
            DuplicateDeclaration => "duplicate declaration",
            IncompatibleTypes => "incompatible types",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
