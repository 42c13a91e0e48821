// Diagnostic system
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

//! Diagnostic system for error reporting.
//!
//! Problems found in user input are not [`Result`] errors:
//!   the lexer and parser describe each one as a [`Diagnostic`] value,
//!     hand it to a [`Reporter`],
//!     count it,
//!     and carry on.
//! A [`Diagnostic`] is classified by an [`ErrorKind`],
//!   which determines its [`Level`] and canonical message,
//!   and optionally carries a source position and a [`Detail`] describing
//!   what was offending.
//!
//! The rendered form of a diagnostic is
//!
//! ```text
//! line <L>, column <C>, <level>: <message>[, offending <kind>: <lexeme>]
//!   expected <token or set>
//! ```
//!
//! [`VisualReporter`] additionally echoes the offending source line with a
//!   caret beneath the offending column when verbose.

mod kind;
mod report;

pub use kind::ErrorKind;
pub use report::{CollectingReporter, Reporter, VisualReporter};

use crate::fmt::{DisplayWrapper, Raw, Tt};
use crate::global::SourcePosSize;
use crate::source::Pos;
use crate::sym::Symbol;
use crate::token::{Token, TokenSet};
use std::fmt::{self, Display};

/// Diagnostic severity level.
///
/// Lower levels are more severe.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub enum Level {
    /// A user-resolvable error.
    ///
    /// Any error causes processing of the compilation unit to fail,
    ///   though processing continues so that further errors may be
    ///   reported.
    Error,

    /// A suspicious construct that does not prevent processing.
    Warning,
}

impl Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Warning => write!(f, "warning"),
        }
    }
}

/// What was expected in place of an unexpected symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expected {
    Token(Token),
    Set(TokenSet),
}

impl Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token(token) => Display::fmt(token, f),
            Self::Set(set) => Display::fmt(&set.enumerate(), f),
        }
    }
}

/// Supplemental information identifying the offending input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detail {
    None,

    /// Offending command line argument or file name.
    Text(String),

    /// Offending source character.
    Char(u8),

    /// Offending lexeme.
    Lexeme(Symbol),

    /// Range of source lines affected.
    Lines {
        first: SourcePosSize,
        last: SourcePosSize,
    },

    /// A symbol that does not fit the grammar where it was found.
    Unexpected {
        found: Token,
        lexeme: Option<Symbol>,
        expected: Expected,
    },
}

/// A single reported problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: ErrorKind,
    pub pos: Option<Pos>,
    pub detail: Detail,
}

impl Diagnostic {
    /// Diagnostic without position or detail.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            pos: None,
            detail: Detail::None,
        }
    }

    /// Diagnostic at the given source position.
    pub fn at(kind: ErrorKind, pos: Pos) -> Self {
        Self {
            pos: Some(pos),
            ..Self::new(kind)
        }
    }

    pub fn with_detail(self, detail: Detail) -> Self {
        Self { detail, ..self }
    }

    pub fn with_text<S: Into<String>>(self, text: S) -> Self {
        self.with_detail(Detail::Text(text.into()))
    }

    pub fn with_char(self, c: u8) -> Self {
        self.with_detail(Detail::Char(c))
    }

    /// Attach an offending lexeme,
    ///   if there is one.
    pub fn with_lexeme(self, lexeme: Option<Symbol>) -> Self {
        match lexeme {
            Some(sym) => self.with_detail(Detail::Lexeme(sym)),
            None => self,
        }
    }

    /// Unexpected `found` where a single `expected` token was required.
    pub fn unexpected_token(
        pos: Pos,
        found: Token,
        lexeme: Option<Symbol>,
        expected: Token,
    ) -> Self {
        Self::at(ErrorKind::UnexpectedToken, pos).with_detail(
            Detail::Unexpected {
                found,
                lexeme,
                expected: Expected::Token(expected),
            },
        )
    }

    /// Unexpected `found` where any member of `expected` was required.
    pub fn unexpected_set(
        pos: Pos,
        found: Token,
        lexeme: Option<Symbol>,
        expected: &TokenSet,
    ) -> Self {
        // A singleton set reads better as a single token.
        let expected = match expected.count() {
            1 => expected
                .iter()
                .next()
                .map_or_else(
                    || Expected::Set(expected.clone()),
                    Expected::Token,
                ),
            _ => Expected::Set(expected.clone()),
        };

        Self::at(ErrorKind::UnexpectedToken, pos).with_detail(
            Detail::Unexpected {
                found,
                lexeme,
                expected,
            },
        )
    }

    #[inline]
    pub fn level(&self) -> Level {
        self.kind.level()
    }

    /// Whether the offending input is a control character,
    ///   which must not be echoed to the terminal.
    pub fn is_control_char(&self) -> bool {
        matches!(self.detail, Detail::Char(c) if c < 0x20 || c == 0x7F)
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(pos) = self.pos {
            write!(f, "{pos}, ")?;
        }

        write!(f, "{}: {}", self.level(), self.kind)?;

        match &self.detail {
            Detail::None => Ok(()),
            Detail::Text(text) => write!(f, ": {text}"),
            Detail::Char(c) if (0x20..0x7F).contains(c) => {
                write!(f, ", offending character: {}", *c as char)
            }
            Detail::Char(c) => {
                write!(f, ", offending character: 0x{c:02X}")
            }
            Detail::Lexeme(sym) => write!(f, ", offending lexeme: {sym}"),
            Detail::Lines { first, last } => {
                write!(f, " spanning lines {first} to {last}")
            }
            Detail::Unexpected {
                found,
                lexeme,
                expected,
            } => {
                write!(f, ", offending {}", found.category())?;

                match (lexeme, found.lexeme()) {
                    (Some(sym), _) => write!(f, ": {}", Tt::<Raw>::wrap(sym))?,
                    (None, Some(text)) => {
                        write!(f, ": {}", Tt::<Raw>::wrap(text))?
                    }
                    (None, None) => (),
                }

                write!(f, "\n  expected {expected}")
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::init_sym;

    #[test]
    fn bare() {
        assert_eq!(
            "error: missing filename",
            Diagnostic::new(ErrorKind::MissingFilename).to_string()
        );
    }

    #[test]
    fn with_text() {
        assert_eq!(
            "error: invalid option: --foo",
            Diagnostic::new(ErrorKind::InvalidOption)
                .with_text("--foo")
                .to_string()
        );
    }

    #[test]
    fn with_printable_and_control_chars() {
        let pos = Pos::new(3, 7);

        let printable =
            Diagnostic::at(ErrorKind::InvalidInputChar, pos).with_char(b'$');
        assert_eq!(
            "line 3, column 7, error: invalid character in input, \
             offending character: $",
            printable.to_string()
        );
        assert!(!printable.is_control_char());

        let control =
            Diagnostic::at(ErrorKind::InvalidInputChar, pos).with_char(0x01);
        assert_eq!(
            "line 3, column 7, error: invalid character in input, \
             offending character: 0x01",
            control.to_string()
        );
        assert!(control.is_control_char());
    }

    #[test]
    fn with_line_range() {
        assert_eq!(
            "line 2, column 1, warning: disabled code section \
             spanning lines 2 to 4",
            Diagnostic::at(ErrorKind::DisabledCodeSection, Pos::new(2, 1))
                .with_detail(Detail::Lines { first: 2, last: 4 })
                .to_string()
        );
    }

    #[test]
    fn unexpected_token_expected_token() {
        init_sym();
        let lexeme = crate::sym::intern(b"foo").ok();

        assert_eq!(
            "line 1, column 9, error: unexpected symbol, \
             offending identifier: `foo`\n  expected `;`",
            Diagnostic::unexpected_token(
                Pos::new(1, 9),
                Token::Identifier,
                lexeme,
                Token::Semicolon,
            )
            .to_string()
        );
    }

    #[test]
    fn unexpected_token_expected_set() {
        let expected = TokenSet::from_tokens(&[
            Token::Begin,
            Token::End,
            Token::Semicolon,
        ]);

        assert_eq!(
            "line 4, column 1, error: unexpected symbol, \
             offending end of file\n  expected `BEGIN`, `END`, or `;`",
            Diagnostic::unexpected_set(
                Pos::new(4, 1),
                Token::EndOfFile,
                None,
                &expected,
            )
            .to_string()
        );
    }

    #[test]
    fn unexpected_reserved_word_uses_fixed_text() {
        let expected = TokenSet::from_tokens(&[Token::Period]);

        let sut = Diagnostic::unexpected_set(
            Pos::new(1, 1),
            Token::Begin,
            None,
            &expected,
        );

        assert_eq!(
            "line 1, column 1, error: unexpected symbol, \
             offending reserved word: `BEGIN`\n  expected `.`",
            sut.to_string()
        );
        assert!(matches!(
            sut.detail,
            Detail::Unexpected {
                expected: Expected::Token(Token::Period),
                ..
            }
        ));
    }
}
