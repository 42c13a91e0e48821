// Modula-2 terminal symbols
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

//! Terminal symbols of the Modula-2 grammar.
//!
//! [`Token`] is a closed enumeration whose declaration order is
//!   significant:
//!     reserved words, literals, malformed literals and special symbols
//!     each occupy a contiguous range,
//!       so that classification is a simple range test.
//! The discriminant of each token is also its index within a
//!   [`TokenSet`].

mod set;

pub use set::TokenSet;

use crate::fmt::{DisplayWrapper, Raw, Tt};
use std::fmt::{self, Display};

/// A terminal symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Token {
    Unknown,

    // Reserved words.
    And,
    Array,
    Begin,
    By,
    Case,
    Const,
    Definition,
    Div,
    Do,
    Else,
    Elsif,
    End,
    Exit,
    Export,
    For,
    From,
    If,
    Implementation,
    Import,
    In,
    Loop,
    Mod,
    Module,
    Not,
    Of,
    Or,
    Pointer,
    Procedure,
    Qualified,
    Record,
    Repeat,
    Return,
    Set,
    Then,
    To,
    Type,
    Until,
    Var,
    While,
    With,

    Identifier,

    // Literals.
    String,
    Integer,
    Real,
    Char,

    MalformedString,
    MalformedInteger,
    MalformedReal,

    Pragma,

    // Special symbols.
    Equal,
    NotEqual,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    Plus,
    Minus,
    Asterisk,
    Solidus,
    Assign,
    Comma,
    Period,
    Colon,
    Semicolon,
    Range,
    Deref,
    Bar,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,

    EndOfFile,
}

impl Token {
    /// Number of tokens.
    pub const COUNT: usize = Self::EndOfFile as usize + 1;

    /// Every token in declaration order.
    pub const ALL: [Token; Self::COUNT] = {
        use Token::*;
        [
            Unknown, And, Array, Begin, By, Case, Const, Definition, Div, Do,
            Else, Elsif, End, Exit, Export, For, From, If, Implementation,
            Import, In, Loop, Mod, Module, Not, Of, Or, Pointer, Procedure,
            Qualified, Record, Repeat, Return, Set, Then, To, Type, Until,
            Var, While, With, Identifier, String, Integer, Real, Char,
            MalformedString, MalformedInteger, MalformedReal, Pragma, Equal,
            NotEqual, Less, LessOrEqual, Greater, GreaterOrEqual, Plus,
            Minus, Asterisk, Solidus, Assign, Comma, Period, Colon,
            Semicolon, Range, Deref, Bar, LParen, RParen, LBracket,
            RBracket, LBrace, RBrace, EndOfFile,
        ]
    };

    /// Index of this token within [`Token::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Token at `index` within [`Token::ALL`],
    ///   if any.
    #[inline]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[inline]
    pub fn is_reserved_word(self) -> bool {
        (Self::And..=Self::With).contains(&self)
    }

    #[inline]
    pub fn is_identifier(self) -> bool {
        self == Self::Identifier
    }

    /// Whether this is a literal,
    ///   including malformed literals.
    #[inline]
    pub fn is_literal(self) -> bool {
        (Self::String..=Self::MalformedReal).contains(&self)
    }

    #[inline]
    pub fn is_malformed_literal(self) -> bool {
        (Self::MalformedString..=Self::MalformedReal).contains(&self)
    }

    #[inline]
    pub fn is_special_symbol(self) -> bool {
        (Self::Equal..=Self::RBrace).contains(&self)
    }

    /// Fixed source text of reserved words and special symbols.
    pub fn lexeme(self) -> Option<&'static str> {
        use Token::*;

        Some(match self {
            And => "AND",
            Array => "ARRAY",
            Begin => "BEGIN",
            By => "BY",
            Case => "CASE",
            Const => "CONST",
            Definition => "DEFINITION",
            Div => "DIV",
            Do => "DO",
            Else => "ELSE",
            Elsif => "ELSIF",
            End => "END",
            Exit => "EXIT",
            Export => "EXPORT",
            For => "FOR",
            From => "FROM",
            If => "IF",
            Implementation => "IMPLEMENTATION",
            Import => "IMPORT",
            In => "IN",
            Loop => "LOOP",
            Mod => "MOD",
            Module => "MODULE",
            Not => "NOT",
            Of => "OF",
            Or => "OR",
            Pointer => "POINTER",
            Procedure => "PROCEDURE",
            Qualified => "QUALIFIED",
            Record => "RECORD",
            Repeat => "REPEAT",
            Return => "RETURN",
            Set => "SET",
            Then => "THEN",
            To => "TO",
            Type => "TYPE",
            Until => "UNTIL",
            Var => "VAR",
            While => "WHILE",
            With => "WITH",

            Equal => "=",
            NotEqual => "#",
            Less => "<",
            LessOrEqual => "<=",
            Greater => ">",
            GreaterOrEqual => ">=",
            Plus => "+",
            Minus => "-",
            Asterisk => "*",
            Solidus => "/",
            Assign => ":=",
            Comma => ",",
            Period => ".",
            Colon => ":",
            Semicolon => ";",
            Range => "..",
            Deref => "^",
            Bar => "|",
            LParen => "(",
            RParen => ")",
            LBracket => "[",
            RBracket => "]",
            LBrace => "{",
            RBrace => "}",

            _ => return None,
        })
    }

    /// Human-readable class of this token,
    ///   as used in diagnostics.
    pub fn category(self) -> &'static str {
        use Token::*;

        match self {
            Unknown => "unknown symbol",
            t if t.is_reserved_word() => "reserved word",
            Identifier => "identifier",
            String => "string",
            Integer => "integer",
            Real => "real number",
            Char => "character code",
            MalformedString => "malformed string",
            MalformedInteger => "malformed integer",
            MalformedReal => "malformed real number",
            Pragma => "pragma",
            EndOfFile => "end of file",
            _ => "special symbol",
        }
    }
}

impl Display for Token {
    /// Tokens with fixed source text are rendered as that text in
    ///   backticks;
    ///     all others are rendered as their category.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.lexeme() {
            Some(lexeme) => Tt::<Raw>::fmt(lexeme, f),
            None => f.write_str(self.category()),
        }
    }
}

/// Reserved word spelled by `lexeme`,
///   or [`Token::Unknown`] if it is not a reserved word.
///
/// Reserved words are upper case and between 2 and 14 characters long;
///   anything else is rejected without comparison.
pub fn token_for_resword(lexeme: &[u8]) -> Token {
    use Token::*;

    match lexeme {
        b"AND" => And,
        b"ARRAY" => Array,
        b"BEGIN" => Begin,
        b"BY" => By,
        b"CASE" => Case,
        b"CONST" => Const,
        b"DEFINITION" => Definition,
        b"DIV" => Div,
        b"DO" => Do,
        b"ELSE" => Else,
        b"ELSIF" => Elsif,
        b"END" => End,
        b"EXIT" => Exit,
        b"EXPORT" => Export,
        b"FOR" => For,
        b"FROM" => From,
        b"IF" => If,
        b"IMPLEMENTATION" => Implementation,
        b"IMPORT" => Import,
        b"IN" => In,
        b"LOOP" => Loop,
        b"MOD" => Mod,
        b"MODULE" => Module,
        b"NOT" => Not,
        b"OF" => Of,
        b"OR" => Or,
        b"POINTER" => Pointer,
        b"PROCEDURE" => Procedure,
        b"QUALIFIED" => Qualified,
        b"RECORD" => Record,
        b"REPEAT" => Repeat,
        b"RETURN" => Return,
        b"SET" => Set,
        b"THEN" => Then,
        b"TO" => To,
        b"TYPE" => Type,
        b"UNTIL" => Until,
        b"VAR" => Var,
        b"WHILE" => While,
        b"WITH" => With,
        _ => Unknown,
    }
}
