// Modula-2 lexer
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

//! Lexical analysis of Modula-2 source files.
//!
//! The [`Lexer`] reads an [`Infile`] and produces [`Sym`]bols on demand.
//! It holds two symbols:
//!   the _current_ symbol,
//!     which is the one most recently consumed;
//!   and the _lookahead_ symbol,
//!     which is the next one to be consumed.
//! The lookahead is scanned as soon as the current symbol is consumed,
//!   so that it is always available to the parser.
//!
//! Which constructs are recognized depends on the dialect [`Options`]:
//!
//!   - `synonyms` admits `&`, `~` and `<>` for `AND`, `NOT` and `#`;
//!   - `line-comments` admits comments from `!` to the end of the line;
//!   - `lowline-identifiers` admits `_` between alphanumerics in
//!       identifiers;
//!   - `escape-tab-and-newline` requires every backslash in a string
//!       literal to introduce one of `\n`, `\t` or `\\`;
//!   - `prefix-literals` selects number literals of the form `0x7F` and
//!       `0u7F` over the suffixed forms `7FH`, `177B` and `177C`;
//!         and
//!   - `octal-literals` admits the octal suffixes `B` and `C`.
//!
//! Lexical errors are reported in place and scanning continues.
//! Literals that cannot be completed are yielded as malformed literal
//!   tokens,
//!     so that the parser can accept them without reporting further
//!     errors.

use crate::diagnose::{Detail, Diagnostic, ErrorKind, Level, Reporter};
use crate::global::SourcePosSize;
use crate::options::{Flag, Options};
use crate::source::{Infile, InfileError, Pos, EOT, LF, TAB};
use crate::sym::{self, Symbol};
use crate::token::{token_for_resword, Token};
use crate::trace::{self, Trace};
use std::fmt::{self, Display};
use std::mem;
use std::path::Path;

/// A terminal symbol together with its position and lexeme.
///
/// Identifiers,
///   literals
///   and pragmas carry their lexeme;
///     other symbols are fully described by their [`Token`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sym {
    pub token: Token,
    pub pos: Pos,
    pub lexeme: Option<Symbol>,
}

impl Sym {
    pub fn new(token: Token, pos: Pos, lexeme: Option<Symbol>) -> Self {
        Self { token, pos, lexeme }
    }

    /// Placeholder before any symbol has been read.
    fn none() -> Self {
        Self::new(Token::Unknown, Pos::new(0, 0), None)
    }
}

impl Display for Sym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.lexeme {
            Some(lexeme) => write!(f, "{} \"{lexeme}\"", self.token)?,
            None => Display::fmt(&self.token, f)?,
        }

        write!(f, " at {}:{}", self.pos.line, self.pos.col)
    }
}

/// Scanner for number literals,
///   selected once from the options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberScanner {
    /// `0x7F`, `0u7F`, `127`, `1.5E3`.
    Prefix,

    /// `7FH`, `177B`, `177C`, `127`, `1.5E3`.
    Suffix { octal: bool },
}

impl NumberScanner {
    fn for_options(options: &Options) -> Self {
        if options.get(Flag::PrefixLiterals) {
            Self::Prefix
        } else {
            Self::Suffix {
                octal: options.get(Flag::OctalLiterals),
            }
        }
    }
}

pub struct Lexer<R: Reporter> {
    infile: Infile,
    options: Options,
    scanner: NumberScanner,

    /// Most recently consumed symbol.
    current: Sym,

    /// Next symbol to be consumed.
    lookahead: Sym,

    warnings: usize,
    errors: usize,

    reporter: R,
    trace: Box<dyn Trace>,
}

impl<R: Reporter> Lexer<R> {
    /// Open the source file at `path` for lexing.
    pub fn open<P: AsRef<Path>>(
        path: P,
        options: Options,
        reporter: R,
    ) -> Result<Self, InfileError> {
        Ok(Self::new(Infile::open(path)?, options, reporter))
    }

    /// Lex `infile`,
    ///   scanning its first symbol immediately.
    pub fn new(infile: Infile, options: Options, reporter: R) -> Self {
        let mut lexer = Self {
            infile,
            options,
            scanner: NumberScanner::for_options(&options),
            current: Sym::none(),
            lookahead: Sym::none(),
            warnings: 0,
            errors: 0,
            reporter,
            trace: trace::lexer_trace(options.get(Flag::LexerDebug)),
        };

        lexer.lookahead = lexer.scan();
        lexer
    }

    /// Consume the lookahead symbol and return its token.
    ///
    /// The consumed symbol becomes the current symbol,
    ///   releasing the lexeme of the previous one.
    /// At the end of the file this yields [`Token::EndOfFile`]
    ///   indefinitely.
    pub fn read_sym(&mut self) -> Token {
        let next = self.scan();
        self.current = mem::replace(&mut self.lookahead, next);
        self.current.token
    }

    /// Token of the lookahead symbol.
    #[inline]
    pub fn next_sym(&self) -> Token {
        self.lookahead.token
    }

    /// Consume the lookahead symbol and return the token of the new
    ///   lookahead.
    #[inline]
    pub fn consume_sym(&mut self) -> Token {
        self.read_sym();
        self.next_sym()
    }

    #[inline]
    pub fn lookahead(&self) -> &Sym {
        &self.lookahead
    }

    #[inline]
    pub fn current(&self) -> &Sym {
        &self.current
    }

    pub fn lookahead_lexeme(&self) -> Option<&Symbol> {
        self.lookahead.lexeme.as_ref()
    }

    pub fn current_lexeme(&self) -> Option<&Symbol> {
        self.current.lexeme.as_ref()
    }

    pub fn lookahead_line(&self) -> SourcePosSize {
        self.lookahead.pos.line
    }

    pub fn lookahead_col(&self) -> SourcePosSize {
        self.lookahead.pos.col
    }

    pub fn current_line(&self) -> SourcePosSize {
        self.current.pos.line
    }

    pub fn current_col(&self) -> SourcePosSize {
        self.current.pos.col
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn filename(&self) -> &str {
        self.infile.name()
    }

    /// Number of lines of the source file.
    pub fn line_count(&self) -> usize {
        self.infile.line_count()
    }

    /// Number of lexical warnings reported so far.
    pub fn warning_count(&self) -> usize {
        self.warnings
    }

    /// Number of lexical errors reported so far.
    pub fn error_count(&self) -> usize {
        self.errors
    }

    /// Emit a diagnostic to the reporter without counting it,
    ///   with the source file available for echo.
    pub fn emit(&mut self, diagnostic: &Diagnostic) {
        self.reporter.emit(diagnostic, &self.infile);
    }

    /// Close the source file and yield the reporter.
    pub fn release(self) -> R {
        self.reporter
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic.level() {
            Level::Error => self.errors += 1,
            Level::Warning => self.warnings += 1,
        }

        self.emit(&diagnostic);
    }

    fn invalid_char(&mut self, c: u8, pos: Pos) {
        self.report(
            Diagnostic::at(ErrorKind::InvalidInputChar, pos).with_char(c),
        );
    }

    /// Scan the next symbol,
    ///   skipping whitespace,
    ///   comments,
    ///   disabled code sections
    ///   and invalid characters.
    fn scan(&mut self) -> Sym {
        let sym = loop {
            let mut c = self.infile.next_char();

            while c == b' ' || c == TAB || c == LF {
                c = self.infile.consume_char();
            }

            let pos = self.infile.pos();
            let next = self.infile.la2_char();
            let synonyms = self.options.get(Flag::Synonyms);

            let (token, lexeme) = match c {
                EOT if self.infile.is_past_eof() => (Token::EndOfFile, None),

                b'!' if self.options.get(Flag::LineComments) => {
                    self.skip_line_comment();
                    continue;
                }

                b'"' | b'\'' => self.get_string(pos),
                b'#' => self.single(Token::NotEqual),
                b'&' if synonyms => self.single(Token::And),

                b'(' if next == b'*' => {
                    self.skip_block_comment(pos);
                    continue;
                }
                b'(' => self.single(Token::LParen),
                b')' => self.single(Token::RParen),
                b'*' => self.single(Token::Asterisk),
                b'+' => self.single(Token::Plus),
                b',' => self.single(Token::Comma),
                b'-' => self.single(Token::Minus),
                b'.' if next == b'.' => self.double(Token::Range),
                b'.' => self.single(Token::Period),
                b'/' => self.single(Token::Solidus),

                b'0'..=b'9' => self.get_number(pos),

                b':' if next == b'=' => self.double(Token::Assign),
                b':' => self.single(Token::Colon),
                b';' => self.single(Token::Semicolon),
                b'<' if next == b'*' => self.get_pragma(pos),
                b'<' if next == b'>' && synonyms => {
                    self.double(Token::NotEqual)
                }
                b'<' if next == b'>' => {
                    self.infile.read_char();
                    self.invalid_char(next, self.infile.pos());
                    self.infile.read_char();
                    continue;
                }
                b'<' if next == b'=' => self.double(Token::LessOrEqual),
                b'<' => self.single(Token::Less),
                b'=' => self.single(Token::Equal),
                b'>' if next == b'=' => self.double(Token::GreaterOrEqual),
                b'>' => self.single(Token::Greater),

                b'?' if pos.col == 1 && next == b'<' => {
                    self.skip_disabled_code(pos);
                    continue;
                }

                b'A'..=b'Z' | b'a'..=b'z' => self.get_ident_or_resword(),

                b'[' => self.single(Token::LBracket),
                b']' => self.single(Token::RBracket),
                b'^' => self.single(Token::Deref),
                b'{' => self.single(Token::LBrace),
                b'|' => self.single(Token::Bar),
                b'}' => self.single(Token::RBrace),
                b'~' if synonyms => self.single(Token::Not),

                _ => {
                    self.invalid_char(c, pos);
                    self.infile.consume_char();
                    continue;
                }
            };

            break Sym::new(token, pos, lexeme);
        };

        self.trace.trace_sym(&sym);
        sym
    }

    fn single(&mut self, token: Token) -> (Token, Option<Symbol>) {
        self.infile.read_char();
        (token, None)
    }

    fn double(&mut self, token: Token) -> (Token, Option<Symbol>) {
        self.infile.read_char();
        self.infile.read_char();
        (token, None)
    }

    fn get_ident_or_resword(&mut self) -> (Token, Option<Symbol>) {
        let lowline = self.options.get(Flag::LowlineInIdentifiers);
        let mut all_upper = true;

        self.infile.mark_lexeme();
        let mut c = self.infile.next_char();

        loop {
            if c.is_ascii_alphanumeric() {
                all_upper &= !c.is_ascii_lowercase();
            } else if lowline
                && c == b'_'
                && self.infile.la2_char().is_ascii_alphanumeric()
            {
                all_upper = false;
            } else {
                break;
            }

            c = self.infile.consume_char();
        }

        let lexeme = self.infile.read_marked_lexeme();

        if all_upper {
            let resword = lexeme
                .as_ref()
                .map_or(Token::Unknown, |l| token_for_resword(l.as_bytes()));

            if resword.is_reserved_word() {
                return (resword, None);
            }
        }

        (Token::Identifier, lexeme)
    }

    /// Scan a string literal delimited by the lookahead quote.
    ///
    /// The lexeme excludes the delimiters.
    /// A string that is not closed on the same line yields
    ///   [`Token::MalformedString`].
    fn get_string(&mut self, start: Pos) -> (Token, Option<Symbol>) {
        let delimiter = self.infile.read_char();
        let escapes = self.options.get(Flag::EscapeTabAndNewline);
        let mut len = 0;

        self.infile.mark_lexeme();
        let mut c = self.infile.next_char();

        let cause = loop {
            match c {
                _ if c == delimiter => break None,
                LF => break Some(ErrorKind::NewlineInString),
                EOT if self.infile.is_past_eof() => {
                    break Some(ErrorKind::EofInString)
                }
                b'\\' if escapes => {
                    if matches!(self.infile.la2_char(), b'n' | b't' | b'\\') {
                        self.infile.read_char();
                        len += 1;
                    } else {
                        self.report(Diagnostic::at(
                            ErrorKind::InvalidEscapeSequence,
                            self.infile.pos(),
                        ));
                    }
                }
                0x20..=0x7E => (),
                _ => self.invalid_char(c, self.infile.pos()),
            }

            c = self.infile.consume_char();
            len += 1;
        };

        let lexeme = match len {
            0 => sym::intern(b"").ok(),
            _ => self.infile.read_marked_lexeme(),
        };

        match cause {
            None => {
                self.infile.read_char();
                (Token::String, lexeme)
            }
            Some(cause) => {
                self.report(Diagnostic::at(cause, self.infile.pos()));
                self.report(
                    Diagnostic::at(ErrorKind::MissingStringDelimiter, start)
                        .with_lexeme(lexeme.clone()),
                );

                (Token::MalformedString, lexeme)
            }
        }
    }

    /// Report control characters and non-ASCII bytes within comments.
    fn check_comment_char(&mut self, c: u8) {
        if !(c == TAB || c == LF || (0x20..=0x7E).contains(&c)) {
            self.invalid_char(c, self.infile.pos());
        }
    }

    fn skip_line_comment(&mut self) {
        let mut c = self.infile.consume_char();

        while c != LF && !(c == EOT && self.infile.is_past_eof()) {
            self.check_comment_char(c);
            c = self.infile.consume_char();
        }
    }

    /// Skip a block comment,
    ///   including any comments nested within it.
    fn skip_block_comment(&mut self, start: Pos) {
        let mut depth = 0usize;
        let mut c = self.infile.next_char();

        loop {
            match (c, self.infile.la2_char()) {
                (b'(', b'*') => {
                    depth += 1;
                    self.infile.read_char();
                }
                (b'*', b')') => {
                    self.infile.read_char();
                    self.infile.read_char();

                    depth -= 1;
                    if depth == 0 {
                        return;
                    }

                    c = self.infile.next_char();
                    continue;
                }
                (EOT, _) if self.infile.is_past_eof() => {
                    self.report(Diagnostic::at(
                        ErrorKind::EofInBlockComment,
                        start,
                    ));
                    return;
                }
                _ => self.check_comment_char(c),
            }

            c = self.infile.consume_char();
        }
    }

    /// Scan a pragma,
    ///   whose lexeme is the body between `<*` and `*>`.
    fn get_pragma(&mut self, start: Pos) -> (Token, Option<Symbol>) {
        self.infile.read_char();
        self.infile.read_char();
        self.infile.mark_lexeme();

        let mut c = self.infile.next_char();

        loop {
            match (c, self.infile.la2_char()) {
                (b'*', b'>') => {
                    let lexeme = self.infile.read_marked_lexeme();
                    self.infile.read_char();
                    self.infile.read_char();

                    return (Token::Pragma, lexeme);
                }
                (EOT, _) if self.infile.is_past_eof() => {
                    self.report(Diagnostic::at(ErrorKind::EofInPragma, start));

                    return (Token::Pragma, self.infile.read_marked_lexeme());
                }
                (0x20..=0x7E, _) => (),
                _ => self.invalid_char(c, self.infile.pos()),
            }

            c = self.infile.consume_char();
        }
    }

    /// Skip a disabled code section from `?<` to `>?`,
    ///   each of which must begin in the first column.
    fn skip_disabled_code(&mut self, start: Pos) {
        self.infile.read_char();
        self.infile.read_char();

        loop {
            let c = self.infile.next_char();

            if c == EOT && self.infile.is_past_eof() {
                break;
            }

            if c == b'>'
                && self.infile.col() == 1
                && self.infile.la2_char() == b'?'
            {
                self.infile.read_char();
                self.infile.read_char();
                break;
            }

            self.infile.read_char();
        }

        let lines = Detail::Lines {
            first: start.line,
            last: self.infile.line(),
        };

        self.report(
            Diagnostic::at(ErrorKind::DisabledCodeSection, start)
                .with_detail(lines),
        );
    }

    fn get_number(&mut self, start: Pos) -> (Token, Option<Symbol>) {
        self.infile.mark_lexeme();

        let token = match self.scanner {
            NumberScanner::Prefix => self.scan_prefixed_number(),
            NumberScanner::Suffix { octal } => self.scan_suffixed_number(octal),
        };

        let lexeme = self.infile.read_marked_lexeme();

        let cause = match token {
            Token::MalformedInteger => Some(ErrorKind::MissingSuffix),
            Token::MalformedReal => Some(ErrorKind::MissingExponent),
            _ => None,
        };

        if let Some(kind) = cause {
            self.report(
                Diagnostic::at(kind, start).with_lexeme(lexeme.clone()),
            );
        }

        (token, lexeme)
    }

    /// Number literal with an optional `0x` (integer) or `0u` (character
    ///   code) base-16 prefix.
    fn scan_prefixed_number(&mut self) -> Token {
        let prefix = self.infile.la2_char();

        if self.infile.next_char() == b'0' && matches!(prefix, b'x' | b'u') {
            self.infile.read_char();
            let mut c = self.infile.consume_char();

            while is_upper_hex_digit(c) {
                c = self.infile.consume_char();
            }

            return match prefix {
                b'x' => Token::Integer,
                _ => Token::Char,
            };
        }

        let mut c = self.infile.next_char();

        while c.is_ascii_digit() {
            c = self.infile.consume_char();
        }

        self.decimal_tail(c)
    }

    /// Number literal whose base is determined by its suffix:
    ///   `H` for base 16,
    ///   `B` for base 8,
    ///   `C` for a base-8 character code,
    ///   and none for base 10.
    ///
    /// The whole run of digits and letters `A`..`F` is consumed before
    ///   the base is decided.
    /// An octal suffix is recognised only as the last character of that
    ///   run and the only letter in it,
    ///     so `17B` is octal but `1B7` and `1BB` are malformed.
    fn scan_suffixed_number(&mut self, octal: bool) -> Token {
        let mut octal_digits = 0usize;
        let mut decimal_digits = 0usize;
        let mut letters = 0usize;
        let mut last = 0u8;

        let mut c = self.infile.next_char();

        loop {
            match c {
                b'0'..=b'7' => octal_digits += 1,
                b'8' | b'9' => decimal_digits += 1,
                b'A'..=b'F' => letters += 1,
                _ => break,
            }

            last = c;
            c = self.infile.consume_char();
        }

        debug_assert!(octal_digits + decimal_digits > 0);

        match c {
            b'H' => {
                self.infile.read_char();
                Token::Integer
            }
            _ if letters == 0 => self.decimal_tail(c),
            _ if octal && letters == 1 && decimal_digits == 0 => match last {
                b'B' => Token::Integer,
                b'C' => Token::Char,
                _ => Token::MalformedInteger,
            },
            _ => Token::MalformedInteger,
        }
    }

    /// Complete a decimal literal whose digits have been consumed,
    ///   `c` being the lookahead character.
    fn decimal_tail(&mut self, c: u8) -> Token {
        if c == b'.' && self.infile.la2_char() != b'.' {
            self.fractional_tail()
        } else {
            Token::Integer
        }
    }

    /// Scan the fractional part and exponent of a real number literal,
    ///   starting at its decimal point.
    fn fractional_tail(&mut self) -> Token {
        let mut c = self.infile.consume_char();

        while c.is_ascii_digit() {
            c = self.infile.consume_char();
        }

        if c != b'E' {
            return Token::Real;
        }

        c = self.infile.consume_char();

        if c == b'+' || c == b'-' {
            c = self.infile.consume_char();
        }

        if !c.is_ascii_digit() {
            return Token::MalformedReal;
        }

        while c.is_ascii_digit() {
            c = self.infile.consume_char();
        }

        Token::Real
    }
}

fn is_upper_hex_digit(c: u8) -> bool {
    c.is_ascii_digit() || (b'A'..=b'F').contains(&c)
}

#[cfg(test)]
mod test;
