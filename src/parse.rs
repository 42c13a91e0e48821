// Modula-2 parser
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

//! Recursive descent parser producing an [`AstNode`] tree.
//!
//! Each non-terminal of the grammar is a method of [`Parser`] named after
//!   its [`Production`],
//!     split across submodules by area:
//!
//!   - [`decl`] parses compilation units,
//!       imports,
//!       definitions,
//!       declarations
//!       and types;
//!   - [`stmt`] parses statements;
//!       and
//!   - [`expr`] parses expressions and designators.
//!
//! A production method is entered only when the lookahead is in its FIRST
//!   set,
//!     unless it explicitly handles the contrary
//!     (in which case it reports the error itself).
//!
//! Error Recovery
//! ==============
//! A syntax error is reported as an [`ErrorKind::UnexpectedToken`]
//!   diagnostic naming the offending symbol and what was expected.
//! The parser then skips symbols until the lookahead is in a
//!   _resynchronisation set_ composed by the call site
//!     (normally the FIRST sets of the constituents that follow),
//!   the FOLLOW set of the current production,
//!   or is [`Token::EndOfFile`].
//! Skipped input yields [`AstNode::EMPTY`] in place of the constituent
//!   that could not be parsed.
//!
//! Every loop of the parser consumes at least one symbol per iteration or
//!   terminates,
//!     and so parsing always terminates within a number of steps bounded
//!     by the length of the input.
//! To avoid cascades,
//!   no more than one syntax error is reported for any one symbol.
//!
//! Blocks,
//!   statements,
//!   types,
//!   field lists
//!   and factors may nest no deeper than
//!   [`MAX_NESTING_DEPTH`](global::MAX_NESTING_DEPTH).
//! A construct beyond that depth is reported as
//!   [`ErrorKind::NestingTooDeep`] and skipped as if it were a syntax
//!   error,
//!     so that the depth of recursion does not depend on the input.
//!
//! Pragmas
//! =======
//! Pragmas may appear anywhere between symbols.
//! The parser passes them over and collects their bodies,
//!   in source order,
//!   into [`ParseOutput::pragmas`].

mod decl;
mod expr;
mod stmt;

use crate::ast::{AstNode, AstTag};
use crate::diagnose::{Diagnostic, ErrorKind, Level, Reporter};
use crate::global;
use crate::grammar::{GrammarSets, Production};
use crate::lexer::Lexer;
use crate::options::{Flag, Options};
use crate::source::{Infile, InfileError, Pos};
use crate::sym::{self, Symbol};
use crate::token::{Token, TokenSet};
use crate::trace::{self, Trace};
use std::path::Path;

/// Kind of compilation unit expected of a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceType {
    /// Any of definition, implementation or program module.
    Any,

    /// Definition module.
    Def,

    /// Implementation or program module.
    Mod,
}

impl SourceType {
    /// Source type implied by a filename suffix,
    ///   if it is a recognised one.
    pub fn for_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "def" | "DEF" => Some(Self::Def),
            "mod" | "MOD" => Some(Self::Mod),
            _ => None,
        }
    }

    /// Tokens that may begin a compilation unit of this type.
    fn first(self) -> TokenSet {
        match self {
            Self::Any => TokenSet::from_tokens(&[
                Token::Definition,
                Token::Implementation,
                Token::Module,
            ]),
            Self::Def => TokenSet::from_tokens(&[Token::Definition]),
            Self::Mod => {
                TokenSet::from_tokens(&[Token::Implementation, Token::Module])
            }
        }
    }
}

/// Diagnostic counts and size of a parsed source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub warnings: usize,
    pub errors: usize,
    pub lines: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStatus {
    Success,

    /// At least one error was reported.
    ///
    /// The syntax tree is still produced,
    ///   with [`AstNode::EMPTY`] in place of anything that could not be
    ///   parsed.
    Failure,
}

/// Result of parsing a compilation unit.
#[derive(Debug)]
pub struct ParseOutput {
    /// `ROOT(FILENAME, OPTIONS, module)`.
    pub ast: AstNode,

    /// `PRAGMA` terminal holding the body of each pragma in source order.
    pub pragmas: AstNode,

    pub stats: Stats,
    pub status: ParseStatus,
}

impl ParseOutput {
    /// The compilation unit within the root node.
    pub fn module(&self) -> Option<&AstNode> {
        self.ast.child(2)
    }

    pub fn is_success(&self) -> bool {
        self.status == ParseStatus::Success
    }
}

/// Parse the source file at `path` as a compilation unit of type `source`.
///
/// Diagnostics are emitted to `reporter` as they are found;
///   pass `&mut reporter` to retain it.
/// The interner must have been initialised.
pub fn parse_file<P: AsRef<Path>, R: Reporter>(
    source: SourceType,
    path: P,
    options: Options,
    reporter: R,
) -> Result<ParseOutput, InfileError> {
    Ok(parse_infile(source, Infile::open(path)?, options, reporter))
}

/// Parse the in-memory source `bytes` named `name`.
///
/// This is [`parse_file`] without the filesystem.
pub fn parse_source<S: Into<String>, B: Into<Vec<u8>>, R: Reporter>(
    source: SourceType,
    name: S,
    bytes: B,
    options: Options,
    reporter: R,
) -> Result<ParseOutput, InfileError> {
    Ok(parse_infile(
        source,
        Infile::from_bytes(name, bytes)?,
        options,
        reporter,
    ))
}

fn parse_infile<R: Reporter>(
    source: SourceType,
    infile: Infile,
    options: Options,
    reporter: R,
) -> ParseOutput {
    let filename = AstNode::terminal(
        AstTag::Filename,
        sym::intern(infile.name().as_bytes()).into_iter().collect(),
    );

    let dialect = AstNode::terminal(
        AstTag::Options,
        options
            .enabled()
            .filter(|flag| flag.is_dialect())
            .filter_map(|flag| sym::intern(flag.name().as_bytes()).ok())
            .collect(),
    );

    let sets = GrammarSets::new(&options);
    let mut parser = Parser::new(Lexer::new(infile, options, reporter), &sets);

    let module = parser.compilation_unit(source);
    let (pragmas, stats) = parser.finish();

    let status = match stats.errors {
        0 => ParseStatus::Success,
        _ => ParseStatus::Failure,
    };

    ParseOutput {
        ast: node(AstTag::Root, [filename, dialect, module]),
        pragmas,
        stats,
        status,
    }
}

/// Recursive descent parser over a [`Lexer`].
///
/// FIRST and FOLLOW sets are borrowed from a [`GrammarSets`] resolved
///   against the same options as the lexer.
pub struct Parser<'s, R: Reporter> {
    lexer: Lexer<R>,
    sets: &'s GrammarSets,

    warnings: usize,
    errors: usize,

    /// Bodies of pragmas passed over so far.
    pragmas: Vec<Symbol>,

    /// Position of the symbol at which the last syntax error was reported.
    last_error: Option<Pos>,

    /// Number of [`nested`](Parser::nested) constructs being parsed.
    depth: usize,

    trace: Box<dyn Trace>,
}

impl<'s, R: Reporter> Parser<'s, R> {
    pub fn new(lexer: Lexer<R>, sets: &'s GrammarSets) -> Self {
        let trace = trace::parser_trace(lexer.options().get(Flag::ParserDebug));

        let mut parser = Self {
            lexer,
            sets,
            warnings: 0,
            errors: 0,
            pragmas: Vec::new(),
            last_error: None,
            depth: 0,
            trace,
        };

        parser.skip_pragmas();
        parser
    }

    /// Parse a compilation unit of type `source` followed by the end of
    ///   the file.
    pub fn compilation_unit(&mut self, source: SourceType) -> AstNode {
        let first = source.first();

        if !first.contains(self.la()) {
            self.error_set(&first);
            self.skip_to(&first);
        }

        let module = match self.la() {
            Token::Definition => self.definition_module(),
            Token::Implementation => self.implementation_module(),
            Token::Module => self.program_module(),
            _ => AstNode::EMPTY,
        };

        if self.la() != Token::EndOfFile {
            self.error_token(Token::EndOfFile);
        }

        module
    }

    /// Number of syntax warnings reported so far.
    pub fn warning_count(&self) -> usize {
        self.warnings
    }

    /// Number of syntax errors reported so far.
    pub fn error_count(&self) -> usize {
        self.errors
    }

    /// Release the lexer,
    ///   yielding the collected pragmas and the combined lexical and
    ///   syntactic statistics.
    pub fn finish(self) -> (AstNode, Stats) {
        let stats = Stats {
            warnings: self.warnings + self.lexer.warning_count(),
            errors: self.errors + self.lexer.error_count(),
            lines: self.lexer.line_count(),
        };

        (AstNode::terminal(AstTag::Pragma, self.pragmas), stats)
    }

    #[inline]
    fn first(&self, p: Production) -> &'s TokenSet {
        self.sets.first(p)
    }

    #[inline]
    fn follow(&self, p: Production) -> &'s TokenSet {
        self.sets.follow(p)
    }

    /// Token of the lookahead symbol.
    #[inline]
    fn la(&self) -> Token {
        self.lexer.next_sym()
    }

    fn la_pos(&self) -> Pos {
        self.lexer.lookahead().pos
    }

    fn options(&self) -> &Options {
        self.lexer.options()
    }

    fn enter(&mut self, p: Production) {
        self.trace.trace_production(p, self.lexer.lookahead());
    }

    /// Consume the lookahead symbol,
    ///   returning the token of the next.
    fn consume(&mut self) -> Token {
        self.lexer.consume_sym();
        self.skip_pragmas()
    }

    fn skip_pragmas(&mut self) -> Token {
        while self.la() == Token::Pragma {
            if let Some(body) = self.lexer.lookahead_lexeme() {
                self.pragmas.push(body.clone());
            }

            self.lexer.consume_sym();
        }

        self.la()
    }

    /// Consume the lookahead symbol and yield its lexeme.
    fn take_lexeme(&mut self) -> Option<Symbol> {
        let lexeme = self.lexer.lookahead_lexeme().cloned();
        self.consume();
        lexeme
    }

    /// Consume `token` if it is the lookahead.
    ///
    /// Otherwise report an error and skip to `resync`,
    ///   `token`,
    ///   or FOLLOW(`p`),
    ///     consuming `token` if that is where skipping stopped.
    /// Yields whether `token` was consumed.
    fn expect(
        &mut self,
        p: Production,
        token: Token,
        resync: &TokenSet,
    ) -> bool {
        if self.la() == token {
            self.consume();
            return true;
        }

        self.error_token(token);
        self.recover(p, &resync.with_token(token));

        if self.la() == token {
            self.consume();
            return true;
        }

        false
    }

    /// [`expect`](Parser::expect) with FIRST(`next`) for resynchronisation.
    fn expect_then(
        &mut self,
        p: Production,
        token: Token,
        next: Production,
    ) -> bool {
        self.expect(p, token, self.first(next))
    }

    /// Consume an identifier and yield its lexeme,
    ///   reporting an error and skipping to `resync` or FOLLOW(`p`) if
    ///   the lookahead is not an identifier.
    fn ident(&mut self, p: Production, resync: &TokenSet) -> Option<Symbol> {
        if self.la() != Token::Identifier {
            self.error_token(Token::Identifier);
            self.recover(p, &resync.with_token(Token::Identifier));

            if self.la() != Token::Identifier {
                return None;
            }
        }

        self.take_lexeme()
    }

    /// Parse a construct of production `p` that may contain itself.
    ///
    /// Beyond the maximum nesting depth the construct is reported and
    ///   skipped to FOLLOW(`p`),
    ///     yielding [`AstNode::EMPTY`].
    fn nested(
        &mut self,
        p: Production,
        parse: impl FnOnce(&mut Self) -> AstNode,
    ) -> AstNode {
        if self.depth >= global::MAX_NESTING_DEPTH {
            if let Some(pos) = self.error_pos() {
                self.report(Diagnostic::at(ErrorKind::NestingTooDeep, pos));
            }

            self.recover(p, &TokenSet::new());
            return AstNode::EMPTY;
        }

        self.depth += 1;
        let parsed = parse(self);
        self.depth -= 1;

        parsed
    }

    /// Skip symbols until the lookahead is in `resync` or FOLLOW(`p`).
    fn recover(&mut self, p: Production, resync: &TokenSet) {
        let follow = self.follow(p);
        let mut la = self.la();

        while la != Token::EndOfFile
            && !resync.contains(la)
            && !follow.contains(la)
        {
            la = self.consume();
        }
    }

    /// Skip symbols until the lookahead is in `set`.
    fn skip_to(&mut self, set: &TokenSet) {
        let mut la = self.la();

        while la != Token::EndOfFile && !set.contains(la) {
            la = self.consume();
        }
    }

    /// Report that the lookahead was found where `expected` was required.
    fn error_token(&mut self, expected: Token) {
        if let Some(pos) = self.error_pos() {
            let la = self.lexer.lookahead();
            let diagnostic = Diagnostic::unexpected_token(
                pos,
                la.token,
                la.lexeme.clone(),
                expected,
            );

            self.report(diagnostic);
        }
    }

    /// Report that the lookahead was found where a member of `expected`
    ///   was required.
    fn error_set(&mut self, expected: &TokenSet) {
        if let Some(pos) = self.error_pos() {
            let la = self.lexer.lookahead();
            let diagnostic = Diagnostic::unexpected_set(
                pos,
                la.token,
                la.lexeme.clone(),
                expected,
            );

            self.report(diagnostic);
        }
    }

    /// Position at which to report a syntax error,
    ///   or [`None`] if one has already been reported for the lookahead.
    fn error_pos(&mut self) -> Option<Pos> {
        let pos = self.la_pos();

        match self.last_error.replace(pos) {
            Some(last) if last == pos => None,
            _ => Some(pos),
        }
    }

    fn warn(&mut self, kind: ErrorKind, pos: Pos) {
        self.report(Diagnostic::at(kind, pos));
    }

    /// Warn of a superfluous semicolon at `pos`,
    ///   if such warnings are enabled.
    fn warn_semicolon(&mut self, kind: ErrorKind, pos: Pos) {
        if self.options().get(Flag::ErrantSemicolon) {
            self.warn(kind, pos);
        }
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic.level() {
            Level::Error => self.errors += 1,
            Level::Warning => self.warnings += 1,
        }

        self.lexer.emit(&diagnostic);
    }
}

/// Non-terminal node `tag` with the given children.
fn node<const N: usize>(tag: AstTag, children: [AstNode; N]) -> AstNode {
    AstNode::nonterminal(tag, Vec::from(children))
}
