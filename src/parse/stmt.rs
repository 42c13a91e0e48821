// Modula-2 parser: statements
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

//! Statements.

use super::{node, Parser};
use crate::ast::{AstNode, AstTag as A};
use crate::diagnose::{ErrorKind, Reporter};
use crate::grammar::Production as P;
use crate::token::{Token, TokenSet};

impl<'s, R: Reporter> Parser<'s, R> {
    /// ```text
    /// statementSequence := statement? ( ';' statement? )*
    /// ```
    ///
    /// Empty statements yield nothing,
    ///   and a sequence with no statements at all is warned about.
    pub(super) fn statement_sequence(&mut self) -> AstNode {
        let p = P::StatementSequence;
        self.enter(p);

        let first = self.first(P::Statement);
        let follow = self.follow(p);
        let start = self.la_pos();
        let mut stmts = Vec::new();

        loop {
            if first.contains(self.la()) {
                stmts.push(self.nested(P::Statement, Self::statement));
            }

            match self.la() {
                Token::Semicolon => {
                    let pos = self.la_pos();

                    if follow.contains(self.consume()) {
                        let kind = ErrorKind::SemicolonAfterStmtSeq;
                        self.warn_semicolon(kind, pos);
                        break;
                    }
                }
                la if follow.contains(la) => break,
                _ => {
                    let separator = follow.with_token(Token::Semicolon);

                    self.error_set(&separator);
                    self.recover(p, &separator.with(first));

                    if !first.contains(self.la())
                        && self.la() != Token::Semicolon
                    {
                        break;
                    }
                }
            }
        }

        if stmts.is_empty() {
            self.warn(ErrorKind::EmptyStmtSeq, start);
        }

        AstNode::nonterminal(A::StmtSeq, stmts)
    }

    /// ```text
    /// statement :=
    ///   assignmentOrProcCall | returnStatement | ifStatement |
    ///   caseStatement | whileStatement | repeatStatement |
    ///   loopStatement | forStatement | withStatement | EXIT
    /// ```
    fn statement(&mut self) -> AstNode {
        let p = P::Statement;
        self.enter(p);

        match self.la() {
            Token::Identifier => self.assignment_or_proc_call(),
            Token::Return => self.return_statement(),
            Token::If => self.if_statement(),
            Token::Case => self.case_statement(),
            Token::While => self.while_statement(),
            Token::Repeat => self.repeat_statement(),
            Token::Loop => self.loop_statement(),
            Token::For => self.for_statement(),
            Token::With => self.with_statement(),
            Token::Exit => {
                self.consume();
                AstNode::nonterminal(A::Exit, vec![])
            }
            _ => {
                self.error_set(self.first(p));
                self.recover(p, &TokenSet::new());
                AstNode::EMPTY
            }
        }
    }

    /// ```text
    /// assignmentOrProcCall :=
    ///   designator ( ':=' expression | actualParameters? )
    /// ```
    fn assignment_or_proc_call(&mut self) -> AstNode {
        self.enter(P::AssignmentOrProcCall);

        let target = self.designator();

        match self.la() {
            Token::Assign => {
                self.consume();
                node(A::Assign, [target, self.expression()])
            }
            Token::LParen => node(A::PCall, [target, self.actual_parameters()]),
            _ => node(A::PCall, [target, AstNode::EMPTY]),
        }
    }

    /// ```text
    /// returnStatement := RETURN expression?
    /// ```
    fn return_statement(&mut self) -> AstNode {
        self.enter(P::ReturnStatement);
        self.consume();

        let value = match self.first(P::Expression).contains(self.la()) {
            true => self.expression(),
            false => AstNode::EMPTY,
        };

        node(A::Return, [value])
    }

    /// ```text
    /// ifStatement :=
    ///   IF expression THEN statementSequence
    ///   ( ELSIF expression THEN statementSequence )*
    ///   ( ELSE statementSequence )? END
    /// ```
    fn if_statement(&mut self) -> AstNode {
        let p = P::IfStatement;
        self.enter(p);
        self.consume();

        let cond = self.expression();
        self.expect_then(p, Token::Then, P::StatementSequence);
        let then = self.statement_sequence();

        let mut elsifs = Vec::new();

        while self.la() == Token::Elsif {
            self.consume();

            let cond = self.expression();
            self.expect_then(p, Token::Then, P::StatementSequence);
            let body = self.statement_sequence();

            elsifs.push(node(A::Elsif, [cond, body]));
        }

        let elsifs = match elsifs.is_empty() {
            true => AstNode::EMPTY,
            false => AstNode::nonterminal(A::ElsifSeq, elsifs),
        };

        let otherwise = self.else_part();
        self.expect(p, Token::End, &TokenSet::new());

        node(A::If, [cond, then, elsifs, otherwise])
    }

    /// `ELSE statementSequence`,
    ///   if present.
    fn else_part(&mut self) -> AstNode {
        match self.la() {
            Token::Else => {
                self.consume();
                self.statement_sequence()
            }
            _ => AstNode::EMPTY,
        }
    }

    /// ```text
    /// caseStatement :=
    ///   CASE expression OF case ( '|' case )*
    ///   ( ELSE statementSequence )? END
    /// ```
    fn case_statement(&mut self) -> AstNode {
        let p = P::CaseStatement;
        self.enter(p);
        self.consume();

        let selector = self.expression();
        self.expect_then(p, Token::Of, P::Case);

        let mut cases = Vec::new();
        cases.extend(self.case());

        while self.la() == Token::Bar {
            self.consume();
            cases.extend(self.case());
        }

        let otherwise = self.else_part();
        self.expect(p, Token::End, &TokenSet::new());

        node(
            A::Switch,
            [
                selector,
                AstNode::nonterminal(A::CaseList, cases),
                otherwise,
            ],
        )
    }

    /// ```text
    /// case := ( caseLabelList ':' statementSequence )?
    /// ```
    ///
    /// Yields [`None`] for an empty case.
    fn case(&mut self) -> Option<AstNode> {
        let p = P::Case;
        self.enter(p);

        if !self.first(p).contains(self.la()) {
            return None;
        }

        let labels = self.case_label_list();
        self.expect_then(p, Token::Colon, P::StatementSequence);
        let body = self.statement_sequence();

        Some(node(A::Case, [labels, body]))
    }

    /// ```text
    /// whileStatement := WHILE expression DO statementSequence END
    /// ```
    fn while_statement(&mut self) -> AstNode {
        let p = P::WhileStatement;
        self.enter(p);
        self.consume();

        let cond = self.expression();
        self.expect_then(p, Token::Do, P::StatementSequence);
        let body = self.statement_sequence();
        self.expect(p, Token::End, &TokenSet::new());

        node(A::While, [cond, body])
    }

    /// ```text
    /// repeatStatement := REPEAT statementSequence UNTIL expression
    /// ```
    fn repeat_statement(&mut self) -> AstNode {
        let p = P::RepeatStatement;
        self.enter(p);
        self.consume();

        let body = self.statement_sequence();
        self.expect_then(p, Token::Until, P::Expression);
        let cond = self.expression();

        node(A::Repeat, [body, cond])
    }

    /// ```text
    /// loopStatement := LOOP statementSequence END
    /// ```
    fn loop_statement(&mut self) -> AstNode {
        let p = P::LoopStatement;
        self.enter(p);
        self.consume();

        let body = self.statement_sequence();
        self.expect(p, Token::End, &TokenSet::new());

        node(A::Loop, [body])
    }

    /// ```text
    /// forStatement :=
    ///   FOR ident ':=' expression TO expression ( BY constExpression )?
    ///   DO statementSequence END
    /// ```
    fn for_statement(&mut self) -> AstNode {
        let p = P::ForStatement;
        self.enter(p);
        self.consume();

        let var = self.ident(p, &TokenSet::from_tokens(&[Token::Assign]));
        self.expect_then(p, Token::Assign, P::Expression);
        let from = self.expression();
        self.expect_then(p, Token::To, P::Expression);
        let to = self.expression();

        let step = match self.la() {
            Token::By => {
                self.consume();
                self.expression()
            }
            _ => AstNode::EMPTY,
        };

        self.expect_then(p, Token::Do, P::StatementSequence);
        let body = self.statement_sequence();
        self.expect(p, Token::End, &TokenSet::new());

        node(A::For, [AstNode::ident(var), from, to, step, body])
    }

    /// ```text
    /// withStatement := WITH designator DO statementSequence END
    /// ```
    fn with_statement(&mut self) -> AstNode {
        let p = P::WithStatement;
        self.enter(p);
        self.consume();

        let record = self.designator();
        self.expect_then(p, Token::Do, P::StatementSequence);
        let body = self.statement_sequence();
        self.expect(p, Token::End, &TokenSet::new());

        node(A::With, [record, body])
    }
}
