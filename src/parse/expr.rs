// Modula-2 parser: expressions and designators
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

//! Expressions,
//!   designators
//!   and qualified identifiers.
//!
//! Binary operators are left-associative and yield a node tagged by the
//!   operator whose children are the left and right operands.

use super::{node, Parser};
use crate::ast::{AstNode, AstTag as A};
use crate::diagnose::Reporter;
use crate::grammar::Production as P;
use crate::token::{Token, TokenSet};

/// Tag of a relational operator.
fn relation(token: Token) -> Option<A> {
    match token {
        Token::Equal => Some(A::Eq),
        Token::NotEqual => Some(A::Neq),
        Token::Less => Some(A::Lt),
        Token::LessOrEqual => Some(A::LtEq),
        Token::Greater => Some(A::Gt),
        Token::GreaterOrEqual => Some(A::GtEq),
        Token::In => Some(A::In),
        _ => None,
    }
}

/// Tag of an adding operator.
fn add_operator(token: Token) -> Option<A> {
    match token {
        Token::Plus => Some(A::Plus),
        Token::Minus => Some(A::Minus),
        Token::Or => Some(A::Or),
        _ => None,
    }
}

/// Tag of a multiplying operator.
fn mul_operator(token: Token) -> Option<A> {
    match token {
        Token::Asterisk => Some(A::Asterisk),
        Token::Solidus => Some(A::Solidus),
        Token::Div => Some(A::Div),
        Token::Mod => Some(A::Mod),
        Token::And => Some(A::And),
        _ => None,
    }
}

/// Tag of a literal value,
///   malformed or not.
fn literal(token: Token) -> Option<A> {
    match token {
        Token::String | Token::MalformedString => Some(A::QuotedVal),
        Token::Integer | Token::MalformedInteger => Some(A::IntVal),
        Token::Real | Token::MalformedReal => Some(A::RealVal),
        Token::Char => Some(A::ChrVal),
        _ => None,
    }
}

impl<'s, R: Reporter> Parser<'s, R> {
    /// ```text
    /// expression := simpleExpression ( relation simpleExpression )?
    /// ```
    pub(super) fn expression(&mut self) -> AstNode {
        self.enter(P::Expression);

        let lhs = self.simple_expression();

        match relation(self.la()) {
            Some(tag) => {
                self.consume();
                node(tag, [lhs, self.simple_expression()])
            }
            None => lhs,
        }
    }

    /// ```text
    /// simpleExpression := ( '+' | '-' )? term ( addOperator term )*
    /// ```
    fn simple_expression(&mut self) -> AstNode {
        self.enter(P::SimpleExpression);

        let negate = match self.la() {
            Token::Plus => {
                self.consume();
                false
            }
            Token::Minus => {
                self.consume();
                true
            }
            _ => false,
        };

        let mut lhs = match negate {
            true => node(A::Neg, [self.term()]),
            false => self.term(),
        };

        while let Some(tag) = add_operator(self.la()) {
            self.consume();
            lhs = node(tag, [lhs, self.term()]);
        }

        lhs
    }

    /// ```text
    /// term := factor ( mulOperator factor )*
    /// ```
    fn term(&mut self) -> AstNode {
        self.enter(P::Term);

        let mut lhs = self.nested(P::Factor, Self::factor);

        while let Some(tag) = mul_operator(self.la()) {
            self.consume();
            let rhs = self.nested(P::Factor, Self::factor);
            lhs = node(tag, [lhs, rhs]);
        }

        lhs
    }

    /// ```text
    /// factor :=
    ///   literal | setValue | designator actualParameters? |
    ///   '(' expression ')' | NOT factor
    /// ```
    ///
    /// A qualified identifier followed by `{` is the type of a set value.
    fn factor(&mut self) -> AstNode {
        let p = P::Factor;
        self.enter(p);

        let la = self.la();

        if let Some(tag) = literal(la) {
            let value = self.take_lexeme();
            return AstNode::terminal(tag, value.into_iter().collect());
        }

        match la {
            Token::LBrace => self.set_value(AstNode::EMPTY),
            Token::Identifier => {
                let head = self.qualident();

                if self.la() == Token::LBrace {
                    return self.set_value(head);
                }

                let desig = self.selectors(head);

                match self.la() {
                    Token::LParen => {
                        node(A::FCall, [desig, self.actual_parameters()])
                    }
                    _ => desig,
                }
            }
            Token::LParen => {
                self.consume();

                let inner = self.expression();
                self.expect(p, Token::RParen, &TokenSet::new());

                inner
            }
            Token::Not => {
                self.consume();
                node(A::Not, [self.nested(p, Self::factor)])
            }
            _ => {
                self.error_set(self.first(p));
                self.recover(p, &TokenSet::new());
                AstNode::EMPTY
            }
        }
    }

    /// ```text
    /// setValue := qualident? '{' ( element ( ',' element )* )? '}'
    /// ```
    ///
    /// The type `ty` has already been parsed.
    fn set_value(&mut self, ty: AstNode) -> AstNode {
        let p = P::SetValue;
        self.enter(p);
        self.consume();

        let mut values = vec![ty];

        if self.la() != Token::RBrace {
            values.push(self.element());

            while self.la() == Token::Comma {
                self.consume();
                values.push(self.element());
            }
        }

        self.expect(p, Token::RBrace, &TokenSet::new());

        AstNode::nonterminal(A::SetVal, values)
    }

    /// ```text
    /// element := expression ( '..' expression )?
    /// ```
    fn element(&mut self) -> AstNode {
        self.enter(P::Element);

        let lo = self.expression();

        match self.la() {
            Token::Range => {
                self.consume();
                node(A::Range, [lo, self.expression()])
            }
            _ => lo,
        }
    }

    /// ```text
    /// designator := qualident selector*
    /// ```
    pub(super) fn designator(&mut self) -> AstNode {
        self.enter(P::Designator);

        let head = self.qualident();
        self.selectors(head)
    }

    /// Selectors following the qualified identifier `head` of a
    ///   designator.
    ///
    /// ```text
    /// selector := '.' ident | '[' expressionList ']' | '^'
    /// ```
    fn selectors(&mut self, head: AstNode) -> AstNode {
        let p = P::Designator;
        let mut parts = vec![head];

        loop {
            match self.la() {
                Token::Period => {
                    self.consume();

                    let field = self.ident(p, &TokenSet::new());
                    parts.push(node(A::Field, [AstNode::ident(field)]));
                }
                Token::LBracket => {
                    self.consume();

                    let indices = self.expression_list();
                    self.expect(p, Token::RBracket, &TokenSet::new());
                    parts.push(AstNode::nonterminal(A::Index, indices));
                }
                Token::Deref => {
                    self.consume();
                    parts.push(AstNode::nonterminal(A::Deref, vec![]));
                }
                _ => break,
            }
        }

        AstNode::nonterminal(A::Desig, parts)
    }

    /// ```text
    /// qualident := ident ( '.' ident )*
    /// ```
    ///
    /// A single identifier yields an `IDENT` node and a qualified one a
    ///   `QUALIDENT` node.
    pub(super) fn qualident(&mut self) -> AstNode {
        let p = P::Qualident;
        self.enter(p);

        let mut parts = match self.ident(p, &TokenSet::new()) {
            Some(first) => vec![first],
            None => return AstNode::EMPTY,
        };

        while self.la() == Token::Period {
            if self.consume() != Token::Identifier {
                self.error_token(Token::Identifier);
                break;
            }

            parts.extend(self.take_lexeme());
        }

        match parts.len() {
            1 => AstNode::terminal(A::Ident, parts),
            _ => AstNode::terminal(A::Qualident, parts),
        }
    }

    /// ```text
    /// actualParameters := '(' expressionList? ')'
    /// ```
    pub(super) fn actual_parameters(&mut self) -> AstNode {
        let p = P::ActualParameters;
        self.enter(p);
        self.consume();

        let args = match self.la() {
            Token::RParen => vec![],
            _ => self.expression_list(),
        };

        self.expect(p, Token::RParen, &TokenSet::new());

        AstNode::nonterminal(A::Args, args)
    }

    /// ```text
    /// expressionList := expression ( ',' expression )*
    /// ```
    fn expression_list(&mut self) -> Vec<AstNode> {
        self.enter(P::ExpressionList);

        let mut exprs = vec![self.expression()];

        while self.la() == Token::Comma {
            self.consume();
            exprs.push(self.expression());
        }

        exprs
    }
}
