// Modula-2 parser: modules, declarations and types
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

//! Compilation units,
//!   imports and exports,
//!   definitions and declarations,
//!   and types.

use super::{node, Parser};
use crate::ast::{AstNode, AstTag as A};
use crate::diagnose::{Diagnostic, ErrorKind, Reporter};
use crate::grammar::Production as P;
use crate::sym::SymbolList;
use crate::token::{Token, TokenSet};

impl<'s, R: Reporter> Parser<'s, R> {
    /// ```text
    /// definitionModule :=
    ///   DEFINITION MODULE ident ';' import* export? definition*
    ///   END ident '.'
    /// ```
    pub(super) fn definition_module(&mut self) -> AstNode {
        self.enter(P::DefinitionModule);
        self.consume();

        let p = P::DefinitionModule;
        let after_header = self
            .first(P::Import)
            .with(self.first(P::Definition))
            .with_token(Token::Export)
            .with_token(Token::End);

        self.expect(p, Token::Module, &ident_only());
        let name = self.ident(p, &after_header.with_token(Token::Semicolon));
        self.expect(p, Token::Semicolon, &after_header);

        let imports = self.import_list();

        let export = match self.la() {
            Token::Export => self.export(),
            _ => AstNode::EMPTY,
        };

        let mut defs = Vec::new();
        while self.first(P::Definition).contains(self.la()) {
            self.definition(&mut defs);
        }

        self.module_end(p);

        node(
            A::DefMod,
            [
                AstNode::ident(name),
                imports,
                export,
                AstNode::nonterminal(A::DefList, defs),
            ],
        )
    }

    /// ```text
    /// implementationModule := IMPLEMENTATION programModule
    /// ```
    pub(super) fn implementation_module(&mut self) -> AstNode {
        self.enter(P::ImplementationModule);
        self.consume();

        self.module_body(P::ImplementationModule, A::ImpMod)
    }

    /// ```text
    /// programModule :=
    ///   MODULE ident modulePriority? ';' import* block ident '.'
    /// ```
    pub(super) fn program_module(&mut self) -> AstNode {
        self.enter(P::ProgramModule);
        self.module_body(P::ProgramModule, A::PgmMod)
    }

    fn module_body(&mut self, p: P, tag: A) -> AstNode {
        let after_name =
            TokenSet::from_tokens(&[Token::LBracket, Token::Semicolon]);

        self.expect(p, Token::Module, &ident_only());
        let name = self.ident(p, &after_name);

        let priority = match self.la() {
            Token::LBracket => self.module_priority(),
            _ => AstNode::EMPTY,
        };

        let after_header = self.first(P::Import).with(self.first(P::Block));
        self.expect(p, Token::Semicolon, &after_header);

        let imports = self.import_list();
        let block = self.nested(P::Block, Self::block);

        self.module_end(p);

        node(tag, [AstNode::ident(name), priority, imports, block])
    }

    /// Closing identifier and period of a compilation unit.
    fn module_end(&mut self, p: P) {
        let period = TokenSet::from_tokens(&[Token::Period]);

        if p == P::DefinitionModule {
            self.expect(p, Token::End, &ident_only());
        }

        self.ident(p, &period);
        self.expect(p, Token::Period, &TokenSet::new());
    }

    /// ```text
    /// modulePriority := '[' constExpression ']'
    /// ```
    fn module_priority(&mut self) -> AstNode {
        self.enter(P::ModulePriority);
        self.consume();

        let value = self.expression();
        self.expect(P::ModulePriority, Token::RBracket, &TokenSet::new());

        node(A::Priority, [value])
    }

    /// Imports up to the first symbol that cannot begin one.
    fn import_list(&mut self) -> AstNode {
        let mut imports = Vec::new();

        while self.first(P::Import).contains(self.la()) {
            imports.push(self.import());
        }

        AstNode::nonterminal(A::ImpList, imports)
    }

    /// ```text
    /// import := ( FROM ident IMPORT | IMPORT ) identList ';'
    /// ```
    fn import(&mut self) -> AstNode {
        let p = P::Import;
        self.enter(p);

        let from = match self.la() {
            Token::From => {
                self.consume();

                let import = TokenSet::from_tokens(&[Token::Import]);
                let module = self.ident(p, &import);
                self.expect_then(p, Token::Import, P::IdentList);

                Some(module)
            }
            _ => {
                self.consume();
                None
            }
        };

        let idents = self.ident_list();
        self.expect(p, Token::Semicolon, &TokenSet::new());

        match from {
            Some(module) => node(A::Import, [AstNode::ident(module), idents]),
            None => node(A::UnqImp, [idents]),
        }
    }

    /// ```text
    /// export := EXPORT QUALIFIED? identList ';'
    /// ```
    fn export(&mut self) -> AstNode {
        self.enter(P::Export);
        self.consume();

        let tag = match self.la() {
            Token::Qualified => {
                self.consume();
                A::QualExp
            }
            _ => A::Export,
        };

        let idents = self.ident_list();
        self.expect(P::Export, Token::Semicolon, &TokenSet::new());

        node(tag, [idents])
    }

    /// ```text
    /// identList := ident ( ',' ident )*
    /// ```
    ///
    /// A duplicate identifier is reported and omitted from the list.
    fn ident_list(&mut self) -> AstNode {
        let p = P::IdentList;
        self.enter(p);

        let mut list = match self.ident(p, &TokenSet::new()) {
            Some(first) => SymbolList::new(first),
            None => return AstNode::EMPTY,
        };

        let comma = TokenSet::from_tokens(&[Token::Comma]);

        while self.la() == Token::Comma {
            if self.consume() != Token::Identifier {
                self.error_token(Token::Identifier);
                self.recover(p, &comma);
                continue;
            }

            let pos = self.la_pos();

            if let Some(ident) = self.take_lexeme() {
                if list.append(ident.clone()).is_err() {
                    let kind = ErrorKind::DuplicateIdentInIdentList;

                    self.report(
                        Diagnostic::at(kind, pos).with_lexeme(Some(ident)),
                    );
                }
            }
        }

        AstNode::terminal(A::IdentList, list.iter().cloned().collect())
    }

    /// One `CONST`,
    ///   `TYPE`
    ///   or `VAR` section,
    ///   or a procedure header,
    ///     appending each definition to `defs`.
    ///
    /// ```text
    /// definition :=
    ///   CONST ( constDefinition ';' )* |
    ///   TYPE ( typeDefinition ';' )* |
    ///   VAR ( variableDeclaration ';' )* |
    ///   procedureHeader ';'
    /// ```
    fn definition(&mut self, defs: &mut Vec<AstNode>) {
        let p = P::Definition;
        self.enter(p);

        match self.la() {
            Token::Const => self.section(p, defs, Self::const_definition),
            Token::Type => self.section(p, defs, Self::type_definition),
            Token::Var => self.section(p, defs, Self::variable_declaration),
            _ => {
                defs.push(self.procedure_header());
                self.expect(p, Token::Semicolon, &TokenSet::new());
            }
        }
    }

    /// Section of semicolon-terminated items each beginning with an
    ///   identifier,
    ///     following its keyword.
    fn section(
        &mut self,
        p: P,
        items: &mut Vec<AstNode>,
        item: fn(&mut Self) -> AstNode,
    ) {
        self.consume();

        let next = ident_only();

        while self.la() == Token::Identifier {
            items.push(item(self));
            self.expect(p, Token::Semicolon, &next);
        }
    }

    /// ```text
    /// constDefinition := ident '=' constExpression
    /// ```
    fn const_definition(&mut self) -> AstNode {
        let p = P::ConstDefinition;
        self.enter(p);

        let name = self.take_lexeme();
        self.expect_then(p, Token::Equal, P::Expression);
        let value = self.expression();

        node(A::ConstDef, [AstNode::ident(name), value])
    }

    /// ```text
    /// typeDefinition := ident ( '=' typeDeclarationTail )?
    /// ```
    ///
    /// A type without a definition is opaque.
    fn type_definition(&mut self) -> AstNode {
        self.enter(P::TypeDefinition);

        let name = self.take_lexeme();

        let ty = match self.la() {
            Token::Equal => {
                self.consume();
                self.type_declaration_tail()
            }
            _ => AstNode::EMPTY,
        };

        node(A::TypeDef, [AstNode::ident(name), ty])
    }

    /// ```text
    /// typeDeclaration := ident '=' typeDeclarationTail
    /// ```
    fn type_declaration(&mut self) -> AstNode {
        let p = P::TypeDeclaration;
        self.enter(p);

        let name = self.take_lexeme();
        self.expect_then(p, Token::Equal, P::Type);
        let ty = self.type_declaration_tail();

        node(A::TypeDef, [AstNode::ident(name), ty])
    }

    /// ```text
    /// variableDeclaration := identList ':' typeDeclarationTail
    /// ```
    fn variable_declaration(&mut self) -> AstNode {
        let p = P::VariableDeclaration;
        self.enter(p);

        let idents = self.ident_list();
        self.expect_then(p, Token::Colon, P::Type);
        let ty = self.type_declaration_tail();

        node(A::VarDecl, [idents, ty])
    }

    /// A type in a type,
    ///   variable
    ///   or field declaration,
    ///     recovering to the end of the declaration on error.
    fn type_declaration_tail(&mut self) -> AstNode {
        let p = P::TypeDeclarationTail;
        self.enter(p);

        if !self.first(p).contains(self.la()) {
            self.error_set(self.first(p));
            self.recover(p, &TokenSet::new());
            return AstNode::EMPTY;
        }

        self.nested(P::Type, Self::type_)
    }

    /// ```text
    /// type :=
    ///   simpleType | arrayType | recordType | setType | pointerType |
    ///   procedureType
    /// ```
    fn type_(&mut self) -> AstNode {
        let p = P::Type;
        self.enter(p);

        match self.la() {
            Token::Array => self.array_type(),
            Token::Record => self.record_type(),
            Token::Set => self.set_type(),
            Token::Pointer => self.pointer_type(),
            Token::Procedure => self.procedure_type(),
            la if self.first(P::SimpleType).contains(la) => self.simple_type(),
            _ => {
                self.error_set(self.first(p));
                self.recover(p, &TokenSet::new());
                AstNode::EMPTY
            }
        }
    }

    /// ```text
    /// simpleType := qualident | enumeration | subrangeType
    /// ```
    fn simple_type(&mut self) -> AstNode {
        let p = P::SimpleType;
        self.enter(p);

        match self.la() {
            Token::Identifier => {
                let base = self.qualident();

                match self.la() {
                    Token::LBracket => self.subrange_type(base),
                    _ => base,
                }
            }
            Token::LParen => self.enumeration(),
            Token::LBracket => self.subrange_type(AstNode::EMPTY),
            _ => {
                self.error_set(self.first(p));
                self.recover(p, &TokenSet::new());
                AstNode::EMPTY
            }
        }
    }

    /// ```text
    /// enumeration := '(' identList ')'
    /// ```
    fn enumeration(&mut self) -> AstNode {
        self.enter(P::Enumeration);
        self.consume();

        let idents = self.ident_list();
        self.expect(P::Enumeration, Token::RParen, &TokenSet::new());

        node(A::Enum, [idents])
    }

    /// ```text
    /// subrangeType :=
    ///   qualident? '[' constExpression '..' constExpression ']'
    /// ```
    ///
    /// The base type `base` has already been parsed.
    fn subrange_type(&mut self, base: AstNode) -> AstNode {
        let p = P::SubrangeType;
        self.enter(p);
        self.consume();

        let lo = self.expression();
        self.expect_then(p, Token::Range, P::Expression);
        let hi = self.expression();
        self.expect(p, Token::RBracket, &TokenSet::new());

        node(A::Subr, [lo, hi, base])
    }

    /// ```text
    /// arrayType := ARRAY simpleType ( ',' simpleType )* OF type
    /// ```
    ///
    /// Multiple index types nest,
    ///   so that `ARRAY A, B OF T` is `ARRAY A OF ARRAY B OF T`.
    fn array_type(&mut self) -> AstNode {
        let p = P::ArrayType;
        self.enter(p);
        self.consume();

        let mut indices = vec![self.simple_type()];

        while self.la() == Token::Comma {
            self.consume();
            indices.push(self.simple_type());
        }

        self.expect_then(p, Token::Of, P::Type);
        let elem = self.nested(P::Type, Self::type_);

        indices
            .into_iter()
            .rev()
            .fold(elem, |elem, index| node(A::Array, [index, elem]))
    }

    /// ```text
    /// recordType := RECORD fieldListSequence END
    /// ```
    fn record_type(&mut self) -> AstNode {
        self.enter(P::RecordType);
        self.consume();

        let fields = self.field_list_sequence();
        self.expect(P::RecordType, Token::End, &TokenSet::new());

        node(A::Record, [fields])
    }

    /// ```text
    /// fieldListSequence := fieldList ( ';' fieldList )*
    /// ```
    fn field_list_sequence(&mut self) -> AstNode {
        let p = P::FieldListSequence;
        self.enter(p);

        let first = self.first(P::FieldList);
        let follow = self.follow(p);
        let start = self.la_pos();
        let mut lists = Vec::new();

        loop {
            if first.contains(self.la()) {
                lists.push(self.nested(P::FieldList, Self::field_list));
            }

            if self.la() != Token::Semicolon {
                break;
            }

            let pos = self.la_pos();

            if follow.contains(self.consume()) {
                let kind = ErrorKind::SemicolonAfterFieldListSeq;
                self.warn_semicolon(kind, pos);
                break;
            }
        }

        if lists.is_empty() {
            self.warn(ErrorKind::EmptyFieldListSeq, start);
        }

        AstNode::nonterminal(A::FieldListSeq, lists)
    }

    /// ```text
    /// fieldList :=
    ///   identList ':' typeDeclarationTail |
    ///   CASE ( ident? ':' )? qualident OF variant ( '|' variant )*
    ///     ( ELSE fieldListSequence )? END
    /// ```
    fn field_list(&mut self) -> AstNode {
        let p = P::FieldList;
        self.enter(p);

        if self.la() != Token::Case {
            let idents = self.ident_list();
            self.expect_then(p, Token::Colon, P::Type);
            let ty = self.type_declaration_tail();

            return node(A::FieldList, [idents, ty]);
        }

        self.consume();

        let (tag, ty) = match self.la() {
            Token::Colon => {
                self.consume();
                (AstNode::EMPTY, self.qualident())
            }
            _ => {
                let first = self.qualident();

                match self.la() {
                    Token::Colon => {
                        self.consume();
                        (first, self.qualident())
                    }
                    _ => (AstNode::EMPTY, first),
                }
            }
        };

        self.expect_then(p, Token::Of, P::Variant);

        let mut variants = Vec::new();
        variants.extend(self.variant());

        while self.la() == Token::Bar {
            self.consume();
            variants.extend(self.variant());
        }

        let otherwise = match self.la() {
            Token::Else => {
                self.consume();
                self.field_list_sequence()
            }
            _ => AstNode::EMPTY,
        };

        self.expect(p, Token::End, &TokenSet::new());

        node(
            A::VrntFld,
            [
                tag,
                ty,
                AstNode::nonterminal(A::VariantList, variants),
                otherwise,
            ],
        )
    }

    /// ```text
    /// variant := ( caseLabelList ':' fieldListSequence )?
    /// ```
    ///
    /// Yields [`None`] for an empty variant.
    fn variant(&mut self) -> Option<AstNode> {
        let p = P::Variant;
        self.enter(p);

        if !self.first(p).contains(self.la()) {
            return None;
        }

        let labels = self.case_label_list();
        self.expect_then(p, Token::Colon, P::FieldListSequence);
        let fields = self.field_list_sequence();

        Some(node(A::Variant, [labels, fields]))
    }

    /// ```text
    /// caseLabelList := caseLabels ( ',' caseLabels )*
    /// ```
    pub(super) fn case_label_list(&mut self) -> AstNode {
        self.enter(P::CaseLabelList);

        let mut labels = vec![self.case_labels()];

        while self.la() == Token::Comma {
            self.consume();
            labels.push(self.case_labels());
        }

        AstNode::nonterminal(A::ClabelList, labels)
    }

    /// ```text
    /// caseLabels := constExpression ( '..' constExpression )?
    /// ```
    fn case_labels(&mut self) -> AstNode {
        self.enter(P::CaseLabels);

        let lo = self.expression();

        let hi = match self.la() {
            Token::Range => {
                self.consume();
                self.expression()
            }
            _ => AstNode::EMPTY,
        };

        node(A::Clabels, [lo, hi])
    }

    /// ```text
    /// setType := SET OF simpleType
    /// ```
    fn set_type(&mut self) -> AstNode {
        let p = P::SetType;
        self.enter(p);
        self.consume();

        self.expect_then(p, Token::Of, P::SimpleType);
        node(A::Set, [self.simple_type()])
    }

    /// ```text
    /// pointerType := POINTER TO type
    /// ```
    fn pointer_type(&mut self) -> AstNode {
        let p = P::PointerType;
        self.enter(p);
        self.consume();

        self.expect_then(p, Token::To, P::Type);
        node(A::Pointer, [self.nested(P::Type, Self::type_)])
    }

    /// ```text
    /// procedureType := PROCEDURE formalTypeList?
    /// ```
    fn procedure_type(&mut self) -> AstNode {
        self.enter(P::ProcedureType);
        self.consume();

        let (params, ret) = match self.la() {
            Token::LParen => self.formal_type_list(),
            _ => (AstNode::EMPTY, AstNode::EMPTY),
        };

        node(A::ProcType, [params, ret])
    }

    /// ```text
    /// formalTypeList :=
    ///   '(' ( attributedFormalType ( ',' attributedFormalType )* )? ')'
    ///   ( ':' qualident )?
    /// ```
    ///
    /// Yields the `FTYPELIST` and the result type.
    fn formal_type_list(&mut self) -> (AstNode, AstNode) {
        let p = P::FormalTypeList;
        self.enter(p);
        self.consume();

        let mut types = Vec::new();

        if self.la() != Token::RParen {
            types.push(self.attributed_formal_type());

            while self.la() == Token::Comma {
                self.consume();
                types.push(self.attributed_formal_type());
            }
        }

        self.expect(p, Token::RParen, &TokenSet::new());

        (
            AstNode::nonterminal(A::FtypeList, types),
            self.result_type(),
        )
    }

    /// ```text
    /// attributedFormalType := VAR? formalType
    /// ```
    fn attributed_formal_type(&mut self) -> AstNode {
        self.enter(P::AttributedFormalType);

        match self.la() {
            Token::Var => {
                self.consume();
                node(A::VarP, [self.formal_type()])
            }
            _ => self.formal_type(),
        }
    }

    /// ```text
    /// formalType := CONST? ( ARRAY OF )? qualident
    /// ```
    ///
    /// `CONST` is accepted only with `const-parameters`.
    fn formal_type(&mut self) -> AstNode {
        let p = P::FormalType;
        self.enter(p);

        match self.la() {
            Token::Const if self.first(p).contains(Token::Const) => {
                self.consume();
                node(A::ConstP, [self.formal_type()])
            }
            Token::Array => {
                self.consume();
                self.expect(p, Token::Of, &ident_only());
                node(A::OpenArray, [self.qualident()])
            }
            Token::Identifier => self.qualident(),
            _ => {
                self.error_set(self.first(p));
                self.recover(p, &TokenSet::new());
                AstNode::EMPTY
            }
        }
    }

    /// `':' qualident` following formal parameters,
    ///   if present.
    fn result_type(&mut self) -> AstNode {
        match self.la() {
            Token::Colon => {
                self.consume();
                self.qualident()
            }
            _ => AstNode::EMPTY,
        }
    }

    /// ```text
    /// procedureHeader :=
    ///   PROCEDURE ident ( '(' formalParamList? ')' ( ':' qualident )? )?
    /// ```
    fn procedure_header(&mut self) -> AstNode {
        let p = P::ProcedureHeader;
        self.enter(p);
        self.consume();

        let name = self.ident(p, &TokenSet::from_tokens(&[Token::LParen]));

        let (params, ret) = match self.la() {
            Token::LParen => {
                let params = match self.consume() {
                    Token::RParen => {
                        AstNode::nonterminal(A::FparamList, vec![])
                    }
                    _ => self.formal_param_list(),
                };

                self.expect(p, Token::RParen, &TokenSet::new());
                (params, self.result_type())
            }
            _ => (AstNode::EMPTY, AstNode::EMPTY),
        };

        node(A::ProcDef, [AstNode::ident(name), params, ret])
    }

    /// ```text
    /// formalParamList := formalParams ( ';' formalParams )*
    /// ```
    fn formal_param_list(&mut self) -> AstNode {
        self.enter(P::FormalParamList);

        let mut params = Vec::new();

        loop {
            params.push(self.formal_params());

            if self.la() != Token::Semicolon {
                break;
            }

            let pos = self.la_pos();

            if self.consume() == Token::RParen {
                let kind = ErrorKind::SemicolonAfterFormalParamList;
                self.warn_semicolon(kind, pos);
                break;
            }
        }

        AstNode::nonterminal(A::FparamList, params)
    }

    /// ```text
    /// formalParams := identList ':' formalType | attribFormalParams
    /// ```
    fn formal_params(&mut self) -> AstNode {
        let p = P::FormalParams;
        self.enter(p);

        if self.first(P::AttribFormalParams).contains(self.la()) {
            return self.attrib_formal_params();
        }

        if self.la() != Token::Identifier {
            self.error_set(self.first(p));
            self.recover(p, &TokenSet::new());
            return AstNode::EMPTY;
        }

        let (idents, ty) = self.formal_params_tail(p);
        node(A::Fparams, [idents, ty])
    }

    /// ```text
    /// attribFormalParams := ( CONST | VAR ) identList ':' formalType
    /// ```
    fn attrib_formal_params(&mut self) -> AstNode {
        let p = P::AttribFormalParams;
        self.enter(p);

        let attrib = match self.la() {
            Token::Var => A::VarP,
            _ => A::ConstP,
        };

        self.consume();

        let (idents, ty) = self.formal_params_tail(p);
        node(A::Fparams, [idents, node(attrib, [ty])])
    }

    fn formal_params_tail(&mut self, p: P) -> (AstNode, AstNode) {
        let idents = self.ident_list();
        self.expect_then(p, Token::Colon, P::FormalType);

        (idents, self.formal_type())
    }

    /// ```text
    /// block := declaration* ( BEGIN statementSequence )? END
    /// ```
    fn block(&mut self) -> AstNode {
        let p = P::Block;
        self.enter(p);

        let declaration = self.first(P::Declaration);
        let mut decls = Vec::new();

        loop {
            match self.la() {
                Token::Begin | Token::End => break,
                la if declaration.contains(la) => {
                    self.declaration(&mut decls)
                }
                Token::Module => self.disabled_module_declaration(),
                _ => {
                    self.error_set(self.first(p));
                    self.recover(p, self.first(p));

                    if !declaration.contains(self.la()) {
                        break;
                    }
                }
            }
        }

        let body = match self.la() {
            Token::Begin => {
                self.consume();
                self.statement_sequence()
            }
            _ => AstNode::EMPTY,
        };

        self.expect(p, Token::End, &TokenSet::new());

        node(A::Block, [AstNode::nonterminal(A::DeclList, decls), body])
    }

    /// One `CONST`,
    ///   `TYPE`
    ///   or `VAR` section,
    ///   procedure
    ///   or local module,
    ///     appending each declaration to `decls`.
    ///
    /// ```text
    /// declaration :=
    ///   CONST ( constDefinition ';' )* |
    ///   TYPE ( typeDeclaration ';' )* |
    ///   VAR ( variableDeclaration ';' )* |
    ///   procedureDeclaration ';' |
    ///   moduleDeclaration ';'
    /// ```
    fn declaration(&mut self, decls: &mut Vec<AstNode>) {
        let p = P::Declaration;
        self.enter(p);

        match self.la() {
            Token::Const => self.section(p, decls, Self::const_definition),
            Token::Type => self.section(p, decls, Self::type_declaration),
            Token::Var => self.section(p, decls, Self::variable_declaration),
            la => {
                decls.push(match la {
                    Token::Procedure => self.procedure_declaration(),
                    _ => self.module_declaration(),
                });

                self.expect(p, Token::Semicolon, &TokenSet::new());
            }
        }
    }

    /// A local module where `local-modules` is off.
    ///
    /// The module is reported as unexpected and then parsed as a whole
    ///   and discarded,
    ///     so that its body does not cascade into further errors.
    fn disabled_module_declaration(&mut self) {
        self.error_set(self.first(P::Block));
        self.module_declaration();
        self.expect(P::Declaration, Token::Semicolon, &TokenSet::new());
    }

    /// ```text
    /// procedureDeclaration := procedureHeader ';' block ident
    /// ```
    fn procedure_declaration(&mut self) -> AstNode {
        let p = P::ProcedureDeclaration;
        self.enter(p);

        let header = self.procedure_header();
        self.expect_then(p, Token::Semicolon, P::Block);
        let body = self.nested(P::Block, Self::block);
        self.ident(p, &TokenSet::new());

        node(A::Proc, [header, body])
    }

    /// ```text
    /// moduleDeclaration :=
    ///   MODULE ident modulePriority? ';' import* export? block ident
    /// ```
    fn module_declaration(&mut self) -> AstNode {
        let p = P::ModuleDeclaration;
        self.enter(p);
        self.consume();

        let after_name =
            TokenSet::from_tokens(&[Token::LBracket, Token::Semicolon]);
        let name = self.ident(p, &after_name);

        let priority = match self.la() {
            Token::LBracket => self.module_priority(),
            _ => AstNode::EMPTY,
        };

        let after_header = self
            .first(P::Import)
            .with(self.first(P::Block))
            .with_token(Token::Export);
        self.expect(p, Token::Semicolon, &after_header);

        let imports = self.import_list();

        let export = match self.la() {
            Token::Export => self.export(),
            _ => AstNode::EMPTY,
        };

        let block = self.nested(P::Block, Self::block);
        self.ident(p, &TokenSet::new());

        node(
            A::ModDecl,
            [AstNode::ident(name), priority, imports, export, block],
        )
    }
}

fn ident_only() -> TokenSet {
    TokenSet::from_tokens(&[Token::Identifier])
}
