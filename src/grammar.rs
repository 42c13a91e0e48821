// FIRST and FOLLOW sets of the Modula-2 grammar
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

//! FIRST and FOLLOW sets of the grammar productions.
//!
//! The parser uses FIRST sets to choose between alternatives and both sets
//!   to resynchronise after a syntax error.
//! Each set is defined statically as a union of token slices.
//!
//! A few productions accept different symbols depending on [`Options`]:
//!
//!   - `const-parameters` off selects the alternates of
//!     [`FormalType`], [`AttributedFormalType`], [`FormalParamList`],
//!     [`FormalParams`], and [`AttribFormalParams`],
//!       which then exclude `CONST`; and
//!   - `variant-records` on selects the alternate of
//!     [`TypeDeclarationTail`],
//!       whose FOLLOW set then admits `|` and `ELSE`; and
//!   - `local-modules` off selects the alternates of [`Block`] and
//!     [`Declaration`],
//!       which then exclude `MODULE`.
//!
//! Such a production carries an alternate pair of sets that replaces the
//!   base pair when its [`AltWhen`] condition holds.
//! [`GrammarSets`] resolves every production against a given [`Options`]
//!   once,
//!     so that lookups during parsing are simple indexing.
//!
//! [`FormalType`]: Production::FormalType
//! [`AttributedFormalType`]: Production::AttributedFormalType
//! [`FormalParamList`]: Production::FormalParamList
//! [`FormalParams`]: Production::FormalParams
//! [`AttribFormalParams`]: Production::AttribFormalParams
//! [`TypeDeclarationTail`]: Production::TypeDeclarationTail
//! [`Block`]: Production::Block
//! [`Declaration`]: Production::Declaration

use crate::options::{Flag, Options};
use crate::token::{Token, TokenSet};
use std::fmt::{self, Display};

/// A non-terminal of the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Production {
    DefinitionModule,
    Import,
    IdentList,
    Definition,
    ConstDefinition,
    TypeDefinition,
    Type,
    TypeDeclarationTail,
    SimpleType,
    Qualident,
    Enumeration,
    SubrangeType,
    ArrayType,
    RecordType,
    FieldListSequence,
    FieldList,
    Variant,
    CaseLabelList,
    CaseLabels,
    SetType,
    PointerType,
    ProcedureType,
    FormalTypeList,
    AttributedFormalType,
    FormalType,
    ProcedureHeader,
    FormalParamList,
    FormalParams,
    AttribFormalParams,
    VariableDeclaration,
    ImplementationModule,
    ProgramModule,
    ModulePriority,
    Block,
    Declaration,
    TypeDeclaration,
    ProcedureDeclaration,
    ModuleDeclaration,
    Export,
    StatementSequence,
    Statement,
    AssignmentOrProcCall,
    ActualParameters,
    ExpressionList,
    ReturnStatement,
    IfStatement,
    CaseStatement,
    Case,
    WhileStatement,
    RepeatStatement,
    LoopStatement,
    ForStatement,
    WithStatement,
    Designator,
    Expression,
    SimpleExpression,
    Term,
    Factor,
    SetValue,
    Element,
}

impl Production {
    pub const COUNT: usize = Self::Element as usize + 1;

    pub const ALL: [Production; Self::COUNT] = {
        use Production::*;
        [
            DefinitionModule,
            Import,
            IdentList,
            Definition,
            ConstDefinition,
            TypeDefinition,
            Type,
            TypeDeclarationTail,
            SimpleType,
            Qualident,
            Enumeration,
            SubrangeType,
            ArrayType,
            RecordType,
            FieldListSequence,
            FieldList,
            Variant,
            CaseLabelList,
            CaseLabels,
            SetType,
            PointerType,
            ProcedureType,
            FormalTypeList,
            AttributedFormalType,
            FormalType,
            ProcedureHeader,
            FormalParamList,
            FormalParams,
            AttribFormalParams,
            VariableDeclaration,
            ImplementationModule,
            ProgramModule,
            ModulePriority,
            Block,
            Declaration,
            TypeDeclaration,
            ProcedureDeclaration,
            ModuleDeclaration,
            Export,
            StatementSequence,
            Statement,
            AssignmentOrProcCall,
            ActualParameters,
            ExpressionList,
            ReturnStatement,
            IfStatement,
            CaseStatement,
            Case,
            WhileStatement,
            RepeatStatement,
            LoopStatement,
            ForStatement,
            WithStatement,
            Designator,
            Expression,
            SimpleExpression,
            Term,
            Factor,
            SetValue,
            Element,
        ]
    };

    /// Static FIRST and FOLLOW data of this production.
    pub fn entry(self) -> Entry {
        use data::*;
        use Production::*;

        match self {
            DefinitionModule => base(&[&[Token::Definition]], EOF),
            Import => base(&[IMPORT_FIRST], IMPORT_FOLLOW),
            IdentList => base(&[IDENT], IDENT_LIST_FOLLOW),
            Definition => base(&[DEFINITION_FIRST], &[DEFINITION_FIRST, END]),
            ConstDefinition | TypeDefinition | VariableDeclaration
            | TypeDeclaration | ProcedureHeader | ProcedureDeclaration
            | ModuleDeclaration | ModulePriority => {
                base(self.lead(), SEMI)
            }
            Type | ArrayType | RecordType | SetType | PointerType
            | ProcedureType | FormalTypeList => {
                base(self.lead(), TYPE_FOLLOW)
            }
            TypeDeclarationTail => Entry {
                base: Sets::new(&[TYPE_FIRST], &[TYPE_FOLLOW_BASE]),
                alt: Some((
                    AltWhen::On(Flag::VariantRecords),
                    Sets::new(&[TYPE_FIRST], TYPE_FOLLOW),
                )),
            },
            SimpleType | Enumeration | SubrangeType => {
                base(self.lead(), SIMPLE_TYPE_FOLLOW)
            }
            Qualident => base(&[IDENT], QUALIDENT_FOLLOW),
            FieldListSequence => base(&[FIELD_LIST_FIRST], &[VARIANT_END]),
            FieldList => base(&[FIELD_LIST_FIRST], &[SEMI_END, VARIANT_SEP]),
            Variant | Case => base(EXPR_FIRST, &[VARIANT_END]),
            CaseLabelList => base(EXPR_FIRST, &[&[Token::Colon]]),
            CaseLabels => base(EXPR_FIRST, &[&[Token::Comma, Token::Colon]]),
            AttributedFormalType => const_param(
                &[&[Token::Const], ATTRIB_FIRST, FORMAL_TYPE_FIRST],
                &[ATTRIB_FIRST, FORMAL_TYPE_FIRST],
                &[&[Token::Comma, Token::RParen]],
            ),
            FormalType => const_param(
                &[&[Token::Const], FORMAL_TYPE_FIRST],
                &[FORMAL_TYPE_FIRST],
                &[&[Token::Comma, Token::RParen, Token::Semicolon]],
            ),
            FormalParamList => const_param(
                &[&[Token::Const], ATTRIB_FIRST, IDENT],
                &[ATTRIB_FIRST, IDENT],
                &[&[Token::RParen]],
            ),
            FormalParams => const_param(
                &[&[Token::Const], ATTRIB_FIRST, IDENT],
                &[ATTRIB_FIRST, IDENT],
                &[&[Token::Semicolon, Token::RParen]],
            ),
            AttribFormalParams => const_param(
                &[&[Token::Const], ATTRIB_FIRST],
                &[ATTRIB_FIRST],
                &[&[Token::Semicolon, Token::RParen]],
            ),
            ImplementationModule | ProgramModule => base(self.lead(), EOF),
            Block => {
                local_module(BLOCK_FIRST, BLOCK_FIRST_NO_MODULE, &[IDENT])
            }
            Declaration => local_module(
                &[DECLARATION_FIRST],
                &[DEFINITION_FIRST],
                BLOCK_FIRST,
            ),
            Export => base(&[&[Token::Export]], BLOCK_FIRST),
            StatementSequence => base(&[STMT_FIRST], &[STMT_SEQ_FOLLOW]),
            Statement | AssignmentOrProcCall | ReturnStatement | IfStatement
            | CaseStatement | WhileStatement | RepeatStatement
            | LoopStatement | ForStatement | WithStatement => {
                base(self.lead(), STMT_FOLLOW)
            }
            ActualParameters => base(&[&[Token::LParen]], FACTOR_FOLLOW),
            ExpressionList => {
                base(EXPR_FIRST, &[&[Token::RParen, Token::RBracket]])
            }
            Designator => base(&[IDENT], DESIGNATOR_FOLLOW),
            Expression => base(EXPR_FIRST, EXPR_FOLLOW),
            SimpleExpression => base(EXPR_FIRST, SIMPLE_EXPR_FOLLOW),
            Term => base(FACTOR_FIRST, TERM_FOLLOW),
            Factor => base(FACTOR_FIRST, FACTOR_FOLLOW),
            SetValue => base(&[&[Token::LBrace], IDENT], FACTOR_FOLLOW),
            Element => base(EXPR_FIRST, &[&[Token::Comma, Token::RBrace]]),
        }
    }

    /// FIRST of productions that share their FOLLOW with others.
    fn lead(self) -> Union {
        use data::*;
        use Production::*;

        match self {
            ConstDefinition | TypeDefinition | VariableDeclaration
            | TypeDeclaration | Qualident | Designator
            | AssignmentOrProcCall => &[IDENT],
            ProcedureHeader | ProcedureDeclaration | ProcedureType => {
                &[&[Token::Procedure]]
            }
            ModuleDeclaration | ProgramModule => &[&[Token::Module]],
            ModulePriority => &[&[Token::LBracket]],
            Type => &[TYPE_FIRST],
            SimpleType => &[SIMPLE_TYPE_FIRST],
            Enumeration | FormalTypeList => &[&[Token::LParen]],
            SubrangeType => &[&[Token::Identifier, Token::LBracket]],
            ArrayType => &[&[Token::Array]],
            RecordType => &[&[Token::Record]],
            SetType => &[&[Token::Set]],
            PointerType => &[&[Token::Pointer]],
            ImplementationModule => &[&[Token::Implementation]],
            Statement => &[STMT_FIRST],
            ReturnStatement => &[&[Token::Return]],
            IfStatement => &[&[Token::If]],
            CaseStatement => &[&[Token::Case]],
            WhileStatement => &[&[Token::While]],
            RepeatStatement => &[&[Token::Repeat]],
            LoopStatement => &[&[Token::Loop]],
            ForStatement => &[&[Token::For]],
            WithStatement => &[&[Token::With]],
            _ => &[],
        }
    }

    /// Name of this production as it appears in grammar notation.
    pub fn name(self) -> &'static str {
        use Production::*;

        match self {
            DefinitionModule => "definitionModule",
            Import => "import",
            IdentList => "identList",
            Definition => "definition",
            ConstDefinition => "constDefinition",
            TypeDefinition => "typeDefinition",
            Type => "type",
            TypeDeclarationTail => "typeDeclarationTail",
            SimpleType => "simpleType",
            Qualident => "qualident",
            Enumeration => "enumeration",
            SubrangeType => "subrangeType",
            ArrayType => "arrayType",
            RecordType => "recordType",
            FieldListSequence => "fieldListSequence",
            FieldList => "fieldList",
            Variant => "variant",
            CaseLabelList => "caseLabelList",
            CaseLabels => "caseLabels",
            SetType => "setType",
            PointerType => "pointerType",
            ProcedureType => "procedureType",
            FormalTypeList => "formalTypeList",
            AttributedFormalType => "attributedFormalType",
            FormalType => "formalType",
            ProcedureHeader => "procedureHeader",
            FormalParamList => "formalParamList",
            FormalParams => "formalParams",
            AttribFormalParams => "attribFormalParams",
            VariableDeclaration => "variableDeclaration",
            ImplementationModule => "implementationModule",
            ProgramModule => "programModule",
            ModulePriority => "modulePriority",
            Block => "block",
            Declaration => "declaration",
            TypeDeclaration => "typeDeclaration",
            ProcedureDeclaration => "procedureDeclaration",
            ModuleDeclaration => "moduleDeclaration",
            Export => "export",
            StatementSequence => "statementSequence",
            Statement => "statement",
            AssignmentOrProcCall => "assignmentOrProcCall",
            ActualParameters => "actualParameters",
            ExpressionList => "expressionList",
            ReturnStatement => "returnStatement",
            IfStatement => "ifStatement",
            CaseStatement => "caseStatement",
            Case => "case",
            WhileStatement => "whileStatement",
            RepeatStatement => "repeatStatement",
            LoopStatement => "loopStatement",
            ForStatement => "forStatement",
            WithStatement => "withStatement",
            Designator => "designator",
            Expression => "expression",
            SimpleExpression => "simpleExpression",
            Term => "term",
            Factor => "factor",
            SetValue => "setValue",
            Element => "element",
        }
    }
}

impl Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Union of static token slices.
type Union = &'static [&'static [Token]];

/// FIRST and FOLLOW of a production,
///   each a [`Union`].
#[derive(Debug, Clone, Copy)]
pub struct Sets {
    first: Union,
    follow: Union,
}

impl Sets {
    const fn new(first: Union, follow: Union) -> Self {
        Self { first, follow }
    }

    fn resolve(union: Union) -> TokenSet {
        union.iter().flat_map(|slice| slice.iter().copied()).collect()
    }

    pub fn first(&self) -> TokenSet {
        Self::resolve(self.first)
    }

    pub fn follow(&self) -> TokenSet {
        Self::resolve(self.follow)
    }
}

/// Condition under which the alternate sets of a production are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AltWhen {
    On(Flag),
    Off(Flag),
}

impl AltWhen {
    pub fn holds(self, options: &Options) -> bool {
        match self {
            Self::On(flag) => options.get(flag),
            Self::Off(flag) => !options.get(flag),
        }
    }
}

/// Static grammar data of a production.
#[derive(Debug, Clone, Copy)]
pub struct Entry {
    pub base: Sets,
    pub alt: Option<(AltWhen, Sets)>,
}

impl Entry {
    /// Sets in effect under `options`.
    pub fn active(&self, options: &Options) -> &Sets {
        match &self.alt {
            Some((when, alt)) if when.holds(options) => alt,
            _ => &self.base,
        }
    }
}

fn base(first: Union, follow: Union) -> Entry {
    Entry {
        base: Sets::new(first, follow),
        alt: None,
    }
}

/// Entry whose FIRST set includes `CONST` only with `const-parameters`.
fn const_param(
    with_const: Union,
    without_const: Union,
    follow: Union,
) -> Entry {
    Entry {
        base: Sets::new(with_const, follow),
        alt: Some((
            AltWhen::Off(Flag::ConstParameters),
            Sets::new(without_const, follow),
        )),
    }
}

/// Entry whose FIRST set includes `MODULE` only with `local-modules`.
fn local_module(
    with_module: Union,
    without_module: Union,
    follow: Union,
) -> Entry {
    Entry {
        base: Sets::new(with_module, follow),
        alt: Some((
            AltWhen::Off(Flag::LocalModules),
            Sets::new(without_module, follow),
        )),
    }
}

/// FIRST and FOLLOW sets of every production,
///   resolved against a set of [`Options`].
pub struct GrammarSets {
    first: Vec<TokenSet>,
    follow: Vec<TokenSet>,
}

impl GrammarSets {
    pub fn new(options: &Options) -> Self {
        let (first, follow) = Production::ALL
            .iter()
            .map(|p| {
                let entry = p.entry();
                let sets = entry.active(options);
                (sets.first(), sets.follow())
            })
            .unzip();

        Self { first, follow }
    }

    #[inline]
    pub fn first(&self, p: Production) -> &TokenSet {
        &self.first[p as usize]
    }

    #[inline]
    pub fn follow(&self, p: Production) -> &TokenSet {
        &self.follow[p as usize]
    }
}

/// Token slices from which the sets are composed.
mod data {
    use super::Union;
    use crate::token::Token::{self, *};

    pub const EOF: Union = &[&[EndOfFile]];
    pub const IDENT: &[Token] = &[Identifier];
    pub const END: &[Token] = &[End];
    pub const SEMI: Union = &[&[Semicolon]];
    pub const SEMI_END: &[Token] = &[Semicolon, End];

    pub const IMPORT_FIRST: &[Token] = &[From, Import];
    pub const IMPORT_FOLLOW: Union = &[
        IMPORT_FIRST,
        &[Export, Const, Type, Var, Procedure, Module, Begin, End],
    ];

    pub const DEFINITION_FIRST: &[Token] = &[Const, Type, Var, Procedure];
    pub const DECLARATION_FIRST: &[Token] =
        &[Const, Type, Var, Procedure, Module];
    pub const BLOCK_FIRST: Union = &[DECLARATION_FIRST, &[Begin, End]];
    pub const BLOCK_FIRST_NO_MODULE: Union =
        &[DEFINITION_FIRST, &[Begin, End]];
    pub const IDENT_LIST_FOLLOW: Union = &[&[Semicolon, Colon, RParen]];

    pub const SIMPLE_TYPE_FIRST: &[Token] = &[Identifier, LParen, LBracket];
    pub const TYPE_FIRST: &[Token] = &[
        Identifier, LParen, LBracket, Array, Record, Set, Pointer, Procedure,
    ];
    pub const TYPE_FOLLOW_BASE: &[Token] = SEMI_END;
    pub const VARIANT_SEP: &[Token] = &[Bar, Else];
    pub const VARIANT_END: &[Token] = &[Bar, Else, End];
    pub const TYPE_FOLLOW: Union = &[TYPE_FOLLOW_BASE, VARIANT_SEP];
    pub const SIMPLE_TYPE_FOLLOW: Union =
        &[TYPE_FOLLOW_BASE, VARIANT_SEP, &[Comma, Of]];
    pub const QUALIDENT_FOLLOW: Union = &[
        TYPE_FOLLOW_BASE,
        VARIANT_SEP,
        &[Comma, Of, Colon, RParen, LBracket, LBrace],
    ];

    pub const FIELD_LIST_FIRST: &[Token] = &[Identifier, Case];
    pub const ATTRIB_FIRST: &[Token] = &[Var];
    pub const FORMAL_TYPE_FIRST: &[Token] = &[Array, Identifier];

    pub const STMT_FIRST: &[Token] = &[
        Identifier, Return, If, Case, While, Repeat, Loop, For, With, Exit,
    ];
    pub const STMT_SEQ_FOLLOW: &[Token] = &[End, Elsif, Else, Until, Bar];
    pub const STMT_FOLLOW: Union = &[&[Semicolon], STMT_SEQ_FOLLOW];

    pub const LITERALS: &[Token] = &[
        String,
        Integer,
        Real,
        Char,
        MalformedString,
        MalformedInteger,
        MalformedReal,
    ];
    pub const FACTOR_FIRST: Union =
        &[LITERALS, &[LBrace, Identifier, LParen, Not]];
    pub const EXPR_FIRST: Union =
        &[&[Plus, Minus], LITERALS, &[LBrace, Identifier, LParen, Not]];

    pub const EXPR_FOLLOW_ONLY: &[Token] = &[
        Then, Do, Of, To, By, Comma, RParen, RBracket, RBrace, Range, Colon,
    ];
    pub const RELATIONS: &[Token] =
        &[Equal, NotEqual, Less, LessOrEqual, Greater, GreaterOrEqual, In];
    pub const ADD_OPS: &[Token] = &[Plus, Minus, Or];
    pub const MUL_OPS: &[Token] = &[Asterisk, Solidus, Div, Mod, And];

    pub const EXPR_FOLLOW: Union =
        &[&[Semicolon], STMT_SEQ_FOLLOW, EXPR_FOLLOW_ONLY];
    pub const SIMPLE_EXPR_FOLLOW: Union =
        &[&[Semicolon], STMT_SEQ_FOLLOW, EXPR_FOLLOW_ONLY, RELATIONS];
    pub const TERM_FOLLOW: Union = &[
        &[Semicolon],
        STMT_SEQ_FOLLOW,
        EXPR_FOLLOW_ONLY,
        RELATIONS,
        ADD_OPS,
    ];
    pub const FACTOR_FOLLOW: Union = &[
        &[Semicolon],
        STMT_SEQ_FOLLOW,
        EXPR_FOLLOW_ONLY,
        RELATIONS,
        ADD_OPS,
        MUL_OPS,
    ];
    pub const DESIGNATOR_FOLLOW: Union = &[
        &[Semicolon, Assign, LParen],
        STMT_SEQ_FOLLOW,
        EXPR_FOLLOW_ONLY,
        RELATIONS,
        ADD_OPS,
        MUL_OPS,
    ];
}

#[cfg(test)]
mod test {
    use super::*;
    use Production::*;
    use Token as T;

    fn sets(options: Options) -> GrammarSets {
        GrammarSets::new(&options)
    }

    fn with(flag: Flag, value: bool) -> GrammarSets {
        sets(Options::default().with_flag(flag, value))
    }

    #[test]
    fn formal_type_first_depends_on_const_parameters() {
        let on = with(Flag::ConstParameters, true);
        let off = with(Flag::ConstParameters, false);

        assert_eq!(
            &TokenSet::from_tokens(&[T::Const, T::Array, T::Identifier]),
            on.first(FormalType)
        );
        assert_eq!(
            &TokenSet::from_tokens(&[T::Array, T::Identifier]),
            off.first(FormalType)
        );
    }

    #[test]
    fn other_const_parameter_productions() {
        let on = with(Flag::ConstParameters, true);
        let off = with(Flag::ConstParameters, false);

        for p in [
            AttributedFormalType,
            FormalParamList,
            FormalParams,
            AttribFormalParams,
        ] {
            assert!(on.first(p).contains(T::Const), "{p}");
            assert!(!off.first(p).contains(T::Const), "{p}");
            assert!(on.first(p).contains(T::Var), "{p}");
            assert!(off.first(p).contains(T::Var), "{p}");
            assert_eq!(on.follow(p), off.follow(p), "{p}");
        }
    }

    #[test]
    fn type_declaration_tail_follow_depends_on_variant_records() {
        let on = with(Flag::VariantRecords, true);
        let off = with(Flag::VariantRecords, false);

        assert_eq!(
            &TokenSet::from_tokens(&[T::Semicolon, T::End, T::Bar, T::Else]),
            on.follow(TypeDeclarationTail)
        );
        assert_eq!(
            &TokenSet::from_tokens(&[T::Semicolon, T::End]),
            off.follow(TypeDeclarationTail)
        );
        assert_eq!(
            on.first(TypeDeclarationTail),
            off.first(TypeDeclarationTail)
        );
    }

    #[test]
    fn declaration_first_depends_on_local_modules() {
        let on = with(Flag::LocalModules, true);
        let off = with(Flag::LocalModules, false);

        for p in [Block, Declaration] {
            assert!(on.first(p).contains(T::Module), "{p}");
            assert!(!off.first(p).contains(T::Module), "{p}");
            assert!(off.first(p).contains(T::Procedure), "{p}");
            assert_eq!(on.follow(p), off.follow(p), "{p}");
        }

        assert!(off.first(Block).contains(T::Begin));
    }

    #[test]
    fn every_production_has_first_and_follow() {
        let sets = sets(Options::default());

        for p in Production::ALL {
            assert!(!sets.first(p).is_empty(), "FIRST({p}) is empty");
            assert!(!sets.follow(p).is_empty(), "FOLLOW({p}) is empty");
        }
    }

    #[test]
    fn expression_sets_nest() {
        let sets = sets(Options::default());

        assert!(sets.first(Term).is_subset(sets.first(Expression)));
        assert!(sets.first(Term).is_subset(sets.first(SimpleExpression)));
        assert!(sets
            .follow(Expression)
            .is_subset(sets.follow(SimpleExpression)));
        assert!(sets.follow(SimpleExpression).is_subset(sets.follow(Term)));
        assert!(sets.follow(Term).is_subset(sets.follow(Factor)));
        assert!(sets.follow(Statement).is_subset(sets.follow(Expression)));
        assert!(sets.first(Factor).contains(T::MalformedInteger));
    }

    #[test]
    fn statement_follow() {
        let sets = sets(Options::default());

        assert_eq!(
            &TokenSet::from_tokens(&[
                T::Semicolon,
                T::End,
                T::Elsif,
                T::Else,
                T::Until,
                T::Bar
            ]),
            sets.follow(Statement)
        );
        assert!(sets
            .first(StatementSequence)
            .is_disjoint(sets.follow(StatementSequence)));
    }

    #[test]
    fn import_follow() {
        let sets = sets(Options::default());

        assert_eq!(
            &TokenSet::from_tokens(&[
                T::From,
                T::Import,
                T::Export,
                T::Const,
                T::Type,
                T::Var,
                T::Procedure,
                T::Module,
                T::Begin,
                T::End
            ]),
            sets.follow(Import)
        );
    }

    #[test]
    fn alt_when() {
        let opts = Options::default().with_flag(Flag::Synonyms, false);

        assert!(AltWhen::Off(Flag::Synonyms).holds(&opts));
        assert!(!AltWhen::On(Flag::Synonyms).holds(&opts));
    }
}
