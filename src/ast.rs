// Abstract syntax tree
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

//! Abstract syntax tree produced by the parser.
//!
//! An [`AstNode`] is either a _non-terminal_,
//!   holding an ordered list of child nodes,
//!   or a _terminal_,
//!   holding an ordered list of leaves,
//!     each an interned lexeme.
//! Which of the two a node is follows from its [`AstTag`],
//!   as does its shape.
//! Optional constituents are represented by [`AstNode::EMPTY`] so that
//!   nodes of a given tag always have the same arity,
//!     with the exception of list nodes such as [`AstTag::StmtSeq`].
//!
//! The principal shapes are:
//!
//! | Tag        | Children                                           |
//! |------------|----------------------------------------------------|
//! | `ROOT`     | `FILENAME`, `OPTIONS`, module                      |
//! | `DEFMOD`   | `IDENT`, `IMPLIST`, export, `DEFLIST`              |
//! | `IMPMOD`   | `IDENT`, `PRIORITY`, `IMPLIST`, `BLOCK`            |
//! | `PGMMOD`   | `IDENT`, `PRIORITY`, `IMPLIST`, `BLOCK`            |
//! | `MODDECL`  | `IDENT`, `PRIORITY`, `IMPLIST`, export, `BLOCK`    |
//! | `BLOCK`    | `DECLLIST`, `STMTSEQ`                              |
//! | `PROCDEF`  | `IDENT`, `FPARAMLIST`, result type                 |
//! | `PROC`     | `PROCDEF`, `BLOCK`                                 |
//! | `FPARAMS`  | `IDENTLIST`, formal type                           |
//! | `IF`       | condition, `STMTSEQ`, `ELSIFSEQ`, else `STMTSEQ`   |
//! | `FOR`      | `IDENT`, from, to, step, `STMTSEQ`                 |
//! | `VRNTFLD`  | tag `IDENT`, tag type, `VARIANTLIST`, else fields  |
//!
//! Dropping a node releases its lexemes.

use crate::sym::Symbol;
use std::fmt::{self, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AstTag {
    Empty,
    Root,
    Filename,
    Options,
    DefMod,
    ImpMod,
    PgmMod,
    ImpList,
    Import,
    UnqImp,
    DefList,
    ConstDef,
    TypeDef,
    VarDecl,
    ProcDef,
    Subr,
    Enum,
    Set,
    Array,
    Record,
    Pointer,
    ProcType,
    FieldListSeq,
    FieldList,
    VrntFld,
    VariantList,
    Variant,
    ClabelList,
    Clabels,
    FparamList,
    Fparams,
    VarP,
    ConstP,
    OpenArray,
    FtypeList,
    Block,
    DeclList,
    Proc,
    ModDecl,
    Export,
    QualExp,
    StmtSeq,
    Assign,
    PCall,
    Return,
    Exit,
    If,
    ElsifSeq,
    Elsif,
    Switch,
    CaseList,
    Case,
    Loop,
    While,
    Repeat,
    For,
    With,
    Args,
    Desig,
    Field,
    Index,
    Deref,
    Neg,
    Not,
    Eq,
    Neq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    In,
    Plus,
    Minus,
    Or,
    Asterisk,
    Solidus,
    Div,
    Mod,
    And,
    FCall,
    SetVal,
    Range,
    Priority,
    Ident,
    IdentList,
    Qualident,
    IntVal,
    RealVal,
    ChrVal,
    QuotedVal,
    Pragma,
}

impl AstTag {
    /// Name of the tag as rendered in S-expressions.
    pub fn name(self) -> &'static str {
        use AstTag::*;

        match self {
            Empty => "EMPTY",
            Root => "ROOT",
            Filename => "FILENAME",
            Options => "OPTIONS",
            DefMod => "DEFMOD",
            ImpMod => "IMPMOD",
            PgmMod => "PGMMOD",
            ImpList => "IMPLIST",
            Import => "IMPORT",
            UnqImp => "UNQIMP",
            DefList => "DEFLIST",
            ConstDef => "CONSTDEF",
            TypeDef => "TYPEDEF",
            VarDecl => "VARDECL",
            ProcDef => "PROCDEF",
            Subr => "SUBR",
            Enum => "ENUM",
            Set => "SET",
            Array => "ARRAY",
            Record => "RECORD",
            Pointer => "POINTER",
            ProcType => "PROCTYPE",
            FieldListSeq => "FIELDLISTSEQ",
            FieldList => "FIELDLIST",
            VrntFld => "VRNTFLD",
            VariantList => "VARIANTLIST",
            Variant => "VARIANT",
            ClabelList => "CLABELLIST",
            Clabels => "CLABELS",
            FparamList => "FPARAMLIST",
            Fparams => "FPARAMS",
            VarP => "VARP",
            ConstP => "CONSTP",
            OpenArray => "OPENARRAY",
            FtypeList => "FTYPELIST",
            Block => "BLOCK",
            DeclList => "DECLLIST",
            Proc => "PROC",
            ModDecl => "MODDECL",
            Export => "EXPORT",
            QualExp => "QUALEXP",
            StmtSeq => "STMTSEQ",
            Assign => "ASSIGN",
            PCall => "PCALL",
            Return => "RETURN",
            Exit => "EXIT",
            If => "IF",
            ElsifSeq => "ELSIFSEQ",
            Elsif => "ELSIF",
            Switch => "SWITCH",
            CaseList => "CASELIST",
            Case => "CASE",
            Loop => "LOOP",
            While => "WHILE",
            Repeat => "REPEAT",
            For => "FOR",
            With => "WITH",
            Args => "ARGS",
            Desig => "DESIG",
            Field => "FIELD",
            Index => "INDEX",
            Deref => "DEREF",
            Neg => "NEG",
            Not => "NOT",
            Eq => "EQ",
            Neq => "NEQ",
            Lt => "LT",
            LtEq => "LTEQ",
            Gt => "GT",
            GtEq => "GTEQ",
            In => "IN",
            Plus => "PLUS",
            Minus => "MINUS",
            Or => "OR",
            Asterisk => "ASTERISK",
            Solidus => "SOLIDUS",
            Div => "DIV",
            Mod => "MOD",
            And => "AND",
            FCall => "FCALL",
            SetVal => "SETVAL",
            Range => "RANGE",
            Priority => "PRIORITY",
            Ident => "IDENT",
            IdentList => "IDENTLIST",
            Qualident => "QUALIDENT",
            IntVal => "INTVAL",
            RealVal => "REALVAL",
            ChrVal => "CHRVAL",
            QuotedVal => "QUOTEDVAL",
            Pragma => "PRAGMA",
        }
    }

    /// Whether nodes of this tag hold leaves rather than children.
    pub fn is_terminal(self) -> bool {
        use AstTag::*;

        matches!(
            self,
            Filename
                | Options
                | Ident
                | IdentList
                | Qualident
                | IntVal
                | RealVal
                | ChrVal
                | QuotedVal
                | Pragma
        )
    }

    /// Whether leaves of this tag are rendered quoted.
    pub fn is_quoted(self) -> bool {
        matches!(self, Self::QuotedVal | Self::Filename | Self::Options)
    }
}

impl Display for AstTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Content {
    Children(Vec<AstNode>),
    Leaves(Vec<Symbol>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstNode {
    tag: AstTag,
    content: Content,
}

impl AstNode {
    /// Placeholder for an absent constituent or one that could not be
    ///   parsed.
    pub const EMPTY: AstNode = AstNode {
        tag: AstTag::Empty,
        content: Content::Children(Vec::new()),
    };

    pub fn nonterminal(tag: AstTag, children: Vec<AstNode>) -> Self {
        debug_assert!(!tag.is_terminal(), "{tag} is a terminal tag");

        Self {
            tag,
            content: Content::Children(children),
        }
    }

    pub fn terminal(tag: AstTag, leaves: Vec<Symbol>) -> Self {
        debug_assert!(tag.is_terminal(), "{tag} is a non-terminal tag");

        Self {
            tag,
            content: Content::Leaves(leaves),
        }
    }

    /// `IDENT` node for `ident`,
    ///   or [`AstNode::EMPTY`] if there is none.
    pub fn ident(ident: Option<Symbol>) -> Self {
        match ident {
            Some(sym) => Self::terminal(AstTag::Ident, vec![sym]),
            None => Self::EMPTY,
        }
    }

    #[inline]
    pub fn tag(&self) -> AstTag {
        self.tag
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tag == AstTag::Empty
    }

    /// Number of children or leaves.
    pub fn subnode_count(&self) -> usize {
        match &self.content {
            Content::Children(children) => children.len(),
            Content::Leaves(leaves) => leaves.len(),
        }
    }

    /// Children of a non-terminal,
    ///   which is empty for terminals.
    pub fn children(&self) -> &[AstNode] {
        match &self.content {
            Content::Children(children) => children,
            Content::Leaves(_) => &[],
        }
    }

    /// Leaves of a terminal,
    ///   which is empty for non-terminals.
    pub fn leaves(&self) -> &[Symbol] {
        match &self.content {
            Content::Leaves(leaves) => leaves,
            Content::Children(_) => &[],
        }
    }

    pub fn child(&self, index: usize) -> Option<&AstNode> {
        self.children().get(index)
    }

    pub fn leaf(&self, index: usize) -> Option<&Symbol> {
        self.leaves().get(index)
    }
}

impl Default for AstNode {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// S-expression rendering for debugging,
///   such as `(ASSIGN (DESIG (IDENT x)) (INTVAL 1))`.
impl Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.tag)?;

        match &self.content {
            Content::Children(children) => {
                for child in children {
                    write!(f, " {child}")?;
                }
            }
            Content::Leaves(leaves) if self.tag.is_quoted() => {
                for leaf in leaves {
                    let quote = match leaf.as_bytes().contains(&b'"') {
                        true => '\'',
                        false => '"',
                    };

                    write!(f, " {quote}{leaf}{quote}")?;
                }
            }
            Content::Leaves(leaves) => {
                for leaf in leaves {
                    write!(f, " {leaf}")?;
                }
            }
        }

        write!(f, ")")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::sym;
    use crate::test::init_sym;

    fn sym(text: &str) -> Symbol {
        init_sym();
        sym::intern(text.as_bytes()).unwrap()
    }

    #[test]
    fn empty() {
        assert!(AstNode::EMPTY.is_empty());
        assert_eq!(0, AstNode::EMPTY.subnode_count());
        assert_eq!("(EMPTY)", AstNode::EMPTY.to_string());
        assert_eq!(AstNode::EMPTY, AstNode::default());
        assert_eq!(AstNode::EMPTY, AstNode::ident(None));
    }

    #[test]
    fn nonterminal_children_in_order() {
        let sut = AstNode::nonterminal(
            AstTag::Assign,
            vec![
                AstNode::ident(Some(sym("x"))),
                AstNode::terminal(AstTag::IntVal, vec![sym("1")]),
            ],
        );

        assert_eq!(AstTag::Assign, sut.tag());
        assert_eq!(2, sut.subnode_count());
        assert_eq!(Some(AstTag::Ident), sut.child(0).map(AstNode::tag));
        assert_eq!(Some(AstTag::IntVal), sut.child(1).map(AstNode::tag));
        assert_eq!(None, sut.child(2));
        assert!(sut.leaves().is_empty());
        assert_eq!("(ASSIGN (IDENT x) (INTVAL 1))", sut.to_string());
    }

    #[test]
    fn terminal_leaves_in_order() {
        let sut = AstNode::terminal(
            AstTag::IdentList,
            vec![sym("a"), sym("b"), sym("c")],
        );

        assert_eq!(3, sut.subnode_count());
        assert_eq!(b"b", sut.leaf(1).unwrap().as_bytes());
        assert!(sut.children().is_empty());
        assert_eq!("(IDENTLIST a b c)", sut.to_string());
    }

    #[test]
    fn quoted_leaves() {
        let plain = AstNode::terminal(AstTag::QuotedVal, vec![sym("hi")]);
        let quotes =
            AstNode::terminal(AstTag::QuotedVal, vec![sym("say \"hi\"")]);
        let options = AstNode::terminal(
            AstTag::Options,
            vec![sym("synonyms"), sym("coroutines")],
        );

        assert_eq!("(QUOTEDVAL \"hi\")", plain.to_string());
        assert_eq!("(QUOTEDVAL 'say \"hi\"')", quotes.to_string());
        assert_eq!(
            "(OPTIONS \"synonyms\" \"coroutines\")",
            options.to_string()
        );
    }

    #[test]
    fn nonterminal_without_children() {
        assert_eq!(
            "(EXIT)",
            AstNode::nonterminal(AstTag::Exit, vec![]).to_string()
        );
    }

    #[test]
    fn releases_leaves_on_drop() {
        let leaf = sym("releasedleaf");
        let node = AstNode::terminal(AstTag::Ident, vec![leaf.clone()]);

        assert_eq!(2, leaf.ref_count());
        drop(node);
        assert_eq!(1, leaf.ref_count());
    }
}
