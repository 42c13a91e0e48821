// Sets of terminal symbols
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

//! Fixed-width bit sets over [`Token`].
//!
//! FIRST and FOLLOW sets of the grammar are [`TokenSet`]s,
//!   as are the resynchronisation sets composed by the parser during
//!   error recovery.

use super::Token;
use crate::fmt::{ListDisplayWrapper, OrConjList, Raw};
use fixedbitset::FixedBitSet;
use std::fmt::{self, Debug, Display};

/// Set of [`Token`]s.
///
/// Bit `i` is set if and only if the token with index `i` is a member.
/// The number of members is cached.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenSet {
    bits: FixedBitSet,
    count: usize,
}

impl TokenSet {
    /// The empty set.
    pub fn new() -> Self {
        Self {
            bits: FixedBitSet::with_capacity(Token::COUNT),
            count: 0,
        }
    }

    /// Set containing exactly `tokens`.
    ///
    /// Duplicate tokens are permitted.
    pub fn from_tokens(tokens: &[Token]) -> Self {
        let mut set = Self::new();
        tokens.iter().for_each(|&t| set.insert(t));
        set
    }

    /// Union of all `sets`.
    pub fn union_of(sets: &[&TokenSet]) -> Self {
        let mut set = Self::new();
        sets.iter().for_each(|other| set.bits.union_with(&other.bits));
        set.recount();
        set
    }

    fn recount(&mut self) {
        self.count = self.bits.count_ones(..);
    }

    pub fn insert(&mut self, token: Token) {
        if !self.bits.put(token.index()) {
            self.count += 1;
        }
    }

    /// Union of `self` and `other`.
    pub fn with(&self, other: &TokenSet) -> Self {
        Self::union_of(&[self, other])
    }

    /// `self` with `token` added.
    pub fn with_token(&self, token: Token) -> Self {
        let mut set = self.clone();
        set.insert(token);
        set
    }

    #[inline]
    pub fn contains(&self, token: Token) -> bool {
        self.bits.contains(token.index())
    }

    /// Whether every member of `self` is a member of `other`.
    pub fn is_subset(&self, other: &TokenSet) -> bool {
        self.bits.is_subset(&other.bits)
    }

    /// Whether every member of `other` is a member of `self`.
    pub fn is_superset(&self, other: &TokenSet) -> bool {
        self.bits.is_superset(&other.bits)
    }

    /// Whether `self` and `other` share no members.
    pub fn is_disjoint(&self, other: &TokenSet) -> bool {
        self.bits.is_disjoint(&other.bits)
    }

    /// Number of members.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Members in token order.
    pub fn iter(&self) -> impl Iterator<Item = Token> + '_ {
        self.bits.ones().filter_map(Token::from_index)
    }

    /// English enumeration of the members,
    ///   e.g. "`;`, `END`, or identifier".
    pub fn enumerate(&self) -> impl Display + '_ {
        Enumeration(self.iter().collect())
    }
}

impl Default for TokenSet {
    fn default() -> Self {
        Self::new()
    }
}

struct Enumeration(Vec<Token>);

impl Display for Enumeration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        OrConjList::<Raw>::fmt(&self.0, f)
    }
}

impl FromIterator<Token> for TokenSet {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        let mut set = Self::new();
        iter.into_iter().for_each(|t| set.insert(t));
        set
    }
}

/// Set dump of the form `{ t1, t2 }` followed by the member count.
impl Display for TokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;

        for (i, token) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, " {token}")?;
        }

        write!(f, " }} ({})", self.count)
    }
}

impl Debug for TokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use Token::*;

    #[test]
    fn from_tokens_counts_distinct_members() {
        let sut = TokenSet::from_tokens(&[Begin, End, Begin, Semicolon]);

        assert_eq!(3, sut.count());
        assert!(sut.contains(Begin));
        assert!(sut.contains(Semicolon));
        assert!(!sut.contains(Identifier));
    }

    #[test]
    fn union_contains_members_of_either() {
        let a = TokenSet::from_tokens(&[Const, Type, Var]);
        let b = TokenSet::from_tokens(&[Var, Procedure, EndOfFile]);
        let sut = TokenSet::union_of(&[&a, &b]);

        for token in Token::ALL {
            assert_eq!(
                a.contains(token) || b.contains(token),
                sut.contains(token),
                "{token:?}"
            );
        }

        assert_eq!(5, sut.count());
        assert_eq!(sut, a.with(&b));
    }

    #[test]
    fn subset_and_superset() {
        let small = TokenSet::from_tokens(&[Plus, Minus]);
        let big = TokenSet::from_tokens(&[Plus, Minus, Or]);

        assert!(small.is_subset(&big));
        assert!(!big.is_subset(&small));
        assert!(big.is_superset(&small));
        assert!(TokenSet::new().is_subset(&small));
    }

    #[test]
    fn disjoint() {
        let a = TokenSet::from_tokens(&[Plus, Minus]);
        let b = TokenSet::from_tokens(&[Asterisk, Solidus]);

        assert!(a.is_disjoint(&b));
        assert!(!a.is_disjoint(&a.with_token(Asterisk).with(&b)));
    }

    #[test]
    fn count_is_popcount() {
        let sut = Token::ALL.iter().copied().collect::<TokenSet>();

        assert_eq!(Token::COUNT, sut.count());
        assert_eq!(Token::COUNT, sut.iter().count());
    }

    #[test]
    fn enumerates_in_token_order() {
        let sut = TokenSet::from_tokens(&[Identifier, Semicolon, End]);

        assert_eq!(
            "`END`, identifier, or `;`",
            sut.enumerate().to_string()
        );
        assert_eq!(
            "`;`",
            TokenSet::from_tokens(&[Semicolon]).enumerate().to_string()
        );
    }

    #[test]
    fn set_dump() {
        let sut = TokenSet::from_tokens(&[Comma, Colon]);

        assert_eq!("{ `,`, `:` } (2)", sut.to_string());
        assert_eq!("{ } (0)", TokenSet::new().to_string());
    }
}
