// Ordered lists of unique symbols
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

//! Append-only list of distinct [`Symbol`]s.
//!
//! The list is stored as a sequence of fixed-capacity segments of
//!   [`global::LIST_SEGMENT_SIZE`] entries each,
//!     so that growth never moves existing entries.
//! Each entry holds a reference to its symbol;
//!   dropping the list releases all of them.

use super::Symbol;
use crate::global;
use arrayvec::ArrayVec;
use std::error::Error;
use std::fmt::{self, Display};

type Segment = ArrayVec<Symbol, { global::LIST_SEGMENT_SIZE }>;

/// Failure to append to a [`SymbolList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListError {
    /// The symbol is already present in the list.
    DuplicateEntry,
}

impl Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateEntry => write!(f, "duplicate list entry"),
        }
    }
}

impl Error for ListError {}

/// Ordered list of distinct symbols.
///
/// Duplicates are detected by identity,
///   which for interned strings is equivalent to byte equality.
#[derive(Debug, Clone)]
pub struct SymbolList {
    segments: Vec<Segment>,
    count: usize,
}

impl SymbolList {
    /// New list holding `first`.
    pub fn new(first: Symbol) -> Self {
        let mut segment = Segment::new();
        segment.push(first);

        Self {
            segments: vec![segment],
            count: 1,
        }
    }

    /// Append `sym` unless it is already present.
    ///
    /// This is a linear scan of the list.
    pub fn append(&mut self, sym: Symbol) -> Result<(), ListError> {
        if self.contains(&sym) {
            return Err(ListError::DuplicateEntry);
        }

        match self.segments.last_mut() {
            Some(segment) if !segment.is_full() => segment.push(sym),
            _ => {
                let mut segment = Segment::new();
                segment.push(sym);
                self.segments.push(segment);
            }
        }

        self.count += 1;
        Ok(())
    }

    /// Entry at `index`,
    ///   if any.
    pub fn at(&self, index: usize) -> Option<&Symbol> {
        self.segments
            .get(index / global::LIST_SEGMENT_SIZE)
            .and_then(|segment| segment.get(index % global::LIST_SEGMENT_SIZE))
    }

    pub fn contains(&self, sym: &Symbol) -> bool {
        self.iter().any(|entry| entry == sym)
    }

    /// Number of entries.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.segments.iter().flatten()
    }
}
