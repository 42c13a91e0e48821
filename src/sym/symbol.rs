// String internment symbol objects
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

//! Symbol objects representing interned strings.
//!
//! See the [parent module](super) for more information.

use super::interner::Table;
use std::cell::RefCell;
use std::fmt::{self, Debug, Display};
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};

/// Storage for a single interned string.
///
/// Entries are owned by the [`Symbol`]s that reference them;
///   the repository holds only a weak reference.
/// Dropping the last [`Symbol`] drops the entry,
///   which unlinks itself from the repository it was interned in.
pub(super) struct Entry {
    /// Hash of `bytes`,
    ///   cached so that the owning bucket can be located on release.
    pub(super) key: u32,

    pub(super) bytes: Box<[u8]>,

    /// Repository that this entry was interned in.
    ///
    /// If the repository is gone,
    ///   there is nothing to unlink from.
    pub(super) table: Weak<RefCell<Table>>,
}

impl Drop for Entry {
    fn drop(&mut self) {
        let Some(table) = self.table.upgrade() else {
            return;
        };

        // The table may be borrowed if the repository itself is being torn
        //   down; dead entries are pruned on the next lookup regardless.
        let borrowed = table.try_borrow_mut();

        if let Ok(mut table) = borrowed {
            table.unlink(self.key, self as *const Entry);
        }
    }
}

/// Reference to an interned string.
///
/// Cloning a symbol retains the interned string and dropping it releases
///   it.
/// Symbols are [`Eq`] if and only if they refer to the same interned
///   string,
///     which is true if and only if their bytes are equal and they were
///     interned by the same repository.
///
/// Symbols resolve to their string via [`Display`] for output;
///   non-UTF-8 bytes are replaced.
/// Use [`Symbol::as_bytes`] for the raw value.
#[derive(Clone)]
pub struct Symbol(pub(super) Rc<Entry>);

impl Symbol {
    /// Raw bytes of the interned string.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0.bytes
    }

    /// Length of the interned string in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.bytes.is_empty()
    }

    /// Interned string as a string slice,
    ///   if it is valid UTF-8.
    ///
    /// Lexemes are always ASCII and so always succeed.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.0.bytes).ok()
    }

    /// Hash key used by the repository for this string.
    #[inline]
    pub fn key(&self) -> u32 {
        self.0.key
    }

    /// Number of live references to this interned string,
    ///   including `self`.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Rc::as_ptr(&self.0).hash(state)
    }
}

impl PartialEq<str> for Symbol {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for Symbol {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&String::from_utf8_lossy(self.as_bytes()), f)
    }
}

impl Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Symbol({:?})",
            String::from_utf8_lossy(self.as_bytes())
        )
    }
}

#[cfg(test)]
mod test {
    use super::super::Repository;

    #[test]
    fn clones_are_identical_and_counted() {
        let repo = Repository::with_buckets(3);
        let sut = repo.intern(b"bar").unwrap();

        assert_eq!(1, sut.ref_count());

        let retained = sut.clone();
        assert_eq!(sut, retained);
        assert_eq!(2, sut.ref_count());

        drop(retained);
        assert_eq!(1, sut.ref_count());
    }

    #[test]
    fn displays_lossily() {
        let repo = Repository::with_buckets(3);

        assert_eq!("abc", repo.intern(b"abc").unwrap().to_string());
        assert_eq!(
            "a\u{FFFD}c",
            repo.intern(b"a\xFFc").unwrap().to_string()
        );
    }

    #[test]
    fn accessors() {
        let repo = Repository::with_buckets(3);
        let sut = repo.intern(b"PROCEDURE").unwrap();

        assert_eq!(9, sut.len());
        assert_eq!(b"PROCEDURE", sut.as_bytes());
        assert_eq!(Some("PROCEDURE"), sut.as_str());
        assert!(sut == "PROCEDURE");
    }

    #[test]
    fn symbols_from_distinct_repositories_differ() {
        let a = Repository::with_buckets(3);
        let b = Repository::with_buckets(3);

        let sa = a.intern(b"same").unwrap();
        let sb = b.intern(b"same").unwrap();

        assert_ne!(sa, sb);
        assert_eq!(sa.as_bytes(), sb.as_bytes());
    }
}
