// Interners used to intern values as symbols
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

//! Hashed string repository and the per-thread global repository.
//!
//! See the [parent module](super) for more information.
//!
//! A [`Repository`] is a hash table with a fixed number of buckets,
//!   chosen at construction and never changed;
//!     entries are never rehashed.
//! Collisions are resolved by chaining.
//! Each chain entry holds the 32-bit key of its string and a weak
//!   reference to it,
//!     so that the repository never keeps a string alive on its own.

use super::symbol::{Entry, Symbol};
use crate::global;
use std::cell::RefCell;
use std::error::Error;
use std::fmt::{self, Display};
use std::rc::{Rc, Weak};

/// Failure to intern a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InternError {
    /// The global repository was used before [`init`].
    NotInitialised,

    /// [`init`] was called more than once.
    AlreadyInitialised,

    /// The requested slice is out of range or contains a byte that is
    ///   not printable ASCII.
    InvalidIndices,

    /// The string exceeds [`global::MAX_SYMBOL_LEN`].
    TooLong { len: usize },
}

impl Display for InternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInitialised => {
                write!(f, "string repository has not been initialised")
            }
            Self::AlreadyInitialised => {
                write!(f, "string repository is already initialised")
            }
            Self::InvalidIndices => {
                write!(f, "invalid indices for string slice")
            }
            Self::TooLong { len } => write!(
                f,
                "string of {len} bytes exceeds maximum length of {}",
                global::MAX_SYMBOL_LEN
            ),
        }
    }
}

impl Error for InternError {}

struct Slot {
    key: u32,
    entry: Weak<Entry>,
}

/// Bucket storage shared between a [`Repository`] and the entries
///   interned in it.
pub(in crate::sym) struct Table {
    buckets: Vec<Vec<Slot>>,
}

impl Table {
    fn with_buckets(count: usize) -> Self {
        Self {
            buckets: (0..count).map(|_| Vec::new()).collect(),
        }
    }

    #[inline]
    fn bucket_of(&self, key: u32) -> usize {
        key as usize % self.buckets.len()
    }

    fn lookup(&self, key: u32, bytes: &[u8]) -> Option<Symbol> {
        self.buckets[self.bucket_of(key)]
            .iter()
            .filter(|slot| slot.key == key)
            .filter_map(|slot| slot.entry.upgrade())
            .find(|entry| &*entry.bytes == bytes)
            .map(Symbol)
    }

    /// Remove the chain entry for `ptr`.
    ///
    /// Called when the last reference to an entry is dropped.
    pub(in crate::sym) fn unlink(&mut self, key: u32, ptr: *const Entry) {
        let index = self.bucket_of(key);
        let bucket = &mut self.buckets[index];

        if let Some(pos) = bucket
            .iter()
            .position(|slot| {
                slot.key == key && Weak::as_ptr(&slot.entry) == ptr
            })
        {
            bucket.swap_remove(pos);
        }
    }
}

/// Hashed store of unique strings.
///
/// Interning is `O(1)` amortized for a reasonable bucket count,
///   degrading linearly with chain length.
/// The repository employs interior mutability and so does not need to be
///   declared `mut`.
///
/// Strings are hashed with [`fxhash`],
///   which is fast for the short strings that make up the vast majority
///   of lexemes.
pub struct Repository(Rc<RefCell<Table>>);

impl Repository {
    /// New repository with [`global::DEFAULT_BUCKET_COUNT`] buckets.
    pub fn new() -> Self {
        Self::with_buckets(global::DEFAULT_BUCKET_COUNT)
    }

    /// New repository with the given number of buckets.
    ///
    /// A count of `0` selects [`global::DEFAULT_BUCKET_COUNT`].
    pub fn with_buckets(count: usize) -> Self {
        let count = match count {
            0 => global::DEFAULT_BUCKET_COUNT,
            n => n,
        };

        Self(Rc::new(RefCell::new(Table::with_buckets(count))))
    }

    /// Intern `bytes`,
    ///   returning a new reference to the unique [`Symbol`] holding it.
    ///
    /// Any byte value is permitted.
    pub fn intern(&self, bytes: &[u8]) -> Result<Symbol, InternError> {
        if bytes.len() > global::MAX_SYMBOL_LEN {
            return Err(InternError::TooLong { len: bytes.len() });
        }

        let key = fxhash::hash32(bytes);
        let mut table = self.0.borrow_mut();

        if let Some(sym) = table.lookup(key, bytes) {
            return Ok(sym);
        }

        let entry = Rc::new(Entry {
            key,
            bytes: bytes.into(),
            table: Rc::downgrade(&self.0),
        });

        let index = table.bucket_of(key);
        let bucket = &mut table.buckets[index];

        // Entries released while the table was borrowed could not unlink
        //   themselves.
        bucket.retain(|slot| slot.entry.strong_count() > 0);
        bucket.push(Slot {
            key,
            entry: Rc::downgrade(&entry),
        });

        Ok(Symbol(entry))
    }

    /// Intern `len` bytes of `buf` starting at `offset`.
    ///
    /// The slice must lie within `buf` and must consist entirely of
    ///   printable ASCII (`0x20..=0x7E`);
    ///     otherwise [`InternError::InvalidIndices`] is returned.
    pub fn intern_slice(
        &self,
        buf: &[u8],
        offset: usize,
        len: usize,
    ) -> Result<Symbol, InternError> {
        let slice = offset
            .checked_add(len)
            .and_then(|end| buf.get(offset..end))
            .ok_or(InternError::InvalidIndices)?;

        if !slice.iter().all(|b| (0x20..=0x7E).contains(b)) {
            return Err(InternError::InvalidIndices);
        }

        self.intern(slice)
    }

    /// Intern the concatenation of `a` and `b`.
    pub fn intern_concat(
        &self,
        a: &[u8],
        b: &[u8],
    ) -> Result<Symbol, InternError> {
        let len = a.len() + b.len();

        if len > global::MAX_SYMBOL_LEN {
            return Err(InternError::TooLong { len });
        }

        let mut buf = Vec::with_capacity(len);
        buf.extend_from_slice(a);
        buf.extend_from_slice(b);

        self.intern(&buf)
    }

    /// Whether `bytes` is currently interned.
    ///
    /// This does not intern `bytes`.
    pub fn contains(&self, bytes: &[u8]) -> bool {
        self.0
            .borrow()
            .lookup(fxhash::hash32(bytes), bytes)
            .is_some()
    }

    /// Number of live interned strings.
    pub fn len(&self) -> usize {
        self.0
            .borrow()
            .buckets
            .iter()
            .flatten()
            .filter(|slot| slot.entry.strong_count() > 0)
            .count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of hash buckets,
    ///   fixed at construction.
    pub fn bucket_count(&self) -> usize {
        self.0.borrow().buckets.len()
    }
}

impl Default for Repository {
    fn default() -> Self {
        Self::new()
    }
}

thread_local! {
    static GLOBAL: RefCell<Option<Repository>> = RefCell::new(None);
}

fn with_global<T>(
    f: impl FnOnce(&Repository) -> Result<T, InternError>,
) -> Result<T, InternError> {
    GLOBAL.with(|cell| match cell.borrow().as_ref() {
        Some(repo) => f(repo),
        None => Err(InternError::NotInitialised),
    })
}

/// Initialize the global repository with `size` buckets.
///
/// A `size` of `0` selects [`global::DEFAULT_BUCKET_COUNT`].
/// This must be called exactly once before any other global interning
///   operation.
pub fn init(size: usize) -> Result<(), InternError> {
    GLOBAL.with(|cell| {
        let mut global = cell.borrow_mut();

        if global.is_some() {
            return Err(InternError::AlreadyInitialised);
        }

        *global = Some(Repository::with_buckets(size));
        Ok(())
    })
}

/// Whether [`init`] has been called.
pub fn is_initialised() -> bool {
    GLOBAL.with(|cell| cell.borrow().is_some())
}

/// Intern `bytes` using the global repository.
///
/// See [`Repository::intern`].
pub fn intern(bytes: &[u8]) -> Result<Symbol, InternError> {
    with_global(|repo| repo.intern(bytes))
}

/// Intern a slice of `buf` using the global repository.
///
/// See [`Repository::intern_slice`].
pub fn intern_slice(
    buf: &[u8],
    offset: usize,
    len: usize,
) -> Result<Symbol, InternError> {
    with_global(|repo| repo.intern_slice(buf, offset, len))
}

/// Intern the concatenation of `a` and `b` using the global repository.
pub fn intern_concat(a: &[u8], b: &[u8]) -> Result<Symbol, InternError> {
    with_global(|repo| repo.intern_concat(a, b))
}

/// Number of live strings in the global repository.
pub fn live_count() -> Result<usize, InternError> {
    with_global(|repo| Ok(repo.len()))
}
