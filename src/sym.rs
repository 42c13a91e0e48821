// String internment
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

//! String internment system.
//!
//! Interned strings are represented by [`Symbol`],
//!   a reference-counted handle to an immutable byte string held by a
//!   [`Repository`].
//! A repository guarantees that at most one live [`Symbol`] exists for
//!   any given sequence of bytes,
//!     and so two symbols are equal if and only if they are the same
//!     symbol;
//!       equality is pointer identity and costs `O(1)`.
//!
//! ```
//! use m2c::sym::Repository;
//!
//! let repo = Repository::with_buckets(17);
//!
//! let a = repo.intern(b"foo").unwrap();
//! let b = repo.intern(&b"foobar"[0..3]).unwrap();
//! let c = repo.intern(b"bar").unwrap();
//!
//! assert_eq!(a, b);
//! assert_ne!(a, c);
//! assert_eq!(2, repo.len());
//!
//! // Each handle holds a reference.
//! assert_eq!(2, a.ref_count());
//! drop(b);
//! assert_eq!(1, a.ref_count());
//!
//! // Releasing the last reference removes the string from the repository.
//! drop(c);
//! assert_eq!(1, repo.len());
//! assert!(!repo.contains(b"bar"));
//! ```
//!
//! Lifetime of Interns
//! ===================
//! Unlike many interners,
//!   strings are freed as soon as they are no longer referenced.
//! Retaining a symbol is [`Clone`] and releasing it is [`Drop`];
//!   the live reference count is available via [`Symbol::ref_count`].
//! When the count reaches zero the entry is unlinked from its hash bucket.
//! Since retain and release are tied to ownership,
//!   it is not possible to retain a released symbol or to release a symbol
//!   twice.
//!
//! The Global Repository
//! =====================
//! The lexer and parser intern through a single repository per thread,
//!   accessed through the free functions of this module
//!     ([`intern`], [`intern_slice`], [`intern_concat`]).
//! It must be initialized exactly once with [`init`] before first use;
//!   interning before initialization fails with
//!   [`InternError::NotInitialised`].
//! A single compilation unit is processed per thread,
//!   and so the repository is not shared between threads.
//!
//! Using Repositories Directly
//! ---------------------------
//! A [`Repository`] may also be used on its own,
//!   as in the example above.
//! Symbols from different repositories never compare equal,
//!   even if their strings do.

mod interner;
mod list;
mod symbol;

pub use interner::{
    init, intern, intern_concat, intern_slice, is_initialised, live_count,
    InternError, Repository,
};
pub use list::{ListError, SymbolList};
pub use symbol::Symbol;
