// Global constants across the entirety of m2c
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

//! System-wide static configuration.
//!
//! This module provides a system-wide configuration.
//! Subsystems should reference these values rather than defining their own
//!   and risk incompatibilities or maintenance issues as requirements
//!   change.
//!
//! By convention,
//!   import this entire module rather than individual members and reference
//!   them as `global::foo` to emphasize their nature and risk.

/// Maximum size of a source file in bytes.
///
/// Source files are read into memory in their entirety;
///   see [`Infile`](crate::source::Infile).
pub const MAX_SOURCE_BYTES: usize = 260_000;

/// Maximum number of lines in a source file.
pub const MAX_SOURCE_LINES: usize = 64_000;

/// Maximum number of columns (bytes,
///   excluding the line terminator)
///   of any single source line.
pub const MAX_LINE_COLUMNS: usize = 200;

/// Maximum length in bytes of any interned string.
pub const MAX_SYMBOL_LEN: usize = 2_000;

/// Maximum depth to which the parser descends into nested blocks,
///   statements,
///   types,
///   field lists
///   and factors.
///
/// The parser recurses once per level,
///   so this bounds its use of the stack independently of the length of
///   the input.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Number of hash buckets used by the global string repository when no
///   explicit bucket count is requested.
///
/// This is prime so that `key mod bucket_count` spreads well even for
///   weak hashes.
pub const DEFAULT_BUCKET_COUNT: usize = 2011;

/// Number of entries held by each segment of a
///   [`SymbolList`](crate::sym::SymbolList).
pub const LIST_SEGMENT_SIZE: usize = 16;

/// Size capable of representing any line or column number within a
///   source file.
///
/// This must be able to hold both [`MAX_SOURCE_LINES`] and
///   [`MAX_LINE_COLUMNS`].
pub type SourcePosSize = u32;

const_assert!(MAX_SOURCE_LINES <= SourcePosSize::MAX as usize);
const_assert!(MAX_SYMBOL_LEN <= MAX_SOURCE_BYTES);
