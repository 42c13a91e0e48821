// Display formatting utilities
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

//! Typed formatting helpers.
//!
//! These types create composable formatters for use with [`Display`].
//! Whereas [`Display`] operates on data owned by the type implementing it,
//!   these formatters compose into functions that operate on data provided
//!   _to_ it.
//! Consequently,
//!   formatters are simply types,
//!   and writes can be streamed just as they are with [`Display`].
//!
//! There are two types of wrappers:
//!
//!   - [`DisplayWrapper`] formats objects as atoms; and
//!   - [`ListDisplayWrapper`] maps a [`DisplayWrapper`] to each of its
//!       items as atoms,
//!         where the specific wrapper used depends on the position of the
//!         item within the list and the properties of the list itself.
//!
//! Static text is supplied to wrappers by marker types implementing
//!   [`Text`].
//!
//! For example:
//!
//! ```
//! # use m2c::fmt::*;
//! let tokens = ["BEGIN", "CONST", "END"];
//!
//! assert_eq!(
//!    OrConjList::<Tt<Raw>>::wrap(&tokens).to_string(),
//!    "`BEGIN`, `CONST`, or `END`",
//! );
//! ```
//!
//! This is used by diagnostics to enumerate expected tokens.

use std::{
    fmt::{Display, Formatter, Result},
    marker::PhantomData,
};

/// Static text for use by wrappers.
pub trait Text {
    const TEXT: &'static str;
}

macro_rules! text {
    ($($(#[$attr:meta])* $name:ident = $text:literal;)*) => {
        $(
            $(#[$attr])*
            pub struct $name;

            impl Text for $name {
                const TEXT: &'static str = $text;
            }
        )*
    };
}

text! {
    /// A single backtick.
    Backtick = "`";
    /// A single space.
    Space = " ";
    /// A comma and a space.
    CommaSp = ", ";
    Or = "or";
}

/// Wrapper for a [`Display`]-able type.
///
/// See the [module-level documentation](self) for more information.
pub trait DisplayWrapper {
    /// Transform inner data and output using the provided [`Formatter`].
    fn fmt<T: Display>(inner: T, f: &mut Formatter) -> Result;

    /// Associate data with a [`DisplayWrapper`] for rendering using
    ///   [`Display`].
    ///
    /// This has the effect of creating an arbitrary [`Display`]
    ///   implementation for the wrapped object,
    ///     which will work well with [`format!`] and anything else that
    ///     does not have access to an explicit [`Formatter`].
    fn wrap<T: Display>(inner: T) -> Wrap<Self, T> {
        Wrap {
            inner,
            _phantom: PhantomData,
        }
    }
}

/// Wrapper with associated data.
pub struct Wrap<W: DisplayWrapper + ?Sized, T: Display> {
    inner: T,
    _phantom: PhantomData<W>,
}

impl<W: DisplayWrapper, T: Display> Display for Wrap<W, T> {
    fn fmt(&self, f: &mut Formatter) -> Result {
        W::fmt(&self.inner, f)
    }
}

/// Echo data as-is without any wrapping.
///
/// This is primarily used at the root of a wrapper composition.
pub struct Raw;

impl DisplayWrapper for Raw {
    fn fmt<T: Display>(inner: T, f: &mut Formatter) -> Result {
        inner.fmt(f)
    }
}

/// Prefix data with static [`Text`].
///
/// See also [`Suffix`] and [`Delim`].
pub struct Prefix<P: Text, W: DisplayWrapper>(PhantomData<(P, W)>);

impl<P: Text, W: DisplayWrapper> DisplayWrapper for Prefix<P, W> {
    fn fmt<T: Display>(inner: T, f: &mut Formatter) -> Result {
        f.write_str(P::TEXT)?;
        W::fmt(inner, f)
    }
}

/// Suffix data with static [`Text`].
pub struct Suffix<S: Text, W: DisplayWrapper>(PhantomData<(S, W)>);

impl<S: Text, W: DisplayWrapper> DisplayWrapper for Suffix<S, W> {
    fn fmt<T: Display>(inner: T, f: &mut Formatter) -> Result {
        W::fmt(inner, f)?;
        f.write_str(S::TEXT)
    }
}

/// Surround a value in delimiters.
pub type Delim<L, R, W> = Prefix<L, Suffix<R, W>>;

/// Denote text that would conventionally be delimited in a teletypewriter
///   font.
///
/// This produces a markdown-style quote using backticks.
///
/// NB: This does not defend against nested quotes,
///   so this is _not_ safe against format escapes.
pub type Tt<W> = Delim<Backtick, Backtick, W>;

/// Prefix with a single space.
pub type Sp<W> = Prefix<Space, W>;

/// Wrapper for a list that maps each element to a context-specific
///   [`DisplayWrapper`].
///
/// This uses the slice API for wrapping since [`Display`] takes objects by
///   non-mutable reference,
///     and so we cannot consume an iterator.
pub trait ListDisplayWrapper {
    /// Wrapper to use when the list contains only a single item.
    type Single: DisplayWrapper;
    /// Wrapper for the first item in a multi-item list.
    type First: DisplayWrapper;
    /// Wrapper for all but the first and last items in a multi-item list.
    type Middle: DisplayWrapper;
    /// Wrapper for the last item of a list containing a pair of items.
    type LastOfPair: DisplayWrapper;
    /// Wrapper for the last item of a list containing more than two items.
    type LastOfMany: DisplayWrapper;

    /// Format a slice using the provided wrappers.
    fn fmt<T: Display>(list: &[T], f: &mut Formatter) -> Result {
        let maxi = list.len().saturating_sub(1);

        for next in list.iter().enumerate() {
            match next {
                (0, x) if maxi == 0 => Self::Single::fmt(x, f)?,
                (0, x) => Self::First::fmt(x, f)?,
                (1, x) if maxi == 1 => Self::LastOfPair::fmt(x, f)?,
                (i, x) if maxi == i => Self::LastOfMany::fmt(x, f)?,
                (_, x) => Self::Middle::fmt(x, f)?,
            }
        }

        Ok(())
    }

    /// Associate data with a [`ListDisplayWrapper`] for rendering using
    ///   [`Display`].
    fn wrap<T: Display>(list: &[T]) -> ListWrap<Self, T> {
        ListWrap {
            list,
            _phantom: PhantomData,
        }
    }
}

/// Format each item of a slice using a [`DisplayWrapper`] formatter,
///   outputting an English list with a serial comma and conjunctive term.
///
/// No formatting is done to a single item,
///   and the serial comma is omitted for only two items.
///
/// For example:
///   If we have a slice `[1, 2, 3]`,
///     this will output "1, 2, or 3".
///   If we have a slice `[1, 2]`,
///     it will omit the serial comma and output "1 or 2".
pub struct ConjList<C: Text, W: DisplayWrapper>(PhantomData<(C, W)>);

impl<C: Text, W: DisplayWrapper> ListDisplayWrapper for ConjList<C, W> {
    type Single = W;
    type First = W;
    type Middle = Prefix<CommaSp, W>;
    type LastOfPair = Sp<Prefix<C, Sp<W>>>;
    // Comma after the penultimate term (serial comma).
    type LastOfMany = Prefix<CommaSp, Prefix<C, Sp<W>>>;
}

/// A list of values with a serial comma and the term "or" as a
///   conjunction between the penultimate and final items.
pub type OrConjList<W> = ConjList<Or, W>;

/// List wrapper with associated data.
pub struct ListWrap<'a, W: ListDisplayWrapper + ?Sized, T: Display> {
    list: &'a [T],
    _phantom: PhantomData<W>,
}

impl<'a, W: ListDisplayWrapper + ?Sized, T: Display> Display
    for ListWrap<'a, W, T>
{
    fn fmt(&self, f: &mut Formatter) -> Result {
        W::fmt(self.list, f)
    }
}
