// String internment
//
//  Copyright (C) 2014-2022 Ryan Specialty Group, LLC.
//
//  This file is part of xmlmagic.
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

//! String internment.
//!
//! Element and attribute names are compared and hashed for every event
//!   received from an XML document,
//!     and descriptors are keyed on them.
//! Interning reduces those names to a [`SymbolId`],
//!   which is [`Copy`] and compares as an integer.
//!
//! ```
//! use xmlmagic::sym::GlobalSymbolIntern;
//!
//! let a = "foo".intern();
//! let b = String::from("foo").as_str().intern();
//! let c = "foobar".intern();
//!
//! assert_eq!(a, b);
//! assert_ne!(a, c);
//! assert_eq!("foo", a.lookup_str());
//! ```
//!
//! Global State
//! ============
//! There is exactly one intern pool for the entire process.
//! Unlike a thread-local pool,
//!   this allows descriptors registered on one thread to be looked up by
//!   parsers running on another,
//!     which is necessary since the global
//!     [`Scope`](crate::ele::Scope) is shared.
//! Access to the pool is serialized by a lock;
//!   this is acceptable since interning happens once per name
//!   read from a document and lookups are cheap.
//!
//! Interned strings are never freed.
//! The set of names in use by a system is small and fixed by its
//!   schema,
//!     so this is not a concern in practice,
//!   but it does mean that arbitrary untrusted text should be kept out of
//!     the pool;
//!       only names are interned here,
//!       never attribute values or text.

mod interner;

pub use interner::{GlobalSymbolIntern, SymbolId};
