// Element descriptors and builders
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

//! Elements and the construction of their values.
//!
//! An [`ElementDescriptor`] binds the [`QName`](crate::xir::QName) of an
//!   element to the [`Builder`] that constructs its values.
//! Descriptors are registered in a [`Scope`],
//!   which is what the [parse driver](crate::parse) consults for each
//!   element it encounters.
//!
//! Builders compose:
//!   the builder of a composite value does not parse its children itself,
//!     but receives their finished values through [`Builder::child`]
//!     from whatever descriptors are registered for them.
//! There is no other extension mechanism.
//!
//! Scopes
//! ======
//! Descriptors that are known statically are registered once in the
//!   [global scope](Scope::global) and shared by all parses.
//! When the meaning of a name depends on a single parse
//!   (for example the root element of a document that populates a
//!   caller-supplied instance),
//!   a child scope is created for that parse;
//!     registrations made there shadow the global scope without
//!     affecting concurrent parses.
//!
//! Recycling
//! =========
//! A [`RecyclePool`] retains finished values that their consumer has
//!   released
//!     (see [`BuildContext::recycle`])
//!   and hands them back to [`Builder::begin`] the next time an element of
//!   the same descriptor is opened.
//! Recycling is never required for correctness:
//!   a builder must produce the same value from a recycled object as it
//!   would from a fresh one.

mod builder;
mod descriptor;
mod error;
mod recycle;
mod scope;

pub use builder::{AnyObject, Attr, BuildContext, Builder, Child};
pub(crate) use builder::ErasedBuilder;
pub use descriptor::{AnyDescriptor, DescriptorId, ElementDescriptor};
pub use error::{BuildError, BuildResult, RegistryError};
pub use recycle::RecyclePool;
pub use scope::Scope;
