// System-wide static configuration
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
//!
//! Values that may reasonably differ between invocations are only
//!   _defaults_ here;
//!     see [`ParseConfig`](crate::parse::ParseConfig) for the
//!     per-invocation configuration that is initialized from them.

/// Namespace URI of every element provided by the built-in
///   [`Model`](crate::model::Model).
pub const NAMESPACE: &str = "urn:xmlmagic:model";

/// Maximum number of recursive re-expansions performed by the placeholder
///   formatter for tokens bearing [`RECURSIVE_PREFIX`].
///
/// This bounds chains of string resources that reference other string
///   resources,
///     which would otherwise be able to recurse indefinitely.
pub const DEFAULT_FORMAT_DEPTH: usize = 5;

/// Token prefix denoting a string resource.
///
/// The value of a token with this prefix is itself formatted again
///   (up to the configured depth),
///     as is a resolved value consisting entirely of such a reference.
pub const RECURSIVE_PREFIX: &str = "@string/";

/// Maximum number of released instances retained per descriptor by a
///   [`RecyclePool`](crate::ele::RecyclePool).
///
/// Instances released beyond this limit are dropped.
pub const RECYCLE_POOL_LIMIT: usize = 32;
