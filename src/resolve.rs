// Token resolution
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

//! Resolution of placeholder tokens into values.
//!
//! A [`Resolver`] maps the key of a `{token}` placeholder to a value.
//! Each resolver decides for itself whether it recognizes a token,
//!   typically by checking for a fixed prefix
//!     (e.g. [`JsonResolver`] answers only `@json:…`);
//!   recognition and the presence of a value are collapsed into a single
//!     [`None`].
//!
//! Resolvers are composed using a [`ResolverChain`],
//!   which is itself a [`Resolver`].
//!
//! Resolvers may perform I/O
//!   (see [`PrefsResolver`])
//!   but must never mutate their source.
//! A failure to resolve is distinct from an unknown token:
//!   the former is a [`ResolveError`] that is fatal to the enclosing
//!   [`format`](crate::format::format) call,
//!     whereas the latter simply leaves the placeholder in place.

use std::{error::Error as StdError, io};
use thiserror::Error;

mod json;
mod path;
mod prefs;
mod table;

pub use json::JsonResolver;
pub use path::{resolve_path, MapResolver, PathNode};
pub use prefs::{DirPreferences, PreferenceStore, PrefsResolver};
pub use table::{Row, RowResolver, StringTable, TableResolver};

/// Result of a token lookup.
///
/// `Ok(None)` means that the token is unknown and is not an error.
pub type ResolveResult = Result<Option<String>, ResolveError>;

/// Failure of a [`Resolver`] to consult its source.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("failed to read `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode `{path}`: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to resolve token `{token}`: {source}")]
    Other {
        token: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

/// Something that knows how to resolve the value of certain tokens.
pub trait Resolver {
    /// Produce the value belonging to `token`,
    ///   or [`None`] if the token is not known.
    ///
    /// The token is exactly the text between the braces of its
    ///   placeholder;
    ///     no prefix has been stripped.
    fn resolve(&self, token: &str) -> ResolveResult;
}

impl<R: Resolver + ?Sized> Resolver for &R {
    fn resolve(&self, token: &str) -> ResolveResult {
        (**self).resolve(token)
    }
}

impl<R: Resolver + ?Sized> Resolver for Box<R> {
    fn resolve(&self, token: &str) -> ResolveResult {
        (**self).resolve(token)
    }
}

/// Ordered composition of [`Resolver`]s.
///
/// Members are consulted in the order in which they were added,
///   and the first to produce a value wins;
///     later members are not consulted at all.
/// An empty chain resolves nothing.
#[derive(Default)]
pub struct ResolverChain<'r> {
    members: Vec<Box<dyn Resolver + 'r>>,
}

impl<'r> ResolverChain<'r> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a resolver to the end of the chain.
    pub fn push(&mut self, resolver: impl Resolver + 'r) {
        self.members.push(Box::new(resolver));
    }

    /// Append a resolver to the end of the chain,
    ///   builder-style.
    pub fn with(mut self, resolver: impl Resolver + 'r) -> Self {
        self.push(resolver);
        self
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<'r> Resolver for ResolverChain<'r> {
    fn resolve(&self, token: &str) -> ResolveResult {
        for member in &self.members {
            if let Some(value) = member.resolve(token)? {
                return Ok(Some(value));
            }
        }

        Ok(None)
    }
}

/// A [`Resolver`] backed by a closure.
///
/// The closure sees every token and must perform its own prefix checks.
pub struct FnResolver<F>(pub F);

impl<F> Resolver for FnResolver<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn resolve(&self, token: &str) -> ResolveResult {
        Ok((self.0)(token))
    }
}
