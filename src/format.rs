// Placeholder formatter
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

//! Substitution of `{token}` placeholders within text.
//!
//! Text is scanned left-to-right for `{`.
//! The characters between `{` and the next `}` form a token,
//!   which is looked up using a [`Resolver`];
//!     the placeholder is replaced by the value of the token,
//!       or kept verbatim (braces included) if the token is unknown.
//!
//! The sequence `{}` produces a literal `{`.
//! There is no escape for `}`,
//!   which is literal anywhere outside of a placeholder.
//! A `{` without a matching `}` is a
//!   [`FormatError::MalformedPlaceholder`].
//!
//! ```
//! use xmlmagic::{format::format, resolve::FnResolver};
//!
//! let r = FnResolver(|t: &str| (t == "name").then(|| "World".to_string()));
//!
//! assert_eq!("Hello, World!", format("Hello, {name}!", Some(&r), 5).unwrap());
//! assert_eq!("{unknown}", format("{unknown}", Some(&r), 5).unwrap());
//! assert_eq!("a{b", format("a{}b", Some(&r), 5).unwrap());
//! ```
//!
//! Recursive Expansion
//! ===================
//! Tokens beginning with the recursive prefix
//!   ([`RECURSIVE_PREFIX`] by default)
//!   reference resources whose values may themselves contain
//!   placeholders;
//!     those values are formatted again.
//! Similarly,
//!   a value that in its entirety begins with the recursive prefix is an
//!   alias of another resource and is replaced by that resource's value.
//! Each such hop consumes one unit of depth;
//!   at a depth of `0` values are used as-is.
//! This bounds cyclic resource references.

use crate::{
    global::RECURSIVE_PREFIX,
    resolve::{ResolveError, Resolver},
};
use memchr::memchr;
use std::borrow::Cow;
use thiserror::Error;

pub type FormatResult<T> = Result<T, FormatError>;

#[derive(Debug, Error)]
pub enum FormatError {
    /// A `{` at byte offset `offset` of `text` has no closing `}`.
    #[error("unterminated placeholder at offset {offset} of `{text}`")]
    MalformedPlaceholder { text: String, offset: usize },

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// Format `text` using `resolver` with the default recursive prefix.
///
/// If `text` contains no placeholders,
///   or `resolver` is [`None`],
///   then `text` is returned as [`Cow::Borrowed`],
///     allowing callers to cheaply detect that nothing has changed.
///
/// See [`Formatter`] for more information.
pub fn format<'t>(
    text: &'t str,
    resolver: Option<&dyn Resolver>,
    depth: usize,
) -> FormatResult<Cow<'t, str>> {
    match resolver {
        None => Ok(Cow::Borrowed(text)),
        Some(resolver) => Formatter::new(resolver).format(text, depth),
    }
}

/// Placeholder formatter bound to a [`Resolver`].
#[derive(Clone, Copy)]
pub struct Formatter<'r> {
    resolver: &'r dyn Resolver,
    recursive_prefix: &'r str,
}

impl<'r> Formatter<'r> {
    pub fn new(resolver: &'r dyn Resolver) -> Self {
        Self {
            resolver,
            recursive_prefix: RECURSIVE_PREFIX,
        }
    }

    /// Use `prefix` in place of [`RECURSIVE_PREFIX`].
    ///
    /// An empty prefix disables recursive expansion.
    pub fn with_recursive_prefix(self, prefix: &'r str) -> Self {
        Self {
            recursive_prefix: prefix,
            ..self
        }
    }

    /// Substitute all placeholders of `text`,
    ///   expanding at most `depth` recursive hops.
    pub fn format<'t>(
        &self,
        text: &'t str,
        depth: usize,
    ) -> FormatResult<Cow<'t, str>> {
        // The smallest placeholder is `{}`.
        if text.len() < 2 {
            return Ok(Cow::Borrowed(text));
        }

        let bytes = text.as_bytes();

        let Some(first) = memchr(b'{', bytes) else {
            return Ok(Cow::Borrowed(text));
        };

        let mut out = String::with_capacity(text.len());
        let mut pos = 0;
        let mut next = Some(first);

        while let Some(open) = next {
            out.push_str(&text[pos..open]);

            if bytes.get(open + 1) == Some(&b'}') {
                out.push('{');
                pos = open + 2;
            } else {
                let close = memchr(b'}', &bytes[open + 1..])
                    .map(|offset| open + 1 + offset)
                    .ok_or_else(|| FormatError::MalformedPlaceholder {
                        text: text.to_string(),
                        offset: open,
                    })?;

                let token = &text[open + 1..close];

                match self.resolver.resolve(token)? {
                    Some(value) => {
                        out.push_str(&self.expand(token, value, depth)?)
                    }
                    None => out.push_str(&text[open..=close]),
                }

                pos = close + 1;
            }

            next = memchr(b'{', &bytes[pos..]).map(|offset| pos + offset);
        }

        out.push_str(&text[pos..]);

        Ok(Cow::Owned(out))
    }

    /// Apply recursive expansion to the `value` of `token`.
    fn expand(
        &self,
        token: &str,
        value: String,
        depth: usize,
    ) -> FormatResult<String> {
        if depth == 0 || self.recursive_prefix.is_empty() {
            return Ok(value);
        }

        let value = if token.starts_with(self.recursive_prefix) {
            self.format(&value, depth - 1)?.into_owned()
        } else {
            value
        };

        if value.starts_with(self.recursive_prefix) {
            if let Some(aliased) = self.resolver.resolve(&value)? {
                return self.expand(&value, aliased, depth - 1);
            }
        }

        Ok(value)
    }
}

#[cfg(test)]
mod test;
