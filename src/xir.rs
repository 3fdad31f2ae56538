// XML IR (XIR)
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

//! Intermediate representation (IR) of an XML document.
//!
//! XIR is the event language spoken between a tokenizer and the
//!   [parse driver](crate::parse).
//! It serves as an abstraction layer atop of whatever XML library is
//!   used (e.g. `quick_xml`);
//!     the driver never sees the library itself,
//!       and any source of [`Token`]s that upholds the invariants below
//!       may be used in its place.
//!
//! A well-formed stream of [`Token`]s must
//!
//!   1. match every [`Token::Open`] with exactly one [`Token::Close`]; and
//!   2. deliver every [`Token::Attr`] of an element immediately after its
//!        [`Token::Open`],
//!          before any child element or text.
//!
//! To parse an entire XML document,
//!   see [`reader`].
//!
//! _Note:_ XIR refers to "opening" and "closing" tags,
//!   as opposed to "start" and "end" as used in the XML specification.

use crate::sym::{GlobalSymbolIntern, SymbolId};
use std::borrow::Cow;
use std::fmt::{self, Display};

mod error;
pub mod reader;

pub use error::XmlError;

/// A qualified name (namespace URI and local name).
///
/// Unlike a name as it appears in a document,
///   the namespace here is the _resolved_ namespace URI and not the
///   prefix;
///     `<a:foo xmlns:a="urn:x">` and `<b:foo xmlns:b="urn:x">` have equal
///     names.
///
/// Two names are equal iff both their namespaces and local names are
///   equal.
/// Both parts are interned,
///   making this type cheap to copy, compare, and hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QName(Option<SymbolId>, SymbolId);

// Since we implement Copy, ensure size matches our expectations:
const_assert!(std::mem::size_of::<QName>() <= std::mem::size_of::<u64>());

impl QName {
    /// Create a name within the namespace `ns`.
    ///
    /// An empty `ns` denotes no namespace,
    ///   as it does in XML.
    pub fn new(ns: &str, local: &str) -> Self {
        let ns = if ns.is_empty() { None } else { Some(ns.intern()) };

        Self(ns, local.intern())
    }

    /// Create a name without a namespace.
    ///
    /// This is typical of attributes,
    ///   which do not inherit the default namespace of their element.
    pub fn new_local(local: &str) -> Self {
        Self(None, local.intern())
    }

    /// Create a name from already-interned symbols.
    pub fn from_syms(ns: Option<SymbolId>, local: SymbolId) -> Self {
        Self(ns, local)
    }

    /// Namespace URI associated with a name,
    ///   if any.
    pub fn namespace(&self) -> Option<SymbolId> {
        self.0
    }

    /// Local part of a name (name without namespace).
    pub fn local_name(&self) -> SymbolId {
        self.1
    }
}

impl Display for QName {
    /// Render using Clark notation (`{ns}local`),
    ///   which is unambiguous without knowing any prefixes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QName(Some(ns), local) => write!(f, "{{{ns}}}{local}"),
            QName(None, local) => local.fmt(f),
        }
    }
}

/// Value of an attribute as supplied by a [`Token`] source.
///
/// A source may resolve an attribute into a typed value ahead of time
///   (for example a reference into an external resource table),
///     or supply it verbatim as [`RawValue::Text`].
/// Builders receive either form as the attribute's raw value and should
///   use the conversion methods here rather than matching on the variant
///   so that they remain agnostic to that decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    Text(String),
    Bool(bool),
    Int(i64),
}

impl RawValue {
    /// Textual representation of the value.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(s) => Cow::Borrowed(s.as_str()),
            Self::Bool(b) => Cow::Owned(b.to_string()),
            Self::Int(i) => Cow::Owned(i.to_string()),
        }
    }

    /// Interpret the value as a boolean.
    ///
    /// Text is `true` if it is `true` (in any case) or `1`;
    ///   all other text is `false`.
    /// Integers are `true` if non-zero.
    pub fn to_bool(&self) -> bool {
        match self {
            Self::Text(s) => text_to_bool(s),
            Self::Bool(b) => *b,
            Self::Int(i) => *i != 0,
        }
    }

    /// Interpret the value as a signed integer,
    ///   if possible.
    ///
    /// Surrounding whitespace of text is ignored.
    pub fn to_int(&self) -> Option<i64> {
        match self {
            Self::Text(s) => s.trim().parse().ok(),
            Self::Bool(b) => Some((*b).into()),
            Self::Int(i) => Some(*i),
        }
    }
}

/// Boolean interpretation of text shared by attributes and element text.
pub fn text_to_bool(text: &str) -> bool {
    text.eq_ignore_ascii_case("true") || text == "1"
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

/// A single event of an XML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Opening tag of an element.
    Open(QName),

    /// An attribute of the most recently opened element.
    Attr(QName, RawValue),

    /// Character data of the current element.
    ///
    /// An element's text may be split across multiple tokens;
    ///   consumers are expected to concatenate them.
    Text(String),

    /// Closing tag of the current element.
    ///
    /// Self-closing tags produce a [`Token::Open`] immediately followed by
    ///   any attributes and then this token.
    Close,
}

impl Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open(name) => write!(f, "opening tag `{name}`"),
            Self::Attr(name, _) => write!(f, "attribute `{name}`"),
            Self::Text(_) => write!(f, "text"),
            Self::Close => write!(f, "closing tag"),
        }
    }
}

#[cfg(test)]
mod test;
