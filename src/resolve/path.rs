// Dotted-path token resolution
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

//! Resolution of dotted paths (`a.b.c`) through nested containers.

use super::{ResolveResult, Resolver};
use crate::model::{Value, ValueMap};

/// A node of a tree of nested containers.
pub trait PathNode {
    /// Direct member `key` of this node,
    ///   if this node is a container having that member.
    fn member(&self, key: &str) -> Option<&Self>;

    /// Textual value of this node.
    fn to_text(&self) -> String;
}

/// Resolve `path` relative to `root`.
///
/// A path that is a direct member of the current container always wins.
/// Otherwise the left-most `.`-delimited segment is used to descend into
///   a nested container and the remainder is resolved relative to it;
///     the path is absent as soon as a segment does not name a
///     container.
///
/// This means that `a.b` is found as a member literally named `a.b` before
///   it is found as member `b` of member `a`.
pub fn resolve_path<N>(root: &N, path: &str) -> Option<String>
where
    N: PathNode + ?Sized,
{
    let mut node = root;
    let mut rest = path;

    loop {
        if let Some(found) = node.member(rest) {
            return Some(found.to_text());
        }

        // An empty leading segment never names a member.
        let (head, tail) = match rest.split_once('.') {
            Some(("", _)) | None => return None,
            Some(split) => split,
        };

        node = node.member(head)?;
        rest = tail;
    }
}

/// Resolve `@map:`-prefixed dotted paths against a [`ValueMap`].
#[derive(Debug, Clone, Default)]
pub struct MapResolver {
    root: Value,
}

impl MapResolver {
    pub const PREFIX: &'static str = "@map:";

    pub fn new(map: ValueMap) -> Self {
        Self {
            root: Value::Map(map),
        }
    }
}

impl Resolver for MapResolver {
    fn resolve(&self, token: &str) -> ResolveResult {
        Ok(token
            .strip_prefix(Self::PREFIX)
            .and_then(|path| resolve_path(&self.root, path)))
    }
}
