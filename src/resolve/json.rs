// JSON token resolution
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

use super::{resolve_path, PathNode, ResolveError, ResolveResult, Resolver};
use serde_json::Value as Json;
use std::{fs::File, io::BufReader, path::Path};

impl PathNode for Json {
    fn member(&self, key: &str) -> Option<&Self> {
        self.as_object().and_then(|obj| obj.get(key))
    }

    /// Strings are produced verbatim;
    ///   all other values are produced as JSON text.
    fn to_text(&self) -> String {
        match self {
            Json::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Resolve `@json:`-prefixed dotted paths against a JSON document.
///
/// ```
/// use xmlmagic::resolve::{JsonResolver, Resolver};
///
/// let sut = JsonResolver::new(serde_json::json!({"a": {"b": "v"}}));
///
/// assert_eq!(Some("v".into()), sut.resolve("@json:a.b").unwrap());
/// assert_eq!(None, sut.resolve("a.b").unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct JsonResolver {
    root: Json,
}

impl JsonResolver {
    pub const PREFIX: &'static str = "@json:";

    pub fn new(root: Json) -> Self {
        Self { root }
    }

    /// Load a JSON document from the file at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ResolveError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let file = File::open(path).map_err(|source| ResolveError::Io {
            path: display.clone(),
            source,
        })?;

        serde_json::from_reader(BufReader::new(file))
            .map(Self::new)
            .map_err(|source| ResolveError::Decode {
                path: display,
                source,
            })
    }
}

impl Resolver for JsonResolver {
    fn resolve(&self, token: &str) -> ResolveResult {
        Ok(token
            .strip_prefix(Self::PREFIX)
            .and_then(|path| resolve_path(&self.root, path)))
    }
}
