// Tabular token resolution
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

use super::{PathNode, ResolveError, ResolveResult, Resolver};
use crate::global::RECURSIVE_PREFIX;
use fxhash::FxHashMap;
use std::{
    collections::{BTreeMap, HashMap},
    fs::File,
    io::BufReader,
    path::Path,
};

/// A single row of a row/column store.
pub trait Row {
    /// Value of the column named `name`,
    ///   if the row has such a column.
    fn column(&self, name: &str) -> Option<String>;
}

impl Row for HashMap<String, String> {
    fn column(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl Row for BTreeMap<String, String> {
    fn column(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Resolve `@cursor:COLUMN` tokens against the current [`Row`].
#[derive(Debug, Clone)]
pub struct RowResolver<R: Row> {
    row: R,
}

impl<R: Row> RowResolver<R> {
    pub const PREFIX: &'static str = "@cursor:";

    pub fn new(row: R) -> Self {
        Self { row }
    }

    /// Replace the current row,
    ///   returning the previous one.
    pub fn replace(&mut self, row: R) -> R {
        std::mem::replace(&mut self.row, row)
    }
}

impl<R: Row> Resolver for RowResolver<R> {
    fn resolve(&self, token: &str) -> ResolveResult {
        Ok(token
            .strip_prefix(Self::PREFIX)
            .and_then(|name| self.row.column(name)))
    }
}

/// Table of string resources addressed by `@string/NAME` tokens.
///
/// The values of string resources may themselves reference other string
///   resources;
///     expansion of those references is the responsibility of the
///     [formatter](crate::format),
///       which bounds its depth.
#[derive(Debug, Clone, Default)]
pub struct StringTable {
    strings: FxHashMap<String, String>,
}

impl StringTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.strings.insert(name.into(), value.into());
    }

    /// Load a table from a JSON object mapping names to values.
    ///
    /// Values that are not strings are stored as their JSON text.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ResolveError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let file = File::open(path).map_err(|source| ResolveError::Io {
            path: display.clone(),
            source,
        })?;

        let obj: serde_json::Map<String, serde_json::Value> =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| {
                ResolveError::Decode {
                    path: display,
                    source,
                }
            })?;

        Ok(obj
            .iter()
            .map(|(name, value)| (name.clone(), value.to_text()))
            .collect())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StringTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            strings: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Resolver for StringTable {
    fn resolve(&self, token: &str) -> ResolveResult {
        Ok(token
            .strip_prefix(RECURSIVE_PREFIX)
            .and_then(|name| self.strings.get(name))
            .cloned())
    }
}

/// Table of tokens resolved by exact match.
///
/// No prefix is required or stripped.
#[derive(Debug, Clone, Default)]
pub struct TableResolver {
    table: FxHashMap<String, String>,
}

impl TableResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        token: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.table.insert(token.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TableResolver {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            table: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Resolver for TableResolver {
    fn resolve(&self, token: &str) -> ResolveResult {
        Ok(self.table.get(token).cloned())
    }
}
