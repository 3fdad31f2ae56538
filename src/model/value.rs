// Dynamic values
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

use crate::{ele::Child, resolve::PathNode};
use serde::Serialize;
use std::{
    collections::BTreeMap,
    fmt::{self, Display},
};

/// Key-ordered map of [`Value`]s.
pub type ValueMap = BTreeMap<String, Value>;

/// A value of any of the built-in elements.
///
/// Values serialize to their natural JSON representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Str(String),
    Bool(bool),
    Int(i64),
    Map(ValueMap),
}

impl Value {
    /// Convert the value of a child element.
    ///
    /// Recognized value types are [`Value`] itself,
    ///   [`String`],
    ///   [`bool`],
    ///   [`i64`],
    ///   and [`ValueMap`],
    ///     tried in that order.
    /// Values of any other type and absent values produce [`None`].
    pub fn from_child(child: Child) -> Option<Self> {
        let child = match child.downcast::<Value>() {
            Ok(value) => return value,
            Err(child) => child,
        };

        let child = match child.downcast::<String>() {
            Ok(value) => return value.map(Self::Str),
            Err(child) => child,
        };

        let child = match child.downcast::<bool>() {
            Ok(value) => return value.map(Self::Bool),
            Err(child) => child,
        };

        let child = match child.downcast::<i64>() {
            Ok(value) => return value.map(Self::Int),
            Err(child) => child,
        };

        child.downcast::<ValueMap>().ok().flatten().map(Self::Map)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl Default for Value {
    /// An empty map.
    fn default() -> Self {
        Self::Map(ValueMap::new())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.into())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<ValueMap> for Value {
    fn from(map: ValueMap) -> Self {
        Self::Map(map)
    }
}

impl Display for Value {
    /// Strings are displayed verbatim;
    ///   maps as JSON.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Bool(b) => b.fmt(f),
            Self::Int(i) => i.fmt(f),
            Self::Map(_) => match serde_json::to_string(self) {
                Ok(json) => f.write_str(&json),
                Err(_) => Err(fmt::Error),
            },
        }
    }
}

impl PathNode for Value {
    fn member(&self, key: &str) -> Option<&Self> {
        self.as_map().and_then(|map| map.get(key))
    }

    fn to_text(&self) -> String {
        self.to_string()
    }
}
