// Built-in element model
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

//! Built-in elements producing dynamic [`Value`]s.
//!
//! All elements of the model are in the namespace [`global::NAMESPACE`];
//!   their attributes have no namespace.
//!
//! | Element   | Value                                                 |
//! |-----------|-------------------------------------------------------|
//! | `string`  | [`String`] from attribute `value` or text.            |
//! | `boolean` | [`bool`] from attribute `value` or text.              |
//! | `integer` | [`i64`] from attribute `value` or text.               |
//! | `and`     | Conjunction of boolean children.                      |
//! | `or`      | Disjunction of boolean children.                      |
//! | `xor`     | Exclusive disjunction of boolean children.            |
//! | `equals`  | Whether all children are equal.                       |
//! | `map`     | [`ValueMap`] of `entry` children.                     |
//! | `entry`   | A key (attribute `key`) and its value.                |
//! | `uri`     | String form of a URI (see [`uri`]).                   |
//!
//! The model is registered once into the global scope by
//!   [`Model::global`],
//!     or into any other scope using [`Model::register`].

use crate::{
    ele::{ElementDescriptor, RegistryError, Scope},
    global,
    xir::QName,
};
use once_cell::sync::OnceCell;

mod logic;
mod map;
mod record;
mod scalar;
pub mod uri;
mod value;

pub use logic::{BoolOp, BoolOpBuilder, EqualsBuilder};
pub use map::{Entry, EntryBuilder, MapBuilder};
pub use record::{
    AttrSetter, ChildSetter, FieldTable, RecordBuilder, TextSetter,
};
pub use scalar::{BooleanBuilder, IntegerBuilder, StringBuilder};
pub use uri::{QueryParam, QueryParamBuilder, UriBuilder, UriParts};
pub use value::{Value, ValueMap};

#[cfg(test)]
mod test;

static GLOBAL: OnceCell<Model> = OnceCell::new();

/// Descriptors of all elements of the built-in model.
#[derive(Debug, Clone)]
pub struct Model {
    pub string: ElementDescriptor<String>,
    pub boolean: ElementDescriptor<bool>,
    pub integer: ElementDescriptor<i64>,
    pub and: ElementDescriptor<bool>,
    pub or: ElementDescriptor<bool>,
    pub xor: ElementDescriptor<bool>,
    pub equals: ElementDescriptor<bool>,
    pub map: ElementDescriptor<ValueMap>,
    pub entry: ElementDescriptor<Entry>,
    pub uri: ElementDescriptor<String>,
    pub uri_parts: UriParts,
}

/// Name of the element `local` of the built-in model.
pub fn name(local: &str) -> QName {
    QName::new(global::NAMESPACE, local)
}

impl Model {
    /// Register every element of the model in `scope`.
    pub fn register(scope: &Scope) -> Result<Self, RegistryError> {
        let entry = scope.define(name("entry"), EntryBuilder::new())?;

        let uri_parts = UriParts {
            scheme: scope.define(name("scheme"), StringBuilder::new())?,
            authority: scope.define(name("authority"), StringBuilder::new())?,
            path: scope.define(name("path"), StringBuilder::new())?,
            append_path: scope
                .define(name("append-path"), StringBuilder::new())?,
            fragment: scope.define(name("fragment"), StringBuilder::new())?,
            query_parameter: scope
                .define(name("query-parameter"), QueryParamBuilder::new())?,
        };

        Ok(Self {
            string: scope.define(name("string"), StringBuilder::new())?,
            boolean: scope.define(name("boolean"), BooleanBuilder::new())?,
            integer: scope.define(name("integer"), IntegerBuilder::new())?,
            and: scope.define(name("and"), BoolOpBuilder::new(BoolOp::And))?,
            or: scope.define(name("or"), BoolOpBuilder::new(BoolOp::Or))?,
            xor: scope.define(name("xor"), BoolOpBuilder::new(BoolOp::Xor))?,
            equals: scope.define(name("equals"), EqualsBuilder)?,
            map: scope.define(name("map"), MapBuilder::new(entry.clone()))?,
            uri: scope
                .define(name("uri"), UriBuilder::new(uri_parts.clone()))?,
            entry,
            uri_parts,
        })
    }

    /// The model as registered in the
    ///   [global scope](crate::ele::Scope::global).
    ///
    /// Registration happens on first use only.
    pub fn global() -> Result<&'static Self, RegistryError> {
        GLOBAL.get_or_try_init(|| Self::register(&Scope::global()))
    }
}
