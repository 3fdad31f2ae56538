// Records populated from field tables
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

//! Population of arbitrary records through explicit setter tables.
//!
//! A [`FieldTable`] maps the names of attributes and child elements to
//!   setters of the fields of a record type.
//! The [`RecordBuilder`] of a table populates a record from any element
//!   whose attributes and children are among those names:
//!
//! ```
//! use xmlmagic::ele::Builder;
//! use xmlmagic::model::{FieldTable, RecordBuilder};
//! use xmlmagic::xir::QName;
//!
//! #[derive(Debug, Default)]
//! struct Account {
//!     name: String,
//!     active: bool,
//! }
//!
//! let table = FieldTable::<Account>::new()
//!     .with_attr(QName::new_local("name"), |acct, attr| {
//!         acct.name = attr.value().into();
//!         Ok(())
//!     })
//!     .with_attr(QName::new_local("active"), |acct, attr| {
//!         acct.active = attr.to_bool();
//!         Ok(())
//!     });
//!
//! let builder = RecordBuilder::new(table);
//! assert!(!builder.recyclable());
//! ```
//!
//! Names missing from the table are ignored.

use crate::{
    ele::{Attr, BuildContext, BuildResult, Builder, Child},
    xir::QName,
};
use fxhash::FxHashMap;
use std::fmt::{self, Debug};

pub type AttrSetter<T> = fn(&mut T, &Attr) -> BuildResult<()>;
pub type ChildSetter<T> = fn(&mut T, Child) -> BuildResult<()>;
pub type TextSetter<T> = fn(&mut T, &str) -> BuildResult<()>;

/// Setters of the fields of `T` by attribute and child element name.
pub struct FieldTable<T> {
    attrs: FxHashMap<QName, AttrSetter<T>>,
    children: FxHashMap<QName, ChildSetter<T>>,
    text: Option<TextSetter<T>>,
}

impl<T> FieldTable<T> {
    pub fn new() -> Self {
        Self {
            attrs: Default::default(),
            children: Default::default(),
            text: None,
        }
    }

    /// Set a field from the attribute `name`.
    ///
    /// A later setter for the same name replaces an earlier one.
    pub fn with_attr(mut self, name: QName, setter: AttrSetter<T>) -> Self {
        self.attrs.insert(name, setter);
        self
    }

    /// Set a field from the value of child elements named `name`.
    pub fn with_child(mut self, name: QName, setter: ChildSetter<T>) -> Self {
        self.children.insert(name, setter);
        self
    }

    /// Set a field from the text of the element.
    pub fn with_text(mut self, setter: TextSetter<T>) -> Self {
        self.text = Some(setter);
        self
    }

    pub fn attr(&self, name: QName) -> Option<AttrSetter<T>> {
        self.attrs.get(&name).copied()
    }

    pub fn child(&self, name: QName) -> Option<ChildSetter<T>> {
        self.children.get(&name).copied()
    }
}

impl<T> Default for FieldTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for FieldTable<T> {
    fn clone(&self) -> Self {
        Self {
            attrs: self.attrs.clone(),
            children: self.children.clone(),
            text: self.text,
        }
    }
}

impl<T> Debug for FieldTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldTable")
            .field("attrs", &self.attrs.keys().collect::<Vec<_>>())
            .field("children", &self.children.keys().collect::<Vec<_>>())
            .field("text", &self.text.is_some())
            .finish()
    }
}

/// Populates a `T` using a [`FieldTable`].
///
/// A recycled object is populated as it is rather than being reset,
///   which is how a caller-supplied instance is populated in place
///     (see [`crate::loader::populate`]).
/// For that reason builders of records are never recyclable through the
///   recycling pool.
#[derive(Debug)]
pub struct RecordBuilder<T> {
    table: FieldTable<T>,
}

impl<T> RecordBuilder<T> {
    pub fn new(table: FieldTable<T>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &FieldTable<T> {
        &self.table
    }
}

impl<T> Builder for RecordBuilder<T>
where
    T: Default + Send + 'static,
{
    type Object = T;

    fn begin(
        &self,
        recycled: Option<T>,
        _cx: &mut BuildContext,
    ) -> BuildResult<Option<T>> {
        Ok(Some(recycled.unwrap_or_default()))
    }

    fn attribute(
        &self,
        obj: Option<T>,
        attr: &Attr,
        _cx: &mut BuildContext,
    ) -> BuildResult<Option<T>> {
        let mut record = obj.unwrap_or_default();

        if let Some(set) = self.table.attr(attr.name()) {
            set(&mut record, attr)?;
        }

        Ok(Some(record))
    }

    fn child(
        &self,
        obj: Option<T>,
        child: Child,
        _cx: &mut BuildContext,
    ) -> BuildResult<Option<T>> {
        let mut record = obj.unwrap_or_default();

        if let Some(set) = self.table.child(child.name()) {
            set(&mut record, child)?;
        }

        Ok(Some(record))
    }

    fn text(
        &self,
        obj: Option<T>,
        text: &str,
        _cx: &mut BuildContext,
    ) -> BuildResult<Option<T>> {
        let mut record = obj.unwrap_or_default();

        if let Some(set) = self.table.text {
            set(&mut record, text)?;
        }

        Ok(Some(record))
    }
}
