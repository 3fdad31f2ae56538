// Maps of values
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

//! Key-ordered maps assembled from `entry` elements.
//!
//! ```xml
//! <map xmlns="urn:xmlmagic:model">
//!   <entry key="name">{@json:user.name}</entry>
//!   <entry key="admin"><boolean value="true" /></entry>
//! </map>
//! ```
//!
//! Both maps and entries are recyclable:
//!   a map releases each entry once it has taken its key and value,
//!     so that documents with many entries reuse a small number of
//!     [`Entry`] objects.
//! Finished maps are never released by the model itself,
//!   since they are moved into the [`Value`] of their parent;
//!     a caller that is done with a map may release it to the pool
//!     using [`RecyclePool::release`](crate::ele::RecyclePool::release).

use super::{Value, ValueMap};
use crate::{
    ele::{
        Attr, BuildContext, BuildResult, Builder, Child, ElementDescriptor,
    },
    xir::QName,
};

/// A single key/value pair of a map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    pub key: Option<String>,
    pub value: Option<Value>,
}

/// Collects [`Entry`] children into a [`ValueMap`].
///
/// Children that are not entries are ignored,
///   as are entries without a value.
/// Of entries with the same key the last one wins.
///
/// Maps are reused only once they have been released to the pool by the
///   caller (see the [module documentation](self)).
#[derive(Debug)]
pub struct MapBuilder {
    entry: ElementDescriptor<Entry>,
}

impl MapBuilder {
    pub fn new(entry: ElementDescriptor<Entry>) -> Self {
        Self { entry }
    }
}

impl Builder for MapBuilder {
    type Object = ValueMap;

    fn begin(
        &self,
        recycled: Option<ValueMap>,
        _cx: &mut BuildContext,
    ) -> BuildResult<Option<ValueMap>> {
        let mut map = recycled.unwrap_or_default();
        map.clear();

        Ok(Some(map))
    }

    fn child(
        &self,
        obj: Option<ValueMap>,
        child: Child,
        cx: &mut BuildContext,
    ) -> BuildResult<Option<ValueMap>> {
        if !child.is(&self.entry) {
            return Ok(obj);
        }

        let mut map = obj.unwrap_or_default();
        let desc = child.descriptor().clone();

        if let Some(mut entry) = child.take(&self.entry) {
            if let (Some(key), Some(value)) =
                (entry.key.take(), entry.value.take())
            {
                map.insert(key, value);
            }

            cx.recycle(Child::new(desc, Some(Box::new(entry))));
        }

        Ok(Some(map))
    }

    fn recyclable(&self) -> bool {
        true
    }
}

/// What provided the value of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Filled {
    Text,
    Child,
}

/// An [`Entry`] having the mandatory attribute `key`.
///
/// The value is either the single child element or the text of the
///   element,
///     whichever comes first.
/// A second child element is an error.
#[derive(Debug)]
pub struct EntryBuilder {
    key: QName,
}

impl EntryBuilder {
    pub fn new() -> Self {
        Self {
            key: QName::new_local("key"),
        }
    }
}

impl Default for EntryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder for EntryBuilder {
    type Object = Entry;

    fn begin(
        &self,
        recycled: Option<Entry>,
        _cx: &mut BuildContext,
    ) -> BuildResult<Option<Entry>> {
        let mut entry = recycled.unwrap_or_default();
        entry.key = None;
        entry.value = None;

        Ok(Some(entry))
    }

    fn attribute(
        &self,
        obj: Option<Entry>,
        attr: &Attr,
        _cx: &mut BuildContext,
    ) -> BuildResult<Option<Entry>> {
        let mut entry = obj.unwrap_or_default();

        if attr.name() == self.key {
            entry.key = Some(attr.value().into());
        }

        Ok(Some(entry))
    }

    fn child(
        &self,
        obj: Option<Entry>,
        child: Child,
        cx: &mut BuildContext,
    ) -> BuildResult<Option<Entry>> {
        match cx.state::<Filled>() {
            Some(Filled::Child) => return Err(cx.ambiguous(&child)),
            Some(Filled::Text) => return Ok(obj),
            None => (),
        }

        let mut entry = obj.unwrap_or_default();

        if let Some(value) = Value::from_child(child) {
            entry.value = Some(value);
            cx.set_state(Filled::Child);
        }

        Ok(Some(entry))
    }

    fn text(
        &self,
        obj: Option<Entry>,
        text: &str,
        cx: &mut BuildContext,
    ) -> BuildResult<Option<Entry>> {
        let mut entry = obj.unwrap_or_default();
        let filled = cx.state::<Filled>().copied();

        match (filled, entry.value.as_mut()) {
            (Some(Filled::Child), _) => (),
            (Some(Filled::Text), Some(Value::Str(s))) => s.push_str(text),
            _ => {
                entry.value = Some(Value::Str(text.into()));
                cx.set_state(Filled::Text);
            }
        }

        Ok(Some(entry))
    }

    fn finish(
        &self,
        obj: Option<Entry>,
        cx: &mut BuildContext,
    ) -> BuildResult<Option<Entry>> {
        match obj {
            Some(entry) if entry.key.is_some() => Ok(Some(entry)),
            _ => Err(cx.incomplete("missing attribute `key`")),
        }
    }

    fn recyclable(&self) -> bool {
        true
    }
}
