// Scalar elements
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

//! Strings, booleans, and integers.
//!
//! Each scalar takes its value from either the attribute `value` or the
//!   text of the element.
//! Since attributes are always applied before text,
//!   the attribute wins if both are present.

use crate::{
    ele::{Attr, BuildContext, BuildResult, Builder},
    xir::{text_to_bool, QName},
};

fn value_attr() -> QName {
    QName::new_local("value")
}

/// A string,
///   or no value if the element is empty.
#[derive(Debug)]
pub struct StringBuilder {
    value: QName,
}

impl StringBuilder {
    pub fn new() -> Self {
        Self {
            value: value_attr(),
        }
    }
}

impl Default for StringBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder for StringBuilder {
    type Object = String;

    fn begin(
        &self,
        _recycled: Option<String>,
        _cx: &mut BuildContext,
    ) -> BuildResult<Option<String>> {
        Ok(None)
    }

    fn attribute(
        &self,
        obj: Option<String>,
        attr: &Attr,
        _cx: &mut BuildContext,
    ) -> BuildResult<Option<String>> {
        if attr.name() == self.value {
            Ok(Some(attr.value().into()))
        } else {
            Ok(obj)
        }
    }

    fn text(
        &self,
        obj: Option<String>,
        text: &str,
        _cx: &mut BuildContext,
    ) -> BuildResult<Option<String>> {
        Ok(obj.or_else(|| Some(text.into())))
    }
}

/// A boolean that is `false` unless stated otherwise.
///
/// `true` (in any case) and `1` are true;
///   any other value is false.
#[derive(Debug)]
pub struct BooleanBuilder {
    value: QName,
}

impl BooleanBuilder {
    pub fn new() -> Self {
        Self {
            value: value_attr(),
        }
    }
}

impl Default for BooleanBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder for BooleanBuilder {
    type Object = bool;

    fn begin(
        &self,
        _recycled: Option<bool>,
        _cx: &mut BuildContext,
    ) -> BuildResult<Option<bool>> {
        Ok(None)
    }

    fn attribute(
        &self,
        obj: Option<bool>,
        attr: &Attr,
        _cx: &mut BuildContext,
    ) -> BuildResult<Option<bool>> {
        if attr.name() == self.value {
            Ok(Some(attr.to_bool()))
        } else {
            Ok(obj)
        }
    }

    fn text(
        &self,
        obj: Option<bool>,
        text: &str,
        _cx: &mut BuildContext,
    ) -> BuildResult<Option<bool>> {
        Ok(obj.or_else(|| Some(text_to_bool(text.trim()))))
    }

    fn finish(
        &self,
        obj: Option<bool>,
        _cx: &mut BuildContext,
    ) -> BuildResult<Option<bool>> {
        Ok(obj.or(Some(false)))
    }
}

/// A signed 64-bit decimal integer,
///   or no value if the element is empty.
#[derive(Debug)]
pub struct IntegerBuilder {
    value: QName,
}

impl IntegerBuilder {
    pub fn new() -> Self {
        Self {
            value: value_attr(),
        }
    }
}

impl Default for IntegerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder for IntegerBuilder {
    type Object = i64;

    fn begin(
        &self,
        _recycled: Option<i64>,
        _cx: &mut BuildContext,
    ) -> BuildResult<Option<i64>> {
        Ok(None)
    }

    fn attribute(
        &self,
        obj: Option<i64>,
        attr: &Attr,
        cx: &mut BuildContext,
    ) -> BuildResult<Option<i64>> {
        if attr.name() != self.value {
            return Ok(obj);
        }

        attr.to_int()
            .map(Some)
            .ok_or_else(|| cx.invalid(attr.value(), "expected an integer"))
    }

    fn text(
        &self,
        obj: Option<i64>,
        text: &str,
        cx: &mut BuildContext,
    ) -> BuildResult<Option<i64>> {
        if obj.is_some() {
            return Ok(obj);
        }

        text.trim()
            .parse()
            .map(Some)
            .map_err(|e| cx.invalid(text, format!("expected an integer: {e}")))
    }
}
