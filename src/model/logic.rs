// Boolean operations
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

use super::Value;
use crate::{
    ele::{Attr, BuildContext, BuildResult, Builder, Child},
    xir::QName,
};

/// Binary operation folded over the boolean children of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolOp {
    And,
    Or,
    Xor,
}

impl BoolOp {
    pub fn apply(self, a: bool, b: bool) -> bool {
        match self {
            Self::And => a && b,
            Self::Or => a || b,
            Self::Xor => a ^ b,
        }
    }
}

#[derive(Debug, Default)]
struct Fold {
    invert: bool,
    acc: Option<bool>,
}

/// Folds boolean children using a [`BoolOp`].
///
/// Children that are not booleans do not participate.
/// An element without boolean children is `false`,
///   before the result is negated by `invert="true"`.
#[derive(Debug)]
pub struct BoolOpBuilder {
    op: BoolOp,
    invert: QName,
}

impl BoolOpBuilder {
    pub fn new(op: BoolOp) -> Self {
        Self {
            op,
            invert: QName::new_local("invert"),
        }
    }
}

impl Builder for BoolOpBuilder {
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
        cx: &mut BuildContext,
    ) -> BuildResult<Option<bool>> {
        if attr.name() == self.invert {
            cx.state_or_default::<Fold>().invert = attr.to_bool();
        }

        Ok(obj)
    }

    fn child(
        &self,
        obj: Option<bool>,
        child: Child,
        cx: &mut BuildContext,
    ) -> BuildResult<Option<bool>> {
        if let Some(b) = Value::from_child(child).and_then(|v| v.as_bool()) {
            let fold = cx.state_or_default::<Fold>();

            fold.acc = Some(match fold.acc {
                Some(acc) => self.op.apply(acc, b),
                None => b,
            });
        }

        Ok(obj)
    }

    fn finish(
        &self,
        _obj: Option<bool>,
        cx: &mut BuildContext,
    ) -> BuildResult<Option<bool>> {
        let Fold { invert, acc } =
            cx.take_state::<Fold>().unwrap_or_default();

        Ok(Some(acc.unwrap_or(false) ^ invert))
    }
}

/// A child as seen by [`EqualsBuilder`].
#[derive(Debug)]
enum Seen {
    Value(Option<Value>),

    /// A value that is not a [`Value`],
    ///   which is equal to nothing.
    Opaque,
}

impl Seen {
    fn of(child: Child) -> Self {
        let absent = child.is_absent();

        match Value::from_child(child) {
            None if !absent => Self::Opaque,
            value => Self::Value(value),
        }
    }

    fn equals(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Value(a), Self::Value(b)) => a == b,
            _ => false,
        }
    }
}

struct Equality {
    last: Option<Seen>,
    equal: bool,
}

impl Default for Equality {
    fn default() -> Self {
        Self {
            last: None,
            equal: true,
        }
    }
}

/// Whether all children are equal.
///
/// Two absent children are equal to one another.
/// A child whose value is not a [`Value`]
///   (such as a `query-parameter`)
///   is equal to no other child.
/// An element with fewer than two children is `true`.
#[derive(Debug, Default)]
pub struct EqualsBuilder;

impl Builder for EqualsBuilder {
    type Object = bool;

    fn begin(
        &self,
        _recycled: Option<bool>,
        _cx: &mut BuildContext,
    ) -> BuildResult<Option<bool>> {
        Ok(None)
    }

    fn child(
        &self,
        obj: Option<bool>,
        child: Child,
        cx: &mut BuildContext,
    ) -> BuildResult<Option<bool>> {
        let seen = Seen::of(child);
        let eq = cx.state_or_default::<Equality>();

        if eq.last.as_ref().is_some_and(|last| !last.equals(&seen)) {
            eq.equal = false;
        }

        eq.last = Some(seen);

        Ok(obj)
    }

    fn finish(
        &self,
        _obj: Option<bool>,
        cx: &mut BuildContext,
    ) -> BuildResult<Option<bool>> {
        Ok(Some(cx.take_state::<Equality>().map_or(true, |eq| eq.equal)))
    }
}
