// Builder protocol
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

//! The protocol spoken between the parse driver and element builders.

use super::{
    AnyDescriptor, BuildError, BuildResult, ElementDescriptor, RecyclePool,
};
use crate::{
    format::Formatter,
    xir::{text_to_bool, QName, RawValue},
};
use std::{any::Any, borrow::Cow};

/// A type-erased object under construction or a finished value.
pub type AnyObject = Box<dyn Any + Send>;

/// Constructs values of an element from parse events.
///
/// The object under construction is threaded through each method by
///   value:
///     [`None`] denotes an object that has not (yet) been created.
/// A builder that can only construct its object after having seen all of
///   its parts returns [`None`] from [`Builder::begin`] and accumulates
///   those parts in the frame's scratch state
///     (see [`BuildContext::state_mut`])
///   until [`Builder::finish`].
///
/// For each element,
///   the driver calls [`Builder::begin`] exactly once,
///   then [`Builder::attribute`] for each attribute,
///   then [`Builder::child`] and [`Builder::text`] in document order,
///   and finally [`Builder::finish`].
/// The object returned by [`Builder::finish`] is the value of the element;
///   [`None`] is a legitimate value
///     (e.g. an omitted optional value).
///
/// Builders are shared between all parses using the same descriptor,
///   and must keep all per-element state in either the object or the
///   scratch state.
pub trait Builder: Send + Sync + 'static {
    type Object: Send + 'static;

    /// Begin construction of a new object.
    ///
    /// `recycled` is a previously finished object for reuse;
    ///   builders that reuse it must reset all of its state such that the
    ///   result is indistinguishable from a fresh object.
    fn begin(
        &self,
        recycled: Option<Self::Object>,
        cx: &mut BuildContext,
    ) -> BuildResult<Option<Self::Object>>;

    /// Apply an attribute of the element.
    fn attribute(
        &self,
        obj: Option<Self::Object>,
        _attr: &Attr,
        _cx: &mut BuildContext,
    ) -> BuildResult<Option<Self::Object>> {
        Ok(obj)
    }

    /// Apply the finished value of a child element.
    fn child(
        &self,
        obj: Option<Self::Object>,
        _child: Child,
        _cx: &mut BuildContext,
    ) -> BuildResult<Option<Self::Object>> {
        Ok(obj)
    }

    /// Apply formatted character data of the element.
    ///
    /// Text is delivered only if it is non-empty.
    fn text(
        &self,
        obj: Option<Self::Object>,
        _text: &str,
        _cx: &mut BuildContext,
    ) -> BuildResult<Option<Self::Object>> {
        Ok(obj)
    }

    /// Produce the final value of the element.
    fn finish(
        &self,
        obj: Option<Self::Object>,
        _cx: &mut BuildContext,
    ) -> BuildResult<Option<Self::Object>> {
        Ok(obj)
    }

    /// Whether finished objects may be handed back to
    ///   [`Builder::begin`] for reuse.
    fn recyclable(&self) -> bool {
        false
    }
}

/// An attribute as seen by a [`Builder`].
#[derive(Debug)]
pub struct Attr<'a> {
    name: QName,
    raw: &'a RawValue,
    value: Cow<'a, str>,
}

impl<'a> Attr<'a> {
    /// Prepare an attribute,
    ///   formatting textual raw values with `formatter`.
    pub fn new(
        name: QName,
        raw: &'a RawValue,
        formatter: Option<&Formatter>,
        depth: usize,
    ) -> BuildResult<Self> {
        let value = match (raw, formatter) {
            (RawValue::Text(text), Some(fmt)) => fmt.format(text, depth)?,
            (raw, _) => raw.as_text(),
        };

        Ok(Self { name, raw, value })
    }

    pub fn name(&self) -> QName {
        self.name
    }

    /// Value as supplied by the token source,
    ///   before formatting.
    pub fn raw(&self) -> &RawValue {
        self.raw
    }

    /// Formatted textual value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Interpret the formatted value as a boolean.
    ///
    /// Typed raw values are used as they are.
    pub fn to_bool(&self) -> bool {
        match self.raw {
            RawValue::Text(_) => text_to_bool(self.value.trim()),
            typed => typed.to_bool(),
        }
    }

    /// Interpret the formatted value as a signed integer.
    pub fn to_int(&self) -> Option<i64> {
        match self.raw {
            RawValue::Text(_) => self.value.trim().parse().ok(),
            typed => typed.to_int(),
        }
    }
}

/// The finished value of a child element.
pub struct Child {
    descriptor: AnyDescriptor,
    value: Option<AnyObject>,
}

impl Child {
    pub fn new(descriptor: AnyDescriptor, value: Option<AnyObject>) -> Self {
        Self { descriptor, value }
    }

    pub fn descriptor(&self) -> &AnyDescriptor {
        &self.descriptor
    }

    pub fn name(&self) -> QName {
        self.descriptor.name()
    }

    /// Whether this child was produced by `desc`.
    pub fn is<T>(&self, desc: &ElementDescriptor<T>) -> bool {
        desc == &self.descriptor
    }

    /// Whether the child finished without a value.
    pub fn is_absent(&self) -> bool {
        self.value.is_none()
    }

    /// Whether the value of the child is of type `V`.
    pub fn holds<V: Any>(&self) -> bool {
        self.value.as_ref().is_some_and(|v| v.is::<V>())
    }

    pub fn value_ref<V: Any>(&self) -> Option<&V> {
        self.value.as_ref().and_then(|v| v.downcast_ref::<V>())
    }

    /// Take the value of the child if it is of type `V`,
    ///   otherwise hand the child back.
    pub fn downcast<V: Any>(self) -> Result<Option<V>, Self> {
        match self.value {
            None => Ok(None),
            Some(value) => match value.downcast::<V>() {
                Ok(v) => Ok(Some(*v)),
                Err(value) => Err(Self {
                    descriptor: self.descriptor,
                    value: Some(value),
                }),
            },
        }
    }

    /// Take the value of a child produced by `desc`.
    ///
    /// Produces [`None`] if the child was produced by a different
    ///   descriptor or finished without a value.
    pub fn take<T: Any>(self, desc: &ElementDescriptor<T>) -> Option<T> {
        if self.is(desc) {
            self.downcast().ok().flatten()
        } else {
            None
        }
    }

    pub fn into_parts(self) -> (AnyDescriptor, Option<AnyObject>) {
        (self.descriptor, self.value)
    }
}

impl std::fmt::Debug for Child {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Child")
            .field("descriptor", &self.descriptor)
            .field("absent", &self.is_absent())
            .finish()
    }
}

/// Context of the element under construction.
///
/// A context is owned by the frame of a single element;
///   its scratch state is never visible to any other element and starts
///   out empty.
pub struct BuildContext<'a> {
    descriptor: &'a AnyDescriptor,
    state: &'a mut Option<AnyObject>,
    formatter: Option<&'a Formatter<'a>>,
    depth: usize,
    pool: &'a RecyclePool,
}

impl<'a> BuildContext<'a> {
    pub fn new(
        descriptor: &'a AnyDescriptor,
        state: &'a mut Option<AnyObject>,
        formatter: Option<&'a Formatter<'a>>,
        depth: usize,
        pool: &'a RecyclePool,
    ) -> Self {
        Self {
            descriptor,
            state,
            formatter,
            depth,
            pool,
        }
    }

    /// Descriptor of the element under construction.
    pub fn descriptor(&self) -> &AnyDescriptor {
        self.descriptor
    }

    pub fn element(&self) -> QName {
        self.descriptor.name()
    }

    /// Scratch state of the frame,
    ///   if it is present and of type `S`.
    pub fn state<S: Any>(&self) -> Option<&S> {
        self.state.as_ref().and_then(|s| s.downcast_ref::<S>())
    }

    pub fn state_mut<S: Any>(&mut self) -> Option<&mut S> {
        self.state.as_mut().and_then(|s| s.downcast_mut::<S>())
    }

    /// Replace the scratch state of the frame.
    pub fn set_state<S: Any + Send>(&mut self, state: S) {
        *self.state = Some(Box::new(state));
    }

    /// Scratch state of type `S`,
    ///   initializing it with its default if it is absent or of another
    ///   type.
    pub fn state_or_default<S: Any + Send + Default>(&mut self) -> &mut S {
        if self.state::<S>().is_none() {
            self.set_state(S::default());
        }

        // The above guarantees that the state is present as `S`.
        match self.state.as_mut().and_then(|s| s.downcast_mut::<S>()) {
            Some(state) => state,
            None => unreachable!("scratch state was just initialized"),
        }
    }

    /// Remove and return the scratch state if it is of type `S`.
    ///
    /// State of any other type is left in place.
    pub fn take_state<S: Any>(&mut self) -> Option<S> {
        match self.state.take()?.downcast::<S>() {
            Ok(state) => Some(*state),
            Err(other) => {
                *self.state = Some(other);
                None
            }
        }
    }

    /// Format `text` using the resolvers of the current parse.
    pub fn format<'t>(&self, text: &'t str) -> BuildResult<Cow<'t, str>> {
        match self.formatter {
            Some(fmt) => Ok(fmt.format(text, self.depth)?),
            None => Ok(Cow::Borrowed(text)),
        }
    }

    /// Hand a child value back for reuse.
    ///
    /// Values of descriptors that are not recyclable are dropped.
    pub fn recycle(&self, child: Child) {
        let (desc, value) = child.into_parts();

        if let Some(value) = value {
            if desc.recyclable() {
                self.pool.release(&desc, value);
            }
        }
    }

    pub fn incomplete(&self, reason: impl Into<String>) -> BuildError {
        BuildError::IncompleteElement {
            element: self.element(),
            reason: reason.into(),
        }
    }

    pub fn ambiguous(&self, child: &Child) -> BuildError {
        BuildError::AmbiguousChild {
            element: self.element(),
            child: child.name(),
        }
    }

    pub fn invalid(
        &self,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> BuildError {
        BuildError::InvalidValue {
            element: self.element(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Object-safe form of [`Builder`] operating on [`AnyObject`]s.
pub(crate) trait ErasedBuilder: Send + Sync {
    fn begin(
        &self,
        recycled: Option<AnyObject>,
        cx: &mut BuildContext,
    ) -> BuildResult<Option<AnyObject>>;

    fn attribute(
        &self,
        obj: Option<AnyObject>,
        attr: &Attr,
        cx: &mut BuildContext,
    ) -> BuildResult<Option<AnyObject>>;

    fn child(
        &self,
        obj: Option<AnyObject>,
        child: Child,
        cx: &mut BuildContext,
    ) -> BuildResult<Option<AnyObject>>;

    fn text(
        &self,
        obj: Option<AnyObject>,
        text: &str,
        cx: &mut BuildContext,
    ) -> BuildResult<Option<AnyObject>>;

    fn finish(
        &self,
        obj: Option<AnyObject>,
        cx: &mut BuildContext,
    ) -> BuildResult<Option<AnyObject>>;

    fn recyclable(&self) -> bool;
}

fn unbox<T: Any>(
    obj: Option<AnyObject>,
    cx: &BuildContext,
) -> BuildResult<Option<T>> {
    obj.map(|boxed| {
        boxed
            .downcast::<T>()
            .map(|obj| *obj)
            .map_err(|_| BuildError::TypeMismatch {
                element: cx.element(),
                expected: std::any::type_name::<T>(),
            })
    })
    .transpose()
}

fn rebox<T: Any + Send>(obj: Option<T>) -> Option<AnyObject> {
    obj.map(|obj| Box::new(obj) as AnyObject)
}

impl<B: Builder> ErasedBuilder for B {
    fn begin(
        &self,
        recycled: Option<AnyObject>,
        cx: &mut BuildContext,
    ) -> BuildResult<Option<AnyObject>> {
        let recycled = unbox(recycled, cx)?;
        Builder::begin(self, recycled, cx).map(rebox)
    }

    fn attribute(
        &self,
        obj: Option<AnyObject>,
        attr: &Attr,
        cx: &mut BuildContext,
    ) -> BuildResult<Option<AnyObject>> {
        let obj = unbox(obj, cx)?;
        Builder::attribute(self, obj, attr, cx).map(rebox)
    }

    fn child(
        &self,
        obj: Option<AnyObject>,
        child: Child,
        cx: &mut BuildContext,
    ) -> BuildResult<Option<AnyObject>> {
        let obj = unbox(obj, cx)?;
        Builder::child(self, obj, child, cx).map(rebox)
    }

    fn text(
        &self,
        obj: Option<AnyObject>,
        text: &str,
        cx: &mut BuildContext,
    ) -> BuildResult<Option<AnyObject>> {
        let obj = unbox(obj, cx)?;
        Builder::text(self, obj, text, cx).map(rebox)
    }

    fn finish(
        &self,
        obj: Option<AnyObject>,
        cx: &mut BuildContext,
    ) -> BuildResult<Option<AnyObject>> {
        let obj = unbox(obj, cx)?;
        Builder::finish(self, obj, cx).map(rebox)
    }

    fn recyclable(&self) -> bool {
        Builder::recyclable(self)
    }
}
