// Element descriptors
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

use super::builder::{Builder, ErasedBuilder};
use crate::xir::QName;
use std::{
    fmt::{self, Debug, Display},
    hash::{Hash, Hasher},
    marker::PhantomData,
    sync::{
        atomic::{AtomicU32, Ordering},
        Arc,
    },
};

/// Process-unique identity of a descriptor.
///
/// Identifiers are never reused,
///   so two descriptors are the same iff their identifiers are equal,
///     regardless of their names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DescriptorId(u32);

impl DescriptorId {
    fn next() -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(1);

        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl Display for DescriptorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

struct Inner {
    id: DescriptorId,
    name: QName,
    builder: Box<dyn ErasedBuilder>,
}

/// Descriptor of an element whose value type is not statically known.
///
/// This is the form stored in a [`Scope`](super::Scope) and seen by the
///   parse driver.
/// Cloning is cheap and yields the same descriptor.
#[derive(Clone)]
pub struct AnyDescriptor(Arc<Inner>);

impl AnyDescriptor {
    pub fn id(&self) -> DescriptorId {
        self.0.id
    }

    pub fn name(&self) -> QName {
        self.0.name
    }

    /// Whether finished values of this element may be recycled.
    pub fn recyclable(&self) -> bool {
        self.0.builder.recyclable()
    }

    pub(crate) fn builder(&self) -> &dyn ErasedBuilder {
        self.0.builder.as_ref()
    }
}

impl PartialEq for AnyDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for AnyDescriptor {}

impl Hash for AnyDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state)
    }
}

impl Debug for AnyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyDescriptor")
            .field("id", &self.id())
            .field("name", &self.name())
            .finish()
    }
}

/// Immutable binding of an element name to the [`Builder`] responsible
///   for constructing values of type `T`.
///
/// A descriptor is not associated with any scope until it is registered;
///   the same descriptor may be registered in any number of scopes.
pub struct ElementDescriptor<T> {
    inner: AnyDescriptor,
    _ty: PhantomData<fn() -> T>,
}

impl<T: Send + 'static> ElementDescriptor<T> {
    pub fn new<B>(name: QName, builder: B) -> Self
    where
        B: Builder<Object = T>,
    {
        Self {
            inner: AnyDescriptor(Arc::new(Inner {
                id: DescriptorId::next(),
                name,
                builder: Box::new(builder),
            })),
            _ty: PhantomData,
        }
    }
}

impl<T> ElementDescriptor<T> {
    pub fn id(&self) -> DescriptorId {
        self.inner.id()
    }

    pub fn name(&self) -> QName {
        self.inner.name()
    }

    pub fn as_any(&self) -> &AnyDescriptor {
        &self.inner
    }
}

// Derive would needlessly require `T: Clone`.
impl<T> Clone for ElementDescriptor<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            _ty: PhantomData,
        }
    }
}

impl<T> PartialEq for ElementDescriptor<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T> Eq for ElementDescriptor<T> {}

impl<T> PartialEq<AnyDescriptor> for ElementDescriptor<T> {
    fn eq(&self, other: &AnyDescriptor) -> bool {
        self.inner == *other
    }
}

impl<T> Debug for ElementDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementDescriptor")
            .field("id", &self.id())
            .field("name", &self.name())
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T> From<ElementDescriptor<T>> for AnyDescriptor {
    fn from(desc: ElementDescriptor<T>) -> Self {
        desc.inner
    }
}
