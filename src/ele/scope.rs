// Registration scopes
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

use super::{AnyDescriptor, Builder, ElementDescriptor, RegistryError};
use crate::xir::QName;
use fxhash::FxHashMap;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::trace;

static GLOBAL: Lazy<Arc<Scope>> = Lazy::new(|| Arc::new(Scope::new()));

/// A container of [`ElementDescriptor`]s by name.
///
/// Lookups that fail in a scope fall back to its parent,
///   so a child scope may shadow names of its ancestors without affecting
///   them.
/// Registration is serialized by a lock,
///   allowing scopes to be shared between threads.
#[derive(Debug, Default)]
pub struct Scope {
    parent: Option<Arc<Scope>>,
    descriptors: RwLock<FxHashMap<QName, AnyDescriptor>>,
}

impl Scope {
    /// A new root scope having no parent.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide global scope.
    pub fn global() -> Arc<Scope> {
        GLOBAL.clone()
    }

    /// A new empty scope whose lookups fall back to `parent`.
    pub fn child_of(parent: Arc<Scope>) -> Self {
        Self {
            parent: Some(parent),
            descriptors: Default::default(),
        }
    }

    pub fn parent(&self) -> Option<&Arc<Scope>> {
        self.parent.as_ref()
    }

    /// Register `desc` under its name.
    ///
    /// Registering the same descriptor again is a no-op;
    ///   registering a different descriptor under a name already
    ///   registered in this scope is an error.
    /// Names registered only in ancestor scopes are shadowed.
    pub fn register<T>(
        &self,
        desc: &ElementDescriptor<T>,
    ) -> Result<(), RegistryError> {
        self.register_any(desc.as_any().clone())
    }

    pub fn register_any(
        &self,
        desc: AnyDescriptor,
    ) -> Result<(), RegistryError> {
        let name = desc.name();
        let mut descriptors = self.descriptors.write();

        match descriptors.get(&name) {
            Some(existing) if *existing == desc => Ok(()),
            Some(_) => Err(RegistryError::Duplicate(name)),
            None => {
                trace!(%name, id = %desc.id(), "registering element");
                descriptors.insert(name, desc);
                Ok(())
            }
        }
    }

    /// Create a descriptor for `name` and register it.
    pub fn define<B: Builder>(
        &self,
        name: QName,
        builder: B,
    ) -> Result<ElementDescriptor<B::Object>, RegistryError> {
        let desc = ElementDescriptor::new(name, builder);
        self.register(&desc)?;

        Ok(desc)
    }

    /// Look up the descriptor registered for `name` in this scope or the
    ///   nearest ancestor.
    pub fn lookup(&self, name: QName) -> Option<AnyDescriptor> {
        self.descriptors
            .read()
            .get(&name)
            .cloned()
            .or_else(|| self.parent.as_ref().and_then(|p| p.lookup(name)))
    }

    /// Whether `name` is registered in this scope itself.
    pub fn contains_local(&self, name: QName) -> bool {
        self.descriptors.read().contains_key(&name)
    }
}

assert_impl_all!(Scope: Send, Sync);
