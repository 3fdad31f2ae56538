// Recycling of finished values
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

use super::{builder::AnyObject, AnyDescriptor, DescriptorId};
use crate::global::RECYCLE_POOL_LIMIT;
use fxhash::FxHashMap;
use parking_lot::Mutex;

/// Pools of released objects keyed by descriptor identity.
///
/// Objects are moved into and out of the pool,
///   so an object obtained from the pool is never referenced by anything
///   else.
/// Each pool holds at most `limit` objects;
///   objects released into a full pool are dropped.
pub struct RecyclePool {
    limit: usize,
    pools: Mutex<FxHashMap<DescriptorId, Vec<AnyObject>>>,
}

impl Default for RecyclePool {
    fn default() -> Self {
        Self::with_limit(RECYCLE_POOL_LIMIT)
    }
}

impl RecyclePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// A limit of `0` disables recycling.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            pools: Mutex::new(FxHashMap::default()),
        }
    }

    /// Remove a previously released object of `desc` from the pool.
    pub fn obtain(&self, desc: &AnyDescriptor) -> Option<AnyObject> {
        self.pools.lock().get_mut(&desc.id()).and_then(Vec::pop)
    }

    /// Release `obj` of `desc` into the pool.
    ///
    /// Returns whether the object was retained.
    pub fn release(&self, desc: &AnyDescriptor, obj: AnyObject) -> bool {
        if self.limit == 0 {
            return false;
        }

        let mut pools = self.pools.lock();
        let pool = pools.entry(desc.id()).or_default();

        if pool.len() >= self.limit {
            return false;
        }

        pool.push(obj);
        true
    }

    /// Number of objects available for `desc`.
    pub fn available(&self, desc: &AnyDescriptor) -> usize {
        self.pools.lock().get(&desc.id()).map_or(0, Vec::len)
    }
}

assert_impl_all!(RecyclePool: Send, Sync);
