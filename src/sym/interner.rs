// Global intern pool
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

//! Global intern pool.
//!
//! See the [parent module](super) for more information.

use bumpalo::Bump;
use fxhash::FxHashMap;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::fmt::{self, Display};
use std::num::NonZeroU32;

/// The one and only intern pool.
///
/// This is never dropped,
///   which is what permits [`Interner`] to hand out `'static` slices of
///   its arena.
static GLOBAL: Lazy<Mutex<Interner>> =
    Lazy::new(|| Mutex::new(Interner::new()));

/// Reference to an interned string.
///
/// The same [`SymbolId`] will always be produced for a given string.
/// The niche provided by [`NonZeroU32`] keeps `Option<SymbolId>` the same
///   size as [`SymbolId`] itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(NonZeroU32);

const_assert!(
    std::mem::size_of::<Option<SymbolId>>() == std::mem::size_of::<u32>()
);

impl SymbolId {
    /// Retrieve the string that was interned to produce this symbol.
    pub fn lookup_str(self) -> &'static str {
        GLOBAL.lock().index_lookup(self)
    }

    /// Integer representation of the symbol.
    ///
    /// This is stable only for the life of the process.
    pub fn as_u32(self) -> u32 {
        self.0.get()
    }
}

impl Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.lookup_str())
    }
}

/// Intern a string using the global intern pool.
pub trait GlobalSymbolIntern {
    /// Intern a string slice or return the existing [`SymbolId`].
    fn intern(self) -> SymbolId;

    /// Retrieve the [`SymbolId`] of a string only if it has already been
    ///   interned.
    ///
    /// This can be used to avoid polluting the pool with names that could
    ///   not possibly have been registered.
    fn intern_soft(self) -> Option<SymbolId>;
}

impl GlobalSymbolIntern for &str {
    fn intern(self) -> SymbolId {
        GLOBAL.lock().intern(self)
    }

    fn intern_soft(self) -> Option<SymbolId> {
        GLOBAL.lock().intern_soft(self)
    }
}

/// An interner backed by an [arena](bumpalo).
///
/// Since every symbol lives until the interner itself is freed,
///   an arena is the appropriate allocation strategy;
///     it also provides a stable location in memory for symbol data.
struct Interner {
    arena: Bump,
    map: FxHashMap<&'static str, SymbolId>,
    strings: Vec<&'static str>,
}

impl Interner {
    fn new() -> Self {
        Self {
            arena: Bump::new(),
            map: FxHashMap::default(),
            strings: Vec::new(),
        }
    }

    fn intern(&mut self, value: &str) -> SymbolId {
        if let Some(&sym) = self.map.get(value) {
            return sym;
        }

        // SAFETY: The arena never moves or frees an allocation until it is
        //   dropped,
        //     and the only `Interner` lives in `GLOBAL`,
        //     which is never dropped.
        let stored: &'static str =
            unsafe { &*(self.arena.alloc_str(value) as *const str) };

        let sym =
            SymbolId(NonZeroU32::MIN.saturating_add(self.strings.len() as u32));

        self.strings.push(stored);
        self.map.insert(stored, sym);

        sym
    }

    fn intern_soft(&self, value: &str) -> Option<SymbolId> {
        self.map.get(value).copied()
    }

    fn index_lookup(&self, sym: SymbolId) -> &'static str {
        // Symbols are only ever minted by this interner,
        //   so the index is always in bounds.
        self.strings[(sym.0.get() - 1) as usize]
    }
}
