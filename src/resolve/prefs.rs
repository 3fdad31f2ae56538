// Preference token resolution
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

//! Resolution of `@prefs:FILE/KEY` tokens against named preference files.

use super::{PathNode, ResolveError, ResolveResult, Resolver};
use std::{
    fs::File,
    io::{BufReader, ErrorKind},
    path::PathBuf,
};
use tracing::trace;

/// A store of named preference files,
///   each a flat set of key/value pairs.
pub trait PreferenceStore {
    /// Look up `key` within the preference file `file`.
    ///
    /// A file that does not exist has no keys.
    fn get(&self, file: &str, key: &str) -> ResolveResult;
}

/// Preference files stored as JSON objects in `DIR/FILE.json`.
///
/// Files are read on each lookup,
///   so changes made by other processes are observed.
#[derive(Debug, Clone)]
pub struct DirPreferences {
    dir: PathBuf,
}

impl DirPreferences {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl PreferenceStore for DirPreferences {
    fn get(&self, file: &str, key: &str) -> ResolveResult {
        let path = self.dir.join(format!("{file}.json"));
        trace!(path = %path.display(), key, "reading preferences");

        let fh = match File::open(&path) {
            Ok(fh) => fh,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ResolveError::Io {
                    path: path.display().to_string(),
                    source,
                })
            }
        };

        let prefs: serde_json::Value =
            serde_json::from_reader(BufReader::new(fh)).map_err(|source| {
                ResolveError::Decode {
                    path: path.display().to_string(),
                    source,
                }
            })?;

        Ok(prefs.member(key).map(|value| value.to_text()))
    }
}

/// Resolve `@prefs:FILE/KEY` tokens using a [`PreferenceStore`].
///
/// Both `FILE` and `KEY` must be non-empty;
///   the first `/` separates the two,
///     so `KEY` may itself contain slashes.
#[derive(Debug, Clone)]
pub struct PrefsResolver<S: PreferenceStore> {
    store: S,
}

impl<S: PreferenceStore> PrefsResolver<S> {
    pub const PREFIX: &'static str = "@prefs:";

    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: PreferenceStore> Resolver for PrefsResolver<S> {
    fn resolve(&self, token: &str) -> ResolveResult {
        let Some(rest) = token.strip_prefix(Self::PREFIX) else {
            return Ok(None);
        };

        match rest.split_once('/') {
            Some((file, key)) if !file.is_empty() && !key.is_empty() => {
                self.store.get(file, key)
            }
            _ => Ok(None),
        }
    }
}
