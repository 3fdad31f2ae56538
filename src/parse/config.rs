// Parser configuration
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

use crate::global::{DEFAULT_FORMAT_DEPTH, RECURSIVE_PREFIX};

/// Configuration of a [`Parser`](super::Parser).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseConfig {
    /// Maximum number of recursive hops when formatting attribute values
    ///   and text.
    pub format_depth: usize,

    /// Token prefix denoting a recursively expanded resource.
    pub recursive_prefix: String,

    /// Skip the entire subtree of child elements that have no
    ///   registered descriptor rather than failing.
    ///
    /// The root element must always be known.
    pub skip_unknown: bool,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            format_depth: DEFAULT_FORMAT_DEPTH,
            recursive_prefix: RECURSIVE_PREFIX.into(),
            skip_unknown: false,
        }
    }
}

impl ParseConfig {
    pub fn with_format_depth(self, format_depth: usize) -> Self {
        Self {
            format_depth,
            ..self
        }
    }

    pub fn with_recursive_prefix(self, prefix: impl Into<String>) -> Self {
        Self {
            recursive_prefix: prefix.into(),
            ..self
        }
    }

    pub fn with_skip_unknown(self, skip_unknown: bool) -> Self {
        Self {
            skip_unknown,
            ..self
        }
    }
}
