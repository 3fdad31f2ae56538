// Element construction errors
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

use crate::{format::FormatError, xir::QName};
use thiserror::Error;

pub type BuildResult<T> = Result<T, BuildError>;

/// Error raised by a [`Builder`](super::Builder) while constructing the
///   value of an element.
///
/// All variants are fatal to the enclosing parse.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Required state was missing when the element was finished.
    #[error("element `{element}` is incomplete: {reason}")]
    IncompleteElement { element: QName, reason: String },

    /// The element received more child values than it can hold.
    #[error("element `{element}` cannot accept another child `{child}`")]
    AmbiguousChild { element: QName, child: QName },

    /// A value could not be interpreted as the element requires.
    #[error("invalid value `{value}` for element `{element}`: {reason}")]
    InvalidValue {
        element: QName,
        value: String,
        reason: String,
    },

    #[error(transparent)]
    Format(#[from] FormatError),

    /// A builder received an object that it did not produce.
    ///
    /// This represents a bug in a builder or in the recycling of objects
    ///   and not a problem with the document.
    #[error("builder for `{element}` expected an object of type `{expected}`")]
    TypeMismatch {
        element: QName,
        expected: &'static str,
    },
}

/// Error registering an element descriptor.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A different descriptor is already registered for this name in the
    ///   same scope.
    #[error("element `{0}` is already registered in this scope")]
    Duplicate(QName),
}
