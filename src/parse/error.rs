// Parse driver errors
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

use crate::{ele::BuildError, format::FormatError, xir::QName};
use std::error::Error;
use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

/// Error raised while constructing a value from a token stream.
///
/// Every error is fatal to the parse in which it occurred.
#[derive(Debug, Error)]
pub enum ParseError {
    /// No descriptor is registered for an element.
    #[error("unknown element `{0}`")]
    UnknownElement(QName),

    /// The root element is not the element that was requested.
    #[error("expected root element `{expected}`, found `{found}`")]
    UnexpectedRoot { expected: QName, found: QName },

    /// The token stream ended before the root element was closed.
    ///
    /// `open` is the innermost open element,
    ///   or [`None`] if no element was ever opened.
    #[error("unexpected end of input {}", eof_context(.open))]
    UnexpectedEof { open: Option<QName> },

    /// A token that is not permitted at its position in the stream.
    #[error("unexpected {token}: {reason}")]
    UnexpectedToken { token: String, reason: &'static str },

    /// A builder failed to construct the value of `element`.
    #[error("failed to build `{element}`: {source}")]
    Build {
        element: QName,
        #[source]
        source: BuildError,
    },

    /// Formatting of an attribute value or text of `element` failed.
    #[error("failed to format content of `{element}`: {source}")]
    Format {
        element: QName,
        #[source]
        source: FormatError,
    },

    /// The token source failed.
    #[error("failed to read token: {0}")]
    Source(#[source] Box<dyn Error + Send + Sync>),
}

fn eof_context(open: &Option<QName>) -> String {
    match open {
        Some(name) => format!("while `{name}` is open"),
        None => "before root element".into(),
    }
}

impl ParseError {
    /// Associate a builder error with the element being built.
    pub(super) fn build(element: QName, err: BuildError) -> Self {
        match err {
            BuildError::Format(source) => Self::Format { element, source },
            source => Self::Build { element, source },
        }
    }
}
