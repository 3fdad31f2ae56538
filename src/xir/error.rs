// XIR error information
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

//! XIR error information.

use quick_xml::events::attributes::AttrError;
use std::str::Utf8Error;
use thiserror::Error;

/// Error attempting to produce a XIR [`Token`](super::Token) stream.
#[derive(Debug, Error)]
pub enum XmlError {
    /// A UTF-8 error together with the (lossy) string that caused it.
    #[error("{0} for string `{1}`")]
    InvalidUtf8(Utf8Error, String),

    /// A namespace prefix was used without a corresponding `xmlns`
    ///   declaration in scope.
    #[error("namespace prefix `{0}` is not bound")]
    UnboundPrefix(String),

    // TODO: Map the quick-xml errors we actually encounter onto variants
    //   of our own once the reader tracks source positions.
    #[error("internal parser error: {0}")]
    QuickXml(#[from] quick_xml::Error),
}

impl From<(Utf8Error, &[u8])> for XmlError {
    fn from((err, bytes): (Utf8Error, &[u8])) -> Self {
        Self::InvalidUtf8(err, String::from_utf8_lossy(bytes).into_owned())
    }
}

impl From<AttrError> for XmlError {
    fn from(err: AttrError) -> Self {
        Self::QuickXml(err.into())
    }
}
