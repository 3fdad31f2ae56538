// XIR reader
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

//! Parse XML files into a XIR [`Token`] stream.
//!
//! This uses [`quick_xml`] as the parser.

use super::{QName, RawValue, Token, XmlError};
use crate::sym::GlobalSymbolIntern;
use quick_xml::{
    events::{BytesStart, Event as QuickXmlEvent},
    name::ResolveResult,
    NsReader,
};
use std::{collections::VecDeque, io::BufRead, result};

pub type Result<T> = result::Result<T, XmlError>;

/// Configuration of an [`XmlReader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Strip leading and trailing whitespace from text,
    ///   discarding text that consists only of whitespace.
    ///
    /// This is almost always what is wanted for documents that describe
    ///   objects,
    ///     where indentation between elements is not meaningful.
    pub trim_text: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self { trim_text: true }
    }
}

/// Parse XML into a XIR [`Token`] stream.
///
/// This reader is intended to be used as an [`Iterator`].
///
/// The underlying reader produces events in chunks that are larger than
///   XIR tokens
///     (an opening tag carries all of its attributes),
///   so tokens retrieved via this iterator are buffered.
/// Parsing takes place when that buffer is exhausted and the next event
///   is requested from the underlying reader
///     (see [`XmlReader::refill_buf`]).
/// Errors can only occur during parsing,
///   and will never occur on buffered tokens.
///
/// Names are resolved against the namespace declarations in scope,
///   and the declarations themselves are not emitted as attributes.
///
/// [`None`] is returned only on EOF,
///   not on error.
pub struct XmlReader<B: BufRead> {
    /// Inner parser.
    reader: NsReader<B>,

    /// Buffer for [`NsReader`].
    readbuf: Vec<u8>,

    /// [`Token`] buffer populated upon receiving a new event from
    ///   `reader`.
    ///
    /// Tokens are pushed onto the front and popped from the back.
    tokbuf: VecDeque<Token>,
}

impl<B: BufRead> XmlReader<B> {
    pub fn new(reader: B) -> Self {
        Self::with_config(reader, ReaderConfig::default())
    }

    pub fn with_config(reader: B, config: ReaderConfig) -> Self {
        let mut reader = NsReader::from_reader(reader);
        reader.config_mut().trim_text(config.trim_text);

        Self {
            reader,
            readbuf: Vec::new(),
            // This capacity is largely arbitrary,
            //   but [`Token`]s are small enough that it likely does not
            //   matter much.
            tokbuf: VecDeque::with_capacity(32),
        }
    }

    /// Parse using the underlying [`NsReader`] and populate the
    ///   [`Token`] buffer.
    ///
    /// This is intended to be invoked once the buffer has been depleted by
    ///   [`XmlReader::next`].
    pub fn refill_buf(&mut self) -> Option<Result<Token>> {
        loop {
            // Clear any previous buffer to free unneeded data.
            self.tokbuf.clear();
            self.readbuf.clear();

            let ev = match self.reader.read_event_into(&mut self.readbuf) {
                Ok(ev) => ev,
                Err(e) => return Some(Err(e.into())),
            };

            return match ev {
                // This is the only time we'll consider the iterator to be
                //   done.
                QuickXmlEvent::Eof => None,

                QuickXmlEvent::Start(ele) => Some(Self::parse_element_open(
                    &self.reader,
                    &mut self.tokbuf,
                    &ele,
                )),

                QuickXmlEvent::Empty(ele) => Some(
                    Self::parse_element_open(
                        &self.reader,
                        &mut self.tokbuf,
                        &ele,
                    )
                    .map(|open| {
                        // Closes after all attributes have been popped.
                        self.tokbuf.push_front(Token::Close);
                        open
                    }),
                ),

                // The reader checks that end names match,
                //   so the name carries no further information.
                QuickXmlEvent::End(_) => Some(Ok(Token::Close)),

                QuickXmlEvent::Text(bytes) => match bytes.unescape() {
                    Err(e) => Some(Err(e.into())),
                    Ok(text) if text.is_empty() => continue,
                    Ok(text) => Some(Ok(Token::Text(text.into_owned()))),
                },

                QuickXmlEvent::CData(bytes) => Some(
                    std::str::from_utf8(&bytes)
                        .map(|text| Token::Text(text.to_owned()))
                        .map_err(|e| XmlError::from((e, &bytes[..]))),
                ),

                // Comments, processing instructions, the declaration,
                //   and doctypes carry nothing of interest to builders.
                _ => continue,
            };
        }
    }

    /// Parse opening element and its attributes into a XIR [`Token`]
    ///   stream.
    ///
    /// The opening element is returned rather than being added to the token
    ///   buffer,
    ///     since the intent is to provide that token immediately.
    fn parse_element_open(
        reader: &NsReader<B>,
        tokbuf: &mut VecDeque<Token>,
        ele: &BytesStart,
    ) -> Result<Token> {
        let (ns, local) = reader.resolve_element(ele.name());
        let name = Self::qname(ns, local.as_ref())?;

        // The order of attributes will be maintained.
        for result in ele.attributes() {
            let attr = result?;

            // `xmlns` and `xmlns:*` have already been consumed by the
            //   namespace resolver.
            if attr.key.as_namespace_binding().is_some() {
                continue;
            }

            let (ns, local) = reader.resolve_attribute(attr.key);
            let attr_name = Self::qname(ns, local.as_ref())?;
            let value = attr.unescape_value()?;

            tokbuf.push_front(Token::Attr(
                attr_name,
                RawValue::Text(value.into_owned()),
            ));
        }

        Ok(Token::Open(name))
    }

    fn qname(ns: ResolveResult, local: &[u8]) -> Result<QName> {
        let local = std::str::from_utf8(local)
            .map_err(|e| XmlError::from((e, local)))?
            .intern();

        let ns = match ns {
            ResolveResult::Bound(ns) => Some(
                std::str::from_utf8(ns.as_ref())
                    .map_err(|e| XmlError::from((e, ns.as_ref())))?
                    .intern(),
            ),
            ResolveResult::Unbound => None,
            ResolveResult::Unknown(prefix) => {
                return Err(XmlError::UnboundPrefix(
                    String::from_utf8_lossy(&prefix).into_owned(),
                ))
            }
        };

        Ok(QName::from_syms(ns, local))
    }
}

impl<B: BufRead> Iterator for XmlReader<B> {
    type Item = Result<Token>;

    /// Produce the next XIR [`Token`] from the input.
    ///
    /// For more information on how this reader operates,
    ///   see [`XmlReader`].
    fn next(&mut self) -> Option<Self::Item> {
        self.tokbuf
            .pop_back()
            .map(Result::Ok)
            .or_else(|| self.refill_buf())
    }
}
