// Parse driver
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

//! Construction of values from a stream of XIR [`Token`]s.
//!
//! The [`Parser`] consumes [`Token`]s from any source
//!   (typically an [`XmlReader`](crate::xir::reader::XmlReader))
//!   and maintains a stack of frames,
//!     one for each open element.
//! Each frame holds the descriptor of its element,
//!   the object under construction,
//!   and the scratch state private to that element's builder.
//!
//! For each token the driver invokes the corresponding method of the
//!   [`Builder`](crate::ele::Builder) of the innermost open element:
//!
//!   - [`Token::Open`] looks up the element in the parser's
//!       [`Scope`](crate::ele::Scope),
//!       obtains a recycled object if one is available,
//!       and pushes a new frame after calling `begin`;
//!   - [`Token::Attr`] is formatted and applied using `attribute`;
//!   - [`Token::Text`] is accumulated and,
//!       once the element opens a child or closes,
//!       formatted and applied using `text`;
//!   - [`Token::Close`] calls `finish` and pops the frame,
//!       handing the finished value to the parent's `child`,
//!       or returning it to the caller if the root element has closed.
//!
//! Parsing is synchronous and holds no state between invocations other
//!   than what is shared through the scope and the
//!   [`RecyclePool`](crate::ele::RecyclePool).
//! Any error unwinds the stack;
//!   objects of frames that never finished are dropped and never
//!   recycled.

mod config;
mod driver;
mod error;

pub use config::ParseConfig;
pub use driver::Parser;
pub use error::{ParseError, ParseResult};

#[cfg(doc)]
use crate::xir::Token;
