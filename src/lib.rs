// xmlmagic
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

//! Declarative construction of typed objects from XML.
//!
//! A document is a tree of elements,
//!   each of which is bound by name to a [builder](ele::Builder).
//! The [parse driver](parse::Parser) walks a stream of
//!   [XIR tokens](xir::Token),
//!     formats `{placeholder}`s in attribute values and text against a
//!     [resolver](resolve::Resolver)
//!       (see [`format`]),
//!     and hands the results to each element's builder in document order.
//! The value of the root element is the result of the parse.
//!
//! The [built-in model](model) supplies elements for strings, booleans,
//!   integers, logic, maps and URIs;
//!     [`loader`] provides the usual entry points.

// We build docs for private items.
#![allow(rustdoc::private_intra_doc_links)]

pub mod global;

#[macro_use]
extern crate static_assertions;

pub mod ele;
pub mod format;
pub mod loader;
pub mod model;
pub mod parse;
pub mod resolve;
pub mod sym;
pub mod xir;
