// URIs
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

//! URIs assembled from their parts.
//!
//! A URI may be given in any of three forms,
//!   the first two of which may be mixed:
//!
//! ```xml
//! <uri xmlns="urn:xmlmagic:model"
//!      scheme="https" authority="example.com" path="/a b" fragment="top" />
//!
//! <uri xmlns="urn:xmlmagic:model">
//!   <scheme>https</scheme>
//!   <authority>example.com</authority>
//!   <append-path>users</append-path>
//!   <append-path>{@json:user.id}</append-path>
//!   <query-parameter key="lang">en</query-parameter>
//! </uri>
//!
//! <uri xmlns="urn:xmlmagic:model">https://example.com/users?lang=en</uri>
//! ```
//!
//! Parts given as attributes or child elements replace one another,
//!   except that a child without a value leaves its part as it was
//!     (an empty `path` clears the path).
//! A URI given as text replaces all parts given before it;
//!   children following the text are applied on top of it.
//! Parts are percent-encoded as necessary when the URI is assembled.

use crate::{
    ele::{
        Attr, BuildContext, BuildError, BuildResult, Builder, Child,
        ElementDescriptor,
    },
    xir::QName,
};
use std::fmt::Display;
use url::Url;

/// A query parameter of a URI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParam {
    pub key: String,
    pub value: String,
}

/// A [`QueryParam`] having the mandatory attribute `key` and its value as
///   text.
///
/// An element without text has an empty value.
#[derive(Debug)]
pub struct QueryParamBuilder {
    key: QName,
}

impl QueryParamBuilder {
    pub fn new() -> Self {
        Self {
            key: QName::new_local("key"),
        }
    }
}

impl Default for QueryParamBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder for QueryParamBuilder {
    type Object = QueryParam;

    fn begin(
        &self,
        _recycled: Option<QueryParam>,
        _cx: &mut BuildContext,
    ) -> BuildResult<Option<QueryParam>> {
        Ok(None)
    }

    fn attribute(
        &self,
        obj: Option<QueryParam>,
        attr: &Attr,
        _cx: &mut BuildContext,
    ) -> BuildResult<Option<QueryParam>> {
        if attr.name() != self.key {
            return Ok(obj);
        }

        Ok(Some(QueryParam {
            key: attr.value().into(),
            value: String::new(),
        }))
    }

    fn text(
        &self,
        obj: Option<QueryParam>,
        text: &str,
        cx: &mut BuildContext,
    ) -> BuildResult<Option<QueryParam>> {
        cx.state_or_default::<String>().push_str(text);
        Ok(obj)
    }

    fn finish(
        &self,
        obj: Option<QueryParam>,
        cx: &mut BuildContext,
    ) -> BuildResult<Option<QueryParam>> {
        let mut param =
            obj.ok_or_else(|| cx.incomplete("missing attribute `key`"))?;

        if let Some(value) = cx.take_state::<String>() {
            param.value = value;
        }

        Ok(Some(param))
    }
}

/// Descriptors of the child elements of a URI.
#[derive(Debug, Clone)]
pub struct UriParts {
    pub scheme: ElementDescriptor<String>,
    pub authority: ElementDescriptor<String>,
    pub path: ElementDescriptor<String>,
    pub append_path: ElementDescriptor<String>,
    pub fragment: ElementDescriptor<String>,
    pub query_parameter: ElementDescriptor<QueryParam>,
}

/// Parts of a URI collected from attributes,
///   children,
///   and text.
#[derive(Debug, Default)]
struct Pending {
    scheme: Option<String>,
    authority: Option<String>,
    path: Option<String>,
    append: Vec<String>,
    query: Vec<(String, String)>,
    raw_query: Option<String>,
    fragment: Option<String>,
}

fn pending<'c>(cx: &'c mut BuildContext) -> &'c mut Pending {
    cx.state_or_default()
}

#[derive(Debug)]
struct Attrs {
    scheme: QName,
    authority: QName,
    path: QName,
    fragment: QName,
}

/// The string form of a URI.
///
/// The URI must have a scheme.
/// An element with no parts at all has no value.
#[derive(Debug)]
pub struct UriBuilder {
    parts: UriParts,
    attrs: Attrs,
}

impl UriBuilder {
    pub fn new(parts: UriParts) -> Self {
        Self {
            parts,
            attrs: Attrs {
                scheme: QName::new_local("scheme"),
                authority: QName::new_local("authority"),
                path: QName::new_local("path"),
                fragment: QName::new_local("fragment"),
            },
        }
    }

    pub fn parts(&self) -> &UriParts {
        &self.parts
    }
}

impl Builder for UriBuilder {
    type Object = String;

    fn begin(
        &self,
        _recycled: Option<String>,
        _cx: &mut BuildContext,
    ) -> BuildResult<Option<String>> {
        Ok(None)
    }

    fn attribute(
        &self,
        obj: Option<String>,
        attr: &Attr,
        cx: &mut BuildContext,
    ) -> BuildResult<Option<String>> {
        let name = attr.name();
        let Attrs {
            scheme,
            authority,
            path,
            fragment,
        } = &self.attrs;

        if ![scheme, authority, path, fragment].contains(&&name) {
            return Ok(obj);
        }

        let value = Some(attr.value().into());
        let target = pending(cx);

        if name == *scheme {
            target.scheme = value;
        } else if name == *authority {
            target.authority = value;
        } else if name == *path {
            target.path = value;
        } else {
            target.fragment = value;
        }

        Ok(obj)
    }

    fn child(
        &self,
        obj: Option<String>,
        child: Child,
        cx: &mut BuildContext,
    ) -> BuildResult<Option<String>> {
        let parts = &self.parts;

        // Children without a value leave the part as it was.
        if child.is(&parts.scheme) {
            if let Some(scheme) = child.take(&parts.scheme) {
                pending(cx).scheme = Some(scheme);
            }
        } else if child.is(&parts.authority) {
            if let Some(authority) = child.take(&parts.authority) {
                pending(cx).authority = Some(authority);
            }
        } else if child.is(&parts.path) {
            let path = child.take(&parts.path).unwrap_or_default();
            pending(cx).path = Some(path);
        } else if child.is(&parts.append_path) {
            let segment = child.take(&parts.append_path).unwrap_or_default();
            pending(cx).append.push(segment);
        } else if child.is(&parts.fragment) {
            if let Some(fragment) = child.take(&parts.fragment) {
                pending(cx).fragment = Some(fragment);
            }
        } else if let Some(param) = child.take(&parts.query_parameter) {
            pending(cx).query.push((param.key, param.value));
        }

        Ok(obj)
    }

    fn text(
        &self,
        obj: Option<String>,
        text: &str,
        cx: &mut BuildContext,
    ) -> BuildResult<Option<String>> {
        let text = text.trim();
        let url = Url::parse(text)
            .map_err(|e| cx.invalid(text, format!("invalid URI: {e}")))?;

        cx.set_state(Pending {
            scheme: Some(url.scheme().into()),
            authority: url.has_authority().then(|| url.authority().into()),
            path: Some(url.path().into()),
            raw_query: url.query().map(Into::into),
            fragment: url.fragment().map(Into::into),
            ..Pending::default()
        });

        Ok(obj)
    }

    fn finish(
        &self,
        _obj: Option<String>,
        cx: &mut BuildContext,
    ) -> BuildResult<Option<String>> {
        match cx.take_state::<Pending>() {
            None => Ok(None),
            Some(pending) => assemble(pending, cx).map(Some),
        }
    }
}

fn assemble(pending: Pending, cx: &BuildContext) -> BuildResult<String> {
    let Pending {
        scheme,
        authority,
        path,
        append,
        query,
        raw_query,
        fragment,
    } = pending;

    let scheme = scheme.ok_or_else(|| cx.incomplete("missing scheme"))?;

    let base = match authority {
        Some(authority) => format!("{scheme}://{authority}"),
        None => format!("{scheme}:"),
    };

    let invalid = |e: &dyn Display| -> BuildError {
        cx.invalid(base.as_str(), format!("invalid URI: {e}"))
    };

    let mut url = Url::parse(&base).map_err(|e| invalid(&e))?;

    if let Some(path) = path {
        url.set_path(&path);
    }

    if !append.is_empty() {
        url.path_segments_mut()
            .map_err(|()| invalid(&"URI cannot have path segments"))?
            .pop_if_empty()
            .extend(&append);
    }

    url.set_query(raw_query.as_deref());

    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(&query);
    }

    url.set_fragment(fragment.as_deref());

    Ok(url.into())
}
