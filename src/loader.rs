// Convenience entry points
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

//! Loading of values from XML documents using the built-in
//!   [`Model`].
//!
//! A [`Loader`] bundles the resolver and configuration of a parse.
//! All documents are parsed against the global scope,
//!   into which the model is registered on first use:
//!
//! ```
//! use xmlmagic::loader::Loader;
//! use xmlmagic::model::Value;
//! use xmlmagic::resolve::TableResolver;
//!
//! let table: TableResolver = [("who", "world")].into_iter().collect();
//! let src = r#"<string xmlns="urn:xmlmagic:model">hello {who}</string>"#;
//!
//! let value = Loader::new()
//!     .with_resolver(&table)
//!     .load_value(src.as_bytes())
//!     .unwrap();
//!
//! assert_eq!(value, Some(Value::Str("hello world".into())));
//! ```
//!
//! Populating a caller-supplied record
//!   (see [`Loader::populate`])
//!   registers its root element in a scope private to that invocation,
//!     so that concurrent invocations may bind the same root name to
//!     different record types.

use crate::{
    ele::{ElementDescriptor, RecyclePool, RegistryError, Scope},
    model::{FieldTable, Model, RecordBuilder, Value},
    parse::{ParseConfig, ParseError, Parser},
    resolve::Resolver,
    xir::{
        reader::{ReaderConfig, XmlReader},
        QName, Token,
    },
};
use std::{any::Any, error::Error, io::BufRead, sync::Arc};
use thiserror::Error;
use tracing::debug;


#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The root element finished without a value.
    #[error("root element `{0}` has no value")]
    Absent(QName),
}

pub type LoadResult<T> = Result<T, LoadError>;

/// Loads values from documents.
///
/// Loaders created with [`Loader::new`] have no resolver and their own
///   recycling pool.
#[derive(Default, Clone)]
pub struct Loader<'r> {
    resolver: Option<&'r dyn Resolver>,
    config: ParseConfig,
    reader_config: ReaderConfig,
    pool: Arc<RecyclePool>,
}

impl<'r> Loader<'r> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resolver(self, resolver: &'r dyn Resolver) -> Self {
        Self {
            resolver: Some(resolver),
            ..self
        }
    }

    pub fn with_config(self, config: ParseConfig) -> Self {
        Self { config, ..self }
    }

    pub fn with_reader_config(self, reader_config: ReaderConfig) -> Self {
        Self {
            reader_config,
            ..self
        }
    }

    pub fn with_pool(self, pool: Arc<RecyclePool>) -> Self {
        Self { pool, ..self }
    }

    pub fn config(&self) -> &ParseConfig {
        &self.config
    }

    fn parser(&self, scope: Arc<Scope>) -> Parser<'r> {
        let parser = Parser::new(scope)
            .with_config(self.config.clone())
            .with_pool(self.pool.clone());

        match self.resolver {
            Some(resolver) => parser.with_resolver(resolver),
            None => parser,
        }
    }

    fn reader<B: BufRead>(&self, src: B) -> XmlReader<B> {
        XmlReader::with_config(src, self.reader_config)
    }

    /// Load the value of whatever root element `src` contains.
    ///
    /// The root element must be known to the global scope.
    pub fn load_value<B>(&self, src: B) -> LoadResult<Option<Value>>
    where
        B: BufRead,
    {
        Model::global()?;

        let child = self.parser(Scope::global()).pull_any(self.reader(src))?;
        debug!(root = %child.name(), "loaded value");

        Ok(Value::from_child(child))
    }

    /// Load the value of the root element `root` from `src`.
    ///
    /// `root` need not be registered;
    ///   its descendants are looked up in the global scope.
    pub fn load<T, B>(
        &self,
        root: &ElementDescriptor<T>,
        src: B,
    ) -> LoadResult<Option<T>>
    where
        T: Any + Send,
        B: BufRead,
    {
        Model::global()?;

        Ok(self
            .parser(Scope::global())
            .pull(root, None, self.reader(src))?)
    }

    /// Populate `instance` from the root element `root` of `tokens`
    ///   using the setters of `table`.
    ///
    /// `root` is registered in a new scope whose parent is the global
    ///   scope;
    ///     that scope exists only for the duration of this call.
    pub fn populate<T, I, E>(
        &self,
        instance: T,
        root: QName,
        table: FieldTable<T>,
        tokens: I,
    ) -> LoadResult<T>
    where
        T: Default + Send + 'static,
        I: IntoIterator<Item = Result<Token, E>>,
        E: Error + Send + Sync + 'static,
    {
        Model::global()?;

        let scope = Arc::new(Scope::child_of(Scope::global()));
        let desc = scope.define(root, RecordBuilder::new(table))?;

        debug!(%root, "populating instance");

        self.parser(scope)
            .pull(&desc, Some(instance), tokens)?
            .ok_or(LoadError::Absent(root))
    }

    /// Populate `instance` from the XML document `src`.
    ///
    /// See [`Loader::populate`].
    pub fn populate_xml<T, B>(
        &self,
        instance: T,
        root: QName,
        table: FieldTable<T>,
        src: B,
    ) -> LoadResult<T>
    where
        T: Default + Send + 'static,
        B: BufRead,
    {
        self.populate(instance, root, table, self.reader(src))
    }
}

/// Populate `instance` from `tokens` using `resolver`,
///   with the default configuration.
///
/// See [`Loader::populate`].
pub fn populate<T, I, E>(
    instance: T,
    root: QName,
    table: FieldTable<T>,
    tokens: I,
    resolver: Option<&dyn Resolver>,
) -> LoadResult<T>
where
    T: Default + Send + 'static,
    I: IntoIterator<Item = Result<Token, E>>,
    E: Error + Send + Sync + 'static,
{
    let loader = Loader::new();

    match resolver {
        Some(resolver) => loader
            .with_resolver(resolver)
            .populate(instance, root, table, tokens),
        None => loader.populate(instance, root, table, tokens),
    }
}
