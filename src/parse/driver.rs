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

use super::{ParseConfig, ParseError, ParseResult};
use crate::{
    ele::{
        AnyDescriptor, AnyObject, Attr, BuildContext, BuildError, BuildResult,
        Child, ElementDescriptor, ErasedBuilder, RecyclePool, Scope,
    },
    format::Formatter,
    resolve::Resolver,
    xir::{QName, Token},
};
use std::{any::Any, borrow::Cow, error::Error, sync::Arc};
use tracing::{debug, trace, warn};

/// Drives [`Builder`](crate::ele::Builder)s from a stream of [`Token`]s.
///
/// A parser may be used for any number of parses;
///   each call to [`Parser::pull`] or [`Parser::pull_any`] has its own
///   frame stack.
pub struct Parser<'r> {
    scope: Arc<Scope>,
    resolver: Option<&'r dyn Resolver>,
    config: ParseConfig,
    pool: Arc<RecyclePool>,
}

impl<'r> Parser<'r> {
    /// A parser looking up elements in `scope`,
    ///   without a resolver and with a private recycling pool.
    pub fn new(scope: Arc<Scope>) -> Self {
        Self {
            scope,
            resolver: None,
            config: ParseConfig::default(),
            pool: Arc::new(RecyclePool::default()),
        }
    }

    /// Resolve placeholders of attribute values and text using
    ///   `resolver`.
    ///
    /// Without a resolver,
    ///   content is delivered to builders unformatted.
    pub fn with_resolver(self, resolver: &'r dyn Resolver) -> Self {
        Self {
            resolver: Some(resolver),
            ..self
        }
    }

    pub fn with_config(self, config: ParseConfig) -> Self {
        Self { config, ..self }
    }

    /// Share a recycling pool with other parsers.
    pub fn with_pool(self, pool: Arc<RecyclePool>) -> Self {
        Self { pool, ..self }
    }

    pub fn scope(&self) -> &Arc<Scope> {
        &self.scope
    }

    pub fn config(&self) -> &ParseConfig {
        &self.config
    }

    pub fn pool(&self) -> &Arc<RecyclePool> {
        &self.pool
    }

    /// Construct the value of the root element `root` from `tokens`.
    ///
    /// The root element of the stream must have the name of `root`.
    /// `recycled` is offered to the root builder's
    ///   [`begin`](crate::ele::Builder::begin) in place of an object from
    ///   the recycling pool,
    ///     which allows a caller to populate an existing object.
    pub fn pull<T, I, E>(
        &self,
        root: &ElementDescriptor<T>,
        recycled: Option<T>,
        tokens: I,
    ) -> ParseResult<Option<T>>
    where
        T: Any + Send,
        I: IntoIterator<Item = Result<Token, E>>,
        E: Error + Send + Sync + 'static,
    {
        let recycled = recycled.map(|obj| Box::new(obj) as AnyObject);
        let child = self.run(Some(root.as_any()), recycled, tokens)?;

        child.downcast::<T>().map_err(|_| ParseError::Build {
            element: root.name(),
            source: BuildError::TypeMismatch {
                element: root.name(),
                expected: std::any::type_name::<T>(),
            },
        })
    }

    /// Construct the value of whatever root element `tokens` contains,
    ///   as determined by looking its name up in the scope.
    pub fn pull_any<I, E>(&self, tokens: I) -> ParseResult<Child>
    where
        I: IntoIterator<Item = Result<Token, E>>,
        E: Error + Send + Sync + 'static,
    {
        self.run(None, None, tokens)
    }

    fn run<I, E>(
        &self,
        expected: Option<&AnyDescriptor>,
        mut recycled: Option<AnyObject>,
        tokens: I,
    ) -> ParseResult<Child>
    where
        I: IntoIterator<Item = Result<Token, E>>,
        E: Error + Send + Sync + 'static,
    {
        let formatter = self.resolver.map(|resolver| {
            Formatter::new(resolver)
                .with_recursive_prefix(&self.config.recursive_prefix)
        });

        let env = Env {
            formatter: formatter.as_ref(),
            depth: self.config.format_depth,
            pool: &self.pool,
        };

        let mut stack: Vec<Frame> = Vec::with_capacity(16);

        // Depth of a subtree being skipped.
        let mut skip = 0usize;

        for result in tokens {
            let tok = result.map_err(|e| ParseError::Source(Box::new(e)))?;

            trace!(depth = stack.len(), skip, %tok, "token");

            if skip > 0 {
                match tok {
                    Token::Open(_) => skip += 1,
                    Token::Close => skip -= 1,
                    _ => (),
                }

                continue;
            }

            match tok {
                Token::Open(name) => {
                    let desc = match stack.last_mut() {
                        None => self.root_descriptor(expected, name)?,

                        Some(parent) => {
                            parent.flush_text(&env)?;
                            parent.content = true;

                            match self.scope.lookup(name) {
                                Some(desc) => desc,
                                None if self.config.skip_unknown => {
                                    warn!(
                                        element = %name,
                                        parent = %parent.desc.name(),
                                        "skipping unknown element",
                                    );

                                    skip = 1;
                                    continue;
                                }
                                None => {
                                    return Err(ParseError::UnknownElement(name))
                                }
                            }
                        }
                    };

                    if stack.is_empty() {
                        debug!(
                            root = %name,
                            depth = env.depth,
                            "parse started",
                        );
                    }

                    let recycled =
                        recycled.take().or_else(|| self.pool.obtain(&desc));

                    let mut frame = Frame::new(desc);
                    frame.apply(&env, |b, _, cx| b.begin(recycled, cx))?;
                    stack.push(frame);
                }

                Token::Attr(name, raw) => {
                    let frame = stack.last_mut().ok_or_else(|| {
                        let tok = Token::Attr(name, raw.clone());
                        unexpected(&tok, "no open element")
                    })?;

                    if frame.content {
                        return Err(unexpected(
                            &Token::Attr(name, raw),
                            "attributes must precede element content",
                        ));
                    }

                    let element = frame.desc.name();
                    let attr = Attr::new(name, &raw, env.formatter, env.depth)
                        .map_err(|e| ParseError::build(element, e))?;

                    frame.apply(&env, |b, obj, cx| {
                        b.attribute(obj, &attr, cx)
                    })?;
                }

                Token::Text(text) => match stack.last_mut() {
                    Some(frame) => {
                        frame.content = true;
                        frame.text.push_str(&text);
                    }

                    // Whitespace surrounding the root element is not
                    //   content.
                    None if text.trim().is_empty() => (),
                    None => {
                        return Err(unexpected(
                            &Token::Text(text),
                            "text outside of root element",
                        ))
                    }
                },

                Token::Close => {
                    let mut frame = stack.pop().ok_or_else(|| {
                        unexpected(&Token::Close, "no open element")
                    })?;

                    frame.flush_text(&env)?;
                    frame.apply(&env, |b, obj, cx| b.finish(obj, cx))?;

                    let Frame { desc, obj, .. } = frame;

                    match stack.last_mut() {
                        Some(parent) => {
                            let child = Child::new(desc, obj);
                            parent.apply(&env, |b, pobj, cx| {
                                b.child(pobj, child, cx)
                            })?;
                        }

                        None => {
                            debug!(
                                root = %desc.name(),
                                absent = obj.is_none(),
                                "parse finished",
                            );

                            return Ok(Child::new(desc, obj));
                        }
                    }
                }
            }
        }

        Err(ParseError::UnexpectedEof {
            open: stack.last().map(|frame| frame.desc.name()),
        })
    }

    fn root_descriptor(
        &self,
        expected: Option<&AnyDescriptor>,
        name: QName,
    ) -> ParseResult<AnyDescriptor> {
        match expected {
            Some(desc) if desc.name() == name => Ok(desc.clone()),
            Some(desc) => Err(ParseError::UnexpectedRoot {
                expected: desc.name(),
                found: name,
            }),
            None => self
                .scope
                .lookup(name)
                .ok_or(ParseError::UnknownElement(name)),
        }
    }
}

fn unexpected(tok: &Token, reason: &'static str) -> ParseError {
    ParseError::UnexpectedToken {
        token: tok.to_string(),
        reason,
    }
}

/// State shared by all frames of a single parse.
struct Env<'a> {
    formatter: Option<&'a Formatter<'a>>,
    depth: usize,
    pool: &'a RecyclePool,
}

/// Construction state of a single open element.
struct Frame {
    desc: AnyDescriptor,

    /// Object under construction,
    ///   or [`None`] if not (yet) created.
    obj: Option<AnyObject>,

    /// Scratch state of the element's builder.
    state: Option<AnyObject>,

    /// Text not yet delivered to the builder.
    text: String,

    /// Whether any child element or text has been encountered.
    content: bool,
}

impl Frame {
    fn new(desc: AnyDescriptor) -> Self {
        Self {
            desc,
            obj: None,
            state: None,
            text: String::new(),
            content: false,
        }
    }

    /// Invoke the builder of this frame's element on its object.
    fn apply<F>(&mut self, env: &Env, f: F) -> ParseResult<()>
    where
        F: FnOnce(
            &dyn ErasedBuilder,
            Option<AnyObject>,
            &mut BuildContext,
        ) -> BuildResult<Option<AnyObject>>,
    {
        let obj = self.obj.take();
        let mut cx = BuildContext::new(
            &self.desc,
            &mut self.state,
            env.formatter,
            env.depth,
            env.pool,
        );

        self.obj = f(self.desc.builder(), obj, &mut cx)
            .map_err(|e| ParseError::build(self.desc.name(), e))?;

        Ok(())
    }

    /// Format and deliver accumulated text,
    ///   if any.
    fn flush_text(&mut self, env: &Env) -> ParseResult<()> {
        if self.text.is_empty() {
            return Ok(());
        }

        let raw = std::mem::take(&mut self.text);
        let text = match env.formatter {
            Some(fmt) => fmt.format(&raw, env.depth).map_err(|source| {
                ParseError::Format {
                    element: self.desc.name(),
                    source,
                }
            })?,
            None => Cow::Borrowed(raw.as_str()),
        };

        self.apply(env, |b, obj, cx| b.text(obj, &text, cx))
    }
}
