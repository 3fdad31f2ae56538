// Tests for the placeholder formatter
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

use super::*;
use crate::resolve::{ResolveResult, TableResolver};

fn table(pairs: &[(&str, &str)]) -> TableResolver {
    pairs.iter().copied().collect()
}

fn fmt(text: &str, r: &dyn Resolver, depth: usize) -> String {
    format(text, Some(r), depth)
        .expect("unexpected format failure")
        .into_owned()
}

#[test]
fn text_without_placeholder_is_identity() {
    let r = table(&[("x", "y")]);

    for text in ["", "a", "ab", "no placeholders } here", "}}"] {
        for depth in [0, 1, 5] {
            let result = format(text, Some(&r), depth).unwrap();

            assert!(
                matches!(result, Cow::Borrowed(s) if std::ptr::eq(s, text)),
                "expected identity for {text:?}",
            );
        }
    }
}

#[test]
fn no_resolver_is_identity() {
    let text = "{x} and {";

    assert!(matches!(
        format(text, None, 5),
        Ok(Cow::Borrowed(s)) if std::ptr::eq(s, text),
    ));
}

#[test]
fn short_text_returned_unchanged() {
    let r = table(&[]);

    assert_eq!("{", fmt("{", &r, 5));
}

#[test]
fn empty_braces_escape_open_brace() {
    let r = table(&[("b", "unused")]);

    assert_eq!("a{b", fmt("a{}b", &r, 5));
    assert_eq!("{", fmt("{}", &r, 0));
    assert_eq!("{{", fmt("{}{}", &r, 5));
}

#[test]
fn escaped_brace_does_not_start_placeholder() {
    let r = table(&[("x", "X")]);

    // `{}x}` is an escaped brace followed by literal `x}`.
    assert_eq!("{x}", fmt("{}x}", &r, 5));
}

#[test]
fn substitutes_known_tokens() {
    let r = table(&[("first", "1"), ("second", "2")]);

    assert_eq!("1 + 2 = 3", fmt("{first} + {second} = 3", &r, 5));
    assert_eq!("12", fmt("{first}{second}", &r, 5));
}

#[test]
fn unknown_token_passes_through() {
    let r = table(&[("x", "X")]);

    assert_eq!("{missing}", fmt("{missing}", &r, 5));
    assert_eq!("X{missing}X", fmt("{x}{missing}{x}", &r, 5));
}

#[test]
fn tokens_are_case_sensitive_and_unstripped() {
    let r = table(&[("@json:A b", "v")]);

    assert_eq!("v", fmt("{@json:A b}", &r, 5));
    assert_eq!("{@json:a b}", fmt("{@json:a b}", &r, 5));
}

#[test]
fn unterminated_placeholder_is_error() {
    let r = table(&[("x", "X")]);

    assert!(matches!(
        format("{x} then {oops", Some(&r), 5),
        Err(FormatError::MalformedPlaceholder { offset: 9, text })
            if text == "{x} then {oops",
    ));
}

#[test]
fn trailing_open_brace_is_error() {
    let r = table(&[]);

    assert!(matches!(
        format("ab{", Some(&r), 5),
        Err(FormatError::MalformedPlaceholder { offset: 2, .. }),
    ));
}

#[test]
fn depth_zero_does_not_follow_alias() {
    let r = table(&[("x", "@string/y"), ("@string/y", "done")]);

    assert_eq!("@string/y", fmt("{x}", &r, 0));
}

#[test]
fn alias_followed_with_depth() {
    let r = table(&[("x", "@string/y"), ("@string/y", "done")]);

    assert_eq!("done", fmt("{x}", &r, 5));
}

#[test]
fn recursive_token_value_is_formatted_again() {
    let r = table(&[
        ("@string/greeting", "Hello, {@string/name}!"),
        ("@string/name", "World"),
    ]);

    assert_eq!("Hello, World!", fmt("{@string/greeting}", &r, 5));
    assert_eq!("Hello, {@string/name}!", fmt("{@string/greeting}", &r, 0));
}

#[test]
fn non_recursive_token_value_is_not_formatted() {
    let r = table(&[("x", "{y}"), ("y", "Y")]);

    assert_eq!("{y}", fmt("{x}", &r, 5));
}

#[test]
fn cyclic_resources_bounded_by_depth() {
    let r = table(&[("@string/a", "<{@string/a}>")]);

    assert_eq!("<<<<{@string/a}>>>>", fmt("<{@string/a}>", &r, 2));
}

#[test]
fn cyclic_alias_bounded_by_depth() {
    let r = table(&[("@string/a", "@string/b"), ("@string/b", "@string/a")]);

    assert_eq!("@string/a", fmt("{@string/a}", &r, 1));
    assert_eq!("@string/b", fmt("{@string/a}", &r, 2));
}

#[test]
fn custom_recursive_prefix() {
    let r = table(&[("@res:a", "{@res:b}"), ("@res:b", "B")]);
    let sut = Formatter::new(&r).with_recursive_prefix("@res:");

    assert_eq!("B", sut.format("{@res:a}", 5).unwrap());
    assert_eq!(
        "{@res:b}",
        Formatter::new(&r).format("{@res:a}", 5).unwrap(),
    );
}

#[test]
fn resolver_failure_is_fatal() {
    struct Failing;

    impl Resolver for Failing {
        fn resolve(&self, token: &str) -> ResolveResult {
            Err(ResolveError::Other {
                token: token.into(),
                source: "down".into(),
            })
        }
    }

    assert!(matches!(
        format("a {b} c", Some(&Failing), 5),
        Err(FormatError::Resolve(ResolveError::Other { token, .. }))
            if token == "b",
    ));
}

#[test]
fn multibyte_text_is_preserved() {
    let r = table(&[("ü", "ö")]);

    assert_eq!("ä ö €", fmt("ä {ü} €", &r, 5));
}
